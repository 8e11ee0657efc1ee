use std::time::Duration;

use client_logging::{abbreviate, client_debug, LOG_SNIPPET_CHARS};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    ApiError, FailureKind, FieldsResponse, FilterQuery, PageRecord, PagesResponse, ScrapeRequest,
    ScrapeResponse, ValuesResponse,
};

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000/";

const FILTERS_PATH: &str = "api/filters/";
const SCRAPE_PATH: &str = "api/scrape/";
const RESULTS_PATH: &str = "api/filtered-results/";

#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// Backend origin, always ending in `/` so endpoint paths join beneath it.
    pub base_url: Url,
    /// `None` leaves the transport default in place.
    pub request_timeout: Option<Duration>,
}

impl ApiSettings {
    pub fn new(base: &str) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(base.trim())
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, format!("{base}: {err}")))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::new(
                FailureKind::InvalidUrl,
                format!("{base}: unsupported scheme {}", base_url.scheme()),
            ));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        base_url.set_query(None);
        base_url.set_fragment(None);
        Ok(Self {
            base_url,
            request_timeout: None,
        })
    }

    pub fn with_request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_API_BASE).expect("default api base is a valid url"),
            request_timeout: None,
        }
    }
}

/// The four backend operations the client consumes.
#[async_trait::async_trait]
pub trait ScraperApi: Send + Sync {
    async fn list_fields(&self) -> Result<Vec<String>, ApiError>;

    async fn list_values(&self, field: &str) -> Result<Vec<String>, ApiError>;

    /// Returns the backend's status message verbatim.
    async fn trigger_scrape(&self, urls: &[String]) -> Result<String, ApiError>;

    async fn filtered_results(&self, query: &FilterQuery) -> Result<Vec<PageRecord>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestScraperApi {
    client: reqwest::Client,
    settings: ApiSettings,
}

impl ReqwestScraperApi {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { client, settings })
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let url = response.url().clone();
        let body = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            let snippet = String::from_utf8_lossy(&body);
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("{url}: {}", abbreviate(snippet.trim(), LOG_SNIPPET_CHARS)),
            ));
        }

        client_debug!("{} -> {} ({} bytes)", url, status, body.len());
        serde_json::from_slice(&body)
            .map_err(|err| ApiError::new(FailureKind::Decode, format!("{url}: {err}")))
    }
}

#[async_trait::async_trait]
impl ScraperApi for ReqwestScraperApi {
    async fn list_fields(&self) -> Result<Vec<String>, ApiError> {
        let url = self.settings.endpoint(FILTERS_PATH)?;
        let body: FieldsResponse = self.send_json(self.client.get(url)).await?;
        Ok(body.fields)
    }

    async fn list_values(&self, field: &str) -> Result<Vec<String>, ApiError> {
        let url = self.settings.endpoint(FILTERS_PATH)?;
        let request = self.client.get(url).query(&[("field", field)]);
        let body: ValuesResponse = self.send_json(request).await?;
        Ok(body.values)
    }

    async fn trigger_scrape(&self, urls: &[String]) -> Result<String, ApiError> {
        let url = self.settings.endpoint(SCRAPE_PATH)?;
        let request = self.client.post(url).json(&ScrapeRequest { urls });
        let body: ScrapeResponse = self.send_json(request).await?;
        Ok(body.message)
    }

    async fn filtered_results(&self, query: &FilterQuery) -> Result<Vec<PageRecord>, ApiError> {
        let url = self.settings.endpoint(RESULTS_PATH)?;
        let request = self.client.get(url).query(&query.to_query_pairs());
        let body: PagesResponse = self.send_json(request).await?;
        Ok(body.pages)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Decode, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}
