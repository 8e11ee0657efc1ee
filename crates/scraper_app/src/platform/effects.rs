use client_logging::{abbreviate, client_debug, client_info, client_warn, LOG_SNIPPET_CHARS};
use scraper_api::{ApiError, ApiEvent, EngineHandle, FilterQuery, PageRecord};
use scraper_core::{Effect, Msg, PageResult, RequestFailure};

/// Executes core effects on the request engine and turns its events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::LoadFields { request } => {
                    client_info!("LoadFields request={}", request);
                    self.engine.load_fields(request);
                }
                Effect::LoadValues { request, field } => {
                    client_info!("LoadValues request={} field={}", request, field);
                    self.engine.load_values(request, field);
                }
                Effect::SubmitScrape { urls } => {
                    client_info!(
                        "SubmitScrape url_count={} first={}",
                        urls.len(),
                        abbreviate(urls.first().map(String::as_str).unwrap_or(""), LOG_SNIPPET_CHARS)
                    );
                    self.engine.submit_scrape(urls);
                }
                Effect::FetchResults {
                    request,
                    field,
                    values,
                } => {
                    client_info!(
                        "FetchResults request={} field={} values={:?}",
                        request,
                        field,
                        values
                    );
                    self.engine
                        .fetch_results(request, FilterQuery::any_of(&field, values));
                }
            }
        }
    }

    /// Collects every event that has arrived since the last call.
    pub fn drain(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            inbox.push(map_event(event));
        }
        inbox
    }
}

/// Logs failures and converts an engine event into the matching core message.
pub(crate) fn map_event(event: ApiEvent) -> Msg {
    match event {
        ApiEvent::FieldsLoaded { request, result } => {
            if let Err(err) = &result {
                client_warn!("Error fetching fields (request {}): {}", request, err);
            }
            Msg::FieldsLoaded {
                request,
                result: result.map_err(to_failure),
            }
        }
        ApiEvent::ValuesLoaded {
            request,
            field,
            result,
        } => {
            match &result {
                Ok(values) => client_debug!("Field {} has {} values", field, values.len()),
                Err(err) => client_warn!("Error fetching values for {}: {}", field, err),
            }
            Msg::ValuesLoaded {
                request,
                result: result.map_err(to_failure),
            }
        }
        ApiEvent::ScrapeFinished { url_count, result } => {
            match &result {
                Ok(message) => client_info!(
                    "Scrape of {} urls accepted: {}",
                    url_count,
                    abbreviate(message, LOG_SNIPPET_CHARS)
                ),
                Err(err) => client_warn!("Error during scraping of {} urls: {}", url_count, err),
            }
            Msg::ScrapeFinished(result.map_err(to_failure))
        }
        ApiEvent::ResultsLoaded { request, result } => {
            match &result {
                Ok(pages) => client_debug!("Filtered results: {} pages", pages.len()),
                Err(err) => client_warn!("Error fetching pages (request {}): {}", request, err),
            }
            Msg::ResultsLoaded {
                request,
                result: result
                    .map(|pages| pages.into_iter().map(to_page).collect())
                    .map_err(to_failure),
            }
        }
    }
}

fn to_failure(err: ApiError) -> RequestFailure {
    RequestFailure::new(err.to_string())
}

fn to_page(record: PageRecord) -> PageResult {
    PageResult {
        url: record.url,
        title: record.title,
        timestamp: record.timestamp,
    }
}
