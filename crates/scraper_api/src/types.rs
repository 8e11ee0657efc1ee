use std::fmt;

use serde::{Deserialize, Serialize};

pub type RequestId = u64;

/// `GET /api/filters/`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FieldsResponse {
    pub fields: Vec<String>,
}

/// `GET /api/filters/?field=<name>`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ValuesResponse {
    pub values: Vec<String>,
}

/// `POST /api/scrape/` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapeRequest<'a> {
    pub urls: &'a [String],
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScrapeResponse {
    pub message: String,
}

/// `GET /api/filtered-results/`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PagesResponse {
    pub pages: Vec<PageRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageRecord {
    pub url: String,
    pub title: String,
    pub timestamp: String,
}

/// Completion of a request issued through [`crate::EngineHandle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiEvent {
    FieldsLoaded {
        request: RequestId,
        result: Result<Vec<String>, ApiError>,
    },
    ValuesLoaded {
        request: RequestId,
        field: String,
        result: Result<Vec<String>, ApiError>,
    },
    ScrapeFinished {
        url_count: usize,
        result: Result<String, ApiError>,
    },
    ResultsLoaded {
        request: RequestId,
        result: Result<Vec<PageRecord>, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.kind, self.message)
        }
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Decode => write!(f, "unexpected response body"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
