//! Scraper API: HTTP boundary to the scraping backend and background request execution.
mod client;
mod engine;
mod query;
mod types;

pub use client::{ApiSettings, ReqwestScraperApi, ScraperApi, DEFAULT_API_BASE};
pub use engine::{EngineError, EngineHandle};
pub use query::{FilterCriterion, FilterQuery};
pub use types::{
    ApiError, ApiEvent, FailureKind, FieldsResponse, PageRecord, PagesResponse, RequestId,
    ScrapeRequest, ScrapeResponse, ValuesResponse,
};
