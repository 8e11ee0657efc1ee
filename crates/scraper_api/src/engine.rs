use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use client_logging::client_debug;
use thiserror::Error;

use crate::client::{ApiSettings, ReqwestScraperApi, ScraperApi};
use crate::{ApiError, ApiEvent, FilterQuery, RequestId};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to build http client: {0}")]
    Client(#[from] ApiError),
    #[error("failed to start request runtime: {0}")]
    Runtime(#[from] io::Error),
}

enum ApiCommand {
    LoadFields {
        request: RequestId,
    },
    LoadValues {
        request: RequestId,
        field: String,
    },
    SubmitScrape {
        urls: Vec<String>,
    },
    FetchResults {
        request: RequestId,
        query: FilterQuery,
    },
}

/// Runs backend requests on a background tokio runtime. Every command is
/// answered by exactly one [`ApiEvent`], in completion order.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<ApiCommand>,
    event_rx: mpsc::Receiver<ApiEvent>,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings) -> Result<Self, EngineError> {
        let api = ReqwestScraperApi::new(settings)?;
        Self::with_api(Arc::new(api))
    }

    pub fn with_api(api: Arc<dyn ScraperApi>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("scraper-api".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let api = api.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        let event = handle_command(api.as_ref(), command).await;
                        let _ = event_tx.send(event);
                    });
                }
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn load_fields(&self, request: RequestId) {
        self.send(ApiCommand::LoadFields { request });
    }

    pub fn load_values(&self, request: RequestId, field: impl Into<String>) {
        self.send(ApiCommand::LoadValues {
            request,
            field: field.into(),
        });
    }

    pub fn submit_scrape(&self, urls: Vec<String>) {
        self.send(ApiCommand::SubmitScrape { urls });
    }

    pub fn fetch_results(&self, request: RequestId, query: FilterQuery) {
        self.send(ApiCommand::FetchResults { request, query });
    }

    pub fn try_recv(&self) -> Option<ApiEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Blocks until the next event; `None` once the runtime thread is gone.
    pub fn recv(&self) -> Option<ApiEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<ApiEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    fn send(&self, command: ApiCommand) {
        if self.cmd_tx.send(command).is_err() {
            client_debug!("request runtime has stopped; command dropped");
        }
    }
}

async fn handle_command(api: &dyn ScraperApi, command: ApiCommand) -> ApiEvent {
    match command {
        ApiCommand::LoadFields { request } => ApiEvent::FieldsLoaded {
            request,
            result: api.list_fields().await,
        },
        ApiCommand::LoadValues { request, field } => {
            let result = api.list_values(&field).await;
            ApiEvent::ValuesLoaded {
                request,
                field,
                result,
            }
        }
        ApiCommand::SubmitScrape { urls } => ApiEvent::ScrapeFinished {
            url_count: urls.len(),
            result: api.trigger_scrape(&urls).await,
        },
        ApiCommand::FetchResults { request, query } => ApiEvent::ResultsLoaded {
            request,
            result: api.filtered_results(&query).await,
        },
    }
}
