//! Scraper client core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod timestamp;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    split_url_lines, Alert, AlertSeverity, AppState, PageResult, RequestFailure, RequestId,
    ValidationError, RESULTS_FAILED_MESSAGE, SCRAPE_FAILED_MESSAGE,
};
pub use timestamp::{format_timestamp, parse_timestamp, TIMESTAMP_DISPLAY_FORMAT};
pub use update::update;
pub use view_model::{
    AppViewModel, FieldOptionView, PageRowView, PendingView, ValueRowView, SCRAPE_BUSY_LABEL,
    SCRAPE_IDLE_LABEL, URL_INPUT_HINT,
};
