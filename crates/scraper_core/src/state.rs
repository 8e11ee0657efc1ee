use std::collections::VecDeque;

use thiserror::Error;

pub type RequestId = u64;

pub const SCRAPE_FAILED_MESSAGE: &str = "Failed to scrape URLs";
pub const RESULTS_FAILED_MESSAGE: &str = "Failed to fetch filtered results.";

/// One scraped page as returned by the filtered-results query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    pub url: String,
    pub title: String,
    /// Capture instant in the backend's wire format; rendered at view time.
    pub timestamp: String,
}

/// Core-side description of a failed request. Transport details stay in `detail`
/// for logging; what the user sees is decided by [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailure {
    pub detail: String,
}

impl RequestFailure {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Local validation failures. `Display` is the prompt shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter at least one URL.")]
    EmptyUrlInput,
    #[error("Please select a field.")]
    NoFieldSelected,
    #[error("Please select at least one value.")]
    NoValuesSelected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    Information,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub severity: AlertSeverity,
    pub text: String,
}

impl Alert {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            severity: AlertSeverity::Information,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: AlertSeverity::Error,
            text: text.into(),
        }
    }
}

impl From<ValidationError> for Alert {
    fn from(err: ValidationError) -> Self {
        Self {
            severity: AlertSeverity::Warning,
            text: err.to_string(),
        }
    }
}

/// Latest issued request per slot. A response is accepted only when its id
/// matches; anything else belongs to a superseded request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct InFlight {
    pub(crate) fields: Option<RequestId>,
    pub(crate) values: Option<RequestId>,
    pub(crate) results: Option<RequestId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    mounted: bool,
    url_input: String,
    fields: Vec<String>,
    values: Vec<String>,
    selected_field: Option<String>,
    selected_values: Vec<String>,
    pages: Vec<PageResult>,
    scrape_in_flight: bool,
    alerts: VecDeque<Alert>,
    next_request: RequestId,
    in_flight: InFlight,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url_input(&self) -> &str {
        &self.url_input
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn selected_field(&self) -> Option<&str> {
        self.selected_field.as_deref()
    }

    /// Checked values in the order they were checked.
    pub fn selected_values(&self) -> &[String] {
        &self.selected_values
    }

    pub fn pages(&self) -> &[PageResult] {
        &self.pages
    }

    pub fn is_scraping(&self) -> bool {
        self.scrape_in_flight
    }

    pub fn current_alert(&self) -> Option<&Alert> {
        self.alerts.front()
    }

    pub fn pending_alerts(&self) -> usize {
        self.alerts.len()
    }

    /// Returns whether the view changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn in_flight(&self) -> InFlight {
        self.in_flight
    }

    /// Returns `false` if the component was already mounted.
    pub(crate) fn mount(&mut self) -> bool {
        !std::mem::replace(&mut self.mounted, true)
    }

    pub(crate) fn set_url_input(&mut self, text: String) {
        if self.url_input != text {
            self.url_input = text;
            self.dirty = true;
        }
    }

    pub(crate) fn push_alert(&mut self, alert: Alert) {
        self.alerts.push_back(alert);
        self.dirty = true;
    }

    pub(crate) fn dismiss_alert(&mut self) -> bool {
        let dismissed = self.alerts.pop_front().is_some();
        self.dirty |= dismissed;
        dismissed
    }

    pub(crate) fn set_scraping(&mut self, busy: bool) {
        if self.scrape_in_flight != busy {
            self.scrape_in_flight = busy;
            self.dirty = true;
        }
    }

    fn issue_request(&mut self) -> RequestId {
        self.next_request += 1;
        self.next_request
    }

    pub(crate) fn begin_fields_request(&mut self) -> RequestId {
        let request = self.issue_request();
        self.in_flight.fields = Some(request);
        self.dirty = true;
        request
    }

    pub(crate) fn begin_values_request(&mut self) -> RequestId {
        let request = self.issue_request();
        self.in_flight.values = Some(request);
        self.dirty = true;
        request
    }

    pub(crate) fn begin_results_request(&mut self) -> RequestId {
        let request = self.issue_request();
        self.in_flight.results = Some(request);
        self.dirty = true;
        request
    }

    /// Marks `request` as resolved if it is the latest fields request.
    pub(crate) fn settle_fields_request(&mut self, request: RequestId) -> bool {
        settle(&mut self.in_flight.fields, request, &mut self.dirty)
    }

    pub(crate) fn settle_values_request(&mut self, request: RequestId) -> bool {
        settle(&mut self.in_flight.values, request, &mut self.dirty)
    }

    pub(crate) fn settle_results_request(&mut self, request: RequestId) -> bool {
        settle(&mut self.in_flight.results, request, &mut self.dirty)
    }

    /// Replaces the field list. A selection that no longer exists is dropped
    /// together with its values.
    pub(crate) fn replace_fields(&mut self, fields: Vec<String>) {
        let selection_gone = self
            .selected_field
            .as_ref()
            .is_some_and(|field| !fields.contains(field));
        if selection_gone {
            self.selected_field = None;
            self.clear_values();
            self.in_flight.values = None;
        }
        self.fields = fields;
        self.dirty = true;
    }

    /// Switches the active field and drops everything derived from the old one.
    /// Returns `false` when `field` is already selected.
    pub(crate) fn select_field(&mut self, field: Option<String>) -> bool {
        if self.selected_field == field {
            return false;
        }
        self.selected_field = field;
        self.clear_values();
        self.in_flight.values = None;
        self.dirty = true;
        true
    }

    pub(crate) fn replace_values(&mut self, values: Vec<String>) {
        self.selected_values.retain(|value| values.contains(value));
        self.values = values;
        self.dirty = true;
    }

    /// Checks or unchecks `value`. Values not offered for the current field are ignored.
    pub(crate) fn toggle_value(&mut self, value: String) -> bool {
        if !self.values.contains(&value) {
            return false;
        }
        if let Some(pos) = self.selected_values.iter().position(|v| *v == value) {
            self.selected_values.remove(pos);
        } else {
            self.selected_values.push(value);
        }
        self.dirty = true;
        true
    }

    pub(crate) fn replace_pages(&mut self, pages: Vec<PageResult>) {
        self.pages = pages;
        self.dirty = true;
    }

    fn clear_values(&mut self) {
        self.values.clear();
        self.selected_values.clear();
    }
}

fn settle(slot: &mut Option<RequestId>, request: RequestId, dirty: &mut bool) -> bool {
    if *slot == Some(request) {
        *slot = None;
        *dirty = true;
        true
    } else {
        false
    }
}

/// Splits raw URL text into lines exactly as typed: no trimming, no
/// deduplication, empty lines kept.
pub fn split_url_lines(raw: &str) -> Vec<String> {
    raw.split('\n').map(ToOwned::to_owned).collect()
}
