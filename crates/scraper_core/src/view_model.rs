use std::fmt;

use chrono::{Local, TimeZone};

use crate::{format_timestamp, Alert, AppState};

pub const URL_INPUT_HINT: &str = "Enter URLs (one per line, up to 50)";
pub const SCRAPE_IDLE_LABEL: &str = "Scrape URLs";
pub const SCRAPE_BUSY_LABEL: &str = "Scraping...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldOptionView {
    pub name: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueRowView {
    pub value: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRowView {
    pub url: String,
    pub title: String,
    /// Capture time rendered for the viewer's time zone.
    pub downloaded: String,
}

/// Requests issued and not yet answered, per slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PendingView {
    pub fields: bool,
    pub values: bool,
    pub results: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub url_input: String,
    pub scrape_label: &'static str,
    pub scrape_enabled: bool,
    pub fields: Vec<FieldOptionView>,
    pub selected_field: Option<String>,
    pub values: Vec<ValueRowView>,
    pub selected_count: usize,
    pub pages: Vec<PageRowView>,
    pub alert: Option<Alert>,
    pub queued_alerts: usize,
    pub pending: PendingView,
}

impl AppState {
    /// Builds the view model with timestamps rendered in the local time zone.
    pub fn view(&self) -> AppViewModel {
        self.view_in(&Local)
    }

    pub fn view_in<Tz>(&self, zone: &Tz) -> AppViewModel
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        let selected_field = self.selected_field().map(ToOwned::to_owned);
        let fields = self
            .fields()
            .iter()
            .map(|name| FieldOptionView {
                name: name.clone(),
                selected: selected_field.as_deref() == Some(name.as_str()),
            })
            .collect();
        let values = self
            .values()
            .iter()
            .map(|value| ValueRowView {
                value: value.clone(),
                checked: self.selected_values().contains(value),
            })
            .collect();
        let pages = self
            .pages()
            .iter()
            .map(|page| PageRowView {
                url: page.url.clone(),
                title: page.title.clone(),
                downloaded: format_timestamp(&page.timestamp, zone),
            })
            .collect();
        let in_flight = self.in_flight();

        AppViewModel {
            url_input: self.url_input().to_string(),
            scrape_label: if self.is_scraping() {
                SCRAPE_BUSY_LABEL
            } else {
                SCRAPE_IDLE_LABEL
            },
            scrape_enabled: !self.is_scraping(),
            fields,
            selected_field,
            values,
            selected_count: self.selected_values().len(),
            pages,
            alert: self.current_alert().cloned(),
            queued_alerts: self.pending_alerts().saturating_sub(1),
            pending: PendingView {
                fields: in_flight.fields.is_some(),
                values: in_flight.values.is_some(),
                results: in_flight.results.is_some(),
            },
        }
    }
}
