pub const APP_TITLE: &str = "Wikipedia Scraper";
pub const TITLE_URLS: &str = "URLs";
pub const TITLE_FIELDS: &str = "Filters: field";
pub const TITLE_VALUES: &str = "Filters: values";
pub const TITLE_RESULTS: &str = "Results";
pub const SELECT_FIELD_OPTION: &str = "Select Field";
pub const APPLY_FILTERS_LABEL: &str = "Apply Filters";
pub const LOADING_SUFFIX: &str = " (loading...)";
pub const ALERT_DISMISS_HINT: &str = "Enter / Esc to dismiss";

pub const HINT_URLS: &str = "type or paste URLs | Enter newline | Ctrl+U clear | Ctrl+S scrape";
pub const HINT_FIELDS: &str = "Up/Down move | Enter select field | r reload fields";
pub const HINT_VALUES: &str = "Up/Down move | Space toggle | a apply filters";
pub const HINT_RESULTS: &str = "Up/Down move | Enter/o open in browser";
pub const HINT_GLOBAL: &str = "Tab next panel | Ctrl+F apply | Ctrl+C quit";
