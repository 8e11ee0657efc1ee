use crate::{PageResult, RequestFailure, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The UI finished its initial setup.
    Mounted,
    /// User asked for the field list to be fetched again.
    ReloadFields,
    /// User edited the URL input box (full text).
    UrlInputChanged(String),
    /// User pressed the scrape button.
    ScrapeClicked,
    /// Backend answered the scrape request.
    ScrapeFinished(Result<String, RequestFailure>),
    /// User picked a field, or the empty "Select Field" option.
    FieldSelected(Option<String>),
    /// User checked or unchecked one value.
    ValueToggled(String),
    /// User pressed the apply-filters button.
    ApplyFiltersClicked,
    FieldsLoaded {
        request: RequestId,
        result: Result<Vec<String>, RequestFailure>,
    },
    ValuesLoaded {
        request: RequestId,
        result: Result<Vec<String>, RequestFailure>,
    },
    ResultsLoaded {
        request: RequestId,
        result: Result<Vec<PageResult>, RequestFailure>,
    },
    /// User acknowledged the alert currently shown.
    AlertDismissed,
}
