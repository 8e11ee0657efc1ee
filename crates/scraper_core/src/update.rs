use crate::{
    split_url_lines, Alert, AppState, Effect, Msg, ValidationError, RESULTS_FAILED_MESSAGE,
    SCRAPE_FAILED_MESSAGE,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => {
            if state.mount() {
                vec![Effect::LoadFields {
                    request: state.begin_fields_request(),
                }]
            } else {
                Vec::new()
            }
        }
        Msg::ReloadFields => vec![Effect::LoadFields {
            request: state.begin_fields_request(),
        }],
        Msg::UrlInputChanged(text) => {
            state.set_url_input(text);
            Vec::new()
        }
        Msg::ScrapeClicked => {
            if state.is_scraping() {
                return (state, Vec::new());
            }
            if state.url_input().trim().is_empty() {
                state.push_alert(ValidationError::EmptyUrlInput.into());
                return (state, Vec::new());
            }
            let urls = split_url_lines(state.url_input());
            state.set_scraping(true);
            vec![Effect::SubmitScrape { urls }]
        }
        Msg::ScrapeFinished(result) => {
            state.set_scraping(false);
            match result {
                Ok(message) => state.push_alert(Alert::info(message)),
                Err(_) => state.push_alert(Alert::error(SCRAPE_FAILED_MESSAGE)),
            }
            Vec::new()
        }
        Msg::FieldSelected(field) => {
            let field = field.filter(|name| !name.is_empty());
            if !state.select_field(field.clone()) {
                return (state, Vec::new());
            }
            match field {
                Some(field) => vec![Effect::LoadValues {
                    request: state.begin_values_request(),
                    field,
                }],
                None => Vec::new(),
            }
        }
        Msg::ValueToggled(value) => {
            state.toggle_value(value);
            Vec::new()
        }
        Msg::ApplyFiltersClicked => {
            let Some(field) = state.selected_field().map(ToOwned::to_owned) else {
                state.push_alert(ValidationError::NoFieldSelected.into());
                return (state, Vec::new());
            };
            if state.selected_values().is_empty() {
                state.push_alert(ValidationError::NoValuesSelected.into());
                return (state, Vec::new());
            }
            let values = state.selected_values().to_vec();
            vec![Effect::FetchResults {
                request: state.begin_results_request(),
                field,
                values,
            }]
        }
        Msg::FieldsLoaded { request, result } => {
            if state.settle_fields_request(request) {
                // Failures were logged by the platform layer; nothing is shown.
                if let Ok(fields) = result {
                    state.replace_fields(fields);
                }
            }
            Vec::new()
        }
        Msg::ValuesLoaded { request, result } => {
            if state.settle_values_request(request) {
                if let Ok(values) = result {
                    state.replace_values(values);
                }
            }
            Vec::new()
        }
        Msg::ResultsLoaded { request, result } => {
            if state.settle_results_request(request) {
                match result {
                    Ok(pages) => state.replace_pages(pages),
                    Err(_) => state.push_alert(Alert::error(RESULTS_FAILED_MESSAGE)),
                }
            }
            Vec::new()
        }
        Msg::AlertDismissed => {
            state.dismiss_alert();
            Vec::new()
        }
    };

    (state, effects)
}
