use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use scraper_core::{AppViewModel, Msg};

use super::{Focus, UiState};

/// What the event loop should do after a terminal event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Action {
    Dispatch(Msg),
    /// Only presentation state changed.
    Redraw,
    /// Open a result link outside the terminal.
    OpenUrl(String),
    Quit,
    Ignore,
}

pub(crate) fn handle_key(ui: &mut UiState, view: &AppViewModel, key: KeyEvent) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::Ignore;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Action::Quit;
    }

    // An open alert blocks every other interaction.
    if view.alert.is_some() {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
                Action::Dispatch(Msg::AlertDismissed)
            }
            _ => Action::Ignore,
        };
    }

    match key.code {
        KeyCode::Tab => {
            ui.focus = ui.focus.next();
            return Action::Redraw;
        }
        KeyCode::BackTab => {
            ui.focus = ui.focus.prev();
            return Action::Redraw;
        }
        KeyCode::Char('s') if ctrl => return Action::Dispatch(Msg::ScrapeClicked),
        KeyCode::Char('f') if ctrl => return Action::Dispatch(Msg::ApplyFiltersClicked),
        KeyCode::Char('r') if ctrl => return Action::Dispatch(Msg::ReloadFields),
        _ => {}
    }

    match ui.focus {
        Focus::Urls => url_key(view, key),
        Focus::Fields => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => {
                Action::Dispatch(Msg::FieldSelected(ui.field_at_cursor(view)))
            }
            _ => list_key(ui, view, key),
        },
        Focus::Values => match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => match ui.value_at_cursor(view) {
                Some(value) => Action::Dispatch(Msg::ValueToggled(value)),
                None => Action::Ignore,
            },
            _ => list_key(ui, view, key),
        },
        Focus::Results => match key.code {
            KeyCode::Enter | KeyCode::Char('o') => match ui.page_url_at_cursor(view) {
                Some(url) => Action::OpenUrl(url),
                None => Action::Ignore,
            },
            _ => list_key(ui, view, key),
        },
    }
}

/// Pasted text goes into the URL box when it has focus.
pub(crate) fn handle_paste(ui: &UiState, view: &AppViewModel, text: &str) -> Action {
    if view.alert.is_some() || ui.focus != Focus::Urls {
        return Action::Ignore;
    }
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    Action::Dispatch(Msg::UrlInputChanged(format!(
        "{}{}",
        view.url_input, normalized
    )))
}

fn url_key(view: &AppViewModel, key: KeyEvent) -> Action {
    let mut text = view.url_input.clone();
    match key.code {
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => text.clear(),
        KeyCode::Char(ch)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            text.push(ch)
        }
        KeyCode::Enter => text.push('\n'),
        KeyCode::Backspace => {
            if text.pop().is_none() {
                return Action::Ignore;
            }
        }
        _ => return Action::Ignore,
    }
    Action::Dispatch(Msg::UrlInputChanged(text))
}

/// Navigation and single-letter shortcuts shared by the list panels.
fn list_key(ui: &mut UiState, view: &AppViewModel, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            ui.move_cursor(view, -1);
            Action::Redraw
        }
        KeyCode::Down | KeyCode::Char('j') => {
            ui.move_cursor(view, 1);
            Action::Redraw
        }
        KeyCode::PageUp => {
            ui.move_cursor(view, -10);
            Action::Redraw
        }
        KeyCode::PageDown => {
            ui.move_cursor(view, 10);
            Action::Redraw
        }
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('s') => Action::Dispatch(Msg::ScrapeClicked),
        KeyCode::Char('a') => Action::Dispatch(Msg::ApplyFiltersClicked),
        KeyCode::Char('r') => Action::Dispatch(Msg::ReloadFields),
        _ => Action::Ignore,
    }
}
