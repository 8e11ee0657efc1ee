use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;
use scraper_core::{AlertSeverity, AppViewModel, PageRowView, URL_INPUT_HINT};

use super::constants::*;
use super::layout::{centered_rect, split};
use super::{Focus, UiState};

pub(crate) fn render(frame: &mut Frame, view: &AppViewModel, ui: &mut UiState) {
    ui.clamp_to(view);
    let areas = split(frame.area());

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            APP_TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        ))),
        areas.header,
    );

    render_urls(frame, view, ui, areas.urls);
    frame.render_widget(
        button(view.scrape_label, view.scrape_enabled, "Ctrl+S"),
        areas.scrape_button,
    );
    render_fields(frame, view, ui, areas.fields);
    render_values(frame, view, ui, areas.values);
    frame.render_widget(
        button(APPLY_FILTERS_LABEL, true, "Ctrl+F"),
        areas.apply_button,
    );
    render_results(frame, view, ui, areas.results);
    frame.render_widget(
        Paragraph::new(footer_text(ui.focus)).style(Style::default().fg(Color::DarkGray)),
        areas.footer,
    );

    render_alert(frame, view);
}

fn panel(title: String, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::bordered().title(title).border_style(border)
}

fn button(label: &str, enabled: bool, shortcut: &str) -> Paragraph<'static> {
    let style = if enabled {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Paragraph::new(Line::from(vec![
        Span::styled(format!("[ {label} ]"), style),
        Span::styled(format!(" {shortcut}"), Style::default().fg(Color::DarkGray)),
    ]))
}

fn titled(base: &str, loading: bool) -> String {
    if loading {
        format!("{base}{LOADING_SUFFIX}")
    } else {
        base.to_string()
    }
}

fn render_urls(frame: &mut Frame, view: &AppViewModel, ui: &UiState, area: Rect) {
    let focused = ui.focus == Focus::Urls;
    let block = panel(TITLE_URLS.to_string(), focused);
    let inner = block.inner(area);

    if view.url_input.is_empty() {
        frame.render_widget(
            Paragraph::new(URL_INPUT_HINT)
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        if focused {
            frame.set_cursor_position((inner.x, inner.y));
        }
        return;
    }

    let lines: Vec<&str> = view.url_input.split('\n').collect();
    let overflow = lines.len().saturating_sub(inner.height as usize);
    let scroll = u16::try_from(overflow).unwrap_or(u16::MAX);
    frame.render_widget(
        Paragraph::new(view.url_input.as_str())
            .block(block)
            .scroll((scroll, 0)),
        area,
    );

    if focused && inner.width > 0 && inner.height > 0 {
        let last = lines.last().copied().unwrap_or("");
        let column = u16::try_from(last.chars().count()).unwrap_or(u16::MAX);
        let row = u16::try_from(lines.len() - 1 - overflow).unwrap_or(0);
        frame.set_cursor_position((
            inner.x + column.min(inner.width - 1),
            inner.y + row.min(inner.height - 1),
        ));
    }
}

fn render_fields(frame: &mut Frame, view: &AppViewModel, ui: &UiState, area: Rect) {
    let mut items = Vec::with_capacity(view.fields.len() + 1);
    items.push(option_item(SELECT_FIELD_OPTION, view.selected_field.is_none()));
    items.extend(
        view.fields
            .iter()
            .map(|field| option_item(&field.name, field.selected)),
    );

    let focused = ui.focus == Focus::Fields;
    let list = List::new(items)
        .block(panel(titled(TITLE_FIELDS, view.pending.fields), focused))
        .highlight_style(highlight(focused));
    let mut state = ListState::default().with_selected(Some(ui.field_cursor));
    frame.render_stateful_widget(list, area, &mut state);
}

fn option_item(label: &str, selected: bool) -> ListItem<'static> {
    let marker = if selected { "(*) " } else { "( ) " };
    ListItem::new(format!("{marker}{label}"))
}

fn render_values(frame: &mut Frame, view: &AppViewModel, ui: &UiState, area: Rect) {
    let items: Vec<ListItem> = view
        .values
        .iter()
        .map(|row| {
            let marker = if row.checked { "[x] " } else { "[ ] " };
            ListItem::new(format!("{marker}{}", row.value))
        })
        .collect();

    let title = match view.selected_count {
        0 => TITLE_VALUES.to_string(),
        n => format!("{TITLE_VALUES} - {n} selected"),
    };
    let focused = ui.focus == Focus::Values;
    let list = List::new(items)
        .block(panel(titled(&title, view.pending.values), focused))
        .highlight_style(highlight(focused));
    let selected = (!view.values.is_empty()).then_some(ui.value_cursor);
    let mut state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_results(frame: &mut Frame, view: &AppViewModel, ui: &UiState, area: Rect) {
    let items: Vec<ListItem> = view.pages.iter().map(result_item).collect();
    let title = format!("{TITLE_RESULTS} ({})", view.pages.len());
    let focused = ui.focus == Focus::Results;
    let list = List::new(items)
        .block(panel(titled(&title, view.pending.results), focused))
        .highlight_style(highlight(focused));
    let selected = (!view.pages.is_empty()).then_some(ui.result_cursor);
    let mut state = ListState::default().with_selected(selected);
    frame.render_stateful_widget(list, area, &mut state);
}

fn result_item(page: &PageRowView) -> ListItem<'static> {
    ListItem::new(Text::from(vec![
        Line::from(Span::styled(
            page.title.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::UNDERLINED),
        )),
        Line::from(format!("  {}", page.url)),
        Line::from(Span::styled(
            format!("  Downloaded: {}", page.downloaded),
            Style::default().fg(Color::DarkGray),
        )),
    ]))
}

fn highlight(focused: bool) -> Style {
    if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    }
}

fn footer_text(focus: Focus) -> String {
    let local = match focus {
        Focus::Urls => HINT_URLS,
        Focus::Fields => HINT_FIELDS,
        Focus::Values => HINT_VALUES,
        Focus::Results => HINT_RESULTS,
    };
    format!("{local} | {HINT_GLOBAL}")
}

fn render_alert(frame: &mut Frame, view: &AppViewModel) {
    let Some(alert) = view.alert.as_ref() else {
        return;
    };
    let (title, color) = match alert.severity {
        AlertSeverity::Information => ("Notice", Color::Green),
        AlertSeverity::Warning => ("Check input", Color::Yellow),
        AlertSeverity::Error => ("Error", Color::Red),
    };
    let hint = match view.queued_alerts {
        0 => ALERT_DISMISS_HINT.to_string(),
        n => format!("{ALERT_DISMISS_HINT} ({n} more)"),
    };

    let area = centered_rect(60, 7, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(Text::from(vec![
            Line::from(alert.text.clone()),
            Line::default(),
            Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
        ]))
        .wrap(Wrap { trim: true })
        .block(
            Block::bordered()
                .title(title)
                .border_style(Style::default().fg(color)),
        ),
        area,
    );
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use ratatui::backend::TestBackend;
    use ratatui::buffer::Buffer;
    use ratatui::Terminal;
    use scraper_core::{update, AppState, Effect, Msg, PageResult, SCRAPE_BUSY_LABEL};

    use super::*;

    fn draw(view: &AppViewModel, ui: &mut UiState) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).expect("terminal");
        terminal.draw(|frame| render(frame, view, ui)).expect("draw");
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn state_with_results() -> AppState {
        let (state, effects) = update(AppState::new(), Msg::ReloadFields);
        let (state, _) = match effects.as_slice() {
            [Effect::LoadFields { request }] => update(
                state,
                Msg::FieldsLoaded {
                    request: *request,
                    result: Ok(vec!["category".to_string()]),
                },
            ),
            other => panic!("unexpected effects {other:?}"),
        };
        let (state, effects) = update(state, Msg::FieldSelected(Some("category".into())));
        let request = match effects.as_slice() {
            [Effect::LoadValues { request, .. }] => *request,
            other => panic!("unexpected effects {other:?}"),
        };
        let (state, _) = update(
            state,
            Msg::ValuesLoaded {
                request,
                result: Ok(vec!["X".to_string()]),
            },
        );
        let (state, _) = update(state, Msg::ValueToggled("X".to_string()));
        let (state, effects) = update(state, Msg::ApplyFiltersClicked);
        let request = match effects.as_slice() {
            [Effect::FetchResults { request, .. }] => *request,
            other => panic!("unexpected effects {other:?}"),
        };
        let (state, _) = update(
            state,
            Msg::ResultsLoaded {
                request,
                result: Ok(vec![PageResult {
                    url: "https://en.wikipedia.org/x".to_string(),
                    title: "X".to_string(),
                    timestamp: "2024-01-01T00:00:00Z".to_string(),
                }]),
            },
        );
        state
    }

    #[test]
    fn result_entry_shows_title_url_and_time() {
        let view = state_with_results().view_in(&Utc);
        let text = draw(&view, &mut UiState::default());

        assert!(text.contains("Results (1)"));
        assert!(text.contains("https://en.wikipedia.org/x"));
        assert!(text.contains("Downloaded: 2024-01-01 00:00:00"));
        assert!(text.contains("[x] X"));
        assert!(text.contains("(*) category"));
    }

    #[test]
    fn empty_url_box_shows_hint() {
        let view = AppState::new().view_in(&Utc);
        let text = draw(&view, &mut UiState::default());

        assert!(text.contains(URL_INPUT_HINT));
        assert!(text.contains("(*) Select Field"));
        assert!(text.contains("Results (0)"));
    }

    #[test]
    fn busy_scrape_button_shows_busy_label() {
        let (state, _) = update(AppState::new(), Msg::UrlInputChanged("a".to_string()));
        let (state, _) = update(state, Msg::ScrapeClicked);
        let text = draw(&state.view_in(&Utc), &mut UiState::default());

        assert!(text.contains(&format!("[ {SCRAPE_BUSY_LABEL} ]")));
    }

    #[test]
    fn alert_is_drawn_over_panels() {
        let (state, _) = update(AppState::new(), Msg::ApplyFiltersClicked);
        let text = draw(&state.view_in(&Utc), &mut UiState::default());

        assert!(text.contains("Check input"));
        assert!(text.contains("Please select a field."));
        assert!(text.contains(ALERT_DISMISS_HINT));
    }

    #[test]
    fn long_url_list_keeps_last_line_visible() {
        let input = (0..40)
            .map(|i| format!("https://en.wikipedia.org/wiki/Page_{i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let (state, _) = update(AppState::new(), Msg::UrlInputChanged(input));
        let text = draw(&state.view_in(&Utc), &mut UiState::default());

        assert!(text.contains("Page_39"));
        assert!(!text.contains("Page_0\u{20}"));
    }
}
