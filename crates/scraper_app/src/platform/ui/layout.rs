use ratatui::layout::{Constraint, Layout, Rect};

/// Screen regions, top to bottom: header, input/filter row, results, footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Areas {
    pub header: Rect,
    pub urls: Rect,
    pub scrape_button: Rect,
    pub fields: Rect,
    pub values: Rect,
    pub apply_button: Rect,
    pub results: Rect,
    pub footer: Rect,
}

pub(crate) fn split(area: Rect) -> Areas {
    let [header, top, results, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Percentage(45),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .areas(area);
    let [url_column, filter_column] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(top);
    let [urls, scrape_button] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(url_column);
    let [filter_lists, apply_button] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(filter_column);
    let [fields, values] =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
            .areas(filter_lists);

    Areas {
        header,
        urls,
        scrape_button,
        fields,
        values,
        apply_button,
        results,
        footer,
    }
}

/// A box `percent_x` wide and `height` rows tall, centered in `area`.
pub(crate) fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x.min(100)) / 2),
        Constraint::Percentage(percent_x.min(100)),
        Constraint::Fill(1),
    ])
    .areas(middle);
    center
}
