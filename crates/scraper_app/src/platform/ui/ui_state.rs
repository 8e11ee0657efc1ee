use scraper_core::AppViewModel;

/// Panel receiving keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Focus {
    #[default]
    Urls,
    Fields,
    Values,
    Results,
}

impl Focus {
    const ORDER: [Focus; 4] = [Focus::Urls, Focus::Fields, Focus::Values, Focus::Results];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Presentation-only state: focus and list cursors. Never seen by the core.
#[derive(Debug, Clone, Default)]
pub(crate) struct UiState {
    pub focus: Focus,
    /// Row in the field list; row 0 is the "Select Field" option.
    pub field_cursor: usize,
    pub value_cursor: usize,
    pub result_cursor: usize,
}

impl UiState {
    /// Keeps cursors inside the lists currently shown.
    pub fn clamp_to(&mut self, view: &AppViewModel) {
        self.field_cursor = self.field_cursor.min(view.fields.len());
        self.value_cursor = clamp_index(self.value_cursor, view.values.len());
        self.result_cursor = clamp_index(self.result_cursor, view.pages.len());
    }

    pub fn move_cursor(&mut self, view: &AppViewModel, delta: isize) {
        let (cursor, len) = match self.focus {
            Focus::Urls => return,
            Focus::Fields => (&mut self.field_cursor, view.fields.len() + 1),
            Focus::Values => (&mut self.value_cursor, view.values.len()),
            Focus::Results => (&mut self.result_cursor, view.pages.len()),
        };
        if len == 0 {
            *cursor = 0;
            return;
        }
        *cursor = cursor.saturating_add_signed(delta).min(len - 1);
    }

    /// Field under the cursor; `None` for the "Select Field" row.
    pub fn field_at_cursor(&self, view: &AppViewModel) -> Option<String> {
        self.field_cursor
            .checked_sub(1)
            .and_then(|index| view.fields.get(index))
            .map(|field| field.name.clone())
    }

    pub fn value_at_cursor(&self, view: &AppViewModel) -> Option<String> {
        view.values
            .get(self.value_cursor)
            .map(|row| row.value.clone())
    }

    pub fn page_url_at_cursor(&self, view: &AppViewModel) -> Option<String> {
        view.pages
            .get(self.result_cursor)
            .map(|page| page.url.clone())
    }
}

fn clamp_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}
