#[derive(Debug, Default)]
pub(crate) struct TuiUiState {
    pub(crate) focus_index: usize,
    pub(crate) help_visible: bool,
    pub(crate) status: String,
}

impl TuiUiState {
    pub(crate) fn focus_next(&mut self, count: usize) {
        if count == 0 {
            self.focus_index = 0;
            return;
        }
        self.focus_index = (self.focus_index + 1) % count;
    }

    pub(crate) fn focus_prev(&mut self, count: usize) {
        if count == 0 {
            self.focus_index = 0;
            return;
        }
        self.focus_index = (self.focus_index + count - 1) % count;
    }

    /// Keeps focus inside the element list after a view change shrank it.
    pub(crate) fn clamp_focus(&mut self, count: usize) {
        if self.focus_index >= count {
            self.focus_index = count.saturating_sub(1);
        }
    }
}
