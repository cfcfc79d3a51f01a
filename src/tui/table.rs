//! Result list display state
//!
//! Selection and scrolling only; results keep the server's response order.

pub struct ResultsState {
    pub selected: Option<usize>,
    pub scroll_offset: usize,
    pub visible_rows: usize,
}

impl Default for ResultsState {
    fn default() -> Self {
        Self {
            selected: None,
            scroll_offset: 0,
            visible_rows: 20,
        }
    }
}

impl ResultsState {
    pub fn reset(&mut self) {
        self.selected = None;
        self.scroll_offset = 0;
    }

    pub fn select_next(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        let i = match self.selected {
            Some(i) => (i + 1).min(total - 1),
            None => 0,
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn select_prev(&mut self) {
        let i = match self.selected {
            Some(0) | None => 0,
            Some(i) => i - 1,
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn page_down(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        let jump = self.visible_rows.saturating_sub(1);
        let i = match self.selected {
            Some(i) => (i + jump).min(total - 1),
            None => jump.min(total - 1),
        };
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn page_up(&mut self) {
        let jump = self.visible_rows.saturating_sub(1);
        let i = self.selected.map(|i| i.saturating_sub(jump)).unwrap_or(0);
        self.selected = Some(i);
        self.ensure_visible(i);
    }

    pub fn select_first(&mut self) {
        self.selected = Some(0);
        self.scroll_offset = 0;
    }

    pub fn select_last(&mut self, total: usize) {
        if total == 0 {
            return;
        }
        self.selected = Some(total - 1);
        self.ensure_visible(total - 1);
    }

    fn ensure_visible(&mut self, index: usize) {
        if index < self.scroll_offset {
            self.scroll_offset = index;
        } else if self.visible_rows > 0 && index >= self.scroll_offset + self.visible_rows {
            self.scroll_offset = index - self.visible_rows + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_stays_in_bounds() {
        let mut state = ResultsState::default();
        state.select_next(0);
        assert_eq!(state.selected, None);

        state.select_next(3);
        assert_eq!(state.selected, Some(0));
        state.select_next(3);
        state.select_next(3);
        state.select_next(3);
        assert_eq!(state.selected, Some(2));

        state.select_prev();
        state.select_prev();
        state.select_prev();
        assert_eq!(state.selected, Some(0));
    }

    #[test]
    fn paging_scrolls_the_window() {
        let mut state = ResultsState {
            visible_rows: 5,
            ..Default::default()
        };
        state.select_first();
        state.page_down(30);
        assert_eq!(state.selected, Some(4));
        state.page_down(30);
        assert_eq!(state.selected, Some(8));
        assert!(state.scroll_offset > 0);

        state.select_last(30);
        assert_eq!(state.selected, Some(29));
        state.page_up();
        assert_eq!(state.selected, Some(25));
    }
}
