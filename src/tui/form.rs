//! Search form state for the TUI
//!
//! Three inputs: query text, max-results number and the mock-endpoint toggle.

/// Which form input currently has the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Query,
    MaxResults,
    Mock,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Query => FormField::MaxResults,
            FormField::MaxResults => FormField::Mock,
            FormField::Mock => FormField::Query,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            FormField::Query => FormField::Mock,
            FormField::MaxResults => FormField::Query,
            FormField::Mock => FormField::MaxResults,
        }
    }
}

/// Search form state
pub struct FormState {
    pub query: String,
    pub cursor_pos: usize,
    pub max_results: u32,
    pub use_mock: bool,
    pub focused: bool,
    pub field: FormField,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            query: String::new(),
            cursor_pos: 0,
            max_results: 6,
            use_mock: false,
            focused: true,
            field: FormField::Query,
        }
    }
}

impl FormState {
    pub fn insert_char(&mut self, c: char) {
        self.query.insert(self.cursor_pos, c);
        self.cursor_pos += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor_pos > 0 {
            // Find the previous character boundary
            let prev = self.query[..self.cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.query.remove(prev);
            self.cursor_pos = prev;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor_pos < self.query.len() {
            self.query.remove(self.cursor_pos);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor_pos > 0 {
            let prev = self.query[..self.cursor_pos]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            self.cursor_pos = prev;
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor_pos < self.query.len() {
            let next = self.query[self.cursor_pos..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_pos + i)
                .unwrap_or(self.query.len());
            self.cursor_pos = next;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor_pos = self.query.len();
    }

    pub fn increment_max(&mut self) {
        self.max_results = (self.max_results + 1).min(50);
    }

    pub fn decrement_max(&mut self) {
        self.max_results = self.max_results.saturating_sub(1).max(1);
    }

    /// Append a typed digit to the max-results value. When the appended value
    /// would leave the 1..=50 range, start over from the digit alone.
    pub fn type_max_digit(&mut self, digit: char) {
        let Some(d) = digit.to_digit(10) else {
            return;
        };
        let candidate = self.max_results.saturating_mul(10).saturating_add(d);
        self.max_results = if candidate > 50 { d } else { candidate };
    }

    /// Drop the last digit of the max-results value
    pub fn backspace_max(&mut self) {
        self.max_results /= 10;
    }

    /// The value actually sent with a request
    pub fn effective_max(&self) -> u32 {
        self.max_results.clamp(1, 50)
    }

    pub fn toggle_mock(&mut self) {
        self.use_mock = !self.use_mock;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_respects_utf8_boundaries() {
        let mut form = FormState::default();
        for c in "tèst".chars() {
            form.insert_char(c);
        }
        assert_eq!(form.query, "tèst");

        form.backspace();
        assert_eq!(form.query, "tès");
        form.move_left();
        form.backspace();
        assert_eq!(form.query, "ts");
        form.move_end();
        assert_eq!(form.cursor_pos, form.query.len());
    }

    #[test]
    fn max_results_stays_in_backend_range() {
        let mut form = FormState::default();
        for _ in 0..100 {
            form.increment_max();
        }
        assert_eq!(form.max_results, 50);
        for _ in 0..100 {
            form.decrement_max();
        }
        assert_eq!(form.max_results, 1);
    }

    #[test]
    fn typed_digits_restart_when_out_of_range() {
        let mut form = FormState::default();
        // 6 -> "2" would make 62, out of range, so restart from 2
        form.type_max_digit('2');
        assert_eq!(form.max_results, 2);
        form.type_max_digit('5');
        assert_eq!(form.max_results, 25);

        form.backspace_max();
        assert_eq!(form.max_results, 2);
        form.backspace_max();
        assert_eq!(form.max_results, 0);
        assert_eq!(form.effective_max(), 1);
    }

    #[test]
    fn field_cycle_is_closed() {
        let mut field = FormField::Query;
        for _ in 0..3 {
            field = field.next();
        }
        assert_eq!(field, FormField::Query);
        assert_eq!(FormField::Query.prev(), FormField::Mock);
    }
}
