use crate::api::{Product, SearchResponse};
use crate::client::{EndpointMode, SearchClient};
use crate::logging;
use crate::tui::form::{FormField, FormState};
use crate::tui::table::ResultsState;
use crate::tui::ui;
use crate::SearchConfig;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// Messages from background request threads, tagged with the sequence number
/// of the request that produced them
pub enum BgMessage {
    SearchComplete(u64, SearchResponse),
    SearchError(u64, String),
}

pub struct App {
    client: SearchClient,

    // Sub-states
    pub form: FormState,
    pub results: ResultsState,

    // Outcome of the last resolved request
    pub products: Vec<Product>,
    pub error: Option<String>,
    pub last_query: Option<String>,

    // Request state
    pub is_loading: bool,
    pub status_message: String,

    // Sequence of the most recently dispatched request; responses carrying an
    // older sequence lost the race and are dropped
    request_seq: u64,
    pending_query: String,

    // Channel
    bg_receiver: Receiver<BgMessage>,
    bg_sender: Sender<BgMessage>,

    // Quit flag
    pub should_quit: bool,
}

impl App {
    pub fn new(client: SearchClient, config: &SearchConfig) -> Self {
        let (tx, rx) = channel();

        let form = FormState {
            max_results: config.max_results.clamp(1, 50),
            use_mock: config.use_mock,
            ..Default::default()
        };

        Self {
            client,
            form,
            results: ResultsState::default(),
            products: Vec::new(),
            error: None,
            last_query: None,
            is_loading: false,
            status_message: "Ready".to_string(),
            request_seq: 0,
            pending_query: String::new(),
            bg_receiver: rx,
            bg_sender: tx,
            should_quit: false,
        }
    }

    pub fn run(
        &mut self,
        terminal: &mut Terminal<impl Backend<Error = std::io::Error>>,
    ) -> crate::Result<()> {
        let tick_rate = Duration::from_millis(50);
        let mut last_tick = Instant::now();

        loop {
            terminal.draw(|frame| ui::draw(frame, self))?;

            let timeout = tick_rate.saturating_sub(last_tick.elapsed());
            if event::poll(timeout).unwrap_or(false) {
                if let Ok(Event::Key(key)) = event::read() {
                    self.handle_key(key);
                }
            }

            if last_tick.elapsed() >= tick_rate {
                self.process_messages();
                last_tick = Instant::now();
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    pub fn mode(&self) -> EndpointMode {
        if self.form.use_mock {
            EndpointMode::Mock
        } else {
            EndpointMode::Live
        }
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.results.selected.and_then(|i| self.products.get(i))
    }

    /// Dispatch the current form as a search request. Empty queries never
    /// leave the client.
    pub fn submit(&mut self) {
        let query = self.form.query.trim().to_string();
        if query.is_empty() {
            self.products.clear();
            self.results.reset();
            self.error = Some("Please enter a search query.".to_string());
            return;
        }

        self.request_seq += 1;
        let seq = self.request_seq;
        self.pending_query = query.clone();

        self.is_loading = true;
        self.error = None;
        self.products.clear();
        self.results.reset();
        self.status_message = format!("Searching '{}'...", query);

        let client = self.client.clone();
        let max_results = self.form.effective_max();
        let mode = self.mode();
        let tx = self.bg_sender.clone();

        logging::info(
            "APP",
            &format!("submit #{} query='{}' mode={}", seq, query, mode.label()),
        );

        thread::spawn(move || match client.search(&query, max_results, mode) {
            Ok(response) => {
                let _ = tx.send(BgMessage::SearchComplete(seq, response));
            }
            Err(e) => {
                let _ = tx.send(BgMessage::SearchError(seq, e.to_string()));
            }
        });
    }

    /// Reset query, results and error. The loading flag and the mock toggle
    /// are left alone.
    pub fn clear(&mut self) {
        self.form.query.clear();
        self.form.cursor_pos = 0;
        self.products.clear();
        self.results.reset();
        self.error = None;
        self.last_query = None;
        self.status_message = "Ready".to_string();
    }

    fn process_messages(&mut self) {
        while let Ok(msg) = self.bg_receiver.try_recv() {
            self.apply_message(msg);
        }
    }

    fn apply_message(&mut self, msg: BgMessage) {
        match msg {
            BgMessage::SearchComplete(seq, response) => {
                if seq != self.request_seq {
                    logging::debug("APP", &format!("dropping stale response #{}", seq));
                    return;
                }
                self.is_loading = false;
                self.error = None;
                self.products = response.products;
                self.last_query = Some(self.pending_query.clone());
                self.results.selected = if self.products.is_empty() { None } else { Some(0) };
                self.results.scroll_offset = 0;
                self.status_message = format!("{} products", self.products.len());
            }
            BgMessage::SearchError(seq, message) => {
                if seq != self.request_seq {
                    logging::debug("APP", &format!("dropping stale error #{}", seq));
                    return;
                }
                self.is_loading = false;
                self.products.clear();
                self.results.reset();
                self.error = Some(message);
                self.status_message = "Search failed".to_string();
            }
        }
    }

    fn open_selected(&mut self) {
        let link = self.selected_product().and_then(|p| p.link.clone());
        match link {
            Some(link) => {
                let _ = open::that(&link);
                self.status_message = format!("Opened {}", link);
            }
            None => {
                self.status_message = "No link for this product".to_string();
            }
        }
    }

    fn copy_selected_link(&mut self) {
        let link = self.selected_product().and_then(|p| p.link.clone());
        match link {
            Some(link) => {
                if let Ok(mut clipboard) = arboard::Clipboard::new() {
                    let _ = clipboard.set_text(link.clone());
                    self.status_message = format!("Copied {}", link);
                }
            }
            None => {
                self.status_message = "No link for this product".to_string();
            }
        }
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Global keys
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.clear();
                return;
            }
            KeyCode::Esc => {
                if self.form.focused && !self.form.query.is_empty() {
                    self.form.query.clear();
                    self.form.cursor_pos = 0;
                } else if self.form.focused {
                    self.form.focused = false;
                } else {
                    self.should_quit = true;
                }
                return;
            }
            KeyCode::F(5) => {
                self.submit();
                return;
            }
            _ => {}
        }

        if self.form.focused {
            self.handle_form_key(key);
        } else {
            self.handle_results_key(key);
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => {
                self.submit();
                return;
            }
            KeyCode::Tab => {
                self.form.field = self.form.field.next();
                return;
            }
            KeyCode::BackTab => {
                self.form.field = self.form.field.prev();
                return;
            }
            KeyCode::Down => {
                self.form.focused = false;
                return;
            }
            _ => {}
        }

        match self.form.field {
            FormField::Query => match key.code {
                KeyCode::Char(c) => self.form.insert_char(c),
                KeyCode::Backspace => self.form.backspace(),
                KeyCode::Delete => self.form.delete(),
                KeyCode::Left => self.form.move_left(),
                KeyCode::Right => self.form.move_right(),
                KeyCode::Home => self.form.move_home(),
                KeyCode::End => self.form.move_end(),
                _ => {}
            },
            FormField::MaxResults => match key.code {
                KeyCode::Char(c) if c.is_ascii_digit() => self.form.type_max_digit(c),
                KeyCode::Char('+') => self.form.increment_max(),
                KeyCode::Char('-') => self.form.decrement_max(),
                KeyCode::Up => self.form.increment_max(),
                KeyCode::Backspace => self.form.backspace_max(),
                _ => {}
            },
            FormField::Mock => match key.code {
                KeyCode::Char(' ') | KeyCode::Char('m') => self.form.toggle_mock(),
                _ => {}
            },
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        let total = self.products.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.results.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.results.select_next(total),
            KeyCode::PageUp => self.results.page_up(),
            KeyCode::PageDown => self.results.page_down(total),
            KeyCode::Home => self.results.select_first(),
            KeyCode::End => self.results.select_last(total),

            KeyCode::Enter | KeyCode::Char('o') => self.open_selected(),
            KeyCode::Char('c') => self.copy_selected_link(),

            KeyCode::Tab | KeyCode::Char('/') => {
                self.form.focused = true;
                self.form.field = FormField::Query;
            }

            // Any other printable char focuses the query input and types it
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.form.focused = true;
                self.form.field = FormField::Query;
                self.form.query.push(c);
                self.form.cursor_pos = self.form.query.len();
            }

            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let client = SearchClient::new("http://127.0.0.1:1").unwrap();
        App::new(client, &SearchConfig::default())
    }

    fn response_with(titles: &[&str]) -> SearchResponse {
        SearchResponse {
            query: "q".to_string(),
            total_results: titles.len() as u64,
            products: titles
                .iter()
                .map(|t| Product {
                    title: t.to_string(),
                    price_raw: None,
                    price: None,
                    link: None,
                    image: None,
                    rating: None,
                    source: None,
                    is_recommended: false,
                })
                .collect(),
        }
    }

    #[test]
    fn empty_query_is_rejected_without_a_request() {
        let mut app = test_app();
        app.form.query = "   ".to_string();
        app.submit();

        assert_eq!(app.error.as_deref(), Some("Please enter a search query."));
        assert!(!app.is_loading);
        assert_eq!(app.request_seq, 0);
    }

    #[test]
    fn submit_sets_loading_and_clears_previous_outcome() {
        let mut app = test_app();
        app.products = response_with(&["old"]).products;
        app.error = Some("old error".to_string());
        app.form.query = "phone".to_string();

        app.submit();

        assert!(app.is_loading);
        assert!(app.error.is_none());
        assert!(app.products.is_empty());
        assert_eq!(app.request_seq, 1);
    }

    #[test]
    fn stale_responses_are_discarded() {
        let mut app = test_app();
        app.request_seq = 2;
        app.pending_query = "new".to_string();
        app.is_loading = true;

        // A slow first request resolving after a second was dispatched
        app.apply_message(BgMessage::SearchComplete(1, response_with(&["stale"])));
        assert!(app.is_loading);
        assert!(app.products.is_empty());

        app.apply_message(BgMessage::SearchComplete(2, response_with(&["fresh"])));
        assert!(!app.is_loading);
        assert_eq!(app.products[0].title, "fresh");
        assert_eq!(app.results.selected, Some(0));
    }

    #[test]
    fn stale_errors_are_discarded_too() {
        let mut app = test_app();
        app.request_seq = 3;
        app.is_loading = true;

        app.apply_message(BgMessage::SearchError(2, "old failure".to_string()));
        assert!(app.error.is_none());
        assert!(app.is_loading);
    }

    #[test]
    fn error_and_products_are_mutually_exclusive() {
        let mut app = test_app();
        app.request_seq = 1;
        app.pending_query = "q".to_string();

        app.apply_message(BgMessage::SearchComplete(1, response_with(&["a", "b"])));
        assert_eq!(app.products.len(), 2);
        assert!(app.error.is_none());

        app.request_seq = 2;
        app.apply_message(BgMessage::SearchError(2, "boom".to_string()));
        assert!(app.products.is_empty());
        assert_eq!(app.error.as_deref(), Some("boom"));

        app.request_seq = 3;
        app.apply_message(BgMessage::SearchComplete(3, response_with(&["c"])));
        assert!(app.error.is_none());
        assert_eq!(app.products.len(), 1);
    }

    #[test]
    fn clear_resets_query_products_and_error() {
        let mut app = test_app();
        app.form.query = "phone".to_string();
        app.form.cursor_pos = 5;
        app.form.use_mock = true;
        app.products = response_with(&["a"]).products;
        app.results.selected = Some(0);
        app.error = Some("boom".to_string());

        app.clear();

        assert_eq!(app.form.query, "");
        assert!(app.products.is_empty());
        assert!(app.error.is_none());
        assert_eq!(app.results.selected, None);
        // The mock toggle survives a clear
        assert!(app.form.use_mock);
    }

    #[test]
    fn responses_keep_server_order() {
        let mut app = test_app();
        app.request_seq = 1;
        app.pending_query = "q".to_string();
        app.apply_message(BgMessage::SearchComplete(1, response_with(&["x", "y", "z"])));

        let titles: Vec<&str> = app.products.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["x", "y", "z"]);
    }
}
