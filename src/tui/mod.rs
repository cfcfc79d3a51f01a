pub mod app;
pub mod colors;
pub mod form;
pub mod table;
pub mod ui;

use crate::{SearchClient, SearchConfig};

/// Entry point: run the interactive search view until the user quits
pub fn run(client: SearchClient, config: &SearchConfig) -> crate::Result<()> {
    let mut terminal = ratatui::init();
    let mut app = app::App::new(client, config);
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}
