//! Main UI rendering coordinator.

use ratatui::Frame;

use super::app::{App, Tab};
use super::tabs::{open_interest, prices};

/// Renders the entire application UI.
pub fn render(frame: &mut Frame, app: &App) {
    match app.current_tab() {
        Tab::Prices => prices::render(frame, app),
        Tab::OpenInterest => open_interest::render(frame, app),
    }
}
