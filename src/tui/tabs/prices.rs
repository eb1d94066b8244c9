//! Spot and futures price tab.

use ratatui::Frame;

use crate::tui::app::{App, Tab};

const HELP: &str = "[h/l]focus [j/k]move [space]select [/]filter [i]edit [enter]load [[/]]hover [x]clear dates [e]xport [Tab]switch tab [q]quit";

/// Renders the price tab.
pub fn render(frame: &mut Frame, app: &App) {
    super::render_chart_tab(frame, app, Tab::Prices, HELP);
}
