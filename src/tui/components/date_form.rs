//! Start/end date inputs.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::tui::app::{App, Focus, Mode, Tab};
use crate::tui::input::TextInput;

use super::symbol_picker::focus_style;

/// Renders the two date inputs stacked vertically.
pub fn render(frame: &mut Frame, area: Rect, app: &App, tab: Tab) {
    let [start_area, end_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Length(3)]).areas(area);

    let state = app.tab_state(tab);
    render_field(frame, start_area, app, " Start ", &state.start_date, Focus::StartDate);
    render_field(frame, end_area, app, " End ", &state.end_date, Focus::EndDate);
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    title: &str,
    input: &TextInput,
    target: Focus,
) {
    let focused = app.focus == target;
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(focus_style(focused));
    let inner = block.inner(area);

    let para = if input.is_empty() && !(focused && app.mode == Mode::Insert) {
        Paragraph::new("YYYY-MM-DD").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(input.as_str())
    };
    frame.render_widget(para.block(block), area);

    if focused && app.mode == Mode::Insert {
        frame.set_cursor_position(Position::new(inner.x + input.cursor() as u16, inner.y));
    }
}
