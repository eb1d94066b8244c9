//! Tab layouts.

pub mod open_interest;
pub mod prices;

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
};

use crate::tui::app::{App, Focus, Tab};
use crate::tui::components::{chart_view, date_form, status_bar, symbol_picker, tab_bar};

/// Width of the left column holding the picker and the date inputs.
const SIDEBAR_WIDTH: u16 = 30;

/// Renders the layout shared by both chart tabs.
fn render_chart_tab(frame: &mut Frame, app: &App, tab: Tab, help: &str) {
    let [tabs_area, status_area, main_area, help_area] = Layout::vertical([
        Constraint::Length(1), // Tab bar
        Constraint::Length(1), // Status bar
        Constraint::Min(10),   // Sidebar + chart
        Constraint::Length(1), // Keybindings help
    ])
    .areas(frame.area());

    tab_bar::render(frame, tabs_area, app);
    status_bar::render(frame, status_area, app);

    let [sidebar, chart_area] =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
            .areas(main_area);
    let [picker_area, dates_area] =
        Layout::vertical([Constraint::Min(6), Constraint::Length(6)]).areas(sidebar);

    symbol_picker::render(frame, picker_area, app, tab);
    date_form::render(frame, dates_area, app, tab);
    chart_view::render(
        frame,
        chart_area,
        &app.tab_state(tab).panel,
        app.focus == Focus::Chart,
        app.loading == Some(tab),
    );

    render_keybindings(frame, help_area, help);
}

fn render_keybindings(frame: &mut Frame, area: Rect, help: &str) {
    let para = Paragraph::new(help).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(para, area);
}
