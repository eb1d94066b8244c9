//! Status bar component.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::app::{App, Mode, Tab};

/// Renders the status bar.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let state_span = match app.loading {
        Some(tab) => Span::styled(
            format!(" Loading {}... ", tab.title()),
            Style::default().fg(Color::Yellow),
        ),
        None => Span::styled(" Ready ", Style::default().fg(Color::Green)),
    };

    let mode_span = match app.mode {
        Mode::Normal => Span::styled(" NORMAL ", Style::default().fg(Color::White)),
        Mode::Insert => Span::styled(
            " INSERT ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ),
    };

    let resolution = match app.current_tab() {
        Tab::Prices => app.interval.as_str(),
        Tab::OpenInterest => app.period.as_str(),
    };

    let message_span = match app.status_message {
        Some(ref message) => {
            let color = if message.is_error { Color::Red } else { Color::Cyan };
            Span::styled(format!(" {} ", message.text), Style::default().fg(color))
        }
        None => Span::raw(""),
    };

    let left: Vec<Span> = vec![
        state_span,
        Span::raw("│"),
        mode_span,
        Span::raw("│"),
        Span::raw(format!(" {} symbols ", app.catalog().len())),
        Span::raw("│"),
        Span::raw(format!(" {resolution} ")),
        Span::raw("│"),
        message_span,
    ];

    let used: usize = left.iter().map(Span::width).sum();
    let tab_info = format!(" {}/{} ", app.active_tab + 1, app.tabs.len());

    let mut spans = left;
    spans.push(Span::raw(format!(
        "{:>width$}",
        tab_info,
        width = (area.width as usize).saturating_sub(used)
    )));

    let para = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(para, area);
}
