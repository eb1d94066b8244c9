//! Filterable symbol list.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::tui::app::{App, Focus, Mode, Tab};

/// Renders the filter box and the symbol list for `tab`.
pub fn render(frame: &mut Frame, area: Rect, app: &App, tab: Tab) {
    let [filter_area, list_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(3)]).areas(area);

    let picker = &app.tab_state(tab).picker;

    // Filter box
    let filter_focused = app.focus == Focus::Filter;
    let filter_block = Block::default()
        .title(" Filter [/] ")
        .borders(Borders::ALL)
        .border_style(focus_style(filter_focused));
    let filter_inner = filter_block.inner(filter_area);
    frame.render_widget(
        Paragraph::new(picker.filter.as_str()).block(filter_block),
        filter_area,
    );
    if filter_focused && app.mode == Mode::Insert {
        frame.set_cursor_position(Position::new(
            filter_inner.x + picker.filter.cursor() as u16,
            filter_inner.y,
        ));
    }

    // Symbol list
    let visible = app.visible_symbols(tab);
    let title = if picker.is_multi() {
        format!(" Symbols ({} selected) ", picker.selected().len())
    } else {
        format!(" Symbols ({}) ", visible.len())
    };

    let items: Vec<ListItem> = visible
        .iter()
        .map(|option| {
            let selected = picker.is_selected(&option.value);
            let mark = match (picker.is_multi(), selected) {
                (true, true) => "[x] ",
                (true, false) => "[ ] ",
                (false, true) => "(•) ",
                (false, false) => "( ) ",
            };
            let style = if selected {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, style),
                Span::styled(option.label.clone(), style),
            ]))
        })
        .collect();

    let list_focused = app.focus == Focus::Symbols;
    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(focus_style(list_focused)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(picker.cursor.min(visible.len() - 1)));
    }
    frame.render_stateful_widget(list, list_area, &mut state);
}

/// Border style for a panel depending on focus.
pub fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}
