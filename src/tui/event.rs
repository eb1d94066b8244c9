//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{
    self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use crate::handlers::{OpenInterestChartRequest, PriceChartRequest};

use super::app::{App, Focus, Mode, Tab};

/// Events that can occur in the application.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick for UI updates.
    Tick,
}

/// Messages that update application state.
#[derive(Debug)]
pub enum Message {
    /// Input event from terminal.
    Input(Event),
}

/// Actions that require external handling (network fetches, file writes).
#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    /// Build the price chart for the request.
    SubmitPrice(PriceChartRequest),
    /// Build the open-interest chart for the request.
    SubmitOpenInterest(OpenInterestChartRequest),
    /// Write the given tab's figure to the export directory.
    Export(Tab),
}

/// How long one blocking poll waits before checking whether the UI is gone.
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Reads terminal input on a blocking thread and forwards key and resize
/// events until the receiver is dropped or the terminal stops responding.
pub fn spawn_event_reader(tx: mpsc::UnboundedSender<Message>) {
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            match event::poll(INPUT_POLL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(_) => break,
            }
            let forwarded = match event::read() {
                Ok(CrosstermEvent::Key(key)) => Some(Event::Key(key)),
                Ok(CrosstermEvent::Resize(w, h)) => Some(Event::Resize(w, h)),
                Ok(_) => None,
                Err(_) => break,
            };
            if let Some(ev) = forwarded
                && tx.send(Message::Input(ev)).is_err()
            {
                break;
            }
        }
    });
}

/// Sends a [`Event::Tick`] every `interval_ms`; ticks missed while a chart
/// request is in flight are dropped rather than replayed.
pub fn spawn_tick_timer(tx: mpsc::UnboundedSender<Message>, interval_ms: u64) {
    tokio::spawn(async move {
        let mut ticks = tokio::time::interval(Duration::from_millis(interval_ms));
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticks.tick().await;
            if tx.send(Message::Input(Event::Tick)).is_err() {
                break;
            }
        }
    });
}

/// Updates application state based on a message.
pub fn update(app: &mut App, message: Message) -> Option<Action> {
    match message {
        Message::Input(event) => handle_input(app, event),
    }
}

/// Handles input events and updates application state.
fn handle_input(app: &mut App, event: Event) -> Option<Action> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Resize(_, _) => None,
        Event::Tick => {
            app.clear_stale_messages();
            None
        }
    }
}

/// Handles key press events.
fn handle_key(app: &mut App, key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global keys (work in any mode)
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return None;
        }
        KeyCode::Esc => {
            app.mode = Mode::Normal;
            return None;
        }
        _ => {}
    }

    match app.mode {
        Mode::Normal => handle_normal_mode(app, key),
        Mode::Insert => handle_insert_mode(app, key),
    }
}

/// Handles keys in normal mode.
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            None
        }

        // Tab navigation
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.previous_tab();
            } else {
                app.next_tab();
            }
            None
        }
        KeyCode::BackTab => {
            app.previous_tab();
            None
        }

        // Focus switching
        KeyCode::Char('h') | KeyCode::Left => {
            app.focus = app.focus.previous();
            None
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.focus = app.focus.next();
            None
        }

        // Symbol list navigation
        KeyCode::Char('j') | KeyCode::Down if app.focus == Focus::Symbols => {
            app.move_symbol_cursor(1);
            None
        }
        KeyCode::Char('k') | KeyCode::Up if app.focus == Focus::Symbols => {
            app.move_symbol_cursor(-1);
            None
        }
        KeyCode::PageDown if app.focus == Focus::Symbols => {
            app.move_symbol_cursor(10);
            None
        }
        KeyCode::PageUp if app.focus == Focus::Symbols => {
            app.move_symbol_cursor(-10);
            None
        }
        KeyCode::Char(' ') if app.focus == Focus::Symbols => {
            app.toggle_symbol_at_cursor();
            None
        }

        // Jump to the filter
        KeyCode::Char('/') => {
            app.focus = Focus::Filter;
            app.mode = Mode::Insert;
            None
        }

        // Edit the focused field, or submit from anywhere else
        KeyCode::Char('i') if app.focus.is_text_input() => {
            app.mode = Mode::Insert;
            None
        }
        KeyCode::Enter if app.focus.is_text_input() => {
            app.mode = Mode::Insert;
            None
        }
        KeyCode::Enter | KeyCode::Char('r') => submit(app),

        // Unified hover cursor
        KeyCode::Char('[') => {
            let tab = app.current_tab();
            app.tab_state_mut(tab).panel.move_cursor(-1);
            None
        }
        KeyCode::Char(']') => {
            let tab = app.current_tab();
            app.tab_state_mut(tab).panel.move_cursor(1);
            None
        }

        // Clear the date range
        KeyCode::Char('x') => {
            let tab = app.current_tab();
            let state = app.tab_state_mut(tab);
            state.start_date.clear();
            state.end_date.clear();
            None
        }

        KeyCode::Char('e') => Some(Action::Export(app.current_tab())),

        _ => None,
    }
}

/// Turns the active tab's form into a submit action, reporting form errors
/// in the status bar.
fn submit(app: &mut App) -> Option<Action> {
    match app.submit_request() {
        Ok(action) => Some(action),
        Err(err) => {
            app.show_error(err.to_string());
            None
        }
    }
}

/// Handles keys in insert mode (text input).
fn handle_insert_mode(app: &mut App, key: KeyEvent) -> Option<Action> {
    let is_filter = app.focus == Focus::Filter;
    let Some(input) = app.focused_input_mut() else {
        app.mode = Mode::Normal;
        return None;
    };

    match key.code {
        KeyCode::Enter | KeyCode::Tab => {
            app.mode = Mode::Normal;
            if is_filter {
                app.focus = Focus::Symbols;
            }
            return None;
        }
        KeyCode::Char(c) => {
            input.insert(c);
        }
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.move_left(),
        KeyCode::Right => input.move_right(),
        KeyCode::Home => input.move_home(),
        KeyCode::End => input.move_end(),
        _ => {}
    }

    if is_filter {
        app.filter_changed();
    }
    None
}
