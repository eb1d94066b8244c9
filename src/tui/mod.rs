//! Terminal dashboard for the market-data charts.
//!
//! Provides a Ratatui-based TUI with one tab per chart, symbol pickers,
//! date-range inputs and a chart canvas with a unified hover cursor.

pub mod app;
pub mod components;
pub mod event;
pub mod input;
pub mod tabs;
pub mod terminal;
pub mod ui;

pub use app::App;
pub use event::{Action, Event, Message};
pub use terminal::{Tui, restore_terminal, setup_terminal};
pub use ui::render;
