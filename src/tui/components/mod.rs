//! Reusable UI components.

pub mod chart_view;
pub mod date_form;
pub mod status_bar;
pub mod symbol_picker;
pub mod tab_bar;
