//! Application state for the TUI.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::OidashError;
use crate::catalog::SymbolCatalog;
use crate::chart::{Figure, OPEN_INTEREST_CHART_TITLE, PRICE_CHART_TITLE};
use crate::config::DashboardConfig;
use crate::handlers::{DateRange, OpenInterestChartRequest, PriceChartRequest};
use crate::models::{Interval, Period, SymbolOption};

use super::event::Action;
use super::input::TextInput;

/// How long a status message stays visible.
const MESSAGE_TTL: Duration = Duration::from_secs(5);

/// Central application state container.
pub struct App {
    // -- Tab State --
    /// Tabs in display order.
    pub tabs: Vec<Tab>,
    /// Index of the currently active tab.
    pub active_tab: usize,
    /// Form and chart state of the price tab.
    pub prices: TabState,
    /// Form and chart state of the open-interest tab.
    pub open_interest: TabState,

    // -- Reference Data --
    catalog: SymbolCatalog,
    pub interval: Interval,
    pub period: Period,

    // -- UI State --
    /// Current focus within the active tab.
    pub focus: Focus,
    /// Current input mode.
    pub mode: Mode,
    /// Tab whose chart is being built, if any.
    pub loading: Option<Tab>,
    /// Transient message for the status bar.
    pub status_message: Option<StatusMessage>,

    // -- Internal --
    /// Flag to signal application should quit.
    pub should_quit: bool,
}

impl App {
    /// Creates the dashboard state, preselecting the configured symbol on
    /// both tabs when the catalog lists it.
    pub fn new(catalog: SymbolCatalog, settings: &DashboardConfig) -> Self {
        let default_symbol = catalog
            .default_symbol(&settings.default_symbol)
            .map(str::to_string);

        let mut prices = TabState::new(SymbolPicker::single(), PRICE_CHART_TITLE);
        let mut open_interest = TabState::new(SymbolPicker::multi(), OPEN_INTEREST_CHART_TITLE);
        if let Some(symbol) = default_symbol {
            prices.picker.preselect(&catalog, &symbol);
            open_interest.picker.preselect(&catalog, &symbol);
        }

        Self {
            tabs: Tab::ALL.to_vec(),
            active_tab: 0,
            prices,
            open_interest,

            catalog,
            interval: settings.interval,
            period: settings.period,

            focus: Focus::Symbols,
            mode: Mode::Normal,
            loading: None,
            status_message: None,

            should_quit: false,
        }
    }

    pub fn catalog(&self) -> &SymbolCatalog {
        &self.catalog
    }

    /// Returns the currently active tab.
    pub fn current_tab(&self) -> Tab {
        self.tabs[self.active_tab]
    }

    /// Switches to the next tab.
    pub fn next_tab(&mut self) {
        if !self.tabs.is_empty() {
            self.active_tab = (self.active_tab + 1) % self.tabs.len();
            self.mode = Mode::Normal;
        }
    }

    /// Switches to the previous tab.
    pub fn previous_tab(&mut self) {
        if !self.tabs.is_empty() {
            self.active_tab = self
                .active_tab
                .checked_sub(1)
                .unwrap_or(self.tabs.len() - 1);
            self.mode = Mode::Normal;
        }
    }

    pub fn tab_state(&self, tab: Tab) -> &TabState {
        match tab {
            Tab::Prices => &self.prices,
            Tab::OpenInterest => &self.open_interest,
        }
    }

    pub fn tab_state_mut(&mut self, tab: Tab) -> &mut TabState {
        match tab {
            Tab::Prices => &mut self.prices,
            Tab::OpenInterest => &mut self.open_interest,
        }
    }

    /// Catalog entries visible through the given tab's filter.
    pub fn visible_symbols(&self, tab: Tab) -> Vec<&SymbolOption> {
        self.catalog.matching(self.tab_state(tab).picker.filter.as_str())
    }

    /// Moves the symbol cursor of the active tab by `delta` rows.
    pub fn move_symbol_cursor(&mut self, delta: isize) {
        let tab = self.current_tab();
        let visible = self.visible_symbols(tab).len();
        self.tab_state_mut(tab).picker.move_cursor(delta, visible);
    }

    /// Selects (price tab) or toggles (open-interest tab) the symbol under
    /// the cursor.
    pub fn toggle_symbol_at_cursor(&mut self) {
        let tab = self.current_tab();
        let state = match tab {
            Tab::Prices => &mut self.prices,
            Tab::OpenInterest => &mut self.open_interest,
        };
        let visible = self.catalog.matching(state.picker.filter.as_str());
        if let Some(option) = visible.get(state.picker.cursor) {
            let symbol = option.value.clone();
            state.picker.toggle(symbol);
        }
    }

    /// Re-clamps the symbol cursor after the filter text changed.
    pub fn filter_changed(&mut self) {
        let tab = self.current_tab();
        let visible = self.visible_symbols(tab).len();
        let picker = &mut self.tab_state_mut(tab).picker;
        picker.cursor = picker.cursor.min(visible.saturating_sub(1));
    }

    /// The text field under focus on the active tab, if focus is on one.
    pub fn focused_input_mut(&mut self) -> Option<&mut TextInput> {
        let focus = self.focus;
        let tab = self.current_tab();
        let state = self.tab_state_mut(tab);
        match focus {
            Focus::Filter => Some(&mut state.picker.filter),
            Focus::StartDate => Some(&mut state.start_date),
            Focus::EndDate => Some(&mut state.end_date),
            Focus::Symbols | Focus::Chart => None,
        }
    }

    /// Builds the submit action for the active tab from its form state.
    ///
    /// # Errors
    ///
    /// Returns [`OidashError::Input`] if the date range is invalid, or on the
    /// price tab when no symbol or no date range is picked.
    pub fn submit_request(&self) -> crate::Result<Action> {
        let tab = self.current_tab();
        let state = self.tab_state(tab);
        let date_range = DateRange::parse(state.start_date.as_str(), state.end_date.as_str())?;

        match tab {
            Tab::Prices => {
                let symbol = state
                    .picker
                    .selected()
                    .first()
                    .cloned()
                    .ok_or_else(|| OidashError::Input("select a symbol first".to_string()))?;
                if date_range.is_none() {
                    return Err(OidashError::Input(
                        "pick a start and end date first".to_string(),
                    ));
                }
                Ok(Action::SubmitPrice(PriceChartRequest { symbol, date_range }))
            }
            Tab::OpenInterest => Ok(Action::SubmitOpenInterest(OpenInterestChartRequest {
                symbols: state.picker.selected().to_vec(),
                date_range,
            })),
        }
    }

    /// Installs a handler result on a tab; failures leave an empty chart and
    /// a status-bar error.
    pub fn apply_figure(&mut self, tab: Tab, result: crate::Result<Figure>) {
        self.loading = None;
        match result {
            Ok(figure) => self.tab_state_mut(tab).panel.set_figure(figure),
            Err(err) => {
                let title = self.tab_state(tab).panel.figure.title.clone();
                self.tab_state_mut(tab).panel.set_figure(Figure::empty(title));
                self.show_error(err.to_string());
            }
        }
    }

    /// Sets an error message to display.
    pub fn show_error(&mut self, message: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            text: message.into(),
            is_error: true,
            timestamp: Instant::now(),
        });
    }

    /// Sets an informational message to display.
    pub fn show_info(&mut self, message: impl Into<String>) {
        self.status_message = Some(StatusMessage {
            text: message.into(),
            is_error: false,
            timestamp: Instant::now(),
        });
    }

    /// Clears status messages older than 5 seconds.
    pub fn clear_stale_messages(&mut self) {
        if let Some(ref message) = self.status_message
            && message.timestamp.elapsed() > MESSAGE_TTL
        {
            self.status_message = None;
        }
    }
}

/// Tabs in the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tab {
    /// Spot vs futures close prices for one symbol.
    Prices,
    /// Open-interest notional for several symbols.
    OpenInterest,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Prices, Tab::OpenInterest];

    /// Returns the display title for the tab.
    pub fn title(&self) -> &'static str {
        match self {
            Tab::Prices => "Spot and Futures Prices",
            Tab::OpenInterest => "Open Interest",
        }
    }

    /// File name used when exporting this tab's figure.
    pub fn export_file_name(&self) -> &'static str {
        match self {
            Tab::Prices => "price_chart.json",
            Tab::OpenInterest => "open_interest_chart.json",
        }
    }
}

/// Per-tab form and chart state.
#[derive(Clone, Debug)]
pub struct TabState {
    pub picker: SymbolPicker,
    pub start_date: TextInput,
    pub end_date: TextInput,
    pub panel: ChartPanel,
}

impl TabState {
    fn new(picker: SymbolPicker, title: &str) -> Self {
        Self {
            picker,
            start_date: TextInput::date(),
            end_date: TextInput::date(),
            panel: ChartPanel::new(Figure::empty(title)),
        }
    }
}

/// A filterable symbol list with single or multiple selection.
#[derive(Clone, Debug)]
pub struct SymbolPicker {
    pub filter: TextInput,
    /// Row index into the filtered list.
    pub cursor: usize,
    multi: bool,
    /// Selected symbols in the order they were picked.
    selected: Vec<String>,
}

impl SymbolPicker {
    pub fn single() -> Self {
        Self {
            filter: TextInput::symbol_filter(),
            cursor: 0,
            multi: false,
            selected: Vec::new(),
        }
    }

    pub fn multi() -> Self {
        Self {
            multi: true,
            ..Self::single()
        }
    }

    pub fn is_multi(&self) -> bool {
        self.multi
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_selected(&self, symbol: &str) -> bool {
        self.selected.iter().any(|s| s == symbol)
    }

    /// Selects `symbol` and moves the cursor onto it.
    fn preselect(&mut self, catalog: &SymbolCatalog, symbol: &str) {
        self.selected = vec![symbol.to_string()];
        if let Some(row) = catalog.options().iter().position(|o| o.value == symbol) {
            self.cursor = row;
        }
    }

    fn move_cursor(&mut self, delta: isize, visible: usize) {
        if visible == 0 {
            self.cursor = 0;
            return;
        }
        let max = visible as isize - 1;
        self.cursor = (self.cursor as isize + delta).clamp(0, max) as usize;
    }

    /// Multi mode toggles membership; single mode replaces the selection.
    fn toggle(&mut self, symbol: String) {
        if !self.multi {
            self.selected = vec![symbol];
        } else if let Some(pos) = self.selected.iter().position(|s| *s == symbol) {
            self.selected.remove(pos);
        } else {
            self.selected.push(symbol);
        }
    }
}

/// A figure plus the unified-hover cursor over it.
#[derive(Clone, Debug)]
pub struct ChartPanel {
    pub figure: Figure,
    /// Index into `figure.x_values()`.
    cursor: Option<usize>,
}

impl ChartPanel {
    pub fn new(figure: Figure) -> Self {
        Self {
            figure,
            cursor: None,
        }
    }

    /// Replaces the figure and parks the cursor on the latest x.
    pub fn set_figure(&mut self, figure: Figure) {
        self.cursor = figure.x_values().len().checked_sub(1);
        self.figure = figure;
    }

    /// Steps the hover cursor by `delta` x positions, clamped to the data.
    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.figure.x_values().len();
        if let Some(cursor) = self.cursor
            && len > 0
        {
            self.cursor = Some((cursor as isize + delta).clamp(0, len as isize - 1) as usize);
        }
    }

    /// The x position under the hover cursor.
    pub fn cursor_x(&self) -> Option<DateTime<Utc>> {
        self.cursor
            .and_then(|i| self.figure.x_values().get(i).copied())
    }
}

/// UI focus targets, in left-to-right order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    Filter,
    #[default]
    Symbols,
    StartDate,
    EndDate,
    Chart,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::Filter,
        Focus::Symbols,
        Focus::StartDate,
        Focus::EndDate,
        Focus::Chart,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// Whether this focus target is a text field.
    pub fn is_text_input(self) -> bool {
        matches!(self, Focus::Filter | Focus::StartDate | Focus::EndDate)
    }
}

/// Input mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
}

/// Status-bar message with timestamp for auto-clear.
#[derive(Clone, Debug)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
    /// When the message was shown.
    pub timestamp: Instant,
}
