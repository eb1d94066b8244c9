//! Line-chart canvas with a unified hover cursor.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph},
};

use crate::chart::{datetime_to_millis, millis_to_datetime};
use crate::tui::app::ChartPanel;

/// Line colours, assigned to series in order and reused past the end.
const SERIES_COLORS: [Color; 8] = [
    Color::Cyan,
    Color::Yellow,
    Color::Magenta,
    Color::Green,
    Color::LightRed,
    Color::LightBlue,
    Color::LightCyan,
    Color::LightYellow,
];

fn series_color(index: usize) -> Color {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

/// Renders a chart panel inside a bordered block.
pub fn render(frame: &mut Frame, area: Rect, panel: &ChartPanel, focused: bool, loading: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .title(format!(" {} ", panel.figure.title))
        .borders(Borders::ALL)
        .border_style(border_style);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [plot_area, hover_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(1)]).areas(inner);

    if loading {
        let para = Paragraph::new("Loading...").style(Style::default().fg(Color::Yellow));
        frame.render_widget(para, plot_area);
        return;
    }

    let figure = &panel.figure;
    let (Some((x_lo, x_hi)), Some((y_lo, y_hi))) = (figure.x_bounds(), figure.y_bounds()) else {
        let hint = if figure.series.is_empty() {
            "No data. Press Enter to load."
        } else {
            "No points returned."
        };
        let para = Paragraph::new(hint).style(Style::default().fg(Color::DarkGray));
        frame.render_widget(para, plot_area);
        return;
    };

    let (x_min, x_max) = padded(
        datetime_to_millis(x_lo) as f64,
        datetime_to_millis(x_hi) as f64,
        0.0,
    );
    let (y_min, y_max) = padded(y_lo, y_hi, 0.05);

    let points: Vec<Vec<(f64, f64)>> = figure
        .series
        .iter()
        .map(|s| {
            s.points()
                .map(|(t, y)| (datetime_to_millis(t) as f64, y))
                .collect()
        })
        .collect();

    let cursor_line: Option<[(f64, f64); 2]> = panel.cursor_x().map(|t| {
        let x = datetime_to_millis(t) as f64;
        [(x, y_min), (x, y_max)]
    });

    let mut datasets: Vec<Dataset> = figure
        .series
        .iter()
        .zip(&points)
        .enumerate()
        .map(|(i, (series, data))| {
            Dataset::default()
                .name(series.name.clone())
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(series_color(i)))
                .data(data)
        })
        .collect();

    if let Some(ref line) = cursor_line {
        datasets.push(
            Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::DarkGray))
                .data(line),
        );
    }

    let axis_style = Style::default().fg(Color::Gray);
    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .style(axis_style)
                .bounds([x_min, x_max])
                .labels(date_labels(x_min, x_max)),
        )
        .y_axis(
            Axis::default()
                .style(axis_style)
                .bounds([y_min, y_max])
                .labels(value_labels(y_min, y_max)),
        )
        .legend_position(Some(LegendPosition::TopLeft));

    frame.render_widget(chart, plot_area);
    render_hover_line(frame, hover_area, panel);
}

/// Renders every series' value at the hover cursor on one line.
fn render_hover_line(frame: &mut Frame, area: Rect, panel: &ChartPanel) {
    let Some(at) = panel.cursor_x() else {
        return;
    };

    let mut spans = vec![Span::styled(
        at.format("%Y-%m-%d %H:%M").to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    )];

    for (i, hover) in panel.figure.hover_at(at).into_iter().enumerate() {
        let value = hover.y.map_or_else(|| "--".to_string(), format_value);
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            format!("{}: {value}", hover.name),
            Style::default().fg(series_color(i)),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Widens `[lo, hi]` by `fraction` of its span, or by one unit when flat.
fn padded(lo: f64, hi: f64, fraction: f64) -> (f64, f64) {
    let span = hi - lo;
    if span <= f64::EPSILON {
        let pad = if lo.abs() > 1.0 { lo.abs() * 0.01 } else { 1.0 };
        return (lo - pad, hi + pad);
    }
    let pad = span * fraction;
    (lo - pad, hi + pad)
}

/// Start, middle and end dates of the x axis.
fn date_labels(x_min: f64, x_max: f64) -> Vec<String> {
    [x_min, (x_min + x_max) / 2.0, x_max]
        .into_iter()
        .map(|ms| {
            millis_to_datetime(ms as i64)
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        })
        .collect()
}

/// Bottom, middle and top values of the y axis.
fn value_labels(y_min: f64, y_max: f64) -> Vec<String> {
    [y_min, (y_min + y_max) / 2.0, y_max]
        .into_iter()
        .map(format_value)
        .collect()
}

/// Formats a value with two decimals, abbreviating thousands, millions and
/// billions.
fn format_value(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e9 {
        format!("{:.2}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.2}M", value / 1e6)
    } else if abs >= 1e4 {
        format!("{:.2}K", value / 1e3)
    } else {
        format!("{value:.2}")
    }
}
