//! Terminal charts of the sales groupings.
//!
//! Each chart plots one value per category label and carries a horizontal
//! reference line at the largest value. Charts are drawn into an inline
//! viewport, so they stay in the scrollback after the process exits.

use std::io;

use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    widgets::{Axis, Block, Chart, Dataset, GraphType},
    Frame, Terminal, TerminalOptions, Viewport,
};
use rust_decimal::{prelude::ToPrimitive, Decimal};

use crate::domain::grouping::Grouping;

pub const MIN_HEIGHT: u16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    LineWithMarkers,
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    pub max: Option<Decimal>,
    pub kind: ChartKind,
}

impl ChartSpec {
    pub fn from_grouping(
        grouping: &Grouping,
        kind: ChartKind,
        title: &str,
        x_title: &str,
        y_title: &str,
    ) -> Self {
        Self {
            title: title.to_owned(),
            x_title: x_title.to_owned(),
            y_title: y_title.to_owned(),
            labels: grouping.keys().map(str::to_owned).collect(),
            values: grouping
                .values()
                .map(|total| total.to_f64().unwrap_or_default())
                .collect(),
            max: grouping.values().max(),
            kind,
        }
    }

    pub fn product_totals(by_product: &Grouping) -> Self {
        Self::from_grouping(
            by_product,
            ChartKind::Bar,
            "Total sales by product",
            "Products",
            "Total sales",
        )
    }

    pub fn date_totals(by_date: &Grouping) -> Self {
        Self::from_grouping(
            by_date,
            ChartKind::LineWithMarkers,
            "Total sales by date",
            "Date",
            "Total sales",
        )
    }

    fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .map(|(i, value)| (i as f64, *value))
            .collect()
    }

    fn max_value(&self) -> f64 {
        self.max.and_then(|max| max.to_f64()).unwrap_or_default()
    }

    /// Category `i` sits at `x = i`; the axis is padded by one slot on each
    /// side so bars never land on the y axis.
    fn x_bounds(&self) -> [f64; 2] {
        [-1.0, self.labels.len() as f64]
    }

    fn y_top(&self) -> f64 {
        let max = self.max_value();
        if max > 0.0 {
            max * 1.1
        } else {
            1.0
        }
    }
}

/// Draw `charts` stacked in a fresh inline viewport on stdout.
pub fn draw(charts: &[ChartSpec], height: u16) -> io::Result<()> {
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::with_options(
        backend,
        TerminalOptions {
            viewport: Viewport::Inline(height.max(MIN_HEIGHT)),
        },
    )?;

    terminal.draw(|frame| {
        let area = frame.area();
        render_charts(frame, area, charts);
    })?;
    terminal.show_cursor()?;
    println!();

    Ok(())
}

pub fn render_charts(frame: &mut Frame, area: Rect, charts: &[ChartSpec]) {
    if charts.is_empty() {
        return;
    }

    let count = charts.len() as u32;
    let areas = Layout::vertical(charts.iter().map(|_| Constraint::Ratio(1, count))).split(area);

    for (chart, area) in charts.iter().zip(areas.iter()) {
        render_chart(frame, *area, chart);
    }
}

pub fn render_chart(frame: &mut Frame, area: Rect, spec: &ChartSpec) {
    let points = spec.points();
    let [x_min, x_max] = spec.x_bounds();
    let reference = [(x_min, spec.max_value()), (x_max, spec.max_value())];
    let y_top = spec.y_top();

    let mut datasets = match spec.kind {
        ChartKind::Bar => vec![Dataset::default()
            .marker(Marker::HalfBlock)
            .graph_type(GraphType::Bar)
            .style(Style::default().fg(Color::Blue))
            .data(&points)],
        ChartKind::LineWithMarkers => vec![
            Dataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Green))
                .data(&points),
            Dataset::default()
                .marker(Marker::Block)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::Green))
                .data(&points),
        ],
    };

    if let Some(max) = spec.max {
        datasets.push(
            Dataset::default()
                .name(format!("max {max}"))
                .marker(Marker::Dot)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Red))
                .data(&reference),
        );
    }

    // Blank labels at both ends line the category labels up with x = i.
    let x_labels = std::iter::once(String::new())
        .chain(spec.labels.iter().cloned())
        .chain(std::iter::once(String::new()))
        .collect::<Vec<_>>();
    let y_labels = vec![
        "0".to_owned(),
        format!("{:.2}", y_top / 2.0),
        format!("{y_top:.2}"),
    ];

    let chart = Chart::new(datasets)
        .block(Block::bordered().title(spec.title.as_str()))
        .x_axis(
            Axis::default()
                .title(spec.x_title.as_str())
                .style(Style::default().fg(Color::Gray))
                .bounds([x_min, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(spec.y_title.as_str())
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, y_top])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}
