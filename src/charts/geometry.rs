//! Chart geometry
//!
//! Converts summary rows into shapes in a top-left-origin coordinate space
//! (y grows downward). Renderers map these units onto whatever surface they
//! draw on.

use crate::models::{Money, SummaryRow};

pub const MARGIN_LEFT: f64 = 60.0;
pub const MARGIN_RIGHT: f64 = 20.0;
pub const MARGIN_TOP: f64 = 40.0;
pub const MARGIN_BOTTOM: f64 = 80.0;

/// Fraction of each slot occupied by its bar
pub const BAR_WIDTH_RATIO: f64 = 0.7;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Plot area inside a `width` x `height` surface, `None` when the margins
/// leave no room
pub fn plot_area(width: f64, height: f64) -> Option<Rect> {
    let plot_width = width - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = height - MARGIN_TOP - MARGIN_BOTTOM;
    if plot_width <= 0.0 || plot_height <= 0.0 {
        return None;
    }
    Some(Rect {
        x: MARGIN_LEFT,
        y: MARGIN_TOP,
        width: plot_width,
        height: plot_height,
    })
}

/// Result of laying out a chart
#[derive(Debug, Clone, PartialEq)]
pub enum ChartLayout<T> {
    /// Nothing to plot
    NoData,
    /// Surface smaller than the margins
    TooSmall,
    Ready(T),
}

impl<T> ChartLayout<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(chart) => Some(chart),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: Money,
    pub rect: Rect,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub plot: Rect,
    pub bars: Vec<Bar>,
    pub max: Money,
}

impl BarChart {
    /// Labels for the bottom and top of the y axis
    pub fn y_labels(&self) -> (String, String) {
        ("0".to_string(), format_axis(self.max))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinePoint {
    pub label: String,
    pub value: Money,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub plot: Rect,
    pub points: Vec<LinePoint>,
    pub min: Money,
    pub max: Money,
}

impl LineChart {
    pub fn y_labels(&self) -> (String, String) {
        (format_axis(self.min), format_axis(self.max))
    }

    /// Consecutive point pairs to join; empty for a single point
    pub fn segments(&self) -> impl Iterator<Item = (&LinePoint, &LinePoint)> {
        self.points.iter().zip(self.points.iter().skip(1))
    }
}

/// Axis label: amount rounded to two places without trailing zeros
fn format_axis(amount: Money) -> String {
    let text = format!("{:.2}", amount.to_f64());
    let text = text.trim_end_matches('0').trim_end_matches('.');
    text.to_string()
}

/// Bars for category totals
pub fn bar_layout(rows: &[SummaryRow], width: f64, height: f64) -> ChartLayout<BarChart> {
    if rows.is_empty() {
        return ChartLayout::NoData;
    }
    let Some(plot) = plot_area(width, height) else {
        return ChartLayout::TooSmall;
    };

    let max = rows.iter().map(|r| r.total).max().unwrap_or_default();
    let max_value = max.to_f64();
    let slot = plot.width / rows.len() as f64;
    let bar_width = slot * BAR_WIDTH_RATIO;

    let bars = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let bar_height = if max_value > 0.0 {
                (row.total.to_f64() / max_value).max(0.0) * plot.height
            } else {
                0.0
            };
            Bar {
                label: row.key.clone(),
                value: row.total,
                rect: Rect {
                    x: plot.left() + i as f64 * slot + (slot - bar_width) / 2.0,
                    y: plot.bottom() - bar_height,
                    width: bar_width,
                    height: bar_height,
                },
            }
        })
        .collect();

    ChartLayout::Ready(BarChart { plot, bars, max })
}

/// Points for monthly totals, left to right in row order
pub fn line_layout(rows: &[SummaryRow], width: f64, height: f64) -> ChartLayout<LineChart> {
    if rows.is_empty() {
        return ChartLayout::NoData;
    }
    let Some(plot) = plot_area(width, height) else {
        return ChartLayout::TooSmall;
    };

    let min = rows.iter().map(|r| r.total).min().unwrap_or_default();
    let max = rows.iter().map(|r| r.total).max().unwrap_or_default();
    let range = (max - min).to_f64();
    let y_scale = plot.height / if range > 0.0 { range } else { 1.0 };
    let x_step = plot.width / (rows.len().saturating_sub(1).max(1)) as f64;

    let points = rows
        .iter()
        .enumerate()
        .map(|(i, row)| LinePoint {
            label: row.key.clone(),
            value: row.total,
            x: plot.left() + i as f64 * x_step,
            y: plot.bottom() - (row.total - min).to_f64() * y_scale,
        })
        .collect();

    ChartLayout::Ready(LineChart {
        plot,
        points,
        min,
        max,
    })
}
