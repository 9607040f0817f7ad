//! Charts over the summary data
//!
//! Bar chart of category totals and line chart of monthly totals. Layout is
//! pure geometry in [`geometry`]; the TUI draws the result on a canvas.

pub mod geometry;

pub use geometry::{bar_layout, line_layout, BarChart, ChartLayout, LineChart};

/// Shown when there is nothing to plot
pub const NO_DATA_MSG: &str = "No data available to display graphs.";
/// Shown when the drawing area is smaller than the margins
pub const TOO_SMALL_MSG: &str = "Graph area too small.";

/// Which chart is displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartKind {
    #[default]
    CategoryBar,
    MonthlyLine,
}

impl ChartKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::CategoryBar => "Total Expenses by Category",
            Self::MonthlyLine => "Monthly Expenses Trend",
        }
    }

    /// Label for the chart selector
    pub fn selector_label(self) -> &'static str {
        match self {
            Self::CategoryBar => "Bar Chart (Category)",
            Self::MonthlyLine => "Line Chart (Monthly)",
        }
    }
}
