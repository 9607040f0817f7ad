//! Aggregate summary models
//!
//! Rows produced by the grouped queries plus the dashboard card values.

use serde::Serialize;

use super::{Category, Money};

/// Which grouping a summary uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SummaryKind {
    Monthly,
    Category,
    Yearly,
}

impl SummaryKind {
    pub const ALL: [SummaryKind; 3] = [Self::Monthly, Self::Category, Self::Yearly];

    /// Heading used in text renderings, e.g. "Monthly"
    pub fn title(self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Category => "Category",
            Self::Yearly => "Yearly",
        }
    }
}

/// One group of a summary: the group key and the summed amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow {
    /// `YYYY-MM`, `YYYY`, or a category label
    pub key: String,
    pub total: Money,
}

impl SummaryRow {
    pub fn new(key: impl Into<String>, total: Money) -> Self {
        Self {
            key: key.into(),
            total,
        }
    }
}

/// Values shown on the dashboard cards
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_month: Money,
    pub total_today: Money,
    pub top_category: Option<Category>,
}

impl DashboardStats {
    /// Label for the top category card
    pub fn top_category_label(&self) -> &'static str {
        self.top_category.map(Category::label).unwrap_or("None")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dashboard_reports_none() {
        let stats = DashboardStats::default();
        assert_eq!(stats.top_category_label(), "None");
        assert!(stats.total_month.is_zero());
    }
}
