use crate::model::Amount;
use serde::{Deserialize, Serialize};

/// The aggregated totals for one target date.
///
/// Serialized with snake_case keys; the money fields are JSON numbers.
///
/// `total_net` is always `total_amount - total_expenses` and each average is its total divided by
/// `row_count`, which is never zero for a `Summary` that exists.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Summary {
    date: String,
    total_amount: Amount,
    total_expenses: Amount,
    total_net: Amount,
    row_count: usize,
    average_amount: Amount,
    average_expenses: Amount,
    average_net: Amount,
}

impl Summary {
    /// Builds a `Summary` from running totals. `row_count` must be greater than zero.
    pub(crate) fn new(
        date: impl Into<String>,
        total_amount: Amount,
        total_expenses: Amount,
        total_net: Amount,
        row_count: usize,
    ) -> Self {
        Self {
            date: date.into(),
            total_amount,
            total_expenses,
            total_net,
            row_count,
            average_amount: total_amount.average(row_count),
            average_expenses: total_expenses.average(row_count),
            average_net: total_net.average(row_count),
        }
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn total_amount(&self) -> Amount {
        self.total_amount
    }

    pub fn total_expenses(&self) -> Amount {
        self.total_expenses
    }

    pub fn total_net(&self) -> Amount {
        self.total_net
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn average_amount(&self) -> Amount {
        self.average_amount
    }

    pub fn average_expenses(&self) -> Amount {
        self.average_expenses
    }

    pub fn average_net(&self) -> Amount {
        self.average_net
    }
}

/// The parsed values of one qualifying row, kept for the detailed report.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RowBreakdown {
    /// The text of the row's first cell.
    pub label: String,
    pub amount: Amount,
    pub expense_1: Amount,
    pub expense_2: Amount,
    /// `expense_1 + expense_2`.
    pub expenses: Amount,
    /// `amount - expenses`.
    pub net: Amount,
}

/// What the structure probe found: header labels and the first body row.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StructureReport {
    /// Number of header cells, zero when there is no header row.
    pub total_columns: usize,
    /// Trimmed header labels in column order.
    pub headers: Vec<String>,
    /// Trimmed cell texts of the first body row.
    pub sample_data: Vec<String>,
}
