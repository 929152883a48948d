//! Error types.
//!
//! Failures that should stop the program (unreadable files, broken config) are `anyhow::Error`.
//! The expected ways for a date to produce no totals are modeled by `NoTotals` so that callers
//! can report them and carry on.

use std::fmt::{Display, Formatter};

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// The reasons an aggregation can come back without a `Summary`. None is fatal.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum NoTotals {
    /// The target date does not look like `DD/MM/YYYY`.
    InvalidDate { date: String },
    /// No row's date cell equals the target date.
    NoData { date: String },
    /// A matching row holds a number, or the totals grow to a number, too large to represent.
    OutOfRange { date: String },
}

impl NoTotals {
    /// The date string that was asked for.
    pub fn date(&self) -> &str {
        match self {
            NoTotals::InvalidDate { date }
            | NoTotals::NoData { date }
            | NoTotals::OutOfRange { date } => date,
        }
    }
}

impl Display for NoTotals {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NoTotals::InvalidDate { date } => {
                write!(f, "Please use DD/MM/YYYY format (got '{date}')")
            }
            NoTotals::NoData { date } => write!(f, "No data found for: {date}"),
            NoTotals::OutOfRange { date } => {
                write!(f, "Totals for {date} are too large to calculate")
            }
        }
    }
}

impl std::error::Error for NoTotals {}
