//! Date strings in `DD/MM/YYYY` form.
//!
//! Rows are matched against a target date by plain string equality, so `TargetDate` only checks
//! the shape of the string. Calendar parsing is only needed to expand a range of dates.

use crate::Result;
use anyhow::{bail, Context};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::sync::LazyLock;

/// The `chrono` format matching `DD/MM/YYYY`.
const DATE_FORMAT: &str = "%d/%m/%Y";

static DATE_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{2}/[0-9]{2}/[0-9]{4}$").expect("date shape pattern is valid")
});

/// A date string that has the `DD/MM/YYYY` shape. It is not necessarily a real calendar date.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetDate(String);

impl TargetDate {
    /// Returns `Some` if `s` is two digits, a slash, two digits, a slash, four digits.
    pub fn parse(s: &str) -> Option<Self> {
        if DATE_SHAPE.is_match(s) {
            Some(Self(s.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TargetDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Expands the inclusive range `from..=to` into one `DD/MM/YYYY` string per calendar day.
///
/// # Errors
/// - Either endpoint is not a real calendar date in `DD/MM/YYYY` form.
/// - `from` is after `to`.
pub fn expand_range(from: &str, to: &str) -> Result<Vec<String>> {
    let start = parse_calendar_date(from)?;
    let end = parse_calendar_date(to)?;
    if start > end {
        bail!("The start of the date range ({from}) is after its end ({to})");
    }
    Ok(start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|day| day.format(DATE_FORMAT).to_string())
        .collect())
}

fn parse_calendar_date(s: &str) -> Result<NaiveDate> {
    if TargetDate::parse(s).is_none() {
        bail!("'{s}' is not in DD/MM/YYYY format");
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT).with_context(|| format!("'{s}' is not a real date"))
}
