//! Amount type for handling monetary values read from table cells.
//!
//! This module provides the `Amount` type which wraps `Decimal` and handles lenient parsing of cell
//! text that may carry a currency symbol, trailing junk, or nothing numeric at all.

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};
use std::sync::LazyLock;
use tracing::{debug, trace};

/// The longest leading numeric run that a cell can contribute, e.g. `-12.50` out of `-12.50 GBP`.
static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
        .expect("numeric prefix pattern is valid")
});

/// Significant digits kept from a cell. Any more are truncated.
const MAX_SIGNIFICANT_DIGITS: usize = 28;

/// The most decimal places a `Decimal` can hold. Smaller digits are rounded away.
const MAX_SCALE: i64 = 28;

/// Exponents are clamped to this magnitude; anything beyond it overflows or rounds to zero anyway.
const MAX_EXPONENT: i64 = 1_000_000;

/// A number, or a sum of numbers, too large in magnitude for an `Amount` (about ±7.9e28).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct OutOfRange;

impl Display for OutOfRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "amount is outside the supported range of ±{}", Decimal::MAX)
    }
}

impl std::error::Error for OutOfRange {}

/// Represents a monetary amount.
///
/// Cell text is parsed the way a browser's `parseFloat` reads it: leading whitespace is skipped and
/// the longest numeric prefix is used. Text with no numeric prefix is zero, so a blank or `n/a`
/// cell contributes nothing to a total. A number too large to hold is an `OutOfRange` error rather
/// than a silent zero.
///
/// In JSON an `Amount` is a number.
///
/// # Examples
///
/// ```
/// # use table_totals::model::Amount;
/// let amount = Amount::parse_cell_with_symbol("£150.00", "£").unwrap();
/// assert_eq!(amount.to_string(), "150.00");
/// assert_eq!(amount.with_symbol("£").to_string(), "£150.00");
/// ```
///
/// Unparsable text is zero:
/// ```
/// # use table_totals::model::Amount;
/// assert!(Amount::parse_cell("n/a").unwrap().is_zero());
/// assert!(Amount::parse_cell("").unwrap().is_zero());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Amount {
    #[serde(with = "rust_decimal::serde::float")]
    value: Decimal,
}

impl Amount {
    pub const ZERO: Amount = Amount::new(Decimal::ZERO);

    /// Creates a new Amount from a Decimal value.
    pub const fn new(value: Decimal) -> Self {
        Self { value }
    }

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Parses cell text leniently. Anything that does not start with a number is zero.
    ///
    /// # Errors
    /// `OutOfRange` if the cell starts with a number too large for an `Amount`.
    pub fn parse_cell(text: &str) -> Result<Self, OutOfRange> {
        let trimmed = text.trim_start();
        let Some(m) = NUMERIC_PREFIX.find(trimmed) else {
            trace!("Treating unparsable cell text '{text}' as zero");
            return Ok(Amount::ZERO);
        };
        match parse_prefix(m.as_str()) {
            Some(value) => Ok(Self { value }),
            None => {
                debug!("Cell text '{text}' is too large for an amount");
                Err(OutOfRange)
            }
        }
    }

    /// Removes the first occurrence of `symbol` from the trimmed `text`, then parses it with
    /// `parse_cell`.
    pub fn parse_cell_with_symbol(text: &str, symbol: &str) -> Result<Self, OutOfRange> {
        let trimmed = text.trim();
        if symbol.is_empty() {
            return Self::parse_cell(trimmed);
        }
        Self::parse_cell(&trimmed.replacen(symbol, "", 1))
    }

    /// Adds, or returns `None` if the sum is out of range.
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.value.checked_add(rhs.value).map(Amount::new)
    }

    /// Subtracts, or returns `None` if the difference is out of range.
    pub fn checked_sub(self, rhs: Amount) -> Option<Amount> {
        self.value.checked_sub(rhs.value).map(Amount::new)
    }

    /// Divides by a row count. Returns zero when `count` is zero.
    pub fn average(&self, count: usize) -> Amount {
        if count == 0 {
            return Amount::ZERO;
        }
        Amount::new(self.value / Decimal::from(count))
    }

    /// Returns a `Display` adapter that prefixes the currency symbol, e.g. `-£5.00`.
    pub fn with_symbol<'a>(&self, symbol: &'a str) -> WithSymbol<'a> {
        WithSymbol {
            amount: *self,
            symbol,
        }
    }

    /// The value rounded to two decimal places, half away from zero.
    fn rounded(&self) -> Decimal {
        self.value
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// Turns a matched numeric prefix into a `Decimal`. Returns `None` if it is too large.
///
/// Digits past the 28th significant one are truncated and values smaller than `1e-28` round to
/// zero, so only magnitude can fail.
fn parse_prefix(s: &str) -> Option<Decimal> {
    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(ix) => (&s[..ix], parse_exponent(&s[ix + 1..])),
        None => (s, 0),
    };
    let (negative, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa.strip_prefix('+').unwrap_or(mantissa)),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let digits = format!("{int_part}{frac_part}");
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return Some(Decimal::ZERO);
    }
    let kept = &digits[..digits.len().min(MAX_SIGNIFICANT_DIGITS)];
    let dropped = (digits.len() - kept.len()) as i64;

    // value = kept * 10^-scale
    let scale = frac_part.len() as i64 - exponent - dropped;
    let significand: i128 = kept.parse().ok()?;
    let value = scaled(significand, scale)?;
    Some(if negative { -value } else { value })
}

/// `significand * 10^-scale` for a non-negative significand of at most 28 digits.
fn scaled(significand: i128, scale: i64) -> Option<Decimal> {
    if scale > MAX_SCALE {
        let shift = u32::try_from(scale - MAX_SCALE).ok()?;
        let significand = match 10i128.checked_pow(shift) {
            Some(divisor) => (significand + divisor / 2) / divisor,
            None => 0,
        };
        return Decimal::try_from_i128_with_scale(significand, MAX_SCALE as u32).ok();
    }
    if scale >= 0 {
        return Decimal::try_from_i128_with_scale(significand, scale as u32).ok();
    }
    let mut value = Decimal::from_i128_with_scale(significand, 0);
    for _ in 0..-scale {
        value = value.checked_mul(Decimal::TEN)?;
    }
    Some(value)
}

/// The exponent after `e`, clamped so that scale arithmetic cannot overflow.
fn parse_exponent(s: &str) -> i64 {
    let fallback = if s.starts_with('-') {
        -MAX_EXPONENT
    } else {
        MAX_EXPONENT
    };
    s.parse::<i64>()
        .unwrap_or(fallback)
        .clamp(-MAX_EXPONENT, MAX_EXPONENT)
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.rounded())
    }
}

/// Displays an `Amount` with a currency symbol between the sign and the digits.
#[derive(Debug, Clone, Copy)]
pub struct WithSymbol<'a> {
    amount: Amount,
    symbol: &'a str,
}

impl Display for WithSymbol<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let rounded = self.amount.rounded();
        let sym = self.symbol;
        if rounded.is_sign_negative() && !rounded.is_zero() {
            write!(f, "-{sym}{:.2}", rounded.abs())
        } else {
            write!(f, "{sym}{:.2}", rounded.abs())
        }
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.value()
    }
}
