//! Amount type for handling monetary values.
//!
//! This module provides the `Amount` type which wraps `Decimal`. Amounts are stored without a
//! currency symbol, and the text they were parsed from is reproduced exactly when they are written
//! back out, so `40.50` stays `40.50` and `100` stays `100`. Scientific notation is accepted on
//! input and written back in plain form, so `1e3` becomes `1000`.

use crate::error::Error;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Represents a monetary amount.
///
/// # Examples
///
/// ```
/// # use spendsense::model::Amount;
/// # use std::str::FromStr;
/// let amount = Amount::from_str(" 40.50 ").unwrap();
/// assert_eq!(amount.to_string(), "40.50");
/// assert_eq!(amount.money("£"), "£40.50");
/// ```
///
/// Amounts are compared by value, so differing scale does not matter:
/// ```
/// # use spendsense::model::Amount;
/// # use std::str::FromStr;
/// let a = Amount::from_str("60").unwrap();
/// let b = Amount::from_str("60.00").unwrap();
/// assert_eq!(a, b);
/// assert_ne!(a.to_string(), b.to_string());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Returns the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Formats the amount for people to read: currency symbol, thousands separators and two
    /// decimal places, e.g. `-£1,234.50`.
    pub fn money(&self, symbol: &str) -> String {
        money(self.0, symbol)
    }
}

/// Formats any decimal value the same way as [`Amount::money`].
///
/// The digits go through an `f64` on the way, so values with more than about 15 significant
/// digits are shown approximately. Calculations are not affected.
pub fn money(value: Decimal, symbol: &str) -> String {
    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };
    let abs = value.abs().round_dp(2);
    format!(
        "{sign}{symbol}{}",
        format_num::format_num!(",.2", abs.to_f64().unwrap_or_default())
    )
}

impl FromStr for Amount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::parse("amount", s));
        }
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map(Amount)
            .map_err(|_| Error::parse("amount", s))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Amount::from_str(&s).map_err(serde::de::Error::custom)
    }
}
