//! Monetary amounts and quantity normalization.
//!
//! Amounts are held as integer cents. Conversion from floating point goes
//! through the shortest round-trip decimal representation of the input, so
//! `50.005` becomes `5001` cents (round-half-up) instead of drifting down to
//! `5000` the way `(50.005 * 100.0).round()` does.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Largest amount accepted from input, in whole currency units.
pub const MAX_AMOUNT: f64 = 1_000_000_000_000.0;

const MAX_CENTS: i64 = 100_000_000_000_000;

/// An amount of money in cents.
///
/// Stored amounts are always non-negative; derived values such as a monthly
/// balance may be negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Clamp into the range a stored amount may hold.
    pub fn non_negative(self) -> Self {
        Money(self.0.clamp(0, MAX_CENTS))
    }
}

impl From<f64> for Money {
    fn from(value: f64) -> Self {
        normalize_amount(value)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(NumberVisitor).map(normalize_amount)
    }
}

/// Normalize a raw amount: NaN and negatives become zero, values past
/// [`MAX_AMOUNT`] saturate, everything else rounds half-up to cents.
pub fn normalize_amount(value: f64) -> Money {
    if value.is_nan() || value <= 0.0 {
        return Money::ZERO;
    }
    if value >= MAX_AMOUNT {
        return Money(MAX_CENTS);
    }
    if value < 0.005 {
        return Money::ZERO;
    }

    let cents = Decimal::from_str(&value.to_string())
        .ok()
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| (d * Decimal::ONE_HUNDRED).to_i64())
        .unwrap_or_else(|| (value * 100.0).round() as i64);
    Money(cents.clamp(0, MAX_CENTS))
}

/// Normalize a raw quantity to a non-negative whole number (nearest integer).
pub fn normalize_quantity(value: f64) -> u32 {
    if value.is_nan() || value <= 0.0 {
        return 0;
    }
    if value >= u32::MAX as f64 {
        return u32::MAX;
    }
    value.round() as u32
}

/// Parse an amount typed into a form. Accepts `,` as the decimal separator;
/// anything unparseable is zero.
pub fn parse_amount(input: &str) -> Money {
    normalize_amount(parse_number(input))
}

/// Parse a quantity typed into a form; anything unparseable is zero.
pub fn parse_quantity(input: &str) -> u32 {
    normalize_quantity(parse_number(input))
}

fn parse_number(input: &str) -> f64 {
    input
        .trim()
        .replacen(',', ".", 1)
        .parse::<f64>()
        .unwrap_or(0.0)
}

/// Serde adapter for quantity fields: accepts numbers or numeric strings.
pub fn deserialize_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    deserializer
        .deserialize_any(NumberVisitor)
        .map(normalize_quantity)
}

/// Serde adapter for optional quantity fields.
pub fn deserialize_optional_quantity<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u32>, D::Error> {
    let raw: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    match raw {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(value) => deserialize_quantity(value).map(Some).map_err(de::Error::custom),
    }
}

struct NumberVisitor;

impl<'de> Visitor<'de> for NumberVisitor {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
        Ok(v)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
        Ok(v as f64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        Ok(parse_number(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<f64, E> {
        Ok(0.0)
    }
}
