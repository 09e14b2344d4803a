//! Fixed-point monetary amounts with 4 decimal places precision.
//!
//! Uses `rust_decimal` internally with scale enforcement so balances can be
//! accumulated across many transactions without floating-point drift.
//! Amounts are persisted as plain JSON numbers written digit for digit, and
//! any JSON number is accepted back, so the stored transaction list stays
//! readable by anything that wrote it as floating point.
//!
//! Arithmetic saturates at [`Amount::MAX`] and [`Amount::MIN`] instead of
//! panicking, as does reading a number too large to represent.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::de::{self, value::MapAccessDeserializer, MapAccess, Visitor};
use serde::{ser, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

/// A monetary amount that maintains exactly 4 decimal places of precision.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use bookkeeping::Amount;
///
/// let amount = Amount::from_str("10.5").unwrap();
/// assert_eq!(amount.to_string(), "10.5000");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// The number of decimal places to maintain.
    pub const SCALE: u32 = 4;

    /// Zero value.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Largest representable amount.
    pub const MAX: Self = Amount(Decimal::MAX);

    /// Smallest representable amount.
    pub const MIN: Self = Amount(Decimal::MIN);

    /// Creates a new `Amount` from a `Decimal`, normalizing to 4 decimal places.
    pub fn new(value: Decimal) -> Self {
        let mut normalized = value;
        normalized.rescale(Self::SCALE);
        Amount(normalized)
    }

    /// Converts a floating point value, rounding to 4 decimal places.
    ///
    /// Values beyond the representable range, infinities included, clamp to
    /// [`Amount::MAX`] or [`Amount::MIN`]. Returns `None` only for NaN.
    pub fn from_f64(value: f64) -> Option<Self> {
        if value.is_nan() {
            return None;
        }
        Some(match Decimal::from_f64(value) {
            Some(decimal) => Amount::new(decimal),
            None if value > 0.0 => Amount::MAX,
            None if value < 0.0 => Amount::MIN,
            None => Amount::ZERO,
        })
    }

    /// Parses the text of a JSON number, exponent forms included.
    fn from_number_text(text: &str) -> Option<Self> {
        match Decimal::from_str(text.trim()) {
            Ok(decimal) => Some(Amount::new(decimal)),
            Err(_) => text.trim().parse::<f64>().ok().and_then(Amount::from_f64),
        }
    }

    /// Adds, clamping to the representable range on overflow.
    pub fn saturating_add(self, rhs: Self) -> Self {
        match self.0.checked_add(rhs.0) {
            Some(sum) => Amount::new(sum),
            None if rhs.0.is_sign_negative() => Amount::MIN,
            None => Amount::MAX,
        }
    }

    /// Subtracts, clamping to the representable range on overflow.
    pub fn saturating_sub(self, rhs: Self) -> Self {
        match self.0.checked_sub(rhs.0) {
            Some(difference) => Amount::new(difference),
            None if self.0.is_sign_negative() => Amount::MIN,
            None => Amount::MAX,
        }
    }

    /// Absolute value.
    pub fn abs(self) -> Self {
        Amount::new(self.0.abs())
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Returns `true` if this value is strictly below zero.
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount::new(Decimal::from(value))
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let decimal = Decimal::from_str(trimmed)?;
        Ok(Amount::new(decimal))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.saturating_add(rhs);
    }
}

impl Sub for Amount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.saturating_sub(rhs)
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.saturating_sub(rhs);
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Amount::new(-self.0)
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, |acc, amount| acc + amount)
    }
}

impl Serialize for Amount {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Exact digits; `serde_json` is built with `arbitrary_precision`
        let number = serde_json::Number::from_str(&self.0.normalize().to_string())
            .map_err(ser::Error::custom)?;
        number.serialize(serializer)
    }
}

struct AmountVisitor;

impl<'de> Visitor<'de> for AmountVisitor {
    type Value = Amount;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Amount, E> {
        Ok(Amount::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Amount, E> {
        Ok(Amount::new(Decimal::from(v)))
    }

    fn visit_i128<E: de::Error>(self, v: i128) -> std::result::Result<Amount, E> {
        Ok(match Decimal::from_i128(v) {
            Some(decimal) => Amount::new(decimal),
            None if v < 0 => Amount::MIN,
            None => Amount::MAX,
        })
    }

    fn visit_u128<E: de::Error>(self, v: u128) -> std::result::Result<Amount, E> {
        Ok(Decimal::from_u128(v).map_or(Amount::MAX, Amount::new))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Amount, E> {
        Amount::from_f64(v).ok_or_else(|| E::custom("amount is not a number"))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Amount, E> {
        Amount::from_str(v).map_err(E::custom)
    }

    // `arbitrary_precision` hands JSON numbers over as a single-entry map
    fn visit_map<A: MapAccess<'de>>(self, map: A) -> std::result::Result<Amount, A::Error> {
        let number = serde_json::Number::deserialize(MapAccessDeserializer::new(map))?;
        let text = number.to_string();
        Amount::from_number_text(&text)
            .ok_or_else(|| de::Error::custom(format!("invalid amount: {}", text)))
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor)
    }
}
