//! Fixed-point money and locale-aware presentation helpers.

use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};
use thiserror::Error;

const MINOR_UNITS: i64 = 100;
// Largest magnitude whose fractional JSON form (`cents / 100` as f64) decodes back to
// the same cent count.
const MAX_CENTS: i64 = 1 << 50;

/// Monetary amount held as integer minor units (cents).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyParseError {
    #[error("amount is empty")]
    Empty,
    #[error("`{0}` is not a number")]
    Invalid(String),
    #[error("`{0}` is too large")]
    Overflow(String),
}

impl Money {
    pub const ZERO: Money = Money(0);
    /// Largest amount `parse` and deserialization accept, about 11.2 trillion units.
    pub const MAX: Money = Money(MAX_CENTS);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub const fn from_units(units: i64) -> Self {
        Self(units * MINOR_UNITS)
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Lossy conversion for callers that need a plain float (charts, exports).
    pub fn as_f64(self) -> f64 {
        self.0 as f64 / MINOR_UNITS as f64
    }

    /// Parses user-entered text such as `1500`, `12.5`, `-3.99` or `12,50`.
    ///
    /// A lone comma is accepted as the decimal separator. Digits past the
    /// second decimal are rounded half away from zero.
    pub fn parse(input: &str) -> Result<Self, MoneyParseError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::Empty);
        }
        let invalid = || MoneyParseError::Invalid(trimmed.to_string());

        let (negative, unsigned) = match trimmed.as_bytes()[0] {
            b'-' => (true, &trimmed[1..]),
            b'+' => (false, &trimmed[1..]),
            _ => (false, trimmed),
        };

        let normalized = if !unsigned.contains('.') && unsigned.matches(',').count() == 1 {
            unsigned.replace(',', ".")
        } else {
            unsigned.to_string()
        };

        let (whole, fraction) = match normalized.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (normalized.as_str(), ""),
        };
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !all_digits(whole) || !all_digits(fraction) {
            return Err(invalid());
        }

        let overflow = || MoneyParseError::Overflow(trimmed.to_string());
        let mut cents: i64 = 0;
        for digit in whole.bytes() {
            cents = cents
                .checked_mul(10)
                .and_then(|value| value.checked_add(i64::from(digit - b'0')))
                .ok_or_else(overflow)?;
        }
        cents = cents.checked_mul(MINOR_UNITS).ok_or_else(overflow)?;

        let mut digits = fraction.bytes().map(|b| i64::from(b - b'0'));
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().map(|d| d >= 5).unwrap_or(false);
        cents = cents
            .checked_add(tenths * 10 + hundredths + i64::from(round_up))
            .ok_or_else(overflow)?;

        if cents > MAX_CENTS {
            return Err(overflow());
        }
        Ok(Self(if negative { -cents } else { cents }))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let minor = MINOR_UNITS as u64;
        write!(f, "{sign}{}.{:02}", magnitude / minor, magnitude % minor)
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

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 = self.0.saturating_sub(rhs.0);
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

/// Stored as a plain JSON number in major units (`5000`, `12.5`).
impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.0 % MINOR_UNITS == 0 {
            serializer.serialize_i64(self.0 / MINOR_UNITS)
        } else {
            serializer.serialize_f64(self.as_f64())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(MoneyVisitor)
    }
}

struct MoneyVisitor;

impl<'de> Visitor<'de> for MoneyVisitor {
    type Value = Money;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a numeric amount")
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Money, E> {
        value
            .checked_mul(MINOR_UNITS)
            .filter(|cents| cents.unsigned_abs() <= MAX_CENTS as u64)
            .map(Money)
            .ok_or_else(|| E::custom(format!("amount {value} out of range")))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Money, E> {
        i64::try_from(value)
            .map_err(|_| E::custom(format!("amount {value} out of range")))
            .and_then(|value| self.visit_i64(value))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Money, E> {
        let cents = (value * MINOR_UNITS as f64).round();
        if !cents.is_finite() || cents.abs() > MAX_CENTS as f64 {
            return Err(E::custom(format!("amount {value} out of range")));
        }
        Ok(Money(cents as i64))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Money, E> {
        Money::parse(value).map_err(E::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    DayMonthYear,
    MonthDayYear,
}

/// Locale-aware separators and date ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub date_order: DateOrder,
}

impl LocaleConfig {
    pub fn for_tag(tag: &str) -> Self {
        let lowered = tag.trim().to_ascii_lowercase();
        let language = lowered.split(['-', '_']).next().unwrap_or_default();
        let comma_decimal = matches!(language, "pt" | "es" | "de" | "it" | "nl");
        let date_order = if lowered == "en-us" || lowered == "en_us" {
            DateOrder::MonthDayYear
        } else {
            DateOrder::DayMonthYear
        };
        Self {
            language_tag: tag.trim().to_string(),
            decimal_separator: if comma_decimal { ',' } else { '.' },
            grouping_separator: if comma_decimal { '.' } else { ',' },
            date_order,
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::for_tag("pt-BR")
    }
}

/// Renders amounts and dates for display; the ledger itself only stores raw values.
#[derive(Debug, Clone)]
pub struct CurrencyFormatter {
    locale: LocaleConfig,
    symbol: String,
    spaced_symbol: bool,
}

impl Default for CurrencyFormatter {
    fn default() -> Self {
        Self::new("pt-BR", "BRL")
    }
}

impl CurrencyFormatter {
    pub fn new(language_tag: &str, currency: &str) -> Self {
        let code = currency.trim().to_uppercase();
        let (symbol, spaced_symbol) = match code.as_str() {
            "BRL" => ("R$".to_string(), true),
            "USD" => ("$".to_string(), false),
            "GBP" => ("£".to_string(), false),
            "EUR" => ("€".to_string(), true),
            _ => (code.clone(), true),
        };
        Self {
            locale: LocaleConfig::for_tag(language_tag),
            symbol,
            spaced_symbol,
        }
    }

    pub fn locale(&self) -> &LocaleConfig {
        &self.locale
    }

    pub fn format_amount(&self, amount: Money) -> String {
        let sign = if amount.is_negative() { "-" } else { "" };
        let magnitude = amount.cents().unsigned_abs();
        let minor = MINOR_UNITS as u64;
        let whole = group_digits(magnitude / minor, self.locale.grouping_separator);
        let spacer = if self.spaced_symbol { " " } else { "" };
        format!(
            "{sign}{}{spacer}{whole}{}{:02}",
            self.symbol,
            self.locale.decimal_separator,
            magnitude % minor
        )
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        let pattern = match self.locale.date_order {
            DateOrder::DayMonthYear => "%d/%m/%Y",
            DateOrder::MonthDayYear => "%m/%d/%Y",
        };
        date.format(pattern).to_string()
    }

    /// Formats the calendar date of `timestamp` in the host's local time zone.
    pub fn format_timestamp(&self, timestamp: DateTime<Utc>) -> String {
        self.format_date(timestamp.with_timezone(&Local).date_naive())
    }
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}
