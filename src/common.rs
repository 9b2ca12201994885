//! Money and clock-time helpers shared by the ledger, reports and export.
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime, Timelike};
use rust_decimal::{Decimal, RoundingStrategy};
use validator::ValidationError;

use crate::errors::ServiceError;

const CURRENCY_PREFIX: &str = "Rp ";
const MAX_FRACTION_DIGITS: u32 = 3;
const MINUTES_PER_DAY: i64 = 24 * 60;

pub const CLOCK_FORMAT: &str = "%H:%M";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Renders an amount as Rupiah text, e.g. `Rp 1.234.567,5`.
///
/// Thousands are grouped with `.`, the fraction uses `,` and keeps at most
/// three digits. Zero renders as `Rp 0`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    if rounded.is_zero() {
        return format!("{CURRENCY_PREFIX}0");
    }

    let digits = rounded.abs().to_string();
    let (integer, fraction) = match digits.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (digits.as_str(), None),
    };

    let mut out = String::from(CURRENCY_PREFIX);
    if rounded.is_sign_negative() {
        out.push('-');
    }
    out.push_str(&group_thousands(integer));
    if let Some(fraction) = fraction {
        out.push(',');
        out.push_str(fraction);
    }
    out
}

/// Reads an amount back from currency text typed by an operator.
///
/// Everything except digits and `,` is dropped and `,` is taken as the
/// decimal separator. Anything that does not leave a number behind is 0.
pub fn parse_currency(text: &str) -> Decimal {
    let mut kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if kept.ends_with('.') {
        kept.pop();
    }
    if kept.starts_with('.') {
        kept.insert(0, '0');
    }
    if kept.is_empty() {
        return Decimal::ZERO;
    }

    Decimal::from_str(&kept).unwrap_or(Decimal::ZERO)
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Minutes between two clock times, wrapping past midnight.
///
/// Returns `None` when either time is missing. Equal times give 0.
pub fn compute_duration_minutes(start: Option<NaiveTime>, end: Option<NaiveTime>) -> Option<u32> {
    let (start, end) = (start?, end?);
    let mut minutes = minute_of_day(end) - minute_of_day(start);
    if minutes < 0 {
        minutes += MINUTES_PER_DAY;
    }
    u32::try_from(minutes).ok()
}

fn minute_of_day(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

/// Parses an `HH:MM` clock time.
pub fn parse_clock(text: &str) -> Result<NaiveTime, ServiceError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation("time is required"));
    }
    NaiveTime::parse_from_str(trimmed, CLOCK_FORMAT).map_err(|e| {
        ServiceError::validation(format!("invalid time '{}', expected HH:MM: {}", trimmed, e))
    })
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(text: &str) -> Result<NaiveDate, ServiceError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::validation("date is required"));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|e| {
        ServiceError::validation(format!(
            "invalid date '{}', expected YYYY-MM-DD: {}",
            trimmed, e
        ))
    })
}

/// Trims free text and treats an all-whitespace value as absent.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Serde adapter storing optional clock times as `"HH:MM"`.
///
/// Empty strings left behind by older data read back as `None`.
pub mod clock {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::CLOCK_FORMAT;

    pub fn serialize<S>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(time) => serializer.serialize_some(&time.format(CLOCK_FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => NaiveTime::parse_from_str(text, CLOCK_FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
