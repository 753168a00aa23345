//! Date and currency display helpers.
//!
//! Stored values stay as the user (or the AI) typed them; everything here is
//! read-only presentation plus the single amount parser used by every
//! consumer of a `total` field.

use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

/// Display used for an empty amount.
pub const ZERO_CURRENCY: &str = "R$ 0,00";

/// Display used when a value cannot be read.
pub const PLACEHOLDER: &str = "N/A";

lazy_static! {
    static ref ISO_DATE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
    static ref BR_DATE: Regex = Regex::new(r"^(\d{1,2})[/-](\d{1,2})[/-](\d{4})$").unwrap();
    static ref FLOAT_PREFIX: Regex =
        Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?").unwrap();
    static ref INT_PREFIX: Regex = Regex::new(r"^[+-]?\d+").unwrap();
}

/// Reads a locale-flexible amount.
///
/// The first `,` is taken as the decimal separator, then the longest numeric
/// prefix is parsed, so `"12,50 reais"` reads as `12.5` and `"abc"` as `None`.
pub fn parse_amount(value: &str) -> Option<f64> {
    let normalized = value.replacen(',', ".", 1);
    let trimmed = normalized.trim_start();
    let prefix = FLOAT_PREFIX.find(trimmed)?;
    prefix
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

/// [`parse_amount`] with non-numeric values counted as zero.
pub fn amount_or_zero(value: &str) -> f64 {
    parse_amount(value).unwrap_or(0.0)
}

fn parse_int_prefix(value: &str) -> Option<i64> {
    INT_PREFIX
        .find(value.trim_start())
        .and_then(|m| m.as_str().parse().ok())
}

fn calendar_date(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
    let year = i32::try_from(parse_int_prefix(year)?).ok()?;
    let month = u32::try_from(parse_int_prefix(month)?).ok()?;
    let day = u32::try_from(parse_int_prefix(day)?).ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Normalizes a date to the `DD/MM` display form.
///
/// Accepts `YYYY-MM-DD`, `DD/MM/YYYY` and `DD/MM` (returned as is). The year
/// is always dropped. Anything that does not parse to a real calendar date is
/// returned unchanged; an empty string becomes `N/A`. Impossible days are not
/// carried into the next month: `2023-02-30` stays `2023-02-30`, not `02/03`.
///
/// ```
/// use delivery_sheet_common::format_date;
///
/// assert_eq!(format_date("2024-03-05"), "05/03");
/// assert_eq!(format_date("5/3/2024"), "05/03");
/// assert_eq!(format_date("05/03"), "05/03");
/// ```
pub fn format_date(input: &str) -> String {
    if input.is_empty() {
        return PLACEHOLDER.to_string();
    }

    let date = if input.contains('-') {
        let parts: Vec<&str> = input.split('-').collect();
        match parts.as_slice() {
            [year, month, day, ..] if !year.is_empty() && !month.is_empty() && !day.is_empty() => {
                calendar_date(year, month, day)
            }
            _ => None,
        }
    } else if input.contains('/') {
        let parts: Vec<&str> = input.split('/').collect();
        match parts.as_slice() {
            [day, month, year] => calendar_date(year, month, day),
            _ => None,
        }
    } else {
        None
    };

    match date {
        Some(date) => format!("{:02}/{:02}", date.day(), date.month()),
        None => input.to_string(),
    }
}

/// Checks a manually typed date.
///
/// Only full dates are accepted: `YYYY-MM-DD` or `D/M/YYYY` (with `/` or `-`
/// separators, year 1000-3000). The abbreviated `DD/MM` form is rejected even
/// though [`format_date`] accepts it.
pub fn is_valid_date_string(input: &str) -> bool {
    if input.is_empty() {
        return false;
    }

    if ISO_DATE.is_match(input) {
        let (year, rest) = input.split_at(4);
        return calendar_date(year, &rest[1..3], &rest[4..6]).is_some();
    }

    let Some(caps) = BR_DATE.captures(input) else {
        return false;
    };
    let year: i32 = caps[3].parse().unwrap_or(0);
    if !(1000..=3000).contains(&year) {
        return false;
    }
    calendar_date(&caps[3], &caps[2], &caps[1]).is_some()
}

/// Input accepted by [`format_currency`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoneyInput<'a> {
    Empty,
    Text(&'a str),
    Number(f64),
}

impl<'a> From<&'a str> for MoneyInput<'a> {
    fn from(value: &'a str) -> Self {
        MoneyInput::Text(value)
    }
}

impl<'a> From<&'a String> for MoneyInput<'a> {
    fn from(value: &'a String) -> Self {
        MoneyInput::Text(value.as_str())
    }
}

impl From<f64> for MoneyInput<'_> {
    fn from(value: f64) -> Self {
        MoneyInput::Number(value)
    }
}

impl<'a> From<Option<&'a str>> for MoneyInput<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(MoneyInput::Empty, MoneyInput::Text)
    }
}

/// Renders an amount as Brazilian reais, e.g. `R$ 1.234,56`.
///
/// Empty input renders as zero, unreadable input as `N/A`.
pub fn format_currency<'a>(value: impl Into<MoneyInput<'a>>) -> String {
    let number = match value.into() {
        MoneyInput::Empty | MoneyInput::Text("") => return ZERO_CURRENCY.to_string(),
        MoneyInput::Text(text) => parse_amount(text),
        MoneyInput::Number(n) if n.is_finite() => Some(n),
        MoneyInput::Number(_) => None,
    };

    match number {
        Some(n) => format_brl(n),
        None => PLACEHOLDER.to_string(),
    }
}

fn format_brl(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, dec_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let is_zero = int_part.chars().all(|c| c == '0') && dec_part.chars().all(|c| c == '0');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    format!("{}R$ {},{}", sign, grouped, dec_part)
}
