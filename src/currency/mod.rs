//! Currency formatting and parsing helpers.
//!
//! Integer amounts are grouped with dots and carry a suffix symbol for the
//! default currency (`1.234.567đ`); currencies with prefix symbols keep
//! them in front.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::TrackerError;

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("VND")
    }
}

/// Locale-aware separator preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl LocaleConfig {
    pub fn for_tag(tag: &str) -> Self {
        if tag.starts_with("vi") {
            Self {
                language_tag: tag.into(),
                decimal_separator: ',',
                grouping_separator: '.',
            }
        } else {
            Self {
                language_tag: tag.into(),
                decimal_separator: '.',
                grouping_separator: ',',
            }
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::for_tag("vi-VN")
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "VND" => "đ".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        _ => code.into(),
    }
}

/// Currencies whose symbol trails the amount.
pub fn symbol_is_suffix(code: &str) -> bool {
    matches!(code, "VND")
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "VND" | "JPY" => 0,
        _ => 2,
    }
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let mut body = format!("{:.*}", precision as usize, value);
    if locale.decimal_separator != '.' {
        if let Some(pos) = body.find('.') {
            body.replace_range(pos..=pos, &locale.decimal_separator.to_string());
        }
    }
    if let Some(pos) = body.find(locale.decimal_separator) {
        let mut int_part = body[..pos].to_string();
        insert_grouping(&mut int_part, locale.grouping_separator);
        body = format!("{}{}", int_part, &body[pos..]);
    } else {
        insert_grouping(&mut body, locale.grouping_separator);
    }
    body
}

fn insert_grouping(int_part: &mut String, separator: char) {
    let mut cleaned = int_part.replace(separator, "");
    if cleaned.starts_with('-') {
        let sign = cleaned.remove(0);
        let grouped = group_digits(&cleaned, separator);
        *int_part = format!("{}{}", sign, grouped);
    } else {
        *int_part = group_digits(&cleaned, separator);
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}

pub fn format_currency_value(amount: f64, code: &CurrencyCode, locale: &LocaleConfig) -> String {
    let precision = minor_units_for(code.as_str());
    let body = format_number(locale, amount.abs(), precision);
    let signed = if amount < 0.0 {
        format!("-{}", body)
    } else {
        body
    };
    let symbol = symbol_for(code.as_str());
    if symbol_is_suffix(code.as_str()) {
        format!("{}{}", signed, symbol)
    } else {
        format!("{}{}", symbol, signed)
    }
}

/// Shortens large magnitudes for dashboards: thousands, millions, billions,
/// trillions.
pub fn format_compact(locale: &LocaleConfig, value: f64) -> String {
    let magnitude = value.abs();
    let (scaled, suffix) = if magnitude >= 1e12 {
        (value / 1e12, "T")
    } else if magnitude >= 1e9 {
        (value / 1e9, "B")
    } else if magnitude >= 1e6 {
        (value / 1e6, "M")
    } else if magnitude >= 1e3 {
        (value / 1e3, "K")
    } else {
        return format_number(locale, value, 0);
    };
    format!("{}{}", format_number(locale, scaled, 1), suffix)
}

/// Parses a user-entered amount, tolerating the currency symbol and grouping
/// separators.
pub fn parse_amount(raw: &str, code: &CurrencyCode, locale: &LocaleConfig) -> Result<f64, TrackerError> {
    let symbol = symbol_for(code.as_str());
    let mut cleaned = raw.replace(&symbol, "");
    cleaned = cleaned.replace(locale.grouping_separator, "");
    if locale.decimal_separator != '.' {
        cleaned = cleaned.replace(locale.decimal_separator, ".");
    }
    cleaned
        .trim()
        .parse::<f64>()
        .map_err(|_| TrackerError::InvalidInput(format!("`{}` is not a valid amount", raw)))
}

pub fn is_valid_amount(raw: &str, code: &CurrencyCode, locale: &LocaleConfig) -> bool {
    parse_amount(raw, code, locale).is_ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_integers_with_dots_and_suffix_symbol() {
        let locale = LocaleConfig::default();
        let code = CurrencyCode::default();
        assert_eq!(
            format_currency_value(1_231_323_123.0, &code, &locale),
            "1.231.323.123đ"
        );
        assert_eq!(format_currency_value(-80_000.0, &code, &locale), "-80.000đ");
    }

    #[test]
    fn prefix_currencies_keep_two_decimals() {
        let locale = LocaleConfig::for_tag("en-US");
        let code = CurrencyCode::new("USD");
        assert_eq!(format_currency_value(1234.5, &code, &locale), "$1,234.50");
    }

    #[test]
    fn parses_formatted_amounts_back() {
        let locale = LocaleConfig::default();
        let code = CurrencyCode::default();
        assert_eq!(parse_amount("1.234.567đ", &code, &locale).unwrap(), 1_234_567.0);
        assert_eq!(parse_amount("80000", &code, &locale).unwrap(), 80_000.0);
        assert!(parse_amount("eighty", &code, &locale).is_err());
    }

    #[test]
    fn compact_formatting_scales_units() {
        let locale = LocaleConfig::default();
        assert_eq!(format_compact(&locale, 2_500_000.0), "2,5M");
        assert_eq!(format_compact(&locale, 1_200_000_000.0), "1,2B");
        assert_eq!(format_compact(&locale, 950.0), "950");
    }
}
