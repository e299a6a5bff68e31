use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

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
        Self::new("BRL")
    }
}

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    /// Whether a non-breaking space separates the currency symbol from the digits.
    pub symbol_spacing: bool,
    pub date_format: DateFormatStyle,
}

impl LocaleConfig {
    pub fn pt_br() -> Self {
        Self {
            language_tag: "pt-BR".into(),
            decimal_separator: ',',
            grouping_separator: '.',
            symbol_spacing: true,
            date_format: DateFormatStyle::Numeric,
        }
    }

    pub fn en_us() -> Self {
        Self {
            language_tag: "en-US".into(),
            decimal_separator: '.',
            grouping_separator: ',',
            symbol_spacing: false,
            date_format: DateFormatStyle::Iso,
        }
    }

    /// Resolves a BCP 47 tag; unknown tags fall back to pt-BR.
    pub fn from_tag(tag: &str) -> Self {
        if tag.eq_ignore_ascii_case("en-US") {
            Self::en_us()
        } else {
            Self::pt_br()
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::pt_br()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormatOptions {
    pub currency_display: CurrencyDisplay,
    pub negative_style: NegativeStyle,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            currency_display: CurrencyDisplay::Symbol,
            negative_style: NegativeStyle::Sign,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NegativeStyle {
    Sign,
    Parentheses,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CurrencyDisplay {
    Symbol,
    Code,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DateFormatStyle {
    /// `2025-03-08`
    Iso,
    /// `08/03/2025`
    Numeric,
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "BRL" => "R$".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value);
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (body.as_str(), None),
    };
    let grouped = match int_part.strip_prefix('-') {
        Some(digits) => format!("-{}", group_digits(digits, locale.grouping_separator)),
        None => group_digits(int_part, locale.grouping_separator),
    };
    match frac_part {
        Some(frac) => format!("{}{}{}", grouped, locale.decimal_separator, frac),
        None => grouped,
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

pub fn format_currency_value(
    amount: f64,
    code: &CurrencyCode,
    locale: &LocaleConfig,
    options: &FormatOptions,
) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let precision = minor_units_for(code.as_str());
    let body = format_number(locale, amount.abs(), precision);
    let spacing = if locale.symbol_spacing { "\u{a0}" } else { "" };
    let unsigned = match options.currency_display {
        CurrencyDisplay::Symbol => format!("{}{}{}", symbol_for(code.as_str()), spacing, body),
        CurrencyDisplay::Code => format!("{} {}", code.as_str(), body),
    };
    if amount < 0.0 {
        match options.negative_style {
            NegativeStyle::Sign => format!("-{}", unsigned),
            NegativeStyle::Parentheses => format!("({})", unsigned),
        }
    } else {
        unsigned
    }
}

/// Renders an amount as Brazilian reais; missing or non-finite input renders as zero.
pub fn format_currency(amount: Option<f64>) -> String {
    format_currency_value(
        amount.unwrap_or(0.0),
        &CurrencyCode::default(),
        &LocaleConfig::pt_br(),
        &FormatOptions::default(),
    )
}

/// Lenient amount parser for pt-BR input: `.` groups thousands and `,` marks decimals.
///
/// Unparsable, empty, or non-finite input yields `0.0` instead of an error.
pub fn parse_money(text: Option<&str>) -> f64 {
    parse_money_with(&LocaleConfig::pt_br(), text)
}

pub fn parse_money_with(locale: &LocaleConfig, text: Option<&str>) -> f64 {
    let raw = text.unwrap_or("").trim();
    if raw.is_empty() {
        return 0.0;
    }
    let stripped: String = raw
        .chars()
        .filter(|ch| *ch != locale.grouping_separator)
        .collect();
    let normalized = stripped.replacen(locale.decimal_separator, ".", 1);
    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Renders an amount the way the entry form expects it to be typed back in.
pub fn format_amount_input(locale: &LocaleConfig, value: f64) -> String {
    value
        .to_string()
        .replacen('.', &locale.decimal_separator.to_string(), 1)
}

pub fn format_date(locale: &LocaleConfig, date: NaiveDate) -> String {
    match locale.date_format {
        DateFormatStyle::Iso => date.format("%Y-%m-%d").to_string(),
        DateFormatStyle::Numeric => date.format("%d/%m/%Y").to_string(),
    }
}
