use rust_decimal::Decimal;
use std::str::FromStr;
use ynabify_core::{Lenient, Money};

/// Drops currency symbols, spaces and anything else that is not part of a number.
fn clean(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect()
}

/// A single comma marks a decimal comma; any single period alongside it is
/// then a thousands separator. `1.234,56` becomes `1234.56`.
fn delocalize(cleaned: &str) -> String {
    let commas = cleaned.matches(',').count();
    let periods = cleaned.matches('.').count();
    if commas == 1 && periods <= 1 {
        cleaned.replace('.', "").replacen(',', ".", 1)
    } else {
        cleaned.to_string()
    }
}

/// Parses `-?digits[.digits]` with at least one digit overall.
fn parse_signed_decimal(s: &str) -> Option<Decimal> {
    let (negative, body) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let (int, frac) = body.split_once('.').unwrap_or((body, ""));
    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(int) || !all_digits(frac) || (int.is_empty() && frac.is_empty()) {
        return None;
    }

    let int = if int.is_empty() { "0" } else { int };
    let canonical = if frac.is_empty() {
        int.to_string()
    } else {
        format!("{int}.{frac}")
    };
    let value = Decimal::from_str(&canonical).ok()?;
    Some(if negative { -value } else { value })
}

/// Reads a bank amount cell such as `€ 1.234,56` or `-12,34` as a decimal.
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    parse_signed_decimal(&delocalize(&clean(raw)))
}

/// Parses the source amount and flips its sign for YNAB. A cell that cannot
/// be read as a number is handed back untouched.
pub fn invert_amount(raw: &str) -> Lenient<Money> {
    match parse_amount(raw) {
        Some(value) => Lenient::Parsed(Money::from_decimal(value).inverted()),
        None => Lenient::PassedThrough(raw.to_string()),
    }
}
