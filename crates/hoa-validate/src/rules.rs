//! Per-field format rules.
//!
//! Each canonical field has a [`FieldKind`] describing the shape its
//! values must take. Checks are plausibility tests on operator-authored
//! spreadsheet data, not strict parsers: they accept common separators
//! and currency punctuation before judging the value.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

/// Value shape expected for a canonical field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text; always acceptable.
    Text,
    Email,
    Phone,
    Date,
    /// Whole number, commas tolerated.
    Integer,
    /// Numeric amount; `$`, commas, and a leading minus tolerated.
    Decimal,
    /// Construction year, must land in a plausible range.
    Year,
    /// Two-letter state/province code.
    StateCode,
    /// 5-digit or ZIP+4 postal code.
    ZipCode,
}

/// The shape expected for a canonical field name. Unknown fields are
/// free text.
pub fn kind_for(field: &str) -> FieldKind {
    match field {
        "email" => FieldKind::Email,
        "phone" => FieldKind::Phone,
        "move_in_date" | "fiscal_year_start" => FieldKind::Date,
        "year_built" => FieldKind::Year,
        "units_count" | "square_feet" | "bedrooms" => FieldKind::Integer,
        "bathrooms" | "balance" => FieldKind::Decimal,
        "state" => FieldKind::StateCode,
        "zip" => FieldKind::ZipCode,
        _ => FieldKind::Text,
    }
}

/// Check a non-blank value against a field kind. Returns a short
/// problem description on failure.
pub fn check_value(kind: FieldKind, value: &str) -> Result<(), String> {
    let trimmed = value.trim();
    match kind {
        FieldKind::Text => Ok(()),
        FieldKind::Email => {
            if is_email_shaped(trimmed) {
                Ok(())
            } else {
                Err(format!("\"{trimmed}\" is not a valid email address"))
            }
        }
        FieldKind::Phone => {
            if is_plausible_phone(trimmed) {
                Ok(())
            } else {
                Err(format!("\"{trimmed}\" is not a valid phone number"))
            }
        }
        FieldKind::Date => {
            if parse_date(trimmed).is_some() {
                Ok(())
            } else {
                Err(format!("\"{trimmed}\" is not a recognizable date"))
            }
        }
        FieldKind::Integer => {
            if parse_integer(trimmed).is_some() {
                Ok(())
            } else {
                Err(format!("\"{trimmed}\" is not a whole number"))
            }
        }
        FieldKind::Decimal => {
            if parse_amount(trimmed).is_some() {
                Ok(())
            } else {
                Err(format!("\"{trimmed}\" is not a numeric amount"))
            }
        }
        FieldKind::Year => match parse_integer(trimmed) {
            Some(year) if (1800..=2100).contains(&year) => Ok(()),
            Some(year) => Err(format!("year {year} is outside the plausible range")),
            None => Err(format!("\"{trimmed}\" is not a year")),
        },
        FieldKind::StateCode => {
            if trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
                Ok(())
            } else {
                Err(format!("\"{trimmed}\" is not a two-letter state code"))
            }
        }
        FieldKind::ZipCode => {
            if is_zip_code(trimmed) {
                Ok(())
            } else {
                Err(format!("\"{trimmed}\" is not a valid ZIP code"))
            }
        }
    }
}

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex compiles")
});

fn is_email_shaped(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

fn is_plausible_phone(value: &str) -> bool {
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    let acceptable: bool = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '+' | '.'));
    acceptable && (10..=11).contains(&digits)
}

/// Accepts the date shapes spreadsheets commonly export.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    const FORMATS: [&str; 4] = ["%Y-%m-%d", "%m/%d/%Y", "%m-%d-%Y", "%m/%d/%y"];
    FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

fn parse_integer(value: &str) -> Option<i64> {
    value.replace(',', "").trim().parse::<i64>().ok()
}

fn parse_amount(value: &str) -> Option<f64> {
    value
        .trim()
        .trim_start_matches('$')
        .replace(',', "")
        .parse::<f64>()
        .ok()
}

fn is_zip_code(value: &str) -> bool {
    let bytes = value.as_bytes();
    match bytes.len() {
        5 => bytes.iter().all(u8::is_ascii_digit),
        10 => {
            bytes[..5].iter().all(u8::is_ascii_digit)
                && bytes[5] == b'-'
                && bytes[6..].iter().all(u8::is_ascii_digit)
        }
        _ => false,
    }
}
