//! Classification of raw field text into SQL literals.
//!
//! Every field is mapped to one [`SqlValue`] variant by a fixed chain of
//! deterministic checks. The chain order is significant: `NULL` tokens and
//! calendar dates must be recognised before the string fallback, otherwise
//! they would render as quoted strings.

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Numeric(String),
    Boolean(bool),
    Date(String),
    QuotedString(String),
}

impl SqlValue {
    /// Classifies one raw field string. Precedence: empty/`NULL` token,
    /// strict `YYYY-MM-DD` date, full-parse number, boolean, then string.
    pub fn classify(raw: &str) -> SqlValue {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("NULL") {
            return SqlValue::Null;
        }
        if is_calendar_date(trimmed) {
            return SqlValue::Date(trimmed.to_string());
        }
        if trimmed.parse::<f64>().is_ok() {
            return SqlValue::Numeric(trimmed.to_string());
        }
        if trimmed.eq_ignore_ascii_case("true") {
            return SqlValue::Boolean(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return SqlValue::Boolean(false);
        }
        SqlValue::QuotedString(trimmed.to_string())
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlValue::Null => f.write_str("NULL"),
            SqlValue::Numeric(n) => f.write_str(n),
            SqlValue::Boolean(true) => f.write_str("TRUE"),
            SqlValue::Boolean(false) => f.write_str("FALSE"),
            SqlValue::Date(d) => write!(f, "'{d}'"),
            SqlValue::QuotedString(s) => write!(f, "'{}'", s.replace('\'', "''")),
        }
    }
}

/// Renders one raw field as SQL literal text.
pub fn format_value(raw: &str) -> String {
    SqlValue::classify(raw).to_string()
}

fn date_shape() -> &'static Regex {
    static SHAPE: OnceLock<Regex> = OnceLock::new();
    SHAPE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date shape regex"))
}

/// Strict `YYYY-MM-DD` check: the shape must match exactly and the value
/// must be a real calendar date (month 13 or day 32 are rejected).
fn is_calendar_date(value: &str) -> bool {
    date_shape().is_match(value) && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}
