use chrono::{Datelike, Local, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LEADING_QUALIFIER: Regex =
        Regex::new(r"(?i)\b(?:before|by|on or before)\b\s*(.+)$").unwrap();
    static ref MONTH_ABBREVIATION_PERIOD: Regex = Regex::new(r"\b([A-Za-z]{3})\.").unwrap();
    static ref ORDINAL_SUFFIX: Regex = Regex::new(r"(?i)(\d{1,2})(?:st|nd|rd|th)\b").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
    static ref FOUR_DIGIT_YEAR: Regex = Regex::new(r"\b\d{4}\b").unwrap();
}

// Tried in order; the first format that parses the whole phrase wins, so
// month-first slash dates take precedence over day-first ones.
const DATE_FORMATS: [&str; 19] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%d-%m-%Y",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%d/%m/%y",
    "%y-%m-%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%B %d %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%d %b, %Y",
    "%d %B, %Y",
    "%b-%d-%Y",
    "%B-%d-%Y",
];

/// `"<FullMonthName> <Day>, <Year>"` with an unpadded day.
pub fn format_date(date: NaiveDate) -> String {
    format!("{} {}, {}", date.format("%B"), date.day(), date.year())
}

/// Today's date in the canonical form, used as the default signing date.
pub fn today() -> String {
    format_date(Local::now().date_naive())
}

/// Strip qualifiers ("before", "by", "on or before"), ordinal suffixes and
/// abbreviation periods, and append `current_year` when no 4-digit year
/// is present.
pub fn clean_date_phrase(value: &str, current_year: i32) -> String {
    let mut value = value.trim().to_string();
    if value.is_empty() {
        return value;
    }
    if let Some(caps) = LEADING_QUALIFIER.captures(&value) {
        value = caps[1].trim().to_string();
    }
    let value = MONTH_ABBREVIATION_PERIOD.replace_all(&value, "$1");
    let value = ORDINAL_SUFFIX.replace_all(&value, "$1");
    let value = WHITESPACE_RUN.replace_all(&value, " ");
    let value = value.trim();
    if FOUR_DIGIT_YEAR.is_match(value) {
        value.to_string()
    } else {
        format!("{} {}", value, current_year)
    }
}

fn parse_cleaned(cleaned: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(cleaned, format).ok())
}

/// Parse a free-form date phrase, assuming the current year when none is given.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.trim().is_empty() {
        return None;
    }
    parse_cleaned(&clean_date_phrase(value, Local::now().year()))
}

/// Canonical date string for `value`, or the cleaned phrase when no format
/// fits. Never fails.
pub fn parse_date_string(value: &str) -> String {
    parse_date_string_in_year(value, Local::now().year())
}

pub fn parse_date_string_in_year(value: &str, current_year: i32) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }
    let cleaned = clean_date_phrase(value, current_year);
    match parse_cleaned(&cleaned) {
        Some(date) => format_date(date),
        None => {
            log::debug!("Unparsed date phrase kept as-is: {:?}", cleaned);
            cleaned
        }
    }
}
