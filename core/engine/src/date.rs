//! FILENAME: core/engine/src/date.rs
//! PURPOSE: Date recognition and re-formatting for the date stage.
//! CONTEXT: Three pieces live here:
//! - `DateFormat`: turns a display pattern such as "YYYY-MM-DD" or
//!   "MMM D, YYYY" into a chrono format string once, then renders values.
//! - `parse_date`: tries the known strict patterns in order (first match
//!   wins) and falls back to a lenient list of common layouts.
//! - `serial_to_datetime`: converts a spreadsheet day serial (1899-12-30 epoch).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write;

/// Days between the spreadsheet epoch (1899-12-30) and the Unix epoch.
pub const SERIAL_UNIX_EPOCH_OFFSET: f64 = 25569.0;

const MS_PER_DAY: f64 = 86_400_000.0;

pub const DEFAULT_DATE_FORMAT: &str = "YYYY-MM-DD";

// ============================================================================
// OUTPUT FORMAT
// ============================================================================

/// A target date pattern, translated to chrono's strftime syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    strftime: String,
}

impl DateFormat {
    pub fn new(pattern: &str) -> Self {
        DateFormat {
            pattern: pattern.to_string(),
            strftime: translate_pattern(pattern),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn strftime(&self) -> &str {
        &self.strftime
    }

    /// Renders a date-time in this format. None if chrono rejects the value.
    pub fn format(&self, value: &NaiveDateTime) -> Option<String> {
        let mut out = String::new();
        write!(out, "{}", value.format(&self.strftime)).ok()?;
        Some(out)
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT)
    }
}

/// Translate display tokens (YYYY, MM, DD, HH, mm, ...) into strftime items.
/// Text inside [brackets] is copied literally; '%' is escaped.
fn translate_pattern(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '[' {
            if let Some(end) = find_bracket_end(&chars, i) {
                for &lit in &chars[i + 1..end] {
                    push_literal(&mut out, lit);
                }
                i = end + 1;
                continue;
            }
        }

        let run = count_consecutive(&chars, i, c);
        let item = match (c, run) {
            ('Y', 2) => Some("%y"),
            ('Y', n) if n >= 3 => Some("%Y"),
            ('M', 1) => Some("%-m"),
            ('M', 2) => Some("%m"),
            ('M', 3) => Some("%b"),
            ('M', _) => Some("%B"),
            ('D', 1) => Some("%-d"),
            ('D', _) => Some("%d"),
            ('d', 1) => Some("%w"),
            ('d', 2 | 3) => Some("%a"),
            ('d', _) => Some("%A"),
            ('H', 1) => Some("%-H"),
            ('H', _) => Some("%H"),
            ('h', 1) => Some("%-I"),
            ('h', _) => Some("%I"),
            ('m', 1) => Some("%-M"),
            ('m', _) => Some("%M"),
            ('s', 1) => Some("%-S"),
            ('s', _) => Some("%S"),
            ('A', _) => Some("%p"),
            ('a', _) => Some("%P"),
            _ => None,
        };

        match item {
            Some(directive) => {
                out.push_str(directive);
                i += run;
            }
            None => {
                push_literal(&mut out, c);
                i += 1;
            }
        }
    }

    out
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

fn find_bracket_end(chars: &[char], start: usize) -> Option<usize> {
    chars[start + 1..]
        .iter()
        .position(|&c| c == ']')
        .map(|offset| start + 1 + offset)
}

fn count_consecutive(chars: &[char], start: usize, target: char) -> usize {
    chars[start..].iter().take_while(|&&c| c == target).count()
}

// ============================================================================
// PARSING
// ============================================================================

/// A strict input pattern: the shape regex pins digit counts and separators,
/// the chrono format reads the fields.
struct KnownPattern {
    shape: Regex,
    format: &'static str,
}

/// Ordered: month-first before day-first, so "03/05/2024" is March 5th.
static KNOWN_PATTERNS: Lazy<Vec<KnownPattern>> = Lazy::new(|| {
    [
        (r"^\d{2}/\d{2}/\d{4}$", "%m/%d/%Y"),           // MM/DD/YYYY
        (r"^\d{2}/\d{2}/\d{4}$", "%d/%m/%Y"),           // DD/MM/YYYY
        (r"^\d{4}/\d{2}/\d{2}$", "%Y/%m/%d"),           // YYYY/MM/DD
        (r"^\d{2}-\d{2}-\d{4}$", "%m-%d-%Y"),           // MM-DD-YYYY
        (r"^\d{2}-\d{2}-\d{4}$", "%d-%m-%Y"),           // DD-MM-YYYY
        (r"^\d{4}-\d{2}-\d{2}$", "%Y-%m-%d"),           // YYYY-MM-DD
        (r"^\d{1,2}/\d{1,2}/\d{4}$", "%m/%d/%Y"),       // M/D/YYYY
        (r"^\d{1,2}/\d{1,2}/\d{4}$", "%d/%m/%Y"),       // D/M/YYYY
        (r"^[A-Za-z]{3} \d{2}, \d{4}$", "%b %d, %Y"),   // MMM DD, YYYY
        (r"^\d{2} [A-Za-z]{3} \d{4}$", "%d %b %Y"),     // DD MMM YYYY
        (r"^[A-Za-z]{3,} \d{2}, \d{4}$", "%B %d, %Y"),  // MMMM DD, YYYY
    ]
    .into_iter()
    .map(|(shape, format)| KnownPattern {
        shape: Regex::new(shape).expect("known date shape is a valid regex"),
        format,
    })
    .collect()
});

const FALLBACK_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
];

const FALLBACK_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%y",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b, %Y",
    "%A, %B %d, %Y",
    "%a, %b %d, %Y",
];

/// Recognize a date in free text. Leading/trailing whitespace is ignored.
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    parse_known(text).or_else(|| parse_fallback(text))
}

fn parse_known(text: &str) -> Option<NaiveDateTime> {
    KNOWN_PATTERNS
        .iter()
        .filter(|pattern| pattern.shape.is_match(text))
        .find_map(|pattern| NaiveDate::parse_from_str(text, pattern.format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn parse_fallback(text: &str) -> Option<NaiveDateTime> {
    // Offset-bearing timestamps are normalized to UTC.
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.naive_utc());
    }

    if let Some(dt) = FALLBACK_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
    {
        return Some(dt);
    }

    FALLBACK_DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

// ============================================================================
// SERIALS
// ============================================================================

/// Convert a spreadsheet day serial (fractional part = time of day).
pub fn serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    let millis = ((serial - SERIAL_UNIX_EPOCH_OFFSET) * MS_PER_DAY).round();
    if !millis.is_finite() || millis.abs() > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64).map(|dt| dt.naive_utc())
}
