//! Shared utilities for operations across notegraph crates.
//!
//! Provides DRY helpers for:
//! - Case-insensitive title comparison
//! - CSV field escaping and table building
//! - Serialization with consistent error handling
//! - Timestamp and fixed-point number formatting for exports

use crate::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};

/// Compare two note titles the way links resolve them (case-insensitive).
pub fn titles_match(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

/// Escape a value for use inside a double-quoted CSV field.
///
/// Quotes are doubled, newlines become spaces and carriage returns are dropped.
pub fn escape_csv_value(value: &str) -> String {
    value
        .replace('"', "\"\"")
        .replace('\n', " ")
        .replace('\r', "")
}

/// Escape and wrap a value in double quotes.
pub fn quote_csv_field(value: &str) -> String {
    format!("\"{}\"", escape_csv_value(value))
}

/// Split one CSV line back into fields, honouring quoted fields and doubled quotes.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

/// ISO-8601 UTC timestamp with millisecond precision (`2024-01-02T03:04:05.000Z`).
pub fn iso_timestamp(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Format `value` with `digits` decimals, rounding an exact half away from zero.
///
/// `format!("{:.2}", 2.125)` rounds the tie to even and gives `2.12`; this
/// gives `2.13`, the same digits as JavaScript's `Number.prototype.toFixed`.
/// Values that are not exact ties round to nearest either way.
pub fn to_fixed(value: f64, digits: usize) -> String {
    let rounded = format!("{:.*}", digits, value);
    if !value.is_finite() {
        return rounded;
    }

    // A finite f64 has at most 1074 fractional decimal digits
    let exact = format!("{:.1074}", value.abs());
    let Some((whole, fraction)) = exact.split_once('.') else {
        return rounded;
    };
    let is_tie = fraction.get(digits..digits + 1) == Some("5")
        && fraction[digits + 1..].bytes().all(|b| b == b'0');
    if !is_tie {
        return rounded;
    }

    let mut kept: Vec<u8> = whole.bytes().chain(fraction[..digits].bytes()).collect();
    let mut carry = true;
    for digit in kept.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            carry = false;
            break;
        }
    }
    if carry {
        kept.insert(0, b'1');
    }

    let split = kept.len() - digits;
    let mut out = String::with_capacity(kept.len() + 2);
    if value.is_sign_negative() {
        out.push('-');
    }
    out.extend(kept[..split].iter().map(|&b| char::from(b)));
    if digits > 0 {
        out.push('.');
        out.extend(kept[split..].iter().map(|&b| char::from(b)));
    }
    out
}

/// Generic JSON serialization with consistent error handling
pub fn to_json_string<T: serde::Serialize + ?Sized>(data: &T, context: &str) -> Result<String> {
    serde_json::to_string_pretty(data).map_err(|e| {
        Error::serialization_error(format!("Failed to serialize {} as JSON: {}", context, e))
    })
}

/// Generic CSV table builder.
///
/// Rows are joined with `\n` and the output has no trailing newline. Cells
/// are written verbatim; quote string cells with [`quote_csv_field`].
pub struct CSVBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CSVBuilder {
    /// Create a new CSV with headers
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|s| s.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row of already formatted cells
    pub fn add_row(mut self, values: Vec<String>) -> Self {
        self.rows.push(values);
        self
    }

    /// Add a row in place
    pub fn push_row(&mut self, values: Vec<String>) {
        self.rows.push(values);
    }

    /// Number of data rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Build the CSV string
    pub fn build(self) -> String {
        let mut lines = Vec::with_capacity(self.rows.len() + 1);
        lines.push(self.headers.join(","));
        lines.extend(self.rows.into_iter().map(|row| row.join(",")));
        lines.join("\n")
    }
}
