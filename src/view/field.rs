//! Field accessor: resolves a named field on a record to a comparable value.
//!
//! Date-valued fields are recognized by key convention (`date`, anything ending
//! in `Date` or `At`, `lastLogin`, `lastUsed`) and parsed to epoch milliseconds.
//! Everything else compares by its native primitive ordering.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Serialize, Serializer};

/// A field value as seen by filters and comparators.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Missing,
    Bool(bool),
    Number(f64),
    /// Epoch milliseconds, UTC.
    Date(i64),
    Text(String),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn opt_text(value: Option<&str>) -> Self {
        value.map(FieldValue::text).unwrap_or(FieldValue::Missing)
    }

    /// The string an equality filter or search compares against.
    pub fn as_filter_text(&self) -> String {
        match self {
            FieldValue::Missing => String::new(),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Number(n) => format_number(*n),
            FieldValue::Date(ms) => DateTime::<Utc>::from_timestamp_millis(*ms)
                .map(|d| d.to_rfc3339())
                .unwrap_or_default(),
            FieldValue::Text(s) => s.clone(),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }

    /// Cross-type ordering rank, used only when two values differ in kind.
    pub(crate) fn rank(&self) -> u8 {
        match self {
            FieldValue::Missing => 0,
            FieldValue::Bool(_) => 1,
            FieldValue::Number(_) => 2,
            FieldValue::Date(_) => 3,
            FieldValue::Text(_) => 4,
        }
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::Missing => serializer.serialize_none(),
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Number(n) => serializer.serialize_f64(*n),
            FieldValue::Date(_) => serializer.serialize_str(&self.as_filter_text()),
            FieldValue::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// A row that can be shown in a collection view.
///
/// Field keys are the camelCase names of the record's JSON shape; nested
/// fields use dots (`usage.storage`).
pub trait Record {
    /// Stable identifier. Selection and bulk operations key on this, never on position.
    fn record_id(&self) -> &str;

    /// Raw value of a named field, `Missing` for unknown keys.
    fn field(&self, key: &str) -> FieldValue;
}

/// Whether a field key names a date by convention.
pub fn is_date_key(key: &str) -> bool {
    let leaf = key.rsplit('.').next().unwrap_or(key);
    leaf == "date"
        || leaf.ends_with("Date")
        || leaf.ends_with("At")
        || leaf == "lastLogin"
        || leaf == "lastUsed"
}

/// Parse the date formats the seeded data and date pickers produce.
///
/// Month and day may be unpadded (`2024-2-1`). Naive values are taken as UTC.
pub fn parse_date(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().timestamp_millis());
        }
    }
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%b %d, %Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc().timestamp_millis());
        }
    }
    None
}

/// Resolve a field for comparison: date-named text fields become `Date`.
///
/// A date-named field that fails to parse stays `Text`.
pub fn resolve<R: Record + ?Sized>(record: &R, key: &str) -> FieldValue {
    let raw = record.field(key);
    if !is_date_key(key) {
        return raw;
    }
    match raw {
        FieldValue::Text(s) => match parse_date(&s) {
            Some(ms) => FieldValue::Date(ms),
            None => FieldValue::Text(s),
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        id: &'static str,
        created_at: &'static str,
        name: &'static str,
    }

    impl Record for Row {
        fn record_id(&self) -> &str {
            self.id
        }

        fn field(&self, key: &str) -> FieldValue {
            match key {
                "createdAt" => FieldValue::text(self.created_at),
                "name" => FieldValue::text(self.name),
                _ => FieldValue::Missing,
            }
        }
    }

    #[test]
    fn test_is_date_key_conventions() {
        assert!(is_date_key("date"));
        assert!(is_date_key("createdAt"));
        assert!(is_date_key("nextBillingDate"));
        assert!(is_date_key("lastLogin"));
        assert!(is_date_key("usage.updatedAt"));
        assert!(!is_date_key("name"));
        assert!(!is_date_key("status"));
        assert!(!is_date_key("update"));
    }

    #[test]
    fn test_parse_date_unpadded_orders_chronologically() {
        let feb = parse_date("2024-2-1").unwrap();
        let oct = parse_date("2024-10-1").unwrap();
        assert!(feb < oct);
        // String order disagrees
        assert!("2024-2-1" > "2024-10-1");
    }

    #[test]
    fn test_parse_date_formats() {
        let day = parse_date("2024-03-15").unwrap();
        assert_eq!(parse_date("2024-03-15T00:00:00Z"), Some(day));
        assert_eq!(parse_date("2024-03-15 00:00"), Some(day));
        assert_eq!(parse_date("Mar 15, 2024"), Some(day));
        assert_eq!(parse_date("2024/3/15"), Some(day));
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_resolve_parses_date_fields_only() {
        let row = Row {
            id: "r1",
            created_at: "2024-01-02",
            name: "2024-01-02",
        };
        assert!(matches!(resolve(&row, "createdAt"), FieldValue::Date(_)));
        assert_eq!(resolve(&row, "name"), FieldValue::text("2024-01-02"));
        assert_eq!(resolve(&row, "missing"), FieldValue::Missing);
    }

    #[test]
    fn test_resolve_unparseable_date_stays_text() {
        let row = Row {
            id: "r1",
            created_at: "yesterday",
            name: "x",
        };
        assert_eq!(resolve(&row, "createdAt"), FieldValue::text("yesterday"));
    }

    #[test]
    fn test_filter_text_numbers() {
        assert_eq!(FieldValue::Number(42.0).as_filter_text(), "42");
        assert_eq!(FieldValue::Number(12.5).as_filter_text(), "12.5");
        assert_eq!(FieldValue::Missing.as_filter_text(), "");
    }
}
