//! Predicate set: text search, enum equality filters and a date range, ANDed.
//!
//! Every predicate is pure. A disabled predicate (blank search, `All`, no range)
//! never excludes a record.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::field::{resolve, FieldValue, Record};

/// Sentinel that disables an equality filter.
pub const ALL: &str = "All";

/// Value of an equality filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FilterValue {
    #[default]
    All,
    Exact(String),
}

impl FilterValue {
    pub fn is_all(&self) -> bool {
        matches!(self, FilterValue::All)
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        if value == ALL {
            FilterValue::All
        } else {
            FilterValue::Exact(value)
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::from(value.to_string())
    }
}

impl From<FilterValue> for String {
    fn from(value: FilterValue) -> Self {
        match value {
            FilterValue::All => ALL.to_string(),
            FilterValue::Exact(v) => v,
        }
    }
}

/// Inclusive range over one date-valued field.
///
/// A missing `from` means the epoch, a missing `to` means "now".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
}

impl DateRange {
    /// Range covering whole calendar days, as a date picker selects them.
    pub fn days(field: impl Into<String>, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self {
            field: field.into(),
            from: from
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .map(|dt| dt.and_utc()),
            to: to
                .and_then(|d| d.and_hms_milli_opt(23, 59, 59, 999))
                .map(|dt| dt.and_utc()),
        }
    }

    fn contains(&self, ts_ms: i64, now: DateTime<Utc>) -> bool {
        let lo = self.from.map(|d| d.timestamp_millis()).unwrap_or(0);
        let hi = self.to.unwrap_or(now).timestamp_millis();
        lo <= ts_ms && ts_ms <= hi
    }
}

/// Combined filter criteria of one view.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criteria {
    #[serde(default)]
    pub search_text: String,
    /// Fields the search box looks at.
    #[serde(default)]
    pub search_fields: Vec<String>,
    #[serde(default)]
    pub equality_filters: BTreeMap<String, FilterValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
}

impl Criteria {
    /// Criteria whose search box covers `fields`, with nothing active yet.
    pub fn searching<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            search_fields: fields.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        self.equality_filters.insert(field.into(), value.into());
        self
    }

    pub fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// True when at least one predicate can exclude a record.
    pub fn is_active(&self) -> bool {
        (!self.search_text.trim().is_empty() && !self.search_fields.is_empty())
            || self.equality_filters.values().any(|v| !v.is_all())
            || self.date_range.is_some()
    }
}

/// Whether `record` satisfies every active predicate in `criteria`, with "now"
/// taken from the clock.
pub fn matches<R: Record + ?Sized>(record: &R, criteria: &Criteria) -> bool {
    matches_at(record, criteria, Utc::now())
}

/// Same as [`matches`] with an explicit "now" for open-ended date ranges.
pub fn matches_at<R: Record + ?Sized>(record: &R, criteria: &Criteria, now: DateTime<Utc>) -> bool {
    matches_search(record, criteria)
        && matches_equality(record, criteria)
        && matches_date_range(record, criteria, now)
}

fn matches_search<R: Record + ?Sized>(record: &R, criteria: &Criteria) -> bool {
    let needle = criteria.search_text.trim().to_lowercase();
    // No designated fields means no search box, so the text is ignored.
    if needle.is_empty() || criteria.search_fields.is_empty() {
        return true;
    }
    criteria.search_fields.iter().any(|key| {
        record
            .field(key)
            .as_filter_text()
            .to_lowercase()
            .contains(&needle)
    })
}

fn matches_equality<R: Record + ?Sized>(record: &R, criteria: &Criteria) -> bool {
    criteria
        .equality_filters
        .iter()
        .all(|(key, value)| match value {
            FilterValue::All => true,
            FilterValue::Exact(expected) => record.field(key).as_filter_text() == *expected,
        })
}

fn matches_date_range<R: Record + ?Sized>(
    record: &R,
    criteria: &Criteria,
    now: DateTime<Utc>,
) -> bool {
    let Some(range) = criteria.date_range.as_ref() else {
        return true;
    };
    match resolve(record, &range.field) {
        FieldValue::Date(ts) => range.contains(ts, now),
        _ => false,
    }
}
