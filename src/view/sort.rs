//! Comparator builder: type-aware, direction-aware ordering of records by one key.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::field::{resolve, FieldValue, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// The active sort key and direction of a view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortState {
    pub key: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortState {
    pub fn asc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Desc,
        }
    }

    /// Column-header click: flip on the active key, reset to ascending on a new one.
    pub fn toggle(current: Option<&SortState>, key: &str) -> SortState {
        match current {
            Some(active) if active.key == key => SortState {
                key: active.key.clone(),
                direction: active.direction.flipped(),
            },
            _ => SortState::asc(key),
        }
    }
}

/// Compare two resolved values.
///
/// Same-kind values use their native ordering (dates by instant). Mixed kinds
/// fall back to a fixed rank so the ordering stays total:
/// missing < bool < number < date < text.
pub fn compare_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a, b) {
        (FieldValue::Date(x), FieldValue::Date(y)) => x.cmp(y),
        (FieldValue::Number(x), FieldValue::Number(y)) => x.total_cmp(y),
        (FieldValue::Text(x), FieldValue::Text(y)) => x.cmp(y),
        (FieldValue::Bool(x), FieldValue::Bool(y)) => x.cmp(y),
        _ => a.rank().cmp(&b.rank()),
    }
}

/// Compare two records on `key`. Equal values yield `Equal`; there is no
/// secondary key, so callers rely on a stable sort to keep ties in place.
pub fn compare<R: Record + ?Sized>(a: &R, b: &R, key: &str, direction: SortDirection) -> Ordering {
    let ord = compare_values(&resolve(a, key), &resolve(b, key));
    match direction {
        SortDirection::Asc => ord,
        SortDirection::Desc => ord.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Deal {
        id: String,
        amount: f64,
        close_date: String,
        rep: String,
    }

    impl Record for Deal {
        fn record_id(&self) -> &str {
            &self.id
        }

        fn field(&self, key: &str) -> FieldValue {
            match key {
                "amount" => FieldValue::Number(self.amount),
                "closeDate" => FieldValue::text(self.close_date.clone()),
                "rep" => FieldValue::text(self.rep.clone()),
                _ => FieldValue::Missing,
            }
        }
    }

    fn deal(id: &str, amount: f64, close_date: &str, rep: &str) -> Deal {
        Deal {
            id: id.into(),
            amount,
            close_date: close_date.into(),
            rep: rep.into(),
        }
    }

    fn sorted_ids(rows: &[Deal], key: &str, dir: SortDirection) -> Vec<String> {
        let mut refs: Vec<&Deal> = rows.iter().collect();
        refs.sort_by(|a, b| compare(*a, *b, key, dir));
        refs.iter().map(|d| d.id.clone()).collect()
    }

    #[test]
    fn test_toggle_same_key_flips_new_key_resets() {
        let first = SortState::toggle(None, "amount");
        assert_eq!(first, SortState::asc("amount"));
        let second = SortState::toggle(Some(&first), "amount");
        assert_eq!(second, SortState::desc("amount"));
        let third = SortState::toggle(Some(&second), "amount");
        assert_eq!(third, first);
        let other = SortState::toggle(Some(&second), "rep");
        assert_eq!(other, SortState::asc("rep"));
    }

    #[test]
    fn test_numeric_sort_is_not_lexicographic() {
        let rows = vec![
            deal("a", 900.0, "2024-01-01", "x"),
            deal("b", 10000.0, "2024-01-01", "x"),
            deal("c", 25.5, "2024-01-01", "x"),
        ];
        assert_eq!(sorted_ids(&rows, "amount", SortDirection::Asc), ["c", "a", "b"]);
    }

    #[test]
    fn test_date_sort_by_instant() {
        let rows = vec![
            deal("oct", 1.0, "2024-10-1", "x"),
            deal("feb", 2.0, "2024-2-1", "x"),
            deal("dec", 3.0, "2023-12-31", "x"),
        ];
        assert_eq!(
            sorted_ids(&rows, "closeDate", SortDirection::Asc),
            ["dec", "feb", "oct"]
        );
    }

    #[test]
    fn test_desc_is_exact_reverse_without_ties() {
        let rows = vec![
            deal("a", 3.0, "2024-01-01", "mia"),
            deal("b", 1.0, "2024-01-01", "alex"),
            deal("c", 2.0, "2024-01-01", "zoe"),
        ];
        let asc = sorted_ids(&rows, "rep", SortDirection::Asc);
        let mut desc = sorted_ids(&rows, "rep", SortDirection::Desc);
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn test_ties_keep_prior_order() {
        let rows = vec![
            deal("first", 5.0, "2024-01-01", "x"),
            deal("second", 5.0, "2024-01-01", "x"),
            deal("third", 1.0, "2024-01-01", "x"),
        ];
        assert_eq!(
            sorted_ids(&rows, "amount", SortDirection::Desc),
            ["first", "second", "third"]
        );
    }

    #[test]
    fn test_mixed_kinds_are_totally_ordered() {
        assert_eq!(
            compare_values(&FieldValue::Missing, &FieldValue::text("a")),
            Ordering::Less
        );
        assert_eq!(
            compare_values(&FieldValue::text("a"), &FieldValue::Number(1.0)),
            Ordering::Greater
        );
        assert_eq!(
            compare_values(&FieldValue::Missing, &FieldValue::Missing),
            Ordering::Equal
        );
    }
}
