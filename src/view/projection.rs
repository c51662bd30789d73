//! View projection: the filtered, sorted, paged subset a table renders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::field::Record;
use super::predicate::{matches_at, Criteria};
use super::sort::{compare, SortState};

/// Filter then stably sort `records`. Without a sort key the source order is kept.
///
/// Never mutates `records`.
pub fn project<'a, R: Record>(
    records: &'a [R],
    criteria: &Criteria,
    sort: Option<&SortState>,
) -> Vec<&'a R> {
    project_at(records, criteria, sort, Utc::now())
}

/// Same as [`project`] with an explicit "now" for open-ended date ranges.
pub fn project_at<'a, R: Record>(
    records: &'a [R],
    criteria: &Criteria,
    sort: Option<&SortState>,
    now: DateTime<Utc>,
) -> Vec<&'a R> {
    project_indices(records, criteria, sort, now)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}

fn project_indices<R: Record>(
    records: &[R],
    criteria: &Criteria,
    sort: Option<&SortState>,
    now: DateTime<Utc>,
) -> Vec<usize> {
    let mut out: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| matches_at(*r, criteria, now))
        .map(|(i, _)| i)
        .collect();
    if let Some(sort) = sort {
        // sort_by is stable: ties keep their filtered order
        out.sort_by(|&a, &b| compare(&records[a], &records[b], &sort.key, sort.direction));
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ProjectionKey {
    revision: u64,
    len: usize,
    criteria: Criteria,
    sort: Option<SortState>,
}

/// Memoized projection. Recomputes only when the collection revision, the
/// criteria or the sort change.
///
/// Open-ended date ranges are evaluated against "now" at recompute time.
#[derive(Debug, Default)]
pub struct ViewProjection {
    key: Option<ProjectionKey>,
    indices: Vec<usize>,
    recomputes: usize,
}

impl ViewProjection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Projection of `records`. `revision` must change whenever `records` does.
    pub fn get<'a, R: Record>(
        &mut self,
        records: &'a [R],
        revision: u64,
        criteria: &Criteria,
        sort: Option<&SortState>,
    ) -> Vec<&'a R> {
        let fresh = match &self.key {
            Some(k) => {
                k.revision == revision
                    && k.len == records.len()
                    && k.criteria == *criteria
                    && k.sort.as_ref() == sort
            }
            None => false,
        };
        if !fresh {
            self.indices = project_indices(records, criteria, sort, Utc::now());
            self.key = Some(ProjectionKey {
                revision,
                len: records.len(),
                criteria: criteria.clone(),
                sort: sort.cloned(),
            });
            self.recomputes += 1;
        }
        self.indices.iter().map(|&i| &records[i]).collect()
    }

    /// Drop the cached result; the next `get` recomputes.
    pub fn invalidate(&mut self) {
        self.key = None;
    }

    /// How many times the projection has been computed.
    pub fn recompute_count(&self) -> usize {
        self.recomputes
    }
}

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub index: usize,
    pub size: usize,
}

impl Page {
    pub fn first(size: usize) -> Self {
        Self { index: 0, size }
    }
}

/// One page of a projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSlice<T> {
    pub rows: Vec<T>,
    /// Effective page index after clamping.
    pub page_index: usize,
    pub page_count: usize,
    pub total: usize,
}

/// Slice `items` to `page`. An index past the end clamps to the last page, so
/// narrowing a filter never strands the user on an empty page.
pub fn paginate<T: Clone>(items: &[T], page: Page) -> PageSlice<T> {
    let size = page.size.max(1);
    let total = items.len();
    let page_count = total.div_ceil(size).max(1);
    let page_index = page.index.min(page_count - 1);
    let start = page_index * size;
    let end = (start + size).min(total);
    PageSlice {
        rows: items[start.min(total)..end].to_vec(),
        page_index,
        page_count,
        total,
    }
}
