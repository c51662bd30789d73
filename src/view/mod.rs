//! Collection view engine shared by every table and grid screen.
//!
//! raw rows → [`predicate`] → [`projection`] (filtered) → [`sort`] → rendered rows.
//! [`selection`] and the role gate apply orthogonally at render time.

pub mod field;
pub mod predicate;
pub mod projection;
pub mod selection;
pub mod sort;

pub use field::{is_date_key, parse_date, resolve, FieldValue, Record};
pub use predicate::{matches, matches_at, Criteria, DateRange, FilterValue};
pub use projection::{paginate, project, project_at, Page, PageSlice, ViewProjection};
pub use selection::{HeaderState, HiddenSelectionPolicy, SelectionSet};
pub use sort::{compare, compare_values, SortDirection, SortState};
