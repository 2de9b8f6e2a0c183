//! Direction-aware comparison shared by every sortable view.
//!
//! Sorting goes through `slice::sort_by`, which is stable: elements that
//! compare equal keep their input order in both directions.

use crate::error::BmtError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("asc"),
            SortDirection::Descending => f.write_str("desc"),
        }
    }
}

impl std::str::FromStr for SortDirection {
    type Err = BmtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            _ => Err(BmtError::InvalidSortDirection(s.to_string())),
        }
    }
}

pub fn compare<T: Ord + ?Sized>(a: &T, b: &T, direction: SortDirection) -> Ordering {
    direction.apply(a.cmp(b))
}

/// Names sort without regard to case; `"A"` and `"a"` compare equal.
pub fn compare_ignore_case(a: &str, b: &str, direction: SortDirection) -> Ordering {
    let a = a.chars().flat_map(char::to_lowercase);
    let b = b.chars().flat_map(char::to_lowercase);
    direction.apply(a.cmp(b))
}

/// Floats use IEEE total ordering so NaN cannot break the sort.
pub fn compare_f64(a: f64, b: f64, direction: SortDirection) -> Ordering {
    direction.apply(a.total_cmp(&b))
}

pub fn sort_by<T, F>(items: &mut [T], direction: SortDirection, mut cmp: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    items.sort_by(|a, b| direction.apply(cmp(a, b)));
}

pub fn sort_by_key<T, K, F>(items: &mut [T], direction: SortDirection, mut key: F)
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    items.sort_by(|a, b| direction.apply(key(a).cmp(&key(b))));
}
