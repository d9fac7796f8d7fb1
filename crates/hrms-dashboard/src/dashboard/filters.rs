//! Filter predicates shared by every dashboard table.
//!
//! Each table exposes up to three independent dimensions: an exact status
//! match, a position substring match, and a free-text search over a handful
//! of fields. All comparisons ignore case. A dimension left at its wildcard
//! passes every record, and because the dimensions are plain predicates the
//! order they run in never changes the result. Output keeps input order.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::records::{AttendanceRecord, Candidate, Employee, LeaveRecord};

/// Dropdown value that disables the status and position filters.
pub const WILDCARD: &str = "all";

/// Active filter values for the current table. `None` means wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    status: Option<String>,
    position: Option<String>,
    query: Option<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.set_status(status);
        self
    }

    pub fn with_position(mut self, position: &str) -> Self {
        self.set_position(position);
        self
    }

    pub fn with_query(mut self, query: &str) -> Self {
        self.set_query(query);
        self
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = dropdown_value(status);
    }

    pub fn set_position(&mut self, position: &str) {
        self.position = dropdown_value(position);
    }

    pub fn set_query(&mut self, query: &str) {
        let trimmed = query.trim();
        self.query = (!trimmed.is_empty()).then(|| trimmed.to_lowercase());
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn position(&self) -> Option<&str> {
        self.position.as_deref()
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn is_wildcard(&self) -> bool {
        self.status.is_none() && self.position.is_none() && self.query.is_none()
    }

    /// Whether `record` passes every active dimension.
    pub fn matches<T: Filterable>(&self, record: &T) -> bool {
        status_matches(record, self.status())
            && position_matches(record, self.position())
            && query_matches(record, self.query())
    }

    /// Subset of `records` passing every active dimension, in input order.
    pub fn apply<'a, T: Filterable>(&self, records: &'a [T]) -> Vec<&'a T> {
        let by_status = filter_by_status(records, self.status());
        let by_position = filter_by_position(by_status, self.position());
        filter_by_query(by_position, self.query())
    }
}

fn dropdown_value(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(WILDCARD) {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Exposes the fields a table filters on.
pub trait Filterable {
    /// Tables without a status dropdown ignore the status filter entirely.
    const HAS_STATUS: bool = false;
    /// Tables without a position dropdown ignore the position filter entirely.
    const HAS_POSITION: bool = false;

    /// Current status label. `None` never matches an active status filter.
    fn status_label(&self) -> Option<&str> {
        None
    }

    fn position_text(&self) -> Cow<'_, str> {
        Cow::Borrowed("")
    }

    /// Fields consulted by the free-text search.
    fn search_fields(&self) -> Vec<Cow<'_, str>>;
}

pub fn filter_by_status<'a, T, I>(records: I, status: Option<&str>) -> Vec<&'a T>
where
    T: Filterable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    records
        .into_iter()
        .filter(|record| status_matches(*record, status))
        .collect()
}

pub fn filter_by_position<'a, T, I>(records: I, position: Option<&str>) -> Vec<&'a T>
where
    T: Filterable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    records
        .into_iter()
        .filter(|record| position_matches(*record, position))
        .collect()
}

pub fn filter_by_query<'a, T, I>(records: I, query: Option<&str>) -> Vec<&'a T>
where
    T: Filterable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    records
        .into_iter()
        .filter(|record| query_matches(*record, query))
        .collect()
}

fn status_matches<T: Filterable>(record: &T, status: Option<&str>) -> bool {
    let Some(needle) = status else {
        return true;
    };
    if !T::HAS_STATUS {
        return true;
    }
    record
        .status_label()
        .is_some_and(|label| label.to_lowercase() == needle.to_lowercase())
}

fn position_matches<T: Filterable>(record: &T, position: Option<&str>) -> bool {
    let Some(needle) = position else {
        return true;
    };
    if !T::HAS_POSITION {
        return true;
    }
    contains_ignore_case(&record.position_text(), needle)
}

fn query_matches<T: Filterable>(record: &T, query: Option<&str>) -> bool {
    let Some(needle) = query else {
        return true;
    };
    record
        .search_fields()
        .iter()
        .any(|field| contains_ignore_case(field, needle))
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

impl Filterable for Candidate {
    const HAS_STATUS: bool = true;
    const HAS_POSITION: bool = true;

    fn status_label(&self) -> Option<&str> {
        Some(self.status.label())
    }

    fn position_text(&self) -> Cow<'_, str> {
        Cow::Owned(self.display_position())
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.full_name.as_str()),
            Cow::Borrowed(self.email.as_str()),
            Cow::Owned(self.display_position()),
            Cow::Borrowed(self.department.as_str()),
        ]
    }
}

impl Filterable for Employee {
    const HAS_POSITION: bool = true;

    fn position_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.position.as_str())
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.full_name.as_str()),
            Cow::Borrowed(self.email.as_str()),
            Cow::Borrowed(self.position.as_str()),
            Cow::Borrowed(self.department.as_str()),
        ]
    }
}

impl Filterable for AttendanceRecord {
    const HAS_STATUS: bool = true;

    fn status_label(&self) -> Option<&str> {
        self.status.map(|status| status.label())
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.employee_name.as_str()),
            Cow::Borrowed(self.position.as_str()),
            Cow::Borrowed(self.department.as_str()),
            Cow::Borrowed(self.task.as_str()),
        ]
    }
}

impl Filterable for LeaveRecord {
    const HAS_STATUS: bool = true;

    fn status_label(&self) -> Option<&str> {
        Some(self.status.label())
    }

    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.employee_name.as_str()),
            Cow::Borrowed(self.reason.as_str()),
        ]
    }
}
