//! Approved-leave calendar.
//!
//! Leave records carry either a single date or a `start to end` range as text.
//! A day is covered when it falls inside the range, both ends inclusive, at
//! calendar-day granularity. Records whose dates cannot be read are left out of
//! every count instead of failing the whole calendar.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::debug;

use crate::records::{LeaveRecord, LeaveStatus, WIRE_DATE_FORMAT};

/// Separator between the two ends of a leave range.
pub const RANGE_SEPARATOR: &str = " to ";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeaveDateError {
    #[error("leave date is empty")]
    Empty,
    #[error("'{value}' is not a recognised leave date")]
    InvalidDate { value: String },
    #[error("leave range ends ({end}) before it starts ({start})")]
    ReversedRange { start: NaiveDate, end: NaiveDate },
}

/// Inclusive span of calendar days covered by one leave record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LeaveSpan {
    start: NaiveDate,
    end: NaiveDate,
}

impl LeaveSpan {
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, LeaveDateError> {
        if end < start {
            return Err(LeaveDateError::ReversedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Read a stored leave date (`15-06-2025` or `15-06-2025 to 18-06-2025`).
    pub fn parse(raw: &str) -> Result<Self, LeaveDateError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LeaveDateError::Empty);
        }

        match trimmed.split_once(RANGE_SEPARATOR) {
            Some((start, end)) => Self::new(parse_day(start)?, parse_day(end)?),
            None => parse_day(trimmed).map(Self::single),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn day_count(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Text form the backend stores.
    pub fn to_wire(&self) -> String {
        let start = self.start.format(WIRE_DATE_FORMAT);
        if self.start == self.end {
            start.to_string()
        } else {
            format!(
                "{start}{RANGE_SEPARATOR}{}",
                self.end.format(WIRE_DATE_FORMAT)
            )
        }
    }
}

/// Parse one end of a range, dropping any time-of-day component.
fn parse_day(raw: &str) -> Result<NaiveDate, LeaveDateError> {
    let value = raw.trim();

    for format in [WIRE_DATE_FORMAT, "%Y-%m-%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Ok(date);
        }
    }

    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.date_naive());
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%d-%m-%Y %H:%M:%S", "%d-%m-%Y %H:%M"] {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(timestamp.date());
        }
    }

    Err(LeaveDateError::InvalidDate {
        value: value.to_string(),
    })
}

/// One calendar tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub approved_leaves: usize,
    pub has_absentees: bool,
}

/// Approved leaves indexed by their parsed spans.
#[derive(Debug, Clone)]
pub struct LeaveCalendar<'a> {
    entries: Vec<(&'a LeaveRecord, LeaveSpan)>,
    skipped: usize,
}

impl<'a> LeaveCalendar<'a> {
    pub fn from_records(leaves: &'a [LeaveRecord]) -> Self {
        let mut entries = Vec::new();
        let mut skipped = 0;

        for leave in leaves
            .iter()
            .filter(|leave| leave.status == LeaveStatus::Approved)
        {
            match LeaveSpan::parse(&leave.date) {
                Ok(span) => entries.push((leave, span)),
                Err(err) => {
                    skipped += 1;
                    debug!(leave_id = %leave.id, date = %leave.date, error = %err, "skipping unreadable leave date");
                }
            }
        }

        Self { entries, skipped }
    }

    /// Approved leaves covering `date`, in record order.
    pub fn approved_on(&self, date: NaiveDate) -> Vec<&'a LeaveRecord> {
        self.entries
            .iter()
            .filter(|(_, span)| span.contains(date))
            .map(|(leave, _)| *leave)
            .collect()
    }

    pub fn count_on(&self, date: NaiveDate) -> usize {
        self.entries
            .iter()
            .filter(|(_, span)| span.contains(date))
            .count()
    }

    /// Approved records left out because their dates could not be read.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Tiles for every day of the month containing `any_day`.
    pub fn month_overview(&self, any_day: NaiveDate) -> Vec<CalendarDay> {
        let first = any_day - Duration::days(i64::from(any_day.day0()));
        first
            .iter_days()
            .take_while(|day| day.month() == first.month())
            .map(|date| {
                let approved_leaves = self.count_on(date);
                CalendarDay {
                    date,
                    approved_leaves,
                    has_absentees: approved_leaves > 0,
                }
            })
            .collect()
    }
}

/// Approved leaves covering `date`.
pub fn approved_leaves_on(leaves: &[LeaveRecord], date: NaiveDate) -> Vec<&LeaveRecord> {
    LeaveCalendar::from_records(leaves).approved_on(date)
}

pub fn approved_leave_count(leaves: &[LeaveRecord], date: NaiveDate) -> usize {
    LeaveCalendar::from_records(leaves).count_on(date)
}
