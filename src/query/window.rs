//! Agenda time windows.
//!
//! Turns a named window (`today`, `this_week`, ...) into date bounds on the
//! agenda event date column, relative to a caller-supplied "now" so the
//! computation stays deterministic under test.

use super::filter::{Comparison, FilterExpression};
use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime};
use schemars::JsonSchema;
use serde::Deserialize;

/// Format Dolibarr expects for datetime literals in `sqlfilters`.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Agenda event date column.
pub const EVENT_DATE_COLUMN: &str = "t.datep";

/// Named time window for agenda listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TimeWindow {
    /// Events starting now or later
    Future,
    /// Events that started before now
    Past,
    /// Events on the current day
    Today,
    /// Events from Monday through Sunday of the current week
    ThisWeek,
    /// Events in the current calendar month
    ThisMonth,
}

/// Bounds computed for a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowBounds {
    /// `column >= start`
    From(NaiveDateTime),
    /// `column < end`
    Before(NaiveDateTime),
    /// `start <= column <= end`
    Between(NaiveDateTime, NaiveDateTime),
}

impl TimeWindow {
    pub fn bounds(self, now: NaiveDateTime) -> WindowBounds {
        let today = now.date();
        match self {
            TimeWindow::Future => WindowBounds::From(now),
            TimeWindow::Past => WindowBounds::Before(now),
            TimeWindow::Today => WindowBounds::Between(start_of_day(today), end_of_day(today)),
            TimeWindow::ThisWeek => {
                let monday =
                    today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
                let sunday = monday + Duration::days(6);
                WindowBounds::Between(start_of_day(monday), end_of_day(sunday))
            }
            TimeWindow::ThisMonth => {
                let first = today.with_day(1).unwrap_or(today);
                let next_first = first
                    .checked_add_months(Months::new(1))
                    .unwrap_or(NaiveDate::MAX);
                WindowBounds::Between(
                    start_of_day(first),
                    start_of_day(next_first) - Duration::seconds(1),
                )
            }
        }
    }

    /// Filter on the agenda event date column for this window.
    pub fn filter(self, now: NaiveDateTime) -> FilterExpression {
        self.bounds(now).filter(EVENT_DATE_COLUMN)
    }
}

impl WindowBounds {
    pub fn filter(&self, column: &str) -> FilterExpression {
        match self {
            WindowBounds::From(start) => {
                FilterExpression::compare(column, Comparison::Ge, &format_datetime(start))
            }
            WindowBounds::Before(end) => {
                FilterExpression::compare(column, Comparison::Lt, &format_datetime(end))
            }
            WindowBounds::Between(start, end) => {
                FilterExpression::compare(column, Comparison::Ge, &format_datetime(start)).and(
                    FilterExpression::compare(column, Comparison::Le, &format_datetime(end)),
                )
            }
        }
    }
}

/// `now <= t.datep <= now + days_ahead`, both ends inclusive.
///
/// Returns `None` when the horizon falls outside the representable date range.
pub fn upcoming_filter(now: NaiveDateTime, days_ahead: u32) -> Option<FilterExpression> {
    let end = Duration::try_days(i64::from(days_ahead))
        .and_then(|horizon| now.checked_add_signed(horizon))?;
    Some(WindowBounds::Between(now, end).filter(EVENT_DATE_COLUMN))
}

pub fn format_datetime(value: &NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::default())
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + Duration::seconds(86_399)
}
