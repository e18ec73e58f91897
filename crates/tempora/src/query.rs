//! Named moment predicates.
//!
//! Periods can be filtered by the name of a boolean query on [`Moment`]
//! (`"isWeekday"`, `"is_weekend"`, ...). Names resolve to a [`MomentQuery`]
//! once, when the filter is installed, so a bad name fails at construction
//! and never during iteration.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TemporaError};
use crate::moment::Moment;

/// A boolean query that can be evaluated against any [`Moment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MomentQuery {
    IsWeekday,
    IsWeekend,
    IsToday,
    IsTomorrow,
    IsYesterday,
    IsPast,
    IsFuture,
    IsLeapYear,
    IsDst,
    IsMonday,
    IsTuesday,
    IsWednesday,
    IsThursday,
    IsFriday,
    IsSaturday,
    IsSunday,
}

/// Methods on [`Moment`] that exist but do not answer a yes/no question.
const NON_PREDICATE_METHODS: &[&str] = &[
    "add",
    "add_years",
    "add_months",
    "add_days",
    "add_hours",
    "add_minutes",
    "add_seconds",
    "add_milliseconds",
    "sub_days",
    "sub_months",
    "sub_years",
    "plus",
    "add_interval",
    "sub_interval",
    "set_year",
    "set_month",
    "set_day",
    "set_locale",
    "set_timezone",
    "with_locale",
    "in_timezone",
    "utc",
    "clone",
    "diff",
    "diff_in_days",
    "diff_in_months",
    "diff_in_years",
    "diff_for_humans",
    "is_before",
    "is_after",
    "is_same_day",
    "is_same_timezone",
    "year",
    "month",
    "day",
    "hour",
    "minute",
    "second",
    "millisecond",
    "weekday",
    "epoch_millis",
    "timezone",
    "timezone_offset",
    "locale",
    "start_of_day",
    "start_of_week",
    "end_of_week",
    "start_of_month",
    "end_of_month",
    "start_of_year",
    "end_of_year",
    "next",
    "previous",
    "month_name",
    "short_month_name",
    "day_name",
    "short_day_name",
    "format",
    "localized_format",
    "to_date_string",
    "to_time_string",
    "to_rfc3339",
    "to_string",
];

impl MomentQuery {
    pub const ALL: [MomentQuery; 16] = [
        MomentQuery::IsWeekday,
        MomentQuery::IsWeekend,
        MomentQuery::IsToday,
        MomentQuery::IsTomorrow,
        MomentQuery::IsYesterday,
        MomentQuery::IsPast,
        MomentQuery::IsFuture,
        MomentQuery::IsLeapYear,
        MomentQuery::IsDst,
        MomentQuery::IsMonday,
        MomentQuery::IsTuesday,
        MomentQuery::IsWednesday,
        MomentQuery::IsThursday,
        MomentQuery::IsFriday,
        MomentQuery::IsSaturday,
        MomentQuery::IsSunday,
    ];

    /// Resolve a query by name, in `camelCase` or `snake_case`.
    ///
    /// # Errors
    ///
    /// - [`TemporaError::NotAPredicateMethod`] if the name is a `Moment`
    ///   method that does not return a boolean.
    /// - [`TemporaError::UnknownFilterMethod`] otherwise.
    pub fn resolve(name: &str) -> Result<MomentQuery> {
        let snake = to_snake_case(name.trim());
        if let Some(query) = MomentQuery::ALL.into_iter().find(|q| q.name() == snake) {
            return Ok(query);
        }
        if NON_PREDICATE_METHODS.contains(&snake.as_str()) {
            return Err(TemporaError::NotAPredicateMethod(name.to_string()));
        }
        Err(TemporaError::UnknownFilterMethod(name.to_string()))
    }

    /// The snake_case name of the corresponding `Moment` method.
    pub fn name(self) -> &'static str {
        match self {
            MomentQuery::IsWeekday => "is_weekday",
            MomentQuery::IsWeekend => "is_weekend",
            MomentQuery::IsToday => "is_today",
            MomentQuery::IsTomorrow => "is_tomorrow",
            MomentQuery::IsYesterday => "is_yesterday",
            MomentQuery::IsPast => "is_past",
            MomentQuery::IsFuture => "is_future",
            MomentQuery::IsLeapYear => "is_leap_year",
            MomentQuery::IsDst => "is_dst",
            MomentQuery::IsMonday => "is_monday",
            MomentQuery::IsTuesday => "is_tuesday",
            MomentQuery::IsWednesday => "is_wednesday",
            MomentQuery::IsThursday => "is_thursday",
            MomentQuery::IsFriday => "is_friday",
            MomentQuery::IsSaturday => "is_saturday",
            MomentQuery::IsSunday => "is_sunday",
        }
    }

    pub fn evaluate(self, moment: &Moment) -> bool {
        match self {
            MomentQuery::IsWeekday => moment.is_weekday(),
            MomentQuery::IsWeekend => moment.is_weekend(),
            MomentQuery::IsToday => moment.is_today(),
            MomentQuery::IsTomorrow => moment.is_tomorrow(),
            MomentQuery::IsYesterday => moment.is_yesterday(),
            MomentQuery::IsPast => moment.is_past(),
            MomentQuery::IsFuture => moment.is_future(),
            MomentQuery::IsLeapYear => moment.is_leap_year(),
            MomentQuery::IsDst => moment.is_dst(),
            MomentQuery::IsMonday => moment.is_monday(),
            MomentQuery::IsTuesday => moment.is_tuesday(),
            MomentQuery::IsWednesday => moment.is_wednesday(),
            MomentQuery::IsThursday => moment.is_thursday(),
            MomentQuery::IsFriday => moment.is_friday(),
            MomentQuery::IsSaturday => moment.is_saturday(),
            MomentQuery::IsSunday => moment.is_sunday(),
        }
    }
}

impl FromStr for MomentQuery {
    type Err = TemporaError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        MomentQuery::resolve(s)
    }
}

impl fmt::Display for MomentQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `isLeapYear` -> `is_leap_year`, `isDST` -> `is_dst`; snake_case passes through.
fn to_snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(ch.to_ascii_lowercase());
            prev_lower = false;
        } else {
            out.push(ch);
            prev_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        }
    }
    out
}
