//! # tempora
//!
//! Calendar-aware date arithmetic.
//!
//! tempora provides timezone- and locale-aware points in time, signed
//! calendar intervals that decompose date differences into years, months,
//! days and time, and lazy recurring periods driven by a step rule, an
//! optional bound, an optional recurrence cap and predicate filters.
//!
//! ## Modules
//!
//! - [`moment`] — `Moment`: an instant with an IANA timezone and a locale
//! - [`interval`] — signed calendar durations, nominal or anchored to two moments
//! - [`period`] — recurring sequences of moments with filters
//! - [`query`] — named boolean queries usable as period filters
//! - [`unit`] — calendar units and unit-name parsing
//! - [`locale`] — month, weekday and relative-time tables
//! - [`config`] — process-wide default timezone and locale, period options
//! - [`error`] — Error types

pub mod config;
pub mod error;
pub mod interval;
pub mod locale;
pub mod moment;
pub mod period;
pub mod query;
pub mod unit;

pub use chrono::Weekday;
pub use config::{
    default_locale, default_timezone, set_default_locale, set_default_timezone, PeriodOptions,
    DEFAULT_MAX_ITERATIONS,
};
pub use error::{Result, TemporaError};
pub use interval::{Breakdown, FormatStyle, Interval};
pub use locale::Locale;
pub use moment::Moment;
pub use period::{Period, PeriodIter, Step};
pub use query::MomentQuery;
pub use unit::CalendarUnit;
