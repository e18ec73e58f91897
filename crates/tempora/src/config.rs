//! Process-wide defaults and per-period options.
//!
//! [`Moment`] constructors that are not given an explicit timezone or locale
//! read them from here, and interval formatting uses the default locale. The
//! registry starts as UTC / English and is safe to update from any thread.

use std::sync::RwLock;

use chrono_tz::Tz;

use crate::error::{Result, TemporaError};
use crate::locale::Locale;
use crate::moment::Moment;
use crate::period::Step;

/// Safety ceiling on positions examined by one period iteration pass.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

static DEFAULT_TIMEZONE: RwLock<Tz> = RwLock::new(chrono_tz::UTC);
static DEFAULT_LOCALE: RwLock<Locale> = RwLock::new(Locale::En);

/// The timezone used by constructors that are not given one.
pub fn default_timezone() -> Tz {
    *DEFAULT_TIMEZONE.read().unwrap_or_else(|e| e.into_inner())
}

/// Set the default timezone from an IANA name.
///
/// # Errors
///
/// Returns [`TemporaError::InvalidTimezone`] if the name is not a valid IANA
/// timezone; the previous default is kept.
pub fn set_default_timezone(name: &str) -> Result<()> {
    let tz = parse_timezone(name)?;
    *DEFAULT_TIMEZONE.write().unwrap_or_else(|e| e.into_inner()) = tz;
    Ok(())
}

/// The locale used by constructors and formatters that are not given one.
pub fn default_locale() -> Locale {
    *DEFAULT_LOCALE.read().unwrap_or_else(|e| e.into_inner())
}

pub fn set_default_locale(locale: Locale) {
    *DEFAULT_LOCALE.write().unwrap_or_else(|e| e.into_inner()) = locale;
}

/// Everything a [`Period`](crate::Period) is built from, except filters.
#[derive(Debug, Clone)]
pub struct PeriodOptions {
    pub start: Moment,
    /// Inclusive upper bound; `None` leaves the period open-ended.
    pub end: Option<Moment>,
    pub step: Step,
    /// Cap on positions examined per pass.
    pub recurrences: Option<u32>,
    /// Safety ceiling on positions examined per pass.
    pub max_iterations: usize,
}

impl Default for PeriodOptions {
    /// Daily from now, with no end and no recurrence cap.
    fn default() -> Self {
        PeriodOptions {
            start: Moment::now(),
            end: None,
            step: Step::default(),
            recurrences: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Parse an IANA timezone string into `Tz`.
pub(crate) fn parse_timezone(s: &str) -> Result<Tz> {
    s.parse::<Tz>()
        .map_err(|_| TemporaError::InvalidTimezone(format!("'{}'", s)))
}
