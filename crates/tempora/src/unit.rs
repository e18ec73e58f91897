//! Calendar units and unit-name resolution.
//!
//! A [`CalendarUnit`] is the unit half of a period step ("2 days", "1 month")
//! and the unit argument of [`Moment::add`](crate::Moment::add). Unit names
//! are accepted in singular or plural form, case-insensitively.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::TemporaError;

/// One of the seven recognised calendar units.
///
/// `Weeks` is a presentation unit: arithmetic rewrites it to `7 × Days`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarUnit {
    Years,
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl CalendarUnit {
    /// All units, largest first.
    pub const ALL: [CalendarUnit; 7] = [
        CalendarUnit::Years,
        CalendarUnit::Months,
        CalendarUnit::Weeks,
        CalendarUnit::Days,
        CalendarUnit::Hours,
        CalendarUnit::Minutes,
        CalendarUnit::Seconds,
    ];

    /// The plural, lowercase name of this unit.
    pub fn as_str(self) -> &'static str {
        match self {
            CalendarUnit::Years => "years",
            CalendarUnit::Months => "months",
            CalendarUnit::Weeks => "weeks",
            CalendarUnit::Days => "days",
            CalendarUnit::Hours => "hours",
            CalendarUnit::Minutes => "minutes",
            CalendarUnit::Seconds => "seconds",
        }
    }

    /// Rewrite `(magnitude, unit)` so that weeks become days.
    pub(crate) fn canonical(self, magnitude: i64) -> (i64, CalendarUnit) {
        match self {
            CalendarUnit::Weeks => (magnitude.saturating_mul(7), CalendarUnit::Days),
            unit => (magnitude, unit),
        }
    }
}

impl fmt::Display for CalendarUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalendarUnit {
    type Err = TemporaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unit = pluralize(&s.trim().to_lowercase());
        match unit.as_str() {
            "years" => Ok(CalendarUnit::Years),
            "months" => Ok(CalendarUnit::Months),
            "weeks" => Ok(CalendarUnit::Weeks),
            "days" => Ok(CalendarUnit::Days),
            "hours" => Ok(CalendarUnit::Hours),
            "minutes" => Ok(CalendarUnit::Minutes),
            "seconds" => Ok(CalendarUnit::Seconds),
            _ => Err(TemporaError::InvalidIntervalUnit(unit)),
        }
    }
}

/// Turn a singular unit name into its plural form.
///
/// Names already ending in `s` pass through. Unknown names get an `s`
/// appended so that validation reports the pluralised spelling.
fn pluralize(unit: &str) -> String {
    if unit.ends_with('s') {
        return unit.to_string();
    }
    match unit {
        "day" => "days".to_string(),
        "week" => "weeks".to_string(),
        "month" => "months".to_string(),
        "year" => "years".to_string(),
        "hour" => "hours".to_string(),
        "minute" => "minutes".to_string(),
        "second" => "seconds".to_string(),
        other => format!("{other}s"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plural_names() {
        for unit in CalendarUnit::ALL {
            assert_eq!(unit.as_str().parse::<CalendarUnit>().unwrap(), unit);
        }
    }

    #[test]
    fn test_parse_singular_and_mixed_case() {
        assert_eq!("day".parse::<CalendarUnit>().unwrap(), CalendarUnit::Days);
        assert_eq!("Month".parse::<CalendarUnit>().unwrap(), CalendarUnit::Months);
        assert_eq!(" WEEK ".parse::<CalendarUnit>().unwrap(), CalendarUnit::Weeks);
    }

    #[test]
    fn test_parse_unknown_unit_is_pluralized_in_error() {
        let err = "fortnight".parse::<CalendarUnit>().unwrap_err();
        assert_eq!(
            err,
            TemporaError::InvalidIntervalUnit("fortnights".to_string())
        );
        assert!(err.to_string().contains("Invalid interval unit"));
    }

    #[test]
    fn test_weeks_are_rewritten_to_days() {
        assert_eq!(CalendarUnit::Weeks.canonical(2), (14, CalendarUnit::Days));
        assert_eq!(CalendarUnit::Months.canonical(3), (3, CalendarUnit::Months));
    }

    #[test]
    fn test_week_rewrite_saturates() {
        assert_eq!(CalendarUnit::Weeks.canonical(i64::MAX), (i64::MAX, CalendarUnit::Days));
        assert_eq!(CalendarUnit::Weeks.canonical(i64::MIN / 2), (i64::MIN, CalendarUnit::Days));
    }
}
