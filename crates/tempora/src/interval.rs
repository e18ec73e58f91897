//! Signed calendar intervals.
//!
//! An [`Interval`] is a duration decomposed into years, months, days, hours,
//! minutes, seconds and milliseconds. Magnitudes are always non-negative;
//! the direction lives in the `inverted` flag, and `absolute` suppresses the
//! sign when fields are read.
//!
//! An interval is either:
//!
//! - **nominal**: not tied to any dates. Fields are normalized with fixed
//!   approximations: a month is 30 days and a year is 12 such months
//!   (360 days). "3 months" is 90 days here, whatever the calendar says.
//! - **anchored**: built by [`Interval::from_difference`] from a concrete
//!   start and end. Fields are derived from the two moments with
//!   calendar-correct month and day counting, and are recomputed whenever
//!   the end moves.
//!
//! The two normalizations disagree: a nominal "1 month" is not
//! the anchored difference between Jan 1 and Feb 1 (31 days). Do not treat
//! nominal intervals as calendar-accurate.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::config::default_locale;
use crate::error::{Result, TemporaError};
use crate::locale::Locale;
use crate::moment::Moment;
use crate::unit::CalendarUnit;

const MS_PER_SECOND: i128 = 1000;
const SECONDS_PER_MINUTE: i128 = 60;
const MINUTES_PER_HOUR: i128 = 60;
const HOURS_PER_DAY: i128 = 24;
const NOMINAL_DAYS_PER_MONTH: i128 = 30;
const MONTHS_PER_YEAR: i128 = 12;
const MS_PER_DAY: u64 = 86_400_000;

/// How [`Interval::format`] renders an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatStyle {
    /// `"1y 2m 3d 4h 5m 6s"`.
    #[default]
    Traditional,
    /// `"in 3 days"`, `"2 months ago"`.
    Relative,
}

impl FromStr for FormatStyle {
    type Err = TemporaError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "traditional" => Ok(FormatStyle::Traditional),
            "relative" => Ok(FormatStyle::Relative),
            other => Err(TemporaError::InvalidFormatStyle(other.to_string())),
        }
    }
}

/// The seven duration fields.
///
/// Stored magnitudes are non-negative; intermediate values inside arithmetic
/// carry the sign in every field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Fields {
    years: i64,
    months: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    milliseconds: i64,
}

impl Fields {
    fn negated(self) -> Self {
        Fields {
            years: -self.years,
            months: -self.months,
            days: -self.days,
            hours: -self.hours,
            minutes: -self.minutes,
            seconds: -self.seconds,
            milliseconds: -self.milliseconds,
        }
    }

    fn sum(self, other: Fields) -> Self {
        Fields {
            years: self.years.saturating_add(other.years),
            months: self.months.saturating_add(other.months),
            days: self.days.saturating_add(other.days),
            hours: self.hours.saturating_add(other.hours),
            minutes: self.minutes.saturating_add(other.minutes),
            seconds: self.seconds.saturating_add(other.seconds),
            milliseconds: self.milliseconds.saturating_add(other.milliseconds),
        }
    }

    fn bump(&mut self, amount: i64, unit: CalendarUnit) {
        let (amount, unit) = unit.canonical(amount);
        let field = match unit {
            CalendarUnit::Years => &mut self.years,
            CalendarUnit::Months => &mut self.months,
            CalendarUnit::Weeks | CalendarUnit::Days => &mut self.days,
            CalendarUnit::Hours => &mut self.hours,
            CalendarUnit::Minutes => &mut self.minutes,
            CalendarUnit::Seconds => &mut self.seconds,
        };
        *field = field.saturating_add(amount);
    }

    /// Signed total using 30-day months and 12-month years.
    fn nominal_millis(&self) -> i128 {
        let months = i128::from(self.years) * MONTHS_PER_YEAR + i128::from(self.months);
        let days = months * NOMINAL_DAYS_PER_MONTH + i128::from(self.days);
        let hours = days * HOURS_PER_DAY + i128::from(self.hours);
        let minutes = hours * MINUTES_PER_HOUR + i128::from(self.minutes);
        let seconds = minutes * SECONDS_PER_MINUTE + i128::from(self.seconds);
        seconds * MS_PER_SECOND + i128::from(self.milliseconds)
    }

    /// Decompose a non-negative nominal total back into fields.
    fn from_nominal_millis(total: u128) -> Self {
        let total = total as i128;
        let seconds = total / MS_PER_SECOND;
        let minutes = seconds / SECONDS_PER_MINUTE;
        let hours = minutes / MINUTES_PER_HOUR;
        let days = hours / HOURS_PER_DAY;
        let months = days / NOMINAL_DAYS_PER_MONTH;
        let years = months / MONTHS_PER_YEAR;
        Fields {
            years: saturate(years),
            months: saturate(months % MONTHS_PER_YEAR),
            days: saturate(days % NOMINAL_DAYS_PER_MONTH),
            hours: saturate(hours % HOURS_PER_DAY),
            minutes: saturate(minutes % MINUTES_PER_HOUR),
            seconds: saturate(seconds % SECONDS_PER_MINUTE),
            milliseconds: saturate(total % MS_PER_SECOND),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Basis {
    Nominal,
    Anchored { start: Moment, end: Moment },
}

/// A signed calendar duration, optionally anchored to a start and end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    fields: Fields,
    inverted: bool,
    absolute: bool,
    basis: Basis,
}

impl Default for Interval {
    fn default() -> Self {
        Interval::create(0, 0, 0, 0, 0, 0, 0)
    }
}

impl Interval {
    // ── Construction ────────────────────────────────────────────────────

    /// A nominal interval from raw fields.
    ///
    /// Fields may be negative or out of range; they are normalized right away.
    /// `inverted` negates the whole raw total.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        years: i64,
        months: i64,
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
        milliseconds: i64,
        inverted: bool,
    ) -> Self {
        let mut interval = Interval {
            fields: Fields {
                years,
                months,
                days,
                hours,
                minutes,
                seconds,
                milliseconds,
            },
            inverted,
            absolute: false,
            basis: Basis::Nominal,
        };
        interval.normalize();
        interval
    }

    pub fn create(
        years: i64,
        months: i64,
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
        milliseconds: i64,
    ) -> Self {
        Interval::new(years, months, days, hours, minutes, seconds, milliseconds, false)
    }

    /// `amount` of a single unit; negative amounts give an inverted interval.
    pub fn of(amount: i64, unit: CalendarUnit) -> Self {
        let mut fields = Fields::default();
        fields.bump(amount.saturating_abs(), unit);
        Interval::from_fields(fields, amount < 0)
    }

    pub fn from_years(years: i64) -> Self {
        Interval::of(years, CalendarUnit::Years)
    }

    pub fn from_months(months: i64) -> Self {
        Interval::of(months, CalendarUnit::Months)
    }

    pub fn from_weeks(weeks: i64) -> Self {
        Interval::of(weeks, CalendarUnit::Weeks)
    }

    pub fn from_days(days: i64) -> Self {
        Interval::of(days, CalendarUnit::Days)
    }

    pub fn from_hours(hours: i64) -> Self {
        Interval::of(hours, CalendarUnit::Hours)
    }

    pub fn from_minutes(minutes: i64) -> Self {
        Interval::of(minutes, CalendarUnit::Minutes)
    }

    pub fn from_seconds(seconds: i64) -> Self {
        Interval::of(seconds, CalendarUnit::Seconds)
    }

    /// The calendar difference from `start` to `end`.
    ///
    /// The result is inverted when `end` is before `start`. With `absolute`,
    /// field getters return magnitudes regardless of direction.
    ///
    /// # Examples
    ///
    /// ```
    /// use tempora::{Interval, Moment};
    ///
    /// let start = Moment::from_ymd(2022, 12, 25).unwrap();
    /// let end = Moment::from_ymd(2023, 2, 10).unwrap();
    /// let interval = Interval::from_difference(&start, &end, false);
    /// assert_eq!((interval.years(), interval.months(), interval.days()), (0, 1, 16));
    /// ```
    pub fn from_difference(start: &Moment, end: &Moment, absolute: bool) -> Self {
        let mut interval = Interval {
            fields: Fields::default(),
            inverted: false,
            absolute,
            basis: Basis::Anchored {
                start: start.clone(),
                end: end.clone(),
            },
        };
        interval.normalize();
        interval
    }

    fn from_fields(fields: Fields, inverted: bool) -> Self {
        let mut interval = Interval {
            fields,
            inverted,
            absolute: false,
            basis: Basis::Nominal,
        };
        interval.normalize();
        interval
    }

    // ── Normalization ───────────────────────────────────────────────────

    /// Bring the fields back into canonical ranges.
    ///
    /// Anchored intervals are re-derived from their start and end. Nominal
    /// intervals fold every field into one signed total (30-day months,
    /// 12-month years), take its sign as the direction and decompose the
    /// magnitude again. Normalizing twice is the same as normalizing once.
    pub fn normalize(&mut self) -> &mut Self {
        match &self.basis {
            Basis::Anchored { start, end } => {
                let (fields, inverted) = hydrate(start, end);
                self.fields = fields;
                self.inverted = inverted;
            }
            Basis::Nominal => {
                let raw = if self.inverted {
                    self.fields.negated()
                } else {
                    self.fields
                };
                let total = raw.nominal_millis();
                self.inverted = total < 0;
                self.fields = Fields::from_nominal_millis(total.unsigned_abs());
            }
        }
        self
    }

    /// A nominal copy of this interval with the same fields and direction.
    pub fn detach(&self) -> Interval {
        let mut detached = Interval::from_fields(self.signed_fields(), false);
        detached.absolute = self.absolute;
        detached
    }

    // ── In-place unit arithmetic ────────────────────────────────────────

    /// Add `amount` of `unit` in place.
    ///
    /// An anchored interval moves its end by the same amount and is
    /// re-derived; a nominal one adds to the signed field and renormalizes.
    pub fn add(&mut self, amount: i64, unit: CalendarUnit) -> &mut Self {
        if let Basis::Anchored { end, .. } = &mut self.basis {
            end.add(amount, unit);
        }
        let mut fields = self.signed_fields();
        fields.bump(amount, unit);
        self.fields = fields;
        self.inverted = false;
        self.normalize()
    }

    pub fn add_years(&mut self, years: i64) -> &mut Self {
        self.add(years, CalendarUnit::Years)
    }

    pub fn add_months(&mut self, months: i64) -> &mut Self {
        self.add(months, CalendarUnit::Months)
    }

    pub fn add_weeks(&mut self, weeks: i64) -> &mut Self {
        self.add(weeks, CalendarUnit::Weeks)
    }

    pub fn add_days(&mut self, days: i64) -> &mut Self {
        self.add(days, CalendarUnit::Days)
    }

    pub fn add_hours(&mut self, hours: i64) -> &mut Self {
        self.add(hours, CalendarUnit::Hours)
    }

    pub fn add_minutes(&mut self, minutes: i64) -> &mut Self {
        self.add(minutes, CalendarUnit::Minutes)
    }

    pub fn add_seconds(&mut self, seconds: i64) -> &mut Self {
        self.add(seconds, CalendarUnit::Seconds)
    }

    /// A copy with `amount` of `unit` added; the receiver is untouched.
    pub fn plus_units(&self, amount: i64, unit: CalendarUnit) -> Interval {
        let mut result = self.clone();
        result.add(amount, unit);
        result
    }

    // ── Interval arithmetic ─────────────────────────────────────────────

    /// The sum of two intervals.
    ///
    /// When the receiver is anchored its end is advanced by `other` and the
    /// result is re-derived from the dates. When exactly one operand is
    /// inverted, the result takes the direction of the operand with the
    /// larger magnitude; on a tie the receiver's direction wins.
    pub fn plus(&self, other: &Interval) -> Interval {
        let mut result = match &self.basis {
            Basis::Anchored { start, end } => {
                let new_end = shift(end, other.signed_fields());
                Interval::from_difference(start, &new_end, self.absolute)
            }
            Basis::Nominal => {
                let mut sum = Interval::from_fields(self.signed_fields().sum(other.signed_fields()), false);
                sum.absolute = self.absolute;
                sum
            }
        };

        if self.inverted && other.inverted {
            result.inverted = true;
        } else if self.inverted != other.inverted {
            result.inverted = if self.magnitude_millis() >= other.magnitude_millis() {
                self.inverted
            } else {
                other.inverted
            };
        }
        result
    }

    /// `self.plus(other)` with `other`'s direction flipped.
    pub fn minus(&self, other: &Interval) -> Interval {
        let mut flipped = other.clone();
        flipped.inverted = !flipped.inverted;
        self.plus(&flipped)
    }

    /// Scale by `factor`.
    ///
    /// A nominal interval scales its total and renormalizes, rounding to the
    /// nearest millisecond. An anchored one scales the elapsed time from its
    /// start and is re-derived from the new end.
    pub fn multiply(&self, factor: f64) -> Interval {
        match &self.basis {
            Basis::Anchored { start, end } => {
                let elapsed = end.epoch_millis() - start.epoch_millis();
                let scaled = (elapsed as f64 * factor).round() as i64;
                let mut new_end = start.clone();
                new_end.add_milliseconds(scaled);
                Interval::from_difference(start, &new_end, self.absolute)
            }
            Basis::Nominal => {
                let total = self.signed_fields().nominal_millis() as f64 * factor;
                let total = total.round() as i128;
                let mut result = Interval {
                    fields: Fields::from_nominal_millis(total.unsigned_abs()),
                    inverted: total < 0,
                    absolute: self.absolute,
                    basis: Basis::Nominal,
                };
                result.normalize();
                result
            }
        }
    }

    /// Scale by `1 / divisor`.
    ///
    /// # Errors
    ///
    /// Returns [`TemporaError::DivisionByZero`] when `divisor` is zero.
    pub fn divide(&self, divisor: f64) -> Result<Interval> {
        if divisor == 0.0 {
            return Err(TemporaError::DivisionByZero);
        }
        Ok(self.multiply(1.0 / divisor))
    }

    // ── Field reads ─────────────────────────────────────────────────────

    pub fn years(&self) -> i64 {
        self.signed(self.fields.years)
    }

    pub fn months(&self) -> i64 {
        self.signed(self.fields.months)
    }

    /// Whole weeks contained in the day field.
    pub fn weeks(&self) -> i64 {
        self.signed(self.fields.days / 7)
    }

    pub fn days(&self) -> i64 {
        self.signed(self.fields.days)
    }

    pub fn hours(&self) -> i64 {
        self.signed(self.fields.hours)
    }

    pub fn minutes(&self) -> i64 {
        self.signed(self.fields.minutes)
    }

    pub fn seconds(&self) -> i64 {
        self.signed(self.fields.seconds)
    }

    pub fn milliseconds(&self) -> i64 {
        self.signed(self.fields.milliseconds)
    }

    pub fn inverted(&self) -> bool {
        self.inverted
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    pub fn set_absolute(&mut self, absolute: bool) -> &mut Self {
        self.absolute = absolute;
        self
    }

    pub fn is_anchored(&self) -> bool {
        matches!(self.basis, Basis::Anchored { .. })
    }

    pub fn start(&self) -> Option<&Moment> {
        match &self.basis {
            Basis::Anchored { start, .. } => Some(start),
            Basis::Nominal => None,
        }
    }

    pub fn end(&self) -> Option<&Moment> {
        match &self.basis {
            Basis::Anchored { end, .. } => Some(end),
            Basis::Nominal => None,
        }
    }

    // ── Totals ──────────────────────────────────────────────────────────

    pub fn total_months(&self) -> i64 {
        self.signed(saturate(self.total_months_magnitude()))
    }

    pub fn total_days(&self) -> i64 {
        self.signed(saturate(self.total_days_magnitude()))
    }

    pub fn total_hours(&self) -> i64 {
        self.signed(saturate(self.total_hours_magnitude()))
    }

    pub fn total_minutes(&self) -> i64 {
        self.signed(saturate(self.total_minutes_magnitude()))
    }

    pub fn total_seconds(&self) -> i64 {
        self.signed(saturate(self.total_seconds_magnitude()))
    }

    fn total_months_magnitude(&self) -> i128 {
        match &self.basis {
            Basis::Anchored { start, end } => {
                let (start, end) = (start.utc(), end.utc());
                let years = i128::from(end.year()) - i128::from(start.year());
                let months = i128::from(end.month()) - i128::from(start.month());
                (years * MONTHS_PER_YEAR + months).abs()
            }
            Basis::Nominal => {
                i128::from(self.fields.years) * MONTHS_PER_YEAR + i128::from(self.fields.months)
            }
        }
    }

    fn total_days_magnitude(&self) -> i128 {
        match &self.basis {
            Basis::Anchored { start, end } => {
                let elapsed = (end.epoch_millis() - start.epoch_millis()).unsigned_abs();
                i128::from(elapsed / MS_PER_DAY)
            }
            Basis::Nominal => {
                self.total_months_magnitude() * NOMINAL_DAYS_PER_MONTH + i128::from(self.fields.days)
            }
        }
    }

    fn total_hours_magnitude(&self) -> i128 {
        self.total_days_magnitude() * HOURS_PER_DAY + i128::from(self.fields.hours)
    }

    fn total_minutes_magnitude(&self) -> i128 {
        self.total_hours_magnitude() * MINUTES_PER_HOUR + i128::from(self.fields.minutes)
    }

    fn total_seconds_magnitude(&self) -> i128 {
        self.total_minutes_magnitude() * SECONDS_PER_MINUTE + i128::from(self.fields.seconds)
    }

    fn magnitude_millis(&self) -> i128 {
        self.total_seconds_magnitude() * MS_PER_SECOND + i128::from(self.fields.milliseconds)
    }

    // ── Comparison ──────────────────────────────────────────────────────

    /// Order by signed length (negative when inverted).
    pub fn compare_to(&self, other: &Interval) -> Ordering {
        self.signed_millis().cmp(&other.signed_millis())
    }

    pub fn is_greater_than(&self, other: &Interval) -> bool {
        self.compare_to(other) == Ordering::Greater
    }

    pub fn is_less_than(&self, other: &Interval) -> bool {
        self.compare_to(other) == Ordering::Less
    }

    /// Same signed length; fields and anchors may differ.
    pub fn equals(&self, other: &Interval) -> bool {
        self.compare_to(other) == Ordering::Equal
    }

    fn signed_millis(&self) -> i128 {
        let magnitude = self.magnitude_millis();
        if self.inverted {
            -magnitude
        } else {
            magnitude
        }
    }

    // ── Formatting ──────────────────────────────────────────────────────

    /// Render in the default locale.
    pub fn format(&self, style: FormatStyle) -> String {
        self.format_in(style, default_locale())
    }

    pub fn format_in(&self, style: FormatStyle, locale: Locale) -> String {
        match style {
            FormatStyle::Traditional => self.format_traditional(),
            FormatStyle::Relative => self.format_relative(locale),
        }
    }

    /// Relative rendering in the default locale, e.g. `"in a year"`.
    pub fn for_humans(&self) -> String {
        self.format(FormatStyle::Relative)
    }

    fn format_traditional(&self) -> String {
        let f = &self.fields;
        let parts: Vec<String> = [
            (f.years, "y"),
            (f.months, "m"),
            (f.days % 7, "d"),
            (f.days / 7, "w"),
            (f.hours, "h"),
            (f.minutes, "m"),
            (f.seconds, "s"),
        ]
        .into_iter()
        .filter(|(value, _)| *value != 0)
        .map(|(value, suffix)| format!("{value}{suffix}"))
        .collect();

        let body = if parts.is_empty() {
            "0s".to_string()
        } else {
            parts.join(" ")
        };
        if !self.absolute && self.inverted {
            format!("-{body}")
        } else {
            body
        }
    }

    fn format_relative(&self, locale: Locale) -> String {
        let t = &locale.translation().relative;
        let f = &self.fields;
        let value = if f.years != 0 {
            t.amount(t.year, t.years, f.years)
        } else if f.months != 0 {
            t.amount(t.month, t.months, f.months)
        } else if f.days != 0 {
            t.amount(t.day, t.days, f.days)
        } else if f.hours != 0 {
            t.amount(t.hour, t.hours, f.hours)
        } else if f.minutes != 0 {
            t.amount(t.minute, t.minutes, f.minutes)
        } else {
            t.few_seconds.to_string()
        };

        if self.absolute {
            value
        } else {
            t.wrap(&value, self.inverted)
        }
    }

    /// A serializable summary of this interval.
    pub fn breakdown(&self) -> Breakdown {
        Breakdown {
            years: self.years(),
            months: self.months(),
            weeks: self.weeks(),
            days: self.days(),
            hours: self.hours(),
            minutes: self.minutes(),
            seconds: self.seconds(),
            milliseconds: self.milliseconds(),
            inverted: self.inverted,
            absolute: self.absolute,
            total_seconds: self.total_seconds(),
            start: self.start().cloned(),
            end: self.end().cloned(),
            traditional: self.format_traditional(),
            human_readable: self.for_humans(),
        }
    }

    // ── Internal helpers ────────────────────────────────────────────────

    fn signed(&self, value: i64) -> i64 {
        if self.absolute {
            value.abs()
        } else if self.inverted {
            -value
        } else {
            value
        }
    }

    /// Fields with the true direction applied, ignoring `absolute`.
    fn signed_fields(&self) -> Fields {
        if self.inverted {
            self.fields.negated()
        } else {
            self.fields
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_traditional())
    }
}

/// Serializable view of an [`Interval`], with signed field values.
#[derive(Debug, Clone, Serialize)]
pub struct Breakdown {
    pub years: i64,
    pub months: i64,
    pub weeks: i64,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub milliseconds: i64,
    pub inverted: bool,
    pub absolute: bool,
    pub total_seconds: i64,
    /// Anchor start, for intervals built from two moments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<Moment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<Moment>,
    /// e.g. `"1y 2m 3d"`.
    pub traditional: String,
    /// e.g. `"in a year"`.
    pub human_readable: String,
}

/// Derive fields and direction from a concrete start and end.
///
/// Sub-day fields come straight from the elapsed milliseconds. Years and
/// months come from the UTC calendar fields; the start is advanced by them
/// and the remaining whole days are counted to the end. If that overshoots,
/// one month is borrowed back at a time: the month before the end's month
/// going forward, the end's own month (and then later ones) going backward.
fn hydrate(start: &Moment, end: &Moment) -> (Fields, bool) {
    let (start, end) = (start.utc(), end.utc());

    let delta = end.epoch_millis() - start.epoch_millis();
    let inverted = delta < 0;
    let abs = i128::from(delta.unsigned_abs());
    let seconds = abs / MS_PER_SECOND;
    let minutes = seconds / SECONDS_PER_MINUTE;
    let hours = minutes / MINUTES_PER_HOUR;

    let months_total = (i64::from(end.year()) - i64::from(start.year())) * 12
        + (i64::from(end.month()) - i64::from(start.month()));
    let mut years = months_total / 12;
    let mut months = months_total % 12;

    let mut cursor = start.clone();
    cursor.add_years(years).add_months(months);
    // Whole days that never carry the cursor past the end. A cursor that
    // overshoots by part of a day goes negative here and borrows below.
    let gap = end.epoch_millis() - cursor.epoch_millis();
    let day = MS_PER_DAY as i64;
    let mut days = if inverted {
        -(-gap).div_euclid(day)
    } else {
        gap.div_euclid(day)
    };

    let end_year = i64::from(end.year());
    let end_month0 = i64::from(end.month()) - 1;
    if !inverted {
        let mut borrow = end_month0 - 1;
        while days < 0 {
            days += days_in_month(end_year, borrow);
            months -= 1;
            if months < 0 && years > 0 {
                years -= 1;
                months += 12;
            }
            borrow -= 1;
        }
    } else {
        let mut borrow = end_month0;
        while days > 0 {
            days -= days_in_month(end_year, borrow);
            months += 1;
            if years < 0 && months > 0 {
                years += 1;
                months -= 12;
            }
            borrow += 1;
        }
    }

    let fields = Fields {
        years: years.abs(),
        months: months.abs(),
        days: days.abs(),
        hours: saturate(hours % HOURS_PER_DAY),
        minutes: saturate(minutes % MINUTES_PER_HOUR),
        seconds: saturate(seconds % SECONDS_PER_MINUTE),
        milliseconds: saturate(abs % MS_PER_SECOND),
    };
    (fields, inverted)
}

/// A copy of `moment` moved by every signed field, largest unit first.
fn shift(moment: &Moment, fields: Fields) -> Moment {
    let mut shifted = moment.clone();
    shifted
        .add_years(fields.years)
        .add_months(fields.months)
        .add_days(fields.days)
        .add_hours(fields.hours)
        .add_minutes(fields.minutes)
        .add_seconds(fields.seconds)
        .add_milliseconds(fields.milliseconds);
    shifted
}

/// Length of a month given a year and a 0-based month that may fall outside
/// `0..12` (it is folded into the neighbouring years).
fn days_in_month(year: i64, month0: i64) -> i64 {
    let months = year * 12 + month0;
    let year = months.div_euclid(12);
    match months.rem_euclid(12) + 1 {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn saturate(value: i128) -> i64 {
    i64::try_from(value).unwrap_or(if value < 0 { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Moment {
        Moment::from_ymd_hms_in(y, m, d, 0, 0, 0, chrono_tz::UTC).unwrap()
    }

    fn ymd(interval: &Interval) -> (i64, i64, i64) {
        (interval.years(), interval.months(), interval.days())
    }

    // ── construction ────────────────────────────────────────────────────

    #[test]
    fn test_constructor_keeps_in_range_fields() {
        let interval = Interval::create(1, 2, 3, 4, 5, 6, 7);
        assert_eq!(ymd(&interval), (1, 2, 3));
        assert_eq!(interval.hours(), 4);
        assert_eq!(interval.minutes(), 5);
        assert_eq!(interval.seconds(), 6);
        assert_eq!(interval.milliseconds(), 7);
        assert!(!interval.inverted());
    }

    #[test]
    fn test_single_unit_factories() {
        assert_eq!(Interval::from_years(2).years(), 2);
        assert_eq!(Interval::from_months(3).months(), 3);
        assert_eq!(Interval::from_days(4).days(), 4);
        assert_eq!(Interval::from_hours(5).hours(), 5);
        assert_eq!(Interval::from_minutes(6).minutes(), 6);
        assert_eq!(Interval::from_seconds(7).seconds(), 7);
        assert_eq!(Interval::from_weeks(2).days(), 14);
    }

    #[test]
    fn test_negative_factory_is_inverted() {
        let interval = Interval::from_days(-3);
        assert!(interval.inverted());
        assert_eq!(interval.days(), -3);
    }

    // ── nominal normalization ───────────────────────────────────────────

    #[test]
    fn test_normalize_uses_thirty_day_months() {
        let interval = Interval::create(0, 0, 45, 0, 0, 0, 0);
        assert_eq!(ymd(&interval), (0, 1, 15));
    }

    #[test]
    fn test_normalize_folds_months_into_years() {
        let interval = Interval::create(0, 13, 0, 0, 0, 0, 0);
        assert_eq!(ymd(&interval), (1, 1, 0));
    }

    #[test]
    fn test_normalize_carries_time_fields() {
        let interval = Interval::create(0, 0, 0, 25, 61, 61, 1500);
        assert_eq!(interval.days(), 1);
        assert_eq!(interval.hours(), 2);
        assert_eq!(interval.minutes(), 2);
        assert_eq!(interval.seconds(), 2);
        assert_eq!(interval.milliseconds(), 500);
    }

    #[test]
    fn test_normalize_mixed_signs_takes_sign_of_total() {
        // 12 months - 13 months = -1 month
        let interval = Interval::create(1, -13, 0, 0, 0, 0, 0);
        assert!(interval.inverted());
        assert_eq!(ymd(&interval), (0, -1, 0));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut interval = Interval::create(3, 27, 95, 49, 130, 3601, 2500);
        let once = interval.clone();
        interval.normalize();
        assert_eq!(interval, once);
    }

    #[test]
    fn test_nominal_year_is_not_calendar_year() {
        // Nominal years are 360 days; calendar years are 365 or 366.
        let nominal = Interval::from_days(365);
        assert_eq!(ymd(&nominal), (1, 0, 5));
        let anchored = Interval::from_difference(&date(2023, 1, 1), &date(2024, 1, 1), false);
        assert_eq!(ymd(&anchored), (1, 0, 0));
    }

    // ── in-place unit arithmetic ────────────────────────────────────────

    #[test]
    fn test_add_methods() {
        assert_eq!(Interval::create(1, 0, 0, 0, 0, 0, 0).add_years(2).years(), 3);
        assert_eq!(Interval::create(0, 1, 0, 0, 0, 0, 0).add_months(2).months(), 3);
        assert_eq!(Interval::create(0, 0, 1, 0, 0, 0, 0).add_days(2).days(), 3);
        assert_eq!(Interval::create(0, 0, 0, 1, 0, 0, 0).add_hours(2).hours(), 3);
        assert_eq!(Interval::create(0, 0, 0, 0, 1, 0, 0).add_minutes(2).minutes(), 3);
        assert_eq!(Interval::create(0, 0, 0, 0, 0, 1, 0).add_seconds(2).seconds(), 3);
    }

    #[test]
    fn test_add_crosses_zero() {
        let mut interval = Interval::from_days(2);
        interval.add_days(-5);
        assert!(interval.inverted());
        assert_eq!(interval.days(), -3);
    }

    #[test]
    fn test_plus_units_leaves_receiver_untouched() {
        let interval = Interval::from_days(1);
        let later = interval.plus_units(1, CalendarUnit::Weeks);
        assert_eq!(interval.days(), 1);
        assert_eq!(later.days(), 8);
    }

    #[test]
    fn test_add_on_anchored_moves_end() {
        let mut interval = Interval::from_difference(&date(2023, 1, 15), &date(2023, 2, 20), false);
        interval.add_months(1);
        assert_eq!(ymd(&interval), (0, 2, 5));
        assert_eq!(interval.end().unwrap().to_date_string(), "2023-03-20");
    }

    // ── interval arithmetic ─────────────────────────────────────────────

    #[test]
    fn test_plus() {
        let a = Interval::create(1, 2, 3, 4, 5, 6, 0);
        let result = a.plus(&a);
        assert_eq!(ymd(&result), (2, 4, 6));
        assert_eq!(result.hours(), 8);
        assert_eq!(result.minutes(), 10);
        assert_eq!(result.seconds(), 12);
    }

    #[test]
    fn test_minus() {
        let a = Interval::create(2, 4, 6, 8, 10, 12, 0);
        let b = Interval::create(1, 2, 3, 4, 5, 6, 0);
        let result = a.minus(&b);
        assert_eq!(ymd(&result), (1, 2, 3));
        assert_eq!(result.hours(), 4);
        assert_eq!(result.minutes(), 5);
        assert_eq!(result.seconds(), 6);
        assert!(!result.inverted());
    }

    #[test]
    fn test_plus_mixed_signs_takes_larger_operand_sign() {
        let result = Interval::from_days(-5).plus(&Interval::from_days(3));
        assert!(result.inverted());
        assert_eq!(result.days(), -2);

        let result = Interval::from_days(5).plus(&Interval::from_days(-3));
        assert!(!result.inverted());
        assert_eq!(result.days(), 2);
    }

    #[test]
    fn test_plus_tie_keeps_receiver_sign() {
        let result = Interval::from_days(-2).plus(&Interval::from_days(2));
        assert!(result.inverted());
        assert_eq!(result.days(), 0);

        let result = Interval::from_days(2).plus(&Interval::from_days(-2));
        assert!(!result.inverted());
    }

    #[test]
    fn test_plus_on_anchored_rederives_from_dates() {
        let interval = Interval::from_difference(&date(2024, 1, 1), &date(2024, 1, 31), false);
        let result = interval.plus(&Interval::from_days(1));
        assert!(result.is_anchored());
        assert_eq!(ymd(&result), (0, 1, 0));
        assert_eq!(result.end().unwrap().to_date_string(), "2024-02-01");
    }

    #[test]
    fn test_multiply_and_divide() {
        let result = Interval::create(1, 2, 3, 4, 5, 6, 0).multiply(2.0);
        assert_eq!(ymd(&result), (2, 4, 6));
        assert_eq!(result.seconds(), 12);

        let result = Interval::create(2, 4, 6, 8, 10, 12, 0).divide(2.0).unwrap();
        assert_eq!(ymd(&result), (1, 2, 3));
        assert_eq!(result.hours(), 4);
        assert_eq!(result.minutes(), 5);
        assert_eq!(result.seconds(), 6);
    }

    #[test]
    fn test_multiply_negative_factor_inverts() {
        let result = Interval::from_hours(3).multiply(-1.0);
        assert!(result.inverted());
        assert_eq!(result.hours(), -3);
    }

    #[test]
    fn test_multiply_anchored_scales_elapsed_time() {
        let interval = Interval::from_difference(&date(2024, 1, 1), &date(2024, 1, 11), false);
        let result = interval.multiply(2.0);
        assert_eq!(ymd(&result), (0, 0, 20));
        assert_eq!(result.end().unwrap().to_date_string(), "2024-01-21");
    }

    #[test]
    fn test_divide_by_zero_returns_error() {
        let err = Interval::from_days(1).divide(0.0).unwrap_err();
        assert_eq!(err, TemporaError::DivisionByZero);
    }

    // ── comparison ──────────────────────────────────────────────────────

    #[test]
    fn test_compare_to() {
        let one = Interval::from_years(1);
        let two = Interval::from_years(2);
        assert_eq!(one.compare_to(&two), Ordering::Less);
        assert_eq!(two.compare_to(&one), Ordering::Greater);
        assert_eq!(one.compare_to(&Interval::from_years(1)), Ordering::Equal);
        assert!(two.is_greater_than(&one));
        assert!(one.is_less_than(&two));
        assert!(one.equals(&Interval::from_months(12)));
        assert!(!one.equals(&two));
    }

    #[test]
    fn test_inverted_compares_below_positive() {
        assert!(Interval::from_days(-1).is_less_than(&Interval::from_days(1)));
        assert!(Interval::from_days(-1).is_greater_than(&Interval::from_days(-2)));
    }

    // ── totals ──────────────────────────────────────────────────────────

    #[test]
    fn test_nominal_totals() {
        let interval = Interval::create(1, 2, 3, 4, 5, 6, 0);
        assert_eq!(interval.total_months(), 14);
        assert_eq!(interval.total_days(), 14 * 30 + 3);
        assert_eq!(interval.total_hours(), (14 * 30 + 3) * 24 + 4);
        assert_eq!(interval.total_minutes(), interval.total_hours() * 60 + 5);
        assert_eq!(interval.total_seconds(), interval.total_minutes() * 60 + 6);
    }

    #[test]
    fn test_totals_apply_sign_once() {
        let interval = Interval::new(0, 0, 2, 3, 0, 0, 0, true);
        assert_eq!(interval.total_days(), -2);
        assert_eq!(interval.total_hours(), -51);
    }

    #[test]
    fn test_anchored_totals_use_real_dates() {
        let interval = Interval::from_difference(&date(2024, 1, 1), &date(2024, 3, 1), false);
        assert_eq!(interval.total_months(), 2);
        assert_eq!(interval.total_days(), 60);
        let back = Interval::from_difference(&date(2024, 3, 1), &date(2024, 1, 1), false);
        assert_eq!(back.total_months(), -2);
        assert_eq!(back.total_days(), -60);
    }

    // ── from_difference ─────────────────────────────────────────────────

    #[test]
    fn test_difference_same_year() {
        let interval = Interval::from_difference(&date(2023, 1, 15), &date(2023, 6, 20), false);
        assert_eq!(ymd(&interval), (0, 5, 5));
    }

    #[test]
    fn test_difference_across_year_boundary() {
        let interval = Interval::from_difference(&date(2022, 12, 25), &date(2023, 2, 10), false);
        assert_eq!(ymd(&interval), (0, 1, 16));
    }

    #[test]
    fn test_difference_full_year() {
        let interval = Interval::from_difference(&date(2022, 1, 1), &date(2023, 1, 1), false);
        assert_eq!(ymd(&interval), (1, 0, 0));
    }

    #[test]
    fn test_difference_reverse_order() {
        let interval = Interval::from_difference(&date(2023, 6, 20), &date(2023, 1, 15), false);
        assert!(interval.inverted());
        assert_eq!(ymd(&interval), (0, -5, -5));
    }

    #[test]
    fn test_difference_multi_year_reverse() {
        let interval = Interval::from_difference(&date(2024, 3, 15), &date(2022, 6, 20), false);
        assert!(interval.inverted());
        assert_eq!(ymd(&interval), (-1, -8, -25));
    }

    #[test]
    fn test_difference_absolute() {
        let interval = Interval::from_difference(&date(2023, 6, 20), &date(2023, 1, 15), true);
        assert!(interval.inverted());
        assert_eq!(ymd(&interval), (0, 5, 5));

        let interval = Interval::from_difference(&date(2021, 3, 15), &date(2024, 6, 20), true);
        assert!(!interval.inverted());
        assert_eq!(ymd(&interval), (3, 3, 5));
    }

    #[test]
    fn test_difference_same_date_is_zero() {
        let interval = Interval::from_difference(&date(2023, 1, 15), &date(2023, 1, 15), false);
        assert_eq!(ymd(&interval), (0, 0, 0));
        assert_eq!(interval.total_seconds(), 0);
        assert!(!interval.inverted());
    }

    #[test]
    fn test_difference_leap_year_boundary() {
        let interval = Interval::from_difference(&date(2024, 2, 28), &date(2024, 3, 1), false);
        assert_eq!(ymd(&interval), (0, 0, 2));
    }

    #[test]
    fn test_difference_end_of_month_start() {
        let interval = Interval::from_difference(&date(2023, 1, 31), &date(2023, 2, 28), false);
        assert_eq!(ymd(&interval), (0, 0, 28));
    }

    #[test]
    fn test_difference_end_of_month_start_two_months() {
        // Jan 31 + 2 months overflows to Mar 31; two borrows are needed.
        let interval = Interval::from_difference(&date(2023, 1, 31), &date(2023, 3, 1), false);
        assert_eq!(ymd(&interval), (0, 0, 29));
        assert_eq!(date(2023, 1, 31).add_interval(&interval).to_date_string(), "2023-03-01");
    }

    #[test]
    fn test_difference_sub_day_fields() {
        let start = Moment::from_ymd_hms_in(2024, 1, 1, 10, 0, 0, chrono_tz::UTC).unwrap();
        let end = Moment::from_ymd_hms_in(2024, 1, 3, 8, 30, 15, chrono_tz::UTC).unwrap();
        let interval = Interval::from_difference(&start, &end, false);
        assert_eq!(interval.days(), 1);
        assert_eq!(interval.hours(), 22);
        assert_eq!(interval.minutes(), 30);
        assert_eq!(interval.seconds(), 15);
    }

    #[test]
    fn test_difference_end_time_before_start_time() {
        // Feb 1 10:00 overshoots the end by two hours, so January is borrowed.
        let start = Moment::from_ymd_hms_in(2024, 1, 1, 10, 0, 0, chrono_tz::UTC).unwrap();
        let end = Moment::from_ymd_hms_in(2024, 2, 1, 8, 0, 0, chrono_tz::UTC).unwrap();
        let interval = Interval::from_difference(&start, &end, false);
        assert_eq!(ymd(&interval), (0, 0, 30));
        assert_eq!(interval.hours(), 22);
        assert_eq!(start.add_interval(&interval).epoch_millis(), end.epoch_millis());
    }

    #[test]
    fn test_difference_inverted_end_time_after_start_time() {
        let start = Moment::from_ymd_hms_in(2024, 2, 1, 8, 0, 0, chrono_tz::UTC).unwrap();
        let end = Moment::from_ymd_hms_in(2024, 1, 1, 10, 0, 0, chrono_tz::UTC).unwrap();
        let interval = Interval::from_difference(&start, &end, false);
        assert!(interval.inverted());
        assert_eq!(ymd(&interval), (0, 0, -30));
        assert_eq!(interval.hours(), -22);
        assert_eq!(start.add_interval(&interval).epoch_millis(), end.epoch_millis());
    }

    #[test]
    fn test_difference_is_not_symmetric_across_month_lengths() {
        // Forward borrows February (28 days), backward borrows January (31).
        let early = date(2023, 1, 15);
        let late = date(2023, 3, 10);
        let forward = Interval::from_difference(&early, &late, true);
        let backward = Interval::from_difference(&late, &early, true);
        assert_eq!(ymd(&forward), (0, 1, 23));
        assert_eq!(ymd(&backward), (0, 1, 26));
        assert_eq!(early.add_interval(&forward).to_date_string(), "2023-03-10");
        let signed = Interval::from_difference(&late, &early, false);
        assert_eq!(late.add_interval(&signed).to_date_string(), "2023-01-15");
    }

    #[test]
    fn test_detach_keeps_fields() {
        let anchored = Interval::from_difference(&date(2023, 6, 20), &date(2023, 1, 15), false);
        let detached = anchored.detach();
        assert!(!detached.is_anchored());
        assert!(detached.inverted());
        assert_eq!(ymd(&detached), (0, -5, -5));
    }

    // ── formatting ──────────────────────────────────────────────────────

    #[test]
    fn test_format_traditional() {
        let interval = Interval::create(1, 2, 3, 4, 5, 6, 0);
        assert_eq!(interval.format(FormatStyle::Traditional), "1y 2m 3d 4h 5m 6s");
        assert_eq!(interval.to_string(), "1y 2m 3d 4h 5m 6s");
    }

    #[test]
    fn test_format_traditional_splits_weeks() {
        assert_eq!(Interval::from_days(10).to_string(), "3d 1w");
        assert_eq!(Interval::from_days(14).to_string(), "2w");
    }

    #[test]
    fn test_format_traditional_zero_and_inverted() {
        assert_eq!(Interval::default().to_string(), "0s");
        assert_eq!(Interval::new(1, 2, 0, 0, 0, 0, 0, true).to_string(), "-1y 2m");
        let absolute = Interval::from_difference(&date(2023, 6, 20), &date(2023, 1, 15), true);
        assert_eq!(absolute.to_string(), "5m 5d");
    }

    #[test]
    fn test_format_relative() {
        assert_eq!(
            Interval::from_years(1).format_in(FormatStyle::Relative, Locale::En),
            "in a year"
        );
        assert_eq!(
            Interval::from_years(-2).format_in(FormatStyle::Relative, Locale::En),
            "2 years ago"
        );
        assert_eq!(
            Interval::from_seconds(30).format_in(FormatStyle::Relative, Locale::En),
            "in a few seconds"
        );
        assert_eq!(
            Interval::from_days(3).format_in(FormatStyle::Relative, Locale::Ja),
            "3日後"
        );
    }

    #[test]
    fn test_format_relative_absolute_is_unwrapped() {
        let interval = Interval::from_difference(&date(2023, 6, 20), &date(2023, 1, 15), true);
        assert_eq!(interval.format_in(FormatStyle::Relative, Locale::En), "5 months");
    }

    #[test]
    fn test_format_style_from_str() {
        assert_eq!("relative".parse::<FormatStyle>().unwrap(), FormatStyle::Relative);
        assert_eq!("Traditional".parse::<FormatStyle>().unwrap(), FormatStyle::Traditional);
        assert_eq!(
            "fancy".parse::<FormatStyle>(),
            Err(TemporaError::InvalidFormatStyle("fancy".to_string()))
        );
    }

    #[test]
    fn test_breakdown_serializes() {
        let interval = Interval::from_difference(&date(2023, 1, 15), &date(2023, 6, 20), false);
        let json = serde_json::to_value(interval.breakdown()).unwrap();
        assert_eq!(json["months"], 5);
        assert_eq!(json["days"], 5);
        assert_eq!(json["inverted"], false);
        assert_eq!(json["start"], "2023-01-15T00:00:00+00:00");
        assert_eq!(json["traditional"], "5m 5d");

        let nominal = serde_json::to_value(Interval::from_days(2).breakdown()).unwrap();
        assert!(nominal.get("start").is_none());
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2023, 1), 28);
        assert_eq!(days_in_month(2023, -1), 31);
        assert_eq!(days_in_month(2023, 12), 31);
        assert_eq!(days_in_month(2023, 3), 30);
    }
}
