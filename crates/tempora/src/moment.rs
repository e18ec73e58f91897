//! Point-in-time values.
//!
//! A [`Moment`] is an absolute instant tagged with an IANA timezone and a
//! [`Locale`]. Calendar fields are read in the moment's own timezone.
//!
//! # Arithmetic
//!
//! - Year, month and day arithmetic works on local wall-clock fields. A
//!   day-of-month that does not exist in the target month carries forward
//!   into the next one: Jan 31 + 1 month is Mar 3 in a common year, and
//!   Feb 29 + 1 year is Mar 1.
//! - Hour, minute, second and millisecond arithmetic works on the instant,
//!   so it is unaffected by DST transitions.
//!
//! The `add_*` methods mutate in place and return `&mut Self` for chaining;
//! [`Moment::plus`], [`Moment::add_interval`] and [`Moment::sub_interval`]
//! return new values.

use std::fmt;

use chrono::{
    DateTime, Datelike, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Timelike, Utc, Weekday,
};
use chrono_tz::Tz;
use log::warn;
use serde::{Serialize, Serializer};

use crate::config::{default_locale, default_timezone, parse_timezone};
use crate::error::{Result, TemporaError};
use crate::interval::Interval;
use crate::locale::{Locale, Translation};
use crate::unit::CalendarUnit;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Average Gregorian month length used by [`Moment::diff_for_humans`].
const AVERAGE_MONTH_DAYS: f64 = 30.436875;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Moment {
    dt: DateTime<Tz>,
    locale: Locale,
}

impl Moment {
    // ── Construction ────────────────────────────────────────────────────

    /// The current instant in the default timezone.
    pub fn now() -> Self {
        Self::now_in(default_timezone())
    }

    pub fn now_in(tz: Tz) -> Self {
        Self::from_datetime(Utc::now().with_timezone(&tz))
    }

    /// Wrap an existing `chrono` datetime, using the default locale.
    pub fn from_datetime(dt: DateTime<Tz>) -> Self {
        Self {
            dt,
            locale: default_locale(),
        }
    }

    /// Local midnight of the given date in the default timezone.
    ///
    /// # Errors
    ///
    /// Returns [`TemporaError::InvalidDatetime`] if the fields do not form a
    /// valid calendar date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        Self::from_ymd_hms(year, month, day, 0, 0, 0)
    }

    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> Result<Self> {
        Self::from_ymd_hms_in(year, month, day, hour, minute, second, default_timezone())
    }

    pub fn from_ymd_hms_in(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        tz: Tz,
    ) -> Result<Self> {
        let naive = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, second))
            .ok_or_else(|| {
                TemporaError::InvalidDatetime(format!(
                    "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02} is not a valid date"
                ))
            })?;
        resolve_local(tz, naive)
            .map(Self::from_datetime)
            .ok_or_else(|| {
                TemporaError::InvalidDatetime(format!("{naive} does not exist in {tz}"))
            })
    }

    /// The instant `ms` milliseconds after the Unix epoch, viewed in `tz`.
    pub fn from_epoch_millis(ms: i64, tz: Tz) -> Result<Self> {
        DateTime::from_timestamp_millis(ms)
            .map(|dt| Self::from_datetime(dt.with_timezone(&tz)))
            .ok_or_else(|| TemporaError::InvalidDatetime(format!("{ms}ms is out of range")))
    }

    /// The instant `secs` seconds after the Unix epoch, in the default timezone.
    pub fn from_timestamp(secs: i64) -> Result<Self> {
        DateTime::from_timestamp(secs, 0)
            .map(|dt| Self::from_datetime(dt.with_timezone(&default_timezone())))
            .ok_or_else(|| TemporaError::InvalidDatetime(format!("{secs}s is out of range")))
    }

    /// Parse a date or datetime string.
    ///
    /// Accepts RFC 3339 (`2026-03-15T14:00:00Z`), a local datetime without
    /// offset (`2026-03-15T14:00:00` or `2026-03-15 14:00:00`) and a plain
    /// ISO date (`2026-03-15`, local midnight). Local forms are interpreted
    /// in the default timezone.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let tz = default_timezone();

        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::from_datetime(dt.with_timezone(&tz)));
        }

        let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
            .ok()
            .or_else(|| {
                NaiveDate::parse_from_str(s, "%Y-%m-%d")
                    .ok()
                    .map(|date| date.and_time(NaiveTime::MIN))
            })
            .ok_or_else(|| TemporaError::InvalidDatetime(format!("'{s}'")))?;

        resolve_local(tz, naive)
            .map(Self::from_datetime)
            .ok_or_else(|| TemporaError::InvalidDatetime(format!("'{s}' does not exist in {tz}")))
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn set_locale(&mut self, locale: Locale) -> &mut Self {
        self.locale = locale;
        self
    }

    // ── Field reads ─────────────────────────────────────────────────────

    pub fn year(&self) -> i32 {
        self.dt.year()
    }

    /// Month of the year, 1-based.
    pub fn month(&self) -> u32 {
        self.dt.month()
    }

    /// Day of the month, 1-based.
    pub fn day(&self) -> u32 {
        self.dt.day()
    }

    pub fn hour(&self) -> u32 {
        self.dt.hour()
    }

    pub fn minute(&self) -> u32 {
        self.dt.minute()
    }

    pub fn second(&self) -> u32 {
        self.dt.second()
    }

    pub fn millisecond(&self) -> u32 {
        self.dt.timestamp_subsec_millis()
    }

    pub fn weekday(&self) -> Weekday {
        self.dt.weekday()
    }

    pub fn epoch_millis(&self) -> i64 {
        self.dt.timestamp_millis()
    }

    pub fn timezone(&self) -> Tz {
        self.dt.timezone()
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn as_datetime(&self) -> &DateTime<Tz> {
        &self.dt
    }

    /// The UTC offset at this instant, e.g. `"-05:00"`.
    pub fn timezone_offset(&self) -> String {
        format_utc_offset(&self.dt)
    }

    // ── Calendar arithmetic ─────────────────────────────────────────────

    pub fn add_years(&mut self, years: i64) -> &mut Self {
        self.shift_date(|date| {
            carry_date(i64::from(date.year()) + years, i64::from(date.month0()), i64::from(date.day()))
        })
    }

    pub fn add_months(&mut self, months: i64) -> &mut Self {
        self.shift_date(|date| {
            carry_date(
                i64::from(date.year()),
                i64::from(date.month0()) + months,
                i64::from(date.day()),
            )
        })
    }

    pub fn add_days(&mut self, days: i64) -> &mut Self {
        self.shift_date(|date| date.checked_add_signed(Duration::try_days(days)?))
    }

    pub fn add_hours(&mut self, hours: i64) -> &mut Self {
        self.shift_instant(Duration::try_hours(hours))
    }

    pub fn add_minutes(&mut self, minutes: i64) -> &mut Self {
        self.shift_instant(Duration::try_minutes(minutes))
    }

    pub fn add_seconds(&mut self, seconds: i64) -> &mut Self {
        self.shift_instant(Duration::try_seconds(seconds))
    }

    pub fn add_milliseconds(&mut self, milliseconds: i64) -> &mut Self {
        self.shift_instant(Duration::try_milliseconds(milliseconds))
    }

    pub fn sub_days(&mut self, days: i64) -> &mut Self {
        self.add_days(-days)
    }

    pub fn sub_months(&mut self, months: i64) -> &mut Self {
        self.add_months(-months)
    }

    pub fn sub_years(&mut self, years: i64) -> &mut Self {
        self.add_years(-years)
    }

    /// Add `amount` of `unit` in place.
    pub fn add(&mut self, amount: i64, unit: CalendarUnit) -> &mut Self {
        let (amount, unit) = unit.canonical(amount);
        match unit {
            CalendarUnit::Years => self.add_years(amount),
            CalendarUnit::Months => self.add_months(amount),
            CalendarUnit::Weeks | CalendarUnit::Days => self.add_days(amount),
            CalendarUnit::Hours => self.add_hours(amount),
            CalendarUnit::Minutes => self.add_minutes(amount),
            CalendarUnit::Seconds => self.add_seconds(amount),
        }
    }

    /// A copy of this moment advanced by `amount` of `unit`.
    pub fn plus(&self, amount: i64, unit: CalendarUnit) -> Moment {
        let mut next = self.clone();
        next.add(amount, unit);
        next
    }

    /// A copy of this moment advanced by every field of `interval`.
    pub fn add_interval(&self, interval: &Interval) -> Moment {
        let mut result = self.clone();
        result
            .add_years(interval.years())
            .add_months(interval.months())
            .add_days(interval.days())
            .add_hours(interval.hours())
            .add_minutes(interval.minutes())
            .add_seconds(interval.seconds())
            .add_milliseconds(interval.milliseconds());
        result
    }

    /// A copy of this moment moved back by every field of `interval`.
    pub fn sub_interval(&self, interval: &Interval) -> Moment {
        let mut result = self.clone();
        result
            .add_years(-interval.years())
            .add_months(-interval.months())
            .add_days(-interval.days())
            .add_hours(-interval.hours())
            .add_minutes(-interval.minutes())
            .add_seconds(-interval.seconds())
            .add_milliseconds(-interval.milliseconds());
        result
    }

    // ── Setters ─────────────────────────────────────────────────────────

    pub fn set_year(&mut self, year: i32) -> &mut Self {
        self.shift_date(|date| {
            carry_date(i64::from(year), i64::from(date.month0()), i64::from(date.day()))
        })
    }

    /// Set the 1-based month, carrying an out-of-range day forward.
    pub fn set_month(&mut self, month: i64) -> &mut Self {
        self.shift_date(|date| carry_date(i64::from(date.year()), month - 1, i64::from(date.day())))
    }

    /// Set the day of the month. Zero is the last day of the previous month
    /// and values past the month's end carry forward.
    pub fn set_day(&mut self, day: i64) -> &mut Self {
        self.shift_date(|date| carry_date(i64::from(date.year()), i64::from(date.month0()), day))
    }

    // ── Differences ─────────────────────────────────────────────────────

    /// The interval from this moment to `other`.
    ///
    /// Both sides are read as wall-clock time in their own timezone, so the
    /// result counts calendar days rather than elapsed 24-hour blocks.
    pub fn diff(&self, other: &Moment, absolute: bool) -> Interval {
        Interval::from_difference(&self.wall_clock_utc(), &other.wall_clock_utc(), absolute)
    }

    /// Whole 24-hour blocks from `other` to this moment, truncated toward zero.
    pub fn diff_in_days(&self, other: &Moment) -> i64 {
        (self.epoch_millis() - other.epoch_millis()) / MILLIS_PER_DAY
    }

    pub fn diff_in_months(&self, other: &Moment) -> i64 {
        let years = i64::from(self.year()) - i64::from(other.year());
        let months = i64::from(self.month()) - i64::from(other.month());
        years * 12 + months
    }

    pub fn diff_in_years(&self, other: &Moment) -> i64 {
        self.diff_in_months(other) / 12
    }

    pub fn is_before(&self, other: &Moment) -> bool {
        self.dt < other.dt
    }

    pub fn is_after(&self, other: &Moment) -> bool {
        self.dt > other.dt
    }

    pub fn is_same_day(&self, other: &Moment) -> bool {
        self.dt.date_naive() == other.dt.date_naive()
    }

    pub fn is_same_timezone(&self, other: &Moment) -> bool {
        self.timezone() == other.timezone()
    }

    // ── Predicates ──────────────────────────────────────────────────────

    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    pub fn is_weekday(&self) -> bool {
        !self.is_weekend()
    }

    pub fn is_today(&self) -> bool {
        self.is_same_day(&Moment::now_in(self.timezone()))
    }

    pub fn is_tomorrow(&self) -> bool {
        let mut tomorrow = Moment::now_in(self.timezone());
        tomorrow.add_days(1);
        self.is_same_day(&tomorrow)
    }

    pub fn is_yesterday(&self) -> bool {
        let mut yesterday = Moment::now_in(self.timezone());
        yesterday.add_days(-1);
        self.is_same_day(&yesterday)
    }

    pub fn is_past(&self) -> bool {
        self.dt < Utc::now()
    }

    pub fn is_future(&self) -> bool {
        self.dt > Utc::now()
    }

    pub fn is_leap_year(&self) -> bool {
        NaiveDate::from_ymd_opt(self.year(), 2, 29).is_some()
    }

    /// Whether daylight saving time is in effect at this instant.
    ///
    /// A zone observes DST in a given year when its January and July offsets
    /// differ; DST is active when the current offset is the larger of the two.
    pub fn is_dst(&self) -> bool {
        let tz = self.timezone();
        let year = self.year();
        let offset_at = |month: u32| {
            Utc.with_ymd_and_hms(year, month, 1, 12, 0, 0)
                .single()
                .map(|dt| dt.with_timezone(&tz).offset().fix().local_minus_utc())
        };
        let (Some(january), Some(july)) = (offset_at(1), offset_at(7)) else {
            return false;
        };
        let current = self.dt.offset().fix().local_minus_utc();
        january != july && current == january.max(july)
    }

    pub fn is_monday(&self) -> bool {
        self.weekday() == Weekday::Mon
    }

    pub fn is_tuesday(&self) -> bool {
        self.weekday() == Weekday::Tue
    }

    pub fn is_wednesday(&self) -> bool {
        self.weekday() == Weekday::Wed
    }

    pub fn is_thursday(&self) -> bool {
        self.weekday() == Weekday::Thu
    }

    pub fn is_friday(&self) -> bool {
        self.weekday() == Weekday::Fri
    }

    pub fn is_saturday(&self) -> bool {
        self.weekday() == Weekday::Sat
    }

    pub fn is_sunday(&self) -> bool {
        self.weekday() == Weekday::Sun
    }

    // ── Boundaries ──────────────────────────────────────────────────────

    pub fn start_of_day(&mut self) -> &mut Self {
        self.set_wall_clock(self.dt.date_naive(), NaiveTime::MIN)
    }

    /// Monday 00:00 of the current ISO week.
    pub fn start_of_week(&mut self) -> &mut Self {
        let back = i64::from(self.weekday().num_days_from_monday());
        self.add_days(-back).start_of_day()
    }

    /// Sunday 23:59:59.999 of the current ISO week.
    pub fn end_of_week(&mut self) -> &mut Self {
        let ahead = 6 - i64::from(self.weekday().num_days_from_monday());
        self.add_days(ahead);
        self.set_wall_clock(self.dt.date_naive(), end_of_day_time())
    }

    pub fn start_of_month(&mut self) -> &mut Self {
        let first = self.dt.date_naive().with_day(1);
        match first {
            Some(date) => self.set_wall_clock(date, NaiveTime::MIN),
            None => self,
        }
    }

    pub fn end_of_month(&mut self) -> &mut Self {
        let date = self.dt.date_naive();
        let last = carry_date(i64::from(date.year()), i64::from(date.month0()) + 1, 0);
        match last {
            Some(date) => self.set_wall_clock(date, end_of_day_time()),
            None => self,
        }
    }

    pub fn start_of_year(&mut self) -> &mut Self {
        match NaiveDate::from_ymd_opt(self.year(), 1, 1) {
            Some(date) => self.set_wall_clock(date, NaiveTime::MIN),
            None => self,
        }
    }

    pub fn end_of_year(&mut self) -> &mut Self {
        match NaiveDate::from_ymd_opt(self.year(), 12, 31) {
            Some(date) => self.set_wall_clock(date, end_of_day_time()),
            None => self,
        }
    }

    /// Move forward to the next `weekday`, staying put if today already is one.
    pub fn next(&mut self, weekday: Weekday) -> &mut Self {
        let current = i64::from(self.weekday().num_days_from_sunday());
        let target = i64::from(weekday.num_days_from_sunday());
        self.add_days((target - current + 7) % 7)
    }

    /// Move back to the previous `weekday`, staying put if today already is one.
    pub fn previous(&mut self, weekday: Weekday) -> &mut Self {
        let current = i64::from(self.weekday().num_days_from_sunday());
        let target = i64::from(weekday.num_days_from_sunday());
        self.add_days(-((current - target + 7) % 7))
    }

    // ── Timezone ────────────────────────────────────────────────────────

    /// Re-tag this moment with another timezone, keeping the instant.
    pub fn set_timezone(&mut self, name: &str) -> Result<&mut Self> {
        let tz = parse_timezone(name)?;
        self.dt = self.dt.with_timezone(&tz);
        Ok(self)
    }

    pub fn in_timezone(&self, name: &str) -> Result<Moment> {
        let mut moment = self.clone();
        moment.set_timezone(name)?;
        Ok(moment)
    }

    pub fn utc(&self) -> Moment {
        Moment {
            dt: self.dt.with_timezone(&chrono_tz::UTC),
            locale: self.locale,
        }
    }

    // ── Presentation ────────────────────────────────────────────────────

    pub fn month_name(&self) -> &'static str {
        self.translation().months_long[self.dt.month0() as usize]
    }

    pub fn short_month_name(&self) -> &'static str {
        self.translation().months_short[self.dt.month0() as usize]
    }

    pub fn day_name(&self) -> &'static str {
        self.translation().days_long[self.weekday().num_days_from_sunday() as usize]
    }

    pub fn short_day_name(&self) -> &'static str {
        self.translation().days_short[self.weekday().num_days_from_sunday() as usize]
    }

    /// Render with `YYYY MM DD HH mm ss` tokens; other text is copied through.
    pub fn format(&self, pattern: &str) -> String {
        self.render(pattern, false)
    }

    /// Like [`Moment::format`], additionally expanding `MMMM` (month name),
    /// `MMM` (short month name), `dddd` (weekday name) and `ddd` (short
    /// weekday name) from the moment's locale.
    pub fn localized_format(&self, pattern: &str) -> String {
        self.render(pattern, true)
    }

    pub fn to_date_string(&self) -> String {
        self.format("YYYY-MM-DD")
    }

    pub fn to_time_string(&self) -> String {
        self.format("HH:mm:ss")
    }

    pub fn to_rfc3339(&self) -> String {
        self.dt.to_rfc3339()
    }

    /// Relative description of this moment as seen from `other`,
    /// e.g. `"in 3 days"` or `"2 months ago"`.
    ///
    /// Each unit is rounded to the nearest whole value of the next smaller
    /// one, with months averaging 30.436875 days.
    pub fn diff_for_humans(&self, other: &Moment) -> String {
        let diff_ms = self.epoch_millis() - other.epoch_millis();
        let abs = diff_ms.unsigned_abs() as f64;
        let seconds = (abs / 1000.0).round();
        let minutes = (seconds / 60.0).round();
        let hours = (minutes / 60.0).round();
        let days = (hours / 24.0).round();
        let months = (days / AVERAGE_MONTH_DAYS).round();
        let years = (months / 12.0).round();

        let t = &self.translation().relative;
        let value = if years > 0.0 {
            t.amount(t.year, t.years, years as i64)
        } else if months > 0.0 {
            t.amount(t.month, t.months, months as i64)
        } else if days > 0.0 {
            t.amount(t.day, t.days, days as i64)
        } else if hours > 0.0 {
            t.amount(t.hour, t.hours, hours as i64)
        } else if minutes > 0.0 {
            t.amount(t.minute, t.minutes, minutes as i64)
        } else {
            t.few_seconds.to_string()
        };
        t.wrap(&value, diff_ms <= 0)
    }

    // ── Internal helpers ────────────────────────────────────────────────

    fn translation(&self) -> &'static Translation {
        self.locale.translation()
    }

    /// The local wall-clock reading of this moment, re-read as UTC.
    fn wall_clock_utc(&self) -> Moment {
        Moment {
            dt: chrono_tz::UTC.from_utc_datetime(&self.dt.naive_local()),
            locale: self.locale,
        }
    }

    fn shift_date(&mut self, f: impl FnOnce(NaiveDate) -> Option<NaiveDate>) -> &mut Self {
        let local = self.dt.naive_local();
        match f(local.date()) {
            Some(date) => self.set_wall_clock(date, local.time()),
            None => {
                warn!("calendar shift of {} leaves the representable range; skipped", self.dt);
                self
            }
        }
    }

    fn shift_instant(&mut self, delta: Option<Duration>) -> &mut Self {
        match delta.and_then(|delta| self.dt.checked_add_signed(delta)) {
            Some(dt) => self.dt = dt,
            None => warn!("time shift of {} leaves the representable range; skipped", self.dt),
        }
        self
    }

    fn set_wall_clock(&mut self, date: NaiveDate, time: NaiveTime) -> &mut Self {
        match resolve_local(self.timezone(), date.and_time(time)) {
            Some(dt) => self.dt = dt,
            None => warn!("{date} {time} cannot be resolved in {}; skipped", self.timezone()),
        }
        self
    }

    fn render(&self, pattern: &str, localized: bool) -> String {
        let mut out = String::with_capacity(pattern.len() + 8);
        let mut rest = pattern;
        while let Some(ch) = rest.chars().next() {
            if localized {
                if let Some(tail) = rest.strip_prefix("MMMM") {
                    out.push_str(self.month_name());
                    rest = tail;
                    continue;
                }
                if let Some(tail) = rest.strip_prefix("MMM") {
                    out.push_str(self.short_month_name());
                    rest = tail;
                    continue;
                }
                if let Some(tail) = rest.strip_prefix("dddd") {
                    out.push_str(self.day_name());
                    rest = tail;
                    continue;
                }
                if let Some(tail) = rest.strip_prefix("ddd") {
                    out.push_str(self.short_day_name());
                    rest = tail;
                    continue;
                }
            }
            let token = [
                ("YYYY", format!("{:04}", self.year())),
                ("MM", format!("{:02}", self.month())),
                ("DD", format!("{:02}", self.day())),
                ("HH", format!("{:02}", self.hour())),
                ("mm", format!("{:02}", self.minute())),
                ("ss", format!("{:02}", self.second())),
            ]
            .into_iter()
            .find(|(token, _)| rest.starts_with(token));
            match token {
                Some((token, value)) => {
                    out.push_str(&value);
                    rest = &rest[token.len()..];
                }
                None => {
                    out.push(ch);
                    rest = &rest[ch.len_utf8()..];
                }
            }
        }
        out
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl Serialize for Moment {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_rfc3339())
    }
}

/// Build a date from a year, a 0-based month that may fall outside `0..12`,
/// and a 1-based day that may fall outside the month; excess carries over.
fn carry_date(year: i64, month0: i64, day: i64) -> Option<NaiveDate> {
    let months = year.checked_mul(12)?.checked_add(month0)?;
    let year = i32::try_from(months.div_euclid(12)).ok()?;
    let month = u32::try_from(months.rem_euclid(12) + 1).ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)?.checked_add_signed(Duration::try_days(day - 1)?)
}

/// Resolve a local wall-clock time in `tz`.
///
/// Ambiguous times (DST fall-back) take the earliest instant. Times inside
/// a DST gap move forward by one hour, past the gap.
fn resolve_local(tz: Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => tz
            .from_local_datetime(&naive.checked_add_signed(Duration::try_hours(1)?)?)
            .earliest(),
    }
}

fn end_of_day_time() -> NaiveTime {
    NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN)
}

/// Format the UTC offset as a string (e.g., "-05:00", "+09:00").
fn format_utc_offset<T: TimeZone>(dt: &DateTime<T>) -> String {
    let offset_secs = dt.offset().fix().local_minus_utc();
    let sign = if offset_secs >= 0 { "+" } else { "-" };
    let abs_secs = offset_secs.unsigned_abs();
    let hours = abs_secs / 3600;
    let minutes = (abs_secs % 3600) / 60;
    format!("{sign}{hours:02}:{minutes:02}")
}
