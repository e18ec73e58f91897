//! Recurring sequences of moments.
//!
//! A [`Period`] describes a start, an optional inclusive end, a [`Step`], an
//! optional recurrence cap and a chain of filters. Nothing is generated until
//! the period is iterated; every pass starts from `start` again with its own
//! cursor, so a period can be iterated any number of times.
//!
//! # Iteration
//!
//! Each pass examines positions `start`, `start + step`, `start + 2·step`, ...
//! and stops at the first position that is past `end`, or once `recurrences`
//! positions have been examined. Positions that fail any filter are skipped
//! but still count towards the recurrence cap. A pass never examines more
//! than [`Period::max_iterations`] positions
//! ([`DEFAULT_MAX_ITERATIONS`](crate::config::DEFAULT_MAX_ITERATIONS) unless
//! overridden); hitting that ceiling logs a warning and ends the pass.
//!
//! # Builders
//!
//! Builder methods (`until`, `days`, `filter`, ...) return a new period and
//! leave the receiver untouched, so partial chains can be reused:
//!
//! ```
//! use tempora::{Moment, Period};
//!
//! let start = Moment::from_ymd(2024, 1, 1).unwrap();
//! let end = Moment::from_ymd(2024, 1, 7).unwrap();
//! let week = Period::since(&start).until(&end);
//! let weekdays = week.filter_by("isWeekday").unwrap();
//!
//! assert_eq!(week.count(), 7);
//! assert_eq!(weekdays.count(), 5);
//! ```

use std::fmt;
use std::iter::FusedIterator;
use std::rc::Rc;
use std::str::FromStr;

use log::{debug, warn};

use crate::config::PeriodOptions;
use crate::error::{Result, TemporaError};
use crate::interval::Interval;
use crate::moment::Moment;
use crate::query::MomentQuery;
use crate::unit::CalendarUnit;

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// A positive quantity of one calendar unit, e.g. "2 days".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    magnitude: u32,
    unit: CalendarUnit,
}

impl Step {
    /// # Errors
    ///
    /// Returns [`TemporaError::InvalidStep`] when `magnitude` is zero.
    pub fn new(magnitude: u32, unit: CalendarUnit) -> Result<Step> {
        if magnitude == 0 {
            return Err(TemporaError::InvalidStep(format!(
                "step magnitude must be positive, got 0 {unit}"
            )));
        }
        Ok(Step { magnitude, unit })
    }

    pub fn magnitude(&self) -> u32 {
        self.magnitude
    }

    pub fn unit(&self) -> CalendarUnit {
        self.unit
    }

    /// This step as a nominal [`Interval`].
    pub fn interval(&self) -> Interval {
        Interval::of(i64::from(self.magnitude), self.unit)
    }

    fn advance(&self, moment: &Moment) -> Moment {
        moment.plus(i64::from(self.magnitude), self.unit)
    }
}

impl Default for Step {
    fn default() -> Self {
        Step {
            magnitude: 1,
            unit: CalendarUnit::Days,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.magnitude, self.unit)
    }
}

impl FromStr for Step {
    type Err = TemporaError;

    /// Parse `"<quantity> <unit>"`, e.g. `"1 day"`, `"2 weeks"`, `"3 Months"`.
    ///
    /// A missing or non-numeric quantity, a missing unit or a zero quantity
    /// is [`TemporaError::InvalidStep`]; an unknown unit is
    /// [`TemporaError::InvalidIntervalUnit`].
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        let (quantity, unit) = s
            .split_once(char::is_whitespace)
            .ok_or_else(|| TemporaError::InvalidStep(format!("'{s}' (expected \"<quantity> <unit>\")")))?;
        let magnitude = quantity
            .parse::<u32>()
            .map_err(|_| TemporaError::InvalidStep(format!("'{s}' (quantity must be a whole number)")))?;
        Step::new(magnitude, unit.parse()?)
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[derive(Clone)]
enum Filter {
    Predicate(Rc<dyn Fn(&Moment) -> bool>),
    Query(MomentQuery),
}

impl Filter {
    fn accepts(&self, moment: &Moment) -> bool {
        match self {
            Filter::Predicate(predicate) => predicate(moment),
            Filter::Query(query) => query.evaluate(moment),
        }
    }
}

impl fmt::Debug for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Predicate(_) => f.write_str("Predicate(..)"),
            Filter::Query(query) => write!(f, "Query({query})"),
        }
    }
}

// ---------------------------------------------------------------------------
// Period
// ---------------------------------------------------------------------------

/// A lazy, restartable sequence of moments.
#[derive(Debug, Clone)]
pub struct Period {
    start: Moment,
    end: Option<Moment>,
    step: Step,
    recurrences: Option<u32>,
    max_iterations: usize,
    filters: Vec<Filter>,
}

impl Default for Period {
    fn default() -> Self {
        Period::new(PeriodOptions::default())
    }
}

impl Period {
    // ── Construction ────────────────────────────────────────────────────

    pub fn new(options: PeriodOptions) -> Period {
        debug!(
            "period: start={} end={} step={} recurrences={:?} max_iterations={}",
            options.start,
            options
                .end
                .as_ref()
                .map_or_else(|| "none".to_string(), Moment::to_string),
            options.step,
            options.recurrences,
            options.max_iterations,
        );
        Period {
            start: options.start,
            end: options.end,
            step: options.step,
            recurrences: options.recurrences,
            max_iterations: options.max_iterations,
            filters: Vec::new(),
        }
    }

    /// Every day from `start` to `end`, both inclusive.
    pub fn create(start: &Moment, end: &Moment) -> Period {
        Period::new(PeriodOptions {
            start: start.clone(),
            end: Some(end.clone()),
            ..PeriodOptions::default()
        })
    }

    /// Every `step` (e.g. `"2 days"`) from `start` to `end`.
    ///
    /// # Errors
    ///
    /// Fails if `step` does not parse; see [`Step`]'s `FromStr`.
    pub fn create_with_step(start: &Moment, step: &str, end: &Moment) -> Result<Period> {
        Ok(Period::new(PeriodOptions {
            start: start.clone(),
            end: Some(end.clone()),
            step: step.parse()?,
            ..PeriodOptions::default()
        }))
    }

    pub fn between(start: &Moment, end: &Moment) -> Period {
        Period::create(start, end)
    }

    /// Daily from `start`, with no end.
    pub fn since(start: &Moment) -> Period {
        Period::new(PeriodOptions {
            start: start.clone(),
            ..PeriodOptions::default()
        })
    }

    /// Daily from now until `end`.
    pub fn up_to(end: &Moment) -> Period {
        Period::new(PeriodOptions {
            end: Some(end.clone()),
            ..PeriodOptions::default()
        })
    }

    pub fn up_to_now() -> Period {
        Period::up_to(&Moment::now())
    }

    // ── Builders ────────────────────────────────────────────────────────

    /// A copy starting at `start`.
    pub fn starting(&self, start: &Moment) -> Period {
        self.rebuild(|options| options.start = start.clone())
    }

    /// A copy ending (inclusively) at `end`.
    pub fn until(&self, end: &Moment) -> Period {
        self.rebuild(|options| options.end = Some(end.clone()))
    }

    pub fn until_now(&self) -> Period {
        self.until(&Moment::now())
    }

    /// A copy stepping by `magnitude` of `unit`.
    ///
    /// # Errors
    ///
    /// Returns [`TemporaError::InvalidStep`] when `magnitude` is zero.
    pub fn every(&self, magnitude: u32, unit: CalendarUnit) -> Result<Period> {
        let step = Step::new(magnitude, unit)?;
        Ok(self.rebuild(|options| options.step = step))
    }

    pub fn years(&self, magnitude: u32) -> Result<Period> {
        self.every(magnitude, CalendarUnit::Years)
    }

    pub fn months(&self, magnitude: u32) -> Result<Period> {
        self.every(magnitude, CalendarUnit::Months)
    }

    pub fn weeks(&self, magnitude: u32) -> Result<Period> {
        self.every(magnitude, CalendarUnit::Weeks)
    }

    pub fn days(&self, magnitude: u32) -> Result<Period> {
        self.every(magnitude, CalendarUnit::Days)
    }

    pub fn hours(&self, magnitude: u32) -> Result<Period> {
        self.every(magnitude, CalendarUnit::Hours)
    }

    pub fn minutes(&self, magnitude: u32) -> Result<Period> {
        self.every(magnitude, CalendarUnit::Minutes)
    }

    pub fn seconds(&self, magnitude: u32) -> Result<Period> {
        self.every(magnitude, CalendarUnit::Seconds)
    }

    /// A copy with at most `recurrences` positions examined per pass.
    pub fn with_recurrences(&self, recurrences: u32) -> Period {
        self.rebuild(|options| options.recurrences = Some(recurrences))
    }

    /// A copy with a different safety ceiling on positions examined per pass.
    pub fn with_max_iterations(&self, max_iterations: usize) -> Period {
        self.rebuild(|options| options.max_iterations = max_iterations)
    }

    /// A copy that only yields moments for which `predicate` returns true.
    pub fn filter<F>(&self, predicate: F) -> Period
    where
        F: Fn(&Moment) -> bool + 'static,
    {
        self.with_filter(Filter::Predicate(Rc::new(predicate)))
    }

    /// A copy filtered by a named boolean query on [`Moment`], such as
    /// `"isWeekday"` or `"is_leap_year"`.
    ///
    /// # Errors
    ///
    /// Fails immediately if the name does not resolve; see
    /// [`MomentQuery::resolve`].
    pub fn filter_by(&self, name: &str) -> Result<Period> {
        Ok(self.filter_query(MomentQuery::resolve(name)?))
    }

    pub fn filter_query(&self, query: MomentQuery) -> Period {
        self.with_filter(Filter::Query(query))
    }

    fn with_filter(&self, filter: Filter) -> Period {
        let mut period = self.clone();
        period.filters.push(filter);
        period
    }

    fn rebuild(&self, change: impl FnOnce(&mut PeriodOptions)) -> Period {
        let mut options = self.options();
        change(&mut options);
        let mut period = Period::new(options);
        period.filters = self.filters.clone();
        period
    }

    // ── In-place mutation ───────────────────────────────────────────────

    pub fn set_start(&mut self, start: Moment) -> &mut Self {
        self.start = start;
        self
    }

    pub fn set_end(&mut self, end: Moment) -> &mut Self {
        self.end = Some(end);
        self
    }

    pub fn set_recurrences(&mut self, recurrences: u32) -> &mut Self {
        self.recurrences = Some(recurrences);
        self
    }

    pub fn clear_filters(&mut self) -> &mut Self {
        self.filters.clear();
        self
    }

    pub fn add_filter<F>(&mut self, predicate: F) -> &mut Self
    where
        F: Fn(&Moment) -> bool + 'static,
    {
        self.filters.push(Filter::Predicate(Rc::new(predicate)));
        self
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn start(&self) -> &Moment {
        &self.start
    }

    pub fn end(&self) -> Option<&Moment> {
        self.end.as_ref()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn recurrences(&self) -> Option<u32> {
        self.recurrences
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn options(&self) -> PeriodOptions {
        PeriodOptions {
            start: self.start.clone(),
            end: self.end.clone(),
            step: self.step,
            recurrences: self.recurrences,
            max_iterations: self.max_iterations,
        }
    }

    // ── Materialisation ─────────────────────────────────────────────────

    pub fn iter(&self) -> PeriodIter<'_> {
        PeriodIter {
            period: self,
            cursor: self.start.clone(),
            count: 0,
            done: false,
        }
    }

    pub fn to_vec(&self) -> Vec<Moment> {
        self.iter().collect()
    }

    pub fn to_vec_reverse(&self) -> Vec<Moment> {
        let mut moments = self.to_vec();
        moments.reverse();
        moments
    }

    /// Number of moments one pass yields.
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// The start moment, whether or not it passes the filters.
    pub fn first(&self) -> Moment {
        self.start.clone()
    }

    /// The last yielded moment; if nothing is yielded, the end bound.
    pub fn last(&self) -> Option<Moment> {
        self.iter().last().or_else(|| self.end.clone())
    }

    fn is_valid_position(&self, cursor: &Moment, count: usize) -> bool {
        if let Some(limit) = self.recurrences {
            if count >= limit as usize {
                return false;
            }
        }
        match &self.end {
            Some(end) => cursor.epoch_millis() <= end.epoch_millis(),
            None => true,
        }
    }

    fn accepts(&self, moment: &Moment) -> bool {
        self.filters.iter().all(|filter| filter.accepts(moment))
    }
}

impl<'a> IntoIterator for &'a Period {
    type Item = Moment;
    type IntoIter = PeriodIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// One iteration pass over a [`Period`].
#[derive(Debug)]
pub struct PeriodIter<'a> {
    period: &'a Period,
    cursor: Moment,
    count: usize,
    done: bool,
}

impl Iterator for PeriodIter<'_> {
    type Item = Moment;

    fn next(&mut self) -> Option<Moment> {
        while !self.done {
            if !self.period.is_valid_position(&self.cursor, self.count) {
                self.done = true;
                break;
            }
            if self.count >= self.period.max_iterations {
                warn!(
                    "period iteration stopped at the safety ceiling of {} positions",
                    self.period.max_iterations
                );
                self.done = true;
                break;
            }

            let candidate = self
                .period
                .accepts(&self.cursor)
                .then(|| self.cursor.clone());
            self.cursor = self.period.step.advance(&self.cursor);
            self.count += 1;

            if candidate.is_some() {
                return candidate;
            }
        }
        None
    }
}

impl FusedIterator for PeriodIter<'_> {}
