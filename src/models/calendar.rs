//! Study calendar models.
//!
//! Defines which calendar dates count as study days: a weekly set of
//! study weekdays, minus break intervals (vacations, holidays).
//!
//! # Date Model
//! All dates are `chrono::NaiveDate` (calendar dates without time zone).
//! The consumer decides which local date "today" is.
//!
//! # Precedence
//! Breaks override weekdays. A date is a study day iff:
//! - Its weekday is in `study_days`, AND
//! - It does NOT fall within any `breaks` entry (bounds inclusive).
//!
//! Overlapping breaks are allowed and behave like their union.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{CurriculumError, Result};

const ALL_WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// A set of weekdays on which study happens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct StudyDays {
    mask: u8,
}

impl StudyDays {
    /// The empty set (no study days).
    pub fn none() -> Self {
        Self::default()
    }

    /// Monday through Friday.
    pub fn weekdays() -> Self {
        Self::from_days(&ALL_WEEKDAYS[..5])
    }

    /// Builds a set from a list of weekdays.
    pub fn from_days(days: &[Weekday]) -> Self {
        days.iter().fold(Self::none(), |set, &d| set.with(d))
    }

    /// Adds a weekday.
    pub fn with(mut self, day: Weekday) -> Self {
        self.mask |= 1 << day.num_days_from_monday();
        self
    }

    /// Whether the set contains a weekday.
    #[inline]
    pub fn contains(&self, day: Weekday) -> bool {
        self.mask & (1 << day.num_days_from_monday()) != 0
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Number of study weekdays per week.
    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    /// Weekdays in Monday-first order.
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        ALL_WEEKDAYS.iter().copied().filter(|d| self.contains(*d))
    }

    /// Parses a stored weekday list, rejecting anything malformed.
    ///
    /// Accepts JSON-style lists with either quote style, e.g.
    /// `["mon","wed"]` or `['mon', 'wed']`.
    pub fn parse_strict(raw: &str) -> Result<Self> {
        let codes: Vec<String> = serde_json::from_str(&normalize_quotes(raw))?;
        codes.iter().try_fold(Self::none(), |set, code| {
            let day = Weekday::from_str(code.trim())
                .map_err(|_| CurriculumError::InvalidWeekday(code.clone()))?;
            Ok::<_, CurriculumError>(set.with(day))
        })
    }

    /// Parses a stored weekday list, degrading to the empty set.
    ///
    /// Unknown codes inside an otherwise valid list are skipped.
    pub fn parse_lenient(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::none();
        }
        match serde_json::from_str::<Vec<String>>(&normalize_quotes(raw)) {
            Ok(codes) => Self::from_codes_lenient(&codes),
            Err(e) => {
                tracing::warn!(raw, error = %e, "unparseable study days, using none");
                Self::none()
            }
        }
    }

    fn from_codes_lenient(codes: &[String]) -> Self {
        codes.iter().fold(Self::none(), |set, code| {
            match Weekday::from_str(code.trim()) {
                Ok(day) => set.with(day),
                Err(_) => {
                    tracing::warn!(code = %code, "unknown weekday code, skipping");
                    set
                }
            }
        })
    }
}

fn normalize_quotes(raw: &str) -> String {
    raw.trim().replace('\'', "\"")
}

fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

impl fmt::Display for StudyDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codes: Vec<&str> = self.iter().map(weekday_code).collect();
        write!(f, "{}", codes.join(","))
    }
}

impl Serialize for StudyDays {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(weekday_code))
    }
}

/// Stored shapes of a study-day list.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawStudyDays {
    List(Vec<String>),
    Text(String),
    Other(serde_json::Value),
}

impl<'de> Deserialize<'de> for StudyDays {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Ok(match RawStudyDays::deserialize(deserializer)? {
            RawStudyDays::List(codes) => Self::from_codes_lenient(&codes),
            RawStudyDays::Text(raw) => Self::parse_lenient(&raw),
            RawStudyDays::Other(value) => {
                tracing::warn!(%value, "unexpected study days shape, using none");
                Self::none()
            }
        })
    }
}

/// An inclusive calendar-date interval with no study.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BreakPeriod {
    /// First day of the break (inclusive).
    pub start_date: NaiveDate,
    /// Last day of the break (inclusive).
    pub end_date: NaiveDate,
}

impl BreakPeriod {
    /// Creates a break interval.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// Whether a date falls within this break. An inverted interval contains nothing.
    #[inline]
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Whether `end_date` precedes `start_date`.
    pub fn is_inverted(&self) -> bool {
        self.end_date < self.start_date
    }
}

/// Study-day calendar: weekly study days minus breaks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyCalendar {
    /// Weekdays on which study happens. Missing means none.
    #[serde(default)]
    pub study_days: StudyDays,
    /// Periods without study (override `study_days`).
    #[serde(default)]
    pub breaks: Vec<BreakPeriod>,
}

impl StudyCalendar {
    /// Creates a calendar without breaks.
    pub fn new(study_days: StudyDays) -> Self {
        Self {
            study_days,
            breaks: Vec::new(),
        }
    }

    /// Adds a break.
    pub fn with_break(mut self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        self.breaks.push(BreakPeriod::new(start_date, end_date));
        self
    }

    /// Whether the date's weekday is a study weekday.
    #[inline]
    pub fn is_study_weekday(&self, date: NaiveDate) -> bool {
        self.study_days.contains(date.weekday())
    }

    /// Whether the date falls inside any break.
    #[inline]
    pub fn is_in_break(&self, date: NaiveDate) -> bool {
        self.breaks.iter().any(|b| b.contains(date))
    }

    /// Whether the date is a study day.
    pub fn is_study_day(&self, date: NaiveDate) -> bool {
        self.is_study_weekday(date) && !self.is_in_break(date)
    }

    /// Number of study days in `[from, to]`.
    pub fn study_days_between(&self, from: NaiveDate, to: NaiveDate) -> u32 {
        if to < from {
            return 0;
        }
        from.iter_days()
            .take_while(|d| *d <= to)
            .filter(|d| self.is_study_day(*d))
            .count() as u32
    }

    /// 1-based study-day ordinal of `date` counted from `start`.
    ///
    /// Returns `None` if `date` precedes `start` or is not a study day.
    pub fn study_day_index(&self, start: NaiveDate, date: NaiveDate) -> Option<u32> {
        if date < start || !self.is_study_day(date) {
            return None;
        }
        Some(self.study_days_between(start, date))
    }

    /// The first study day at or after `from`.
    ///
    /// At most `lookahead` non-study weekdays are stepped over; break days
    /// are skipped without consuming the lookahead. The whole scan is
    /// capped at `max_scan_days` calendar days.
    pub fn next_study_day(
        &self,
        from: NaiveDate,
        lookahead: u32,
        max_scan_days: u32,
    ) -> Option<NaiveDate> {
        let mut misses = 0;
        for date in from.iter_days().take(max_scan_days as usize + 1) {
            if self.is_in_break(date) {
                continue;
            }
            if self.is_study_weekday(date) {
                return Some(date);
            }
            misses += 1;
            if misses > lookahead {
                return None;
            }
        }
        None
    }

    /// Date of the `n`-th study day counted from `start` (1-based).
    ///
    /// Returns `None` for `n == 0` or when not reached within `max_scan_days`.
    pub fn nth_study_day(&self, start: NaiveDate, n: u32, max_scan_days: u32) -> Option<NaiveDate> {
        if n == 0 {
            return None;
        }
        start
            .iter_days()
            .take(max_scan_days as usize + 1)
            .filter(|d| self.is_study_day(*d))
            .nth(n as usize - 1)
    }

    /// Latest start date whose `n`-th study day is `anchor`.
    ///
    /// Walks backward from `anchor` (which must itself be a study day)
    /// counting study days. Returns `None` for `n == 0`, a non-study
    /// anchor, or when `n` study days are not found within `max_back_days`.
    pub fn start_for_ordinal(
        &self,
        anchor: NaiveDate,
        n: u32,
        max_back_days: u32,
    ) -> Option<NaiveDate> {
        if n == 0 || !self.is_study_day(anchor) {
            return None;
        }
        let mut count = 0;
        let mut date = anchor;
        for _ in 0..=max_back_days {
            if self.is_study_day(date) {
                count += 1;
                if count == n {
                    return Some(date);
                }
            }
            date = date.checked_sub_days(Days::new(1))?;
        }
        None
    }
}
