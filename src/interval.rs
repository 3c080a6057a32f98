// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Half-open interval algebra.
//!
//! This module provides:
//! - [`Interval<T>`]: `[start, end)` over any [`TimeInstant`]
//! - [`complement_within`] / [`intersect_intervals`]: set operations over
//!   sorted, non-overlapping interval lists

use crate::error::{Result, TimeError};
use crate::instant::{Instant, TimeInstant};
use crate::period::{Period, Unit};
use crate::shift::Shift;
use chrono::{Datelike, TimeDelta};
use qtty::{Days, Seconds};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

const MILLIS_PER_SECOND: f64 = 1_000.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;
const MONTHS_PER_YEAR: i64 = 12;

/// Represents the span between two instants.
///
/// The start is inclusive and the end exclusive.  A zero-length interval is
/// legal and contains nothing.
///
/// # Examples
///
/// ```
/// use tempora::{Instant, Interval, Unit};
///
/// let start = Instant::from_utc_date(1986, 1, 1)?;
/// let end = Instant::from_utc_date(1990, 1, 1)?;
/// let interval = Interval::new(start, end)?;
///
/// assert!(interval.contains(&Instant::from_utc_date(1987, 6, 1)?));
/// assert!(!interval.contains(&end));
/// assert_eq!(interval.duration_in(Unit::Years), 4);
/// # Ok::<(), tempora::TimeError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interval<T: TimeInstant = Instant> {
    start: T,
    end: T,
}

impl<T: TimeInstant> Interval<T> {
    /// Creates an interval, failing with [`TimeError::InvalidInterval`] if
    /// `start` is after `end`.
    pub fn new(start: T, end: T) -> Result<Self> {
        if start > end {
            return Err(TimeError::invalid_interval(&start, &end));
        }
        Ok(Interval { start, end })
    }

    #[inline]
    pub fn start(&self) -> T {
        self.start
    }

    #[inline]
    pub fn end(&self) -> T {
        self.end
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Exact elapsed time from start to end.
    pub fn duration(&self) -> TimeDelta {
        TimeDelta::milliseconds(self.duration_millis())
    }

    #[inline]
    pub fn duration_millis(&self) -> i64 {
        self.end.difference(&self.start)
    }

    /// Returns the duration of the interval in days as a fractional quantity.
    ///
    /// # Examples
    ///
    /// ```
    /// use qtty::Days;
    /// use tempora::{Instant, Interval};
    ///
    /// let start = Instant::from_utc_fields(2024, 1, 1, 0, 0, 0, 0)?;
    /// let end = Instant::from_utc_fields(2024, 1, 2, 12, 0, 0, 0)?;
    /// assert_eq!(Interval::new(start, end)?.duration_days(), Days::new(1.5));
    /// # Ok::<(), tempora::TimeError>(())
    /// ```
    pub fn duration_days(&self) -> Days {
        Days::new(self.duration_millis() as f64 / MILLIS_PER_DAY)
    }

    /// Returns the duration in seconds as a fractional quantity.
    pub fn duration_seconds(&self) -> Seconds {
        Seconds::new(self.duration_millis() as f64 / MILLIS_PER_SECOND)
    }

    /// `start <= instant < end`.
    #[inline]
    pub fn contains(&self, instant: &T) -> bool {
        self.start <= *instant && *instant < self.end
    }

    /// `other` lies entirely inside `self`.  A zero-length `other` is
    /// inside when its position is.
    pub fn contains_interval(&self, other: &Self) -> bool {
        self.contains(&other.start) && other.end <= self.end
    }

    /// The two intervals share at least one instant.  Abutting intervals do
    /// not overlap, and neither does a zero-length interval.
    #[inline]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.intersection(other).is_some()
    }

    /// One interval ends exactly where the other starts.
    #[inline]
    pub fn abuts(&self, other: &Self) -> bool {
        self.end == other.start || other.end == self.start
    }

    /// Returns the overlapping sub-interval between `self` and `other`.
    ///
    /// If one interval ends exactly when the other starts, the intersection
    /// is empty and `None` is returned.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);

        if start < end {
            Some(Interval { start, end })
        } else {
            None
        }
    }

    /// The interval strictly between `self` and `other`, or `None` when they
    /// overlap or abut.
    pub fn gap(&self, other: &Self) -> Option<Self> {
        if self.end < other.start {
            Some(Interval {
                start: self.end,
                end: other.start,
            })
        } else if other.end < self.start {
            Some(Interval {
                start: other.end,
                end: self.start,
            })
        } else {
            None
        }
    }

    /// Whole `unit`s spanned by the interval, truncated toward zero.
    ///
    /// Years and months count calendar steps from the start: the result is
    /// the largest `n` with `start + n units <= end`, so month lengths and
    /// leap days are honoured.  Fixed units divide the exact span.
    pub fn duration_in(&self, unit: Unit) -> i64 {
        match unit.fixed_millis() {
            Some(len) => self.duration_millis() / len,
            None => self.calendar_steps(unit),
        }
    }

    fn calendar_steps(&self, unit: Unit) -> i64 {
        let from = self.start.to_utc();
        let to = self.end.to_utc();
        let months_apart = i64::from(to.year() - from.year()) * MONTHS_PER_YEAR
            + i64::from(to.month())
            - i64::from(from.month());
        let per_step = if unit == Unit::Years { MONTHS_PER_YEAR } else { 1 };

        // The UTC estimate can be one step off for zoned endpoints.  A step
        // past the representable range is past the end.
        let fits = |n: i64| {
            self.start
                .checked_plus(&Period::of(unit, n))
                .is_some_and(|t| t <= self.end)
        };
        let mut steps = (months_apart / per_step).max(0);
        while steps > 0 && !fits(steps) {
            steps -= 1;
        }
        while fits(steps + 1) {
            steps += 1;
        }
        steps
    }

    #[inline]
    pub fn in_years(&self) -> i64 {
        self.duration_in(Unit::Years)
    }

    #[inline]
    pub fn in_months(&self) -> i64 {
        self.duration_in(Unit::Months)
    }

    #[inline]
    pub fn in_weeks(&self) -> i64 {
        self.duration_in(Unit::Weeks)
    }

    #[inline]
    pub fn in_days(&self) -> i64 {
        self.duration_in(Unit::Days)
    }

    #[inline]
    pub fn in_hours(&self) -> i64 {
        self.duration_in(Unit::Hours)
    }

    #[inline]
    pub fn in_minutes(&self) -> i64 {
        self.duration_in(Unit::Minutes)
    }

    #[inline]
    pub fn in_seconds(&self) -> i64 {
        self.duration_in(Unit::Seconds)
    }

    #[inline]
    pub fn in_millis(&self) -> i64 {
        self.duration_in(Unit::Millis)
    }

    /// Same start, end moved by `periods` applied in order.
    #[inline]
    pub fn extend(&self, periods: &[Period]) -> Result<Self> {
        self.shift_by(periods)
    }
}

/// Shifting an interval keeps its start and moves its end.
impl<T: TimeInstant> Shift for Interval<T> {
    type Output = Result<Interval<T>>;

    fn checked_shift_by(&self, periods: &[Period]) -> Option<Self::Output> {
        let end = self.end.checked_shift_by(periods)?;
        Some(Interval::new(self.start, end))
    }
}

impl<T: TimeInstant> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl<T: TimeInstant + Serialize> Serialize for Interval<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("Interval", 2)?;
        s.serialize_field("start", &self.start)?;
        s.serialize_field("end", &self.end)?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, T: TimeInstant + Deserialize<'de>> Deserialize<'de> for Interval<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw<T> {
            start: T,
            end: T,
        }

        let raw = Raw::<T>::deserialize(deserializer)?;
        Interval::new(raw.start, raw.end).map_err(serde::de::Error::custom)
    }
}

/// Returns the gaps (complement) of `intervals` within the bounding `outer`
/// interval.
///
/// Given a sorted, non-overlapping list of sub-intervals, this returns the
/// spans of `outer` NOT covered by any of them, in a single O(n) pass.
pub fn complement_within<T: TimeInstant>(
    outer: Interval<T>,
    intervals: &[Interval<T>],
) -> Vec<Interval<T>> {
    let mut gaps = Vec::new();
    // Never before `outer.start`: it only moves forward from there.
    let mut cursor = outer.start;
    for i in intervals {
        if i.start >= outer.end {
            break;
        }
        if i.start > cursor {
            gaps.push(Interval {
                start: cursor,
                end: i.start,
            });
        }
        if i.end > cursor {
            cursor = i.end;
        }
    }
    if cursor < outer.end {
        gaps.push(Interval {
            start: cursor,
            end: outer.end,
        });
    }
    gaps
}

/// Returns the intersection of two sorted, non-overlapping interval lists.
///
/// Uses an O(n+m) merge to find every overlapping span, in chronological
/// order.
pub fn intersect_intervals<T: TimeInstant>(
    a: &[Interval<T>],
    b: &[Interval<T>],
) -> Vec<Interval<T>> {
    let mut result = Vec::new();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        if let Some(overlap) = a[i].intersection(&b[j]) {
            result.push(overlap);
        }
        if a[i].end <= b[j].end {
            i += 1;
        } else {
            j += 1;
        }
    }
    result
}
