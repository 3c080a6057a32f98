// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar-relative signed offsets.
//!
//! A [`Period`] is **not** a fixed duration: `1 month` spans 28 to 31 days
//! depending on where it is applied.  Years and months are calendar units;
//! weeks, days, hours, minutes, seconds and milliseconds always denote the
//! same physical length.
//!
//! ```
//! use tempora::{Period, Unit};
//!
//! let p = Period::new().months(1).weeks(3);
//! assert_eq!(p.get(Unit::Months), 1);
//! assert_eq!(p.get(Unit::Weeks), 3);
//! assert!(!p.is_fixed_length());
//! assert_eq!(Period::of(Unit::Days, 2), Period::new().days(2));
//! ```

use chrono::TimeDelta;
use std::fmt;
use std::ops::{Add, Neg, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;
const MILLIS_PER_WEEK: i64 = 7 * MILLIS_PER_DAY;
const DAYS_PER_WEEK: i64 = 7;

const COMPONENT_OVERFLOW: &str = "period component overflows i64";

/// A component of a [`Period`], also the unit accepted by
/// [`Interval::duration_in`](crate::Interval::duration_in).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Unit {
    Years,
    Months,
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
    Millis,
}

impl Unit {
    /// Every unit, largest first.
    pub const ALL: [Unit; 8] = [
        Unit::Years,
        Unit::Months,
        Unit::Weeks,
        Unit::Days,
        Unit::Hours,
        Unit::Minutes,
        Unit::Seconds,
        Unit::Millis,
    ];

    /// Length in milliseconds, or `None` for the calendar units whose length
    /// depends on where they are applied.
    pub const fn fixed_millis(self) -> Option<i64> {
        match self {
            Unit::Years | Unit::Months => None,
            Unit::Weeks => Some(MILLIS_PER_WEEK),
            Unit::Days => Some(MILLIS_PER_DAY),
            Unit::Hours => Some(MILLIS_PER_HOUR),
            Unit::Minutes => Some(MILLIS_PER_MINUTE),
            Unit::Seconds => Some(MILLIS_PER_SECOND),
            Unit::Millis => Some(1),
        }
    }

    /// `true` for years and months.
    #[inline]
    pub const fn is_calendar(self) -> bool {
        self.fixed_millis().is_none()
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Unit::Years => "years",
            Unit::Months => "months",
            Unit::Weeks => "weeks",
            Unit::Days => "days",
            Unit::Hours => "hours",
            Unit::Minutes => "minutes",
            Unit::Seconds => "seconds",
            Unit::Millis => "milliseconds",
        };
        f.write_str(name)
    }
}

/// Signed calendar-relative offset with independent components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Period {
    years: i64,
    months: i64,
    weeks: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    millis: i64,
}

impl Period {
    /// The empty period.
    pub const ZERO: Period = Period {
        years: 0,
        months: 0,
        weeks: 0,
        days: 0,
        hours: 0,
        minutes: 0,
        seconds: 0,
        millis: 0,
    };

    /// The empty period, as a starting point for the builder methods.
    #[inline]
    pub const fn new() -> Self {
        Self::ZERO
    }

    /// A period with a single non-zero component.
    #[inline]
    pub const fn of(unit: Unit, amount: i64) -> Self {
        Self::ZERO.with(unit, amount)
    }

    /// Replace one component.
    pub const fn with(mut self, unit: Unit, amount: i64) -> Self {
        match unit {
            Unit::Years => self.years = amount,
            Unit::Months => self.months = amount,
            Unit::Weeks => self.weeks = amount,
            Unit::Days => self.days = amount,
            Unit::Hours => self.hours = amount,
            Unit::Minutes => self.minutes = amount,
            Unit::Seconds => self.seconds = amount,
            Unit::Millis => self.millis = amount,
        }
        self
    }

    /// Read one component.
    pub const fn get(&self, unit: Unit) -> i64 {
        match unit {
            Unit::Years => self.years,
            Unit::Months => self.months,
            Unit::Weeks => self.weeks,
            Unit::Days => self.days,
            Unit::Hours => self.hours,
            Unit::Minutes => self.minutes,
            Unit::Seconds => self.seconds,
            Unit::Millis => self.millis,
        }
    }

    // ── builder ───────────────────────────────────────────────────────

    #[inline]
    pub const fn years(self, years: i64) -> Self {
        self.with(Unit::Years, years)
    }

    #[inline]
    pub const fn months(self, months: i64) -> Self {
        self.with(Unit::Months, months)
    }

    #[inline]
    pub const fn weeks(self, weeks: i64) -> Self {
        self.with(Unit::Weeks, weeks)
    }

    #[inline]
    pub const fn days(self, days: i64) -> Self {
        self.with(Unit::Days, days)
    }

    #[inline]
    pub const fn hours(self, hours: i64) -> Self {
        self.with(Unit::Hours, hours)
    }

    #[inline]
    pub const fn minutes(self, minutes: i64) -> Self {
        self.with(Unit::Minutes, minutes)
    }

    #[inline]
    pub const fn seconds(self, seconds: i64) -> Self {
        self.with(Unit::Seconds, seconds)
    }

    #[inline]
    pub const fn millis(self, millis: i64) -> Self {
        self.with(Unit::Millis, millis)
    }

    // ── queries ───────────────────────────────────────────────────────

    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// `true` when the period has no year or month component, so it denotes
    /// the same physical length wherever it is applied.
    #[inline]
    pub const fn is_fixed_length(&self) -> bool {
        self.years == 0 && self.months == 0
    }

    /// Milliseconds spanned by the week-through-millisecond components, or
    /// `None` when the sum does not fit in an `i64`.
    pub fn fixed_millis(&self) -> Option<i64> {
        [
            (self.weeks, MILLIS_PER_WEEK),
            (self.days, MILLIS_PER_DAY),
            (self.hours, MILLIS_PER_HOUR),
            (self.minutes, MILLIS_PER_MINUTE),
            (self.seconds, MILLIS_PER_SECOND),
            (self.millis, 1),
        ]
        .into_iter()
        .try_fold(0i64, |total, (amount, len)| {
            total.checked_add(amount.checked_mul(len)?)
        })
    }

    /// The fixed-length part as a `chrono` delta, or `None` past the range
    /// `chrono` can represent.
    #[inline]
    pub fn fixed_delta(&self) -> Option<TimeDelta> {
        self.fixed_millis().and_then(TimeDelta::try_milliseconds)
    }

    /// The week and day components as a whole number of days; the part a
    /// calendar date can absorb.  `None` on `i64` overflow.
    #[inline]
    pub fn whole_days(&self) -> Option<i64> {
        self.weeks.checked_mul(DAYS_PER_WEEK)?.checked_add(self.days)
    }

    /// Every component negated, or `None` if one of them is `i64::MIN`.
    pub fn negated(self) -> Option<Self> {
        Unit::ALL.iter().try_fold(Self::ZERO, |acc, unit| {
            Some(acc.with(*unit, self.get(*unit).checked_neg()?))
        })
    }

    fn zip_with(self, rhs: Self, op: impl Fn(i64, i64) -> Option<i64>) -> Self {
        Unit::ALL.iter().fold(Self::ZERO, |acc, unit| {
            let amount = op(self.get(*unit), rhs.get(*unit)).expect(COMPONENT_OVERFLOW);
            acc.with(*unit, amount)
        })
    }
}

/// # Panics
///
/// If a component is `i64::MIN`.
impl Neg for Period {
    type Output = Period;

    #[inline]
    fn neg(self) -> Self::Output {
        self.negated().expect(COMPONENT_OVERFLOW)
    }
}

/// Componentwise sum.  Applying the sum is not always the same as applying
/// the operands one after another; see [`Shift`](crate::Shift).
///
/// # Panics
///
/// If a component overflows.
impl Add for Period {
    type Output = Period;

    fn add(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, i64::checked_add)
    }
}

impl Sub for Period {
    type Output = Period;

    fn sub(self, rhs: Self) -> Self::Output {
        self.zip_with(rhs, i64::checked_sub)
    }
}

/// ISO 8601 duration notation, e.g. `P1Y2M3W4DT5H6M7.008S`.
impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            return f.write_str("PT0S");
        }
        f.write_str("P")?;
        for (amount, tag) in [
            (self.years, 'Y'),
            (self.months, 'M'),
            (self.weeks, 'W'),
            (self.days, 'D'),
        ] {
            if amount != 0 {
                write!(f, "{amount}{tag}")?;
            }
        }
        if self.hours == 0 && self.minutes == 0 && self.seconds == 0 && self.millis == 0 {
            return Ok(());
        }
        f.write_str("T")?;
        if self.hours != 0 {
            write!(f, "{}H", self.hours)?;
        }
        if self.minutes != 0 {
            write!(f, "{}M", self.minutes)?;
        }
        match (self.seconds, self.millis) {
            (0, 0) => Ok(()),
            (s, 0) => write!(f, "{s}S"),
            (s, ms) => {
                let total = i128::from(s) * i128::from(MILLIS_PER_SECOND) + i128::from(ms);
                let sign = if total < 0 { "-" } else { "" };
                let total = total.unsigned_abs();
                let per_second = MILLIS_PER_SECOND as u128;
                write!(f, "{sign}{}.{:03}S", total / per_second, total % per_second)
            }
        }
    }
}
