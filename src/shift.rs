// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Forward/backward shifting by [`Period`]s.
//!
//! Periods are applied **one after another**, each to the result of the
//! previous one; they are never summed first.  Inside a single period the
//! order is years, months, then the fixed-length remainder:
//!
//! ```
//! use tempora::{Instant, Period, Shift};
//!
//! let t = Instant::from_utc_date(1986, 10, 14)?;
//! let shifted = t.plus_all(&[Period::new().months(1), Period::new().weeks(3)]);
//! assert_eq!(shifted, Instant::from_utc_date(1986, 12, 5)?);
//! # Ok::<(), tempora::TimeError>(())
//! ```
//!
//! Year and month steps move the calendar fields and clamp the day to the
//! end of a shorter month (January 31st plus one month is the last day of
//! February).  Weeks, days and smaller units add exact physical time.

use crate::calendar::{shift_years_then_months, CalendarDate, CalendarDateTime};
use crate::instant::Instant;
use crate::period::{Period, Unit};
use chrono::{NaiveDateTime, TimeDelta};

const OUT_OF_RANGE: &str = "shifted value out of representable range";

/// Plus/minus capability.
///
/// `Output` is `Self` for point-in-time values.  For an
/// [`Interval`](crate::Interval) it is a `Result`, because moving the end
/// backwards can put it before the start.
///
/// Implementors provide [`Shift::checked_shift_by`]; the plain methods panic
/// where it returns `None`, like integer overflow.
pub trait Shift {
    type Output;

    /// Apply `periods` in order, each to the result of the previous one.
    /// `None` if a step leaves the range `chrono` can represent.
    fn checked_shift_by(&self, periods: &[Period]) -> Option<Self::Output>;

    /// # Panics
    ///
    /// If a result falls outside the range `chrono` can represent.
    fn shift_by(&self, periods: &[Period]) -> Self::Output {
        self.checked_shift_by(periods).expect(OUT_OF_RANGE)
    }

    #[inline]
    fn checked_plus(&self, period: &Period) -> Option<Self::Output> {
        self.checked_shift_by(std::slice::from_ref(period))
    }

    #[inline]
    fn checked_minus(&self, period: &Period) -> Option<Self::Output> {
        self.checked_shift_by(&[period.negated()?])
    }

    #[inline]
    fn plus(&self, period: &Period) -> Self::Output {
        self.shift_by(std::slice::from_ref(period))
    }

    #[inline]
    fn plus_all(&self, periods: &[Period]) -> Self::Output {
        self.shift_by(periods)
    }

    #[inline]
    fn minus(&self, period: &Period) -> Self::Output {
        self.shift_by(&[-*period])
    }

    /// Subtract `periods` in order; `minus_all(&[a, b])` is
    /// `minus(a).minus(b)`.
    fn minus_all(&self, periods: &[Period]) -> Self::Output {
        let negated: Vec<Period> = periods.iter().map(|p| -*p).collect();
        self.shift_by(&negated)
    }
}

/// Calendar step on local fields, then the fixed-length remainder.
fn shift_naive(fields: NaiveDateTime, period: &Period) -> Option<NaiveDateTime> {
    let date = shift_years_then_months(
        fields.date(),
        period.get(Unit::Years),
        period.get(Unit::Months),
    )?;
    date.and_time(fields.time())
        .checked_add_signed(period.fixed_delta()?)
}

fn shift_instant(instant: Instant, period: &Period) -> Option<Instant> {
    let moment = if period.is_fixed_length() {
        instant.to_utc()
    } else {
        let local = instant.naive_local();
        let date = shift_years_then_months(
            local.date(),
            period.get(Unit::Years),
            period.get(Unit::Months),
        )?;
        instant
            .zone()
            .resolve_local_lenient(&date.and_time(local.time()))
    };
    let moment = moment.checked_add_signed(period.fixed_delta()?)?;
    Some(instant.with_moment(moment))
}

fn shift_date(date: CalendarDate, period: &Period) -> Option<CalendarDate> {
    let days = TimeDelta::try_days(period.whole_days()?)?;
    shift_years_then_months(
        date.naive(),
        period.get(Unit::Years),
        period.get(Unit::Months),
    )
    .and_then(|d| d.checked_add_signed(days))
    .map(CalendarDate::from_naive)
}

impl Shift for Instant {
    type Output = Instant;

    fn checked_shift_by(&self, periods: &[Period]) -> Option<Instant> {
        periods.iter().try_fold(*self, |acc, p| shift_instant(acc, p))
    }
}

impl Shift for CalendarDateTime {
    type Output = CalendarDateTime;

    fn checked_shift_by(&self, periods: &[Period]) -> Option<CalendarDateTime> {
        periods.iter().try_fold(*self, |acc, p| {
            shift_naive(acc.naive(), p).map(CalendarDateTime::from_naive)
        })
    }
}

/// Hours and smaller components are ignored: a date has no time of day.
impl Shift for CalendarDate {
    type Output = CalendarDate;

    fn checked_shift_by(&self, periods: &[Period]) -> Option<CalendarDate> {
        periods.iter().try_fold(*self, |acc, p| shift_date(acc, p))
    }
}
