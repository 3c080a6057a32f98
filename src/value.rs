// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! A point-in-time value of any kind.

use crate::calendar::{CalendarDate, CalendarDateTime};
use crate::fields::CalendarFields;
use crate::instant::Instant;
use crate::period::Period;
use crate::shift::Shift;
use chrono::NaiveDateTime;
use std::fmt;

/// One of the three point-in-time kinds.
///
/// Used where the kind is only known at run time: coercion input and
/// generator output.  Component access and shifting dispatch on the variant
/// and preserve it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeValue {
    Instant(Instant),
    Date(CalendarDate),
    DateTime(CalendarDateTime),
}

impl TimeValue {
    /// The instant, if this value is one.
    pub fn as_instant(&self) -> Option<&Instant> {
        match self {
            TimeValue::Instant(t) => Some(t),
            _ => None,
        }
    }

    /// Short name of the variant, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TimeValue::Instant(_) => "instant",
            TimeValue::Date(_) => "date",
            TimeValue::DateTime(_) => "date-time",
        }
    }
}

impl CalendarFields for TimeValue {
    fn wall_clock(&self) -> NaiveDateTime {
        match self {
            TimeValue::Instant(t) => t.wall_clock(),
            TimeValue::Date(d) => d.wall_clock(),
            TimeValue::DateTime(dt) => dt.wall_clock(),
        }
    }
}

impl Shift for TimeValue {
    type Output = TimeValue;

    fn checked_shift_by(&self, periods: &[Period]) -> Option<TimeValue> {
        match self {
            TimeValue::Instant(t) => t.checked_shift_by(periods).map(TimeValue::Instant),
            TimeValue::Date(d) => d.checked_shift_by(periods).map(TimeValue::Date),
            TimeValue::DateTime(dt) => dt.checked_shift_by(periods).map(TimeValue::DateTime),
        }
    }
}

impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeValue::Instant(t) => fmt::Display::fmt(t, f),
            TimeValue::Date(d) => fmt::Display::fmt(d, f),
            TimeValue::DateTime(dt) => fmt::Display::fmt(dt, f),
        }
    }
}

impl From<Instant> for TimeValue {
    fn from(t: Instant) -> Self {
        TimeValue::Instant(t)
    }
}

impl From<CalendarDate> for TimeValue {
    fn from(d: CalendarDate) -> Self {
        TimeValue::Date(d)
    }
}

impl From<CalendarDateTime> for TimeValue {
    fn from(dt: CalendarDateTime) -> Self {
        TimeValue::DateTime(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_fields_by_variant() {
        let d: TimeValue = CalendarDate::new(2024, 2, 29).unwrap().into();
        assert_eq!((d.year(), d.month(), d.day(), d.hour()), (2024, 2, 29, 0));
        assert_eq!(d.kind_name(), "date");
        assert!(d.as_instant().is_none());

        let t: TimeValue = Instant::from_utc_fields(2024, 2, 29, 7, 8, 9, 10)
            .unwrap()
            .into();
        assert_eq!((t.hour(), t.minute(), t.second(), t.milli()), (7, 8, 9, 10));
        assert!(t.as_instant().is_some());
    }

    #[test]
    fn shift_keeps_the_variant() {
        let dt: TimeValue = CalendarDateTime::new(2024, 1, 31, 12, 0, 0, 0).unwrap().into();
        let shifted = dt.plus(&Period::new().months(1));
        assert_eq!(
            shifted,
            TimeValue::DateTime(CalendarDateTime::new(2024, 2, 29, 12, 0, 0, 0).unwrap())
        );
        assert_eq!(shifted.to_string(), "2024-02-29T12:00:00.000");
    }
}
