// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Component access shared by every point-in-time kind.
//!
//! | Accessor | Range |
//! |----------|-------|
//! | `year` | proleptic Gregorian year |
//! | `month` | 1–12 |
//! | `day` | 1–31 |
//! | `day_of_week` | 1 (Monday) – 7 (Sunday) |
//! | `hour` | 0–23, midnight is 0 |
//! | `minute`, `second` | 0–59 |
//! | `milli` | 0–999 |
//!
//! An [`Instant`] reports the fields of its own zone.  A [`CalendarDate`]
//! reports zero for every time-of-day field.

use crate::calendar::{self, CalendarDate, CalendarDateTime};
use crate::instant::Instant;
use chrono::{Datelike, NaiveDateTime, Timelike};

const NANOS_PER_MILLI: u32 = 1_000_000;

/// Year/month/day/time accessors.
///
/// Implementors supply [`wall_clock`](CalendarFields::wall_clock); every
/// accessor is derived from it.
pub trait CalendarFields {
    /// The local calendar fields as a `chrono` value.
    fn wall_clock(&self) -> NaiveDateTime;

    #[inline]
    fn year(&self) -> i32 {
        self.wall_clock().year()
    }

    #[inline]
    fn month(&self) -> u32 {
        self.wall_clock().month()
    }

    #[inline]
    fn day(&self) -> u32 {
        self.wall_clock().day()
    }

    /// ISO day of week: Monday is 1, Sunday is 7.
    #[inline]
    fn day_of_week(&self) -> u32 {
        self.wall_clock().weekday().number_from_monday()
    }

    #[inline]
    fn hour(&self) -> u32 {
        self.wall_clock().hour()
    }

    #[inline]
    fn minute(&self) -> u32 {
        self.wall_clock().minute()
    }

    #[inline]
    fn second(&self) -> u32 {
        self.wall_clock().second()
    }

    #[inline]
    fn milli(&self) -> u32 {
        self.wall_clock().nanosecond() / NANOS_PER_MILLI
    }

    /// Day of the year, 1 through 366.
    #[inline]
    fn day_of_year(&self) -> u32 {
        self.wall_clock().ordinal()
    }

    #[inline]
    fn is_leap_year(&self) -> bool {
        calendar::is_leap_year(self.year())
    }

    /// Length of the month this value falls in.
    fn days_in_month(&self) -> u32 {
        let fields = self.wall_clock();
        CalendarDate::from_naive(fields.date())
            .last_day_of_month()
            .naive()
            .day()
    }
}

impl CalendarFields for Instant {
    #[inline]
    fn wall_clock(&self) -> NaiveDateTime {
        self.naive_local()
    }
}

impl CalendarFields for CalendarDateTime {
    #[inline]
    fn wall_clock(&self) -> NaiveDateTime {
        self.naive()
    }
}

impl CalendarFields for CalendarDate {
    #[inline]
    fn wall_clock(&self) -> NaiveDateTime {
        self.at_midnight().naive()
    }
}
