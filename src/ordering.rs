// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Strict before/after ordering between values and intervals.
//!
//! Values compare by the moment they denote (zone-less calendar values by
//! their fields).  Equal values are neither before nor after each other.
//!
//! Against an [`Interval`] the half-open bounds decide:
//!
//! | Expression | Holds when |
//! |------------|------------|
//! | `interval.before(t)` | `end <= t` |
//! | `interval.after(t)` | `start > t` |
//! | `t.after(interval)` | `interval.before(t)` |
//! | `t.before(interval)` | `interval.after(t)` |
//! | `a.before(b)` (intervals) | `a.end <= b.start` |
//! | `a.after(b)` (intervals) | `a.start >= b.end` |

use crate::calendar::{CalendarDate, CalendarDateTime};
use crate::instant::{Instant, TimeInstant};
use crate::interval::Interval;

/// Strict ordering capability.
pub trait TimeOrd<Rhs: ?Sized = Self> {
    fn before(&self, other: &Rhs) -> bool;
    fn after(&self, other: &Rhs) -> bool;
}

macro_rules! impl_time_ord {
    ($($ty:ty),* $(,)?) => {$(
        impl TimeOrd for $ty {
            #[inline]
            fn before(&self, other: &Self) -> bool {
                self < other
            }

            #[inline]
            fn after(&self, other: &Self) -> bool {
                self > other
            }
        }

        impl TimeOrd<Interval<$ty>> for $ty {
            #[inline]
            fn before(&self, interval: &Interval<$ty>) -> bool {
                <Interval<$ty> as TimeOrd<$ty>>::after(interval, self)
            }

            #[inline]
            fn after(&self, interval: &Interval<$ty>) -> bool {
                <Interval<$ty> as TimeOrd<$ty>>::before(interval, self)
            }
        }
    )*};
}

impl_time_ord!(Instant, CalendarDate, CalendarDateTime);

impl<T: TimeInstant> TimeOrd<T> for Interval<T> {
    /// The whole interval ends at or before `instant`.
    #[inline]
    fn before(&self, instant: &T) -> bool {
        self.end() <= *instant
    }

    /// The whole interval starts after `instant`.
    #[inline]
    fn after(&self, instant: &T) -> bool {
        self.start() > *instant
    }
}

impl<T: TimeInstant> TimeOrd for Interval<T> {
    #[inline]
    fn before(&self, other: &Self) -> bool {
        self.end() <= other.start()
    }

    #[inline]
    fn after(&self, other: &Self) -> bool {
        self.start() >= other.end()
    }
}

/// The earliest value, or `None` for an empty input.
pub fn earliest<T: TimeInstant, I: IntoIterator<Item = T>>(values: I) -> Option<T> {
    values.into_iter().min()
}

/// The latest value, or `None` for an empty input.
pub fn latest<T: TimeInstant, I: IntoIterator<Item = T>>(values: I) -> Option<T> {
    values.into_iter().max()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone;

    fn utc(y: i32, m: u32, d: u32) -> Instant {
        Instant::from_utc_date(y, m, d).unwrap()
    }

    #[test]
    fn strict_between_values() {
        let a = utc(2020, 1, 1);
        let b = utc(2021, 1, 1);
        assert!(a.before(&b));
        assert!(b.after(&a));
        assert!(!a.after(&b));
        assert!(!a.before(&a));
        assert!(!a.after(&a));
    }

    #[test]
    fn zone_does_not_affect_order() {
        let a = utc(2020, 1, 1);
        let same = a.in_zone(zone::for_id("Pacific/Auckland").unwrap());
        assert!(!a.before(&same));
        assert!(!a.after(&same));
    }

    #[test]
    fn calendar_values_order_by_fields() {
        let d1 = CalendarDate::new(2020, 2, 28).unwrap();
        let d2 = CalendarDate::new(2020, 2, 29).unwrap();
        assert!(d1.before(&d2));
        let t1 = CalendarDateTime::new(2020, 2, 29, 0, 0, 0, 1).unwrap();
        let t2 = CalendarDateTime::new(2020, 2, 29, 0, 0, 0, 0).unwrap();
        assert!(t1.after(&t2));
    }

    #[test]
    fn value_against_interval_uses_half_open_bounds() {
        let i = Interval::new(utc(2020, 1, 1), utc(2020, 2, 1)).unwrap();

        assert!(utc(2019, 12, 31).before(&i));
        assert!(!utc(2020, 1, 1).before(&i));
        assert!(!utc(2020, 1, 15).before(&i));
        assert!(!utc(2020, 1, 15).after(&i));
        assert!(utc(2020, 2, 1).after(&i));

        assert!(i.before(&utc(2020, 2, 1)));
        assert!(i.after(&utc(2019, 12, 31)));
        assert!(!i.after(&utc(2020, 1, 1)));
    }

    #[test]
    fn interval_against_interval() {
        let jan = Interval::new(utc(2020, 1, 1), utc(2020, 2, 1)).unwrap();
        let feb = Interval::new(utc(2020, 2, 1), utc(2020, 3, 1)).unwrap();
        let mid = Interval::new(utc(2020, 1, 15), utc(2020, 2, 15)).unwrap();
        assert!(jan.before(&feb));
        assert!(feb.after(&jan));
        assert!(!jan.before(&mid));
        assert!(!mid.after(&jan));
    }

    #[test]
    fn earliest_and_latest() {
        let values = [utc(2001, 1, 1), utc(1999, 1, 1), utc(2000, 1, 1)];
        assert_eq!(earliest(values), Some(utc(1999, 1, 1)));
        assert_eq!(latest(values), Some(utc(2001, 1, 1)));
        assert_eq!(earliest(Vec::<Instant>::new()), None);
    }
}
