// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Zone-less calendar values on the proleptic Gregorian calendar.
//!
//! - [`CalendarDate`]: year, month, day.
//! - [`CalendarDateTime`]: date plus time of day at millisecond precision.
//! - [`YearMonth`]: a month of a year.
//!
//! None of these identify a physical moment on their own; the coercion
//! layer reads their fields as UTC when an absolute instant is needed.

use crate::error::{Result, TimeError};
use crate::zone;
use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, Timelike, Utc};
use std::fmt;

const MAX_MILLI: u32 = 999;
const NANOS_PER_SECOND: u32 = 1_000_000_000;
const LAST_MILLI_NANOS: u32 = 999_000_000;

/// `true` if `year` has a February 29th.
pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// Number of days in `month` of `year`.
pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    let first = first_of_month(year, month)?;
    let next = first
        .checked_add_months(Months::new(1))
        .ok_or_else(|| out_of_range(format!("{year:04}-{month:02}")))?;
    Ok((next - first).num_days() as u32)
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| out_of_range(format!("year {year}, month {month}")))
}

fn out_of_range(what: String) -> TimeError {
    TimeError::InvalidCalendarValue(what)
}

/// Truncate below the millisecond.  A leap second (`chrono` keeps it as
/// nanoseconds past 999_999_999 in second 59) folds into the last
/// millisecond of second 59.
pub(crate) fn to_millis(datetime: NaiveDateTime) -> NaiveDateTime {
    let datetime = datetime.trunc_subsecs(3);
    if datetime.nanosecond() < NANOS_PER_SECOND {
        return datetime;
    }
    datetime.with_nanosecond(LAST_MILLI_NANOS).unwrap_or(datetime)
}

/// Move a date by a signed number of months, clamping the day to the end of
/// a shorter target month.  `None` when the result is unrepresentable.
pub(crate) fn shift_months(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
}

/// Years first, then months: Feb 29 + 1 year 1 month is Mar 28, not Mar 29.
pub(crate) fn shift_years_then_months(
    date: NaiveDate,
    years: i64,
    months: i64,
) -> Option<NaiveDate> {
    let date = if years != 0 {
        shift_months(date, years.checked_mul(12)?)?
    } else {
        date
    };
    if months != 0 {
        shift_months(date, months)
    } else {
        Some(date)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CalendarDate
// ═══════════════════════════════════════════════════════════════════════════

/// A date with no time of day and no zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Build from fields, failing on an impossible date.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| out_of_range(format!("{year:04}-{month:02}-{day:02}")))
    }

    #[inline]
    pub const fn from_naive(date: NaiveDate) -> Self {
        Self(date)
    }

    #[inline]
    pub const fn naive(&self) -> NaiveDate {
        self.0
    }

    /// Today's date in the [default zone](zone::default_zone).
    pub fn today() -> Self {
        Self(zone::default_zone().local_fields(&Utc::now()).date())
    }

    /// Combine with a time of day.
    pub fn at(&self, hour: u32, minute: u32, second: u32, milli: u32) -> Result<CalendarDateTime> {
        let (year, month, day) = (self.0.year(), self.0.month(), self.0.day());
        CalendarDateTime::new(year, month, day, hour, minute, second, milli)
    }

    #[inline]
    pub fn at_midnight(&self) -> CalendarDateTime {
        CalendarDateTime(self.0.and_time(NaiveTime::MIN))
    }

    pub fn first_day_of_month(&self) -> Self {
        Self(self.0.with_day(1).unwrap_or(self.0))
    }

    pub fn last_day_of_month(&self) -> Self {
        let first = self.first_day_of_month().0;
        Self(
            first
                .checked_add_months(Months::new(1))
                .and_then(|next| next.pred_opt())
                .unwrap_or(self.0),
        )
    }

    /// Day of the year, 1 through 366.
    #[inline]
    pub fn day_of_year(&self) -> u32 {
        self.0.ordinal()
    }

    #[inline]
    pub fn year_month(&self) -> YearMonth {
        YearMonth {
            year: self.0.year(),
            month: self.0.month(),
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// CalendarDateTime
// ═══════════════════════════════════════════════════════════════════════════

/// A date and time of day with no zone, at millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CalendarDateTime(NaiveDateTime);

impl CalendarDateTime {
    /// Build from fields, failing on an impossible date or time.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        milli: u32,
    ) -> Result<Self> {
        let invalid = || {
            out_of_range(format!(
                "{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second:02}.{milli:03}"
            ))
        };
        if milli > MAX_MILLI {
            return Err(invalid());
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_milli_opt(hour, minute, second, milli))
            .map(Self)
            .ok_or_else(invalid)
    }

    /// Wrap a `chrono` value, truncating below the millisecond.  A leap
    /// second reads as 59.999.
    #[inline]
    pub fn from_naive(datetime: NaiveDateTime) -> Self {
        Self(to_millis(datetime))
    }

    #[inline]
    pub const fn naive(&self) -> NaiveDateTime {
        self.0
    }

    /// The current wall-clock time in the [default zone](zone::default_zone).
    pub fn now() -> Self {
        Self::from_naive(zone::default_zone().local_fields(&Utc::now()))
    }

    #[inline]
    pub fn date(&self) -> CalendarDate {
        CalendarDate(self.0.date())
    }

    /// Same date at 00:00:00.000.
    #[inline]
    pub fn at_start_of_day(&self) -> Self {
        self.date().at_midnight()
    }
}

impl fmt::Display for CalendarDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%S%.3f"))
    }
}

impl From<NaiveDateTime> for CalendarDateTime {
    fn from(datetime: NaiveDateTime) -> Self {
        Self::from_naive(datetime)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// YearMonth
// ═══════════════════════════════════════════════════════════════════════════

/// A month of a particular year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        first_of_month(year, month)?;
        Ok(Self { year, month })
    }

    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// The first day of the month.
    pub fn first_day(&self) -> CalendarDate {
        CalendarDate(NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default())
    }

    /// The last day of the month.
    pub fn last_day(&self) -> CalendarDate {
        self.first_day().last_day_of_month()
    }

    pub fn days(&self) -> u32 {
        self.last_day().naive().day()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::CalendarFields;

    #[test]
    fn rejects_impossible_dates() {
        assert!(CalendarDate::new(2023, 2, 29).is_err());
        assert!(CalendarDate::new(2024, 2, 29).is_ok());
        assert!(CalendarDate::new(2024, 13, 1).is_err());
        assert!(CalendarDate::new(2024, 4, 31).is_err());
    }

    #[test]
    fn rejects_impossible_times() {
        assert!(CalendarDateTime::new(2024, 1, 1, 24, 0, 0, 0).is_err());
        assert!(CalendarDateTime::new(2024, 1, 1, 23, 60, 0, 0).is_err());
        assert!(CalendarDateTime::new(2024, 1, 1, 23, 59, 60, 0).is_err());
        assert!(CalendarDateTime::new(2024, 1, 1, 23, 59, 59, 1000).is_err());
        assert!(CalendarDateTime::new(2024, 1, 1, 23, 59, 59, 999).is_ok());
    }

    #[test]
    fn invalid_value_error_names_the_fields() {
        let err = CalendarDate::new(2023, 2, 30).unwrap_err();
        assert_eq!(err, TimeError::InvalidCalendarValue("2023-02-30".into()));
    }

    #[test]
    fn leap_years_follow_gregorian_rules() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2023, 2).unwrap(), 28);
        assert_eq!(days_in_month(2023, 12).unwrap(), 31);
        assert_eq!(days_in_month(2023, 4).unwrap(), 30);
        assert!(days_in_month(2023, 0).is_err());
    }

    #[test]
    fn month_boundaries() {
        let d = CalendarDate::new(2024, 2, 17).unwrap();
        assert_eq!(d.first_day_of_month(), CalendarDate::new(2024, 2, 1).unwrap());
        assert_eq!(d.last_day_of_month(), CalendarDate::new(2024, 2, 29).unwrap());
        assert_eq!(d.day_of_year(), 48);
    }

    #[test]
    fn shifting_months_clamps_to_month_end() {
        let jan31 = NaiveDate::from_ymd_opt(2023, 1, 31).unwrap();
        assert_eq!(shift_months(jan31, 1), NaiveDate::from_ymd_opt(2023, 2, 28));
        assert_eq!(shift_months(jan31, -2), NaiveDate::from_ymd_opt(2022, 11, 30));
    }

    #[test]
    fn years_apply_before_months() {
        let leap = NaiveDate::from_ymd_opt(2012, 2, 29).unwrap();
        assert_eq!(
            shift_years_then_months(leap, 1, 1),
            NaiveDate::from_ymd_opt(2013, 3, 28)
        );
        assert_eq!(shift_months(leap, 13), NaiveDate::from_ymd_opt(2013, 3, 29));
    }

    #[test]
    fn date_time_truncates_below_millis() {
        let naive = NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_nano_opt(7, 8, 9, 123_456_789)
            .unwrap();
        let dt = CalendarDateTime::from_naive(naive);
        assert_eq!(dt.milli(), 123);
        assert_eq!(dt.to_string(), "2024-05-06T07:08:09.123");
    }

    #[test]
    fn leap_second_reads_as_last_milli() {
        let leap = NaiveDate::from_ymd_opt(2016, 12, 31)
            .unwrap()
            .and_hms_milli_opt(23, 59, 59, 1_500)
            .unwrap();
        let dt = CalendarDateTime::from_naive(leap);
        assert_eq!((dt.second(), dt.milli()), (59, 999));
        assert_eq!(dt, CalendarDateTime::new(2016, 12, 31, 23, 59, 59, 999).unwrap());
    }

    #[test]
    fn year_month_promotes_to_first_day() {
        let ym = YearMonth::new(2024, 2).unwrap();
        assert_eq!(ym.first_day(), CalendarDate::new(2024, 2, 1).unwrap());
        assert_eq!(ym.last_day(), CalendarDate::new(2024, 2, 29).unwrap());
        assert_eq!(ym.days(), 29);
        assert_eq!(ym.to_string(), "2024-02");
        assert!(YearMonth::new(2024, 0).is_err());
    }
}
