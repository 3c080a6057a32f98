// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Coercion of loosely typed input to [`Instant`] and back out.
//!
//! Every accepted input kind is a variant of [`TimeSource`]; [`to_instant`]
//! is the single dispatch point and every other conversion here goes
//! through it.  Absent input (`None`) is never an error: it comes back as
//! `Ok(None)`.
//!
//! Zone-less inputs (calendar values, `chrono` naive types, [`YearMonth`])
//! have their fields read as UTC.
//!
//! ```
//! use tempora::coerce;
//!
//! let millis = coerce::to_epoch_millis("1986-03-24T14:49:31Z")?;
//! assert_eq!(millis, Some(512_059_771_000));
//!
//! let text = coerce::to_text(512_059_771_000_i64)?;
//! assert_eq!(text.as_deref(), Some("1986-03-24T14:49:31.000Z"));
//!
//! assert_eq!(coerce::to_instant(None::<i64>)?, None);
//! # Ok::<(), tempora::TimeError>(())
//! ```

use crate::calendar::{CalendarDate, CalendarDateTime, YearMonth};
use crate::error::Result;
use crate::fields::CalendarFields;
use crate::format::{Formats, TextFormat};
use crate::instant::{Instant, TimeInstant};
use crate::value::TimeValue;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use std::time::SystemTime;

/// Every input kind the coercion layer accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSource<'a> {
    /// No value.
    Absent,
    Instant(Instant),
    CalendarDate(CalendarDate),
    CalendarDateTime(CalendarDateTime),
    NaiveDate(NaiveDate),
    NaiveDateTime(NaiveDateTime),
    /// Milliseconds since the Unix epoch.
    EpochMillis(i64),
    /// Seconds since the Unix epoch.
    EpochSeconds(i64),
    /// Text in one of the accepted [`Formats`].
    Text(&'a str),
    SystemTime(SystemTime),
    Utc(DateTime<Utc>),
    Offset(DateTime<FixedOffset>),
    YearMonth(YearMonth),
    Value(TimeValue),
}

impl TimeSource<'_> {
    /// Resolve to an instant, reading text with `formats`.
    pub fn resolve<F: TextFormat + ?Sized>(&self, formats: &F) -> Result<Option<Instant>> {
        let instant = match *self {
            TimeSource::Absent => return Ok(None),
            TimeSource::Instant(t) => t,
            TimeSource::CalendarDate(d) => Instant::from_utc(d.to_utc()),
            TimeSource::CalendarDateTime(dt) => Instant::from_utc(dt.to_utc()),
            TimeSource::NaiveDate(d) => Instant::from_utc(CalendarDate::from_naive(d).to_utc()),
            TimeSource::NaiveDateTime(dt) => Instant::from_utc(dt.and_utc()),
            TimeSource::EpochMillis(ms) => Instant::from_epoch_millis(ms)?,
            TimeSource::EpochSeconds(s) => Instant::from_epoch_seconds(s)?,
            TimeSource::Text(text) => formats.parse(text)?,
            TimeSource::SystemTime(time) => Instant::from_utc(DateTime::<Utc>::from(time)),
            TimeSource::Utc(dt) => Instant::from_utc(dt),
            TimeSource::Offset(dt) => Instant::from_utc(dt.to_utc()),
            TimeSource::YearMonth(ym) => Instant::from_utc(ym.first_day().to_utc()),
            TimeSource::Value(value) => match value {
                TimeValue::Instant(t) => t,
                TimeValue::Date(d) => Instant::from_utc(d.to_utc()),
                TimeValue::DateTime(dt) => Instant::from_utc(dt.to_utc()),
            },
        };
        Ok(Some(instant))
    }

    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, TimeSource::Absent)
    }
}

// ── From ──────────────────────────────────────────────────────────────────

macro_rules! impl_from_source {
    ($($ty:ty => $variant:ident),* $(,)?) => {$(
        impl From<$ty> for TimeSource<'_> {
            #[inline]
            fn from(value: $ty) -> Self {
                TimeSource::$variant(value)
            }
        }
    )*};
}

impl_from_source!(
    Instant => Instant,
    CalendarDate => CalendarDate,
    CalendarDateTime => CalendarDateTime,
    NaiveDate => NaiveDate,
    NaiveDateTime => NaiveDateTime,
    i64 => EpochMillis,
    SystemTime => SystemTime,
    DateTime<Utc> => Utc,
    DateTime<FixedOffset> => Offset,
    YearMonth => YearMonth,
    TimeValue => Value,
);

impl<'a> From<&'a str> for TimeSource<'a> {
    #[inline]
    fn from(text: &'a str) -> Self {
        TimeSource::Text(text)
    }
}

impl<'a> From<&'a String> for TimeSource<'a> {
    #[inline]
    fn from(text: &'a String) -> Self {
        TimeSource::Text(text)
    }
}

/// `None` is [`TimeSource::Absent`].
impl<'a, T: Into<TimeSource<'a>>> From<Option<T>> for TimeSource<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(TimeSource::Absent, Into::into)
    }
}

// ── Dispatch ──────────────────────────────────────────────────────────────

/// Coerce any accepted input to an [`Instant`], reading text with the
/// default [`Formats`].
///
/// # Errors
///
/// [`TimeError::Parse`](crate::TimeError::Parse) for unreadable text and
/// [`TimeError::InvalidCalendarValue`](crate::TimeError::InvalidCalendarValue)
/// for epoch counts outside the representable range.
pub fn to_instant<'a>(value: impl Into<TimeSource<'a>>) -> Result<Option<Instant>> {
    value.into().resolve(&Formats::default())
}

/// Like [`to_instant`], reading text with `formats`.
pub fn to_instant_with<'a, F: TextFormat + ?Sized>(
    value: impl Into<TimeSource<'a>>,
    formats: &F,
) -> Result<Option<Instant>> {
    value.into().resolve(formats)
}

pub fn to_epoch_millis<'a>(value: impl Into<TimeSource<'a>>) -> Result<Option<i64>> {
    Ok(to_instant(value)?.map(|t| t.epoch_millis()))
}

pub fn to_epoch_seconds<'a>(value: impl Into<TimeSource<'a>>) -> Result<Option<i64>> {
    Ok(to_instant(value)?.map(|t| t.epoch_seconds()))
}

/// The calendar date in the instant's zone.
pub fn to_calendar_date<'a>(value: impl Into<TimeSource<'a>>) -> Result<Option<CalendarDate>> {
    Ok(to_instant(value)?.map(|t| t.to_calendar_date()))
}

/// The wall-clock fields in the instant's zone.
pub fn to_calendar_date_time<'a>(
    value: impl Into<TimeSource<'a>>,
) -> Result<Option<CalendarDateTime>> {
    Ok(to_instant(value)?.map(|t| t.to_calendar_date_time()))
}

/// RFC 3339 text with milliseconds.
pub fn to_text<'a>(value: impl Into<TimeSource<'a>>) -> Result<Option<String>> {
    let formats = Formats::default();
    Ok(value.into().resolve(&formats)?.map(|t| formats.format(&t)))
}

pub fn to_platform_date<'a>(value: impl Into<TimeSource<'a>>) -> Result<Option<SystemTime>> {
    Ok(to_instant(value)?.map(|t| SystemTime::from(t.to_utc())))
}

pub fn to_chrono<'a>(value: impl Into<TimeSource<'a>>) -> Result<Option<DateTime<Utc>>> {
    Ok(to_instant(value)?.map(|t| t.to_utc()))
}

/// The month, in the instant's zone.
pub fn to_year_month<'a>(value: impl Into<TimeSource<'a>>) -> Result<Option<YearMonth>> {
    to_instant(value)?
        .map(|t| YearMonth::new(t.year(), t.month()))
        .transpose()
}
