// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Zone-aware absolute instant.
//!
//! [`Instant`] is the canonical representation of the crate: a count of
//! milliseconds since the Unix epoch plus the [`Zone`] used to present it.
//! The zone never changes *which* moment is meant, only how its calendar
//! fields read, so equality, ordering and hashing look at the moment alone.
//!
//! [`TimeInstant`] is the seam that lets [`Interval`](crate::Interval) and
//! the duration arithmetic work over instants and over the zone-less
//! calendar kinds alike.

use crate::calendar::{self, CalendarDate, CalendarDateTime};
use crate::error::{Result, TimeError};
use crate::period::Period;
use crate::shift::Shift;
use crate::zone::Zone;
use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat, TimeDelta, Utc};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

const MILLIS_PER_SECOND: i64 = 1_000;

// ═══════════════════════════════════════════════════════════════════════════
// Instant
// ═══════════════════════════════════════════════════════════════════════════

/// A physical moment, presented in a zone.
#[derive(Debug, Clone, Copy)]
pub struct Instant {
    moment: DateTime<Utc>,
    zone: Zone,
}

impl Instant {
    // ── constructors ──────────────────────────────────────────────────

    /// Build from a `chrono` UTC timestamp, truncating below the millisecond.
    #[inline]
    pub fn from_utc(moment: DateTime<Utc>) -> Self {
        Self::from_utc_in(moment, Zone::UTC)
    }

    /// Build from a UTC timestamp presented in `zone`.  A leap second folds
    /// into the last millisecond before it.
    #[inline]
    pub fn from_utc_in(moment: DateTime<Utc>, zone: Zone) -> Self {
        Self {
            moment: calendar::to_millis(moment.naive_utc()).and_utc(),
            zone,
        }
    }

    /// Milliseconds since 1970-01-01T00:00:00Z, presented in UTC.
    pub fn from_epoch_millis(millis: i64) -> Result<Self> {
        Self::from_epoch_millis_in(millis, Zone::UTC)
    }

    /// Milliseconds since 1970-01-01T00:00:00Z, presented in `zone`.
    pub fn from_epoch_millis_in(millis: i64, zone: Zone) -> Result<Self> {
        DateTime::from_timestamp_millis(millis)
            .map(|moment| Self { moment, zone })
            .ok_or_else(|| {
                TimeError::InvalidCalendarValue(format!("epoch millis {millis} out of range"))
            })
    }

    /// Seconds since 1970-01-01T00:00:00Z, presented in UTC.
    pub fn from_epoch_seconds(seconds: i64) -> Result<Self> {
        seconds
            .checked_mul(MILLIS_PER_SECOND)
            .ok_or_else(|| {
                TimeError::InvalidCalendarValue(format!("epoch seconds {seconds} out of range"))
            })
            .and_then(Self::from_epoch_millis)
    }

    /// Build from local fields in `zone`.
    ///
    /// Fails with [`TimeError::InvalidCalendarValue`] when a field is out of
    /// range or the local time is skipped by a transition in `zone`.
    /// Ambiguous local times take the earlier moment.
    #[allow(clippy::too_many_arguments)]
    pub fn from_fields(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        milli: u32,
        zone: Zone,
    ) -> Result<Self> {
        let local = CalendarDateTime::new(year, month, day, hour, minute, second, milli)?;
        zone.resolve_local(&local.naive())
            .map(|moment| Self { moment, zone })
            .ok_or_else(|| {
                TimeError::InvalidCalendarValue(format!("{local} does not exist in {zone}"))
            })
    }

    /// Build from UTC fields.
    pub fn from_utc_fields(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
        milli: u32,
    ) -> Result<Self> {
        Self::from_fields(year, month, day, hour, minute, second, milli, Zone::UTC)
    }

    /// Midnight UTC on the given date.
    pub fn from_utc_date(year: i32, month: u32, day: u32) -> Result<Self> {
        Self::from_utc_fields(year, month, day, 0, 0, 0, 0)
    }

    /// The current moment, presented in UTC.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// `period` before now.
    pub fn ago(period: &Period) -> Self {
        Self::now().minus(period)
    }

    /// `period` after now.
    pub fn from_now(period: &Period) -> Self {
        Self::now().plus(period)
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub fn epoch_millis(&self) -> i64 {
        self.moment.timestamp_millis()
    }

    /// Whole seconds since the epoch, rounded toward the past.
    #[inline]
    pub fn epoch_seconds(&self) -> i64 {
        self.moment.timestamp()
    }

    #[inline]
    pub const fn zone(&self) -> Zone {
        self.zone
    }

    /// The moment as a `chrono` UTC timestamp.
    #[inline]
    pub const fn to_utc(&self) -> DateTime<Utc> {
        self.moment
    }

    /// The UTC offset in force at this moment in this zone.
    #[inline]
    pub fn offset(&self) -> FixedOffset {
        self.zone.offset_at(&self.moment.naive_utc())
    }

    /// The moment as a `chrono` timestamp carrying the zone's offset.
    #[inline]
    pub fn to_offset_datetime(&self) -> DateTime<FixedOffset> {
        self.moment.with_timezone(&self.offset())
    }

    /// Wall-clock fields in this instant's zone.
    #[inline]
    pub fn naive_local(&self) -> NaiveDateTime {
        self.zone.local_fields(&self.moment)
    }

    #[inline]
    pub fn to_calendar_date_time(&self) -> CalendarDateTime {
        CalendarDateTime::from_naive(self.naive_local())
    }

    #[inline]
    pub fn to_calendar_date(&self) -> CalendarDate {
        CalendarDate::from_naive(self.naive_local().date())
    }

    // ── zone changes ──────────────────────────────────────────────────

    /// The same moment presented in another zone.
    #[inline]
    pub fn in_zone(&self, zone: Zone) -> Self {
        Self {
            moment: self.moment,
            zone,
        }
    }

    /// The same wall-clock fields read in another zone, which is in general a
    /// different moment.  Local times skipped in `zone` use the offset in
    /// force before the transition.
    pub fn with_local_fields_in(&self, zone: Zone) -> Self {
        let moment = zone.resolve_local_lenient(&self.naive_local());
        Self { moment, zone }
    }

    /// Midnight of the same local day, in the same zone.  Where midnight is
    /// skipped the first moment after the transition is used.
    pub fn at_start_of_day(&self) -> Self {
        let midnight = self.to_calendar_date().at_midnight().naive();
        Self {
            moment: self.zone.resolve_local_lenient(&midnight),
            zone: self.zone,
        }
    }

    /// `true` when both the moment and the presentation zone match.
    #[inline]
    pub fn same_zone_and_moment(&self, other: &Self) -> bool {
        self.moment == other.moment && self.zone == other.zone
    }

    pub(crate) fn with_moment(&self, moment: DateTime<Utc>) -> Self {
        Self::from_utc_in(moment, self.zone)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Generic trait implementations
// ═══════════════════════════════════════════════════════════════════════════

impl PartialEq for Instant {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.moment == other.moment
    }
}

impl Eq for Instant {}

impl PartialOrd for Instant {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Instant {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.moment.cmp(&other.moment)
    }
}

impl Hash for Instant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.moment.hash(state);
    }
}

// ── Display ───────────────────────────────────────────────────────────────

/// RFC 3339 with milliseconds, in the instant's own zone.
impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(
            &self
                .to_offset_datetime()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        )
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for Instant {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("Instant", 2)?;
        s.serialize_field("epoch_millis", &self.epoch_millis())?;
        s.serialize_field("zone", &self.zone)?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Instant {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            epoch_millis: i64,
            zone: Zone,
        }

        let raw = Raw::deserialize(deserializer)?;
        Instant::from_epoch_millis_in(raw.epoch_millis, raw.zone).map_err(serde::de::Error::custom)
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add<Period> for Instant {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Period) -> Self::Output {
        self.plus(&rhs)
    }
}

impl Sub<Period> for Instant {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Period) -> Self::Output {
        self.minus(&rhs)
    }
}

/// Exact elapsed time between two moments.
impl Sub for Instant {
    type Output = TimeDelta;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.moment - rhs.moment
    }
}

// ── From ──────────────────────────────────────────────────────────────────

impl From<DateTime<Utc>> for Instant {
    #[inline]
    fn from(moment: DateTime<Utc>) -> Self {
        Self::from_utc(moment)
    }
}

impl From<Instant> for DateTime<Utc> {
    #[inline]
    fn from(instant: Instant) -> Self {
        instant.moment
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TimeInstant trait
// ═══════════════════════════════════════════════════════════════════════════

/// Trait for values that mark a point on the time line.
///
/// Types implementing this trait can be used as endpoints of an
/// [`Interval`](crate::Interval).  Zone-less calendar values are placed on
/// the line by reading their fields as UTC.
pub trait TimeInstant: Copy + Ord + fmt::Debug + fmt::Display + Shift<Output = Self> {
    /// Position of this value as a UTC timestamp.
    fn to_utc(&self) -> DateTime<Utc>;

    /// Milliseconds since the Unix epoch.
    #[inline]
    fn epoch_millis(&self) -> i64 {
        self.to_utc().timestamp_millis()
    }

    /// Milliseconds from `other` to `self`.
    #[inline]
    fn difference(&self, other: &Self) -> i64 {
        self.epoch_millis() - other.epoch_millis()
    }
}

impl TimeInstant for Instant {
    #[inline]
    fn to_utc(&self) -> DateTime<Utc> {
        self.moment
    }
}

impl TimeInstant for CalendarDateTime {
    #[inline]
    fn to_utc(&self) -> DateTime<Utc> {
        self.naive().and_utc()
    }
}

impl TimeInstant for CalendarDate {
    #[inline]
    fn to_utc(&self) -> DateTime<Utc> {
        self.at_midnight().naive().and_utc()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
