// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil Time Algebra
//!
//! Zone-aware instants, zone-less calendar values, calendar-relative periods
//! and half-open intervals, with one coercion entry point and a bounded
//! random generator.
//!
//! # Core types
//!
//! - [`Instant`]: an absolute moment (epoch milliseconds) presented in a [`Zone`].
//! - [`CalendarDate`] / [`CalendarDateTime`]: calendar fields with no zone.
//! - [`YearMonth`]: a month of a year.
//! - [`Period`]: signed offsets per [`Unit`], applied calendar-aware.
//! - [`Interval<T>`]: a half-open span over any [`TimeInstant`].
//! - [`TimeValue`]: any of the three point-in-time kinds.
//!
//! # Capabilities
//!
//! | Trait | Operations | Implemented by |
//! |-------|------------|----------------|
//! | [`CalendarFields`] | `year` … `milli`, `day_of_week` | instants, calendar values, [`TimeValue`] |
//! | [`Shift`] | `plus`, `minus`, `plus_all`, `minus_all` | the above plus [`Interval`] |
//! | [`TimeOrd`] | `before`, `after` | point values and intervals, in any pairing |
//!
//! # Coercion and text
//!
//! [`coerce::to_instant`] accepts every [`TimeSource`] kind (epoch counts,
//! text, `chrono` and platform dates, calendar values, `None`) and the
//! remaining `coerce::to_*` functions derive from it.  Text goes through a
//! [`TextFormat`], by default the ordered [`Formats`] list.
//!
//! # Zones
//!
//! The [`zone`] module resolves IANA identifiers and fixed offsets.  The
//! default zone comes from the `TZ` environment variable and falls back to
//! UTC.
//!
//! # Example
//!
//! ```
//! use tempora::{CalendarFields, Instant, Interval, Period, Shift, TimeOrd, Unit};
//!
//! let start = Instant::from_utc_date(1986, 10, 14)?;
//! let end = start.plus_all(&[Period::new().months(1), Period::new().weeks(3)]);
//! assert_eq!((end.month(), end.day()), (12, 5));
//!
//! let interval = Interval::new(start, end)?;
//! assert_eq!(interval.duration_in(Unit::Weeks), 7);
//! assert!(start.before(&end));
//! # Ok::<(), tempora::TimeError>(())
//! ```

mod calendar;
pub mod coerce;
mod error;
mod fields;
mod format;
pub mod generate;
mod instant;
mod interval;
mod ordering;
mod period;
mod shift;
mod value;
pub mod zone;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use calendar::{days_in_month, is_leap_year, CalendarDate, CalendarDateTime, YearMonth};
pub use coerce::{to_instant, TimeSource};
pub use error::{Result, TimeError};
pub use fields::CalendarFields;
pub use format::{parse, Format, Formats, TextFormat};
pub use generate::{EraWindow, GenConfig, Generator, Kind, ZonePool};
pub use instant::{Instant, TimeInstant};
pub use interval::{complement_within, intersect_intervals, Interval};
pub use ordering::{earliest, latest, TimeOrd};
pub use period::{Period, Unit};
pub use shift::Shift;
pub use value::TimeValue;
pub use zone::Zone;
