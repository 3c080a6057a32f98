// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Text parsing and formatting of instants.
//!
//! [`Formats`] is an ordered list of [`Format`]s; parsing tries each in turn
//! and the first match wins.  Forms without an offset are read as UTC.
//!
//! | Format | Example |
//! |--------|---------|
//! | [`Format::Rfc3339`] | `1986-03-24T14:49:31.000+02:00` |
//! | [`Format::IsoDateTime`] | `1986-03-24T14:49:31.250` |
//! | [`Format::IsoDateTimeSpace`] | `1986-03-24 14:49:31` |
//! | [`Format::IsoDate`] | `1986-03-24` |
//! | [`Format::BasicDate`] | `19860324` |
//! | [`Format::BasicDateTime`] | `19860324T144931Z` |
//! | [`Format::Rfc2822`] | `Mon, 24 Mar 1986 14:49:31 +0000` |

use crate::error::{Result, TimeError};
use crate::instant::Instant;
use crate::zone::Zone;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat};
use std::str::FromStr;

/// Text collaborator: reads and writes instants.
pub trait TextFormat {
    fn parse(&self, text: &str) -> Result<Instant>;
    fn format(&self, instant: &Instant) -> String;
}

/// A single accepted text form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Rfc3339,
    IsoDateTime,
    IsoDateTimeSpace,
    IsoDate,
    BasicDate,
    BasicDateTime,
    Rfc2822,
}

impl Format {
    /// Every form, in default parse order.
    pub const ALL: [Format; 7] = [
        Format::Rfc3339,
        Format::IsoDateTime,
        Format::IsoDateTimeSpace,
        Format::IsoDate,
        Format::BasicDate,
        Format::BasicDateTime,
        Format::Rfc2822,
    ];

    /// Parse `text` in this form, or `None` if it does not match.
    pub fn try_parse(&self, text: &str) -> Option<Instant> {
        match self {
            Format::Rfc3339 => DateTime::parse_from_rfc3339(text).ok().map(with_offset),
            Format::Rfc2822 => DateTime::parse_from_rfc2822(text).ok().map(with_offset),
            Format::IsoDateTime => {
                naive_date_time(text, &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"])
            }
            Format::IsoDateTimeSpace => {
                naive_date_time(text, &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"])
            }
            Format::IsoDate => naive_date(text, "%Y-%m-%d"),
            Format::BasicDate => {
                if text.len() == 8 && text.bytes().all(|b| b.is_ascii_digit()) {
                    naive_date(text, "%Y%m%d")
                } else {
                    None
                }
            }
            Format::BasicDateTime => {
                let text = text.strip_suffix('Z').unwrap_or(text);
                naive_date_time(text, &["%Y%m%dT%H%M%S%.f"])
            }
        }
    }
}

impl TextFormat for Format {
    fn parse(&self, text: &str) -> Result<Instant> {
        self.try_parse(text.trim())
            .ok_or_else(|| TimeError::Parse(text.to_owned()))
    }

    /// Render in this form.  Offset-less forms show the wall-clock fields in
    /// the instant's zone.
    fn format(&self, instant: &Instant) -> String {
        let local = instant.naive_local();
        match self {
            Format::Rfc3339 => instant
                .to_offset_datetime()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            Format::Rfc2822 => instant.to_offset_datetime().to_rfc2822(),
            Format::IsoDateTime => local.format("%Y-%m-%dT%H:%M:%S%.3f").to_string(),
            Format::IsoDateTimeSpace => local.format("%Y-%m-%d %H:%M:%S%.3f").to_string(),
            Format::IsoDate => local.format("%Y-%m-%d").to_string(),
            Format::BasicDate => local.format("%Y%m%d").to_string(),
            Format::BasicDateTime => local.format("%Y%m%dT%H%M%S").to_string(),
        }
    }
}

fn with_offset(dt: DateTime<FixedOffset>) -> Instant {
    Instant::from_utc_in(dt.to_utc(), Zone::from(*dt.offset()))
}

fn naive_date_time(text: &str, patterns: &[&str]) -> Option<Instant> {
    patterns
        .iter()
        .find_map(|p| NaiveDateTime::parse_from_str(text, p).ok())
        .map(|local| Instant::from_utc(local.and_utc()))
}

fn naive_date(text: &str, pattern: &str) -> Option<Instant> {
    NaiveDate::parse_from_str(text, pattern)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|local| Instant::from_utc(local.and_utc()))
}

/// An ordered list of accepted forms.
///
/// # Examples
///
/// ```
/// use tempora::{Format, Formats, TextFormat};
///
/// let formats = Formats::default();
/// let t = formats.parse("1986-03-24T14:49:31Z")?;
/// assert_eq!(t.epoch_millis(), 512_059_771_000);
/// assert_eq!(formats.format(&t), "1986-03-24T14:49:31.000Z");
///
/// let dates_only = Formats::new([Format::IsoDate]);
/// assert!(dates_only.parse("1986-03-24T14:49:31Z").is_err());
/// # Ok::<(), tempora::TimeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formats {
    accepted: Vec<Format>,
}

impl Formats {
    /// Accept exactly `formats`, tried in the given order.  An empty list
    /// rejects every input.
    pub fn new(formats: impl IntoIterator<Item = Format>) -> Self {
        Self {
            accepted: formats.into_iter().collect(),
        }
    }

    pub fn accepted(&self) -> &[Format] {
        &self.accepted
    }

    /// Try `format` before the forms already accepted.
    pub fn prefer(mut self, format: Format) -> Self {
        self.accepted.retain(|f| *f != format);
        self.accepted.insert(0, format);
        self
    }
}

impl Default for Formats {
    fn default() -> Self {
        Self {
            accepted: Format::ALL.to_vec(),
        }
    }
}

impl TextFormat for Formats {
    fn parse(&self, text: &str) -> Result<Instant> {
        let trimmed = text.trim();
        for format in &self.accepted {
            match format.try_parse(trimmed) {
                Some(instant) => return Ok(instant),
                None => tracing::trace!(?format, text = trimmed, "text format did not match"),
            }
        }
        Err(TimeError::Parse(text.to_owned()))
    }

    /// RFC 3339 with milliseconds in the instant's zone.
    fn format(&self, instant: &Instant) -> String {
        Format::Rfc3339.format(instant)
    }
}

/// Parse with the default [`Formats`].
pub fn parse(text: &str) -> Result<Instant> {
    Formats::default().parse(text)
}

impl FromStr for Instant {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}
