// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Zone provider.
//!
//! A [`Zone`] is either a named rule from the IANA catalog shipped by
//! `chrono-tz`, or a fixed UTC offset in whole minutes.  The catalog index is
//! built lazily on first use and is read-only afterwards, so lookups are safe
//! from any thread.
//!
//! | Function | Purpose |
//! |----------|---------|
//! | [`for_id`] | resolve `"Europe/Madrid"`, `"UTC"` or `"+05:30"` |
//! | [`for_offset`] | fixed-offset zone from hours and minutes |
//! | [`utc`] | the UTC zone |
//! | [`default_zone`] | zone named by `TZ`, falling back to UTC |
//! | [`available_ids`] | every catalog identifier |

use crate::error::{Result, TimeError};
use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;
use once_cell::sync::{Lazy, OnceCell};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

const MINUTES_PER_HOUR: i32 = 60;
const SECONDS_PER_MINUTE: i32 = 60;

/// Catalog links whose rule is a constant zero offset.
const UTC_ALIASES: [&str; 17] = [
    "Etc/GMT",
    "Etc/GMT+0",
    "Etc/GMT-0",
    "Etc/GMT0",
    "Etc/Greenwich",
    "Etc/UCT",
    "Etc/UTC",
    "Etc/Universal",
    "Etc/Zulu",
    "GMT",
    "GMT+0",
    "GMT-0",
    "GMT0",
    "Greenwich",
    "UCT",
    "Universal",
    "Zulu",
];

/// Identifier → rule index over the whole `chrono-tz` catalog.
static CATALOG: Lazy<BTreeMap<&'static str, Tz>> = Lazy::new(|| {
    let catalog: BTreeMap<_, _> = chrono_tz::TZ_VARIANTS
        .iter()
        .map(|tz| (tz.name(), *tz))
        .collect();
    tracing::debug!(zones = catalog.len(), "time-zone catalog loaded");
    catalog
});

static DEFAULT_ZONE: OnceCell<Zone> = OnceCell::new();

/// A rule mapping absolute instants to local calendar fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    /// A region rule from the catalog, with its daylight-saving history.
    Named(Tz),
    /// A constant offset from UTC.
    Fixed(FixedOffset),
}

impl Zone {
    /// Coordinated Universal Time.
    pub const UTC: Zone = Zone::Named(Tz::UTC);

    /// `true` only for the canonical UTC zone.
    #[inline]
    pub fn is_utc(&self) -> bool {
        *self == Zone::UTC
    }

    /// Offset in force at the given UTC wall-clock time.
    pub fn offset_at(&self, utc: &NaiveDateTime) -> FixedOffset {
        match self {
            Zone::Named(tz) => tz.offset_from_utc_datetime(utc).fix(),
            Zone::Fixed(offset) => *offset,
        }
    }

    /// Local wall-clock fields of an absolute moment.
    pub fn local_fields(&self, moment: &DateTime<Utc>) -> NaiveDateTime {
        let utc = moment.naive_utc();
        utc + offset_delta(self.offset_at(&utc))
    }

    /// Absolute moment for local fields, or `None` when the local time is
    /// skipped by a transition.  Ambiguous times resolve to the earlier
    /// moment.
    pub fn resolve_local(&self, local: &NaiveDateTime) -> Option<DateTime<Utc>> {
        match self {
            Zone::Named(tz) => tz
                .from_local_datetime(local)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            Zone::Fixed(offset) => Some((*local - offset_delta(*offset)).and_utc()),
        }
    }

    /// Like [`Zone::resolve_local`], but a skipped local time is read with
    /// the offset in force before the transition.
    pub(crate) fn resolve_local_lenient(&self, local: &NaiveDateTime) -> DateTime<Utc> {
        self.resolve_local(local).unwrap_or_else(|| {
            let before = self.offset_at(&(*local - TimeDelta::days(1)));
            (*local - offset_delta(before)).and_utc()
        })
    }
}

impl Default for Zone {
    fn default() -> Self {
        Zone::UTC
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Named(tz) => f.write_str(tz.name()),
            Zone::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

impl FromStr for Zone {
    type Err = TimeError;

    fn from_str(s: &str) -> Result<Self> {
        for_id(s)
    }
}

/// Aliases of the zero-offset rule collapse to [`Zone::UTC`].
impl From<Tz> for Zone {
    fn from(tz: Tz) -> Self {
        if is_utc_alias(&tz) {
            Zone::UTC
        } else {
            Zone::Named(tz)
        }
    }
}

fn is_utc_alias(tz: &Tz) -> bool {
    UTC_ALIASES.contains(&tz.name())
}

impl From<FixedOffset> for Zone {
    fn from(offset: FixedOffset) -> Self {
        if offset.local_minus_utc() == 0 {
            Zone::UTC
        } else {
            Zone::Fixed(offset)
        }
    }
}

fn offset_delta(offset: FixedOffset) -> TimeDelta {
    TimeDelta::seconds(i64::from(offset.local_minus_utc()))
}

/// The UTC zone.
#[inline]
pub fn utc() -> Zone {
    Zone::UTC
}

/// Resolve a zone identifier.
///
/// Accepts catalog ids (`"America/New_York"`), `"Z"`, and signed offsets in
/// `±HH:MM` or `±HHMM` form.  Every spelling of UTC (`"Etc/UTC"`, `"Zulu"`,
/// `"GMT"`, `"+00:00"` ...) resolves to [`Zone::UTC`].
pub fn for_id(id: &str) -> Result<Zone> {
    let id = id.trim();
    if id == "Z" {
        return Ok(Zone::UTC);
    }
    if let Some(tz) = CATALOG.get(id) {
        return Ok(Zone::from(*tz));
    }
    parse_offset(id).ok_or_else(|| TimeError::UnknownZone(id.to_string()))
}

/// Fixed-offset zone.  The sign of `hours` applies to `minutes` as well;
/// `for_offset(-3, 30)` is `-03:30`.  A zero offset yields [`Zone::UTC`].
pub fn for_offset(hours: i32, minutes: i32) -> Result<Zone> {
    if !(-23..=23).contains(&hours) || !(0..MINUTES_PER_HOUR).contains(&minutes) {
        return Err(TimeError::UnknownZone(format!(
            "offset {hours:+03}:{minutes:02}"
        )));
    }
    let total = if hours < 0 {
        hours * MINUTES_PER_HOUR - minutes
    } else {
        hours * MINUTES_PER_HOUR + minutes
    };
    FixedOffset::east_opt(total * SECONDS_PER_MINUTE)
        .map(Zone::from)
        .ok_or_else(|| TimeError::UnknownZone(format!("offset {hours:+03}:{minutes:02}")))
}

fn parse_offset(id: &str) -> Option<Zone> {
    let (sign, rest) = match id.as_bytes().first()? {
        b'+' => (1, &id[1..]),
        b'-' => (-1, &id[1..]),
        _ => return None,
    };
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if hours > 23 || minutes >= MINUTES_PER_HOUR {
        return None;
    }
    let total = sign * (hours * MINUTES_PER_HOUR + minutes);
    FixedOffset::east_opt(total * SECONDS_PER_MINUTE).map(Zone::from)
}

/// The process default zone.
///
/// Resolved once from the `TZ` environment variable (a leading `:` is
/// ignored); unknown or missing values fall back to UTC.  Use
/// [`set_default_zone`] before first use to pin it explicitly.
pub fn default_zone() -> Zone {
    *DEFAULT_ZONE.get_or_init(|| {
        let zone = match std::env::var("TZ") {
            Ok(raw) => {
                let id = raw.trim_start_matches(':');
                for_id(id).unwrap_or_else(|_| {
                    tracing::warn!(tz = %raw, "TZ names an unknown zone, using UTC");
                    Zone::UTC
                })
            }
            Err(_) => Zone::UTC,
        };
        tracing::debug!(%zone, "default zone initialised");
        zone
    })
}

/// Install the default zone.  Returns `false` if it was already initialised,
/// in which case the existing value is kept.
pub fn set_default_zone(zone: Zone) -> bool {
    DEFAULT_ZONE.set(zone).is_ok()
}

/// Every identifier in the catalog, in lexical order.
pub fn available_ids() -> impl Iterator<Item = &'static str> {
    CATALOG.keys().copied()
}

/// Every distinct named zone in the catalog, in identifier order.  UTC
/// appears once, under its canonical name.
pub fn catalog_zones() -> impl Iterator<Item = Zone> {
    CATALOG
        .values()
        .filter(|tz| !is_utc_alias(tz))
        .map(|tz| Zone::Named(*tz))
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for Zone {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Zone {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ZoneVisitor;

        impl de::Visitor<'_> for ZoneVisitor {
            type Value = Zone;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a time-zone id or ±HH:MM offset")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Zone, E> {
                for_id(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(ZoneVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn naive(y: i32, m: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap()
    }

    #[test]
    fn resolves_catalog_ids() {
        let zone = for_id("Europe/Madrid").unwrap();
        assert_eq!(zone, Zone::Named(chrono_tz::Europe::Madrid));
        assert_eq!(zone.to_string(), "Europe/Madrid");
    }

    #[test]
    fn unknown_id_is_an_error() {
        assert_eq!(
            for_id("Atlantis/Capital"),
            Err(TimeError::UnknownZone("Atlantis/Capital".into()))
        );
    }

    #[test]
    fn offsets_parse_in_both_spellings() {
        let a = for_id("+05:30").unwrap();
        let b = for_id("+0530").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, for_offset(5, 30).unwrap());
        assert_eq!(for_id("-03:30").unwrap(), for_offset(-3, 30).unwrap());
        assert_eq!(for_id("-00:30").unwrap().to_string(), "-00:30");
    }

    #[test]
    fn zero_offset_is_utc() {
        assert!(for_offset(0, 0).unwrap().is_utc());
        assert!(for_id("Z").unwrap().is_utc());
        assert!(for_id("UTC").unwrap().is_utc());
    }

    #[test]
    fn offset_out_of_range_is_rejected() {
        assert!(for_offset(24, 0).is_err());
        assert!(for_offset(1, 60).is_err());
    }

    #[test]
    fn catalog_enumerates_known_ids() {
        let ids: Vec<_> = available_ids().collect();
        assert!(ids.contains(&"UTC"));
        assert!(ids.contains(&"Asia/Tokyo"));
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        let aliases = ids.iter().filter(|id| UTC_ALIASES.contains(id)).count();
        assert_eq!(catalog_zones().count(), ids.len() - aliases);
        assert_eq!(catalog_zones().filter(Zone::is_utc).count(), 1);
    }

    #[test]
    fn utc_aliases_are_the_utc_zone() {
        for id in ["Etc/UTC", "Etc/Zulu", "Zulu", "UCT", "Universal", "GMT", "Etc/GMT"] {
            let zone = for_id(id).unwrap();
            assert_eq!(zone, Zone::UTC, "{id}");
            assert!(zone.is_utc(), "{id}");
            assert_eq!(zone.to_string(), "UTC");
        }
        assert_eq!(Zone::from(chrono_tz::Etc::UTC), Zone::UTC);
        assert_ne!(for_id("Europe/London").unwrap(), Zone::UTC);
    }

    #[test]
    fn local_fields_follow_daylight_saving() {
        let ny = for_id("America/New_York").unwrap();
        let winter = naive(2024, 1, 15, 12, 0).and_utc();
        let summer = naive(2024, 7, 15, 12, 0).and_utc();
        assert_eq!(ny.local_fields(&winter), naive(2024, 1, 15, 7, 0));
        assert_eq!(ny.local_fields(&summer), naive(2024, 7, 15, 8, 0));
    }

    #[test]
    fn skipped_local_time_resolves_leniently() {
        let ny = for_id("America/New_York").unwrap();
        // 02:30 does not exist on 2024-03-10 in New York.
        let local = naive(2024, 3, 10, 2, 30);
        assert_eq!(ny.resolve_local(&local), None);
        let moment = ny.resolve_local_lenient(&local);
        assert_eq!(moment.naive_utc(), naive(2024, 3, 10, 7, 30));
    }

    #[test]
    fn ambiguous_local_time_takes_earlier_moment() {
        let ny = for_id("America/New_York").unwrap();
        let local = naive(2024, 11, 3, 1, 30);
        let moment = ny.resolve_local(&local).unwrap();
        assert_eq!(moment.naive_utc(), naive(2024, 11, 3, 5, 30));
    }

    #[test]
    fn default_zone_is_stable() {
        assert_eq!(default_zone(), default_zone());
    }
}
