// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Bounded random generation of point-in-time values.
//!
//! A [`GenConfig`] names the era windows to draw from and the zones to
//! present instants in.  A draw picks a window uniformly, a millisecond
//! uniformly inside it, and a zone uniformly from the pool, then lifts the
//! result to the requested [`Kind`]:
//!
//! | Kind | Result |
//! |------|--------|
//! | [`Kind::Instant`] | instant in the drawn zone |
//! | [`Kind::UtcInstant`] | instant in UTC |
//! | [`Kind::Date`] | date of the drawn zone's wall clock |
//! | [`Kind::DateTime`] | wall-clock fields of the drawn zone |
//!
//! Every drawn value satisfies [`GenConfig::admits`].  The random source is
//! always passed in, so seeded runs are reproducible.
//!
//! ```
//! use rand::{rngs::StdRng, SeedableRng};
//! use tempora::generate::{self, EraWindow, GenConfig, Kind, ZonePool};
//!
//! let config = GenConfig::new([EraWindow::modern()], ZonePool::utc_only())?;
//! let mut rng = StdRng::seed_from_u64(7);
//! let value = generate::draw(&config, Kind::Instant, &mut rng);
//! assert!(config.admits(Kind::Instant, &value));
//! # Ok::<(), tempora::TimeError>(())
//! ```

use crate::error::{Result, TimeError};
use crate::instant::{Instant, TimeInstant};
use crate::interval::Interval;
use crate::value::TimeValue;
use crate::zone::{self, Zone};
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Widest distance between a drawn instant and its wall-clock fields read
/// as UTC: the largest zone offset plus truncation to the start of a day.
const WALL_CLOCK_SLACK: i64 = 2 * 86_400_000;

const Y1970: i64 = 0;
const Y2000: i64 = 946_684_800_000;
const Y2030: i64 = 1_893_456_000_000;
const Y2050: i64 = 2_524_608_000_000;

// ═══════════════════════════════════════════════════════════════════════════
// EraWindow
// ═══════════════════════════════════════════════════════════════════════════

/// A named half-open range `[start, end)` of epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EraWindow {
    name: String,
    start: i64,
    end: i64,
}

impl EraWindow {
    /// Fails with [`TimeError::InvalidInterval`] for an empty or reversed
    /// range, and with [`TimeError::InvalidCalendarValue`] when an end is
    /// not a representable instant.
    pub fn new(name: impl Into<String>, start: i64, end: i64) -> Result<Self> {
        let first = Instant::from_epoch_millis(start)?;
        let last = Instant::from_epoch_millis(end)?;
        if start >= end {
            return Err(TimeError::invalid_interval(&first, &last));
        }
        Ok(Self {
            name: name.into(),
            start,
            end,
        })
    }

    /// Window spanning `[start, end)`.
    pub fn between(name: impl Into<String>, start: &Instant, end: &Instant) -> Result<Self> {
        Self::new(name, start.epoch_millis(), end.epoch_millis())
    }

    /// `[1970, 2000)`.
    pub fn unix_epoch_era() -> Self {
        Self::preset("unix-epoch-era", Y1970, Y2000)
    }

    /// `[2000, 2030)`.
    pub fn modern() -> Self {
        Self::preset("modern", Y2000, Y2030)
    }

    /// `[2030, 2050)`.
    pub fn near_future() -> Self {
        Self::preset("near-future", Y2030, Y2050)
    }

    fn preset(name: &str, start: i64, end: i64) -> Self {
        Self {
            name: name.to_owned(),
            start,
            end,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn start_millis(&self) -> i64 {
        self.start
    }

    #[inline]
    pub fn end_millis(&self) -> i64 {
        self.end
    }

    #[inline]
    pub fn contains(&self, millis: i64) -> bool {
        self.start <= millis && millis < self.end
    }

    /// The window as a UTC interval.
    pub fn to_interval(&self) -> Interval {
        let bound = |ms| Instant::from_utc(self.moment(ms));
        Interval::new(bound(self.start), bound(self.end))
            .expect("era window start precedes its end")
    }

    fn moment(&self, millis: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(millis).expect("era window bounds are representable")
    }

    /// A millisecond drawn uniformly from the window.
    pub fn sample_millis<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        rng.gen_range(self.start..self.end)
    }
}

impl fmt::Display for EraWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}, {})", self.name, self.start, self.end)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// ZonePool
// ═══════════════════════════════════════════════════════════════════════════

/// The zones drawn instants may be presented in.  Never empty: UTC is
/// always a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZonePool {
    zones: Vec<Zone>,
}

impl ZonePool {
    /// Only UTC.
    pub fn utc_only() -> Self {
        Self {
            zones: vec![Zone::UTC],
        }
    }

    /// Every zone in the catalog.
    pub fn catalog() -> Self {
        Self::from_zones(zone::catalog_zones())
    }

    /// UTC plus up to `n` distinct catalog zones chosen at random.
    pub fn sampled<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Self {
        let catalog: Vec<Zone> = zone::catalog_zones().collect();
        Self::from_zones(catalog.choose_multiple(rng, n).copied())
    }

    /// The given zones, deduplicated in first-seen order, with UTC added when
    /// missing.
    pub fn from_zones(zones: impl IntoIterator<Item = Zone>) -> Self {
        let mut pool = Self::utc_only();
        for zone in zones {
            if !pool.zones.contains(&zone) {
                pool.zones.push(zone);
            }
        }
        pool
    }

    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Always `false`: the pool holds UTC.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        false
    }

    pub fn contains(&self, zone: &Zone) -> bool {
        self.zones.contains(zone)
    }

    /// A zone drawn uniformly from the pool.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Zone {
        self.zones[rng.gen_range(0..self.zones.len())]
    }
}

impl Default for ZonePool {
    fn default() -> Self {
        Self::utc_only()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Kind
// ═══════════════════════════════════════════════════════════════════════════

/// The kind of value to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Instant,
    UtcInstant,
    Date,
    DateTime,
}

impl Kind {
    pub const ALL: [Kind; 4] = [Kind::Instant, Kind::UtcInstant, Kind::Date, Kind::DateTime];

    /// `true` if `value` has the shape this kind produces.
    pub fn admits(&self, value: &TimeValue) -> bool {
        match (self, value) {
            (Kind::Instant, TimeValue::Instant(_)) => true,
            (Kind::UtcInstant, TimeValue::Instant(t)) => t.zone().is_utc(),
            (Kind::Date, TimeValue::Date(_)) => true,
            (Kind::DateTime, TimeValue::DateTime(_)) => true,
            _ => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// GenConfig
// ═══════════════════════════════════════════════════════════════════════════

/// Era windows and zone pool for a generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenConfig {
    eras: Vec<EraWindow>,
    zones: ZonePool,
}

impl GenConfig {
    /// Fails with [`TimeError::InvalidGeneratorConfig`] when `eras` is empty.
    pub fn new(eras: impl IntoIterator<Item = EraWindow>, zones: ZonePool) -> Result<Self> {
        let eras: Vec<EraWindow> = eras.into_iter().collect();
        if eras.is_empty() {
            return Err(TimeError::InvalidGeneratorConfig(
                "at least one era window is required".into(),
            ));
        }
        Ok(Self { eras, zones })
    }

    pub fn eras(&self) -> &[EraWindow] {
        &self.eras
    }

    pub fn zones(&self) -> &ZonePool {
        &self.zones
    }

    /// Replace the zone pool.
    pub fn with_zones(mut self, zones: ZonePool) -> Self {
        self.zones = zones;
        self
    }

    /// `true` if `value` could have been drawn for `kind` from this
    /// configuration.
    ///
    /// Instants must fall inside a window and use a pooled zone.  Calendar
    /// values carry no zone, so their fields read as UTC may sit up to two
    /// days outside a window.
    pub fn admits(&self, kind: Kind, value: &TimeValue) -> bool {
        if !kind.admits(value) {
            return false;
        }
        match value {
            TimeValue::Instant(t) => {
                self.zones.contains(&t.zone())
                    && self.eras.iter().any(|w| w.contains(t.epoch_millis()))
            }
            TimeValue::Date(d) => self.near_a_window(d.epoch_millis()),
            TimeValue::DateTime(dt) => self.near_a_window(dt.epoch_millis()),
        }
    }

    fn near_a_window(&self, millis: i64) -> bool {
        self.eras
            .iter()
            .any(|w| w.start - WALL_CLOCK_SLACK <= millis && millis < w.end + WALL_CLOCK_SLACK)
    }

    fn pick_window<R: Rng + ?Sized>(&self, rng: &mut R) -> &EraWindow {
        &self.eras[rng.gen_range(0..self.eras.len())]
    }
}

/// All three presets, UTC only.
impl Default for GenConfig {
    fn default() -> Self {
        Self {
            eras: vec![
                EraWindow::unix_epoch_era(),
                EraWindow::modern(),
                EraWindow::near_future(),
            ],
            zones: ZonePool::utc_only(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Drawing
// ═══════════════════════════════════════════════════════════════════════════

/// Draw an instant in a zone from the pool.
pub fn draw_instant<R: Rng + ?Sized>(config: &GenConfig, rng: &mut R) -> Instant {
    let window = config.pick_window(rng);
    let millis = window.sample_millis(rng);
    let zone = config.zones.pick(rng);
    tracing::trace!(window = window.name(), millis, %zone, "drew instant");
    Instant::from_utc_in(window.moment(millis), zone)
}

/// Draw one value of `kind`.
pub fn draw<R: Rng + ?Sized>(config: &GenConfig, kind: Kind, rng: &mut R) -> TimeValue {
    let instant = draw_instant(config, rng);
    match kind {
        Kind::Instant => TimeValue::Instant(instant),
        Kind::UtcInstant => TimeValue::Instant(instant.in_zone(Zone::UTC)),
        Kind::Date => TimeValue::Date(instant.to_calendar_date()),
        Kind::DateTime => TimeValue::DateTime(instant.to_calendar_date_time()),
    }
}

/// Draw `count` values of `kind`.
pub fn draw_many<R: Rng + ?Sized>(
    config: &GenConfig,
    kind: Kind,
    count: usize,
    rng: &mut R,
) -> Vec<TimeValue> {
    (0..count).map(|_| draw(config, kind, rng)).collect()
}

/// A configuration bundled with its own seeded random source.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GenConfig,
    rng: StdRng,
}

impl Generator {
    /// Reproducible generator: the same seed yields the same sequence.
    pub fn seeded(config: GenConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from the operating system.
    pub fn from_entropy(config: GenConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn config(&self) -> &GenConfig {
        &self.config
    }

    pub fn draw(&mut self, kind: Kind) -> TimeValue {
        draw(&self.config, kind, &mut self.rng)
    }

    pub fn draw_instant(&mut self) -> Instant {
        draw_instant(&self.config, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::CalendarFields;
    use std::collections::HashSet;

    const LOW: i64 = 512_059_771_000;
    const HIGH: i64 = 1_484_928_000_000;

    #[test]
    fn presets_match_their_years() {
        let start = |w: EraWindow| Instant::from_epoch_millis(w.start_millis()).unwrap().year();
        assert_eq!(start(EraWindow::unix_epoch_era()), 1970);
        assert_eq!(start(EraWindow::modern()), 2000);
        assert_eq!(start(EraWindow::near_future()), 2030);
        assert_eq!(EraWindow::near_future().end_millis(), Y2050);
        assert_eq!(
            EraWindow::modern().to_interval().end(),
            Instant::from_utc_date(2030, 1, 1).unwrap()
        );
    }

    #[test]
    fn empty_or_reversed_windows_are_rejected() {
        assert!(matches!(
            EraWindow::new("empty", 5, 5),
            Err(TimeError::InvalidInterval { .. })
        ));
        assert!(EraWindow::new("reversed", 10, 5).is_err());
        assert!(EraWindow::new("huge", 0, i64::MAX).is_err());
        assert!(EraWindow::new("ok", 5, 6).is_ok());
    }

    #[test]
    fn config_needs_an_era() {
        let err = GenConfig::new([], ZonePool::utc_only()).unwrap_err();
        assert!(matches!(err, TimeError::InvalidGeneratorConfig(_)));
    }

    #[test]
    fn pools_always_hold_utc() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(ZonePool::utc_only().zones(), &[Zone::UTC]);
        assert!(ZonePool::catalog().contains(&Zone::UTC));
        assert!(ZonePool::catalog().len() > 300);

        let sampled = ZonePool::sampled(5, &mut rng);
        assert!(sampled.contains(&Zone::UTC));
        assert!(sampled.len() >= 5 && sampled.len() <= 6);

        let tokyo = zone::for_id("Asia/Tokyo").unwrap();
        let pool = ZonePool::from_zones([tokyo, tokyo]);
        assert_eq!(pool.zones(), &[Zone::UTC, tokyo]);
        assert!(!pool.is_empty());
    }

    #[test]
    fn utc_only_window_stays_in_range() {
        let window = EraWindow::new("test", LOW, HIGH).unwrap();
        let config = GenConfig::new([window], ZonePool::utc_only()).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10_000 {
            let t = draw_instant(&config, &mut rng);
            assert!(LOW <= t.epoch_millis() && t.epoch_millis() < HIGH);
            assert!(t.zone().is_utc());
        }
    }

    #[test]
    fn every_kind_is_admitted() {
        let config = GenConfig::default().with_zones(ZonePool::catalog());
        let mut rng = StdRng::seed_from_u64(9);
        for kind in Kind::ALL {
            for value in draw_many(&config, kind, 500, &mut rng) {
                assert!(config.admits(kind, &value), "{kind:?} {value}");
            }
        }
    }

    #[test]
    fn kinds_reject_other_shapes() {
        let tokyo = Instant::from_epoch_millis(LOW)
            .unwrap()
            .in_zone(zone::for_id("Asia/Tokyo").unwrap());
        let value = TimeValue::Instant(tokyo);
        assert!(Kind::Instant.admits(&value));
        assert!(!Kind::UtcInstant.admits(&value));
        assert!(!Kind::Date.admits(&value));

        let config = GenConfig::default();
        assert!(!config.admits(Kind::Instant, &value), "zone not pooled");
        let outside = TimeValue::Instant(Instant::from_utc_date(2060, 1, 1).unwrap());
        assert!(!config.admits(Kind::Instant, &outside));
    }

    #[test]
    fn utc_aliases_count_as_utc_instants() {
        let etc_utc = Instant::from_epoch_millis(LOW)
            .unwrap()
            .in_zone(zone::for_id("Etc/UTC").unwrap());
        let value = TimeValue::Instant(etc_utc);
        assert!(Kind::UtcInstant.admits(&value));
        assert_eq!(
            ZonePool::from_zones([zone::for_id("Zulu").unwrap()]),
            ZonePool::utc_only()
        );
    }

    #[test]
    fn instants_vary_their_zone() {
        let tokyo = zone::for_id("Asia/Tokyo").unwrap();
        let ny = zone::for_id("America/New_York").unwrap();
        let config = GenConfig::default().with_zones(ZonePool::from_zones([tokyo, ny]));
        let mut rng = StdRng::seed_from_u64(3);
        let seen: HashSet<Zone> = (0..300)
            .map(|_| draw_instant(&config, &mut rng).zone())
            .collect();
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn seeded_generators_repeat() {
        let mut a = Generator::seeded(GenConfig::default(), 11);
        let mut b = Generator::seeded(GenConfig::default(), 11);
        for kind in Kind::ALL {
            assert_eq!(a.draw(kind), b.draw(kind));
        }
        assert_eq!(a.draw_instant(), b.draw_instant());
    }
}
