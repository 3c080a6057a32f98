use qtty::{Days, Seconds};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempora::generate::{self, EraWindow, GenConfig, Kind, ZonePool};
use tempora::{
    coerce, complement_within, intersect_intervals, zone, CalendarDate, CalendarFields, Instant,
    Interval, Period, Shift, TimeOrd, TimeSource, TimeValue, Unit,
};

#[test]
fn epoch_millis_roundtrip_through_coercion() {
    let t = Instant::from_epoch_millis(512_059_771_000).unwrap();
    let millis = coerce::to_epoch_millis(t).unwrap();
    let back = coerce::to_instant(millis).unwrap().unwrap();
    assert_eq!(back, t);
    assert_eq!(back.to_string(), "1986-03-24T14:49:31.000Z");
}

#[test]
fn month_then_three_weeks() {
    let t = coerce::to_instant("1986-10-14").unwrap().unwrap();
    let shifted = t.plus_all(&[Period::new().months(1), Period::new().weeks(3)]);
    assert_eq!(coerce::to_text(shifted).unwrap().as_deref(), Some("1986-12-05T00:00:00.000Z"));
}

#[test]
fn four_year_interval() {
    let start = coerce::to_instant("1986-01-01").unwrap().unwrap();
    let end = coerce::to_instant("1990-01-01").unwrap().unwrap();
    let interval = Interval::new(start, end).unwrap();

    let inside = coerce::to_instant("1987-06-01").unwrap().unwrap();
    assert!(interval.contains(&inside));
    assert!(!interval.contains(&end));
    assert_eq!(interval.in_years(), 4);
    assert_eq!(interval.duration_days(), Days::new(1461.0));

    assert!(inside.after(&start));
    assert!(!inside.after(&interval));
    assert!(end.after(&interval));
}

#[test]
fn interval_set_ops_match_expected_intervals() {
    let day = |d| Instant::from_utc_date(2024, 1, d).unwrap();
    let span = |a, b| Interval::new(day(a), day(b)).unwrap();

    let outer = span(1, 11);
    let a = vec![span(2, 4), span(6, 10)];
    let b = vec![span(3, 5), span(8, 9)];

    let below_b = complement_within(outer, &b);
    let between = intersect_intervals(&a, &below_b);

    assert_eq!(between, vec![span(2, 3), span(6, 8), span(9, 10)]);
    assert_eq!(between[1].duration_seconds(), Seconds::new(2.0 * 86_400.0));
}

#[test]
fn zoned_fields_and_shift_keep_the_zone() {
    let madrid = zone::for_id("Europe/Madrid").unwrap();
    let t = Instant::from_fields(2024, 3, 30, 12, 0, 0, 0, madrid).unwrap();
    assert_eq!(t.offset().local_minus_utc(), 3_600);

    // Spring forward happens overnight; a calendar day keeps noon, a fixed
    // 24 hours does not.
    let next_month = t.plus(&Period::new().months(1));
    assert_eq!((next_month.month(), next_month.day(), next_month.hour()), (4, 30, 12));
    assert_eq!(next_month.offset().local_minus_utc(), 7_200);
    let next_day = t.plus(&Period::new().days(1));
    assert_eq!(next_day.hour(), 13);
    assert_eq!(next_day.zone(), madrid);
}

#[test]
fn duration_across_dst_and_leap_years() {
    let ny = zone::for_id("America/New_York").unwrap();
    let a = Instant::from_fields(2024, 11, 2, 12, 0, 0, 0, ny).unwrap();
    let b = Instant::from_fields(2024, 11, 3, 12, 0, 0, 0, ny).unwrap();
    let fall_back = Interval::new(a, b).unwrap();
    assert_eq!(fall_back.in_hours(), 25);
    assert_eq!(fall_back.in_days(), 1);

    let leap = Interval::new(
        CalendarDate::new(2023, 3, 1).unwrap(),
        CalendarDate::new(2024, 3, 1).unwrap(),
    )
    .unwrap();
    assert_eq!(leap.in_days(), 366);
    assert_eq!(leap.in_years(), 1);
    assert_eq!(leap.duration_in(Unit::Months), 12);
}

#[test]
fn absent_values_flow_through() {
    let missing: Option<&str> = None;
    assert_eq!(coerce::to_instant(missing), Ok(None));
    assert_eq!(coerce::to_epoch_millis(TimeSource::Absent), Ok(None));
    assert_eq!(coerce::to_calendar_date(None::<i64>), Ok(None));
}

#[test]
fn leap_second_text_keeps_fields_in_range() {
    let t = coerce::to_instant("2016-12-31T23:59:60.500Z").unwrap().unwrap();
    assert_eq!((t.minute(), t.second(), t.milli()), (59, 59, 999));
    let dt = coerce::to_calendar_date_time(t).unwrap().unwrap();
    assert_eq!(dt.milli(), 999);
    assert_eq!(t.to_string(), "2016-12-31T23:59:59.999Z");
}

#[test]
fn utc_spellings_share_one_zone() {
    let utc = zone::utc();
    for id in ["UTC", "Etc/UTC", "Zulu", "Universal", "+00:00", "Z"] {
        assert_eq!(zone::for_id(id).unwrap(), utc, "{id}");
    }
    let t = Instant::from_fields(2024, 5, 1, 12, 0, 0, 0, zone::for_id("Etc/UTC").unwrap()).unwrap();
    assert!(t.zone().is_utc());
    assert!(t.same_zone_and_moment(&Instant::from_utc_fields(2024, 5, 1, 12, 0, 0, 0).unwrap()));
}

#[test]
fn complement_ignores_busy_spans_outside_the_window() {
    let day = |d| Instant::from_utc_date(2020, 1, d).unwrap();
    let window = Interval::new(day(5), day(20)).unwrap();
    let busy = [
        Interval::new(day(1), day(3)).unwrap(),
        Interval::new(day(4), day(8)).unwrap(),
        Interval::new(day(18), day(22)).unwrap(),
        Interval::new(day(25), day(28)).unwrap(),
    ];
    let free = complement_within(window, &busy);
    assert_eq!(free, vec![Interval::new(day(8), day(18)).unwrap()]);
    assert!(free.iter().all(|gap| gap.duration_millis() > 0));
}

#[test]
fn generated_values_feed_the_algebra() {
    let config = GenConfig::new(
        [EraWindow::unix_epoch_era(), EraWindow::modern()],
        ZonePool::from_zones([zone::for_id("Asia/Kolkata").unwrap()]),
    )
    .unwrap();
    let mut rng = StdRng::seed_from_u64(2024);

    for kind in Kind::ALL {
        let value = generate::draw(&config, kind, &mut rng);
        assert!(config.admits(kind, &value));
        let instant = coerce::to_instant(value).unwrap().unwrap();
        assert!(instant.year() >= 1969 && instant.year() <= 2030);
        let later = value.plus(&Period::new().years(1));
        assert!(matches!(
            (value, later),
            (TimeValue::Instant(_), TimeValue::Instant(_))
                | (TimeValue::Date(_), TimeValue::Date(_))
                | (TimeValue::DateTime(_), TimeValue::DateTime(_))
        ));
    }
}

#[cfg(feature = "serde")]
#[test]
fn serde_instant_carries_millis_and_zone() {
    let t = Instant::from_epoch_millis(512_059_771_000)
        .unwrap()
        .in_zone(zone::for_id("Europe/Madrid").unwrap());
    let json = serde_json::to_string(&t).unwrap();
    assert_eq!(json, r#"{"epoch_millis":512059771000,"zone":"Europe/Madrid"}"#);
    let back: Instant = serde_json::from_str(&json).unwrap();
    assert!(back.same_zone_and_moment(&t));

    let interval = Interval::new(t, t.plus(&Period::new().hours(1))).unwrap();
    let json = serde_json::to_string(&interval).unwrap();
    assert!(json.contains("start") && json.contains("end"));
    let back: Interval = serde_json::from_str(&json).unwrap();
    assert_eq!(back, interval);

    let reversed = r#"{"start":{"epoch_millis":10,"zone":"UTC"},"end":{"epoch_millis":0,"zone":"UTC"}}"#;
    assert!(serde_json::from_str::<Interval>(reversed).is_err());

    let period = Period::new().months(2).days(-1);
    let json = serde_json::to_string(&period).unwrap();
    assert!(json.contains(r#""months":2"#));
    assert_eq!(serde_json::from_str::<Period>(&json).unwrap(), period);
}
