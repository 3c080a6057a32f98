use rand::rngs::StdRng;
use rand::SeedableRng;
use tempora::generate::{self, EraWindow, GenConfig, Kind, ZonePool};
use tempora::{coerce, zone, CalendarFields, Instant, Interval, Period, Shift, TimeOrd};

fn main() -> tempora::Result<()> {
    let now = Instant::now().in_zone(zone::default_zone());
    println!("now: {now} (day {} of {})", now.day_of_year(), now.year());

    let start = Instant::from_fields(1986, 10, 14, 9, 30, 0, 0, zone::for_id("Europe/Madrid")?)?;
    let end = start.plus_all(&[Period::new().months(1), Period::new().weeks(3)]);
    let span = Interval::new(start, end)?;
    println!("{span}: {} days, {} hours", span.in_days(), span.in_hours());
    println!("over before now: {}", span.before(&now));

    let parsed = coerce::to_instant("1986-03-24T14:49:31Z")?;
    println!("parsed: {parsed:?}");

    let config = GenConfig::new(
        [EraWindow::modern()],
        ZonePool::from_zones([zone::for_id("Asia/Tokyo")?, zone::for_id("America/Lima")?]),
    )?;
    let mut rng = StdRng::seed_from_u64(1986);
    for kind in Kind::ALL {
        println!("{kind:?}: {}", generate::draw(&config, kind, &mut rng));
    }
    Ok(())
}
