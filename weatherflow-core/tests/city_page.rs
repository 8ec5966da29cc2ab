//! End-to-end checks of the public API: a city URL in, formatted card out.

use regex::Regex;
use weatherflow_core::{
    CompassPoint, Config, GeoPoint, Units, WeatherReading, city_path, parse_city_from_url,
    resolve_city_url, slugify, wind_direction,
};

const TRICKY_NAMES: &[&str] = &[
    "",
    " ",
    "Paris",
    "  New   York  ",
    "O'Brien's Town",
    "--Mixed--Case--",
    "Llanfair\u{a0}PG",
    "tab\tseparated\tname",
    "100% Pure!",
    "\u{5317}\u{4eac} Beijing",
    "a-\u{2003}-b",
    "___",
];

#[test]
fn slugify_output_shape_and_idempotence() {
    let shape = Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();

    for name in TRICKY_NAMES {
        let slug = slugify(name);
        assert!(slug.is_empty() || shape.is_match(&slug), "{name:?} -> {slug:?}");
        assert_eq!(slugify(&slug), slug, "not idempotent for {name:?}");
    }
}

#[test]
fn search_result_link_resolves_to_the_selected_city() {
    let selected = GeoPoint::new(51.5074, -0.1278, "London, GB").unwrap();
    let link = city_path(&selected, None);
    assert!(link.starts_with("/city/london-gb?"));

    let resolution = resolve_city_url(&format!("https://weather.example{link}")).unwrap();
    assert_eq!(resolution.city, Some(selected));
    assert_eq!(resolution.units, None);
}

#[test]
fn page_load_renders_reading_in_effective_units() {
    let mut config = Config::default();
    config.set_default_units(Units::Imperial);

    let resolution =
        resolve_city_url("/city/chicago?lat=41.8781&lon=-87.6298&name=Chicago").unwrap();
    let city = resolution.city.expect("valid coordinates");
    assert_eq!(city.name, "Chicago");

    let units = config.effective_units(resolution.units);
    assert_eq!(units, Units::Imperial);

    let reading = WeatherReading {
        temp: 71.6,
        wind_speed: 8.049,
        wind_deg: 290.0,
        pressure: 29.92,
        timestamp: 1_700_000_000,
        timezone_offset: -6 * 3600,
    };

    let card = reading.display(units);
    assert_eq!(card.temperature, "72°F");
    assert_eq!(card.wind, "8 mph");
    assert_eq!(card.wind_direction, Some(CompassPoint::Wnw));
    assert_eq!(card.pressure, "29.92 inHg");
    assert_eq!(card.time, "4:13 PM");
    assert_eq!(card.date, "Tuesday, November 14, 2023");
}

#[test]
fn manually_edited_url_is_an_empty_state_not_an_error() {
    let resolution = resolve_city_url("/city/atlantis?lat=north&lon=0&u=furlongs").unwrap();

    assert_eq!(resolution.city, None);
    assert_eq!(resolution.units, None);
}

#[test]
fn documented_examples() {
    let resolution = parse_city_from_url("paris", &[("lat", "48.8566"), ("lon", "2.3522")]);
    assert_eq!(resolution.city, GeoPoint::new(48.8566, 2.3522, "Paris"));

    assert_eq!(parse_city_from_url("x", &[("lat", "abc"), ("lon", "2")]).city, None);
    assert_eq!(parse_city_from_url("x", &[("lat", "91"), ("lon", "0")]).city, None);

    assert_eq!(wind_direction(0.0).map(|d| d.as_str()), Some("N"));
    assert_eq!(wind_direction(359.0).map(|d| d.as_str()), Some("N"));
    assert_eq!(wind_direction(180.0).map(|d| d.as_str()), Some("S"));
}
