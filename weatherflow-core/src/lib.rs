//! Core library for WeatherFlow city pages.
//!
//! This crate defines:
//! - Resolution of a `/city/<slug>?lat=..&lon=..` URL into a location and units
//! - Slug generation for city links
//! - Unit-aware formatting of temperature, wind, pressure and local time
//! - The stored default-units preference
//!
//! It is used by `weatherflow-cli`, but the resolver and formatters are pure
//! and can be called from any front end.

pub mod config;
pub mod error;
pub mod format;
pub mod model;
pub mod resolver;
pub mod slug;

pub use config::Config;
pub use error::{Error, Result};
pub use format::{
    CompassPoint, ReadingDisplay, format_date, format_pressure, format_temp, format_time,
    format_wind, local_time, wind_direction,
};
pub use model::{CityResolution, GeoPoint, Units, WeatherReading};
pub use resolver::{
    QueryParams, city_path, city_slug, parse_city_from_url, resolve_city_url, set_units,
};
pub use slug::{deslugify, slugify};
pub use url;
