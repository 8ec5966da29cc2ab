use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::Error;

/// Measurement system used when rendering weather values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial]
    }

    /// Exact match against the `u` query value. Anything else is "unspecified".
    pub fn from_query(value: &str) -> Option<Self> {
        match value {
            "metric" => Some(Units::Metric),
            "imperial" => Some(Units::Imperial),
            _ => None,
        }
    }

    /// Units from the URL take precedence, then the stored preference, then metric.
    pub fn resolve(from_url: Option<Units>, stored: Option<Units>) -> Units {
        from_url.or(stored).unwrap_or_default()
    }

    pub(crate) fn temp_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "C",
            Units::Imperial => "F",
        }
    }

    pub(crate) fn speed_unit(&self) -> &'static str {
        match self {
            Units::Metric => "km/h",
            Units::Imperial => "mph",
        }
    }

    pub(crate) fn pressure_unit(&self) -> &'static str {
        match self {
            Units::Metric => "hPa",
            Units::Imperial => "inHg",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lenient parse for user-typed input (CLI flags, config): case-insensitive, trimmed.
impl FromStr for Units {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lower = value.trim().to_lowercase();

        Units::from_query(&lower).ok_or_else(|| Error::UnknownUnits(value.to_string()))
    }
}

/// A named point on the globe, as reconstructed from a city URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    pub name: String,
}

impl GeoPoint {
    /// Returns `None` unless both coordinates are finite and within geographic range.
    pub fn new(lat: f64, lon: f64, name: impl Into<String>) -> Option<Self> {
        if !is_valid_latitude(lat) || !is_valid_longitude(lon) {
            return None;
        }

        Some(Self { lat, lon, name: name.into() })
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.4}, {:.4})", self.name, self.lat, self.lon)
    }
}

pub(crate) fn is_valid_latitude(lat: f64) -> bool {
    lat.is_finite() && (-90.0..=90.0).contains(&lat)
}

pub(crate) fn is_valid_longitude(lon: f64) -> bool {
    lon.is_finite() && (-180.0..=180.0).contains(&lon)
}

/// Outcome of resolving a city page URL.
///
/// `city` is `None` when the coordinates are missing or invalid; `units` is
/// `None` when the URL does not pin a unit system and the caller should fall
/// back to its stored preference (see [`Units::resolve`]).
#[derive(Debug, Clone, PartialEq)]
pub struct CityResolution {
    pub city: Option<GeoPoint>,
    pub units: Option<Units>,
}

/// Current conditions as delivered by the fetch layer, already expressed in
/// the units that were requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    pub temp: f64,
    pub wind_speed: f64,
    pub wind_deg: f64,
    pub pressure: f64,
    /// UNIX seconds.
    pub timestamp: i64,
    /// Seconds east of UTC.
    #[serde(default)]
    pub timezone_offset: i64,
}
