//! Unit-aware presentation of weather quantities.
//!
//! Every function here is total. Non-finite inputs are rendered as `NaN` /
//! `Infinity` rather than clamped, so bad upstream data stays visible.

use chrono::{DateTime, Datelike, NaiveDateTime};
use std::fmt;

use crate::model::{Units, WeatherReading};

/// Largest distance from the epoch a browser `Date` can represent.
const MAX_DATE_MILLIS: i64 = 8_640_000_000_000_000;

const INVALID_DATE: &str = "Invalid Date";

/// Temperature rounded to the nearest degree, e.g. `"22°C"`.
pub fn format_temp(temp: f64, units: Units) -> String {
    format!("{}\u{00b0}{}", display_number(round_half_up(temp)), units.temp_symbol())
}

/// Wind speed rounded to one decimal place, e.g. `"12 km/h"` or `"3.4 mph"`.
pub fn format_wind(speed: f64, units: Units) -> String {
    format!("{} {}", display_number(round_half_up(speed * 10.0) / 10.0), units.speed_unit())
}

/// Pressure as delivered, e.g. `"1013 hPa"`.
pub fn format_pressure(pressure: f64, units: Units) -> String {
    format!("{} {}", display_number(pressure), units.pressure_unit())
}

/// Wall-clock time at a location whose UTC offset is `timezone_offset` seconds.
///
/// The offset shifts the instant itself; the returned value is meant to be
/// read as-is, without any further timezone conversion. `None` if the shifted
/// instant falls outside the representable date range.
pub fn local_time(timestamp: i64, timezone_offset: i64) -> Option<NaiveDateTime> {
    let millis = timestamp.checked_add(timezone_offset)?.checked_mul(1000)?;
    if millis.abs() > MAX_DATE_MILLIS {
        return None;
    }

    DateTime::from_timestamp_millis(millis).map(|dt| dt.naive_utc())
}

/// 12-hour local time, e.g. `"3:07 PM"`.
pub fn format_time(timestamp: i64, timezone_offset: i64) -> String {
    match local_time(timestamp, timezone_offset) {
        Some(dt) => dt.format("%-I:%M %p").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Long local date, e.g. `"Thursday, January 1, 1970"`.
pub fn format_date(timestamp: i64, timezone_offset: i64) -> String {
    match local_time(timestamp, timezone_offset) {
        // Plain year: no zero padding below 1000 and no sign above 9999.
        Some(dt) => format!("{}{}", dt.format("%A, %B %-d, "), dt.year()),
        None => INVALID_DATE.to_string(),
    }
}

/// One of the sixteen points of the compass rose, clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompassPoint {
    N,
    Nne,
    Ne,
    Ene,
    E,
    Ese,
    Se,
    Sse,
    S,
    Ssw,
    Sw,
    Wsw,
    W,
    Wnw,
    Nw,
    Nnw,
}

impl CompassPoint {
    pub const ALL: [CompassPoint; 16] = [
        CompassPoint::N,
        CompassPoint::Nne,
        CompassPoint::Ne,
        CompassPoint::Ene,
        CompassPoint::E,
        CompassPoint::Ese,
        CompassPoint::Se,
        CompassPoint::Sse,
        CompassPoint::S,
        CompassPoint::Ssw,
        CompassPoint::Sw,
        CompassPoint::Wsw,
        CompassPoint::W,
        CompassPoint::Wnw,
        CompassPoint::Nw,
        CompassPoint::Nnw,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::Nne => "NNE",
            CompassPoint::Ne => "NE",
            CompassPoint::Ene => "ENE",
            CompassPoint::E => "E",
            CompassPoint::Ese => "ESE",
            CompassPoint::Se => "SE",
            CompassPoint::Sse => "SSE",
            CompassPoint::S => "S",
            CompassPoint::Ssw => "SSW",
            CompassPoint::Sw => "SW",
            CompassPoint::Wsw => "WSW",
            CompassPoint::W => "W",
            CompassPoint::Wnw => "WNW",
            CompassPoint::Nw => "NW",
            CompassPoint::Nnw => "NNW",
        }
    }

    /// Nearest point for a bearing in degrees. Any finite angle is accepted
    /// and wrapped into `[0, 360)`; ties round clockwise.
    pub fn from_degrees(degrees: f64) -> Option<Self> {
        if !degrees.is_finite() {
            return None;
        }

        let normalized = ((degrees % 360.0) + 360.0) % 360.0;
        let index = round_half_up(normalized / 22.5) as usize % Self::ALL.len();
        Some(Self::ALL[index])
    }
}

impl fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compass abbreviation for a wind bearing; `None` for NaN or infinite input.
pub fn wind_direction(degrees: f64) -> Option<CompassPoint> {
    CompassPoint::from_degrees(degrees)
}

/// The formatted fields of a current-conditions card.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadingDisplay {
    pub temperature: String,
    pub wind: String,
    pub wind_direction: Option<CompassPoint>,
    pub pressure: String,
    pub time: String,
    pub date: String,
}

impl WeatherReading {
    pub fn display(&self, units: Units) -> ReadingDisplay {
        ReadingDisplay {
            temperature: format_temp(self.temp, units),
            wind: format_wind(self.wind_speed, units),
            wind_direction: wind_direction(self.wind_deg),
            pressure: format_pressure(self.pressure, units),
            time: format_time(self.timestamp, self.timezone_offset),
            date: format_date(self.timestamp, self.timezone_offset),
        }
    }
}

impl fmt::Display for ReadingDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} at {}", self.date, self.time)?;
        writeln!(f, "  Temperature: {}", self.temperature)?;
        match self.wind_direction {
            Some(direction) => writeln!(f, "  Wind: {} {}", self.wind, direction)?,
            None => writeln!(f, "  Wind: {}", self.wind)?,
        }
        write!(f, "  Pressure: {}", self.pressure)
    }
}

/// Rounds to the nearest integer with halves going towards positive infinity.
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Shortest round-trip decimal rendering, matching how a browser prints numbers.
fn display_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }
    // Also catches -0.
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }

    let exponential = format!("{value:e}");
    match exponential.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exponential,
    }
}
