use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::Select;
use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};
use weatherflow_core::{
    CityResolution, Config, GeoPoint, Units, WeatherReading, city_path, resolve_city_url, set_units,
    slugify,
};
use weatherflow_core::url::Url;

const INVALID_CITY_MESSAGE: &str = "The city URL is invalid or missing required parameters.";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherflow", version, about = "WeatherFlow city page tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the default units used when a URL does not specify any.
    Configure {
        /// "metric" or "imperial"; prompts when omitted.
        #[arg(long)]
        units: Option<Units>,
    },

    /// Resolve a city page URL into a location and units.
    Resolve {
        /// Absolute URL or path, e.g. "/city/paris?lat=48.8566&lon=2.3522".
        url: String,
    },

    /// Build the page link for a city.
    Link {
        /// Display name of the city.
        name: String,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Pin the units in the link.
        #[arg(long)]
        units: Option<Units>,
    },

    /// Rewrite the units of a page URL, keeping its other parameters.
    SetUnits {
        /// Absolute URL of the city page.
        url: Url,

        units: Units,
    },

    /// Print the URL slug for a place name.
    Slug {
        /// Free-text place name.
        name: String,
    },

    /// Render a weather reading for the city in a page URL.
    Show {
        /// Absolute URL or path of the city page.
        url: String,

        /// JSON file with the reading, or "-" for stdin.
        #[arg(long, default_value = "-")]
        reading: PathBuf,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Command::Configure { units } => configure(units),
            Command::Resolve { url } => {
                let config = Config::load()?;
                let resolution = resolve(&url)?;
                let units = config.effective_units(resolution.units);

                match resolution.city {
                    Some(city) => println!("{city}\nUnits: {units}"),
                    None => println!("{INVALID_CITY_MESSAGE}\nUnits: {units}"),
                }
                Ok(())
            }
            Command::Link { name, lat, lon, units } => {
                let point = GeoPoint::new(lat, lon, name).with_context(|| {
                    format!("Coordinates out of range: lat={lat}, lon={lon}")
                })?;
                println!("{}", city_path(&point, units));
                Ok(())
            }
            Command::SetUnits { mut url, units } => {
                set_units(&mut url, units);
                println!("{url}");
                Ok(())
            }
            Command::Slug { name } => {
                println!("{}", slugify(&name));
                Ok(())
            }
            Command::Show { url, reading } => {
                let config = Config::load()?;
                let resolution = resolve(&url)?;
                let units = config.effective_units(resolution.units);

                let Some(city) = resolution.city else {
                    anyhow::bail!("{INVALID_CITY_MESSAGE}");
                };

                let reading = read_reading(&reading)?;
                println!("{}\n{}", city.name, reading.display(units));
                Ok(())
            }
        }
    }
}

fn configure(units: Option<Units>) -> Result<()> {
    let mut config = Config::load()?;

    let units = match units {
        Some(units) => units,
        None => Select::new("Default units:", Units::all().to_vec())
            .with_starting_cursor(config.effective_units(None) as usize)
            .prompt()
            .context("Units selection was cancelled")?,
    };

    config.set_default_units(units);
    config.save()?;

    tracing::info!("Default units set to {}", units);
    println!("Saved default units '{units}' to {}", Config::config_file_path()?.display());
    Ok(())
}

fn resolve(url: &str) -> Result<CityResolution> {
    let resolution = resolve_city_url(url)?;
    tracing::debug!("Resolved {}: {:?}", url, resolution);
    Ok(resolution)
}

fn read_reading(path: &Path) -> Result<WeatherReading> {
    let contents = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("Failed to read reading from stdin")?;
        buf
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read reading file: {}", path.display()))?
    };

    serde_json::from_str(&contents).context("Failed to parse weather reading JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parses_link_with_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "weatherflow",
            "link",
            "Buenos Aires",
            "--lat",
            "-34.6037",
            "--lon",
            "-58.3816",
            "--units",
            "metric",
        ])
        .unwrap();

        match cli.command {
            Command::Link { name, lat, lon, units } => {
                assert_eq!(name, "Buenos Aires");
                assert_eq!((lat, lon), (-34.6037, -58.3816));
                assert_eq!(units, Some(Units::Metric));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_units_flag() {
        let err =
            Cli::try_parse_from(["weatherflow", "configure", "--units", "kelvin"]).unwrap_err();
        assert!(err.to_string().contains("Unknown units 'kelvin'"));
    }

    #[test]
    fn parses_set_units() {
        let cli = Cli::try_parse_from([
            "weatherflow",
            "set-units",
            "https://weather.example/city/paris?lat=1&lon=2",
            "imperial",
        ])
        .unwrap();

        match cli.command {
            Command::SetUnits { url, units } => {
                assert_eq!(url.path(), "/city/paris");
                assert_eq!(units, Units::Imperial);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_reads_stdin_by_default() {
        let cli = Cli::try_parse_from(["weatherflow", "show", "/city/paris?lat=1&lon=2"]).unwrap();

        match cli.command {
            Command::Show { reading, .. } => assert_eq!(reading, PathBuf::from("-")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn reading_file_is_parsed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("reading.json");
        fs::write(
            &path,
            r#"{"temp":5,"windSpeed":3,"windDeg":90,"pressure":1000,"timestamp":0}"#,
        )
        .unwrap();

        let reading = read_reading(&path).unwrap();
        assert_eq!(reading.wind_deg, 90.0);
    }

    #[test]
    fn missing_reading_file_names_the_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.json");

        let err = read_reading(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to read reading file"));
    }
}
