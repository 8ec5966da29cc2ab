use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

use crate::model::Units;

/// User preferences stored on disk.
///
/// Example TOML:
/// default_units = "imperial"
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Units used when a city URL does not carry a `u` parameter.
    pub default_units: Option<Units>,
}

impl Config {
    /// Stored units preference, if any.
    pub fn preferred_units(&self) -> Option<Units> {
        self.default_units
    }

    pub fn set_default_units(&mut self, units: Units) {
        self.default_units = Some(units);
    }

    /// Effective units for a page: URL value, then stored preference, then metric.
    pub fn effective_units(&self, from_url: Option<Units>) -> Units {
        Units::resolve(from_url, self.preferred_units())
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents).with_context(|| {
            format!(
                "Failed to parse config file: {}\n\
                 Hint: run `weatherflow configure` to rewrite it.",
                path.display()
            )
        })?;

        Ok(cfg)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherflow", "weatherflow")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_has_no_preference() {
        let cfg = Config::default();

        assert_eq!(cfg.preferred_units(), None);
        assert_eq!(cfg.effective_units(None), Units::Metric);
    }

    #[test]
    fn stored_preference_is_used_when_url_is_silent() {
        let mut cfg = Config::default();
        cfg.set_default_units(Units::Imperial);

        assert_eq!(cfg.effective_units(None), Units::Imperial);
        assert_eq!(cfg.effective_units(Some(Units::Metric)), Units::Metric);
    }

    #[test]
    fn missing_file_loads_default() {
        let dir = TempDir::new().unwrap();

        let cfg = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn save_creates_parent_dirs_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut cfg = Config::default();
        cfg.set_default_units(Units::Imperial);

        cfg.save_to(&path).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("default_units = \"imperial\""));

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.preferred_units(), Some(Units::Imperial));
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default_units = \"kelvin\"").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
