use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::PathBuf};

use crate::model::{DisplayMode, Units};

/// Top-level configuration stored on disk as TOML.
///
/// Example:
/// ```toml
/// api_key = "..."
/// default_location = "San Francisco,CA"
/// units = "imperial"
/// display_mode = "widget"
/// show_colors = true
///
/// [favorites]
/// home = "10001"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OpenWeatherMap API key.
    #[serde(default)]
    pub api_key: String,

    /// Location used when no argument and no favorite is given.
    #[serde(default)]
    pub default_location: String,

    #[serde(default)]
    pub units: Units,

    #[serde(default)]
    pub display_mode: DisplayMode,

    #[serde(default = "default_show_colors")]
    pub show_colors: bool,

    /// Named location shortcuts, looked up via `--favorite <name>`.
    #[serde(default)]
    pub favorites: HashMap<String, String>,
}

fn default_show_colors() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            default_location: String::new(),
            units: Units::default(),
            display_mode: DisplayMode::default(),
            show_colors: true,
            favorites: HashMap::new(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if no file exists yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file yet.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weatherornot", "weatherornot")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Set a single key from its string form, as used by `config set`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "api_key" => self.api_key = value.to_string(),
            "default_location" => self.default_location = value.to_string(),
            "units" => self.units = Units::try_from(value)?,
            "display_mode" => self.display_mode = DisplayMode::try_from(value)?,
            "show_colors" => {
                self.show_colors = value
                    .parse()
                    .map_err(|_| anyhow!("show_colors must be true or false"))?;
            }
            _ => {
                return Err(anyhow!(
                    "Unknown config key '{key}'. Supported: api_key, default_location, \
                     units, display_mode, show_colors."
                ));
            }
        }

        Ok(())
    }

    pub fn favorite(&self, name: &str) -> Option<&str> {
        self.favorites.get(name).map(String::as_str)
    }

    pub fn add_favorite(&mut self, name: String, location: String) {
        self.favorites.insert(name, location);
    }

    pub fn remove_favorite(&mut self, name: &str) -> Result<()> {
        self.favorites
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| anyhow!("Favorite '{name}' not found"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = Config::default();

        assert!(cfg.api_key.is_empty());
        assert!(cfg.default_location.is_empty());
        assert_eq!(cfg.units, Units::Imperial);
        assert_eq!(cfg.display_mode, DisplayMode::Widget);
        assert!(cfg.show_colors);
        assert!(cfg.favorites.is_empty());
    }

    #[test]
    fn set_validates_keys_and_values() {
        let mut cfg = Config::default();

        cfg.set("units", "metric").unwrap();
        assert_eq!(cfg.units, Units::Metric);

        cfg.set("display_mode", "neofetch").unwrap();
        assert_eq!(cfg.display_mode, DisplayMode::Neofetch);

        cfg.set("show_colors", "false").unwrap();
        assert!(!cfg.show_colors);

        cfg.set("default_location", "90210").unwrap();
        assert_eq!(cfg.default_location, "90210");

        let err = cfg.set("units", "fahrenheitish").unwrap_err();
        assert!(err.to_string().contains("Unknown units"));

        let err = cfg.set("show_colors", "maybe").unwrap_err();
        assert!(err.to_string().contains("true or false"));

        let err = cfg.set("nope", "x").unwrap_err();
        assert!(err.to_string().contains("Unknown config key"));
    }

    #[test]
    fn favorites_add_lookup_remove() {
        let mut cfg = Config::default();

        cfg.add_favorite("home".to_string(), "10001".to_string());
        assert_eq!(cfg.favorite("home"), Some("10001"));
        assert_eq!(cfg.favorite("work"), None);

        cfg.remove_favorite("home").unwrap();
        assert_eq!(cfg.favorite("home"), None);

        let err = cfg.remove_favorite("home").unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn toml_roundtrip_preserves_fields() {
        let mut cfg = Config::default();
        cfg.api_key = "KEY".to_string();
        cfg.default_location = "Paris,FR".to_string();
        cfg.units = Units::Metric;
        cfg.display_mode = DisplayMode::Neofetch;
        cfg.show_colors = false;
        cfg.add_favorite("home".to_string(), "SW1A 1AA,GB".to_string());

        let text = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();

        assert_eq!(parsed.api_key, "KEY");
        assert_eq!(parsed.default_location, "Paris,FR");
        assert_eq!(parsed.units, Units::Metric);
        assert_eq!(parsed.display_mode, DisplayMode::Neofetch);
        assert!(!parsed.show_colors);
        assert_eq!(parsed.favorite("home"), Some("SW1A 1AA,GB"));
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: Config = toml::from_str("api_key = \"KEY\"").unwrap();

        assert_eq!(parsed.api_key, "KEY");
        assert_eq!(parsed.units, Units::Imperial);
        assert_eq!(parsed.display_mode, DisplayMode::Widget);
        assert!(parsed.show_colors);
    }
}
