//! Configuration loaded from ~/.config/vergil2ics/config.toml

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use vergil_core::api::SEARCH_URL;
use vergil_core::DEFAULT_TIMEZONE;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Class identifiers to fetch (e.g. "COMS4118W001")
    pub class_ids: Vec<String>,

    /// Term calendar code (e.g. "20253" for Fall 2025)
    pub term: Option<String>,

    /// Where to write the generated .ics file
    pub output: String,

    /// IANA timezone the class times are in
    pub timezone: String,

    /// Display name for the generated calendar
    pub calendar_name: Option<String>,

    /// Class search endpoint
    pub api_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            class_ids: Vec::new(),
            term: None,
            output: "output/vergil.ics".to_string(),
            timezone: DEFAULT_TIMEZONE.name().to_string(),
            calendar_name: None,
            api_url: SEARCH_URL.to_string(),
            timeout_secs: 10,
        }
    }
}

impl Config {
    pub fn timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("Invalid timezone '{}': {}", self.timezone, e))
    }

    pub fn term(&self) -> Result<&str> {
        self.term.as_deref().context(
            "No term configured.\n\
            Pass --term <CODE> or set `term` in config.toml (e.g. \"20253\" for Fall 2025)",
        )
    }

    pub fn class_ids(&self) -> Result<&[String]> {
        if self.class_ids.is_empty() {
            anyhow::bail!(
                "No class IDs configured.\n\
                Pass them as arguments or set `class_ids` in config.toml"
            );
        }
        Ok(&self.class_ids)
    }

    pub fn output_path(&self) -> PathBuf {
        expand_path(&self.output)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Get the config directory path (~/.config/vergil2ics)
pub fn config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("vergil2ics");
    Ok(config_dir)
}

/// Get the config file path (~/.config/vergil2ics/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load config from an explicit path, or from the default location.
///
/// A missing default config file is fine (everything has a default or can be
/// passed on the command line), but an explicit path must exist.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p.to_path_buf()
        }
        None => {
            let default_path = config_path()?;
            if !default_path.exists() {
                tracing::debug!(path = %default_path.display(), "no config file, using defaults");
                return Ok(Config::default());
            }
            default_path
        }
    };

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

    tracing::debug!(?config, path = %path.display(), "loaded configuration");

    Ok(config)
}

/// Expand ~ in paths to the home directory
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();

        assert_eq!(config.timezone().unwrap(), chrono_tz::America::New_York);
        assert_eq!(config.api_url, SEARCH_URL);
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.output_path(), PathBuf::from("output/vergil.ics"));
        assert!(config.term().is_err());
        assert!(config.class_ids().is_err());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
class_ids = ["ECBM4040E001", "COMS4118W001"]
term = "20253"
output = "/tmp/fall.ics"
calendar_name = "Fall 2025"
"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();

        assert_eq!(config.class_ids().unwrap(), ["ECBM4040E001", "COMS4118W001"]);
        assert_eq!(config.term().unwrap(), "20253");
        assert_eq!(config.output_path(), PathBuf::from("/tmp/fall.ics"));
        assert_eq!(config.calendar_name.as_deref(), Some("Fall 2025"));
        // Unset fields keep their defaults
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.timezone, "America/New_York");
    }

    #[test]
    fn test_load_config_missing_explicit_path() {
        let dir = TempDir::new().unwrap();
        let result = load_config(Some(&dir.path().join("nope.toml")));

        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_rejects_bad_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "class_ids = 42").unwrap();

        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_invalid_timezone() {
        let config = Config {
            timezone: "Mars/Olympus_Mons".to_string(),
            ..Config::default()
        };

        assert!(config.timezone().is_err());
    }

    #[test]
    fn test_expand_path() {
        assert_eq!(expand_path("relative/x.ics"), PathBuf::from("relative/x.ics"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~/cal/x.ics"), home.join("cal/x.ics"));
        }
    }
}
