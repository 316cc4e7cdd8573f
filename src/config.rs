use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// Optional settings from `config.toml`. Everything has a default; the file
/// does not need to exist.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory for `todos.json` and the log files. Defaults to the
    /// platform data dir; the `AFAIRE_DATA_DIR` env var overrides both.
    pub data_dir: Option<PathBuf>,
    /// trace | debug | info | warn | error. Defaults per build profile.
    pub log_level: Option<String>,
}

impl Config {
    /// `~/.config/afaire/config.toml` (or the platform equivalent).
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("com", "trougnouf", "afaire")
            .map(|proj| proj.config_dir().join("config.toml"))
    }

    /// Reads the config file. A missing file is plain defaults; a malformed
    /// one is an error the caller may fall back from.
    pub fn load() -> Result<Self> {
        let Some(path) = Self::path() else {
            return Ok(Self::default());
        };
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw =
            fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        let config =
            toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn partial_config_fills_the_rest_with_defaults() {
        let config: Config = toml::from_str("log_level = \"trace\"").unwrap();
        assert_eq!(config.log_level.as_deref(), Some("trace"));
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn empty_config_is_all_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.log_level.is_none());
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn unknown_keys_are_tolerated() {
        let config: Config = toml::from_str("future_knob = 3\n").unwrap();
        assert!(config.log_level.is_none());
    }

    #[test]
    fn broken_toml_is_an_error_not_a_default() {
        // Unlike a missing file, a file that fails to parse must surface an
        // error so the caller can decide to fall back.
        assert!(toml::from_str::<Config>("not = = toml").is_err());
    }
}
