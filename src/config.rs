use scical::display::DEFAULT_PRECISION;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// User settings, read from `~/.scicalrc` then the environment
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Config {
    /// Decimal places shown for results
    pub(crate) precision: usize,
    /// Print the version banner when the REPL starts
    pub(crate) banner: bool,
    /// Keep REPL history between lines
    pub(crate) history: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            precision: DEFAULT_PRECISION,
            banner: false,
            history: true,
        }
    }
}

#[derive(Error, Debug)]
pub(crate) enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    TomlError(#[from] toml::de::Error),
}

/// Get home directory
pub(crate) fn dirs_home() -> Option<PathBuf> {
    env::var_os("HOME").map(PathBuf::from)
}

/// Get the config path (~/.scicalrc)
pub(crate) fn config_path() -> Option<PathBuf> {
    dirs_home().map(|h| h.join(".scicalrc"))
}

impl Config {
    /// Parse a config file
    pub(crate) fn from_file(path: &Path) -> Result<Config, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load ~/.scicalrc if it exists, then apply environment overrides.
    /// A broken file is reported and ignored.
    pub(crate) fn load() -> Config {
        let mut config = match config_path() {
            Some(path) if path.exists() => Config::from_file(&path).unwrap_or_else(|e| {
                log::warn!("ignoring {}: {}", path.display(), e);
                Config::default()
            }),
            _ => Config::default(),
        };
        config.apply_env(|name| env::var(name).ok());
        config
    }

    /// Apply SCICAL_PRECISION and SCICAL_BANNER overrides
    pub(crate) fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup("SCICAL_PRECISION") {
            match raw.trim().parse() {
                Ok(precision) => self.precision = precision,
                Err(_) => log::warn!("ignoring SCICAL_PRECISION={:?}: not a number", raw),
            }
        }
        if let Some(raw) = lookup("SCICAL_BANNER") {
            self.banner = !matches!(raw.trim(), "" | "0" | "false");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn config_defaults() {
        let config = Config::default();
        assert_eq!(config.precision, 12);
        assert!(!config.banner);
        assert!(config.history);
    }

    #[test]
    fn config_from_file_partial() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".scicalrc");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "precision = 4").unwrap();
        drop(file);

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.precision, 4);
        assert!(config.history);
    }

    #[test]
    fn config_from_file_rejects_unknown_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".scicalrc");
        fs::write(&path, "precison = 4\n").unwrap();

        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigError::TomlError(_))
        ));
    }

    #[test]
    fn config_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope");
        assert!(matches!(
            Config::from_file(&path),
            Err(ConfigError::IoError(_))
        ));
    }

    #[test]
    fn config_env_overrides() {
        let vars: HashMap<&str, &str> =
            [("SCICAL_PRECISION", "3"), ("SCICAL_BANNER", "1")].into_iter().collect();
        let mut config = Config::default();
        config.apply_env(|name| vars.get(name).map(|v| v.to_string()));
        assert_eq!(config.precision, 3);
        assert!(config.banner);
    }

    #[test]
    fn config_env_bad_precision_ignored() {
        let mut config = Config::default();
        config.apply_env(|name| (name == "SCICAL_PRECISION").then(|| "lots".to_string()));
        assert_eq!(config.precision, 12);
    }
}
