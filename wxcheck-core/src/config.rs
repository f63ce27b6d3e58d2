use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fmt, fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{error::ConfigError, model::UnitSystem};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const ENV_API_KEY: &str = "API_KEY";
pub const ENV_BASE_URL: &str = "WXCHECK_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "WXCHECK_TIMEOUT_SECS";
pub const ENV_UNITS: &str = "WXCHECK_UNITS";

/// OpenWeather API key. Never printed in full.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Top-level configuration: file on disk, then environment on top.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// units = "imperial"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<ApiKey>,
    pub base_url: String,
    pub timeout_secs: u64,
    pub units: UnitSystem,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            units: UnitSystem::default(),
        }
    }
}

impl Config {
    /// Config file merged with the process environment.
    pub fn from_environment() -> Result<Self> {
        let cfg = Self::load()?.apply_env(|key| std::env::var(key).ok())?;
        Ok(cfg)
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
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
        let dirs = ProjectDirs::from("dev", "wxcheck", "wxcheck")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Overlay environment values. `lookup` stands in for `std::env::var`.
    pub fn apply_env<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_blank(ENV_API_KEY) {
            self.api_key = Some(ApiKey::new(key));
        }

        if let Some(url) = non_blank(ENV_BASE_URL) {
            self.base_url = url.trim().to_string();
        }

        if let Some(raw) = non_blank(ENV_TIMEOUT_SECS) {
            self.timeout_secs = match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                Ok(_) => {
                    return Err(ConfigError::InvalidValue {
                        key: ENV_TIMEOUT_SECS,
                        value: raw,
                        reason: "timeout must be at least one second".to_string(),
                    });
                }
                Err(e) => {
                    return Err(ConfigError::InvalidValue {
                        key: ENV_TIMEOUT_SECS,
                        value: raw,
                        reason: e.to_string(),
                    });
                }
            };
        }

        if let Some(raw) = non_blank(ENV_UNITS) {
            self.units =
                UnitSystem::try_from(raw.as_str()).map_err(|e| ConfigError::InvalidValue {
                    key: ENV_UNITS,
                    value: raw.clone(),
                    reason: e.to_string(),
                })?;
        }

        self.validate()
    }

    /// Reject values that are invalid whichever layer set them.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timeout_secs",
                value: self.timeout_secs.to_string(),
                reason: "timeout must be at least one second".to_string(),
            });
        }

        Ok(self)
    }

    /// The API key, or `MissingCredential` when none (or a blank one) is set.
    pub fn credential(&self) -> Result<&ApiKey, ConfigError> {
        self.api_key
            .as_ref()
            .filter(|key| !key.is_blank())
            .ok_or(ConfigError::MissingCredential)
    }

    pub fn set_api_key(&mut self, key: impl Into<String>) {
        self.api_key = Some(ApiKey::new(key));
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn credential_missing_by_default() {
        let cfg = Config::default();
        let err = cfg.credential().unwrap_err();

        assert!(matches!(err, ConfigError::MissingCredential));
        assert!(err.to_string().contains("API_KEY"));
    }

    #[test]
    fn blank_credential_counts_as_missing() {
        let mut cfg = Config::default();
        cfg.set_api_key("   ");

        assert!(matches!(cfg.credential(), Err(ConfigError::MissingCredential)));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut cfg = Config::default();
        cfg.set_api_key("FROM_FILE");

        let cfg = cfg
            .apply_env(env(&[
                (ENV_API_KEY, "FROM_ENV"),
                (ENV_BASE_URL, "http://localhost:9999"),
                (ENV_TIMEOUT_SECS, "3"),
                (ENV_UNITS, "standard"),
            ]))
            .expect("env should apply");

        assert_eq!(cfg.credential().unwrap().as_str(), "FROM_ENV");
        assert_eq!(cfg.base_url, "http://localhost:9999");
        assert_eq!(cfg.timeout(), Duration::from_secs(3));
        assert_eq!(cfg.units, UnitSystem::Standard);
    }

    #[test]
    fn blank_env_values_are_ignored() {
        let mut cfg = Config::default();
        cfg.set_api_key("FROM_FILE");

        let cfg = cfg.apply_env(env(&[(ENV_API_KEY, "")])).unwrap();
        assert_eq!(cfg.credential().unwrap().as_str(), "FROM_FILE");
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err = Config::default()
            .apply_env(env(&[(ENV_TIMEOUT_SECS, "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_TIMEOUT_SECS));

        let err = Config::default()
            .apply_env(env(&[(ENV_TIMEOUT_SECS, "0")]))
            .unwrap_err();
        assert!(err.to_string().contains("at least one second"));
    }

    #[test]
    fn unknown_units_are_rejected() {
        let err = Config::default()
            .apply_env(env(&[(ENV_UNITS, "metric")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: ENV_UNITS, .. }));
    }

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("super-secret");
        assert_eq!(format!("{key:?}"), "ApiKey(***)");
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let cfg: Config = toml::from_str("api_key = \"KEY\"").unwrap();

        assert_eq!(cfg.credential().unwrap().as_str(), "KEY");
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert_eq!(cfg.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(cfg.units, UnitSystem::Imperial);
    }

    #[test]
    fn zero_timeout_in_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = \"KEY\"\ntimeout_secs = 0\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        let err = cfg.apply_env(|_: &str| None).unwrap_err();

        assert!(matches!(err, ConfigError::InvalidValue { key: "timeout_secs", .. }));
        assert!(err.to_string().contains("at least one second"));
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.set_api_key("KEY");
        cfg.units = UnitSystem::Standard;
        cfg.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.credential().unwrap().as_str(), "KEY");
        assert_eq!(loaded.units, UnitSystem::Standard);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert!(cfg.api_key.is_none());
    }
}
