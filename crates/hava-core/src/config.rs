use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Environment variable that overrides `weather.api_key`.
pub const API_KEY_ENV: &str = "HAVA_API_KEY";

/// Units accepted by the provider's `units` parameter.
const SUPPORTED_UNITS: &[&str] = &["metric", "imperial", "standard"];

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the preferences file. Defaults to the directory
    /// of the loaded `config.toml`.
    #[serde(default)]
    pub config_dir: PathBuf,

    /// Weather provider settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherConfig {
    /// Current-weather endpoint of the provider
    pub endpoint: String,

    /// Provider API credential. Prefer the `HAVA_API_KEY` environment
    /// variable over writing the key to disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Unit system passed to the provider (`metric`, `imperial`, `standard`)
    pub units: String,

    /// Response language for condition descriptions
    pub lang: String,

    /// Request timeout in seconds. Unset means the transport decides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.openweathermap.org/data/2.5/weather".to_string(),
            api_key: None,
            units: "metric".to_string(),
            lang: "tr".to_string(),
            timeout_secs: None,
        }
    }
}

impl WeatherConfig {
    /// The credential to send: the environment wins over the config file.
    pub fn api_key(&self) -> Option<String> {
        resolve_api_key(std::env::var(API_KEY_ENV).ok(), self.api_key.as_deref())
    }
}

fn resolve_api_key(env: Option<String>, configured: Option<&str>) -> Option<String> {
    env.filter(|k| !k.trim().is_empty())
        .or_else(|| configured.map(str::to_string))
        .filter(|k| !k.trim().is_empty())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// File (relative to `config_dir`) storing persisted preferences
    pub preferences_file: String,

    /// Key under which the theme selection is stored
    pub theme_key: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            preferences_file: "preferences.json".to_string(),
            theme_key: "weather-app-theme".to_string(),
        }
    }
}

fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hava")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            config_dir: default_config_dir(),
            weather: WeatherConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the user's config directory, creating the
    /// default file if it doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, creating the default file
    /// there if it doesn't exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let mut config = Self::default();
            if let Some(parent) = config_path.parent() {
                config.config_dir = parent.to_path_buf();
            }
            config.save_to(config_path)?;
            tracing::info!("Created default config at {}", config_path.display());
            return Ok(config);
        }

        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&contents).map_err(|e| {
            ConfigError::ParseError(format!("{}: {}", config_path.display(), e))
        })?;

        if config.config_dir.as_os_str().is_empty() {
            config.config_dir = config_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(default_config_dir);
        }

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Fails with [`ConfigError::Invalid`] if validation reports errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        Self::load_validated_from(&Self::config_path()?)
    }

    fn load_validated_from(config_path: &Path) -> Result<(Self, ValidationResult)> {
        let config = Self::load_from(config_path)?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.weather.endpoint, "weather.endpoint", &mut result);

        if self.weather.api_key().is_none() {
            result.add_warning(
                "weather.api_key",
                format!(
                    "No API key configured (set {} or weather.api_key); lookups will be rejected",
                    API_KEY_ENV
                ),
            );
        }

        if !SUPPORTED_UNITS.contains(&self.weather.units.as_str()) {
            result.add_error(
                "weather.units",
                format!(
                    "Unsupported unit system '{}', expected one of {}",
                    self.weather.units,
                    SUPPORTED_UNITS.join(", ")
                ),
            );
        } else if self.weather.units != "metric" {
            result.add_warning(
                "weather.units",
                "Temperatures are labelled °C; non-metric units will display mislabelled values",
            );
        }

        if self.weather.lang.trim().is_empty() {
            result.add_error("weather.lang", "Language must not be empty");
        }

        if self.weather.timeout_secs == Some(0) {
            result.add_error("weather.timeout_secs", "Timeout must be greater than 0");
        }

        if self.ui.preferences_file.trim().is_empty() {
            result.add_error("ui.preferences_file", "Preferences file name must not be empty");
        }

        if self.ui.theme_key.trim().is_empty() {
            result.add_error("ui.theme_key", "Theme key must not be empty");
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                } else if url.scheme() == "http" {
                    result.add_warning(field_name, "API key will be sent over plain http");
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Full path of the preferences file
    pub fn preferences_path(&self) -> PathBuf {
        self.config_dir.join(&self.ui.preferences_file)
    }

    fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::MissingSetting("user config directory".to_string()))?
            .join("hava");

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key() -> Config {
        let mut config = Config::default();
        config.weather.api_key = Some("test-key".to_string());
        config
    }

    #[test]
    fn test_valid_default_config() {
        let result = config_with_key().validate();
        assert!(result.is_valid(), "Default config should be valid: {:?}", result.errors);
    }

    #[test]
    fn test_default_points_at_openweathermap() {
        let config = Config::default();
        assert_eq!(
            config.weather.endpoint,
            "https://api.openweathermap.org/data/2.5/weather"
        );
        assert_eq!(config.weather.units, "metric");
        assert_eq!(config.weather.lang, "tr");
        assert_eq!(config.weather.timeout_secs, None);
        assert_eq!(config.ui.theme_key, "weather-app-theme");
    }

    #[test]
    fn test_invalid_endpoint() {
        let mut config = config_with_key();
        config.weather.endpoint = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.endpoint"));
    }

    #[test]
    fn test_invalid_endpoint_scheme() {
        let mut config = config_with_key();
        config.weather.endpoint = "ftp://example.com/weather".to_string();
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_unknown_units_is_error() {
        let mut config = config_with_key();
        config.weather.units = "kelvinish".to_string();
        let result = config.validate();
        assert!(result.errors.iter().any(|e| e.field == "weather.units"));
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let mut config = config_with_key();
        config.weather.timeout_secs = Some(0);
        assert!(!config.validate().is_valid());
    }

    #[test]
    fn test_resolve_api_key_prefers_env() {
        assert_eq!(
            resolve_api_key(Some("from-env".into()), Some("from-file")),
            Some("from-env".to_string())
        );
        assert_eq!(
            resolve_api_key(None, Some("from-file")),
            Some("from-file".to_string())
        );
        assert_eq!(
            resolve_api_key(Some("  ".into()), Some("from-file")),
            Some("from-file".to_string())
        );
        assert_eq!(resolve_api_key(None, Some("")), None);
        assert_eq!(resolve_api_key(None, None), None);
    }

    #[test]
    fn test_load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.config_dir, dir.path());
        assert_eq!(config.preferences_path(), dir.path().join("preferences.json"));

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.weather.endpoint, config.weather.endpoint);
    }

    #[test]
    fn test_load_from_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[weather]\nendpoint = \"http://localhost:9999/weather\"\nunits = \"metric\"\nlang = \"en\"\ntimeout_secs = 5\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.weather.lang, "en");
        assert_eq!(config.weather.timeout_secs, Some(5));
        assert_eq!(config.ui.theme_key, "weather-app-theme");
    }

    #[test]
    fn test_load_from_credential_only_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[weather]\napi_key = \"abc\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.weather.api_key.as_deref(), Some("abc"));
        assert_eq!(
            config.weather.endpoint,
            "https://api.openweathermap.org/data/2.5/weather"
        );
        assert_eq!(config.weather.units, "metric");
        assert_eq!(config.weather.lang, "tr");
        assert_eq!(config.ui.preferences_file, "preferences.json");
        assert_eq!(config.ui.theme_key, "weather-app-theme");
    }

    #[test]
    fn test_config_dir_defaults_to_file_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[ui]\ntheme_key = \"theme\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.config_dir, dir.path());
        assert_eq!(config.preferences_path(), dir.path().join("preferences.json"));
    }

    #[test]
    fn test_config_dir_explicit_value_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "config_dir = \"/var/lib/hava\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.config_dir, PathBuf::from("/var/lib/hava"));
    }

    #[test]
    fn test_preferences_path_stable_across_runs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let first = Config::load_from(&path).unwrap();
        let second = Config::load_from(&path).unwrap();
        assert_eq!(first.preferences_path(), second.preferences_path());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[weather\nendpoint = ").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_validated_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[weather]\nunits = \"kelvinish\"\n").unwrap();

        let err = Config::load_validated_from(&path).unwrap_err();
        match err.downcast_ref::<ConfigError>() {
            Some(ConfigError::Invalid(summary)) => assert!(summary.contains("weather.units")),
            other => panic!("expected ConfigError::Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
