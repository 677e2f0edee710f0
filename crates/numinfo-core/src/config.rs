//! Configuration management for numinfo.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. API credentials only ever come from the
//! environment and are never written back to disk.

use crate::error::{ConfigError, ConfigResult};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding the `NumVerify` access key.
pub const NUMVERIFY_API_KEY_ENV: &str = "NUMVERIFY_API_KEY";

/// Environment variable holding the `AbstractAPI` phone validation key.
pub const ABSTRACT_API_KEY_ENV: &str = "ABSTRACT_API_KEY";

/// Default `NumVerify` validation endpoint.
pub const DEFAULT_NUMVERIFY_ENDPOINT: &str = "http://apilayer.net/api/validate";

/// Default `AbstractAPI` phone validation endpoint.
pub const DEFAULT_ABSTRACT_API_ENDPOINT: &str = "https://phonevalidation.abstractapi.com/v1/";

/// Main application configuration.
///
/// This is loaded from `~/.config/numinfo/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP client settings shared by remote sources
    pub http: HttpConfig,
    /// Carrier / line type validation API
    pub numverify: RemoteApiConfig,
    /// Phone geolocation / validation API
    pub abstract_api: RemoteApiConfig,
    /// Report file settings
    pub output: OutputConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            numverify: RemoteApiConfig::new(DEFAULT_NUMVERIFY_ENDPOINT),
            abstract_api: RemoteApiConfig::new(DEFAULT_ABSTRACT_API_ENDPOINT),
            output: OutputConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the default location, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path, falling back to defaults if it is missing.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            let config: Self = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `NUMVERIFY_API_KEY`: enables the carrier validation API
    /// - `ABSTRACT_API_KEY`: enables the geolocation API
    /// - `NUMINFO_HTTP_TIMEOUT_SECS`: request timeout for remote sources
    /// - `NUMINFO_NUMVERIFY_URL`: override the carrier API endpoint
    /// - `NUMINFO_ABSTRACT_API_URL`: override the geolocation API endpoint
    pub fn load_with_env(path: Option<&Path>) -> ConfigResult<Self> {
        Self::load_with_lookup(path, |name| std::env::var(name).ok())
    }

    /// Load configuration and apply overrides from `lookup`, then validate the result.
    pub fn load_with_lookup<F>(path: Option<&Path>, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::load_from(path)?,
            None => Self::load()?,
        };
        config.apply_env(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from an environment lookup function.
    ///
    /// Empty values are treated as unset.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|val| !val.trim().is_empty());

        if let Some(key) = get(NUMVERIFY_API_KEY_ENV) {
            self.numverify.api_key = Some(key);
            tracing::debug!("NumVerify API key found in environment");
        }

        if let Some(key) = get(ABSTRACT_API_KEY_ENV) {
            self.abstract_api.api_key = Some(key);
            tracing::debug!("AbstractAPI key found in environment");
        }

        if let Some(val) = get("NUMINFO_HTTP_TIMEOUT_SECS") {
            match val.parse::<u64>() {
                Ok(secs) if secs > 0 => {
                    self.http.timeout_secs = Some(secs);
                    tracing::debug!("Override http.timeout_secs from env: {}", secs);
                }
                _ => tracing::warn!("Ignoring invalid NUMINFO_HTTP_TIMEOUT_SECS value: {}", val),
            }
        }

        if let Some(url) = get("NUMINFO_NUMVERIFY_URL") {
            tracing::debug!("Override numverify.endpoint from env: {}", url);
            self.numverify.endpoint = url;
        }

        if let Some(url) = get("NUMINFO_ABSTRACT_API_URL") {
            tracing::debug!("Override abstract_api.endpoint from env: {}", url);
            self.abstract_api.endpoint = url;
        }
    }

    /// Check values that deserialize fine but cannot be used.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.http.timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "http.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        for (field, api) in [
            ("numverify.endpoint", &self.numverify),
            ("abstract_api.endpoint", &self.abstract_api),
        ] {
            if !api.endpoint.starts_with("http://") && !api.endpoint.starts_with("https://") {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: format!("expected an http(s) URL, got '{}'", api.endpoint),
                });
            }
        }

        Ok(())
    }

    /// Save configuration to disk at the default location.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let config_dir = path.parent().ok_or_else(|| ConfigError::InvalidValue {
            field: "config_path".to_string(),
            reason: "no parent directory".to_string(),
        })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/numinfo/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("com", "numinfo", "numinfo").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Request timeout in seconds; the client default applies when unset
    pub timeout_secs: Option<u64>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: concat!("numinfo/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Settings for one credential-gated remote API.
///
/// `endpoint` is required whenever the section appears in a config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteApiConfig {
    /// Base URL queried with a GET request
    pub endpoint: String,
    /// API key (environment only, never stored in the config file)
    #[serde(skip)]
    pub api_key: Option<String>,
}

impl RemoteApiConfig {
    /// Create a config for the given endpoint with no key.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: None,
        }
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Whether the source backed by this API should be queried.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Report file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Number of spaces used to indent the JSON report
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { indent: 4 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.numverify.endpoint, DEFAULT_NUMVERIFY_ENDPOINT);
        assert_eq!(config.abstract_api.endpoint, DEFAULT_ABSTRACT_API_ENDPOINT);
        assert!(!config.numverify.is_enabled());
        assert!(!config.abstract_api.is_enabled());
        assert_eq!(config.http.timeout_secs, None);
        assert_eq!(config.output.indent, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_api_keys_never_serialized() {
        let mut config = AppConfig::default();
        config.numverify.api_key = Some("secret-numverify".to_string());
        config.abstract_api.api_key = Some("secret-abstract".to_string());

        let toml_str = toml::to_string_pretty(&config).expect("serialize config");
        assert!(toml_str.contains("[numverify]"));
        assert!(!toml_str.contains("secret"));
        assert!(!toml_str.contains("api_key"));
    }

    #[test]
    fn test_config_save_load() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.http.timeout_secs = Some(5);
        config.output.indent = 2;
        config.save_to(&config_path).expect("save config");

        let loaded = AppConfig::load_from(&config_path).expect("load config");
        assert_eq!(loaded.http.timeout_secs, Some(5));
        assert_eq!(loaded.output.indent, 2);
        assert!(loaded.numverify.api_key.is_none());
    }

    #[test]
    fn test_env_endpoint_is_validated() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("config.toml");

        let err = AppConfig::load_with_lookup(
            Some(&path),
            env_from(&[("NUMINFO_NUMVERIFY_URL", "apilayer.net/api/validate")]),
        )
        .expect_err("non-URL endpoint should be rejected");
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, .. } if field == "numverify.endpoint"
        ));

        let config = AppConfig::load_with_lookup(
            Some(&path),
            env_from(&[("NUMINFO_ABSTRACT_API_URL", "http://127.0.0.1:8080/v1/")]),
        )
        .expect("http endpoint accepted");
        assert_eq!(config.abstract_api.endpoint, "http://127.0.0.1:8080/v1/");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let tmp = TempDir::new().expect("create temp dir");
        let config =
            AppConfig::load_from(&tmp.path().join("absent.toml")).expect("load defaults");
        assert_eq!(config.output.indent, 4);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[http]
timeout_secs = 10

[abstract_api]
endpoint = "http://127.0.0.1:9000/v1/"
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.http.timeout_secs, Some(10));
        assert_eq!(config.abstract_api.endpoint, "http://127.0.0.1:9000/v1/");
        // These should be defaults
        assert_eq!(config.numverify.endpoint, DEFAULT_NUMVERIFY_ENDPOINT);
        assert_eq!(config.output.indent, 4);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config.apply_env(env_from(&[
            ("NUMVERIFY_API_KEY", "nv-key"),
            ("ABSTRACT_API_KEY", "abs-key"),
            ("NUMINFO_HTTP_TIMEOUT_SECS", "7"),
            ("NUMINFO_NUMVERIFY_URL", "http://localhost:1234/validate"),
        ]));

        assert_eq!(config.numverify.api_key.as_deref(), Some("nv-key"));
        assert_eq!(config.abstract_api.api_key.as_deref(), Some("abs-key"));
        assert_eq!(config.http.timeout_secs, Some(7));
        assert_eq!(config.numverify.endpoint, "http://localhost:1234/validate");
        assert_eq!(config.abstract_api.endpoint, DEFAULT_ABSTRACT_API_ENDPOINT);
    }

    #[test]
    fn test_empty_env_values_are_unset() {
        let mut config = AppConfig::default();
        config.apply_env(env_from(&[
            ("NUMVERIFY_API_KEY", ""),
            ("ABSTRACT_API_KEY", "   "),
            ("NUMINFO_HTTP_TIMEOUT_SECS", "soon"),
        ]));

        assert!(!config.numverify.is_enabled());
        assert!(!config.abstract_api.is_enabled());
        assert_eq!(config.http.timeout_secs, None);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.http.timeout_secs = Some(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "http.timeout_secs"
        ));

        let mut config = AppConfig::default();
        config.numverify.endpoint = "apilayer.net/api/validate".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "numverify.endpoint"
        ));
    }
}
