//! Configuration for the loradeck console.
//!
//! A single TOML file merged with `LORADECK_*` environment variables,
//! plus token resolution (env var indirection or plaintext) and
//! translation to `loradeck_api::TransportConfig`.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use loradeck_api::{TlsMode, TransportConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API token configured (set token in the config file or the LORADECK_API_TOKEN environment variable)")]
    NoToken,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Network-server connection settings.
    pub server: ServerConfig,

    /// Map display defaults.
    #[serde(default)]
    pub map: MapConfig,

    /// Device-search defaults.
    #[serde(default)]
    pub search: SearchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            map: MapConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

/// Connection settings for one network server.
#[derive(Debug, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server base URL (e.g., "https://lns.example.com:8080").
    pub url: String,

    /// API token (plaintext — prefer `token_env` or LORADECK_API_TOKEN).
    pub token: Option<String>,

    /// Environment variable name containing the API token.
    pub token_env: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Accept invalid TLS certificates.
    #[serde(default)]
    pub insecure: bool,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8080".into(),
            token: None,
            token_env: None,
            ca_cert: None,
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

/// Where the map centers when no gateway location is available.
#[derive(Debug, Deserialize, Serialize)]
pub struct MapConfig {
    #[serde(default = "default_latitude")]
    pub default_latitude: f64,

    #[serde(default = "default_longitude")]
    pub default_longitude: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_latitude: default_latitude(),
            default_longitude: default_longitude(),
        }
    }
}

fn default_latitude() -> f64 {
    52.373
}
fn default_longitude() -> f64 {
    4.899
}

#[derive(Debug, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Uplink count pre-filled in the search limit field.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

fn default_limit() -> u32 {
    5
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("io", "loradeck", "loradeck").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("loradeck");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the config from a specific file plus `LORADECK_*` environment
/// variables. Environment wins over the file.
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("LORADECK_").split("_"));

    let config: Config = figment.extract()?;
    validate(&config)?;
    Ok(config)
}

/// Load the config from the canonical path.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    config
        .server
        .url
        .parse::<url::Url>()
        .map_err(|_| ConfigError::Validation {
            field: "server.url".into(),
            reason: format!("invalid URL: {}", config.server.url),
        })?;

    if config.search.default_limit == 0 {
        return Err(ConfigError::Validation {
            field: "search.default_limit".into(),
            reason: "must be at least 1".into(),
        });
    }

    let lat = config.map.default_latitude;
    let lon = config.map.default_longitude;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(ConfigError::Validation {
            field: "map".into(),
            reason: format!("default center ({lat}, {lon}) out of range"),
        });
    }

    Ok(())
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── Token resolution ────────────────────────────────────────────────

/// Resolve the API token: LORADECK_API_TOKEN, then the profile's
/// `token_env` indirection, then plaintext in the config file.
pub fn resolve_token(server: &ServerConfig) -> Result<SecretString, ConfigError> {
    if let Ok(val) = std::env::var("LORADECK_API_TOKEN") {
        return Ok(SecretString::from(val));
    }

    if let Some(ref env_name) = server.token_env {
        if let Ok(val) = std::env::var(env_name) {
            return Ok(SecretString::from(val));
        }
    }

    if let Some(ref token) = server.token {
        return Ok(SecretString::from(token.clone()));
    }

    Err(ConfigError::NoToken)
}

// ── Transport translation ───────────────────────────────────────────

/// Build a `TransportConfig` from the server section.
pub fn to_transport(server: &ServerConfig) -> TransportConfig {
    let tls = if server.insecure {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = server.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    TransportConfig {
        tls,
        timeout: Duration::from_secs(server.timeout),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_config(dir: &tempfile::TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_file_with_defaults_filled_in() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            r#"
                [server]
                url = "https://lns.example.com:8080"
                token = "abc123"
            "#,
        );

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.server.url, "https://lns.example.com:8080");
        assert_eq!(config.server.timeout, 30);
        assert_eq!(config.search.default_limit, 5);
        assert!(!config.server.insecure);
    }

    #[test]
    fn missing_file_yields_pure_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.server.url, "http://localhost:8080");
    }

    #[test]
    fn rejects_invalid_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(&dir, "[server]\nurl = \"not a url\"\n");
        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "server.url"));
    }

    #[test]
    fn rejects_zero_default_limit() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "[server]\nurl = \"http://localhost:8080\"\n\n[search]\ndefault_limit = 0\n",
        );
        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn rejects_out_of_range_map_center() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            &dir,
            "[server]\nurl = \"http://localhost:8080\"\n\n[map]\ndefault_latitude = 120.0\n",
        );
        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn plaintext_token_resolves() {
        let server = ServerConfig {
            token: Some("plain-token".into()),
            ..ServerConfig::default()
        };
        let secret = resolve_token(&server).unwrap();
        assert_eq!(secrecy::ExposeSecret::expose_secret(&secret), "plain-token");
    }

    #[test]
    fn missing_token_is_an_error() {
        let server = ServerConfig::default();
        assert!(matches!(resolve_token(&server), Err(ConfigError::NoToken)));
    }

    #[test]
    fn insecure_maps_to_danger_tls() {
        let server = ServerConfig {
            insecure: true,
            timeout: 10,
            ..ServerConfig::default()
        };
        let transport = to_transport(&server);
        assert!(matches!(transport.tls, TlsMode::DangerAcceptInvalid));
        assert_eq!(transport.timeout, Duration::from_secs(10));
    }
}
