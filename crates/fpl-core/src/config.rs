// Configuration loading and parsing (config/dashboard.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Public FPL endpoint serving the season bootstrap document.
pub const DEFAULT_API_URL: &str = "https://fantasy.premierleague.com/api/bootstrap-static/";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// Config structs
// ---------------------------------------------------------------------------

/// Fully assembled dashboard configuration.
///
/// Every section is optional in the TOML file; omitted keys fall back to the
/// built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub display: DisplayConfig,
    pub controls: ControlsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Bootstrap endpoint fetched once at startup.
    pub url: String,
    /// Optional `User-Agent` header sent with the request.
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            url: DEFAULT_API_URL.to_string(),
            user_agent: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub title: String,
    pub subtitle: String,
    /// Prefix used when formatting player cost (e.g. "$60").
    pub currency_prefix: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            title: "2022/2023 FPL Dashboard".to_string(),
            subtitle: "Player selection by value, cost and transfers".to_string(),
            currency_prefix: "$".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsConfig {
    /// Increment applied to a value-range bound per key press.
    pub value_step: f64,
    /// Increment applied to a cost-range bound per key press.
    pub cost_step: f64,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        ControlsConfig {
            value_step: 0.5,
            cost_step: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load configuration from `config/dashboard.toml` under `base_dir`.
///
/// A missing file is not an error: the built-in defaults are returned.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join("dashboard.toml");
    let config = if path.exists() {
        let text = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;
        parse_config(&text, &path)?
    } else {
        Config::default()
    };

    validate(&config)?;
    Ok(config)
}

/// Convenience wrapper: loads config relative to the current working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|e| ConfigError::Io {
        path: PathBuf::from("."),
        source: e,
    })?;
    load_config_from(&cwd)
}

fn parse_config(text: &str, path: &Path) -> Result<Config, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let url = config.api.url.trim();
    if url.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "api.url".into(),
            message: "must not be empty".into(),
        });
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::ValidationError {
            field: "api.url".into(),
            message: format!("must be an http(s) URL, got {url}"),
        });
    }

    let steps: &[(&str, f64)] = &[
        ("controls.value_step", config.controls.value_step),
        ("controls.cost_step", config.controls.cost_step),
    ];
    for (name, val) in steps {
        if !val.is_finite() || *val <= 0.0 {
            return Err(ConfigError::ValidationError {
                field: name.to_string(),
                message: format!("must be a positive number, got {val}"),
            });
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
