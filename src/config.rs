//! Configuration module

use std::env;
use std::path::PathBuf;

use crate::risk::RiskScheme;

const DEFAULT_MODEL_VERSION: &str = "20251023_210956";
const DEFAULT_MODEL_TYPE: &str = "logistic_regression";
const DEFAULT_ORIGINS: &str = "http://localhost:3000,http://localhost:8017";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bind address
    pub host: String,

    /// Server port
    pub port: u16,

    /// Debug mode: exposes internal error details and opens CORS
    pub debug: bool,

    /// Directory holding model, scaler and metadata artifacts
    pub model_dir: PathBuf,

    /// Shared version string of the artifact set
    pub model_version: String,

    /// Model family, part of the model artifact file name
    pub model_type: String,

    /// Risk banding used by every response path
    pub risk_scheme: RiskScheme,

    /// Comma separated CORS origins
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
            debug: false,
            model_dir: PathBuf::from("models"),
            model_version: DEFAULT_MODEL_VERSION.to_string(),
            model_type: DEFAULT_MODEL_TYPE.to_string(),
            risk_scheme: RiskScheme::default(),
            allowed_origins: parse_origins(DEFAULT_ORIGINS),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("ML_HOST").unwrap_or(defaults.host),

            port: env::var("ML_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),

            debug: env::var("DEBUG")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.debug),

            model_dir: env::var("MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_dir),

            model_version: env::var("MODEL_VERSION").unwrap_or(defaults.model_version),

            model_type: env::var("MODEL_TYPE").unwrap_or(defaults.model_type),

            risk_scheme: match env::var("RISK_SCHEME") {
                Ok(raw) => raw.parse().unwrap_or_else(|e| {
                    tracing::warn!("{}, falling back to {}", e, defaults.risk_scheme);
                    defaults.risk_scheme
                }),
                Err(_) => defaults.risk_scheme,
            },

            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or(defaults.allowed_origins),
        }
    }

    /// Origins for the CORS layer; debug mode adds the wildcard
    pub fn cors_origins(&self) -> Vec<String> {
        let mut origins = self.allowed_origins.clone();
        if self.debug && !origins.iter().any(|o| o == "*") {
            origins.push("*".to_string());
        }
        origins
    }

    pub fn model_path(&self) -> PathBuf {
        self.model_dir.join(format!(
            "diabetes_model_{}_{}.json",
            self.model_type, self.model_version
        ))
    }

    pub fn scaler_path(&self) -> PathBuf {
        self.model_dir.join(format!("scaler_{}.json", self.model_version))
    }

    pub fn metadata_path(&self) -> PathBuf {
        self.model_dir
            .join(format!("model_metadata_{}.json", self.model_version))
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
