//! Errors raised while loading a noise configuration.
//!
//! Sampling itself never fails; only the file/parse boundary does.

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to parse TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported config format: {0:?} (expected .json or .toml)")]
    UnsupportedFormat(String),
}
