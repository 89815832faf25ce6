//! Server config loader (strict parsing).

pub mod schema;

use std::fs;
use std::path::Path;

use cardstorm_core::error::{CardstormError, Result};

pub use schema::{CardstormConfig, GeneratorSection, ServerSection};

/// Looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_PATH: &str = "cardstorm.yaml";

/// Load `path` if given; otherwise the default file if present, else defaults.
pub fn load(path: Option<&str>) -> Result<CardstormConfig> {
    match path {
        Some(p) => load_from_file(p),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_from_file(DEFAULT_CONFIG_PATH),
        None => {
            tracing::info!("no {DEFAULT_CONFIG_PATH} found, using built-in defaults");
            Ok(CardstormConfig::default())
        }
    }
}

pub fn load_from_file(path: &str) -> Result<CardstormConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| CardstormError::Internal(format!("read config {path} failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<CardstormConfig> {
    let cfg: CardstormConfig = serde_yaml::from_str(s)
        .map_err(|e| CardstormError::BadRequest(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
