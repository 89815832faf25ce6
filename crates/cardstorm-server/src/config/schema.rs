use std::net::SocketAddr;

use cardstorm_core::error::{CardstormError, Result};
use cardstorm_core::generator::{DEFAULT_PROGRESS_EVERY, DEFAULT_SERIES_COUNT, DEFAULT_VALUE_RANGE};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CardstormConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub generator: GeneratorSection,
}

impl Default for CardstormConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            generator: GeneratorSection::default(),
        }
    }
}

impl CardstormConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(CardstormError::UnsupportedVersion(self.version));
        }
        self.server.validate()?;
        self.generator.validate()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            CardstormError::BadRequest(format!(
                "server.listen must be a valid socket address ({}): {e}",
                self.listen
            ))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

/// Defaults applied when a generate request omits a parameter.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorSection {
    #[serde(default = "default_series_count")]
    pub default_series_count: u64,

    #[serde(default = "default_value_range")]
    pub default_value_range: u64,

    #[serde(default = "default_progress_every")]
    pub progress_every: u64,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            default_series_count: default_series_count(),
            default_value_range: default_value_range(),
            progress_every: default_progress_every(),
        }
    }
}

impl GeneratorSection {
    pub fn validate(&self) -> Result<()> {
        if self.default_value_range == 0 {
            return Err(CardstormError::BadRequest(
                "generator.default_value_range must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

fn default_series_count() -> u64 {
    DEFAULT_SERIES_COUNT
}
fn default_value_range() -> u64 {
    DEFAULT_VALUE_RANGE as u64
}
fn default_progress_every() -> u64 {
    DEFAULT_PROGRESS_EVERY
}
