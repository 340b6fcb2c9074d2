//! Engine configuration.
//!
//! Loaded from JSON, every field optional:
//!
//! ```json
//! { "physics_system": "Verlet", "profiler_history": 240 }
//! ```
//!
//! `BRANDR_PHYSICS_SYSTEM` in the environment overrides the file, see
//! [`EngineConfig::with_env_overrides`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::physics::IntegrationScheme;
use crate::profiler::DEFAULT_HISTORY;

pub const PHYSICS_SYSTEM_ENV: &str = "BRANDR_PHYSICS_SYSTEM";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// `"Euler"` or `"Verlet"`.
    pub physics_system: String,
    /// Samples kept per profiler process.
    pub profiler_history: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            physics_system: "Euler".to_string(),
            profiler_history: DEFAULT_HISTORY,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        log::info!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Apply environment overrides on top of the current values.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(system) = std::env::var(PHYSICS_SYSTEM_ENV) {
            log::debug!("{PHYSICS_SYSTEM_ENV} overrides physics_system to '{system}'");
            self.physics_system = system;
        }
        self
    }

    /// Resolve the physics system name. Unknown names disable integration
    /// and log a warning.
    pub fn integration_scheme(&self) -> IntegrationScheme {
        match self.physics_system.parse() {
            Ok(scheme) => scheme,
            Err(err) => {
                log::warn!("{err}; rigid bodies will not be integrated");
                IntegrationScheme::Disabled
            }
        }
    }
}
