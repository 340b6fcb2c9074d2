//! Error types.
//!
//! The per-tick physics and loop code never fails: missing optional siblings
//! are skipped. Errors only surface where a caller asked for something
//! specific, such as loading a config file or forcing a body that does not
//! exist.

use std::path::PathBuf;

use crate::ecs::ObjectId;

/// Failures while loading or resolving an [`EngineConfig`](crate::config::EngineConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown physics system '{0}' (expected \"Euler\" or \"Verlet\")")]
    UnknownPhysicsSystem(String),
}

/// Failures of targeted scene operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    #[error("GameObject {0} does not exist")]
    DeadObject(ObjectId),

    #[error("GameObject {object} has no {component}")]
    MissingComponent {
        object: ObjectId,
        component: &'static str,
    },
}
