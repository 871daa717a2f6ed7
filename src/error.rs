//! Error types for moonlattice.
//!
//! The simulation itself never fails once built. Errors only surface when a
//! scene is constructed from bad parameters or when a configuration file
//! cannot be read.

use std::fmt;

/// Invalid scene parameters, rejected at construction time.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Lattice radius or half-height is not a finite positive number.
    InvalidLattice { radius: f32, half_height: f32 },
    /// Restitution outside `[0, 1]`.
    InvalidRestitution(f32),
    /// Moon phase step is not finite and positive, or would skip the whole arc.
    InvalidPhaseStep(f32),
    /// A moon orbit parameter is negative or non-finite.
    InvalidMoon(&'static str),
    /// A frame animation parameter is non-finite or out of range.
    InvalidFrame(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidLattice { radius, half_height } => write!(
                f,
                "Invalid lattice: radius {} and half-height {} must both be finite and positive",
                radius, half_height
            ),
            ConfigError::InvalidRestitution(r) => {
                write!(f, "Invalid restitution {}: expected a value in [0, 1]", r)
            }
            ConfigError::InvalidPhaseStep(s) => {
                write!(f, "Invalid moon phase step {}: expected a value in (0, π)", s)
            }
            ConfigError::InvalidMoon(field) => {
                write!(f, "Invalid moon parameter `{}`: must be finite and non-negative", field)
            }
            ConfigError::InvalidFrame(field) => {
                write!(f, "Invalid frame parameter `{}`: must be finite and in range", field)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Errors that can occur when loading a scene configuration.
#[derive(Debug)]
pub enum SceneError {
    /// Failed to read the configuration file.
    Io(std::io::Error),
    /// Configuration file is not valid JSON for a [`SceneConfig`](crate::SceneConfig).
    Json(serde_json::Error),
    /// Configuration parsed but describes an invalid scene.
    Config(ConfigError),
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::Io(e) => write!(f, "Failed to read scene config: {}", e),
            SceneError::Json(e) => write!(f, "Failed to parse scene config: {}", e),
            SceneError::Config(e) => write!(f, "Scene config rejected: {}", e),
        }
    }
}

impl std::error::Error for SceneError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SceneError::Io(e) => Some(e),
            SceneError::Json(e) => Some(e),
            SceneError::Config(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SceneError {
    fn from(e: std::io::Error) -> Self {
        SceneError::Io(e)
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(e: serde_json::Error) -> Self {
        SceneError::Json(e)
    }
}

impl From<ConfigError> for SceneError {
    fn from(e: ConfigError) -> Self {
        SceneError::Config(e)
    }
}
