//! Error types
//!
//! The simulation itself cannot fail. Errors only come from the edges: reading
//! and validating runtime settings.

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum RidesError {
    /// Settings file could not be read or written
    Io(io::Error),

    /// Settings file is not valid JSON for `Settings`
    Json(serde_json::Error),

    /// A setting parsed but is outside its usable range
    InvalidSetting {
        /// Field name as it appears in the settings file
        name: &'static str,
        /// Human-readable description of the allowed range
        expected: &'static str,
    },
}

impl fmt::Display for RidesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RidesError::Io(err) => write!(f, "settings I/O failed: {}", err),
            RidesError::Json(err) => write!(f, "settings are not valid JSON: {}", err),
            RidesError::InvalidSetting { name, expected } => {
                write!(f, "invalid setting '{}': expected {}", name, expected)
            }
        }
    }
}

impl std::error::Error for RidesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RidesError::Io(err) => Some(err),
            RidesError::Json(err) => Some(err),
            RidesError::InvalidSetting { .. } => None,
        }
    }
}

impl From<io::Error> for RidesError {
    fn from(err: io::Error) -> Self {
        RidesError::Io(err)
    }
}

impl From<serde_json::Error> for RidesError {
    fn from(err: serde_json::Error) -> Self {
        RidesError::Json(err)
    }
}
