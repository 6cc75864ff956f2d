//! Runtime settings for the headless driver
//!
//! Gameplay constants are fixed (see `consts`). Settings only control how the
//! driver runs sessions: seeding, pacing, autopilot and logging cadence.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::RidesError;

/// Environment variable naming a settings file
pub const SETTINGS_ENV: &str = "RIDES_SETTINGS";

/// Driver settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed seed for reproducible runs (random when absent)
    pub seed: Option<u64>,
    /// Let the autopilot steer the player
    pub autopilot: bool,
    /// Sleep out the tick period between ticks
    pub realtime: bool,
    /// Sessions to play before exiting (restart after each crash)
    pub sessions: u32,
    /// Tick cap per session
    pub max_ticks: u64,
    /// Log a world summary every N ticks
    pub snapshot_log_interval: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            autopilot: true,
            realtime: false,
            sessions: 3,
            max_ticks: 20_000,
            snapshot_log_interval: 200,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, RidesError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load_from(path: &Path) -> Result<Self, RidesError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), RidesError> {
        if self.sessions == 0 {
            return Err(RidesError::InvalidSetting {
                name: "sessions",
                expected: "at least 1",
            });
        }
        if self.max_ticks == 0 {
            return Err(RidesError::InvalidSetting {
                name: "max_ticks",
                expected: "at least 1",
            });
        }
        if self.snapshot_log_interval == 0 {
            return Err(RidesError::InvalidSetting {
                name: "snapshot_log_interval",
                expected: "at least 1",
            });
        }
        Ok(())
    }

    /// Load from `path`, falling back to defaults if it is missing or bad
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("{} ({}), using default settings", err, path.display());
                Self::default()
            }
        }
    }

    /// Settings path from the first CLI argument, else the environment
    pub fn path_from_env() -> Option<PathBuf> {
        std::env::args_os()
            .nth(1)
            .or_else(|| std::env::var_os(SETTINGS_ENV))
            .map(PathBuf::from)
    }

    /// The configured seed, or a fresh random one
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}
