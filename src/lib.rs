//! Rides - a lane racer where opponents learn to hunt you down
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, A* pursuit, kinematics, collisions, game state)
//! - `session`: Fixed-tick clock and the presenter boundary (start/restart/input/game over)
//! - `autopilot`: Demo-mode driver that plays the game
//! - `highscores`: In-memory leaderboard for the process lifetime
//! - `settings`: Runtime settings for the headless driver

pub mod autopilot;
pub mod error;
pub mod highscores;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::RidesError;
pub use highscores::HighScores;
pub use session::{ClockState, Presenter, SimulationClock};
pub use settings::Settings;

use std::time::Duration;

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation tick period (20 Hz)
    pub const TICK_PERIOD_MS: u64 = 50;

    /// Screen dimensions
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 600;

    /// Playable horizontal band (road edges)
    pub const LEFT_BOUNDARY: i32 = 180;
    pub const RIGHT_BOUNDARY: i32 = 650;

    /// Car hitbox (player and opponents)
    pub const CAR_WIDTH: i32 = 50;
    pub const CAR_HEIGHT: i32 = 100;
    /// Car speed in pixels per tick
    pub const CAR_SPEED: i32 = 5;
    /// Player spawn position
    pub const PLAYER_START_X: i32 = 375;
    pub const PLAYER_START_Y: i32 = 500;
    pub const OPPONENT_COUNT: usize = 4;

    /// Coins
    pub const COIN_SIZE: i32 = 30;
    pub const COIN_COUNT: usize = 5;

    /// Obstacles (footprint matches one grid cell)
    pub const OBSTACLE_SIZE: i32 = 50;
    pub const OBSTACLE_COUNT: usize = 3;

    /// Fall speed of coins and obstacles, pixels per tick
    pub const FALL_SPEED: i32 = 5;
    /// Background scroll per tick (cosmetic)
    pub const SCROLL_SPEED: i32 = 5;

    /// Pathfinding cell size
    pub const CELL_SIZE: i32 = 50;

    /// Coin count at which obstacles start falling
    pub const OBSTACLE_UNLOCK: u32 = 20;
    /// Coin count at which opponents start pathing toward the player
    pub const PURSUIT_UNLOCK: u32 = 50;
}

/// Tick period as a `Duration`
#[inline]
pub fn tick_period() -> Duration {
    Duration::from_millis(consts::TICK_PERIOD_MS)
}

/// Manhattan distance between two integer points
#[inline]
pub fn manhattan(a: IVec2, b: IVec2) -> i32 {
    (a - b).abs().element_sum()
}
