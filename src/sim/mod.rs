//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only
//! - Seeded RNG only (owned by `GameState`)
//! - Stable iteration order (opponents by index)
//! - No rendering or platform dependencies

pub mod collision;
pub mod grid;
pub mod kinematics;
pub mod pathfind;
pub mod state;
pub mod tick;

pub use collision::{CollisionOutcome, Hitbox, check_coin_pickup, check_collisions};
pub use grid::SpatialGrid;
pub use kinematics::{Direction, advance_coins, advance_obstacles, clamp_player, move_car};
pub use pathfind::find_path;
pub use state::{Car, Coin, GameState, Obstacle, WorldSnapshot};
pub use tick::{TickOutcome, apply_input, tick};
