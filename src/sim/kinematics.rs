//! Entity movement
//!
//! Cars move one speed-step per call along a unit direction. Coins and
//! obstacles only fall, and are recycled once they leave the bottom of the screen.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::state::{Car, GameState};
use crate::consts::*;

/// Directional input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Unit step for this direction (y grows downward)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Left => IVec2::NEG_X,
            Direction::Right => IVec2::X,
            Direction::Up => IVec2::NEG_Y,
            Direction::Down => IVec2::Y,
        }
    }

    /// Map a key name to a direction. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "left" | "arrowleft" | "a" => Some(Direction::Left),
            "right" | "arrowright" | "d" => Some(Direction::Right),
            "up" | "arrowup" | "w" => Some(Direction::Up),
            "down" | "arrowdown" | "s" => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Move a car one step. Each axis of `delta` is reduced to -1/0/1 first.
#[inline]
pub fn move_car(car: &mut Car, delta: IVec2) {
    car.pos += delta.signum() * car.speed;
}

/// Keep the player on the road and on screen
pub fn clamp_player(car: &mut Car) {
    car.pos = car.pos.clamp(
        IVec2::new(LEFT_BOUNDARY, 0),
        IVec2::new(RIGHT_BOUNDARY - CAR_WIDTH, SCREEN_HEIGHT - CAR_HEIGHT),
    );
}

/// Drop every coin by one step, recycling those past the bottom edge
pub fn advance_coins(state: &mut GameState) {
    for coin in &mut state.coins {
        coin.pos.y += FALL_SPEED;
    }
    let before = state.coins.len();
    state.coins.retain(|coin| coin.pos.y <= SCREEN_HEIGHT);
    for _ in state.coins.len()..before {
        state.add_coin();
    }
}

/// Drop every obstacle by one step, recycling those past the bottom edge.
/// Does not touch the grid; callers rebuild it.
pub fn advance_obstacles(state: &mut GameState) {
    for obstacle in &mut state.obstacles {
        obstacle.pos.y += FALL_SPEED;
    }
    let before = state.obstacles.len();
    state.obstacles.retain(|obstacle| obstacle.pos.y <= SCREEN_HEIGHT);
    for _ in state.obstacles.len()..before {
        state.add_obstacle();
    }
}
