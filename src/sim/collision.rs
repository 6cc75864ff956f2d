//! Axis-aligned collision detection
//!
//! Hitboxes are half-open rectangles: `[x, x + width) x [y, y + height)`.
//! Two hitboxes collide only when they share at least one pixel on both axes,
//! so boxes that merely touch along an edge do not collide.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::state::GameState;
use crate::consts::*;

/// Axis-aligned bounding box in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hitbox {
    /// Top-left corner
    pub pos: IVec2,
    pub size: IVec2,
}

impl Hitbox {
    pub fn new(pos: IVec2, size: IVec2) -> Self {
        Self { pos, size }
    }

    pub fn car(pos: IVec2) -> Self {
        Self::new(pos, IVec2::new(CAR_WIDTH, CAR_HEIGHT))
    }

    pub fn coin(pos: IVec2) -> Self {
        Self::new(pos, IVec2::splat(COIN_SIZE))
    }

    pub fn obstacle(pos: IVec2) -> Self {
        Self::new(pos, IVec2::splat(OBSTACLE_SIZE))
    }

    /// Exclusive bottom-right corner
    #[inline]
    pub fn max(&self) -> IVec2 {
        self.pos + self.size
    }

    /// True if the boxes overlap by at least one pixel on both axes
    #[inline]
    pub fn intersects(&self, other: &Hitbox) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.pos.x < b_max.x
            && other.pos.x < a_max.x
            && self.pos.y < b_max.y
            && other.pos.y < a_max.y
    }
}

/// Result of checking the player against everything that ends the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionOutcome {
    /// Nothing hit
    Clear,
    /// Player hit the opponent at this index
    PlayerHitOpponent { index: usize },
    /// Player hit the obstacle at this index
    PlayerHitObstacle { index: usize },
}

impl CollisionOutcome {
    pub fn is_hit(&self) -> bool {
        !matches!(self, CollisionOutcome::Clear)
    }
}

/// Check the player against every opponent, then every obstacle.
/// The first hit wins.
pub fn check_collisions(state: &GameState) -> CollisionOutcome {
    let player = state.player.hitbox();

    if let Some(index) = state
        .opponents
        .iter()
        .position(|car| car.hitbox().intersects(&player))
    {
        return CollisionOutcome::PlayerHitOpponent { index };
    }

    if let Some(index) = state
        .obstacles
        .iter()
        .position(|obstacle| obstacle.hitbox().intersects(&player))
    {
        return CollisionOutcome::PlayerHitObstacle { index };
    }

    CollisionOutcome::Clear
}

/// Collect every coin the player overlaps
///
/// Each collected coin is replaced immediately and counts once, so several
/// coins picked up at the same moment all score. Returns how many were taken.
pub fn check_coin_pickup(state: &mut GameState) -> u32 {
    let player = state.player.hitbox();
    let before = state.coins.len();
    state.coins.retain(|coin| !coin.hitbox().intersects(&player));
    let collected = (before - state.coins.len()) as u32;

    for _ in 0..collected {
        state.add_coin();
    }
    if collected > 0 {
        state.add_collected(collected);
    }
    collected
}
