//! Demo-mode driver
//!
//! Picks one directional input per tick: sidestep anything coming down the
//! player's lane, otherwise go after the nearest coin that is on screen.

use glam::IVec2;

use crate::consts::*;
use crate::manhattan;
use crate::sim::{Direction, GameState, Hitbox};

/// How far above the player to look for threats (pixels)
const LOOKAHEAD: i32 = 160;
/// Extra width around the player's lane treated as dangerous
const LANE_MARGIN: i32 = 10;

/// Choose the next input, or `None` to hold position
pub fn choose_direction(state: &GameState) -> Option<Direction> {
    let player = state.player.pos;

    let danger_zone = Hitbox::new(
        IVec2::new(player.x - LANE_MARGIN, player.y - LOOKAHEAD),
        IVec2::new(CAR_WIDTH + 2 * LANE_MARGIN, CAR_HEIGHT + LOOKAHEAD),
    );

    let threats: Vec<Hitbox> = state
        .opponents
        .iter()
        .map(|car| car.hitbox())
        .chain(state.obstacles.iter().map(|o| o.hitbox()))
        .filter(|hitbox| hitbox.intersects(&danger_zone))
        .collect();

    if !threats.is_empty() {
        return Some(dodge(player, &threats));
    }

    let target = state
        .coins
        .iter()
        .filter(|coin| coin.pos.y >= 0)
        .min_by_key(|coin| manhattan(coin.pos, player))?;

    // Line up the coin with the middle of the car
    let aim = target.pos + IVec2::splat(COIN_SIZE / 2) - IVec2::new(CAR_WIDTH / 2, CAR_HEIGHT / 2);
    let offset = aim - player;
    if offset.x.abs() >= CAR_SPEED {
        Some(if offset.x < 0 { Direction::Left } else { Direction::Right })
    } else if offset.y.abs() >= CAR_SPEED {
        Some(if offset.y < 0 { Direction::Up } else { Direction::Down })
    } else {
        None
    }
}

/// Step away from the threats' average center, toward open road if pinned
fn dodge(player: IVec2, threats: &[Hitbox]) -> Direction {
    let player_center = player.x + CAR_WIDTH / 2;
    let threat_center = threats
        .iter()
        .map(|h| h.pos.x + h.size.x / 2)
        .sum::<i32>()
        / threats.len() as i32;

    let at_left = player.x <= LEFT_BOUNDARY;
    let at_right = player.x >= RIGHT_BOUNDARY - CAR_WIDTH;

    let threat_on_right = threat_center >= player_center;
    match (threat_on_right, at_left, at_right) {
        (true, false, _) => Direction::Left,
        (true, true, _) => Direction::Right,
        (false, _, true) => Direction::Left,
        (false, _, false) => Direction::Right,
    }
}
