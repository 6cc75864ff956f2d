//! Fixed tick simulation step
//!
//! Core game loop that advances the run deterministically. Player input is not
//! part of the tick: it is applied between ticks through `apply_input`.

use glam::IVec2;

use super::collision::{CollisionOutcome, check_coin_pickup, check_collisions};
use super::grid::SpatialGrid;
use super::kinematics::{Direction, advance_coins, advance_obstacles, clamp_player, move_car};
use super::pathfind::find_path;
use super::state::GameState;
use crate::consts::*;

/// What happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing hit the player
    Continue,
    /// The player crashed; the run is over
    Crashed(CollisionOutcome),
}

/// Advance the run by one tick
///
/// Order: opponents, coins, obstacles (once unlocked, with grid rebuild),
/// collision check, background scroll.
pub fn tick(state: &mut GameState) -> TickOutcome {
    state.time_ticks += 1;

    advance_opponents(state);

    advance_coins(state);

    if state.obstacles_unlocked() {
        state.fill_obstacles();
        advance_obstacles(state);
        state.rebuild_grid();
        log::trace!("Grid rebuilt, {} cell(s) blocked", state.grid.blocked_count());
    }

    let collision = check_collisions(state);

    state.scroll_offset += SCROLL_SPEED;
    if state.scroll_offset >= SCREEN_HEIGHT {
        state.scroll_offset = 0;
    }

    if collision.is_hit() {
        TickOutcome::Crashed(collision)
    } else {
        TickOutcome::Continue
    }
}

/// Apply one directional input to the player: move, clamp, collect coins.
/// Returns the number of coins picked up.
pub fn apply_input(state: &mut GameState, direction: Direction) -> u32 {
    move_car(&mut state.player, direction.delta());
    clamp_player(&mut state.player);
    check_coin_pickup(state)
}

/// Move every opponent one step, wrapping those that leave the bottom
fn advance_opponents(state: &mut GameState) {
    let pursuit = state.pursuit_unlocked();
    let player_cell = state.player_cell();

    for i in 0..state.opponents.len() {
        let step = if pursuit {
            pursuit_step(&state.grid, state.opponents[i].pos, player_cell).unwrap_or(IVec2::Y)
        } else {
            IVec2::Y
        };
        move_car(&mut state.opponents[i], step);

        if state.opponents[i].pos.y <= SCREEN_HEIGHT {
            continue;
        }
        if pursuit {
            // Pursuers re-enter just above the screen without an overlap check
            let x = state.random_opponent_x();
            state.opponents[i].pos = IVec2::new(x, -CAR_HEIGHT);
        } else {
            state.respawn_opponent(i);
        }
    }
}

/// Unit step from `pos` toward the next cell on the path to `goal`, if there
/// is a path with somewhere to go
fn pursuit_step(grid: &SpatialGrid, pos: IVec2, goal: IVec2) -> Option<IVec2> {
    let start = grid.cell_at(pos);
    match find_path(grid, start, goal) {
        Some(path) if path.len() > 1 => Some((path[1] - start).signum()),
        Some(_) => None,
        None => {
            log::debug!("No path from {} to {}, driving straight", start, goal);
            None
        }
    }
}
