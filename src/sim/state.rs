//! Game state and core simulation types
//!
//! A `GameState` is one run: created fresh at session start and replaced
//! wholesale on restart. Entities have no identity outside it; opponents are
//! addressed by index.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Hitbox;
use super::grid::SpatialGrid;
use crate::consts::*;

/// A car (player or opponent)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    /// Top-left corner in pixels
    pub pos: IVec2,
    /// Pixels per tick
    pub speed: i32,
}

impl Car {
    pub fn new(pos: IVec2) -> Self {
        Self {
            pos,
            speed: CAR_SPEED,
        }
    }

    #[inline]
    pub fn hitbox(&self) -> Hitbox {
        Hitbox::car(self.pos)
    }
}

/// A falling coin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub pos: IVec2,
}

impl Coin {
    pub fn new(pos: IVec2) -> Self {
        Self { pos }
    }

    #[inline]
    pub fn hitbox(&self) -> Hitbox {
        Hitbox::coin(self.pos)
    }
}

/// A falling road block, exactly one grid cell in size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: IVec2,
    pub width: i32,
    pub height: i32,
}

impl Obstacle {
    pub fn new(pos: IVec2) -> Self {
        Self {
            pos,
            width: OBSTACLE_SIZE,
            height: OBSTACLE_SIZE,
        }
    }

    #[inline]
    pub fn hitbox(&self) -> Hitbox {
        Hitbox::new(self.pos, IVec2::new(self.width, self.height))
    }
}

/// Everything a presenter needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub player: IVec2,
    pub opponents: Vec<IVec2>,
    pub coins: Vec<IVec2>,
    pub obstacles: Vec<IVec2>,
    pub coin_count: u32,
    /// Background scroll offset in [0, SCREEN_HEIGHT)
    pub scroll_offset: i32,
}

/// Complete state of one run (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub player: Car,
    pub opponents: Vec<Car>,
    pub coins: Vec<Coin>,
    pub obstacles: Vec<Obstacle>,
    /// Coins collected this run (never decreases)
    pub coin_count: u32,
    /// Obstacle occupancy as of the last rebuild
    pub grid: SpatialGrid,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Cosmetic road scroll
    pub scroll_offset: i32,
}

impl GameState {
    /// Create a new run with the given seed
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            player: Car::new(IVec2::new(PLAYER_START_X, PLAYER_START_Y)),
            opponents: vec![Car::new(IVec2::ZERO); OPPONENT_COUNT],
            coins: Vec::with_capacity(COIN_COUNT),
            obstacles: Vec::with_capacity(OBSTACLE_COUNT),
            coin_count: 0,
            grid: SpatialGrid::road(),
            time_ticks: 0,
            scroll_offset: 0,
        };

        for _ in 0..COIN_COUNT {
            state.add_coin();
        }
        state.reset_opponents();

        state
    }

    #[inline]
    pub fn obstacles_unlocked(&self) -> bool {
        self.coin_count >= OBSTACLE_UNLOCK
    }

    #[inline]
    pub fn pursuit_unlocked(&self) -> bool {
        self.coin_count >= PURSUIT_UNLOCK
    }

    /// Credit collected coins, generating obstacles when the unlock is crossed
    pub fn add_collected(&mut self, collected: u32) {
        let before = self.coin_count;
        self.coin_count = self.coin_count.saturating_add(collected);

        if before < OBSTACLE_UNLOCK && self.obstacles_unlocked() {
            log::info!("{} coins: obstacles unlocked", self.coin_count);
            self.generate_obstacles();
        }
        if before < PURSUIT_UNLOCK && self.pursuit_unlocked() {
            log::info!("{} coins: opponents now pursue", self.coin_count);
        }
    }

    /// Place every opponent above the screen, re-rolling until it overlaps
    /// none of the opponents already placed
    pub fn reset_opponents(&mut self) {
        for i in 0..self.opponents.len() {
            self.place_opponent(i, i);
        }
    }

    /// Re-roll one opponent above the screen until it overlaps no other opponent
    pub fn respawn_opponent(&mut self, index: usize) {
        self.place_opponent(index, self.opponents.len());
    }

    /// Place opponent `index` clear of every other opponent in `..placed`
    fn place_opponent(&mut self, index: usize, placed: usize) {
        let pos = loop {
            let candidate = IVec2::new(
                self.rng.random_range(LEFT_BOUNDARY..=RIGHT_BOUNDARY - CAR_WIDTH),
                self.rng.random_range(-400..-100),
            );
            let hitbox = Hitbox::car(candidate);
            let blocked = self.opponents[..placed]
                .iter()
                .enumerate()
                .any(|(j, car)| j != index && car.hitbox().intersects(&hitbox));
            if !blocked {
                break candidate;
            }
        };
        self.opponents[index].pos = pos;
    }

    /// Random x for an opponent re-entering at the top
    pub fn random_opponent_x(&mut self) -> i32 {
        self.rng
            .random_range(LEFT_BOUNDARY..=RIGHT_BOUNDARY - CAR_WIDTH)
    }

    /// Spawn a coin somewhere above the screen
    pub fn add_coin(&mut self) {
        let pos = IVec2::new(
            self.rng.random_range(LEFT_BOUNDARY..=RIGHT_BOUNDARY - COIN_SIZE),
            self.rng.random_range(-600..-50),
        );
        self.coins.push(Coin::new(pos));
    }

    /// Spawn an obstacle above the screen, re-rolling until it overlaps no
    /// existing obstacle
    pub fn add_obstacle(&mut self) {
        let pos = loop {
            let candidate = IVec2::new(
                self.rng.random_range(LEFT_BOUNDARY..=RIGHT_BOUNDARY - OBSTACLE_SIZE),
                self.rng.random_range(-800..-200),
            );
            let hitbox = Hitbox::obstacle(candidate);
            if !self
                .obstacles
                .iter()
                .any(|obstacle| obstacle.hitbox().intersects(&hitbox))
            {
                break candidate;
            }
        };
        self.obstacles.push(Obstacle::new(pos));
    }

    /// Replace all obstacles with a fresh set and rebuild the grid
    pub fn generate_obstacles(&mut self) {
        self.obstacles.clear();
        self.fill_obstacles();
        self.rebuild_grid();
    }

    /// Top up obstacles to the full count
    pub fn fill_obstacles(&mut self) {
        while self.obstacles.len() < OBSTACLE_COUNT {
            self.add_obstacle();
        }
    }

    pub fn rebuild_grid(&mut self) {
        self.grid.rebuild(&self.obstacles);
    }

    /// Player's current grid cell
    pub fn player_cell(&self) -> IVec2 {
        self.grid.cell_at(self.player.pos)
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.time_ticks,
            player: self.player.pos,
            opponents: self.opponents.iter().map(|c| c.pos).collect(),
            coins: self.coins.iter().map(|c| c.pos).collect(),
            obstacles: self.obstacles.iter().map(|o| o.pos).collect(),
            coin_count: self.coin_count,
            scroll_offset: self.scroll_offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_counts() {
        let state = GameState::new(12345);
        assert_eq!(state.coin_count, 0);
        assert_eq!(state.coins.len(), COIN_COUNT);
        assert_eq!(state.opponents.len(), OPPONENT_COUNT);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.pos, IVec2::new(PLAYER_START_X, PLAYER_START_Y));
        assert_eq!(state.grid.blocked_count(), 0);
    }

    #[test]
    fn test_opponents_spawn_without_overlap() {
        for seed in 0..50 {
            let state = GameState::new(seed);
            for (i, a) in state.opponents.iter().enumerate() {
                assert!(a.pos.x >= LEFT_BOUNDARY && a.pos.x <= RIGHT_BOUNDARY - CAR_WIDTH);
                assert!(a.pos.y >= -400 && a.pos.y < -100);
                for b in &state.opponents[i + 1..] {
                    assert!(!a.hitbox().intersects(&b.hitbox()), "seed {}", seed);
                }
            }
        }
    }

    #[test]
    fn test_coins_spawn_above_screen_on_road() {
        let state = GameState::new(99);
        for coin in &state.coins {
            assert!(coin.pos.x >= LEFT_BOUNDARY && coin.pos.x <= RIGHT_BOUNDARY - COIN_SIZE);
            assert!(coin.pos.y >= -600 && coin.pos.y < -50);
        }
    }

    #[test]
    fn test_obstacles_unlock_at_threshold() {
        let mut state = GameState::new(5);
        state.add_collected(OBSTACLE_UNLOCK - 1);
        assert!(state.obstacles.is_empty());

        state.add_collected(1);
        assert!(state.obstacles_unlocked());
        assert_eq!(state.obstacles.len(), OBSTACLE_COUNT);
        for (i, a) in state.obstacles.iter().enumerate() {
            assert!(a.pos.y >= -800 && a.pos.y < -200);
            for b in &state.obstacles[i + 1..] {
                assert!(!a.hitbox().intersects(&b.hitbox()));
            }
        }
    }

    #[test]
    fn test_pursuit_unlock() {
        let mut state = GameState::new(5);
        state.add_collected(PURSUIT_UNLOCK - 1);
        assert!(!state.pursuit_unlocked());
        state.add_collected(1);
        assert!(state.pursuit_unlocked());
    }

    #[test]
    fn test_same_seed_same_world() {
        let a = GameState::new(4242);
        let b = GameState::new(4242);
        assert_eq!(a.snapshot(), b.snapshot());

        let c = GameState::new(4243);
        assert_ne!(a.snapshot(), c.snapshot());
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(1);
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        let back: WorldSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.coins.len(), COIN_COUNT);
        assert_eq!(back.player, state.player.pos);
    }
}
