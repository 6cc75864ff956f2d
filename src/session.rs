//! Simulation clock and the presenter boundary
//!
//! The clock owns the current run and the in-memory leaderboard. A single event
//! loop drives it: `on_tick` every `tick_period()`, and the input callbacks in
//! between. It never ticks concurrently with input, so no locking is needed.
//!
//! ```text
//! Idle --on_start--> Running --crash--> Ended --on_restart--> Running
//! ```

use std::time::Duration;

use crate::highscores::HighScores;
use crate::sim::{Direction, GameState, TickOutcome, WorldSnapshot, apply_input, tick};

/// Receives world updates from the clock (rendering, HUD, logging...)
pub trait Presenter {
    /// Called after every tick and every applied input
    fn world_updated(&mut self, snapshot: &WorldSnapshot);

    /// Called once when a run ends
    fn game_ended(&mut self, final_score: u32, record: u32);
}

/// Clock lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockState {
    /// Not started
    Idle,
    /// Ticking
    Running,
    /// Run over, waiting for restart
    Ended,
}

/// Fixed-tick driver for runs
pub struct SimulationClock<P: Presenter> {
    phase: ClockState,
    game: GameState,
    high_scores: HighScores,
    presenter: P,
    base_seed: u64,
    /// Runs started so far
    sessions: u64,
}

impl<P: Presenter> SimulationClock<P> {
    /// Create an idle clock. Each run is seeded from `seed` and its session number.
    pub fn new(seed: u64, presenter: P) -> Self {
        Self {
            phase: ClockState::Idle,
            game: GameState::new(session_seed(seed, 0)),
            high_scores: HighScores::new(),
            presenter,
            base_seed: seed,
            sessions: 0,
        }
    }

    /// Tick period the caller should schedule `on_tick` at
    pub fn period(&self) -> Duration {
        crate::tick_period()
    }

    pub fn phase(&self) -> ClockState {
        self.phase
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    /// Best score this process has seen
    pub fn record(&self) -> u32 {
        self.high_scores.record()
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Start the first run. Ignored unless idle.
    pub fn on_start(&mut self) {
        if self.phase != ClockState::Idle {
            log::debug!("Start ignored while {:?}", self.phase);
            return;
        }
        self.begin_session();
    }

    /// Replace the run with a fresh one. The leaderboard survives.
    pub fn on_restart(&mut self) {
        if self.phase == ClockState::Running {
            log::info!("Restarting mid-run at {} coins", self.game.coin_count);
        }
        self.begin_session();
    }

    /// Steer the player. Ignored unless running.
    pub fn on_directional_input(&mut self, direction: Direction) {
        if self.phase != ClockState::Running {
            return;
        }
        let collected = apply_input(&mut self.game, direction);
        if collected > 0 {
            log::debug!("Collected {} coin(s), total {}", collected, self.game.coin_count);
        }
        self.presenter.world_updated(&self.game.snapshot());
    }

    /// Steer by key name. Unknown keys are ignored.
    pub fn on_key(&mut self, key: &str) {
        if let Some(direction) = Direction::from_key(key) {
            self.on_directional_input(direction);
        }
    }

    /// Advance one tick if running. Returns the phase afterwards.
    pub fn on_tick(&mut self) -> ClockState {
        if self.phase != ClockState::Running {
            return self.phase;
        }

        if let TickOutcome::Crashed(collision) = tick(&mut self.game) {
            self.phase = ClockState::Ended;
            let score = self.game.coin_count;
            let rank = self
                .high_scores
                .add_score(score, self.game.time_ticks, self.sessions);
            let record = self.record();

            log::info!(
                "Session {} over: {:?} at tick {}, score {} (record {})",
                self.sessions,
                collision,
                self.game.time_ticks,
                score,
                record
            );
            if rank == Some(1) {
                log::info!("New record: {}", record);
            }
            self.presenter.game_ended(score, record);
        }

        let snapshot = self.game.snapshot();
        log::trace!("Tick {}: {:?}", snapshot.tick, snapshot);
        self.presenter.world_updated(&snapshot);

        self.phase
    }

    fn begin_session(&mut self) {
        let seed = session_seed(self.base_seed, self.sessions);
        self.sessions += 1;
        self.game = GameState::new(seed);
        self.phase = ClockState::Running;
        log::info!("Session {} started with seed: {}", self.sessions, seed);
        self.presenter.world_updated(&self.game.snapshot());
    }
}

/// Per-session seed derived from the base seed (golden ratio hash)
fn session_seed(base: u64, session: u64) -> u64 {
    base.wrapping_add(session.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::Car;
    use glam::IVec2;

    /// Presenter that records everything it is told
    #[derive(Default)]
    struct Recorder {
        updates: Vec<WorldSnapshot>,
        endings: Vec<(u32, u32)>,
    }

    impl Presenter for Recorder {
        fn world_updated(&mut self, snapshot: &WorldSnapshot) {
            self.updates.push(snapshot.clone());
        }

        fn game_ended(&mut self, final_score: u32, record: u32) {
            self.endings.push((final_score, record));
        }
    }

    /// Put an opponent right on top of the player so the next tick crashes
    fn force_crash(clock: &mut SimulationClock<Recorder>) {
        let player = clock.game.player.pos;
        clock.game.opponents[0] = Car::new(player);
    }

    #[test]
    fn test_idle_until_started() {
        let mut clock = SimulationClock::new(1, Recorder::default());
        assert_eq!(clock.phase(), ClockState::Idle);

        assert_eq!(clock.on_tick(), ClockState::Idle);
        clock.on_directional_input(Direction::Left);
        assert!(clock.presenter().updates.is_empty());

        clock.on_start();
        assert_eq!(clock.phase(), ClockState::Running);
        assert_eq!(clock.presenter().updates.len(), 1);
    }

    #[test]
    fn test_tick_emits_snapshot() {
        let mut clock = SimulationClock::new(2, Recorder::default());
        clock.on_start();
        clock.on_tick();
        clock.on_tick();

        let updates = &clock.presenter().updates;
        assert_eq!(updates.len(), 3);
        assert_eq!(updates[2].tick, 2);
        assert_eq!(updates[2].coins.len(), COIN_COUNT);
        assert_eq!(updates[2].opponents.len(), OPPONENT_COUNT);
    }

    #[test]
    fn test_input_moves_player_while_running() {
        let mut clock = SimulationClock::new(3, Recorder::default());
        clock.on_start();
        clock.on_directional_input(Direction::Left);
        assert_eq!(
            clock.game().player.pos,
            IVec2::new(PLAYER_START_X - CAR_SPEED, PLAYER_START_Y)
        );

        // Unknown keys are a no-op
        let updates = clock.presenter().updates.len();
        clock.on_key("space");
        assert_eq!(clock.presenter().updates.len(), updates);
        clock.on_key("right");
        assert_eq!(clock.game().player.pos, IVec2::new(PLAYER_START_X, PLAYER_START_Y));
    }

    #[test]
    fn test_crash_ends_session_and_records() {
        let mut clock = SimulationClock::new(4, Recorder::default());
        clock.on_start();
        clock.game.add_collected(7);
        force_crash(&mut clock);

        assert_eq!(clock.on_tick(), ClockState::Ended);
        assert_eq!(clock.presenter().endings, vec![(7, 7)]);
        assert_eq!(clock.record(), 7);

        // Ended clocks ignore ticks and input
        let ticks = clock.game().time_ticks;
        assert_eq!(clock.on_tick(), ClockState::Ended);
        clock.on_directional_input(Direction::Up);
        assert_eq!(clock.game().time_ticks, ticks);
    }

    #[test]
    fn test_restart_resets_run_and_keeps_record() {
        let mut clock = SimulationClock::new(5, Recorder::default());
        clock.on_start();
        clock.game.add_collected(25);
        force_crash(&mut clock);
        clock.on_tick();
        assert_eq!(clock.record(), 25);

        clock.on_restart();
        assert_eq!(clock.phase(), ClockState::Running);
        let game = clock.game();
        assert_eq!(game.coin_count, 0);
        assert_eq!(game.time_ticks, 0);
        assert_eq!(game.coins.len(), COIN_COUNT);
        assert_eq!(game.opponents.len(), OPPONENT_COUNT);
        assert!(game.obstacles.is_empty());
        assert_eq!(game.player.pos, IVec2::new(PLAYER_START_X, PLAYER_START_Y));
        assert_eq!(clock.record(), 25);

        // A worse run does not lower the record
        clock.game.add_collected(3);
        force_crash(&mut clock);
        clock.on_tick();
        assert_eq!(clock.presenter().endings, vec![(25, 25), (3, 25)]);
    }

    #[test]
    fn test_sessions_get_distinct_seeds() {
        let mut clock = SimulationClock::new(6, Recorder::default());
        clock.on_start();
        let first = clock.game().seed;
        clock.on_restart();
        assert_ne!(clock.game().seed, first);
    }

    #[test]
    fn test_start_ignored_when_running() {
        let mut clock = SimulationClock::new(7, Recorder::default());
        clock.on_start();
        clock.on_tick();
        clock.on_start();
        assert_eq!(clock.game().time_ticks, 1);
    }
}
