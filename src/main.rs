//! Rides entry point
//!
//! Headless driver: runs sessions through the simulation clock with a logging
//! presenter, optionally letting the autopilot play.
//!
//! Usage: `rides [settings.json]` (or set `RIDES_SETTINGS`). Log level via `RUST_LOG`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::thread;
    use std::time::Instant;

    use rides::sim::WorldSnapshot;
    use rides::{ClockState, Presenter, Settings, SimulationClock, autopilot};

    /// Presenter that reports the world through the logger
    pub struct LogPresenter {
        interval: u64,
        last_coin_count: u32,
        pub games_over: u32,
    }

    impl LogPresenter {
        pub fn new(interval: u64) -> Self {
            Self {
                interval: interval.max(1),
                last_coin_count: 0,
                games_over: 0,
            }
        }
    }

    impl Presenter for LogPresenter {
        fn world_updated(&mut self, snapshot: &WorldSnapshot) {
            if snapshot.coin_count < self.last_coin_count {
                // New session
                self.last_coin_count = 0;
            }
            if snapshot.coin_count > self.last_coin_count {
                log::debug!("Coins: {}", snapshot.coin_count);
                self.last_coin_count = snapshot.coin_count;
            }

            if snapshot.tick > 0 && snapshot.tick % self.interval == 0 {
                log::info!(
                    "Tick {}: player ({}, {}), coins {}, obstacles {}",
                    snapshot.tick,
                    snapshot.player.x,
                    snapshot.player.y,
                    snapshot.coin_count,
                    snapshot.obstacles.len()
                );
                if log::log_enabled!(log::Level::Trace) {
                    match serde_json::to_string(snapshot) {
                        Ok(json) => log::trace!("{}", json),
                        Err(e) => log::warn!("Snapshot encode failed: {}", e),
                    }
                }
            }
        }

        fn game_ended(&mut self, final_score: u32, record: u32) {
            self.games_over += 1;
            println!("Crash! Coins: {}  Record: {}", final_score, record);
        }
    }

    pub fn run() {
        let path = Settings::path_from_env();
        let settings = Settings::load_or_default(path.as_deref());
        let seed = settings.resolve_seed();
        log::info!("Game initialized with seed: {}", seed);

        let mut clock = SimulationClock::new(seed, LogPresenter::new(settings.snapshot_log_interval));
        let period = clock.period();

        for session in 0..settings.sessions {
            if session == 0 {
                clock.on_start();
            } else {
                clock.on_restart();
            }

            let mut ticks = 0;
            while clock.phase() == ClockState::Running && ticks < settings.max_ticks {
                let started = Instant::now();

                if settings.autopilot {
                    if let Some(direction) = autopilot::choose_direction(clock.game()) {
                        clock.on_directional_input(direction);
                    }
                }
                clock.on_tick();
                ticks += 1;

                if settings.realtime {
                    if let Some(rest) = period.checked_sub(started.elapsed()) {
                        thread::sleep(rest);
                    }
                }
            }

            if clock.phase() == ClockState::Running {
                log::info!(
                    "Session {} hit the tick cap with {} coins",
                    session + 1,
                    clock.game().coin_count
                );
            }
        }

        let scores = clock.high_scores();
        println!(
            "Sessions: {}  Crashes: {}  Record: {}",
            settings.sessions,
            clock.presenter().games_over,
            clock.record()
        );
        if scores.is_empty() {
            println!("No scoring runs");
        }
        for (i, entry) in scores.entries.iter().enumerate() {
            println!(
                "{:>2}. {:>4} coins  {:>6} ticks  (session {})",
                i + 1,
                entry.score,
                entry.ticks,
                entry.session
            );
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Rides (headless) starting...");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No presenter for wasm32; embed the library instead
}
