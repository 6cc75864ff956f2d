//! High score leaderboard
//!
//! Held in memory for the lifetime of the process; tracks the top 10 runs.

use serde::{Deserialize, Serialize};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Coins collected
    pub score: u32,
    /// Ticks survived
    pub ticks: u64,
    /// Session number (1-based) the run belonged to
    pub session: u64,
}

/// High score leaderboard
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a score would be inserted at, keeping entries sorted best first.
    /// Equal scores go after the runs already on the board.
    fn slot(&self, score: u32) -> Option<usize> {
        if score == 0 {
            return None;
        }
        let slot = self.entries.partition_point(|e| e.score >= score);
        (slot < MAX_HIGH_SCORES).then_some(slot)
    }

    /// Record a finished run. Returns its 1-based rank, or `None` if it
    /// did not make the board.
    pub fn add_score(&mut self, score: u32, ticks: u64, session: u64) -> Option<usize> {
        let slot = self.slot(score)?;
        self.entries.insert(
            slot,
            HighScoreEntry {
                score,
                ticks,
                session,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(slot + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// The record to show the player (0 before any scoring run)
    pub fn record(&self) -> u32 {
        self.top_score().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_score_is_not_recorded() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(0, 100, 1), None);
        assert!(scores.is_empty());
        assert_eq!(scores.record(), 0);
    }

    #[test]
    fn test_sorted_descending() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(5, 10, 1), Some(1));
        assert_eq!(scores.add_score(12, 10, 2), Some(1));
        assert_eq!(scores.add_score(8, 10, 3), Some(2));
        // Tie goes behind the existing entry
        assert_eq!(scores.add_score(8, 10, 4), Some(3));

        let ordered: Vec<u32> = scores.entries.iter().map(|e| e.score).collect();
        assert_eq!(ordered, vec![12, 8, 8, 5]);
        assert_eq!(scores.record(), 12);
    }

    #[test]
    fn test_truncates_to_max() {
        let mut scores = HighScores::new();
        for s in 1..=(MAX_HIGH_SCORES as u32 + 5) {
            scores.add_score(s, 0, s as u64);
        }
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.top_score(), Some(MAX_HIGH_SCORES as u32 + 5));
        // Lowest kept entry is 6; 6 itself no longer makes the board
        assert_eq!(scores.add_score(6, 0, 99), None);
        // 7 squeezes into last place and pushes the old 6 out
        assert_eq!(scores.add_score(7, 0, 100), Some(MAX_HIGH_SCORES));
        assert_eq!(scores.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(scores.entries.last().map(|e| e.session), Some(100));
    }
}
