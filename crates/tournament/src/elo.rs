//! Elo rating tracking for self-play teams

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::path::Path;

use ghost_core::DEFAULT_INITIAL_RATING;

use crate::error::StorageError;

/// Number of match records kept for analysis
pub const MAX_HISTORY: usize = 1000;

/// Elo ratings of every team seen in self-play
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EloTracker {
    /// Rating new teams start from
    pub initial_rating: f64,
    /// Current rating of each team
    pub ratings: HashMap<String, f64>,
    /// Win/loss/draw tally of each team while learning
    pub records: HashMap<String, MatchResult>,
    /// Most recent matches, oldest first
    pub history: VecDeque<MatchRecord>,
}

/// Record of a single learner-vs-ghost game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    pub step: u64,
    pub learner: String,
    pub opponent: String,
    pub result: GameResult,
    pub rating_change: f64,
    pub rating_after: f64,
}

/// Result of a single game, from the learning team's perspective
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl GameResult {
    /// Outcome on the rating scale: 1 for a win, 0.5 for a draw, 0 for a loss
    pub fn score(self) -> f64 {
        match self {
            GameResult::Win => 1.0,
            GameResult::Draw => 0.5,
            GameResult::Loss => 0.0,
        }
    }

    /// Same game seen from the other side
    pub fn flipped(self) -> Self {
        match self {
            GameResult::Win => GameResult::Loss,
            GameResult::Loss => GameResult::Win,
            GameResult::Draw => GameResult::Draw,
        }
    }
}

/// Tally of several games
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, result: GameResult) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Average score (1 for win, 0.5 for draw, 0 for loss)
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }
}

impl Default for EloTracker {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_RATING)
    }
}

impl EloTracker {
    pub fn new(initial_rating: f64) -> Self {
        Self {
            initial_rating,
            ratings: HashMap::new(),
            records: HashMap::new(),
            history: VecDeque::new(),
        }
    }

    /// Load tracker from a JSON file
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let contents = std::fs::read_to_string(path).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Like [`EloTracker::load`], but a missing file is `Ok(None)`.
    ///
    /// Unreadable or corrupt files are still errors.
    pub fn load_if_exists(path: &Path) -> Result<Option<Self>, StorageError> {
        match Self::load(path) {
            Ok(tracker) => Ok(Some(tracker)),
            Err(StorageError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Save tracker to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Start tracking a team at the initial rating. Known teams keep theirs.
    pub fn add_team(&mut self, team: &str) {
        self.ratings
            .entry(team.to_string())
            .or_insert(self.initial_rating);
    }

    /// Current rating, or the initial rating for an unknown team
    pub fn rating(&self, team: &str) -> f64 {
        self.ratings
            .get(team)
            .copied()
            .unwrap_or(self.initial_rating)
    }

    pub fn record(&self, team: &str) -> MatchResult {
        self.records.get(team).cloned().unwrap_or_default()
    }

    /// Apply an already scaled rating change to the learning team.
    ///
    /// Ghost opponents are frozen snapshots, so only the learner moves.
    pub fn record_game(
        &mut self,
        step: u64,
        learner: &str,
        opponent: &str,
        result: GameResult,
        rating_change: f64,
    ) -> f64 {
        let rating_after = self.rating(learner) + rating_change;
        self.ratings.insert(learner.to_string(), rating_after);
        self.records
            .entry(learner.to_string())
            .or_default()
            .add(result);

        if self.history.len() >= MAX_HISTORY {
            self.history.pop_front();
        }
        self.history.push_back(MatchRecord {
            step,
            learner: learner.to_string(),
            opponent: opponent.to_string(),
            result,
            rating_change,
            rating_after,
        });
        rating_after
    }

    /// Get a sorted leaderboard
    pub fn leaderboard(&self) -> Vec<(String, f64, u32)> {
        let mut entries: Vec<_> = self
            .ratings
            .iter()
            .map(|(name, &rating)| {
                let games = self
                    .records
                    .get(name)
                    .map(MatchResult::total_games)
                    .unwrap_or(0);
                (name.clone(), rating, games)
            })
            .collect();
        entries.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        entries
    }

    /// Print leaderboard to stdout
    pub fn print_leaderboard(&self) {
        println!("\n=== Team Leaderboard ===");
        println!("{:<30} {:>8} {:>8}", "Team", "Elo", "Games");
        println!("{}", "-".repeat(50));
        for (name, rating, games) in self.leaderboard() {
            println!("{:<30} {:>8.1} {:>8}", name, rating, games);
        }
        println!();
    }
}

#[cfg(test)]
#[path = "elo_tests.rs"]
mod elo_tests;
