//! Self-play results storage and reporting

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::SelfPlayConfig;
use crate::elo::MatchResult;
use crate::error::StorageError;

/// Complete results of a self-play run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfPlayResults {
    /// Name/description of the run
    pub name: String,
    /// Configuration used
    pub config: SelfPlayConfig,
    /// One entry per configured team, in config order
    pub teams: Vec<TeamSummary>,
    /// Every learning-team change, in order
    pub swaps: Vec<SwapEvent>,
    /// Team learning when the run ended
    pub final_learner: String,
}

/// How a single team fared over the run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamSummary {
    pub name: String,
    pub rating: f64,
    /// Games played while learning
    pub record: MatchResult,
    pub learning_steps: u64,
    /// Times the team took over as learner
    pub activations: u32,
    pub last_swap_step: u64,
}

/// A learning-team change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapEvent {
    pub step: u64,
    pub from: String,
    pub to: String,
}

impl SelfPlayResults {
    pub fn team(&self, name: &str) -> Option<&TeamSummary> {
        self.teams.iter().find(|team| team.name == name)
    }

    /// Save results to JSON file
    pub fn save(&self, path: &Path) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load results from JSON file
    pub fn load(path: &Path) -> Result<Self, StorageError> {
        let contents = std::fs::read_to_string(path).map_err(|source| StorageError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Self-play: {} ===\n\n", self.name));
        report.push_str(&format!(
            "Config: {} steps, swap every {} steps, K={}, queue capacity {}\n",
            self.config.total_steps,
            self.config.swap_interval,
            self.config.k_factor,
            self.config.queue_capacity
        ));
        report.push_str(&format!(
            "Swaps: {}, final learner: {}\n\n",
            self.swaps.len(),
            self.final_learner
        ));

        report.push_str(&format!(
            "{:<20} {:>8} {:>6} {:>8} {:>5}-{:<5}-{:<5}\n",
            "Team", "Elo", "Turns", "Steps", "W", "L", "D"
        ));
        report.push_str(&"-".repeat(66));
        report.push('\n');

        for team in &self.teams {
            report.push_str(&format!(
                "{:<20} {:>8.1} {:>6} {:>8} {:>5}-{:<5}-{:<5}\n",
                team.name,
                team.rating,
                team.activations,
                team.learning_steps,
                team.record.wins,
                team.record.losses,
                team.record.draws
            ));
        }

        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}
