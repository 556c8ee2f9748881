//! Self-play run configuration

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use ghost_core::{DEFAULT_INITIAL_RATING, DEFAULT_K_FACTOR, DEFAULT_QUEUE_CAPACITY};

use crate::error::ConfigError;

/// A team taking part in self-play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSpec {
    pub name: String,
    /// Hidden playing strength on the rating scale, used by simulated matches
    pub strength: f64,
}

impl TeamSpec {
    pub fn new(name: &str, strength: f64) -> Self {
        Self {
            name: name.to_string(),
            strength,
        }
    }
}

/// Configuration for a self-play run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfPlayConfig {
    /// Name/description of the run
    pub name: String,
    /// Teams allowed to wait in the rotation queue
    pub queue_capacity: usize,
    /// Learner steps between learning-team changes
    pub swap_interval: u64,
    /// Total training steps to run
    pub total_steps: u64,
    /// Scale applied to each rating delta
    pub k_factor: f64,
    /// Rating every team starts from
    pub initial_rating: f64,
    /// Chance a simulated game ends in a draw
    pub draw_probability: f64,
    /// Seed for match outcomes and opponent sampling
    pub seed: u64,
    pub teams: Vec<TeamSpec>,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            name: "ghost self-play".to_string(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            swap_interval: 50,
            total_steps: 1000,
            k_factor: DEFAULT_K_FACTOR,
            initial_rating: DEFAULT_INITIAL_RATING,
            draw_probability: 0.1,
            seed: 42,
            teams: vec![
                TeamSpec::new("blue", 1300.0),
                TeamSpec::new("purple", 1100.0),
            ],
        }
    }
}

impl SelfPlayConfig {
    /// Load and validate a config from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Save config to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = self.to_toml_string()?;
        std::fs::write(path, contents).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject configs the runner cannot execute
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.teams.is_empty() {
            return Err(ConfigError::Invalid("at least one team is required".into()));
        }
        if self.queue_capacity == 0 {
            return Err(ConfigError::Invalid("queue_capacity must be positive".into()));
        }
        if self.swap_interval == 0 {
            return Err(ConfigError::Invalid("swap_interval must be positive".into()));
        }
        if !(0.0..1.0).contains(&self.draw_probability) {
            return Err(ConfigError::Invalid(format!(
                "draw_probability {} must be in [0, 1)",
                self.draw_probability
            )));
        }
        if !self.k_factor.is_finite() || !self.initial_rating.is_finite() {
            return Err(ConfigError::Invalid(
                "k_factor and initial_rating must be finite".into(),
            ));
        }

        let mut seen = HashSet::new();
        for team in &self.teams {
            if !team.strength.is_finite() {
                return Err(ConfigError::Invalid(format!(
                    "team {:?} has non-finite strength",
                    team.name
                )));
            }
            if !seen.insert(team.name.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "team {:?} listed twice",
                    team.name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
