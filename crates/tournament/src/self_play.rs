//! Self-play runner: one learning team against frozen ghosts

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use tracing::{debug, info, warn};

use ghost_core::{expected_score, SchedulerError, TeamHandle, TeamRotationScheduler};

use crate::config::{SelfPlayConfig, TeamSpec};
use crate::elo::{EloTracker, GameResult};
use crate::error::ConfigError;
use crate::results::{SelfPlayResults, SwapEvent, TeamSummary};

/// Plays one game between the learning team and a ghost opponent
pub trait MatchPlayer {
    /// Returns the result from the learner's perspective
    fn play(&mut self, learner: &TeamSpec, opponent: &TeamSpec) -> GameResult;
}

/// Draws game outcomes from the teams' hidden strengths
#[derive(Debug, Clone)]
pub struct SimulatedMatch {
    rng: StdRng,
    draw_probability: f64,
}

impl SimulatedMatch {
    pub fn new(seed: u64, draw_probability: f64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            draw_probability,
        }
    }
}

impl MatchPlayer for SimulatedMatch {
    fn play(&mut self, learner: &TeamSpec, opponent: &TeamSpec) -> GameResult {
        if self.rng.gen::<f64>() < self.draw_probability {
            return GameResult::Draw;
        }
        let win_chance = expected_score(learner.strength, opponent.strength);
        if self.rng.gen_bool(win_chance) {
            GameResult::Win
        } else {
            GameResult::Loss
        }
    }
}

/// Per-team training state, reset whenever the team becomes the learner
#[derive(Debug, Clone, Default)]
struct LearnerContext {
    /// Learner steps since this team last took over
    steps_since_swap: u64,
    /// Step at which this team last took over
    last_swap_step: u64,
    learning_steps: u64,
    activations: u32,
}

impl LearnerContext {
    fn reset(&mut self, step: u64) {
        self.steps_since_swap = 0;
        self.last_swap_step = step;
        self.activations += 1;
    }
}

/// Runs a ghost self-play session
pub struct SelfPlayRunner<P = SimulatedMatch> {
    config: SelfPlayConfig,
    scheduler: TeamRotationScheduler<String, TeamHandle>,
    tracker: EloTracker,
    player: P,
    /// Opponent sampling, separate from match outcomes
    rng: StdRng,
    teams: HashMap<String, TeamSpec>,
    contexts: HashMap<String, LearnerContext>,
}

impl SelfPlayRunner<SimulatedMatch> {
    pub fn new(config: SelfPlayConfig) -> Result<Self, ConfigError> {
        let player = SimulatedMatch::new(config.seed, config.draw_probability);
        Self::with_player(config, player)
    }
}

impl<P: MatchPlayer> SelfPlayRunner<P> {
    /// Create a runner with a custom match player and register every team
    pub fn with_player(config: SelfPlayConfig, player: P) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut scheduler = TeamRotationScheduler::new(config.queue_capacity);
        let mut tracker = EloTracker::new(config.initial_rating);
        let mut teams = HashMap::new();
        let mut contexts = HashMap::new();
        for team in &config.teams {
            scheduler.register(
                team.name.clone(),
                TeamHandle::new(&team.name, config.initial_rating),
            );
            tracker.add_team(&team.name);
            teams.insert(team.name.clone(), team.clone());
            contexts.insert(team.name.clone(), LearnerContext::default());
        }
        if scheduler.queue_len() + 1 < config.teams.len() {
            warn!(
                teams = config.teams.len(),
                capacity = config.queue_capacity,
                "more teams than the rotation queue holds, oldest were evicted"
            );
        }

        // The first learner takes over without a swap signal
        if let Some(first) = scheduler.current_active() {
            if let Some(context) = contexts.get_mut(first) {
                context.reset(0);
            }
        }

        Ok(Self {
            rng: StdRng::seed_from_u64(config.seed.wrapping_add(1)),
            config,
            scheduler,
            tracker,
            player,
            teams,
            contexts,
        })
    }

    /// Continue from ratings of earlier runs instead of the initial rating
    pub fn with_tracker(mut self, mut tracker: EloTracker) -> Self {
        for team in &self.config.teams {
            tracker.add_team(&team.name);
        }
        self.tracker = tracker;
        self
    }

    pub fn scheduler(&self) -> &TeamRotationScheduler<String, TeamHandle> {
        &self.scheduler
    }

    pub fn tracker(&self) -> &EloTracker {
        &self.tracker
    }

    pub fn config(&self) -> &SelfPlayConfig {
        &self.config
    }

    /// Run `total_steps` training steps
    pub fn run(&mut self) -> Result<SelfPlayResults, SchedulerError> {
        info!(
            name = %self.config.name,
            teams = self.config.teams.len(),
            steps = self.config.total_steps,
            swap_interval = self.config.swap_interval,
            "starting self-play"
        );

        let mut swaps = Vec::new();
        for step in 0..self.config.total_steps {
            self.step(step, &mut swaps)?;
        }

        let results = self.summarize(swaps);
        info!(
            swaps = results.swaps.len(),
            learner = %results.final_learner,
            "self-play finished"
        );
        Ok(results)
    }

    fn step(&mut self, step: u64, swaps: &mut Vec<SwapEvent>) -> Result<(), SchedulerError> {
        // Poll once per step so no swap goes unnoticed
        if self.scheduler.poll_and_clear_change() {
            if let Some(learner) = self.scheduler.current_active() {
                debug!(team = %learner, step, "resetting learner context");
                if let Some(context) = self.contexts.get_mut(learner) {
                    context.reset(step);
                }
            }
        }

        let Some(learner) = self.scheduler.current_active().cloned() else {
            return Ok(());
        };
        let opponent = self.pick_opponent(&learner);

        let result = self
            .player
            .play(&self.teams[&learner], &self.teams[&opponent]);
        let rating = self.tracker.rating(&learner);
        let delta = self.scheduler.compute_rating_delta(rating, result.score())?;
        self.tracker
            .record_game(step, &learner, &opponent, result, self.config.k_factor * delta);

        let context = self.contexts.entry(learner.clone()).or_default();
        context.learning_steps += 1;
        context.steps_since_swap += 1;
        if context.steps_since_swap < self.config.swap_interval {
            return Ok(());
        }

        match self.scheduler.rotate(step) {
            Ok(()) => {
                let to = self
                    .scheduler
                    .current_active()
                    .cloned()
                    .unwrap_or_default();
                swaps.push(SwapEvent {
                    step,
                    from: learner,
                    to,
                });
            }
            Err(e) => {
                warn!(error = %e, team = %learner, "skipping rotation");
                context.steps_since_swap = 0;
            }
        }
        Ok(())
    }

    /// Random ghost among the other teams; a lone team plays its own ghost
    fn pick_opponent(&mut self, learner: &str) -> String {
        let others: Vec<&TeamSpec> = self
            .config
            .teams
            .iter()
            .filter(|team| team.name != learner)
            .collect();
        others
            .choose(&mut self.rng)
            .map(|team| team.name.clone())
            .unwrap_or_else(|| learner.to_string())
    }

    fn summarize(&self, swaps: Vec<SwapEvent>) -> SelfPlayResults {
        let teams = self
            .config
            .teams
            .iter()
            .map(|team| {
                let context = self.contexts.get(&team.name).cloned().unwrap_or_default();
                TeamSummary {
                    name: team.name.clone(),
                    rating: self.tracker.rating(&team.name),
                    record: self.tracker.record(&team.name),
                    learning_steps: context.learning_steps,
                    activations: context.activations,
                    last_swap_step: context.last_swap_step,
                }
            })
            .collect();

        SelfPlayResults {
            name: self.config.name.clone(),
            config: self.config.clone(),
            teams,
            swaps,
            final_learner: self
                .scheduler
                .current_active()
                .cloned()
                .unwrap_or_default(),
        }
    }
}

/// Quick utility to run a session with default settings for the given teams
pub fn quick_self_play(
    teams: Vec<TeamSpec>,
    total_steps: u64,
    swap_interval: u64,
) -> Result<SelfPlayResults, anyhow::Error> {
    let config = SelfPlayConfig {
        teams,
        total_steps,
        swap_interval,
        ..Default::default()
    };
    let mut runner = SelfPlayRunner::new(config)?;
    Ok(runner.run()?)
}

#[cfg(test)]
#[path = "self_play_tests.rs"]
mod self_play_tests;
