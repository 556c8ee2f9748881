//! Learning-team rotation for ghost self-play

use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;

use tracing::debug;

use crate::competitor::{Competitor, TeamHandle};
use crate::error::SchedulerError;
use crate::rating::rating_delta;

/// Default number of teams that can wait in the rotation queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 10;

/// Decides which single team is learning and rotates that role on demand.
///
/// Teams wait in a bounded FIFO queue. On every rotation the learning team
/// moves to the back and the team that waited longest takes over, so over
/// time every registered team gets the same number of turns.
///
/// The scheduler has no internal locking. Trainers sharing one instance
/// across threads must serialise access themselves, e.g. behind a `Mutex`.
#[derive(Debug, Clone)]
pub struct TeamRotationScheduler<T, H = TeamHandle> {
    /// Handles for every team ever registered
    registry: HashMap<T, H>,
    /// First registered team, source of the baseline rating
    baseline_team: Option<T>,
    /// Teams waiting for their turn, oldest first
    queue: VecDeque<T>,
    capacity: usize,
    /// Team currently learning
    active: Option<T>,
    /// Set on swap, cleared by `poll_and_clear_change`
    changed: bool,
}

impl<T, H> Default for TeamRotationScheduler<T, H>
where
    T: Eq + Hash + Clone + Debug,
    H: Competitor,
{
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}

impl<T, H> TeamRotationScheduler<T, H>
where
    T: Eq + Hash + Clone + Debug,
    H: Competitor,
{
    /// Create a scheduler whose rotation queue holds at most `capacity` teams.
    pub fn new(capacity: usize) -> Self {
        Self {
            registry: HashMap::new(),
            baseline_team: None,
            queue: VecDeque::with_capacity(capacity.min(DEFAULT_QUEUE_CAPACITY)),
            capacity,
            active: None,
            changed: false,
        }
    }

    /// Register a team. Registering an id twice is a no-op.
    ///
    /// The first team registered becomes the learning team; later ones join
    /// the back of the rotation queue. When the queue is full the team that
    /// waited longest is dropped from rotation. It stays registered.
    pub fn register(&mut self, team: T, handle: H) {
        if self.registry.contains_key(&team) {
            return;
        }
        self.registry.insert(team.clone(), handle);
        if self.baseline_team.is_none() {
            self.baseline_team = Some(team.clone());
        }

        if self.active.is_none() {
            debug!(team = ?team, "first registered team is learning");
            self.active = Some(team);
            return;
        }

        if self.queue.len() >= self.capacity {
            if let Some(evicted) = self.queue.pop_front() {
                debug!(team = ?evicted, capacity = self.capacity, "rotation queue full, evicting");
            } else {
                debug!(team = ?team, "rotation queue has zero capacity, team never rotates in");
                return;
            }
        }
        self.queue.push_back(team);
    }

    /// The learning team, or `None` before the first registration.
    pub fn current_active(&self) -> Option<&T> {
        self.active.as_ref()
    }

    /// Whether the learning team changed since the last poll.
    ///
    /// The flag is cleared on every call, so a swap is reported exactly
    /// once. A driver that skips a poll loses that notification; poll once
    /// per training step.
    pub fn poll_and_clear_change(&mut self) -> bool {
        std::mem::take(&mut self.changed)
    }

    /// Hand the learning role to the team that waited longest.
    ///
    /// The outgoing team joins the back of the queue. `step` is only used
    /// for logging.
    pub fn rotate(&mut self, step: u64) -> Result<(), SchedulerError> {
        let next = self
            .queue
            .pop_front()
            .ok_or(SchedulerError::EmptyRotation { step })?;

        // Head is popped first, so re-queueing the outgoing team never evicts
        if let Some(outgoing) = self.active.replace(next) {
            self.queue.push_back(outgoing);
        }
        self.changed = true;
        debug!(team = ?self.active, step, "learning team swapped");
        Ok(())
    }

    /// Rating change of the learning team for one match outcome.
    ///
    /// The opponent is assumed to sit at the shared baseline: the initial
    /// rating of the first registered team. True opponent ratings are not
    /// tracked. The result is unscaled; multiply by a K-factor to apply it.
    pub fn compute_rating_delta(&self, rating: f64, outcome: f64) -> Result<f64, SchedulerError> {
        if !(0.0..=1.0).contains(&outcome) {
            return Err(SchedulerError::OutcomeOutOfRange(outcome));
        }
        let base = self
            .baseline_rating()
            .ok_or(SchedulerError::NoBaselineAvailable)?;
        Ok(rating_delta(rating, base, outcome))
    }

    /// Initial rating of the first registered team
    pub fn baseline_rating(&self) -> Option<f64> {
        self.baseline_team
            .as_ref()
            .and_then(|team| self.registry.get(team))
            .map(|handle| handle.initial_rating())
    }

    /// Teams waiting in rotation, next up first
    pub fn queued(&self) -> impl Iterator<Item = &T> {
        self.queue.iter()
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn registered_count(&self) -> usize {
        self.registry.len()
    }

    pub fn is_registered(&self, team: &T) -> bool {
        self.registry.contains_key(team)
    }

    pub fn handle(&self, team: &T) -> Option<&H> {
        self.registry.get(team)
    }

    /// Every registered team, in no particular order
    pub fn teams(&self) -> impl Iterator<Item = &T> {
        self.registry.keys()
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod scheduler_tests;
