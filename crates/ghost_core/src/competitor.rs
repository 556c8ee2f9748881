//! Registered team handles

use serde::{Deserialize, Serialize};

use crate::rating::DEFAULT_INITIAL_RATING;

/// Anything the scheduler can register as a team.
///
/// The scheduler only ever reads the starting rating; it uses it as the
/// shared baseline when scoring the learning team's matches.
pub trait Competitor {
    /// Rating the team started the run with
    fn initial_rating(&self) -> f64;
}

/// Plain handle for a registered team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamHandle {
    pub name: String,
    pub initial_rating: f64,
}

impl TeamHandle {
    pub fn new(name: &str, initial_rating: f64) -> Self {
        Self {
            name: name.to_string(),
            initial_rating,
        }
    }

    /// Handle starting at [`DEFAULT_INITIAL_RATING`]
    pub fn with_default_rating(name: &str) -> Self {
        Self::new(name, DEFAULT_INITIAL_RATING)
    }
}

impl Competitor for TeamHandle {
    fn initial_rating(&self) -> f64 {
        self.initial_rating
    }
}

impl<C: Competitor + ?Sized> Competitor for &C {
    fn initial_rating(&self) -> f64 {
        (**self).initial_rating()
    }
}

impl<C: Competitor + ?Sized> Competitor for Box<C> {
    fn initial_rating(&self) -> f64 {
        (**self).initial_rating()
    }
}
