//! Ghost self-play team rotation
//!
//! In ghost self-play exactly one team learns at a time while every other
//! team plays with a frozen snapshot. This crate provides:
//! - [`TeamRotationScheduler`]: which team is learning, and when it swaps
//! - [`Competitor`]: the contract a registered team handle must satisfy
//! - Logistic rating math used to score the learning team's matches
//!
//! # Usage
//!
//! ```
//! use ghost_core::{TeamHandle, TeamRotationScheduler};
//!
//! let mut scheduler = TeamRotationScheduler::new(10);
//! scheduler.register("blue", TeamHandle::new("blue", 1200.0));
//! scheduler.register("purple", TeamHandle::new("purple", 1200.0));
//! assert_eq!(scheduler.current_active(), Some(&"blue"));
//!
//! scheduler.rotate(1000).unwrap();
//! assert!(scheduler.poll_and_clear_change());
//! assert_eq!(scheduler.current_active(), Some(&"purple"));
//!
//! let delta = scheduler.compute_rating_delta(1200.0, 1.0).unwrap();
//! assert_eq!(delta, 0.5);
//! ```

mod competitor;
mod error;
pub mod rating;
mod scheduler;

pub use competitor::*;
pub use error::*;
pub use rating::{expected_score, rating_delta, DEFAULT_INITIAL_RATING, DEFAULT_K_FACTOR};
pub use scheduler::*;
