//! Ghost self-play runner
//!
//! This crate drives a [`ghost_core::TeamRotationScheduler`] the way a
//! trainer controller does:
//! - Playing the learning team against frozen ghosts of the other teams
//! - Rotating the learning team every `swap_interval` learner steps
//! - Tracking Elo ratings with K-factor scaled deltas
//! - Generating reports of the run
//!
//! # Usage
//!
//! ```bash
//! # Write a starter config, then run it
//! cargo run -p tournament -- init-config selfplay.toml
//! cargo run -p tournament -- run --config selfplay.toml --steps 5000
//!
//! # Show ratings accumulated across runs
//! cargo run -p tournament -- leaderboard
//! ```

mod config;
mod elo;
mod error;
mod results;
mod self_play;

pub use config::*;
pub use elo::*;
pub use error::*;
pub use results::*;
pub use self_play::*;
