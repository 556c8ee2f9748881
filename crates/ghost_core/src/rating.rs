//! Logistic (Elo) rating math

/// Starting rating of a freshly registered team
pub const DEFAULT_INITIAL_RATING: f64 = 1200.0;

/// Scale applied by callers to a raw rating delta
pub const DEFAULT_K_FACTOR: f64 = 16.0;

/// Expected score of a player rated `rating` against one rated `opponent`.
///
/// Equal to `r1 / (r1 + r2)` with `r = 10^(rating / 400)`, evaluated on
/// the rating difference so large ratings saturate at 0 or 1 instead of
/// overflowing. Equal ratings give exactly 0.5.
pub fn expected_score(rating: f64, opponent: f64) -> f64 {
    1.0 / (1.0 + 10.0_f64.powf((opponent - rating) / 400.0))
}

/// Unscaled rating change: actual outcome minus expected score.
///
/// `outcome` is 1.0 for a win, 0.0 for a loss and 0.5 for a draw; weighted
/// outcomes in between are accepted as-is.
pub fn rating_delta(rating: f64, opponent: f64, outcome: f64) -> f64 {
    outcome - expected_score(rating, opponent)
}

#[cfg(test)]
#[path = "rating_tests.rs"]
mod rating_tests;
