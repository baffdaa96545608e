//! Configuration types for engine creation.

use serde::{Deserialize, Serialize};

use crate::tictactoe::Variant;

/// How playout simulations pick their moves.
///
/// `Guided` matches the reference behavior: under standard rules a simulation
/// plays a winning-or-blocking completion when one exists, under misère rules
/// it avoids completing a line for the mover. `Uniform` is the pure-random
/// alternative; it converges more slowly for a given trial budget, so trial
/// counts are not comparable across policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayoutPolicy {
    #[default]
    Guided,
    Uniform,
}

/// Configuration for creating a move-selection engine.
///
/// # Examples
///
/// ```
/// use oxo::app::SearchConfig;
/// use oxo::tictactoe::Variant;
///
/// let config = SearchConfig::new()
///     .with_variant(Variant::Misere)
///     .with_trials(10_000)
///     .with_seed(42);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Rule variant both engines score positions under
    pub variant: Variant,
    /// MCTS trial budget per decision
    pub trials: usize,
    /// MCTS exploration constant
    pub exploration: f64,
    /// Playout move policy
    pub playout: PlayoutPolicy,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl SearchConfig {
    /// Create a configuration with the reference defaults: standard rules,
    /// 100,000 trials, exploration constant 2.0, guided playouts, no seed.
    pub fn new() -> Self {
        Self {
            variant: Variant::Standard,
            trials: 100_000,
            exploration: 2.0,
            playout: PlayoutPolicy::default(),
            seed: None,
        }
    }

    /// Set the rule variant.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the MCTS trial budget.
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Set the MCTS exploration constant.
    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.exploration = exploration;
        self
    }

    /// Set the playout policy.
    pub fn with_playout(mut self, playout: PlayoutPolicy) -> Self {
        self.playout = playout;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new()
    }
}
