//! Search configuration parameters.

use crate::error::SearchError;
use serde::{Deserialize, Serialize};

/// Default number of select/expand/rollout/backpropagate cycles per search.
pub const DEFAULT_ITERATIONS: u32 = 1000;

/// Configuration for one `SearchEngine`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of iterations run per `search` call.
    pub iterations: u32,

    /// Exploration constant `C` of the UCT formula.
    /// Higher values favour rarely visited children; `0.0` is pure exploitation.
    pub exploration_constant: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            exploration_constant: std::f64::consts::SQRT_2,
        }
    }
}

impl SearchConfig {
    /// Builder pattern: set the iteration budget.
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Builder pattern: set the exploration constant.
    pub fn with_exploration_constant(mut self, c: f64) -> Self {
        self.exploration_constant = c;
        self
    }

    /// Checks that the configuration can drive a search.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.iterations == 0 {
            return Err(SearchError::InvalidConfiguration {
                message: "iterations must be at least 1".to_string(),
            });
        }
        if !self.exploration_constant.is_finite() || self.exploration_constant < 0.0 {
            return Err(SearchError::InvalidConfiguration {
                message: format!(
                    "exploration constant must be finite and non-negative, got {}",
                    self.exploration_constant
                ),
            });
        }
        Ok(())
    }
}
