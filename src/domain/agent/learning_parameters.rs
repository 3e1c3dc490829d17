use crate::error::ConversionError;
use serde::Serialize;

/// Hyperparameters of the migration policy. Fixed once the agent exists.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LearningParameters {
    alpha: f64,
    gamma: f64,
    epsilon: f64,
}

impl LearningParameters {
    pub fn new(alpha: f64, gamma: f64, epsilon: f64) -> Result<Self, ConversionError> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(ConversionError::InvalidLearningParameter { name: "alpha", value: alpha, allowed: "(0, 1]" });
        }
        if !(0.0..=1.0).contains(&gamma) {
            return Err(ConversionError::InvalidLearningParameter { name: "gamma", value: gamma, allowed: "[0, 1]" });
        }
        if !(0.0..=1.0).contains(&epsilon) {
            return Err(ConversionError::InvalidLearningParameter { name: "epsilon", value: epsilon, allowed: "[0, 1]" });
        }

        Ok(Self { alpha, gamma, epsilon })
    }

    /// Learning rate, in `(0, 1]`.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Discount factor, in `[0, 1]`.
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Exploration probability, in `[0, 1]`.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

impl Default for LearningParameters {
    fn default() -> Self {
        Self { alpha: 0.1, gamma: 0.9, epsilon: 0.1 }
    }
}
