//! Validated scalar factors for the learning loop
//!
//! Every factor is checked when it is constructed, including when it is
//! deserialized, so an out-of-range value never reaches the agent.

use serde::{Deserialize, Serialize};

use crate::RLError;

/// Weight given to newly observed information, in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct LearningRate(f64);

impl LearningRate {
    /// Create a new learning rate
    pub fn new(value: f64) -> crate::Result<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RLError::InvalidFactor {
                name: "learning rate",
                value,
                range: "[0, 1]",
            })
        }
    }

    /// Get the factor value
    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Weight given to estimated future reward, in `[0, ∞)`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DiscountFactor(f64);

impl DiscountFactor {
    /// Create a new discount factor
    pub fn new(value: f64) -> crate::Result<Self> {
        if value >= 0.0 && value.is_finite() {
            Ok(Self(value))
        } else {
            Err(RLError::InvalidFactor {
                name: "discount factor",
                value,
                range: "[0, inf)",
            })
        }
    }

    /// Get the factor value
    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }
}

/// Probability of picking a random action instead of the greedy one, in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ExplorationFactor(f64);

impl ExplorationFactor {
    /// Never explore
    pub const GREEDY: Self = Self(0.0);

    /// Create a new exploration factor
    pub fn new(value: f64) -> crate::Result<Self> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(RLError::InvalidFactor {
                name: "exploration factor",
                value,
                range: "[0, 1]",
            })
        }
    }

    /// Get the factor value
    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Decide whether a uniform sample in `[0, 1)` calls for exploration.
    ///
    /// A factor of 0 never explores and a factor of 1 always does.
    #[must_use]
    pub fn should_explore(&self, sample: f64) -> bool {
        if self.0 <= 0.0 {
            false
        } else if self.0 >= 1.0 {
            true
        } else {
            sample < self.0
        }
    }
}

macro_rules! impl_factor_conversions {
    ($($factor:ty),*) => {
        $(
            impl TryFrom<f64> for $factor {
                type Error = RLError;

                fn try_from(value: f64) -> crate::Result<Self> {
                    Self::new(value)
                }
            }

            impl From<$factor> for f64 {
                fn from(factor: $factor) -> Self {
                    factor.0
                }
            }
        )*
    };
}

impl_factor_conversions!(LearningRate, DiscountFactor, ExplorationFactor);

impl Default for LearningRate {
    fn default() -> Self {
        Self(0.1)
    }
}

impl Default for DiscountFactor {
    fn default() -> Self {
        Self(0.9)
    }
}

impl Default for ExplorationFactor {
    fn default() -> Self {
        Self(0.1)
    }
}
