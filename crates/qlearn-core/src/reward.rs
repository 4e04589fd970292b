//! Rewards attached to observed states

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Immediate desirability of arriving in a state.
///
/// Rewards are not range-checked. A non-finite reward shows up as an invalid
/// quality on the update that consumes it.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Reward(pub f64);

impl Reward {
    /// No reward
    pub const ZERO: Self = Self(0.0);

    /// Get the reward value
    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Add for Reward {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl AddAssign for Reward {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for Reward {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Reward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episode_return_accumulates() {
        let mut total = Reward::ZERO;
        for reward in [Reward(-1.0), Reward(-1.0), Reward(10.0)] {
            total += reward;
        }
        assert_eq!(total, Reward(8.0));
        assert_eq!([Reward(-1.0), Reward(10.0)].into_iter().sum::<Reward>(), Reward(9.0));
    }

    #[test]
    fn test_serializes_as_plain_number() {
        assert_eq!(serde_json::to_string(&Reward(2.5)).unwrap(), "2.5");
        assert_eq!(Reward(-1.0).to_string(), "-1");
        assert_eq!(Reward(10.0).to_string(), "+10");
    }
}
