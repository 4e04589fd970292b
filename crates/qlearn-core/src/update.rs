//! Quality update rules

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::{DiscountFactor, LearningRate, Quality, Reward};

/// Computes the next quality of a state-action pair.
///
/// Implementations are pure: the result depends only on the arguments.
pub trait UpdateStrategy: Debug + Send + Sync {
    /// New quality for a pair whose quality was `old`, after observing `reward`
    /// and a best successor quality of `best_future`.
    ///
    /// Fails when the arithmetic leaves the finite range.
    fn next(
        &self,
        old: Quality,
        learning_rate: LearningRate,
        reward: Reward,
        discount_factor: DiscountFactor,
        best_future: Quality,
    ) -> crate::Result<Quality>;
}

/// Bellman backward induction:
/// `Q ← Q + α (r + γ · max Q' − Q)`
#[derive(Debug, Clone, Copy, Default)]
pub struct BellmanUpdate;

impl UpdateStrategy for BellmanUpdate {
    fn next(
        &self,
        old: Quality,
        learning_rate: LearningRate,
        reward: Reward,
        discount_factor: DiscountFactor,
        best_future: Quality,
    ) -> crate::Result<Quality> {
        let old = old.value();
        let target = reward.value() + discount_factor.value() * best_future.value();
        Quality::new(old + learning_rate.value() * (target - old))
    }
}

/// Leaves every quality unchanged; used for evaluation runs without learning
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityUpdate;

impl UpdateStrategy for IdentityUpdate {
    fn next(
        &self,
        old: Quality,
        _learning_rate: LearningRate,
        _reward: Reward,
        _discount_factor: DiscountFactor,
        _best_future: Quality,
    ) -> crate::Result<Quality> {
        Ok(old)
    }
}

/// Update rule selectable from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateRule {
    /// [`BellmanUpdate`]
    #[default]
    Bellman,
    /// [`IdentityUpdate`]
    Identity,
}

impl UpdateRule {
    /// Strategy implementing this rule
    #[must_use]
    pub fn strategy(self) -> Box<dyn UpdateStrategy> {
        match self {
            Self::Bellman => Box::new(BellmanUpdate),
            Self::Identity => Box::new(IdentityUpdate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn q(value: f64) -> Quality {
        Quality::new(value).unwrap()
    }

    fn lr(value: f64) -> LearningRate {
        LearningRate::new(value).unwrap()
    }

    fn gamma(value: f64) -> DiscountFactor {
        DiscountFactor::new(value).unwrap()
    }

    #[test]
    fn test_bellman_exact_arithmetic() {
        let next = BellmanUpdate
            .next(q(1.0), lr(1.0), Reward(1.0), gamma(1.0), q(1.0))
            .unwrap();
        assert_eq!(next, q(2.0));
    }

    #[test]
    fn test_bellman_partial_learning_rate() {
        // 0.0 + 0.5 * (0.0 + 0.99 * 2.0 - 0.0)
        let next = BellmanUpdate
            .next(q(0.0), lr(0.5), Reward(0.0), gamma(0.99), q(2.0))
            .unwrap();
        assert_relative_eq!(next.value(), 0.99, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_learning_rate_keeps_old_value() {
        let next = BellmanUpdate
            .next(q(-3.5), lr(0.0), Reward(10.0), gamma(0.9), q(8.0))
            .unwrap();
        assert_eq!(next, q(-3.5));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let result = BellmanUpdate.next(q(0.0), lr(1.0), Reward(0.0), gamma(4.0), Quality::MAX);
        assert!(result.is_err());
    }

    #[test]
    fn test_identity_ignores_inputs() {
        let next = IdentityUpdate
            .next(q(7.0), lr(1.0), Reward(-100.0), gamma(1.0), q(50.0))
            .unwrap();
        assert_eq!(next, q(7.0));
    }

    #[test]
    fn test_rule_selects_strategy() {
        let identity = UpdateRule::Identity.strategy();
        let bellman = UpdateRule::default().strategy();
        let args = (q(1.0), lr(1.0), Reward(1.0), gamma(1.0), q(1.0));
        assert_eq!(identity.next(args.0, args.1, args.2, args.3, args.4).unwrap(), q(1.0));
        assert_eq!(bellman.next(args.0, args.1, args.2, args.3, args.4).unwrap(), q(2.0));
    }
}
