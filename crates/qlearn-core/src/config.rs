//! Agent configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{DiscountFactor, DispatchMode, ExplorationFactor, LearningRate, Quality, UpdateRule};

/// Immutable configuration of a Q-learning agent.
///
/// Every field is validated by its own type, so a deserialized configuration
/// is valid as soon as it loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentConfig {
    /// Learning rate α
    pub learning_rate: LearningRate,
    /// Discount factor γ
    pub discount_factor: DiscountFactor,
    /// Exploration rate ε
    pub exploration_factor: ExplorationFactor,
    /// Quality of never-stored state-action pairs
    pub default_quality: Quality,
    /// How the quality of the previous step is updated
    pub update_rule: UpdateRule,
    /// How chosen actions are executed
    pub dispatch: DispatchMode,
    /// Seed for exploration; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            learning_rate: LearningRate::default(),
            discount_factor: DiscountFactor::default(),
            exploration_factor: ExplorationFactor::default(),
            default_quality: Quality::ZERO,
            update_rule: UpdateRule::Bellman,
            dispatch: DispatchMode::Direct,
            seed: None,
        }
    }
}

impl AgentConfig {
    /// Create a configuration from raw factor values
    pub fn new(learning_rate: f64, discount_factor: f64, exploration_factor: f64) -> crate::Result<Self> {
        Ok(Self {
            learning_rate: LearningRate::new(learning_rate)?,
            discount_factor: DiscountFactor::new(discount_factor)?,
            exploration_factor: ExplorationFactor::new(exploration_factor)?,
            ..Self::default()
        })
    }

    /// Same configuration with a different dispatch mode
    #[must_use]
    pub fn with_dispatch(self, dispatch: DispatchMode) -> Self {
        Self { dispatch, ..self }
    }

    /// Same configuration with a fixed exploration seed
    #[must_use]
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..self
        }
    }

    /// Same configuration with a different quality for unseen pairs
    #[must_use]
    pub fn with_default_quality(self, default_quality: Quality) -> Self {
        Self {
            default_quality,
            ..self
        }
    }

    /// Same configuration with a different update rule
    #[must_use]
    pub fn with_update_rule(self, update_rule: UpdateRule) -> Self {
        Self { update_rule, ..self }
    }

    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RLError;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = AgentConfig::default();
        assert_eq!(config.learning_rate.value(), 0.1);
        assert_eq!(config.discount_factor.value(), 0.9);
        assert_eq!(config.exploration_factor.value(), 0.1);
        assert_eq!(config.default_quality, Quality::ZERO);
        assert_eq!(config.update_rule, UpdateRule::Bellman);
        assert_eq!(config.dispatch, DispatchMode::Direct);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(AgentConfig::new(1.0, 1.0, 0.0).is_ok());
        assert!(matches!(
            AgentConfig::new(1.2, 1.0, 0.0),
            Err(RLError::InvalidFactor { name: "learning rate", .. })
        ));
        assert!(AgentConfig::new(0.5, -1.0, 0.0).is_err());
        assert!(AgentConfig::new(0.5, 1.0, 2.0).is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = AgentConfig::from_json(
            r#"{ "learning_rate": 1.0, "dispatch": "deferred", "update_rule": "identity", "seed": 7 }"#,
        )
        .unwrap();
        assert_eq!(config.learning_rate.value(), 1.0);
        assert_eq!(config.discount_factor.value(), 0.9);
        assert_eq!(config.dispatch, DispatchMode::Deferred);
        assert_eq!(config.update_rule, UpdateRule::Identity);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_invalid_json_values_fail_to_load() {
        assert!(matches!(
            AgentConfig::from_json(r#"{ "exploration_factor": 1.5 }"#),
            Err(RLError::Serialization(_))
        ));
        assert!(AgentConfig::from_json(r#"{ "epsilon": 0.5 }"#).is_err());
        assert!(AgentConfig::from_json(r#"{ "dispatch": "threaded" }"#).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let config = AgentConfig::new(0.5, 0.99, 0.2)
            .unwrap()
            .with_dispatch(DispatchMode::Deferred)
            .with_seed(3);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(AgentConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "discount_factor": 1.0, "default_quality": -2.5 }}"#).unwrap();
        let config = AgentConfig::from_file(file.path()).unwrap();
        assert_eq!(config.discount_factor.value(), 1.0);
        assert_eq!(config.default_quality, Quality::new(-2.5).unwrap());

        assert!(matches!(
            AgentConfig::from_file(file.path().with_extension("missing")),
            Err(RLError::Io(_))
        ));
    }
}
