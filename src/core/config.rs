//! Episode configuration.

use serde::{Deserialize, Serialize};

/// Default round cap before an episode is forced to terminate.
pub const DEFAULT_MAX_ROUNDS: u32 = 10_000;

/// Episode configuration parameters.
///
/// Fixed when the episode is constructed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeConfig {
    /// Round cap. A step taken with more completed rounds than this
    /// terminates the episode.
    pub max_rounds: u32,

    /// Expose players as `0` (WHITE) / `1` (BLACK) instead of raw colors.
    pub external_mode: bool,

    /// Check every observation against the declared bounds.
    pub check_observations: bool,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
            external_mode: false,
            check_observations: true,
        }
    }
}

impl EpisodeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    pub fn with_external_mode(mut self, external: bool) -> Self {
        self.external_mode = external;
        self
    }

    pub fn with_observation_checks(mut self, check: bool) -> Self {
        self.check_observations = check;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EpisodeConfig::default();
        assert_eq!(config.max_rounds, 10_000);
        assert!(!config.external_mode);
        assert!(config.check_observations);
    }

    #[test]
    fn test_builder_pattern() {
        let config = EpisodeConfig::new()
            .with_max_rounds(50)
            .with_external_mode(true)
            .with_observation_checks(false);

        assert_eq!(config.max_rounds, 50);
        assert!(config.external_mode);
        assert!(!config.check_observations);
    }

    #[test]
    fn test_serialization() {
        let config = EpisodeConfig::default().with_external_mode(true);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: EpisodeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
