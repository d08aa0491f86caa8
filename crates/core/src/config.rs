//! # Configuration
//!
//! An explicit configuration value object handed to the coordinator at
//! construction - no ambient global state. Every field has a default and
//! an optional environment override.

use crate::outer::resources::ResourceCaps;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Runtime configuration for a coordination run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MosaicConfig {
    /// Upper bound on inner teams per project
    pub max_inner_teams: usize,
    /// Upper bound on agents per inner team
    pub max_agents_per_team: usize,
    /// How long a human gate waits before the default-approve policy
    /// kicks in
    pub intervention_timeout: Duration,
    /// Resource ceilings used when a scenario does not supply its own
    pub default_caps: ResourceCaps,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            max_inner_teams: 5,
            max_agents_per_team: 10,
            intervention_timeout: Duration::from_secs(300),
            default_caps: ResourceCaps::default(),
        }
    }
}

impl MosaicConfig {
    /// Build a config from the environment, falling back to defaults for
    /// anything unset or unparsable.
    ///
    /// Recognized variables: `MOSAIC_MAX_INNER_TEAMS`,
    /// `MOSAIC_MAX_AGENTS_PER_TEAM`, `MOSAIC_INTERVENTION_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_inner_teams: env_parse("MOSAIC_MAX_INNER_TEAMS", defaults.max_inner_teams),
            max_agents_per_team: env_parse(
                "MOSAIC_MAX_AGENTS_PER_TEAM",
                defaults.max_agents_per_team,
            ),
            intervention_timeout: Duration::from_secs(env_parse(
                "MOSAIC_INTERVENTION_TIMEOUT_SECS",
                defaults.intervention_timeout.as_secs(),
            )),
            default_caps: defaults.default_caps,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, fallback: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(fallback)
}
