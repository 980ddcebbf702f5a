//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SocialError};

/// Posts retained per user before the oldest is evicted.
pub const DEFAULT_POST_LOG_CAPACITY: usize = 50;

/// Page size used by `SocialGraph::latest_feed`.
pub const DEFAULT_FEED_LIMIT: usize = 10;

/// Tunables for a `SocialGraph` instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialConfig {
    /// Capacity of each user's post log created through the graph.
    pub post_log_capacity: usize,
    /// Page size for `latest_feed`.
    pub default_feed_limit: usize,
    /// Whether `follow(a, a)` is accepted.
    pub allow_self_follow: bool,
}

impl Default for SocialConfig {
    fn default() -> Self {
        Self {
            post_log_capacity: DEFAULT_POST_LOG_CAPACITY,
            default_feed_limit: DEFAULT_FEED_LIMIT,
            allow_self_follow: true,
        }
    }
}

impl SocialConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SocialConfig = serde_json::from_str(json)
            .map_err(|e| SocialError::invalid_config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.post_log_capacity == 0 {
            return Err(SocialError::invalid_config(
                "post_log_capacity must be at least 1",
            ));
        }
        Ok(())
    }
}
