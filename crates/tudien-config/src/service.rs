use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Upper bound on suggestions requested per call
pub const MAX_SUGGESTIONS: usize = 10;

/// Shortest request time bound accepted from configuration
pub const MIN_TIMEOUT_SECONDS: u64 = 1;

fn default_base_url() -> String {
    "https://minhqnd.com/api/dictionary".to_string()
}

fn default_timeout_seconds() -> u64 {
    20
}

fn default_suggestion_limit() -> usize {
    MAX_SUGGESTIONS
}

/// Remote dictionary service endpoint
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base URL; `/lookup` and `/suggest` are appended
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_suggestion_limit")]
    pub suggestion_limit: usize,
}

impl ServiceConfig {
    pub fn new() -> Self {
        let base_url = env::var("DICTIONARY_API_URL").unwrap_or_else(|_| default_base_url());

        let timeout_seconds = env::var("TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_seconds);

        let suggestion_limit = env::var("SUGGESTION_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_suggestion_limit);

        Self {
            base_url,
            timeout_seconds,
            suggestion_limit,
        }
    }

    /// Per-request time bound, never below [`MIN_TIMEOUT_SECONDS`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.max(MIN_TIMEOUT_SECONDS))
    }

    /// Suggestion page size, never above [`MAX_SUGGESTIONS`]
    pub fn suggestion_limit(&self) -> usize {
        self.suggestion_limit.clamp(1, MAX_SUGGESTIONS)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            suggestion_limit: default_suggestion_limit(),
        }
    }
}
