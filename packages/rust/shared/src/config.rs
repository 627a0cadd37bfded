//! Runtime configuration for IntelScout.
//!
//! There is no config file: values start from defaults and CLI flags override
//! them. The only environment input is the optional enrichment credential.

use std::time::Duration;

use crate::error::{IntelError, Result};

/// Placeholder replaced by the folded subject when building target URLs.
pub const SUBJECT_PLACEHOLDER: &str = "{subject}";

/// Default base URL pattern for a competitor's site.
pub const DEFAULT_SITE_TEMPLATE: &str = "https://www.{subject}.com";

/// Browser-like identifying header sent with every fetch.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

// ---------------------------------------------------------------------------
// ScoutConfig
// ---------------------------------------------------------------------------

/// Runtime scouting configuration - defaults merged with CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoutConfig {
    /// Per-fetch timeout in seconds.
    pub timeout_secs: u64,
    /// User-Agent header for fetch requests.
    pub user_agent: String,
    /// Base URL pattern containing [`SUBJECT_PLACEHOLDER`].
    pub site_template: String,
    /// Maximum snippets kept per scouting stage.
    pub snippet_limit: usize,
}

impl Default for ScoutConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: DEFAULT_USER_AGENT.into(),
            site_template: DEFAULT_SITE_TEMPLATE.into(),
            snippet_limit: default_snippet_limit(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    10
}
fn default_snippet_limit() -> usize {
    3
}

impl ScoutConfig {
    /// Per-fetch timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(IntelError::config("timeout must be at least one second"));
        }
        if !self.site_template.contains(SUBJECT_PLACEHOLDER) {
            return Err(IntelError::config(format!(
                "site template '{}' has no {SUBJECT_PLACEHOLDER} placeholder",
                self.site_template
            )));
        }
        if self.user_agent.trim().is_empty() {
            return Err(IntelError::config("user agent must not be blank"));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// EnrichmentConfig
// ---------------------------------------------------------------------------

/// Credentials lookup for AI enrichment. The insight stage does not call out
/// yet, so this only reports whether a key is configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichmentConfig {
    /// Name of the env var holding the API key (never store the key itself).
    pub api_key_env: String,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            api_key_env: "OPENAI_API_KEY".into(),
        }
    }
}

impl EnrichmentConfig {
    /// Whether the credential env var is set and non-empty.
    pub fn credentials_present(&self) -> bool {
        matches!(std::env::var(&self.api_key_env), Ok(val) if !val.trim().is_empty())
    }
}
