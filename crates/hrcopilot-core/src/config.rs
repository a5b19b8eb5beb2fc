//! Copilot configuration loaded from TOML and environment.
//!
//! Behavior tunables only, no credentials. Change limits without code edits.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | per_source_cap | 2 | Max snippets one knowledge source contributes to a merged result. |
//! | max_suggestions | 5 | Max suggestions attached to a fallback response. |
//! | annual_leave_quota | 12 | Default yearly leave quota (days) when the ledger has none. |
//! | generative_timeout_secs | 20 | Upper bound on one generative-service call. |
//! | ollama_base_url | http://localhost:11434 | Ollama endpoint for the generative tier. |
//! | ollama_model | llama3 | Model name passed to Ollama. |
//! | audit_path | ./data/copilot_audit | Sled directory for the unresolved-query log. |
//! | composer_seed | 7 | Seed for deterministic response variation. |

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Pipeline configuration. Load precedence: defaults < TOML file < environment
/// (`COPILOT_` prefix, e.g. `COPILOT_PER_SOURCE_CAP=3`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopilotConfig {
    /// Per-source contribution cap in federated search results.
    #[serde(default = "default_per_source_cap")]
    pub per_source_cap: usize,
    /// Maximum number of follow-up/fallback suggestions per response.
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    /// Default annual leave quota (days) assumed when the leave ledger does
    /// not report one.
    #[serde(default = "default_annual_leave_quota")]
    pub annual_leave_quota: u32,
    /// Timeout for a single generative-service call, in seconds. On timeout
    /// the controller proceeds to the generic-suggestion tier.
    #[serde(default = "default_generative_timeout_secs")]
    pub generative_timeout_secs: u64,
    /// Base URL of the Ollama endpoint used by the generative tier.
    #[serde(default = "default_ollama_base_url")]
    pub ollama_base_url: String,
    /// Ollama model name.
    #[serde(default = "default_ollama_model")]
    pub ollama_model: String,
    /// Sled directory for the unresolved-query audit log.
    #[serde(default = "default_audit_path")]
    pub audit_path: String,
    /// Seed for the response composer's deterministic phrase variation.
    #[serde(default = "default_composer_seed")]
    pub composer_seed: u64,
}

fn default_per_source_cap() -> usize {
    2
}

fn default_max_suggestions() -> usize {
    5
}

fn default_annual_leave_quota() -> u32 {
    12
}

fn default_generative_timeout_secs() -> u64 {
    20
}

fn default_ollama_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3".to_string()
}

fn default_audit_path() -> String {
    "./data/copilot_audit".to_string()
}

fn default_composer_seed() -> u64 {
    7
}

impl Default for CopilotConfig {
    fn default() -> Self {
        Self {
            per_source_cap: default_per_source_cap(),
            max_suggestions: default_max_suggestions(),
            annual_leave_quota: default_annual_leave_quota(),
            generative_timeout_secs: default_generative_timeout_secs(),
            ollama_base_url: default_ollama_base_url(),
            ollama_model: default_ollama_model(),
            audit_path: default_audit_path(),
            composer_seed: default_composer_seed(),
        }
    }
}

impl CopilotConfig {
    /// Load config from file and environment. Precedence: env `COPILOT_CONFIG`
    /// path > `config/copilot.toml` > defaults, then `COPILOT_*` env overrides.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("COPILOT_CONFIG").unwrap_or_else(|_| "config/copilot".to_string());
        let builder = config::Config::builder()
            .set_default("per_source_cap", default_per_source_cap() as i64)?
            .set_default("max_suggestions", default_max_suggestions() as i64)?
            .set_default("annual_leave_quota", default_annual_leave_quota() as i64)?
            .set_default("generative_timeout_secs", default_generative_timeout_secs() as i64)?
            .set_default("ollama_base_url", default_ollama_base_url())?
            .set_default("ollama_model", default_ollama_model())?
            .set_default("audit_path", default_audit_path())?
            .set_default("composer_seed", default_composer_seed() as i64)?;

        let path = Path::new(&config_path);
        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(config::Environment::with_prefix("COPILOT").separator("__"))
            .build()?;

        built.try_deserialize()
    }

    /// Bound on one generative-service call.
    pub fn generative_timeout(&self) -> Duration {
        Duration::from_secs(self.generative_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = CopilotConfig::default();
        assert_eq!(cfg.per_source_cap, 2);
        assert_eq!(cfg.max_suggestions, 5);
        assert_eq!(cfg.annual_leave_quota, 12);
        assert_eq!(cfg.generative_timeout(), Duration::from_secs(20));
    }

    #[test]
    fn test_toml_round_trip() {
        let cfg = CopilotConfig::default();
        let text = toml::to_string(&cfg).unwrap();
        let back: CopilotConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.per_source_cap, cfg.per_source_cap);
        assert_eq!(back.ollama_model, cfg.ollama_model);
    }
}
