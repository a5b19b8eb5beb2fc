//! Shared types for the copilot pipeline: requester identity, the single
//! response shape every tier produces, and the error taxonomy.
//!
//! Every query entering [`crate::Copilot::process_message`] produces exactly
//! one [`ChatResponse`] with a non-empty `text`. Tiers never surface errors to
//! the caller; [`CopilotError`] is the internal vocabulary used at tier
//! boundaries and in logs.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Requester: who is asking
// ---------------------------------------------------------------------------

/// Role of the requesting user, resolved by the surrounding application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular employee; no access to recruitment analytics.
    #[default]
    Employee,
    /// HR staff; staff-gated intents allowed.
    Hr,
    /// Administrator; staff-gated intents allowed.
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Employee => "employee",
            Role::Hr => "hr",
            Role::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.trim() {
            s if s.eq_ignore_ascii_case("admin") => Role::Admin,
            s if s.eq_ignore_ascii_case("hr") => Role::Hr,
            _ => Role::Employee,
        }
    }

    /// HR and admin count as staff for access-gated intents.
    #[inline]
    pub fn is_staff(&self) -> bool {
        matches!(self, Role::Hr | Role::Admin)
    }
}

/// The authenticated user a query is processed on behalf of.
///
/// `identity` is the stable key the external data accessors resolve
/// (badge id or account name); `display_name` is only used for phrasing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requester {
    pub identity: String,
    pub display_name: String,
    pub role: Role,
}

impl Requester {
    pub fn new(identity: impl Into<String>, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            identity: identity.into(),
            display_name: display_name.into(),
            role,
        }
    }
}

// ---------------------------------------------------------------------------
// ChatResponse: the single output shape of the pipeline
// ---------------------------------------------------------------------------

/// Which resolution tier produced the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTier {
    /// A structured intent handler answered (or denied) the query.
    Handler,
    /// The federated knowledge search produced the answer.
    FederatedSearch,
    /// The generative service produced the answer.
    Generative,
    /// Terminal tier: clarification or generic suggestions.
    Fallback,
}

impl SourceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceTier::Handler => "handler",
            SourceTier::FederatedSearch => "federated_search",
            SourceTier::Generative => "generative",
            SourceTier::Fallback => "fallback",
        }
    }
}

/// Response returned to the surrounding application.
///
/// Invariants: `text` is never empty; `data` is absent whenever access was
/// denied; `timestamp` is RFC-3339 UTC, set at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    pub source_tier: SourceTier,
    pub timestamp: String,
}

impl ChatResponse {
    /// Successful response with the given text, stamped now.
    pub fn ok(text: impl Into<String>, tier: SourceTier) -> Self {
        Self {
            success: true,
            text: text.into(),
            data: None,
            suggestions: Vec::new(),
            source_tier: tier,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Failed response (denial, apology, clarification), stamped now.
    pub fn failure(text: impl Into<String>, tier: SourceTier) -> Self {
        Self {
            success: false,
            text: text.into(),
            data: None,
            suggestions: Vec::new(),
            source_tier: tier,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }
}

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Internal error taxonomy of the pipeline.
///
/// None of these escape `process_message`: each tier boundary converts a
/// failure into a transition to the next tier (or the terminal generic
/// response) and logs the variant.
#[derive(Debug, thiserror::Error)]
pub enum CopilotError {
    /// Empty or whitespace-only input; answered with a fixed clarification
    /// without entering the fallback chain.
    #[error("malformed query: empty or whitespace-only input")]
    MalformedQuery,

    /// Requester role fails the intent's access policy. Terminal: no further
    /// tiers are attempted after a denial.
    #[error("access denied for role '{0}'")]
    AccessDenied(&'static str),

    /// External data accessor failed; downgraded to a continue-to-next-tier
    /// signal inside the handler tier.
    #[error("upstream data accessor failed: {0}")]
    Upstream(#[from] crate::orchestrator::DirectoryError),

    /// Generative service absent, erroring, or timed out; downgraded to the
    /// generic-suggestion tier.
    #[error("generative service failed: {0}")]
    Generative(#[from] crate::ollama_service::BridgeError),

    /// Audit store failure. Only the unresolved-query log is affected; the
    /// user-visible response is produced regardless.
    #[error("audit store error: {0}")]
    Audit(#[from] sled::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_and_staff() {
        assert_eq!(Role::from_str("Admin"), Role::Admin);
        assert_eq!(Role::from_str("hr"), Role::Hr);
        assert_eq!(Role::from_str("anything-else"), Role::Employee);
        assert!(Role::Admin.is_staff());
        assert!(Role::Hr.is_staff());
        assert!(!Role::Employee.is_staff());
    }

    #[test]
    fn test_source_tier_serializes_snake_case() {
        let s = serde_json::to_string(&SourceTier::FederatedSearch).unwrap();
        assert_eq!(s, "\"federated_search\"");
    }

    #[test]
    fn test_response_builders_stamp_timestamp() {
        let resp = ChatResponse::ok("done", SourceTier::Handler)
            .with_data(serde_json::json!({"remaining": 9}));
        assert!(resp.success);
        assert!(!resp.timestamp.is_empty());
        assert_eq!(resp.data.unwrap()["remaining"], 9);

        let denial = ChatResponse::failure("no", SourceTier::Handler);
        assert!(!denial.success);
        assert!(denial.data.is_none());
    }
}
