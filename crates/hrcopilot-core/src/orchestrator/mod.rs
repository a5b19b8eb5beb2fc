//! Pipeline orchestration: the copilot context object and its fallback chain.
//!
//! ## Resolution tiers
//!
//! ```text
//! CLASSIFYING -> HANDLING -> FEDERATED_SEARCH -> GENERATIVE_FALLBACK -> GENERIC_SUGGESTION -> DONE
//! ```
//!
//! Every query produces exactly one response. Each tier is isolated: an error
//! at a tier boundary logs and advances to the next tier, never escaping
//! `process_message`. Access denial terminates immediately: the chain must
//! not search for alternate information paths after a denial.

pub mod composer;
pub mod handlers;
pub mod intents;
pub mod traits;

pub use composer::{ApologyKind, ResponseComposer};
pub use handlers::{Collaborators, HandlerOutcome};
pub use intents::{AccessPolicy, Intent};
pub use traits::{
    ApplicantCounts, DirectoryError, EmployeeProfile, LeaveEntry, LeaveLedger, LeaveSummary,
    RecruitmentBoard, RecruitmentDigest, RecruitmentSummary, RosterEntry, StageCount,
    WorkforceDirectory,
};

use crate::config::CopilotConfig;
use crate::knowledge::{AuditStore, KnowledgeRouter, UnresolvedQuery};
use crate::ollama_service::{self, GenerativeService};
use crate::shared::{ChatResponse, CopilotError, Requester, SourceTier};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// States of the fallback chain. `Done` is implicit: tiers return a final
/// response instead of transitioning.
enum Stage {
    Handling(Intent),
    FederatedSearch,
    GenerativeFallback,
    GenericSuggestion,
}

/// The copilot context: every registry built once at startup, shared
/// immutably across requests. Construct with [`Copilot::new`] and hand out
/// by reference (or `Arc`) to the request layer.
pub struct Copilot {
    config: CopilotConfig,
    router: Arc<KnowledgeRouter>,
    composer: ResponseComposer,
    collaborators: Collaborators,
    generative: Option<Arc<dyn GenerativeService>>,
    audit: Option<Arc<AuditStore>>,
}

impl Copilot {
    /// Build the context from config and the injected data accessors. The
    /// knowledge router defaults to the built-in sources; the generative
    /// bridge and audit store are attached separately.
    pub fn new(config: CopilotConfig, collaborators: Collaborators) -> Self {
        let router = Arc::new(KnowledgeRouter::with_default_sources(config.per_source_cap));
        let composer = ResponseComposer::new(config.composer_seed, config.max_suggestions);
        Self {
            config,
            router,
            composer,
            collaborators,
            generative: None,
            audit: None,
        }
    }

    /// Replace the knowledge router (e.g. sources loaded from deployment data).
    pub fn with_router(mut self, router: Arc<KnowledgeRouter>) -> Self {
        self.router = router;
        self
    }

    /// Attach the generative service. Absent, the generative tier is skipped.
    pub fn with_generative(mut self, service: Arc<dyn GenerativeService>) -> Self {
        self.generative = Some(service);
        self
    }

    /// Attach the unresolved-query audit store.
    pub fn with_audit_store(mut self, store: AuditStore) -> Self {
        self.audit = Some(Arc::new(store));
        self
    }

    /// Open the audit store at the configured path and attach it.
    pub fn open_audit_store(self) -> Result<Self, CopilotError> {
        let store = AuditStore::open_path(&self.config.audit_path)?;
        Ok(self.with_audit_store(store))
    }

    pub fn router(&self) -> &KnowledgeRouter {
        &self.router
    }

    /// Single entry point: resolve one message into exactly one response.
    pub async fn process_message(&self, text: &str, requester: &Requester) -> ChatResponse {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            // Malformed query: fixed clarification, no tier is entered.
            debug!(
                target: "copilot::pipeline",
                error = %CopilotError::MalformedQuery,
                "short-circuiting empty input"
            );
            return ChatResponse::failure(
                self.composer.clarification(&requester.identity),
                SourceTier::Fallback,
            )
            .with_suggestions(self.composer.sniff_suggestions(""));
        }

        let mut stage = match self.classify(trimmed).await {
            Some(intent) => {
                info!(
                    target: "copilot::pipeline",
                    intent = intent.as_str(),
                    "intent classified"
                );
                Stage::Handling(intent)
            }
            None => Stage::FederatedSearch,
        };

        loop {
            stage = match stage {
                Stage::Handling(intent) => {
                    match handlers::handle_intent(
                        intent,
                        trimmed,
                        requester,
                        &self.collaborators,
                        &self.router,
                        &self.composer,
                        &self.config,
                    ) {
                        HandlerOutcome::Done(response) => {
                            return self.composer.decorate(response, Some(intent), requester);
                        }
                        HandlerOutcome::Continue => Stage::FederatedSearch,
                    }
                }
                Stage::FederatedSearch => match self.federated_search(trimmed, requester) {
                    Some(response) => return self.composer.decorate(response, None, requester),
                    None => Stage::GenerativeFallback,
                },
                Stage::GenerativeFallback => match self.generative_answer(trimmed, requester).await
                {
                    Some(response) => return self.composer.decorate(response, None, requester),
                    None => Stage::GenericSuggestion,
                },
                Stage::GenericSuggestion => {
                    return self.generic_suggestion(trimmed, requester);
                }
            };
        }
    }

    /// Keyword classification, then one bounded generative attempt when the
    /// keywords find nothing. Any bridge failure maps to `None`.
    async fn classify(&self, text: &str) -> Option<Intent> {
        if let Some(intent) = Intent::classify(text) {
            return Some(intent);
        }
        let service = self.generative.as_ref()?;
        let prompt = ollama_service::intent_classifier_prompt(text, &Intent::names());
        let attempt = tokio::time::timeout(
            self.config.generative_timeout(),
            service.generate(&prompt, 50, 0.1),
        )
        .await;
        match attempt {
            Ok(Ok(name)) => {
                let intent = Intent::from_str(&name);
                if intent.is_none() {
                    debug!(
                        target: "copilot::pipeline",
                        raw = %name,
                        "generative classifier returned no known intent"
                    );
                }
                intent
            }
            Ok(Err(err)) => {
                warn!(
                    target: "copilot::pipeline",
                    error = %CopilotError::Generative(err),
                    "generative classification failed"
                );
                None
            }
            Err(_) => {
                warn!(
                    target: "copilot::pipeline",
                    "generative classification timed out"
                );
                None
            }
        }
    }

    /// Federated-search tier: the top-ranked snippet becomes the answer.
    fn federated_search(&self, text: &str, requester: &Requester) -> Option<ChatResponse> {
        let hits = self.router.federated_search(text);
        let best = hits.first()?;
        let related = related_suggestions(&hits);
        let reply = format!("Halo {}! {}", requester.display_name, best.body);
        let data = json!({
            "source": best.source_id,
            "category": best.category,
            "path": best.path,
            "related_topics": related,
        });
        Some(
            ChatResponse::ok(reply, SourceTier::FederatedSearch)
                .with_data(data)
                .with_suggestions(related),
        )
    }

    /// Generative tier: bounded by the configured timeout; trivial output is
    /// discarded like a failure.
    async fn generative_answer(&self, text: &str, requester: &Requester) -> Option<ChatResponse> {
        let service = match &self.generative {
            Some(service) => service,
            None => {
                debug!(
                    target: "copilot::pipeline",
                    "no generative service configured; skipping tier"
                );
                return None;
            }
        };
        let prompt = ollama_service::assistant_answer_prompt(&requester.display_name, text);
        let attempt = tokio::time::timeout(
            self.config.generative_timeout(),
            service.generate(&prompt, 300, 0.7),
        )
        .await;
        match attempt {
            Ok(Ok(answer)) if answer.trim().len() > 10 => Some(
                ChatResponse::ok(answer.trim().to_string(), SourceTier::Generative)
                    .with_data(json!({"source": "generative"})),
            ),
            Ok(Ok(_)) => {
                debug!(
                    target: "copilot::pipeline",
                    "generative answer too short; falling through"
                );
                None
            }
            Ok(Err(err)) => {
                warn!(
                    target: "copilot::pipeline",
                    error = %CopilotError::Generative(err),
                    "generative answer failed"
                );
                None
            }
            Err(_) => {
                warn!(
                    target: "copilot::pipeline",
                    timeout_secs = self.config.generative_timeout_secs,
                    "generative answer timed out"
                );
                None
            }
        }
    }

    /// Terminal tier: apology plus sniffed suggestions, and the unresolved
    /// query goes to the audit log.
    fn generic_suggestion(&self, text: &str, requester: &Requester) -> ChatResponse {
        let record =
            UnresolvedQuery::now(text, &requester.identity, requester.role.as_str());
        if let Some(audit) = &self.audit {
            if let Err(err) = audit.record_unresolved(&record) {
                warn!(
                    target: "copilot::audit",
                    error = %CopilotError::Audit(err),
                    "failed to persist unresolved query"
                );
            }
        } else {
            info!(
                target: "copilot::audit",
                requester = %requester.identity,
                "unresolved query (no audit store attached)"
            );
        }
        let apology = self.composer.apology(ApologyKind::NotFound, &requester.identity);
        let text = format!("{} Berikut beberapa hal yang bisa saya bantu:", apology);
        ChatResponse::failure(text, SourceTier::Fallback)
            .with_suggestions(self.composer.sniff_suggestions(&record.raw_text))
    }
}

/// Suggestion labels from the non-best hits of a federated result.
fn related_suggestions(hits: &[crate::knowledge::KnowledgeSnippet]) -> Vec<String> {
    hits.iter().skip(1).take(3).map(|h| h.label()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ollama_service::BridgeError;
    use crate::orchestrator::traits::mock::MockBackend;
    use crate::shared::Role;
    use async_trait::async_trait;

    fn collaborators() -> Collaborators {
        let backend = Arc::new(MockBackend::default());
        Collaborators {
            directory: backend.clone(),
            leave: backend.clone(),
            recruitment: backend,
        }
    }

    fn copilot() -> Copilot {
        Copilot::new(CopilotConfig::default(), collaborators())
    }

    fn employee() -> Requester {
        Requester::new("emp-1", "Budi Santoso", Role::Employee)
    }

    /// Generative double that always fails, for degradation tests.
    struct FailingService;

    #[async_trait]
    impl GenerativeService for FailingService {
        async fn generate(&self, _: &str, _: u32, _: f32) -> Result<String, BridgeError> {
            Err(BridgeError::EmptyCompletion)
        }
    }

    /// Generative double with a fixed answer.
    struct CannedService(String);

    #[async_trait]
    impl GenerativeService for CannedService {
        async fn generate(&self, _: &str, _: u32, _: f32) -> Result<String, BridgeError> {
            Ok(self.0.clone())
        }
    }

    #[tokio::test]
    async fn test_leave_balance_end_to_end() {
        let copilot = copilot();
        let resp = copilot.process_message("cek sisa cuti saya", &employee()).await;
        assert!(resp.success);
        assert_eq!(resp.source_tier, SourceTier::Handler);
        assert_eq!(resp.data.as_ref().unwrap()["remaining"], 9);
        assert!(!resp.text.is_empty());
    }

    #[tokio::test]
    async fn test_gated_intent_denied_and_terminal() {
        let copilot = copilot();
        let resp = copilot
            .process_message("berapa jumlah pelamar", &employee())
            .await;
        assert!(!resp.success);
        assert_eq!(resp.source_tier, SourceTier::Handler);
        assert!(resp.data.is_none());
    }

    #[tokio::test]
    async fn test_unknown_query_without_bridge_is_generic_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let copilot = copilot()
            .with_audit_store(AuditStore::open_path(dir.path().join("audit")).unwrap());
        let resp = copilot
            .process_message("xyzabc nonsense query", &employee())
            .await;
        assert!(!resp.success);
        assert_eq!(resp.source_tier, SourceTier::Fallback);
        assert!(!resp.suggestions.is_empty());
        assert!(resp.suggestions.len() <= 5);

        // The unresolved query is audited.
        let recent = copilot.audit.as_ref().unwrap().recent_unresolved(5).unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].raw_text, "xyzabc nonsense query");
    }

    #[tokio::test]
    async fn test_empty_input_short_circuits_without_audit() {
        let dir = tempfile::tempdir().unwrap();
        let copilot = copilot()
            .with_audit_store(AuditStore::open_path(dir.path().join("audit")).unwrap());
        let resp = copilot.process_message("   ", &employee()).await;
        assert!(!resp.success);
        assert_eq!(resp.source_tier, SourceTier::Fallback);
        assert!(!resp.text.is_empty());
        // Malformed input is not an unresolved query.
        let recent = copilot.audit.as_ref().unwrap().recent_unresolved(5).unwrap();
        assert!(recent.is_empty());
    }

    #[tokio::test]
    async fn test_knowledge_question_resolves_via_federated_search() {
        let copilot = copilot();
        // No structured intent for "notice period"; federated search must hit
        // the FAQ entry.
        let resp = copilot
            .process_message("berapa lama notice period", &employee())
            .await;
        assert!(resp.success);
        assert_eq!(resp.source_tier, SourceTier::FederatedSearch);
        assert_eq!(resp.data.as_ref().unwrap()["source"], "faq");
    }

    #[tokio::test]
    async fn test_generative_failure_degrades_gracefully() {
        let copilot = copilot().with_generative(Arc::new(FailingService));
        let resp = copilot
            .process_message("xyzabc nonsense query", &employee())
            .await;
        assert!(!resp.success);
        assert_eq!(resp.source_tier, SourceTier::Fallback);
        assert!(!resp.suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_generative_answer_used_when_substantial() {
        let copilot = copilot().with_generative(Arc::new(CannedService(
            "Kebijakan bonus diatur oleh tim kompensasi dan dibayarkan setiap kuartal.".into(),
        )));
        let resp = copilot
            .process_message("xyzabc nonsense query", &employee())
            .await;
        assert!(resp.success);
        assert_eq!(resp.source_tier, SourceTier::Generative);
    }

    #[tokio::test]
    async fn test_every_nonempty_input_yields_wellformed_response() {
        let copilot = copilot();
        for text in [
            "cek sisa cuti saya",
            "berapa jumlah pelamar",
            "halo",
            "help",
            "jadwal training",
            "notice period resign",
            "zzz unresolvable zzz",
        ] {
            let resp = copilot.process_message(text, &employee()).await;
            assert!(!resp.text.is_empty(), "empty text for input {:?}", text);
            assert!(!resp.timestamp.is_empty());
        }
    }
}
