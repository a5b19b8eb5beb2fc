//! hrcopilot-core: conversational query-resolution core for an HR platform.
//!
//! Given free-text input from an authenticated user, the pipeline classifies
//! intent against a bilingual keyword taxonomy, dispatches to a role-gated
//! structured handler, federates a ranked search across read-only knowledge
//! sources, optionally consults a generative service, and always terminates
//! in a well-formed response. Web views, persistence of HR records, and chat
//! UI belong to the surrounding application.
//!
//! ```rust,ignore
//! let copilot = Copilot::new(CopilotConfig::load()?, collaborators)
//!     .with_generative(Arc::new(OllamaBridge::from_env().unwrap()))
//!     .open_audit_store()?;
//! let response = copilot.process_message("cek sisa cuti saya", &requester).await;
//! ```

mod config;
mod knowledge;
mod ollama_service;
mod orchestrator;
mod shared;

// Configuration
pub use config::CopilotConfig;

// Shared types
pub use shared::{ChatResponse, CopilotError, Requester, Role, SourceTier};

// Knowledge layer: sources, federation, audit log
pub use knowledge::{
    AuditStore, BestPracticeSource, ComplianceSource, FaqEntry, FaqSource, HrDomainSource,
    KnowledgeRouter, KnowledgeSnippet, KnowledgeSource, LifecycleSource, ScenarioSource,
    UnresolvedQuery, UNRESOLVED_LOG_PREFIX,
};

// Generative bridge
pub use ollama_service::{BridgeError, GenerativeService, OllamaBridge};

// Orchestration: intents, handlers, collaborators, the pipeline entry point
pub use orchestrator::{
    AccessPolicy, ApologyKind, ApplicantCounts, Collaborators, Copilot, DirectoryError,
    EmployeeProfile, HandlerOutcome, Intent, LeaveEntry, LeaveLedger, LeaveSummary,
    RecruitmentBoard, RecruitmentDigest, RecruitmentSummary, ResponseComposer, RosterEntry,
    StageCount, WorkforceDirectory,
};
