//! Federated knowledge layer: independent read-only sources behind one
//! search contract, a ranking router, and the unresolved-query audit log.
//!
//! ## Source registry
//!
//! | Priority | Source        | Content                                   | Traversal      |
//! |----------|---------------|-------------------------------------------|----------------|
//! | 1        | faq           | Curated Q&A with keyword lists            | Entry scoring  |
//! | 2        | hr_domain     | HR domain reference (lifecycle, comp)     | Tree walk      |
//! | 3        | compliance    | Regulatory and compliance guidance        | Tree walk      |
//! | 4        | best_practices| Industry best practices                   | Tree walk      |
//! | 5        | lifecycle     | Employee lifecycle procedures             | Tree walk      |
//! | 6        | scenarios     | Advanced HR scenario playbooks            | Tree walk      |
//!
//! Lower priority rank = higher trust; the router concatenates per-source
//! contributions in this order. All source data is built once at startup and
//! never mutated at request time.

mod bootstrap;
mod compliance;
mod domain;
mod faq;
mod lifecycle;
mod practices;
mod router;
mod scenarios;
mod snippet;
mod store;
pub mod walk;

pub use compliance::ComplianceSource;
pub use domain::HrDomainSource;
pub use faq::{FaqEntry, FaqSource};
pub use lifecycle::LifecycleSource;
pub use practices::BestPracticeSource;
pub use router::KnowledgeRouter;
pub use scenarios::ScenarioSource;
pub use snippet::KnowledgeSnippet;
pub use store::{AuditStore, UnresolvedQuery, UNRESOLVED_LOG_PREFIX};

/// Common contract for all knowledge sources.
///
/// Implementations own their nested data and their traversal; the router
/// depends only on this trait. `search` returns unsorted snippets: an empty
/// vec (never an error) when nothing matches or the query is empty.
pub trait KnowledgeSource: Send + Sync {
    /// Stable identifier recorded on every emitted snippet.
    fn source_id(&self) -> &'static str;

    /// Priority rank; lower = higher trust in merged results.
    fn priority(&self) -> u8;

    /// Search this source for the query (case-folded substring semantics).
    fn search(&self, query: &str) -> Vec<KnowledgeSnippet>;
}
