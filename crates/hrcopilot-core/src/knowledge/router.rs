//! Federation & ranking router over the registered knowledge sources.
//!
//! Every source is queried; each contribution is sorted by relevance and
//! truncated to a per-source cap before concatenation in declared priority
//! order, so no single source can dominate the merged result. The head of the
//! merged list is the best overall hit.

use super::snippet::KnowledgeSnippet;
use super::{
    BestPracticeSource, ComplianceSource, FaqSource, HrDomainSource, KnowledgeSource,
    LifecycleSource, ScenarioSource,
};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

pub struct KnowledgeRouter {
    /// Sources in ascending priority rank (stable for equal ranks).
    sources: Vec<Arc<dyn KnowledgeSource>>,
    /// Max snippets any one source contributes to a merged result.
    per_source_cap: usize,
}

impl KnowledgeRouter {
    /// Build a router over the given sources. Sources are ordered by their
    /// declared priority rank; registration order breaks ties.
    pub fn new(mut sources: Vec<Arc<dyn KnowledgeSource>>, per_source_cap: usize) -> Self {
        sources.sort_by_key(|s| s.priority());
        Self {
            sources,
            per_source_cap: per_source_cap.max(1),
        }
    }

    /// Router over the six built-in sources.
    pub fn with_default_sources(per_source_cap: usize) -> Self {
        Self::new(
            vec![
                Arc::new(FaqSource::bootstrap()),
                Arc::new(HrDomainSource::bootstrap()),
                Arc::new(ComplianceSource::bootstrap()),
                Arc::new(BestPracticeSource::bootstrap()),
                Arc::new(LifecycleSource::bootstrap()),
                Arc::new(ScenarioSource::bootstrap()),
            ],
            per_source_cap,
        )
    }

    /// Query all sources and merge: per-source sort + cap, concatenated in
    /// priority order. Empty query or no match → empty vec.
    pub fn federated_search(&self, query: &str) -> Vec<KnowledgeSnippet> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let mut merged = Vec::new();
        for source in &self.sources {
            let mut hits = source.search(query);
            if hits.is_empty() {
                continue;
            }
            hits.sort_by(|a, b| {
                b.relevance
                    .partial_cmp(&a.relevance)
                    .unwrap_or(Ordering::Equal)
            });
            hits.truncate(self.per_source_cap);
            debug!(
                target: "copilot::knowledge",
                source = source.source_id(),
                contributed = hits.len(),
                "federated search contribution"
            );
            merged.extend(hits);
        }
        merged
    }

    /// Best overall hit for the query, if any.
    pub fn top_hit(&self, query: &str) -> Option<KnowledgeSnippet> {
        self.federated_search(query).into_iter().next()
    }
}
