//! Typed search hit returned by every knowledge source.

use serde::Serialize;

/// One retrieved piece of knowledge with provenance and a computed relevance.
///
/// `relevance` is comparable only within a single source: exact title match >
/// partial title match > body-only match. Cross-source ordering is decided by
/// the router's source priority, never by comparing raw scores across sources.
#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeSnippet {
    /// Identifier of the source that produced this hit.
    pub source_id: &'static str,
    /// Locator within the source's nested structure (e.g. `leave_policy.annual[1]`).
    pub path: String,
    /// The question or nearest key the hit was found under, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// The matched content itself.
    pub body: String,
    /// Accumulated relevance along the path (see `knowledge::walk`).
    pub relevance: f32,
    /// Top-level category within the source, when the source is categorized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl KnowledgeSnippet {
    /// Short label for suggestion lists: the title when present, else a body
    /// prefix.
    pub fn label(&self) -> String {
        match &self.title {
            Some(t) => t.clone(),
            None => {
                let mut s: String = self.body.chars().take(60).collect();
                if s.len() < self.body.len() {
                    s.push('…');
                }
                s
            }
        }
    }
}
