//! Compliance source: working hours, data protection, leave regulation.

use super::snippet::KnowledgeSnippet;
use super::{bootstrap, walk, KnowledgeSource};
use serde_json::Value;

pub struct ComplianceSource {
    data: Value,
}

impl ComplianceSource {
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    pub fn bootstrap() -> Self {
        Self::new(bootstrap::compliance_data())
    }
}

impl KnowledgeSource for ComplianceSource {
    fn source_id(&self) -> &'static str {
        "compliance"
    }

    fn priority(&self) -> u8 {
        3
    }

    fn search(&self, query: &str) -> Vec<KnowledgeSnippet> {
        walk::search_tree(self.source_id(), &self.data, query)
    }
}
