//! Employee lifecycle source: probation, transfers, resignation.

use super::snippet::KnowledgeSnippet;
use super::{bootstrap, walk, KnowledgeSource};
use serde_json::Value;

pub struct LifecycleSource {
    data: Value,
}

impl LifecycleSource {
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    pub fn bootstrap() -> Self {
        Self::new(bootstrap::lifecycle_data())
    }
}

impl KnowledgeSource for LifecycleSource {
    fn source_id(&self) -> &'static str {
        "lifecycle"
    }

    fn priority(&self) -> u8 {
        5
    }

    fn search(&self, query: &str) -> Vec<KnowledgeSnippet> {
        walk::search_tree(self.source_id(), &self.data, query)
    }
}
