//! Advanced HR scenario source: grievances, remote work, crisis handling.

use super::snippet::KnowledgeSnippet;
use super::{bootstrap, walk, KnowledgeSource};
use serde_json::Value;

pub struct ScenarioSource {
    data: Value,
}

impl ScenarioSource {
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    pub fn bootstrap() -> Self {
        Self::new(bootstrap::scenario_data())
    }
}

impl KnowledgeSource for ScenarioSource {
    fn source_id(&self) -> &'static str {
        "scenarios"
    }

    fn priority(&self) -> u8 {
        6
    }

    fn search(&self, query: &str) -> Vec<KnowledgeSnippet> {
        walk::search_tree(self.source_id(), &self.data, query)
    }
}
