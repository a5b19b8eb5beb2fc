//! Industry best-practice source: onboarding, feedback culture, career paths.

use super::snippet::KnowledgeSnippet;
use super::{bootstrap, walk, KnowledgeSource};
use serde_json::Value;

pub struct BestPracticeSource {
    data: Value,
}

impl BestPracticeSource {
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    pub fn bootstrap() -> Self {
        Self::new(bootstrap::best_practices_data())
    }
}

impl KnowledgeSource for BestPracticeSource {
    fn source_id(&self) -> &'static str {
        "best_practices"
    }

    fn priority(&self) -> u8 {
        4
    }

    fn search(&self, query: &str) -> Vec<KnowledgeSnippet> {
        walk::search_tree(self.source_id(), &self.data, query)
    }
}
