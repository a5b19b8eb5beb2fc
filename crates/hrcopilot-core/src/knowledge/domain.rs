//! HR domain reference source: compensation, performance, org structure.

use super::snippet::KnowledgeSnippet;
use super::{bootstrap, walk, KnowledgeSource};
use serde_json::Value;

pub struct HrDomainSource {
    data: Value,
}

impl HrDomainSource {
    pub fn new(data: Value) -> Self {
        Self { data }
    }

    pub fn bootstrap() -> Self {
        Self::new(bootstrap::hr_domain_data())
    }
}

impl KnowledgeSource for HrDomainSource {
    fn source_id(&self) -> &'static str {
        "hr_domain"
    }

    fn priority(&self) -> u8 {
        2
    }

    fn search(&self, query: &str) -> Vec<KnowledgeSnippet> {
        walk::search_tree(self.source_id(), &self.data, query)
    }
}
