//! Curated FAQ source: structured Q&A entries with keyword lists.
//!
//! Unlike the tree-walk sources, the FAQ scores whole entries: a keyword hit
//! counts most, a question hit less, an answer-body hit least. This keeps
//! hand-curated phrasing ahead of incidental body matches.

use super::bootstrap;
use super::snippet::KnowledgeSnippet;
use super::KnowledgeSource;
use serde::{Deserialize, Serialize};

/// Keyword list hit.
const KEYWORD_SCORE: f32 = 3.0;
/// Query appears in the question.
const QUESTION_SCORE: f32 = 2.0;
/// Query appears in the answer body.
const ANSWER_SCORE: f32 = 1.0;

/// One curated question/answer pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub id: String,
    pub category: String,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Highest-trust knowledge source; entries are loaded once and read-only.
pub struct FaqSource {
    entries: Vec<FaqEntry>,
}

impl FaqSource {
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        Self { entries }
    }

    /// Source seeded with the built-in FAQ content.
    pub fn bootstrap() -> Self {
        Self::new(bootstrap::faq_entries())
    }

    fn score(entry: &FaqEntry, query: &str) -> f32 {
        let mut score = 0.0;
        if entry
            .keywords
            .iter()
            .any(|k| query.contains(&k.to_lowercase()))
        {
            score += KEYWORD_SCORE;
        }
        if entry.question.to_lowercase().contains(query) {
            score += QUESTION_SCORE;
        }
        if entry.answer.to_lowercase().contains(query) {
            score += ANSWER_SCORE;
        }
        score
    }
}

impl KnowledgeSource for FaqSource {
    fn source_id(&self) -> &'static str {
        "faq"
    }

    fn priority(&self) -> u8 {
        1
    }

    fn search(&self, query: &str) -> Vec<KnowledgeSnippet> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter_map(|entry| {
                let relevance = Self::score(entry, &query);
                if relevance <= 0.0 {
                    return None;
                }
                Some(KnowledgeSnippet {
                    source_id: self.source_id(),
                    path: entry.id.clone(),
                    title: Some(entry.question.clone()),
                    body: entry.answer.clone(),
                    relevance,
                    category: Some(entry.category.clone()),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, question: &str, answer: &str, keywords: &[&str]) -> FaqEntry {
        FaqEntry {
            id: id.into(),
            category: "test".into(),
            question: question.into(),
            answer: answer.into(),
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_keyword_beats_question_beats_answer() {
        let source = FaqSource::new(vec![
            entry("kw", "Something else entirely", "No overlap here", &["slip gaji"]),
            entry("q", "Bagaimana slip gaji diakses?", "Lewat portal.", &[]),
            entry("a", "Pertanyaan lain", "Unduh slip gaji dari portal.", &[]),
        ]);
        let hits = source.search("slip gaji");
        let get = |id: &str| hits.iter().find(|h| h.path == id).unwrap().relevance;
        assert!(get("kw") > get("q"));
        assert!(get("q") > get("a"));
    }

    #[test]
    fn test_empty_query_short_circuits() {
        let source = FaqSource::bootstrap();
        assert!(source.search("").is_empty());
    }

    #[test]
    fn test_no_match_returns_empty() {
        let source = FaqSource::bootstrap();
        assert!(source.search("kwyjibo").is_empty());
    }
}
