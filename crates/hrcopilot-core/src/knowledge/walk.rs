//! Generic recursive search over a nested JSON knowledge structure.
//!
//! Relevance accumulates monotonically down a branch: every key on the path
//! that matches the query adds its increment, and a matching string leaf adds
//! its own on top. Descendants therefore always score at least as high as the
//! key trail above them, and an exact title hit beats a body-only hit.
//! List indices never contribute relevance.

use super::snippet::KnowledgeSnippet;
use serde_json::Value;

/// Query is a substring of a map key.
pub const KEY_MATCH_INCREMENT: f32 = 0.8;
/// Query equals a map key exactly (case-folded).
pub const KEY_EXACT_INCREMENT: f32 = 1.0;
/// Query is a substring of a string leaf.
pub const LEAF_MATCH_INCREMENT: f32 = 0.6;
/// Query equals a string leaf exactly (case-folded).
pub const LEAF_EXACT_INCREMENT: f32 = 0.8;

/// Walk `data` and emit one snippet per string leaf whose key or content
/// matches `query` (case-folded substring). The top-level keys of a root
/// object become snippet categories. Results are unsorted; ranking is the
/// router's job. An empty query returns no hits without traversing.
pub fn search_tree(source_id: &'static str, data: &Value, query: &str) -> Vec<KnowledgeSnippet> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    let mut out = Vec::new();
    match data {
        Value::Object(map) => {
            for (category, subtree) in map {
                let key_score = key_increment(category, &query);
                if let Value::String(leaf) = subtree {
                    let leaf_score = leaf_increment(leaf, &query);
                    if key_score > 0.0 || leaf_score > 0.0 {
                        out.push(KnowledgeSnippet {
                            source_id,
                            path: category.clone(),
                            title: Some(category.clone()),
                            body: leaf.clone(),
                            relevance: key_score + leaf_score,
                            category: Some(category.clone()),
                        });
                    }
                } else {
                    walk(
                        source_id,
                        subtree,
                        &query,
                        category,
                        key_score,
                        Some(category.as_str()),
                        Some(category.as_str()),
                        &mut out,
                    );
                }
            }
        }
        other => walk(source_id, other, &query, "", 0.0, None, None, &mut out),
    }
    out
}

/// Relevance contributed by one key, or 0.0 when it does not match.
fn key_increment(key: &str, query: &str) -> f32 {
    let key = key.to_lowercase();
    if key == *query {
        KEY_EXACT_INCREMENT
    } else if key.contains(query) {
        KEY_MATCH_INCREMENT
    } else {
        0.0
    }
}

/// Relevance contributed by a string leaf, or 0.0 when it does not match.
fn leaf_increment(leaf: &str, query: &str) -> f32 {
    let leaf = leaf.to_lowercase();
    if leaf == *query {
        LEAF_EXACT_INCREMENT
    } else if leaf.contains(query) {
        LEAF_MATCH_INCREMENT
    } else {
        0.0
    }
}

#[allow(clippy::too_many_arguments)]
fn walk(
    source_id: &'static str,
    node: &Value,
    query: &str,
    path: &str,
    carried: f32,
    last_key: Option<&str>,
    category: Option<&str>,
    out: &mut Vec<KnowledgeSnippet>,
) {
    match node {
        Value::Object(map) => {
            for (key, value) in map {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", path, key)
                };
                let key_score = key_increment(key, query);
                match value {
                    Value::String(leaf) => {
                        let leaf_score = leaf_increment(leaf, query);
                        // A key hit with a string value is itself an answer,
                        // even when the body does not repeat the query.
                        if key_score > 0.0 || leaf_score > 0.0 {
                            out.push(KnowledgeSnippet {
                                source_id,
                                path: child_path,
                                title: Some(key.clone()),
                                body: leaf.clone(),
                                relevance: carried + key_score + leaf_score,
                                category: category.map(String::from),
                            });
                        }
                    }
                    _ => walk(
                        source_id,
                        value,
                        query,
                        &child_path,
                        carried + key_score,
                        Some(key.as_str()),
                        category,
                        out,
                    ),
                }
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                let child_path = format!("{}[{}]", path, i);
                match item {
                    Value::String(leaf) => {
                        let leaf_score = leaf_increment(leaf, query);
                        if leaf_score > 0.0 {
                            out.push(KnowledgeSnippet {
                                source_id,
                                path: child_path,
                                title: last_key.map(String::from),
                                body: leaf.clone(),
                                relevance: carried + leaf_score,
                                category: category.map(String::from),
                            });
                        }
                    }
                    _ => walk(
                        source_id, item, query, &child_path, carried, last_key, category, out,
                    ),
                }
            }
        }
        Value::String(leaf) => {
            let leaf_score = leaf_increment(leaf, query);
            if leaf_score > 0.0 {
                out.push(KnowledgeSnippet {
                    source_id,
                    path: path.to_string(),
                    title: last_key.map(String::from),
                    body: leaf.clone(),
                    relevance: carried + leaf_score,
                    category: category.map(String::from),
                });
            }
        }
        // Numbers, booleans and nulls are not searchable content.
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scores(hits: &[KnowledgeSnippet]) -> Vec<f32> {
        hits.iter().map(|h| h.relevance).collect()
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let data = json!({"leave": {"annual": "12 days per year"}});
        assert!(search_tree("t", &data, "").is_empty());
        assert!(search_tree("t", &data, "   ").is_empty());
    }

    #[test]
    fn test_exact_title_beats_body_only() {
        let data = json!({
            "policies": {
                "overtime": "Approved overtime is paid at 1.5x.",
                "notes": "Ask HR about overtime approval."
            }
        });
        let hits = search_tree("t", &data, "overtime");
        let title_hit = hits.iter().find(|h| h.title.as_deref() == Some("overtime")).unwrap();
        let body_hit = hits.iter().find(|h| h.title.as_deref() == Some("notes")).unwrap();
        assert!(title_hit.relevance > body_hit.relevance);
        // Exact key (1.0) + body substring (0.6) vs body-only (0.6).
        assert!((title_hit.relevance - 1.6).abs() < 1e-5);
        assert!((body_hit.relevance - 0.6).abs() < 1e-5);
    }

    #[test]
    fn test_ancestor_key_relevance_carries_down() {
        let data = json!({
            "probation": {
                "duration": {
                    "standard": "Probation lasts three months."
                }
            }
        });
        let hits = search_tree("t", &data, "probation");
        assert_eq!(hits.len(), 1);
        // Category key exact (1.0) carried down + leaf substring (0.6).
        assert!((hits[0].relevance - 1.6).abs() < 1e-5);
        assert_eq!(hits[0].path, "probation.duration.standard");
        assert_eq!(hits[0].category.as_deref(), Some("probation"));
    }

    #[test]
    fn test_list_indices_do_not_score() {
        let data = json!({
            "steps": ["submit the resignation letter", "return all assets"]
        });
        let hits = search_tree("t", &data, "resignation");
        assert_eq!(hits.len(), 1);
        assert!((hits[0].relevance - 0.6).abs() < 1e-5);
        assert_eq!(hits[0].path, "steps[0]");
        assert_eq!(hits[0].title.as_deref(), Some("steps"));
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let data = json!({"a": {"b": ["c"]}, "n": 4});
        assert!(search_tree("t", &data, "zzz-no-match").is_empty());
    }

    #[test]
    fn test_sibling_keys_do_not_leak_relevance() {
        // Two sibling branches; a match under one must not inherit the other's
        // key score.
        let data = json!({
            "benefits": {
                "insurance": {"detail": "health insurance covers family"},
                "other": {"detail": "an unrelated note about insurance"}
            }
        });
        let hits = search_tree("t", &data, "insurance");
        let under_key = hits
            .iter()
            .find(|h| h.path == "benefits.insurance.detail")
            .unwrap();
        let body_only = hits.iter().find(|h| h.path == "benefits.other.detail").unwrap();
        assert!((under_key.relevance - 1.6).abs() < 1e-5); // exact key + leaf
        assert!((body_only.relevance - 0.6).abs() < 1e-5); // leaf only
        assert_eq!(scores(&hits).len(), 2);
    }
}
