use std::sync::Arc;

use serde_json::json;
use tracing::{debug, field, info_span};

use crate::catalog::Catalog;
use crate::model::{Category, Document};

pub const MAX_RESULTS: usize = 3;

const RESULT_SEPARATOR: &str = "\n\n---\n\n";

struct ScoredMatch<'a> {
    doc: &'a Document,
    score: usize,
}

/// Keyword search over the immutable catalog. Each call opens a
/// `{category}_retrieval` span describing the query and its results.
#[derive(Clone)]
pub struct SearchEngine {
    catalog: Arc<Catalog>,
}

impl SearchEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn search(&self, query: &str, category: Category) -> Vec<Document> {
        let span = info_span!(
            "retrieval",
            otel.name = %format!("{category}_retrieval"),
            db.operation = "query",
            db.system = "knowledge_base",
            retrieval.document_type = %category,
            retrieval.query_type = "keyword",
            gen_ai.input.messages = %json!([{ "role": "user", "content": query }]),
            retrieval.num_results = field::Empty,
            retrieval.result_ids = field::Empty,
            gen_ai.output.messages = field::Empty,
        );
        let _guard = span.enter();

        let results: Vec<Document> = rank(query, self.catalog.documents(category))
            .into_iter()
            .cloned()
            .collect();

        let ids: Vec<&str> = results.iter().map(|d| d.id.as_str()).collect();
        let retrieved: Vec<_> = results
            .iter()
            .map(|d| json!({ "content": d.content, "metadata": { "title": d.title, "id": d.id } }))
            .collect();
        span.record("retrieval.num_results", results.len() as u64);
        span.record("retrieval.result_ids", ids.join(",").as_str());
        span.record(
            "gen_ai.output.messages",
            json!([{ "role": "assistant", "content": retrieved }])
                .to_string()
                .as_str(),
        );
        debug!(query, %category, results = results.len(), "keyword search complete");

        results
    }
}

/// Number of query terms found anywhere in the document's lowercased title and
/// content. Terms may match inside longer words.
pub fn score(terms: &[String], doc: &Document) -> usize {
    let text = format!("{} {}", doc.title, doc.content).to_lowercase();
    terms.iter().filter(|t| text.contains(t.as_str())).count()
}

pub fn query_terms(query: &str) -> Vec<String> {
    query.to_lowercase().split_whitespace().map(str::to_string).collect()
}

/// Top `MAX_RESULTS` documents by term overlap. Zero-score documents are
/// dropped and equal scores keep catalog order.
pub fn rank<'a>(query: &str, documents: &'a [Document]) -> Vec<&'a Document> {
    let terms = query_terms(query);
    if terms.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<ScoredMatch<'a>> = documents
        .iter()
        .map(|doc| ScoredMatch {
            doc,
            score: score(&terms, doc),
        })
        .filter(|m| m.score > 0)
        .collect();

    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches.truncate(MAX_RESULTS);
    matches.into_iter().map(|m| m.doc).collect()
}

/// Plain-text rendering handed back to agents.
pub fn format_results(category: Category, documents: &[Document]) -> String {
    if documents.is_empty() {
        return category.no_match_message().to_string();
    }
    documents
        .iter()
        .map(|d| format!("**{}**\n{}", d.title, d.content))
        .collect::<Vec<_>>()
        .join(RESULT_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> SearchEngine {
        SearchEngine::new(Arc::new(Catalog::builtin()))
    }

    fn ids(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(|d| d.id.as_str()).collect()
    }

    fn doc(id: &str, title: &str, content: &str) -> Document {
        Document {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_results_never_exceed_limit() {
        let engine = engine();
        for category in Category::ALL {
            for query in ["step", "the a of", "support contact device", "e"] {
                assert!(engine.search(query, category).len() <= MAX_RESULTS);
            }
        }
        assert_eq!(engine.search("step", Category::Troubleshooting).len(), 3);
    }

    #[test]
    fn test_scores_are_non_increasing() {
        let engine = engine();
        let query = "battery charging device screen";
        let terms = query_terms(query);
        let results = engine.search(query, Category::Troubleshooting);
        assert!(!results.is_empty());
        let scores: Vec<usize> = results.iter().map(|d| score(&terms, d)).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{scores:?}");
    }

    #[test]
    fn test_search_is_idempotent() {
        let engine = engine();
        let first = engine.search("warranty claim refund", Category::Policy);
        let second = engine.search("warranty claim refund", Category::Policy);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_query_returns_nothing() {
        let engine = engine();
        for category in Category::ALL {
            assert!(engine.search("", category).is_empty());
            assert!(engine.search("   \t\n", category).is_empty());
        }
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let documents = vec![
            doc("a", "Alpha", "shared term"),
            doc("b", "Beta", "shared term and more"),
            doc("c", "Gamma", "unrelated"),
            doc("d", "Delta", "shared term"),
        ];
        let ranked: Vec<&str> = rank("shared", &documents).iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ranked, vec!["a", "b", "d"]);
    }

    #[test]
    fn test_higher_overlap_ranks_first() {
        let results = engine().search("wireless charging", Category::Troubleshooting);
        assert_eq!(results[0].id, "ts5");
        assert!(ids(&results).contains(&"ts1"));
    }

    #[test]
    fn test_device_charging_matches_both_guides() {
        // ts1 mentions "charging cable", so both guides score 2 and keep catalog order.
        let results = engine().search("device charging", Category::Troubleshooting);
        assert_eq!(ids(&results)[..2], ["ts1", "ts5"]);
        let terms = query_terms("device charging");
        assert_eq!(score(&terms, &results[0]), score(&terms, &results[1]));
    }

    #[test]
    fn test_refund_finds_refund_process_first() {
        let results = engine().search("refund", Category::Policy);
        assert_eq!(results[0].title, "Refund Process");
    }

    #[test]
    fn test_unmatched_term_returns_nothing() {
        let engine = engine();
        for category in Category::ALL {
            assert!(engine.search("xyzzy", category).is_empty());
        }
    }

    #[test]
    fn test_query_is_case_insensitive() {
        let engine = engine();
        assert_eq!(
            engine.search("BLUETOOTH", Category::Troubleshooting),
            engine.search("bluetooth", Category::Troubleshooting)
        );
        assert_eq!(engine.search("BLUETOOTH", Category::Troubleshooting)[0].id, "ts2");
    }

    #[test]
    fn test_terms_match_inside_words() {
        let documents = vec![doc("x", "Support", "nothing else")];
        assert_eq!(rank("port", &documents).len(), 1);
    }

    #[test]
    fn test_duplicate_terms_count_twice() {
        let documents = vec![
            doc("one", "Screen", "display"),
            doc("two", "Battery", "battery"),
        ];
        let ranked: Vec<&str> = rank("screen battery battery", &documents)
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(ranked, vec!["two", "one"]);
    }

    #[test]
    fn test_format_results() {
        let results = engine().search("refund", Category::Policy);
        let text = format_results(Category::Policy, &results);
        assert!(text.starts_with("**Refund Process**\nRefunds are processed"));

        let two = vec![doc("a", "A", "first"), doc("b", "B", "second")];
        assert_eq!(
            format_results(Category::Faq, &two),
            "**A**\nfirst\n\n---\n\n**B**\nsecond"
        );
    }

    #[test]
    fn test_format_empty_results() {
        assert_eq!(
            format_results(Category::Troubleshooting, &[]),
            "No relevant troubleshooting guides found for this issue."
        );
    }
}
