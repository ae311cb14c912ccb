use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchParams {
    /// The customer's question or search terms.
    pub query: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchKnowledgeBaseParams {
    /// The customer's question or search terms.
    pub query: String,
    /// Category to search: "faq", "troubleshooting" or "policy".
    pub category: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetDocumentParams {
    /// Category holding the document, e.g. "policy".
    pub category: String,
    /// Document ID such as "faq1", "ts5" or "pol1".
    pub id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListCategoryParams {
    /// Category to list: "faq", "troubleshooting" or "policy".
    pub category: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TriageParams {
    /// The customer's inquiry, passed to every crew stage.
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocumentHit {
    pub id: String,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SearchResponse {
    pub category: String,
    pub query: String,
    /// Matching documents, most relevant first (at most 3).
    pub documents: Vec<DocumentHit>,
    /// Plain-text rendering for agents, or a "not found" message.
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DocumentSummary {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryListResponse {
    pub category: String,
    pub document_count: usize,
    pub documents: Vec<DocumentSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CrewStageResult {
    pub role: String,
    pub results: Vec<SearchResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TriageResponse {
    pub query: String,
    pub stages: Vec<CrewStageResult>,
    /// True when the first-line support stage found at least one document.
    pub resolved_by_support: bool,
    /// True when the escalation stage found relevant policy documents.
    pub needs_escalation: bool,
}
