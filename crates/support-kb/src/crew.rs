use kb_common::mcp_api::{CrewStageResult, DocumentHit, SearchResponse, TriageResponse};

use crate::model::{Category, Document};
use crate::search::{SearchEngine, format_results};

/// A member of the sequential support crew and the catalog categories its tools search.
#[derive(Debug, Clone, Copy)]
pub struct Role {
    pub name: &'static str,
    pub goal: &'static str,
    pub categories: &'static [Category],
}

pub const SUPPORT_AGENT: Role = Role {
    name: "Customer Support Agent",
    goal: "Resolve common questions and technical issues from FAQs and troubleshooting guides.",
    categories: &[Category::Faq, Category::Troubleshooting],
};

pub const ESCALATION_SPECIALIST: Role = Role {
    name: "Escalation Specialist",
    goal: "Research company policies for refunds, warranty claims and escalations.",
    categories: &[Category::Policy],
};

/// Stages in the order they run.
pub const CREW: [Role; 2] = [SUPPORT_AGENT, ESCALATION_SPECIALIST];

pub fn to_search_response(query: &str, category: Category, documents: Vec<Document>) -> SearchResponse {
    let text = format_results(category, &documents);
    SearchResponse {
        category: category.to_string(),
        query: query.to_string(),
        documents: documents
            .into_iter()
            .map(|d| DocumentHit {
                id: d.id,
                title: d.title,
                content: d.content,
            })
            .collect(),
        text,
    }
}

/// Runs every crew stage's searches for `query` in order.
pub fn triage(engine: &SearchEngine, query: &str) -> TriageResponse {
    let stages: Vec<CrewStageResult> = CREW
        .iter()
        .map(|role| CrewStageResult {
            role: role.name.to_string(),
            results: role
                .categories
                .iter()
                .map(|&category| to_search_response(query, category, engine.search(query, category)))
                .collect(),
        })
        .collect();

    let found = |role: &Role| {
        stages
            .iter()
            .find(|s| s.role == role.name)
            .is_some_and(|s| s.results.iter().any(|r| !r.documents.is_empty()))
    };

    TriageResponse {
        query: query.to_string(),
        resolved_by_support: found(&SUPPORT_AGENT),
        needs_escalation: found(&ESCALATION_SPECIALIST),
        stages,
    }
}

pub fn describe() -> String {
    CREW.iter()
        .map(|role| {
            let categories: Vec<&str> = role.categories.iter().map(|c| c.as_str()).collect();
            format!("{} ({}): {}", role.name, categories.join(", "), role.goal)
        })
        .collect::<Vec<_>>()
        .join(" ")
}
