use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::crew;
use crate::model::Category;
use crate::search::SearchEngine;
use kb_common::mcp_api::{
    CategoryListResponse, DocumentHit, DocumentSummary, GetDocumentParams, ListCategoryParams,
    SearchKnowledgeBaseParams, SearchParams, SearchResponse, TriageParams, TriageResponse,
};

#[derive(Clone)]
pub struct SupportKbServer {
    search_engine: SearchEngine,
    tool_router: ToolRouter<SupportKbServer>,
}

impl SupportKbServer {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            search_engine: SearchEngine::new(catalog),
            tool_router: Self::tool_router(),
        }
    }

    fn search_category(&self, query: &str, category: Category) -> SearchResponse {
        let query = query.trim();
        let documents = self.search_engine.search(query, category);
        crew::to_search_response(query, category, documents)
    }
}

fn parse_category(name: &str) -> Result<Category, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("category must not be empty".to_string());
    }
    name.parse()
}

#[tool_router]
impl SupportKbServer {
    #[tool(description = "Search the FAQ knowledge base for answers to common customer questions \
        about returns, shipping, warranties, payments and accounts.")]
    async fn search_faqs(
        &self,
        Parameters(params): Parameters<SearchParams>,
    ) -> Result<Json<SearchResponse>, String> {
        Ok(Json(self.search_category(&params.query, Category::Faq)))
    }

    #[tool(description = "Search the troubleshooting guide for step-by-step solutions to device issues.")]
    async fn search_troubleshooting(
        &self,
        Parameters(params): Parameters<SearchParams>,
    ) -> Result<Json<SearchResponse>, String> {
        Ok(Json(self.search_category(&params.query, Category::Troubleshooting)))
    }

    #[tool(description = "Search company policies about refunds, warranty claims, escalations, \
        price matching and data privacy.")]
    async fn search_policies(
        &self,
        Parameters(params): Parameters<SearchParams>,
    ) -> Result<Json<SearchResponse>, String> {
        Ok(Json(self.search_category(&params.query, Category::Policy)))
    }

    #[tool(description = "Search one knowledge base category by name ('faq', 'troubleshooting' or 'policy'). \
        Unknown categories return no documents.")]
    async fn search_knowledge_base(
        &self,
        Parameters(params): Parameters<SearchKnowledgeBaseParams>,
    ) -> Result<Json<SearchResponse>, String> {
        let query = params.query.trim();
        match params.category.parse::<Category>() {
            Ok(category) => Ok(Json(self.search_category(query, category))),
            Err(message) => {
                warn!(query, category = %params.category, error = %message, "search against unknown category");
                Ok(Json(SearchResponse {
                    category: params.category.trim().to_string(),
                    query: query.to_string(),
                    documents: Vec::new(),
                    text: message,
                }))
            }
        }
    }

    #[tool(description = "Get a knowledge base document by category and ID (e.g. 'policy', 'pol1').")]
    async fn get_document(
        &self,
        Parameters(params): Parameters<GetDocumentParams>,
    ) -> Result<Json<DocumentHit>, String> {
        let category = parse_category(&params.category)?;
        let id = params.id.trim();
        if id.is_empty() {
            return Err("id must not be empty".to_string());
        }

        let doc = self
            .search_engine
            .catalog()
            .get(category, id)
            .ok_or_else(|| format!("document not found: {category}/{id}"))?;

        Ok(Json(DocumentHit {
            id: doc.id.clone(),
            title: doc.title.clone(),
            content: doc.content.clone(),
        }))
    }

    #[tool(description = "List every document in a knowledge base category, in catalog order.")]
    async fn list_category(
        &self,
        Parameters(params): Parameters<ListCategoryParams>,
    ) -> Result<Json<CategoryListResponse>, String> {
        let category = parse_category(&params.category)?;
        let documents: Vec<DocumentSummary> = self
            .search_engine
            .catalog()
            .documents(category)
            .iter()
            .map(|d| DocumentSummary {
                id: d.id.clone(),
                title: d.title.clone(),
            })
            .collect();

        Ok(Json(CategoryListResponse {
            category: category.to_string(),
            document_count: documents.len(),
            documents,
        }))
    }

    #[tool(description = "Run the support crew's searches for an inquiry: the Customer Support Agent \
        searches FAQs and troubleshooting guides, then the Escalation Specialist searches policies.")]
    async fn triage_inquiry(
        &self,
        Parameters(params): Parameters<TriageParams>,
    ) -> Result<Json<TriageResponse>, String> {
        let query = params.query.trim();
        let response = crew::triage(&self.search_engine, query);
        info!(
            query,
            resolved_by_support = response.resolved_by_support,
            needs_escalation = response.needs_escalation,
            "triage complete"
        );
        Ok(Json(response))
    }
}

#[tool_handler]
impl ServerHandler for SupportKbServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "support-kb".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(format!(
                "TechGadgets customer support knowledge base. Keyword search over FAQs, \
                 troubleshooting guides and company policies, returning up to 3 documents \
                 per search. Crew roles: {} Use triage_inquiry to run both stages at once, \
                 get_document and list_category for direct lookup.",
                crew::describe()
            )),
        }
    }
}
