/// Error types shared across knowledge-base crates.
///
/// These cover loading and validating document catalogs from external sources.
/// Server crates define their own application errors and wrap `CommonError`
/// via `#[from]`.

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("catalog io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("catalog json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate document id '{id}' in category '{category}'")]
    DuplicateId { category: String, id: String },

    #[error("empty document id in category '{category}'")]
    EmptyId { category: String },
}
