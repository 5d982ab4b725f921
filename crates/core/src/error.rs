/// Domain error shared by every operation in `intake_core`.
///
/// Every failure is a rejected local operation: the aggregate it was applied
/// to is left untouched.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(#[from] serde_json::Error),
}

impl CoreError {
    pub(crate) fn not_found(entity: &'static str, id: &str) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
