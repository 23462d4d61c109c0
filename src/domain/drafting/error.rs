use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum DraftingServiceError {
    #[error("{0}")]
    Validation(String),
    /// The text generation call itself failed
    #[error("{0}")]
    Backend(String),
    /// The model answered, but not with a usable script
    #[error("{0}")]
    Drafting(String),
    /// The suggested voice is not in the catalog
    #[error("{0}")]
    Catalog(String),
}

impl From<DraftingServiceError> for AppError {
    fn from(err: DraftingServiceError) -> Self {
        match err {
            DraftingServiceError::Validation(msg) => AppError::BadRequest(msg),
            DraftingServiceError::Backend(msg)
            | DraftingServiceError::Drafting(msg)
            | DraftingServiceError::Catalog(msg) => AppError::ExternalService(msg),
        }
    }
}
