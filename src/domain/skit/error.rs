use crate::domain::audio::AudioError;
use crate::domain::character::RegistryError;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum SkitServiceError {
    /// Rejected before any backend call
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    /// A synthesis or generation call failed or returned nothing usable
    #[error("{0}")]
    Backend(String),
    /// Nothing survived per-line synthesis, or the audio could not be encoded
    #[error("{0}")]
    Assembly(String),
}

impl From<RegistryError> for SkitServiceError {
    fn from(err: RegistryError) -> Self {
        SkitServiceError::Validation(err.to_string())
    }
}

impl From<AudioError> for SkitServiceError {
    fn from(err: AudioError) -> Self {
        SkitServiceError::Assembly(format!("Failed to assemble audio: {}", err))
    }
}

impl From<SkitServiceError> for AppError {
    fn from(err: SkitServiceError) -> Self {
        match err {
            SkitServiceError::Validation(msg) => AppError::BadRequest(msg),
            SkitServiceError::PayloadTooLarge(msg) => AppError::PayloadTooLarge(msg),
            SkitServiceError::Backend(msg) | SkitServiceError::Assembly(msg) => {
                AppError::ExternalService(msg)
            }
        }
    }
}
