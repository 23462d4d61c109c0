pub mod error;
pub mod model;
pub mod prompt;
pub mod service;

pub use error::DraftingServiceError;
pub use model::TextModel;
pub use prompt::RosterEntry;
pub use service::{ScriptDraftingService, ScriptDraftingServiceApi, TextRepositories};
