pub mod provider;

pub use provider::ModelProvider;
