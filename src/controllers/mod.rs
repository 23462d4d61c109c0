pub mod health;
pub mod script;
pub mod skit;
pub mod voice;
