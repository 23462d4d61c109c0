pub mod audio;
pub mod character;
pub mod drafting;
pub mod script;
pub mod shared;
pub mod skit;
