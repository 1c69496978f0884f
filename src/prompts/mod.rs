pub mod loader;
pub mod templates;

pub use loader::PromptSet;
