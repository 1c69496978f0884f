pub mod classifier;
pub mod parser;
pub mod registry;

pub use classifier::ClassifierClient;
pub use registry::{definition, SpecialistDefinition, SPECIALISTS};
