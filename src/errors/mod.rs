pub mod types;

pub use types::CityScanError;
