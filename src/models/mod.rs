pub mod classifier;
pub mod image_input;
pub mod report;

pub use classifier::*;
pub use image_input::ImageInput;
pub use report::AggregateReport;
