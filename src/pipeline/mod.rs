pub mod aggregator;
pub mod orchestrator;

pub use aggregator::compute_cumulative_severity;
pub use orchestrator::Orchestrator;
