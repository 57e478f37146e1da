//! Data models and structures for the DAG simulator

pub mod config;
pub mod insights;
pub mod number;
pub mod params;
pub mod results;

// Re-export main model types
pub use config::{Config, InsightThresholds};
pub use insights::Insights;
pub use number::RecordNumber;
pub use params::SimulationParams;
pub use results::{SimulationReport, SimulationResults};
