//! Simulation runner: configuration, driver loop and reporting.

pub mod config;
pub mod driver;
pub mod report;

pub use config::SimulationConfig;
pub use driver::Simulation;
pub use report::SimulationReport;
