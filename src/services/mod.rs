//! Business services: classification provider, cycle orchestration, tabular I/O

pub mod classifier;
pub mod orchestrator;
pub mod spreadsheet;
