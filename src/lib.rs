pub mod command;
pub mod config;
pub mod errors;
pub mod harness;
pub mod report;
pub mod scheduler;
pub mod stats;
pub mod timer;
pub mod types;
