pub mod config;
pub mod error;
pub mod evaluation;
pub mod sites;
pub mod telemetry;
