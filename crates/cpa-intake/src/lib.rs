pub mod config;
pub mod error;
pub mod summary;
pub mod telemetry;
pub mod wizard;
