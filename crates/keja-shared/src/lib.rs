//! # Keja Shared
//!
//! Configuration, telemetry and constants shared by every Keja crate.

pub mod constants;
pub mod telemetry;
pub mod config;
pub mod error;

pub use error::AppError;
