//! # Keja Core
//!
//! Domain entities, the tenant ledger, report aggregation, repository traits,
//! and the services that tie them together.

pub mod domain;
pub mod ledger;
pub mod reports;
pub mod services;
pub mod repositories;
pub mod error;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
