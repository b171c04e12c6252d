//! # Keja API
//!
//! HTTP handlers, DTOs, the response envelope, bearer-token sessions and the
//! router.

pub mod auth;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod response;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::{AppState, Repositories};

#[cfg(test)]
mod tests;
