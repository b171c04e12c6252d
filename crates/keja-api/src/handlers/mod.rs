//! HTTP handlers

pub mod health;
pub mod properties;
pub mod units;
pub mod tenants;
pub mod payments;
pub mod reports;
pub mod maintenance;
pub mod profile;
