//! # Keja Core - Domain Module
//!
//! Typed records for every persisted entity plus the request context.

pub mod money;
pub mod session;
pub mod property;
pub mod unit;
pub mod tenant;
pub mod payment;
pub mod profile;
pub mod maintenance;
mod validation;

// Re-export all entities and enums
pub use money::Money;
pub use session::Session;
pub use property::{Property, PropertyDraft, UnitDraft};
pub use unit::{Unit, UnitStatus, UnitOccupancy};
pub use tenant::{Tenant, TenantRecord, TenantContact};
pub use payment::{Payment, PaymentMethod, PaymentEntry};
pub use profile::{Profile, ProfileUpdate};
pub use maintenance::{MaintenanceRequest, MaintenanceStatus, MaintenanceEntry};
