//! Turfshop Core Library
//!
//! Shared functionality for Turfshop components:
//! - Domain model (users, equipment, repair tickets)
//! - Role/capability table and the authorization boundary
//! - Repair-queue ordering as pure functions over a snapshot
//! - Inline attachment (data URL) codec
//! - Configuration resolution and common error types

pub mod attachment;
pub mod config;
pub mod db;
pub mod error;
pub mod model;
pub mod queue;
pub mod roles;
pub mod tracing_init;

pub use config::Config;
pub use error::{Error, Result};
pub use model::{Equipment, EquipmentKind, EquipmentStatus, RepairStatus, RepairTicket, User};
pub use roles::{Capability, Role, authorize};
