//! Turfshop service layer.
//!
//! Wires the domain model from `turfshop-core` to a SQLite store and exposes
//! the four domain services: access control, equipment registry, repair
//! queue, and user administration. Mutations publish on a broadcast change
//! feed; readers pull fresh snapshots and degrade to cached ones when the
//! backend is unreachable.

pub mod feed;
pub mod seed;
pub mod service;
pub mod storage;

pub use feed::{ChangeEvent, ChangeFeed, Collection};
pub use service::{AccessControl, EquipmentRegistry, RepairQueue, UserAdmin};
pub use storage::ShopDatabase;
