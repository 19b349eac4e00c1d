//! Storage layer: SQLite document store for users, equipment, and repairs.

mod db;
mod models;
mod queries;
mod queries_repairs;


pub use db::{DatabaseError, ShopDatabase};
pub use models::{EquipmentRow, RepairRow, UserRow};
pub use queries::{EquipmentPatch, NewEquipment};
pub use queries_repairs::{NewRepair, RepairPatch};
