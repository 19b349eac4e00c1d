//! Row types for the shop store.
//!
//! Rows keep enum columns as TEXT and the image list as a JSON column;
//! conversion into the domain types parses both and fails as a query error
//! so a corrupt row never panics the service.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use turfshop_core::model::{Equipment, RepairTicket, User};
use turfshop_core::roles::Role;

use super::db::DatabaseError;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub code: String,
    pub role: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EquipmentRow {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub department: String,
    pub serial: Option<String>,
    pub status: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RepairRow {
    pub id: String,
    pub equipment_id: String,
    pub equipment_name: String,
    pub issue: String,
    pub priority: i64,
    pub status: String,
    pub reported_by: String,
    pub reported_at: i64,
    pub completed_by: Option<String>,
    pub completed_at: Option<i64>,
    pub notes: Option<String>,
    pub cost: Option<f64>,
    /// JSON array of data URLs.
    pub images: String,
    pub sort_order: Option<i64>,
}

fn decode<T: FromStr>(column: &str, value: &str) -> Result<T, DatabaseError> {
    value
        .parse()
        .map_err(|_| DatabaseError::Query(format!("Corrupt {column} column: {value}")))
}

impl TryFrom<UserRow> for User {
    type Error = DatabaseError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            role: decode::<Role>("role", &row.role)?,
            id: row.id,
            name: row.name,
            code: row.code,
        })
    }
}

impl TryFrom<EquipmentRow> for Equipment {
    type Error = DatabaseError;

    fn try_from(row: EquipmentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            kind: decode("kind", &row.kind)?,
            status: decode("status", &row.status)?,
            id: row.id,
            name: row.name,
            department: row.department,
            serial: row.serial,
        })
    }
}

impl TryFrom<RepairRow> for RepairTicket {
    type Error = DatabaseError;

    fn try_from(row: RepairRow) -> Result<Self, Self::Error> {
        let images: Vec<String> = serde_json::from_str(&row.images)
            .map_err(|e| DatabaseError::Query(format!("Corrupt images column: {e}")))?;
        Ok(Self {
            status: decode("status", &row.status)?,
            id: row.id,
            equipment_id: row.equipment_id,
            equipment_name: row.equipment_name,
            issue: row.issue,
            priority: row.priority,
            reported_by: row.reported_by,
            reported_at: row.reported_at,
            completed_by: row.completed_by,
            completed_at: row.completed_at,
            notes: row.notes,
            cost: row.cost,
            images,
            order: row.sort_order,
        })
    }
}
