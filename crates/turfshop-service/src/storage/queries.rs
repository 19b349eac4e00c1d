//! User and equipment queries for the shop store.

use turfshop_core::db::unix_timestamp;
use turfshop_core::model::{Equipment, EquipmentKind, EquipmentStatus, User};
use turfshop_core::roles::Role;

use super::db::{DatabaseError, ShopDatabase};
use super::models::{EquipmentRow, UserRow};

/// Fields for a new inventory asset.
#[derive(Debug, Clone)]
pub struct NewEquipment {
    pub name: String,
    pub kind: EquipmentKind,
    pub department: String,
    pub serial: Option<String>,
    pub status: EquipmentStatus,
}

/// Merge-patch for an existing asset. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct EquipmentPatch {
    pub name: Option<String>,
    pub kind: Option<EquipmentKind>,
    pub department: Option<String>,
    pub serial: Option<String>,
    pub status: Option<EquipmentStatus>,
}

impl ShopDatabase {
    // =========================================================================
    // User queries
    // =========================================================================

    /// Create a new user. The access code is UNIQUE; a duplicate fails the
    /// insert.
    pub async fn create_user(
        &self,
        id: &str,
        name: &str,
        code: &str,
        role: Role,
    ) -> Result<User, DatabaseError> {
        let now = unix_timestamp();

        sqlx::query(
            "INSERT INTO users (id, name, code, role, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(name)
        .bind(code)
        .bind(role.to_string())
        .bind(now)
        .execute(self.pool())
        .await?;

        self.get_user(id).await
    }

    /// Get a user by ID.
    pub async fn get_user(&self, id: &str) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("User {id}")))?
            .try_into()
    }

    /// Look up a user by exact access-code match (the login query).
    pub async fn get_user_by_code(&self, code: &str) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE code = ?")
            .bind(code)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound("User with that access code".to_owned()))?
            .try_into()
    }

    /// List all users ordered by name.
    pub async fn list_users(&self) -> Result<Vec<User>, DatabaseError> {
        let rows = sqlx::query_as::<_, UserRow>("SELECT * FROM users ORDER BY name")
            .fetch_all(self.pool())
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Remove a user.
    pub async fn delete_user(&self, id: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count users (seed guard).
    pub async fn count_users(&self) -> Result<i64, DatabaseError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool())
            .await?;

        Ok(row.0)
    }

    // =========================================================================
    // Equipment queries
    // =========================================================================

    /// Create an inventory asset.
    pub async fn create_equipment(
        &self,
        id: &str,
        fields: &NewEquipment,
    ) -> Result<Equipment, DatabaseError> {
        let now = unix_timestamp();

        sqlx::query(
            "INSERT INTO equipment (id, name, kind, department, serial, status, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(&fields.name)
        .bind(fields.kind.to_string())
        .bind(&fields.department)
        .bind(&fields.serial)
        .bind(fields.status.to_string())
        .bind(now)
        .execute(self.pool())
        .await?;

        self.get_equipment(id).await
    }

    /// Get an asset by ID.
    pub async fn get_equipment(&self, id: &str) -> Result<Equipment, DatabaseError> {
        sqlx::query_as::<_, EquipmentRow>("SELECT * FROM equipment WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Equipment {id}")))?
            .try_into()
    }

    /// List all assets ordered by name.
    pub async fn list_equipment(&self) -> Result<Vec<Equipment>, DatabaseError> {
        let rows = sqlx::query_as::<_, EquipmentRow>("SELECT * FROM equipment ORDER BY name")
            .fetch_all(self.pool())
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Merge-patch an asset. Absent fields keep their current value.
    pub async fn update_equipment(
        &self,
        id: &str,
        patch: &EquipmentPatch,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            "UPDATE equipment SET \
             name = COALESCE(?, name), \
             kind = COALESCE(?, kind), \
             department = COALESCE(?, department), \
             serial = COALESCE(?, serial), \
             status = COALESCE(?, status) \
             WHERE id = ?",
        )
        .bind(&patch.name)
        .bind(patch.kind.map(|k| k.to_string()))
        .bind(&patch.department)
        .bind(&patch.serial)
        .bind(patch.status.map(|s| s.to_string()))
        .bind(id)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Set just the operational status (repair cascades).
    pub async fn update_equipment_status(
        &self,
        id: &str,
        status: EquipmentStatus,
    ) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE equipment SET status = ? WHERE id = ?")
            .bind(status.to_string())
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(())
    }

    /// Remove an asset. Unconditional: tickets referencing it are untouched
    /// and keep their name snapshot.
    pub async fn delete_equipment(&self, id: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query("DELETE FROM equipment WHERE id = ?")
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count assets (seed guard).
    pub async fn count_equipment(&self) -> Result<i64, DatabaseError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM equipment")
            .fetch_one(self.pool())
            .await?;

        Ok(row.0)
    }
}
