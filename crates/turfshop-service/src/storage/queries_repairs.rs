//! Repair-ticket queries for the shop store.

use turfshop_core::model::{RepairStatus, RepairTicket};

use super::db::{DatabaseError, ShopDatabase};
use super::models::RepairRow;

/// Fields stamped into a new ticket at report time.
#[derive(Debug, Clone)]
pub struct NewRepair {
    pub id: String,
    pub equipment_id: String,
    /// Name snapshot; "Unknown Equipment" when the id did not resolve.
    pub equipment_name: String,
    pub issue: String,
    pub priority: i64,
    pub reported_by: String,
    pub reported_at: i64,
}

/// Merge-patch for ticket details. `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct RepairPatch {
    pub notes: Option<String>,
    pub cost: Option<f64>,
    pub order: Option<i64>,
}

impl ShopDatabase {
    /// Insert a new ticket with status Pending.
    pub async fn create_repair(&self, fields: &NewRepair) -> Result<RepairTicket, DatabaseError> {
        sqlx::query(
            "INSERT INTO repairs \
             (id, equipment_id, equipment_name, issue, priority, status, reported_by, reported_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&fields.id)
        .bind(&fields.equipment_id)
        .bind(&fields.equipment_name)
        .bind(&fields.issue)
        .bind(fields.priority)
        .bind(RepairStatus::Pending.to_string())
        .bind(&fields.reported_by)
        .bind(fields.reported_at)
        .execute(self.pool())
        .await?;

        self.get_repair(&fields.id).await
    }

    /// Get a ticket by ID.
    pub async fn get_repair(&self, id: &str) -> Result<RepairTicket, DatabaseError> {
        sqlx::query_as::<_, RepairRow>("SELECT * FROM repairs WHERE id = ?")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or_else(|| DatabaseError::NotFound(format!("Repair {id}")))?
            .try_into()
    }

    /// List all tickets, newest report first.
    pub async fn list_repairs(&self) -> Result<Vec<RepairTicket>, DatabaseError> {
        let rows =
            sqlx::query_as::<_, RepairRow>("SELECT * FROM repairs ORDER BY reported_at DESC")
                .fetch_all(self.pool())
                .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Tickets referencing one asset, newest report first.
    pub async fn list_repairs_for_equipment(
        &self,
        equipment_id: &str,
    ) -> Result<Vec<RepairTicket>, DatabaseError> {
        let rows = sqlx::query_as::<_, RepairRow>(
            "SELECT * FROM repairs WHERE equipment_id = ? ORDER BY reported_at DESC",
        )
        .bind(equipment_id)
        .fetch_all(self.pool())
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Set a ticket's status without completion stamps.
    pub async fn set_repair_status(
        &self,
        id: &str,
        status: RepairStatus,
    ) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE repairs SET status = ? WHERE id = ?")
            .bind(status.to_string())
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(())
    }

    /// Mark a ticket Completed with the sign-off stamps.
    pub async fn complete_repair(
        &self,
        id: &str,
        completed_by: &str,
        completed_at: i64,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            "UPDATE repairs SET status = ?, completed_by = ?, completed_at = ? WHERE id = ?",
        )
        .bind(RepairStatus::Completed.to_string())
        .bind(completed_by)
        .bind(completed_at)
        .bind(id)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Set a ticket's numeric priority.
    pub async fn set_repair_priority(&self, id: &str, priority: i64) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE repairs SET priority = ? WHERE id = ?")
            .bind(priority)
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(())
    }

    /// Merge-patch notes, cost, and manual order.
    pub async fn update_repair_details(
        &self,
        id: &str,
        patch: &RepairPatch,
    ) -> Result<(), DatabaseError> {
        sqlx::query(
            "UPDATE repairs SET \
             notes = COALESCE(?, notes), \
             cost = COALESCE(?, cost), \
             sort_order = COALESCE(?, sort_order) \
             WHERE id = ?",
        )
        .bind(&patch.notes)
        .bind(patch.cost)
        .bind(patch.order)
        .bind(id)
        .execute(self.pool())
        .await?;

        Ok(())
    }

    /// Append one attachment reference to a ticket's image list.
    pub async fn append_repair_image(&self, id: &str, url: &str) -> Result<(), DatabaseError> {
        let ticket = self.get_repair(id).await?;
        let mut images = ticket.images;
        images.push(url.to_owned());
        let encoded = serde_json::to_string(&images)
            .map_err(|e| DatabaseError::Query(format!("Encoding images column: {e}")))?;

        sqlx::query("UPDATE repairs SET images = ? WHERE id = ?")
            .bind(encoded)
            .bind(id)
            .execute(self.pool())
            .await?;

        Ok(())
    }

    /// Persist a manual-order assignment for the whole visible queue in one
    /// transaction, so concurrent reorders cannot interleave a half-applied
    /// assignment.
    pub async fn apply_queue_order(
        &self,
        assignments: &[(String, i64)],
    ) -> Result<(), DatabaseError> {
        let mut tx = self.pool().begin().await?;

        for (id, order) in assignments {
            sqlx::query("UPDATE repairs SET sort_order = ? WHERE id = ?")
                .bind(order)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
