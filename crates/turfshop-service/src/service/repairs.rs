//! Repair queue engine: tickets, ordering, and equipment-status cascades.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use turfshop_core::db::unix_timestamp;
use turfshop_core::error::{Error, Result};
use turfshop_core::model::{
    EquipmentStatus, RepairStatus, RepairTicket, UNKNOWN_EQUIPMENT, UrgencyLevel, User,
};
use turfshop_core::queue;
use turfshop_core::roles::{Capability, authorize};

use crate::feed::{ChangeFeed, Collection};
use crate::storage::{DatabaseError, NewRepair, RepairPatch, ShopDatabase};

use super::map_db;

/// The repair queue service. Owns status transitions (and their equipment
/// cascades), priority edits, detail patches, and manual reordering.
#[derive(Clone)]
pub struct RepairQueue {
    db: ShopDatabase,
    feed: ChangeFeed,
    cache: Arc<RwLock<Option<Vec<RepairTicket>>>>,
}

impl RepairQueue {
    pub fn new(db: ShopDatabase, feed: ChangeFeed) -> Self {
        Self {
            db,
            feed,
            cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Report a new issue. Any user may report; the ticket starts Pending.
    ///
    /// An equipment id that no longer resolves is tolerated: the ticket is
    /// stored with a placeholder name rather than rejected.
    #[instrument(skip(self, issue, reporter), fields(reporter = %reporter.name))]
    pub async fn report(
        &self,
        equipment_id: &str,
        issue: &str,
        urgency: UrgencyLevel,
        reporter: &User,
    ) -> Result<RepairTicket> {
        let equipment_name = match self.db.get_equipment(equipment_id).await {
            Ok(asset) => asset.name,
            Err(DatabaseError::NotFound(_)) => {
                debug!(equipment_id, "Report references unknown equipment");
                UNKNOWN_EQUIPMENT.to_owned()
            }
            Err(e) => return Err(map_db(e)),
        };

        let ticket = self
            .db
            .create_repair(&NewRepair {
                id: Uuid::new_v4().to_string(),
                equipment_id: equipment_id.to_owned(),
                equipment_name,
                issue: issue.to_owned(),
                priority: urgency.priority(),
                reported_by: reporter.name.clone(),
                reported_at: unix_timestamp(),
            })
            .await
            .map_err(map_db)?;

        info!(repair_id = %ticket.id, "Repair reported");
        self.feed.publish(Collection::Repairs);
        Ok(ticket)
    }

    /// Full ticket snapshot, newest report first. Falls back to the last
    /// successful snapshot (read-only) when the backend is unreachable.
    pub async fn snapshot(&self) -> Result<Vec<RepairTicket>> {
        match self.db.list_repairs().await {
            Ok(tickets) => {
                *self.cache.write().await = Some(tickets.clone());
                Ok(tickets)
            }
            Err(e) => {
                if let Some(cached) = self.cache.read().await.clone() {
                    warn!(error = %e, "Repair list failed; serving cached snapshot");
                    Ok(cached)
                } else {
                    Err(map_db(e))
                }
            }
        }
    }

    /// Active tickets (Pending / In Progress) in queue order.
    pub async fn active_queue(&self) -> Result<Vec<RepairTicket>> {
        Ok(queue::active_queue(&self.snapshot().await?))
    }

    /// Completed tickets, newest report first.
    pub async fn completed_history(&self) -> Result<Vec<RepairTicket>> {
        Ok(queue::completed_history(&self.snapshot().await?))
    }

    /// Move a ticket between statuses, cascading the referenced equipment:
    /// Completed stamps the sign-off and drives the asset Operational,
    /// In Progress drives it In Repair, Pending cascades nothing. The
    /// cascade tolerates equipment that no longer exists.
    #[instrument(skip(self, actor), fields(actor = %actor.name))]
    pub async fn set_status(&self, id: &str, status: RepairStatus, actor: &User) -> Result<()> {
        authorize(actor, Capability::UpdateRepairStatus)?;

        let ticket = self.db.get_repair(id).await.map_err(map_db)?;

        match status {
            RepairStatus::Completed => {
                self.db
                    .complete_repair(id, &actor.name, unix_timestamp())
                    .await
                    .map_err(map_db)?;
                self.cascade(&ticket.equipment_id, EquipmentStatus::Operational)
                    .await?;
            }
            RepairStatus::InProgress => {
                self.db.set_repair_status(id, status).await.map_err(map_db)?;
                self.cascade(&ticket.equipment_id, EquipmentStatus::InRepair)
                    .await?;
            }
            RepairStatus::Pending => {
                self.db.set_repair_status(id, status).await.map_err(map_db)?;
            }
        }

        info!(repair_id = %id, status = %status, "Repair status updated");
        self.feed.publish(Collection::Repairs);
        Ok(())
    }

    async fn cascade(&self, equipment_id: &str, status: EquipmentStatus) -> Result<()> {
        // UPDATE on a deleted asset touches zero rows; the ticket simply
        // outlived its equipment.
        self.db
            .update_equipment_status(equipment_id, status)
            .await
            .map_err(map_db)?;
        self.feed.publish(Collection::Equipment);
        Ok(())
    }

    /// Set a ticket's numeric priority (1-10).
    #[instrument(skip(self, actor), fields(actor = %actor.name))]
    pub async fn set_priority(&self, id: &str, priority: i64, actor: &User) -> Result<()> {
        authorize(actor, Capability::EditPriority)?;

        if !(1..=10).contains(&priority) {
            return Err(Error::InvalidArgument(format!(
                "Priority {priority} outside 1-10"
            )));
        }

        self.db.set_repair_priority(id, priority).await.map_err(map_db)?;
        self.feed.publish(Collection::Repairs);
        Ok(())
    }

    /// Merge-patch mechanic notes, cost, and manual order. Ungated.
    pub async fn update_details(&self, id: &str, patch: &RepairPatch) -> Result<()> {
        self.db.update_repair_details(id, patch).await.map_err(map_db)?;
        self.feed.publish(Collection::Repairs);
        Ok(())
    }

    /// Append one inline attachment reference. Ungated, append-only.
    pub async fn attach_image(&self, id: &str, data_url: &str) -> Result<()> {
        self.db.append_repair_image(id, data_url).await.map_err(map_db)?;
        self.feed.publish(Collection::Repairs);
        Ok(())
    }

    /// Drag-reorder: move `moved_id` to `target_index` within the currently
    /// visible active queue, then persist `order = index` for every ticket
    /// in that list as one atomic batch so concurrent reorders cannot leave
    /// a half-applied assignment.
    #[instrument(skip(self, actor), fields(actor = %actor.name))]
    pub async fn reorder(&self, moved_id: &str, target_index: usize, actor: &User) -> Result<()> {
        authorize(actor, Capability::EditPriority)?;

        let visible = self.active_queue().await?;
        let plan = queue::plan_reorder(&visible, moved_id, target_index)
            .ok_or_else(|| Error::NotFound(format!("Repair {moved_id} not in active queue")))?;

        self.db.apply_queue_order(&plan).await.map_err(map_db)?;

        info!(repair_id = %moved_id, target_index, "Queue reordered");
        self.feed.publish(Collection::Repairs);
        Ok(())
    }
}
