//! Equipment registry: inventory CRUD.
//!
//! Equipment mutation carries no role gate (any authenticated user may
//! manage inventory) and deletion is unconditional -- tickets referencing a
//! deleted asset keep their name snapshot. Status cascades are driven by the
//! repair queue, never from here.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use turfshop_core::error::Result;
use turfshop_core::model::{Equipment, RepairTicket};

use crate::feed::{ChangeFeed, Collection};
use crate::storage::{EquipmentPatch, NewEquipment, ShopDatabase};

use super::map_db;

/// Inventory service with a read-only cached snapshot for degraded mode.
#[derive(Clone)]
pub struct EquipmentRegistry {
    db: ShopDatabase,
    feed: ChangeFeed,
    cache: Arc<RwLock<Option<Vec<Equipment>>>>,
}

impl EquipmentRegistry {
    pub fn new(db: ShopDatabase, feed: ChangeFeed) -> Self {
        Self {
            db,
            feed,
            cache: Arc::new(RwLock::new(None)),
        }
    }

    /// List assets ordered by name. On backend failure the last successful
    /// snapshot is served read-only instead of failing the caller.
    pub async fn list(&self) -> Result<Vec<Equipment>> {
        match self.db.list_equipment().await {
            Ok(assets) => {
                *self.cache.write().await = Some(assets.clone());
                Ok(assets)
            }
            Err(e) => {
                if let Some(cached) = self.cache.read().await.clone() {
                    warn!(error = %e, "Equipment list failed; serving cached snapshot");
                    Ok(cached)
                } else {
                    Err(map_db(e))
                }
            }
        }
    }

    pub async fn get(&self, id: &str) -> Result<Equipment> {
        self.db.get_equipment(id).await.map_err(map_db)
    }

    /// Repair history for one asset, newest report first.
    pub async fn history(&self, id: &str) -> Result<Vec<RepairTicket>> {
        self.db.list_repairs_for_equipment(id).await.map_err(map_db)
    }

    #[instrument(skip(self, fields), fields(name = %fields.name))]
    pub async fn create(&self, fields: &NewEquipment) -> Result<Equipment> {
        let id = Uuid::new_v4().to_string();
        let asset = self.db.create_equipment(&id, fields).await.map_err(map_db)?;

        info!(equipment_id = %asset.id, "Equipment created");
        self.feed.publish(Collection::Equipment);
        Ok(asset)
    }

    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: &str, patch: &EquipmentPatch) -> Result<()> {
        self.db.update_equipment(id, patch).await.map_err(map_db)?;
        self.feed.publish(Collection::Equipment);
        Ok(())
    }

    /// Delete an asset. No referential check against open repairs.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let removed = self.db.delete_equipment(id).await.map_err(map_db)?;
        if removed {
            info!(equipment_id = %id, "Equipment deleted");
            self.feed.publish(Collection::Equipment);
        }
        Ok(removed)
    }
}
