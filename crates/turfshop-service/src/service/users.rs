//! Team management. Every operation here is gated on `ManageUsers`.

use tracing::{info, instrument, warn};
use uuid::Uuid;

use turfshop_core::error::{Error, Result};
use turfshop_core::model::User;
use turfshop_core::roles::{Capability, Role, authorize};

use crate::feed::{ChangeFeed, Collection};
use crate::storage::{DatabaseError, ShopDatabase};

use super::map_db;

/// User administration service.
#[derive(Clone)]
pub struct UserAdmin {
    db: ShopDatabase,
    feed: ChangeFeed,
}

impl UserAdmin {
    pub fn new(db: ShopDatabase, feed: ChangeFeed) -> Self {
        Self { db, feed }
    }

    /// List the team ordered by name. Callers without `ManageUsers` get a
    /// denial, never a listing.
    pub async fn list(&self, actor: &User) -> Result<Vec<User>> {
        authorize(actor, Capability::ManageUsers)?;
        self.db.list_users().await.map_err(map_db)
    }

    /// Add a team member. Access codes must be unique.
    #[instrument(skip(self, actor, code), fields(actor = %actor.name))]
    pub async fn create(&self, actor: &User, name: &str, code: &str, role: Role) -> Result<User> {
        authorize(actor, Capability::ManageUsers)?;

        if name.trim().is_empty() || code.trim().is_empty() {
            return Err(Error::InvalidArgument(
                "Name and access code are required".to_owned(),
            ));
        }

        match self.db.get_user_by_code(code).await {
            Ok(_) => {
                return Err(Error::InvalidArgument(
                    "Access code already in use".to_owned(),
                ));
            }
            Err(DatabaseError::NotFound(_)) => {}
            Err(e) => return Err(map_db(e)),
        }

        let id = Uuid::new_v4().to_string();
        let user = self
            .db
            .create_user(&id, name, code, role)
            .await
            .map_err(map_db)?;

        info!(user_id = %user.id, role = %user.role, "User created");
        self.feed.publish(Collection::Users);
        Ok(user)
    }

    /// Remove a team member. Deleting your own account is rejected.
    #[instrument(skip(self, actor), fields(actor = %actor.name))]
    pub async fn delete(&self, actor: &User, id: &str) -> Result<bool> {
        authorize(actor, Capability::ManageUsers)?;

        if actor.id == id {
            warn!(user_id = %id, "Refused self-deletion");
            return Err(Error::PermissionDenied(
                "You cannot delete your own account".to_owned(),
            ));
        }

        let removed = self.db.delete_user(id).await.map_err(map_db)?;
        if removed {
            info!(user_id = %id, "User deleted");
            self.feed.publish(Collection::Users);
        }
        Ok(removed)
    }
}
