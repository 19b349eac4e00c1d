//! Domain services: access control, equipment registry, repair queue, and
//! user administration.
//!
//! Role-gated operations take the acting [`User`](turfshop_core::model::User)
//! and check the capability table at this boundary. The services are the
//! trust boundary; the storage layer below trusts its caller.

mod access;
mod equipment;
mod repairs;
mod users;


pub use access::AccessControl;
pub use equipment::EquipmentRegistry;
pub use repairs::RepairQueue;
pub use users::UserAdmin;

use turfshop_core::Error;

use crate::storage::DatabaseError;

/// Lift a storage error into the core taxonomy.
pub(crate) fn map_db(e: DatabaseError) -> Error {
    match e {
        DatabaseError::NotFound(what) => Error::NotFound(what),
        other => Error::BackendUnavailable(other.to_string()),
    }
}
