//! Access-code login.
//!
//! A session is nothing more than the `User` value this service hands back;
//! logout is dropping it. No identity exists without a successful `login`.

use tracing::{info, instrument, warn};

use turfshop_core::error::{Error, Result};
use turfshop_core::model::User;
use turfshop_core::roles::Role;

use crate::storage::{DatabaseError, ShopDatabase};

/// Resolves access codes to user identities.
#[derive(Clone)]
pub struct AccessControl {
    db: ShopDatabase,
    fallback_code: String,
}

impl AccessControl {
    /// `fallback_code` is the superintendent code that still authenticates
    /// when the identity backend is unreachable (availability escape hatch).
    pub fn new(db: ShopDatabase, fallback_code: impl Into<String>) -> Self {
        Self {
            db,
            fallback_code: fallback_code.into(),
        }
    }

    /// Resolve an access code by exact match.
    ///
    /// No match is `AuthFailure` -- an account is never created implicitly.
    /// When the lookup itself fails, the configured fallback code still
    /// authenticates a synthetic superintendent so the shop is not locked
    /// out by a dead backend; any other code surfaces `BackendUnavailable`.
    #[instrument(skip(self, code))]
    pub async fn login(&self, code: &str) -> Result<User> {
        match self.db.get_user_by_code(code).await {
            Ok(user) => {
                info!(user_id = %user.id, role = %user.role, "User logged in");
                Ok(user)
            }
            Err(DatabaseError::NotFound(_)) => {
                warn!("Failed login attempt");
                Err(Error::AuthFailure)
            }
            Err(e) if code == self.fallback_code => {
                warn!(error = %e, "Identity backend unreachable; fallback superintendent code accepted");
                Ok(User {
                    id: "fallback-superintendent".to_owned(),
                    name: "Superintendent".to_owned(),
                    code: code.to_owned(),
                    role: Role::Superintendent,
                })
            }
            Err(e) => {
                warn!(error = %e, "Login lookup failed");
                Err(Error::BackendUnavailable(e.to_string()))
            }
        }
    }
}
