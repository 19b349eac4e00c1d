//! Role and capability table.
//!
//! Every role-gated operation goes through [`authorize`] so the mapping from
//! role to permitted actions lives in exactly one place instead of scattered
//! per-call checks.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::model::User;

/// Staff role resolved from an access code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Standard staff. Can report issues and browse, nothing else.
    Employee,
    /// Shop mechanic. Works the queue.
    Mechanic,
    /// Assistant superintendent. Works the queue.
    Assistant,
    /// Superintendent. Full access including team management.
    Superintendent,
}

/// An action a role may or may not be allowed to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Change a ticket's priority or drag-reorder the queue.
    EditPriority,
    /// Move a ticket between Pending / In Progress / Completed.
    UpdateRepairStatus,
    /// List, create, and delete team members.
    ManageUsers,
}

impl Role {
    /// Static capability table.
    ///
    /// | Role           | EditPriority | UpdateRepairStatus | ManageUsers |
    /// |----------------|--------------|--------------------|-------------|
    /// | Employee       | no           | no                 | no          |
    /// | Mechanic       | yes          | yes                | no          |
    /// | Assistant      | yes          | yes                | no          |
    /// | Superintendent | yes          | yes                | yes         |
    pub const fn allows(self, capability: Capability) -> bool {
        match capability {
            Capability::EditPriority | Capability::UpdateRepairStatus => {
                matches!(self, Self::Mechanic | Self::Assistant | Self::Superintendent)
            }
            Capability::ManageUsers => matches!(self, Self::Superintendent),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Employee => "Employee",
            Self::Mechanic => "Mechanic",
            Self::Assistant => "Assistant",
            Self::Superintendent => "Superintendent",
        })
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Employee" => Ok(Self::Employee),
            "Mechanic" => Ok(Self::Mechanic),
            "Assistant" => Ok(Self::Assistant),
            "Superintendent" => Ok(Self::Superintendent),
            other => Err(Error::InvalidArgument(format!("Unknown role: {other}"))),
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EditPriority => "edit priority",
            Self::UpdateRepairStatus => "update repair status",
            Self::ManageUsers => "manage users",
        })
    }
}

/// Single authorization boundary for role-gated operations.
pub fn authorize(user: &User, capability: Capability) -> Result<(), Error> {
    if user.role.allows(capability) {
        Ok(())
    } else {
        Err(Error::PermissionDenied(format!(
            "{} role may not {capability}",
            user.role
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User {
            id: "u1".into(),
            name: "Test".into(),
            code: "0000".into(),
            role,
        }
    }

    #[test]
    fn employee_has_no_capabilities() {
        for cap in [
            Capability::EditPriority,
            Capability::UpdateRepairStatus,
            Capability::ManageUsers,
        ] {
            assert!(!Role::Employee.allows(cap));
        }
    }

    #[test]
    fn superintendent_has_all_capabilities() {
        for cap in [
            Capability::EditPriority,
            Capability::UpdateRepairStatus,
            Capability::ManageUsers,
        ] {
            assert!(Role::Superintendent.allows(cap));
        }
    }

    #[test]
    fn mechanic_and_assistant_work_the_queue_but_not_the_team() {
        for role in [Role::Mechanic, Role::Assistant] {
            assert!(role.allows(Capability::EditPriority));
            assert!(role.allows(Capability::UpdateRepairStatus));
            assert!(!role.allows(Capability::ManageUsers));
        }
    }

    #[test]
    fn authorize_rejects_with_permission_denied() {
        let err = authorize(&user(Role::Employee), Capability::ManageUsers).unwrap_err();
        assert!(matches!(err, Error::PermissionDenied(_)));

        assert!(authorize(&user(Role::Superintendent), Capability::ManageUsers).is_ok());
    }

    #[test]
    fn role_string_round_trip() {
        for role in [
            Role::Employee,
            Role::Mechanic,
            Role::Assistant,
            Role::Superintendent,
        ] {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
        assert!("Janitor".parse::<Role>().is_err());
    }
}
