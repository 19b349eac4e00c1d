//! Domain model for the repair shop.
//!
//! Tickets snapshot the equipment name and reporter/completer names at write
//! time, so a ticket stays meaningful after its equipment or reporter is
//! deleted. That denormalization is deliberate; do not normalize it away.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::roles::Role;

/// Placeholder equipment name stored when a report references an id that no
/// longer resolves.
pub const UNKNOWN_EQUIPMENT: &str = "Unknown Equipment";

/// A staff member, identified by a unique access code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub code: String,
    pub role: Role,
}

/// Category of a maintenance asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentKind {
    Mower,
    Vehicle,
    Tractor,
    Handheld,
}

/// Operational state of an asset. Driven by repair-ticket transitions but
/// also directly editable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentStatus {
    Operational,
    Down,
    InRepair,
}

/// A maintenance asset in the inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: String,
    pub name: String,
    pub kind: EquipmentKind,
    pub department: String,
    pub serial: Option<String>,
    pub status: EquipmentStatus,
}

/// Workflow state of a repair ticket. The UI flow is Pending -> In Progress
/// -> Completed, but any authorized caller may set any status directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RepairStatus {
    Pending,
    InProgress,
    Completed,
}

/// Report-time urgency, mapped to a numeric priority on ticket creation.
/// Admins refine the number afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
}

impl UrgencyLevel {
    /// Numeric priority assigned at creation (domain 1-10).
    pub const fn priority(self) -> i64 {
        match self {
            Self::Low => 2,
            Self::Medium => 5,
            Self::High => 8,
        }
    }
}

/// A repair ticket. Never deleted; completed tickets become history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepairTicket {
    pub id: String,
    /// Reference to the equipment row; may dangle once the asset is deleted.
    pub equipment_id: String,
    /// Name snapshot taken at report time.
    pub equipment_name: String,
    pub issue: String,
    /// 1-10, higher is more urgent.
    pub priority: i64,
    pub status: RepairStatus,
    /// Reporter name snapshot.
    pub reported_by: String,
    /// Unix seconds.
    pub reported_at: i64,
    pub completed_by: Option<String>,
    pub completed_at: Option<i64>,
    pub notes: Option<String>,
    pub cost: Option<f64>,
    /// Inline encoded attachments (data URLs), append-only.
    pub images: Vec<String>,
    /// Manual queue position. Present only once the ticket has been
    /// drag-repositioned; overrides the priority/date sort.
    pub order: Option<i64>,
}

impl fmt::Display for EquipmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Mower => "Mower",
            Self::Vehicle => "Vehicle",
            Self::Tractor => "Tractor",
            Self::Handheld => "Handheld",
        })
    }
}

impl FromStr for EquipmentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Mower" => Ok(Self::Mower),
            "Vehicle" => Ok(Self::Vehicle),
            "Tractor" => Ok(Self::Tractor),
            "Handheld" => Ok(Self::Handheld),
            other => Err(Error::InvalidArgument(format!(
                "Unknown equipment kind: {other}"
            ))),
        }
    }
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Operational => "Operational",
            Self::Down => "Down",
            Self::InRepair => "In Repair",
        })
    }
}

impl FromStr for EquipmentStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Operational" => Ok(Self::Operational),
            "Down" => Ok(Self::Down),
            "In Repair" => Ok(Self::InRepair),
            other => Err(Error::InvalidArgument(format!(
                "Unknown equipment status: {other}"
            ))),
        }
    }
}

impl fmt::Display for RepairStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        })
    }
}

impl FromStr for RepairStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "In Progress" => Ok(Self::InProgress),
            "Completed" => Ok(Self::Completed),
            other => Err(Error::InvalidArgument(format!(
                "Unknown repair status: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings_round_trip() {
        for status in [
            EquipmentStatus::Operational,
            EquipmentStatus::Down,
            EquipmentStatus::InRepair,
        ] {
            assert_eq!(
                status.to_string().parse::<EquipmentStatus>().unwrap(),
                status
            );
        }
        for status in [
            RepairStatus::Pending,
            RepairStatus::InProgress,
            RepairStatus::Completed,
        ] {
            assert_eq!(status.to_string().parse::<RepairStatus>().unwrap(), status);
        }
    }

    #[test]
    fn urgency_maps_into_priority_domain() {
        for level in [UrgencyLevel::Low, UrgencyLevel::Medium, UrgencyLevel::High] {
            let p = level.priority();
            assert!((1..=10).contains(&p));
        }
        assert!(UrgencyLevel::High.priority() > UrgencyLevel::Medium.priority());
        assert!(UrgencyLevel::Medium.priority() > UrgencyLevel::Low.priority());
    }
}
