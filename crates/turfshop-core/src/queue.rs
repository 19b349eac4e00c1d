//! Repair-queue ordering.
//!
//! Pure functions over a ticket snapshot; how the snapshot arrives (live
//! feed, cached fallback) is the service layer's concern.
//!
//! Active-queue order: tickets with an explicit manual `order` sort first by
//! that value ascending, and an ordered ticket always precedes an unordered
//! one regardless of priority. Unordered tickets fall back to priority
//! descending, then reported-at descending (newest first). Once any ticket in
//! the active set has a manual order, a reorder assigns a contiguous order to
//! the whole visible set, because mixed ordered/unordered comparison has no
//! stable relative order between update cycles.

use std::cmp::Ordering;

use crate::model::{Equipment, EquipmentStatus, RepairStatus, RepairTicket};

/// Seconds per day, for queue-age math.
const DAY_SECS: i64 = 86_400;

/// Display classification for how long a ticket has been waiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBand {
    /// 3 days or fewer.
    Recent,
    /// 4 to 7 days.
    Aging,
    /// More than 7 days.
    Overdue,
}

impl AgeBand {
    pub const fn for_days(days: i64) -> Self {
        if days > 7 {
            Self::Overdue
        } else if days > 3 {
            Self::Aging
        } else {
            Self::Recent
        }
    }
}

/// Whole days a ticket has sat in the queue: floor of the absolute
/// difference, so clock skew in either direction never yields a negative.
pub const fn days_in_queue(reported_at: i64, now: i64) -> i64 {
    (now - reported_at).abs() / DAY_SECS
}

fn active_cmp(a: &RepairTicket, b: &RepairTicket) -> Ordering {
    match (a.order, b.order) {
        (Some(ao), Some(bo)) => ao.cmp(&bo),
        // An ordered ticket sorts before any unordered one.
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => b.priority.cmp(&a.priority),
    }
    .then_with(|| b.reported_at.cmp(&a.reported_at))
}

/// Active tickets (status != Completed) in queue order.
pub fn active_queue(tickets: &[RepairTicket]) -> Vec<RepairTicket> {
    let mut active: Vec<RepairTicket> = tickets
        .iter()
        .filter(|t| t.status != RepairStatus::Completed)
        .cloned()
        .collect();
    active.sort_by(active_cmp);
    active
}

/// Completed tickets, newest report first.
pub fn completed_history(tickets: &[RepairTicket]) -> Vec<RepairTicket> {
    let mut done: Vec<RepairTicket> = tickets
        .iter()
        .filter(|t| t.status == RepairStatus::Completed)
        .cloned()
        .collect();
    done.sort_by(|a, b| b.reported_at.cmp(&a.reported_at));
    done
}

/// Compute the contiguous `order = index` assignment that results from moving
/// `moved_id` to `target_index` within the visible active list.
///
/// Returns one `(ticket id, order)` pair for every ticket in the list, so the
/// whole set stays globally consistent. Returns `None` when `moved_id` is not
/// in the list. `target_index` past the end clamps to the last position.
#[allow(clippy::cast_possible_wrap)]
pub fn plan_reorder(
    visible: &[RepairTicket],
    moved_id: &str,
    target_index: usize,
) -> Option<Vec<(String, i64)>> {
    let current = visible.iter().position(|t| t.id == moved_id)?;

    let mut ids: Vec<&str> = visible.iter().map(|t| t.id.as_str()).collect();
    let moved = ids.remove(current);
    let target = target_index.min(ids.len());
    ids.insert(target, moved);

    Some(
        ids.into_iter()
            .enumerate()
            .map(|(index, id)| (id.to_owned(), index as i64))
            .collect(),
    )
}

/// Inventory and queue counters for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueStats {
    pub operational: usize,
    pub down_or_in_repair: usize,
    pub pending_repairs: usize,
    pub total_equipment: usize,
}

/// Counters over a snapshot of both collections.
pub fn dashboard_stats(equipment: &[Equipment], tickets: &[RepairTicket]) -> QueueStats {
    QueueStats {
        operational: equipment
            .iter()
            .filter(|e| e.status == EquipmentStatus::Operational)
            .count(),
        down_or_in_repair: equipment
            .iter()
            .filter(|e| {
                matches!(e.status, EquipmentStatus::Down | EquipmentStatus::InRepair)
            })
            .count(),
        pending_repairs: tickets
            .iter()
            .filter(|t| t.status == RepairStatus::Pending)
            .count(),
        total_equipment: equipment.len(),
    }
}
