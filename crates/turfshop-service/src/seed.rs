//! Starter data for a fresh database. Each seed runs only when its
//! collection is empty, so re-running is harmless.

use tracing::info;
use uuid::Uuid;

use turfshop_core::model::{EquipmentKind, EquipmentStatus};
use turfshop_core::roles::Role;

use crate::storage::{DatabaseError, NewEquipment, ShopDatabase};

/// Seed the three starter users iff the users table is empty.
pub async fn seed_users(db: &ShopDatabase) -> Result<(), DatabaseError> {
    if db.count_users().await? > 0 {
        return Ok(());
    }

    let initial: [(&str, &str, Role); 3] = [
        ("Superintendent", "SUPER123", Role::Superintendent),
        ("Assistant Superintendent", "ASST456", Role::Assistant),
        ("Staff Member", "1234", Role::Employee),
    ];

    for (name, code, role) in initial {
        let id = Uuid::new_v4().to_string();
        db.create_user(&id, name, code, role).await?;
    }

    info!("Users seeded");
    Ok(())
}

/// Seed the starter inventory iff the equipment table is empty.
pub async fn seed_equipment(db: &ShopDatabase) -> Result<(), DatabaseError> {
    if db.count_equipment().await? > 0 {
        return Ok(());
    }

    let initial = [
        NewEquipment {
            name: "Toro Reelmaster 3100-D".into(),
            kind: EquipmentKind::Mower,
            department: "Greens".into(),
            serial: Some("TRM3100-8842".into()),
            status: EquipmentStatus::Operational,
        },
        NewEquipment {
            name: "John Deere Gator TX".into(),
            kind: EquipmentKind::Vehicle,
            department: "Maintenance".into(),
            serial: Some("JDG-TX-9921".into()),
            status: EquipmentStatus::Operational,
        },
        NewEquipment {
            name: "Jacobsen LF570".into(),
            kind: EquipmentKind::Mower,
            department: "Fairways".into(),
            serial: Some("JLF570-5531".into()),
            status: EquipmentStatus::Down,
        },
        NewEquipment {
            name: "Club Car Carryall 500".into(),
            kind: EquipmentKind::Vehicle,
            department: "Range".into(),
            serial: Some("CC500-1122".into()),
            status: EquipmentStatus::Operational,
        },
        NewEquipment {
            name: "Toro Greensmaster 1000".into(),
            kind: EquipmentKind::Mower,
            department: "Greens".into(),
            serial: Some("TGM1000-3344".into()),
            status: EquipmentStatus::InRepair,
        },
    ];

    for fields in &initial {
        let id = Uuid::new_v4().to_string();
        db.create_equipment(&id, fields).await?;
    }

    info!("Equipment seeded");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeds_are_idempotent() {
        let db = ShopDatabase::open_in_memory().await.unwrap();

        seed_users(&db).await.unwrap();
        seed_users(&db).await.unwrap();
        assert_eq!(db.count_users().await.unwrap(), 3);

        seed_equipment(&db).await.unwrap();
        seed_equipment(&db).await.unwrap();
        assert_eq!(db.count_equipment().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn seeded_codes_resolve() {
        let db = ShopDatabase::open_in_memory().await.unwrap();
        seed_users(&db).await.unwrap();

        let superintendent = db.get_user_by_code("SUPER123").await.unwrap();
        assert_eq!(superintendent.role, Role::Superintendent);

        let staff = db.get_user_by_code("1234").await.unwrap();
        assert_eq!(staff.role, Role::Employee);
    }
}
