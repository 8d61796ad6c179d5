use std::sync::Arc;
use std::thread;

use chrono::NaiveDate;

use lib::{HostelStore, ResidentFilter, RoomFilter};
use models::errors::HostelError;
use models::hostel::{NewResident, NewRoom, ResidentIntake, ResidentStatus, ResidentUpdate, RoomStatus, RoomUpdate};

fn store_with_room(number: &str) -> HostelStore {
    let store = HostelStore::temporary().unwrap();
    store
        .create_room(NewRoom { number: number.into(), price_per_month: Some(5000.0), ..Default::default() })
        .unwrap();
    store
}

fn intake(name: &str) -> ResidentIntake {
    ResidentIntake {
        name: name.into(),
        check_in_date: NaiveDate::from_ymd_opt(2024, 1, 10),
        ..Default::default()
    }
}

fn assert_occupancy_invariant(store: &HostelStore) {
    for room in store.list_rooms(&RoomFilter::default()).unwrap() {
        assert_eq!(
            room.status == RoomStatus::Occupied,
            !room.occupants.is_empty(),
            "room {} broke the occupancy invariant",
            room.number
        );
        for occupant in &room.occupants {
            let resident = store.get_resident(&occupant.resident_id).unwrap();
            assert_eq!(resident.status, ResidentStatus::Active);
            assert_eq!(resident.room_number.as_deref(), Some(room.number.as_str()));
        }
    }
    for resident in store.list_residents(&ResidentFilter::default()).unwrap() {
        if resident.status != ResidentStatus::Active {
            continue;
        }
        let number = resident.room_number.as_deref().expect("active resident without a room");
        let room = store.get_room(number).unwrap();
        assert_eq!(room.status, RoomStatus::Occupied, "{} points at an unoccupied room", resident.name);
        assert!(room.occupants.iter().any(|o| o.resident_id == resident.id));
    }
}

#[test]
fn assign_then_checkout_round_trip() {
    let store = store_with_room("101");

    let assignment = store.assign_room("101", intake("Asha")).unwrap();
    assert_eq!(assignment.room.status, RoomStatus::Occupied);
    assert_eq!(assignment.room.occupants.len(), 1);
    assert_eq!(assignment.room.occupants[0].check_in_date, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
    assert_eq!(assignment.resident.status, ResidentStatus::Active);
    assert_occupancy_invariant(&store);

    let checkout = store.checkout_room("101").unwrap();
    assert_eq!(checkout.room.status, RoomStatus::Available);
    assert!(checkout.room.occupants.is_empty());
    assert_eq!(checkout.released.len(), 1);

    let resident = store.get_resident(&assignment.resident.id).unwrap();
    assert_eq!(resident.status, ResidentStatus::CheckedOut);
    assert!(resident.checked_out_on.is_some());
    assert_occupancy_invariant(&store);
}

#[test]
fn assigning_an_occupied_room_conflicts_without_orphans() {
    let store = store_with_room("101");
    store.assign_room("101", intake("Asha")).unwrap();

    let err = store.assign_room("101", intake("Ravi")).unwrap_err();
    assert!(matches!(err, HostelError::Conflict(_)));

    let room = store.get_room("101").unwrap();
    assert_eq!(room.occupants.len(), 1);
    assert_eq!(room.occupants[0].name, "Asha");
    assert_eq!(store.list_residents(&ResidentFilter::default()).unwrap().len(), 1);
    assert_occupancy_invariant(&store);
}

#[test]
fn assigning_a_room_under_maintenance_conflicts() {
    let store = store_with_room("101");
    store
        .update_room("101", RoomUpdate { status: Some(RoomStatus::Maintenance), ..Default::default() })
        .unwrap();
    let err = store.assign_room("101", intake("Asha")).unwrap_err();
    assert!(matches!(err, HostelError::Conflict(_)));
    assert!(store.list_residents(&ResidentFilter::default()).unwrap().is_empty());
}

#[test]
fn assigning_a_missing_room_is_not_found() {
    let store = HostelStore::temporary().unwrap();
    let err = store.assign_room("999", intake("Asha")).unwrap_err();
    assert!(matches!(err, HostelError::NotFound(_)));
    assert!(store.list_residents(&ResidentFilter::default()).unwrap().is_empty());
}

#[test]
fn checkout_is_idempotent() {
    let store = store_with_room("101");
    store.assign_room("101", intake("Asha")).unwrap();
    let first = store.checkout_room("101").unwrap();
    let second = store.checkout_room("101").unwrap();

    assert!(second.released.is_empty());
    assert_eq!(first.room, second.room);
    assert_eq!(store.get_room("101").unwrap(), first.room);
}

#[test]
fn checkout_of_room_under_maintenance_keeps_status() {
    let store = store_with_room("101");
    store
        .update_room("101", RoomUpdate { status: Some(RoomStatus::Maintenance), ..Default::default() })
        .unwrap();
    let checkout = store.checkout_room("101").unwrap();
    assert_eq!(checkout.room.status, RoomStatus::Maintenance);
}

#[test]
fn concurrent_assignments_have_one_winner() {
    let store = Arc::new(store_with_room("101"));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let store = Arc::clone(&store);
            thread::spawn(move || store.assign_room("101", intake(&format!("Guest {}", i))))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| matches!(e, HostelError::Conflict(_))));
    assert_eq!(store.get_room("101").unwrap().occupants.len(), 1);
    assert_eq!(store.list_residents(&ResidentFilter::default()).unwrap().len(), 1);
    assert_occupancy_invariant(&store);
}

#[test]
fn renaming_a_resident_updates_the_occupant_entry() {
    let store = store_with_room("101");
    let assignment = store.assign_room("101", intake("Asha")).unwrap();
    store
        .update_resident(&assignment.resident.id, ResidentUpdate { name: Some("Asha K".into()), ..Default::default() })
        .unwrap();
    assert_eq!(store.get_room("101").unwrap().occupants[0].name, "Asha K");
}

#[test]
fn current_occupant_cannot_be_deleted() {
    let store = store_with_room("101");
    let assignment = store.assign_room("101", intake("Asha")).unwrap();

    let err = store.delete_resident(&assignment.resident.id).unwrap_err();
    assert!(matches!(err, HostelError::Conflict(_)));

    store.checkout_room("101").unwrap();
    store.delete_resident(&assignment.resident.id).unwrap();
    assert!(matches!(store.get_resident(&assignment.resident.id), Err(HostelError::NotFound(_))));
}

#[test]
fn occupied_room_cannot_be_deleted() {
    let store = store_with_room("101");
    store.assign_room("101", intake("Asha")).unwrap();
    assert!(matches!(store.delete_room("101"), Err(HostelError::Conflict(_))));
    store.checkout_room("101").unwrap();
    store.delete_room("101").unwrap();
}

#[test]
fn direct_resident_creation_keeps_the_invariant() {
    let store = store_with_room("101");
    let ghost = store
        .create_resident(NewResident { name: "Ghost".into(), room_number: Some("101".into()), ..Default::default() })
        .unwrap();
    assert_occupancy_invariant(&store);

    assert!(matches!(store.assign_room("101", intake("Asha")), Err(HostelError::Conflict(_))));
    let checkout = store.checkout_room("101").unwrap();
    assert_eq!(checkout.released.len(), 1);
    assert_eq!(store.get_resident(&ghost.id).unwrap().status, ResidentStatus::CheckedOut);
    assert_occupancy_invariant(&store);
}
