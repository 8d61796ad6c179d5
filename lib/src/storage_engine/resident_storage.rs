// lib/src/storage_engine/resident_storage.rs

use sled::Transactional;
use tracing::{debug, info};

use models::errors::{HostelError, HostelResult};
use models::hostel::{NewResident, Resident, ResidentStatus, ResidentUpdate, Room};

use super::collection::not_found;
use super::filters::ResidentFilter;
use super::sled_storage::HostelStore;
use super::storage_utils::{abort, finish, tx_get, tx_put, tx_resolve, tx_take};

impl HostelStore {
    /// Creates a resident by admitting them into their room, in the same
    /// transaction as `assign_room`. An active resident is always listed
    /// among the occupants of an occupied room.
    pub fn create_resident(&self, new_resident: NewResident) -> HostelResult<Resident> {
        let (room_number, intake) = new_resident.into_intake()?;
        let assignment = self.assign_room(&room_number, intake)?;
        Ok(assignment.resident)
    }

    pub fn get_resident(&self, id: &str) -> HostelResult<Resident> {
        self.residents.require(id)
    }

    /// Residents, newest first.
    pub fn list_residents(&self, filter: &ResidentFilter) -> HostelResult<Vec<Resident>> {
        let mut residents: Vec<Resident> =
            self.residents.list()?.into_iter().filter(|r| filter.matches(r)).collect();
        residents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(residents)
    }

    /// Edits contact details. A rename is mirrored into the room's occupant entry.
    pub fn update_resident(&self, id: &str, update: ResidentUpdate) -> HostelResult<Resident> {
        let trees = (self.residents.tree(), self.rooms.tree(), &self.room_numbers);
        let resident = finish(trees.transaction(|(residents, rooms, numbers)| {
            let mut resident: Resident = match tx_get(residents, id)? {
                Some(resident) => resident,
                None => return abort(not_found::<Resident>(id)),
            };
            let previous_name = resident.name.clone();
            if let Err(e) = resident.apply_update(update.clone()) {
                return abort(e);
            }

            if resident.name != previous_name && resident.status == ResidentStatus::Active {
                if let Some(number) = resident.room_number.as_deref() {
                    if let Some(room_id) = tx_resolve(rooms, numbers, number)? {
                        if let Some(mut room) = tx_get::<Room>(rooms, &room_id)? {
                            let mut renamed = false;
                            for occupant in room.occupants.iter_mut().filter(|o| o.resident_id == resident.id) {
                                occupant.name = resident.name.clone();
                                renamed = true;
                            }
                            if renamed {
                                tx_put(rooms, &room.id, &room)?;
                            }
                        }
                    }
                }
            }

            tx_put(residents, &resident.id, &resident)?;
            Ok(resident)
        }))?;

        debug!("Updated resident {}", resident.id);
        Ok(resident)
    }

    /// Deletes a resident record. Residents still listed as occupants must be
    /// checked out first so the room never points at a missing record.
    pub fn delete_resident(&self, id: &str) -> HostelResult<Resident> {
        let trees = (self.residents.tree(), self.rooms.tree(), &self.room_numbers);
        let resident = finish(trees.transaction(|(residents, rooms, numbers)| {
            let resident: Resident = match tx_take(residents, id)? {
                Some(resident) => resident,
                None => return abort(not_found::<Resident>(id)),
            };
            if resident.status == ResidentStatus::Active {
                if let Some(number) = resident.room_number.as_deref() {
                    if let Some(room_id) = tx_resolve(rooms, numbers, number)? {
                        let room: Option<Room> = tx_get(rooms, &room_id)?;
                        if room.is_some_and(|r| r.occupants.iter().any(|o| o.resident_id == resident.id)) {
                            return abort(HostelError::conflict(format!(
                                "{} still occupies room {}; check out before deleting",
                                resident.name, number
                            )));
                        }
                    }
                }
            }
            Ok(resident)
        }))?;

        info!("Deleted resident {} ({})", resident.name, resident.id);
        Ok(resident)
    }
}
