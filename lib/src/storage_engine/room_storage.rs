// lib/src/storage_engine/room_storage.rs

use chrono::Utc;
use sled::Transactional;
use tracing::{debug, info};

use models::errors::{HostelError, HostelResult};
use models::hostel::{NewRoom, Room, RoomUpdate};

use super::collection::not_found;
use super::filters::RoomFilter;
use super::sled_storage::HostelStore;
use super::storage_utils::{
    abort, claim_unique, finish, release_unique, tx_get, tx_put, tx_resolve, tx_take,
};

const ROOM_NUMBER: &str = "room number";

impl HostelStore {
    pub fn create_room(&self, new_room: NewRoom) -> HostelResult<Room> {
        let room = Room::from_new(new_room, Utc::now())?;

        finish((self.rooms.tree(), &self.room_numbers).transaction(|(rooms, numbers)| {
            claim_unique(numbers, &room.number, &room.id, ROOM_NUMBER)?;
            tx_put(rooms, &room.id, &room)
        }))?;

        info!("Created room {} ({})", room.number, room.id);
        Ok(room)
    }

    /// Looks a room up by id, falling back to its number.
    pub fn get_room(&self, key: &str) -> HostelResult<Room> {
        if let Some(room) = self.rooms.get(key)? {
            return Ok(room);
        }
        match self.room_numbers.get(key.as_bytes())? {
            Some(id) => self.rooms.require(&String::from_utf8_lossy(&id)),
            None => Err(not_found::<Room>(key)),
        }
    }

    /// Rooms sorted by number.
    pub fn list_rooms(&self, filter: &RoomFilter) -> HostelResult<Vec<Room>> {
        let mut rooms: Vec<Room> = self.rooms.list()?.into_iter().filter(|r| filter.matches(r)).collect();
        rooms.sort_by(|a, b| Room::compare_numbers(&a.number, &b.number));
        Ok(rooms)
    }

    pub fn update_room(&self, key: &str, update: RoomUpdate) -> HostelResult<Room> {
        let room = finish((self.rooms.tree(), &self.room_numbers).transaction(|(rooms, numbers)| {
            let id = match tx_resolve(rooms, numbers, key)? {
                Some(id) => id,
                None => return abort(not_found::<Room>(key)),
            };
            let mut room: Room = match tx_get(rooms, &id)? {
                Some(room) => room,
                None => return abort(not_found::<Room>(key)),
            };
            let previous_number = room.number.clone();
            if let Err(e) = room.apply_update(update.clone()) {
                return abort(e);
            }
            if room.number != previous_number {
                claim_unique(numbers, &room.number, &room.id, ROOM_NUMBER)?;
                release_unique(numbers, &previous_number)?;
            }
            tx_put(rooms, &room.id, &room)?;
            Ok(room)
        }))?;

        debug!("Updated room {} ({})", room.number, room.id);
        Ok(room)
    }

    /// Removes a vacant room. Occupied rooms must be checked out first.
    pub fn delete_room(&self, key: &str) -> HostelResult<Room> {
        let room = finish((self.rooms.tree(), &self.room_numbers).transaction(|(rooms, numbers)| {
            let id = match tx_resolve(rooms, numbers, key)? {
                Some(id) => id,
                None => return abort(not_found::<Room>(key)),
            };
            let room: Room = match tx_take(rooms, &id)? {
                Some(room) => room,
                None => return abort(not_found::<Room>(key)),
            };
            if !room.is_vacant() {
                return abort(HostelError::conflict(format!(
                    "room {} is occupied; check out before deleting it",
                    room.number
                )));
            }
            release_unique(numbers, &room.number)?;
            Ok(room)
        }))?;

        info!("Deleted room {} ({})", room.number, room.id);
        Ok(room)
    }
}
