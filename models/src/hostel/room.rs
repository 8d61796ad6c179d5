// models/src/hostel/room.rs

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{new_id, positive, required};
use crate::errors::{HostelError, HostelResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    #[default]
    Single,
    Double,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoomStatus {
    #[default]
    Available,
    Occupied,
    Maintenance,
}

/// A resident bound to a room while their stay is active.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Occupant {
    pub resident_id: String,
    pub name: String,
    pub check_in_date: NaiveDate,
}

/// Stored room document.
///
/// `status == Occupied` holds exactly when `occupants` is non-empty; only
/// the assignment and checkout workflows move a room in or out of that state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub number: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub ac_flag: bool,
    pub price_per_month: f64,
    pub status: RoomStatus,
    pub occupants: Vec<Occupant>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoom {
    #[serde(default)]
    pub number: String,
    #[serde(rename = "type")]
    pub room_type: Option<RoomType>,
    pub ac_flag: Option<bool>,
    pub price_per_month: Option<f64>,
    pub status: Option<RoomStatus>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUpdate {
    pub number: Option<String>,
    #[serde(rename = "type")]
    pub room_type: Option<RoomType>,
    pub ac_flag: Option<bool>,
    pub price_per_month: Option<f64>,
    pub status: Option<RoomStatus>,
}

fn reject_manual_occupancy(status: Option<RoomStatus>) -> HostelResult<()> {
    if status == Some(RoomStatus::Occupied) {
        return Err(HostelError::validation(
            "status cannot be set to occupied directly; assign a resident instead",
        ));
    }
    Ok(())
}

impl Room {
    /// Validates a creation request and builds the stored document.
    pub fn from_new(new_room: NewRoom, now: DateTime<Utc>) -> HostelResult<Self> {
        let number = required("number", &new_room.number)?;
        let price_per_month = positive("pricePerMonth", new_room.price_per_month)?;
        reject_manual_occupancy(new_room.status)?;

        Ok(Room {
            id: new_id(),
            number,
            room_type: new_room.room_type.unwrap_or_default(),
            ac_flag: new_room.ac_flag.unwrap_or(false),
            price_per_month,
            status: new_room.status.unwrap_or_default(),
            occupants: Vec::new(),
            created_at: now,
        })
    }

    pub fn is_vacant(&self) -> bool {
        self.occupants.is_empty()
    }

    /// Applies a partial edit. Occupancy-owned fields stay locked while the
    /// room has occupants.
    pub fn apply_update(&mut self, update: RoomUpdate) -> HostelResult<()> {
        reject_manual_occupancy(update.status)?;

        let number = match update.number {
            Some(n) => Some(required("number", &n)?),
            None => None,
        };
        let price = match update.price_per_month {
            Some(p) => Some(positive("pricePerMonth", Some(p))?),
            None => None,
        };

        if !self.is_vacant() {
            if update.status.is_some_and(|s| s != self.status) {
                return Err(HostelError::conflict(format!(
                    "room {} is occupied; check out before changing its status",
                    self.number
                )));
            }
            if number.as_ref().is_some_and(|n| n != &self.number) {
                return Err(HostelError::conflict(format!(
                    "room {} is occupied; check out before renumbering it",
                    self.number
                )));
            }
        }

        if let Some(number) = number {
            self.number = number;
        }
        if let Some(room_type) = update.room_type {
            self.room_type = room_type;
        }
        if let Some(ac_flag) = update.ac_flag {
            self.ac_flag = ac_flag;
        }
        if let Some(price) = price {
            self.price_per_month = price;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        Ok(())
    }

    /// Binds an occupant. Fails unless the room is available and empty.
    pub fn occupy(&mut self, occupant: Occupant) -> HostelResult<()> {
        match self.status {
            RoomStatus::Occupied => {
                return Err(HostelError::conflict(format!("room {} is already occupied", self.number)));
            }
            RoomStatus::Maintenance => {
                return Err(HostelError::conflict(format!("room {} is under maintenance", self.number)));
            }
            RoomStatus::Available if !self.is_vacant() => {
                return Err(HostelError::conflict(format!("room {} is already occupied", self.number)));
            }
            RoomStatus::Available => {}
        }
        self.occupants.push(occupant);
        self.status = RoomStatus::Occupied;
        Ok(())
    }

    /// Releases every occupant and returns them. An empty room is left untouched.
    pub fn vacate(&mut self) -> Vec<Occupant> {
        if self.is_vacant() {
            return Vec::new();
        }
        self.status = RoomStatus::Available;
        std::mem::take(&mut self.occupants)
    }

    /// Orders room numbers numerically when both parse, else lexicographically.
    pub fn compare_numbers(a: &str, b: &str) -> Ordering {
        match (a.parse::<u64>(), b.parse::<u64>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => a.cmp(b),
        }
    }
}
