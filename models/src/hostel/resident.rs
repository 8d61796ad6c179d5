// models/src/hostel/resident.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{optional, required, Occupant};
use crate::errors::{HostelError, HostelResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResidentStatus {
    #[default]
    Active,
    #[serde(alias = "inactive")]
    CheckedOut,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resident {
    pub id: String,
    pub name: String,
    pub room_number: Option<String>,
    pub phone: Option<String>,
    pub status: ResidentStatus,
    pub check_in: NaiveDate,
    pub expected_checkout: Option<NaiveDate>,
    pub checked_out_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Intake data supplied when a resident is assigned to a room.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentIntake {
    #[serde(default)]
    pub name: String,
    pub phone: Option<String>,
    pub check_in_date: Option<NaiveDate>,
    pub expected_checkout: Option<NaiveDate>,
}

/// Body of `POST /residents`. The resident is admitted into `room_number`
/// exactly as an assignment would, so `room_number` is required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewResident {
    #[serde(default)]
    pub name: String,
    pub room_number: Option<String>,
    pub phone: Option<String>,
    pub check_in: Option<NaiveDate>,
    pub expected_checkout: Option<NaiveDate>,
}

// roomNumber and status belong to the assign/checkout workflow and are not editable here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub expected_checkout: Option<NaiveDate>,
}

impl NewResident {
    /// Splits the body into the target room and the assignment intake.
    pub fn into_intake(self) -> HostelResult<(String, ResidentIntake)> {
        let room_number = match self.room_number.as_deref() {
            Some(number) => required("roomNumber", number)?,
            None => return Err(HostelError::validation("roomNumber is required")),
        };
        let intake = ResidentIntake {
            name: self.name,
            phone: self.phone,
            check_in_date: self.check_in,
            expected_checkout: self.expected_checkout,
        };
        intake.validate()?;
        Ok((room_number, intake))
    }
}

impl ResidentIntake {
    pub fn validate(&self) -> HostelResult<()> {
        required("name", &self.name).map(|_| ())
    }
}

impl Resident {
    /// Builds the active resident created by a room assignment.
    pub fn admit(
        id: String,
        intake: &ResidentIntake,
        room_number: &str,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> HostelResult<Self> {
        Ok(Resident {
            id,
            name: required("name", &intake.name)?,
            room_number: Some(room_number.to_string()),
            phone: optional(intake.phone.clone()),
            status: ResidentStatus::Active,
            check_in: intake.check_in_date.unwrap_or(today),
            expected_checkout: intake.expected_checkout,
            checked_out_on: None,
            created_at: now,
        })
    }

    pub fn occupant_entry(&self) -> Occupant {
        Occupant {
            resident_id: self.id.clone(),
            name: self.name.clone(),
            check_in_date: self.check_in,
        }
    }

    pub fn apply_update(&mut self, update: ResidentUpdate) -> HostelResult<()> {
        if let Some(name) = update.name {
            self.name = required("name", &name)?;
        }
        if update.phone.is_some() {
            self.phone = optional(update.phone);
        }
        if let Some(expected) = update.expected_checkout {
            self.expected_checkout = Some(expected);
        }
        Ok(())
    }

    pub fn check_out(&mut self, today: NaiveDate) {
        self.status = ResidentStatus::CheckedOut;
        self.checked_out_on = Some(today);
    }
}
