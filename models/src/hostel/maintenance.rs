// models/src/hostel/maintenance.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{new_id, optional, required};
use crate::errors::{HostelError, HostelResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TicketStatus {
    #[default]
    Open,
    #[serde(rename = "In-progress")]
    InProgress,
    Closed,
}

impl TicketStatus {
    /// Tickets only move forward: Open, then In-progress, then Closed.
    pub fn can_move_to(self, next: TicketStatus) -> bool {
        self != TicketStatus::Closed && next >= self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceTicket {
    pub id: String,
    pub room_number: String,
    pub issue: String,
    #[serde(rename = "type")]
    pub ticket_type: String,
    pub priority: Priority,
    pub status: TicketStatus,
    pub reported_by: Option<String>,
    pub reported_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    #[serde(default)]
    pub room_number: String,
    #[serde(default)]
    pub issue: String,
    #[serde(rename = "type")]
    pub ticket_type: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<TicketStatus>,
    pub reported_by: Option<String>,
    pub reported_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketUpdate {
    pub room_number: Option<String>,
    pub issue: Option<String>,
    #[serde(rename = "type")]
    pub ticket_type: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<TicketStatus>,
    pub reported_by: Option<String>,
}

impl MaintenanceTicket {
    pub fn from_new(new_ticket: NewTicket, today: NaiveDate, now: DateTime<Utc>) -> HostelResult<Self> {
        Ok(MaintenanceTicket {
            id: new_id(),
            room_number: required("roomNumber", &new_ticket.room_number)?,
            issue: required("issue", &new_ticket.issue)?,
            ticket_type: optional(new_ticket.ticket_type).unwrap_or_else(|| "General".to_string()),
            priority: new_ticket.priority.unwrap_or_default(),
            status: new_ticket.status.unwrap_or_default(),
            reported_by: optional(new_ticket.reported_by),
            reported_on: new_ticket.reported_on.unwrap_or(today),
            created_at: now,
        })
    }

    pub fn apply_update(&mut self, update: TicketUpdate) -> HostelResult<()> {
        if self.status == TicketStatus::Closed {
            return Err(HostelError::conflict("ticket is closed and can no longer be modified"));
        }
        if let Some(next) = update.status {
            if !self.status.can_move_to(next) {
                return Err(HostelError::conflict(format!(
                    "ticket cannot move from {:?} back to {:?}",
                    self.status, next
                )));
            }
        }

        if let Some(room) = update.room_number {
            self.room_number = required("roomNumber", &room)?;
        }
        if let Some(issue) = update.issue {
            self.issue = required("issue", &issue)?;
        }
        if let Some(kind) = optional(update.ticket_type) {
            self.ticket_type = kind;
        }
        if let Some(priority) = update.priority {
            self.priority = priority;
        }
        if update.reported_by.is_some() {
            self.reported_by = optional(update.reported_by);
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        Ok(())
    }
}
