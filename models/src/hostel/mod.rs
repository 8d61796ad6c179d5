// models/src/hostel/mod.rs

pub mod invoice;
pub mod maintenance;
pub mod resident;
pub mod room;
pub mod user;

pub use invoice::{Invoice, InvoiceStatus, InvoiceUpdate, NewInvoice, PaymentMethod};
pub use maintenance::{MaintenanceTicket, NewTicket, Priority, TicketStatus, TicketUpdate};
pub use resident::{NewResident, Resident, ResidentIntake, ResidentStatus, ResidentUpdate};
pub use room::{NewRoom, Occupant, Room, RoomStatus, RoomType, RoomUpdate};
pub use user::{normalize_email, AccountStatus, NewUser, Role, User, UserProfile, UserUpdate};

use uuid::Uuid;

use crate::errors::{HostelError, HostelResult};

/// Generates a fresh document id.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Trims a required text field, rejecting it when blank.
pub(crate) fn required(field: &str, value: &str) -> HostelResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(HostelError::validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

/// Trims an optional text field; blank input collapses to `None`.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn positive(field: &str, value: Option<f64>) -> HostelResult<f64> {
    match value {
        None => Err(HostelError::validation(format!("{} is required", field))),
        Some(v) if !v.is_finite() || v <= 0.0 => Err(HostelError::validation(format!(
            "{} must be a positive number",
            field
        ))),
        Some(v) => Ok(v),
    }
}
