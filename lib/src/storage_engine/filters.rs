// lib/src/storage_engine/filters.rs

use serde::Deserialize;

use models::hostel::{
    AccountStatus, Invoice, InvoiceStatus, MaintenanceTicket, Priority, Resident, ResidentStatus, Role,
    Room, RoomStatus, TicketStatus, User,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomFilter {
    pub status: Option<RoomStatus>,
}

impl RoomFilter {
    pub fn matches(&self, room: &Room) -> bool {
        self.status.map_or(true, |s| room.status == s)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentFilter {
    pub status: Option<ResidentStatus>,
    pub room_number: Option<String>,
}

impl ResidentFilter {
    pub fn matches(&self, resident: &Resident) -> bool {
        self.status.map_or(true, |s| resident.status == s)
            && self
                .room_number
                .as_deref()
                .map_or(true, |n| resident.room_number.as_deref() == Some(n))
    }
}

/// Matched against the evaluated status, so `status=Overdue` includes
/// pending invoices past their due date.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceFilter {
    pub status: Option<InvoiceStatus>,
    pub room_number: Option<String>,
    pub month: Option<String>,
}

impl InvoiceFilter {
    pub fn matches(&self, invoice: &Invoice) -> bool {
        self.status.map_or(true, |s| invoice.status == s)
            && self.room_number.as_deref().map_or(true, |n| invoice.room_number == n)
            && self
                .month
                .as_deref()
                .map_or(true, |m| invoice.month.eq_ignore_ascii_case(m.trim()))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketFilter {
    pub status: Option<TicketStatus>,
    pub priority: Option<Priority>,
    pub room_number: Option<String>,
}

impl TicketFilter {
    pub fn matches(&self, ticket: &MaintenanceTicket) -> bool {
        self.status.map_or(true, |s| ticket.status == s)
            && self.priority.map_or(true, |p| ticket.priority == p)
            && self.room_number.as_deref().map_or(true, |n| ticket.room_number == n)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFilter {
    pub role: Option<Role>,
    pub status: Option<AccountStatus>,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        self.role.map_or(true, |r| user.role == r) && self.status.map_or(true, |s| user.status == s)
    }
}
