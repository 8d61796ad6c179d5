// lib/src/reports.rs

use chrono::NaiveDate;
use serde::Serialize;

use models::errors::HostelResult;
use models::hostel::{InvoiceStatus, ResidentStatus, RoomStatus, TicketStatus};

use crate::storage_engine::HostelStore;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCounts {
    pub total: usize,
    pub available: usize,
    pub occupied: usize,
    pub maintenance: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResidentCounts {
    pub total: usize,
    pub active: usize,
    pub checked_out: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingTotals {
    pub pending_count: usize,
    pub pending_amount: f64,
    pub overdue_count: usize,
    pub overdue_amount: f64,
    pub paid_count: usize,
    pub paid_amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketCounts {
    pub open: usize,
    pub in_progress: usize,
    pub closed: usize,
}

/// Dashboard figures across every collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostelSummary {
    pub rooms: RoomCounts,
    pub residents: ResidentCounts,
    pub billing: BillingTotals,
    pub maintenance: TicketCounts,
}

impl HostelStore {
    /// Billing figures use statuses evaluated as of `today`.
    pub fn summary(&self, today: NaiveDate) -> HostelResult<HostelSummary> {
        let mut summary = HostelSummary::default();

        for room in self.rooms.list()? {
            summary.rooms.total += 1;
            match room.status {
                RoomStatus::Available => summary.rooms.available += 1,
                RoomStatus::Occupied => summary.rooms.occupied += 1,
                RoomStatus::Maintenance => summary.rooms.maintenance += 1,
            }
        }

        for resident in self.residents.list()? {
            summary.residents.total += 1;
            match resident.status {
                ResidentStatus::Active => summary.residents.active += 1,
                ResidentStatus::CheckedOut => summary.residents.checked_out += 1,
            }
        }

        for invoice in self.invoices.list()? {
            let invoice = invoice.evaluated(today);
            let billing = &mut summary.billing;
            match invoice.status {
                InvoiceStatus::Pending => {
                    billing.pending_count += 1;
                    billing.pending_amount += invoice.amount;
                }
                InvoiceStatus::Overdue => {
                    billing.overdue_count += 1;
                    billing.overdue_amount += invoice.amount;
                }
                InvoiceStatus::Paid => {
                    billing.paid_count += 1;
                    billing.paid_amount += invoice.amount;
                }
            }
        }

        for ticket in self.maintenance.list()? {
            match ticket.status {
                TicketStatus::Open => summary.maintenance.open += 1,
                TicketStatus::InProgress => summary.maintenance.in_progress += 1,
                TicketStatus::Closed => summary.maintenance.closed += 1,
            }
        }

        Ok(summary)
    }
}
