// lib/src/storage_engine/maintenance_storage.rs

use chrono::Utc;
use tracing::info;

use models::errors::HostelResult;
use models::hostel::{MaintenanceTicket, NewTicket, TicketUpdate};

use super::collection::not_found;
use super::filters::TicketFilter;
use super::sled_storage::HostelStore;
use super::storage_utils::{abort, finish, tx_get, tx_put};

impl HostelStore {
    pub fn create_ticket(&self, new_ticket: NewTicket) -> HostelResult<MaintenanceTicket> {
        let now = Utc::now();
        let ticket = MaintenanceTicket::from_new(new_ticket, now.date_naive(), now)?;
        self.maintenance.put(&ticket)?;
        info!("Opened maintenance ticket {} for room {}", ticket.id, ticket.room_number);
        Ok(ticket)
    }

    pub fn get_ticket(&self, id: &str) -> HostelResult<MaintenanceTicket> {
        self.maintenance.require(id)
    }

    pub fn list_tickets(&self, filter: &TicketFilter) -> HostelResult<Vec<MaintenanceTicket>> {
        let mut tickets: Vec<MaintenanceTicket> =
            self.maintenance.list()?.into_iter().filter(|t| filter.matches(t)).collect();
        tickets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tickets)
    }

    pub fn update_ticket(&self, id: &str, update: TicketUpdate) -> HostelResult<MaintenanceTicket> {
        let ticket = finish(self.maintenance.tree().transaction(|tickets| {
            let mut ticket: MaintenanceTicket = match tx_get(tickets, id)? {
                Some(ticket) => ticket,
                None => return abort(not_found::<MaintenanceTicket>(id)),
            };
            if let Err(e) = ticket.apply_update(update.clone()) {
                return abort(e);
            }
            tx_put(tickets, &ticket.id, &ticket)?;
            Ok(ticket)
        }))?;

        info!("Maintenance ticket {} is {:?}", ticket.id, ticket.status);
        Ok(ticket)
    }

    pub fn delete_ticket(&self, id: &str) -> HostelResult<MaintenanceTicket> {
        self.maintenance
            .remove(id)?
            .ok_or_else(|| not_found::<MaintenanceTicket>(id))
    }
}
