// lib/src/workflow.rs
//
// Operations that mutate more than one entity: assigning a resident to a
// room, checking a room out, and settling an invoice.

use chrono::Utc;
use serde::Serialize;
use sled::Transactional;
use tracing::{info, warn};

use models::errors::{HostelError, HostelResult};
use models::hostel::{new_id, Invoice, Resident, ResidentIntake, Room};

use crate::payment::{PaymentGateway, PaymentNotice, PaymentRequest};
use crate::storage_engine::collection::not_found;
use crate::storage_engine::storage_utils::{abort, finish, tx_get, tx_put, tx_resolve};
use crate::storage_engine::HostelStore;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub room: Room,
    pub resident: Resident,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Checkout {
    pub room: Room,
    pub released: Vec<Resident>,
}

impl HostelStore {
    /// Creates an active resident and binds them to the room in one
    /// transaction. The room must be available and empty when the
    /// transaction commits, so concurrent assignments cannot both win.
    pub fn assign_room(&self, key: &str, intake: ResidentIntake) -> HostelResult<Assignment> {
        intake.validate()?;
        let now = Utc::now();
        let resident_id = new_id();

        let trees = (self.rooms.tree(), &self.room_numbers, self.residents.tree());
        let assignment = finish(trees.transaction(|(rooms, numbers, residents)| {
            let id = match tx_resolve(rooms, numbers, key)? {
                Some(id) => id,
                None => return abort(not_found::<Room>(key)),
            };
            let mut room: Room = match tx_get(rooms, &id)? {
                Some(room) => room,
                None => return abort(not_found::<Room>(key)),
            };
            let resident = match Resident::admit(resident_id.clone(), &intake, &room.number, now.date_naive(), now) {
                Ok(resident) => resident,
                Err(e) => return abort(e),
            };
            if let Err(e) = room.occupy(resident.occupant_entry()) {
                return abort(e);
            }

            tx_put(residents, &resident.id, &resident)?;
            tx_put(rooms, &room.id, &room)?;
            Ok(Assignment { room, resident })
        }))?;

        info!(
            "Assigned {} ({}) to room {}",
            assignment.resident.name, assignment.resident.id, assignment.room.number
        );
        Ok(assignment)
    }

    /// Releases every occupant and marks their resident records checked out.
    /// Checking out an empty room succeeds without writing anything.
    pub fn checkout_room(&self, key: &str) -> HostelResult<Checkout> {
        let today = Utc::now().date_naive();

        let trees = (self.rooms.tree(), &self.room_numbers, self.residents.tree());
        let (checkout, missing) = finish(trees.transaction(|(rooms, numbers, residents)| {
            let id = match tx_resolve(rooms, numbers, key)? {
                Some(id) => id,
                None => return abort(not_found::<Room>(key)),
            };
            let mut room: Room = match tx_get(rooms, &id)? {
                Some(room) => room,
                None => return abort(not_found::<Room>(key)),
            };

            let occupants = room.vacate();
            if occupants.is_empty() {
                return Ok((Checkout { room, released: Vec::new() }, Vec::new()));
            }

            // The closure may re-run on conflict; missing ids are logged once it commits.
            let mut released = Vec::with_capacity(occupants.len());
            let mut missing = Vec::new();
            for occupant in occupants {
                match tx_get::<Resident>(residents, &occupant.resident_id)? {
                    Some(mut resident) => {
                        resident.check_out(today);
                        tx_put(residents, &resident.id, &resident)?;
                        released.push(resident);
                    }
                    None => missing.push(occupant.resident_id),
                }
            }
            tx_put(rooms, &room.id, &room)?;
            Ok((Checkout { room, released }, missing))
        }))?;

        for resident_id in &missing {
            warn!(
                "Room {} listed missing resident {}; released the slot anyway",
                checkout.room.number, resident_id
            );
        }
        if checkout.released.is_empty() && missing.is_empty() {
            info!("Room {} was already vacant; checkout is a no-op", checkout.room.number);
        } else {
            info!("Checked out {} resident(s) from room {}", checkout.released.len(), checkout.room.number);
        }
        Ok(checkout)
    }
}

/// Settles an invoice. The provider is notified first on a best-effort
/// basis; the stored status transition is what counts.
pub async fn pay_invoice(
    store: &HostelStore,
    gateway: &dyn PaymentGateway,
    id: &str,
    request: PaymentRequest,
) -> HostelResult<Invoice> {
    let invoice = store.get_invoice(id)?;
    if invoice.is_paid() {
        return Err(HostelError::conflict(format!("invoice {} is already paid", invoice.invoice_no)));
    }

    let method = request.method.unwrap_or_default();
    let notice = PaymentNotice {
        invoice_no: invoice.invoice_no.clone(),
        amount: invoice.amount,
        method,
        reference: request.reference.clone(),
    };
    if let Err(e) = gateway.notify(&notice).await {
        warn!("Payment notification for {} failed, recording payment anyway: {}", invoice.invoice_no, e);
    }

    let paid = store.mark_invoice_paid(id, method, request.reference, Utc::now())?;
    info!("Invoice {} paid via {:?}", paid.invoice_no, method);
    Ok(paid)
}
