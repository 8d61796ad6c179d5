// lib/src/lib.rs

pub mod payment;
pub mod reports;
pub mod storage_engine;
pub mod workflow;

pub use crate::payment::{PaymentGateway, PaymentGatewayError, PaymentNotice, PaymentRequest, SimulatedGateway};
pub use crate::reports::HostelSummary;
pub use crate::storage_engine::{
    HostelStore, InvoiceFilter, ResidentFilter, RoomFilter, TicketFilter, UserFilter,
};
pub use crate::workflow::{pay_invoice, Assignment, Checkout};
