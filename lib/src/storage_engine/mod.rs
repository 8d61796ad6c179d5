// lib/src/storage_engine/mod.rs

pub mod collection;
pub mod filters;
pub mod invoice_storage;
pub mod maintenance_storage;
pub mod resident_storage;
pub mod room_storage;
pub mod sled_storage;
pub mod storage_utils;
pub mod user_storage;

pub use collection::{Collection, Document};
pub use filters::{InvoiceFilter, ResidentFilter, RoomFilter, TicketFilter, UserFilter};
pub use sled_storage::HostelStore;
