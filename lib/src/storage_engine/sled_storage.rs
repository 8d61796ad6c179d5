// lib/src/storage_engine/sled_storage.rs

use std::path::Path;

use sled::{Db, Tree};
use tracing::{error, info};

use models::errors::{HostelError, HostelResult};
use models::hostel::{Invoice, MaintenanceTicket, Resident, Room, User};

use super::collection::Collection;

/// Sled-backed document store holding every hostel collection.
///
/// Each collection lives in its own tree keyed by document id. Unique
/// fields (room number, user email, invoice number) are kept in separate
/// index trees mapping the value to the owning id; writes that touch a
/// unique field update both trees in one transaction.
pub struct HostelStore {
    db: Db,
    pub(crate) rooms: Collection<Room>,
    pub(crate) residents: Collection<Resident>,
    pub(crate) invoices: Collection<Invoice>,
    pub(crate) maintenance: Collection<MaintenanceTicket>,
    pub(crate) users: Collection<User>,
    pub(crate) room_numbers: Tree,
    pub(crate) user_emails: Tree,
    pub(crate) invoice_numbers: Tree,
}

impl HostelStore {
    /// Opens (or creates) the database under `path`.
    pub fn open(path: impl AsRef<Path>) -> HostelResult<Self> {
        let path = path.as_ref();
        info!("Opening Sled database at {:?}", path);
        let db = sled::Config::new().path(path).open().map_err(|e| {
            error!("Failed to open Sled database at {:?}: {}", path, e);
            HostelError::StorageError(format!(
                "Failed to open Sled database at {:?}: {}. Ensure the directory is accessible.",
                path, e
            ))
        })?;
        Self::with_db(db)
    }

    /// In-memory database removed on drop.
    pub fn temporary() -> HostelResult<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Self::with_db(db)
    }

    fn with_db(db: Db) -> HostelResult<Self> {
        Ok(Self {
            rooms: Collection::open(&db)?,
            residents: Collection::open(&db)?,
            invoices: Collection::open(&db)?,
            maintenance: Collection::open(&db)?,
            users: Collection::open(&db)?,
            room_numbers: db.open_tree("room_numbers")?,
            user_emails: db.open_tree("user_emails")?,
            invoice_numbers: db.open_tree("invoice_numbers")?,
            db,
        })
    }

    /// Monotonic counter shared by generated display numbers.
    pub(crate) fn next_sequence(&self) -> HostelResult<u64> {
        Ok(self.db.generate_id()? + 1)
    }

    pub async fn flush(&self) -> HostelResult<()> {
        self.db.flush_async().await?;
        Ok(())
    }
}
