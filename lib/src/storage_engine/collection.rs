// lib/src/storage_engine/collection.rs

use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};
use sled::{Db, Tree};

use models::errors::{HostelError, HostelResult};
use models::hostel::{Invoice, MaintenanceTicket, Resident, Room, User};

use super::storage_utils::{decode_document, encode_document};

/// A record kept in its own sled tree, keyed by id.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    /// Name of the sled tree holding this collection.
    const TREE: &'static str;
    /// Human label used in error messages.
    const LABEL: &'static str;

    fn id(&self) -> &str;
}

impl Document for Room {
    const TREE: &'static str = "rooms";
    const LABEL: &'static str = "room";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Document for Resident {
    const TREE: &'static str = "residents";
    const LABEL: &'static str = "resident";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Document for Invoice {
    const TREE: &'static str = "invoices";
    const LABEL: &'static str = "invoice";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Document for MaintenanceTicket {
    const TREE: &'static str = "maintenance";
    const LABEL: &'static str = "maintenance ticket";
    fn id(&self) -> &str {
        &self.id
    }
}

impl Document for User {
    const TREE: &'static str = "users";
    const LABEL: &'static str = "user";
    fn id(&self) -> &str {
        &self.id
    }
}

/// Typed view over one sled tree.
pub struct Collection<T> {
    tree: Tree,
    _marker: PhantomData<T>,
}

impl<T: Document> Collection<T> {
    pub fn open(db: &Db) -> HostelResult<Self> {
        let tree = db.open_tree(T::TREE)?;
        Ok(Self { tree, _marker: PhantomData })
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn get(&self, id: &str) -> HostelResult<Option<T>> {
        match self.tree.get(id.as_bytes())? {
            Some(bytes) => decode_document(&bytes).map(Some),
            None => Ok(None),
        }
    }

    pub fn require(&self, id: &str) -> HostelResult<T> {
        self.get(id)?.ok_or_else(|| not_found::<T>(id))
    }

    pub fn put(&self, doc: &T) -> HostelResult<()> {
        let bytes = encode_document(doc)?;
        self.tree.insert(doc.id().as_bytes(), bytes)?;
        Ok(())
    }

    pub fn remove(&self, id: &str) -> HostelResult<Option<T>> {
        match self.tree.remove(id.as_bytes())? {
            Some(bytes) => decode_document(&bytes).map(Some),
            None => Ok(None),
        }
    }

    pub fn list(&self) -> HostelResult<Vec<T>> {
        let mut docs = Vec::with_capacity(self.tree.len());
        for item in self.tree.iter() {
            let (_key, value) = item?;
            docs.push(decode_document(&value)?);
        }
        Ok(docs)
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

pub fn not_found<T: Document>(key: &str) -> HostelError {
    HostelError::not_found(format!("{} {} not found", T::LABEL, key))
}
