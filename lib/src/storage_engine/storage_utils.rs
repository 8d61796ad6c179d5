// lib/src/storage_engine/storage_utils.rs

use serde::{de::DeserializeOwned, Serialize};
use sled::transaction::{
    ConflictableTransactionError, TransactionError, TransactionResult, TransactionalTree,
};

use models::errors::{HostelError, HostelResult};

/// Result type used inside sled transaction closures.
pub type TxResult<T> = Result<T, ConflictableTransactionError<HostelError>>;

/// Helper to serialize a document to JSON bytes.
pub fn encode_document<T: Serialize>(doc: &T) -> HostelResult<Vec<u8>> {
    serde_json::to_vec(doc).map_err(|e| HostelError::SerializationError(e.to_string()))
}

/// Helper to deserialize JSON bytes back into a document.
pub fn decode_document<T: DeserializeOwned>(bytes: &[u8]) -> HostelResult<T> {
    serde_json::from_slice(bytes).map_err(|e| HostelError::DeserializationError(e.to_string()))
}

pub fn abort<T>(err: HostelError) -> TxResult<T> {
    Err(ConflictableTransactionError::Abort(err))
}

/// Collapses a finished transaction into the domain error type.
pub fn finish<T>(result: TransactionResult<T, HostelError>) -> HostelResult<T> {
    result.map_err(|e| match e {
        TransactionError::Abort(err) => err,
        TransactionError::Storage(err) => HostelError::StorageError(err.to_string()),
    })
}

pub fn tx_get<T: DeserializeOwned>(tree: &TransactionalTree, key: &str) -> TxResult<Option<T>> {
    match tree.get(key.as_bytes())? {
        Some(bytes) => decode_document(&bytes).map(Some).map_err(ConflictableTransactionError::Abort),
        None => Ok(None),
    }
}

pub fn tx_put<T: Serialize>(tree: &TransactionalTree, key: &str, doc: &T) -> TxResult<()> {
    let bytes = encode_document(doc).map_err(ConflictableTransactionError::Abort)?;
    tree.insert(key.as_bytes(), bytes)?;
    Ok(())
}

/// Points a unique value at `owner_id`, aborting when another document holds it.
pub fn claim_unique(index: &TransactionalTree, value: &str, owner_id: &str, label: &str) -> TxResult<()> {
    if let Some(owner) = index.get(value.as_bytes())? {
        if owner.as_ref() != owner_id.as_bytes() {
            return abort(HostelError::conflict(format!("{} {} already exists", label, value)));
        }
    }
    index.insert(value.as_bytes(), owner_id.as_bytes())?;
    Ok(())
}

pub fn release_unique(index: &TransactionalTree, value: &str) -> TxResult<()> {
    index.remove(value.as_bytes())?;
    Ok(())
}

/// Resolves an id-or-unique-value key to a document id.
pub fn tx_resolve(docs: &TransactionalTree, index: &TransactionalTree, key: &str) -> TxResult<Option<String>> {
    if docs.get(key.as_bytes())?.is_some() {
        return Ok(Some(key.to_string()));
    }
    match index.get(key.as_bytes())? {
        Some(id) => Ok(Some(String::from_utf8_lossy(&id).into_owned())),
        None => Ok(None),
    }
}

/// Removes a document inside a transaction, returning what was stored.
pub fn tx_take<T: DeserializeOwned>(tree: &TransactionalTree, key: &str) -> TxResult<Option<T>> {
    match tree.remove(key.as_bytes())? {
        Some(bytes) => decode_document(&bytes).map(Some).map_err(ConflictableTransactionError::Abort),
        None => Ok(None),
    }
}
