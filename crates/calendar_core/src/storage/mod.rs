//! Key-value persistence for store slices.
//!
//! # Responsibility
//! - Define the byte-store contract stores persist through.
//! - Wrap each slice in a versioned JSON envelope (`{"state": .., "version": n}`).
//!
//! # Invariants
//! - A slice is written whole; there are no partial-key updates.
//! - Unreadable or version-mismatched slices load as absent, never as an
//!   error, so a bad snapshot cannot block startup.

use crate::db::DbError;
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

mod memory;
mod sqlite;

pub use memory::MemoryStorage;
pub use sqlite::SqliteKeyValueStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure while reading or writing a persisted slice.
#[derive(Debug)]
pub enum StorageError {
    Db(DbError),
    Serialize(serde_json::Error),
    /// Backend refused the operation (used by non-SQLite backends).
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to encode persisted slice: {err}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// String key-value store shared by all stores under distinct keys.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &T {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        (**self).remove_item(key)
    }
}

/// On-disk wrapper of one slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedEnvelope<T> {
    pub state: T,
    pub version: u32,
}

/// Serializes `state` into its envelope and writes it under `key`.
pub fn write_slice<S, T>(storage: &S, key: &str, version: u32, state: &T) -> StorageResult<()>
where
    S: KeyValueStorage + ?Sized,
    T: Serialize,
{
    let envelope = PersistedEnvelope { state, version };
    let encoded = serde_json::to_string(&envelope).map_err(StorageError::Serialize)?;
    storage.set_item(key, &encoded)
}

/// Reads the slice under `key`.
///
/// Returns `Ok(None)` when the key is absent, the JSON does not decode, or
/// the stored version differs from `version`. Only backend failures are
/// errors.
pub fn read_slice<S, T>(storage: &S, key: &str, version: u32) -> StorageResult<Option<T>>
where
    S: KeyValueStorage + ?Sized,
    T: DeserializeOwned,
{
    let Some(raw) = storage.get_item(key)? else {
        return Ok(None);
    };

    let envelope: PersistedEnvelope<T> = match serde_json::from_str(&raw) {
        Ok(envelope) => envelope,
        Err(err) => {
            warn!(
                "event=slice_read module=storage status=discarded key={key} reason=decode_failed error={err}"
            );
            return Ok(None);
        }
    };

    if envelope.version != version {
        warn!(
            "event=slice_read module=storage status=discarded key={key} reason=version_mismatch stored_version={} expected_version={version}",
            envelope.version
        );
        return Ok(None);
    }

    Ok(Some(envelope.state))
}

#[cfg(test)]
mod tests {
    use super::{read_slice, write_slice, KeyValueStorage, MemoryStorage};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Counter {
        count: u32,
    }

    #[test]
    fn slice_is_wrapped_in_versioned_envelope() {
        let storage = MemoryStorage::new();
        write_slice(&storage, "counter", 0, &Counter { count: 3 }).unwrap();

        let raw = storage.get_item("counter").unwrap().unwrap();
        assert_eq!(raw, r#"{"state":{"count":3},"version":0}"#);

        let loaded: Option<Counter> = read_slice(&storage, "counter", 0).unwrap();
        assert_eq!(loaded, Some(Counter { count: 3 }));
    }

    #[test]
    fn corrupt_or_mismatched_slices_load_as_absent() {
        let storage = MemoryStorage::new();
        storage.set_item("counter", "{not json").unwrap();
        let corrupt: Option<Counter> = read_slice(&storage, "counter", 0).unwrap();
        assert_eq!(corrupt, None);

        write_slice(&storage, "counter", 2, &Counter { count: 1 }).unwrap();
        let mismatched: Option<Counter> = read_slice(&storage, "counter", 0).unwrap();
        assert_eq!(mismatched, None);

        let missing: Option<Counter> = read_slice(&storage, "other", 0).unwrap();
        assert_eq!(missing, None);
    }
}
