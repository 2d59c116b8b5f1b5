#![allow(dead_code)]

use calendar_core::storage::StorageResult;
use calendar_core::{AppearanceHub, ColorScheme, KeyValueStorage, MemoryStorage, StorageError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Memory storage whose writes can be switched to fail.
#[derive(Clone, Default)]
pub struct FlakyStorage {
    inner: MemoryStorage,
    fail_writes: Arc<AtomicBool>,
    fail_reads: Arc<AtomicBool>,
}

impl FlakyStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.get_item(key).unwrap()
    }
}

impl KeyValueStorage for FlakyStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(format!("read {key}")));
        }
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(format!("write {key}")));
        }
        self.inner.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable(format!("remove {key}")));
        }
        self.inner.remove_item(key)
    }
}

pub fn light_hub() -> Arc<AppearanceHub> {
    Arc::new(AppearanceHub::new(Some(ColorScheme::Light)))
}
