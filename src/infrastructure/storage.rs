use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo::storage::{LocalStorage, Storage, errors::StorageError};

use crate::domain::{
    errors::{AppError, AppResult},
    logging::LogComponent,
    market_data::{Candle, CandleStorage},
};
use crate::log_warn;

/// Browser `localStorage`, one JSON array of candles per key
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalCandleStorage;

impl LocalCandleStorage {
    pub fn new() -> Self {
        Self
    }

    /// `localStorage` can be missing (privacy modes, sandboxed frames).
    pub fn is_available() -> bool {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten()).is_some()
    }
}

impl CandleStorage for LocalCandleStorage {
    fn load(&self, key: &str) -> AppResult<Option<Vec<Candle>>> {
        match LocalStorage::get::<Vec<Candle>>(key) {
            Ok(candles) => Ok(Some(candles)),
            Err(StorageError::KeyNotFound(_)) => Ok(None),
            Err(e) => Err(AppError::Storage(e.to_string())),
        }
    }

    fn save(&mut self, key: &str, candles: &[Candle]) -> AppResult<()> {
        LocalStorage::set(key, candles).map_err(|e| {
            log_warn!(LogComponent::Infrastructure("Storage"), "failed to persist {}: {}", key, e);
            AppError::Storage(e.to_string())
        })
    }

    fn remove(&mut self, key: &str) -> AppResult<()> {
        LocalStorage::delete(key);
        Ok(())
    }
}

/// In-memory stand-in holding the same JSON text `localStorage` would.
///
/// Clones share one map, so a test can inspect what a session persisted.
#[derive(Debug, Default, Clone)]
pub struct MemoryCandleStorage {
    records: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryCandleStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored value under `key`
    pub fn raw(&self, key: &str) -> Option<String> {
        self.records.borrow().get(key).cloned()
    }

    pub fn insert_raw(&self, key: &str, value: &str) {
        self.records.borrow_mut().insert(key.to_string(), value.to_string());
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.records.borrow().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl CandleStorage for MemoryCandleStorage {
    fn load(&self, key: &str) -> AppResult<Option<Vec<Candle>>> {
        match self.records.borrow().get(key) {
            Some(raw) => serde_json::from_str(raw).map(Some).map_err(|e| AppError::Storage(e.to_string())),
            None => Ok(None),
        }
    }

    fn save(&mut self, key: &str, candles: &[Candle]) -> AppResult<()> {
        let raw = serde_json::to_string(candles)?;
        self.records.borrow_mut().insert(key.to_string(), raw);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> AppResult<()> {
        self.records.borrow_mut().remove(key);
        Ok(())
    }
}

/// `localStorage` when the browser offers it, memory otherwise
pub fn default_storage() -> Box<dyn CandleStorage> {
    if LocalCandleStorage::is_available() {
        Box::new(LocalCandleStorage::new())
    } else {
        log_warn!(
            LogComponent::Infrastructure("Storage"),
            "localStorage unavailable, candles will not survive a reload"
        );
        Box::new(MemoryCandleStorage::new())
    }
}
