//! Key-value persistence for the sheet.
//!
//! Three keys hold the whole sheet: the deliveries and the costs as JSON
//! arrays, and the title as plain text. Reading never fails: a missing or
//! malformed entry falls back to an empty list (or the default title).

use crate::error::Result;
use delivery_sheet_common::{CostRecord, DeliveryRecord, Sheet, DEFAULT_TITLE};
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const DELIVERIES_KEY: &str = "spreadsheetDeliveryData";
pub const COSTS_KEY: &str = "spreadsheetCostsData";
pub const TITLE_KEY: &str = "spreadsheetTitle";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-process store, used by tests and embedders.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Single JSON object file mapping keys to string values.
///
/// Every write is flushed to disk immediately.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store at `path`. A missing or unreadable file starts empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("ignoring malformed storage file {}: {}", path.display(), e);
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                warn!("cannot read storage file {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, content)?;
        debug!("storage written to {}", self.path.display());
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) -> Result<()> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

fn load_list<T, S>(store: &S, key: &str) -> Vec<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    match store.get(key) {
        Some(json) => serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!("discarding malformed value for {}: {}", key, e);
            Vec::new()
        }),
        None => Vec::new(),
    }
}

/// Rebuilds the sheet from the store.
pub fn load_sheet<S: KeyValueStore + ?Sized>(store: &S) -> Sheet {
    let deliveries: Vec<DeliveryRecord> = load_list(store, DELIVERIES_KEY);
    let costs: Vec<CostRecord> = load_list(store, COSTS_KEY);
    let title = store
        .get(TITLE_KEY)
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    debug!(
        "loaded sheet \"{}\": {} deliveries, {} costs",
        title,
        deliveries.len(),
        costs.len()
    );
    Sheet::from_parts(title, deliveries, costs)
}

/// Writes all three keys.
pub fn save_sheet<S: KeyValueStore + ?Sized>(sheet: &Sheet, store: &mut S) -> Result<()> {
    store.set(DELIVERIES_KEY, serde_json::to_string(sheet.deliveries())?)?;
    store.set(COSTS_KEY, serde_json::to_string(sheet.costs())?)?;
    store.set(TITLE_KEY, sheet.title().to_string())?;
    Ok(())
}
