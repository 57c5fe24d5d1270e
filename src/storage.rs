use crate::models::DayEntry;
use crate::theme::Theme;
use crate::trackers::TrackerList;
use crate::window::MAX_VALUE;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    collections::BTreeMap,
    env,
    path::{Path, PathBuf},
};
use tokio::fs;
use tracing::{error, warn};

const TRACKERS_KEY: &str = "trackers_list";

fn window_key(id: &str) -> String {
    format!("tracker_{id}_days")
}

fn theme_key(id: &str) -> String {
    format!("tracker_{id}_theme")
}

/// The persisted key-value store, one record per key. This is the in-memory
/// side of the storage port: all logic runs against it, and file I/O only
/// happens in [`load_store`] / [`persist_store`].
///
/// Reads never trust a record's shape. A record that fails to deserialize is
/// discarded in favor of the safe default, never surfaced as an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreData {
    pub records: BTreeMap<String, Value>,
}

impl StoreData {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.records.get(key)
    }

    pub fn set(&mut self, key: &str, value: Value) {
        self.records.insert(key.to_string(), value);
    }

    pub fn remove(&mut self, key: &str) {
        self.records.remove(key);
    }

    /// The tracker list, or the seeded single-tracker list when the record
    /// is missing or malformed.
    pub fn trackers(&self) -> TrackerList {
        match self.decode(TRACKERS_KEY) {
            Some(list) => list,
            None => TrackerList::seed(),
        }
    }

    pub fn set_trackers(&mut self, list: &TrackerList) {
        self.encode(TRACKERS_KEY, list);
    }

    /// A tracker's persisted day window, empty when missing or malformed.
    /// Values are capped on the way in so a corrupt record cannot leak an
    /// out-of-range intensity into the rest of the system.
    pub fn window(&self, id: &str) -> Vec<DayEntry> {
        let mut window: Vec<DayEntry> = self.decode(&window_key(id)).unwrap_or_default();
        for entry in &mut window {
            entry.value = entry.value.min(MAX_VALUE);
        }
        window
    }

    pub fn set_window(&mut self, id: &str, window: &[DayEntry]) {
        self.encode(&window_key(id), &window);
    }

    pub fn theme(&self, id: &str) -> Theme {
        match self.decode::<String>(&theme_key(id)) {
            Some(key) => Theme::from_key(&key),
            None => Theme::default(),
        }
    }

    pub fn set_theme(&mut self, id: &str, theme: Theme) {
        self.encode(&theme_key(id), &theme.key());
    }

    /// Drop everything belonging to a deleted tracker.
    pub fn remove_tracker_records(&mut self, id: &str) {
        self.remove(&window_key(id));
        self.remove(&theme_key(id));
    }

    fn decode<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get(key)?;
        match serde_json::from_value(value.clone()) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                warn!("discarding malformed record {key}: {err}");
                None
            }
        }
    }

    fn encode<T: Serialize>(&mut self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(encoded) => self.set(key, encoded),
            Err(err) => error!("failed to encode record {key}: {err}"),
        }
    }
}

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/heatmaps.json"))
}

pub async fn load_store(path: &Path) -> StoreData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(store) => store,
            Err(err) => {
                error!("failed to parse data file: {err}");
                StoreData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoreData::default(),
        Err(err) => {
            error!("failed to read data file: {err}");
            StoreData::default()
        }
    }
}

/// Write the store back to disk. A failed write is logged and otherwise
/// ignored: the session keeps running on in-memory state.
pub async fn persist_store(path: &Path, store: &StoreData) {
    let payload = match serde_json::to_vec_pretty(store) {
        Ok(payload) => payload,
        Err(err) => {
            error!("failed to serialize data file: {err}");
            return;
        }
    };
    if let Err(err) = fs::write(path, payload).await {
        error!("failed to write data file: {err}");
    }
}
