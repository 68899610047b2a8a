use crate::errors::StoreError;
use crate::models::{Record, RecordKind};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::{error, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StoreKey {
    CalorieLimit,
    TotalCalories,
    Meals,
    Workouts,
}

impl StoreKey {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreKey::CalorieLimit => "calorieLimit",
            StoreKey::TotalCalories => "totalCalories",
            StoreKey::Meals => "meals",
            StoreKey::Workouts => "workouts",
        }
    }

    pub fn records(kind: RecordKind) -> Self {
        match kind {
            RecordKind::Meal => StoreKey::Meals,
            RecordKind::Workout => StoreKey::Workouts,
        }
    }
}

/// Key-value persistence used by the tracker.
///
/// Reads never fail: an absent or unreadable value yields the default. Writes
/// are synchronous and report backend failures.
pub trait Store {
    fn get_number(&self, key: StoreKey, default: i64) -> i64;

    fn set_number(&mut self, key: StoreKey, value: i64) -> Result<(), StoreError>;

    /// Ordered records under `key`, empty when absent.
    fn get_records(&self, key: StoreKey) -> Vec<Record>;

    fn append_record(&mut self, key: StoreKey, record: &Record) -> Result<(), StoreError>;

    fn remove_record(&mut self, key: StoreKey, id: Uuid) -> Result<(), StoreError>;

    fn clear_keys(&mut self, keys: &[StoreKey]) -> Result<(), StoreError>;
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn get_number(&self, key: StoreKey, default: i64) -> i64 {
        (**self).get_number(key, default)
    }

    fn set_number(&mut self, key: StoreKey, value: i64) -> Result<(), StoreError> {
        (**self).set_number(key, value)
    }

    fn get_records(&self, key: StoreKey) -> Vec<Record> {
        (**self).get_records(key)
    }

    fn append_record(&mut self, key: StoreKey, record: &Record) -> Result<(), StoreError> {
        (**self).append_record(key, record)
    }

    fn remove_record(&mut self, key: StoreKey, id: Uuid) -> Result<(), StoreError> {
        (**self).remove_record(key, id)
    }

    fn clear_keys(&mut self, keys: &[StoreKey]) -> Result<(), StoreError> {
        (**self).clear_keys(keys)
    }
}

/// Raw key-value contents shared by both store backends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredData {
    values: BTreeMap<String, Value>,
}

impl StoredData {
    fn number(&self, key: StoreKey) -> Option<i64> {
        let value = self.values.get(key.as_str())?;
        let parsed = match value {
            Value::Number(number) => number.as_i64(),
            Value::String(text) => text.trim().parse().ok(),
            _ => None,
        };
        if parsed.is_none() {
            warn!(key = key.as_str(), "ignoring non-numeric stored value");
        }
        parsed
    }

    fn set_number(&mut self, key: StoreKey, value: i64) {
        self.values.insert(key.as_str().to_string(), Value::from(value));
    }

    fn records(&self, key: StoreKey) -> Vec<Record> {
        let Some(value) = self.values.get(key.as_str()) else {
            return Vec::new();
        };
        match serde_json::from_value(value.clone()) {
            Ok(records) => records,
            Err(err) => {
                warn!(key = key.as_str(), "ignoring unreadable stored records: {err}");
                Vec::new()
            }
        }
    }

    fn set_records(&mut self, key: StoreKey, records: &[Record]) -> Result<(), StoreError> {
        let value = serde_json::to_value(records)?;
        self.values.insert(key.as_str().to_string(), value);
        Ok(())
    }

    fn append_record(&mut self, key: StoreKey, record: &Record) -> Result<(), StoreError> {
        let mut records = self.records(key);
        records.push(record.clone());
        self.set_records(key, &records)
    }

    fn remove_record(&mut self, key: StoreKey, id: Uuid) -> Result<(), StoreError> {
        let mut records = self.records(key);
        records.retain(|record| record.id != id);
        self.set_records(key, &records)
    }

    fn clear(&mut self, keys: &[StoreKey]) {
        for key in keys {
            self.values.remove(key.as_str());
        }
    }

    fn contains(&self, key: StoreKey) -> bool {
        self.values.contains_key(key.as_str())
    }
}

/// Store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    data: StoredData,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: StoreKey) -> bool {
        self.data.contains(key)
    }
}

impl Store for MemoryStore {
    fn get_number(&self, key: StoreKey, default: i64) -> i64 {
        self.data.number(key).unwrap_or(default)
    }

    fn set_number(&mut self, key: StoreKey, value: i64) -> Result<(), StoreError> {
        self.data.set_number(key, value);
        Ok(())
    }

    fn get_records(&self, key: StoreKey) -> Vec<Record> {
        self.data.records(key)
    }

    fn append_record(&mut self, key: StoreKey, record: &Record) -> Result<(), StoreError> {
        self.data.append_record(key, record)
    }

    fn remove_record(&mut self, key: StoreKey, id: Uuid) -> Result<(), StoreError> {
        self.data.remove_record(key, id)
    }

    fn clear_keys(&mut self, keys: &[StoreKey]) -> Result<(), StoreError> {
        self.data.clear(keys);
        Ok(())
    }
}

/// Store backed by a single JSON document on disk, rewritten after every
/// change.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    data: StoredData,
}

impl JsonFileStore {
    /// Opens the store at `path`. A missing file starts empty; an unparsable
    /// one is renamed to [`corrupt_path`] and the store starts empty.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let data = match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(data) => data,
                Err(err) => {
                    error!("failed to parse data file: {err}");
                    set_aside(&path).await;
                    StoredData::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => StoredData::default(),
            Err(err) => {
                error!("failed to read data file: {err}");
                StoredData::default()
            }
        };
        Self { path, data }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StoreError> {
        let payload = serde_json::to_vec_pretty(&self.data)?;
        let tmp = self.path.with_extension("json.tmp");
        blocking(|| {
            std::fs::write(&tmp, payload)?;
            std::fs::rename(&tmp, &self.path)
        })?;
        Ok(())
    }
}

/// Path an unparsable data file is moved to before starting empty.
pub fn corrupt_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".corrupt");
    PathBuf::from(name)
}

async fn set_aside(path: &Path) {
    let target = corrupt_path(path);
    match fs::rename(path, &target).await {
        Ok(()) => warn!(target = %target.display(), "moved unreadable data file aside"),
        Err(err) => error!("failed to move unreadable data file aside: {err}"),
    }
}

/// Runs blocking file I/O without stalling other tasks on a multi-threaded
/// runtime. Elsewhere (current-thread runtime, no runtime) it runs inline.
fn blocking<T>(f: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(f)
        }
        _ => f(),
    }
}

impl Store for JsonFileStore {
    fn get_number(&self, key: StoreKey, default: i64) -> i64 {
        self.data.number(key).unwrap_or(default)
    }

    fn set_number(&mut self, key: StoreKey, value: i64) -> Result<(), StoreError> {
        self.data.set_number(key, value);
        self.flush()
    }

    fn get_records(&self, key: StoreKey) -> Vec<Record> {
        self.data.records(key)
    }

    fn append_record(&mut self, key: StoreKey, record: &Record) -> Result<(), StoreError> {
        self.data.append_record(key, record)?;
        self.flush()
    }

    fn remove_record(&mut self, key: StoreKey, id: Uuid) -> Result<(), StoreError> {
        self.data.remove_record(key, id)?;
        self.flush()
    }

    fn clear_keys(&mut self, keys: &[StoreKey]) -> Result<(), StoreError> {
        self.data.clear(keys);
        self.flush()
    }
}
