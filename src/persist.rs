//! Persisted state.
//!
//! Four logical keys under a `shift-schedule-` prefix plus a schema
//! version key, behind a pluggable [`KeyValueStore`]. All mutations go
//! through one [`StateOwner`], which deep-merges stored JSON over the
//! compiled-in defaults on read (additive schema changes need no
//! migration) and performs targeted cleanup on a version bump. Storage
//! failures degrade to defaults with a logged warning; they never block
//! evaluation.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{ConstraintConfig, Schedule, ShiftAssignment, Staff};

/// Key prefix shared by all persisted entries.
pub const KEY_PREFIX: &str = "shift-schedule-";
pub const CONFIG_KEY: &str = "shift-schedule-config";
pub const STAFF_KEY: &str = "shift-schedule-staff";
pub const SCHEDULE_KEY: &str = "shift-schedule-schedule";
pub const PREVIOUS_PERIOD_KEY: &str = "shift-schedule-previous-period-end";
pub const SCHEMA_VERSION_KEY: &str = "shift-schedule-schema-version";

/// Current persisted-schema version.
pub const SCHEMA_VERSION: u32 = 2;

/// Persistence-layer failure.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("import bundle missing required field `{0}`")]
    InvalidBundle(&'static str),
}

/// Minimal keyed string storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store (tests, previews).
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    /// Opens (creating if needed) the storage directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for DirStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        Ok(fs::write(self.path_for(key), value)?)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Deep-merges `stored` over `defaults`.
///
/// Object keys merge recursively: keys absent in storage keep their
/// default, keys absent in the defaults are preserved as stored. Any
/// non-object value in `stored` wins outright.
pub fn deep_merge(defaults: &Value, stored: &Value) -> Value {
    match (defaults, stored) {
        (Value::Object(d), Value::Object(s)) => {
            let mut merged = d.clone();
            for (key, stored_value) in s {
                let value = match d.get(key) {
                    Some(default_value) => deep_merge(default_value, stored_value),
                    None => stored_value.clone(),
                };
                merged.insert(key.clone(), value);
            }
            Value::Object(merged)
        }
        _ => stored.clone(),
    }
}

/// Self-contained export of the whole application state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub version: u32,
    pub exported_at: DateTime<Utc>,
    pub staff: Vec<Staff>,
    pub schedule: Schedule,
    pub config: ConstraintConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_period_end: Option<Vec<ShiftAssignment>>,
}

impl ExportBundle {
    /// Bundles the current state under the current schema version.
    pub fn new(
        staff: Vec<Staff>,
        schedule: Schedule,
        config: ConstraintConfig,
        previous_period_end: Option<Vec<ShiftAssignment>>,
    ) -> Self {
        Self {
            version: SCHEMA_VERSION,
            exported_at: Utc::now(),
            staff,
            schedule,
            config,
            previous_period_end,
        }
    }

    /// Parses and validates an import payload.
    ///
    /// `version`, `staff`, `schedule`, and `config` must all be present.
    pub fn parse(json: &str) -> Result<Self, StorageError> {
        let value: Value = serde_json::from_str(json)?;
        for field in ["version", "staff", "schedule", "config"] {
            if value.get(field).is_none() {
                return Err(StorageError::InvalidBundle(field));
            }
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// The single owner of the persisted keys.
///
/// Opening runs the schema migration; reads deep-merge over defaults and
/// fall back to them on any storage failure.
#[derive(Debug)]
pub struct StateOwner<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> StateOwner<S> {
    /// Opens the store and applies any pending schema migration.
    pub fn open(store: S) -> Self {
        let mut owner = Self { store };
        owner.migrate();
        owner
    }

    fn stored_version(&self) -> Option<u32> {
        match self.store.get(SCHEMA_VERSION_KEY) {
            Ok(Some(text)) => text.trim().parse().ok(),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "schema version unreadable");
                None
            }
        }
    }

    /// Version-bump cleanup: dependent keys are cleared and the stored
    /// config is rewritten with obsolete top-level fields stripped.
    fn migrate(&mut self) {
        let stored = self.stored_version();
        match stored {
            Some(v) if v == SCHEMA_VERSION => return,
            Some(v) if v > SCHEMA_VERSION => {
                warn!(stored = v, current = SCHEMA_VERSION, "newer schema on disk; leaving as-is");
                return;
            }
            _ => {}
        }

        if stored.is_some() {
            info!(from = stored, to = SCHEMA_VERSION, "migrating persisted schema");
            for key in [SCHEDULE_KEY, PREVIOUS_PERIOD_KEY] {
                if let Err(e) = self.store.remove(key) {
                    warn!(key, error = %e, "failed clearing dependent key");
                }
            }
            self.strip_obsolete_config_fields();
        }

        if let Err(e) = self.store.set(SCHEMA_VERSION_KEY, &SCHEMA_VERSION.to_string()) {
            warn!(error = %e, "failed writing schema version");
        }
    }

    fn strip_obsolete_config_fields(&mut self) {
        let Ok(Some(text)) = self.store.get(CONFIG_KEY) else {
            return;
        };
        let Ok(Value::Object(mut stored)) = serde_json::from_str::<Value>(&text) else {
            return;
        };
        let Ok(Value::Object(defaults)) = serde_json::to_value(ConstraintConfig::default()) else {
            return;
        };
        stored.retain(|key, _| defaults.contains_key(key));
        if let Ok(text) = serde_json::to_string(&Value::Object(stored)) {
            if let Err(e) = self.store.set(CONFIG_KEY, &text) {
                warn!(error = %e, "failed rewriting config during migration");
            }
        }
    }

    fn load_merged<T>(&self, key: &str, defaults: T) -> T
    where
        T: Serialize + serde::de::DeserializeOwned,
    {
        let stored = match self.store.get(key) {
            Ok(Some(text)) => text,
            Ok(None) => return defaults,
            Err(e) => {
                warn!(key, error = %e, "storage read failed; using defaults");
                return defaults;
            }
        };
        let stored_value: Value = match serde_json::from_str(&stored) {
            Ok(v) => v,
            Err(e) => {
                warn!(key, error = %e, "corrupt stored JSON; using defaults");
                return defaults;
            }
        };
        let default_value = match serde_json::to_value(&defaults) {
            Ok(v) => v,
            Err(_) => return defaults,
        };
        match serde_json::from_value(deep_merge(&default_value, &stored_value)) {
            Ok(v) => v,
            Err(e) => {
                warn!(key, error = %e, "merged state unparsable; using defaults");
                defaults
            }
        }
    }

    fn save<T: Serialize>(&mut self, key: &str, value: &T) -> Result<(), StorageError> {
        let text = serde_json::to_string(value)?;
        self.store.set(key, &text)
    }

    /// Loads the config, deep-merged over the compiled-in defaults.
    pub fn load_config(&self) -> ConstraintConfig {
        self.load_merged(CONFIG_KEY, ConstraintConfig::default())
    }

    pub fn save_config(&mut self, config: &ConstraintConfig) -> Result<(), StorageError> {
        self.save(CONFIG_KEY, config)
    }

    /// Loads the staff roster (empty when absent or unreadable).
    pub fn load_staff(&self) -> Vec<Staff> {
        self.load_merged(STAFF_KEY, Vec::new())
    }

    pub fn save_staff(&mut self, staff: &[Staff]) -> Result<(), StorageError> {
        self.save(STAFF_KEY, &staff)
    }

    /// Loads the schedule, if one is stored and parses.
    pub fn load_schedule(&self) -> Option<Schedule> {
        match self.store.get(SCHEDULE_KEY) {
            Ok(Some(text)) => match serde_json::from_str(&text) {
                Ok(s) => Some(s),
                Err(e) => {
                    warn!(error = %e, "corrupt stored schedule");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "storage read failed for schedule");
                None
            }
        }
    }

    pub fn save_schedule(&mut self, schedule: &Schedule) -> Result<(), StorageError> {
        self.save(SCHEDULE_KEY, schedule)
    }

    /// Loads the previous-period trail (empty when absent).
    pub fn load_previous_period(&self) -> Vec<ShiftAssignment> {
        self.load_merged(PREVIOUS_PERIOD_KEY, Vec::new())
    }

    pub fn save_previous_period(
        &mut self,
        trail: &[ShiftAssignment],
    ) -> Result<(), StorageError> {
        self.save(PREVIOUS_PERIOD_KEY, &trail)
    }

    /// Imports a bundle, replacing every persisted key.
    pub fn import(&mut self, json: &str) -> Result<ExportBundle, StorageError> {
        let bundle = ExportBundle::parse(json)?;
        self.save(STAFF_KEY, &bundle.staff)?;
        self.save(SCHEDULE_KEY, &bundle.schedule)?;
        self.save(CONFIG_KEY, &bundle.config)?;
        match &bundle.previous_period_end {
            Some(trail) => self.save(PREVIOUS_PERIOD_KEY, trail)?,
            None => self.store.remove(PREVIOUS_PERIOD_KEY)?,
        }
        self.store
            .set(SCHEMA_VERSION_KEY, &SCHEMA_VERSION.to_string())?;
        Ok(bundle)
    }
}
