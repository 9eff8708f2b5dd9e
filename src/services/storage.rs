//! Saved workout persistence on top of a string key-value store

use std::collections::{BTreeMap, HashMap};
use std::error::Error;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::state::{Exercise, WorkoutError, WorkoutPlan};

/// Key holding the title → plan mapping
pub const SAVED_WORKOUTS_KEY: &str = "intervalCoach.workouts";
/// Older layout: an ordered list of `{title, exercises}`
pub const LEGACY_WORKOUTS_KEY: &str = "intervalCoach.workoutList";

#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Malformed(serde_json::Error),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "store I/O error: {}", e),
            StoreError::Malformed(e) => write!(f, "store contents malformed: {}", e),
        }
    }
}

impl Error for StoreError {}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Malformed(e)
    }
}

impl From<StoreError> for WorkoutError {
    fn from(e: StoreError) -> Self {
        WorkoutError::Storage(e.to_string())
    }
}

/// Minimal string key-value store
pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store, used by tests and as a fallback
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
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file (key → string value)
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value);
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// Title → plan snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SavedWorkouts(BTreeMap<String, WorkoutPlan>);

impl SavedWorkouts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a deep copy of `plan` under `title`, replacing any previous one
    pub fn insert(&mut self, title: &str, plan: &WorkoutPlan) {
        self.0.insert(title.to_string(), plan.snapshot());
    }

    /// Deep copy of the plan saved under `title`
    pub fn get(&self, title: &str) -> Option<WorkoutPlan> {
        self.0.get(title).map(WorkoutPlan::snapshot)
    }

    pub fn remove(&mut self, title: &str) -> Option<WorkoutPlan> {
        self.0.remove(title)
    }

    pub fn titles(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct LegacyWorkout {
    title: String,
    #[serde(default)]
    exercises: Vec<Exercise>,
}

/// Saved workout plans kept in a key-value store
pub struct WorkoutLibrary {
    store: Box<dyn KeyValueStore>,
}

impl WorkoutLibrary {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Read every saved workout. Missing or malformed data reads as empty;
    /// a legacy list is folded into the mapping and its key removed.
    pub fn load(&mut self) -> SavedWorkouts {
        let mut saved = self.read_current();

        if let Some(legacy) = self.read_legacy() {
            let migrated = legacy.len();
            for workout in legacy {
                let title = workout.title.trim();
                if title.is_empty() || saved.0.contains_key(title) {
                    continue;
                }
                saved
                    .0
                    .insert(title.to_string(), WorkoutPlan::from_exercises(workout.exercises));
            }

            match self.save(&saved) {
                Ok(()) => {
                    if let Err(e) = self.store.remove(LEGACY_WORKOUTS_KEY) {
                        warn!("Failed to remove legacy workouts key: {}", e);
                    }
                    info!("Migrated {} legacy workouts", migrated);
                }
                Err(e) => warn!("Failed to persist migrated workouts: {}", e),
            }
        }

        saved
    }

    pub fn save(&mut self, saved: &SavedWorkouts) -> Result<(), StoreError> {
        let json = serde_json::to_string(saved)?;
        self.store.set(SAVED_WORKOUTS_KEY, json)?;
        debug!("Saved {} workouts", saved.len());
        Ok(())
    }

    /// Save a snapshot of `plan` under `title`
    pub fn save_plan(&mut self, title: &str, plan: &WorkoutPlan) -> Result<(), WorkoutError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(WorkoutError::Validation(
                "Workout title must not be empty".to_string(),
            ));
        }
        if plan.is_empty() {
            return Err(WorkoutError::Validation(
                "Cannot save a workout with no exercises".to_string(),
            ));
        }

        let mut saved = self.load();
        saved.insert(title, plan);
        self.save(&saved)?;
        info!("Saved workout {:?} ({} exercises)", title, plan.len());
        Ok(())
    }

    pub fn load_plan(&mut self, title: &str) -> Option<WorkoutPlan> {
        self.load().get(title.trim())
    }

    pub fn titles(&mut self) -> Vec<String> {
        self.load().titles()
    }

    /// Remove a saved workout; returns whether it existed
    pub fn delete(&mut self, title: &str) -> Result<bool, WorkoutError> {
        let mut saved = self.load();
        if saved.remove(title.trim()).is_none() {
            return Ok(false);
        }
        self.save(&saved)?;
        info!("Deleted workout {:?}", title.trim());
        Ok(true)
    }

    fn read_current(&self) -> SavedWorkouts {
        let raw = match self.store.get(SAVED_WORKOUTS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return SavedWorkouts::new(),
            Err(e) => {
                warn!("Failed to read saved workouts: {}", e);
                return SavedWorkouts::new();
            }
        };

        match serde_json::from_str::<BTreeMap<String, Vec<Exercise>>>(&raw) {
            Ok(map) => SavedWorkouts(
                map.into_iter()
                    .map(|(title, exercises)| (title, WorkoutPlan::from_exercises(exercises)))
                    .collect(),
            ),
            Err(e) => {
                warn!("Ignoring malformed saved workouts: {}", e);
                SavedWorkouts::new()
            }
        }
    }

    fn read_legacy(&self) -> Option<Vec<LegacyWorkout>> {
        let raw = match self.store.get(LEGACY_WORKOUTS_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Failed to read legacy workouts: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(list) => Some(list),
            Err(e) => {
                warn!("Leaving malformed legacy workouts in place: {}", e);
                None
            }
        }
    }
}
