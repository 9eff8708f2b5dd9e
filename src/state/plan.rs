//! Workout plan: the ordered list of exercises the timer runs through

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::{Result, WorkoutError};

/// Shortest exercise the plan accepts, in seconds
pub const MIN_EXERCISE_SECONDS: u32 = 10;

/// A named exercise with its duration in whole seconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    pub duration: u32,
}

impl Exercise {
    /// Build a validated exercise. The name is trimmed first.
    pub fn new(name: &str, duration: u32) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(WorkoutError::Validation(
                "Exercise name must not be empty".to_string(),
            ));
        }
        if duration < MIN_EXERCISE_SECONDS {
            return Err(WorkoutError::Validation(format!(
                "Duration must be at least {} seconds (got {})",
                MIN_EXERCISE_SECONDS, duration
            )));
        }
        Ok(Self {
            name: name.to_string(),
            duration,
        })
    }
}

/// Ordered exercises; insertion order is execution order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkoutPlan {
    exercises: Vec<Exercise>,
}

impl WorkoutPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a plan from stored exercises, dropping any that break the
    /// name/duration rules.
    pub fn from_exercises(exercises: Vec<Exercise>) -> Self {
        let total = exercises.len();
        let exercises: Vec<Exercise> = exercises
            .into_iter()
            .filter_map(|e| Exercise::new(&e.name, e.duration).ok())
            .collect();
        if exercises.len() != total {
            warn!(
                "Dropped {} invalid exercises while rebuilding plan",
                total - exercises.len()
            );
        }
        Self { exercises }
    }

    /// Append an exercise and return its index
    pub fn add(&mut self, name: &str, duration: u32) -> Result<usize> {
        let exercise = Exercise::new(name, duration)?;
        debug!("Adding exercise {:?} ({}s)", exercise.name, exercise.duration);
        self.exercises.push(exercise);
        Ok(self.exercises.len() - 1)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Exercise> {
        self.check_index(index)?;
        Ok(self.exercises.remove(index))
    }

    pub fn can_move_up(&self, index: usize) -> bool {
        index > 0 && index < self.exercises.len()
    }

    pub fn can_move_down(&self, index: usize) -> bool {
        index + 1 < self.exercises.len()
    }

    /// Swap with the previous exercise. Fails at the first position.
    pub fn move_up(&mut self, index: usize) -> Result<()> {
        if !self.can_move_up(index) {
            return Err(self.index_error(index));
        }
        self.exercises.swap(index - 1, index);
        Ok(())
    }

    /// Swap with the next exercise. Fails at the last position.
    pub fn move_down(&mut self, index: usize) -> Result<()> {
        if !self.can_move_down(index) {
            return Err(self.index_error(index));
        }
        self.exercises.swap(index, index + 1);
        Ok(())
    }

    /// Replace the exercise at `index`, keeping its position. Nothing changes
    /// unless both the index and the new values are valid.
    pub fn edit(&mut self, index: usize, name: &str, duration: u32) -> Result<()> {
        self.check_index(index)?;
        let exercise = Exercise::new(name, duration)?;
        self.exercises[index] = exercise;
        Ok(())
    }

    /// Deep, independent copy for persistence
    pub fn snapshot(&self) -> WorkoutPlan {
        self.clone()
    }

    pub fn clear(&mut self) {
        self.exercises.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn get(&self, index: usize) -> Option<&Exercise> {
        self.exercises.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Exercise> {
        self.exercises.iter()
    }

    pub fn total_seconds(&self) -> u64 {
        self.exercises.iter().map(|e| u64::from(e.duration)).sum()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.exercises.len() {
            Ok(())
        } else {
            Err(self.index_error(index))
        }
    }

    fn index_error(&self, index: usize) -> WorkoutError {
        WorkoutError::Index {
            index,
            len: self.exercises.len(),
        }
    }
}
