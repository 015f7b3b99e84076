//! Active workout types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;
use uuid::Uuid;

use crate::exercises::Exercise;
use crate::routines::{PlannedSet, RoutineExercise};

/// One logged set.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SetLog {
    /// Load in kilograms
    pub weight_kg: f32,
    /// Repetitions performed
    pub reps: u32,
}

impl From<&PlannedSet> for SetLog {
    fn from(planned: &PlannedSet) -> Self {
        Self {
            weight_kg: planned.weight_kg,
            reps: planned.reps,
        }
    }
}

/// Ordered set log for one exercise of the active workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseLog {
    /// Exercise catalog id (unique within the workout)
    pub exercise_id: String,
    /// Display name
    pub name: String,
    /// Rest between sets in seconds
    pub rest_seconds: u32,
    /// Logged sets; the position is the set index
    pub sets: Vec<SetLog>,
}

impl From<&RoutineExercise> for ExerciseLog {
    fn from(exercise: &RoutineExercise) -> Self {
        Self {
            exercise_id: exercise.exercise_id.clone(),
            name: exercise.name.clone(),
            rest_seconds: exercise.rest_seconds,
            sets: exercise.sets.iter().map(SetLog::from).collect(),
        }
    }
}

/// Marker for a completed set.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SetKey {
    pub exercise_id: String,
    pub set_index: usize,
}

impl SetKey {
    pub fn new(exercise_id: impl Into<String>, set_index: usize) -> Self {
        Self {
            exercise_id: exercise_id.into(),
            set_index,
        }
    }
}

/// Field of a set being logged, carrying the new value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SetField {
    Weight(f32),
    Reps(u32),
}

/// Identity of an exercise swapped into a workout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseRef {
    pub exercise_id: String,
    pub name: String,
}

impl ExerciseRef {
    pub fn new(exercise_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            exercise_id: exercise_id.into(),
            name: name.into(),
        }
    }
}

impl From<&Exercise> for ExerciseRef {
    fn from(exercise: &Exercise) -> Self {
        Self::new(exercise.id, exercise.name)
    }
}

/// The workout currently being performed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveWorkout {
    /// Session identifier, reused by the history record
    pub id: Uuid,
    /// User performing the workout
    pub user_id: Uuid,
    /// Routine the workout was started from
    pub routine_id: Uuid,
    /// Routine name at start time
    pub routine_name: String,
    /// Selected day index
    pub day_index: u8,
    /// Selected day label
    pub day_label: String,
    /// Start timestamp
    pub started_at: DateTime<Utc>,
    /// Per-exercise set logs in routine order
    pub exercises: Vec<ExerciseLog>,
    /// Completed-set markers
    pub completed_sets: BTreeSet<SetKey>,
}

impl ActiveWorkout {
    /// Find the log for an exercise.
    pub fn exercise(&self, exercise_id: &str) -> Option<&ExerciseLog> {
        self.exercises.iter().find(|e| e.exercise_id == exercise_id)
    }

    pub(crate) fn exercise_mut(&mut self, exercise_id: &str) -> Option<&mut ExerciseLog> {
        self.exercises
            .iter_mut()
            .find(|e| e.exercise_id == exercise_id)
    }

    /// Check whether a set is marked complete.
    pub fn is_set_complete(&self, exercise_id: &str, set_index: usize) -> bool {
        self.completed_sets
            .contains(&SetKey::new(exercise_id, set_index))
    }

    /// Completed and total set counts.
    pub fn progress(&self) -> WorkoutProgress {
        WorkoutProgress {
            completed_sets: self.completed_sets.len(),
            total_sets: self.exercises.iter().map(|e| e.sets.len()).sum(),
        }
    }

    /// Seconds since the workout started.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> u64 {
        (now - self.started_at).num_seconds().max(0) as u64
    }
}

/// Set completion counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkoutProgress {
    pub completed_sets: usize,
    pub total_sets: usize,
}

impl WorkoutProgress {
    /// Fraction of sets completed (0.0 to 1.0).
    pub fn fraction(&self) -> f32 {
        if self.total_sets == 0 {
            0.0
        } else {
            self.completed_sets as f32 / self.total_sets as f32
        }
    }
}

/// Result of advancing the session by one second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    /// Rest countdown reached zero on this tick
    pub rest_finished: bool,
    /// Seconds of rest left, if resting
    pub rest_remaining: Option<u32>,
}

/// Errors related to active workout operations.
///
/// Every error leaves the session unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    /// No workout in progress
    #[error("No active workout")]
    NoActiveWorkout,

    /// Selected day does not exist in the routine
    #[error("Day {0} not found in routine")]
    DayNotFound(u8),

    /// Exercise is not part of the active workout
    #[error("Exercise not in workout: {0}")]
    ExerciseNotFound(String),

    /// Set index out of range
    #[error("Set {set_index} not found for {exercise_id}")]
    SetNotFound {
        exercise_id: String,
        set_index: usize,
    },

    /// Exercise appears more than once
    #[error("Exercise already in workout: {0}")]
    DuplicateExercise(String),

    /// Logged value is not acceptable
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}
