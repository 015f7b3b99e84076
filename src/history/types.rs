//! Workout history records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One set as it was left at the end of a workout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompletedSet {
    /// Load in kilograms
    pub weight_kg: f32,
    /// Repetitions
    pub reps: u32,
    /// Whether the set was marked complete
    pub completed: bool,
}

impl CompletedSet {
    /// Weight × reps, counted only for completed sets.
    pub fn volume_kg(&self) -> f32 {
        if self.completed {
            self.weight_kg * self.reps as f32
        } else {
            0.0
        }
    }
}

/// One exercise of a finished workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedExercise {
    pub exercise_id: String,
    pub name: String,
    pub sets: Vec<CompletedSet>,
}

impl CompletedExercise {
    /// Number of sets marked complete.
    pub fn completed_sets(&self) -> usize {
        self.sets.iter().filter(|s| s.completed).count()
    }
}

/// A finished workout session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletedWorkout {
    /// Unique identifier
    pub id: Uuid,
    /// User who performed the workout
    pub user_id: Uuid,
    /// Routine the workout came from
    pub routine_id: Uuid,
    /// Routine name at the time
    pub routine_name: String,
    /// Day index within the routine
    pub day_index: u8,
    /// Day label
    pub day_label: String,
    /// Start timestamp
    pub started_at: DateTime<Utc>,
    /// Finish timestamp
    pub finished_at: DateTime<Utc>,
    /// Wall-clock duration in seconds
    pub duration_seconds: u32,
    /// Exercises in workout order
    pub exercises: Vec<CompletedExercise>,
}

impl CompletedWorkout {
    /// Total volume over completed sets.
    pub fn volume_kg(&self) -> f32 {
        self.exercises
            .iter()
            .flat_map(|e| e.sets.iter())
            .map(CompletedSet::volume_kg)
            .sum()
    }

    /// Number of completed sets.
    pub fn completed_sets(&self) -> usize {
        self.exercises.iter().map(CompletedExercise::completed_sets).sum()
    }
}
