//! Routine types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

use crate::exercises::find_exercise;
use crate::templates::StarterTemplate;

/// One planned set of an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlannedSet {
    /// Planned load in kilograms
    pub weight_kg: f32,
    /// Planned repetitions
    pub reps: u32,
}

impl PlannedSet {
    pub fn new(weight_kg: f32, reps: u32) -> Self {
        Self { weight_kg, reps }
    }
}

/// An exercise slot within a routine day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineExercise {
    /// Exercise catalog id
    pub exercise_id: String,
    /// Display name
    pub name: String,
    /// Rest between sets in seconds
    pub rest_seconds: u32,
    /// Planned sets in order
    pub sets: Vec<PlannedSet>,
}

/// One labeled training day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutineDay {
    /// Position of the day within the week
    pub index: u8,
    /// Day label (an i18n key for template-derived routines)
    pub label: String,
    /// Exercises in order
    pub exercises: Vec<RoutineExercise>,
}

impl RoutineDay {
    /// Total planned sets across all exercises.
    pub fn total_sets(&self) -> usize {
        self.exercises.iter().map(|e| e.sets.len()).sum()
    }
}

/// A weekly training plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Routine {
    /// Unique identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Routine name
    pub name: String,
    /// Starter template this routine was built from
    pub template_id: Option<String>,
    /// Training days in order
    pub days: Vec<RoutineDay>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Routine {
    /// Create an empty routine.
    pub fn new(user_id: Uuid, name: String, days: Vec<RoutineDay>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            template_id: None,
            days,
            created_at: now,
            updated_at: now,
        }
    }

    /// Bootstrap a routine from a starter template.
    ///
    /// Planned weights start at zero; reps come from the template.
    pub fn from_template(user_id: Uuid, template: &StarterTemplate, rest_seconds: u32) -> Self {
        let days = template
            .days
            .iter()
            .map(|day| RoutineDay {
                index: day.index,
                label: day.label_key.to_string(),
                exercises: day
                    .exercises
                    .iter()
                    .map(|planned| RoutineExercise {
                        exercise_id: planned.exercise_id.to_string(),
                        name: find_exercise(planned.exercise_id)
                            .map(|e| e.name.to_string())
                            .unwrap_or_else(|| planned.exercise_id.to_string()),
                        rest_seconds,
                        sets: (0..planned.sets)
                            .map(|_| PlannedSet::new(0.0, planned.reps))
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        let mut routine = Self::new(user_id, template.name_key.to_string(), days);
        routine.template_id = Some(template.id.to_string());

        tracing::info!(template = template.id, "Built routine from starter template");
        routine
    }

    /// Look up a day by its index.
    pub fn day(&self, index: u8) -> Option<&RoutineDay> {
        self.days.iter().find(|d| d.index == index)
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), RoutineError> {
        if self.name.trim().is_empty() {
            return Err(RoutineError::Invalid("Routine name is empty".to_string()));
        }

        let mut indices = HashSet::new();
        for day in &self.days {
            if !indices.insert(day.index) {
                return Err(RoutineError::Invalid(format!(
                    "Duplicate day index {}",
                    day.index
                )));
            }

            let mut exercise_ids = HashSet::new();
            for exercise in &day.exercises {
                if !exercise_ids.insert(exercise.exercise_id.as_str()) {
                    return Err(RoutineError::Invalid(format!(
                        "Exercise {} appears twice on day {}",
                        exercise.exercise_id, day.index
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Errors related to routine operations.
#[derive(Debug, Error)]
pub enum RoutineError {
    /// Routine not found
    #[error("Routine not found: {0}")]
    NotFound(Uuid),

    /// Day not found in routine
    #[error("Day {0} not found in routine")]
    DayNotFound(u8),

    /// Invalid routine structure
    #[error("Invalid routine: {0}")]
    Invalid(String),

    /// Storage write failed; the in-memory change was rolled back
    #[error("Storage error: {0}")]
    Storage(#[from] crate::storage::DatabaseError),
}
