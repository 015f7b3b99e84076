//! Finished workouts and training statistics.

pub mod stats;
pub mod types;

pub use stats::{PersonalRecord, WorkoutStats};
pub use types::{CompletedExercise, CompletedSet, CompletedWorkout};
