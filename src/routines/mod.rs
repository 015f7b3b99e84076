//! Weekly training routines.
//!
//! Routines are built from starter templates or by hand and are owned by a
//! single user. `RoutineManager` keeps them in sync with the database.

pub mod manager;
pub mod types;

pub use manager::RoutineManager;
pub use types::{PlannedSet, Routine, RoutineDay, RoutineError, RoutineExercise};
