//! Workout in progress kept in the local database.
//!
//! Each command-line invocation restores the cached workout into a
//! [`WorkoutTracker`], applies one change and writes it back when autosave is
//! on. Autosave writes are best-effort: a failure is logged and the change
//! stays in memory.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::tracker::WorkoutTracker;
use super::types::{ActiveWorkout, SessionError};
use crate::history::CompletedWorkout;
use crate::routines::Routine;
use crate::storage::{Database, DatabaseError};

/// A tracker bound to the database cache.
pub struct CachedSession<'a> {
    db: &'a Database,
    tracker: WorkoutTracker,
    autosave: bool,
}

impl<'a> CachedSession<'a> {
    /// Start a new workout, replacing any cached one.
    pub fn start(
        db: &'a Database,
        routine: &Routine,
        day_index: u8,
        autosave: bool,
    ) -> Result<Self, CacheError> {
        let mut tracker = WorkoutTracker::new();
        tracker.start(routine, day_index)?;

        let session = Self {
            db,
            tracker,
            autosave,
        };
        if autosave {
            session.save_best_effort();
        }
        Ok(session)
    }

    /// Restore the cached workout.
    pub fn resume(db: &'a Database, autosave: bool) -> Result<Self, CacheError> {
        let workout = db
            .load_active_workout()?
            .ok_or(SessionError::NoActiveWorkout)?;

        let mut tracker = WorkoutTracker::new();
        tracker.restore(workout);

        Ok(Self {
            db,
            tracker,
            autosave,
        })
    }

    /// The restored tracker.
    pub fn tracker(&self) -> &WorkoutTracker {
        &self.tracker
    }

    /// The workout in progress.
    pub fn workout(&self) -> Result<&ActiveWorkout, CacheError> {
        Ok(self.tracker.active().ok_or(SessionError::NoActiveWorkout)?)
    }

    /// Give up the cache binding and keep the tracker.
    pub fn into_tracker(self) -> WorkoutTracker {
        self.tracker
    }

    /// Apply one tracker operation, then cache the result when autosave is on.
    ///
    /// A failed operation leaves both the tracker and the cache untouched.
    pub fn apply<T, F>(&mut self, change: F) -> Result<T, CacheError>
    where
        F: FnOnce(&mut WorkoutTracker) -> Result<T, SessionError>,
    {
        let value = change(&mut self.tracker)?;
        if self.autosave {
            self.save_best_effort();
        }
        Ok(value)
    }

    /// Write the workout to the cache.
    pub fn save(&self) -> Result<(), CacheError> {
        self.db.save_active_workout(self.workout()?)?;
        Ok(())
    }

    /// Finish the workout, record it in history and clear the cache.
    pub fn finish(mut self, finished_at: DateTime<Utc>) -> Result<CompletedWorkout, CacheError> {
        let record = self.tracker.finish(finished_at)?;
        self.db.insert_workout_session(&record)?;
        self.db.clear_active_workout()?;
        Ok(record)
    }

    /// Discard the workout and clear the cache.
    pub fn discard(mut self) -> Result<(), CacheError> {
        self.tracker.cancel()?;
        self.db.clear_active_workout()?;
        Ok(())
    }

    fn save_best_effort(&self) {
        if let Err(e) = self.save() {
            tracing::warn!("Failed to cache active workout: {}", e);
        }
    }
}

/// Errors from cached session operations.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Session(#[from] SessionError),

    #[error(transparent)]
    Storage(#[from] DatabaseError),
}
