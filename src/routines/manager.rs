//! Routine management with optimistic updates.
//!
//! Changes are applied to the in-memory copy first and then written to the
//! database. When the write fails the previous value is restored and the
//! error is returned to the caller.

use chrono::Utc;
use uuid::Uuid;

use super::types::{Routine, RoutineDay, RoutineError};
use crate::storage::Database;

/// Manager for one user's routines.
pub struct RoutineManager<'a> {
    db: &'a Database,
    user_id: Uuid,
    routines: Vec<Routine>,
}

impl<'a> RoutineManager<'a> {
    /// Load all routines belonging to a user.
    pub fn load(db: &'a Database, user_id: Uuid) -> Result<Self, RoutineError> {
        let routines = db.list_routines(&user_id)?;
        tracing::debug!(user = %user_id, count = routines.len(), "Loaded routines");

        Ok(Self {
            db,
            user_id,
            routines,
        })
    }

    /// The user these routines belong to.
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// All routines, oldest first.
    pub fn list(&self) -> &[Routine] {
        &self.routines
    }

    /// Get a routine by ID.
    pub fn get(&self, id: Uuid) -> Option<&Routine> {
        self.routines.iter().find(|r| r.id == id)
    }

    /// Add a new routine.
    pub fn create(&mut self, mut routine: Routine) -> Result<&Routine, RoutineError> {
        routine.validate()?;
        routine.user_id = self.user_id;

        self.routines.push(routine);
        let index = self.routines.len() - 1;

        if let Err(e) = self.db.insert_routine(&self.routines[index]) {
            let routine = self.routines.remove(index);
            tracing::warn!(routine = %routine.id, "Rolled back routine creation: {}", e);
            return Err(e.into());
        }

        tracing::info!(routine = %self.routines[index].id, "Created routine");
        Ok(&self.routines[index])
    }

    /// Rename a routine.
    pub fn rename(&mut self, id: Uuid, name: &str) -> Result<(), RoutineError> {
        let name = name.trim().to_string();
        self.apply(id, move |routine| {
            routine.name = name;
            Ok(())
        })
    }

    /// Replace the day with the same index.
    pub fn update_day(&mut self, id: Uuid, day: RoutineDay) -> Result<(), RoutineError> {
        self.apply(id, move |routine| {
            let slot = routine
                .days
                .iter_mut()
                .find(|d| d.index == day.index)
                .ok_or(RoutineError::DayNotFound(day.index))?;
            *slot = day;
            Ok(())
        })
    }

    /// Delete a routine.
    pub fn delete(&mut self, id: Uuid) -> Result<(), RoutineError> {
        let position = self.position(id)?;
        let removed = self.routines.remove(position);

        if let Err(e) = self.db.delete_routine(&id) {
            tracing::warn!(routine = %id, "Rolled back routine deletion: {}", e);
            self.routines.insert(position, removed);
            return Err(e.into());
        }

        tracing::info!(routine = %id, "Deleted routine");
        Ok(())
    }

    /// Apply a change in memory, persist it, and restore the previous value on failure.
    fn apply<F>(&mut self, id: Uuid, change: F) -> Result<(), RoutineError>
    where
        F: FnOnce(&mut Routine) -> Result<(), RoutineError>,
    {
        let position = self.position(id)?;
        let previous = self.routines[position].clone();

        let mut updated = previous.clone();
        change(&mut updated)?;
        updated.validate()?;
        updated.updated_at = Utc::now();
        self.routines[position] = updated;

        if let Err(e) = self.db.update_routine(&self.routines[position]) {
            tracing::warn!(routine = %id, "Rolled back routine update: {}", e);
            self.routines[position] = previous;
            return Err(e.into());
        }

        tracing::debug!(routine = %id, "Updated routine");
        Ok(())
    }

    fn position(&self, id: Uuid) -> Result<usize, RoutineError> {
        self.routines
            .iter()
            .position(|r| r.id == id)
            .ok_or(RoutineError::NotFound(id))
    }
}
