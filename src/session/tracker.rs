//! Active workout tracker.
//!
//! Holds at most one in-progress workout and its rest timer:
//! - Starting a workout from a routine day
//! - Logging, completing, adding and removing sets
//! - Swapping an exercise mid-workout
//! - Finishing into a history record or cancelling

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use uuid::Uuid;

use super::rest_timer::RestTimer;
use super::types::{
    ActiveWorkout, ExerciseLog, ExerciseRef, SessionError, SetField, SetKey, SetLog, TickOutcome,
    WorkoutProgress,
};
use crate::history::{CompletedExercise, CompletedSet, CompletedWorkout};
use crate::routines::Routine;

/// In-memory owner of the active workout.
#[derive(Debug, Default)]
pub struct WorkoutTracker {
    /// Workout in progress
    active: Option<ActiveWorkout>,
    /// Rest countdown between sets
    rest: RestTimer,
}

impl WorkoutTracker {
    /// Create an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a workout for one day of a routine.
    ///
    /// Any workout already in progress is discarded. Set logs are seeded
    /// from the day's planned sets and no set starts completed.
    pub fn start(&mut self, routine: &Routine, day_index: u8) -> Result<&ActiveWorkout, SessionError> {
        self.start_at(routine, day_index, Utc::now())
    }

    /// Start a workout with an explicit start time.
    pub fn start_at(
        &mut self,
        routine: &Routine,
        day_index: u8,
        started_at: DateTime<Utc>,
    ) -> Result<&ActiveWorkout, SessionError> {
        let day = routine
            .day(day_index)
            .ok_or(SessionError::DayNotFound(day_index))?;

        let mut seen = BTreeSet::new();
        for exercise in &day.exercises {
            if !seen.insert(exercise.exercise_id.as_str()) {
                return Err(SessionError::DuplicateExercise(exercise.exercise_id.clone()));
            }
        }

        if self.active.is_some() {
            tracing::warn!("Starting a new workout discards the one in progress");
        }

        self.rest.stop();
        let workout = ActiveWorkout {
            id: Uuid::new_v4(),
            user_id: routine.user_id,
            routine_id: routine.id,
            routine_name: routine.name.clone(),
            day_index,
            day_label: day.label.clone(),
            started_at,
            exercises: day.exercises.iter().map(ExerciseLog::from).collect(),
            completed_sets: BTreeSet::new(),
        };

        tracing::info!(
            routine = %routine.id,
            day = day_index,
            exercises = workout.exercises.len(),
            "Workout started"
        );

        Ok(self.active.insert(workout))
    }

    /// Update one field of one set.
    pub fn log_set(
        &mut self,
        exercise_id: &str,
        set_index: usize,
        field: SetField,
    ) -> Result<(), SessionError> {
        if let SetField::Weight(weight) = field {
            if !weight.is_finite() || weight < 0.0 {
                return Err(SessionError::InvalidValue(format!("weight {}", weight)));
            }
        }

        let set = self.set_mut(exercise_id, set_index)?;
        match field {
            SetField::Weight(weight) => set.weight_kg = weight,
            SetField::Reps(reps) => set.reps = reps,
        }

        tracing::debug!("Logged {:?} for {} set {}", field, exercise_id, set_index);
        Ok(())
    }

    /// Flip the completed marker of a set. Returns the new state.
    pub fn toggle_set_complete(
        &mut self,
        exercise_id: &str,
        set_index: usize,
    ) -> Result<bool, SessionError> {
        self.set_mut(exercise_id, set_index)?;
        let workout = self.active_mut()?;

        let key = SetKey::new(exercise_id, set_index);
        let completed = if workout.completed_sets.remove(&key) {
            false
        } else {
            workout.completed_sets.insert(key);
            true
        };

        tracing::debug!("Set {} of {} complete: {}", set_index, exercise_id, completed);
        Ok(completed)
    }

    /// Append a set to an exercise. Returns the new set's index.
    ///
    /// The new set copies the last set's values, or is empty when the
    /// exercise has no sets.
    pub fn add_set(&mut self, exercise_id: &str) -> Result<usize, SessionError> {
        let log = self.exercise_mut(exercise_id)?;

        let set = log.sets.last().copied().unwrap_or_default();
        log.sets.push(set);
        let index = log.sets.len() - 1;

        tracing::debug!("Added set {} to {}", index, exercise_id);
        Ok(index)
    }

    /// Remove a set from an exercise.
    ///
    /// Completion markers of later sets shift down with their sets.
    pub fn remove_set(&mut self, exercise_id: &str, set_index: usize) -> Result<SetLog, SessionError> {
        self.set_mut(exercise_id, set_index)?;
        let workout = self.active_mut()?;

        let removed = match workout.exercise_mut(exercise_id) {
            Some(log) => log.sets.remove(set_index),
            None => return Err(SessionError::ExerciseNotFound(exercise_id.to_string())),
        };

        let shifted: Vec<SetKey> = workout
            .completed_sets
            .iter()
            .filter(|k| k.exercise_id == exercise_id && k.set_index >= set_index)
            .cloned()
            .collect();
        for key in shifted {
            workout.completed_sets.remove(&key);
            if key.set_index > set_index {
                workout
                    .completed_sets
                    .insert(SetKey::new(key.exercise_id, key.set_index - 1));
            }
        }

        tracing::debug!("Removed set {} from {}", set_index, exercise_id);
        Ok(removed)
    }

    /// Swap the exercise in a slot for another one.
    ///
    /// The slot keeps its set count and reps; weights reset to zero and
    /// completion markers are cleared. Replacing an exercise with itself
    /// resets the slot the same way.
    pub fn replace_exercise(
        &mut self,
        exercise_id: &str,
        replacement: ExerciseRef,
    ) -> Result<(), SessionError> {
        let workout = self.active_mut()?;

        if workout.exercise(exercise_id).is_none() {
            return Err(SessionError::ExerciseNotFound(exercise_id.to_string()));
        }
        if replacement.exercise_id != exercise_id
            && workout.exercise(&replacement.exercise_id).is_some()
        {
            return Err(SessionError::DuplicateExercise(replacement.exercise_id));
        }

        workout
            .completed_sets
            .retain(|k| k.exercise_id != exercise_id);

        if let Some(log) = workout.exercise_mut(exercise_id) {
            log.exercise_id = replacement.exercise_id;
            log.name = replacement.name;
            for set in &mut log.sets {
                set.weight_kg = 0.0;
            }
            tracing::info!("Replaced {} with {}", exercise_id, log.exercise_id);
        }

        Ok(())
    }

    /// Start the rest countdown.
    pub fn start_rest(&mut self, seconds: u32) -> Result<(), SessionError> {
        self.active_mut()?;
        self.rest.start(seconds);
        Ok(())
    }

    /// Start the rest countdown with the exercise's configured rest period.
    pub fn start_rest_after(&mut self, exercise_id: &str) -> Result<u32, SessionError> {
        let seconds = self
            .active()
            .ok_or(SessionError::NoActiveWorkout)?
            .exercise(exercise_id)
            .ok_or_else(|| SessionError::ExerciseNotFound(exercise_id.to_string()))?
            .rest_seconds;
        self.rest.start(seconds);
        Ok(seconds)
    }

    /// Add time to the running rest countdown.
    pub fn extend_rest(&mut self, seconds: u32) -> Result<(), SessionError> {
        self.active_mut()?;
        self.rest.extend(seconds);
        Ok(())
    }

    /// Stop the rest countdown.
    pub fn stop_rest(&mut self) {
        self.rest.stop();
    }

    /// Advance the session by one second.
    pub fn tick(&mut self) -> TickOutcome {
        if self.active.is_none() {
            return TickOutcome::default();
        }

        let rest_finished = self.rest.tick();
        TickOutcome {
            rest_finished,
            rest_remaining: self.rest.remaining(),
        }
    }

    /// End the workout and produce its history record.
    pub fn finish(&mut self, finished_at: DateTime<Utc>) -> Result<CompletedWorkout, SessionError> {
        let workout = self.active.take().ok_or(SessionError::NoActiveWorkout)?;
        self.rest.stop();

        let exercises = workout
            .exercises
            .iter()
            .map(|log| CompletedExercise {
                exercise_id: log.exercise_id.clone(),
                name: log.name.clone(),
                sets: log
                    .sets
                    .iter()
                    .enumerate()
                    .map(|(i, set)| CompletedSet {
                        weight_kg: set.weight_kg,
                        reps: set.reps,
                        completed: workout
                            .completed_sets
                            .contains(&SetKey::new(log.exercise_id.clone(), i)),
                    })
                    .collect(),
            })
            .collect();

        let record = CompletedWorkout {
            id: workout.id,
            user_id: workout.user_id,
            routine_id: workout.routine_id,
            routine_name: workout.routine_name.clone(),
            day_index: workout.day_index,
            day_label: workout.day_label.clone(),
            started_at: workout.started_at,
            finished_at,
            duration_seconds: workout.elapsed_seconds(finished_at).min(u32::MAX as u64) as u32,
            exercises,
        };

        tracing::info!(
            workout = %record.id,
            sets = record.completed_sets(),
            volume_kg = record.volume_kg(),
            "Workout finished"
        );
        Ok(record)
    }

    /// Discard the workout in progress.
    pub fn cancel(&mut self) -> Result<(), SessionError> {
        let workout = self.active.take().ok_or(SessionError::NoActiveWorkout)?;
        self.rest.stop();
        tracing::info!(workout = %workout.id, "Workout cancelled");
        Ok(())
    }

    /// Copy of the workout in progress, for local caching.
    pub fn snapshot(&self) -> Option<ActiveWorkout> {
        self.active.clone()
    }

    /// Resume a cached workout. The rest timer starts stopped.
    pub fn restore(&mut self, workout: ActiveWorkout) {
        tracing::info!(workout = %workout.id, "Workout restored from cache");
        self.rest.stop();
        self.active = Some(workout);
    }

    /// Get the workout in progress.
    pub fn active(&self) -> Option<&ActiveWorkout> {
        self.active.as_ref()
    }

    /// Check if a workout is in progress.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Check if the rest countdown is running.
    pub fn is_resting(&self) -> bool {
        self.rest.is_running()
    }

    /// Get the rest timer.
    pub fn rest_timer(&self) -> &RestTimer {
        &self.rest
    }

    /// Completed and total sets of the workout in progress.
    pub fn progress(&self) -> Option<WorkoutProgress> {
        self.active.as_ref().map(ActiveWorkout::progress)
    }

    /// Seconds since the workout started.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> Option<u64> {
        self.active.as_ref().map(|w| w.elapsed_seconds(now))
    }

    fn active_mut(&mut self) -> Result<&mut ActiveWorkout, SessionError> {
        self.active.as_mut().ok_or(SessionError::NoActiveWorkout)
    }

    fn exercise_mut(&mut self, exercise_id: &str) -> Result<&mut ExerciseLog, SessionError> {
        self.active_mut()?
            .exercise_mut(exercise_id)
            .ok_or_else(|| SessionError::ExerciseNotFound(exercise_id.to_string()))
    }

    fn set_mut(&mut self, exercise_id: &str, set_index: usize) -> Result<&mut SetLog, SessionError> {
        self.exercise_mut(exercise_id)?
            .sets
            .get_mut(set_index)
            .ok_or_else(|| SessionError::SetNotFound {
                exercise_id: exercise_id.to_string(),
                set_index,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routines::{PlannedSet, RoutineDay, RoutineExercise};
    use chrono::Duration;

    fn test_routine() -> Routine {
        let exercise = |id: &str, name: &str, sets: Vec<PlannedSet>| RoutineExercise {
            exercise_id: id.to_string(),
            name: name.to_string(),
            rest_seconds: 90,
            sets,
        };

        Routine::new(
            Uuid::new_v4(),
            "Test Routine".to_string(),
            vec![
                RoutineDay {
                    index: 0,
                    label: "Push".to_string(),
                    exercises: vec![
                        exercise(
                            "bench_press",
                            "Bench Press",
                            vec![PlannedSet::new(60.0, 8), PlannedSet::new(62.5, 6)],
                        ),
                        exercise("dip", "Dip", vec![PlannedSet::new(0.0, 10)]),
                    ],
                },
                RoutineDay {
                    index: 1,
                    label: "Pull".to_string(),
                    exercises: vec![exercise(
                        "barbell_row",
                        "Barbell Row",
                        vec![PlannedSet::new(50.0, 10); 3],
                    )],
                },
            ],
        )
    }

    fn started() -> WorkoutTracker {
        let mut tracker = WorkoutTracker::new();
        tracker.start(&test_routine(), 0).unwrap();
        tracker
    }

    #[test]
    fn test_start_seeds_logs_from_day() {
        let tracker = started();
        let workout = tracker.active().unwrap();

        assert_eq!(workout.day_label, "Push");
        assert_eq!(workout.exercises.len(), 2);
        assert_eq!(
            workout.exercise("bench_press").unwrap().sets,
            vec![
                SetLog { weight_kg: 60.0, reps: 8 },
                SetLog { weight_kg: 62.5, reps: 6 },
            ]
        );
        assert!(workout.completed_sets.is_empty());
        assert!(!tracker.is_resting());
    }

    #[test]
    fn test_start_unknown_day() {
        let mut tracker = WorkoutTracker::new();
        let err = tracker.start(&test_routine(), 5).unwrap_err();
        assert_eq!(err, SessionError::DayNotFound(5));
        assert!(!tracker.is_active());
    }

    #[test]
    fn test_start_resets_previous_workout() {
        let routine = test_routine();
        let mut tracker = WorkoutTracker::new();
        tracker.start(&routine, 0).unwrap();
        tracker.toggle_set_complete("bench_press", 0).unwrap();
        tracker.log_set("bench_press", 0, SetField::Weight(80.0)).unwrap();
        tracker.start_rest(60).unwrap();

        tracker.start(&routine, 0).unwrap();
        let workout = tracker.active().unwrap();
        assert!(workout.completed_sets.is_empty());
        assert_eq!(workout.exercise("bench_press").unwrap().sets[0].weight_kg, 60.0);
        assert!(!tracker.is_resting());
    }

    #[test]
    fn test_log_set_fields() {
        let mut tracker = started();
        tracker.log_set("bench_press", 1, SetField::Weight(65.0)).unwrap();
        tracker.log_set("bench_press", 1, SetField::Reps(5)).unwrap();

        let set = tracker.active().unwrap().exercise("bench_press").unwrap().sets[1];
        assert_eq!(set, SetLog { weight_kg: 65.0, reps: 5 });
    }

    #[test]
    fn test_log_set_errors_leave_state() {
        let mut tracker = started();
        let before = tracker.snapshot();

        assert!(matches!(
            tracker.log_set("bench_press", 9, SetField::Reps(1)),
            Err(SessionError::SetNotFound { .. })
        ));
        assert!(matches!(
            tracker.log_set("squat", 0, SetField::Reps(1)),
            Err(SessionError::ExerciseNotFound(_))
        ));
        assert!(matches!(
            tracker.log_set("bench_press", 0, SetField::Weight(-5.0)),
            Err(SessionError::InvalidValue(_))
        ));
        assert_eq!(tracker.snapshot(), before);
    }

    #[test]
    fn test_operations_without_workout() {
        let mut tracker = WorkoutTracker::new();
        assert_eq!(
            tracker.log_set("bench_press", 0, SetField::Reps(5)),
            Err(SessionError::NoActiveWorkout)
        );
        assert_eq!(
            tracker.toggle_set_complete("bench_press", 0),
            Err(SessionError::NoActiveWorkout)
        );
        assert_eq!(tracker.add_set("bench_press"), Err(SessionError::NoActiveWorkout));
        assert_eq!(tracker.start_rest(30), Err(SessionError::NoActiveWorkout));
        assert_eq!(tracker.cancel(), Err(SessionError::NoActiveWorkout));
        assert!(tracker.finish(Utc::now()).is_err());
        assert_eq!(tracker.tick(), TickOutcome::default());
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        let mut tracker = started();
        let before = tracker.snapshot();

        assert!(tracker.toggle_set_complete("bench_press", 1).unwrap());
        assert!(tracker.active().unwrap().is_set_complete("bench_press", 1));
        assert!(!tracker.toggle_set_complete("bench_press", 1).unwrap());

        assert_eq!(tracker.snapshot(), before);
    }

    #[test]
    fn test_add_set_copies_last() {
        let mut tracker = started();
        let index = tracker.add_set("bench_press").unwrap();
        assert_eq!(index, 2);
        assert_eq!(
            tracker.active().unwrap().exercise("bench_press").unwrap().sets[2],
            SetLog { weight_kg: 62.5, reps: 6 }
        );
    }

    #[test]
    fn test_add_then_remove_restores() {
        let mut tracker = started();
        tracker.toggle_set_complete("bench_press", 0).unwrap();
        let before = tracker.snapshot();

        let index = tracker.add_set("bench_press").unwrap();
        tracker.toggle_set_complete("bench_press", index).unwrap();
        tracker.remove_set("bench_press", index).unwrap();

        assert_eq!(tracker.snapshot(), before);
    }

    #[test]
    fn test_remove_set_shifts_markers() {
        let mut tracker = started();
        tracker.add_set("bench_press").unwrap(); // 3 sets
        tracker.toggle_set_complete("bench_press", 0).unwrap();
        tracker.toggle_set_complete("bench_press", 1).unwrap();
        tracker.toggle_set_complete("bench_press", 2).unwrap();
        tracker.toggle_set_complete("dip", 0).unwrap();

        let removed = tracker.remove_set("bench_press", 1).unwrap();
        assert_eq!(removed, SetLog { weight_kg: 62.5, reps: 6 });

        let workout = tracker.active().unwrap();
        assert_eq!(workout.exercise("bench_press").unwrap().sets.len(), 2);
        assert!(workout.is_set_complete("bench_press", 0));
        assert!(workout.is_set_complete("bench_press", 1));
        assert!(!workout.is_set_complete("bench_press", 2));
        assert!(workout.is_set_complete("dip", 0));
        assert_eq!(workout.completed_sets.len(), 3);
    }

    #[test]
    fn test_add_set_to_empty_exercise() {
        let mut tracker = started();
        tracker.remove_set("dip", 0).unwrap();
        assert_eq!(tracker.add_set("dip").unwrap(), 0);
        assert_eq!(
            tracker.active().unwrap().exercise("dip").unwrap().sets[0],
            SetLog::default()
        );
    }

    #[test]
    fn test_replace_exercise() {
        let mut tracker = started();
        tracker.toggle_set_complete("bench_press", 0).unwrap();
        tracker.toggle_set_complete("dip", 0).unwrap();

        tracker
            .replace_exercise("bench_press", ExerciseRef::new("push_up", "Push-Up"))
            .unwrap();

        let workout = tracker.active().unwrap();
        assert!(workout.exercise("bench_press").is_none());
        let log = workout.exercise("push_up").unwrap();
        assert_eq!(log.name, "Push-Up");
        assert_eq!(log.sets.len(), 2);
        assert!(log.sets.iter().all(|s| s.weight_kg == 0.0));
        assert_eq!(log.sets[0].reps, 8);
        assert!(!workout.is_set_complete("push_up", 0));
        assert!(workout.is_set_complete("dip", 0));
        // Order preserved
        assert_eq!(workout.exercises[0].exercise_id, "push_up");
    }

    #[test]
    fn test_replace_with_existing_exercise_fails() {
        let mut tracker = started();
        let err = tracker
            .replace_exercise("bench_press", ExerciseRef::new("dip", "Dip"))
            .unwrap_err();
        assert_eq!(err, SessionError::DuplicateExercise("dip".to_string()));
    }

    #[test]
    fn test_replace_exercise_with_itself_resets_slot() {
        let mut tracker = started();
        tracker.log_set("bench_press", 1, SetField::Weight(70.0)).unwrap();
        tracker.toggle_set_complete("bench_press", 1).unwrap();

        tracker
            .replace_exercise("bench_press", ExerciseRef::new("bench_press", "Bench Press"))
            .unwrap();

        let workout = tracker.active().unwrap();
        let log = workout.exercise("bench_press").unwrap();
        assert_eq!(log.sets.len(), 2);
        assert!(log.sets.iter().all(|s| s.weight_kg == 0.0));
        assert_eq!(log.sets[1].reps, 6);
        assert!(!workout.is_set_complete("bench_press", 1));
        assert_eq!(workout.exercises.len(), 2);
    }

    #[test]
    fn test_rest_timer_through_tick() {
        let mut tracker = started();
        tracker.start_rest(2).unwrap();
        assert!(tracker.is_resting());

        let first = tracker.tick();
        assert_eq!(first.rest_remaining, Some(1));
        assert!(!first.rest_finished);

        let second = tracker.tick();
        assert!(second.rest_finished);
        assert!(!tracker.is_resting());
    }

    #[test]
    fn test_extend_rest() {
        let mut tracker = started();
        tracker.start_rest(2).unwrap();
        tracker.tick();
        tracker.extend_rest(30).unwrap();
        assert_eq!(tracker.rest_timer().remaining(), Some(31));

        for _ in 0..30 {
            assert!(!tracker.tick().rest_finished);
        }
        assert!(tracker.tick().rest_finished);
    }

    #[test]
    fn test_extend_rest_without_workout_or_countdown() {
        let mut idle = WorkoutTracker::new();
        assert_eq!(idle.extend_rest(30), Err(SessionError::NoActiveWorkout));

        let mut tracker = started();
        tracker.extend_rest(30).unwrap();
        assert!(!tracker.is_resting());
        assert_eq!(tracker.rest_timer().remaining(), None);
    }

    #[test]
    fn test_start_rest_after_uses_exercise_rest() {
        let mut tracker = started();
        assert_eq!(tracker.start_rest_after("dip").unwrap(), 90);
        assert_eq!(tracker.rest_timer().remaining(), Some(90));
    }

    #[test]
    fn test_finish_builds_record() {
        let routine = test_routine();
        let start = Utc::now() - Duration::minutes(45);
        let mut tracker = WorkoutTracker::new();
        tracker.start_at(&routine, 0, start).unwrap();
        tracker.toggle_set_complete("bench_press", 0).unwrap();
        tracker.toggle_set_complete("bench_press", 1).unwrap();
        tracker.start_rest(90).unwrap();

        let record = tracker.finish(start + Duration::minutes(45)).unwrap();

        assert_eq!(record.routine_id, routine.id);
        assert_eq!(record.user_id, routine.user_id);
        assert_eq!(record.duration_seconds, 45 * 60);
        assert_eq!(record.completed_sets(), 2);
        assert!((record.volume_kg() - (60.0 * 8.0 + 62.5 * 6.0)).abs() < 0.01);
        assert!(!record.exercises[1].sets[0].completed);
        assert!(!tracker.is_active());
        assert!(!tracker.is_resting());
    }

    #[test]
    fn test_cancel_discards() {
        let mut tracker = started();
        tracker.start_rest(30).unwrap();
        tracker.cancel().unwrap();
        assert!(!tracker.is_active());
        assert!(!tracker.is_resting());
    }

    #[test]
    fn test_snapshot_restore() {
        let mut tracker = started();
        tracker.log_set("dip", 0, SetField::Reps(12)).unwrap();
        tracker.toggle_set_complete("dip", 0).unwrap();
        let snapshot = tracker.snapshot().unwrap();

        let mut resumed = WorkoutTracker::new();
        resumed.restore(snapshot.clone());
        assert_eq!(resumed.active(), Some(&snapshot));
        assert_eq!(resumed.progress().unwrap().completed_sets, 1);
        assert_eq!(resumed.progress().unwrap().total_sets, 3);
    }
}
