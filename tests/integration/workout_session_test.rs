//! Integration tests for the active workout flow.
//!
//! Tests the complete session flow including:
//! - Building a routine from a starter template
//! - Logging, completing, adding and removing sets
//! - Swapping an exercise for an alternative
//! - Rest countdown ticks
//! - Finishing into a history record and computing stats

use chrono::{Duration, TimeZone, Utc};
use uuid::Uuid;

use ironlog::exercises::alternatives;
use ironlog::history::WorkoutStats;
use ironlog::routines::Routine;
use ironlog::session::{ExerciseRef, SessionError, SetField, SetLog, WorkoutTracker};
use ironlog::templates::find_template;

fn push_pull_legs() -> Routine {
    Routine::from_template(
        Uuid::new_v4(),
        find_template("push_pull_legs_6").unwrap(),
        90,
    )
}

#[test]
fn test_full_workout_flow() {
    let routine = push_pull_legs();
    let day = routine.day(0).unwrap().clone();
    let first = day.exercises[0].exercise_id.clone();
    let started = Utc.with_ymd_and_hms(2024, 3, 4, 18, 0, 0).unwrap();

    let mut tracker = WorkoutTracker::new();
    tracker.start_at(&routine, 0, started).unwrap();
    assert_eq!(tracker.progress().unwrap().total_sets, day.total_sets());

    tracker.log_set(&first, 0, SetField::Weight(80.0)).unwrap();
    tracker.log_set(&first, 0, SetField::Reps(8)).unwrap();
    assert!(tracker.toggle_set_complete(&first, 0).unwrap());

    tracker.log_set(&first, 1, SetField::Weight(80.0)).unwrap();
    tracker.log_set(&first, 1, SetField::Reps(6)).unwrap();
    assert!(tracker.toggle_set_complete(&first, 1).unwrap());

    let seconds = tracker.start_rest_after(&first).unwrap();
    assert_eq!(seconds, 90);
    for _ in 0..89 {
        assert!(!tracker.tick().rest_finished);
    }
    let outcome = tracker.tick();
    assert!(outcome.rest_finished);
    assert!(!tracker.is_resting());

    let record = tracker.finish(started + Duration::minutes(50)).unwrap();
    assert!(!tracker.is_active());
    assert_eq!(record.duration_seconds, 3000);
    assert_eq!(record.completed_sets(), 2);
    assert!((record.volume_kg() - (80.0 * 8.0 + 80.0 * 6.0)).abs() < f32::EPSILON);

    let stats = WorkoutStats::from_history(&[record], started.date_naive());
    assert_eq!(stats.total_workouts, 1);
    assert_eq!(stats.current_streak_days, 1);
    let pr = stats
        .personal_records
        .iter()
        .find(|r| r.exercise_id == first)
        .unwrap();
    assert_eq!(pr.weight_kg, 80.0);
    assert_eq!(pr.reps, 8);
}

#[test]
fn test_start_seeds_strictly_from_selected_day() {
    let routine = push_pull_legs();
    let mut tracker = WorkoutTracker::new();

    tracker.start(&routine, 0).unwrap();
    let first = routine.days[0].exercises[0].exercise_id.clone();
    tracker.toggle_set_complete(&first, 0).unwrap();
    tracker.add_set(&first).unwrap();

    let workout = tracker.start(&routine, 2).unwrap();
    let day = routine.day(2).unwrap();

    assert!(workout.completed_sets.is_empty());
    assert_eq!(workout.day_index, 2);
    assert_eq!(workout.exercises.len(), day.exercises.len());
    for (log, planned) in workout.exercises.iter().zip(&day.exercises) {
        assert_eq!(log.exercise_id, planned.exercise_id);
        let expected: Vec<SetLog> = planned.sets.iter().map(SetLog::from).collect();
        assert_eq!(log.sets, expected);
    }
}

#[test]
fn test_add_then_remove_restores_log() {
    let routine = push_pull_legs();
    let mut tracker = WorkoutTracker::new();
    tracker.start(&routine, 1).unwrap();
    let id = routine.days[1].exercises[0].exercise_id.clone();

    tracker.toggle_set_complete(&id, 0).unwrap();
    tracker.toggle_set_complete(&id, 2).unwrap();
    let before = tracker.snapshot().unwrap();

    let index = tracker.add_set(&id).unwrap();
    tracker.toggle_set_complete(&id, index).unwrap();
    tracker.toggle_set_complete(&id, index).unwrap();
    tracker.remove_set(&id, index).unwrap();

    assert_eq!(tracker.snapshot().unwrap(), before);
}

#[test]
fn test_swap_exercise_for_alternative() {
    let routine = push_pull_legs();
    let mut tracker = WorkoutTracker::new();
    tracker.start(&routine, 0).unwrap();
    let slot = routine.days[0].exercises[0].clone();

    tracker.log_set(&slot.exercise_id, 0, SetField::Weight(60.0)).unwrap();
    tracker.toggle_set_complete(&slot.exercise_id, 0).unwrap();

    let in_workout: Vec<String> = tracker
        .active()
        .unwrap()
        .exercises
        .iter()
        .map(|e| e.exercise_id.clone())
        .collect();
    let replacement = alternatives(&slot.exercise_id)
        .into_iter()
        .find(|e| !in_workout.iter().any(|id| id == e.id))
        .unwrap();

    tracker
        .replace_exercise(&slot.exercise_id, ExerciseRef::from(replacement))
        .unwrap();

    let workout = tracker.active().unwrap();
    assert!(workout.exercise(&slot.exercise_id).is_none());
    let log = workout.exercise(replacement.id).unwrap();
    assert_eq!(log.sets.len(), slot.sets.len());
    assert!(log.sets.iter().all(|s| s.weight_kg == 0.0));
    assert_eq!(workout.progress().completed_sets, 0);
}

#[test]
fn test_operations_without_workout() {
    let mut tracker = WorkoutTracker::new();

    assert_eq!(
        tracker.log_set("bench_press", 0, SetField::Reps(5)),
        Err(SessionError::NoActiveWorkout)
    );
    assert_eq!(tracker.add_set("bench_press"), Err(SessionError::NoActiveWorkout));
    assert_eq!(tracker.start_rest(60), Err(SessionError::NoActiveWorkout));
    assert!(tracker.finish(Utc::now()).is_err());
    assert!(!tracker.tick().rest_finished);
    assert!(!tracker.is_resting());
}
