//! Integration tests for logging a workout across separate invocations.
//!
//! Each step opens the database afresh, the way the command-line tool does:
//! - Starting a workout caches it
//! - Logging weight and reps, completing, adding and swapping sets
//! - Finishing records the logged volume in history

use chrono::{Duration, Utc};
use tempfile::tempdir;
use uuid::Uuid;

use ironlog::exercises::find_exercise;
use ironlog::routines::Routine;
use ironlog::session::{CacheError, CachedSession, ExerciseRef, SessionError, SetField};
use ironlog::storage::{Database, SessionSettings};
use ironlog::templates::find_template;
use ironlog::WorkoutStats;

#[test]
fn test_logged_sets_reach_history() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ironlog.db");
    let settings = SessionSettings::default();
    let routine = Routine::from_template(
        Uuid::new_v4(),
        find_template("full_body_3").unwrap(),
        settings.default_rest_seconds,
    );

    {
        let db = Database::open(&path).unwrap();
        db.insert_routine(&routine).unwrap();
        CachedSession::start(&db, &routine, 0, settings.autosave).unwrap();
    }

    // Two working sets of squats, the second one bumped by two increments
    {
        let db = Database::open(&path).unwrap();
        let mut session = CachedSession::resume(&db, settings.autosave).unwrap();
        let weight = settings.round_weight(99.0);
        session
            .apply(|t| t.log_set("barbell_squat", 0, SetField::Weight(weight)))
            .unwrap();
        session
            .apply(|t| t.toggle_set_complete("barbell_squat", 0))
            .unwrap();
    }
    {
        let db = Database::open(&path).unwrap();
        let mut session = CachedSession::resume(&db, settings.autosave).unwrap();
        let weight = settings.step_weight(100.0, 2);
        session
            .apply(|t| {
                t.log_set("barbell_squat", 1, SetField::Weight(weight))?;
                t.log_set("barbell_squat", 1, SetField::Reps(3))?;
                t.toggle_set_complete("barbell_squat", 1)
            })
            .unwrap();
    }

    // Extra bench set, then bench swapped for push-ups
    {
        let db = Database::open(&path).unwrap();
        let mut session = CachedSession::resume(&db, settings.autosave).unwrap();
        assert_eq!(session.apply(|t| t.add_set("bench_press")).unwrap(), 3);
        let push_up = ExerciseRef::from(find_exercise("push_up").unwrap());
        session
            .apply(|t| t.replace_exercise("bench_press", push_up))
            .unwrap();
    }

    let db = Database::open(&path).unwrap();
    let session = CachedSession::resume(&db, settings.autosave).unwrap();
    let workout = session.workout().unwrap();
    assert_eq!(workout.progress().completed_sets, 2);
    assert_eq!(workout.exercise("push_up").unwrap().sets.len(), 4);

    let finished_at = workout.started_at + Duration::minutes(40);
    let record = session.finish(finished_at).unwrap();

    // 100 kg x 5 + 105 kg x 3
    assert_eq!(record.completed_sets(), 2);
    assert_eq!(record.volume_kg(), 815.0);
    assert!(!db.has_active_workout().unwrap());

    let history = db.list_workout_sessions(&routine.user_id, None).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].volume_kg(), 815.0);

    let stats = WorkoutStats::from_history(&history, Utc::now().date_naive());
    assert_eq!(stats.total_volume_kg, 815.0);
    let squat = stats
        .personal_records
        .iter()
        .find(|r| r.exercise_id == "barbell_squat")
        .unwrap();
    assert_eq!(squat.weight_kg, 105.0);
    assert_eq!(squat.reps, 3);
}

#[test]
fn test_commands_without_workout() {
    let dir = tempdir().unwrap();
    let db = Database::open(&dir.path().join("ironlog.db")).unwrap();

    assert!(matches!(
        CachedSession::resume(&db, true),
        Err(CacheError::Session(SessionError::NoActiveWorkout))
    ));
}
