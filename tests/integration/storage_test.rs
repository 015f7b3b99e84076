//! Integration tests for on-disk persistence.
//!
//! Runs the first-run flow against a database in a temporary directory and
//! checks that profiles, routines, the cached workout and history survive
//! reopening the database.

use chrono::{Duration, Utc};
use tempfile::tempdir;

use ironlog::onboarding::{OnboardingStep, OnboardingWizard};
use ironlog::session::{SetField, WorkoutTracker};
use ironlog::storage::{load_config_from, save_config_to, AppConfig, Database, Units};
use ironlog::templates::{ExperienceLevel, Goal};
use ironlog::{RoutineManager, WorkoutStats};

fn onboard(config: &AppConfig, db: &Database) -> uuid::Uuid {
    let mut wizard = OnboardingWizard::new();
    wizard.set_name("Robin").unwrap();
    wizard.set_goal(Goal::GetStronger);
    wizard.set_level(ExperienceLevel::Beginner);
    wizard.set_days_per_week(3).unwrap();
    while wizard.current_step() != OnboardingStep::Recommendation {
        wizard.next_step().unwrap();
    }

    let outcome = wizard.finish(config).unwrap();
    db.insert_user(&outcome.profile).unwrap();

    let mut manager = RoutineManager::load(db, outcome.profile.id).unwrap();
    manager.create(outcome.routine.unwrap()).unwrap();
    outcome.profile.id
}

#[test]
fn test_config_drives_database_location() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("config.toml");

    let mut config = AppConfig::default();
    config.units = Units::Imperial;
    config.session.default_rest_seconds = 150;
    save_config_to(&config, &config_path).unwrap();

    let loaded = load_config_from(&config_path).unwrap();
    assert_eq!(loaded.database_path(), dir.path().join("ironlog.db"));

    let db = Database::open(&loaded.database_path()).unwrap();
    let user_id = onboard(&loaded, &db);

    let profile = db.get_user(&user_id).unwrap().unwrap();
    assert_eq!(profile.units, Units::Imperial);
    assert!(profile.onboarding_complete);

    let routines = db.list_routines(&user_id).unwrap();
    assert_eq!(routines.len(), 1);
    assert_eq!(routines[0].template_id.as_deref(), Some("full_body_3"));
    assert_eq!(routines[0].days[0].exercises[0].rest_seconds, 150);
}

#[test]
fn test_cached_workout_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("ironlog.db");
    let config = AppConfig::default();

    let user_id = {
        let db = Database::open(&path).unwrap();
        let user_id = onboard(&config, &db);
        let routine = db.list_routines(&user_id).unwrap().remove(0);

        let mut tracker = WorkoutTracker::new();
        tracker.start(&routine, 0).unwrap();
        tracker
            .log_set("barbell_squat", 0, SetField::Weight(60.0))
            .unwrap();
        tracker.toggle_set_complete("barbell_squat", 0).unwrap();
        db.save_active_workout(tracker.active().unwrap()).unwrap();
        user_id
    };

    let db = Database::open(&path).unwrap();
    let cached = db.load_active_workout().unwrap().unwrap();

    let mut tracker = WorkoutTracker::new();
    tracker.restore(cached);
    assert!(tracker.active().unwrap().is_set_complete("barbell_squat", 0));

    let finished_at = tracker.active().unwrap().started_at + Duration::minutes(45);
    let record = tracker.finish(finished_at).unwrap();
    db.insert_workout_session(&record).unwrap();
    db.clear_active_workout().unwrap();

    assert!(!db.has_active_workout().unwrap());
    let history = db.list_workout_sessions(&user_id, None).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].duration_seconds, 45 * 60);

    let stats = WorkoutStats::from_history(&history, Utc::now().date_naive());
    assert_eq!(stats.total_completed_sets, 1);
    assert_eq!(stats.personal_records.len(), 1);
    assert_eq!(stats.personal_records[0].weight_kg, 60.0);
}
