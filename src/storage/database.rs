//! Database operations using rusqlite.
//!
//! Local store for profiles, routines, finished workouts and the cached
//! workout in progress.

use crate::history::{CompletedExercise, CompletedWorkout};
use crate::routines::{Routine, RoutineDay};
use crate::session::ActiveWorkout;
use crate::storage::config::{Units, UserProfile};
use crate::storage::schema::{CURRENT_VERSION, SCHEMA, SCHEMA_VERSION_TABLE};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

/// Database wrapper for SQLite operations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create a database at the given path.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DatabaseError::IoError(e.to_string()))?;
        }

        let conn =
            Connection::open(path).map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Initialize the database schema.
    fn initialize(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        let current_version = self.get_schema_version()?;

        if current_version < CURRENT_VERSION {
            self.migrate(current_version)?;
        }

        Ok(())
    }

    /// Get the current schema version.
    fn get_schema_version(&self) -> Result<i32, DatabaseError> {
        let result: SqliteResult<i32> = self.conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        );

        match result {
            Ok(version) => Ok(version),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(e) => Err(DatabaseError::QueryFailed(e.to_string())),
        }
    }

    /// Run database migrations.
    fn migrate(&self, from_version: i32) -> Result<(), DatabaseError> {
        if from_version < 1 {
            self.conn
                .execute_batch(SCHEMA)
                .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

            self.conn
                .execute(
                    "INSERT INTO schema_version (version, applied_at) VALUES (?, datetime('now'))",
                    [CURRENT_VERSION],
                )
                .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

            tracing::info!("Database migrated to version {}", CURRENT_VERSION);
        }

        Ok(())
    }

    // ========== User Profile Operations ==========

    /// Insert a new user profile.
    pub fn insert_user(&self, profile: &UserProfile) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO users (id, name, goal, experience, days_per_week, units,
                 onboarding_complete, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    profile.id.to_string(),
                    profile.name,
                    profile.goal.key(),
                    profile.experience.key(),
                    profile.days_per_week,
                    profile.units.key(),
                    profile.onboarding_complete as i32,
                    profile.created_at.to_rfc3339(),
                    profile.updated_at.to_rfc3339(),
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    /// Get a user profile by ID.
    pub fn get_user(&self, id: &Uuid) -> Result<Option<UserProfile>, DatabaseError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name, goal, experience, days_per_week, units,
                 onboarding_complete, created_at, updated_at FROM users WHERE id = ?1",
                params![id.to_string()],
                map_user_row,
            )
            .optional()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        row.map(UserRow::into_profile).transpose()
    }

    /// Get the first user ever created.
    pub fn get_default_user(&self) -> Result<Option<UserProfile>, DatabaseError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name, goal, experience, days_per_week, units,
                 onboarding_complete, created_at, updated_at FROM users
                 ORDER BY created_at ASC, rowid ASC LIMIT 1",
                [],
                map_user_row,
            )
            .optional()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        row.map(UserRow::into_profile).transpose()
    }

    /// Update an existing user profile.
    pub fn update_user(&self, profile: &UserProfile) -> Result<(), DatabaseError> {
        let rows_affected = self
            .conn
            .execute(
                "UPDATE users SET name = ?2, goal = ?3, experience = ?4, days_per_week = ?5,
                 units = ?6, onboarding_complete = ?7, updated_at = ?8 WHERE id = ?1",
                params![
                    profile.id.to_string(),
                    profile.name,
                    profile.goal.key(),
                    profile.experience.key(),
                    profile.days_per_week,
                    profile.units.key(),
                    profile.onboarding_complete as i32,
                    profile.updated_at.to_rfc3339(),
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        if rows_affected == 0 {
            return Err(DatabaseError::NotFound(format!("User {}", profile.id)));
        }

        Ok(())
    }

    /// Delete a user profile.
    pub fn delete_user(&self, id: &Uuid) -> Result<(), DatabaseError> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM users WHERE id = ?1", params![id.to_string()])
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        if rows_affected == 0 {
            return Err(DatabaseError::NotFound(format!("User {}", id)));
        }

        Ok(())
    }

    /// Count user profiles.
    pub fn count_users(&self) -> Result<usize, DatabaseError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(count as usize)
    }

    /// Get the default user, creating one if the database is empty.
    pub fn get_or_create_default_user(&self) -> Result<UserProfile, DatabaseError> {
        if let Some(profile) = self.get_default_user()? {
            return Ok(profile);
        }

        let profile = UserProfile::default();
        self.insert_user(&profile)?;
        tracing::info!(user = %profile.id, "Created default user profile");
        Ok(profile)
    }

    // ========== Routine Operations ==========

    /// Insert a new routine.
    pub fn insert_routine(&self, routine: &Routine) -> Result<(), DatabaseError> {
        let days_json = serde_json::to_string(&routine.days)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;

        self.conn
            .execute(
                "INSERT INTO routines (id, user_id, name, template_id, days_json, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    routine.id.to_string(),
                    routine.user_id.to_string(),
                    routine.name,
                    routine.template_id,
                    days_json,
                    routine.created_at.to_rfc3339(),
                    routine.updated_at.to_rfc3339(),
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    /// Get a routine by ID.
    pub fn get_routine(&self, id: &Uuid) -> Result<Option<Routine>, DatabaseError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, user_id, name, template_id, days_json, created_at, updated_at
                 FROM routines WHERE id = ?1",
                params![id.to_string()],
                map_routine_row,
            )
            .optional()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        row.map(RoutineRow::into_routine).transpose()
    }

    /// List a user's routines, oldest first.
    pub fn list_routines(&self, user_id: &Uuid) -> Result<Vec<Routine>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, user_id, name, template_id, days_json, created_at, updated_at
                 FROM routines WHERE user_id = ?1 ORDER BY created_at ASC, rowid ASC",
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map(params![user_id.to_string()], map_routine_row)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut routines = Vec::new();
        for row in rows {
            let row = row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            routines.push(row.into_routine()?);
        }

        Ok(routines)
    }

    /// Update an existing routine.
    pub fn update_routine(&self, routine: &Routine) -> Result<(), DatabaseError> {
        let days_json = serde_json::to_string(&routine.days)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;

        let rows_affected = self
            .conn
            .execute(
                "UPDATE routines SET name = ?2, template_id = ?3, days_json = ?4, updated_at = ?5
                 WHERE id = ?1",
                params![
                    routine.id.to_string(),
                    routine.name,
                    routine.template_id,
                    days_json,
                    routine.updated_at.to_rfc3339(),
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        if rows_affected == 0 {
            return Err(DatabaseError::NotFound(format!("Routine {}", routine.id)));
        }

        Ok(())
    }

    /// Delete a routine by ID.
    pub fn delete_routine(&self, id: &Uuid) -> Result<(), DatabaseError> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM routines WHERE id = ?1", params![id.to_string()])
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        if rows_affected == 0 {
            return Err(DatabaseError::NotFound(format!("Routine {}", id)));
        }

        Ok(())
    }

    /// Count a user's routines.
    pub fn count_routines(&self, user_id: &Uuid) -> Result<usize, DatabaseError> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM routines WHERE user_id = ?1",
                params![user_id.to_string()],
                |row| row.get(0),
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(count as usize)
    }

    // ========== Workout History Operations ==========

    /// Insert a finished workout.
    pub fn insert_workout_session(&self, workout: &CompletedWorkout) -> Result<(), DatabaseError> {
        let exercises_json = serde_json::to_string(&workout.exercises)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;

        self.conn
            .execute(
                "INSERT INTO workout_sessions (id, user_id, routine_id, routine_name, day_index,
                 day_label, started_at, finished_at, duration_seconds, volume_kg, exercises_json)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                params![
                    workout.id.to_string(),
                    workout.user_id.to_string(),
                    workout.routine_id.to_string(),
                    workout.routine_name,
                    workout.day_index,
                    workout.day_label,
                    workout.started_at.to_rfc3339(),
                    workout.finished_at.to_rfc3339(),
                    workout.duration_seconds,
                    workout.volume_kg() as f64,
                    exercises_json,
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    /// Get a finished workout by ID.
    pub fn get_workout_session(&self, id: &Uuid) -> Result<Option<CompletedWorkout>, DatabaseError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, user_id, routine_id, routine_name, day_index, day_label,
                 started_at, finished_at, duration_seconds, exercises_json
                 FROM workout_sessions WHERE id = ?1",
                params![id.to_string()],
                map_session_row,
            )
            .optional()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        row.map(SessionRow::into_workout).transpose()
    }

    /// List a user's finished workouts, most recent first.
    pub fn list_workout_sessions(
        &self,
        user_id: &Uuid,
        limit: Option<usize>,
    ) -> Result<Vec<CompletedWorkout>, DatabaseError> {
        let limit = limit.map(|l| l as i64).unwrap_or(-1);

        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, user_id, routine_id, routine_name, day_index, day_label,
                 started_at, finished_at, duration_seconds, exercises_json
                 FROM workout_sessions WHERE user_id = ?1
                 ORDER BY finished_at DESC LIMIT ?2",
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map(params![user_id.to_string(), limit], map_session_row)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let mut workouts = Vec::new();
        for row in rows {
            let row = row.map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;
            workouts.push(row.into_workout()?);
        }

        Ok(workouts)
    }

    /// Count a user's finished workouts.
    pub fn count_workout_sessions(&self, user_id: &Uuid) -> Result<usize, DatabaseError> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM workout_sessions WHERE user_id = ?1",
                params![user_id.to_string()],
                |row| row.get(0),
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(count as usize)
    }

    // ========== Active Workout Cache ==========

    /// Cache the workout in progress, replacing any previous copy.
    pub fn save_active_workout(&self, workout: &ActiveWorkout) -> Result<(), DatabaseError> {
        let workout_json = serde_json::to_string(workout)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;

        self.conn
            .execute(
                "INSERT OR REPLACE INTO active_workout (id, workout_json, saved_at)
                 VALUES (1, ?1, ?2)",
                params![workout_json, Utc::now().to_rfc3339()],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }

    /// Check if a cached workout exists.
    pub fn has_active_workout(&self) -> Result<bool, DatabaseError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM active_workout", [], |row| row.get(0))
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(count > 0)
    }

    /// Load the cached workout in progress.
    pub fn load_active_workout(&self) -> Result<Option<ActiveWorkout>, DatabaseError> {
        let result: Result<String, _> = self.conn.query_row(
            "SELECT workout_json FROM active_workout WHERE id = 1",
            [],
            |row| row.get(0),
        );

        match result {
            Ok(json) => {
                let workout: ActiveWorkout = serde_json::from_str(&json)
                    .map_err(|e| DatabaseError::DeserializationError(e.to_string()))?;
                Ok(Some(workout))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(DatabaseError::QueryFailed(e.to_string())),
        }
    }

    /// Drop the cached workout.
    pub fn clear_active_workout(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM active_workout", [])
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(())
    }
}

fn map_user_row(row: &rusqlite::Row) -> rusqlite::Result<UserRow> {
    Ok(UserRow {
        id: row.get(0)?,
        name: row.get(1)?,
        goal: row.get(2)?,
        experience: row.get(3)?,
        days_per_week: row.get(4)?,
        units: row.get(5)?,
        onboarding_complete: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

fn map_routine_row(row: &rusqlite::Row) -> rusqlite::Result<RoutineRow> {
    Ok(RoutineRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        template_id: row.get(3)?,
        days_json: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

fn map_session_row(row: &rusqlite::Row) -> rusqlite::Result<SessionRow> {
    Ok(SessionRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        routine_id: row.get(2)?,
        routine_name: row.get(3)?,
        day_index: row.get(4)?,
        day_label: row.get(5)?,
        started_at: row.get(6)?,
        finished_at: row.get(7)?,
        duration_seconds: row.get(8)?,
        exercises_json: row.get(9)?,
    })
}

fn parse_uuid(value: &str, what: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(value)
        .map_err(|e| DatabaseError::DeserializationError(format!("Invalid {} UUID: {}", what, e)))
}

fn parse_timestamp(value: &str, what: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::DeserializationError(format!("Invalid {}: {}", what, e)))
}

/// Intermediate struct for reading user rows from database.
struct UserRow {
    id: String,
    name: String,
    goal: String,
    experience: String,
    days_per_week: u8,
    units: String,
    onboarding_complete: i32,
    created_at: String,
    updated_at: String,
}

impl UserRow {
    fn into_profile(self) -> Result<UserProfile, DatabaseError> {
        Ok(UserProfile {
            id: parse_uuid(&self.id, "user")?,
            name: self.name,
            goal: self
                .goal
                .parse()
                .map_err(|e| DatabaseError::DeserializationError(format!("{}", e)))?,
            experience: self
                .experience
                .parse()
                .map_err(|e| DatabaseError::DeserializationError(format!("{}", e)))?,
            days_per_week: self.days_per_week,
            units: Units::from_key(&self.units),
            onboarding_complete: self.onboarding_complete != 0,
            created_at: parse_timestamp(&self.created_at, "created date")?,
            updated_at: parse_timestamp(&self.updated_at, "updated date")?,
        })
    }
}

/// Intermediate struct for reading routine rows from database.
struct RoutineRow {
    id: String,
    user_id: String,
    name: String,
    template_id: Option<String>,
    days_json: String,
    created_at: String,
    updated_at: String,
}

impl RoutineRow {
    fn into_routine(self) -> Result<Routine, DatabaseError> {
        let days: Vec<RoutineDay> = serde_json::from_str(&self.days_json)
            .map_err(|e| DatabaseError::DeserializationError(e.to_string()))?;

        Ok(Routine {
            id: parse_uuid(&self.id, "routine")?,
            user_id: parse_uuid(&self.user_id, "user")?,
            name: self.name,
            template_id: self.template_id,
            days,
            created_at: parse_timestamp(&self.created_at, "created date")?,
            updated_at: parse_timestamp(&self.updated_at, "updated date")?,
        })
    }
}

/// Intermediate struct for reading workout session rows from database.
struct SessionRow {
    id: String,
    user_id: String,
    routine_id: String,
    routine_name: String,
    day_index: u8,
    day_label: String,
    started_at: String,
    finished_at: String,
    duration_seconds: u32,
    exercises_json: String,
}

impl SessionRow {
    fn into_workout(self) -> Result<CompletedWorkout, DatabaseError> {
        let exercises: Vec<CompletedExercise> = serde_json::from_str(&self.exercises_json)
            .map_err(|e| DatabaseError::DeserializationError(e.to_string()))?;

        Ok(CompletedWorkout {
            id: parse_uuid(&self.id, "workout")?,
            user_id: parse_uuid(&self.user_id, "user")?,
            routine_id: parse_uuid(&self.routine_id, "routine")?,
            routine_name: self.routine_name,
            day_index: self.day_index,
            day_label: self.day_label,
            started_at: parse_timestamp(&self.started_at, "start date")?,
            finished_at: parse_timestamp(&self.finished_at, "finish date")?,
            duration_seconds: self.duration_seconds,
            exercises,
        })
    }
}

/// Database errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}
