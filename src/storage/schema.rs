//! Database schema definitions for IronLog.

/// SQL schema for creating all database tables.
pub const SCHEMA: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    goal TEXT NOT NULL DEFAULT 'general_fitness',
    experience TEXT NOT NULL DEFAULT 'beginner',
    days_per_week INTEGER NOT NULL DEFAULT 3,
    units TEXT NOT NULL DEFAULT 'metric',
    onboarding_complete INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Routines table
CREATE TABLE IF NOT EXISTS routines (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL REFERENCES users(id),
    name TEXT NOT NULL,
    template_id TEXT,
    days_json TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_routines_user_id ON routines(user_id);

-- Finished workout sessions
CREATE TABLE IF NOT EXISTS workout_sessions (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL REFERENCES users(id),
    routine_id TEXT NOT NULL,
    routine_name TEXT NOT NULL,
    day_index INTEGER NOT NULL,
    day_label TEXT NOT NULL,
    started_at TEXT NOT NULL,
    finished_at TEXT NOT NULL,
    duration_seconds INTEGER NOT NULL,
    volume_kg REAL NOT NULL DEFAULT 0,
    exercises_json TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_workout_sessions_user_id ON workout_sessions(user_id);
CREATE INDEX IF NOT EXISTS idx_workout_sessions_finished_at ON workout_sessions(finished_at);

-- Best-effort cache of the workout in progress (single row)
CREATE TABLE IF NOT EXISTS active_workout (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    workout_json TEXT NOT NULL,
    saved_at TEXT NOT NULL
);
"#;

/// SQL for schema version tracking (migrations)
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Current schema version
pub const CURRENT_VERSION: i32 = 1;
