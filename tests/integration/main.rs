//! Integration test modules.

mod cached_workout_test;
mod storage_test;
mod workout_session_test;
