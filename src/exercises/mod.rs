//! Exercise catalog.
//!
//! Routines and templates refer to exercises by their stable string id.

pub mod library;

pub use library::{alternatives, find_exercise, Equipment, Exercise, MuscleGroup, EXERCISES};
