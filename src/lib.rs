//! IronLog - Strength Training Tracker
//!
//! Starter routine templates with a profile-based recommender, routines built
//! from them, an active workout session with set logging and a rest timer,
//! and local workout history with training statistics.

pub mod exercises;
pub mod history;
pub mod onboarding;
pub mod routines;
pub mod session;
pub mod storage;
pub mod templates;

// Re-export commonly used types
pub use history::{CompletedWorkout, WorkoutStats};
pub use onboarding::OnboardingWizard;
pub use routines::{Routine, RoutineManager};
pub use session::{SessionClock, WorkoutTracker};
pub use storage::config::UserProfile;
pub use storage::database::Database;
pub use templates::{recommend, RecommendationInput, StarterTemplate};
