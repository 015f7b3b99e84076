//! Active workout session.
//!
//! One in-memory workout at a time, mutated through [`WorkoutTracker`] and
//! ticked once per second by [`SessionClock`]. [`CachedSession`] keeps the
//! workout in the local database between command-line invocations.

pub mod cache;
pub mod clock;
pub mod rest_timer;
pub mod tracker;
pub mod types;

pub use cache::{CacheError, CachedSession};
pub use clock::{ClockEvent, SessionClock};
pub use rest_timer::RestTimer;
pub use tracker::WorkoutTracker;
pub use types::{
    ActiveWorkout, ExerciseLog, ExerciseRef, SessionError, SetField, SetKey, SetLog, TickOutcome,
    WorkoutProgress,
};
