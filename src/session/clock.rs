//! One-second session clock.
//!
//! Drives a shared [`WorkoutTracker`] on a tokio interval and broadcasts
//! elapsed time and rest countdown updates. The clock stops by itself once
//! the workout is finished or cancelled, and on drop.

use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::tracker::WorkoutTracker;

/// Default tick period.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Clock event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockEvent {
    /// One period elapsed.
    Tick {
        elapsed_seconds: u64,
        rest_remaining: Option<u32>,
    },
    /// Rest countdown reached zero.
    RestFinished,
    /// No workout left to drive; the clock has stopped.
    Stopped,
}

/// Background ticker for the active workout.
pub struct SessionClock {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
    event_tx: broadcast::Sender<ClockEvent>,
}

impl SessionClock {
    /// Start ticking the tracker once per second.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(tracker: Arc<Mutex<WorkoutTracker>>) -> Self {
        Self::with_period(tracker, TICK_PERIOD)
    }

    /// Start ticking the tracker with a custom period.
    pub fn with_period(tracker: Arc<Mutex<WorkoutTracker>>, period: Duration) -> Self {
        let (event_tx, _) = broadcast::channel(64);
        let running = Arc::new(AtomicBool::new(true));

        let task_running = Arc::clone(&running);
        let task_tx = event_tx.clone();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            interval.tick().await;

            while task_running.load(Ordering::SeqCst) {
                interval.tick().await;
                if !task_running.load(Ordering::SeqCst) {
                    break;
                }

                let update = {
                    let mut tracker = match tracker.lock() {
                        Ok(guard) => guard,
                        Err(poisoned) => poisoned.into_inner(),
                    };

                    if tracker.is_active() {
                        let outcome = tracker.tick();
                        let elapsed = tracker.elapsed_seconds(Utc::now()).unwrap_or(0);
                        Some((outcome, elapsed))
                    } else {
                        None
                    }
                };

                let Some((outcome, elapsed_seconds)) = update else {
                    break;
                };

                let _ = task_tx.send(ClockEvent::Tick {
                    elapsed_seconds,
                    rest_remaining: outcome.rest_remaining,
                });
                if outcome.rest_finished {
                    let _ = task_tx.send(ClockEvent::RestFinished);
                }
            }

            task_running.store(false, Ordering::SeqCst);
            let _ = task_tx.send(ClockEvent::Stopped);
            tracing::debug!("Session clock stopped");
        });

        tracing::debug!("Session clock started");
        Self {
            running,
            handle: Some(handle),
            event_tx,
        }
    }

    /// Subscribe to clock events.
    pub fn subscribe(&self) -> broadcast::Receiver<ClockEvent> {
        self.event_tx.subscribe()
    }

    /// Check whether the clock is still ticking.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Stop ticking.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for SessionClock {
    fn drop(&mut self) {
        self.stop();
    }
}
