//! Keyboard event source port interface

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::sync::mpsc;

use crate::domain::hotkey::KeyEvent;

/// Key source errors
#[derive(Debug, Clone, Error)]
pub enum KeySourceError {
    #[error("OS denied the key-event subscription: {0}")]
    SubscriptionDenied(String),

    #[error("Failed to spawn the key-event thread: {0}")]
    ThreadSpawn(String),
}

/// Outcome of stopping a key subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOutcome {
    /// The subscription thread exited within the join timeout
    Joined,
    /// The thread did not exit in time and was abandoned (leaked)
    Abandoned,
}

/// Port for the OS-level global key subscription.
///
/// Each call to `subscribe` opens a fresh subscription delivering raw key
/// events to the given channel until the returned handle is stopped.
pub trait KeyEventSource: Send + Sync {
    fn subscribe(&self, tx: mpsc::Sender<KeyEvent>) -> Result<KeySubscription, KeySourceError>;
}

/// Handle to a live key subscription.
///
/// Stopping signals the producer and then waits a bounded time for its
/// thread to exit; a hook the OS will not release is abandoned rather
/// than blocking shutdown.
pub struct KeySubscription {
    stop: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl KeySubscription {
    /// Create a handle over a producer thread and its stop flag
    pub fn new(stop: Arc<AtomicBool>, thread: Option<thread::JoinHandle<()>>) -> Self {
        Self { stop, thread }
    }

    /// Signal the producer to stop and wait up to `timeout` for it to exit
    pub fn stop(mut self, timeout: Duration) -> StopOutcome {
        self.stop.store(true, Ordering::SeqCst);

        let Some(handle) = self.thread.take() else {
            return StopOutcome::Joined;
        };

        // JoinHandle has no timed join; poll until the deadline
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if handle.is_finished() {
                let _ = handle.join();
                return StopOutcome::Joined;
            }
            thread::sleep(Duration::from_millis(10));
        }

        StopOutcome::Abandoned
    }
}
