//! Observer adapters

use async_trait::async_trait;

use crate::application::ports::{Observer, ObserverEvent};

pub mod notify;
pub mod terminal;

pub use notify::NotifyRustObserver;
pub use terminal::TerminalObserver;

/// Fans one event out to a set of observers, in order.
#[derive(Default)]
pub struct ObserverSet {
    observers: Vec<Box<dyn Observer>>,
}

impl ObserverSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an observer to the set
    pub fn push(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    /// Number of observers in the set
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

#[async_trait]
impl Observer for ObserverSet {
    async fn notify(&self, event: ObserverEvent) {
        for observer in &self.observers {
            observer.notify(event.clone()).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Counting(Arc<AtomicUsize>);

    #[async_trait]
    impl Observer for Counting {
        async fn notify(&self, _event: ObserverEvent) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn fans_out_to_every_observer() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut set = ObserverSet::new();
        set.push(Box::new(Counting(Arc::clone(&count))));
        set.push(Box::new(Counting(Arc::clone(&count))));

        set.notify(ObserverEvent::SubscriptionAbandoned).await;
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }
}
