//! Hotkey listener and lifecycle controller
//!
//! The listener task is the only place that touches `ModifierState`:
//! tracker updates and matcher calls run serially on it, and a matched
//! activation is handed off without ever blocking on pipeline work.
//!
//! The controller owns the OS subscription lifecycle
//! (`Stopped → Starting → Running → Stopping → Stopped`), so the registry
//! can change shape at runtime without leaking listeners or matching
//! events against a torn view.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::domain::activation::Activation;
use crate::domain::hotkey::{
    find_match, HotkeyRegistry, KeyDirection, KeyDisposition, KeyEvent, ModifierState,
};

use super::ports::{
    KeyEventSource, KeySourceError, KeySubscription, Observer, ObserverEvent, StopOutcome,
};

/// Capacity of the raw key-event channel
pub const KEY_EVENT_BUFFER: usize = 256;

/// How long a stop waits for the OS hook thread before abandoning it
pub const DEFAULT_JOIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Lifecycle state of the listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    Stopped,
    Starting,
    Running,
    Stopping,
}

/// Owns the OS key subscription and the listener task over it.
pub struct ListenerController<S, O>
where
    S: KeyEventSource,
    O: Observer + Send + Sync + 'static,
{
    source: S,
    registry: Arc<HotkeyRegistry>,
    activations: mpsc::Sender<Activation>,
    observer: Arc<O>,
    join_timeout: Duration,
    state: ListenerState,
    subscription: Option<KeySubscription>,
    shutdown: Option<watch::Sender<bool>>,
    task: Option<JoinHandle<()>>,
}

impl<S, O> ListenerController<S, O>
where
    S: KeyEventSource,
    O: Observer + Send + Sync + 'static,
{
    /// Create a controller in the stopped state
    pub fn new(
        source: S,
        registry: Arc<HotkeyRegistry>,
        activations: mpsc::Sender<Activation>,
        observer: Arc<O>,
    ) -> Self {
        Self {
            source,
            registry,
            activations,
            observer,
            join_timeout: DEFAULT_JOIN_TIMEOUT,
            state: ListenerState::Stopped,
            subscription: None,
            shutdown: None,
            task: None,
        }
    }

    /// Override the bounded join timeout used on stop
    pub fn with_join_timeout(mut self, timeout: Duration) -> Self {
        self.join_timeout = timeout;
        self
    }

    /// Current lifecycle state
    pub fn state(&self) -> ListenerState {
        self.state
    }

    /// Open a fresh OS subscription and spawn the listener task over it.
    ///
    /// A denied subscription is fatal to hotkey functionality but not to
    /// the process: the failure surfaces as a standing `HotkeysDisabled`
    /// observer condition and the controller returns to `Stopped`.
    pub async fn start(&mut self) -> Result<(), KeySourceError> {
        if self.state == ListenerState::Running {
            return Ok(());
        }
        self.state = ListenerState::Starting;

        let (tx, rx) = mpsc::channel(KEY_EVENT_BUFFER);
        let subscription = match self.source.subscribe(tx) {
            Ok(subscription) => subscription,
            Err(e) => {
                self.state = ListenerState::Stopped;
                self.observer
                    .notify(ObserverEvent::HotkeysDisabled {
                        reason: e.to_string(),
                    })
                    .await;
                return Err(e);
            }
        };

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(run_listener(
            rx,
            shutdown_rx,
            Arc::clone(&self.registry),
            self.activations.clone(),
            Arc::clone(&self.observer),
        ));

        self.subscription = Some(subscription);
        self.shutdown = Some(shutdown_tx);
        self.task = Some(task);
        self.state = ListenerState::Running;
        Ok(())
    }

    /// Stop the listener task and the OS subscription.
    ///
    /// The subscription join is bounded: a hook thread the OS will not
    /// release is abandoned (leaked, reported) rather than blocking
    /// shutdown indefinitely.
    pub async fn stop(&mut self) {
        if self.state == ListenerState::Stopped {
            return;
        }
        self.state = ListenerState::Stopping;

        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(true);
        }

        if let Some(subscription) = self.subscription.take() {
            let timeout = self.join_timeout;
            let outcome = tokio::task::spawn_blocking(move || subscription.stop(timeout))
                .await
                .unwrap_or(StopOutcome::Abandoned);
            if outcome == StopOutcome::Abandoned {
                self.observer
                    .notify(ObserverEvent::SubscriptionAbandoned)
                    .await;
            }
        }

        if let Some(task) = self.task.take() {
            // The task exits promptly once the shutdown signal lands
            let _ = tokio::time::timeout(Duration::from_secs(1), task).await;
        }

        self.state = ListenerState::Stopped;
    }

    /// Stop and start again over the current registry.
    ///
    /// Required whenever the combination set changes
    /// (`ListenerImpact::RestartRequired`), so no event is matched
    /// against a stale subscription mid-flight.
    pub async fn restart(&mut self) -> Result<(), KeySourceError> {
        self.stop().await;
        self.start().await
    }
}

/// The serial listener loop: tracker update, match, hand-off.
async fn run_listener<O: Observer>(
    mut events: mpsc::Receiver<KeyEvent>,
    mut shutdown: watch::Receiver<bool>,
    registry: Arc<HotkeyRegistry>,
    activations: mpsc::Sender<Activation>,
    observer: Arc<O>,
) {
    // Owned here and nowhere else; never shared across threads
    let mut modifiers = ModifierState::default();

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            event = events.recv() => match event {
                Some(event) => {
                    handle_key_event(
                        event,
                        &mut modifiers,
                        &registry,
                        &activations,
                        observer.as_ref(),
                    )
                    .await;
                }
                None => break,
            },
        }
    }
}

async fn handle_key_event<O: Observer>(
    event: KeyEvent,
    modifiers: &mut ModifierState,
    registry: &HotkeyRegistry,
    activations: &mpsc::Sender<Activation>,
    observer: &O,
) {
    match event.direction {
        KeyDirection::Up => {
            let _ = modifiers.on_key_up(&event.token);
        }
        KeyDirection::Down => {
            if modifiers.on_key_down(&event.token) != KeyDisposition::Terminal {
                return;
            }

            let snapshot = registry.snapshot();
            let Some(entry) = find_match(&event.token, modifiers, &snapshot) else {
                return;
            };

            let activation = Activation::from_entry(entry);
            // The chord is spent: a still-held modifier cannot re-arm
            // another combination without a physical release
            modifiers.clear();

            if let Err(e) = activations.try_send(activation) {
                let action = match e {
                    mpsc::error::TrySendError::Full(a)
                    | mpsc::error::TrySendError::Closed(a) => a.action,
                };
                observer
                    .notify(ObserverEvent::ActivationDropped {
                        action,
                        reason: "activation queue full".to_string(),
                    })
                    .await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::hotkey::HotkeyEntry;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicBool;
    use std::sync::Mutex;

    #[derive(Default)]
    struct NullObserver;

    #[async_trait]
    impl Observer for NullObserver {
        async fn notify(&self, _event: ObserverEvent) {}
    }

    /// Key source that records the channel of every subscription it opens
    #[derive(Default)]
    struct ScriptedSource {
        taps: Mutex<Vec<mpsc::Sender<KeyEvent>>>,
        deny: bool,
    }

    impl ScriptedSource {
        fn denying() -> Self {
            Self {
                taps: Mutex::new(Vec::new()),
                deny: true,
            }
        }

        fn subscriptions(&self) -> usize {
            self.taps.lock().unwrap().len()
        }
    }

    impl KeyEventSource for &'static ScriptedSource {
        fn subscribe(
            &self,
            tx: mpsc::Sender<KeyEvent>,
        ) -> Result<KeySubscription, KeySourceError> {
            if self.deny {
                return Err(KeySourceError::SubscriptionDenied(
                    "permission denied".to_string(),
                ));
            }
            self.taps.lock().unwrap().push(tx);
            Ok(KeySubscription::new(Arc::new(AtomicBool::new(false)), None))
        }
    }

    fn registry_with(entries: &[(&str, &str)]) -> Arc<HotkeyRegistry> {
        let registry = HotkeyRegistry::new();
        for (combo, name) in entries {
            let _ = registry
                .register(HotkeyEntry::new(
                    combo.parse().unwrap(),
                    *name,
                    format!("{name}: "),
                ))
                .unwrap();
        }
        Arc::new(registry)
    }

    fn leak(source: ScriptedSource) -> &'static ScriptedSource {
        Box::leak(Box::new(source))
    }

    #[tokio::test]
    async fn start_stop_transitions() {
        let source = leak(ScriptedSource::default());
        let (tx, _rx) = mpsc::channel(8);
        let mut controller =
            ListenerController::new(source, registry_with(&[]), tx, Arc::new(NullObserver));

        assert_eq!(controller.state(), ListenerState::Stopped);
        controller.start().await.unwrap();
        assert_eq!(controller.state(), ListenerState::Running);
        controller.stop().await;
        assert_eq!(controller.state(), ListenerState::Stopped);
    }

    #[tokio::test]
    async fn restart_opens_a_fresh_subscription() {
        let source = leak(ScriptedSource::default());
        let (tx, _rx) = mpsc::channel(8);
        let mut controller =
            ListenerController::new(source, registry_with(&[]), tx, Arc::new(NullObserver));

        controller.start().await.unwrap();
        controller.restart().await.unwrap();
        assert_eq!(source.subscriptions(), 2);
        assert_eq!(controller.state(), ListenerState::Running);
        controller.stop().await;
    }

    #[tokio::test]
    async fn denied_subscription_leaves_stopped() {
        let source = leak(ScriptedSource::denying());
        let (tx, _rx) = mpsc::channel(8);
        let mut controller =
            ListenerController::new(source, registry_with(&[]), tx, Arc::new(NullObserver));

        assert!(controller.start().await.is_err());
        assert_eq!(controller.state(), ListenerState::Stopped);
    }

    #[tokio::test]
    async fn start_is_idempotent_while_running() {
        let source = leak(ScriptedSource::default());
        let (tx, _rx) = mpsc::channel(8);
        let mut controller =
            ListenerController::new(source, registry_with(&[]), tx, Arc::new(NullObserver));

        controller.start().await.unwrap();
        controller.start().await.unwrap();
        assert_eq!(source.subscriptions(), 1);
        controller.stop().await;
    }

    #[tokio::test]
    async fn chord_produces_one_activation_and_spends_modifiers() {
        let source = leak(ScriptedSource::default());
        let (tx, mut rx) = mpsc::channel(8);
        let registry = registry_with(&[("ctrl+f1", "Fix"), ("ctrl+f2", "Rewrite")]);
        let mut controller =
            ListenerController::new(source, registry, tx, Arc::new(NullObserver));

        controller.start().await.unwrap();
        let keys = source.taps.lock().unwrap().last().unwrap().clone();

        keys.send(KeyEvent::down("ctrl_l")).await.unwrap();
        keys.send(KeyEvent::down("f1")).await.unwrap();
        // Ctrl is still physically held, but the chord is spent: F2 must
        // not fire without a release and re-press of Ctrl
        keys.send(KeyEvent::down("f2")).await.unwrap();

        let activation = rx.recv().await.unwrap();
        assert_eq!(activation.action, "Fix");
        assert_eq!(activation.combination, "ctrl+f1");

        // Give the listener a beat, then confirm nothing else arrived
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(rx.try_recv().is_err());

        controller.stop().await;
    }

    #[tokio::test]
    async fn released_and_repressed_modifier_rearms() {
        let source = leak(ScriptedSource::default());
        let (tx, mut rx) = mpsc::channel(8);
        let registry = registry_with(&[("ctrl+f1", "Fix"), ("ctrl+f2", "Rewrite")]);
        let mut controller =
            ListenerController::new(source, registry, tx, Arc::new(NullObserver));

        controller.start().await.unwrap();
        let keys = source.taps.lock().unwrap().last().unwrap().clone();

        keys.send(KeyEvent::down("ctrl_l")).await.unwrap();
        keys.send(KeyEvent::down("f1")).await.unwrap();
        keys.send(KeyEvent::up("ctrl_l")).await.unwrap();
        keys.send(KeyEvent::down("ctrl_r")).await.unwrap();
        keys.send(KeyEvent::down("f2")).await.unwrap();

        assert_eq!(rx.recv().await.unwrap().action, "Fix");
        assert_eq!(rx.recv().await.unwrap().action, "Rewrite");

        controller.stop().await;
    }

    #[tokio::test]
    async fn non_matching_keys_produce_nothing() {
        let source = leak(ScriptedSource::default());
        let (tx, mut rx) = mpsc::channel(8);
        let registry = registry_with(&[("ctrl+f1", "Fix")]);
        let mut controller =
            ListenerController::new(source, registry, tx, Arc::new(NullObserver));

        controller.start().await.unwrap();
        let keys = source.taps.lock().unwrap().last().unwrap().clone();

        keys.send(KeyEvent::down("f1")).await.unwrap(); // no ctrl
        keys.send(KeyEvent::down("ctrl_l")).await.unwrap();
        keys.send(KeyEvent::down("f10")).await.unwrap(); // no prefix match

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(rx.try_recv().is_err());

        controller.stop().await;
    }
}
