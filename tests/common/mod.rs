//! Shared stub collaborators for integration tests

// Not every test binary uses every stub
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use clipforge::application::ports::{
    Clipboard, ClipboardError, InjectorError, InputInjector, KeyEventSource, KeySourceError,
    KeySubscription, Observer, ObserverEvent, ProviderError, TransformProvider,
};
use clipforge::domain::hotkey::KeyEvent;
use clipforge::domain::transform::{ClipboardImage, TransformSource};

/// Clipboard stub with scripted reads and recorded writes
#[derive(Clone, Default)]
pub struct StubClipboard {
    inner: Arc<ClipboardState>,
}

#[derive(Default)]
pub struct ClipboardState {
    reads: Mutex<VecDeque<Option<String>>>,
    default_read: Mutex<Option<String>>,
    image: Mutex<Option<ClipboardImage>>,
    pub read_calls: AtomicUsize,
    writes: Mutex<Vec<String>>,
}

impl StubClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every read returns this text once the script is exhausted
    pub fn always_reading(text: &str) -> Self {
        let stub = Self::new();
        *stub.inner.default_read.lock().unwrap() = Some(text.to_string());
        stub
    }

    /// Queue one scripted read result
    pub fn push_read(&self, read: Option<&str>) {
        self.inner
            .reads
            .lock()
            .unwrap()
            .push_back(read.map(str::to_string));
    }

    pub fn set_image(&self, image: Option<ClipboardImage>) {
        *self.inner.image.lock().unwrap() = image;
    }

    pub fn writes(&self) -> Vec<String> {
        self.inner.writes.lock().unwrap().clone()
    }

    pub fn read_calls(&self) -> usize {
        self.inner.read_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Clipboard for StubClipboard {
    async fn read_text(&self) -> Result<Option<String>, ClipboardError> {
        self.inner.read_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(read) = self.inner.reads.lock().unwrap().pop_front() {
            return Ok(read);
        }
        Ok(self.inner.default_read.lock().unwrap().clone())
    }

    async fn read_image(&self) -> Result<Option<ClipboardImage>, ClipboardError> {
        Ok(self.inner.image.lock().unwrap().clone())
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        self.inner.writes.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// Injector stub counting copy/paste simulations
#[derive(Clone, Default)]
pub struct StubInjector {
    inner: Arc<InjectorState>,
}

#[derive(Default)]
pub struct InjectorState {
    pub copies: AtomicUsize,
    pub pastes: AtomicUsize,
}

impl StubInjector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn copies(&self) -> usize {
        self.inner.copies.load(Ordering::SeqCst)
    }

    pub fn pastes(&self) -> usize {
        self.inner.pastes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InputInjector for StubInjector {
    async fn simulate_copy(&self) -> Result<(), InjectorError> {
        self.inner.copies.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn simulate_paste(&self) -> Result<(), InjectorError> {
        self.inner.pastes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Provider stub: echoes a fixed result, optionally stalling when the
/// prompt contains a marker (for fan-out ordering tests)
#[derive(Clone)]
pub struct StubProvider {
    result: String,
    delay_marker: Option<String>,
    delay: Duration,
    calls: Arc<AtomicUsize>,
}

impl StubProvider {
    pub fn returning(result: &str) -> Self {
        Self {
            result: result.to_string(),
            delay_marker: None,
            delay: Duration::ZERO,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Stall transforms whose prompt contains `marker`
    pub fn with_delay_on(mut self, marker: &str, delay: Duration) -> Self {
        self.delay_marker = Some(marker.to_string());
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TransformProvider for StubProvider {
    async fn transform(
        &self,
        _source: &TransformSource,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(marker) = &self.delay_marker {
            if prompt.contains(marker) {
                tokio::time::sleep(self.delay).await;
            }
        }
        Ok(self.result.clone())
    }
}

/// Observer recording every event it receives
#[derive(Clone, Default)]
pub struct RecordingObserver {
    events: Arc<Mutex<Vec<ObserverEvent>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ObserverEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Actions in the order their Completed events arrived
    pub fn completed_actions(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                ObserverEvent::Completed { action, .. } => Some(action),
                _ => None,
            })
            .collect()
    }

    pub fn started_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ObserverEvent::ActivationStarted { .. }))
            .count()
    }

    pub fn dropped_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, ObserverEvent::ActivationDropped { .. }))
            .count()
    }
}

#[async_trait]
impl Observer for RecordingObserver {
    async fn notify(&self, event: ObserverEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Key source handing out channels the test can feed events into
#[derive(Clone, Default)]
pub struct ScriptedKeySource {
    taps: Arc<Mutex<Vec<mpsc::Sender<KeyEvent>>>>,
}

impl ScriptedKeySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sender for the most recent subscription
    pub fn keys(&self) -> mpsc::Sender<KeyEvent> {
        self.taps
            .lock()
            .unwrap()
            .last()
            .expect("no subscription opened")
            .clone()
    }

    pub fn subscriptions(&self) -> usize {
        self.taps.lock().unwrap().len()
    }
}

impl KeyEventSource for ScriptedKeySource {
    fn subscribe(&self, tx: mpsc::Sender<KeyEvent>) -> Result<KeySubscription, KeySourceError> {
        self.taps.lock().unwrap().push(tx);
        Ok(KeySubscription::new(Arc::new(AtomicBool::new(false)), None))
    }
}
