//! Observer port interface
//!
//! The pipeline and its supervisors emit typed events as they happen;
//! presentation (terminal, desktop notifications) is an adapter concern.
//! Observers receive values, never rendered log text.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

/// The pipeline phase an event refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelinePhase {
    AcquireSource,
    Transform,
    WriteResult,
    Paste,
}

impl PipelinePhase {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AcquireSource => "acquire-source",
            Self::Transform => "transform",
            Self::WriteResult => "write-result",
            Self::Paste => "paste",
        }
    }
}

impl fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a completed pipeline produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionResult {
    /// The transformed text that was written and pasted
    Text(String),
    /// An image-kind activation completed; the text is withheld from events
    Redacted,
    /// The provider returned an empty result; nothing was written or pasted
    Empty,
}

/// A typed event emitted by the activation machinery
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObserverEvent {
    /// An activation's pipeline has started
    ActivationStarted {
        action: String,
        combination: String,
    },
    /// A pipeline phase failed; the activation is over
    PhaseFailed {
        action: String,
        phase: PipelinePhase,
        message: String,
    },
    /// A non-fatal collaborator failure; the activation continues
    PhaseWarning {
        action: String,
        phase: PipelinePhase,
        message: String,
    },
    /// The pipeline reached Done
    Completed {
        action: String,
        result: CompletionResult,
        elapsed: Duration,
    },
    /// An activation was dropped before its pipeline could start
    ActivationDropped { action: String, reason: String },
    /// A stopped key subscription missed its join deadline and was leaked
    SubscriptionAbandoned,
    /// Standing condition: the OS key subscription could not be (re)started
    HotkeysDisabled { reason: String },
}

/// Port for receiving activation lifecycle events
#[async_trait]
pub trait Observer: Send + Sync {
    /// Deliver one event. Implementations must not block the caller for
    /// longer than presentation requires.
    async fn notify(&self, event: ObserverEvent);
}

/// Blanket implementation for boxed observer types
#[async_trait]
impl Observer for Box<dyn Observer> {
    async fn notify(&self, event: ObserverEvent) {
        self.as_ref().notify(event).await
    }
}

/// Blanket implementation for shared observer types
#[async_trait]
impl<T: Observer + ?Sized> Observer for std::sync::Arc<T> {
    async fn notify(&self, event: ObserverEvent) {
        self.as_ref().notify(event).await
    }
}
