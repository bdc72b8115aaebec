//! Action execution pipeline
//!
//! Per-activation state machine: acquire the source from the clipboard,
//! invoke the transform provider, write the result back, and paste it.
//! Every phase transition is reported to the observer as a typed event.

use std::time::{Duration, Instant};

use thiserror::Error;
use tokio::time::sleep;

use crate::domain::activation::Activation;
use crate::domain::transform::{OutputKind, TransformSource};

use super::ports::{
    Clipboard, ClipboardError, CompletionResult, InputInjector, Observer, ObserverEvent,
    PipelinePhase, ProviderError, TransformProvider,
};

/// Errors that terminate an activation's pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Clipboard is empty")]
    EmptyClipboard,

    #[error("Transform failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),
}

/// Settle intervals between clipboard side effects and reads.
///
/// The clipboard propagates asynchronously on every host OS; the copy
/// simulation needs a beat before the read, and the retry waits longer.
#[derive(Debug, Clone, Copy)]
pub struct PipelineTiming {
    /// Wait between the copy simulation and the first clipboard read
    pub copy_settle: Duration,
    /// Wait between the retry copy simulation and the second read
    pub retry_settle: Duration,
    /// Wait between the clipboard write and the paste simulation
    pub paste_settle: Duration,
}

impl Default for PipelineTiming {
    fn default() -> Self {
        Self {
            copy_settle: Duration::from_millis(100),
            retry_settle: Duration::from_millis(500),
            paste_settle: Duration::from_millis(300),
        }
    }
}

impl PipelineTiming {
    /// Zero intervals, for tests
    pub fn immediate() -> Self {
        Self {
            copy_settle: Duration::ZERO,
            retry_settle: Duration::ZERO,
            paste_settle: Duration::ZERO,
        }
    }
}

/// Per-activation execution pipeline.
///
/// Pipelines are fully isolated: no error escapes `execute`, so one
/// activation can never poison the dispatcher or another activation.
pub struct TransformPipeline<C, I, P, O>
where
    C: Clipboard,
    I: InputInjector,
    P: TransformProvider,
    O: Observer,
{
    clipboard: C,
    injector: I,
    provider: P,
    observer: O,
    timing: PipelineTiming,
}

impl<C, I, P, O> TransformPipeline<C, I, P, O>
where
    C: Clipboard,
    I: InputInjector,
    P: TransformProvider,
    O: Observer,
{
    /// Create a pipeline with default settle intervals
    pub fn new(clipboard: C, injector: I, provider: P, observer: O) -> Self {
        Self {
            clipboard,
            injector,
            provider,
            observer,
            timing: PipelineTiming::default(),
        }
    }

    /// Override the settle intervals
    pub fn with_timing(mut self, timing: PipelineTiming) -> Self {
        self.timing = timing;
        self
    }

    /// Run one activation to completion, reporting every transition.
    ///
    /// Never returns an error: all outcomes, including failures, surface
    /// as observer events.
    pub async fn execute(&self, activation: Activation) {
        let started = Instant::now();

        self.observer
            .notify(ObserverEvent::ActivationStarted {
                action: activation.action.clone(),
                combination: activation.combination.clone(),
            })
            .await;

        match self.run(&activation).await {
            Ok(result) => {
                self.observer
                    .notify(ObserverEvent::Completed {
                        action: activation.action.clone(),
                        result,
                        elapsed: started.elapsed(),
                    })
                    .await;
            }
            Err((phase, error)) => {
                self.observer
                    .notify(ObserverEvent::PhaseFailed {
                        action: activation.action.clone(),
                        phase,
                        message: error.to_string(),
                    })
                    .await;
            }
        }
    }

    async fn run(
        &self,
        activation: &Activation,
    ) -> Result<CompletionResult, (PipelinePhase, PipelineError)> {
        let source = self.acquire_source(activation).await?;

        let text = self
            .provider
            .transform(&source, &activation.prompt)
            .await
            .map_err(|e| (PipelinePhase::Transform, PipelineError::Provider(e)))?;

        // An empty result is a deliberate no-op, not an error: nothing is
        // written and nothing is pasted
        if text.trim().is_empty() {
            return Ok(CompletionResult::Empty);
        }

        self.clipboard
            .write_text(&text)
            .await
            .map_err(|e| (PipelinePhase::WriteResult, PipelineError::Clipboard(e)))?;

        sleep(self.timing.paste_settle).await;

        // A failed paste leaves the result on the clipboard, which is
        // still useful; report and complete
        if let Err(e) = self.injector.simulate_paste().await {
            self.warn(activation, PipelinePhase::Paste, &e.to_string())
                .await;
        }

        Ok(match activation.output {
            OutputKind::Text => CompletionResult::Text(text),
            OutputKind::Image => CompletionResult::Redacted,
        })
    }

    async fn acquire_source(
        &self,
        activation: &Activation,
    ) -> Result<TransformSource, (PipelinePhase, PipelineError)> {
        match activation.output {
            OutputKind::Image => {
                // Images are read directly: no copy simulation, no retry
                match self.clipboard.read_image().await {
                    Ok(Some(image)) => Ok(TransformSource::Image(image)),
                    Ok(None) => {
                        Err((PipelinePhase::AcquireSource, PipelineError::EmptyClipboard))
                    }
                    Err(e) => Err((
                        PipelinePhase::AcquireSource,
                        PipelineError::Clipboard(e),
                    )),
                }
            }
            OutputKind::Text => {
                if let Some(text) = self.copy_and_read(self.timing.copy_settle, activation).await?
                {
                    return Ok(TransformSource::Text(text));
                }

                // Exactly one retry with a longer settle, then give up
                if let Some(text) = self
                    .copy_and_read(self.timing.retry_settle, activation)
                    .await?
                {
                    return Ok(TransformSource::Text(text));
                }

                Err((PipelinePhase::AcquireSource, PipelineError::EmptyClipboard))
            }
        }
    }

    /// Simulate copy, wait for the clipboard to settle, then read.
    /// Returns `None` when the clipboard text is empty or whitespace-only.
    async fn copy_and_read(
        &self,
        settle: Duration,
        activation: &Activation,
    ) -> Result<Option<String>, (PipelinePhase, PipelineError)> {
        if let Err(e) = self.injector.simulate_copy().await {
            self.warn(activation, PipelinePhase::AcquireSource, &e.to_string())
                .await;
        }

        sleep(settle).await;

        let text = self
            .clipboard
            .read_text()
            .await
            .map_err(|e| (PipelinePhase::AcquireSource, PipelineError::Clipboard(e)))?;

        Ok(text.filter(|t| !t.trim().is_empty()))
    }

    async fn warn(&self, activation: &Activation, phase: PipelinePhase, message: &str) {
        self.observer
            .notify(ObserverEvent::PhaseWarning {
                action: activation.action.clone(),
                phase,
                message: message.to_string(),
            })
            .await;
    }
}
