//! Activation dispatcher
//!
//! Pulls matched activations off the hand-off queue and starts one
//! independent pipeline execution per activation. Executions fan out
//! concurrently under a cap; the dispatcher never serializes them, so a
//! slow provider call for one hotkey cannot delay another.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::{mpsc, watch, Semaphore};

use crate::domain::activation::{Activation, ActivationRecord};

use super::pipeline::TransformPipeline;
use super::ports::{Clipboard, InputInjector, Observer, ObserverEvent, TransformProvider};

/// Capacity of the activation hand-off queue
pub const ACTIVATION_QUEUE_CAPACITY: usize = 32;

/// Default cap on concurrently running pipelines.
///
/// Activations are user-paced, but OS key repeat can machine-pace them;
/// the cap bounds the fan-out in that case.
pub const DEFAULT_MAX_CONCURRENT: usize = 8;

/// How many wall-clock second buckets a dedup record stays live
const DEDUP_RETENTION_BUCKETS: u64 = 2;

/// Supervising loop over the activation queue.
pub struct ActivationDispatcher<C, I, P, O>
where
    C: Clipboard + Send + Sync + 'static,
    I: InputInjector + Send + Sync + 'static,
    P: TransformProvider + Send + Sync + 'static,
    O: Observer + Send + Sync + 'static,
{
    pipeline: Arc<TransformPipeline<C, I, P, O>>,
    observer: O,
    permits: Arc<Semaphore>,
}

impl<C, I, P, O> ActivationDispatcher<C, I, P, O>
where
    C: Clipboard + Send + Sync + 'static,
    I: InputInjector + Send + Sync + 'static,
    P: TransformProvider + Send + Sync + 'static,
    O: Observer + Send + Sync + 'static,
{
    /// Create a dispatcher over a pipeline, with the default concurrency cap
    pub fn new(pipeline: Arc<TransformPipeline<C, I, P, O>>, observer: O) -> Self {
        Self::with_max_concurrent(pipeline, observer, DEFAULT_MAX_CONCURRENT)
    }

    /// Create a dispatcher with an explicit concurrency cap
    pub fn with_max_concurrent(
        pipeline: Arc<TransformPipeline<C, I, P, O>>,
        observer: O,
        max_concurrent: usize,
    ) -> Self {
        Self {
            pipeline,
            observer,
            permits: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    /// Run the supervising loop until shutdown.
    ///
    /// Activations are started in queue order; completion order is up to
    /// the individual pipelines. On shutdown the loop stops accepting new
    /// activations, drains what is already queued, and returns without
    /// cancelling in-flight executions.
    pub async fn run(
        &self,
        mut activations: mpsc::Receiver<Activation>,
        mut shutdown: watch::Receiver<bool>,
    ) {
        let mut seen: HashSet<ActivationRecord> = HashSet::new();

        loop {
            tokio::select! {
                _ = shutdown.changed() => break,
                pulled = activations.recv() => match pulled {
                    Some(activation) => self.dispatch(activation, &mut seen).await,
                    // All senders gone; nothing more will arrive
                    None => return,
                },
            }
        }

        // Drain pulls already buffered at shutdown time
        while let Ok(activation) = activations.try_recv() {
            self.dispatch(activation, &mut seen).await;
        }
    }

    /// Start one pipeline execution for an activation.
    ///
    /// Duplicates of a chord already seen in the same wall-clock second
    /// (raw event plus echo) are suppressed. A start that cannot acquire
    /// an execution permit drops the activation and reports it; the loop
    /// itself survives every per-activation failure.
    async fn dispatch(&self, activation: Activation, seen: &mut HashSet<ActivationRecord>) {
        let record = activation.record();
        seen.retain(|r| r.bucket + DEDUP_RETENTION_BUCKETS > record.bucket);
        if !seen.insert(record) {
            return;
        }

        match Arc::clone(&self.permits).try_acquire_owned() {
            Ok(permit) => {
                let pipeline = Arc::clone(&self.pipeline);
                tokio::spawn(async move {
                    pipeline.execute(activation).await;
                    drop(permit);
                });
            }
            Err(_) => {
                self.observer
                    .notify(ObserverEvent::ActivationDropped {
                        action: activation.action,
                        reason: "concurrent execution limit reached".to_string(),
                    })
                    .await;
            }
        }
    }
}
