//! Bounded worker pool that fans probes out and results back in
//!
//! One task per record, capped by a counting semaphore. Results flow through
//! a single mpsc channel that closes only after every launched probe has
//! finished, so the consumer can treat "drain until closed" as its sole
//! termination signal.

use crate::models::{ProbeResult, ServerRecord};
use crate::prober::Prober;
use futures::future::join_all;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio_util::sync::CancellationToken;

/// Dispatches one probe per record without exceeding the concurrency limit.
///
/// The scheduler owns the semaphore; no global state is involved. Results
/// arrive in completion order, not input order.
pub struct Scheduler {
    prober: Arc<dyn Prober>,
    semaphore: Arc<Semaphore>,
}

impl Scheduler {
    pub fn new(prober: Arc<dyn Prober>, concurrency_limit: usize) -> Self {
        Self {
            prober,
            semaphore: Arc::new(Semaphore::new(concurrency_limit)),
        }
    }

    /// Launch probes for all records and return the result stream.
    ///
    /// The receiver yields exactly one result per input record and closes
    /// after the last probe task finishes. Dispatch happens on a background
    /// task: when the semaphore is exhausted the dispatch loop blocks there,
    /// while already-running probes keep feeding the channel. Cancellation
    /// does not stop dispatch; remaining probes observe the token and report
    /// themselves cancelled, preserving the one-result-per-record invariant.
    pub fn run(
        &self,
        cancel: CancellationToken,
        records: Vec<ServerRecord>,
    ) -> mpsc::Receiver<ProbeResult> {
        let (result_sender, result_receiver) = mpsc::channel(records.len().max(1));
        let prober = self.prober.clone();
        let semaphore = self.semaphore.clone();

        tokio::spawn(async move {
            let mut tasks = Vec::with_capacity(records.len());

            for record in records {
                // Backpressure: hold the dispatch loop until a slot frees
                let permit = semaphore
                    .clone()
                    .acquire_owned()
                    .await
                    .expect("semaphore is never closed");
                let prober = prober.clone();
                let cancel = cancel.clone();
                let sender = result_sender.clone();

                let task = tokio::spawn(async move {
                    let result = prober.probe(cancel, record).await;
                    let _ = sender.send(result).await;
                    drop(permit);
                });
                tasks.push(task);
            }

            // The channel closes once the last probe task drops its sender
            // clone; waiting on the handles keeps this task alive as the
            // completion watcher.
            drop(result_sender);
            let _ = join_all(tasks).await;
        });

        result_receiver
    }
}
