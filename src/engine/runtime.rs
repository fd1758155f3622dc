//! Bounded worker runtime for diagnoses.
//!
//! `InferenceEngine::infer` is synchronous and CPU-bound. Callers that need to
//! stay responsive under load can submit readings to this runtime instead: a
//! fixed pool of threads shares one engine, jobs queue in a bounded channel,
//! and each submission returns a handle that can be joined with a timeout.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::diagnosis::Diagnosis;
use crate::engine::{InferenceEngine, Readings};
use crate::error::{AgroError, AgroResult, InferenceError};

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Number of worker threads.
    pub workers: usize,
    /// Maximum queued jobs.
    pub queue_capacity: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            workers: 2,
            queue_capacity: 1024,
        }
    }
}

enum Job {
    Infer {
        readings: Readings,
        reply: Sender<AgroResult<Diagnosis>>,
    },

    #[cfg(test)]
    Sleep {
        duration: Duration,
        reply: Sender<()>,
    },
}

struct WorkerPool {
    tx: Sender<Job>,
    workers: Vec<JoinHandle<()>>,
    queue_capacity: usize,
}

impl WorkerPool {
    fn start(workers: usize, queue_capacity: usize, engine: &Arc<InferenceEngine>) -> AgroResult<Self> {
        let workers = workers.max(1);
        let queue_capacity = queue_capacity.max(1);
        let (tx, rx) = bounded::<Job>(queue_capacity);

        let mut handles = Vec::with_capacity(workers);
        for idx in 0..workers {
            let rx: Receiver<Job> = rx.clone();
            let engine = Arc::clone(engine);
            let handle = thread::Builder::new()
                .name(format!("agrofuzz-worker-{idx}"))
                .spawn(move || loop {
                    match rx.recv() {
                        Ok(Job::Infer { readings, reply }) => {
                            let _ = reply.send(engine.infer(&readings));
                        }
                        Err(_) => break,

                        #[cfg(test)]
                        Ok(Job::Sleep { duration, reply }) => {
                            thread::sleep(duration);
                            let _ = reply.send(());
                        }
                    }
                })
                .map_err(|e| AgroError::internal(format!("failed to spawn worker {idx}: {e}")))?;
            handles.push(handle);
        }
        debug!(workers, queue_capacity, "diagnosis runtime started");

        Ok(Self {
            tx,
            workers: handles,
            queue_capacity,
        })
    }

    fn try_submit(&self, job: Job) -> Result<(), InferenceError> {
        match self.tx.try_send(job) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(InferenceError::QueueFull {
                capacity: self.queue_capacity,
            }),
            Err(TrySendError::Disconnected(_)) => Err(InferenceError::Disconnected),
        }
    }

    fn shutdown(self) {
        // Close the channel: workers drain queued jobs, then exit.
        drop(self.tx);
        for handle in self.workers {
            let _ = handle.join();
        }
    }
}

/// Whole milliseconds, saturating at `u64::MAX`.
fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Handle returned by [`DiagnosisRuntime::submit`].
#[derive(Debug)]
pub struct DiagnosisHandle {
    rx: Receiver<AgroResult<Diagnosis>>,
}

impl DiagnosisHandle {
    /// Waits for the diagnosis.
    ///
    /// # Errors
    ///
    /// Propagates the inference error, or `InferenceError::Disconnected` if
    /// the worker went away without replying.
    pub fn join(self) -> AgroResult<Diagnosis> {
        self.rx
            .recv()
            .map_err(|_| AgroError::Inference(InferenceError::Disconnected))?
    }

    /// Waits for the diagnosis at most `timeout`.
    ///
    /// # Errors
    ///
    /// As [`DiagnosisHandle::join`], plus `InferenceError::Timeout`.
    pub fn join_timeout(self, timeout: Duration) -> AgroResult<Diagnosis> {
        self.rx.recv_timeout(timeout).map_err(|err| match err {
            crossbeam_channel::RecvTimeoutError::Timeout => AgroError::Inference(InferenceError::Timeout {
                duration_ms: millis(timeout),
            }),
            crossbeam_channel::RecvTimeoutError::Disconnected => {
                AgroError::Inference(InferenceError::Disconnected)
            }
        })?
    }
}

/// A pool of workers sharing one immutable engine.
pub struct DiagnosisRuntime {
    engine: Arc<InferenceEngine>,
    pool: Option<WorkerPool>,
}

impl DiagnosisRuntime {
    /// Starts the workers.
    ///
    /// # Errors
    ///
    /// Returns an internal error if a worker thread cannot be spawned.
    pub fn new(engine: InferenceEngine, config: &RuntimeConfig) -> AgroResult<Self> {
        let engine = Arc::new(engine);
        let pool = WorkerPool::start(config.workers, config.queue_capacity, &engine)?;
        Ok(Self {
            engine,
            pool: Some(pool),
        })
    }

    /// Queues readings for diagnosis without blocking.
    ///
    /// # Errors
    ///
    /// Returns `InferenceError::QueueFull` (retryable) when the queue is at
    /// capacity.
    pub fn submit(&self, readings: Readings) -> AgroResult<DiagnosisHandle> {
        let (tx, rx) = bounded::<AgroResult<Diagnosis>>(1);
        self.submit_job(Job::Infer { readings, reply: tx })?;
        Ok(DiagnosisHandle { rx })
    }

    /// Diagnoses on a worker and waits for the result.
    ///
    /// # Errors
    ///
    /// As [`DiagnosisRuntime::submit`] and [`DiagnosisHandle::join`].
    pub fn diagnose(&self, readings: Readings) -> AgroResult<Diagnosis> {
        self.submit(readings)?.join()
    }

    /// Returns a shared reference to the underlying engine.
    #[must_use]
    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    fn submit_job(&self, job: Job) -> AgroResult<()> {
        let pool = self
            .pool
            .as_ref()
            .ok_or(AgroError::Inference(InferenceError::Disconnected))?;
        pool.try_submit(job)?;
        Ok(())
    }

    #[cfg(test)]
    fn submit_sleep(&self, duration: Duration) -> AgroResult<Receiver<()>> {
        let (tx, rx) = bounded::<()>(1);
        self.submit_job(Job::Sleep { duration, reply: tx })?;
        Ok(rx)
    }
}

impl Drop for DiagnosisRuntime {
    fn drop(&mut self) {
        if let Some(pool) = self.pool.take() {
            pool.shutdown();
        }
    }
}
