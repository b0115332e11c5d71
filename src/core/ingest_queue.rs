use crate::core::engine::ChartEngine;
use crate::error::ChartError;
use crate::models::Sample;
use anyhow::{anyhow, Result};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

const DEFAULT_CAPACITY: usize = 1024;

/// Samples rejected by the engine while draining the queue.
#[derive(Debug)]
pub struct Rejected {
    pub sample: Sample,
    pub error: ChartError,
}

#[derive(Debug)]
pub struct IngestReport {
    pub engine: ChartEngine,
    pub accepted: usize,
    pub rejected: Vec<Rejected>,
}

/// Cloneable producer side of an `IngestQueue`.
#[derive(Debug, Clone)]
pub struct IngestHandle {
    tx: mpsc::Sender<Sample>,
}

impl IngestHandle {
    pub async fn send(&self, sample: Sample) -> Result<()> {
        self.tx
            .send(sample)
            .await
            .map_err(|e| anyhow!("Ingest queue closed, dropped sample for '{}'", e.0.series))
    }
}

/// Funnels samples from many producers into one engine through a single consumer task.
///
/// The store merges by addition, so all mutation happens on the consumer and
/// producers never touch the engine directly.
pub struct IngestQueue {
    tx: mpsc::Sender<Sample>,
    consumer: JoinHandle<IngestReport>,
}

impl IngestQueue {
    pub fn new(engine: ChartEngine) -> Self {
        Self::with_capacity(engine, DEFAULT_CAPACITY)
    }

    pub fn with_capacity(mut engine: ChartEngine, capacity: usize) -> Self {
        let (tx, mut rx) = mpsc::channel::<Sample>(capacity.max(1));

        let consumer = tokio::spawn(async move {
            let mut accepted = 0;
            let mut rejected = Vec::new();

            while let Some(sample) = rx.recv().await {
                match engine.ingest(&sample.series, sample.timestamp, sample.value) {
                    Ok(()) => accepted += 1,
                    Err(error) => {
                        warn!("Ingest: rejected sample at {}: {}", sample.timestamp, error);
                        rejected.push(Rejected { sample, error });
                    }
                }
            }

            debug!("Ingest: queue drained ({} accepted, {} rejected)", accepted, rejected.len());
            IngestReport { engine, accepted, rejected }
        });

        Self { tx, consumer }
    }

    pub fn handle(&self) -> IngestHandle {
        IngestHandle { tx: self.tx.clone() }
    }

    pub async fn send(&self, sample: Sample) -> Result<()> {
        self.handle().send(sample).await
    }

    /// Closes the queue and waits for every queued sample to be applied.
    ///
    /// Resolves once all outstanding `IngestHandle`s (including the ones held
    /// by a `RequestCounter`) have been dropped; until then it waits forever.
    /// Use `finish_within` when a handle may outlive the caller's control.
    pub async fn finish(self) -> Result<IngestReport> {
        drop(self.tx);
        self.consumer
            .await
            .map_err(|e| anyhow!("Ingest consumer task failed: {}", e))
    }

    /// Like `finish`, but gives up after `timeout`.
    ///
    /// On timeout the consumer is aborted and the engine is discarded.
    pub async fn finish_within(self, timeout: Duration) -> Result<IngestReport> {
        drop(self.tx);
        let mut consumer = self.consumer;

        match tokio::time::timeout(timeout, &mut consumer).await {
            Ok(joined) => joined.map_err(|e| anyhow!("Ingest consumer task failed: {}", e)),
            Err(_) => {
                consumer.abort();
                warn!("Ingest: gave up after {:?}, handles still open", timeout);
                Err(anyhow!(
                    "Ingest queue not drained within {:?}: some IngestHandle is still alive",
                    timeout
                ))
            }
        }
    }
}
