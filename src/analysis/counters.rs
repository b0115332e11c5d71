use anyhow::Result;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use tokio::sync::Mutex;
use crate::core::ingest_queue::IngestHandle;
use crate::models::Sample;

pub const SESSIONS_SERIES: &str = "sessions";

/// Turns HTTP requests and sessions into unit samples on an ingest queue.
///
/// Request series are named after the request path; a session is counted
/// once, on the first request that carries its id.
///
/// The counter owns an `IngestHandle`: drop it before awaiting
/// `IngestQueue::finish`, which otherwise never returns.
pub struct RequestCounter {
    handle: IngestHandle,
    seen_sessions: Mutex<HashSet<String>>,
}

impl RequestCounter {
    pub fn new(handle: IngestHandle) -> Self {
        Self {
            handle,
            seen_sessions: Mutex::new(HashSet::new()),
        }
    }

    pub async fn record_request(&self, path: &str, at: DateTime<Utc>) -> Result<()> {
        self.handle
            .send(Sample {
                series: path.to_string(),
                timestamp: at,
                value: 1,
            })
            .await
    }

    /// Returns `true` when this was the first time `session_id` was seen.
    pub async fn record_session(&self, session_id: &str, at: DateTime<Utc>) -> Result<bool> {
        let first_visit = self.seen_sessions.lock().await.insert(session_id.to_string());
        if first_visit {
            self.handle
                .send(Sample {
                    series: SESSIONS_SERIES.to_string(),
                    timestamp: at,
                    value: 1,
                })
                .await?;
        }
        Ok(first_visit)
    }
}
