//! Periodic snapshot streaming
//!
//! [`stream_snapshots`] is the one loop behind every subscription: build a
//! snapshot, push it, wait for the next tick, repeat. It is generic over the
//! sink so the WebSocket adapter in [`routes`] and the tests share it.

pub mod routes;

use std::fmt;
use std::future::Future;
use std::time::Duration;

use futures::{Sink, SinkExt};
use serde::Serialize;
use tokio::time::{Instant, MissedTickBehavior, interval_at, timeout};

use crate::error::{FetchResult, StreamError};

pub use routes::{AppState, router};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// Timing of one subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamSettings {
    /// Time between fetches; a tick that runs late pushes the schedule back
    pub poll_interval: Duration,
    /// Upper bound on pushing a single frame
    pub send_timeout: Duration,
}

impl Default for StreamSettings {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            send_timeout: DEFAULT_SEND_TIMEOUT,
        }
    }
}

/// Why a stream stopped
#[derive(Debug)]
pub enum StreamEnd {
    /// The first snapshot could not be built or encoded; nothing was sent
    InitialSnapshotFailed(StreamError),
    /// A push failed or missed its deadline
    SendFailed(StreamError),
}

#[derive(Debug)]
pub struct StreamSummary {
    pub frames_sent: u64,
    pub end: StreamEnd,
}

fn encode<T: Serialize>(snapshot: &T) -> Result<String, StreamError> {
    Ok(serde_json::to_string(snapshot)?)
}

async fn push<S>(sink: &mut S, frame: String, deadline: Duration) -> Result<(), StreamError>
where
    S: Sink<String> + Unpin,
    S::Error: fmt::Display,
{
    match timeout(deadline, sink.send(frame)).await {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(StreamError::Send(e.to_string())),
        Err(_) => Err(StreamError::SendTimeout(deadline)),
    }
}

/// Push a fresh snapshot into `sink` now and then on every poll interval
///
/// Runs until a push fails or the first snapshot cannot be produced. Later
/// fetch or encode failures skip the tick and leave the sink open. Fetches
/// never overlap: the next tick is scheduled only after the previous one
/// finished, and late ticks are delayed rather than bunched up.
pub async fn stream_snapshots<S, F, Fut, T>(
    mut sink: S,
    settings: &StreamSettings,
    mut fetch: F,
) -> StreamSummary
where
    S: Sink<String> + Unpin,
    S::Error: fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = FetchResult<T>>,
    T: Serialize,
{
    let first = match fetch().await {
        Ok(snapshot) => encode(&snapshot),
        Err(e) => Err(StreamError::from(e)),
    };
    let frame = match first {
        Ok(frame) => frame,
        Err(e) => {
            tracing::warn!(error = %e, "Initial snapshot failed, closing stream");
            return StreamSummary {
                frames_sent: 0,
                end: StreamEnd::InitialSnapshotFailed(e),
            };
        }
    };

    let mut frames_sent = 0;
    if let Err(e) = push(&mut sink, frame, settings.send_timeout).await {
        tracing::info!(error = %e, "Client gone before first frame");
        return StreamSummary {
            frames_sent,
            end: StreamEnd::SendFailed(e),
        };
    }
    frames_sent += 1;

    let mut ticker = interval_at(
        Instant::now() + settings.poll_interval,
        settings.poll_interval,
    );
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;

        let snapshot = match fetch().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(error = %e, "Snapshot fetch failed, skipping tick");
                continue;
            }
        };

        let frame = match encode(&snapshot) {
            Ok(frame) => frame,
            Err(e) => {
                tracing::warn!(error = %e, "Snapshot encoding failed, skipping tick");
                continue;
            }
        };

        let bytes = frame.len();
        if let Err(e) = push(&mut sink, frame, settings.send_timeout).await {
            tracing::info!(error = %e, frames_sent, "Closing stream");
            return StreamSummary {
                frames_sent,
                end: StreamEnd::SendFailed(e),
            };
        }
        frames_sent += 1;
        tracing::debug!(bytes, frames_sent, "Pushed snapshot");
    }
}
