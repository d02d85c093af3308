//! WebSocket routes
//!
//! Every `/ws` route upgrades the connection and streams one [`View`]. Inbound
//! frames are drained only to notice the client going away. `/kueue/status`
//! answers once over plain HTTP.

use std::sync::Arc;

use axum::{Json, Router};
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use futures::{SinkExt, StreamExt, future};
use tracing::Instrument;

use super::{StreamEnd, StreamSettings, stream_snapshots};
use crate::kube::ResourceClient;
use crate::models::Conventions;
use crate::snapshot::View;
use crate::snapshot::status;

/// Shared by every connection task
#[derive(Clone)]
pub struct AppState {
    pub client: Arc<dyn ResourceClient>,
    pub conventions: Arc<Conventions>,
    pub settings: StreamSettings,
}

impl AppState {
    pub fn new(
        client: Arc<dyn ResourceClient>,
        conventions: Conventions,
        settings: StreamSettings,
    ) -> Self {
        Self {
            client,
            conventions: Arc::new(conventions),
            settings,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/kueue/status", get(kueue_status))
        .route("/ws/cluster-queues", get(cluster_queues))
        .route("/ws/cluster-queue/{name}", get(cluster_queue))
        .route("/ws/resource-flavors", get(resource_flavors))
        .route("/ws/resource-flavor/{name}", get(resource_flavor))
        .route("/ws/workloads", get(workloads))
        .route("/ws/workloads/dashboard", get(workloads_dashboard))
        .route("/ws/workload/{namespace}/{name}", get(workload))
        .route("/ws/workload/{namespace}/{name}/events", get(workload_events))
        .route("/ws/dashboard", get(dashboard))
        .route("/ws/local-queues", get(local_queues))
        .route("/ws/local-queue/{namespace}/{name}", get(local_queue))
        .route(
            "/ws/local-queue/{namespace}/{name}/workloads",
            get(local_queue_workloads),
        )
        .route("/ws/cohorts", get(cohorts))
        .route("/ws/cohort/{name}", get(cohort))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn kueue_status(State(state): State<AppState>) -> Response {
    match status::kueue_status(state.client.as_ref()).await {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to build status");
            let body = serde_json::json!({ "error": e.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

async fn cluster_queues(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    subscribe(ws, state, View::ClusterQueues)
}

async fn cluster_queue(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    subscribe(ws, state, View::ClusterQueue { name })
}

async fn resource_flavors(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    subscribe(ws, state, View::ResourceFlavors)
}

async fn resource_flavor(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    subscribe(ws, state, View::ResourceFlavor { name })
}

async fn workloads(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    subscribe(ws, state, View::Workloads)
}

async fn workloads_dashboard(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    subscribe(ws, state, View::WorkloadsDashboard)
}

async fn workload(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path((namespace, name)): Path<(String, String)>,
) -> Response {
    subscribe(ws, state, View::Workload { namespace, name })
}

async fn workload_events(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path((namespace, name)): Path<(String, String)>,
) -> Response {
    subscribe(ws, state, View::WorkloadEvents { namespace, name })
}

async fn dashboard(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    subscribe(ws, state, View::Dashboard)
}

async fn local_queues(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    subscribe(ws, state, View::LocalQueues)
}

async fn local_queue(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path((namespace, name)): Path<(String, String)>,
) -> Response {
    subscribe(ws, state, View::LocalQueue { namespace, name })
}

async fn local_queue_workloads(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path((namespace, name)): Path<(String, String)>,
) -> Response {
    subscribe(ws, state, View::LocalQueueWorkloads { namespace, name })
}

async fn cohorts(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    subscribe(ws, state, View::Cohorts)
}

async fn cohort(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Response {
    subscribe(ws, state, View::Cohort { name })
}

fn subscribe(ws: WebSocketUpgrade, state: AppState, view: View) -> Response {
    let failed_view = view.clone();
    ws.on_failed_upgrade(move |e| {
        tracing::warn!(view = %failed_view, error = %e, "WebSocket upgrade failed");
    })
    .on_upgrade(move |socket| {
        let span = tracing::info_span!("stream", view = %view);
        serve_view(socket, state, view).instrument(span)
    })
}

async fn serve_view(socket: WebSocket, state: AppState, view: View) {
    tracing::info!("Client subscribed");
    let (sender, mut receiver) = socket.split();
    let sink = sender.with(|frame: String| {
        future::ready(Ok::<_, axum::Error>(Message::Text(frame.into())))
    });
    let sink = Box::pin(sink);

    let client = Arc::clone(&state.client);
    let conventions = Arc::clone(&state.conventions);
    let streaming = stream_snapshots(sink, &state.settings, move || {
        let client = Arc::clone(&client);
        let conventions = Arc::clone(&conventions);
        let view = view.clone();
        async move { view.build(client.as_ref(), &conventions).await }
    });

    let disconnected = async {
        while let Some(message) = receiver.next().await {
            match message {
                Ok(Message::Close(_)) => break,
                Ok(_) => {}
                Err(e) => {
                    tracing::debug!(error = %e, "WebSocket receive error");
                    break;
                }
            }
        }
    };

    tokio::select! {
        summary = streaming => match summary.end {
            StreamEnd::InitialSnapshotFailed(e) => {
                tracing::warn!(error = %e, "Stream ended before first frame");
            }
            StreamEnd::SendFailed(e) => {
                tracing::info!(frames_sent = summary.frames_sent, error = %e, "Stream ended");
            }
        },
        _ = disconnected => {
            tracing::info!("Client disconnected");
        }
    }
}
