use axum::{extract::State, routing::get, routing::post, Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::pipeline::summary::summarize;
use crate::session::LiveSession;
use crate::state::AppState;
use crate::types::metrics::{StatCard, TripMetrics};
use crate::types::sample::{GeoSample, RawSample};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/live", get(snapshot))
        .route("/api/live/samples", post(push_sample))
        .route("/api/live/reset", post(reset))
}

#[derive(Serialize, Deserialize)]
struct LiveSnapshot {
    vehicle_id: String,
    session_id: Uuid,
    started_at: DateTime<Utc>,
    position: Option<GeoSample>,
    path: Vec<[f64; 2]>,
    metrics: TripMetrics,
    summary: Vec<StatCard>,
}

/// Answer to a single push. Carries the latest position and the path length,
/// never the path itself; `GET /api/live` returns the full path.
#[derive(Serialize, Deserialize)]
struct PushResponse {
    accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
    session_id: Uuid,
    position: Option<GeoSample>,
    path_points: usize,
    metrics: TripMetrics,
    summary: Vec<StatCard>,
}

fn build_snapshot(vehicle_id: &str, session: &LiveSession) -> LiveSnapshot {
    let metrics = session.metrics();
    LiveSnapshot {
        vehicle_id: vehicle_id.to_string(),
        session_id: session.session_id(),
        started_at: session.started_at(),
        position: session.position().copied(),
        path: session.path().to_vec(),
        summary: summarize(&metrics),
        metrics,
    }
}

async fn snapshot(State(state): State<AppState>) -> Json<LiveSnapshot> {
    let session = state.live.lock().await;
    Json(build_snapshot(&state.config.vehicle_id, &session))
}

/// Folds one feed sample into the live session. Malformed samples are
/// reported back but never fail the request.
async fn push_sample(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Json<PushResponse> {
    let raw = RawSample::from_json(&body);
    let mut session = state.live.lock().await;

    let reason = match session.push(&raw) {
        Ok(metrics) => {
            tracing::debug!(
                "Live sample accepted ({:.0} m, {:.1} km/h)",
                metrics.total_distance_meters,
                metrics.instantaneous_speed_kmh.unwrap_or(0.0)
            );
            None
        }
        Err(e) => {
            tracing::warn!("Ignoring live sample: {}", e);
            Some(e.to_string())
        }
    };

    let metrics = session.metrics();
    Json(PushResponse {
        accepted: reason.is_none(),
        reason,
        session_id: session.session_id(),
        position: session.position().copied(),
        path_points: session.path().len(),
        summary: summarize(&metrics),
        metrics,
    })
}

async fn reset(State(state): State<AppState>) -> Json<LiveSnapshot> {
    let mut session = state.live.lock().await;
    session.reset();
    Json(build_snapshot(&state.config.vehicle_id, &session))
}
