use axum::extract::{Multipart, Path};
use axum::{extract::State, routing::get, routing::post, Json, Router};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analytics::analyze;
use crate::error::AppError;
use crate::pipeline::parse::{self, TrackFormat};
use crate::pipeline::summary::summarize;
use crate::state::AppState;
use crate::types::metrics::{StatCard, TripMetrics};
use crate::types::sample::{collect_valid, GeoSample, SamplePayload};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/history", get(list_history))
        .route("/api/history/:date", get(get_trip).put(put_trip))
        .route("/api/history/:date/upload", post(upload_track))
}

#[derive(Serialize, Deserialize)]
struct TripOverview {
    date: String,
    samples: usize,
    metrics: TripMetrics,
}

#[derive(Serialize, Deserialize)]
struct TripResponse {
    vehicle_id: String,
    date: String,
    samples: usize,
    metrics: TripMetrics,
    summary: Vec<StatCard>,
    path: Vec<[f64; 2]>,
    start: Option<[f64; 2]>,
    end: Option<[f64; 2]>,
}

#[derive(Serialize, Deserialize)]
struct ImportResponse {
    date: String,
    accepted: usize,
    rejected: usize,
    metrics: TripMetrics,
}

async fn list_history(State(state): State<AppState>) -> Json<Vec<TripOverview>> {
    let overview: Vec<TripOverview> = state
        .history
        .entries()
        .into_par_iter()
        .map(|(date, samples)| TripOverview {
            samples: samples.len(),
            metrics: analyze(&samples),
            date,
        })
        .collect();

    Json(overview)
}

async fn get_trip(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<TripResponse>, AppError> {
    let samples = state
        .history
        .fetch(&date)
        .ok_or_else(|| AppError::NotFound(date.clone()))?;

    let metrics = analyze(&samples);
    let path: Vec<[f64; 2]> = samples.iter().map(GeoSample::position).collect();
    let (start, end) = if path.len() > 1 {
        (path.first().copied(), path.last().copied())
    } else {
        (None, None)
    };

    tracing::debug!(
        "Analyzed {} ({} samples, {:.0} m)",
        date,
        samples.len(),
        metrics.total_distance_meters
    );

    Ok(Json(TripResponse {
        vehicle_id: state.config.vehicle_id.clone(),
        samples: samples.len(),
        summary: summarize(&metrics),
        metrics,
        path,
        start,
        end,
        date,
    }))
}

async fn put_trip(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<SamplePayload>,
) -> Json<ImportResponse> {
    let raw = payload.into_ordered();
    let (samples, rejected) = collect_valid(&raw);

    if rejected > 0 {
        tracing::warn!("Rejected {} of {} samples for {}", rejected, raw.len(), date);
    }

    Json(store(&state, date, samples, rejected))
}

async fn upload_track(
    State(state): State<AppState>,
    Path(date): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, AppError> {
    let mut file_bytes: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        AppError::BadRequest(format!("Failed to read multipart field: {}", e))
    })? {
        if field.name() == Some("file") {
            filename = field.file_name().map(|s| s.to_string());
            file_bytes = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file bytes: {}", e)))?
                    .to_vec(),
            );
        }
    }

    let bytes = file_bytes.ok_or_else(|| AppError::BadRequest("No file provided".to_string()))?;
    let filename = filename.ok_or_else(|| AppError::BadRequest("No filename provided".to_string()))?;

    let format = TrackFormat::from_filename(&filename)
        .ok_or_else(|| AppError::BadRequest("Unsupported file format".to_string()))?;

    tracing::info!("Importing {} track {} into {}", format.as_str(), filename, date);

    let samples = parse::parse(&bytes, format)?;

    Ok(Json(store(&state, date, samples, 0)))
}

fn store(state: &AppState, date: String, samples: Vec<GeoSample>, rejected: usize) -> ImportResponse {
    let metrics = analyze(&samples);
    let accepted = samples.len();
    state.history.store(date.clone(), samples);

    ImportResponse {
        date,
        accepted,
        rejected,
        metrics,
    }
}
