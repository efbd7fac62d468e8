// HTTP request handlers for the turbine data service
use crate::domain::query::WIRE_TIME_FORMAT;
use crate::domain::sample::RawSample;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct RangeParams {
    pub start_time: String,
    pub end_time: String,
}

#[derive(Serialize)]
struct TurbineResponse {
    turbine_id: String,
    data: Vec<RawSample>,
}

pub fn router(state: Arc<AppState>) -> Router {
    // Permissive CORS: the API also serves browser frontends.
    Router::new()
        .route("/healthz", get(health_check))
        .route("/turbine/:turbine_id/data", get(get_turbine_data))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Samples for one turbine within an inclusive time window, sorted by
/// timestamp ascending. Numeric fields keep their locale formatting.
pub async fn get_turbine_data(
    Path(turbine_id): Path<String>,
    Query(params): Query<RangeParams>,
    State(state): State<Arc<AppState>>,
) -> Response {
    let bounds = NaiveDateTime::parse_from_str(params.start_time.trim(), WIRE_TIME_FORMAT)
        .and_then(|start| {
            let end = NaiveDateTime::parse_from_str(params.end_time.trim(), WIRE_TIME_FORMAT)?;
            Ok((start, end))
        });
    let (start, end) = match bounds {
        Ok(bounds) => bounds,
        Err(_) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Invalid date format. Use DD.MM.YYYY, HH:MM",
            );
        }
    };

    let records = state.store.records_in_range(&turbine_id, start, end);
    if records.is_empty() {
        return error_response(
            StatusCode::NOT_FOUND,
            "No data found for the turbine ID and time range.",
        );
    }

    let data = records
        .into_iter()
        .map(|record| RawSample {
            datetime: record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            wind_speed: record.wind_speed.clone(),
            power: record.power.clone(),
        })
        .collect();

    Json(TurbineResponse { turbine_id, data }).into_response()
}

fn error_response(status: StatusCode, detail: &str) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}
