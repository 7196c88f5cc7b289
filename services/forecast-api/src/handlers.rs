//! HTTP route handlers: tile rasterization, parameter listings, point
//! lookups, and timeseries (plain and streamed-progress).

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Extension, Path, Query},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use futures::stream;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};

use forecast_core::catalog;
use forecast_core::error::ForecastError;
use forecast_core::grib::selector::SelectionRequest;
use forecast_core::grib::{LevelType, StepType};
use forecast_core::orchestrator::ProgressCallback;

use crate::state::AppState;

fn error_response(err: ForecastError) -> Response {
    let status = StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

/// Query-string shape shared by the tile and point endpoints for pinning a
/// specific vertical level.
#[derive(Debug, Deserialize, Default)]
pub struct LevelQuery {
    #[serde(rename = "typeOfLevel")]
    pub type_of_level: Option<String>,
    pub level: Option<u32>,
    #[serde(rename = "stepType")]
    pub step_type: Option<String>,
}

impl LevelQuery {
    fn into_selection(self) -> SelectionRequest {
        SelectionRequest {
            level: self.level,
            level_type: self.type_of_level.as_deref().map(LevelType::from_key_str),
            step_type: self.step_type.as_deref().map(StepType::from_key_str),
        }
    }
}

/// GET /tiles/:model/:slug/:offset/:z/:x/:y(.png)
pub async fn tile_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((model, slug, offset, z, x, y)): Path<(String, String, i32, i32, i64, String)>,
    Query(level_query): Query<LevelQuery>,
) -> Response {
    let (y_str, _ext) = y.rsplit_once('.').unwrap_or((&y, "png"));
    let y_val: i64 = match y_str.parse() {
        Ok(v) => v,
        Err(_) => {
            return (StatusCode::BAD_REQUEST, Json(serde_json::json!({ "error": "invalid y coordinate" }))).into_response()
        }
    };

    let req = level_query.into_selection();
    match state
        .orchestrator
        .render_tile(&model, &slug, offset, z, x, y_val, &req, Utc::now())
        .await
    {
        Ok(png) => ([(header::CONTENT_TYPE, "image/png")], png).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /list_parameters/:model/:offset
pub async fn list_parameters_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((model, offset)): Path<(String, i32)>,
) -> Response {
    match state.orchestrator.list_parameters(&model, offset, Utc::now()) {
        Ok(parameters) => Json(serde_json::json!({ "parameters": parameters })).into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct ParametersQuery {
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
struct CatalogEntryJson {
    slug: &'static str,
    description: &'static str,
    units: &'static str,
    #[serde(rename = "typeOfLevel")]
    type_of_level: &'static str,
    notes: &'static str,
}

/// GET /parameters?model=gfs
pub async fn parameters_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(query): Query<ParametersQuery>,
) -> Response {
    let models: Vec<String> = match query.model {
        Some(m) => vec![m],
        None => state.orchestrator.resolver().registry().ids().map(str::to_string).collect(),
    };

    let mut out = serde_json::Map::new();
    for model in models {
        let entries: Vec<CatalogEntryJson> = catalog::entries_for_model(&model)
            .iter()
            .map(|e| CatalogEntryJson {
                slug: e.slug,
                description: e.description,
                units: e.units,
                type_of_level: e.type_of_level,
                notes: e.notes,
            })
            .collect();
        out.insert(model, serde_json::to_value(entries).unwrap_or_default());
    }
    Json(serde_json::Value::Object(out)).into_response()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ParameterSelector {
    pub slug: String,
    pub level: Option<u32>,
    #[serde(rename = "levelType")]
    pub level_type: Option<String>,
    #[serde(rename = "stepType")]
    pub step_type: Option<String>,
}

fn build_param_requests(selectors: &[ParameterSelector]) -> Vec<(String, SelectionRequest)> {
    selectors
        .iter()
        .map(|s| {
            (
                s.slug.clone(),
                SelectionRequest {
                    level: s.level,
                    level_type: s.level_type.as_deref().map(LevelType::from_key_str),
                    step_type: s.step_type.as_deref().map(StepType::from_key_str),
                },
            )
        })
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct PointRequest {
    pub model: String,
    pub lat: f64,
    pub lon: f64,
    pub parameters: Vec<ParameterSelector>,
}

/// POST /point and POST /point/:offset
pub async fn point_handler(
    Extension(state): Extension<Arc<AppState>>,
    offset: Option<Path<i32>>,
    Json(req): Json<PointRequest>,
) -> Response {
    let offset = offset.map(|Path(o)| o).unwrap_or(0);
    let params = build_param_requests(&req.parameters);
    match state.orchestrator.point_values(&req.model, &params, req.lat, req.lon, offset, Utc::now()).await {
        Ok(values) => {
            let body: serde_json::Map<String, serde_json::Value> = req
                .parameters
                .iter()
                .zip(values)
                .map(|(sel, v)| (sel.slug.clone(), serde_json::json!(v)))
                .collect();
            Json(serde_json::Value::Object(body)).into_response()
        }
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct ForecastRequest {
    pub model: String,
    pub lat: f64,
    pub lon: f64,
    pub parameters: Vec<ParameterSelector>,
    #[serde(rename = "startOffset", default)]
    pub start_offset: i32,
    #[serde(rename = "totalDays", default = "default_total_days")]
    pub total_days: i32,
    #[serde(rename = "stepHours", default = "default_step_hours")]
    pub step_hours: i32,
}

fn default_total_days() -> i32 {
    5
}

fn default_step_hours() -> i32 {
    3
}

/// POST /forecast
pub async fn forecast_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<ForecastRequest>,
) -> Response {
    let params = build_param_requests(&req.parameters);
    match state
        .orchestrator
        .timeseries(
            &req.model,
            &params,
            req.lat,
            req.lon,
            req.start_offset,
            req.total_days,
            req.step_hours,
            Utc::now(),
            None,
        )
        .await
    {
        Ok(series) => Json(serde_json::json!({ "timeseries": series })).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /forecast-stream — newline-delimited JSON: a `{"progress": "k of n"}`
/// line per completed offset, followed by a final `{"timeseries": ...}` line.
pub async fn forecast_stream_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(req): Json<ForecastRequest>,
) -> Response {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel::<String>();
    let orchestrator = state.orchestrator.clone();
    let params = build_param_requests(&req.parameters);

    tokio::spawn(async move {
        let progress_tx = tx.clone();
        let progress: ProgressCallback = Arc::new(move |completed, total| {
            let _ = progress_tx.send(format!("{{\"progress\":\"{completed} of {total}\"}}\n"));
        });

        let result = orchestrator
            .timeseries(
                &req.model,
                &params,
                req.lat,
                req.lon,
                req.start_offset,
                req.total_days,
                req.step_hours,
                Utc::now(),
                Some(progress),
            )
            .await;

        let final_line = match result {
            Ok(series) => format!("{}\n", serde_json::json!({ "timeseries": series })),
            Err(e) => format!("{}\n", serde_json::json!({ "error": e.to_string() })),
        };
        let _ = tx.send(final_line);
    });

    let body_stream = stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|line| (Ok::<_, std::convert::Infallible>(line), rx))
    });

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/x-ndjson")
        .body(Body::from_stream(body_stream))
        .unwrap()
}

pub async fn health_handler() -> Response {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" }))).into_response()
}

/// GET /metrics — Prometheus text exposition of the counters recorded by
/// `forecast_core::orchestrator` (tile cache hit/miss/render, point evals).
pub async fn metrics_handler(Extension(handle): Extension<PrometheusHandle>) -> Response {
    (StatusCode::OK, handle.render()).into_response()
}
