//! GRIB2 tile and point-forecast API service.

mod handlers;
mod state;

use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use clap::Parser;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use forecast_core::config::Args;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).json().finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting forecast API server");

    let metrics_handle: PrometheusHandle = PrometheusBuilder::new().install_recorder()?;

    let state = Arc::new(AppState::new(&args).await?);

    let app = Router::new()
        .route("/tiles/:model/:slug/:offset/:z/:x/:y", get(handlers::tile_handler))
        .route("/list_parameters/:model/:offset", get(handlers::list_parameters_handler))
        .route("/parameters", get(handlers::parameters_handler))
        .route("/point", post(handlers::point_handler))
        .route("/point/:offset", post(handlers::point_handler))
        .route("/forecast", post(handlers::forecast_handler))
        .route("/forecast-stream", post(handlers::forecast_stream_handler))
        .route("/health", get(handlers::health_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .layer(Extension(metrics_handle))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = args.listen.parse()?;
    info!(address = %addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
