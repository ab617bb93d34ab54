// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::dashboard_service::{DashboardService, ReadingSource};
use crate::application::streaming_service::StreamingDashboardService;
use crate::application::sync_service::SyncService;
use crate::application::view_service::ViewService;
use crate::infrastructure::backend_repository::BackendRepository;
use crate::infrastructure::config::{load_backend_config, load_widgets_config};
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_dashboard, get_tab, health_check, refresh_dashboard, stream_dashboard, sync_dashboard,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let backend_config = load_backend_config()?;
    let widgets_config = load_widgets_config()?;
    let settings = backend_config.dashboard;

    // Create repository (infrastructure layer); no source configured means demo data
    let source = match backend_config.source {
        Some(source) => {
            tracing::info!("Reading {} from {}", source.motor_id, source.url);
            let repository = BackendRepository::new(source.url, Duration::from_secs(source.timeout_secs))?;
            Some(ReadingSource {
                repository: Arc::new(repository),
                motor_id: source.motor_id,
                window: source.window,
            })
        }
        None => {
            tracing::warn!("No reading source configured, serving demo data");
            None
        }
    };

    // Create services (application layer)
    let dashboard_service = DashboardService::new(source, settings.demo_motor_id);
    let view_service = ViewService::new(widgets_config);
    let streaming_service = StreamingDashboardService::new(dashboard_service.clone(), view_service.clone());
    let sync_service = SyncService::new(
        dashboard_service.clone(),
        Duration::from_millis(settings.sync_delay_ms),
        backend_config.sync,
    );

    let _refresh_task = dashboard_service.spawn_refresh_loop(Duration::from_secs(settings.refresh_interval_secs.max(1)));

    // Create application state
    let state = Arc::new(AppState {
        dashboard_service,
        view_service,
        streaming_service,
        sync_service,
    });

    // Build router (presentation layer)
    // Responses are compressed in the response builders, so no CompressionLayer here
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboard", get(get_dashboard))
        .route("/dashboard/tabs/:tab", get(get_tab))
        .route("/dashboard/stream", get(stream_dashboard))
        .route("/dashboard/refresh", post(refresh_dashboard))
        .route("/dashboard/sync", post(sync_dashboard))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = settings
        .bind_address
        .parse()
        .with_context(|| format!("Invalid bind address {}", settings.bind_address))?;
    tracing::info!("Starting motor-telemetry service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
