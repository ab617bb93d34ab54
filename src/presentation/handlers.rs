// HTTP request handlers
use crate::application::view_service::Tab;
use crate::infrastructure::chunked_json::stream_from_receiver;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

async fn respond<T: Serialize>(data: &T, headers: &HeaderMap) -> Response {
    match json_response(data, accepts_brotli(headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Full dashboard state
pub async fn get_dashboard(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let dashboard = state.dashboard_service.current().await;
    respond(&dashboard, &headers).await
}

/// One tab of the dashboard (overview, energy, performance, trends, benchmarks)
pub async fn get_tab(
    Path(tab): Path<Tab>,
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> Response {
    let dashboard = state.dashboard_service.current().await;
    let view = state.view_service.tab(&dashboard, tab);
    respond(&view, &headers).await
}

/// Stream the dashboard progressively
pub async fn stream_dashboard(headers: HeaderMap, State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let rx = state.streaming_service.stream_dashboard().await;
    stream_from_receiver(rx, accepts_brotli(&headers)).await
}

/// Recompute now instead of waiting for the next refresh tick
pub async fn refresh_dashboard(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let dashboard = state.dashboard_service.refresh().await;
    respond(&dashboard, &headers).await
}

/// Simulated sync with a verdict from current metrics
pub async fn sync_dashboard(headers: HeaderMap, State(state): State<Arc<AppState>>) -> Response {
    let outcome = state.sync_service.sync().await;
    respond(&outcome, &headers).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_service::DashboardService;
    use crate::application::streaming_service::StreamingDashboardService;
    use crate::application::sync_service::SyncService;
    use crate::application::view_service::ViewService;
    use crate::application::view_service::test_support::widgets;
    use crate::infrastructure::config::SyncThresholds;
    use axum::http::StatusCode;
    use std::time::Duration;

    fn app_state() -> Arc<AppState> {
        let dashboard_service = DashboardService::new(None, "DEMO".to_string());
        let view_service = ViewService::new(widgets());
        Arc::new(AppState {
            streaming_service: StreamingDashboardService::new(dashboard_service.clone(), view_service.clone()),
            sync_service: SyncService::new(
                dashboard_service.clone(),
                Duration::from_millis(1),
                SyncThresholds::default(),
            ),
            dashboard_service,
            view_service,
        })
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_dashboard_before_first_refresh_is_loading() {
        let response = get_dashboard(HeaderMap::new(), State(app_state())).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "loading");
        assert!(json["snapshot"].is_null());
    }

    #[tokio::test]
    async fn test_refresh_then_tab() {
        let state = app_state();
        let refreshed = body_json(refresh_dashboard(HeaderMap::new(), State(state.clone())).await).await;
        assert_eq!(refreshed["snapshot"]["source"], "demo");

        let tab = body_json(get_tab(Path(Tab::Benchmarks), HeaderMap::new(), State(state)).await).await;
        assert_eq!(tab["content"]["tab"], "benchmarks");
        assert_eq!(tab["content"]["benchmarks"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_sync_returns_verdict() {
        let json = body_json(sync_dashboard(HeaderMap::new(), State(app_state())).await).await;
        assert!(json["success"].is_boolean());
        assert!(json["message"].as_str().unwrap().starts_with("Sync"));
    }
}
