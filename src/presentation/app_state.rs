// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::streaming_service::StreamingDashboardService;
use crate::application::sync_service::SyncService;
use crate::application::view_service::ViewService;

#[derive(Clone)]
pub struct AppState {
    pub dashboard_service: DashboardService,
    pub view_service: ViewService,
    pub streaming_service: StreamingDashboardService,
    pub sync_service: SyncService,
}
