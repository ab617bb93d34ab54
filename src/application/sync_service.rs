// Sync service - Simulated sync with a verdict derived from current metrics
use crate::application::dashboard_service::DashboardService;
use crate::domain::dashboard::{DashboardSnapshot, DashboardState, DashboardStatus};
use crate::infrastructure::config::SyncThresholds;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SyncFactor {
    LowEfficiency,
    HighConsumption,
    PoorPerformance,
    HighCarbon,
    NoData,
    /// The refresh behind the sync failed; any snapshot shown is cached.
    RefreshFailed,
}

impl SyncFactor {
    fn message(self) -> &'static str {
        match self {
            SyncFactor::LowEfficiency => "Sync failed: motor efficiency is below target",
            SyncFactor::HighConsumption => "Sync failed: energy consumption is above the allowed limit",
            SyncFactor::PoorPerformance => "Sync failed: overall equipment effectiveness is too low",
            SyncFactor::HighCarbon => "Sync failed: carbon footprint exceeds the limit",
            SyncFactor::NoData => "Sync failed: no data available",
            SyncFactor::RefreshFailed => "Sync failed, using cached data",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncOutcome {
    pub success: bool,
    pub factor: Option<SyncFactor>,
    pub message: String,
    pub state: DashboardState,
}

#[derive(Clone)]
pub struct SyncService {
    dashboard: DashboardService,
    delay: Duration,
    thresholds: SyncThresholds,
}

impl SyncService {
    pub fn new(dashboard: DashboardService, delay: Duration, thresholds: SyncThresholds) -> Self {
        Self {
            dashboard,
            delay,
            thresholds,
        }
    }

    /// Wait out the fixed sync delay, refresh, then judge the fresh state.
    pub async fn sync(&self) -> SyncOutcome {
        tokio::time::sleep(self.delay).await;
        let state = self.dashboard.refresh().await;

        let factor = match (&state.snapshot, state.status) {
            (_, DashboardStatus::Stale) => Some(SyncFactor::RefreshFailed),
            (Some(snapshot), _) => failure_factor(snapshot, &self.thresholds),
            (None, _) => Some(SyncFactor::NoData),
        };

        match factor {
            Some(factor) => {
                tracing::warn!("{}", factor.message());
                SyncOutcome {
                    success: false,
                    factor: Some(factor),
                    message: factor.message().to_string(),
                    state,
                }
            }
            None => {
                tracing::info!("Sync completed");
                SyncOutcome {
                    success: true,
                    factor: None,
                    message: "Sync completed successfully".to_string(),
                    state,
                }
            }
        }
    }
}

/// First failing factor in priority order, or `None` when every metric is within limits.
pub fn failure_factor(snapshot: &DashboardSnapshot, thresholds: &SyncThresholds) -> Option<SyncFactor> {
    let energy = &snapshot.energy;
    if energy.average_efficiency < thresholds.min_efficiency {
        Some(SyncFactor::LowEfficiency)
    } else if energy.total_consumption > thresholds.max_consumption_kwh {
        Some(SyncFactor::HighConsumption)
    } else if snapshot.performance.oee < thresholds.min_oee {
        Some(SyncFactor::PoorPerformance)
    } else if energy.carbon_footprint > thresholds.max_carbon_kg {
        Some(SyncFactor::HighCarbon)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_service::ReadingSource;
    use crate::application::dashboard_service::test_support::reading;
    use crate::application::reading_repository::stub::StubRepository;
    use crate::domain::dashboard::fixtures::{at, snapshot};
    use std::sync::Arc;

    #[test]
    fn test_healthy_snapshot_passes() {
        assert_eq!(failure_factor(&snapshot(at()), &SyncThresholds::default()), None);
    }

    #[test]
    fn test_factor_priority() {
        let thresholds = SyncThresholds::default();
        let mut s = snapshot(at());
        s.energy.carbon_footprint = 1000.0;
        assert_eq!(failure_factor(&s, &thresholds), Some(SyncFactor::HighCarbon));

        s.performance.oee = 40.0;
        assert_eq!(failure_factor(&s, &thresholds), Some(SyncFactor::PoorPerformance));

        s.energy.total_consumption = 2000.0;
        assert_eq!(failure_factor(&s, &thresholds), Some(SyncFactor::HighConsumption));

        s.energy.average_efficiency = 70.0;
        assert_eq!(failure_factor(&s, &thresholds), Some(SyncFactor::LowEfficiency));
    }

    #[tokio::test]
    async fn test_sync_without_data_fails() {
        let dashboard = DashboardService::new(
            Some(ReadingSource {
                repository: Arc::new(StubRepository::with_readings(Vec::new())),
                motor_id: "MOTOR-001".to_string(),
                window: 10,
            }),
            "DEMO".to_string(),
        );
        let service = SyncService::new(dashboard, Duration::from_millis(1), SyncThresholds::default());

        let outcome = service.sync().await;
        assert!(!outcome.success);
        assert_eq!(outcome.factor, Some(SyncFactor::NoData));
    }

    #[tokio::test]
    async fn test_sync_with_failed_refresh_reports_cached_data() {
        let repository = Arc::new(StubRepository::with_readings(vec![reading(92.0, 1.0)]));
        let dashboard = DashboardService::new(
            Some(ReadingSource {
                repository: repository.clone(),
                motor_id: "MOTOR-001".to_string(),
                window: 10,
            }),
            "DEMO".to_string(),
        );
        let service = SyncService::new(dashboard.clone(), Duration::from_millis(1), SyncThresholds::default());
        dashboard.refresh().await;

        repository.set_failure("backend down");
        let outcome = service.sync().await;

        assert!(!outcome.success);
        assert_eq!(outcome.factor, Some(SyncFactor::RefreshFailed));
        assert_eq!(outcome.message, "Sync failed, using cached data");
        assert_eq!(outcome.state.status, DashboardStatus::Stale);
        assert!(outcome.state.snapshot.is_some());
        assert!(outcome.state.error.unwrap().contains("backend down"));
    }
}
