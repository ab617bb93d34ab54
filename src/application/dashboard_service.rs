// Dashboard service - Recomputes the dashboard state from the reading source
use crate::application::metrics_calculator::{self, CalculatorError, DerivedMetrics};
use crate::application::mock_series;
use crate::application::reading_repository::ReadingRepository;
use crate::domain::daily_life::{DailyLifeMetrics, system_health};
use crate::domain::dashboard::{DashboardSnapshot, DashboardState, DataSource};
use crate::domain::reading::MotorStatus;
use anyhow::Context;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Where live readings come from. A service without one runs in demo mode.
#[derive(Clone)]
pub struct ReadingSource {
    pub repository: Arc<dyn ReadingRepository>,
    pub motor_id: String,
    pub window: usize,
}

#[derive(Clone)]
pub struct DashboardService {
    source: Option<ReadingSource>,
    demo_motor_id: String,
    state: Arc<RwLock<DashboardState>>,
}

impl DashboardService {
    pub fn new(source: Option<ReadingSource>, demo_motor_id: String) -> Self {
        Self {
            source,
            demo_motor_id,
            state: Arc::new(RwLock::new(DashboardState::default())),
        }
    }

    pub async fn current(&self) -> DashboardState {
        self.state.read().await.clone()
    }

    pub async fn refresh(&self) -> DashboardState {
        self.refresh_at(Utc::now()).await
    }

    /// Recompute and replace the state. Fetch failures keep the cached snapshot.
    pub async fn refresh_at(&self, now: DateTime<Utc>) -> DashboardState {
        let result = self.compute(now).await;

        let mut state = self.state.write().await;
        match result {
            Ok(snapshot) => {
                tracing::debug!(
                    "Dashboard refreshed for {} ({} points)",
                    snapshot.motor_id,
                    snapshot.time_series.len()
                );
                state.replace(snapshot);
            }
            Err(e) if e.downcast_ref::<CalculatorError>().is_some() => {
                tracing::warn!("No usable readings: {}", e);
                state.mark_no_data(now);
            }
            Err(e) => {
                tracing::error!("Dashboard refresh failed, using cached data: {:#}", e);
                state.mark_failed(format!("{:#}", e), now);
            }
        }
        state.clone()
    }

    async fn compute(&self, now: DateTime<Utc>) -> anyhow::Result<DashboardSnapshot> {
        let Some(source) = &self.source else {
            return self.demo_snapshot(now);
        };

        let readings = source
            .repository
            .latest_readings(&source.motor_id, source.window)
            .await
            .with_context(|| format!("Failed to fetch readings for {}", source.motor_id))?;

        let derived = metrics_calculator::calculate(&readings, now)?;
        Ok(build_snapshot(&source.motor_id, DataSource::Live, now, derived))
    }

    fn demo_snapshot(&self, now: DateTime<Utc>) -> anyhow::Result<DashboardSnapshot> {
        let series = mock_series::generate(now);
        let latest = mock_series::latest_reading(&series).ok_or(CalculatorError::NoData)?;
        let derived = metrics_calculator::derive_from_series(series, latest);
        Ok(build_snapshot(&self.demo_motor_id, DataSource::Demo, now, derived))
    }

    #[cfg(test)]
    pub(crate) async fn seed(&self, snapshot: DashboardSnapshot) {
        self.state.write().await.replace(snapshot);
    }

    /// Refresh on a fixed interval until the task is aborted.
    pub fn spawn_refresh_loop(&self, every: Duration) -> JoinHandle<()> {
        let service = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                service.refresh().await;
            }
        })
    }
}

fn build_snapshot(motor_id: &str, source: DataSource, now: DateTime<Utc>, derived: DerivedMetrics) -> DashboardSnapshot {
    let latest = derived.latest;
    let health = system_health(&latest);

    DashboardSnapshot {
        motor_id: motor_id.to_string(),
        source,
        computed_at: now,
        status: MotorStatus::classify(latest.status, latest.efficiency, latest.vibration, latest.temperature),
        daily_life: DailyLifeMetrics::from_reading(&latest, health),
        latest,
        energy: derived.energy,
        performance: derived.performance,
        benchmarks: derived.benchmarks,
        time_series: derived.time_series,
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::reading::{MotorStatus, RawReading};
    use chrono::{DateTime, TimeZone, Utc};

    pub fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()
    }

    pub fn reading(efficiency: f64, power: f64) -> RawReading {
        RawReading {
            speed: Some(2500.0),
            temperature: Some(65.0),
            vibration: Some(1.5),
            efficiency: Some(efficiency),
            power_consumption: Some(power),
            status: Some(MotorStatus::Normal),
            timestamp: Some(now()),
        }
    }
}
