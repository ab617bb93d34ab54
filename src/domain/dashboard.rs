// Dashboard domain model
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::daily_life::DailyLifeMetrics;
use super::metrics::{BenchmarkRow, EnergyAnalysis, PerformanceMetrics};
use super::reading::{MotorStatus, Reading};
use super::telemetry::TimeSeriesPoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    /// Synthesized placeholder data, not derived from any real reading.
    Demo,
}

/// Everything one recompute pass derives.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub motor_id: String,
    pub source: DataSource,
    pub computed_at: DateTime<Utc>,
    pub status: MotorStatus,
    pub latest: Reading,
    pub energy: EnergyAnalysis,
    pub performance: PerformanceMetrics,
    pub benchmarks: Vec<BenchmarkRow>,
    pub daily_life: DailyLifeMetrics,
    pub time_series: Vec<TimeSeriesPoint>,
}

/// Scalar a KPI tile can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum KpiMetric {
    Speed,
    Temperature,
    Vibration,
    Power,
    AverageEfficiency,
    TotalConsumption,
    PeakDemand,
    TotalCost,
    CostSavings,
    CarbonFootprint,
    Availability,
    Mtbf,
    Mttr,
    Oee,
    Throughput,
    QualityRate,
}

impl KpiMetric {
    pub fn value_of(self, snapshot: &DashboardSnapshot) -> f64 {
        let energy = &snapshot.energy;
        let performance = &snapshot.performance;
        match self {
            KpiMetric::Speed => snapshot.latest.speed,
            KpiMetric::Temperature => snapshot.latest.temperature,
            KpiMetric::Vibration => snapshot.latest.vibration,
            KpiMetric::Power => snapshot.latest.power_consumption,
            KpiMetric::AverageEfficiency => energy.average_efficiency,
            KpiMetric::TotalConsumption => energy.total_consumption,
            KpiMetric::PeakDemand => energy.peak_demand,
            KpiMetric::TotalCost => energy.total_cost,
            KpiMetric::CostSavings => energy.cost_savings,
            KpiMetric::CarbonFootprint => energy.carbon_footprint,
            KpiMetric::Availability => performance.availability,
            KpiMetric::Mtbf => performance.mtbf,
            KpiMetric::Mttr => performance.mttr,
            KpiMetric::Oee => performance.oee,
            KpiMetric::Throughput => performance.throughput,
            KpiMetric::QualityRate => performance.quality_rate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DashboardStatus {
    Loading,
    Ready,
    NoData,
    /// Last refresh failed; the snapshot (if any) is from an earlier pass.
    Stale,
}

/// State owned by the dashboard view. Each refresh replaces it wholesale.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub status: DashboardStatus,
    pub snapshot: Option<DashboardSnapshot>,
    pub error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            status: DashboardStatus::Loading,
            snapshot: None,
            error: None,
            updated_at: None,
        }
    }
}

impl DashboardState {
    pub fn replace(&mut self, snapshot: DashboardSnapshot) {
        *self = Self {
            status: DashboardStatus::Ready,
            updated_at: Some(snapshot.computed_at),
            snapshot: Some(snapshot),
            error: None,
        };
    }

    /// No readings available: drop any previous snapshot instead of presenting it as current.
    pub fn mark_no_data(&mut self, at: DateTime<Utc>) {
        *self = Self {
            status: DashboardStatus::NoData,
            snapshot: None,
            error: None,
            updated_at: Some(at),
        };
    }

    /// Keep the cached snapshot and record why the refresh failed.
    pub fn mark_failed(&mut self, error: String, at: DateTime<Utc>) {
        self.status = DashboardStatus::Stale;
        self.error = Some(error);
        self.updated_at = Some(at);
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    pub fn snapshot(at: DateTime<Utc>) -> DashboardSnapshot {
        let latest = Reading {
            speed: 2500.0,
            temperature: 65.0,
            vibration: 1.5,
            efficiency: 92.0,
            power_consumption: 4.5,
            status: MotorStatus::Normal,
            timestamp: at,
        };
        DashboardSnapshot {
            motor_id: "MOTOR-001".to_string(),
            source: DataSource::Live,
            computed_at: at,
            status: MotorStatus::Normal,
            latest: latest.clone(),
            energy: EnergyAnalysis {
                total_consumption: 500.0,
                peak_demand: 5.0,
                average_efficiency: 92.0,
                cost_savings: 2.0,
                carbon_footprint: 250.0,
                peak_hours: vec!["09:00-11:00".to_string()],
                total_cost: 60.0,
                avg_cost_per_kwh: 0.12,
                carbon_offset: 5.25,
                efficiency_impact: -3.5,
                carbon_intensity: 0.5,
            },
            performance: PerformanceMetrics {
                availability: 90.0,
                mtbf: 900.0,
                mttr: 4.0,
                oee: 80.0,
                throughput: 100.0,
                quality_rate: 98.5,
            },
            benchmarks: Vec::new(),
            daily_life: DailyLifeMetrics::from_reading(&latest, 90.0),
            time_series: Vec::new(),
        }
    }

    pub fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap()
    }
}
