// Derived metric aggregates
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyAnalysis {
    /// kWh over the whole window.
    pub total_consumption: f64,
    pub peak_demand: f64,
    /// Efficiency of the newest reading, not a windowed average.
    pub average_efficiency: f64,
    pub cost_savings: f64,
    /// kg CO2.
    pub carbon_footprint: f64,
    pub peak_hours: Vec<String>,
    pub total_cost: f64,
    pub avg_cost_per_kwh: f64,
    pub carbon_offset: f64,
    pub efficiency_impact: f64,
    pub carbon_intensity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    pub availability: f64,
    pub mtbf: f64,
    pub mttr: f64,
    pub oee: f64,
    pub throughput: f64,
    pub quality_rate: f64,
}

impl PerformanceMetrics {
    pub const MIN_MTBF: f64 = 100.0;
    pub const MIN_MTTR: f64 = 0.5;

    /// Overall Equipment Effectiveness from its three factors, each clamped to a percentage.
    pub fn oee_of(availability: f64, throughput: f64, quality_rate: f64) -> f64 {
        clamp_percent(availability) * clamp_percent(throughput) * clamp_percent(quality_rate) / 10000.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkRow {
    pub metric: String,
    pub current: f64,
    pub target: f64,
    pub industry: f64,
    pub best: f64,
    pub unit: String,
}

impl BenchmarkRow {
    pub fn new(metric: &str, current: f64, target: f64, industry: f64, best: f64, unit: &str) -> Self {
        Self {
            metric: metric.to_string(),
            current,
            target,
            industry,
            best,
            unit: unit.to_string(),
        }
    }
}

pub fn clamp_percent(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}
