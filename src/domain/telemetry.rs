// Telemetry data domain models
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Derived per-hour record of the motor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub speed: f64,
    pub temperature: f64,
    pub efficiency: f64,
    pub power: f64,
    pub vibration: f64,
    pub load: f64,
    pub cost: f64,
}

/// Single (time, value) sample of a chart series.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub time_ms: i64,
    pub value: f64,
}

impl ChartPoint {
    pub fn new(time_ms: i64, value: f64) -> Self {
        Self { time_ms, value }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TileData {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub value: f64,
    pub precision: i32,
}

impl TileData {
    pub fn new(id: String, title: String, unit: String, value: f64, precision: i32) -> Self {
        Self {
            id,
            title,
            unit,
            value,
            precision,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesData {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub points: Vec<ChartPoint>,
}

impl SeriesData {
    pub fn new(id: String, name: String, color: Option<String>, points: Vec<ChartPoint>) -> Self {
        Self {
            id,
            name,
            color,
            points,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    pub kind: ChartKind,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub fraction_digits: Option<i32>,
    pub series: Vec<SeriesData>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    #[default]
    Line,
    MultiLine,
}

/// Field of a [`TimeSeriesPoint`] that a chart series plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SeriesField {
    Speed,
    Temperature,
    Efficiency,
    Power,
    Vibration,
    Load,
    Cost,
}

impl SeriesField {
    pub fn value_of(self, point: &TimeSeriesPoint) -> f64 {
        match self {
            SeriesField::Speed => point.speed,
            SeriesField::Temperature => point.temperature,
            SeriesField::Efficiency => point.efficiency,
            SeriesField::Power => point.power,
            SeriesField::Vibration => point.vibration,
            SeriesField::Load => point.load,
            SeriesField::Cost => point.cost,
        }
    }

    /// Project a time series onto chart points for this field.
    pub fn project(self, series: &[TimeSeriesPoint]) -> Vec<ChartPoint> {
        series
            .iter()
            .map(|p| ChartPoint::new(p.timestamp.timestamp_millis(), self.value_of(p)))
            .collect()
    }
}
