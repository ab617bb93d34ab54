use crate::domain::dashboard::KpiMetric;
use crate::domain::telemetry::{ChartKind, SeriesField};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    /// Absent source means demo mode.
    #[serde(default)]
    pub source: Option<SourceSettings>,
    #[serde(default)]
    pub dashboard: DashboardSettings,
    #[serde(default)]
    pub sync: SyncThresholds,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SourceSettings {
    pub url: String,
    pub motor_id: String,
    #[serde(default = "default_window")]
    pub window: usize,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardSettings {
    pub bind_address: String,
    pub refresh_interval_secs: u64,
    pub sync_delay_ms: u64,
    /// Motor label shown in demo mode.
    pub demo_motor_id: String,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            refresh_interval_secs: 30,
            sync_delay_ms: 1500,
            demo_motor_id: "DEMO-MOTOR".to_string(),
        }
    }
}

/// Limits past which a sync is reported as failed.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SyncThresholds {
    pub min_efficiency: f64,
    pub max_consumption_kwh: f64,
    pub min_oee: f64,
    pub max_carbon_kg: f64,
}

impl Default for SyncThresholds {
    fn default() -> Self {
        Self {
            min_efficiency: 85.0,
            max_consumption_kwh: 800.0,
            min_oee: 60.0,
            max_carbon_kg: 400.0,
        }
    }
}

fn default_window() -> usize {
    48
}

fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct WidgetsConfig {
    #[serde(default)]
    pub tiles: Vec<TileConfig>,
    #[serde(default)]
    pub charts: Vec<ChartConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TileConfig {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub precision: i32,
    pub metric: KpiMetric,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChartConfig {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    #[serde(default)]
    pub kind: ChartKind,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub fraction_digits: Option<i32>,
    #[serde(default)]
    pub series: Vec<SeriesConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SeriesConfig {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
    pub field: SeriesField,
}

/// `config/backend.toml`, overridable with `MOTOR__SECTION__KEY` variables.
pub fn load_backend_config() -> anyhow::Result<BackendConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/backend").required(false))
        .add_source(config::Environment::with_prefix("MOTOR").separator("__").try_parsing(true))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_widgets_config() -> anyhow::Result<WidgetsConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/widgets"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
