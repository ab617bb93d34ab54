// View service - Builds KPI tiles, charts and tab views from the dashboard state
use crate::application::metrics_calculator::hourly_average_power;
use crate::domain::daily_life::DailyLifeMetrics;
use crate::domain::dashboard::{DashboardSnapshot, DashboardState, DashboardStatus, DataSource};
use crate::domain::metrics::{BenchmarkRow, EnergyAnalysis, PerformanceMetrics};
use crate::domain::reading::MotorStatus;
use crate::domain::telemetry::{ChartData, SeriesData, TileData};
use crate::infrastructure::config::WidgetsConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    Overview,
    Energy,
    Performance,
    Trends,
    Benchmarks,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "tab", rename_all = "camelCase")]
pub enum TabContent {
    #[serde(rename_all = "camelCase")]
    Overview {
        motor_status: MotorStatus,
        tiles: Vec<TileData>,
        daily_life: DailyLifeMetrics,
    },
    #[serde(rename_all = "camelCase")]
    Energy {
        energy: EnergyAnalysis,
        hourly_power: Vec<f64>,
    },
    Performance { performance: PerformanceMetrics },
    Trends { charts: Vec<ChartData> },
    Benchmarks { benchmarks: Vec<BenchmarkRow> },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabView {
    pub status: DashboardStatus,
    pub source: Option<DataSource>,
    pub updated_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
    /// Absent when there is nothing to show; the UI renders the no-data state.
    pub content: Option<TabContent>,
}

#[derive(Clone)]
pub struct ViewService {
    widgets_config: WidgetsConfig,
}

impl ViewService {
    pub fn new(widgets_config: WidgetsConfig) -> Self {
        Self { widgets_config }
    }

    pub fn widgets(&self) -> &WidgetsConfig {
        &self.widgets_config
    }

    pub fn tab(&self, state: &DashboardState, tab: Tab) -> TabView {
        let snapshot = state.snapshot.as_ref();
        TabView {
            status: state.status,
            source: snapshot.map(|s| s.source),
            updated_at: state.updated_at,
            error: state.error.clone(),
            content: snapshot.map(|s| self.tab_content(s, tab)),
        }
    }

    fn tab_content(&self, snapshot: &DashboardSnapshot, tab: Tab) -> TabContent {
        match tab {
            Tab::Overview => TabContent::Overview {
                motor_status: snapshot.status,
                tiles: self.tiles(snapshot),
                daily_life: snapshot.daily_life.clone(),
            },
            Tab::Energy => TabContent::Energy {
                energy: snapshot.energy.clone(),
                hourly_power: hourly_average_power(&snapshot.time_series).to_vec(),
            },
            Tab::Performance => TabContent::Performance {
                performance: snapshot.performance.clone(),
            },
            Tab::Trends => TabContent::Trends {
                charts: self.charts(snapshot),
            },
            Tab::Benchmarks => TabContent::Benchmarks {
                benchmarks: snapshot.benchmarks.clone(),
            },
        }
    }

    pub fn tiles(&self, snapshot: &DashboardSnapshot) -> Vec<TileData> {
        self.widgets_config
            .tiles
            .iter()
            .map(|tile| {
                TileData::new(
                    tile.id.clone(),
                    tile.title.clone(),
                    tile.unit.clone(),
                    tile.metric.value_of(snapshot),
                    tile.precision,
                )
            })
            .collect()
    }

    pub fn charts(&self, snapshot: &DashboardSnapshot) -> Vec<ChartData> {
        let mut charts = Vec::new();

        for chart_config in &self.widgets_config.charts {
            let series_list: Vec<SeriesData> = chart_config
                .series
                .iter()
                .map(|series_config| {
                    SeriesData::new(
                        series_config.id.clone(),
                        series_config.name.clone(),
                        series_config.color.clone(),
                        series_config.field.project(&snapshot.time_series),
                    )
                })
                .filter(|series| !series.points.is_empty())
                .collect();

            // Only add chart if it has at least one series with data
            if series_list.is_empty() {
                continue;
            }

            charts.push(ChartData {
                id: chart_config.id.clone(),
                title: chart_config.title.clone(),
                unit: chart_config.unit.clone(),
                kind: chart_config.kind,
                y_min: chart_config.y_min,
                y_max: chart_config.y_max,
                fraction_digits: chart_config.fraction_digits,
                series: series_list,
            });
        }

        charts
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::widgets;
    use super::*;
    use crate::application::metrics_calculator::series_window;
    use crate::domain::dashboard::fixtures::{at, snapshot};
    use crate::domain::telemetry::TimeSeriesPoint;

    fn snapshot_with_series() -> DashboardSnapshot {
        let mut s = snapshot(at());
        s.time_series = series_window(at())
            .into_iter()
            .map(|timestamp| TimeSeriesPoint {
                timestamp,
                speed: 2500.0,
                temperature: 65.0,
                efficiency: 90.0,
                power: 4.0,
                vibration: 1.5,
                load: 0.8,
                cost: 0.48,
            })
            .collect();
        s
    }

    #[test]
    fn test_tiles_follow_config() {
        let view = ViewService::new(widgets());
        let tiles = view.tiles(&snapshot(at()));
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].id, "oee");
        assert_eq!(tiles[0].value, 80.0);
    }

    #[test]
    fn test_charts_skip_empty_series() {
        let view = ViewService::new(widgets());
        assert!(view.charts(&snapshot(at())).is_empty());

        let charts = view.charts(&snapshot_with_series());
        assert_eq!(charts.len(), 1);
        assert_eq!(charts[0].series[0].points.len(), 168);
    }

    #[test]
    fn test_tab_without_snapshot_has_no_content() {
        let view = ViewService::new(widgets());
        let mut state = DashboardState::default();
        state.mark_no_data(at());

        let tab = view.tab(&state, Tab::Energy);
        assert_eq!(tab.status, DashboardStatus::NoData);
        assert!(tab.content.is_none());
    }

    #[test]
    fn test_energy_tab_serializes_with_tag() {
        let view = ViewService::new(widgets());
        let mut state = DashboardState::default();
        state.replace(snapshot_with_series());

        let json = serde_json::to_value(view.tab(&state, Tab::Energy)).unwrap();
        assert_eq!(json["status"], "ready");
        assert_eq!(json["content"]["tab"], "energy");
        assert_eq!(json["content"]["hourlyPower"].as_array().unwrap().len(), 24);
    }
}
