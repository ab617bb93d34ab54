// Streaming dashboard service - Progressive loading of the current dashboard state
use crate::application::dashboard_service::DashboardService;
use crate::application::view_service::ViewService;
use crate::domain::dashboard::{DashboardSnapshot, DashboardStatus, DataSource};
use crate::domain::telemetry::{ChartData, ChartKind, ChartPoint};
use serde::Serialize;
use std::time::Instant;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TileSkeleton {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub precision: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesSkeleton {
    pub id: String,
    pub name: String,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSkeleton {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    pub kind: ChartKind,
    pub y_min: Option<f64>,
    pub y_max: Option<f64>,
    pub fraction_digits: Option<i32>,
    pub series: Vec<SeriesSkeleton>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSkeleton {
    pub motor_id: String,
    pub source: DataSource,
    pub status: DashboardStatus,
    pub tiles: Vec<TileSkeleton>,
    pub charts: Vec<ChartSkeleton>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StreamMessage {
    Skeleton(DashboardSkeleton),
    #[serde(rename_all = "camelCase")]
    TileUpdate { tile_id: String, value: f64 },
    #[serde(rename_all = "camelCase")]
    ChartUpdate {
        chart_id: String,
        series_id: String,
        points: Vec<ChartPoint>,
    },
    NoData {
        status: DashboardStatus,
        error: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Complete { total_widgets: usize, duration_ms: u64 },
}

#[derive(Clone)]
pub struct StreamingDashboardService {
    dashboard: DashboardService,
    views: ViewService,
}

impl StreamingDashboardService {
    pub fn new(dashboard: DashboardService, views: ViewService) -> Self {
        Self { dashboard, views }
    }

    pub async fn stream_dashboard(&self) -> mpsc::Receiver<StreamMessage> {
        let (tx, rx) = mpsc::channel(100);
        let start_time = Instant::now();
        let state = self.dashboard.current().await;

        let Some(snapshot) = state.snapshot else {
            tracing::debug!("Streaming dashboard without snapshot ({:?})", state.status);
            let _ = tx
                .send(StreamMessage::NoData {
                    status: state.status,
                    error: state.error,
                })
                .await;
            let _ = tx
                .send(StreamMessage::Complete {
                    total_widgets: 0,
                    duration_ms: start_time.elapsed().as_millis() as u64,
                })
                .await;
            return rx;
        };

        // Charts without data are dropped up front so the skeleton matches what follows
        let tiles = self.views.tiles(&snapshot);
        let charts = self.views.charts(&snapshot);
        let total_widgets = tiles.len() + charts.len();

        // 1. Send skeleton immediately
        let skeleton = self.build_skeleton(&snapshot, state.status, &charts);
        let _ = tx.send(StreamMessage::Skeleton(skeleton)).await;

        // 2. Tiles and chart series follow from a background task
        tokio::spawn(async move {
            for tile in tiles {
                let msg = StreamMessage::TileUpdate {
                    tile_id: tile.id,
                    value: tile.value,
                };
                if tx.send(msg).await.is_err() {
                    return;
                }
            }

            for chart in charts {
                for series in chart.series {
                    let msg = StreamMessage::ChartUpdate {
                        chart_id: chart.id.clone(),
                        series_id: series.id,
                        points: series.points,
                    };
                    if tx.send(msg).await.is_err() {
                        return;
                    }
                }
            }

            let complete = StreamMessage::Complete {
                total_widgets,
                duration_ms: start_time.elapsed().as_millis() as u64,
            };
            let _ = tx.send(complete).await;
        });

        rx
    }

    fn build_skeleton(
        &self,
        snapshot: &DashboardSnapshot,
        status: DashboardStatus,
        charts: &[ChartData],
    ) -> DashboardSkeleton {
        let tiles = self
            .views
            .widgets()
            .tiles
            .iter()
            .map(|t| TileSkeleton {
                id: t.id.clone(),
                title: t.title.clone(),
                unit: t.unit.clone(),
                precision: t.precision,
            })
            .collect();

        let charts = charts
            .iter()
            .map(|c| ChartSkeleton {
                id: c.id.clone(),
                title: c.title.clone(),
                unit: c.unit.clone(),
                kind: c.kind,
                y_min: c.y_min,
                y_max: c.y_max,
                fraction_digits: c.fraction_digits,
                series: c
                    .series
                    .iter()
                    .map(|s| SeriesSkeleton {
                        id: s.id.clone(),
                        name: s.name.clone(),
                        color: s.color.clone(),
                    })
                    .collect(),
            })
            .collect();

        DashboardSkeleton {
            motor_id: snapshot.motor_id.clone(),
            source: snapshot.source,
            status,
            tiles,
            charts,
        }
    }
}
