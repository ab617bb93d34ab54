// Physics backend repository implementation
use crate::application::reading_repository::ReadingRepository;
use crate::domain::reading::RawReading;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct BackendRepository {
    host: String,
    client: reqwest::Client,
}

impl BackendRepository {
    pub fn new(host: String, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            host: host.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn build_readings_url(&self, motor_id: &str, limit: usize) -> String {
        format!(
            "{}/api/motors/{}/readings?limit={}",
            self.host,
            urlencoding::encode(motor_id),
            limit
        )
    }
}

#[async_trait]
impl ReadingRepository for BackendRepository {
    async fn latest_readings(&self, motor_id: &str, limit: usize) -> Result<Vec<RawReading>> {
        let url = self.build_readings_url(motor_id, limit);
        tracing::debug!("Fetching readings: {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to physics backend")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Physics backend request failed with status {}: {}", status, body);
        }

        let readings = response
            .json::<Vec<RawReading>>()
            .await
            .context("Failed to parse physics backend response")?;

        Ok(newest_first(readings, limit))
    }
}

/// Order readings newest first and keep at most `limit`.
/// A batch with any untimestamped reading keeps the backend's order.
pub fn newest_first(mut readings: Vec<RawReading>, limit: usize) -> Vec<RawReading> {
    if readings.iter().all(|r| r.timestamp.is_some()) {
        readings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    }
    readings.truncate(limit);
    readings
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at_hour(hour: u32) -> Option<DateTime<Utc>> {
        Some(Utc.with_ymd_and_hms(2024, 1, 10, hour, 0, 0).unwrap())
    }

    fn stamped(efficiency: f64, timestamp: Option<DateTime<Utc>>) -> RawReading {
        RawReading {
            efficiency: Some(efficiency),
            timestamp,
            ..Default::default()
        }
    }

    fn efficiencies(readings: &[RawReading]) -> Vec<f64> {
        readings.iter().filter_map(|r| r.efficiency).collect()
    }

    #[test]
    fn test_newest_first_sorts_shuffled_batch() {
        let readings = vec![stamped(1.0, at_hour(9)), stamped(3.0, at_hour(11)), stamped(2.0, at_hour(10))];
        assert_eq!(efficiencies(&newest_first(readings, 10)), vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_newest_first_keeps_order_without_timestamps() {
        let readings = vec![stamped(1.0, at_hour(9)), stamped(2.0, None), stamped(3.0, at_hour(11))];
        assert_eq!(efficiencies(&newest_first(readings, 10)), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_newest_first_truncates_after_sorting() {
        let readings = vec![stamped(1.0, at_hour(9)), stamped(3.0, at_hour(11)), stamped(2.0, at_hour(10))];
        assert_eq!(efficiencies(&newest_first(readings, 2)), vec![3.0, 2.0]);
    }

    #[test]
    fn test_build_readings_url() {
        let repo = BackendRepository::new("http://localhost:5000/".to_string(), Duration::from_secs(1)).unwrap();
        assert_eq!(
            repo.build_readings_url("MOTOR 001", 48),
            "http://localhost:5000/api/motors/MOTOR%20001/readings?limit=48"
        );
    }
}
