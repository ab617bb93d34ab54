// Repository trait for motor reading access
use crate::domain::reading::RawReading;
use async_trait::async_trait;

#[async_trait]
pub trait ReadingRepository: Send + Sync {
    /// Most recent readings of a motor, newest first. May be empty.
    async fn latest_readings(&self, motor_id: &str, limit: usize) -> anyhow::Result<Vec<RawReading>>;
}
