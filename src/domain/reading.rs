// Motor reading domain model
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_SPEED: f64 = 2500.0;
pub const DEFAULT_TEMPERATURE: f64 = 65.0;
pub const DEFAULT_VIBRATION: f64 = 1.5;
pub const DEFAULT_EFFICIENCY: f64 = 92.0;
pub const DEFAULT_POWER: f64 = 4.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotorStatus {
    #[default]
    Normal,
    Warning,
    Critical,
    Maintenance,
}

impl MotorStatus {
    /// Classify a motor from its latest sensor values.
    /// An explicit maintenance flag from the backend is never downgraded.
    pub fn classify(reported: MotorStatus, efficiency: f64, vibration: f64, temperature: f64) -> Self {
        if efficiency < 75.0 || vibration > 6.0 || temperature > 90.0 {
            MotorStatus::Critical
        } else if efficiency < 80.0 || vibration > 4.5 || temperature > 80.0 {
            MotorStatus::Warning
        } else if reported == MotorStatus::Maintenance {
            MotorStatus::Maintenance
        } else {
            MotorStatus::Normal
        }
    }
}

/// One sampled snapshot of the motor, with every field resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub speed: f64,
    pub temperature: f64,
    pub vibration: f64,
    pub efficiency: f64,
    pub power_consumption: f64,
    pub status: MotorStatus,
    pub timestamp: DateTime<Utc>,
}

/// Reading as received from the physics backend. Any field may be absent,
/// and a malformed value is treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReading {
    #[serde(default, deserialize_with = "lenient")]
    pub speed: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub temperature: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub vibration: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub efficiency: Option<f64>,
    #[serde(default, alias = "power", deserialize_with = "lenient")]
    pub power_consumption: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<MotorStatus>,
    #[serde(default, deserialize_with = "lenient")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Decode a field, mapping values of the wrong shape to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }

    match serde_json::from_value::<T>(value.clone()) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            tracing::warn!("Ignoring malformed reading field {}: {}", value, e);
            Ok(None)
        }
    }
}

impl RawReading {
    /// Names of the numeric fields that are absent (or not finite).
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("speed", self.speed),
            ("temperature", self.temperature),
            ("vibration", self.vibration),
            ("efficiency", self.efficiency),
            ("powerConsumption", self.power_consumption),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_some_and(f64::is_finite))
        .map(|(name, _)| name)
        .collect()
    }

    /// Resolve absent fields with the documented defaults.
    pub fn resolve(&self, fallback_time: DateTime<Utc>) -> Reading {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            tracing::warn!("Reading is missing {:?}, substituting defaults", missing);
        }

        Reading {
            speed: finite_or(self.speed, DEFAULT_SPEED),
            temperature: finite_or(self.temperature, DEFAULT_TEMPERATURE),
            vibration: finite_or(self.vibration, DEFAULT_VIBRATION),
            efficiency: finite_or(self.efficiency, DEFAULT_EFFICIENCY),
            power_consumption: finite_or(self.power_consumption, DEFAULT_POWER),
            status: self.status.unwrap_or_default(),
            timestamp: self.timestamp.unwrap_or(fallback_time),
        }
    }
}

fn finite_or(value: Option<f64>, default: f64) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(default)
}
