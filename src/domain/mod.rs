// Domain layer - Motor telemetry models and pure value types
pub mod daily_life;
pub mod dashboard;
pub mod metrics;
pub mod reading;
pub mod tariff;
pub mod telemetry;
