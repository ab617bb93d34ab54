// Electricity pricing and emission constants
use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};

/// Flat $/kWh rate used for the per-point cost of a time series.
pub const FLAT_RATE: f64 = 0.12;

/// kg CO2 per kWh.
pub const CARBON_PER_KWH: f64 = 0.5;

pub const WEEKEND_RATE: f64 = 0.06;
pub const SUPER_PEAK_RATE: f64 = 0.18;
pub const PEAK_RATE: f64 = 0.15;
pub const OFF_PEAK_RATE: f64 = 0.08;

pub fn is_weekend(weekday: Weekday) -> bool {
    matches!(weekday, Weekday::Sat | Weekday::Sun)
}

/// Time-of-use $/kWh rate for an hour of the day.
pub fn time_of_use_rate(hour: u32, weekday: Weekday) -> f64 {
    if is_weekend(weekday) {
        WEEKEND_RATE
    } else if (14..16).contains(&hour) {
        SUPER_PEAK_RATE
    } else if (9..17).contains(&hour) {
        PEAK_RATE
    } else {
        OFF_PEAK_RATE
    }
}

pub fn rate_at(timestamp: DateTime<Utc>) -> f64 {
    time_of_use_rate(timestamp.hour(), timestamp.weekday())
}
