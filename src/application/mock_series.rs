// Demo series generator - Placeholder data when no reading source is connected
//
// Output is random on purpose and must never be mistaken for live telemetry.
use crate::domain::reading::{MotorStatus, Reading};
use crate::domain::tariff::{FLAT_RATE, is_weekend};
use crate::domain::telemetry::TimeSeriesPoint;
use chrono::{DateTime, Datelike, Duration, DurationRound, Timelike, Utc};
use rand::Rng;
use std::ops::RangeInclusive;

pub const MOCK_SERIES_HOURS: usize = 7 * 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Regime {
    Working,
    NightShift,
    Weekend,
    Idle,
}

struct RegimeBands {
    speed: RangeInclusive<f64>,
    temperature: RangeInclusive<f64>,
    power: RangeInclusive<f64>,
    vibration: RangeInclusive<f64>,
    load: RangeInclusive<f64>,
}

impl Regime {
    pub fn at(timestamp: DateTime<Utc>) -> Self {
        let hour = timestamp.hour();
        if is_weekend(timestamp.weekday()) {
            Regime::Weekend
        } else if (8..18).contains(&hour) {
            Regime::Working
        } else if hour >= 22 || hour < 6 {
            Regime::NightShift
        } else {
            Regime::Idle
        }
    }

    fn bands(self) -> RegimeBands {
        match self {
            Regime::Working => RegimeBands {
                speed: 2400.0..=2700.0,
                temperature: 65.0..=80.0,
                power: 4.0..=5.5,
                vibration: 1.5..=2.5,
                load: 0.7..=0.9,
            },
            Regime::NightShift => RegimeBands {
                speed: 1800.0..=2200.0,
                temperature: 55.0..=65.0,
                power: 2.5..=3.5,
                vibration: 1.0..=1.8,
                load: 0.4..=0.6,
            },
            Regime::Weekend => RegimeBands {
                speed: 300.0..=600.0,
                temperature: 25.0..=35.0,
                power: 0.5..=1.0,
                vibration: 0.2..=0.5,
                load: 0.05..=0.15,
            },
            Regime::Idle => RegimeBands {
                speed: 800.0..=1200.0,
                temperature: 35.0..=45.0,
                power: 1.0..=1.8,
                vibration: 0.5..=1.0,
                load: 0.2..=0.3,
            },
        }
    }
}

/// 168 hourly demo points ending at the current hour.
pub fn generate(now: DateTime<Utc>) -> Vec<TimeSeriesPoint> {
    generate_with_rng(now, &mut rand::thread_rng())
}

pub fn generate_with_rng<R: Rng>(now: DateTime<Utc>, rng: &mut R) -> Vec<TimeSeriesPoint> {
    let current_hour = now.duration_trunc(Duration::hours(1)).unwrap_or(now);
    let start = current_hour - Duration::hours(MOCK_SERIES_HOURS as i64 - 1);

    (0..MOCK_SERIES_HOURS)
        .map(|i| {
            let timestamp = start + Duration::hours(i as i64);
            let bands = Regime::at(timestamp).bands();

            let load = rng.gen_range(bands.load);
            let power = rng.gen_range(bands.power);

            TimeSeriesPoint {
                timestamp,
                speed: rng.gen_range(bands.speed),
                temperature: rng.gen_range(bands.temperature),
                efficiency: (75.0 + load * 20.0).clamp(70.0, 95.0),
                power,
                vibration: rng.gen_range(bands.vibration),
                load,
                cost: power * FLAT_RATE,
            }
        })
        .collect()
}

/// Treat the newest demo point as the "latest reading" for point-in-time metrics.
pub fn latest_reading(series: &[TimeSeriesPoint]) -> Option<Reading> {
    series.last().map(|p| Reading {
        speed: p.speed,
        temperature: p.temperature,
        vibration: p.vibration,
        efficiency: p.efficiency,
        power_consumption: p.power,
        status: MotorStatus::Normal,
        timestamp: p.timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_always_168_points() {
        for now in [
            Utc.with_ymd_and_hms(2024, 1, 10, 12, 34, 56).unwrap(),
            Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 59).unwrap(),
        ] {
            let series = generate(now);
            assert_eq!(series.len(), MOCK_SERIES_HOURS);
            assert_eq!(series.last().unwrap().timestamp, now.duration_trunc(Duration::hours(1)).unwrap());
        }
    }

    #[test]
    fn test_values_stay_within_regime_bands() {
        let mut rng = StdRng::seed_from_u64(7);
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();

        for point in generate_with_rng(now, &mut rng) {
            let bands = Regime::at(point.timestamp).bands();
            assert!(bands.speed.contains(&point.speed));
            assert!(bands.temperature.contains(&point.temperature));
            assert!(bands.power.contains(&point.power));
            assert!(bands.vibration.contains(&point.vibration));
            assert!(bands.load.contains(&point.load));
            assert!((70.0..=95.0).contains(&point.efficiency));
            assert!((point.cost - point.power * FLAT_RATE).abs() < 1e-12);
        }
    }

    #[test]
    fn test_regime_selection() {
        // 2024-01-08 is a Monday, 2024-01-07 a Sunday
        assert_eq!(Regime::at(Utc.with_ymd_and_hms(2024, 1, 8, 9, 0, 0).unwrap()), Regime::Working);
        assert_eq!(Regime::at(Utc.with_ymd_and_hms(2024, 1, 8, 23, 0, 0).unwrap()), Regime::NightShift);
        assert_eq!(Regime::at(Utc.with_ymd_and_hms(2024, 1, 8, 3, 0, 0).unwrap()), Regime::NightShift);
        assert_eq!(Regime::at(Utc.with_ymd_and_hms(2024, 1, 8, 19, 0, 0).unwrap()), Regime::Idle);
        assert_eq!(Regime::at(Utc.with_ymd_and_hms(2024, 1, 7, 9, 0, 0).unwrap()), Regime::Weekend);
    }
}
