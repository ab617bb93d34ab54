// Derived-metrics calculator - Pure functions from a reading window to dashboard metrics
use crate::domain::metrics::{BenchmarkRow, EnergyAnalysis, PerformanceMetrics, clamp_percent};
use crate::domain::reading::{RawReading, Reading};
use crate::domain::tariff::{CARBON_PER_KWH, FLAT_RATE, is_weekend, rate_at};
use crate::domain::telemetry::TimeSeriesPoint;
use chrono::{DateTime, Datelike, Duration, NaiveTime, Timelike, Utc};
use thiserror::Error;

/// Efficiency (%) above which savings and carbon offsets are credited.
const EFFICIENCY_BASELINE: f64 = 85.0;
const PEAK_FACTOR: f64 = 1.2;
const RUNNING_SPEED: f64 = 1000.0;
const RATED_SPEED: f64 = 2500.0;
const MAX_SPEED: f64 = 3000.0;

pub const DEFAULT_PEAK_HOURS: [&str; 2] = ["09:00-11:00", "14:00-16:00"];

#[derive(Debug, Error, PartialEq)]
pub enum CalculatorError {
    #[error("No readings available")]
    NoData,

    #[error("Latest reading is missing {0}")]
    MissingField(&'static str),
}

#[derive(Debug, Clone)]
pub struct DerivedMetrics {
    pub latest: Reading,
    pub energy: EnergyAnalysis,
    pub performance: PerformanceMetrics,
    pub benchmarks: Vec<BenchmarkRow>,
    pub time_series: Vec<TimeSeriesPoint>,
}

/// Derive every dashboard metric from newest-first readings.
///
/// The newest reading must be complete; older readings fall back to defaults
/// field by field.
pub fn calculate(readings: &[RawReading], now: DateTime<Utc>) -> Result<DerivedMetrics, CalculatorError> {
    let newest = readings.first().ok_or(CalculatorError::NoData)?;
    if let Some(field) = newest.missing_fields().first() {
        return Err(CalculatorError::MissingField(*field));
    }

    let resolved: Vec<Reading> = readings.iter().map(|r| r.resolve(now)).collect();
    let time_series = build_time_series(&resolved, now);

    Ok(derive_from_series(time_series, resolved[0].clone()))
}

/// Aggregate a prepared series. `latest` drives the point-in-time metrics.
pub fn derive_from_series(time_series: Vec<TimeSeriesPoint>, latest: Reading) -> DerivedMetrics {
    let energy = energy_analysis(&time_series, &latest);
    let performance = performance_metrics(&time_series, &latest);
    let benchmarks = benchmarks(&energy, &performance);

    DerivedMetrics {
        latest,
        energy,
        performance,
        benchmarks,
        time_series,
    }
}

/// Hourly timestamps from UTC midnight six days ago through the last hour of today.
pub fn series_window(now: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    let today = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    let start = today - Duration::days(6);
    let end = today + Duration::days(1) - Duration::seconds(1);

    let mut hours = Vec::with_capacity(7 * 24);
    let mut current = start;
    while current <= end {
        hours.push(current);
        current += Duration::hours(1);
    }
    hours
}

/// Operating intensity of the plant at a given hour.
pub fn time_factor(timestamp: DateTime<Utc>) -> f64 {
    if is_weekend(timestamp.weekday()) {
        0.3
    } else if (8..18).contains(&timestamp.hour()) {
        1.0
    } else {
        0.6
    }
}

/// Interpolate the readings (newest-first) across the series window.
pub fn build_time_series(readings: &[Reading], now: DateTime<Utc>) -> Vec<TimeSeriesPoint> {
    if readings.is_empty() {
        return Vec::new();
    }

    let chronological: Vec<&Reading> = readings.iter().rev().collect();
    let hours = series_window(now);
    let last_index = hours.len().saturating_sub(1).max(1) as f64;
    let last_reading = (chronological.len() - 1) as f64;

    hours
        .into_iter()
        .enumerate()
        .map(|(i, timestamp)| {
            let progress = i as f64 / last_index;
            let position = progress * last_reading;
            let lo = position.floor() as usize;
            let hi = (lo + 1).min(chronological.len() - 1);
            let frac = position - lo as f64;
            let (a, b) = (chronological[lo], chronological[hi]);
            let lerp = |f: fn(&Reading) -> f64| f(a) + (f(b) - f(a)) * frac;

            let x = i as f64;
            let fast = (x * 0.1).sin();
            let slow = (x * 0.05).sin();
            let factor = time_factor(timestamp);

            let speed = (lerp(|r| r.speed) * (1.0 + 0.02 * fast) * factor).max(0.0);
            let power = (lerp(|r| r.power_consumption) * (1.0 + 0.05 * fast) * factor).max(0.0);
            let temperature = (lerp(|r| r.temperature) + 2.0 * slow).max(20.0);
            let vibration = (lerp(|r| r.vibration) + 0.1 * slow).max(0.0);
            let efficiency = (lerp(|r| r.efficiency) + 0.5 * slow).clamp(70.0, 95.0);

            TimeSeriesPoint {
                timestamp,
                speed,
                temperature,
                efficiency,
                power,
                vibration,
                load: (speed / MAX_SPEED).clamp(0.0, 1.0),
                cost: power * FLAT_RATE,
            }
        })
        .collect()
}

pub fn energy_analysis(series: &[TimeSeriesPoint], latest: &Reading) -> EnergyAnalysis {
    let total_consumption: f64 = series.iter().map(|p| p.power).sum();
    let peak_demand = series.iter().map(|p| p.power).fold(0.0, f64::max);
    let total_cost: f64 = series.iter().map(|p| p.power * rate_at(p.timestamp)).sum();

    let average_efficiency = latest.efficiency;
    let efficiency_improvement = (average_efficiency - EFFICIENCY_BASELINE).max(0.0);

    let carbon_footprint = total_consumption * CARBON_PER_KWH;
    let (avg_cost_per_kwh, carbon_intensity) = if total_consumption > 0.0 {
        (total_cost / total_consumption, carbon_footprint / total_consumption)
    } else {
        (FLAT_RATE, 0.0)
    };

    EnergyAnalysis {
        total_consumption,
        peak_demand,
        average_efficiency,
        cost_savings: total_cost * efficiency_improvement / 100.0 * 0.8,
        carbon_footprint,
        peak_hours: detect_peak_hours(&hourly_average_power(series)),
        total_cost,
        avg_cost_per_kwh,
        carbon_offset: carbon_footprint * (efficiency_improvement / 100.0) * 0.3,
        efficiency_impact: -(efficiency_improvement * 0.5).min(25.0),
        carbon_intensity,
    }
}

/// Average power per hour of day across the window. Hours without samples average to zero.
pub fn hourly_average_power(series: &[TimeSeriesPoint]) -> [f64; 24] {
    let mut sums = [0.0; 24];
    let mut counts = [0u32; 24];
    for point in series {
        let hour = point.timestamp.hour() as usize;
        sums[hour] += point.power;
        counts[hour] += 1;
    }

    let mut averages = [0.0; 24];
    for hour in 0..24 {
        if counts[hour] > 0 {
            averages[hour] = sums[hour] / f64::from(counts[hour]);
        }
    }
    averages
}

/// Hours whose average power exceeds 1.2x the daily mean, merged into "HH:00-HH:00" windows.
pub fn detect_peak_hours(hourly: &[f64; 24]) -> Vec<String> {
    let mean = hourly.iter().sum::<f64>() / 24.0;
    let threshold = mean * PEAK_FACTOR;

    let mut windows = Vec::new();
    let mut run_start: Option<usize> = None;
    for hour in 0..=24 {
        let flagged = hour < 24 && mean > 0.0 && hourly[hour] > threshold;
        match (flagged, run_start) {
            (true, None) => run_start = Some(hour),
            (false, Some(start)) => {
                windows.push(format!("{:02}:00-{:02}:00", start, hour % 24));
                run_start = None;
            }
            _ => {}
        }
    }

    if windows.is_empty() {
        DEFAULT_PEAK_HOURS.iter().map(|w| w.to_string()).collect()
    } else {
        windows
    }
}

pub fn performance_metrics(series: &[TimeSeriesPoint], latest: &Reading) -> PerformanceMetrics {
    let running = series.iter().filter(|p| p.speed > RUNNING_SPEED).count();
    let availability = if series.is_empty() {
        0.0
    } else {
        clamp_percent(running as f64 / series.len() as f64 * 100.0)
    };

    let temp_factor = (1.0 - (latest.temperature - 65.0) / 100.0).max(0.5);
    let vibration_factor = (1.0 - (latest.vibration - 2.0) / 10.0).max(0.3);
    let efficiency_factor = latest.efficiency / 100.0;
    let mtbf = (1000.0 * temp_factor * vibration_factor * efficiency_factor).max(PerformanceMetrics::MIN_MTBF);

    let system_complexity = (latest.temperature - 20.0) / 50.0 + (latest.vibration - 1.0) / 5.0;
    let mttr = (2.0 + system_complexity * 3.0).max(PerformanceMetrics::MIN_MTTR);

    let throughput = clamp_percent(latest.speed / RATED_SPEED * 100.0);
    let quality_rate = clamp_percent(95.0 + (latest.efficiency - EFFICIENCY_BASELINE) * 0.5);

    PerformanceMetrics {
        availability,
        mtbf,
        mttr,
        oee: PerformanceMetrics::oee_of(availability, throughput, quality_rate),
        throughput,
        quality_rate,
    }
}

pub fn benchmarks(energy: &EnergyAnalysis, performance: &PerformanceMetrics) -> Vec<BenchmarkRow> {
    vec![
        BenchmarkRow::new("Energy Efficiency", energy.average_efficiency, 92.0, 85.0, 96.0, "%"),
        BenchmarkRow::new("Availability", performance.availability, 95.0, 90.0, 99.0, "%"),
        BenchmarkRow::new("MTBF", performance.mtbf, 2000.0, 1500.0, 5000.0, "hours"),
        BenchmarkRow::new("OEE", performance.oee, 85.0, 60.0, 90.0, "%"),
    ]
}
