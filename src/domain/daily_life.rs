// Everyday-appliance translations of the motor's condition
use serde::Serialize;

use super::reading::Reading;

/// Coolant flow assumed for the pool pump translation (L/min).
const COOLANT_FLOW_RATE: f64 = 20.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLifeMetrics {
    pub hvac_efficiency: f64,
    pub energy_savings: f64,
    pub comfort_level: f64,
    pub air_quality: f64,
    pub fuel_efficiency: f64,
    pub engine_health: f64,
    pub battery_level: f64,
    pub tire_pressure: f64,
    pub boat_engine_efficiency: f64,
    pub blade_sharpness: f64,
    pub fuel_level: f64,
    pub generator_power_output: f64,
    pub generator_fuel_efficiency: f64,
    pub pool_pump_flow_rate: f64,
    pub pool_pump_energy_usage: f64,
    pub washing_machine_efficiency: f64,
    pub dishwasher_efficiency: f64,
    pub refrigerator_efficiency: f64,
    pub air_conditioner_efficiency: f64,
}

fn pct(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

fn excess(value: f64, threshold: f64) -> f64 {
    (value - threshold).max(0.0)
}

impl DailyLifeMetrics {
    /// Translate a reading into household terms. `system_health` is a 0-100 score.
    pub fn from_reading(reading: &Reading, system_health: f64) -> Self {
        let eff = reading.efficiency;
        let temp = reading.temperature;
        let vib = reading.vibration;
        let speed = reading.speed;
        let power = reading.power_consumption;

        Self {
            hvac_efficiency: eff * (1.0 - (temp - 22.0) * 0.002),
            energy_savings: eff * 0.8,
            comfort_level: pct(100.0 - (temp - 22.0).abs() * 1.5 - vib * 2.0),
            air_quality: pct(100.0 - vib * 8.0 - excess(temp, 30.0) * 0.5),
            fuel_efficiency: eff * 1.2 * (1.0 - (temp - 22.0) * 0.001),
            engine_health: eff * 0.9,
            battery_level: (100.0 - (temp - 30.0) * 2.0 - excess(vib, 2.0) * 5.0).max(0.0),
            tire_pressure: (100.0 - vib * 15.0 - excess(speed, 2000.0) * 0.01).max(0.0),
            boat_engine_efficiency: pct(eff * (1.0 - (temp - 25.0) * 0.002) - excess(vib, 2.0) * 3.0),
            blade_sharpness: pct(100.0 - vib * 20.0 - excess(speed, 1500.0) * 0.01),
            fuel_level: pct(100.0 - (temp - 40.0) * 3.0 - excess(vib, 1.5) * 5.0),
            generator_power_output: pct(power * 10.0 * (1.0 - (temp - 30.0) * 0.001)),
            generator_fuel_efficiency: pct(eff * (1.0 - excess(vib, 2.0) * 0.02)),
            pool_pump_flow_rate: pct(COOLANT_FLOW_RATE * 20.0 * (1.0 - (temp - 25.0) * 0.001)),
            pool_pump_energy_usage: pct(power * 15.0 * (1.0 + excess(vib, 1.0) * 0.05)),
            washing_machine_efficiency: pct(eff * (1.0 - vib * 0.05)),
            dishwasher_efficiency: pct(eff * 0.9 + (system_health - 80.0) * 0.3),
            refrigerator_efficiency: pct(eff * 1.1 - (temp - 4.0) * 0.8),
            air_conditioner_efficiency: pct(eff * (1.0 - (temp - 22.0) * 0.005)),
        }
    }
}

/// Weighted 0-100 health score of a reading: efficiency, vibration and temperature bands.
pub fn system_health(reading: &Reading) -> f64 {
    let efficiency_health = pct(reading.efficiency) * 0.45;

    let vibration_band = if reading.vibration < 2.8 {
        100.0
    } else if reading.vibration < 7.1 {
        100.0 - (reading.vibration - 2.8) * 8.0
    } else {
        0.0
    };

    let temperature_band = if reading.temperature < 70.0 {
        100.0
    } else if reading.temperature < 85.0 {
        100.0 - (reading.temperature - 70.0) * 2.0
    } else if reading.temperature < 95.0 {
        70.0 - (reading.temperature - 85.0) * 4.0
    } else {
        0.0
    };

    pct(efficiency_health + vibration_band * 0.30 + temperature_band * 0.25)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reading::MotorStatus;
    use chrono::Utc;

    fn reading(temperature: f64, vibration: f64, efficiency: f64) -> Reading {
        Reading {
            speed: 2500.0,
            temperature,
            vibration,
            efficiency,
            power_consumption: 4.5,
            status: MotorStatus::Normal,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_nominal_motor_translations() {
        let r = reading(65.0, 1.5, 92.0);
        let metrics = DailyLifeMetrics::from_reading(&r, system_health(&r));

        assert!((metrics.energy_savings - 73.6).abs() < 1e-9);
        assert!((metrics.washing_machine_efficiency - 92.0 * 0.925).abs() < 1e-9);
        assert!((metrics.blade_sharpness - 60.0).abs() < 1e-9);
        assert!((metrics.pool_pump_energy_usage - 69.1875).abs() < 1e-9);
    }

    #[test]
    fn test_extreme_readings_stay_in_range() {
        let r = reading(200.0, 30.0, 10.0);
        let metrics = DailyLifeMetrics::from_reading(&r, system_health(&r));

        for value in [
            metrics.comfort_level,
            metrics.air_quality,
            metrics.boat_engine_efficiency,
            metrics.blade_sharpness,
            metrics.fuel_level,
            metrics.washing_machine_efficiency,
            metrics.refrigerator_efficiency,
            metrics.air_conditioner_efficiency,
        ] {
            assert!((0.0..=100.0).contains(&value), "out of range: {}", value);
        }
        assert_eq!(metrics.battery_level, 0.0);
        assert_eq!(metrics.tire_pressure, 0.0);
    }

    #[test]
    fn test_system_health_bands() {
        assert!((system_health(&reading(60.0, 1.0, 100.0)) - 100.0).abs() < 1e-9);
        assert!((system_health(&reading(100.0, 8.0, 0.0)) - 0.0).abs() < 1e-9);
    }
}
