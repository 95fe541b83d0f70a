//! Unit preferences and conversions applied by the semantic getters

use serde::{Deserialize, Serialize};

/// Offset between Kelvin and Celsius as used by the host.
pub const KELVIN_OFFSET: f32 = 273.15;

const KMH_PER_MS: f32 = 3.6;
const MPH_PER_MS: f32 = 2.236_936_3;
const GALLONS_PER_LITER: f32 = 0.264_172_05;

/// Measurement system used for temperatures and fuel volumes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementUnits {
    /// Celsius, liters
    #[default]
    Metric,
    /// Fahrenheit, US gallons
    Imperial,
}

/// Unit used for speeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedUnits {
    #[default]
    Kmh,
    Mph,
}

impl MeasurementUnits {
    /// Convert a Celsius temperature to this system.
    pub fn temperature_from_celsius(self, celsius: f32) -> f32 {
        match self {
            MeasurementUnits::Metric => celsius,
            MeasurementUnits::Imperial => celsius_to_fahrenheit(celsius),
        }
    }

    /// Convert a Kelvin temperature to this system.
    pub fn temperature_from_kelvin(self, kelvin: f32) -> f32 {
        self.temperature_from_celsius(kelvin_to_celsius(kelvin))
    }

    /// Convert a volume in liters to this system.
    pub fn volume_from_liters(self, liters: f32) -> f32 {
        match self {
            MeasurementUnits::Metric => liters,
            MeasurementUnits::Imperial => liters * GALLONS_PER_LITER,
        }
    }

    pub fn temperature_unit(self) -> &'static str {
        match self {
            MeasurementUnits::Metric => "°C",
            MeasurementUnits::Imperial => "°F",
        }
    }

    pub fn volume_unit(self) -> &'static str {
        match self {
            MeasurementUnits::Metric => "L",
            MeasurementUnits::Imperial => "gal",
        }
    }
}

impl SpeedUnits {
    /// Convert meters per second to this unit.
    pub fn from_meters_per_second(self, ms: f32) -> f32 {
        match self {
            SpeedUnits::Kmh => ms * KMH_PER_MS,
            SpeedUnits::Mph => ms * MPH_PER_MS,
        }
    }

    /// Convert km/h to this unit.
    pub fn from_kmh(self, kmh: f32) -> f32 {
        self.from_meters_per_second(kmh / KMH_PER_MS)
    }

    pub fn unit(self) -> &'static str {
        match self {
            SpeedUnits::Kmh => "km/h",
            SpeedUnits::Mph => "mph",
        }
    }
}

pub fn kelvin_to_celsius(kelvin: f32) -> f32 {
    kelvin - KELVIN_OFFSET
}

pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 1.8 + 32.0
}

pub fn meters_per_second_to_kmh(ms: f32) -> f32 {
    ms * KMH_PER_MS
}
