//! Settings consumed by the data model and the recorders.
//!
//! Both documents are plain serde structures with `#[serde(default)]`, so a
//! YAML file only needs the keys it changes:
//!
//! ```rust
//! use rfstats::config::CoreSettings;
//! use rfstats::types::SpeedUnits;
//!
//! let settings = CoreSettings::from_yaml_str("speed_units: mph\ntop_speed_warmup: 2.5\n").unwrap();
//! assert_eq!(settings.speed_units, SpeedUnits::Mph);
//! assert_eq!(settings.top_speed_warmup, 2.5);
//! assert_eq!(settings.fastest_lap_display_delay, 10.0);
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::types::{MeasurementUnits, SpeedUnits, Wheel};
use crate::{Result, TelemetryError};

/// Unit preferences applied by semantic getters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Units {
    pub measurement: MeasurementUnits,
    pub speed: SpeedUnits,
}

/// Settings shared by every component of a [`LiveGameData`](crate::LiveGameData).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreSettings {
    pub units: MeasurementUnits,
    pub speed_units: SpeedUnits,
    /// Race length as a fraction of a full-length race; scales brake wear.
    pub race_length_percentage: f32,
    /// Seconds after a lap ends during which its classification is shown.
    pub fastest_lap_display_delay: f32,
    /// Seconds of session time after entering the car before top speed is recorded.
    pub top_speed_warmup: f32,
    /// Where the average fuel usage is persisted. `None` disables persistence.
    pub fuel_usage_file: Option<PathBuf>,
    /// Maximum wall-clock gap in seconds between consecutive live-reset triggers.
    pub live_reset_window: f32,
}

impl Default for CoreSettings {
    fn default() -> Self {
        Self {
            units: MeasurementUnits::Metric,
            speed_units: SpeedUnits::Kmh,
            race_length_percentage: 1.0,
            fastest_lap_display_delay: 10.0,
            top_speed_warmup: 1.0,
            fuel_usage_file: None,
            live_reset_window: 1.0,
        }
    }
}

impl CoreSettings {
    pub fn units(&self) -> Units {
        Units { measurement: self.units, speed: self.speed_units }
    }

    /// The live-reset window as a [`Duration`].
    ///
    /// Negative, NaN, infinite and overflowing windows are a
    /// [`TelemetryError::Config`].
    pub fn live_reset_duration(&self) -> Result<Duration> {
        Duration::try_from_secs_f32(self.live_reset_window).map_err(|e| {
            TelemetryError::config_error(
                "core settings",
                format!("live_reset_window {}: {e}", self.live_reset_window),
            )
        })
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let settings: Self = parse_yaml(yaml, "core settings")?;
        settings.live_reset_duration()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let settings: Self = load_yaml(path.as_ref(), "core settings")?;
        settings.live_reset_duration()?;
        Ok(settings)
    }
}

/// Engine wear constants from the vehicle's physics descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnginePhysics {
    /// Average engine lifetime in seconds under baseline conditions.
    pub lifetime_average: f32,
    /// Oil temperature (°C) at which wear runs at the baseline rate.
    pub base_lifetime_oil_temperature: f32,
    /// Oil temperature rise (°C) that halves the lifetime.
    pub half_lifetime_oil_temp_offset: f32,
    /// Engine speed (rpm) at which wear runs at the baseline rate.
    pub base_lifetime_rpm: f32,
    /// Engine speed rise (rpm) that halves the lifetime.
    pub half_lifetime_rpm_offset: f32,
    /// Boost mapping with no extra wear.
    pub boost_neutral: f32,
    pub wear_increase_per_boost_step: f32,
    /// Extra wear per m/s of vehicle speed.
    pub wear_increase_per_velocity: f32,
}

impl Default for EnginePhysics {
    fn default() -> Self {
        Self {
            lifetime_average: 9000.0,
            base_lifetime_oil_temperature: 105.0,
            half_lifetime_oil_temp_offset: 12.0,
            base_lifetime_rpm: 17000.0,
            half_lifetime_rpm_offset: 900.0,
            boost_neutral: 5.0,
            wear_increase_per_boost_step: 0.1,
            wear_increase_per_velocity: 0.0,
        }
    }
}

/// Brake constants for one wheel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WheelBrakePhysics {
    /// Lower bound of the optimum temperature band (°C).
    pub optimum_temperature_low: f32,
    /// Upper bound of the optimum temperature band (°C).
    pub optimum_temperature_high: f32,
    /// Distance (°C) outside the band over which torque fades to half.
    pub fade_range: f32,
    /// Brake torque (Nm) at full application inside the optimum band.
    pub max_torque: f32,
    /// Disc thickness lost (m) per unit of brake work.
    pub wear_rate: f32,
    /// Disc thickness (m) at the start of a realtime session.
    pub disc_thickness_start: f32,
    /// Disc thickness (m) at which the brake is worn out.
    pub disc_thickness_min: f32,
}

impl Default for WheelBrakePhysics {
    fn default() -> Self {
        Self {
            optimum_temperature_low: 350.0,
            optimum_temperature_high: 750.0,
            fade_range: 300.0,
            max_torque: 4500.0,
            wear_rate: 2.0e-12,
            disc_thickness_start: 0.032,
            disc_thickness_min: 0.026,
        }
    }
}

impl WheelBrakePhysics {
    pub fn optimum_temperature_mid(&self) -> f32 {
        (self.optimum_temperature_low + self.optimum_temperature_high) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrakePhysics {
    /// Share of brake force on the front axle, `0.0..=1.0`.
    pub front_bias: f32,
    /// Brake pressure setting, `0.0..=1.0`.
    pub pressure: f32,
    pub front_left: WheelBrakePhysics,
    pub front_right: WheelBrakePhysics,
    pub rear_left: WheelBrakePhysics,
    pub rear_right: WheelBrakePhysics,
}

impl Default for BrakePhysics {
    fn default() -> Self {
        Self {
            front_bias: 0.56,
            pressure: 1.0,
            front_left: WheelBrakePhysics::default(),
            front_right: WheelBrakePhysics::default(),
            rear_left: WheelBrakePhysics::default(),
            rear_right: WheelBrakePhysics::default(),
        }
    }
}

impl BrakePhysics {
    pub fn wheel(&self, wheel: Wheel) -> &WheelBrakePhysics {
        match wheel {
            Wheel::FrontLeft => &self.front_left,
            Wheel::FrontRight => &self.front_right,
            Wheel::RearLeft => &self.rear_left,
            Wheel::RearRight => &self.rear_right,
        }
    }

    pub fn wheel_mut(&mut self, wheel: Wheel) -> &mut WheelBrakePhysics {
        match wheel {
            Wheel::FrontLeft => &mut self.front_left,
            Wheel::FrontRight => &mut self.front_right,
            Wheel::RearLeft => &mut self.rear_left,
            Wheel::RearRight => &mut self.rear_right,
        }
    }

    /// Share of the total brake force the given wheel's axle receives.
    pub fn bias_share(&self, wheel: Wheel) -> f32 {
        if wheel.is_front() { self.front_bias } else { 1.0 - self.front_bias }
    }
}

/// Physics constants for the vehicle currently driven.
///
/// Zero half-life offsets, a zero fade range or a zero race length make the
/// wear model divide by zero; supplying them is a caller error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehiclePhysics {
    pub engine: EnginePhysics,
    pub brakes: BrakePhysics,
}

impl VehiclePhysics {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        parse_yaml(yaml, "vehicle physics")
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        load_yaml(path.as_ref(), "vehicle physics")
    }
}

fn parse_yaml<T: DeserializeOwned>(yaml: &str, context: &str) -> Result<T> {
    serde_yaml_ng::from_str(yaml).map_err(|e| TelemetryError::config_error(context, e.to_string()))
}

fn load_yaml<T: DeserializeOwned>(path: &Path, context: &str) -> Result<T> {
    let yaml = std::fs::read_to_string(path)
        .map_err(|e| TelemetryError::file_error(path.to_path_buf(), e))?;
    parse_yaml(&yaml, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn unrepresentable_live_reset_window_is_a_config_error() {
        for yaml in ["live_reset_window: .inf\n", "live_reset_window: -1.0\n", "live_reset_window: 1.0e30\n"] {
            let err = CoreSettings::from_yaml_str(yaml).unwrap_err();
            assert!(matches!(err, TelemetryError::Config { .. }), "{yaml}: {err}");
        }
        let settings = CoreSettings { live_reset_window: 0.25, ..CoreSettings::default() };
        assert_eq!(settings.live_reset_duration().unwrap(), Duration::from_millis(250));
    }

    #[test]
    fn empty_document_yields_defaults() {
        let settings = CoreSettings::from_yaml_str("{}").unwrap();
        assert_eq!(settings, CoreSettings::default());
        assert_eq!(settings.units(), Units::default());
    }

    #[test]
    fn physics_partial_override() {
        let yaml = "
engine:
  lifetime_average: 4000.0
brakes:
  front_bias: 0.6
  rear_left:
    max_torque: 3000.0
";
        let physics = VehiclePhysics::from_yaml_str(yaml).unwrap();
        assert_eq!(physics.engine.lifetime_average, 4000.0);
        assert_eq!(physics.engine.base_lifetime_rpm, EnginePhysics::default().base_lifetime_rpm);
        assert_eq!(physics.brakes.wheel(Wheel::RearLeft).max_torque, 3000.0);
        assert_eq!(physics.brakes.wheel(Wheel::RearRight).max_torque, 4500.0);
        assert!((physics.brakes.bias_share(Wheel::RearRight) - 0.4).abs() < 1e-6);
        assert_eq!(physics.brakes.bias_share(Wheel::FrontLeft), 0.6);
    }

    #[test]
    fn malformed_yaml_is_a_config_error() {
        let err = CoreSettings::from_yaml_str("units: [not, a, unit]").unwrap_err();
        assert!(matches!(err, TelemetryError::Config { .. }));
        assert!(err.to_string().contains("core settings"));
    }

    #[test]
    fn load_reads_file_and_reports_missing_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "units: imperial").unwrap();
        let settings = CoreSettings::load(file.path()).unwrap();
        assert_eq!(settings.units, MeasurementUnits::Imperial);

        let missing = file.path().with_extension("absent");
        assert!(matches!(CoreSettings::load(&missing), Err(TelemetryError::File { .. })));
    }
}
