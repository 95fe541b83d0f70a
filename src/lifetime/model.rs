//! Engine and brake wear model.

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::config::{EnginePhysics, VehiclePhysics, WheelBrakePhysics};
use crate::data::TelemetryData;
use crate::types::{KELVIN_OFFSET, Wheel};

/// Torque factor beyond the fade range.
const FADE_FLOOR: f32 = 0.5;

/// Per-wheel inputs of the brake wear model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WheelSample {
    /// Wheel rotation in rad/s; negative is forward.
    pub rotation: f32,
    pub brake_temperature_c: f32,
}

/// Telemetry values one integration step reads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct WearSample {
    /// Seconds since the previous telemetry update.
    pub delta_time: f32,
    pub oil_temperature_c: f32,
    pub rpm: f32,
    /// Engine boost mapping selected by the driver.
    pub boost: f32,
    pub speed_ms: f32,
    /// Brake pedal application, `0.0..=1.0`.
    pub brake_application: f32,
    pub wheels: [WheelSample; 4],
}

impl WearSample {
    pub fn from_telemetry(telemetry: &TelemetryData, boost: f32) -> Self {
        Self {
            delta_time: telemetry.delta_time(),
            oil_temperature_c: telemetry.engine_oil_temperature_c(),
            rpm: telemetry.engine_rpm(),
            boost,
            speed_ms: telemetry.scalar_velocity_ms(),
            brake_application: telemetry.unfiltered_brake(),
            wheels: Wheel::ALL.map(|wheel| WheelSample {
                rotation: telemetry.wheel_rotation(wheel),
                brake_temperature_c: telemetry.brake_temperature_c(wheel),
            }),
        }
    }

    pub fn wheel(&self, wheel: Wheel) -> &WheelSample {
        &self.wheels[wheel.index()]
    }
}

/// Remaining engine lifetime and brake disc thicknesses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WearState {
    /// Seconds of baseline running left.
    pub engine_lifetime: f32,
    /// Meters, in [`Wheel::ALL`] order.
    pub brake_disc_thickness: [f32; 4],
}

impl WearState {
    /// A fresh engine and new discs.
    pub fn seeded(physics: &VehiclePhysics) -> Self {
        Self {
            engine_lifetime: physics.engine.lifetime_average,
            brake_disc_thickness: Wheel::ALL
                .map(|wheel| physics.brakes.wheel(wheel).disc_thickness_start),
        }
    }

    pub fn disc_thickness(&self, wheel: Wheel) -> f32 {
        self.brake_disc_thickness[wheel.index()]
    }
}

/// Lifetime consumed per second of running, relative to baseline conditions.
pub fn engine_wear_rate(engine: &EnginePhysics, sample: &WearSample) -> f32 {
    let oil = 2f32.powf(
        (sample.oil_temperature_c - engine.base_lifetime_oil_temperature)
            / engine.half_lifetime_oil_temp_offset,
    );
    let rpm = 2f32.powf((sample.rpm - engine.base_lifetime_rpm) / engine.half_lifetime_rpm_offset);
    let boost = 1.0 + (sample.boost - engine.boost_neutral) * engine.wear_increase_per_boost_step;
    let velocity = 1.0 + sample.speed_ms * engine.wear_increase_per_velocity;
    (oil + rpm) / 2.0 * boost * velocity
}

/// Share of the maximum torque a brake delivers at `temperature_c`.
///
/// Full torque inside the optimum band, fading along a half cosine to
/// [`FADE_FLOOR`] over `fade_range` degrees on either side.
pub fn brake_fade_factor(brake: &WheelBrakePhysics, temperature_c: f32) -> f32 {
    let distance = if temperature_c < brake.optimum_temperature_low {
        brake.optimum_temperature_low - temperature_c
    } else if temperature_c > brake.optimum_temperature_high {
        temperature_c - brake.optimum_temperature_high
    } else {
        return 1.0;
    };
    if distance >= brake.fade_range {
        return FADE_FLOOR;
    }
    0.75 + 0.25 * (PI * distance / brake.fade_range).cos()
}

/// Disc thickness lost per second at full race length.
///
/// Only forward wheel rotation (negative on the host) wears the disc; a wheel
/// rolling backwards or standing still contributes nothing.
pub fn brake_wear_rate(physics: &VehiclePhysics, wheel: Wheel, sample: &WearSample) -> f32 {
    let brake = physics.brakes.wheel(wheel);
    let input = sample.wheel(wheel);
    let torque = brake.max_torque * brake_fade_factor(brake, input.brake_temperature_c);
    let temperature = input.brake_temperature_c + KELVIN_OFFSET;
    let optimum = brake.optimum_temperature_mid() + KELVIN_OFFSET;
    let temperature_ratio = (temperature / optimum).powi(3);

    torque
        * physics.brakes.bias_share(wheel)
        * sample.brake_application
        * physics.brakes.pressure
        * (-input.rotation).max(0.0)
        * brake.wear_rate
        * temperature_ratio
}

/// Advance `state` by one explicit Euler step.
///
/// Rates come from `previous` only; `current` supplies the step length. A
/// zero `delta_time` returns `state` unchanged. `race_length` must be positive.
pub fn integrate(
    state: &WearState,
    previous: &WearSample,
    current: &WearSample,
    physics: &VehiclePhysics,
    race_length: f32,
) -> WearState {
    let dt = current.delta_time;
    let mut next = *state;
    next.engine_lifetime -= dt * engine_wear_rate(&physics.engine, previous);
    for wheel in Wheel::ALL {
        next.brake_disc_thickness[wheel.index()] -=
            dt * brake_wear_rate(physics, wheel, previous) / race_length;
    }
    next
}
