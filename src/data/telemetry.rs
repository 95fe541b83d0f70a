//! Player vehicle telemetry.

use crate::capsule::TelemetryCapsule;
use crate::config::Units;
use crate::layout::{telemetry as t, wheel as w};
use crate::types::{SurfaceType, Vector3, Wheel, meters_per_second_to_kmh};
use crate::Result;

use super::UpdateState;

/// Tire temperature sample position across the tread.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TireTemperaturePart {
    Left,
    Center,
    Right,
}

/// Decoded `TelemInfoV2` for the vehicle the player is in.
#[derive(Debug)]
pub struct TelemetryData {
    capsule: TelemetryCapsule,
    units: Units,
    pub(crate) update: UpdateState,
}

impl TelemetryData {
    pub fn new(units: Units) -> Self {
        Self { capsule: TelemetryCapsule::new(), units, update: UpdateState::default() }
    }

    /// No bookkeeping is needed before a telemetry write.
    pub fn prepare_update(&mut self) {}

    pub fn capsule(&self) -> &TelemetryCapsule {
        &self.capsule
    }

    pub fn buffer_mut(&mut self) -> &mut [u8] {
        self.capsule.buffer_mut()
    }

    pub fn load_from_stream<R: std::io::Read + ?Sized>(&mut self, reader: &mut R) -> Result<()> {
        self.capsule.load_from_stream(reader)
    }

    pub fn update_state(&self) -> &UpdateState {
        &self.update
    }

    pub fn units(&self) -> Units {
        self.units
    }

    /// Seconds since the previous telemetry tick.
    pub fn delta_time(&self) -> f32 {
        self.capsule.f32_at(t::DELTA_TIME)
    }

    /// Current lap number, counting from 1 once the first line is crossed.
    pub fn lap_number(&self) -> i32 {
        self.capsule.i32_at(t::LAP_NUMBER)
    }

    /// Session time at which the current lap started.
    pub fn lap_start_time(&self) -> f32 {
        self.capsule.f32_at(t::LAP_START_ET)
    }

    pub fn vehicle_name(&self) -> String {
        self.capsule.string_at(t::VEHICLE_NAME, t::NAME_LEN)
    }

    pub fn track_name(&self) -> String {
        self.capsule.string_at(t::TRACK_NAME, t::NAME_LEN)
    }

    /// World position in meters.
    pub fn position(&self) -> Vector3 {
        self.capsule.vector3_at(t::POS)
    }

    /// Velocity in m/s, in the vehicle's local frame.
    pub fn local_velocity(&self) -> Vector3 {
        self.capsule.vector3_at(t::LOCAL_VEL)
    }

    pub fn local_acceleration(&self) -> Vector3 {
        self.capsule.vector3_at(t::LOCAL_ACCEL)
    }

    /// Rows of the world orientation matrix.
    pub fn orientation(&self) -> [Vector3; 3] {
        [
            self.capsule.vector3_at(t::ORI_X),
            self.capsule.vector3_at(t::ORI_Y),
            self.capsule.vector3_at(t::ORI_Z),
        ]
    }

    pub fn local_rotation(&self) -> Vector3 {
        self.capsule.vector3_at(t::LOCAL_ROT)
    }

    pub fn local_rotation_acceleration(&self) -> Vector3 {
        self.capsule.vector3_at(t::LOCAL_ROT_ACCEL)
    }

    pub fn scalar_velocity_ms(&self) -> f32 {
        self.local_velocity().length()
    }

    pub fn scalar_velocity_kmh(&self) -> f32 {
        meters_per_second_to_kmh(self.scalar_velocity_ms())
    }

    /// Speed in the configured speed unit.
    pub fn scalar_velocity(&self) -> f32 {
        self.units.speed.from_meters_per_second(self.scalar_velocity_ms())
    }

    /// -1 = reverse, 0 = neutral.
    pub fn current_gear(&self) -> i32 {
        self.capsule.i32_at(t::GEAR)
    }

    pub fn engine_rpm(&self) -> f32 {
        self.capsule.f32_at(t::ENGINE_RPM)
    }

    pub fn engine_max_rpm(&self) -> f32 {
        self.capsule.f32_at(t::ENGINE_MAX_RPM)
    }

    pub fn clutch_rpm(&self) -> f32 {
        self.capsule.f32_at(t::CLUTCH_RPM)
    }

    pub fn engine_water_temperature_c(&self) -> f32 {
        self.capsule.f32_at(t::ENGINE_WATER_TEMP)
    }

    pub fn engine_water_temperature(&self) -> f32 {
        self.units.measurement.temperature_from_celsius(self.engine_water_temperature_c())
    }

    pub fn engine_oil_temperature_c(&self) -> f32 {
        self.capsule.f32_at(t::ENGINE_OIL_TEMP)
    }

    pub fn engine_oil_temperature(&self) -> f32 {
        self.units.measurement.temperature_from_celsius(self.engine_oil_temperature_c())
    }

    pub fn unfiltered_throttle(&self) -> f32 {
        self.capsule.f32_at(t::UNFILTERED_THROTTLE)
    }

    pub fn unfiltered_brake(&self) -> f32 {
        self.capsule.f32_at(t::UNFILTERED_BRAKE)
    }

    pub fn unfiltered_steering(&self) -> f32 {
        self.capsule.f32_at(t::UNFILTERED_STEERING)
    }

    pub fn unfiltered_clutch(&self) -> f32 {
        self.capsule.f32_at(t::UNFILTERED_CLUTCH)
    }

    pub fn steering_arm_force(&self) -> f32 {
        self.capsule.f32_at(t::STEERING_ARM_FORCE)
    }

    pub fn fuel_liters(&self) -> f32 {
        self.capsule.f32_at(t::FUEL)
    }

    /// Fuel in the configured volume unit.
    pub fn fuel(&self) -> f32 {
        self.units.measurement.volume_from_liters(self.fuel_liters())
    }

    pub fn scheduled_pitstops(&self) -> u8 {
        self.capsule.u8_at(t::SCHEDULED_STOPS)
    }

    pub fn is_overheating(&self) -> bool {
        self.capsule.bool_at(t::OVERHEATING)
    }

    pub fn is_any_part_detached(&self) -> bool {
        self.capsule.bool_at(t::DETACHED)
    }

    /// Dent severity (0 none, 1 some, 2 more) at one of eight body locations.
    ///
    /// # Panics
    ///
    /// Panics if `location >= 8`.
    pub fn dent_severity(&self, location: usize) -> u8 {
        assert!(location < t::DENT_SEVERITY_COUNT, "dent location {location} out of range");
        self.capsule.u8_at(t::DENT_SEVERITY + location)
    }

    pub fn last_impact_time(&self) -> f32 {
        self.capsule.f32_at(t::LAST_IMPACT_ET)
    }

    pub fn last_impact_magnitude(&self) -> f32 {
        self.capsule.f32_at(t::LAST_IMPACT_MAGNITUDE)
    }

    pub fn last_impact_position(&self) -> Vector3 {
        self.capsule.vector3_at(t::LAST_IMPACT_POS)
    }

    /// Wheel rotation in rad/s; negative while rolling forward.
    pub fn wheel_rotation(&self, wheel: Wheel) -> f32 {
        self.capsule.f32_at(w::offset(wheel.index(), w::ROTATION))
    }

    pub fn suspension_deflection(&self, wheel: Wheel) -> f32 {
        self.capsule.f32_at(w::offset(wheel.index(), w::SUSPENSION_DEFLECTION))
    }

    pub fn ride_height(&self, wheel: Wheel) -> f32 {
        self.capsule.f32_at(w::offset(wheel.index(), w::RIDE_HEIGHT))
    }

    /// Tire load in Newtons.
    pub fn tire_load(&self, wheel: Wheel) -> f32 {
        self.capsule.f32_at(w::offset(wheel.index(), w::TIRE_LOAD))
    }

    pub fn lateral_force(&self, wheel: Wheel) -> f32 {
        self.capsule.f32_at(w::offset(wheel.index(), w::LATERAL_FORCE))
    }

    pub fn grip_fraction(&self, wheel: Wheel) -> f32 {
        self.capsule.f32_at(w::offset(wheel.index(), w::GRIP_FRACT))
    }

    pub fn brake_temperature_c(&self, wheel: Wheel) -> f32 {
        self.capsule.f32_at(w::offset(wheel.index(), w::BRAKE_TEMP))
    }

    pub fn brake_temperature(&self, wheel: Wheel) -> f32 {
        self.units.measurement.temperature_from_celsius(self.brake_temperature_c(wheel))
    }

    /// Tire pressure in kPa.
    pub fn tire_pressure(&self, wheel: Wheel) -> f32 {
        self.capsule.f32_at(w::offset(wheel.index(), w::PRESSURE))
    }

    pub fn tire_temperature_k(&self, wheel: Wheel, part: TireTemperaturePart) -> f32 {
        let index = match part {
            TireTemperaturePart::Left => 0,
            TireTemperaturePart::Center => 1,
            TireTemperaturePart::Right => 2,
        };
        self.capsule.f32_at(w::offset(wheel.index(), w::TEMPERATURE) + index * 4)
    }

    pub fn tire_temperature(&self, wheel: Wheel, part: TireTemperaturePart) -> f32 {
        self.units.measurement.temperature_from_kelvin(self.tire_temperature_k(wheel, part))
    }

    /// Tire wear as a fraction of the maximum.
    pub fn tire_wear(&self, wheel: Wheel) -> f32 {
        self.capsule.f32_at(w::offset(wheel.index(), w::WEAR))
    }

    pub fn terrain_name(&self, wheel: Wheel) -> String {
        self.capsule.string_at(w::offset(wheel.index(), w::TERRAIN_NAME), w::TERRAIN_NAME_LEN)
    }

    pub fn surface_type(&self, wheel: Wheel) -> Result<SurfaceType> {
        SurfaceType::from_raw(self.capsule.u8_at(w::offset(wheel.index(), w::SURFACE_TYPE)))
    }

    pub fn is_wheel_flat(&self, wheel: Wheel) -> bool {
        self.capsule.bool_at(w::offset(wheel.index(), w::FLAT))
    }

    pub fn is_wheel_detached(&self, wheel: Wheel) -> bool {
        self.capsule.bool_at(w::offset(wheel.index(), w::DETACHED))
    }
}
