//! Snapshot fixtures for tests and benchmarks.
//!
//! The builders produce byte images in the host's wire layout so tests can
//! drive the same `load_from_stream` path the host does. Every field that a
//! getter could reject starts out valid: sectors, finish status, vehicle
//! control and surface types all hold known values, and unknown split times
//! hold the host's negative sentinel.

use crate::layout::{scoring as s, telemetry as t, vehicle_scoring as v, wheel as w};
use crate::types::{Vector3, Wheel, codec};

/// Builder for one telemetry block.
#[derive(Debug, Clone)]
pub struct TelemetryBuilder {
    bytes: Vec<u8>,
}

impl Default for TelemetryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryBuilder {
    pub fn new() -> Self {
        Self { bytes: vec![0; t::SIZE] }
    }

    pub fn delta_time(mut self, seconds: f32) -> Self {
        codec::write_f32(&mut self.bytes, t::DELTA_TIME, seconds);
        self
    }

    pub fn lap_number(mut self, lap: i32) -> Self {
        codec::write_i32(&mut self.bytes, t::LAP_NUMBER, lap);
        self
    }

    pub fn vehicle_name(mut self, name: &str) -> Self {
        codec::write_string(&mut self.bytes, t::VEHICLE_NAME, t::NAME_LEN, name);
        self
    }

    pub fn track_name(mut self, name: &str) -> Self {
        codec::write_string(&mut self.bytes, t::TRACK_NAME, t::NAME_LEN, name);
        self
    }

    /// Local velocity in m/s.
    pub fn velocity(mut self, velocity: Vector3) -> Self {
        codec::write_vector3(&mut self.bytes, t::LOCAL_VEL, velocity);
        self
    }

    pub fn engine_rpm(mut self, rpm: f32) -> Self {
        codec::write_f32(&mut self.bytes, t::ENGINE_RPM, rpm);
        self
    }

    /// Oil temperature in °C.
    pub fn oil_temperature(mut self, celsius: f32) -> Self {
        codec::write_f32(&mut self.bytes, t::ENGINE_OIL_TEMP, celsius);
        self
    }

    /// Unfiltered brake pedal, `0.0..=1.0`.
    pub fn brake(mut self, application: f32) -> Self {
        codec::write_f32(&mut self.bytes, t::UNFILTERED_BRAKE, application);
        self
    }

    /// Fuel in liters.
    pub fn fuel(mut self, liters: f32) -> Self {
        codec::write_f32(&mut self.bytes, t::FUEL, liters);
        self
    }

    /// Wheel rotation in rad/s; negative is forward.
    pub fn wheel_rotation(mut self, wheel: Wheel, rotation: f32) -> Self {
        codec::write_f32(&mut self.bytes, w::offset(wheel.index(), w::ROTATION), rotation);
        self
    }

    /// Brake temperature in °C.
    pub fn brake_temperature(mut self, wheel: Wheel, celsius: f32) -> Self {
        codec::write_f32(&mut self.bytes, w::offset(wheel.index(), w::BRAKE_TEMP), celsius);
        self
    }

    /// Center tire temperature in Kelvin.
    pub fn tire_temperature_k(mut self, wheel: Wheel, kelvin: f32) -> Self {
        let center = w::offset(wheel.index(), w::TEMPERATURE) + crate::layout::FLOAT;
        codec::write_f32(&mut self.bytes, center, kelvin);
        self
    }

    pub fn surface(mut self, wheel: Wheel, raw: u8) -> Self {
        codec::write_u8(&mut self.bytes, w::offset(wheel.index(), w::SURFACE_TYPE), raw);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// Builder for one vehicle scoring block.
#[derive(Debug, Clone)]
pub struct VehicleBuilder {
    bytes: Vec<u8>,
}

impl VehicleBuilder {
    /// A local AI competitor in sector 1 with no split times.
    pub fn new(driver_name: &str) -> Self {
        let mut bytes = vec![0; v::SIZE];
        codec::write_string(&mut bytes, v::DRIVER_NAME, v::DRIVER_NAME_LEN, driver_name);
        codec::write_i8(&mut bytes, v::SECTOR, 1);
        codec::write_i8(&mut bytes, v::CONTROL, 1);
        for offset in [
            v::BEST_SECTOR1,
            v::BEST_SECTOR2,
            v::BEST_LAP_TIME,
            v::LAST_SECTOR1,
            v::LAST_SECTOR2,
            v::LAST_LAP_TIME,
            v::CUR_SECTOR1,
            v::CUR_SECTOR2,
        ] {
            codec::write_f32(&mut bytes, offset, -1.0);
        }
        Self { bytes }
    }

    pub fn vehicle_name(mut self, name: &str) -> Self {
        codec::write_string(&mut self.bytes, v::VEHICLE_NAME, v::VEHICLE_NAME_LEN, name);
        self
    }

    /// Raw host sector: 0 is sector 3, 1 and 2 are sectors 1 and 2.
    pub fn sector(mut self, raw: i8) -> Self {
        codec::write_i8(&mut self.bytes, v::SECTOR, raw);
        self
    }

    /// Last lap splits as the host reports them: sector 2 includes sector 1.
    pub fn last_sectors(mut self, s1: f32, s2_cumulative: f32, laptime: f32) -> Self {
        codec::write_f32(&mut self.bytes, v::LAST_SECTOR1, s1);
        codec::write_f32(&mut self.bytes, v::LAST_SECTOR2, s2_cumulative);
        codec::write_f32(&mut self.bytes, v::LAST_LAP_TIME, laptime);
        self
    }

    pub fn current_sectors(mut self, s1: f32, s2_cumulative: f32) -> Self {
        codec::write_f32(&mut self.bytes, v::CUR_SECTOR1, s1);
        codec::write_f32(&mut self.bytes, v::CUR_SECTOR2, s2_cumulative);
        self
    }

    pub fn best_lap(mut self, laptime: f32) -> Self {
        codec::write_f32(&mut self.bytes, v::BEST_LAP_TIME, laptime);
        self
    }

    pub fn laps_completed(mut self, laps: i16) -> Self {
        codec::write_i16(&mut self.bytes, v::TOTAL_LAPS, laps);
        self
    }

    pub fn lap_distance(mut self, meters: f32) -> Self {
        codec::write_f32(&mut self.bytes, v::LAP_DIST, meters);
        self
    }

    pub fn lap_start(mut self, session_time: f32) -> Self {
        codec::write_f32(&mut self.bytes, v::LAP_START_ET, session_time);
        self
    }

    pub fn in_pits(mut self, in_pits: bool) -> Self {
        codec::write_bool(&mut self.bytes, v::IN_PITS, in_pits);
        self
    }

    pub fn finish_status(mut self, raw: i8) -> Self {
        codec::write_i8(&mut self.bytes, v::FINISH_STATUS, raw);
        self
    }

    pub fn control(mut self, raw: i8) -> Self {
        codec::write_i8(&mut self.bytes, v::CONTROL, raw);
        self
    }

    pub fn place(mut self, place: u8) -> Self {
        codec::write_u8(&mut self.bytes, v::PLACE, place);
        self
    }

    /// Local velocity in m/s.
    pub fn velocity(mut self, velocity: Vector3) -> Self {
        codec::write_vector3(&mut self.bytes, v::LOCAL_VEL, velocity);
        self
    }

    /// Mark as the local player's vehicle.
    pub fn player(mut self) -> Self {
        codec::write_bool(&mut self.bytes, v::IS_PLAYER, true);
        codec::write_i8(&mut self.bytes, v::CONTROL, 0);
        self
    }

    pub fn build(self) -> Vec<u8> {
        self.bytes
    }
}

/// Builder for a complete scoring update: the base block followed by one
/// block per added vehicle.
#[derive(Debug, Clone)]
pub struct ScoringBuilder {
    bytes: Vec<u8>,
    vehicles: Vec<VehicleBuilder>,
}

impl Default for ScoringBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoringBuilder {
    /// A practice session on a 1000 m track.
    pub fn new() -> Self {
        let mut bytes = vec![0; s::SIZE];
        codec::write_i32(&mut bytes, s::SESSION, 1);
        codec::write_f32(&mut bytes, s::LAP_DIST, 1000.0);
        Self { bytes, vehicles: Vec::new() }
    }

    pub fn track_name(mut self, name: &str) -> Self {
        codec::write_string(&mut self.bytes, s::TRACK_NAME, s::TRACK_NAME_LEN, name);
        self
    }

    pub fn session(mut self, raw: i32) -> Self {
        codec::write_i32(&mut self.bytes, s::SESSION, raw);
        self
    }

    pub fn current_time(mut self, seconds: f32) -> Self {
        codec::write_f32(&mut self.bytes, s::CURRENT_ET, seconds);
        self
    }

    pub fn track_length(mut self, meters: f32) -> Self {
        codec::write_f32(&mut self.bytes, s::LAP_DIST, meters);
        self
    }

    pub fn game_phase(mut self, raw: u8) -> Self {
        codec::write_u8(&mut self.bytes, s::GAME_PHASE, raw);
        self
    }

    pub fn in_realtime(mut self, in_realtime: bool) -> Self {
        codec::write_bool(&mut self.bytes, s::IN_REALTIME, in_realtime);
        self
    }

    pub fn ambient_temperature(mut self, celsius: f32) -> Self {
        codec::write_f32(&mut self.bytes, s::AMBIENT_TEMP, celsius);
        self
    }

    pub fn vehicle(mut self, vehicle: VehicleBuilder) -> Self {
        self.vehicles.push(vehicle);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut bytes = self.bytes;
        let count = i32::try_from(self.vehicles.len()).unwrap_or(i32::MAX);
        codec::write_i32(&mut bytes, s::NUM_VEHICLES, count);
        for vehicle in self.vehicles {
            bytes.extend(vehicle.build());
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoring_image_has_base_and_vehicle_blocks() {
        let bytes = ScoringBuilder::new()
            .vehicle(VehicleBuilder::new("Alice"))
            .vehicle(VehicleBuilder::new("Bob"))
            .build();
        assert_eq!(bytes.len(), s::SIZE + 2 * v::SIZE);
        assert_eq!(codec::read_i32(&bytes, s::NUM_VEHICLES), 2);
        assert_eq!(codec::read_string(&bytes, s::SIZE + v::SIZE + v::DRIVER_NAME, v::DRIVER_NAME_LEN), "Bob");
    }

    #[test]
    fn vehicle_defaults_are_unknown_times() {
        let bytes = VehicleBuilder::new("Alice").build();
        assert_eq!(codec::read_f32(&bytes, v::LAST_LAP_TIME), -1.0);
        assert_eq!(codec::read_i8(&bytes, v::SECTOR), 1);
    }
}
