//! Per-competitor scoring.

use crate::capsule::VehicleScoringCapsule;
use crate::config::Units;
use crate::layout::vehicle_scoring as v;
use crate::types::{FinishStatus, Sector, Vector3, VehicleControl, meters_per_second_to_kmh};
use crate::Result;

/// Converts a host time that uses a negative value for "not yet set".
fn known_time(value: f32) -> Option<f32> {
    (value > 0.0).then_some(value)
}

/// Decoded `VehicleScoringInfoV2` for one competitor slot.
///
/// Slots are reused between updates, so a competitor is identified by
/// [`driver_name`](Self::driver_name) rather than by slot index.
#[derive(Debug)]
pub struct VehicleScoringInfo {
    capsule: VehicleScoringCapsule,
    units: Units,
}

impl VehicleScoringInfo {
    pub fn new(units: Units) -> Self {
        Self { capsule: VehicleScoringCapsule::new(), units }
    }

    pub fn capsule(&self) -> &VehicleScoringCapsule {
        &self.capsule
    }

    pub fn buffer_mut(&mut self) -> &mut [u8] {
        self.capsule.buffer_mut()
    }

    pub fn load_from_stream<R: std::io::Read + ?Sized>(&mut self, reader: &mut R) -> Result<()> {
        self.capsule.load_from_stream(reader)
    }

    pub fn driver_name(&self) -> String {
        self.capsule.string_at(v::DRIVER_NAME, v::DRIVER_NAME_LEN)
    }

    pub fn vehicle_name(&self) -> String {
        self.capsule.string_at(v::VEHICLE_NAME, v::VEHICLE_NAME_LEN)
    }

    pub fn vehicle_class(&self) -> String {
        self.capsule.string_at(v::VEHICLE_CLASS, v::VEHICLE_CLASS_LEN)
    }

    /// Laps completed so far.
    pub fn laps_completed(&self) -> i32 {
        i32::from(self.capsule.i16_at(v::TOTAL_LAPS))
    }

    /// The lap currently being driven, `laps_completed() + 1`.
    pub fn current_lap(&self) -> i32 {
        self.laps_completed() + 1
    }

    pub fn sector(&self) -> Result<Sector> {
        Sector::from_raw(self.capsule.i8_at(v::SECTOR))
    }

    pub fn finish_status(&self) -> Result<FinishStatus> {
        FinishStatus::from_raw(self.capsule.i8_at(v::FINISH_STATUS))
    }

    /// Distance in meters from the start line along the racing line.
    pub fn lap_distance(&self) -> f32 {
        self.capsule.f32_at(v::LAP_DIST)
    }

    pub fn path_lateral(&self) -> f32 {
        self.capsule.f32_at(v::PATH_LATERAL)
    }

    pub fn track_edge(&self) -> f32 {
        self.capsule.f32_at(v::TRACK_EDGE)
    }

    pub fn best_sector1(&self) -> Option<f32> {
        known_time(self.capsule.f32_at(v::BEST_SECTOR1))
    }

    /// Best sector 2 split, including sector 1.
    pub fn best_sector2_cumulative(&self) -> Option<f32> {
        known_time(self.capsule.f32_at(v::BEST_SECTOR2))
    }

    pub fn best_lap_time(&self) -> Option<f32> {
        known_time(self.capsule.f32_at(v::BEST_LAP_TIME))
    }

    pub fn last_sector1(&self) -> Option<f32> {
        known_time(self.capsule.f32_at(v::LAST_SECTOR1))
    }

    /// Sector 2 split of the last lap, including sector 1.
    pub fn last_sector2_cumulative(&self) -> Option<f32> {
        known_time(self.capsule.f32_at(v::LAST_SECTOR2))
    }

    pub fn last_lap_time(&self) -> Option<f32> {
        known_time(self.capsule.f32_at(v::LAST_LAP_TIME))
    }

    pub fn current_sector1(&self) -> Option<f32> {
        known_time(self.capsule.f32_at(v::CUR_SECTOR1))
    }

    /// Sector 2 split of the current lap, including sector 1.
    pub fn current_sector2_cumulative(&self) -> Option<f32> {
        known_time(self.capsule.f32_at(v::CUR_SECTOR2))
    }

    pub fn num_pitstops(&self) -> i16 {
        self.capsule.i16_at(v::NUM_PITSTOPS)
    }

    pub fn num_outstanding_penalties(&self) -> i16 {
        self.capsule.i16_at(v::NUM_PENALTIES)
    }

    pub fn is_player(&self) -> bool {
        self.capsule.bool_at(v::IS_PLAYER)
    }

    pub fn control(&self) -> Result<VehicleControl> {
        VehicleControl::from_raw(self.capsule.i8_at(v::CONTROL))
    }

    /// Whether the vehicle is on pit road.
    pub fn is_in_pits(&self) -> bool {
        self.capsule.bool_at(v::IN_PITS)
    }

    /// 1-based position.
    pub fn place(&self) -> u8 {
        self.capsule.u8_at(v::PLACE)
    }

    pub fn time_behind_next(&self) -> f32 {
        self.capsule.f32_at(v::TIME_BEHIND_NEXT)
    }

    pub fn laps_behind_next(&self) -> i32 {
        self.capsule.i32_at(v::LAPS_BEHIND_NEXT)
    }

    pub fn time_behind_leader(&self) -> f32 {
        self.capsule.f32_at(v::TIME_BEHIND_LEADER)
    }

    pub fn laps_behind_leader(&self) -> i32 {
        self.capsule.i32_at(v::LAPS_BEHIND_LEADER)
    }

    /// Session time at which the current lap started.
    pub fn lap_start_time(&self) -> f32 {
        self.capsule.f32_at(v::LAP_START_ET)
    }

    pub fn position(&self) -> Vector3 {
        self.capsule.vector3_at(v::POS)
    }

    pub fn local_velocity(&self) -> Vector3 {
        self.capsule.vector3_at(v::LOCAL_VEL)
    }

    pub fn local_acceleration(&self) -> Vector3 {
        self.capsule.vector3_at(v::LOCAL_ACCEL)
    }

    pub fn orientation(&self) -> [Vector3; 3] {
        [
            self.capsule.vector3_at(v::ORI_X),
            self.capsule.vector3_at(v::ORI_Y),
            self.capsule.vector3_at(v::ORI_Z),
        ]
    }

    pub fn local_rotation(&self) -> Vector3 {
        self.capsule.vector3_at(v::LOCAL_ROT)
    }

    pub fn local_rotation_acceleration(&self) -> Vector3 {
        self.capsule.vector3_at(v::LOCAL_ROT_ACCEL)
    }

    pub fn scalar_velocity_ms(&self) -> f32 {
        self.local_velocity().length()
    }

    pub fn scalar_velocity_kmh(&self) -> f32 {
        meters_per_second_to_kmh(self.scalar_velocity_ms())
    }

    pub fn scalar_velocity(&self) -> f32 {
        self.units.speed.from_meters_per_second(self.scalar_velocity_ms())
    }

    /// Laps completed plus the fraction of the current lap driven.
    ///
    /// `track_length` must be positive.
    pub fn lap_position(&self, track_length: f32) -> f32 {
        self.laps_completed() as f32 + self.lap_distance() / track_length
    }
}
