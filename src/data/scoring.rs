//! Session scoring and the per-competitor stint tracker.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::capsule::{ScoringCapsule, read_full};
use crate::config::Units;
use crate::layout::{scoring as s, vehicle_scoring};
use crate::types::{GamePhase, Sector, SessionType, Vector3, YellowFlagState};
use crate::{Result, TelemetryError};

use super::{UpdateState, VehicleScoringInfo};

/// Where a competitor's current stint began.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StintState {
    /// Lap position (laps completed plus fraction) at stint start.
    pub start_position: f32,
    /// Lap number being driven when the stint started.
    pub start_lap: i32,
    was_in_pits: bool,
}

/// Decoded `ScoringInfoV2` plus one [`VehicleScoringInfo`] per competitor.
#[derive(Debug)]
pub struct ScoringInfo {
    capsule: ScoringCapsule,
    units: Units,
    vehicles: Vec<VehicleScoringInfo>,
    stints: HashMap<String, StintState>,
    pub(crate) update: UpdateState,
}

impl ScoringInfo {
    pub fn new(units: Units) -> Self {
        Self {
            capsule: ScoringCapsule::new(),
            units,
            vehicles: Vec::new(),
            stints: HashMap::new(),
            update: UpdateState::default(),
        }
    }

    /// Size the vehicle list for the vehicle count in the base block.
    ///
    /// Called after the base block is written and before the vehicle blocks are.
    /// A count above [`MAX_VEHICLES`](s::MAX_VEHICLES) is a decode error and
    /// leaves the list untouched.
    pub fn prepare_update(&mut self) -> Result<()> {
        let count = self.checked_num_vehicles()?;
        self.resize_vehicles(count);
        Ok(())
    }

    fn resize_vehicles(&mut self, count: usize) {
        if count != self.vehicles.len() {
            trace!(from = self.vehicles.len(), to = count, "Resizing vehicle scoring slots");
            let units = self.units;
            self.vehicles.resize_with(count, || VehicleScoringInfo::new(units));
        }
    }

    fn checked_num_vehicles(&self) -> Result<usize> {
        let raw = self.capsule.i32_at(s::NUM_VEHICLES);
        let count = usize::try_from(raw).unwrap_or(0);
        if count > s::MAX_VEHICLES {
            return Err(TelemetryError::out_of_range("mNumVehicles", raw));
        }
        Ok(count)
    }

    pub fn capsule(&self) -> &ScoringCapsule {
        &self.capsule
    }

    pub fn buffer_mut(&mut self) -> &mut [u8] {
        self.capsule.buffer_mut()
    }

    /// Buffer of vehicle slot `index`; valid after [`prepare_update`](Self::prepare_update).
    pub fn vehicle_buffer_mut(&mut self, index: usize) -> Option<&mut [u8]> {
        self.vehicles.get_mut(index).map(VehicleScoringInfo::buffer_mut)
    }

    /// Read the base block followed by one vehicle block per announced vehicle.
    ///
    /// The vehicle blocks are read in full before any slot is resized, so a
    /// truncated stream leaves the previous vehicle list in place.
    pub fn load_from_stream<R: std::io::Read + ?Sized>(&mut self, reader: &mut R) -> Result<()> {
        self.capsule.load_from_stream(reader)?;
        let count = self.checked_num_vehicles()?;
        let mut blocks = vec![0u8; count * vehicle_scoring::SIZE];
        read_full(reader, &mut blocks, "vehicle scoring")?;

        self.resize_vehicles(count);
        for (vehicle, block) in self.vehicles.iter_mut().zip(blocks.chunks_exact(vehicle_scoring::SIZE)) {
            vehicle.buffer_mut().copy_from_slice(block);
        }
        Ok(())
    }

    /// Bytes a complete scoring update occupies on the stream.
    pub fn stream_len(&self) -> usize {
        s::SIZE + self.num_vehicles() * vehicle_scoring::SIZE
    }

    pub fn update_state(&self) -> &UpdateState {
        &self.update
    }

    /// Bring stint starts up to date with the freshly decoded vehicles.
    ///
    /// A stint starts when a competitor is first seen and whenever it leaves
    /// pit road.
    pub(crate) fn refresh_stints(&mut self) {
        let track_length = self.track_length();
        for vehicle in &self.vehicles {
            let in_pits = vehicle.is_in_pits();
            let position = vehicle.lap_position(track_length);
            let stint = self.stints.entry(vehicle.driver_name()).or_insert_with(|| StintState {
                start_position: position,
                start_lap: vehicle.current_lap(),
                was_in_pits: in_pits,
            });
            if stint.was_in_pits && !in_pits {
                debug!(lap = vehicle.current_lap(), "Competitor left pit road, new stint");
                stint.start_position = position;
                stint.start_lap = vehicle.current_lap();
            }
            stint.was_in_pits = in_pits;
        }
    }

    pub(crate) fn reset_stints(&mut self) {
        self.stints.clear();
    }

    pub fn stint(&self, vehicle: &VehicleScoringInfo) -> Option<&StintState> {
        self.stints.get(&vehicle.driver_name())
    }

    /// Laps driven since the competitor's stint started; zero if unknown.
    pub fn stint_length(&self, vehicle: &VehicleScoringInfo) -> f32 {
        self.stint(vehicle)
            .map_or(0.0, |stint| vehicle.lap_position(self.track_length()) - stint.start_position)
    }

    pub fn stint_start_lap(&self, vehicle: &VehicleScoringInfo) -> Option<i32> {
        self.stint(vehicle).map(|stint| stint.start_lap)
    }

    pub fn track_name(&self) -> String {
        self.capsule.string_at(s::TRACK_NAME, s::TRACK_NAME_LEN)
    }

    pub fn session_type(&self) -> Result<SessionType> {
        SessionType::from_raw(self.capsule.i32_at(s::SESSION))
    }

    pub fn is_race_session(&self) -> Result<bool> {
        Ok(self.session_type()?.is_race())
    }

    /// Session time in seconds.
    pub fn current_time(&self) -> f32 {
        self.capsule.f32_at(s::CURRENT_ET)
    }

    /// Scheduled session end time in seconds.
    pub fn end_time(&self) -> f32 {
        self.capsule.f32_at(s::END_ET)
    }

    pub fn max_laps(&self) -> i32 {
        self.capsule.i32_at(s::MAX_LAPS)
    }

    /// Track length in meters.
    pub fn track_length(&self) -> f32 {
        self.capsule.f32_at(s::LAP_DIST)
    }

    /// Announced vehicle count; negative counts read as zero.
    pub fn num_vehicles(&self) -> usize {
        usize::try_from(self.capsule.i32_at(s::NUM_VEHICLES)).unwrap_or(0)
    }

    pub fn game_phase(&self) -> Result<GamePhase> {
        GamePhase::from_raw(self.capsule.u8_at(s::GAME_PHASE))
    }

    pub fn yellow_flag_state(&self) -> Result<YellowFlagState> {
        YellowFlagState::from_raw(self.capsule.i8_at(s::YELLOW_FLAG_STATE))
    }

    /// Whether a local yellow is out in `sector`.
    ///
    /// The flags are indexed like the vehicle sector field: slot 0 is sector 3.
    pub fn is_sector_yellow(&self, sector: Sector) -> bool {
        let index = match sector {
            Sector::Sector3 => 0,
            Sector::Sector1 => 1,
            Sector::Sector2 => 2,
        };
        self.capsule.i8_at(s::SECTOR_FLAG + index) != 0
    }

    pub fn start_light(&self) -> u8 {
        self.capsule.u8_at(s::START_LIGHT)
    }

    pub fn num_red_lights(&self) -> u8 {
        self.capsule.u8_at(s::NUM_RED_LIGHTS)
    }

    /// Whether the host reports the player as driving.
    pub fn is_in_realtime(&self) -> bool {
        self.capsule.bool_at(s::IN_REALTIME)
    }

    pub fn player_name(&self) -> String {
        self.capsule.string_at(s::PLAYER_NAME, s::PLAYER_NAME_LEN)
    }

    pub fn player_file_name(&self) -> String {
        self.capsule.string_at(s::PLR_FILE_NAME, s::PLR_FILE_NAME_LEN)
    }

    pub fn cloud_darkness(&self) -> f32 {
        self.capsule.f32_at(s::DARK_CLOUD)
    }

    pub fn raining_severity(&self) -> f32 {
        self.capsule.f32_at(s::RAINING)
    }

    pub fn ambient_temperature(&self) -> f32 {
        self.units.measurement.temperature_from_celsius(self.capsule.f32_at(s::AMBIENT_TEMP))
    }

    pub fn track_temperature(&self) -> f32 {
        self.units.measurement.temperature_from_celsius(self.capsule.f32_at(s::TRACK_TEMP))
    }

    pub fn wind_speed(&self) -> Vector3 {
        self.capsule.vector3_at(s::WIND)
    }

    pub fn on_path_wetness(&self) -> f32 {
        self.capsule.f32_at(s::ON_PATH_WETNESS)
    }

    pub fn off_path_wetness(&self) -> f32 {
        self.capsule.f32_at(s::OFF_PATH_WETNESS)
    }

    pub fn vehicles(&self) -> &[VehicleScoringInfo] {
        &self.vehicles
    }

    pub fn vehicle(&self, index: usize) -> Option<&VehicleScoringInfo> {
        self.vehicles.get(index)
    }

    pub fn player_vehicle(&self) -> Option<&VehicleScoringInfo> {
        self.vehicles.iter().find(|v| v.is_player())
    }

    pub fn vehicle_by_driver(&self, driver_name: &str) -> Option<&VehicleScoringInfo> {
        self.vehicles.iter().find(|v| v.driver_name() == driver_name)
    }

    /// The competitor in first place.
    pub fn leader(&self) -> Option<&VehicleScoringInfo> {
        self.vehicles.iter().find(|v| v.place() == 1)
    }
}
