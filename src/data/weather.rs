//! Weather conditions.

use crate::capsule::WeatherCapsule;
use crate::config::Units;
use crate::layout::weather as w;
use crate::types::Vector3;
use crate::Result;

use super::UpdateState;

/// Decoded weather block.
#[derive(Debug)]
pub struct WeatherInfo {
    capsule: WeatherCapsule,
    units: Units,
    pub(crate) update: UpdateState,
}

impl WeatherInfo {
    pub fn new(units: Units) -> Self {
        Self { capsule: WeatherCapsule::new(), units, update: UpdateState::default() }
    }

    pub fn prepare_update(&mut self) {}

    pub fn capsule(&self) -> &WeatherCapsule {
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

    /// Cloud darkness, `0.0..=1.0`.
    pub fn cloud_darkness(&self) -> f32 {
        self.capsule.f32_at(w::DARK_CLOUD)
    }

    /// Rain severity, `0.0..=1.0`.
    pub fn raining_severity(&self) -> f32 {
        self.capsule.f32_at(w::RAINING)
    }

    pub fn ambient_temperature_c(&self) -> f32 {
        self.capsule.f32_at(w::AMBIENT_TEMP)
    }

    pub fn ambient_temperature(&self) -> f32 {
        self.units.measurement.temperature_from_celsius(self.ambient_temperature_c())
    }

    pub fn track_temperature_c(&self) -> f32 {
        self.capsule.f32_at(w::TRACK_TEMP)
    }

    pub fn track_temperature(&self) -> f32 {
        self.units.measurement.temperature_from_celsius(self.track_temperature_c())
    }

    /// Wind velocity in m/s.
    pub fn wind_speed(&self) -> Vector3 {
        self.capsule.vector3_at(w::WIND)
    }

    pub fn on_path_wetness(&self) -> f32 {
        self.capsule.f32_at(w::ON_PATH_WETNESS)
    }

    pub fn off_path_wetness(&self) -> f32 {
        self.capsule.f32_at(w::OFF_PATH_WETNESS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MeasurementUnits, codec};

    #[test]
    fn weather_matches_scoring_block_order() {
        let mut bytes = vec![0u8; w::SIZE];
        codec::write_f32(&mut bytes, w::TRACK_TEMP, 30.0);
        codec::write_vector3(&mut bytes, w::WIND, Vector3::new(1.0, 0.0, 2.0));
        codec::write_f32(&mut bytes, w::OFF_PATH_WETNESS, 0.25);

        let units = Units { measurement: MeasurementUnits::Imperial, ..Units::default() };
        let mut info = WeatherInfo::new(units);
        info.load_from_stream(&mut bytes.as_slice()).unwrap();
        assert_eq!(info.track_temperature_c(), 30.0);
        assert!((info.track_temperature() - 86.0).abs() < 1e-4);
        assert_eq!(info.wind_speed().z, 2.0);
        assert_eq!(info.off_path_wetness(), 0.25);
        assert_eq!(info.on_path_wetness(), 0.0);
    }
}
