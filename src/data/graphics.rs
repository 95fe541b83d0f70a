//! Camera and lighting state.

use crate::capsule::GraphicsCapsule;
use crate::layout::{VECT3, graphics as g};
use crate::types::{CameraType, Vector3};
use crate::Result;

use super::UpdateState;

/// Decoded `GraphicsInfoV2`.
#[derive(Debug)]
pub struct GraphicsInfo {
    capsule: GraphicsCapsule,
    pub(crate) update: UpdateState,
}

impl Default for GraphicsInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsInfo {
    pub fn new() -> Self {
        Self { capsule: GraphicsCapsule::new(), update: UpdateState::default() }
    }

    pub fn prepare_update(&mut self) {}

    pub fn capsule(&self) -> &GraphicsCapsule {
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

    pub fn camera_position(&self) -> Vector3 {
        self.capsule.vector3_at(g::CAM_POS)
    }

    /// Rows of the camera orientation matrix.
    pub fn camera_orientation(&self) -> [Vector3; 3] {
        [
            self.capsule.vector3_at(g::CAM_ORI),
            self.capsule.vector3_at(g::CAM_ORI + VECT3),
            self.capsule.vector3_at(g::CAM_ORI + 2 * VECT3),
        ]
    }

    /// Ambient light color, each channel `0.0..=1.0`.
    pub fn ambient_color(&self) -> (f32, f32, f32) {
        (
            self.capsule.f32_at(g::AMBIENT_RED),
            self.capsule.f32_at(g::AMBIENT_GREEN),
            self.capsule.f32_at(g::AMBIENT_BLUE),
        )
    }

    /// Slot id of the vehicle the camera is following.
    pub fn viewed_vehicle_id(&self) -> i32 {
        self.capsule.i32_at(g::ID)
    }

    pub fn camera_type(&self) -> Result<CameraType> {
        CameraType::from_raw(self.capsule.i32_at(g::CAMERA_TYPE))
    }
}
