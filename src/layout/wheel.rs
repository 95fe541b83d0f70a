//! `TelemWheelV2`, one per wheel inside the telemetry block.
//!
//! ```c
//! struct TelemWheelV2 {
//!     float mRotation;          // radians/sec
//!     float mSuspensionDeflection;
//!     float mRideHeight;
//!     float mTireLoad;          // Newtons
//!     float mLateralForce;
//!     float mGripFract;
//!     float mBrakeTemp;         // Celsius
//!     float mPressure;          // kPa
//!     float mTemperature[3];    // Kelvin; left/center/right
//!     float mWear;              // 0.0-1.0, fraction of maximum
//!     char  mTerrainName[16];
//!     unsigned char mSurfaceType;
//!     bool  mFlat;
//!     bool  mDetached;
//!     unsigned char mExpansion[32];
//! };
//! ```

use super::{BYTE, FLOAT};

field_offsets! {
    ROTATION: FLOAT,
    SUSPENSION_DEFLECTION: FLOAT,
    RIDE_HEIGHT: FLOAT,
    TIRE_LOAD: FLOAT,
    LATERAL_FORCE: FLOAT,
    GRIP_FRACT: FLOAT,
    BRAKE_TEMP: FLOAT,
    PRESSURE: FLOAT,
    TEMPERATURE: 3 * FLOAT,
    WEAR: FLOAT,
    TERRAIN_NAME: TERRAIN_NAME_LEN,
    SURFACE_TYPE: BYTE,
    FLAT: BYTE,
    DETACHED: BYTE,
    EXPANSION: 32,
    PAD0: BYTE,
}

pub const TERRAIN_NAME_LEN: usize = 16;

const _: () = assert!(SIZE == 100);

/// Offset of `field` for the wheel at `index` relative to the telemetry block.
pub const fn offset(index: usize, field: usize) -> usize {
    super::telemetry::WHEELS + index * SIZE + field
}
