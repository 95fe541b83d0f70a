//! `TelemInfoV2`, delivered once per physics tick for the player's vehicle.
//!
//! Positions and velocities are in meters and meters per second in the
//! vehicle's local frame. Oil and water temperatures are Celsius.

use super::{BYTE, FLOAT, LONG, VECT3, wheel};

pub const NAME_LEN: usize = 64;
pub const DENT_SEVERITY_COUNT: usize = 8;

field_offsets! {
    DELTA_TIME: FLOAT,
    LAP_NUMBER: LONG,
    LAP_START_ET: FLOAT,
    VEHICLE_NAME: NAME_LEN,
    TRACK_NAME: NAME_LEN,
    POS: VECT3,
    LOCAL_VEL: VECT3,
    LOCAL_ACCEL: VECT3,
    ORI_X: VECT3,
    ORI_Y: VECT3,
    ORI_Z: VECT3,
    LOCAL_ROT: VECT3,
    LOCAL_ROT_ACCEL: VECT3,
    GEAR: LONG,
    ENGINE_RPM: FLOAT,
    ENGINE_WATER_TEMP: FLOAT,
    ENGINE_OIL_TEMP: FLOAT,
    CLUTCH_RPM: FLOAT,
    UNFILTERED_THROTTLE: FLOAT,
    UNFILTERED_BRAKE: FLOAT,
    UNFILTERED_STEERING: FLOAT,
    UNFILTERED_CLUTCH: FLOAT,
    STEERING_ARM_FORCE: FLOAT,
    FUEL: FLOAT,
    ENGINE_MAX_RPM: FLOAT,
    SCHEDULED_STOPS: BYTE,
    OVERHEATING: BYTE,
    DETACHED: BYTE,
    DENT_SEVERITY: DENT_SEVERITY_COUNT * BYTE,
    PAD0: BYTE,
    LAST_IMPACT_ET: FLOAT,
    LAST_IMPACT_MAGNITUDE: FLOAT,
    LAST_IMPACT_POS: VECT3,
    EXPANSION: 64,
    WHEELS: 4 * wheel::SIZE,
}

const _: () = assert!(SIZE == 780);
