//! `VehicleScoringInfoV2`, one per competitor in a scoring update.
//!
//! Sector times are cumulative: `mLastSector2` and `mCurSector2` include
//! sector 1. Unknown times are negative.

use super::{BYTE, FLOAT, LONG, SHORT, VECT3};

pub const DRIVER_NAME_LEN: usize = 32;
pub const VEHICLE_NAME_LEN: usize = 64;
pub const VEHICLE_CLASS_LEN: usize = 32;

field_offsets! {
    DRIVER_NAME: DRIVER_NAME_LEN,
    VEHICLE_NAME: VEHICLE_NAME_LEN,
    TOTAL_LAPS: SHORT,
    SECTOR: BYTE,
    FINISH_STATUS: BYTE,
    LAP_DIST: FLOAT,
    PATH_LATERAL: FLOAT,
    TRACK_EDGE: FLOAT,
    BEST_SECTOR1: FLOAT,
    BEST_SECTOR2: FLOAT,
    BEST_LAP_TIME: FLOAT,
    LAST_SECTOR1: FLOAT,
    LAST_SECTOR2: FLOAT,
    LAST_LAP_TIME: FLOAT,
    CUR_SECTOR1: FLOAT,
    CUR_SECTOR2: FLOAT,
    NUM_PITSTOPS: SHORT,
    NUM_PENALTIES: SHORT,
    IS_PLAYER: BYTE,
    CONTROL: BYTE,
    IN_PITS: BYTE,
    PLACE: BYTE,
    VEHICLE_CLASS: VEHICLE_CLASS_LEN,
    TIME_BEHIND_NEXT: FLOAT,
    LAPS_BEHIND_NEXT: LONG,
    TIME_BEHIND_LEADER: FLOAT,
    LAPS_BEHIND_LEADER: LONG,
    LAP_START_ET: FLOAT,
    POS: VECT3,
    LOCAL_VEL: VECT3,
    LOCAL_ACCEL: VECT3,
    ORI_X: VECT3,
    ORI_Y: VECT3,
    ORI_Z: VECT3,
    LOCAL_ROT: VECT3,
    LOCAL_ROT_ACCEL: VECT3,
    EXPANSION: 128,
}

const _: () = assert!(SIZE == 428);
