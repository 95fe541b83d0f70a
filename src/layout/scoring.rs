//! `ScoringInfoV2`, the session-wide part of a scoring update.
//!
//! The host follows this block with `mNumVehicles` copies of
//! [`VehicleScoringInfoV2`](super::vehicle_scoring). The two pointer fields
//! are meaningless outside the host process and are never read.

use super::{BYTE, FLOAT, LONG, POINTER, VECT3};

pub const TRACK_NAME_LEN: usize = 64;
pub const PLAYER_NAME_LEN: usize = 32;
pub const PLR_FILE_NAME_LEN: usize = 64;
pub const SECTOR_COUNT: usize = 3;
/// Most vehicle blocks a scoring update may announce.
pub const MAX_VEHICLES: usize = 128;

field_offsets! {
    TRACK_NAME: TRACK_NAME_LEN,
    SESSION: LONG,
    CURRENT_ET: FLOAT,
    END_ET: FLOAT,
    MAX_LAPS: LONG,
    LAP_DIST: FLOAT,
    RESULTS_STREAM: POINTER,
    NUM_VEHICLES: LONG,
    VEHICLE: POINTER,
    GAME_PHASE: BYTE,
    YELLOW_FLAG_STATE: BYTE,
    SECTOR_FLAG: SECTOR_COUNT * BYTE,
    START_LIGHT: BYTE,
    NUM_RED_LIGHTS: BYTE,
    IN_REALTIME: BYTE,
    PLAYER_NAME: PLAYER_NAME_LEN,
    PLR_FILE_NAME: PLR_FILE_NAME_LEN,
    DARK_CLOUD: FLOAT,
    RAINING: FLOAT,
    AMBIENT_TEMP: FLOAT,
    TRACK_TEMP: FLOAT,
    WIND: VECT3,
    ON_PATH_WETNESS: FLOAT,
    OFF_PATH_WETNESS: FLOAT,
    EXPANSION: 256,
}

const _: () = assert!(SIZE == 492);
