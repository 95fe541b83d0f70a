//! Weather block.
//!
//! The host has no separate weather structure; it is the run of fields
//! between `mPlrFileName` and `mExpansion` in `ScoringInfoV2`, delivered as
//! its own category so weather consumers need not wait for full scoring.

use super::{FLOAT, VECT3};

field_offsets! {
    DARK_CLOUD: FLOAT,
    RAINING: FLOAT,
    AMBIENT_TEMP: FLOAT,
    TRACK_TEMP: FLOAT,
    WIND: VECT3,
    ON_PATH_WETNESS: FLOAT,
    OFF_PATH_WETNESS: FLOAT,
}

const _: () = assert!(SIZE == 36);
