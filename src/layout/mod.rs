//! Byte layouts of the host plugin structures.
//!
//! Each submodule mirrors one C structure from the rFactor plugin interface,
//! compiled with `#pragma pack(4)` and 32-bit pointers. Offsets are generated
//! from a single ordered `(NAME: width)` list per structure, so a layout change
//! touches exactly one line and every later offset follows.
//!
//! Padding the C compiler inserts is written out as explicit `PAD*` entries.
//! Every module ends with a compile-time assertion on its total size.
//!
//! ```rust
//! use rfstats::layout::{telemetry, wheel};
//!
//! assert_eq!(telemetry::FUEL, 276);
//! assert_eq!(telemetry::WHEELS + 4 * wheel::SIZE, telemetry::SIZE);
//! ```

/// Generate `pub const NAME: usize` offsets plus `SIZE` from an ordered field list.
macro_rules! field_offsets {
    (@acc $off:expr;) => {
        /// Total size of the structure in bytes.
        pub const SIZE: usize = $off;
    };
    (@acc $off:expr; $field:ident : $width:expr $(, $rest:ident : $rwidth:expr)*) => {
        pub const $field: usize = $off;
        field_offsets!(@acc $field + $width; $($rest : $rwidth),*);
    };
    ($($field:ident : $width:expr),+ $(,)?) => {
        field_offsets!(@acc 0usize; $($field : $width),+);
    };
}

pub mod commentary;
pub mod graphics;
pub mod scoring;
pub mod telemetry;
pub mod vehicle_scoring;
pub mod weather;
pub mod wheel;

/// Width of a signed or unsigned byte, and of a C++ `bool`.
pub const BYTE: usize = 1;
/// Width of a `short`.
pub const SHORT: usize = 2;
/// Width of a `long`; 32 bits on the host.
pub const LONG: usize = 4;
pub const FLOAT: usize = 4;
/// Width of a `double`, stored as two 32-bit words.
pub const DOUBLE: usize = 8;
/// Width of a pointer in the 32-bit host process.
pub const POINTER: usize = 4;
/// Width of a `TelemVect3`.
pub const VECT3: usize = crate::types::codec::VECTOR3_WIDTH;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn telemetry_fields_land_on_abi_offsets() {
        assert_eq!(telemetry::VEHICLE_NAME, 12);
        assert_eq!(telemetry::TRACK_NAME, 76);
        assert_eq!(telemetry::POS, 140);
        assert_eq!(telemetry::GEAR, 236);
        assert_eq!(telemetry::FUEL, 276);
        assert_eq!(telemetry::SCHEDULED_STOPS, 284);
        assert_eq!(telemetry::LAST_IMPACT_ET, 296);
        assert_eq!(telemetry::WHEELS, 380);
        assert_eq!(telemetry::SIZE, 780);
    }

    #[test]
    fn wheel_fields_land_on_abi_offsets() {
        assert_eq!(wheel::BRAKE_TEMP, 24);
        assert_eq!(wheel::TEMPERATURE, 32);
        assert_eq!(wheel::WEAR, 44);
        assert_eq!(wheel::SURFACE_TYPE, 64);
        assert_eq!(wheel::SIZE, 100);
        assert_eq!(wheel::offset(3, wheel::ROTATION), telemetry::WHEELS + 300);
        assert_eq!(wheel::offset(3, wheel::SIZE), telemetry::SIZE);
    }

    #[test]
    fn scoring_fields_land_on_abi_offsets() {
        assert_eq!(scoring::NUM_VEHICLES, 88);
        assert_eq!(scoring::GAME_PHASE, 96);
        assert_eq!(scoring::PLAYER_NAME, 104);
        assert_eq!(scoring::DARK_CLOUD, 200);
        assert_eq!(scoring::SIZE, 492);
        assert_eq!(scoring::DARK_CLOUD + weather::SIZE, scoring::EXPANSION);
    }

    #[test]
    fn vehicle_scoring_fields_land_on_abi_offsets() {
        assert_eq!(vehicle_scoring::TOTAL_LAPS, 96);
        assert_eq!(vehicle_scoring::LAP_DIST, 100);
        assert_eq!(vehicle_scoring::NUM_PITSTOPS, 144);
        assert_eq!(vehicle_scoring::PLACE, 151);
        assert_eq!(vehicle_scoring::TIME_BEHIND_NEXT, 184);
        assert_eq!(vehicle_scoring::LAP_START_ET, 200);
        assert_eq!(vehicle_scoring::SIZE, 428);
    }

    #[test]
    fn small_structures_have_abi_sizes() {
        assert_eq!(graphics::CAMERA_TYPE, 68);
        assert_eq!(graphics::SIZE, 200);
        assert_eq!(weather::SIZE, 36);
        assert_eq!(commentary::INPUT3, 48);
        assert_eq!(commentary::SIZE, 60);
    }
}
