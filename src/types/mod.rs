//! Core types for snapshot data representation.
//!
//! This module provides the primitive codec that every capsule reads through,
//! together with the small value types the semantic getters return.
//!
//! ## Architecture
//!
//! The types map directly to the host plugin ABI:
//! - [`codec`] decodes fixed-order integers, floats, strings and vectors at byte offsets
//! - [`Vector3`] mirrors the host's three-float vector
//! - [`MeasurementUnits`] and [`SpeedUnits`] select the conversions applied by getters
//! - The enumerations ([`SessionType`], [`GamePhase`], ...) decode small integer fields
//!   and reject values outside their documented range
//!
//! ## Usage Example
//!
//! ```rust
//! use rfstats::types::codec;
//!
//! let mut buf = [0u8; 8];
//! codec::write_f32(&mut buf, 4, 4500.0);
//! assert_eq!(buf[4], 0x45); // most significant byte first
//! assert_eq!(codec::read_f32(&buf, 4), 4500.0);
//! ```

pub mod codec;
mod enums;
mod units;
mod vector;

pub use enums::{
    CameraType, FinishStatus, GamePhase, Sector, SessionType, SurfaceType, VehicleControl, Wheel,
    YellowFlagState,
};
pub use units::{
    KELVIN_OFFSET, MeasurementUnits, SpeedUnits, celsius_to_fahrenheit, kelvin_to_celsius,
    meters_per_second_to_kmh,
};
pub use vector::Vector3;
