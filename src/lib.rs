//! Typed decoding of rFactor live-data snapshots and derived race statistics.
//!
//! The host pushes one fixed-layout binary snapshot per category and tick.
//! rfstats decodes them into typed views and derives what no single snapshot
//! carries: lap and sector times, in-lap and out-lap classification, fuel
//! used per lap, top speed, and modeled engine and brake wear.
//!
//! # Features
//!
//! - **Bit-exact layouts**: Field offsets generated from one ordered list per structure
//! - **Typed getters**: Unit conversion and checked enumerations
//! - **Listeners**: Synchronous notification in registration order, isolated failures
//! - **Recorders**: Lap/sector reconstruction, fuel usage, top speed, wear
//! - **Recordings**: Capture snapshots and replay them through the same path
//!
//! # Quick Start
//!
//! ```rust
//! use rfstats::config::{CoreSettings, VehiclePhysics};
//! use rfstats::host::HostVersion;
//! use rfstats::LiveGameData;
//!
//! # fn main() -> rfstats::Result<()> {
//! let host_version = HostVersion::detect(3)?;
//! let mut game = LiveGameData::new(host_version, CoreSettings::default(), VehiclePhysics::default())?;
//!
//! game.on_session_started();
//! game.on_realtime_entered();
//!
//! // The host writes the telemetry block, then reports the update.
//! let snapshot = vec![0u8; rfstats::layout::telemetry::SIZE];
//! game.load_telemetry(&mut snapshot.as_slice())?;
//!
//! assert!(game.telemetry_data().update_state().is_valid());
//! assert_eq!(game.top_speed().borrow().top_speed_kmh(), 0.0);
//! # Ok(())
//! # }
//! ```

// Core types and error handling
mod capsule;
pub mod config;
mod error;
pub mod host;
pub mod layout;
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Update and notification
pub mod data;
mod game_data;
pub mod listeners;

// Derived statistics
pub mod lifetime;
pub mod recorders;
pub mod vehicle_state;

// Recordings
pub mod replay;

// Core exports
pub use capsule::{
    Capsule, CommentaryCapsule, GraphicsCapsule, ScoringCapsule, TelemetryCapsule,
    VehicleScoringCapsule, WeatherCapsule,
};
pub use error::*;
pub use game_data::LiveGameData;

// Main API exports
pub use config::{CoreSettings, Units, VehiclePhysics};
pub use data::DataMode;
pub use host::HostVersion;
pub use vehicle_state::VehicleState;
