//! Domain objects over the snapshot capsules.
//!
//! Each domain object owns exactly one capsule (scoring additionally owns one
//! per competitor slot) and exposes semantic getters: pure functions of the
//! buffer bytes and the unit preferences it was built with. Getters ending in
//! `_c`, `_k`, `_ms`, `_kmh` or `_liters` return the host unit unchanged; the
//! unsuffixed variant converts to the configured unit.
//!
//! Domain objects never notify anyone themselves. Updates are driven through
//! [`LiveGameData`](crate::LiveGameData), which owns the objects, counts the
//! update and dispatches to the registered listeners.

mod commentary;
mod graphics;
mod scoring;
mod telemetry;
mod update;
mod vehicle_scoring;
mod weather;

pub use commentary::CommentaryInfo;
pub use graphics::GraphicsInfo;
pub use scoring::{ScoringInfo, StintState};
pub use telemetry::{TelemetryData, TireTemperaturePart};
pub use update::{DataMode, UpdateScope, UpdateState};
pub use vehicle_scoring::VehicleScoringInfo;
pub use weather::WeatherInfo;
