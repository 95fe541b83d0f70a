//! Statistics derived from consecutive snapshots.
//!
//! Recorders keep state across ticks that no single snapshot carries: lap
//! and sector times, fuel used per lap and the session's top speed. Each one
//! can be driven directly through its `update`/`record` methods or registered
//! as a listener on a [`LiveGameData`](crate::LiveGameData), which does so
//! for the built-in instances.

mod fuel;
mod laptime;
mod laptimes;
mod topspeed;

pub use fuel::FuelUsageRecorder;
pub use laptime::{LapKind, Laptime};
pub use laptimes::{CompetitorLaps, LaptimesRecorder};
pub use topspeed::TopspeedRecorder;
