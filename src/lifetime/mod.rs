//! Engine and brake wear simulation.
//!
//! The model is a one-step-lagged explicit Euler integration: the rates for
//! the interval ending at tick `n` are computed from the telemetry of tick
//! `n - 1`, and the interval length is tick `n`'s `delta_time`. [`integrate`]
//! takes both samples explicitly so the model can be exercised without a
//! telemetry feed; [`LifetimeManager`] keeps the previous sample between
//! updates.
//!
//! ```rust
//! use rfstats::config::VehiclePhysics;
//! use rfstats::lifetime::{WearSample, WearState, integrate};
//!
//! let physics = VehiclePhysics::default();
//! let state = WearState::seeded(&physics);
//! let previous = WearSample {
//!     delta_time: 0.01,
//!     oil_temperature_c: physics.engine.base_lifetime_oil_temperature,
//!     rpm: physics.engine.base_lifetime_rpm,
//!     boost: physics.engine.boost_neutral,
//!     ..WearSample::default()
//! };
//! let current = WearSample { delta_time: 0.5, ..previous };
//!
//! let next = integrate(&state, &previous, &current, &physics, 1.0);
//! assert!((state.engine_lifetime - next.engine_lifetime - 0.5).abs() < 1e-3);
//! ```

mod manager;
mod model;

pub use manager::{LifetimeManager, MAX_DELTA_TIME};
pub use model::{
    WearSample, WearState, WheelSample, brake_fade_factor, brake_wear_rate, engine_wear_rate,
    integrate,
};
