use tracing::{debug, trace};

use crate::config::VehiclePhysics;
use crate::data::{DataMode, TelemetryData};
use crate::listeners::TelemetryListener;
use crate::types::Wheel;
use crate::LiveGameData;

use super::{WearSample, WearState, integrate};

/// Steps this long or longer are a pause or stall, not a physics interval.
pub const MAX_DELTA_TIME: f32 = 0.15;

/// Integrates engine and brake wear over the player's telemetry.
///
/// The state is reseeded from the vehicle physics whenever a realtime-entry
/// id greater than the last one seen arrives with a telemetry update.
#[derive(Debug, Clone)]
pub struct LifetimeManager {
    physics: VehiclePhysics,
    race_length: f32,
    state: WearState,
    previous: Option<WearSample>,
    realtime_id: u64,
}

impl LifetimeManager {
    /// `race_length` is the race length as a fraction of a full race and must be positive.
    pub fn new(physics: VehiclePhysics, race_length: f32) -> Self {
        Self {
            state: WearState::seeded(&physics),
            physics,
            race_length,
            previous: None,
            realtime_id: 0,
        }
    }

    pub fn physics(&self) -> &VehiclePhysics {
        &self.physics
    }

    /// Replace the physics constants. They take effect at the next reseed.
    pub fn set_physics(&mut self, physics: VehiclePhysics) {
        self.physics = physics;
    }

    pub fn state(&self) -> &WearState {
        &self.state
    }

    fn reseed(&mut self, realtime_id: u64) {
        debug!(realtime_id, "Reseeding wear state");
        self.state = WearState::seeded(&self.physics);
        self.previous = None;
        self.realtime_id = realtime_id;
    }

    /// Integrate one telemetry sample.
    pub fn record(&mut self, sample: WearSample, realtime_id: u64) {
        if realtime_id > self.realtime_id {
            self.reseed(realtime_id);
        }
        if sample.delta_time >= MAX_DELTA_TIME {
            trace!(delta_time = sample.delta_time, "Skipping wear step");
        } else if let Some(previous) = &self.previous {
            self.state = integrate(&self.state, previous, &sample, &self.physics, self.race_length);
        }
        self.previous = Some(sample);
    }

    pub fn update(&mut self, telemetry: &TelemetryData, realtime_id: u64, boost: f32) {
        self.record(WearSample::from_telemetry(telemetry, boost), realtime_id);
    }

    /// Seconds of baseline running left.
    pub fn engine_lifetime(&self) -> f32 {
        self.state.engine_lifetime
    }

    /// Remaining engine lifetime relative to a fresh engine.
    pub fn engine_lifetime_fraction(&self) -> f32 {
        self.state.engine_lifetime / self.physics.engine.lifetime_average
    }

    /// Disc thickness in meters.
    pub fn brake_disc_thickness(&self, wheel: Wheel) -> f32 {
        self.state.disc_thickness(wheel)
    }

    /// Share of the usable disc worn away: 0 for a new disc, 1 at the minimum thickness.
    pub fn brake_wear_fraction(&self, wheel: Wheel) -> f32 {
        let brake = self.physics.brakes.wheel(wheel);
        (brake.disc_thickness_start - self.brake_disc_thickness(wheel))
            / (brake.disc_thickness_start - brake.disc_thickness_min)
    }
}

impl TelemetryListener for LifetimeManager {
    fn on_telemetry_updated(&mut self, game: &LiveGameData, _mode: DataMode) -> anyhow::Result<()> {
        self.update(game.telemetry_data(), game.realtime_entered_id(), game.engine_boost());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Units;
    use crate::lifetime::WheelSample;
    use crate::test_utils::TelemetryBuilder;

    fn braking_sample(physics: &VehiclePhysics, delta_time: f32) -> WearSample {
        WearSample {
            delta_time,
            oil_temperature_c: physics.engine.base_lifetime_oil_temperature,
            rpm: physics.engine.base_lifetime_rpm,
            boost: physics.engine.boost_neutral,
            speed_ms: 60.0,
            brake_application: 1.0,
            wheels: [WheelSample { rotation: -150.0, brake_temperature_c: 550.0 }; 4],
        }
    }

    #[test]
    fn first_sample_only_primes_the_lag() {
        let physics = VehiclePhysics::default();
        let mut manager = LifetimeManager::new(physics.clone(), 1.0);
        manager.record(braking_sample(&physics, 0.01), 1);
        assert_eq!(manager.state(), &WearState::seeded(&physics));

        manager.record(braking_sample(&physics, 0.01), 1);
        assert!((manager.engine_lifetime() - (physics.engine.lifetime_average - 0.01)).abs() < 1e-3);
        assert!(manager.brake_disc_thickness(Wheel::FrontLeft) < physics.brakes.front_left.disc_thickness_start);
        assert!(manager.brake_wear_fraction(Wheel::FrontLeft) > 0.0);
    }

    #[test]
    fn long_steps_are_skipped() {
        let physics = VehiclePhysics::default();
        let mut manager = LifetimeManager::new(physics.clone(), 1.0);
        manager.record(braking_sample(&physics, 0.01), 1);
        manager.record(braking_sample(&physics, 0.5), 1);
        assert_eq!(manager.state(), &WearState::seeded(&physics));
        manager.record(braking_sample(&physics, 0.02), 1);
        assert!(manager.engine_lifetime() < physics.engine.lifetime_average);
    }

    #[test]
    fn step_of_exactly_the_limit_is_skipped() {
        let physics = VehiclePhysics::default();
        let mut manager = LifetimeManager::new(physics.clone(), 1.0);
        manager.record(braking_sample(&physics, 0.01), 1);
        manager.record(braking_sample(&physics, MAX_DELTA_TIME), 1);
        assert_eq!(manager.state(), &WearState::seeded(&physics));

        manager.record(braking_sample(&physics, 0.149), 1);
        assert!(manager.engine_lifetime() < physics.engine.lifetime_average);
    }

    #[test]
    fn new_realtime_id_reseeds() {
        let physics = VehiclePhysics::default();
        let mut manager = LifetimeManager::new(physics.clone(), 1.0);
        for _ in 0..100 {
            manager.record(braking_sample(&physics, 0.1), 1);
        }
        let worn = manager.engine_lifetime();
        assert!(worn < physics.engine.lifetime_average - 9.0);

        // Same id again: keep integrating.
        manager.record(braking_sample(&physics, 0.1), 1);
        assert!(manager.engine_lifetime() < worn);

        manager.record(braking_sample(&physics, 0.1), 2);
        assert_eq!(manager.state(), &WearState::seeded(&physics));
        assert_eq!(manager.engine_lifetime_fraction(), 1.0);
        assert_eq!(manager.brake_wear_fraction(Wheel::RearLeft), 0.0);
    }

    #[test]
    fn samples_come_from_telemetry() {
        let bytes = TelemetryBuilder::new()
            .delta_time(0.02)
            .engine_rpm(12_000.0)
            .oil_temperature(98.0)
            .brake(0.8)
            .wheel_rotation(Wheel::FrontRight, -80.0)
            .brake_temperature(Wheel::FrontRight, 420.0)
            .build();
        let mut telemetry = TelemetryData::new(Units::default());
        telemetry.load_from_stream(&mut bytes.as_slice()).unwrap();

        let sample = WearSample::from_telemetry(&telemetry, 6.0);
        assert_eq!(sample.delta_time, 0.02);
        assert_eq!(sample.rpm, 12_000.0);
        assert_eq!(sample.oil_temperature_c, 98.0);
        assert_eq!(sample.brake_application, 0.8);
        assert_eq!(sample.boost, 6.0);
        assert_eq!(sample.wheel(Wheel::FrontRight).rotation, -80.0);
        assert_eq!(sample.wheel(Wheel::FrontRight).brake_temperature_c, 420.0);
        assert_eq!(sample.wheel(Wheel::FrontLeft).rotation, 0.0);
    }
}
