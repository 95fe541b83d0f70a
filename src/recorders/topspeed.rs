//! Highest speed reached by the player in the current session.

use tracing::debug;

use crate::data::{DataMode, TelemetryData};
use crate::listeners::{GameEventsListener, TelemetryListener};
use crate::types::SpeedUnits;
use crate::LiveGameData;

/// Running maximum of the player's scalar speed.
///
/// Samples are ignored until `warmup` seconds of session time have passed
/// since the player entered the car, so placement glitches when the car is
/// put on track never register.
#[derive(Debug, Clone)]
pub struct TopspeedRecorder {
    warmup: f32,
    deadline: Option<f32>,
    top_speed_kmh: f32,
}

impl TopspeedRecorder {
    pub fn new(warmup: f32) -> Self {
        Self { warmup, deadline: None, top_speed_kmh: 0.0 }
    }

    /// Top speed in km/h, zero before the first accepted sample.
    pub fn top_speed_kmh(&self) -> f32 {
        self.top_speed_kmh
    }

    pub fn top_speed(&self, units: SpeedUnits) -> f32 {
        units.from_kmh(self.top_speed_kmh)
    }

    /// Session time from which samples are accepted.
    pub fn deadline(&self) -> Option<f32> {
        self.deadline
    }

    pub fn reset(&mut self) {
        self.deadline = None;
        self.top_speed_kmh = 0.0;
    }

    /// Start the warm-up at `session_time`.
    pub fn arm(&mut self, session_time: f32) {
        self.deadline = Some(session_time + self.warmup);
    }

    /// Offer one speed sample taken at `session_time`. Returns whether it raised the maximum.
    pub fn record(&mut self, speed_kmh: f32, session_time: f32) -> bool {
        if self.deadline.is_none_or(|deadline| session_time < deadline) {
            return false;
        }
        if speed_kmh <= self.top_speed_kmh {
            return false;
        }
        self.top_speed_kmh = speed_kmh;
        true
    }

    pub fn update(&mut self, telemetry: &TelemetryData, session_time: f32) {
        self.record(telemetry.scalar_velocity_kmh(), session_time);
    }
}

impl TelemetryListener for TopspeedRecorder {
    fn on_telemetry_updated(&mut self, game: &LiveGameData, _mode: DataMode) -> anyhow::Result<()> {
        self.update(game.telemetry_data(), game.session_time());
        Ok(())
    }
}

impl GameEventsListener for TopspeedRecorder {
    fn on_session_started(&mut self, _game: &LiveGameData, _mode: DataMode) -> anyhow::Result<()> {
        self.reset();
        Ok(())
    }

    fn on_realtime_entered(&mut self, game: &LiveGameData, _mode: DataMode) -> anyhow::Result<()> {
        self.arm(game.session_time());
        debug!(deadline = ?self.deadline, "Top speed warm-up started");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_recorded_before_entering_the_car() {
        let mut recorder = TopspeedRecorder::new(1.0);
        assert!(!recorder.record(250.0, 100.0));
        assert_eq!(recorder.top_speed_kmh(), 0.0);
    }

    #[test]
    fn warmup_suppresses_spikes() {
        let mut recorder = TopspeedRecorder::new(1.0);
        recorder.arm(30.0);
        assert!(!recorder.record(900.0, 30.2));
        assert!(!recorder.record(900.0, 30.99));
        assert_eq!(recorder.top_speed_kmh(), 0.0);

        assert!(recorder.record(120.0, 31.0));
        assert!(!recorder.record(110.0, 31.5));
        assert!(recorder.record(180.0, 40.0));
        assert_eq!(recorder.top_speed_kmh(), 180.0);
    }

    #[test]
    fn rearming_keeps_the_maximum() {
        let mut recorder = TopspeedRecorder::new(1.0);
        recorder.arm(0.0);
        recorder.record(200.0, 5.0);
        recorder.arm(60.0);
        assert!(!recorder.record(500.0, 60.5));
        assert_eq!(recorder.top_speed_kmh(), 200.0);
    }

    #[test]
    fn reset_clears_maximum_and_deadline() {
        let mut recorder = TopspeedRecorder::new(1.0);
        recorder.arm(0.0);
        recorder.record(200.0, 5.0);
        recorder.reset();
        assert_eq!(recorder.top_speed_kmh(), 0.0);
        assert_eq!(recorder.deadline(), None);
    }

    #[test]
    fn speed_units_convert() {
        let mut recorder = TopspeedRecorder::new(0.0);
        recorder.arm(0.0);
        recorder.record(160.9344, 1.0);
        assert!((recorder.top_speed(SpeedUnits::Mph) - 100.0).abs() < 1e-3);
        assert_eq!(recorder.top_speed(SpeedUnits::Kmh), recorder.top_speed_kmh());
    }
}
