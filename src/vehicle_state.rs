//! Short race status of a competitor for display.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::data::VehicleScoringInfo;
use crate::recorders::CompetitorLaps;

/// Below this speed (m/s) a vehicle on pit road is stopped in its box.
const STOPPED_SPEED: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleState {
    /// Stopped on pit road.
    Pitting,
    /// Moving on pit road.
    Pitlane,
    /// Just completed the fastest lap of the session.
    AbsFastest,
    /// Just completed a personal best.
    PersFastest,
    /// Just completed a lap slower than the personal best.
    Slower,
    OnTrack,
}

impl VehicleState {
    /// Classify `vehicle`.
    ///
    /// A lap-based state is shown for `display_delay` seconds after a lap is
    /// completed. `session_fastest_holder` is the driver name holding the
    /// session's fastest lap.
    pub fn classify(
        vehicle: &VehicleScoringInfo,
        laps: Option<&CompetitorLaps>,
        session_fastest_holder: Option<&str>,
        session_time: f32,
        display_delay: f32,
    ) -> Self {
        if vehicle.is_in_pits() {
            return if vehicle.scalar_velocity_ms() < STOPPED_SPEED {
                VehicleState::Pitting
            } else {
                VehicleState::Pitlane
            };
        }

        if session_time - vehicle.lap_start_time() >= display_delay {
            return VehicleState::OnTrack;
        }
        let Some(fastest) = laps.and_then(CompetitorLaps::fastest_lap) else {
            return VehicleState::OnTrack;
        };
        if !fastest.is_finished() {
            return VehicleState::OnTrack;
        }
        if fastest.lap != vehicle.laps_completed() {
            return VehicleState::Slower;
        }
        if session_fastest_holder == Some(vehicle.driver_name().as_str()) {
            VehicleState::AbsFastest
        } else {
            VehicleState::PersFastest
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleState::Pitting => "PITTING",
            VehicleState::Pitlane => "PITLANE",
            VehicleState::AbsFastest => "ABS_FASTEST",
            VehicleState::PersFastest => "PERS_FASTEST",
            VehicleState::Slower => "SLOWER",
            VehicleState::OnTrack => "ON_TRACK",
        }
    }
}

impl fmt::Display for VehicleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Units;
    use crate::data::ScoringInfo;
    use crate::recorders::LaptimesRecorder;
    use crate::test_utils::{ScoringBuilder, VehicleBuilder};
    use crate::types::Vector3;

    const DELAY: f32 = 10.0;

    struct Session {
        scoring: ScoringInfo,
        laptimes: LaptimesRecorder,
    }

    impl Session {
        fn new() -> Self {
            Self { scoring: ScoringInfo::new(Units::default()), laptimes: LaptimesRecorder::new() }
        }

        fn tick(&mut self, time: f32, vehicles: Vec<VehicleBuilder>) {
            let builder = vehicles
                .into_iter()
                .fold(ScoringBuilder::new().session(7).current_time(time), ScoringBuilder::vehicle);
            let bytes = builder.build();
            self.scoring.load_from_stream(&mut bytes.as_slice()).unwrap();
            self.scoring.refresh_stints();
            self.laptimes.update(&self.scoring).unwrap();
        }

        fn state(&self, driver: &str) -> VehicleState {
            let vehicle = self.scoring.vehicle_by_driver(driver).unwrap();
            VehicleState::classify(
                vehicle,
                self.laptimes.competitor(driver),
                self.laptimes.session_fastest().map(|(name, _)| name),
                self.scoring.current_time(),
                DELAY,
            )
        }
    }

    fn completed(name: &str, laps: i16, start: f32, s1: f32, s2: f32, lap: f32) -> VehicleBuilder {
        VehicleBuilder::new(name).laps_completed(laps).lap_start(start).last_sectors(s1, s2, lap)
    }

    #[test]
    fn pit_road_states() {
        let mut session = Session::new();
        session.tick(
            5.0,
            vec![
                VehicleBuilder::new("Alice").in_pits(true),
                VehicleBuilder::new("Bob").in_pits(true).velocity(Vector3::new(0.0, 0.0, -16.0)),
            ],
        );
        assert_eq!(session.state("Alice"), VehicleState::Pitting);
        assert_eq!(session.state("Bob"), VehicleState::Pitlane);
    }

    #[test]
    fn fastest_laps_are_shown_for_the_display_delay() {
        let mut session = Session::new();
        session.tick(0.0, vec![VehicleBuilder::new("Alice"), VehicleBuilder::new("Bob")]);
        session.tick(
            71.0,
            vec![completed("Alice", 1, 70.0, 20.0, 45.0, 70.0), completed("Bob", 1, 68.0, 19.0, 42.0, 68.0)],
        );
        assert_eq!(session.state("Bob"), VehicleState::AbsFastest);
        assert_eq!(session.state("Alice"), VehicleState::PersFastest);

        session.tick(
            85.0,
            vec![completed("Alice", 1, 70.0, 20.0, 45.0, 70.0), completed("Bob", 1, 68.0, 19.0, 42.0, 68.0)],
        );
        assert_eq!(session.state("Alice"), VehicleState::OnTrack);
        assert_eq!(session.state("Bob"), VehicleState::OnTrack);
    }

    #[test]
    fn slower_lap_after_a_personal_best() {
        let mut session = Session::new();
        session.tick(0.0, vec![VehicleBuilder::new("Alice")]);
        session.tick(70.0, vec![completed("Alice", 1, 70.0, 20.0, 45.0, 70.0)]);
        session.tick(145.0, vec![completed("Alice", 2, 145.0, 21.0, 47.0, 75.0)]);
        assert_eq!(session.state("Alice"), VehicleState::Slower);
    }

    #[test]
    fn no_history_is_on_track() {
        let mut session = Session::new();
        session.tick(3.0, vec![VehicleBuilder::new("Alice")]);
        assert_eq!(session.state("Alice"), VehicleState::OnTrack);
        assert_eq!(VehicleState::OnTrack.to_string(), "ON_TRACK");
    }
}
