//! Lap and sector reconstruction for every competitor.
//!
//! The host only reports the sector a competitor is in, cumulative split
//! times of the current and previous lap, and whether the car is on pit road.
//! [`LaptimesRecorder`] turns that polled state into a lap history per
//! competitor, classifies in-laps and out-laps, and tracks personal bests.
//!
//! Lap times are never guessed: a lap whose sectors cannot all be
//! reconstructed is stored as a `None` hole.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{debug, warn};

use crate::data::{DataMode, ScoringInfo, VehicleScoringInfo};
use crate::listeners::{GameEventsListener, ScoringInfoListener};
use crate::types::{FinishStatus, Sector};
use crate::{LiveGameData, Result};

use super::Laptime;

/// Stint length after which an undecided completed lap is confirmed as not an in-lap.
const CONFIRMED_STINT_LENGTH: f32 = 2.0;

fn lap_index(lap: i32) -> Option<usize> {
    usize::try_from(lap - 1).ok()
}

/// Lap history of one competitor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompetitorLaps {
    laps: Vec<Option<Laptime>>,
    fastest: Option<usize>,
    laps_completed: i32,
}

impl CompetitorLaps {
    fn seeded(laps_completed: i32) -> Self {
        let mut competitor = Self { laps_completed, ..Self::default() };
        competitor.start_lap(laps_completed + 1, None);
        competitor
    }

    /// All laps so far, indexed by lap number − 1. `None` is an unknown lap.
    pub fn laps(&self) -> &[Option<Laptime>] {
        &self.laps
    }

    /// Lap by 1-based number.
    pub fn lap(&self, lap: i32) -> Option<&Laptime> {
        lap_index(lap).and_then(|i| self.laps.get(i)).and_then(Option::as_ref)
    }

    fn lap_mut(&mut self, lap: i32) -> Option<&mut Laptime> {
        lap_index(lap).and_then(|i| self.laps.get_mut(i)).and_then(Option::as_mut)
    }

    fn slot(&mut self, index: usize) -> &mut Option<Laptime> {
        if self.laps.len() <= index {
            self.laps.resize(index + 1, None);
        }
        &mut self.laps[index]
    }

    /// Personal-best lap.
    pub fn fastest_lap(&self) -> Option<&Laptime> {
        self.fastest.and_then(|i| self.laps.get(i)).and_then(Option::as_ref)
    }

    pub fn laps_completed(&self) -> i32 {
        self.laps_completed
    }

    pub fn last_completed_lap(&self) -> Option<&Laptime> {
        self.lap(self.laps_completed)
    }

    /// The lap in progress.
    pub fn current_lap(&self) -> Option<&Laptime> {
        self.lap(self.laps_completed + 1)
    }

    fn start_lap(&mut self, lap: i32, is_out_lap: Option<bool>) {
        if let Some(index) = lap_index(lap) {
            *self.slot(index) = Some(Laptime { is_out_lap, ..Laptime::new(lap) });
        }
    }

    /// Close the lap the host just counted, from the last-lap split fields.
    fn complete_lap(&mut self, vehicle: &VehicleScoringInfo, is_race: bool) {
        let lap = vehicle.laps_completed();
        let Some(index) = lap_index(lap) else {
            return;
        };
        for skipped in (self.laps_completed + 1)..lap {
            if let Some(slot) = lap_index(skipped).and_then(|i| self.laps.get_mut(i)) {
                *slot = None;
            }
        }
        let mut laptime = self.slot(index).take().unwrap_or_else(|| Laptime::new(lap));

        let s1 = vehicle.last_sector1();
        let s2_cumulative = vehicle.last_sector2_cumulative();
        let s2 = s2_cumulative.zip(s1).map(|(cumulative, s1)| cumulative - s1);
        let s3 = vehicle.last_lap_time().zip(s2_cumulative).map(|(lap, cumulative)| lap - cumulative);
        let void_s3 = !is_race && laptime.is_in_lap == Some(true);
        laptime.sectors = [s1, s2, if void_s3 { None } else { s3 }];

        if !laptime.is_finished() {
            warn!(lap, "Lap could not be reconstructed, discarding");
            return;
        }

        self.laps[index] = Some(laptime);
        let replace = match self.fastest_lap() {
            None => true,
            Some(fastest) => laptime.is_faster_than(fastest),
        };
        if replace {
            debug!(lap, laptime = laptime.laptime(), "New personal best");
            self.fastest = Some(index);
        }
    }

    /// Update the lap in progress from the current-lap split fields.
    fn update_current(
        &mut self,
        vehicle: &VehicleScoringInfo,
        session_time: f32,
        is_race: bool,
    ) -> Result<()> {
        let lap = vehicle.current_lap();
        let Some(index) = lap_index(lap) else {
            return Ok(());
        };
        let sector = vehicle.sector()?;
        let laptime = self.slot(index).get_or_insert_with(|| Laptime::new(lap));

        match sector {
            Sector::Sector1 => {}
            Sector::Sector2 => laptime.sectors[0] = vehicle.current_sector1(),
            Sector::Sector3 => {
                let s1 = vehicle.current_sector1();
                let s2 = vehicle.current_sector2_cumulative().zip(s1).map(|(c, s1)| c - s1);
                let elapsed = session_time - vehicle.lap_start_time();
                let void_s3 = !is_race && laptime.is_in_lap == Some(true);
                laptime.sectors = [
                    s1,
                    s2,
                    if void_s3 { None } else { s1.zip(s2).map(|(s1, s2)| elapsed - s1 - s2) },
                ];
            }
        }
        Ok(())
    }

    /// Classify in-laps and out-laps from the pit road flag.
    ///
    /// `track_length` must be positive.
    fn apply_pit_state(
        &mut self,
        vehicle: &VehicleScoringInfo,
        track_length: f32,
        stint_length: f32,
        stint_start_lap: Option<i32>,
        is_race: bool,
    ) {
        let current = vehicle.current_lap();
        if vehicle.is_in_pits() {
            let fraction = vehicle.lap_distance() / track_length;
            if fraction > 0.5 {
                if stint_start_lap == Some(current) {
                    return;
                }
                if let Some(lap) = self.lap_mut(current) {
                    lap.is_in_lap = Some(true);
                }
            } else {
                if let Some(lap) = self.lap_mut(current) {
                    lap.is_out_lap = Some(true);
                }
                if let Some(previous) = self.lap_mut(current - 1) {
                    previous.is_in_lap = Some(true);
                    if !is_race {
                        previous.sectors[2] = None;
                    }
                }
            }
        } else if stint_length > CONFIRMED_STINT_LENGTH {
            if let Some(previous) = self.lap_mut(current - 1) {
                previous.is_in_lap.get_or_insert(false);
            }
        }
    }
}

/// Reconstructs lap and sector times for every active competitor.
#[derive(Debug, Default)]
pub struct LaptimesRecorder {
    competitors: HashMap<String, CompetitorLaps>,
}

impl LaptimesRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every competitor.
    pub fn reset(&mut self) {
        self.competitors.clear();
    }

    /// Run one scoring tick for every competitor whose finish status is still none.
    ///
    /// Stint lengths must already reflect this tick.
    pub fn update(&mut self, scoring: &ScoringInfo) -> Result<()> {
        let is_race = scoring.is_race_session()?;
        let session_time = scoring.current_time();
        let track_length = scoring.track_length();

        for vehicle in scoring.vehicles() {
            if vehicle.finish_status()? != FinishStatus::None {
                continue;
            }
            let laps_completed = vehicle.laps_completed();
            let competitor = match self.competitors.entry(vehicle.driver_name()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    debug!(driver = %entry.key(), laps_completed, "Tracking new competitor");
                    entry.insert(CompetitorLaps::seeded(laps_completed))
                }
            };

            if laps_completed < competitor.laps_completed {
                debug!(laps_completed, "Lap count went backwards, restarting history");
                *competitor = CompetitorLaps::seeded(laps_completed);
            }

            if laps_completed > competitor.laps_completed {
                competitor.complete_lap(vehicle, is_race);
                let is_out_lap = if vehicle.is_in_pits() { None } else { Some(false) };
                competitor.start_lap(laps_completed + 1, is_out_lap);
                competitor.laps_completed = laps_completed;
            } else {
                competitor.update_current(vehicle, session_time, is_race)?;
            }

            competitor.apply_pit_state(
                vehicle,
                track_length,
                scoring.stint_length(vehicle),
                scoring.stint_start_lap(vehicle),
                is_race,
            );
        }
        Ok(())
    }

    pub fn competitor(&self, driver_name: &str) -> Option<&CompetitorLaps> {
        self.competitors.get(driver_name)
    }

    pub fn competitors(&self) -> impl Iterator<Item = (&str, &CompetitorLaps)> {
        self.competitors.iter().map(|(name, laps)| (name.as_str(), laps))
    }

    /// The fastest finished lap of the session and who drove it.
    pub fn session_fastest(&self) -> Option<(&str, &Laptime)> {
        self.competitors()
            .filter_map(|(name, laps)| {
                let fastest = laps.fastest_lap()?;
                Some((name, fastest, fastest.laptime()?))
            })
            .min_by(|a, b| a.2.total_cmp(&b.2).then_with(|| a.0.cmp(b.0)))
            .map(|(name, lap, _)| (name, lap))
    }
}

impl ScoringInfoListener for LaptimesRecorder {
    fn on_scoring_info_updated(
        &mut self,
        game: &LiveGameData,
        _mode: DataMode,
    ) -> anyhow::Result<()> {
        self.update(game.scoring_info())?;
        Ok(())
    }
}

impl GameEventsListener for LaptimesRecorder {
    fn on_session_started(&mut self, _game: &LiveGameData, _mode: DataMode) -> anyhow::Result<()> {
        self.reset();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Units;
    use crate::test_utils::{ScoringBuilder, VehicleBuilder};

    const PRACTICE: i32 = 1;
    const RACE: i32 = 7;

    struct Harness {
        scoring: ScoringInfo,
        recorder: LaptimesRecorder,
    }

    impl Harness {
        fn new() -> Self {
            Self { scoring: ScoringInfo::new(Units::default()), recorder: LaptimesRecorder::new() }
        }

        fn tick(&mut self, builder: ScoringBuilder) {
            let bytes = builder.build();
            self.scoring.load_from_stream(&mut bytes.as_slice()).unwrap();
            self.scoring.refresh_stints();
            self.recorder.update(&self.scoring).unwrap();
        }

        fn bob(&self) -> &CompetitorLaps {
            self.recorder.competitor("Bob").unwrap()
        }
    }

    fn session(kind: i32, time: f32, vehicle: VehicleBuilder) -> ScoringBuilder {
        ScoringBuilder::new().session(kind).current_time(time).track_length(1000.0).vehicle(vehicle)
    }

    /// Drive one clean 20/25/25 lap starting at session time 0.
    fn drive_first_lap(h: &mut Harness, kind: i32) {
        h.tick(session(kind, 0.0, VehicleBuilder::new("Bob").sector(1).lap_distance(10.0)));
        h.tick(session(
            kind,
            20.0,
            VehicleBuilder::new("Bob").sector(2).lap_distance(300.0).current_sectors(20.0, -1.0),
        ));
        h.tick(session(
            kind,
            45.0,
            VehicleBuilder::new("Bob").sector(0).lap_distance(650.0).current_sectors(20.0, 45.0),
        ));
        h.tick(session(
            kind,
            70.0,
            VehicleBuilder::new("Bob")
                .laps_completed(1)
                .sector(1)
                .lap_distance(5.0)
                .lap_start(70.0)
                .last_sectors(20.0, 45.0, 70.0),
        ));
    }

    #[test]
    fn sectors_are_reconstructed_and_first_lap_is_fastest() {
        let mut h = Harness::new();
        drive_first_lap(&mut h, PRACTICE);

        let lap = h.bob().lap(1).copied().unwrap();
        assert_eq!(lap.sectors, [Some(20.0), Some(25.0), Some(25.0)]);
        assert_eq!(lap.laptime(), Some(70.0));
        assert_eq!(h.bob().fastest_lap().map(|l| l.lap), Some(1));
        assert_eq!(h.bob().current_lap().map(|l| l.lap), Some(2));
        assert_eq!(h.recorder.session_fastest().map(|(name, l)| (name, l.lap)), Some(("Bob", 1)));
    }

    #[test]
    fn open_sector3_runs_from_lap_start() {
        let mut h = Harness::new();
        h.tick(session(
            PRACTICE,
            50.0,
            VehicleBuilder::new("Bob").sector(0).lap_start(0.0).current_sectors(20.0, 45.0),
        ));
        assert_eq!(h.bob().current_lap().unwrap().sectors, [Some(20.0), Some(25.0), Some(5.0)]);
    }

    #[test]
    fn pit_exit_marks_previous_lap_in_lap_and_voids_sector3_outside_races() {
        let mut h = Harness::new();
        drive_first_lap(&mut h, PRACTICE);
        h.tick(session(
            PRACTICE,
            75.0,
            VehicleBuilder::new("Bob").laps_completed(1).sector(1).lap_distance(200.0).in_pits(true),
        ));

        let current = h.bob().lap(2).unwrap();
        assert_eq!(current.is_in_lap, None);
        assert_eq!(current.is_out_lap, Some(true));
        let previous = h.bob().lap(1).unwrap();
        assert_eq!(previous.is_in_lap, Some(true));
        assert_eq!(previous.sector3(), None);
        assert_eq!(previous.laptime(), None);
    }

    #[test]
    fn race_sessions_keep_in_lap_sector3() {
        let mut h = Harness::new();
        drive_first_lap(&mut h, RACE);
        h.tick(session(
            RACE,
            75.0,
            VehicleBuilder::new("Bob").laps_completed(1).sector(1).lap_distance(200.0).in_pits(true),
        ));
        let previous = h.bob().lap(1).unwrap();
        assert_eq!(previous.is_in_lap, Some(true));
        assert_eq!(previous.sector3(), Some(25.0));
    }

    #[test]
    fn pit_entry_late_in_lap_marks_current_in_lap() {
        let mut h = Harness::new();
        drive_first_lap(&mut h, PRACTICE);
        h.tick(session(
            PRACTICE,
            130.0,
            VehicleBuilder::new("Bob").laps_completed(1).sector(0).lap_distance(900.0).in_pits(true),
        ));
        assert_eq!(h.bob().lap(2).unwrap().is_in_lap, Some(true));

        // The in-lap's sector 3 is not comparable outside races, so the lap is dropped.
        h.tick(session(
            PRACTICE,
            140.0,
            VehicleBuilder::new("Bob").laps_completed(2).sector(1).in_pits(true).last_sectors(
                21.0, 46.0, 71.0,
            ),
        ));
        assert_eq!(h.bob().lap(2), None);
        assert_eq!(h.bob().laps()[1], None);
        assert_eq!(h.bob().fastest_lap().map(|l| l.lap), Some(1));
    }

    #[test]
    fn long_stint_confirms_clean_lap() {
        let mut h = Harness::new();
        drive_first_lap(&mut h, PRACTICE);
        assert_eq!(h.bob().lap(1).unwrap().is_in_lap, None);

        h.tick(session(
            PRACTICE,
            150.0,
            VehicleBuilder::new("Bob").laps_completed(2).sector(1).lap_distance(100.0).last_sectors(
                20.0, 44.0, 69.0,
            ),
        ));
        h.tick(session(
            PRACTICE,
            160.0,
            VehicleBuilder::new("Bob").laps_completed(2).sector(1).lap_distance(200.0),
        ));
        assert_eq!(h.bob().lap(2).unwrap().is_in_lap, Some(false));
        assert_eq!(h.bob().lap(2).unwrap().kind(), crate::recorders::LapKind::Flying);
        assert_eq!(h.bob().fastest_lap().map(|l| l.lap), Some(2));
    }

    #[test]
    fn ties_do_not_replace_fastest_and_unknown_laps_leave_holes() {
        let mut h = Harness::new();
        drive_first_lap(&mut h, RACE);
        h.tick(session(
            RACE,
            140.0,
            VehicleBuilder::new("Bob").laps_completed(2).sector(1).last_sectors(20.0, 45.0, 70.0),
        ));
        assert_eq!(h.bob().fastest_lap().map(|l| l.lap), Some(1));

        h.tick(session(
            RACE,
            210.0,
            VehicleBuilder::new("Bob").laps_completed(3).sector(1).last_sectors(-1.0, -1.0, -1.0),
        ));
        assert_eq!(h.bob().lap(3), None);
        assert_eq!(h.bob().laps().len(), 4);
        assert_eq!(h.bob().fastest_lap().map(|l| l.lap), Some(1));
    }

    #[test]
    fn skipped_laps_are_holes() {
        let mut h = Harness::new();
        h.tick(session(RACE, 0.0, VehicleBuilder::new("Bob")));
        h.tick(session(
            RACE,
            300.0,
            VehicleBuilder::new("Bob").laps_completed(3).last_sectors(20.0, 45.0, 70.0),
        ));
        assert_eq!(h.bob().lap(1), None);
        assert_eq!(h.bob().lap(2), None);
        assert_eq!(h.bob().lap(3).and_then(Laptime::laptime), Some(70.0));
    }

    #[test]
    fn finished_competitors_are_frozen() {
        let mut h = Harness::new();
        drive_first_lap(&mut h, RACE);
        let before = h.bob().clone();
        h.tick(session(
            RACE,
            140.0,
            VehicleBuilder::new("Bob").laps_completed(2).finish_status(1).last_sectors(19.0, 40.0, 60.0),
        ));
        assert_eq!(h.bob(), &before);

        h.tick(session(RACE, 150.0, VehicleBuilder::new("Carl").finish_status(2)));
        assert!(h.recorder.competitor("Carl").is_none());
    }

    #[test]
    fn invalid_finish_status_propagates() {
        let mut scoring = ScoringInfo::new(Units::default());
        let bytes = session(RACE, 0.0, VehicleBuilder::new("Bob").finish_status(8)).build();
        scoring.load_from_stream(&mut bytes.as_slice()).unwrap();
        let err = LaptimesRecorder::new().update(&scoring).unwrap_err();
        assert!(matches!(err, crate::TelemetryError::Decode { field: "mFinishStatus", .. }));
    }

    #[test]
    fn reset_forgets_competitors() {
        let mut h = Harness::new();
        drive_first_lap(&mut h, RACE);
        h.recorder.reset();
        assert!(h.recorder.competitor("Bob").is_none());
        assert!(h.recorder.session_fastest().is_none());
    }
}
