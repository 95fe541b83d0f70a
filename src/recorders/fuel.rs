//! Per-lap fuel consumption of the player's vehicle.
//!
//! Usage is measured between lap boundaries. Only laps driven with a stint
//! length of at least two count toward the average: the first lap after
//! leaving the pits has no clean fuel level at its start.
//!
//! The average is persisted as a single decimal number when the player stops
//! driving, and read back when the recorder is constructed.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::config::CoreSettings;
use crate::data::{DataMode, ScoringInfo};
use crate::listeners::{GameEventsListener, ScoringInfoListener};
use crate::{LiveGameData, Result, TelemetryError};

/// Stint length from which a lap's fuel usage is trusted.
const RELEVANT_STINT_LENGTH: f32 = 2.0;
/// Consecutive triggers needed for a live reset.
const LIVE_RESET_TRIGGERS: u8 = 3;

#[derive(Debug)]
pub struct FuelUsageRecorder {
    file: Option<PathBuf>,
    live_reset_window: Duration,
    stored_average: Option<f32>,

    laps_completed: Option<i32>,
    fuel_at_lap_start: Option<f32>,
    last_lap: Option<f32>,
    relevant_laps: u32,
    sum: f32,
    average: Option<f32>,

    reset_triggers: u8,
    last_trigger: Option<Instant>,
}

impl FuelUsageRecorder {
    /// Create a recorder and read the previously persisted average, if any.
    ///
    /// Fails with [`TelemetryError::Config`] when the live-reset window is not
    /// a valid duration.
    pub fn new(settings: &CoreSettings) -> Result<Self> {
        let live_reset_window = settings.live_reset_duration()?;
        let stored_average = settings.fuel_usage_file.as_deref().and_then(read_average);
        Ok(Self {
            file: settings.fuel_usage_file.clone(),
            live_reset_window,
            stored_average,
            laps_completed: None,
            fuel_at_lap_start: None,
            last_lap: None,
            relevant_laps: 0,
            sum: 0.0,
            average: None,
            reset_triggers: 0,
            last_trigger: None,
        })
    }

    /// Liters used on the last relevant lap.
    pub fn last_lap(&self) -> Option<f32> {
        self.last_lap
    }

    /// Average liters per relevant lap.
    pub fn average(&self) -> Option<f32> {
        self.average
    }

    pub fn relevant_laps(&self) -> u32 {
        self.relevant_laps
    }

    /// Average persisted by a previous session.
    pub fn stored_average(&self) -> Option<f32> {
        self.stored_average
    }

    /// Current average, falling back to the persisted one before the first relevant lap.
    pub fn estimate(&self) -> Option<f32> {
        self.average.or(self.stored_average)
    }

    /// Clear everything measured this session.
    pub fn reset(&mut self) {
        self.laps_completed = None;
        self.fuel_at_lap_start = None;
        self.reset_statistics();
    }

    fn reset_statistics(&mut self) {
        self.last_lap = None;
        self.relevant_laps = 0;
        self.sum = 0.0;
        self.average = None;
    }

    /// Register one live-reset trigger at `now`.
    ///
    /// The third trigger, each within the live-reset window of the previous
    /// one, clears the running statistics and returns `true`. Lap tracking
    /// and the fuel baseline are kept.
    pub fn trigger_live_reset(&mut self, now: Instant) -> bool {
        let chained = self
            .last_trigger
            .is_some_and(|last| now.saturating_duration_since(last) <= self.live_reset_window);
        self.reset_triggers = if chained { self.reset_triggers + 1 } else { 1 };
        self.last_trigger = Some(now);

        if self.reset_triggers < LIVE_RESET_TRIGGERS {
            return false;
        }
        debug!("Live reset of fuel usage");
        self.reset_triggers = 0;
        self.last_trigger = None;
        self.reset_statistics();
        true
    }

    /// Feed the player's lap count, stint length and fuel level for one scoring tick.
    pub fn record(&mut self, laps_completed: i32, stint_length: f32, fuel: f32) {
        let previous = self.laps_completed.replace(laps_completed);
        match previous {
            Some(previous) if laps_completed > previous => {}
            Some(previous) if laps_completed < previous => {
                self.fuel_at_lap_start = None;
                return;
            }
            _ => return,
        }

        let baseline = self.fuel_at_lap_start.replace(fuel);
        if stint_length < RELEVANT_STINT_LENGTH {
            return;
        }
        let Some(baseline) = baseline else {
            return;
        };

        let used = baseline - fuel;
        self.last_lap = Some(used);
        self.relevant_laps += 1;
        self.sum += used;
        let average = self.sum / self.relevant_laps as f32;
        self.average = Some(average);
        debug!(lap = laps_completed, used, average, "Fuel usage recorded");
    }

    pub fn update(&mut self, scoring: &ScoringInfo, fuel: f32) {
        if let Some(player) = scoring.player_vehicle() {
            self.record(player.laps_completed(), scoring.stint_length(player), fuel);
        }
    }

    /// Write the current average to the configured file, overwriting it.
    ///
    /// Nothing is written without a file or a positive average.
    pub fn persist(&self) -> Result<()> {
        let (Some(path), Some(average)) = (self.file.as_deref(), self.average) else {
            return Ok(());
        };
        if average <= 0.0 {
            return Ok(());
        }
        std::fs::write(path, format!("{average:.3}\n"))
            .map_err(|e| TelemetryError::file_error(path.to_path_buf(), e))?;
        info!(path = %path.display(), average, "Persisted average fuel usage");
        Ok(())
    }
}

fn read_average(path: &Path) -> Option<f32> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "No stored fuel usage");
            return None;
        }
    };
    match text.trim().parse::<f32>() {
        Ok(average) if average > 0.0 => Some(average),
        _ => {
            warn!(path = %path.display(), "Ignoring malformed fuel usage file");
            None
        }
    }
}

impl ScoringInfoListener for FuelUsageRecorder {
    fn on_scoring_info_updated(
        &mut self,
        game: &LiveGameData,
        _mode: DataMode,
    ) -> anyhow::Result<()> {
        let telemetry = game.telemetry_data();
        if telemetry.update_state().is_valid() {
            self.update(game.scoring_info(), telemetry.fuel_liters());
        }
        Ok(())
    }
}

impl GameEventsListener for FuelUsageRecorder {
    fn on_session_started(&mut self, _game: &LiveGameData, _mode: DataMode) -> anyhow::Result<()> {
        self.reset();
        Ok(())
    }

    fn on_realtime_exited(&mut self, _game: &LiveGameData, mode: DataMode) -> anyhow::Result<()> {
        if mode == DataMode::Live {
            self.persist()?;
        }
        Ok(())
    }
}
