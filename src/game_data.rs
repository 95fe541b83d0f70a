//! The live data model a host plugin feeds.
//!
//! [`LiveGameData`] owns one domain object per snapshot category, the
//! listener sets, and the built-in recorders. The host drives it in two steps
//! per tick and category: fill the buffer (through the `*_mut` accessors or
//! one of the `load_*` helpers), then call the matching `on_*_updated`
//! method, which counts the update and notifies the listeners in
//! registration order.
//!
//! Lifecycle calls (`on_session_started`, `on_realtime_entered`,
//! `on_realtime_exited`) maintain the session id, the realtime-entry id and
//! the session clock, and notify [`GameEventsListener`]s.

use std::cell::{RefCell, RefMut};
use std::io::Read;
use std::rc::Rc;
use std::time::Instant;

use tracing::{debug, info, trace, warn};

use crate::config::{CoreSettings, VehiclePhysics};
use crate::data::{
    CommentaryInfo, DataMode, GraphicsInfo, ScoringInfo, TelemetryData, UpdateScope,
    VehicleScoringInfo, WeatherInfo,
};
use crate::host::HostVersion;
use crate::lifetime::LifetimeManager;
use crate::listeners::{
    CommentaryListener, GameEventsListener, GraphicsListener, ListenerSet, ScoringInfoListener,
    TelemetryListener, WeatherListener,
};
use crate::recorders::{FuelUsageRecorder, LaptimesRecorder, TopspeedRecorder};
use crate::vehicle_state::VehicleState;
use crate::{Result, TelemetryError};

/// Decoded host state, derived statistics and listener registry.
pub struct LiveGameData {
    host_version: HostVersion,
    settings: CoreSettings,
    physics: VehiclePhysics,
    mode: DataMode,

    telemetry: TelemetryData,
    scoring: ScoringInfo,
    graphics: GraphicsInfo,
    weather: WeatherInfo,
    commentary: Option<CommentaryInfo>,

    session_id: u64,
    realtime_entered_id: u64,
    in_realtime: bool,
    session_time: f32,
    engine_boost: f32,

    telemetry_listeners: ListenerSet<dyn TelemetryListener>,
    scoring_listeners: ListenerSet<dyn ScoringInfoListener>,
    graphics_listeners: ListenerSet<dyn GraphicsListener>,
    weather_listeners: ListenerSet<dyn WeatherListener>,
    commentary_listeners: ListenerSet<dyn CommentaryListener>,
    event_listeners: ListenerSet<dyn GameEventsListener>,

    laptimes: Rc<RefCell<LaptimesRecorder>>,
    fuel_usage: Rc<RefCell<FuelUsageRecorder>>,
    top_speed: Rc<RefCell<TopspeedRecorder>>,
    lifetime: Rc<RefCell<LifetimeManager>>,
}

impl std::fmt::Debug for LiveGameData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LiveGameData")
            .field("host_version", &self.host_version)
            .field("mode", &self.mode)
            .field("session_id", &self.session_id)
            .field("realtime_entered_id", &self.realtime_entered_id)
            .field("in_realtime", &self.in_realtime)
            .field("session_time", &self.session_time)
            .finish_non_exhaustive()
    }
}

impl LiveGameData {
    /// Build the data model for `host_version` with the built-in recorders registered.
    ///
    /// Fails with [`TelemetryError::Config`] when `settings` cannot configure a recorder.
    pub fn new(
        host_version: HostVersion,
        settings: CoreSettings,
        physics: VehiclePhysics,
    ) -> Result<Self> {
        let units = settings.units();
        let laptimes = Rc::new(RefCell::new(LaptimesRecorder::new()));
        let fuel_usage = Rc::new(RefCell::new(FuelUsageRecorder::new(&settings)?));
        let top_speed = Rc::new(RefCell::new(TopspeedRecorder::new(settings.top_speed_warmup)));
        let lifetime = Rc::new(RefCell::new(LifetimeManager::new(
            physics.clone(),
            settings.race_length_percentage,
        )));

        let mut game = Self {
            host_version,
            engine_boost: physics.engine.boost_neutral,
            settings,
            physics,
            mode: DataMode::Live,
            telemetry: TelemetryData::new(units),
            scoring: ScoringInfo::new(units),
            graphics: GraphicsInfo::new(),
            weather: WeatherInfo::new(units),
            commentary: host_version.supports_commentary().then(CommentaryInfo::new),
            session_id: 0,
            realtime_entered_id: 0,
            in_realtime: false,
            session_time: 0.0,
            telemetry_listeners: ListenerSet::new(),
            scoring_listeners: ListenerSet::new(),
            graphics_listeners: ListenerSet::new(),
            weather_listeners: ListenerSet::new(),
            commentary_listeners: ListenerSet::new(),
            event_listeners: ListenerSet::new(),
            laptimes: laptimes.clone(),
            fuel_usage: fuel_usage.clone(),
            top_speed: top_speed.clone(),
            lifetime: lifetime.clone(),
        };

        game.scoring_listeners.register(laptimes.clone());
        game.scoring_listeners.register(fuel_usage.clone());
        game.telemetry_listeners.register(top_speed.clone());
        game.telemetry_listeners.register(lifetime);
        game.event_listeners.register(laptimes);
        game.event_listeners.register(fuel_usage);
        game.event_listeners.register(top_speed);

        debug!(%host_version, "Live game data created");
        Ok(game)
    }

    pub fn host_version(&self) -> HostVersion {
        self.host_version
    }

    pub fn settings(&self) -> &CoreSettings {
        &self.settings
    }

    pub fn physics(&self) -> &VehiclePhysics {
        &self.physics
    }

    /// Replace the vehicle physics. The wear state picks them up at the next realtime entry.
    ///
    /// Nothing changes if the lifetime recorder is borrowed elsewhere.
    pub fn set_physics(&mut self, physics: VehiclePhysics) -> Result<()> {
        let mut lifetime = borrow_recorder_mut(&self.lifetime, "lifetime")?;
        lifetime.set_physics(physics.clone());
        drop(lifetime);
        self.physics = physics;
        Ok(())
    }

    pub fn data_mode(&self) -> DataMode {
        self.mode
    }

    pub fn set_data_mode(&mut self, mode: DataMode) {
        self.mode = mode;
    }

    /// Boost mapping currently selected by the driver.
    pub fn engine_boost(&self) -> f32 {
        self.engine_boost
    }

    pub fn set_engine_boost(&mut self, boost: f32) {
        self.engine_boost = boost;
    }

    // Lifecycle

    /// Incremented on every session start; zero before the first.
    pub fn session_id(&self) -> u64 {
        self.session_id
    }

    /// Incremented every time the player enters the car; zero before the first.
    pub fn realtime_entered_id(&self) -> u64 {
        self.realtime_entered_id
    }

    pub fn is_in_realtime(&self) -> bool {
        self.in_realtime
    }

    /// Session time in seconds: the last scoring time plus the telemetry
    /// steps received since.
    pub fn session_time(&self) -> f32 {
        self.session_time
    }

    pub fn update_scope(&self) -> UpdateScope {
        UpdateScope {
            session_id: self.session_id,
            realtime_id: self.realtime_entered_id,
            in_realtime: self.in_realtime,
        }
    }

    /// A new session was loaded. Returns the number of failed listeners.
    pub fn on_session_started(&mut self) -> usize {
        self.session_id += 1;
        self.session_time = 0.0;
        self.in_realtime = false;
        self.scoring.reset_stints();
        info!(session_id = self.session_id, "Session started");

        let (game, mode) = (&*self, self.mode);
        game.event_listeners.dispatch("session start", |l| l.on_session_started(game, mode))
    }

    /// The player started driving. Returns the number of failed listeners.
    pub fn on_realtime_entered(&mut self) -> usize {
        self.realtime_entered_id += 1;
        self.in_realtime = true;
        debug!(realtime_id = self.realtime_entered_id, "Entered realtime");

        let (game, mode) = (&*self, self.mode);
        game.event_listeners.dispatch("realtime entry", |l| l.on_realtime_entered(game, mode))
    }

    /// The player returned to the monitor. Returns the number of failed listeners.
    pub fn on_realtime_exited(&mut self) -> usize {
        self.in_realtime = false;
        debug!(realtime_id = self.realtime_entered_id, "Exited realtime");

        let (game, mode) = (&*self, self.mode);
        game.event_listeners.dispatch("realtime exit", |l| l.on_realtime_exited(game, mode))
    }

    // Telemetry

    pub fn telemetry_data(&self) -> &TelemetryData {
        &self.telemetry
    }

    pub fn telemetry_data_mut(&mut self) -> &mut TelemetryData {
        &mut self.telemetry
    }

    /// Count a telemetry update and notify listeners. Returns the number of failed listeners.
    pub fn on_telemetry_updated(&mut self) -> usize {
        self.session_time += self.telemetry.delta_time();
        let scope = self.update_scope();
        self.telemetry.update.record(scope);
        trace!(counter = self.telemetry.update.counter(), "Telemetry updated");

        let (game, mode) = (&*self, self.mode);
        game.telemetry_listeners.dispatch("telemetry", |l| l.on_telemetry_updated(game, mode))
    }

    pub fn load_telemetry<R: Read + ?Sized>(&mut self, reader: &mut R) -> Result<usize> {
        self.telemetry.prepare_update();
        self.telemetry.load_from_stream(reader)?;
        Ok(self.on_telemetry_updated())
    }

    pub fn register_telemetry_listener(&mut self, listener: Rc<RefCell<dyn TelemetryListener>>) -> bool {
        self.telemetry_listeners.register(listener)
    }

    pub fn unregister_telemetry_listener<T: ?Sized>(&mut self, listener: &Rc<RefCell<T>>) -> bool {
        self.telemetry_listeners.unregister(listener)
    }

    // Scoring

    pub fn scoring_info(&self) -> &ScoringInfo {
        &self.scoring
    }

    pub fn scoring_info_mut(&mut self) -> &mut ScoringInfo {
        &mut self.scoring
    }

    /// Count a scoring update and notify listeners. Returns the number of failed listeners.
    ///
    /// All vehicle slots must be filled before this is called.
    pub fn on_scoring_updated(&mut self) -> usize {
        self.scoring.refresh_stints();
        self.session_time = self.scoring.current_time();
        let scope = self.update_scope();
        self.scoring.update.record(scope);
        trace!(
            counter = self.scoring.update.counter(),
            vehicles = self.scoring.num_vehicles(),
            "Scoring updated"
        );

        let (game, mode) = (&*self, self.mode);
        game.scoring_listeners.dispatch("scoring", |l| l.on_scoring_info_updated(game, mode))
    }

    pub fn load_scoring<R: Read + ?Sized>(&mut self, reader: &mut R) -> Result<usize> {
        self.scoring.load_from_stream(reader)?;
        Ok(self.on_scoring_updated())
    }

    pub fn register_scoring_listener(&mut self, listener: Rc<RefCell<dyn ScoringInfoListener>>) -> bool {
        self.scoring_listeners.register(listener)
    }

    pub fn unregister_scoring_listener<T: ?Sized>(&mut self, listener: &Rc<RefCell<T>>) -> bool {
        self.scoring_listeners.unregister(listener)
    }

    // Graphics

    pub fn graphics_info(&self) -> &GraphicsInfo {
        &self.graphics
    }

    pub fn graphics_info_mut(&mut self) -> &mut GraphicsInfo {
        &mut self.graphics
    }

    pub fn on_graphics_updated(&mut self) -> usize {
        let scope = self.update_scope();
        self.graphics.update.record(scope);

        let (game, mode) = (&*self, self.mode);
        game.graphics_listeners.dispatch("graphics", |l| l.on_graphics_updated(game, mode))
    }

    pub fn load_graphics<R: Read + ?Sized>(&mut self, reader: &mut R) -> Result<usize> {
        self.graphics.prepare_update();
        self.graphics.load_from_stream(reader)?;
        Ok(self.on_graphics_updated())
    }

    pub fn register_graphics_listener(&mut self, listener: Rc<RefCell<dyn GraphicsListener>>) -> bool {
        self.graphics_listeners.register(listener)
    }

    pub fn unregister_graphics_listener<T: ?Sized>(&mut self, listener: &Rc<RefCell<T>>) -> bool {
        self.graphics_listeners.unregister(listener)
    }

    // Weather

    pub fn weather_info(&self) -> &WeatherInfo {
        &self.weather
    }

    pub fn weather_info_mut(&mut self) -> &mut WeatherInfo {
        &mut self.weather
    }

    pub fn on_weather_updated(&mut self) -> usize {
        let scope = self.update_scope();
        self.weather.update.record(scope);

        let (game, mode) = (&*self, self.mode);
        game.weather_listeners.dispatch("weather", |l| l.on_weather_updated(game, mode))
    }

    pub fn load_weather<R: Read + ?Sized>(&mut self, reader: &mut R) -> Result<usize> {
        self.weather.prepare_update();
        self.weather.load_from_stream(reader)?;
        Ok(self.on_weather_updated())
    }

    pub fn register_weather_listener(&mut self, listener: Rc<RefCell<dyn WeatherListener>>) -> bool {
        self.weather_listeners.register(listener)
    }

    pub fn unregister_weather_listener<T: ?Sized>(&mut self, listener: &Rc<RefCell<T>>) -> bool {
        self.weather_listeners.unregister(listener)
    }

    // Commentary

    /// `None` when the host version delivers no commentary requests.
    pub fn commentary_info(&self) -> Option<&CommentaryInfo> {
        self.commentary.as_ref()
    }

    pub fn commentary_info_mut(&mut self) -> Option<&mut CommentaryInfo> {
        self.commentary.as_mut()
    }

    /// Count a commentary update and notify listeners.
    ///
    /// Does nothing and returns zero when the host version has no commentary.
    pub fn on_commentary_updated(&mut self) -> usize {
        let scope = self.update_scope();
        let Some(commentary) = self.commentary.as_mut() else {
            debug!(host_version = %self.host_version, "Ignoring commentary update");
            return 0;
        };
        commentary.update.record(scope);

        let (game, mode) = (&*self, self.mode);
        game.commentary_listeners.dispatch("commentary", |l| l.on_commentary_updated(game, mode))
    }

    pub fn load_commentary<R: Read + ?Sized>(&mut self, reader: &mut R) -> Result<usize> {
        let Some(commentary) = self.commentary.as_mut() else {
            return Err(TelemetryError::Version {
                expected: crate::host::LATEST_INTERFACE_VERSION,
                found: self.host_version.interface_version(),
            });
        };
        commentary.prepare_update();
        commentary.load_from_stream(reader)?;
        Ok(self.on_commentary_updated())
    }

    pub fn register_commentary_listener(&mut self, listener: Rc<RefCell<dyn CommentaryListener>>) -> bool {
        self.commentary_listeners.register(listener)
    }

    pub fn unregister_commentary_listener<T: ?Sized>(&mut self, listener: &Rc<RefCell<T>>) -> bool {
        self.commentary_listeners.unregister(listener)
    }

    // Game events

    pub fn register_game_events_listener(&mut self, listener: Rc<RefCell<dyn GameEventsListener>>) -> bool {
        self.event_listeners.register(listener)
    }

    pub fn unregister_game_events_listener<T: ?Sized>(&mut self, listener: &Rc<RefCell<T>>) -> bool {
        self.event_listeners.unregister(listener)
    }

    // Derived statistics

    pub fn laptimes(&self) -> &Rc<RefCell<LaptimesRecorder>> {
        &self.laptimes
    }

    pub fn fuel_usage(&self) -> &Rc<RefCell<FuelUsageRecorder>> {
        &self.fuel_usage
    }

    pub fn top_speed(&self) -> &Rc<RefCell<TopspeedRecorder>> {
        &self.top_speed
    }

    pub fn lifetime(&self) -> &Rc<RefCell<LifetimeManager>> {
        &self.lifetime
    }

    /// Register one fuel live-reset trigger. Returns whether the reset fired.
    pub fn trigger_fuel_live_reset(&self, now: Instant) -> Result<bool> {
        Ok(borrow_recorder_mut(&self.fuel_usage, "fuel usage")?.trigger_live_reset(now))
    }

    /// Race status of `vehicle` with the configured display delay.
    pub fn vehicle_state(&self, vehicle: &VehicleScoringInfo) -> Result<VehicleState> {
        let laptimes = self.laptimes.try_borrow().map_err(|_| {
            warn!(component = "laptimes", "Recorder already borrowed");
            TelemetryError::busy("laptimes")
        })?;
        let driver = vehicle.driver_name();
        Ok(VehicleState::classify(
            vehicle,
            laptimes.competitor(&driver),
            laptimes.session_fastest().map(|(name, _)| name),
            self.session_time,
            self.settings.fastest_lap_display_delay,
        ))
    }
}

fn borrow_recorder_mut<'a, T>(
    recorder: &'a Rc<RefCell<T>>,
    component: &'static str,
) -> Result<RefMut<'a, T>> {
    recorder.try_borrow_mut().map_err(|_| {
        warn!(component, "Recorder already borrowed");
        TelemetryError::busy(component)
    })
}
