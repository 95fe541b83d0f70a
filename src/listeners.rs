//! Listener registration and dispatch.
//!
//! Every snapshot category has one listener trait. Listeners are shared as
//! `Rc<RefCell<_>>` and registered by identity: registering the same
//! allocation twice keeps one entry, unregistering an unknown listener does
//! nothing.
//!
//! Dispatch is synchronous and in registration order. It iterates over a
//! snapshot of the set, so a listener that registers or unregisters others
//! while being notified does not affect the running dispatch. A listener that
//! returns an error, or is already mutably borrowed, is logged and skipped;
//! the remaining listeners still run.
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use rfstats::listeners::ListenerSet;
//!
//! let mut set: ListenerSet<Vec<u32>> = ListenerSet::new();
//! let log = Rc::new(RefCell::new(Vec::new()));
//! assert!(set.register(log.clone()));
//! assert!(!set.register(log.clone()));
//!
//! set.dispatch("example", |l| {
//!     l.push(1);
//!     Ok(())
//! });
//! assert_eq!(*log.borrow(), vec![1]);
//! ```

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::warn;

use crate::data::DataMode;
use crate::LiveGameData;

/// Ordered set of listeners, unique by allocation.
pub struct ListenerSet<L: ?Sized> {
    listeners: Vec<Rc<RefCell<L>>>,
}

impl<L: ?Sized> Default for ListenerSet<L> {
    fn default() -> Self {
        Self { listeners: Vec::new() }
    }
}

impl<L: ?Sized> fmt::Debug for ListenerSet<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSet").field("len", &self.listeners.len()).finish()
    }
}

impl<L: ?Sized> ListenerSet<L> {
    pub fn new() -> Self {
        Self::default()
    }

    fn position<T: ?Sized>(&self, listener: &Rc<RefCell<T>>) -> Option<usize> {
        self.listeners.iter().position(|l| std::ptr::addr_eq(Rc::as_ptr(l), Rc::as_ptr(listener)))
    }

    /// Whether `listener` is registered. Works with the concrete or the trait-object handle.
    pub fn contains<T: ?Sized>(&self, listener: &Rc<RefCell<T>>) -> bool {
        self.position(listener).is_some()
    }

    /// Append `listener` unless it is already registered. Returns whether it was added.
    pub fn register(&mut self, listener: Rc<RefCell<L>>) -> bool {
        if self.contains(&listener) {
            return false;
        }
        self.listeners.push(listener);
        true
    }

    /// Remove `listener` if registered. Returns whether it was removed.
    pub fn unregister<T: ?Sized>(&mut self, listener: &Rc<RefCell<T>>) -> bool {
        match self.position(listener) {
            Some(index) => {
                self.listeners.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Call `notify` on every listener registered when dispatch starts.
    ///
    /// Returns how many listeners failed or were skipped.
    pub fn dispatch<F>(&self, category: &'static str, mut notify: F) -> usize
    where
        F: FnMut(&mut L) -> anyhow::Result<()>,
    {
        let snapshot = self.listeners.clone();
        let mut failures = 0;
        for (index, listener) in snapshot.iter().enumerate() {
            let Ok(mut listener) = listener.try_borrow_mut() else {
                warn!(category, index, "Listener is already borrowed, skipping");
                failures += 1;
                continue;
            };
            if let Err(error) = notify(&mut *listener) {
                warn!(category, index, error = %format!("{error:#}"), "Listener failed");
                failures += 1;
            }
        }
        failures
    }
}

/// Notified after every telemetry update.
pub trait TelemetryListener {
    fn on_telemetry_updated(&mut self, game: &LiveGameData, mode: DataMode) -> anyhow::Result<()>;
}

/// Notified after every scoring update, once all vehicle slots are decoded.
pub trait ScoringInfoListener {
    fn on_scoring_info_updated(&mut self, game: &LiveGameData, mode: DataMode)
    -> anyhow::Result<()>;
}

pub trait GraphicsListener {
    fn on_graphics_updated(&mut self, game: &LiveGameData, mode: DataMode) -> anyhow::Result<()>;
}

pub trait WeatherListener {
    fn on_weather_updated(&mut self, game: &LiveGameData, mode: DataMode) -> anyhow::Result<()>;
}

pub trait CommentaryListener {
    fn on_commentary_updated(&mut self, game: &LiveGameData, mode: DataMode) -> anyhow::Result<()>;
}

/// Host lifecycle events. Every method defaults to doing nothing.
pub trait GameEventsListener {
    /// A new session was loaded; per-session state should be cleared.
    fn on_session_started(&mut self, _game: &LiveGameData, _mode: DataMode) -> anyhow::Result<()> {
        Ok(())
    }

    /// The player started driving. [`LiveGameData::realtime_entered_id`] has already advanced.
    fn on_realtime_entered(&mut self, _game: &LiveGameData, _mode: DataMode) -> anyhow::Result<()> {
        Ok(())
    }

    /// The player stopped driving and returned to the monitor.
    fn on_realtime_exited(&mut self, _game: &LiveGameData, _mode: DataMode) -> anyhow::Result<()> {
        Ok(())
    }
}
