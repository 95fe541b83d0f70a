//! Update bookkeeping shared by every domain object.

use serde::{Deserialize, Serialize};

/// How the snapshots reaching the listeners were produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataMode {
    /// Pushed by the running host.
    #[default]
    Live,
    /// Read back from a recording.
    Replay,
}

/// Lifecycle position a snapshot was decoded in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateScope {
    pub session_id: u64,
    pub realtime_id: u64,
    pub in_realtime: bool,
}

/// Update counter plus the transient flags of the most recent update.
///
/// The counter only grows. A domain object that has never been updated holds
/// zero-filled bytes and reports `!is_valid()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateState {
    counter: u64,
    last: UpdateScope,
}

impl UpdateState {
    pub fn counter(&self) -> u64 {
        self.counter
    }

    pub fn is_valid(&self) -> bool {
        self.counter > 0
    }

    /// Whether the last update arrived while the player was driving.
    pub fn updated_in_realtime(&self) -> bool {
        self.last.in_realtime
    }

    pub fn session_id(&self) -> u64 {
        self.last.session_id
    }

    pub fn realtime_id(&self) -> u64 {
        self.last.realtime_id
    }

    /// Whether the last update belongs to the session `scope` is in.
    pub fn is_in_session(&self, scope: &UpdateScope) -> bool {
        self.is_valid() && self.last.session_id == scope.session_id
    }

    /// Whether the last update belongs to the realtime stint `scope` is in.
    pub fn is_in_realtime(&self, scope: &UpdateScope) -> bool {
        self.is_in_session(scope) && scope.in_realtime && self.last.realtime_id == scope.realtime_id
    }

    pub(crate) fn record(&mut self, scope: UpdateScope) {
        self.counter += 1;
        self.last = scope;
    }
}
