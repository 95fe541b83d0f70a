//! Host plugin interface versions.
//!
//! The host announces its plugin interface version once, before the first
//! snapshot. The version decides which categories the host delivers and which
//! structure layouts they use; it is fixed for the lifetime of a
//! [`LiveGameData`](crate::LiveGameData).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::layout;
use crate::{Result, TelemetryError};

/// Newest interface version this crate understands.
pub const LATEST_INTERFACE_VERSION: i32 = 3;

/// Supported host interface versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostVersion {
    /// `InternalsPluginV2`: telemetry, scoring and graphics in their V2 layouts.
    V2,
    /// `InternalsPluginV3`: adds commentary requests.
    V3,
}

/// Snapshot sizes a host version delivers, per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotSizes {
    pub telemetry: usize,
    pub scoring: usize,
    pub vehicle_scoring: usize,
    pub graphics: usize,
    pub weather: usize,
    pub commentary: Option<usize>,
}

impl HostVersion {
    /// Select the variant for the interface version the host reports.
    pub fn detect(interface_version: i32) -> Result<Self> {
        match interface_version {
            2 => Ok(HostVersion::V2),
            3 => Ok(HostVersion::V3),
            found => {
                Err(TelemetryError::Version { expected: LATEST_INTERFACE_VERSION, found })
            }
        }
    }

    pub fn interface_version(self) -> i32 {
        match self {
            HostVersion::V2 => 2,
            HostVersion::V3 => 3,
        }
    }

    pub fn supports_commentary(self) -> bool {
        matches!(self, HostVersion::V3)
    }

    pub fn snapshot_sizes(self) -> SnapshotSizes {
        SnapshotSizes {
            telemetry: layout::telemetry::SIZE,
            scoring: layout::scoring::SIZE,
            vehicle_scoring: layout::vehicle_scoring::SIZE,
            graphics: layout::graphics::SIZE,
            weather: layout::weather::SIZE,
            commentary: self.supports_commentary().then_some(layout::commentary::SIZE),
        }
    }
}

impl Default for HostVersion {
    fn default() -> Self {
        HostVersion::V3
    }
}

impl fmt::Display for HostVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InternalsPluginV{}", self.interface_version())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_versions_are_detected() {
        assert_eq!(HostVersion::detect(2).unwrap(), HostVersion::V2);
        assert_eq!(HostVersion::detect(3).unwrap(), HostVersion::V3);
        assert_eq!(HostVersion::V3.to_string(), "InternalsPluginV3");
    }

    #[test]
    fn unknown_versions_are_rejected() {
        for found in [0, 1, 4, -3] {
            match HostVersion::detect(found) {
                Err(TelemetryError::Version { expected, found: f }) => {
                    assert_eq!(expected, LATEST_INTERFACE_VERSION);
                    assert_eq!(f, found);
                }
                other => panic!("version {found} gave {other:?}"),
            }
        }
    }

    #[test]
    fn commentary_only_from_v3() {
        assert_eq!(HostVersion::V2.snapshot_sizes().commentary, None);
        assert_eq!(HostVersion::V3.snapshot_sizes().commentary, Some(60));
        assert_eq!(HostVersion::V2.snapshot_sizes().telemetry, 780);
    }
}
