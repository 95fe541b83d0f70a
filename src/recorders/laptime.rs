//! One competitor's one lap.

use serde::{Deserialize, Serialize};

/// How a lap relates to pit stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LapKind {
    /// Started from pit road.
    OutLap,
    /// Ended on pit road.
    InLap,
    /// Started and ended on track.
    Flying,
    /// Not yet known.
    Unknown,
}

/// Sector durations and pit classification of a single lap.
///
/// Sector durations are `None` while unknown. In/out-lap flags are tri-state:
/// `None` means not yet decided.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Laptime {
    /// 1-based lap number.
    pub lap: i32,
    pub sectors: [Option<f32>; 3],
    pub is_out_lap: Option<bool>,
    pub is_in_lap: Option<bool>,
}

impl Laptime {
    pub fn new(lap: i32) -> Self {
        Self { lap, ..Self::default() }
    }

    pub fn sector1(&self) -> Option<f32> {
        self.sectors[0]
    }

    pub fn sector2(&self) -> Option<f32> {
        self.sectors[1]
    }

    pub fn sector3(&self) -> Option<f32> {
        self.sectors[2]
    }

    /// Sum of the three sectors, or `None` if any is unknown.
    pub fn laptime(&self) -> Option<f32> {
        let [Some(s1), Some(s2), Some(s3)] = self.sectors else {
            return None;
        };
        Some(s1 + s2 + s3)
    }

    /// Whether every sector is known.
    pub fn is_finished(&self) -> bool {
        self.laptime().is_some()
    }

    pub fn kind(&self) -> LapKind {
        match (self.is_out_lap, self.is_in_lap) {
            (Some(true), _) => LapKind::OutLap,
            (_, Some(true)) => LapKind::InLap,
            (Some(false), Some(false)) => LapKind::Flying,
            _ => LapKind::Unknown,
        }
    }

    /// Strictly faster than `other`. A lap without a time is never faster.
    pub fn is_faster_than(&self, other: &Laptime) -> bool {
        match (self.laptime(), other.laptime()) {
            (Some(mine), Some(theirs)) => mine < theirs,
            (Some(_), None) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn laptime_requires_all_sectors() {
        let mut lap = Laptime::new(3);
        lap.sectors = [Some(20.0), Some(25.0), None];
        assert_eq!(lap.laptime(), None);
        assert!(!lap.is_finished());
        lap.sectors[2] = Some(25.0);
        assert_eq!(lap.laptime(), Some(70.0));
    }

    #[test]
    fn kind_from_flags() {
        let mut lap = Laptime::new(1);
        assert_eq!(lap.kind(), LapKind::Unknown);
        lap.is_out_lap = Some(false);
        assert_eq!(lap.kind(), LapKind::Unknown);
        lap.is_in_lap = Some(false);
        assert_eq!(lap.kind(), LapKind::Flying);
        lap.is_in_lap = Some(true);
        assert_eq!(lap.kind(), LapKind::InLap);
        lap.is_out_lap = Some(true);
        assert_eq!(lap.kind(), LapKind::OutLap);
    }

    #[test]
    fn ties_are_not_faster() {
        let mut a = Laptime::new(1);
        a.sectors = [Some(20.0), Some(25.0), Some(25.0)];
        let b = Laptime { lap: 2, ..a };
        assert!(!b.is_faster_than(&a));
        assert!(a.is_faster_than(&Laptime::new(3)));
        assert!(!Laptime::new(3).is_faster_than(&a));
    }
}
