//! Enumerated snapshot fields.
//!
//! The host encodes these as small signed or unsigned integers. A raw value
//! outside the documented range means the snapshot does not match the layout
//! this crate was built for, so decoding fails instead of guessing a default.

use serde::{Deserialize, Serialize};

use crate::{Result, TelemetryError};

/// Session kind from `ScoringInfoV2::mSession`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionType {
    TestDay,
    Practice1,
    Practice2,
    Practice3,
    Practice4,
    Qualifying,
    Warmup,
    Race,
}

impl SessionType {
    pub fn from_raw(raw: i32) -> Result<Self> {
        Ok(match raw {
            0 => SessionType::TestDay,
            1 => SessionType::Practice1,
            2 => SessionType::Practice2,
            3 => SessionType::Practice3,
            4 => SessionType::Practice4,
            5 => SessionType::Qualifying,
            6 => SessionType::Warmup,
            7 => SessionType::Race,
            other => return Err(TelemetryError::out_of_range("mSession", other)),
        })
    }

    pub fn is_race(self) -> bool {
        self == SessionType::Race
    }

    pub fn is_practice(self) -> bool {
        matches!(
            self,
            SessionType::Practice1
                | SessionType::Practice2
                | SessionType::Practice3
                | SessionType::Practice4
        )
    }
}

/// Session phase from `ScoringInfoV2::mGamePhase`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GamePhase {
    BeforeSession,
    ReconnaissanceLaps,
    GridWalkThrough,
    FormationLap,
    StartingLightCountdown,
    GreenFlag,
    FullCourseYellow,
    SessionStopped,
    SessionOver,
}

impl GamePhase {
    pub fn from_raw(raw: u8) -> Result<Self> {
        Ok(match raw {
            0 => GamePhase::BeforeSession,
            1 => GamePhase::ReconnaissanceLaps,
            2 => GamePhase::GridWalkThrough,
            3 => GamePhase::FormationLap,
            4 => GamePhase::StartingLightCountdown,
            5 => GamePhase::GreenFlag,
            6 => GamePhase::FullCourseYellow,
            7 => GamePhase::SessionStopped,
            8 => GamePhase::SessionOver,
            other => return Err(TelemetryError::out_of_range("mGamePhase", other)),
        })
    }
}

/// Full-course yellow state from `ScoringInfoV2::mYellowFlagState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum YellowFlagState {
    Invalid,
    NoFlag,
    Pending,
    PitsClosed,
    PitLeadLap,
    PitsOpen,
    LastLap,
    Resume,
    RaceHalt,
}

impl YellowFlagState {
    pub fn from_raw(raw: i8) -> Result<Self> {
        Ok(match raw {
            -1 => YellowFlagState::Invalid,
            0 => YellowFlagState::NoFlag,
            1 => YellowFlagState::Pending,
            2 => YellowFlagState::PitsClosed,
            3 => YellowFlagState::PitLeadLap,
            4 => YellowFlagState::PitsOpen,
            5 => YellowFlagState::LastLap,
            6 => YellowFlagState::Resume,
            7 => YellowFlagState::RaceHalt,
            other => return Err(TelemetryError::out_of_range("mYellowFlagState", other)),
        })
    }
}

/// Classification status from `VehicleScoringInfo::mFinishStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FinishStatus {
    None,
    Finished,
    Dnf,
    Dq,
}

impl FinishStatus {
    pub fn from_raw(raw: i8) -> Result<Self> {
        Ok(match raw {
            0 => FinishStatus::None,
            1 => FinishStatus::Finished,
            2 => FinishStatus::Dnf,
            3 => FinishStatus::Dq,
            other => return Err(TelemetryError::out_of_range("mFinishStatus", other)),
        })
    }
}

/// Who is driving a vehicle, from `VehicleScoringInfoV2::mControl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VehicleControl {
    Nobody,
    LocalPlayer,
    LocalAi,
    Remote,
    Replay,
}

impl VehicleControl {
    pub fn from_raw(raw: i8) -> Result<Self> {
        Ok(match raw {
            -1 => VehicleControl::Nobody,
            0 => VehicleControl::LocalPlayer,
            1 => VehicleControl::LocalAi,
            2 => VehicleControl::Remote,
            3 => VehicleControl::Replay,
            other => return Err(TelemetryError::out_of_range("mControl", other)),
        })
    }
}

/// Track sector a vehicle is currently in.
///
/// The host numbers sectors 0 = third, 1 = first, 2 = second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sector {
    Sector1,
    Sector2,
    Sector3,
}

impl Sector {
    pub fn from_raw(raw: i8) -> Result<Self> {
        Ok(match raw {
            1 => Sector::Sector1,
            2 => Sector::Sector2,
            0 => Sector::Sector3,
            other => return Err(TelemetryError::out_of_range("mSector", other)),
        })
    }

    /// 1-based sector number.
    pub fn number(self) -> u8 {
        match self {
            Sector::Sector1 => 1,
            Sector::Sector2 => 2,
            Sector::Sector3 => 3,
        }
    }
}

/// Surface under a wheel, from `TelemWheelV2::mSurfaceType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceType {
    Dry,
    Wet,
    Grass,
    Dirt,
    Gravel,
    Rumblestrip,
}

impl SurfaceType {
    pub fn from_raw(raw: u8) -> Result<Self> {
        Ok(match raw {
            0 => SurfaceType::Dry,
            1 => SurfaceType::Wet,
            2 => SurfaceType::Grass,
            3 => SurfaceType::Dirt,
            4 => SurfaceType::Gravel,
            5 => SurfaceType::Rumblestrip,
            other => return Err(TelemetryError::out_of_range("mSurfaceType", other)),
        })
    }
}

/// Active camera, from `GraphicsInfoV2::mCameraType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CameraType {
    TvCockpit,
    Cockpit,
    NoseCam,
    Swingman,
    Trackside,
}

impl CameraType {
    pub fn from_raw(raw: i32) -> Result<Self> {
        Ok(match raw {
            0 => CameraType::TvCockpit,
            1 => CameraType::Cockpit,
            2 => CameraType::NoseCam,
            3 => CameraType::Swingman,
            4 => CameraType::Trackside,
            other => return Err(TelemetryError::out_of_range("mCameraType", other)),
        })
    }
}

/// Wheel position, in the order the host stores wheel blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Wheel {
    FrontLeft,
    FrontRight,
    RearLeft,
    RearRight,
}

impl Wheel {
    pub const ALL: [Wheel; 4] = [Wheel::FrontLeft, Wheel::FrontRight, Wheel::RearLeft, Wheel::RearRight];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn is_front(self) -> bool {
        matches!(self, Wheel::FrontLeft | Wheel::FrontRight)
    }
}
