//! Snapshot recordings.
//!
//! A recording is the byte stream a host would have pushed, framed so it can
//! be played back through the same `load_*` and `on_*_updated` path:
//!
//! ```text
//! header: b"RFSR" | interface version (i32)
//! frame:  tag (u8) | payload
//! ```
//!
//! Snapshot payloads are the fixed-size category buffers; a scoring payload
//! is the base block followed by one block per announced vehicle. Lifecycle
//! frames carry no payload. Integers are most significant byte first, like
//! the snapshots themselves.
//!
//! ```rust
//! use rfstats::config::{CoreSettings, VehiclePhysics};
//! use rfstats::host::HostVersion;
//! use rfstats::replay::{SnapshotReplay, SnapshotWriter};
//!
//! let mut writer = SnapshotWriter::new(Vec::new(), HostVersion::V3)?;
//! writer.write_session_started()?;
//! writer.write_realtime_entered()?;
//! let bytes = writer.into_inner();
//!
//! let mut replay = SnapshotReplay::open(bytes.as_slice())?;
//! let mut game = replay.new_game(CoreSettings::default(), VehiclePhysics::default())?;
//! assert_eq!(replay.play(&mut game)?, 2);
//! assert!(game.is_in_realtime());
//! # Ok::<(), rfstats::TelemetryError>(())
//! ```

use std::io::{Read, Write};

use tracing::{debug, trace};

use crate::capsule::{read_full, read_retrying};
use crate::config::{CoreSettings, VehiclePhysics};
use crate::data::{
    CommentaryInfo, DataMode, GraphicsInfo, ScoringInfo, TelemetryData, WeatherInfo,
};
use crate::host::HostVersion;
use crate::types::codec;
use crate::{LiveGameData, Result, TelemetryError};

/// First bytes of every recording.
pub const MAGIC: [u8; 4] = *b"RFSR";
const HEADER_LEN: usize = MAGIC.len() + 4;

/// Frame kinds in a recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FrameTag {
    Telemetry = 1,
    Scoring = 2,
    Graphics = 3,
    Weather = 4,
    Commentary = 5,
    SessionStarted = 16,
    RealtimeEntered = 17,
    RealtimeExited = 18,
}

impl FrameTag {
    pub fn from_raw(raw: u8) -> Result<Self> {
        Ok(match raw {
            1 => FrameTag::Telemetry,
            2 => FrameTag::Scoring,
            3 => FrameTag::Graphics,
            4 => FrameTag::Weather,
            5 => FrameTag::Commentary,
            16 => FrameTag::SessionStarted,
            17 => FrameTag::RealtimeEntered,
            18 => FrameTag::RealtimeExited,
            other => return Err(TelemetryError::out_of_range("frame tag", other)),
        })
    }
}

/// Writes a recording.
#[derive(Debug)]
pub struct SnapshotWriter<W: Write> {
    writer: W,
    frames: u64,
}

impl<W: Write> SnapshotWriter<W> {
    /// Start a recording for `host_version` by writing the header.
    pub fn new(mut writer: W, host_version: HostVersion) -> Result<Self> {
        let mut header = [0u8; HEADER_LEN];
        header[..MAGIC.len()].copy_from_slice(&MAGIC);
        codec::write_i32(&mut header, MAGIC.len(), host_version.interface_version());
        writer
            .write_all(&header)
            .map_err(|e| TelemetryError::transport_failed("recording", HEADER_LEN, 0, e))?;
        Ok(Self { writer, frames: 0 })
    }

    /// Write one frame with a raw payload.
    ///
    /// The payload must have the exact length the tag's category has on the
    /// stream; nothing here checks it.
    pub fn write_frame(&mut self, tag: FrameTag, payload: &[u8]) -> Result<()> {
        let category = "recording";
        self.writer
            .write_all(&[tag as u8])
            .and_then(|()| self.writer.write_all(payload))
            .map_err(|e| TelemetryError::transport_failed(category, payload.len() + 1, 0, e))?;
        self.frames += 1;
        trace!(?tag, bytes = payload.len(), "Recorded frame");
        Ok(())
    }

    pub fn write_telemetry(&mut self, telemetry: &TelemetryData) -> Result<()> {
        self.write_frame(FrameTag::Telemetry, telemetry.capsule().buffer())
    }

    pub fn write_scoring(&mut self, scoring: &ScoringInfo) -> Result<()> {
        let mut payload = Vec::with_capacity(scoring.stream_len());
        payload.extend_from_slice(scoring.capsule().buffer());
        for vehicle in scoring.vehicles() {
            payload.extend_from_slice(vehicle.capsule().buffer());
        }
        self.write_frame(FrameTag::Scoring, &payload)
    }

    pub fn write_graphics(&mut self, graphics: &GraphicsInfo) -> Result<()> {
        self.write_frame(FrameTag::Graphics, graphics.capsule().buffer())
    }

    pub fn write_weather(&mut self, weather: &WeatherInfo) -> Result<()> {
        self.write_frame(FrameTag::Weather, weather.capsule().buffer())
    }

    pub fn write_commentary(&mut self, commentary: &CommentaryInfo) -> Result<()> {
        self.write_frame(FrameTag::Commentary, commentary.capsule().buffer())
    }

    pub fn write_session_started(&mut self) -> Result<()> {
        self.write_frame(FrameTag::SessionStarted, &[])
    }

    pub fn write_realtime_entered(&mut self) -> Result<()> {
        self.write_frame(FrameTag::RealtimeEntered, &[])
    }

    pub fn write_realtime_exited(&mut self) -> Result<()> {
        self.write_frame(FrameTag::RealtimeExited, &[])
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Plays a recording into a [`LiveGameData`].
#[derive(Debug)]
pub struct SnapshotReplay<R: Read> {
    reader: R,
    host_version: HostVersion,
    frames: u64,
}

impl<R: Read> SnapshotReplay<R> {
    /// Read and check the header.
    pub fn open(mut reader: R) -> Result<Self> {
        let mut header = [0u8; HEADER_LEN];
        read_full(&mut reader, &mut header, "recording")?;
        if header[..MAGIC.len()] != MAGIC {
            return Err(TelemetryError::out_of_range("recording magic", codec::read_i32(&header, 0)));
        }
        let host_version = HostVersion::detect(codec::read_i32(&header, MAGIC.len()))?;
        debug!(%host_version, "Opened recording");
        Ok(Self { reader, host_version, frames: 0 })
    }

    pub fn host_version(&self) -> HostVersion {
        self.host_version
    }

    /// Frames played so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// A data model matching the recording's host version, in replay mode.
    pub fn new_game(&self, settings: CoreSettings, physics: VehiclePhysics) -> Result<LiveGameData> {
        let mut game = LiveGameData::new(self.host_version, settings, physics)?;
        game.set_data_mode(DataMode::Replay);
        Ok(game)
    }

    fn read_tag(&mut self) -> Result<Option<u8>> {
        let mut tag = [0u8; 1];
        match read_retrying(&mut self.reader, &mut tag) {
            Ok(0) => Ok(None),
            Ok(_) => Ok(Some(tag[0])),
            Err(e) => Err(TelemetryError::transport_failed("recording", 1, 0, e)),
        }
    }

    /// Play the next frame. Returns `None` at the end of the recording.
    pub fn next_frame(&mut self, game: &mut LiveGameData) -> Result<Option<FrameTag>> {
        let Some(raw) = self.read_tag()? else {
            return Ok(None);
        };
        let tag = FrameTag::from_raw(raw)?;
        let reader = &mut self.reader;
        match tag {
            FrameTag::Telemetry => game.load_telemetry(reader)?,
            FrameTag::Scoring => game.load_scoring(reader)?,
            FrameTag::Graphics => game.load_graphics(reader)?,
            FrameTag::Weather => game.load_weather(reader)?,
            FrameTag::Commentary => game.load_commentary(reader)?,
            FrameTag::SessionStarted => game.on_session_started(),
            FrameTag::RealtimeEntered => game.on_realtime_entered(),
            FrameTag::RealtimeExited => game.on_realtime_exited(),
        };
        self.frames += 1;
        Ok(Some(tag))
    }

    /// Play every remaining frame. Returns the number of frames played.
    pub fn play(&mut self, game: &mut LiveGameData) -> Result<u64> {
        let start = self.frames;
        while self.next_frame(game)?.is_some() {}
        Ok(self.frames - start)
    }
}
