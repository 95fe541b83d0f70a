//! Fixed-size snapshot buffers.
//!
//! A [`Capsule`] owns the raw bytes of one host structure and reads typed
//! values at the constant offsets from [`crate::layout`]. The buffer is
//! allocated once and overwritten in place on every tick, either by
//! [`Capsule::load_from_stream`] or by the host writing through
//! [`Capsule::buffer_mut`].
//!
//! ```rust
//! use rfstats::TelemetryCapsule;
//! use rfstats::layout::telemetry;
//!
//! let mut capsule = TelemetryCapsule::new();
//! let bytes = vec![0u8; telemetry::SIZE];
//! capsule.load_from_stream(&mut bytes.as_slice()).unwrap();
//! assert_eq!(capsule.f32_at(telemetry::FUEL), 0.0);
//! ```

use std::io::{self, ErrorKind, Read};

use tracing::trace;

use crate::layout;
use crate::types::{Vector3, codec};
use crate::{Result, TelemetryError};

/// One host structure's bytes, `N` long.
///
/// Typed reads panic when `offset + width > N`; every offset used in this
/// crate comes from a layout module whose size is asserted at compile time.
#[derive(Clone, PartialEq, Eq)]
pub struct Capsule<const N: usize> {
    category: &'static str,
    bytes: Box<[u8; N]>,
}

pub type TelemetryCapsule = Capsule<{ layout::telemetry::SIZE }>;
pub type ScoringCapsule = Capsule<{ layout::scoring::SIZE }>;
pub type VehicleScoringCapsule = Capsule<{ layout::vehicle_scoring::SIZE }>;
pub type GraphicsCapsule = Capsule<{ layout::graphics::SIZE }>;
pub type WeatherCapsule = Capsule<{ layout::weather::SIZE }>;
pub type CommentaryCapsule = Capsule<{ layout::commentary::SIZE }>;

impl<const N: usize> Capsule<N> {
    /// Buffer length in bytes.
    pub const LEN: usize = N;

    /// A zero-filled capsule labelled with the category name used in errors and logs.
    pub fn with_category(category: &'static str) -> Self {
        Self { category, bytes: Box::new([0u8; N]) }
    }

    pub fn category(&self) -> &'static str {
        self.category
    }

    pub fn buffer(&self) -> &[u8; N] {
        &self.bytes
    }

    /// The buffer the host writes into out of band.
    pub fn buffer_mut(&mut self) -> &mut [u8; N] {
        &mut self.bytes
    }

    /// Overwrite the whole buffer from `bytes`, which must be exactly `N` long.
    pub fn copy_from(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.len() != N {
            return Err(TelemetryError::short_read(self.category, N, bytes.len()));
        }
        self.bytes.copy_from_slice(bytes);
        Ok(())
    }

    /// Fill the buffer from `reader`, looping over partial reads.
    ///
    /// Interrupted reads are retried. End of stream before `N` bytes is a
    /// [`TelemetryError::Transport`]; the buffer contents are unspecified
    /// after a failed load and the caller must not notify an update.
    pub fn load_from_stream<R: Read + ?Sized>(&mut self, reader: &mut R) -> Result<()> {
        read_full(reader, &mut self.bytes[..], self.category)?;
        trace!(category = self.category, bytes = N, "Loaded snapshot");
        Ok(())
    }

    #[inline]
    pub fn i8_at(&self, offset: usize) -> i8 {
        codec::read_i8(&self.bytes[..], offset)
    }

    #[inline]
    pub fn u8_at(&self, offset: usize) -> u8 {
        codec::read_u8(&self.bytes[..], offset)
    }

    #[inline]
    pub fn bool_at(&self, offset: usize) -> bool {
        codec::read_bool(&self.bytes[..], offset)
    }

    #[inline]
    pub fn i16_at(&self, offset: usize) -> i16 {
        codec::read_i16(&self.bytes[..], offset)
    }

    #[inline]
    pub fn i32_at(&self, offset: usize) -> i32 {
        codec::read_i32(&self.bytes[..], offset)
    }

    #[inline]
    pub fn f32_at(&self, offset: usize) -> f32 {
        codec::read_f32(&self.bytes[..], offset)
    }

    #[inline]
    pub fn f64_at(&self, offset: usize) -> f64 {
        codec::read_f64(&self.bytes[..], offset)
    }

    pub fn string_at(&self, offset: usize, max_len: usize) -> String {
        codec::read_string(&self.bytes[..], offset, max_len)
    }

    #[inline]
    pub fn vector3_at(&self, offset: usize) -> Vector3 {
        codec::read_vector3(&self.bytes[..], offset)
    }
}

/// One `read` call, retried while it is interrupted.
pub(crate) fn read_retrying<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match reader.read(buf) {
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}

/// Fill `buf` completely from `reader`, looping over partial reads.
///
/// End of stream first is a short read of `category`.
pub(crate) fn read_full<R: Read + ?Sized>(
    reader: &mut R,
    buf: &mut [u8],
    category: &'static str,
) -> Result<()> {
    let expected = buf.len();
    let mut filled = 0;
    while filled < expected {
        match read_retrying(reader, &mut buf[filled..]) {
            Ok(0) => return Err(TelemetryError::short_read(category, expected, filled)),
            Ok(n) => filled += n,
            Err(e) => return Err(TelemetryError::transport_failed(category, expected, filled, e)),
        }
    }
    Ok(())
}

impl<const N: usize> std::fmt::Debug for Capsule<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capsule").field("category", &self.category).field("len", &N).finish()
    }
}

impl TelemetryCapsule {
    pub fn new() -> Self {
        Self::with_category("telemetry")
    }
}

impl ScoringCapsule {
    pub fn new() -> Self {
        Self::with_category("scoring")
    }
}

impl VehicleScoringCapsule {
    pub fn new() -> Self {
        Self::with_category("vehicle scoring")
    }
}

impl GraphicsCapsule {
    pub fn new() -> Self {
        Self::with_category("graphics")
    }
}

impl WeatherCapsule {
    pub fn new() -> Self {
        Self::with_category("weather")
    }
}

impl CommentaryCapsule {
    pub fn new() -> Self {
        Self::with_category("commentary")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Yields at most `chunk` bytes per call and interrupts every other call.
    struct Trickle<'a> {
        data: &'a [u8],
        chunk: usize,
        interrupt: bool,
    }

    impl Read for Trickle<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::Error::from(ErrorKind::Interrupted));
            }
            let n = self.chunk.min(buf.len()).min(self.data.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(ErrorKind::BrokenPipe, "host gone"))
        }
    }

    #[test]
    fn partial_and_interrupted_reads_are_looped() {
        let data: Vec<u8> = (0..layout::graphics::SIZE).map(|i| i as u8).collect();
        let mut capsule = GraphicsCapsule::new();
        let mut reader = Trickle { data: &data, chunk: 7, interrupt: false };
        capsule.load_from_stream(&mut reader).unwrap();
        assert_eq!(&capsule.buffer()[..], &data[..]);
    }

    #[test]
    fn read_full_reports_bytes_received_before_end() {
        let data = [1u8, 2, 3, 4, 5];
        let mut buf = [0u8; 8];
        let mut reader = Trickle { data: &data, chunk: 2, interrupt: false };
        let err = read_full(&mut reader, &mut buf, "recording").unwrap_err();
        assert!(matches!(
            err,
            TelemetryError::Transport { category: "recording", expected: 8, received: 5, source: None }
        ));
        assert_eq!(&buf[..5], &data);
    }

    #[test]
    fn end_of_stream_is_a_transport_error() {
        let data = vec![0u8; 20];
        let mut capsule = WeatherCapsule::new();
        let err = capsule.load_from_stream(&mut data.as_slice()).unwrap_err();
        match err {
            TelemetryError::Transport { category, expected, received, .. } => {
                assert_eq!(category, "weather");
                assert_eq!(expected, 36);
                assert_eq!(received, 20);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn stream_failure_keeps_source() {
        let mut capsule = CommentaryCapsule::new();
        let err = capsule.load_from_stream(&mut Broken).unwrap_err();
        assert!(matches!(err, TelemetryError::Transport { source: Some(_), received: 0, .. }));
    }

    #[test]
    fn copy_from_rejects_wrong_length() {
        let mut capsule = WeatherCapsule::new();
        assert!(capsule.copy_from(&[0u8; 35]).is_err());
        let mut bytes = [0u8; 36];
        codec::write_f32(&mut bytes, layout::weather::RAINING, 0.5);
        capsule.copy_from(&bytes).unwrap();
        assert_eq!(capsule.f32_at(layout::weather::RAINING), 0.5);
    }

    #[test]
    fn host_writes_are_visible_to_getters() {
        let mut capsule = TelemetryCapsule::new();
        codec::write_i32(capsule.buffer_mut(), layout::telemetry::GEAR, -1);
        assert_eq!(capsule.i32_at(layout::telemetry::GEAR), -1);
        assert_eq!(TelemetryCapsule::LEN, 780);
    }
}
