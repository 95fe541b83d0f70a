//! Primitive decoders and encoders for snapshot buffers.
//!
//! Every multi-byte value is stored with its most significant byte first, as
//! the host ABI defines it. The order is fixed here and never taken from the
//! platform running this crate.
//!
//! The functions index the buffer directly. Capsules only call them with
//! `const` offsets that are checked against the buffer size at compile time,
//! so an out-of-range offset is a programming error.
//!
//! # Panics
//!
//! Every function panics if `offset + width` exceeds `buf.len()`.

use super::Vector3;

/// Width in bytes of a 3 × f32 vector.
pub const VECTOR3_WIDTH: usize = 12;

#[inline]
fn word<const W: usize>(buf: &[u8], offset: usize) -> [u8; W] {
    let mut out = [0u8; W];
    out.copy_from_slice(&buf[offset..offset + W]);
    out
}

/// Decode a signed byte.
#[inline]
pub fn read_i8(buf: &[u8], offset: usize) -> i8 {
    buf[offset] as i8
}

/// Decode an unsigned byte.
#[inline]
pub fn read_u8(buf: &[u8], offset: usize) -> u8 {
    buf[offset]
}

/// Decode a boolean; any nonzero byte is `true`.
#[inline]
pub fn read_bool(buf: &[u8], offset: usize) -> bool {
    buf[offset] != 0
}

#[inline]
pub fn read_i16(buf: &[u8], offset: usize) -> i16 {
    i16::from_be_bytes(word(buf, offset))
}

#[inline]
pub fn read_u16(buf: &[u8], offset: usize) -> u16 {
    u16::from_be_bytes(word(buf, offset))
}

/// Decode the host's `long`, which is 32 bits wide.
#[inline]
pub fn read_i32(buf: &[u8], offset: usize) -> i32 {
    i32::from_be_bytes(word(buf, offset))
}

/// Decode the host's `unsigned long`, which is 32 bits wide.
#[inline]
pub fn read_u32(buf: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes(word(buf, offset))
}

#[inline]
pub fn read_f32(buf: &[u8], offset: usize) -> f32 {
    f32::from_bits(read_u32(buf, offset))
}

/// Decode an IEEE double stored as two consecutive 32-bit words, high word first.
///
/// Both words contribute; the high word is not discarded.
#[inline]
pub fn read_f64(buf: &[u8], offset: usize) -> f64 {
    let high = u64::from(read_u32(buf, offset));
    let low = u64::from(read_u32(buf, offset + 4));
    f64::from_bits((high << 32) | low)
}

/// Decode a fixed-length character field.
///
/// The value is the prefix up to the first NUL within `max_len` bytes, or the
/// whole run when no NUL is present. Bytes that are not valid UTF-8 are
/// replaced.
pub fn read_string(buf: &[u8], offset: usize, max_len: usize) -> String {
    let field = &buf[offset..offset + max_len];
    let end = field.iter().position(|&b| b == 0).unwrap_or(max_len);
    String::from_utf8_lossy(&field[..end]).into_owned()
}

/// Decode three consecutive floats.
#[inline]
pub fn read_vector3(buf: &[u8], offset: usize) -> Vector3 {
    Vector3::new(read_f32(buf, offset), read_f32(buf, offset + 4), read_f32(buf, offset + 8))
}

#[inline]
pub fn write_i8(buf: &mut [u8], offset: usize, value: i8) {
    buf[offset] = value as u8;
}

#[inline]
pub fn write_u8(buf: &mut [u8], offset: usize, value: u8) {
    buf[offset] = value;
}

#[inline]
pub fn write_bool(buf: &mut [u8], offset: usize, value: bool) {
    buf[offset] = u8::from(value);
}

#[inline]
pub fn write_i16(buf: &mut [u8], offset: usize, value: i16) {
    buf[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
}

#[inline]
pub fn write_u16(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset..offset + 2].copy_from_slice(&value.to_be_bytes());
}

#[inline]
pub fn write_i32(buf: &mut [u8], offset: usize, value: i32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_be_bytes());
}

#[inline]
pub fn write_u32(buf: &mut [u8], offset: usize, value: u32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_be_bytes());
}

#[inline]
pub fn write_f32(buf: &mut [u8], offset: usize, value: f32) {
    write_u32(buf, offset, value.to_bits());
}

#[inline]
pub fn write_f64(buf: &mut [u8], offset: usize, value: f64) {
    let bits = value.to_bits();
    write_u32(buf, offset, (bits >> 32) as u32);
    write_u32(buf, offset + 4, bits as u32);
}

/// Encode a fixed-length character field, NUL-padded.
///
/// A value of `max_len` bytes or more is truncated and stored without a
/// terminator.
pub fn write_string(buf: &mut [u8], offset: usize, max_len: usize, value: &str) {
    let field = &mut buf[offset..offset + max_len];
    field.fill(0);
    let bytes = value.as_bytes();
    let len = bytes.len().min(max_len);
    field[..len].copy_from_slice(&bytes[..len]);
}

#[inline]
pub fn write_vector3(buf: &mut [u8], offset: usize, value: Vector3) {
    write_f32(buf, offset, value.x);
    write_f32(buf, offset + 4, value.y);
    write_f32(buf, offset + 8, value.z);
}
