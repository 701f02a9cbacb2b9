//! Variable-length unsigned values.
//!
//! Option values with the uint format are carried as 0 to 4 bytes: zero
//! is encoded as no bytes at all, every other value as its minimal
//! big-endian representation.

use crate::error::Error;

/// Number of bytes [`encode`] will produce for `value`.
pub fn size_of(value: u32) -> usize {
  match value {
    | 0 => 0,
    | v if v <= 0xFF => 1,
    | v if v <= 0xFFFF => 2,
    | v if v <= 0xFF_FFFF => 3,
    | _ => 4,
  }
}

/// Write the minimal big-endian form of `value` into `buf`.
///
/// Returns the number of bytes written, or [`Error::TooSmall`] carrying
/// the number of bytes needed when `buf` cannot hold them.
pub fn encode(buf: &mut [u8], value: u32) -> Result<usize, Error> {
  let size = size_of(value);
  if buf.len() < size {
    return Err(Error::TooSmall { required: size });
  }

  let be = value.to_be_bytes();
  buf[..size].copy_from_slice(&be[4 - size..]);
  Ok(size)
}

/// Read a big-endian unsigned value of any length.
///
/// Shorter inputs are left-padded with zeroes; inputs longer than 4
/// bytes are truncated to their first 4.
pub fn decode(buf: &[u8]) -> u32 {
  let buf = &buf[..buf.len().min(4)];
  let mut be = [0u8; 4];
  be[4 - buf.len()..].copy_from_slice(buf);
  u32::from_be_bytes(be)
}
