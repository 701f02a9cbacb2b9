//! The three wire codecs.
//!
//! Each version is a stateless unit struct implementing [`Encoder`] and
//! [`Decoder`]; codecs may be shared freely across threads. Version
//! selection from an incoming frame belongs to the caller (see
//! [`Version::detect`](crate::Version::detect)); each decoder rejects
//! frames whose version bits are not its own.

use crate::error::Error;
use crate::msg::Message;

/// Serializes messages of one wire version.
pub trait Encoder {
  /// Exact size of the frame `encode` would produce for `m`, after
  /// validating the fields this version carries.
  fn size(&self, m: &Message) -> Result<usize, Error>;

  /// Write the frame for `m` into `buf`, returning the number of bytes
  /// written.
  ///
  /// A buffer that cannot hold the frame (an empty one included) fails
  /// with [`Error::TooSmall`] carrying the required size, so encoding
  /// into `&mut []` doubles as a size probe. Nothing meaningful is
  /// written on any failure.
  fn encode(&self, m: &Message, buf: &mut [u8]) -> Result<usize, Error>;
}

/// Parses frames of one wire version.
pub trait Decoder {
  /// Parse `data` into `m`, returning the number of bytes consumed
  /// (always the whole input: the payload is whatever follows the
  /// header, token and options).
  ///
  /// Only the fields this wire version carries are assigned, plus
  /// `ver`; the option list is replaced.
  fn decode(&self, data: &[u8], m: &mut Message) -> Result<usize, Error>;
}

/// Legacy 4-byte framing.
pub mod v0;
/// CoAP-compatible framing.
pub mod v1;
/// Extended 8-byte framing with frame checksum.
pub mod v2;
