use thiserror::Error;

/// Errors encounterable while encoding or decoding a message.
///
/// [`Error::TooSmall`] is special: it is not a failure of the input but a
/// size probe result. Encoding into a buffer that cannot hold the frame
/// (including an empty one) reports the required size, and the caller is
/// expected to grow the buffer and retry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Error)]
pub enum Error {
  /// Output buffer is smaller than the encoded size.
  #[error("too small bytes buffer, {required} bytes needed")]
  TooSmall {
    /// Total number of bytes the write would have produced.
    required: usize,
  },

  /// Input ended before the fixed header or a declared substructure.
  #[error("message is truncated")]
  MessageTruncated,

  /// Top two bits of byte 0 do not match the codec's version.
  #[error("message has invalid version")]
  MessageInvalidVersion,

  /// Token length was > 8, on the wire or in memory.
  #[error("invalid token length {0}")]
  InvalidTokenLen(usize),

  /// An option header, its extension bytes or its value ran off the
  /// end of the input.
  #[error("option truncated")]
  OptionTruncated,

  /// A delta or length nibble was the reserved value 15 outside the
  /// payload marker context.
  #[error("option unexpected extend marker")]
  OptionUnexpectedExtendMarker,

  /// The decoder's option vector cannot hold the parsed count; grow it
  /// and retry.
  #[error("too small options buffer")]
  OptionsTooSmall,

  /// An option value was outside the registered length bounds for its
  /// ID at set time.
  #[error("invalid value length {0}")]
  InvalidValueLength(usize),

  /// Payload CRC16 did not match the frame's checksum field.
  #[error("message has invalid crc16")]
  InvalidCrc16,

  /// RSUM8 over the whole frame was nonzero.
  #[error("message has invalid rsum8")]
  InvalidRsum8,

  /// Encoding requires a message type and none is set.
  #[error("invalid message type")]
  InvalidType,

  /// Encoding requires a message ID and none is set.
  #[error("invalid message id")]
  InvalidMessageId,

  /// Encoder ID does not fit in 4 bits.
  #[error("invalid encoder id {0}")]
  InvalidEncoderId(u8),

  /// Encoder type does not fit in 4 bits.
  #[error("invalid encoder type {0}")]
  InvalidEncoderType(u8),
}
