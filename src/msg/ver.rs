use crate::error::Error;

/// Wire version of a frame, carried in the top two bits of byte 0.
///
/// The three versions share the logical message model but disagree on
/// header layout and integrity fields:
///
/// |   | header | options | 0xFF separator | integrity |
/// |---|--------|---------|----------------|-----------|
/// |V0 | 4 bytes| no      | no             | CRC16 (LE) over payload |
/// |V1 | 4 bytes| yes     | iff payload    | none |
/// |V2 | 8 bytes| yes     | iff payload    | CRC16 (BE) over payload, RSUM8 over frame |
///
/// The remaining two-bit pattern (3) is not a version and fails
/// detection.
#[derive(Copy, Clone, Hash, Eq, Ord, PartialEq, PartialOrd, Debug)]
pub enum Version {
  /// Legacy 4-byte framing: type + encoder pair + payload CRC only.
  V0,
  /// CoAP-compatible framing.
  V1,
  /// Extended framing with encoder pair and frame checksum.
  V2,
}

impl Version {
  /// The two version bits as they appear in the top of byte 0.
  pub fn bits(self) -> u8 {
    match self {
      | Version::V0 => 0,
      | Version::V1 => 1,
      | Version::V2 => 2,
    }
  }

  /// Read the version from the first byte of a frame.
  ///
  /// ```
  /// use secoap_msg::{Error, Version};
  ///
  /// assert_eq!(Version::detect(&[0x41, 0x01]), Ok(Version::V1));
  /// assert_eq!(Version::detect(&[0xC0]), Err(Error::MessageInvalidVersion));
  /// assert_eq!(Version::detect(&[]), Err(Error::MessageTruncated));
  /// ```
  pub fn detect(frame: &[u8]) -> Result<Version, Error> {
    match frame.first() {
      | None => Err(Error::MessageTruncated),
      | Some(b) => Version::try_from(b >> 6),
    }
  }
}

impl Default for Version {
  fn default() -> Self {
    Version::V1
  }
}

impl TryFrom<u8> for Version {
  type Error = Error;

  fn try_from(b: u8) -> Result<Self, Self::Error> {
    match b {
      | 0 => Ok(Version::V0),
      | 1 => Ok(Version::V1),
      | 2 => Ok(Version::V2),
      | _ => Err(Error::MessageInvalidVersion),
    }
  }
}
