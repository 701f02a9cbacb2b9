use crate::error::Error;

/// Payload encoding selected by the (encoder-type, encoder-id) pair of
/// V0 and V2 frames.
///
/// Both fields are 4 bits. Only a handful of pairs are assigned;
/// everything else collapses to [`ContentEncoding::UserDefined`], which
/// is also what devices send when they speak a private payload format.
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub enum ContentEncoding {
  /// `none/userdefine` — no declared encoding.
  #[default]
  UserDefined,
  /// `text/base64`
  TextBase64,
  /// `text/plain`
  TextPlain,
  /// `text/hex`
  TextHex,
  /// `application/octet-stream`
  OctetStream,
  /// `application/protobuf`
  Protobuf,
  /// `application/json`
  Json,
}

impl ContentEncoding {
  /// Resolve an (encoder-type, encoder-id) pair from the wire.
  pub fn of(etp: u8, eid: u8) -> ContentEncoding {
    match (etp, eid) {
      | (0, 0) => ContentEncoding::UserDefined,
      | (1, 0) => ContentEncoding::TextBase64,
      | (2, 0) => ContentEncoding::TextPlain,
      | (3, 0) => ContentEncoding::TextHex,
      | (4, 0) => ContentEncoding::OctetStream,
      | (5, 0) => ContentEncoding::Protobuf,
      | (6, 0) => ContentEncoding::Json,
      | _ => ContentEncoding::UserDefined,
    }
  }

  /// The (encoder-type, encoder-id) pair for this encoding.
  pub fn pair(self) -> (u8, u8) {
    match self {
      | ContentEncoding::UserDefined => (0, 0),
      | ContentEncoding::TextBase64 => (1, 0),
      | ContentEncoding::TextPlain => (2, 0),
      | ContentEncoding::TextHex => (3, 0),
      | ContentEncoding::OctetStream => (4, 0),
      | ContentEncoding::Protobuf => (5, 0),
      | ContentEncoding::Json => (6, 0),
    }
  }

  /// The MIME-style name of the encoding.
  pub fn mime(self) -> &'static str {
    match self {
      | ContentEncoding::UserDefined => "none/userdefine",
      | ContentEncoding::TextBase64 => "text/base64",
      | ContentEncoding::TextPlain => "text/plain",
      | ContentEncoding::TextHex => "text/hex",
      | ContentEncoding::OctetStream => "application/octet-stream",
      | ContentEncoding::Protobuf => "application/protobuf",
      | ContentEncoding::Json => "application/json",
    }
  }

  /// Resolve a MIME-style name back to an encoding; unknown names are
  /// the user-defined encoding.
  pub fn from_mime(name: &str) -> ContentEncoding {
    match name {
      | "text/base64" => ContentEncoding::TextBase64,
      | "text/plain" => ContentEncoding::TextPlain,
      | "text/hex" => ContentEncoding::TextHex,
      | "application/octet-stream" => ContentEncoding::OctetStream,
      | "application/protobuf" => ContentEncoding::Protobuf,
      | "application/json" => ContentEncoding::Json,
      | _ => ContentEncoding::UserDefined,
    }
  }
}

/// Whether `eid` fits the 4-bit encoder-id field.
pub fn validate_eid(eid: u8) -> bool {
  eid <= 0xF
}

/// Whether `etp` fits the 4-bit encoder-type field.
pub fn validate_etp(etp: u8) -> bool {
  etp <= 0xF
}

pub(crate) fn check_eid(eid: u8) -> Result<(), Error> {
  if validate_eid(eid) {
    Ok(())
  } else {
    Err(Error::InvalidEncoderId(eid))
  }
}

pub(crate) fn check_etp(etp: u8) -> Result<(), Error> {
  if validate_etp(etp) {
    Ok(())
  } else {
    Err(Error::InvalidEncoderType(etp))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn pairs_round_trip() {
    for enc in [ContentEncoding::UserDefined,
                ContentEncoding::TextBase64,
                ContentEncoding::TextPlain,
                ContentEncoding::TextHex,
                ContentEncoding::OctetStream,
                ContentEncoding::Protobuf,
                ContentEncoding::Json]
    {
      let (etp, eid) = enc.pair();
      assert_eq!(ContentEncoding::of(etp, eid), enc);
      assert_eq!(ContentEncoding::from_mime(enc.mime()), enc);
    }
  }

  #[test]
  fn unassigned_pairs_fall_back() {
    assert_eq!(ContentEncoding::of(5, 1), ContentEncoding::UserDefined);
    assert_eq!(ContentEncoding::of(15, 15), ContentEncoding::UserDefined);
    assert_eq!(ContentEncoding::from_mime("application/cbor"),
               ContentEncoding::UserDefined);
  }

  #[test]
  fn four_bit_bounds() {
    assert!(validate_eid(15) && validate_etp(15));
    assert!(!validate_eid(16) && !validate_etp(16));
  }
}
