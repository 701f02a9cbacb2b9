//! Message options: identity, per-ID value formats and length bounds,
//! and the value <-> bytes conversion.
//!
//! The wire encoding of a whole option list (delta compression, extended
//! headers, payload marker) lives in [`list`].

use core::fmt;

use crate::error::Error;
use crate::msg::media_type::MediaType;
use crate::uint;

pub mod list;
pub use list::*;

/// Identifies an option in a message.
///
/// The number spaces follow the CoAP registry: 0..255 IETF, 256..2047
/// commonly used options, 2048..64999 vendor-specific, 65000..65535
/// experimental. Constants live in [`repeat`] and [`no_repeat`]
/// depending on whether an option may occur more than once per message.
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct OptionId(pub u32);

/// Options that may occur at most once per message.
pub mod no_repeat {
  use super::OptionId;

  /// Uri-Host: host component of the request URI.
  pub const URI_HOST: OptionId = OptionId(3);
  /// If-None-Match: make a PUT conditional on the target not existing.
  pub const IF_NONE_MATCH: OptionId = OptionId(5);
  /// Observe: register or count resource observations.
  pub const OBSERVE: OptionId = OptionId(6);
  /// Uri-Port: port component of the request URI.
  pub const URI_PORT: OptionId = OptionId(7);
  /// Content-Format: media type of the payload.
  pub const CONTENT_FORMAT: OptionId = OptionId(12);
  /// Max-Age: maximum cache lifetime in seconds.
  pub const MAX_AGE: OptionId = OptionId(14);
  /// Accept: media type acceptable in the response.
  pub const ACCEPT: OptionId = OptionId(17);
  /// Block2: response payload block transfer control.
  pub const BLOCK2: OptionId = OptionId(23);
  /// Block1: request payload block transfer control.
  pub const BLOCK1: OptionId = OptionId(27);
  /// Size2: size indication for the response payload.
  pub const SIZE2: OptionId = OptionId(28);
  /// Proxy-Uri: absolute URI for forwarding through a proxy.
  pub const PROXY_URI: OptionId = OptionId(35);
  /// Proxy-Scheme: scheme for proxy forwarding.
  pub const PROXY_SCHEME: OptionId = OptionId(39);
  /// Size1: size indication for the request payload.
  pub const SIZE1: OptionId = OptionId(60);
  /// No-Response: suppress response classes the client is not
  /// interested in.
  pub const NO_RESPONSE: OptionId = OptionId(258);

  /// Vendor: platform account identifier.
  pub const GITERLAB_ID: OptionId = OptionId(65000);
  /// Vendor: platform account key.
  pub const GITERLAB_KEY: OptionId = OptionId(65001);
  /// Vendor: access identifier.
  pub const ACCESS_ID: OptionId = OptionId(65002);
  /// Vendor: access key.
  pub const ACCESS_KEY: OptionId = OptionId(65003);
  /// Vendor: CRC32 of the payload, for end-to-end verification.
  pub const CHECK_CRC32: OptionId = OptionId(65004);
  /// Vendor: payload encoder type carried as an option.
  pub const ENCODER_TYPE: OptionId = OptionId(65005);
  /// Vendor: payload encoder id carried as an option.
  pub const ENCODER_ID: OptionId = OptionId(65006);
  /// Vendor: package sequence number.
  pub const PACKAGE_NUMBER: OptionId = OptionId(65100);
}

/// Options that may occur multiple times per message; their relative
/// order is meaningful and preserved.
pub mod repeat {
  use super::OptionId;

  /// If-Match: make a request conditional on an ETag.
  pub const IF_MATCH: OptionId = OptionId(1);
  /// ETag: entity tag of a representation.
  pub const ETAG: OptionId = OptionId(4);
  /// Location-Path: path segment of the location of a created resource.
  pub const LOCATION_PATH: OptionId = OptionId(8);
  /// Uri-Path: one segment of the request path.
  pub const URI_PATH: OptionId = OptionId(11);
  /// Uri-Query: one query argument of the request.
  pub const URI_QUERY: OptionId = OptionId(15);
  /// Location-Query: query argument of the location of a created
  /// resource.
  pub const LOCATION_QUERY: OptionId = OptionId(20);
}

/// Semantic format of an option value, fixed per option ID.
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum ValueFormat {
  /// No value bytes at all.
  Empty,
  /// Raw bytes.
  Opaque,
  /// Variable-length unsigned integer (see [`crate::uint`]).
  Uint,
  /// UTF-8 text.
  String,
}

/// Value format and inclusive length bounds registered for an option ID.
#[derive(Copy, Clone, Debug)]
pub struct OptionDef {
  /// How the value bytes are interpreted.
  pub format: ValueFormat,
  /// Minimum value length in bytes.
  pub min_len: usize,
  /// Maximum value length in bytes.
  pub max_len: usize,
}

impl OptionDef {
  const fn new(format: ValueFormat, min_len: usize, max_len: usize) -> OptionDef {
    OptionDef { format,
                min_len,
                max_len }
  }
}

impl OptionId {
  /// The registered definition for this ID, or `None` for options this
  /// implementation does not know. Receivers skip unknown options
  /// rather than failing the frame.
  pub fn def(self) -> Option<OptionDef> {
    use ValueFormat::*;

    let def = match self {
      | repeat::IF_MATCH => OptionDef::new(Opaque, 0, 8),
      | no_repeat::URI_HOST => OptionDef::new(String, 1, 255),
      | repeat::ETAG => OptionDef::new(Opaque, 1, 8),
      | no_repeat::IF_NONE_MATCH => OptionDef::new(Empty, 0, 0),
      | no_repeat::OBSERVE => OptionDef::new(Uint, 0, 3),
      | no_repeat::URI_PORT => OptionDef::new(Uint, 0, 2),
      | repeat::LOCATION_PATH => OptionDef::new(String, 0, 255),
      | repeat::URI_PATH => OptionDef::new(String, 0, 255),
      | no_repeat::CONTENT_FORMAT => OptionDef::new(Uint, 0, 2),
      | no_repeat::MAX_AGE => OptionDef::new(Uint, 0, 4),
      | repeat::URI_QUERY => OptionDef::new(String, 0, 255),
      | no_repeat::ACCEPT => OptionDef::new(Uint, 0, 2),
      | repeat::LOCATION_QUERY => OptionDef::new(String, 0, 255),
      | no_repeat::BLOCK2 => OptionDef::new(Uint, 0, 3),
      | no_repeat::BLOCK1 => OptionDef::new(Uint, 0, 3),
      | no_repeat::SIZE2 => OptionDef::new(Uint, 0, 4),
      | no_repeat::PROXY_URI => OptionDef::new(String, 1, 1034),
      | no_repeat::PROXY_SCHEME => OptionDef::new(String, 1, 255),
      | no_repeat::SIZE1 => OptionDef::new(Uint, 0, 4),
      | no_repeat::GITERLAB_ID => OptionDef::new(String, 0, 255),
      | no_repeat::GITERLAB_KEY => OptionDef::new(String, 0, 255),
      | no_repeat::ACCESS_ID => OptionDef::new(String, 0, 255),
      | no_repeat::ACCESS_KEY => OptionDef::new(String, 0, 255),
      | no_repeat::CHECK_CRC32 => OptionDef::new(Uint, 0, 4),
      | no_repeat::ENCODER_TYPE => OptionDef::new(Uint, 0, 4),
      | no_repeat::ENCODER_ID => OptionDef::new(Uint, 0, 4),
      | no_repeat::PACKAGE_NUMBER => OptionDef::new(Uint, 0, 2),
      | _ => return None,
    };
    Some(def)
  }

  /// Whether a value of `len` bytes is within the registered bounds for
  /// this ID. Unknown IDs never verify.
  pub fn verify_len(self, len: usize) -> bool {
    match self.def() {
      | Some(def) => len >= def.min_len && len <= def.max_len,
      | None => false,
    }
  }

  /// Registry name of this ID, if it has one.
  pub fn name(self) -> Option<&'static str> {
    let name = match self {
      | repeat::IF_MATCH => "IfMatch",
      | no_repeat::URI_HOST => "URIHost",
      | repeat::ETAG => "ETag",
      | no_repeat::IF_NONE_MATCH => "IfNoneMatch",
      | no_repeat::OBSERVE => "Observe",
      | no_repeat::URI_PORT => "URIPort",
      | repeat::LOCATION_PATH => "LocationPath",
      | repeat::URI_PATH => "URIPath",
      | no_repeat::CONTENT_FORMAT => "ContentFormat",
      | no_repeat::MAX_AGE => "MaxAge",
      | repeat::URI_QUERY => "URIQuery",
      | no_repeat::ACCEPT => "Accept",
      | repeat::LOCATION_QUERY => "LocationQuery",
      | no_repeat::BLOCK2 => "Block2",
      | no_repeat::BLOCK1 => "Block1",
      | no_repeat::SIZE2 => "Size2",
      | no_repeat::PROXY_URI => "ProxyURI",
      | no_repeat::PROXY_SCHEME => "ProxyScheme",
      | no_repeat::SIZE1 => "Size1",
      | no_repeat::NO_RESPONSE => "NoResponse",
      | no_repeat::GITERLAB_ID => "GiterLabID",
      | no_repeat::GITERLAB_KEY => "GiterLabKey",
      | no_repeat::ACCESS_ID => "AccessID",
      | no_repeat::ACCESS_KEY => "AccessKey",
      | no_repeat::CHECK_CRC32 => "CheckCRC32",
      | no_repeat::ENCODER_TYPE => "EncoderType",
      | no_repeat::ENCODER_ID => "EncoderID",
      | no_repeat::PACKAGE_NUMBER => "PackageNumber",
      | _ => return None,
    };
    Some(name)
  }
}

impl fmt::Display for OptionId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.name() {
      | Some(name) => f.write_str(name),
      | None => write!(f, "Option({})", self.0),
    }
  }
}

/// A single option: an ID paired with a typed value.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Opt {
  /// Which option this is.
  pub id: OptionId,
  /// Its value.
  pub value: OptValue,
}

impl Opt {
  /// Pair an ID with a value.
  pub fn new(id: OptionId, value: impl Into<OptValue>) -> Opt {
    Opt { id,
          value: value.into() }
  }
}

/// A typed option value.
///
/// The format an ID carries is fixed by the registry ([`OptionId::def`]);
/// Content-Format and Accept values travel as [`OptValue::Media`] so
/// they read back as media types rather than bare integers.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum OptValue {
  /// No bytes.
  Empty,
  /// Raw bytes.
  Opaque(Vec<u8>),
  /// UTF-8 text.
  Str(String),
  /// Variable-length unsigned integer.
  Uint(u32),
  /// A media type (Content-Format / Accept).
  Media(MediaType),
}

impl OptValue {
  /// Number of bytes [`OptValue::marshal`] will produce.
  pub fn encoded_len(&self) -> usize {
    match self {
      | OptValue::Empty => 0,
      | OptValue::Opaque(b) => b.len(),
      | OptValue::Str(s) => s.len(),
      | OptValue::Uint(v) => uint::size_of(*v),
      | OptValue::Media(m) => uint::size_of(m.0 as u32),
    }
  }

  /// Write the wire form of the value into `buf`, returning the number
  /// of bytes written or [`Error::TooSmall`] with the required size.
  pub fn marshal(&self, buf: &mut [u8]) -> Result<usize, Error> {
    match self {
      | OptValue::Empty => Ok(0),
      | OptValue::Opaque(b) => copy_value(buf, b),
      | OptValue::Str(s) => copy_value(buf, s.as_bytes()),
      | OptValue::Uint(v) => uint::encode(buf, *v),
      | OptValue::Media(m) => uint::encode(buf, m.0 as u32),
    }
  }

  /// The numeric reading of the value, for uint-format options.
  pub fn uint(&self) -> Option<u32> {
    match self {
      | OptValue::Uint(v) => Some(*v),
      | OptValue::Media(m) => Some(m.0 as u32),
      | _ => None,
    }
  }

  /// The text reading of the value, for string-format options.
  pub fn str(&self) -> Option<&str> {
    match self {
      | OptValue::Str(s) => Some(s),
      | _ => None,
    }
  }

  /// The raw-bytes reading of the value, for opaque and empty options.
  pub fn bytes(&self) -> Option<&[u8]> {
    match self {
      | OptValue::Opaque(b) => Some(b),
      | OptValue::Empty => Some(&[]),
      | _ => None,
    }
  }
}

fn copy_value(buf: &mut [u8], value: &[u8]) -> Result<usize, Error> {
  if buf.len() < value.len() {
    return Err(Error::TooSmall { required: value.len() });
  }
  buf[..value.len()].copy_from_slice(value);
  Ok(value.len())
}

impl From<u32> for OptValue {
  fn from(v: u32) -> OptValue {
    OptValue::Uint(v)
  }
}

impl From<MediaType> for OptValue {
  fn from(m: MediaType) -> OptValue {
    OptValue::Media(m)
  }
}

impl From<&str> for OptValue {
  fn from(s: &str) -> OptValue {
    OptValue::Str(s.to_owned())
  }
}

impl From<String> for OptValue {
  fn from(s: String) -> OptValue {
    OptValue::Str(s)
  }
}

impl From<&[u8]> for OptValue {
  fn from(b: &[u8]) -> OptValue {
    OptValue::Opaque(b.to_vec())
  }
}

impl From<Vec<u8>> for OptValue {
  fn from(b: Vec<u8>) -> OptValue {
    OptValue::Opaque(b)
  }
}

/// Decode the value of option `id` from its `raw` wire bytes.
///
/// Returns `None` when the option must be skipped: the ID is unknown,
/// the length is outside the registered bounds, or a string value is
/// not valid UTF-8.
pub(crate) fn parse_value(id: OptionId, raw: &[u8]) -> Option<OptValue> {
  let def = id.def()?;
  if raw.len() < def.min_len || raw.len() > def.max_len {
    return None;
  }

  let value = match def.format {
    | ValueFormat::Empty => OptValue::Empty,
    | ValueFormat::Opaque => OptValue::Opaque(raw.to_vec()),
    | ValueFormat::String => OptValue::Str(core::str::from_utf8(raw).ok()?.to_owned()),
    | ValueFormat::Uint => {
      let v = uint::decode(raw);
      if id == no_repeat::CONTENT_FORMAT || id == no_repeat::ACCEPT {
        OptValue::Media(MediaType(v as u16))
      } else {
        OptValue::Uint(v)
      }
    },
  };

  Some(value)
}
