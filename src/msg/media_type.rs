use core::fmt;

/// Content type of a message payload, carried in the ContentFormat and
/// Accept options.
///
/// These are the IANA CoAP content-format numbers; unknown numbers pass
/// through the codec untouched.
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct MediaType(pub u16);

impl MediaType {
  /// `text/plain; charset=utf-8`
  pub const TEXT_PLAIN: MediaType = MediaType(0);
  /// `application/cose; cose-type="cose-encrypt0"`
  pub const APP_COSE_ENCRYPT0: MediaType = MediaType(16);
  /// `application/cose; cose-type="cose-mac0"`
  pub const APP_COSE_MAC0: MediaType = MediaType(17);
  /// `application/cose; cose-type="cose-sign1"`
  pub const APP_COSE_SIGN1: MediaType = MediaType(18);
  /// `application/link-format`
  pub const APP_LINK_FORMAT: MediaType = MediaType(40);
  /// `application/xml`
  pub const APP_XML: MediaType = MediaType(41);
  /// `application/octet-stream`
  pub const APP_OCTETS: MediaType = MediaType(42);
  /// `application/exi`
  pub const APP_EXI: MediaType = MediaType(47);
  /// `application/json`
  pub const APP_JSON: MediaType = MediaType(50);
  /// `application/json-patch+json`
  pub const APP_JSON_PATCH: MediaType = MediaType(51);
  /// `application/merge-patch+json`
  pub const APP_JSON_MERGE_PATCH: MediaType = MediaType(52);
  /// `application/cbor`
  pub const APP_CBOR: MediaType = MediaType(60);
  /// `application/cwt`
  pub const APP_CWT: MediaType = MediaType(61);
  /// `application/cose; cose-type="cose-encrypt"`
  pub const APP_COSE_ENCRYPT: MediaType = MediaType(96);
  /// `application/cose; cose-type="cose-mac"`
  pub const APP_COSE_MAC: MediaType = MediaType(97);
  /// `application/cose; cose-type="cose-sign"`
  pub const APP_COSE_SIGN: MediaType = MediaType(98);
  /// `application/cose-key`
  pub const APP_COSE_KEY: MediaType = MediaType(101);
  /// `application/cose-key-set`
  pub const APP_COSE_KEY_SET: MediaType = MediaType(102);
  /// `application/senml+json`
  pub const APP_SENML_JSON: MediaType = MediaType(110);
  /// `application/senml+cbor`
  pub const APP_SENML_CBOR: MediaType = MediaType(112);
  /// `coap-group+json`
  pub const APP_COAP_GROUP: MediaType = MediaType(256);
  /// `application/senml-etch+json`
  pub const APP_SENML_ETCH_JSON: MediaType = MediaType(320);
  /// `application/senml-etch+cbor`
  pub const APP_SENML_ETCH_CBOR: MediaType = MediaType(322);
  /// `application/vnd.ocf+cbor`
  pub const APP_OCF_CBOR: MediaType = MediaType(10000);
  /// `application/vnd.oma.lwm2m+tlv`
  pub const APP_LWM2M_TLV: MediaType = MediaType(11542);
  /// `application/vnd.oma.lwm2m+json`
  pub const APP_LWM2M_JSON: MediaType = MediaType(11543);
  /// `application/vnd.oma.lwm2m+cbor`
  pub const APP_LWM2M_CBOR: MediaType = MediaType(11544);

  /// Registry name of the media type, if it has one.
  pub fn name(self) -> Option<&'static str> {
    let name = match self {
      | MediaType::TEXT_PLAIN => "text/plain; charset=utf-8",
      | MediaType::APP_COSE_ENCRYPT0 => "application/cose; cose-type=\"cose-encrypt0\"",
      | MediaType::APP_COSE_MAC0 => "application/cose; cose-type=\"cose-mac0\"",
      | MediaType::APP_COSE_SIGN1 => "application/cose; cose-type=\"cose-sign1\"",
      | MediaType::APP_LINK_FORMAT => "application/link-format",
      | MediaType::APP_XML => "application/xml",
      | MediaType::APP_OCTETS => "application/octet-stream",
      | MediaType::APP_EXI => "application/exi",
      | MediaType::APP_JSON => "application/json",
      | MediaType::APP_JSON_PATCH => "application/json-patch+json",
      | MediaType::APP_JSON_MERGE_PATCH => "application/merge-patch+json",
      | MediaType::APP_CBOR => "application/cbor",
      | MediaType::APP_CWT => "application/cwt",
      | MediaType::APP_COSE_ENCRYPT => "application/cose; cose-type=\"cose-encrypt\"",
      | MediaType::APP_COSE_MAC => "application/cose; cose-type=\"cose-mac\"",
      | MediaType::APP_COSE_SIGN => "application/cose; cose-type=\"cose-sign\"",
      | MediaType::APP_COSE_KEY => "application/cose-key",
      | MediaType::APP_COSE_KEY_SET => "application/cose-key-set",
      | MediaType::APP_SENML_JSON => "application/senml+json",
      | MediaType::APP_SENML_CBOR => "application/senml+cbor",
      | MediaType::APP_COAP_GROUP => "coap-group+json",
      | MediaType::APP_SENML_ETCH_JSON => "application/senml-etch+json",
      | MediaType::APP_SENML_ETCH_CBOR => "application/senml-etch+cbor",
      | MediaType::APP_OCF_CBOR => "application/vnd.ocf+cbor",
      | MediaType::APP_LWM2M_TLV => "application/vnd.oma.lwm2m+tlv",
      | MediaType::APP_LWM2M_JSON => "application/vnd.oma.lwm2m+json",
      | MediaType::APP_LWM2M_CBOR => "application/vnd.oma.lwm2m+cbor",
      | _ => return None,
    };
    Some(name)
  }
}

impl From<u16> for MediaType {
  fn from(n: u16) -> MediaType {
    MediaType(n)
  }
}

impl From<MediaType> for u16 {
  fn from(m: MediaType) -> u16 {
    m.0
  }
}

impl fmt::Display for MediaType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.name() {
      | Some(name) => f.write_str(name),
      | None => write!(f, "MediaType({})", self.0),
    }
  }
}
