use core::fmt;

/// 8-bit message code: request method, response status or vendor code.
///
/// The code splits into a 3-bit class and a 5-bit detail. Class 0 is a
/// request (or the empty message), classes 2, 4 and 5 are responses,
/// classes 6 and 7 carry the vendor range. The codec treats every value
/// as opaque; the registry below exists for construction and display.
///
/// ```
/// use secoap_msg::Code;
///
/// assert_eq!(Code::CONTENT.class(), 2);
/// assert_eq!(Code::CONTENT.detail(), 5);
/// assert_eq!(Code::CONTENT.to_string(), "2.05 Content");
/// ```
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct Code(pub u8);

impl Code {
  /// An Empty message; carries no request or response semantics.
  pub const EMPTY: Code = Code(0);

  /// GET request method.
  pub const GET: Code = Code(1);
  /// POST request method.
  pub const POST: Code = Code(2);
  /// PUT request method.
  pub const PUT: Code = Code(3);
  /// DELETE request method.
  pub const DELETE: Code = Code(4);

  /// 2.01 Created.
  pub const CREATED: Code = Code(65);
  /// 2.02 Deleted.
  pub const DELETED: Code = Code(66);
  /// 2.03 Valid.
  pub const VALID: Code = Code(67);
  /// 2.04 Changed.
  pub const CHANGED: Code = Code(68);
  /// 2.05 Content.
  pub const CONTENT: Code = Code(69);
  /// 2.31 Continue.
  pub const CONTINUE: Code = Code(95);

  /// 4.00 Bad Request.
  pub const BAD_REQUEST: Code = Code(128);
  /// 4.01 Unauthorized.
  pub const UNAUTHORIZED: Code = Code(129);
  /// 4.02 Bad Option.
  pub const BAD_OPTION: Code = Code(130);
  /// 4.03 Forbidden.
  pub const FORBIDDEN: Code = Code(131);
  /// 4.04 Not Found.
  pub const NOT_FOUND: Code = Code(132);
  /// 4.05 Method Not Allowed.
  pub const METHOD_NOT_ALLOWED: Code = Code(133);
  /// 4.06 Not Acceptable.
  pub const NOT_ACCEPTABLE: Code = Code(134);
  /// 4.08 Request Entity Incomplete.
  pub const REQUEST_ENTITY_INCOMPLETE: Code = Code(136);
  /// 4.12 Precondition Failed.
  pub const PRECONDITION_FAILED: Code = Code(140);
  /// 4.13 Request Entity Too Large.
  pub const REQUEST_ENTITY_TOO_LARGE: Code = Code(141);
  /// 4.15 Unsupported Media Type.
  pub const UNSUPPORTED_MEDIA_TYPE: Code = Code(143);
  /// 4.29 Too Many Requests.
  pub const TOO_MANY_REQUESTS: Code = Code(157);

  /// 5.00 Internal Server Error.
  pub const INTERNAL_SERVER_ERROR: Code = Code(160);
  /// 5.01 Not Implemented.
  pub const NOT_IMPLEMENTED: Code = Code(161);
  /// 5.02 Bad Gateway.
  pub const BAD_GATEWAY: Code = Code(162);
  /// 5.03 Service Unavailable.
  pub const SERVICE_UNAVAILABLE: Code = Code(163);
  /// 5.04 Gateway Timeout.
  pub const GATEWAY_TIMEOUT: Code = Code(164);
  /// 5.05 Proxying Not Supported.
  pub const PROXYING_NOT_SUPPORTED: Code = Code(165);

  /// Vendor 6.00: normal response.
  pub const VENDOR_OK: Code = Code(192);
  /// Vendor 6.01: new configuration parameters are available.
  pub const VENDOR_PARAM_CONFIGURE: Code = Code(193);
  /// Vendor 6.02: a firmware update is available.
  pub const VENDOR_FIRMWARE_UPDATE: Code = Code(194);
  /// Vendor 6.03: a user command is pending execution.
  pub const VENDOR_USER_COMMAND: Code = Code(195);
  /// Vendor 6.28: enter flight mode.
  pub const VENDOR_ENTER_FLIGHT_MODE: Code = Code(220);

  /// Vendor 7.00: illegal activation key.
  pub const VENDOR_ILLEGAL_KEY: Code = Code(224);
  /// Vendor 7.01: data error.
  pub const VENDOR_DATA_ERROR: Code = Code(225);
  /// Vendor 7.02: device does not exist or sensor type mismatch.
  pub const VENDOR_DEVICE_NOT_EXIST: Code = Code(226);
  /// Vendor 7.03: timestamp expired.
  pub const VENDOR_TIME_EXPIRED: Code = Code(227);
  /// Vendor 7.04: unsupported protocol version.
  pub const VENDOR_UNSUPPORTED_VERSION: Code = Code(228);
  /// Vendor 7.05: protocol parsing error.
  pub const VENDOR_PARSING_ERROR: Code = Code(229);
  /// Vendor 7.06: request timeout.
  pub const VENDOR_REQUEST_TIMEOUT: Code = Code(230);
  /// Vendor 7.07: optional header parsing error.
  pub const VENDOR_OPT_PARSING_ERROR: Code = Code(231);
  /// Vendor 7.08: unsupported optional header parsing method.
  pub const VENDOR_UNSUPPORTED_ANALYTICAL_METHOD: Code = Code(232);
  /// Vendor 7.09: unsupported packet type.
  pub const VENDOR_UNSUPPORTED_PACKET_TYPE: Code = Code(233);
  /// Vendor 7.10: data decoding error.
  pub const VENDOR_DATA_DECODING_ERROR: Code = Code(234);
  /// Vendor 7.11: package length field error.
  pub const VENDOR_PACKAGE_LENGTH_ERROR: Code = Code(235);
  /// Vendor 7.12: upstream request busy (first-generation backend).
  pub const VENDOR_UPSTREAM_BUSY: Code = Code(236);
  /// Vendor 7.13: upstream request busy (second-generation backend).
  pub const VENDOR_UPSTREAM_BUSY2: Code = Code(237);
  /// Vendor 7.14: cache service error.
  pub const VENDOR_CACHE_SERVICE_ERROR: Code = Code(238);
  /// Vendor 7.15: table store service error.
  pub const VENDOR_TABLE_STORE_ERROR: Code = Code(239);
  /// Vendor 7.16: database service error.
  pub const VENDOR_DATABASE_ERROR: Code = Code(240);
  /// Vendor 7.17: unsupported encoding type.
  pub const VENDOR_UNSUPPORTED_ENCODING: Code = Code(241);
  /// Vendor 7.18: device registered twice.
  pub const VENDOR_DEVICE_REPEAT_REGISTERED: Code = Code(242);
  /// Vendor 7.19: SIM card already in use.
  pub const VENDOR_SIM_CARD_USED: Code = Code(243);
  /// Vendor 7.20: SIM card not registered.
  pub const VENDOR_SIM_CARD_ILLEGAL: Code = Code(244);
  /// Vendor 7.21: forced device info update failed.
  pub const VENDOR_UPDATE_FORCED_FAILED: Code = Code(245);

  /// Build a code from its class (top 3 bits) and detail (low 5 bits).
  pub const fn new(class: u8, detail: u8) -> Code {
    Code((class & 0x7) << 5 | (detail & 0x1F))
  }

  /// The class of the code: 0 request, 2 success, 4 client error,
  /// 5 server error, 6-7 vendor.
  pub fn class(self) -> u8 {
    self.0 >> 5
  }

  /// Detail within the class, in `[0, 32)`.
  pub fn detail(self) -> u8 {
    self.0 & 0x1F
  }

  /// Whether the code is a request method (class 0, nonzero detail).
  pub fn is_request(self) -> bool {
    self.class() == 0 && self.0 != 0
  }

  /// Registry name of the code, if it has one.
  pub fn name(self) -> Option<&'static str> {
    let name = match self {
      | Code::EMPTY => "Empty",
      | Code::GET => "GET",
      | Code::POST => "POST",
      | Code::PUT => "PUT",
      | Code::DELETE => "DELETE",
      | Code::CREATED => "Created",
      | Code::DELETED => "Deleted",
      | Code::VALID => "Valid",
      | Code::CHANGED => "Changed",
      | Code::CONTENT => "Content",
      | Code::CONTINUE => "Continue",
      | Code::BAD_REQUEST => "Bad Request",
      | Code::UNAUTHORIZED => "Unauthorized",
      | Code::BAD_OPTION => "Bad Option",
      | Code::FORBIDDEN => "Forbidden",
      | Code::NOT_FOUND => "Not Found",
      | Code::METHOD_NOT_ALLOWED => "Method Not Allowed",
      | Code::NOT_ACCEPTABLE => "Not Acceptable",
      | Code::REQUEST_ENTITY_INCOMPLETE => "Request Entity Incomplete",
      | Code::PRECONDITION_FAILED => "Precondition Failed",
      | Code::REQUEST_ENTITY_TOO_LARGE => "Request Entity Too Large",
      | Code::UNSUPPORTED_MEDIA_TYPE => "Unsupported Media Type",
      | Code::TOO_MANY_REQUESTS => "Too Many Requests",
      | Code::INTERNAL_SERVER_ERROR => "Internal Server Error",
      | Code::NOT_IMPLEMENTED => "Not Implemented",
      | Code::BAD_GATEWAY => "Bad Gateway",
      | Code::SERVICE_UNAVAILABLE => "Service Unavailable",
      | Code::GATEWAY_TIMEOUT => "Gateway Timeout",
      | Code::PROXYING_NOT_SUPPORTED => "Proxying Not Supported",
      | _ => return None,
    };
    Some(name)
  }
}

impl From<u8> for Code {
  fn from(b: u8) -> Code {
    Code(b)
  }
}

impl From<Code> for u8 {
  fn from(c: Code) -> u8 {
    c.0
  }
}

impl fmt::Display for Code {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}.{:02}", self.class(), self.detail())?;
    match self.name() {
      | Some(name) => write!(f, " {name}"),
      | None => Ok(()),
    }
  }
}
