//! The logical message and its fields.
//!
//! [`Message`] is the in-memory form shared by the three wire versions;
//! each codec reads and writes the subset of fields its framing
//! carries. Fields a frame does not carry keep whatever value they had,
//! which is what makes a message reusable across decodes.

/// Message code.
pub mod code;
/// Payload content encoding (EID/ETP).
pub mod encoding;
/// Message ID.
pub mod id;
/// Payload media types.
pub mod media_type;
/// Message options.
pub mod opt;
/// Message token.
pub mod token;
/// Message type.
pub mod ty;
/// Wire version.
pub mod ver;

pub use code::*;
pub use encoding::*;
pub use id::*;
pub use media_type::*;
pub use opt::*;
pub use token::*;
pub use ty::*;
pub use ver::*;

use crate::error::Error;

/// A SECOAP message, close to the wire layout but with every field in
/// its decoded form.
///
/// Construction starts from [`Message::new`] (or `Default`), fields are
/// filled through the setters or directly, and one of the codecs in
/// [`crate::codec`] turns the message into a frame. `message_id` and
/// `ty` are `None` until assigned; encoding a version that carries them
/// fails until they are set. `crc16` and `rsum8` are outputs of
/// decoding (and of V0/V2 encoding), never inputs.
///
/// ```
/// use secoap_msg::codec::v1;
/// use secoap_msg::{Code, Encoder, Id, Message, Type};
///
/// let mut m = Message::new();
/// m.code = Code::GET;
/// m.message_id = Some(Id(0x1234));
/// m.ty = Some(Type::Con);
/// m.set_path("/sensors/temp").unwrap();
///
/// let size = v1::Codec.size(&m).unwrap();
/// let mut frame = vec![0u8; size];
/// v1::Codec.encode(&m, &mut frame).unwrap();
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
  /// Which wire framing the message was decoded from or is meant for.
  pub ver: Version,
  /// See [`Token`].
  pub token: Token,
  /// See [`Opts`].
  pub opts: Opts,
  /// See [`Code`].
  pub code: Code,
  /// Payload bytes; empty means no payload (and no 0xFF separator on
  /// the wire).
  pub payload: Vec<u8>,
  /// See [`Id`]; `None` while unassigned. Carried by V1 and V2.
  pub message_id: Option<Id>,
  /// See [`Type`]; `None` while unassigned.
  pub ty: Option<Type>,
  /// 4-bit payload encoder id. Carried by V0 and V2.
  pub encoder_id: u8,
  /// 4-bit payload encoder type. Carried by V0 and V2.
  pub encoder_type: u8,
  /// CRC16-MODBUS of the payload, as read from or written to the wire
  /// (V0 and V2).
  pub crc16: u16,
  /// RSUM8 of the whole frame, as read from the wire (V2).
  pub rsum8: u8,
}

impl Message {
  /// An empty message with room for 16 options.
  pub fn new() -> Message {
    Message { ver: Version::default(),
              token: Token::default(),
              opts: Opts::with_capacity(16),
              code: Code::EMPTY,
              payload: Vec::new(),
              message_id: None,
              ty: None,
              encoder_id: 0,
              encoder_type: 0,
              crc16: 0,
              rsum8: 0 }
  }

  /// Whether this message requires an acknowledgement.
  pub fn is_confirmable(&self) -> bool {
    self.ty == Some(Type::Con)
  }

  /// First value of the option `id`, if present.
  pub fn option(&self, id: OptionId) -> Option<&OptValue> {
    self.opts.get(id)
  }

  /// Every value of the option `id`, in insertion order.
  pub fn options(&self, id: OptionId) -> impl Iterator<Item = &OptValue> + '_ {
    self.opts.get_all(id)
  }

  /// Append an option.
  pub fn add_option(&mut self, id: OptionId, value: impl Into<OptValue>) {
    self.opts.add(id, value);
  }

  /// Replace every occurrence of `id` with a single new value.
  pub fn set_option(&mut self, id: OptionId, value: impl Into<OptValue>) {
    self.opts.set(id, value);
  }

  /// Remove every occurrence of `id`.
  pub fn remove_option(&mut self, id: OptionId) {
    self.opts.remove(id);
  }

  /// The Uri-Path joined with `/`.
  pub fn path(&self) -> String {
    self.opts.path()
  }

  /// Set the Uri-Path from a `/`-separated string; see
  /// [`Opts::set_path`].
  pub fn set_path(&mut self, path: &str) -> Result<(), Error> {
    self.opts.set_path(path)
  }

  /// The Uri-Query arguments, in insertion order.
  pub fn queries(&self) -> impl Iterator<Item = &str> + '_ {
    self.opts.queries()
  }

  /// Append a Uri-Query argument.
  pub fn add_query(&mut self, query: &str) {
    self.opts.add_query(query);
  }

  /// The payload content encoding selected by the message's
  /// (encoder-type, encoder-id) pair.
  pub fn content_encoding(&self) -> ContentEncoding {
    ContentEncoding::of(self.encoder_type, self.encoder_id)
  }
}

impl Default for Message {
  fn default() -> Message {
    Message::new()
  }
}
