//! Reusable messages.
//!
//! A [`Message`] here wraps the core [`msg::Message`] together with the
//! scratch buffers the codecs write into and an optional seekable body,
//! so a caller serving many requests can keep a free list of them and
//! never reallocate on the hot path. Instances are single-owner: the
//! scratch buffers are mutated on every marshal and unmarshal, so
//! sharing one across threads needs external synchronization (the
//! codecs themselves are stateless and freely shareable).

use core::fmt;
use std::io;
use std::io::{Read, Seek, SeekFrom};

use crate::codec::{Decoder, Encoder};
use crate::error::Error;
use crate::msg::{self, no_repeat, repeat, Code, Id, MediaType, Opt, Opts, Token, Type, Version};

/// A seekable payload source.
pub trait Body: Read + Seek {}

impl<T: Read + Seek> Body for T {}

/// Errors from operations that may touch the body stream.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
  /// A codec failure.
  #[error(transparent)]
  Codec(#[from] Error),
  /// The body stream failed to seek or read.
  #[error("cannot read body: {0}")]
  Body(#[from] io::Error),
}

const SCRATCH_SIZE: usize = 256;
const SCRATCH_MAX: usize = 1024;

/// A message plus everything needed to (de)serialize it without
/// allocating: marshal and unmarshal scratch buffers and an optional
/// body stream that is materialized into the payload at marshal time.
pub struct Message {
  msg: msg::Message,
  body: Option<Box<dyn Body>>,
  buffer_marshal: Vec<u8>,
  buffer_unmarshal: Vec<u8>,
}

impl Message {
  /// An empty reusable message with 256-byte scratch buffers.
  pub fn new() -> Message {
    Message { msg: msg::Message::new(),
              body: None,
              buffer_marshal: Vec::with_capacity(SCRATCH_SIZE),
              buffer_unmarshal: Vec::with_capacity(SCRATCH_SIZE) }
  }

  /// The wrapped message.
  pub fn inner(&self) -> &msg::Message {
    &self.msg
  }

  /// Replace the wrapped message, resetting everything else first.
  pub fn set_message(&mut self, m: msg::Message) {
    self.reset();
    self.msg = m;
  }

  /// A standalone copy of the message with the body materialized into
  /// its payload.
  pub fn to_message(&mut self) -> Result<msg::Message, PoolError> {
    let mut m = self.msg.clone();
    if let Some(payload) = self.read_body()? {
      m.payload = payload;
    }
    Ok(m)
  }

  /// Wire version the message was decoded from or is meant for.
  pub fn version(&self) -> Version {
    self.msg.ver
  }

  /// Set the wire version.
  pub fn set_version(&mut self, ver: Version) {
    self.msg.ver = ver;
  }

  /// Message ID, if assigned.
  pub fn message_id(&self) -> Option<Id> {
    self.msg.message_id
  }

  /// Assign the message ID.
  pub fn set_message_id(&mut self, mid: Id) {
    self.msg.message_id = Some(mid);
  }

  /// Assign the message ID only if none is assigned yet.
  pub fn upsert_message_id(&mut self, mid: Id) {
    if self.msg.message_id.is_none() {
      self.set_message_id(mid);
    }
  }

  /// Message type, if assigned.
  pub fn ty(&self) -> Option<Type> {
    self.msg.ty
  }

  /// Assign the message type.
  pub fn set_type(&mut self, ty: Type) {
    self.msg.ty = Some(ty);
  }

  /// Assign the message type only if none is assigned yet.
  pub fn upsert_type(&mut self, ty: Type) {
    if self.msg.ty.is_none() {
      self.set_type(ty);
    }
  }

  /// Payload encoder id.
  pub fn encoder_id(&self) -> u8 {
    self.msg.encoder_id
  }

  /// Set the payload encoder id.
  pub fn set_encoder_id(&mut self, eid: u8) {
    self.msg.encoder_id = eid;
  }

  /// Set the payload encoder id only if the current one is out of
  /// range.
  pub fn upsert_encoder_id(&mut self, eid: u8) {
    if !msg::validate_eid(self.msg.encoder_id) {
      self.set_encoder_id(eid);
    }
  }

  /// Payload encoder type.
  pub fn encoder_type(&self) -> u8 {
    self.msg.encoder_type
  }

  /// Set the payload encoder type.
  pub fn set_encoder_type(&mut self, etp: u8) {
    self.msg.encoder_type = etp;
  }

  /// Set the payload encoder type only if the current one is out of
  /// range.
  pub fn upsert_encoder_type(&mut self, etp: u8) {
    if !msg::validate_etp(self.msg.encoder_type) {
      self.set_encoder_type(etp);
    }
  }

  /// The token.
  pub fn token(&self) -> Token {
    self.msg.token
  }

  /// Set the token.
  pub fn set_token(&mut self, token: Token) {
    self.msg.token = token;
  }

  /// The code.
  pub fn code(&self) -> Code {
    self.msg.code
  }

  /// Set the code.
  pub fn set_code(&mut self, code: Code) {
    self.msg.code = code;
  }

  /// The Uri-Path joined with `/`.
  pub fn path(&self) -> String {
    self.msg.path()
  }

  /// Set the Uri-Path from a `/`-separated string.
  pub fn set_path(&mut self, path: &str) -> Result<(), Error> {
    self.msg.set_path(path)
  }

  /// The Uri-Query arguments, in insertion order.
  pub fn queries(&self) -> impl Iterator<Item = &str> + '_ {
    self.msg.queries()
  }

  /// Append a Uri-Query argument.
  pub fn add_query(&mut self, query: &str) {
    self.msg.add_query(query);
  }

  /// The options.
  pub fn opts(&self) -> &Opts {
    &self.msg.opts
  }

  /// Replace the option list.
  pub fn reset_options_to(&mut self, opts: &[Opt]) {
    self.msg.opts.reset_to(opts);
  }

  /// Remove every occurrence of an option.
  pub fn remove(&mut self, id: msg::OptionId) {
    self.msg.remove_option(id);
  }

  /// Whether any option with `id` is present.
  pub fn has_option(&self, id: msg::OptionId) -> bool {
    self.msg.opts.has(id)
  }

  /// First value of `id` read as an unsigned integer.
  pub fn option_uint(&self, id: msg::OptionId) -> Option<u32> {
    self.msg.opts.get_uint(id)
  }

  /// Replace `id` with a single unsigned integer value.
  pub fn set_option_uint(&mut self, id: msg::OptionId, value: u32) {
    self.msg.set_option(id, value);
  }

  /// Append an unsigned integer value for `id`.
  pub fn add_option_uint(&mut self, id: msg::OptionId, value: u32) {
    self.msg.add_option(id, value);
  }

  /// First value of `id` read as raw bytes.
  pub fn option_bytes(&self, id: msg::OptionId) -> Option<&[u8]> {
    self.msg.opts.get_bytes(id)
  }

  /// Replace `id` with a single opaque value.
  pub fn set_option_bytes(&mut self, id: msg::OptionId, value: &[u8]) {
    self.msg.set_option(id, value);
  }

  /// Append an opaque value for `id`.
  pub fn add_option_bytes(&mut self, id: msg::OptionId, value: &[u8]) {
    self.msg.add_option(id, value);
  }

  /// First value of `id` read as text.
  pub fn option_str(&self, id: msg::OptionId) -> Option<&str> {
    self.msg.opts.get_str(id)
  }

  /// Replace `id` with a single text value.
  pub fn set_option_str(&mut self, id: msg::OptionId, value: &str) {
    self.msg.set_option(id, value);
  }

  /// Append a text value for `id`.
  pub fn add_option_str(&mut self, id: msg::OptionId, value: &str) {
    self.msg.add_option(id, value);
  }

  /// First ETag value.
  pub fn etag(&self) -> Option<&[u8]> {
    self.option_bytes(repeat::ETAG)
  }

  /// Every ETag value, in insertion order.
  pub fn etags(&self) -> impl Iterator<Item = &[u8]> + '_ {
    self.msg.opts.get_all(repeat::ETAG).filter_map(msg::OptValue::bytes)
  }

  /// Replace the ETag options with a single value, validating its
  /// length against the registry.
  pub fn set_etag(&mut self, value: &[u8]) -> Result<(), Error> {
    if !repeat::ETAG.verify_len(value.len()) {
      return Err(Error::InvalidValueLength(value.len()));
    }
    self.set_option_bytes(repeat::ETAG, value);
    Ok(())
  }

  /// Append an ETag value, validating its length against the registry.
  pub fn add_etag(&mut self, value: &[u8]) -> Result<(), Error> {
    if !repeat::ETAG.verify_len(value.len()) {
      return Err(Error::InvalidValueLength(value.len()));
    }
    self.add_option_bytes(repeat::ETAG, value);
    Ok(())
  }

  /// The Observe option.
  pub fn observe(&self) -> Option<u32> {
    self.option_uint(no_repeat::OBSERVE)
  }

  /// Set the Observe option.
  pub fn set_observe(&mut self, observe: u32) {
    self.set_option_uint(no_repeat::OBSERVE, observe);
  }

  /// The Content-Format option.
  pub fn content_format(&self) -> Option<MediaType> {
    self.option_uint(no_repeat::CONTENT_FORMAT).map(|v| MediaType(v as u16))
  }

  /// Set the Content-Format option.
  pub fn set_content_format(&mut self, media_type: MediaType) {
    self.msg.set_option(no_repeat::CONTENT_FORMAT, media_type);
  }

  /// The Accept option.
  pub fn accept(&self) -> Option<MediaType> {
    self.option_uint(no_repeat::ACCEPT).map(|v| MediaType(v as u16))
  }

  /// Set the Accept option.
  pub fn set_accept(&mut self, media_type: MediaType) {
    self.msg.set_option(no_repeat::ACCEPT, media_type);
  }

  /// The payload bytes set directly or decoded from a frame. Does not
  /// read the body stream; see [`Message::read_body`].
  pub fn payload(&self) -> &[u8] {
    &self.msg.payload
  }

  /// Set the payload from bytes, dropping any body stream.
  pub fn set_payload(&mut self, payload: Vec<u8>) {
    self.msg.payload = payload;
    self.body = None;
  }

  /// Set the payload source to a seekable stream; it is read at
  /// marshal time.
  pub fn set_body(&mut self, body: Box<dyn Body>) {
    self.body = Some(body);
  }

  /// Size of the body stream, leaving its position untouched. Zero
  /// without a body.
  pub fn body_size(&mut self) -> Result<u64, PoolError> {
    match self.body.as_mut() {
      | None => Ok(0),
      | Some(body) => {
        let orig = body.stream_position()?;
        let size = body.seek(SeekFrom::End(0))?;
        body.seek(SeekFrom::Start(orig))?;
        Ok(size)
      },
    }
  }

  /// Read the whole body stream from its start, restoring its position
  /// afterwards. `None` without a body.
  pub fn read_body(&mut self) -> Result<Option<Vec<u8>>, PoolError> {
    let body = match self.body.as_mut() {
      | None => return Ok(None),
      | Some(body) => body,
    };

    let orig = body.stream_position()?;
    body.seek(SeekFrom::Start(0))?;
    let mut payload = Vec::new();
    body.read_to_end(&mut payload)?;
    body.seek(SeekFrom::Start(orig))?;

    Ok(Some(payload))
  }

  /// Serialize through `encoder` into the internal marshal buffer and
  /// return the written frame.
  ///
  /// The body stream, if any, is materialized into the payload first;
  /// the buffer is grown to the probed size, so the encode itself
  /// cannot come up short.
  pub fn marshal_with_encoder(&mut self, encoder: &impl Encoder) -> Result<&[u8], PoolError> {
    if let Some(payload) = self.read_body()? {
      self.msg.payload = payload;
    }

    let size = encoder.size(&self.msg)?;
    if self.buffer_marshal.len() < size {
      self.buffer_marshal.resize(size, 0);
    }
    let n = encoder.encode(&self.msg, &mut self.buffer_marshal)?;

    Ok(&self.buffer_marshal[..n])
  }

  /// Copy `data` into the internal unmarshal buffer and parse it
  /// through `decoder`.
  ///
  /// When the decoder reports that the option vector is too small, its
  /// capacity is doubled and the parse retried.
  pub fn unmarshal_with_decoder(&mut self,
                                decoder: &impl Decoder,
                                data: &[u8])
                                -> Result<usize, Error> {
    self.buffer_unmarshal.clear();
    self.buffer_unmarshal.extend_from_slice(data);
    self.body = None;

    loop {
      match decoder.decode(&self.buffer_unmarshal, &mut self.msg) {
        | Err(Error::OptionsTooSmall) => {
          let capacity = self.msg.opts.capacity().max(8) * 2;
          self.msg.opts = Opts::with_capacity(capacity);
        },
        | done => return done,
      }
    }
  }

  /// Clear the message for reuse: logical fields are zeroed, the
  /// option vector is truncated in place, the body is dropped, and a
  /// scratch buffer that grew past 1 KiB is shrunk back to 256 bytes.
  pub fn reset(&mut self) {
    self.msg.token = Token::default();
    self.msg.code = Code::EMPTY;
    self.msg.opts.clear();
    self.msg.message_id = None;
    self.msg.ty = None;
    self.msg.payload = Vec::new();
    self.body = None;

    if self.buffer_marshal.capacity() > SCRATCH_MAX {
      self.buffer_marshal = Vec::with_capacity(SCRATCH_SIZE);
    }
    if self.buffer_unmarshal.capacity() > SCRATCH_MAX {
      self.buffer_unmarshal = Vec::with_capacity(SCRATCH_SIZE);
    }
  }

  fn setup_common(&mut self,
                  code: Code,
                  path: &str,
                  token: Token,
                  opts: &[Opt])
                  -> Result<(), Error> {
    self.set_code(code);
    self.set_token(token);
    self.reset_options_to(opts);
    self.set_path(path)
  }

  /// Shape this message into a GET request.
  pub fn setup_get(&mut self, path: &str, token: Token, opts: &[Opt]) -> Result<(), Error> {
    self.setup_common(Code::GET, path, token, opts)
  }

  /// Shape this message into a POST request, with an optional typed
  /// payload stream.
  pub fn setup_post(&mut self,
                    path: &str,
                    token: Token,
                    payload: Option<(MediaType, Box<dyn Body>)>,
                    opts: &[Opt])
                    -> Result<(), Error> {
    self.setup_common(Code::POST, path, token, opts)?;
    if let Some((content_format, body)) = payload {
      self.set_content_format(content_format);
      self.set_body(body);
    }
    Ok(())
  }

  /// Shape this message into a PUT request, with an optional typed
  /// payload stream.
  pub fn setup_put(&mut self,
                   path: &str,
                   token: Token,
                   payload: Option<(MediaType, Box<dyn Body>)>,
                   opts: &[Opt])
                   -> Result<(), Error> {
    self.setup_common(Code::PUT, path, token, opts)?;
    if let Some((content_format, body)) = payload {
      self.set_content_format(content_format);
      self.set_body(body);
    }
    Ok(())
  }

  /// Shape this message into a DELETE request.
  pub fn setup_delete(&mut self, path: &str, token: Token, opts: &[Opt]) -> Result<(), Error> {
    self.setup_common(Code::DELETE, path, token, opts)
  }
}

impl Default for Message {
  fn default() -> Message {
    Message::new()
  }
}

impl fmt::Debug for Message {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Message")
     .field("msg", &self.msg)
     .field("body", &self.body.as_ref().map(|_| "..."))
     .field("buffer_marshal", &self.buffer_marshal.len())
     .field("buffer_unmarshal", &self.buffer_unmarshal.len())
     .finish()
  }
}

#[cfg(test)]
mod tests {
  use std::io::Cursor;

  use super::*;
  use crate::codec::{v1, v2};

  #[test]
  fn marshal_unmarshal_round_trip() {
    let mut m = Message::new();
    m.set_code(Code::POST);
    m.set_message_id(Id(77));
    m.set_type(Type::Con);
    m.set_path("/a/b").unwrap();
    m.set_payload(b"body".to_vec());

    let frame = m.marshal_with_encoder(&v1::Codec).unwrap().to_vec();

    let mut parsed = Message::new();
    assert_eq!(parsed.unmarshal_with_decoder(&v1::Codec, &frame), Ok(frame.len()));
    assert_eq!(parsed.code(), Code::POST);
    assert_eq!(parsed.message_id(), Some(Id(77)));
    assert_eq!(parsed.path(), "a/b");
    assert_eq!(parsed.payload(), b"body");
  }

  #[test]
  fn body_stream_is_materialized() {
    let mut m = Message::new();
    m.set_code(Code::PUT);
    m.set_message_id(Id(5));
    m.set_type(Type::Non);
    m.set_body(Box::new(Cursor::new(b"streamed".to_vec())));

    assert_eq!(m.body_size().unwrap(), 8);

    let frame = m.marshal_with_encoder(&v1::Codec).unwrap().to_vec();
    assert!(frame.ends_with(b"streamed"));

    // reading again still starts from the beginning
    assert_eq!(m.read_body().unwrap().unwrap(), b"streamed");
  }

  #[test]
  fn body_position_is_restored() {
    let mut body = Cursor::new(b"0123456789".to_vec());
    body.set_position(4);

    let mut m = Message::new();
    m.set_body(Box::new(body));

    assert_eq!(m.body_size().unwrap(), 10);
    assert_eq!(m.read_body().unwrap().unwrap(), b"0123456789");
  }

  #[test]
  fn options_capacity_doubles_until_decode_fits() {
    let mut source = Message::new();
    source.set_code(Code::GET);
    source.set_message_id(Id(1));
    source.set_type(Type::Con);
    for i in 0..40 {
      source.add_query(&format!("q{i}"));
    }
    let frame = source.marshal_with_encoder(&v1::Codec).unwrap().to_vec();

    let mut parsed = Message::new();
    assert_eq!(parsed.unmarshal_with_decoder(&v1::Codec, &frame), Ok(frame.len()));
    assert_eq!(parsed.queries().count(), 40);
    assert!(parsed.opts().capacity() >= 40);
  }

  #[test]
  fn reset_shrinks_grown_buffers() {
    let mut m = Message::new();
    m.set_code(Code::POST);
    m.set_message_id(Id(2));
    m.set_type(Type::Non);
    m.set_payload(vec![0xAB; 4096]);
    m.marshal_with_encoder(&v2::Codec).unwrap();

    m.reset();
    assert!(m.payload().is_empty());
    assert_eq!(m.code(), Code::EMPTY);
    assert_eq!(m.message_id(), None);
    assert_eq!(m.ty(), None);
    assert!(m.buffer_marshal.capacity() <= SCRATCH_MAX);

    // the option capacity survives reset
    assert!(m.opts().capacity() >= 16);
  }

  #[test]
  fn upserts_only_fill_gaps() {
    let mut m = Message::new();
    m.upsert_message_id(Id(10));
    m.upsert_message_id(Id(20));
    assert_eq!(m.message_id(), Some(Id(10)));

    m.upsert_type(Type::Ack);
    m.upsert_type(Type::Reset);
    assert_eq!(m.ty(), Some(Type::Ack));
  }

  #[test]
  fn reset_options_to_replaces_the_list() {
    let mut m = Message::new();
    m.add_query("a=1");

    let replacement = [Opt::new(repeat::URI_PATH, "x"), Opt::new(repeat::URI_QUERY, "b=2")];
    m.reset_options_to(&replacement);
    assert_eq!(m.opts().as_slice(), &replacement);
    assert_eq!(m.path(), "x");
    assert_eq!(m.queries().collect::<Vec<_>>(), vec!["b=2"]);
  }

  #[test]
  fn etag_helpers_validate() {
    let mut m = Message::new();
    m.add_etag(&[1, 2]).unwrap();
    m.add_etag(&[3]).unwrap();
    assert_eq!(m.etags().count(), 2);
    assert_eq!(m.etag(), Some(&[1u8, 2][..]));

    m.set_etag(&[9; 8]).unwrap();
    assert_eq!(m.etags().count(), 1);

    assert_eq!(m.set_etag(&[]), Err(Error::InvalidValueLength(0)));
    assert_eq!(m.add_etag(&[0; 9]), Err(Error::InvalidValueLength(9)));
  }

  #[test]
  fn setup_builders() {
    let mut m = Message::new();
    let token = Token::new(&[1, 2, 3]).unwrap();
    m.setup_get("/status", token, &[]).unwrap();
    assert_eq!(m.code(), Code::GET);
    assert_eq!(m.token(), token);
    assert_eq!(m.path(), "status");

    let body: Box<dyn Body> = Box::new(Cursor::new(b"{}".to_vec()));
    m.setup_post("/cfg", token, Some((MediaType::APP_JSON, body)), &[])
     .unwrap();
    assert_eq!(m.code(), Code::POST);
    assert_eq!(m.content_format(), Some(MediaType::APP_JSON));
    let frame = m.marshal_with_encoder(&v1::Codec).unwrap();
    assert!(frame.ends_with(b"{}"));
  }

  #[test]
  fn content_format_and_accept_round_trip() {
    let mut m = Message::new();
    m.set_code(Code::POST);
    m.set_message_id(Id(3));
    m.set_type(Type::Con);
    m.set_content_format(MediaType::APP_CBOR);
    m.set_accept(MediaType::APP_JSON);
    m.set_observe(5);

    let frame = m.marshal_with_encoder(&v1::Codec).unwrap().to_vec();

    let mut parsed = Message::new();
    parsed.unmarshal_with_decoder(&v1::Codec, &frame).unwrap();
    assert_eq!(parsed.content_format(), Some(MediaType::APP_CBOR));
    assert_eq!(parsed.accept(), Some(MediaType::APP_JSON));
    assert_eq!(parsed.observe(), Some(5));
  }
}
