//! Low-level representation of SECOAP messages.
//!
//! SECOAP is a compact binary messaging protocol between IoT devices
//! and servers, derived from CoAP. Three wire versions share one
//! logical message model (token, options, payload) but differ in header
//! layout, integrity fields and capability set; this crate is the codec
//! core: the bit-exact encoder/decoder for each version, the
//! delta-compressed option TLV engine, and the message model with its
//! reuse discipline.
//!
//! ## Encoding and decoding
//!
//! The codecs write into caller-provided buffers and support size
//! probing: encoding into a buffer that is too small (an empty one
//! included) fails with [`Error::TooSmall`] carrying the exact size
//! needed, so a caller can allocate once and retry. [`pool::Message`]
//! packages that dance together with reusable scratch buffers.
//!
//! ```
//! use secoap_msg::codec::v2;
//! use secoap_msg::{checksum, Code, Decoder, Encoder, Id, Message, Type};
//!
//! let mut m = Message::new();
//! m.code = Code::POST;
//! m.message_id = Some(Id(1));
//! m.ty = Some(Type::Non);
//! m.encoder_id = 5;
//! m.payload = b"hi".to_vec();
//!
//! let size = v2::Codec.size(&m).unwrap();
//! let mut frame = vec![0u8; size];
//! v2::Codec.encode(&m, &mut frame).unwrap();
//!
//! // every V2 frame sums to zero
//! assert_eq!(checksum::rsum8(&frame), 0);
//!
//! let mut parsed = Message::new();
//! v2::Codec.decode(&frame, &mut parsed).unwrap();
//! assert_eq!(parsed.payload, b"hi");
//! ```
//!
//! ## Concurrency
//!
//! Codecs are stateless and freely shareable. A [`Message`] (and even
//! more so a [`pool::Message`]) is single-owner: it holds buffers that
//! are mutated on every marshal and unmarshal.

#![doc(html_root_url = "https://docs.rs/secoap-msg/0.1.0")]
#![cfg_attr(not(test), forbid(missing_debug_implementations, unreachable_pub))]
#![cfg_attr(not(test), deny(unsafe_code, missing_copy_implementations))]
#![deny(missing_docs)]

/// Integrity primitives (CRC16-MODBUS, RSUM8).
pub mod checksum;

/// The three wire codecs.
pub mod codec;

/// Error vocabulary.
pub mod error;

/// Message structs.
pub mod msg;

/// Reusable messages with scratch buffers.
pub mod pool;

/// Variable-length unsigned values.
pub mod uint;

#[doc(inline)]
pub use codec::{Decoder, Encoder};
#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use msg::*;

#[cfg(test)]
pub(crate) fn test_msg() -> (Message, Vec<u8>) {
  let mut m = Message::new();
  m.code = Code::CONTENT;
  m.message_id = Some(Id(1));
  m.ty = Some(Type::Con);
  m.token = Token::new(&[254]).unwrap();
  m.add_option(no_repeat::CONTENT_FORMAT, MediaType::APP_JSON);
  m.payload = b"hello, world!".to_vec();

  let header: [u8; 4] = [0x41, 0x45, 0x00, 0x01];
  let token: [u8; 1] = [254];
  let options: [u8; 2] = [0xC1, 50];
  let bytes = [header.as_ref(),
               token.as_ref(),
               options.as_ref(),
               &[0xFF],
               b"hello, world!"].concat();

  (m, bytes)
}
