//! The CoAP-compatible V1 framing.
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |0 1| T |  TKL  |      Code     |          Message ID           |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |   Token (if any, TKL bytes) ...
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |   Options (if any) ...
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |1 1 1 1 1 1 1 1|    Payload (if any) ...
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! No integrity fields; transports that need them use V2.

use super::{Decoder, Encoder};
use crate::error::Error;
use crate::msg::opt::PAYLOAD_MARKER;
use crate::msg::{Code, Id, Message, Token, Type, Version};

/// The V1 codec.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Codec;

impl Encoder for Codec {
  fn size(&self, m: &Message) -> Result<usize, Error> {
    let mut size = 4 + m.token.len() + m.opts.encoded_size();
    if !m.payload.is_empty() {
      // for the separator
      size += 1 + m.payload.len();
    }
    Ok(size)
  }

  fn encode(&self, m: &Message, buf: &mut [u8]) -> Result<usize, Error> {
    let mid = m.message_id.ok_or(Error::InvalidMessageId)?;
    let ty = m.ty.ok_or(Error::InvalidType)?;

    let size = self.size(m)?;
    if buf.len() < size {
      return Err(Error::TooSmall { required: size });
    }

    buf[0] = Version::V1.bits() << 6 | u8::from(ty) << 4 | m.token.len() as u8;
    buf[1] = m.code.0;
    buf[2..4].copy_from_slice(&mid.to_be_bytes());

    let mut n = 4;
    buf[n..n + m.token.len()].copy_from_slice(m.token.as_bytes());
    n += m.token.len();

    n += m.opts.marshal(&mut buf[n..])?;

    if !m.payload.is_empty() {
      buf[n] = PAYLOAD_MARKER;
      n += 1;
      buf[n..n + m.payload.len()].copy_from_slice(&m.payload);
      n += m.payload.len();
    }

    Ok(n)
  }
}

impl Decoder for Codec {
  fn decode(&self, data: &[u8], m: &mut Message) -> Result<usize, Error> {
    if data.len() < 4 {
      return Err(Error::MessageTruncated);
    }
    if data[0] >> 6 != Version::V1.bits() {
      return Err(Error::MessageInvalidVersion);
    }

    let ty = Type::try_from(data[0] >> 4 & 0x3)?;
    let tkl = (data[0] & 0xF) as usize;
    if tkl > Token::MAX_SIZE {
      return Err(Error::InvalidTokenLen(tkl));
    }

    let code = Code(data[1]);
    let mid = Id::from_be_bytes([data[2], data[3]]);

    let rest = &data[4..];
    if rest.len() < tkl {
      return Err(Error::MessageTruncated);
    }
    let token = Token::new(&rest[..tkl])?;
    let rest = &rest[tkl..];

    m.opts.clear();
    let proc = m.opts.unmarshal(rest)?;

    m.ver = Version::V1;
    m.token = token;
    m.code = code;
    m.message_id = Some(mid);
    m.ty = Some(ty);
    m.payload.clear();
    m.payload.extend_from_slice(&rest[proc..]);

    Ok(data.len())
  }
}
