//! The extended V2 framing.
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |1 0|  TKL  | T |  EID  |  ETP  |   CRC16                       |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |   Message ID                  |   Code        |   RSUM8       |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |   Token (if any, TKL bytes) ...
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |   Options (if any) ...
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |1 1 1 1 1 1 1 1|    Payload (if any) ...
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! RSUM8 covers the entire frame including its own byte, so the byte is
//! written as zero first and patched once the frame is complete; a
//! receiver just checks that the whole frame sums to zero. CRC16 covers
//! the payload only and travels big-endian here.

use super::{Decoder, Encoder};
use crate::checksum;
use crate::error::Error;
use crate::msg::encoding::{check_eid, check_etp};
use crate::msg::opt::PAYLOAD_MARKER;
use crate::msg::{Code, Id, Message, Token, Type, Version};

/// The V2 codec.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Codec;

impl Encoder for Codec {
  fn size(&self, m: &Message) -> Result<usize, Error> {
    let mut size = 8 + m.token.len() + m.opts.encoded_size();
    if !m.payload.is_empty() {
      // for the separator
      size += 1 + m.payload.len();
    }
    Ok(size)
  }

  fn encode(&self, m: &Message, buf: &mut [u8]) -> Result<usize, Error> {
    let mid = m.message_id.ok_or(Error::InvalidMessageId)?;
    let ty = m.ty.ok_or(Error::InvalidType)?;
    check_eid(m.encoder_id)?;
    check_etp(m.encoder_type)?;

    let size = self.size(m)?;
    if buf.len() < size {
      return Err(Error::TooSmall { required: size });
    }

    let crc = checksum::crc16(&m.payload);

    buf[0] = Version::V2.bits() << 6 | (m.token.len() as u8) << 2 | u8::from(ty);
    buf[1] = m.encoder_id << 4 | m.encoder_type;
    buf[2..4].copy_from_slice(&crc.to_be_bytes());
    buf[4..6].copy_from_slice(&mid.to_be_bytes());
    buf[6] = m.code.0;
    buf[7] = 0x00; // patched once the frame is complete

    let mut n = 8;
    buf[n..n + m.token.len()].copy_from_slice(m.token.as_bytes());
    n += m.token.len();

    n += m.opts.marshal(&mut buf[n..])?;

    if !m.payload.is_empty() {
      buf[n] = PAYLOAD_MARKER;
      n += 1;
      buf[n..n + m.payload.len()].copy_from_slice(&m.payload);
      n += m.payload.len();
    }

    buf[7] = checksum::rsum8(&buf[..n]);

    Ok(n)
  }
}

impl Decoder for Codec {
  fn decode(&self, data: &[u8], m: &mut Message) -> Result<usize, Error> {
    if data.len() < 8 {
      return Err(Error::MessageTruncated);
    }
    if checksum::rsum8(data) != 0 {
      return Err(Error::InvalidRsum8);
    }
    if data[0] >> 6 != Version::V2.bits() {
      return Err(Error::MessageInvalidVersion);
    }

    let ty = Type::try_from(data[0] & 0x3)?;
    let tkl = (data[0] >> 2 & 0xF) as usize;
    if tkl > Token::MAX_SIZE {
      return Err(Error::InvalidTokenLen(tkl));
    }

    let eid = data[1] >> 4;
    let etp = data[1] & 0xF;
    let crc = u16::from_be_bytes([data[2], data[3]]);
    let mid = Id::from_be_bytes([data[4], data[5]]);
    let code = Code(data[6]);
    let rsum = data[7];

    let rest = &data[8..];
    if rest.len() < tkl {
      return Err(Error::MessageTruncated);
    }
    let token = Token::new(&rest[..tkl])?;
    let rest = &rest[tkl..];

    m.opts.clear();
    let proc = m.opts.unmarshal(rest)?;
    let payload = &rest[proc..];

    if crc != checksum::crc16(payload) {
      return Err(Error::InvalidCrc16);
    }

    m.ver = Version::V2;
    m.token = token;
    m.code = code;
    m.message_id = Some(mid);
    m.ty = Some(ty);
    m.encoder_id = eid;
    m.encoder_type = etp;
    m.crc16 = crc;
    m.rsum8 = rsum;
    m.payload.clear();
    m.payload.extend_from_slice(payload);

    Ok(data.len())
  }
}
