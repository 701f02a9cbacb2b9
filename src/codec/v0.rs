//! The legacy V0 framing.
//!
//! ```text
//!  0                   1                   2                   3
//!  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! |0 0|R|R|R|R| T |  EID  |  ETP  |    CRC16-L    |    CRC16-H    |
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! | Payload (if any) ...
//! +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
//! ```
//!
//! No token, no options, no payload separator; the CRC16 of the payload
//! travels little-endian, unlike everything else in the protocol.

use super::{Decoder, Encoder};
use crate::checksum;
use crate::error::Error;
use crate::msg::encoding::{check_eid, check_etp};
use crate::msg::{Message, Type, Version};

/// The V0 codec.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Codec;

impl Encoder for Codec {
  fn size(&self, m: &Message) -> Result<usize, Error> {
    Ok(4 + m.payload.len())
  }

  fn encode(&self, m: &Message, buf: &mut [u8]) -> Result<usize, Error> {
    let ty = m.ty.ok_or(Error::InvalidType)?;
    check_eid(m.encoder_id)?;
    check_etp(m.encoder_type)?;

    let size = self.size(m)?;
    if buf.len() < size {
      return Err(Error::TooSmall { required: size });
    }

    let crc = checksum::crc16(&m.payload);

    buf[0] = u8::from(ty);
    buf[1] = m.encoder_id << 4 | m.encoder_type;
    buf[2..4].copy_from_slice(&crc.to_le_bytes());
    buf[4..size].copy_from_slice(&m.payload);

    Ok(size)
  }
}

impl Decoder for Codec {
  fn decode(&self, data: &[u8], m: &mut Message) -> Result<usize, Error> {
    if data.len() < 4 {
      return Err(Error::MessageTruncated);
    }
    if data[0] >> 6 != Version::V0.bits() {
      return Err(Error::MessageInvalidVersion);
    }

    let ty = Type::try_from(data[0] & 0x3)?;
    let eid = data[1] >> 4;
    let etp = data[1] & 0xF;
    let crc = u16::from_le_bytes([data[2], data[3]]);
    let payload = &data[4..];

    if crc != checksum::crc16(payload) {
      return Err(Error::InvalidCrc16);
    }

    m.ver = Version::V0;
    m.ty = Some(ty);
    m.encoder_id = eid;
    m.encoder_type = etp;
    m.crc16 = crc;
    m.payload.clear();
    m.payload.extend_from_slice(payload);

    Ok(data.len())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn known_frame() {
    let mut m = Message::new();
    m.ty = Some(Type::Con);
    m.payload = vec![0x00, 0x01, 0x02];

    let mut buf = vec![0u8; Codec.size(&m).unwrap()];
    let n = Codec.encode(&m, &mut buf).unwrap();
    assert_eq!(n, 7);
    assert_eq!(buf, [0x00, 0x00, 0xF1, 0x91, 0x00, 0x01, 0x02]);

    let mut parsed = Message::new();
    assert_eq!(Codec.decode(&buf, &mut parsed), Ok(7));
    assert_eq!(parsed.ver, Version::V0);
    assert_eq!(parsed.ty, Some(Type::Con));
    assert_eq!(parsed.encoder_id, 0);
    assert_eq!(parsed.encoder_type, 0);
    assert_eq!(parsed.crc16, 0x91F1);
    assert_eq!(parsed.payload, vec![0x00, 0x01, 0x02]);
  }

  #[test]
  fn encoder_pair_round_trip() {
    let mut m = Message::new();
    m.ty = Some(Type::Non);
    m.encoder_id = 0xA;
    m.encoder_type = 0x5;
    m.payload = b"data".to_vec();

    let mut buf = vec![0u8; Codec.size(&m).unwrap()];
    Codec.encode(&m, &mut buf).unwrap();
    assert_eq!(buf[1], 0xA5);

    let mut parsed = Message::new();
    Codec.decode(&buf, &mut parsed).unwrap();
    assert_eq!(parsed.encoder_id, 0xA);
    assert_eq!(parsed.encoder_type, 0x5);
  }

  #[test]
  fn size_probe() {
    let mut m = Message::new();
    m.ty = Some(Type::Con);
    m.payload = vec![1, 2, 3, 4];

    assert_eq!(Codec.encode(&m, &mut []), Err(Error::TooSmall { required: 8 }));
  }

  #[test]
  fn field_validation() {
    let mut m = Message::new();
    assert_eq!(Codec.encode(&m, &mut [0; 16]), Err(Error::InvalidType));

    m.ty = Some(Type::Con);
    m.encoder_id = 16;
    assert_eq!(Codec.encode(&m, &mut [0; 16]), Err(Error::InvalidEncoderId(16)));

    m.encoder_id = 0;
    m.encoder_type = 200;
    assert_eq!(Codec.encode(&m, &mut [0; 16]), Err(Error::InvalidEncoderType(200)));
  }

  #[test]
  fn corrupted_payload_fails_crc() {
    let mut m = Message::new();
    m.ty = Some(Type::Con);
    m.payload = b"payload".to_vec();

    let mut buf = vec![0u8; Codec.size(&m).unwrap()];
    Codec.encode(&m, &mut buf).unwrap();

    buf[5] ^= 0x01;
    let mut parsed = Message::new();
    assert_eq!(Codec.decode(&buf, &mut parsed), Err(Error::InvalidCrc16));
  }

  #[test]
  fn wrong_version_and_truncation() {
    let mut parsed = Message::new();
    assert_eq!(Codec.decode(&[0x40, 0, 0, 0], &mut parsed),
               Err(Error::MessageInvalidVersion));
    assert_eq!(Codec.decode(&[0x00, 0x00], &mut parsed), Err(Error::MessageTruncated));
  }
}
