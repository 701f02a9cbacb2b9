//! Frame integrity primitives.
//!
//! Two checksums appear on the wire:
//! - CRC16-MODBUS over the payload bytes (V0 little-endian, V2 big-endian),
//! - RSUM8 over the entire V2 frame.

use crc::{Crc, CRC_16_MODBUS};

const CRC16: Crc<u16> = Crc::<u16>::new(&CRC_16_MODBUS);

/// CRC16-MODBUS (polynomial 0xA001 reflected, initial 0xFFFF) of `data`.
pub fn crc16(data: &[u8]) -> u16 {
  CRC16.checksum(data)
}

/// Sum of the bitwise complement of every byte, modulo 256.
///
/// A frame whose checksum byte was patched with `rsum8` of the frame
/// (checksum position held at zero) sums back to zero:
///
/// ```
/// use secoap_msg::checksum::rsum8;
///
/// let mut frame = [0x81, 0x50, 0x00, 0x68, 0x69];
/// frame[2] = rsum8(&frame);
/// assert_eq!(rsum8(&frame), 0);
/// ```
pub fn rsum8(data: &[u8]) -> u8 {
  data.iter().fold(0u8, |sum, b| sum.wrapping_add(!b))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn crc16_check_value() {
    assert_eq!(crc16(b"123456789"), 0x4B37);
  }

  #[test]
  fn crc16_empty() {
    assert_eq!(crc16(&[]), 0xFFFF);
  }

  #[test]
  fn rsum8_vectors() {
    let cases: [(&[u8], u8); 5] = [(&[0x00, 0x01, 0x02], 0xFA),
                                   (&[0x00, 0x01, 0x02, 0x03], 0xF6),
                                   (&[0x00, 0x01, 0x02, 0x03, 0x04], 0xF1),
                                   (&[0x00, 0x01, 0x02, 0x03, 0x04, 0x05], 0xEB),
                                   (&[0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06], 0xE4)];

    for (data, want) in cases {
      assert_eq!(rsum8(data), want, "rsum8({:02X?})", data);
    }
  }

  #[test]
  fn rsum8_self_invalidating() {
    let mut frame = [0xDE, 0xAD, 0xBE, 0x00, 0xEF];
    frame[3] = rsum8(&frame);
    assert_eq!(rsum8(&frame), 0);

    frame[4] ^= 0x01;
    assert_ne!(rsum8(&frame), 0);
  }
}
