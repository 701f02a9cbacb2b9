use crate::error::Error;

/// Indicates if this message is of type Confirmable (0),
/// Non-confirmable (1), Acknowledgement (2) or Reset (3).
///
/// V1 carries the type in bits 2-3 of byte 0, V2 in bits 6-7, V0 in
/// bits 6-7 with only two bits of room either way. A message with no
/// type yet is `Option::<Type>::None` in memory; the sentinel never
/// reaches the wire.
#[derive(Copy, Clone, Hash, Eq, Ord, PartialEq, PartialOrd, Debug)]
pub enum Type {
  /// Requires an acknowledgement. When no packets are lost, each
  /// Confirmable message elicits exactly one Acknowledgement or Reset.
  Con,
  /// Does not require an acknowledgement; used for messages that are
  /// repeated regularly anyway, such as sensor readings.
  Non,
  /// Acknowledges that a specific Confirmable message arrived.
  Ack,
  /// Indicates that a message was received but some context to process
  /// it is missing, typically after a reboot.
  Reset,
}

impl TryFrom<u8> for Type {
  type Error = Error;

  fn try_from(b: u8) -> Result<Self, Self::Error> {
    match b {
      | 0 => Ok(Type::Con),
      | 1 => Ok(Type::Non),
      | 2 => Ok(Type::Ack),
      | 3 => Ok(Type::Reset),
      | _ => Err(Error::InvalidType),
    }
  }
}

impl From<Type> for u8 {
  fn from(t: Type) -> u8 {
    match t {
      | Type::Con => 0,
      | Type::Non => 1,
      | Type::Ack => 2,
      | Type::Reset => 3,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn wire_values() {
    for ty in [Type::Con, Type::Non, Type::Ack, Type::Reset] {
      assert_eq!(Type::try_from(u8::from(ty)), Ok(ty));
    }
    assert_eq!(Type::try_from(4), Err(Error::InvalidType));
  }
}
