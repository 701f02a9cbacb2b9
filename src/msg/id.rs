/// # Message ID
///
/// 16-bit unsigned correlation identifier carried by V1 and V2 frames in
/// network byte order, used to pair Acknowledgement/Reset messages with
/// the Confirmable/Non-confirmable message they answer.
///
/// A message that has not been assigned an ID yet is represented as
/// `Option::<Id>::None` on [`Message`](crate::Message); the wire always
/// carries a concrete value.
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct Id(pub u16);

impl Id {
  /// Create an Id from its big-endian wire form.
  pub fn from_be_bytes(bs: [u8; 2]) -> Self {
    Self(u16::from_be_bytes(bs))
  }

  /// The big-endian wire form.
  pub fn to_be_bytes(self) -> [u8; 2] {
    self.0.to_be_bytes()
  }
}

impl From<u16> for Id {
  fn from(n: u16) -> Self {
    Id(n)
  }
}
