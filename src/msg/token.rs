use tinyvec::ArrayVec;

use crate::error::Error;

/// Opaque correlator that accompanies requests and responses.
///
/// Tokens are 0 to 8 bytes and live inline in the message; an empty
/// token is simply absent from the wire (TKL 0). Unlike the message ID,
/// the token survives across retransmissions and separate responses.
#[derive(Copy, Clone, Hash, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
pub struct Token(pub ArrayVec<[u8; 8]>);

impl Token {
  /// Maximum token size representable by the 4-bit TKL field that the
  /// protocol accepts.
  pub const MAX_SIZE: usize = 8;

  /// Copy `bytes` into a new token, rejecting more than
  /// [`Token::MAX_SIZE`] of them.
  pub fn new(bytes: &[u8]) -> Result<Token, Error> {
    if bytes.len() > Token::MAX_SIZE {
      return Err(Error::InvalidTokenLen(bytes.len()));
    }

    let mut t = ArrayVec::new();
    t.extend_from_slice(bytes);
    Ok(Token(t))
  }

  /// Token length in bytes (the TKL field).
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Whether the token is absent.
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// The token bytes.
  pub fn as_bytes(&self) -> &[u8] {
    self.0.as_slice()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bounds() {
    assert_eq!(Token::new(&[]).unwrap().len(), 0);
    assert_eq!(Token::new(&[1, 2, 3]).unwrap().as_bytes(), &[1, 2, 3]);
    assert_eq!(Token::new(&[0; 8]).unwrap().len(), 8);
    assert_eq!(Token::new(&[0; 9]), Err(Error::InvalidTokenLen(9)));
  }
}
