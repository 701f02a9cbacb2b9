//! Property tests across the three codecs.
//!
//! These verify the invariants that hold for every well-formed message:
//! - encode then decode restores the fields the wire version carries
//! - the probed size and the written size always agree
//! - every V2 frame sums to zero, and corruption never goes unnoticed
//! - payload corruption on the checksummed versions is always caught

use proptest::collection::vec;
use proptest::prelude::*;
use secoap_msg::codec::{v0, v1, v2};
use secoap_msg::{checksum, repeat, Code, Decoder, Encoder, Error, Id, Message, Token, Type};

fn type_strategy() -> impl Strategy<Value = Type> {
  prop_oneof![Just(Type::Con), Just(Type::Non), Just(Type::Ack), Just(Type::Reset)]
}

fn token_strategy() -> impl Strategy<Value = Token> {
  vec(any::<u8>(), 0..=8).prop_map(|b| Token::new(&b).unwrap())
}

#[allow(clippy::type_complexity)]
fn message_strategy() -> impl Strategy<Value = Message> {
  (any::<u8>(),
   any::<u16>(),
   type_strategy(),
   token_strategy(),
   0u8..16,
   0u8..16,
   vec(any::<u8>(), 0..64),
   vec("[a-z0-9]{1,8}", 0..4),
   vec("[a-z]{1,4}=[0-9]{1,4}", 0..3)).prop_map(|(code,
                                                  mid,
                                                  ty,
                                                  token,
                                                  eid,
                                                  etp,
                                                  payload,
                                                  segments,
                                                  queries)| {
                                        let mut m = Message::new();
                                        m.code = Code(code);
                                        m.message_id = Some(Id(mid));
                                        m.ty = Some(ty);
                                        m.token = token;
                                        m.encoder_id = eid;
                                        m.encoder_type = etp;
                                        m.payload = payload;
                                        for s in &segments {
                                          m.add_option(repeat::URI_PATH, s.as_str());
                                        }
                                        for q in &queries {
                                          m.add_query(q);
                                        }
                                        m
                                      })
}

fn encode(codec: &impl Encoder, m: &Message) -> Vec<u8> {
  let size = codec.size(m).unwrap();
  let mut buf = vec![0u8; size];
  let n = codec.encode(m, &mut buf).unwrap();
  assert_eq!(n, size);
  buf
}

#[test]
fn prop_v1_round_trip() {
  proptest!(|(m in message_strategy())| {
    let frame = encode(&v1::Codec, &m);

    let mut parsed = Message::new();
    prop_assert_eq!(v1::Codec.decode(&frame, &mut parsed), Ok(frame.len()));

    prop_assert_eq!(parsed.code, m.code);
    prop_assert_eq!(parsed.message_id, m.message_id);
    prop_assert_eq!(parsed.ty, m.ty);
    prop_assert_eq!(parsed.token, m.token);
    prop_assert_eq!(&parsed.opts, &m.opts);
    prop_assert_eq!(&parsed.payload, &m.payload);
  });
}

#[test]
fn prop_v2_round_trip() {
  proptest!(|(m in message_strategy())| {
    let frame = encode(&v2::Codec, &m);

    let mut parsed = Message::new();
    prop_assert_eq!(v2::Codec.decode(&frame, &mut parsed), Ok(frame.len()));

    prop_assert_eq!(parsed.code, m.code);
    prop_assert_eq!(parsed.message_id, m.message_id);
    prop_assert_eq!(parsed.ty, m.ty);
    prop_assert_eq!(parsed.token, m.token);
    prop_assert_eq!(&parsed.opts, &m.opts);
    prop_assert_eq!(&parsed.payload, &m.payload);
    prop_assert_eq!(parsed.encoder_id, m.encoder_id);
    prop_assert_eq!(parsed.encoder_type, m.encoder_type);
    prop_assert_eq!(parsed.crc16, checksum::crc16(&m.payload));
  });
}

#[test]
fn prop_v0_round_trip() {
  proptest!(|(m in message_strategy())| {
    let frame = encode(&v0::Codec, &m);
    prop_assert_eq!(frame.len(), 4 + m.payload.len());

    let mut parsed = Message::new();
    prop_assert_eq!(v0::Codec.decode(&frame, &mut parsed), Ok(frame.len()));

    prop_assert_eq!(parsed.ty, m.ty);
    prop_assert_eq!(parsed.encoder_id, m.encoder_id);
    prop_assert_eq!(parsed.encoder_type, m.encoder_type);
    prop_assert_eq!(&parsed.payload, &m.payload);
    prop_assert_eq!(parsed.crc16, checksum::crc16(&m.payload));
  });
}

#[test]
fn prop_size_probe_matches_written_size() {
  proptest!(|(m in message_strategy())| {
    for codec in [&v1::Codec as &dyn Encoder, &v2::Codec] {
      let size = codec.size(&m).unwrap();
      prop_assert_eq!(codec.encode(&m, &mut []),
                      Err(Error::TooSmall { required: size }));

      let mut buf = vec![0u8; size];
      prop_assert_eq!(codec.encode(&m, &mut buf), Ok(size));

      // one byte short still names the full size
      if size > 0 {
        let mut short = vec![0u8; size - 1];
        prop_assert_eq!(codec.encode(&m, &mut short),
                        Err(Error::TooSmall { required: size }));
      }
    }
  });
}

#[test]
fn prop_v2_frames_sum_to_zero() {
  proptest!(|(m in message_strategy())| {
    let frame = encode(&v2::Codec, &m);
    prop_assert_eq!(checksum::rsum8(&frame), 0);
  });
}

#[test]
fn prop_v2_bit_flips_never_pass() {
  proptest!(|(m in message_strategy(), byte in any::<prop::sample::Index>(), bit in 0usize..8)| {
    let mut frame = encode(&v2::Codec, &m);
    let byte = byte.index(frame.len());
    frame[byte] ^= 1 << bit;

    let mut parsed = Message::new();
    prop_assert_eq!(v2::Codec.decode(&frame, &mut parsed),
                    Err(Error::InvalidRsum8));
  });
}

#[test]
fn prop_v0_payload_corruption_fails_crc() {
  proptest!(|(m in message_strategy(), byte in any::<prop::sample::Index>(), bit in 0usize..8)| {
    prop_assume!(!m.payload.is_empty());

    let mut frame = encode(&v0::Codec, &m);
    let byte = 4 + byte.index(frame.len() - 4);
    frame[byte] ^= 1 << bit;

    let mut parsed = Message::new();
    prop_assert_eq!(v0::Codec.decode(&frame, &mut parsed),
                    Err(Error::InvalidCrc16));
  });
}

#[test]
fn prop_wire_option_ids_are_nondecreasing() {
  proptest!(|(m in message_strategy())| {
    let frame = encode(&v1::Codec, &m);

    let mut parsed = Message::new();
    v1::Codec.decode(&frame, &mut parsed).unwrap();

    let ids: Vec<u32> = parsed.opts.iter().map(|o| o.id.0).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    prop_assert_eq!(ids, sorted);
  });
}
