use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use secoap_msg::codec::{v0, v1, v2};
use secoap_msg::{repeat, Code, Decoder, Encoder, Id, Message, Token, Type};

#[derive(Clone, Copy, Debug)]
struct TestInput {
  tkl: usize,
  n_opts: usize,
  payload_size: usize,
}

impl core::fmt::Display for TestInput {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(f,
           "tkl{}_opts{}_payload{}",
           self.tkl, self.n_opts, self.payload_size)
  }
}

fn message(input: TestInput) -> Message {
  let mut m = Message::new();
  m.code = Code::POST;
  m.message_id = Some(Id(0x1234));
  m.ty = Some(Type::Con);
  m.encoder_id = 5;
  m.token = Token::new(&vec![0xAB; input.tkl]).unwrap();
  for i in 0..input.n_opts {
    m.add_option(repeat::URI_PATH, format!("segment{i}"));
  }
  m.payload = vec![0x42; input.payload_size];
  m
}

const INPUTS: [TestInput; 4] = [TestInput { tkl: 0,
                                            n_opts: 0,
                                            payload_size: 0 },
                                TestInput { tkl: 4,
                                            n_opts: 4,
                                            payload_size: 16 },
                                TestInput { tkl: 8,
                                            n_opts: 8,
                                            payload_size: 128 },
                                TestInput { tkl: 8,
                                            n_opts: 16,
                                            payload_size: 2048 }];

fn message_encode(c: &mut Criterion) {
  let mut group = c.benchmark_group("msg/encode");

  for input in INPUTS {
    let m = message(input);

    for (name, codec) in [("v1", &v1::Codec as &dyn Encoder), ("v2", &v2::Codec)] {
      let size = codec.size(&m).unwrap();
      let mut buf = vec![0u8; size];
      group.bench_with_input(BenchmarkId::new(name, input), &m, |b, m| {
             b.iter(|| codec.encode(black_box(m), &mut buf).unwrap())
           });
    }
  }

  let m = message(INPUTS[3]);
  let mut buf = vec![0u8; v0::Codec.size(&m).unwrap()];
  group.bench_with_input(BenchmarkId::new("v0", INPUTS[3]), &m, |b, m| {
         b.iter(|| v0::Codec.encode(black_box(m), &mut buf).unwrap())
       });

  group.finish();
}

fn message_decode(c: &mut Criterion) {
  let mut group = c.benchmark_group("msg/decode");

  for input in INPUTS {
    let m = message(input);

    for (name, encoder, decoder) in [("v1", &v1::Codec as &dyn Encoder, &v1::Codec as &dyn Decoder),
                                     ("v2", &v2::Codec, &v2::Codec)]
    {
      let mut frame = vec![0u8; encoder.size(&m).unwrap()];
      encoder.encode(&m, &mut frame).unwrap();

      let mut out = Message::new();
      group.bench_with_input(BenchmarkId::new(name, input), &frame, |b, frame| {
             b.iter(|| decoder.decode(black_box(frame), &mut out).unwrap())
           });
    }
  }

  group.finish();
}

criterion_group!(benches, message_encode, message_decode);
criterion_main!(benches);
