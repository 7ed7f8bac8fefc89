use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gifdec::Decoder;

/// 10x10 image with a 4 color global table
const SIMPLE: &[u8] = &[
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x0A, 0x00, 0x0A, 0x00, 0x91, 0x00,
    0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0x00, 0x00, 0x00, 0x00, 0xFF, 0x00, 0x00,
    0x00, 0x21, 0xF9, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00, 0x2C, 0x00, 0x00,
    0x00, 0x00, 0x0A, 0x00, 0x0A, 0x00, 0x00, 0x02, 0x16, 0x8C, 0x2D, 0x99,
    0x87, 0x2A, 0x1C, 0xDC, 0x33, 0xA0, 0x02, 0x75, 0xEC, 0x95, 0xFA, 0xA8,
    0xDE, 0x60, 0x8C, 0x04, 0x91, 0x4C, 0x01, 0x00, 0x3B,
];

fn decode_simple(crit: &mut Criterion) {
    let dec = Decoder::new();
    crit.bench_function("decode_simple", |b| {
        b.iter(|| {
            let gif = dec.decode(black_box(SIMPLE)).unwrap();
            black_box(gif);
        })
    });
}

fn decode_lzw(crit: &mut Criterion) {
    // clear code followed by a repeating bit pattern
    let mut data = vec![0x0C];
    data.resize(4096, 0x92);
    crit.bench_function("decode_lzw", |b| {
        b.iter(|| black_box(gifdec::lzw::decode(2, black_box(&data), 65536)))
    });
}

criterion_group!(benches, decode_simple, decode_lzw);
criterion_main!(benches);
