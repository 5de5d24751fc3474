use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use txscript::{Decodable, Encodable, Script};

fn p2pkh_out_bytes() -> Vec<u8> {
    hex::decode("76a914000000000000000000000000000000000000000088ac").unwrap()
}

fn multisig_out_bytes() -> Vec<u8> {
    let mut script = Script::empty();
    script
        .append(txscript::chunk::Chunk::bare(0x52)) // OP_2
        .unwrap();
    for _ in 0..3 {
        script.append(vec![0x02u8; 33]).unwrap();
    }
    script.append(txscript::chunk::Chunk::bare(0x53)).unwrap(); // OP_3
    script
        .append(txscript::chunk::Chunk::bare(0xae)) // OP_CHECKMULTISIG
        .unwrap();
    script.encode_to_vec()
}

fn bench_parse(c: &mut Criterion) {
    let raw = p2pkh_out_bytes();
    c.bench_function("parse p2pkh_out", |b| {
        b.iter(|| Script::decode(&mut Bytes::from(raw.clone())).unwrap())
    });
}

fn bench_classify(c: &mut Criterion) {
    let raw = p2pkh_out_bytes();
    let script = Script::decode(&mut Bytes::from(raw)).unwrap();
    c.bench_function("classify p2pkh_out", |b| {
        b.iter(|| black_box(script.classify()))
    });
}

fn bench_serialize(c: &mut Criterion) {
    let raw = multisig_out_bytes();
    let script = Script::decode(&mut Bytes::from(raw)).unwrap();
    c.bench_function("serialize multisig_out", |b| {
        b.iter(|| black_box(script.encode_to_vec()))
    });
}

fn bench_round_trip(c: &mut Criterion) {
    let raw = multisig_out_bytes();
    c.bench_function("parse -> classify -> serialize", |b| {
        b.iter(|| {
            let script = Script::decode(&mut Bytes::from(raw.clone())).unwrap();
            black_box(script.classify());
            black_box(script.encode_to_vec())
        })
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_classify,
    bench_serialize,
    bench_round_trip
);
criterion_main!(benches);
