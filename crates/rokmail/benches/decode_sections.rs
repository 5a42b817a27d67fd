//! Benchmark – `rokmail::decode_sections`
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rokmail::{Encoder, decode_sections};

/// A deterministic report of `sections` sections, each holding a handful of
/// scalars and one nested object, with a few noise bytes between sections.
fn make_payload(sections: u32) -> Vec<u8> {
    let mut enc = Encoder::new();
    for i in 0..sections {
        enc.key("section").unwrap().string("Battle").unwrap();
        enc.key("index").unwrap().f64(f64::from(i));
        enc.key("power").unwrap().f32(0.25);
        enc.key("won").unwrap().bool(i % 2 == 0);
        enc.key("detail").unwrap().begin_object();
        enc.key("kills").unwrap().f64(12.0);
        enc.key("name").unwrap().string("Lohar's Camp").unwrap();
        enc.end();
        enc.end();
        enc.raw(&[0x00, 0x13, 0x37, 0x00]);
    }
    enc.into_bytes()
}

/// Noise bytes with a single section at the very end, so decoding spends
/// its time in the resynchronization scan.
fn make_noisy_payload(noise: usize) -> Vec<u8> {
    let mut enc = Encoder::new();
    enc.raw(&vec![0x04; noise]);
    enc.key("tail").unwrap().bool(true).end();
    enc.into_bytes()
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_sections");
    for &count in &[10u32, 100, 1_000] {
        let payload = make_payload(count);
        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(BenchmarkId::new("sections", count), &payload, |b, p| {
            b.iter(|| decode_sections(black_box(p)).unwrap().len());
        });
    }
    group.finish();
}

fn bench_resync(c: &mut Criterion) {
    let mut group = c.benchmark_group("resync_scan");
    for &noise in &[1_000usize, 100_000] {
        let payload = make_noisy_payload(noise);
        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(BenchmarkId::new("noise", noise), &payload, |b, p| {
            b.iter(|| decode_sections(black_box(p)).unwrap().len());
        });
    }
    group.finish();
}

fn criterion() -> Criterion {
    Criterion::default()
        .warm_up_time(Duration::from_secs(2))
        .measurement_time(Duration::from_secs(5))
}

criterion_group! { name = benches; config = criterion(); targets = bench_decode, bench_resync }
criterion_main!(benches);
