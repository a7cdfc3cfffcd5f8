use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use tnetstring::prelude::*;

pub fn u64_to_bytes_le(x: u64) -> Bytes { Bytes::from(u64::to_le_bytes(x).to_vec()) }

const N_BIG_LIST: usize = 2000;

fn big_list() -> Tnet {
    let v: Vec<Tnet> = (0..N_BIG_LIST).map(|i| Tnet::from(i as i64)).collect();
    Tnet::from(v)
}

const N_LIST: usize = 10;
const N_DICT: usize = 10;

fn big_t() -> Tnet {
    let v0: Vec<Tnet> = (0..N_LIST).map(|i| Tnet::from(i as f64 / 3.0)).collect();
    let m: VecMap<Tnet, Tnet> = (0..N_DICT)
        .map(|i| (Tnet::from(u64_to_bytes_le(i as u64)), Tnet::from(v0.clone())))
        .collect();
    let v: Vec<Tnet> = std::iter::repeat(m).map(Tnet::from).take(N_LIST).collect();
    Tnet::from(v)
}

fn bench_construction(c: &mut Criterion) {
    c.bench_function(
        &format!(
            "Creating a Tnet value of encoded size {}",
            dumps(&big_t()).unwrap().len()
        ),
        |b| b.iter(|| black_box(big_t())),
    );
}

fn bench_enc(c: &mut Criterion) {
    let big_t = big_t();
    let enc_len = dumps(&big_t).unwrap().len();
    c.bench_function(
        &format!("Encoding a Tnet value, output size of {} bytes", enc_len),
        move |b| b.iter(|| dumps(black_box(&big_t)).unwrap()),
    );
}

fn bench_dec(c: &mut Criterion) {
    let enc = Bytes::from(dumps(&big_t()).unwrap());
    c.bench_function(
        &format!("Decoding a Tnet value, input size of {} bytes", enc.len()),
        move |b| b.iter(|| loads::<Tnet>(black_box(enc.clone())).unwrap()),
    );
}

fn bench_enc_flat(c: &mut Criterion) {
    let big_list = big_list();
    let enc_len = dumps(&big_list).unwrap().len();
    c.bench_function(
        &format!("Encoding a Tnet list, output size of {} bytes", enc_len),
        move |b| b.iter(|| dumps(black_box(&big_list)).unwrap()),
    );
}

fn bench_dec_flat(c: &mut Criterion) {
    let enc = Bytes::from(dumps(&big_list()).unwrap());
    c.bench_function(
        &format!("Decoding a Tnet list of length {}", enc.len()),
        move |b| b.iter(|| loads::<Tnet>(black_box(enc.clone())).unwrap()),
    );
}

#[cfg(feature = "json")]
fn bench_dec_json(c: &mut Criterion) {
    let enc = Bytes::from(dumps(&big_list()).unwrap());
    c.bench_function(
        &format!("Decoding into serde_json, input size of {} bytes", enc.len()),
        move |b| b.iter(|| loads::<serde_json::Value>(black_box(enc.clone())).unwrap()),
    );
}

#[cfg(not(feature = "json"))]
fn bench_dec_json(_: &mut Criterion) {}

criterion_group!(
    benches,
    bench_construction,
    bench_enc,
    bench_dec,
    bench_enc_flat,
    bench_dec_flat,
    bench_dec_json
);
criterion_main!(benches);
