use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn bench_encode(c: &mut Criterion) {
    c.bench_function("encode_single", |b| {
        b.iter(|| {
            black_box(
                nli::encode(
                    black_box(35.3606),
                    black_box(138.7274),
                    black_box(3776),
                    black_box("sea_level"),
                )
                .unwrap(),
            );
        });
    });
}

fn bench_decode(c: &mut Criterion) {
    let code = nli::encode(35.3606, 138.7274, 3776, "sea_level").unwrap();

    c.bench_function("decode_single", |b| {
        b.iter(|| {
            black_box(nli::decode(black_box(&code)).unwrap());
        });
    });
}

fn bench_encode_batch(c: &mut Criterion) {
    // 1000 points along the diagonal of a 1° × 1° box starting at 35°N, 138°E
    let coords: Vec<(f64, f64)> = (0..1000)
        .map(|i| {
            let frac = i as f64 / 1000.0;
            (35.0 + frac * 0.99, 138.0 + frac * 0.99)
        })
        .collect();

    c.bench_function("encode_batch_1000", |b| {
        b.iter(|| {
            for &(lat, lon) in black_box(&coords) {
                black_box(nli::encode(lat, lon, 0, "ground_level").unwrap());
            }
        });
    });
}

fn bench_pack_unpack(c: &mut Criterion) {
    let cell = nli::quantize(-33.8688, 151.2093, 58, nli::ElevationType::SeaLevel).unwrap();
    let code = nli::pack(&cell);

    c.bench_function("pack", |b| {
        b.iter(|| black_box(nli::pack(black_box(&cell))));
    });
    c.bench_function("unpack", |b| {
        b.iter(|| black_box(nli::unpack(black_box(&code)).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_encode,
    bench_decode,
    bench_encode_batch,
    bench_pack_unpack,
);
criterion_main!(benches);
