use bif_decoder::BifDecoder;
use bif_encoder::BifEncoder;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

fn bench_encode_small(c: &mut Criterion) {
    c.bench_function("encode_small", |b| {
        b.iter(|| {
            BifEncoder::new()
                .add_blob("name", b"Johnny")
                .add_int("age", 32)
                .omit_final_newline()
                .encode()
                .unwrap()
        });
    });
}

fn bench_encode_many_fields(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_many_fields");

    for count in [10u32, 100, 1000] {
        group.throughput(Throughput::Elements(u64::from(count)));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &n| {
            b.iter(|| {
                let mut encoder = BifEncoder::new();
                for i in 0..n {
                    encoder.add_int(&format!("f{i}"), i64::from(i));
                }
                encoder.encode().unwrap()
            });
        });
    }

    group.finish();
}

fn bench_reencode_record(c: &mut Criterion) {
    let content = b"lorem ipsum dolor sit amet\n".repeat(40);
    let payload = BifEncoder::new()
        .add_blob("a", &content)
        .add_blob("b", &content)
        .add_int("n", -1)
        .encode()
        .unwrap();
    let record = BifDecoder::decode(&payload).unwrap();

    c.bench_function("reencode_record", |b| {
        b.iter(|| BifEncoder::from_record(&record).encode().unwrap());
    });
}

criterion_group!(benches, bench_encode_small, bench_encode_many_fields, bench_reencode_record);
criterion_main!(benches);
