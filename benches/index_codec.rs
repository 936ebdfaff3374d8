use std::hint::black_box;

use bookmark_index::index_storage::{decode_index, encode_index};
use bookmark_index::models::{BookmarkEntry, SearchMode};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

fn generate_entries(num_entries: usize) -> Vec<BookmarkEntry> {
    (0..num_entries)
        .map(|i| {
            BookmarkEntry::new(
                format!("Bookmark {} with a reasonably long title", i),
                format!("https://example.com/section/{}/article?id={}", i % 100, i),
            )
        })
        .collect()
}

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_index");

    for size in [1_000, 10_000, 100_000].iter() {
        let entries = generate_entries(*size);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut bytes = Vec::new();
                encode_index(black_box(&entries), SearchMode::WordMatch, &mut bytes).unwrap();
                bytes
            });
        });
    }

    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_index");

    for size in [1_000, 10_000, 100_000].iter() {
        let mut bytes = Vec::new();
        encode_index(&generate_entries(*size), SearchMode::Fuzzy, &mut bytes).unwrap();

        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| decode_index(&mut black_box(bytes.as_slice())).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode);
criterion_main!(benches);
