use std::hint::black_box;

use bookmark_index::models::{BookmarkEntry, SearchMode};
use bookmark_index::search::{BookmarkSearcher, SearchPreparer};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

/// Generate synthetic bookmarks with varied content
fn generate_entries(num_entries: usize) -> Vec<BookmarkEntry> {
    let words = [
        "rust",
        "compiler",
        "release",
        "notes",
        "tutorial",
        "database",
        "frontend",
        "backend",
        "API",
        "authentication",
        "performance",
    ];

    (0..num_entries)
        .map(|i| {
            let word = words[i % words.len()];
            BookmarkEntry::new(
                format!("{} article {} with additional context for matching", word, i),
                format!("https://{}.example.com/posts/{}", word.to_lowercase(), i),
            )
        })
        .collect()
}

fn bench_search(c: &mut Criterion, mode: SearchMode, query: &str) {
    let mut group = c.benchmark_group(format!("{}_search", mode));

    for size in [1_000, 10_000, 50_000].iter() {
        let entries = generate_entries(*size);
        let mut searcher = BookmarkSearcher::new();
        searcher.prepare(&entries, mode);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| searcher.search(black_box(query)).len());
        });
    }

    group.finish();
}

fn bench_prepare(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepare");

    let entries = generate_entries(10_000);
    for mode in [SearchMode::WordMatch, SearchMode::Fuzzy] {
        group.bench_with_input(BenchmarkId::from_parameter(mode), &mode, |b, mode| {
            b.iter(|| {
                let mut searcher = BookmarkSearcher::new();
                searcher.prepare(black_box(&entries), *mode);
                searcher
            });
        });
    }

    group.finish();
}

fn bench_word_match(c: &mut Criterion) {
    bench_search(c, SearchMode::WordMatch, "rust rel");
}

fn bench_fuzzy(c: &mut Criterion) {
    bench_search(c, SearchMode::Fuzzy, "rust artcl");
}

criterion_group!(benches, bench_word_match, bench_fuzzy, bench_prepare);
criterion_main!(benches);
