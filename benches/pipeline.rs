//! Benchmarks for the anchor-based topic recovery pipeline.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use temario::prelude::*;

/// Deterministic corpus with block-structured cooccurrence: document `d`
/// draws all its tokens from block `d % blocks`, so `blocks` anchors always
/// exist.
fn synthetic_corpus(n_docs: usize, vocab: usize, blocks: usize) -> Corpus {
    let block_size = vocab / blocks;
    let doc_len = 8;
    let vocabulary = Vocabulary::from_tokens((0..vocab).map(|i| format!("w{i}")));
    let documents = (0..n_docs)
        .map(|d| {
            let start = (d % blocks) * block_size;
            (0..doc_len)
                .map(|p| start + (d / blocks + p) % block_size)
                .collect()
        })
        .collect();
    Corpus::new(vocabulary, documents).expect("tokens stay below the vocabulary size")
}

fn bench_build_cooccurrence(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_cooccurrence");

    for n_docs in [64, 256, 1024].iter() {
        let corpus = synthetic_corpus(*n_docs, 64, 4);

        group.bench_with_input(BenchmarkId::from_parameter(n_docs), n_docs, |b, _| {
            b.iter(|| build_cooccurrence(black_box(&corpus)));
        });
    }

    group.finish();
}

fn bench_anchor_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("anchor_selection");

    for vocab in [32, 64, 128].iter() {
        let corpus = synthetic_corpus(256, *vocab, 4);
        let q = build_cooccurrence(&corpus);

        group.bench_with_input(BenchmarkId::from_parameter(vocab), vocab, |b, _| {
            b.iter(|| {
                AnchorSelector::new(4)
                    .select(black_box(&q), black_box(&corpus))
                    .expect("block corpus supports 4 anchors")
            });
        });
    }

    group.finish();
}

fn bench_anchor_selection_projected(c: &mut Criterion) {
    let mut group = c.benchmark_group("anchor_selection_projected");

    for vocab in [32, 64, 128].iter() {
        let corpus = synthetic_corpus(256, *vocab, 4);
        let q = build_cooccurrence(&corpus);

        group.bench_with_input(BenchmarkId::from_parameter(vocab), vocab, |b, _| {
            b.iter(|| {
                AnchorSelector::new(4)
                    .with_projection_dim(16)
                    .with_random_seed(42)
                    .select(black_box(&q), black_box(&corpus))
                    .expect("block corpus supports 4 anchors")
            });
        });
    }

    group.finish();
}

fn bench_topic_recovery(c: &mut Criterion) {
    let mut group = c.benchmark_group("topic_recovery");

    for vocab in [32, 64].iter() {
        let corpus = synthetic_corpus(256, *vocab, 4);
        let q = build_cooccurrence(&corpus);
        let anchors = AnchorSelector::new(4)
            .select(&q, &corpus)
            .expect("block corpus supports 4 anchors");

        group.bench_with_input(BenchmarkId::from_parameter(vocab), vocab, |b, _| {
            b.iter(|| {
                TopicRecoverer::new()
                    .recover(black_box(&q), black_box(&anchors))
                    .expect("recovery succeeds")
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_build_cooccurrence,
    bench_anchor_selection,
    bench_anchor_selection_projected,
    bench_topic_recovery
);
criterion_main!(benches);
