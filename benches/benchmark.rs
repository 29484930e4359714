// Scoring and gate throughput benchmarks
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rowgate::{DatasetGate, GateConfig, Row, SimilarityScorer, ThresholdPolicy};

const WORDS: &[&str] = &[
    "budget", "analyst", "report", "animals", "forecast", "server", "deploy", "river",
    "canyon", "bread", "fence", "penguin", "quarter", "target", "midnight", "green",
];

fn sentence(seed: usize, len: usize) -> String {
    (0..len)
        .map(|i| WORDS[(seed * 7 + i * 3 + seed / 5) % WORDS.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn benchmark_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");
    let scorer = SimilarityScorer::default();

    for words in [8, 32, 128].iter() {
        let a = sentence(1, *words);
        let b = sentence(2, *words);
        group.bench_with_input(BenchmarkId::new("pair", words), words, |bench, _| {
            bench.iter(|| scorer.score(black_box(&a), black_box(&b)));
        });
    }

    group.finish();
}

fn benchmark_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan");
    let scorer = SimilarityScorer::default();
    let policy = ThresholdPolicy::default();

    for size in [100, 1000].iter() {
        let existing: Vec<_> = (0..*size).map(|i| scorer.prepare(&sentence(i, 12))).collect();
        let candidate = scorer.prepare("a completely unrelated sentence about nothing at all");

        group.bench_with_input(BenchmarkId::new("prepared", size), size, |bench, _| {
            bench.iter(|| {
                existing
                    .iter()
                    .any(|e| policy.is_match(&scorer.score_prepared(e, black_box(&candidate))))
            });
        });
    }

    group.finish();
}

fn benchmark_submit(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bench.csv");
    let gate = DatasetGate::new(GateConfig {
        stamp_filename_on_create: false,
        ..Default::default()
    })
    .unwrap();

    for i in 0..200 {
        let row = Row::from_pairs([format!("text=row {} {}", i, sentence(i, 10))]).unwrap();
        gate.submit(&path, "text", &row).unwrap();
    }

    // a rejected submission leaves the file untouched, so this measures read + scan
    let duplicate = Row::from_pairs([format!("text=row 0 {}", sentence(0, 10))]).unwrap();
    c.bench_function("submit_rejected", |b| {
        b.iter(|| gate.submit(&path, "text", black_box(&duplicate)).unwrap())
    });
}

criterion_group!(benches, benchmark_score, benchmark_scan, benchmark_submit);
criterion_main!(benches);
