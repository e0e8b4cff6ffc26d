use criterion::{black_box, criterion_group, criterion_main, Criterion};
use lingo_core::{
    batch_score, comparison_tree, score, score_matrix, ScoringConfig, ScoringEngine, Taxonomy,
};

fn fixture() -> Taxonomy {
    Taxonomy::from_path(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/language-tree.json"
    ))
    .expect("fixture taxonomy")
}

fn bench_single(c: &mut Criterion) {
    let taxonomy = fixture();
    let config = ScoringConfig::default();

    c.bench_function("score_lookup", |b| {
        b.iter(|| score(&taxonomy, black_box("English"), black_box("Hindi"), &config))
    });

    c.bench_function("comparison_tree", |b| {
        b.iter(|| comparison_tree(&taxonomy, black_box("English"), black_box("Swedish")))
    });

    let engine = ScoringEngine::new(taxonomy.clone(), config).expect("valid config");
    c.bench_function("engine_evaluate", |b| {
        b.iter(|| engine.evaluate(black_box("Finnish"), black_box("Hungarian")))
    });
}

fn bench_batch(c: &mut Criterion) {
    let taxonomy = fixture();
    let config = ScoringConfig::default();
    let names = taxonomy.language_names();
    let pairs: Vec<(String, String)> = names
        .iter()
        .flat_map(|a| names.iter().map(move |b| (a.clone(), b.clone())))
        .collect();

    c.bench_function("batch_score_all_pairs", |b| {
        b.iter(|| batch_score(&taxonomy, black_box(&pairs), &config))
    });

    c.bench_function("score_matrix", |b| {
        b.iter(|| score_matrix(&taxonomy, black_box(&names), &config))
    });
}

criterion_group!(benches, bench_single, bench_batch);
criterion_main!(benches);
