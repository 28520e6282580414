//! Criterion benchmarks for the symptom checker.
//!
//! Covers symptom resolution, end-to-end diagnosis against a synthetic
//! model and classifier training.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use symptom_checker::config::{DiagnosisConfig, TrainingConfig};
use symptom_checker::diagnosis::{DiagnosisEngine, SymptomResolver};
use symptom_checker::model::SymptomVocabulary;
use symptom_checker::training::{Dataset, Trainer};

const SYMPTOMS: usize = 300;
const DISEASES: usize = 40;
const ROWS_PER_DISEASE: usize = 20;

/// Generate a CSV dataset where each disease has a fixed symptom profile
/// with a little per-row variation.
fn generate_dataset() -> Dataset {
    let mut csv = String::from("diseases");
    for s in 0..SYMPTOMS {
        csv.push_str(&format!(",symptom {s}"));
    }
    csv.push('\n');

    for d in 0..DISEASES {
        for r in 0..ROWS_PER_DISEASE {
            csv.push_str(&format!("disease {d}"));
            for s in 0..SYMPTOMS {
                let core = (s + d) % 15 == 0;
                let noise = (s * 31 + r * 7 + d) % 97 == 0;
                csv.push_str(if core || noise { ",1" } else { ",0" });
            }
            csv.push('\n');
        }
    }

    Dataset::from_reader(csv.as_bytes(), "diseases").expect("synthetic dataset is valid")
}

fn generate_queries() -> Vec<Vec<String>> {
    (0..100)
        .map(|i| {
            vec![
                format!("Symptom {}", i % SYMPTOMS),
                format!("SYMPTOM {}", (i * 7) % SYMPTOMS),
                "unknown complaint".to_string(),
            ]
        })
        .collect()
}

fn bench_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolution");
    let vocabulary = SymptomVocabulary::new(generate_dataset().feature_names)
        .expect("synthetic vocabulary is unique");
    let resolver = SymptomResolver::new(&vocabulary);
    let queries = generate_queries();

    group.bench_function("resolve_exact", |b| {
        b.iter(|| black_box(resolver.resolve(black_box(&["symptom 10", "symptom 200"]))))
    });

    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("resolve_batch_mixed_tiers", |b| {
        b.iter(|| {
            for query in &queries {
                black_box(resolver.resolve(black_box(query)));
            }
        })
    });

    group.finish();
}

fn bench_diagnosis(c: &mut Criterion) {
    let mut group = c.benchmark_group("diagnosis");
    let (artifact, _) = Trainer::default()
        .train(generate_dataset())
        .expect("training succeeds");
    let engine = DiagnosisEngine::new(artifact, DiagnosisConfig::default())
        .expect("artifact is consistent");
    let queries = generate_queries();

    group.bench_function("diagnose_single", |b| {
        b.iter(|| black_box(engine.diagnose(black_box(&["symptom 0", "symptom 15"]))))
    });

    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("diagnose_batch", |b| {
        b.iter(|| {
            for query in &queries {
                black_box(engine.diagnose(black_box(query)));
            }
        })
    });

    group.finish();
}

fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("training");
    group.sample_size(10);

    let dataset = generate_dataset();
    group.throughput(Throughput::Elements(dataset.len() as u64));
    group.bench_function("train_gaussian", |b| {
        let trainer = Trainer::new(TrainingConfig::default()).expect("default config is valid");
        b.iter(|| black_box(trainer.train(dataset.clone())))
    });

    group.finish();
}

criterion_group!(benches, bench_resolution, bench_diagnosis);

// Separate group for slower benchmarks
criterion_group!(slow_benches, bench_training);

criterion_main!(benches, slow_benches);
