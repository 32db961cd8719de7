// Performance benchmarks for fingerprinting, pairwise scoring and ranking
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use molsim_chem::{Molecule, MorganEncoder};
use molsim_core::{Fingerprint, Metric, Record, StructureEncoder};
use molsim_similarity::{PairwiseScorer, Ranker};
use rand::prelude::*;

const BITS: usize = 2048;

const DRUGS: &[&str] = &[
    "CC(=O)Oc1ccccc1C(=O)O",
    "CC(C)Cc1ccc(cc1)C(C)C(=O)O",
    "Cn1cnc2c1c(=O)n(C)c(=O)n2C",
    "CC(=O)Nc1ccc(O)cc1",
    "CN1CCC[C@H]1c1cccnc1",
    "COc1ccc2[nH]cc(CCNC(C)=O)c2c1",
    "CC(C)NCC(O)COc1cccc2ccccc12",
    "O=C(O)Cc1ccccc1Nc1c(Cl)cccc1Cl",
];

fn random_fingerprint(rng: &mut StdRng, density: usize) -> Fingerprint {
    Fingerprint::from_bits(BITS, (0..density).map(|_| rng.random_range(0..BITS)))
}

fn random_records(n: usize) -> Vec<Record> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|i| {
            Record::new(format!("MOL{}", i), "C").with_fingerprint(random_fingerprint(&mut rng, 50))
        })
        .collect()
}

fn benchmark_similarity(c: &mut Criterion) {
    let mut group = c.benchmark_group("similarity");
    let mut rng = StdRng::seed_from_u64(7);
    let a = random_fingerprint(&mut rng, 50);
    let b = random_fingerprint(&mut rng, 50);

    for metric in Metric::ALL {
        group.bench_function(metric.name(), |bench| {
            bench.iter(|| metric.similarity(black_box(&a), black_box(&b)))
        });
    }
    group.finish();
}

fn benchmark_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");
    let encoder = MorganEncoder::default();

    group.bench_function("parse", |b| {
        b.iter(|| {
            for smiles in DRUGS {
                black_box(Molecule::parse(black_box(smiles)).unwrap());
            }
        })
    });
    group.bench_function("morgan_r2_2048", |b| {
        b.iter(|| {
            for smiles in DRUGS {
                black_box(encoder.encode(black_box(smiles)).unwrap());
            }
        })
    });
    group.finish();
}

fn benchmark_pairwise(c: &mut Criterion) {
    let mut group = c.benchmark_group("pairwise");
    group.sample_size(20);

    for size in [100, 500, 1000].iter() {
        let records = random_records(*size);
        group.bench_with_input(BenchmarkId::new("sequential", size), &records, |b, records| {
            let scorer = PairwiseScorer::new(Metric::Tanimoto);
            b.iter(|| black_box(scorer.score_all(records)))
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &records, |b, records| {
            let scorer = PairwiseScorer::new(Metric::Tanimoto).with_parallel(true);
            b.iter(|| black_box(scorer.score_all(records)))
        });
    }
    group.finish();
}

fn benchmark_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    let records = random_records(1000);
    let scores = PairwiseScorer::new(Metric::Tanimoto).score_all(&records);

    for n in [10, 100, 1000].iter() {
        let ranker = Ranker::new(*n).unwrap();
        group.bench_with_input(BenchmarkId::new("top_n", n), &scores, |b, scores| {
            b.iter(|| black_box(ranker.rank(scores, &records)))
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_similarity, benchmark_encode, benchmark_pairwise, benchmark_rank);
criterion_main!(benches);
