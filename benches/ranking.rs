// Ranking throughput over synthetic catalogs
use chainmatch::{
    normalize_catalog, Advisor, CandidateRanker, EmbeddingSimilarity, EngineConfig, RawCase,
    RawSubmission,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

const SCENARIOS: &[&str] = &[
    "multi-party supply chain finance",
    "public retail loyalty rewards",
    "land registry with audit trail",
    "municipal energy trading",
    "smart parking payments",
    "e-voting for city council",
    "medical records sharing across hospitals",
    "waste collection tracking",
];
const STACKS: &[&str] = &["java", "go", "rust", "kafka", "ipfs", "solidity", "react", "postgres"];
const CITIES: &[&str] = &["small", "medium", "large"];
const LEVELS: &[&str] = &["low", "medium", "high"];

fn generate_case(rng: &mut StdRng, id: usize) -> RawCase {
    let min = rng.random_range(0..500_000u32);
    let stack: Vec<&str> = (0..3).map(|_| STACKS[rng.random_range(0..STACKS.len())]).collect();
    RawCase {
        name: format!("case-{id}"),
        application_scenarios: SCENARIOS[rng.random_range(0..SCENARIOS.len())].to_string(),
        technical_requirements: Some(json!({
            "tps": rng.random_range(10..20_000u32),
            "latency": rng.random_range(0.1..10.0f64),
            "security_level": LEVELS[rng.random_range(0..LEVELS.len())],
        })),
        technology_stack: Some(json!(stack.join(", "))),
        city_size: Some(CITIES[rng.random_range(0..CITIES.len())].to_string()),
        budget_range: Some(json!([min, min + rng.random_range(1..1_000_000u32)])),
    }
}

fn submission() -> RawSubmission {
    RawSubmission {
        application_scenarios: "multi-party supply chain finance".to_string(),
        technical_requirements: Some(json!({"tps": 1500, "latency": 2, "security_level": "medium"})),
        technology_stack: Some(json!("java, kafka")),
        city_size: Some("small".to_string()),
        budget_range: Some(json!([50000, 200000])),
        weights: None,
    }
}

fn benchmark_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");
    let config = EngineConfig::default();
    let query = Advisor::hashed(config.clone())
        .and_then(|advisor| advisor.normalize(&submission()))
        .expect("benchmark submission is valid");

    for size in [100, 1_000, 10_000].iter() {
        let mut rng = StdRng::seed_from_u64(42);
        let raw: Vec<RawCase> = (0..*size).map(|i| generate_case(&mut rng, i)).collect();
        let catalog = normalize_catalog(&raw);
        let ranker = CandidateRanker::new(EmbeddingSimilarity::hashed(), &config);

        group.bench_with_input(BenchmarkId::new("two_stage", size), size, |b, _| {
            b.iter(|| black_box(ranker.rank(&query, &catalog).matches.len()));
        });
    }

    group.finish();
}

fn benchmark_normalize(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let raw: Vec<RawCase> = (0..1_000).map(|i| generate_case(&mut rng, i)).collect();

    c.bench_function("normalize_catalog_1000", |b| {
        b.iter(|| black_box(normalize_catalog(&raw).len()));
    });
}

criterion_group!(benches, benchmark_rank, benchmark_normalize);
criterion_main!(benches);
