// Criterion benchmarks for Capmatch

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use capmatch::core::{calculate_match_score, rank_matches};
use capmatch::models::{DevelopmentStage, Investor, Role, Startup};
use capmatch::services::{MatchCache, MatchRepository, MemoryStore};
use capmatch::MatchOrchestrator;
use std::sync::Arc;

const INDUSTRIES: [&str; 4] = ["Fintech", "Healthtech", "Agritech", "Edtech"];
const CITIES: [&str; 3] = ["Makati", "Cebu", "Davao"];

fn create_startup(id: usize) -> Startup {
    Startup {
        id: format!("s{}", id),
        industry: Some(INDUSTRIES[id % INDUSTRIES.len()].to_string()),
        development_stage: Some(DevelopmentStage::ALL[id % DevelopmentStage::ALL.len()]),
        city: Some(CITIES[id % CITIES.len()].to_string()),
        keywords: vec!["AI".to_string(), "Lending".to_string(), "Marketplace".to_string()],
    }
}

fn create_investor(id: usize) -> Investor {
    Investor {
        id: format!("i{}", id),
        preferred_industries: vec![INDUSTRIES[id % INDUSTRIES.len()].to_string()],
        excluded_industries: vec![INDUSTRIES[(id + 1) % INDUSTRIES.len()].to_string()],
        preferred_funding_stages: vec!["Seed".to_string(), "Series A".to_string()],
        geographic_focus: vec![format!("Greater {}", CITIES[id % CITIES.len()])],
        value_proposition: vec!["Lending".to_string(), "Mentorship".to_string()],
        involvement_level: if id % 2 == 0 { Some("Advisor".to_string()) } else { None },
        typical_check_size: Some(100_000),
    }
}

fn bench_score_pair(c: &mut Criterion) {
    let startup = create_startup(0);
    let investor = create_investor(0);

    c.bench_function("calculate_match_score", |b| {
        b.iter(|| calculate_match_score(black_box(&investor), black_box(&startup)));
    });
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_matches");

    for candidate_count in [10, 100, 1000].iter() {
        let startup = create_startup(1);
        let results: Vec<_> = (0..*candidate_count)
            .map(|i| calculate_match_score(&create_investor(i), &startup))
            .collect();

        group.bench_with_input(
            BenchmarkId::new("rank", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| rank_matches(black_box(results.clone())));
            },
        );
    }

    group.finish();
}

fn bench_trigger_matching(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("Failed to build runtime");
    let mut group = c.benchmark_group("trigger_matching");

    for candidate_count in [100, 1000].iter() {
        let store = Arc::new(MemoryStore::with_profiles(
            vec![create_startup(0)],
            (0..*candidate_count).map(create_investor).collect(),
        ));
        let repository = MatchRepository::new(store.clone(), Arc::new(MatchCache::new(100, 60)));
        let orchestrator = MatchOrchestrator::new(store, repository);

        group.bench_with_input(
            BenchmarkId::new("startup_anchor", candidate_count),
            candidate_count,
            |b, _| {
                b.iter(|| runtime.block_on(orchestrator.trigger_matching(black_box("s0"), Role::Startup)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_score_pair, bench_rank, bench_trigger_matching);

criterion_main!(benches);
