// Criterion benchmarks for Astro Match

use astro_match::core::compat::{compatibility_score, ScoreWeights};
use astro_match::core::selection::{RankedCandidate, TopSelection};
use astro_match::core::signs::{julian_day, sign_from_longitude, sun_sign, ZODIAC};
use astro_match::models::SignTriad;
use chrono::{NaiveDate, NaiveTime};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn triad_for(i: usize) -> SignTriad {
    SignTriad {
        sun: ZODIAC[i % 12],
        moon: ZODIAC[(i / 12) % 12],
        rising: ZODIAC[(i / 144) % 12],
    }
}

fn bench_sun_sign(c: &mut Criterion) {
    let date = NaiveDate::from_ymd_opt(1990, 4, 1).unwrap();
    c.bench_function("sun_sign", |b| {
        b.iter(|| sun_sign(black_box(date)));
    });
}

fn bench_julian_day(c: &mut Criterion) {
    let date = NaiveDate::from_ymd_opt(1990, 4, 1).unwrap();
    let time = NaiveTime::from_hms_opt(8, 30, 0).unwrap();
    c.bench_function("julian_day", |b| {
        b.iter(|| julian_day(black_box(date), black_box(time)));
    });
}

fn bench_sign_from_longitude(c: &mut Criterion) {
    c.bench_function("sign_from_longitude", |b| {
        b.iter(|| sign_from_longitude(black_box(123.45)));
    });
}

fn bench_compatibility_score(c: &mut Criterion) {
    let a = triad_for(3);
    let other = triad_for(77);
    let weights = ScoreWeights::default();
    c.bench_function("compatibility_score", |b| {
        b.iter(|| compatibility_score(black_box(&a), black_box(&other), black_box(&weights)));
    });
}

fn bench_top_selection(c: &mut Criterion) {
    let target = triad_for(0);
    let weights = ScoreWeights::default();

    let mut group = c.benchmark_group("top_selection");
    for population in [1_000usize, 10_000] {
        let candidates: Vec<RankedCandidate> = (0..population)
            .map(|i| RankedCandidate {
                user_key: format!("user{:05}@example.com", i),
                score: compatibility_score(&target, &triad_for(i), &weights),
            })
            .collect();

        group.bench_with_input(
            BenchmarkId::new("offer_all_k10", population),
            &candidates,
            |b, candidates| {
                b.iter(|| {
                    let mut selection = TopSelection::new(10);
                    for candidate in candidates {
                        selection.offer(candidate.clone());
                    }
                    black_box(selection.into_ranked())
                });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_sun_sign,
    bench_julian_day,
    bench_sign_from_longitude,
    bench_compatibility_score,
    bench_top_selection
);
criterion_main!(benches);
