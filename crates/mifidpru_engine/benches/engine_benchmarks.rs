//! Criterion benchmarks for the calculation pass and stress suite.
//!
//! Benchmarks cover:
//! - A single calculation pass on a fully populated profile
//! - Derived-field recompute with a growing exposure list
//! - The default stress suite

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mifidpru_core::profile::{
    CounterpartyType, Exposure, FirmActivity, FirmProfile, Harm, HarmCategory,
};
use mifidpru_engine::stress::{default_scenarios, run_stress_suite};
use mifidpru_engine::{recompute_derived, run_calculation};

fn populated_profile(n_harms: usize, n_exposures: usize) -> FirmProfile {
    let mut p = FirmProfile::default();
    p.firm_activity = FirmActivity::HoldingClientMoney;
    p.classification.aum = 500_000_000.0;
    p.classification.asa = 300_000_000.0;
    p.k_factors.cmh_segregated = 80_000_000.0;
    p.k_factors.npr_value = 5_000_000.0;
    p.overheads.total_expenditure = 8_000_000.0;
    p.identified_harms = (0..n_harms)
        .map(|i| {
            Harm::new(format!("Harm {i}"), HarmCategory::Firm, (i % 5 + 1) as u8, 3)
                .with_additional_own_funds(10_000.0 * i as f64)
        })
        .collect();
    p.exposures = (0..n_exposures)
        .map(|i| {
            Exposure::new(
                format!("Counterparty {i}"),
                CounterpartyType::all()[i % 6],
                50_000.0 * (i % 40) as f64,
            )
        })
        .collect();
    p
}

fn bench_calculation(c: &mut Criterion) {
    let profile = populated_profile(20, 0);
    c.bench_function("run_calculation", |b| {
        b.iter(|| run_calculation(black_box(&profile)))
    });
}

fn bench_recompute_derived(c: &mut Criterion) {
    let mut group = c.benchmark_group("recompute_derived");
    for n in [10usize, 100, 1_000] {
        let profile = populated_profile(20, n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &profile, |b, p| {
            b.iter(|| recompute_derived(black_box(p)))
        });
    }
    group.finish();
}

fn bench_stress_suite(c: &mut Criterion) {
    let profile = populated_profile(20, 0);
    let scenarios: Vec<_> = (0..32).flat_map(|_| default_scenarios()).collect();
    c.bench_function("stress_suite_96", |b| {
        b.iter(|| run_stress_suite(black_box(&scenarios), black_box(&profile)))
    });
}

criterion_group!(benches, bench_calculation, bench_recompute_derived, bench_stress_suite);
criterion_main!(benches);
