//! Ratio, aggregation and forecast benchmarks
//!
//! Synthetic bank statements with a fixed seed, so runs are comparable.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use dubai_bank_analysis::record::{FinancialRecord, RecordBuilder};
use dubai_bank_analysis::{
    aggregate, compute_ratios, forecast_net_income, ForecastConfig, InputColumn,
};

const BANKS: [&str; 8] = [
    "Emirates NBD",
    "Dubai Islamic Bank",
    "Mashreq",
    "Commercial Bank of Dubai",
    "Emirates Islamic",
    "Noor Bank",
    "Dubai First",
    "Ajman Bank",
];

/// Create `n_rows` statements cycling through the banks, one year per cycle
fn create_records(n_rows: usize) -> Vec<FinancialRecord> {
    // Simple LCG random generator for reproducibility
    let mut rng_state: u64 = 42;
    let mut rand_f64 = || -> f64 {
        rng_state = rng_state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (rng_state >> 33) as f64 / (u32::MAX as f64)
    };

    (0..n_rows)
        .map(|i| {
            let bank = BANKS[i % BANKS.len()];
            let year = 2000 + (i / BANKS.len()) as i64;
            let revenue = 5000.0 + rand_f64() * 6000.0;
            let deposits = 20000.0 + rand_f64() * 15000.0;
            RecordBuilder::new(bank, year)
                .set(InputColumn::Revenue, revenue)
                .set(InputColumn::NetIncome, revenue * (0.15 + rand_f64() * 0.1))
                .set(InputColumn::Assets, 30000.0 + rand_f64() * 25000.0)
                .set(InputColumn::Equity, 5000.0 + rand_f64() * 2500.0)
                .set(InputColumn::Deposits, deposits)
                .set(InputColumn::Loans, deposits * (0.6 + rand_f64() * 0.2))
                .set(InputColumn::SharePrice, 8.0 + rand_f64() * 5.0)
                .set(InputColumn::Dividends, 0.8 + rand_f64() * 0.5)
                .build()
        })
        .collect()
}

fn bench_ratios(c: &mut Criterion) {
    let mut group = c.benchmark_group("Ratios");

    for n_rows in [6, 1000, 10000].iter() {
        let records = create_records(*n_rows);
        group.bench_with_input(BenchmarkId::new("compute", n_rows), &records, |b, records| {
            b.iter(|| compute_ratios(std::hint::black_box(records)));
        });

        let ratios = compute_ratios(&records).records;
        group.bench_with_input(BenchmarkId::new("aggregate", n_rows), &ratios, |b, ratios| {
            b.iter(|| aggregate(std::hint::black_box(ratios)));
        });
    }

    group.finish();
}

fn bench_forecast(c: &mut Criterion) {
    let mut group = c.benchmark_group("Forecast");
    let config = ForecastConfig::default();

    for n_rows in [6, 120, 1200].iter() {
        let records = create_records(*n_rows);
        group.bench_with_input(BenchmarkId::new("arima_111", n_rows), &records, |b, records| {
            b.iter(|| forecast_net_income(std::hint::black_box(records), &config).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_ratios, bench_forecast);

criterion_main!(benches);
