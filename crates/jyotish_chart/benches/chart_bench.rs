use criterion::{Criterion, black_box, criterion_group, criterion_main};
use jyotish_base::{ALL_GRAHAS, CelestialBody, GeoLocation, Instant};
use jyotish_chart::{ChartConfig, ChartRequest, StaticProvider, compute_chart};

fn provider() -> StaticProvider {
    StaticProvider::from_bodies(
        24.0,
        124.0,
        ALL_GRAHAS.iter().map(|g| CelestialBody {
            graha: *g,
            tropical_longitude: 17.0 + g.index() as f64 * 37.0,
            daily_speed: if g.is_node() { -0.053 } else { 0.5 },
            latitude: 0.0,
        }),
    )
}

fn chart_bench(c: &mut Criterion) {
    let p = provider();
    let request = ChartRequest::new(
        Instant::from_unix_millis(645_431_400_000),
        GeoLocation::new(28.61, 77.21, 216.0).unwrap(),
    );
    let full = ChartConfig::default();
    let classify_only = ChartConfig {
        include_dasha: false,
        include_yogini_dasha: false,
        include_ashtakavarga: false,
        include_shadbala: false,
        include_phala: false,
        include_vimsopaka: false,
        ..ChartConfig::default()
    };

    let mut group = c.benchmark_group("chart");
    group.bench_function("full", |b| {
        b.iter(|| compute_chart(&p, black_box(&request), &full))
    });
    group.bench_function("classification_only", |b| {
        b.iter(|| compute_chart(&p, black_box(&request), &classify_only))
    });
    group.finish();
}

criterion_group!(benches, chart_bench);
criterion_main!(benches);
