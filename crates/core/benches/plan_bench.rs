use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

use sleighpack_core::{DistanceIndex, GeoPoint, Item, PlanConfig, plan_rounds};

const SIZES: [usize; 3] = [1_000, 10_000, 50_000];

/// Deterministic xorshift item generator.
struct ItemGen {
    state: u64,
}

impl ItemGen {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn unit(&mut self) -> f64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x as f64 / u64::MAX as f64
    }

    fn items(&mut self, count: usize) -> Vec<Item> {
        (0..count)
            .map(|i| {
                let lat = -60.0 + 150.0 * self.unit();
                let lon = -180.0 + 360.0 * self.unit();
                let weight = 1.0 + 49.0 * self.unit();
                Item::new(i as i64 + 1, lat, lon, weight)
            })
            .collect()
    }
}

fn bench_index_build(c: &mut Criterion) {
    let reference = GeoPoint::new(60.7603243, 46.3053893);
    let mut group = c.benchmark_group("index_build");
    for &n in &SIZES {
        let items = ItemGen::new(0x5eed + n as u64).items(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &items, |b, items| {
            b.iter(|| DistanceIndex::build(black_box(items), reference).unwrap());
        });
    }
    group.finish();
}

fn bench_plan_rounds(c: &mut Criterion) {
    let config = PlanConfig::default();
    let mut group = c.benchmark_group("plan_rounds");
    group.sample_size(10);
    for &n in &SIZES[..2] {
        let items = ItemGen::new(0xfeed + n as u64).items(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &items, |b, items| {
            b.iter(|| plan_rounds(black_box(items), &config).unwrap());
        });
    }
    group.finish();
}

criterion_group!(
    name = plan_benches;
    config = Criterion::default().configure_from_args();
    targets = bench_index_build, bench_plan_rounds
);
criterion_main!(plan_benches);
