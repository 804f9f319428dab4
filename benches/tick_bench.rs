use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use orbis::core::config::SimulationConfig;
use orbis::simulation::Scene;
use orbis::world::WorldGenerator;

fn bench_config(size: u32) -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.world.width = size;
    config.world.height = size;
    config.world.sea_level = 0.0;
    config.placement.band_min = 0.0;
    config.placement.band_max = 1.0;
    config.placement.civ_count = (size as usize / 4).max(2);
    config
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_world");

    for size in [16u32, 32, 64, 128] {
        group.bench_with_input(BenchmarkId::new("grid", size), &size, |b, &size| {
            b.iter(|| {
                let mut generator = WorldGenerator::new(42, SimulationConfig::default());
                generator.generate_world(size, size)
            })
        });
    }

    group.finish();
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for size in [16u32, 32, 64] {
        group.bench_with_input(BenchmarkId::new("grid", size), &size, |b, &size| {
            b.iter_batched(
                || Scene::generate(bench_config(size)),
                |scene| {
                    if let Ok(mut scene) = scene {
                        scene.run(10);
                    }
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group!(tick_benches, bench_generate, bench_tick);
criterion_main!(tick_benches);
