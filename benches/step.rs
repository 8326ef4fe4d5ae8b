use std::hint::black_box;

use contagion::prelude::*;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

const SEED: u64 = 42;

const POPULATION_SIZES: [usize; 3] = [250, 1_000, 2_000];

fn simulation(population: usize, rooms: usize) -> Simulation {
    let parameters = ParametersBuilder::default()
        .population(population)
        .rooms(rooms)
        .shelter_fraction(0.2)
        .seed(SEED)
        .build()
        .unwrap();
    Simulation::new(&parameters)
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");

    for population in POPULATION_SIZES {
        group.bench_with_input(
            BenchmarkId::new("open_arena", population),
            &population,
            |bencher, &population| {
                let mut simulation = simulation(population, 0);
                bencher.iter(|| black_box(simulation.step()));
            },
        );
        group.bench_with_input(
            BenchmarkId::new("five_rooms", population),
            &population,
            |bencher, &population| {
                let mut simulation = simulation(population, 5);
                bencher.iter(|| black_box(simulation.step()));
            },
        );
    }

    group.bench_function("placement_2000", |bencher| {
        bencher.iter(|| black_box(simulation(black_box(2_000), 5)));
    });

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
