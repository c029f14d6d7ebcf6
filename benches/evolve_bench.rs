//! Criterion benchmarks for the GA core.
//!
//! Uses synthetic problems (inverted Sphere, integer OneMax-style sum) to
//! measure pure algorithm overhead independent of any domain.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_evolve::ga::{
    Crossover, GaConfig, GaRunner, GeneMode, Population, Replacement, Selection,
};
use u_evolve::random::create_rng;

fn inverted_sphere(genes: &[f64]) -> f64 {
    100.0 * genes.len() as f64 - genes.iter().map(|x| x * x).sum::<f64>()
}

fn bit_sum(genes: &[f64]) -> f64 {
    genes.iter().sum()
}

// ===========================================================================
// Full runs
// ===========================================================================

fn bench_generational_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("generational_sphere");
    group.sample_size(10);

    for (dim, pop, gen) in [(10usize, 50usize, 50usize), (50, 100, 30), (100, 100, 20)] {
        let config = GaConfig::uniform_bounds(dim, -5.0, 5.0)
            .with_population_size(pop)
            .with_max_generations(gen)
            .with_selection(Selection::Ranked)
            .with_stagnation_limit(0)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("d{}_p{}_g{}", dim, pop, gen), dim),
            &config,
            |b, c| {
                b.iter(|| {
                    let result = GaRunner::run(inverted_sphere, black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_steady_state_bits(c: &mut Criterion) {
    let mut group = c.benchmark_group("steady_state_bits");
    group.sample_size(10);

    for &n in &[20usize, 50, 100] {
        let config = GaConfig::uniform_bounds(n, 0.0, 1.0)
            .with_gene_mode(GeneMode::Integer)
            .with_population_size(100)
            .with_sorted(true)
            .with_replacement(Replacement::SteadyStateNoDuplicates)
            .with_crossover(Crossover::Uniform)
            .with_offspring_count(20)
            .with_max_generations(50)
            .with_stagnation_limit(0)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &config, |b, c| {
            b.iter(|| {
                let result = GaRunner::run(bit_sum, black_box(c));
                black_box(result)
            })
        });
    }
    group.finish();
}

// ===========================================================================
// Single phases
// ===========================================================================

fn bench_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection");

    for selection in [Selection::Roulette, Selection::Ranked] {
        let mut pop = Population::new(200, 10);
        pop.set_bounds(GaConfig::uniform_bounds(10, 0.0, 1.0).bounds)
            .expect("bounds match chromosome length");
        pop.set_evaluator(bit_sum);
        pop.set_sorted(true);
        pop.init(&mut create_rng(1)).expect("valid population");

        group.bench_function(selection.name(), |b| {
            let mut rng = create_rng(42);
            b.iter(|| {
                pop.select(selection, 200, &mut rng).expect("positive fitness");
                black_box(pop.next_generation().len())
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_generational_sphere,
    bench_steady_state_bits,
    bench_selection
);
criterion_main!(benches);
