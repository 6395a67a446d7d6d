use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fastrand::Rng;
use std::hint::black_box;
use std::time::Duration;
use two_sat_solver::sat::formula::Formula;
use two_sat_solver::sat::literal::{Literal, NegativeLiteral, PackedLiteral};
use two_sat_solver::sat::papadimitriou::Papadimitriou;
use two_sat_solver::sat::simplify::{
    MeaninglessVariableElimination, NoSimplification, PassLimit, Simplifier,
};
use two_sat_solver::sat::solver::{Config, Solver, SolverConfig};

/// A satisfiable instance with `n` variables and `n` clauses built around a
/// hidden assignment.
fn planted(n: usize, seed: u64) -> Vec<(i32, i32)> {
    let mut rng = Rng::with_seed(seed);
    let n_i32 = i32::try_from(n).unwrap();
    let hidden: Vec<bool> = (0..=n).map(|_| rng.bool()).collect();
    let signed = |rng: &mut Rng| {
        let v = rng.i32(1..=n_i32);
        if rng.bool() { v } else { -v }
    };
    let holds = |lit: i32| hidden[lit.unsigned_abs() as usize] == (lit > 0);

    (0..n)
        .map(|_| {
            let a = signed(&mut rng);
            let b = signed(&mut rng);
            if holds(a) || holds(b) { (a, b) } else { (-a, b) }
        })
        .collect()
}

fn solve_with<C: SolverConfig>(n: usize, pairs: &[(i32, i32)], simplifier: C::Simplifier) {
    let formula: Formula<C::Literal> = Formula::new(n, pairs.iter().copied()).unwrap();
    let mut solver = Papadimitriou::<C>::from_parts(formula, simplifier, Rng::with_seed(1));
    black_box(solver.solve());
}

fn bench_literals(c: &mut Criterion) {
    let mut group = c.benchmark_group("papadimitriou - literal");
    group.measurement_time(Duration::from_secs(10));

    for n in [50, 200] {
        let pairs = planted(n, 7);
        group.bench_with_input(BenchmarkId::new("PackedLiteral", n), &pairs, |b, pairs| {
            b.iter(|| {
                solve_with::<Config<PackedLiteral, NoSimplification>>(n, pairs, NoSimplification);
            });
        });
        group.bench_with_input(BenchmarkId::new("NegativeLiteral", n), &pairs, |b, pairs| {
            b.iter(|| {
                solve_with::<Config<NegativeLiteral, NoSimplification>>(n, pairs, NoSimplification);
            });
        });
    }

    group.finish();
}

fn simplify_only<L: Literal>(n: usize, pairs: &[(i32, i32)], limit: PassLimit) {
    let mut formula: Formula<L> = Formula::new(n, pairs.iter().copied()).unwrap();
    let stats = MeaninglessVariableElimination::new(limit).simplify(&mut formula);
    black_box(stats);
}

fn bench_simplification(c: &mut Criterion) {
    let n = 2000;
    let pairs = planted(n, 11);

    let mut group = c.benchmark_group("meaningless variable elimination");
    group.sample_size(50);

    for (name, limit) in [
        ("one pass", PassLimit::Fixed(1)),
        ("60 passes", PassLimit::Fixed(60)),
        ("fixed point", PassLimit::UntilFixedPoint),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| simplify_only::<PackedLiteral>(n, &pairs, limit));
        });
    }

    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let n = 500;
    let pairs = planted(n, 3);

    let mut group = c.benchmark_group("papadimitriou - simplifier");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("NoSimplification", |b| {
        b.iter(|| solve_with::<Config<PackedLiteral, NoSimplification>>(n, &pairs, NoSimplification));
    });
    group.bench_function("MeaninglessVariableElimination", |b| {
        b.iter(|| {
            solve_with::<Config<PackedLiteral, MeaninglessVariableElimination>>(
                n,
                &pairs,
                MeaninglessVariableElimination::default(),
            );
        });
    });

    group.finish();
}

criterion_group!(benches, bench_literals, bench_simplification, bench_end_to_end);

criterion_main!(benches);
