use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, SeedableRng};

use rubiksearch::prelude::*;

fn bench_turns(c: &mut Criterion) {
	let mut rng = StdRng::seed_from_u64(0);
	let mut cube = BitCube::new();
	cube.random_shuffle_with(&mut rng, 30);

	c.bench_function("bitcube_all_turns", |b| {
		b.iter(|| {
			for turn in ALL_TURNS {
				black_box(black_box(cube).turned(turn));
			}
		})
	});

	let mut cubie = CubieCube::from(cube);
	c.bench_function("cubiecube_turn", |b| {
		b.iter(|| cubie.apply_turn(black_box(ALL_TURNS[7])))
	});
}

fn bench_idastar(c: &mut Criterion) {
	let twists = PatternDatabase::<CornerOrientationProjection>::generate();
	let flips = PatternDatabase::<EdgeOrientationProjection>::generate();

	let mut rng = StdRng::seed_from_u64(1);
	let mut cube = BitCube::new();
	cube.random_shuffle_with(&mut rng, 6);

	let mut group = c.benchmark_group("idastar");
	group.sample_size(10);
	group.bench_function("six_turn_scramble", |b| {
		b.iter(|| {
			IdaStarSolver::new(black_box(cube), (&twists, &flips))
				.solve()
				.map(|turns| turns.len())
		})
	});
	group.finish();
}

criterion_group!(benches, bench_turns, bench_idastar);
criterion_main!(benches);
