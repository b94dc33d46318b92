use std::collections::{hash_map::Entry, HashMap};

use log::info;
use rand::{rngs::StdRng, SeedableRng};
use rubiksearch::{prelude::*, solve::verify};

/// Every state within `depth` turns of the solved cube with its exact distance
fn ball(depth: u8) -> HashMap<BitCube, u8> {
	let mut out = HashMap::from([(BitCube::new(), 0)]);
	let mut frontier = vec![BitCube::new()];
	for d in 1..=depth {
		let mut next = vec![];
		for cube in frontier {
			for turn in ALL_TURNS {
				let child = cube.turned(turn);
				if let Entry::Vacant(e) = out.entry(child) {
					e.insert(d);
					next.push(child);
				}
			}
		}
		frontier = next;
	}
	out
}

fn scrambles(seed: u64, count: usize, length: usize) -> Vec<BitCube> {
	let mut rng = StdRng::seed_from_u64(seed);
	(0..count)
		.map(|_| {
			let mut cube = BitCube::new();
			cube.random_shuffle_with(&mut rng, length);
			cube
		})
		.collect()
}

#[test_log::test]
fn every_solver_returns_to_solved() {
	let twists = PatternDatabase::<CornerOrientationProjection>::generate();
	let flips = PatternDatabase::<EdgeOrientationProjection>::generate();

	for cube in scrambles(1, 10, 4) {
		let mut solvers: Vec<(&str, Box<dyn Solver + '_>)> = vec![
			("dfs", Box::new(DfsSolver::new(cube, 4))),
			("bfs", Box::new(BfsSolver::new(cube))),
			("iddfs", Box::new(IddfsSolver::new(cube, 4))),
			("idastar", Box::new(IdaStarSolver::new(cube, (&twists, &flips)))),
		];

		for (name, solver) in solvers.iter_mut() {
			let turns = solver.solve().unwrap();
			info!("{}: {} ({} nodes)", name, format_turns(&turns), solver.nodes_visited());
			assert!(verify(&cube, &turns), "{} did not solve the cube", name);
			assert!(turns.len() <= 4);
		}
	}
}

#[test_log::test]
fn bfs_is_optimal() {
	let distances = ball(5);

	for cube in scrambles(2, 20, 5) {
		let turns = BfsSolver::new(cube).solve().unwrap();
		assert!(verify(&cube, &turns));
		assert_eq!(turns.len() as u8, distances[&cube]);
	}
}

#[test_log::test]
fn iddfs_matches_bfs() {
	for cube in scrambles(3, 10, 5) {
		let bfs = BfsSolver::new(cube).solve().unwrap();
		let iddfs = IddfsSolver::new(cube, 5).solve().unwrap();
		assert!(verify(&cube, &iddfs));
		assert_eq!(iddfs.len(), bfs.len());
	}
}

#[test_log::test]
fn idastar_matches_bfs() {
	let corners = PatternDatabase::<CornerProjection>::generate_with_limit(Some(5));
	let twists = PatternDatabase::<CornerOrientationProjection>::generate();
	let flips = PatternDatabase::<EdgeOrientationProjection>::generate();
	let heuristic = (&corners, (&twists, &flips));

	for cube in scrambles(4, 10, 5) {
		let bfs = BfsSolver::new(cube).solve().unwrap();
		let mut solver = IdaStarSolver::new(cube, &heuristic);
		let turns = solver.solve().unwrap();
		info!("{} in {} nodes", format_turns(&turns), solver.nodes_visited());

		assert!(verify(&cube, &turns));
		assert_eq!(turns.len(), bfs.len());
	}
}

#[test_log::test]
fn idastar_is_optimal_on_six_turns() {
	let corners = PatternDatabase::<CornerProjection>::generate_with_limit(Some(6));
	let twists = PatternDatabase::<CornerOrientationProjection>::generate();
	let flips = PatternDatabase::<EdgeOrientationProjection>::generate();
	let heuristic = (&corners, (&twists, &flips));
	let distances = ball(5);

	for cube in scrambles(6, 4, 6) {
		let turns = IdaStarSolver::new(cube, &heuristic).solve().unwrap();
		let reference = IddfsSolver::new(cube, 6).solve().unwrap();
		assert!(verify(&cube, &turns));
		assert_eq!(turns.len(), reference.len());

		// Below six turns the exact distance is known
		match distances.get(&cube) {
			Some(&d) => assert_eq!(turns.len() as u8, d),
			None => assert_eq!(turns.len(), 6),
		}
	}
}

#[test_log::test]
fn heuristics_are_admissible() {
	let corners = PatternDatabase::<CornerProjection>::generate_with_limit(Some(3));
	let twists = PatternDatabase::<CornerOrientationProjection>::generate();
	let flips = PatternDatabase::<EdgeOrientationProjection>::generate();
	let heuristic = (&corners, (&twists, &flips));

	for (cube, distance) in ball(4) {
		assert!(heuristic.estimate(&cube) <= distance);
	}
}

#[test_log::test]
fn sexy_move() {
	let mut cube = BitCube::new();
	cube.apply_turns(parse_turns("R U R' U'").unwrap());

	let turns = BfsSolver::new(cube).solve().unwrap();
	assert_eq!(turns.len(), 4);
	assert!(verify(&cube, &turns));

	// Nothing shorter exists
	assert_eq!(ball(4)[&cube], 4);
	assert!(!ball(3).contains_key(&cube));
}

#[test_log::test]
fn idastar_from_saved_database() {
	let path = std::env::temp_dir().join(format!("rubiksearch-solvers-{}.pdb", std::process::id()));
	PatternDatabase::<CornerProjection>::generate_with_limit(Some(4))
		.save(&path)
		.unwrap();

	for cube in scrambles(5, 3, 5) {
		let mut solver = IdaStarSolver::from_file(cube, &path).unwrap();
		let turns = solver.solve().unwrap();
		assert!(verify(&cube, &turns));
		assert!(turns.len() <= 5);
	}

	std::fs::remove_file(&path).unwrap();
}
