use std::{ops::ControlFlow, path::Path};

use log::debug;

use super::{same_face, SolveError, Solver};
use crate::{
	cube::{bitcube::BitCube, turn::*},
	pattern::{CornerProjection, Heuristic, PatternDatabase},
};

/// Iterative deepening A*.
///
/// Like [`super::IddfsSolver`], but a branch is cut as soon as the turns
/// made so far plus the estimate of the heuristic exceed the threshold.
/// The next threshold is the smallest value that was cut off. With an
/// admissible heuristic the first solution is a shortest one.
pub struct IdaStarSolver<H> {
	cube: BitCube,
	heuristic: H,
	max_threshold: Option<u8>,
	nodes: usize,
}

impl<H: Heuristic> IdaStarSolver<H> {
	pub fn new(cube: BitCube, heuristic: H) -> Self {
		Self {
			cube,
			heuristic,
			max_threshold: None,
			nodes: 0,
		}
	}

	/// Give up with `DepthExhausted` once the threshold would exceed `max`
	pub fn with_max_threshold(mut self, max: u8) -> Self {
		self.max_threshold = Some(max);
		self
	}

	/// Break when solved, otherwise continue with the smallest f-value that
	/// exceeded `threshold` (`u8::MAX` if nothing did).
	fn search(&mut self, cube: BitCube, path: &mut Vec<Turn>, threshold: u8) -> ControlFlow<(), u8> {
		let g = path.len() as u8;
		let f = g.saturating_add(self.heuristic.estimate(&cube));
		if f > threshold {
			return ControlFlow::Continue(f);
		}
		if cube.is_solved() {
			return ControlFlow::Break(());
		}

		let prev = path.last().copied();
		let mut min = u8::MAX;
		for turn in ALL_TURNS {
			if same_face(prev, turn) {
				continue;
			}

			self.nodes += 1;
			path.push(turn);
			match self.search(cube.turned(turn), path, threshold) {
				ControlFlow::Break(()) => return ControlFlow::Break(()),
				ControlFlow::Continue(t) => min = min.min(t),
			}
			path.pop();
		}

		ControlFlow::Continue(min)
	}
}

impl IdaStarSolver<PatternDatabase<CornerProjection>> {
	/// Solve with the corner database stored at `path`
	pub fn from_file<T: AsRef<Path>>(cube: BitCube, path: T) -> Result<Self, SolveError> {
		let database = PatternDatabase::load(path)?;
		Ok(Self::new(cube, database))
	}
}

impl<H: Heuristic> Solver for IdaStarSolver<H> {
	fn solve(&mut self) -> Result<Vec<Turn>, SolveError> {
		self.nodes = 0;
		let mut path = vec![];
		let mut threshold = self.heuristic.estimate(&self.cube);

		loop {
			if let Some(max) = self.max_threshold {
				if threshold > max {
					return Err(SolveError::DepthExhausted { max_depth: max });
				}
			}

			match self.search(self.cube, &mut path, threshold) {
				ControlFlow::Break(()) => return Ok(path),
				ControlFlow::Continue(u8::MAX) => return Err(SolveError::Unsolvable),
				ControlFlow::Continue(next) => {
					debug!(
						"IDA* threshold {} exhausted after {} nodes, next {}",
						threshold, self.nodes, next
					);
					threshold = next;
				}
			}
		}
	}

	fn nodes_visited(&self) -> usize {
		self.nodes
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		cube::RubiksCube,
		pattern::{CornerOrientationProjection, DatabaseError, EdgeOrientationProjection},
		solve::{verify, IddfsSolver},
	};
	use rand::{rngs::StdRng, SeedableRng};

	struct Blind;

	impl Heuristic for Blind {
		fn estimate(&self, _: &BitCube) -> u8 {
			0
		}
	}

	#[test]
	fn solved_cube_needs_no_turns() {
		let mut solver = IdaStarSolver::new(BitCube::new(), Blind);
		assert_eq!(solver.solve().unwrap(), vec![]);
	}

	#[test]
	fn matches_iddfs() {
		let twists = PatternDatabase::<CornerOrientationProjection>::generate();
		let flips = PatternDatabase::<EdgeOrientationProjection>::generate();
		let mut rng = StdRng::seed_from_u64(11);

		for _ in 0..5 {
			let mut cube = BitCube::new();
			cube.random_shuffle_with(&mut rng, 5);

			let turns = IdaStarSolver::new(cube, (&twists, &flips)).solve().unwrap();
			let blind = IdaStarSolver::new(cube, Blind).solve().unwrap();
			let reference = IddfsSolver::new(cube, 5).solve().unwrap();

			assert!(verify(&cube, &turns));
			assert_eq!(turns.len(), reference.len());
			assert_eq!(blind.len(), reference.len());
		}
	}

	#[test]
	fn heuristic_prunes() {
		let twists = PatternDatabase::<CornerOrientationProjection>::generate();
		let mut cube = BitCube::new();
		cube.apply_turns(parse_turns("R F' U L").unwrap());

		let mut guided = IdaStarSolver::new(cube, &twists);
		let mut blind = IdaStarSolver::new(cube, Blind);
		assert_eq!(guided.solve().unwrap().len(), 4);
		assert_eq!(blind.solve().unwrap().len(), 4);
		assert!(guided.nodes_visited() < blind.nodes_visited());
	}

	#[test]
	fn threshold_cap() {
		let mut cube = BitCube::new();
		cube.apply_turns(parse_turns("R U F").unwrap());

		let mut solver = IdaStarSolver::new(cube, Blind).with_max_threshold(2);
		assert!(matches!(
			solver.solve(),
			Err(SolveError::DepthExhausted { max_depth: 2 })
		));
	}

	#[test]
	fn missing_database() {
		let path = std::env::temp_dir().join("rubiksearch-does-not-exist.pdb");
		let result = IdaStarSolver::from_file(BitCube::new(), path);
		assert!(matches!(
			result,
			Err(SolveError::Database(DatabaseError::Io(_)))
		));
	}
}
