use log::debug;

use super::{same_face, SolveError, Solver};
use crate::cube::{bitcube::BitCube, turn::*};

/// Depth first search with a bound growing by one per iteration.
///
/// Each iteration is exhaustive, so the first solution found is a shortest
/// one, with memory linear in the depth.
pub struct IddfsSolver {
	cube: BitCube,
	max_depth: u8,
	nodes: usize,
}

impl IddfsSolver {
	pub fn new(cube: BitCube, max_depth: u8) -> Self {
		Self {
			cube,
			max_depth,
			nodes: 0,
		}
	}

	fn search(&mut self, cube: BitCube, path: &mut Vec<Turn>, bound: usize) -> bool {
		if path.len() == bound {
			return cube.is_solved();
		}

		let prev = path.last().copied();
		for turn in ALL_TURNS {
			if same_face(prev, turn) {
				continue;
			}

			self.nodes += 1;
			path.push(turn);
			if self.search(cube.turned(turn), path, bound) {
				return true;
			}
			path.pop();
		}

		false
	}
}

impl Solver for IddfsSolver {
	fn solve(&mut self) -> Result<Vec<Turn>, SolveError> {
		self.nodes = 0;
		let mut path = Vec::with_capacity(self.max_depth as usize);

		for bound in 0..=self.max_depth as usize {
			if self.search(self.cube, &mut path, bound) {
				return Ok(path);
			}
			debug!("IDDFS bound {} exhausted after {} nodes", bound, self.nodes);
		}

		Err(SolveError::DepthExhausted {
			max_depth: self.max_depth,
		})
	}

	fn nodes_visited(&self) -> usize {
		self.nodes
	}
}
