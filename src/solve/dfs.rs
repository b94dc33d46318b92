use log::debug;

use super::{undoes, SolveError, Solver};
use crate::cube::{bitcube::BitCube, turn::*};

/// Plain depth first search.
///
/// Returns the first solution it runs into, which is usually far from
/// the shortest one. Only the direct inverse of the previous turn is
/// skipped, everything else within `max_depth` is tried.
pub struct DfsSolver {
	cube: BitCube,
	max_depth: u8,
	nodes: usize,
}

impl DfsSolver {
	pub fn new(cube: BitCube, max_depth: u8) -> Self {
		Self {
			cube,
			max_depth,
			nodes: 0,
		}
	}

	fn search(&mut self, cube: BitCube, path: &mut Vec<Turn>) -> bool {
		if cube.is_solved() {
			return true;
		}
		if path.len() >= self.max_depth as usize {
			return false;
		}

		let prev = path.last().copied();
		for turn in ALL_TURNS {
			if undoes(prev, turn) {
				continue;
			}

			self.nodes += 1;
			path.push(turn);
			if self.search(cube.turned(turn), path) {
				return true;
			}
			path.pop();
		}

		false
	}
}

impl Solver for DfsSolver {
	fn solve(&mut self) -> Result<Vec<Turn>, SolveError> {
		self.nodes = 0;
		let mut path = Vec::with_capacity(self.max_depth as usize);

		let found = self.search(self.cube, &mut path);
		debug!("DFS visited {} nodes", self.nodes);

		if found {
			Ok(path)
		} else {
			Err(SolveError::DepthExhausted {
				max_depth: self.max_depth,
			})
		}
	}

	fn nodes_visited(&self) -> usize {
		self.nodes
	}
}
