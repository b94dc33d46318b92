use std::collections::{hash_map::Entry, HashMap, VecDeque};

use log::debug;

use super::{SolveError, Solver};
use crate::cube::{bitcube::BitCube, turn::*};

/// Breadth first search over whole cube states.
///
/// Always finds a shortest solution, but the number of stored states grows
/// by a factor of about 13 per level. Use `with_max_states` to put a cap on
/// the memory.
pub struct BfsSolver {
	cube: BitCube,
	max_states: Option<usize>,
	nodes: usize,
}

impl BfsSolver {
	pub fn new(cube: BitCube) -> Self {
		Self {
			cube,
			max_states: None,
			nodes: 0,
		}
	}

	/// Give up with `StateLimitExceeded` after visiting `limit` states
	pub fn with_max_states(mut self, limit: usize) -> Self {
		self.max_states = Some(limit);
		self
	}
}

/// Walk the turns stored in `visited` back from `state` to the root
fn reconstruct(visited: &HashMap<BitCube, Option<Turn>>, mut state: BitCube) -> Vec<Turn> {
	let mut out = vec![];
	while let Some(Some(turn)) = visited.get(&state) {
		out.push(*turn);
		state = state.turned(turn.inverse());
	}
	out.reverse();
	out
}

impl Solver for BfsSolver {
	fn solve(&mut self) -> Result<Vec<Turn>, SolveError> {
		self.nodes = 1;
		if self.cube.is_solved() {
			return Ok(vec![]);
		}

		// Maps every discovered state to the turn it was reached with
		let mut visited = HashMap::from([(self.cube, None)]);
		let mut queue = VecDeque::from([self.cube]);

		while let Some(state) = queue.pop_front() {
			for turn in ALL_TURNS {
				let next = state.turned(turn);
				let Entry::Vacant(entry) = visited.entry(next) else {
					continue;
				};
				entry.insert(Some(turn));
				self.nodes += 1;

				// All costs are equal, so the first discovery is at minimal depth
				if next.is_solved() {
					debug!("BFS visited {} states", self.nodes);
					return Ok(reconstruct(&visited, next));
				}

				if let Some(limit) = self.max_states {
					if self.nodes > limit {
						return Err(SolveError::StateLimitExceeded { limit });
					}
				}

				queue.push_back(next);
			}
		}

		Err(SolveError::Unsolvable)
	}

	fn nodes_visited(&self) -> usize {
		self.nodes
	}
}
