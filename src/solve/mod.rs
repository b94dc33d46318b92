//! Searches from a scrambled cube back to the solved state.
//!
//! All solvers work on [`BitCube`] and share the [`Solver`] interface. A
//! solver owns the state it was created with plus whatever its strategy
//! needs, so independent solvers never share mutable data.

pub mod bfs;
pub mod dfs;
pub mod idastar;
pub mod iddfs;

use crate::{
	cube::{bitcube::BitCube, turn::*},
	pattern::DatabaseError,
};

pub use bfs::BfsSolver;
pub use dfs::DfsSolver;
pub use idastar::IdaStarSolver;
pub use iddfs::IddfsSolver;

#[derive(thiserror::Error, Debug)]
pub enum SolveError {
	#[error("No solution within {max_depth} turns")]
	DepthExhausted { max_depth: u8 },
	#[error("Visited more than {limit} states without finding the solved cube")]
	StateLimitExceeded { limit: usize },
	#[error("The search space is exhausted, the cube can't be solved")]
	Unsolvable,
	#[error(transparent)]
	Database(#[from] DatabaseError),
}

pub trait Solver {
	/// Find a sequence of turns which takes the initial cube to the solved
	/// cube. An already solved cube gives an empty sequence.
	fn solve(&mut self) -> Result<Vec<Turn>, SolveError>;

	/// Number of states generated by the last call to `solve`
	fn nodes_visited(&self) -> usize;
}

/// The turn would directly undo the previous one
fn undoes(prev: Option<Turn>, turn: Turn) -> bool {
	prev.is_some_and(|p| p.inverse() == turn)
}

/// Two turns of the same face in a row can always be merged into one (or
/// none), so a shortest solution never contains them.
fn same_face(prev: Option<Turn>, turn: Turn) -> bool {
	prev.is_some_and(|p| p.face == turn.face)
}

/// Apply `turns` to `cube` and check the result
pub fn verify(cube: &BitCube, turns: &[Turn]) -> bool {
	let mut cube = *cube;
	for turn in turns {
		cube = cube.turned(*turn);
	}
	cube.is_solved()
}
