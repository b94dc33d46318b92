//! Scramble a cube and search for a way back.
//!
//! ```
//! use rubiksearch::prelude::*;
//!
//! let mut cube = BitCube::new();
//! cube.apply_turns(parse_turns("R U R' U'").unwrap());
//!
//! let turns = BfsSolver::new(cube).solve().unwrap();
//! assert_eq!(turns.len(), 4);
//!
//! cube.apply_turns(turns);
//! assert!(cube.is_solved());
//! ```
//!
//! IDA* needs a pattern database, which is generated once and then saved:
//!
//! ```no_run
//! use rubiksearch::prelude::*;
//!
//! let db = PatternDatabase::<CornerProjection>::generate();
//! db.save("corners.pdb").unwrap();
//!
//! let mut cube = BitCube::new();
//! cube.random_shuffle(12);
//! let turns = IdaStarSolver::from_file(cube, "corners.pdb").unwrap().solve().unwrap();
//! ```

pub mod cube;
mod math;
pub mod pattern;
pub mod solve;

pub mod prelude {
	pub use crate::cube::{bitcube::*, cubiecube::*, turn::*, *};
	pub use crate::pattern::{
		CornerOrientationProjection, CornerProjection, DatabaseError, EdgeOrientationProjection, Heuristic,
		PatternDatabase, Projection, ProjectionKind,
	};
	pub use crate::solve::{BfsSolver, DfsSolver, IdaStarSolver, IddfsSolver, SolveError, Solver};
}
