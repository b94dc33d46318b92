//! The packed cube state the solvers work on.
//!
//! Every cubie occupies a 5 bit field of one of two words:
//!
//! ```text
//! corners: [ twist:2 | id:3 ] x 8   (bits 0..40)
//! edges:   [ flip:1  | id:4 ] x 12  (bits 0..60)
//! ```
//!
//! Field i describes the cubie sitting at position i. Copying, comparing and
//! hashing a state is therefore a matter of two machine words.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cube::{cubiecube::*, *};

const FIELD: u32 = 5;
const MASK: u64 = (1 << FIELD) - 1;

const CORNER_BITS: u32 = FIELD * NUM_CORNERS as u32;
const EDGE_BITS: u32 = FIELD * NUM_EDGES as u32;

const fn pack_corners(corners: &CornerList) -> u64 {
	let mut out = 0;
	let mut i = 0;
	while i < NUM_CORNERS {
		let (c, o) = corners[i];
		out |= ((c as u64) | (o as u64) << 3) << (i as u32 * FIELD);
		i += 1;
	}
	out
}

const fn pack_edges(edges: &EdgeList) -> u64 {
	let mut out = 0;
	let mut i = 0;
	while i < NUM_EDGES {
		let (e, o) = edges[i];
		out |= ((e as u64) | (o as u64) << 4) << (i as u32 * FIELD);
		i += 1;
	}
	out
}

const SOLVED_CORNERS: u64 = pack_corners(&TC_BASE);
const SOLVED_EDGES: u64 = pack_edges(&TE_BASE);

/// A cube configuration as permutation and orientation bit fields.
///
/// The only ways to obtain a `BitCube` are the solved cube, applying turns,
/// or one of the validating conversions, so every value is reachable from
/// the solved cube.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "(u64, u64)", into = "(u64, u64)")]
pub struct BitCube {
	corners: u64,
	edges: u64,
}

impl Default for BitCube {
	/// Creates a *solved* cube!
	fn default() -> Self {
		Self::new()
	}
}

impl BitCube {
	pub const fn new() -> Self {
		Self {
			corners: SOLVED_CORNERS,
			edges: SOLVED_EDGES,
		}
	}

	pub const fn is_solved(&self) -> bool {
		self.corners == SOLVED_CORNERS && self.edges == SOLVED_EDGES
	}

	/// Return the state after applying `turn`, leaving `self` untouched.
	#[must_use]
	pub fn turned(&self, turn: Turn) -> Self {
		let mut out = *self;
		out.apply_turn(turn);
		out
	}

	/// Build a cube from its raw words, rejecting anything that is not
	/// reachable from the solved cube.
	pub fn from_raw(corners: u64, edges: u64) -> Result<Self, CubeError> {
		if corners >> CORNER_BITS != 0 || edges >> EDGE_BITS != 0 {
			return Err(CubeError::Encoding);
		}

		for i in 0..NUM_CORNERS {
			let field = (corners >> (i as u32 * FIELD)) & MASK;
			if field >> 3 > 2 {
				return Err(CubeError::Encoding);
			}
		}
		for i in 0..NUM_EDGES {
			let field = (edges >> (i as u32 * FIELD)) & MASK;
			if field & 0xF >= NUM_EDGES as u64 {
				return Err(CubeError::Encoding);
			}
		}

		let cube = Self { corners, edges };
		CubieCube::from(cube).check_solvability()?;
		Ok(cube)
	}

	/// The raw words, see [`BitCube::from_raw`]
	pub const fn raw(&self) -> (u64, u64) {
		(self.corners, self.edges)
	}

	/// Pack without checking any invariant. The caller has to hand in a
	/// solvable cube.
	pub(crate) fn from_cubie_unchecked(cube: &CubieCube) -> Self {
		Self {
			corners: pack_corners(&cube.corners),
			edges: pack_edges(&cube.edges),
		}
	}

	/// Scramble the cube with `n` random turns and return them.
	pub fn random_shuffle(&mut self, n: usize) -> Vec<Turn> {
		self.random_shuffle_with(&mut rand::thread_rng(), n)
	}

	/// Same as `random_shuffle`, with a caller supplied source of randomness.
	pub fn random_shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R, n: usize) -> Vec<Turn> {
		let turns = random_sequence_with(rng, n);
		self.apply_turns(turns.iter().copied());
		turns
	}

	// ===== Coordinates =====

	const fn corner_field(&self, i: usize) -> u64 {
		(self.corners >> (i as u32 * FIELD)) & MASK
	}

	const fn edge_field(&self, i: usize) -> u64 {
		(self.edges >> (i as u32 * FIELD)) & MASK
	}

	/// Rank of the corner permutation, in 0..8!
	pub fn corner_perm_coord(&self) -> usize {
		let mut perm = [0; NUM_CORNERS];
		for (i, p) in perm.iter_mut().enumerate() {
			*p = (self.corner_field(i) & 0b111) as usize;
		}
		crate::math::map_permutation(&perm)
	}

	/// Twists of the first seven corners in base 3, in 0..3^7
	pub fn corner_orientation_coord(&self) -> usize {
		(0..NUM_CORNERS - 1)
			.map(|i| (self.corner_field(i) >> 3) as usize * POW3[i])
			.sum()
	}

	/// Flips of the first eleven edges as bits, in 0..2^11
	pub fn edge_orientation_coord(&self) -> usize {
		(0..NUM_EDGES - 1)
			.map(|i| ((self.edge_field(i) >> 4) as usize) << i)
			.sum()
	}
}

impl RubiksCube for BitCube {
	fn apply_turn(&mut self, turn: Turn) {
		let tc = &CORNER_TRANSFORM[turn.face as usize][turn.wise as usize];
		let te = &EDGE_TRANSFORM[turn.face as usize][turn.wise as usize];

		let mut corners = 0;
		for (i, &(src, twist)) in tc.iter().enumerate() {
			let field = self.corner_field(src as usize);
			let mut ori = (field >> 3) + twist as u64;
			if ori >= 3 {
				ori -= 3;
			}
			corners |= ((field & 0b111) | ori << 3) << (i as u32 * FIELD);
		}

		let mut edges = 0;
		for (i, &(src, flip)) in te.iter().enumerate() {
			let field = self.edge_field(src as usize);
			edges |= (field ^ (flip as u64) << 4) << (i as u32 * FIELD);
		}

		self.corners = corners;
		self.edges = edges;
	}
}

impl From<BitCube> for CubieCube {
	fn from(val: BitCube) -> Self {
		let mut out = CubieCube::new();

		for (i, slot) in out.corners.iter_mut().enumerate() {
			let field = val.corner_field(i);
			*slot = (TC_BASE[(field & 0b111) as usize].0, (field >> 3) as Ori);
		}
		for (i, slot) in out.edges.iter_mut().enumerate() {
			let field = val.edge_field(i);
			*slot = (TE_BASE[(field & 0xF) as usize].0, (field >> 4) as Ori);
		}

		out
	}
}

impl TryFrom<CubieCube> for BitCube {
	type Error = CubeError;

	fn try_from(value: CubieCube) -> Result<Self, Self::Error> {
		value.check_solvability()?;
		Ok(Self::from_cubie_unchecked(&value))
	}
}

impl TryFrom<(u64, u64)> for BitCube {
	type Error = CubeError;

	fn try_from((corners, edges): (u64, u64)) -> Result<Self, Self::Error> {
		Self::from_raw(corners, edges)
	}
}

impl From<BitCube> for (u64, u64) {
	fn from(val: BitCube) -> Self {
		val.raw()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::{rngs::StdRng, SeedableRng};
	use std::collections::HashSet;

	#[test]
	/// Applying a turn and then its inverse gives back the same state
	fn turn_inverse_roundtrip() {
		let mut rng = StdRng::seed_from_u64(7);
		let mut cube = BitCube::new();
		cube.random_shuffle_with(&mut rng, 25);

		for turn in ALL_TURNS {
			let back = cube.turned(turn).turned(turn.inverse());
			assert_eq!(back, cube, "{} did not undo", turn);
		}
	}

	#[test]
	/// Every generator gives a different state, none of them solved
	fn distinct_neighbours() {
		let cube = BitCube::new();
		let neighbours: HashSet<_> = ALL_TURNS.iter().map(|t| cube.turned(*t)).collect();

		assert_eq!(neighbours.len(), ALL_TURNS.len());
		assert!(neighbours.iter().all(|c| !c.is_solved()));
		assert!(cube.is_solved());
	}

	#[test]
	fn shuffle_returns_applied_turns() {
		let mut rng = StdRng::seed_from_u64(99);
		let mut cube = BitCube::new();
		let turns = cube.random_shuffle_with(&mut rng, 12);
		assert_eq!(turns.len(), 12);

		let mut replay = BitCube::new();
		replay.apply_turns(turns);
		assert_eq!(replay, cube);
	}

	#[test]
	fn coordinates_match_cubiecube() {
		let mut cube = BitCube::new();
		cube.apply_turns(parse_turns("B2 L' D R U2 F L2 B'").unwrap());
		let cubie = CubieCube::from(cube);

		assert_eq!(cube.corner_perm_coord(), cubie.get_corner_perm_coord());
		assert_eq!(cube.corner_orientation_coord(), cubie.get_corner_orientation_coord());
		assert_eq!(cube.edge_orientation_coord(), cubie.get_edge_orientation_coord());
	}

	#[test]
	/// Corrupted states have to be rejected at the boundaries
	fn raw_validation() {
		let mut cube = BitCube::new();
		cube.apply_turns(parse_turns("R U R' U'").unwrap());
		let (corners, edges) = cube.raw();
		assert_eq!(BitCube::from_raw(corners, edges), Ok(cube));

		// Twist the first corner once
		assert_eq!(
			BitCube::from_raw(SOLVED_CORNERS | 1 << 3, SOLVED_EDGES),
			Err(CubeError::CornerOrientation(1))
		);
		// Flip the first edge
		assert_eq!(
			BitCube::from_raw(SOLVED_CORNERS, SOLVED_EDGES ^ 1 << 4),
			Err(CubeError::EdgeOrientation)
		);
		// Edge id 15 does not exist
		assert_eq!(
			BitCube::from_raw(SOLVED_CORNERS, SOLVED_EDGES | 0xF),
			Err(CubeError::Encoding)
		);
		assert_eq!(
			BitCube::from_raw(SOLVED_CORNERS | 1 << 50, SOLVED_EDGES),
			Err(CubeError::Encoding)
		);
	}

	#[test]
	fn serde_rejects_invalid_states() {
		let mut cube = BitCube::new();
		cube.apply_turns(parse_turns("F2 D' L").unwrap());

		let bytes = bincode::serialize(&cube).unwrap();
		let back: BitCube = bincode::deserialize(&bytes).unwrap();
		assert_eq!(back, cube);

		let broken = bincode::serialize(&(SOLVED_CORNERS, SOLVED_EDGES ^ 1 << 4)).unwrap();
		assert!(bincode::deserialize::<BitCube>(&broken).is_err());
	}
}
