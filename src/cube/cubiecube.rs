use const_for::const_for;

use crate::{cube::*, math::*};

pub type Ori = u8;

pub type CornerList = [(Corner, Ori); NUM_CORNERS];
pub type EdgeList = [(Edge, Ori); NUM_EDGES];

/// The cube specification as Kociemba published in
/// https://kociemba.org/math/cubielevel.htm
///
/// Uses more space than necessary, but gives
/// very good insights about the cubes properties.
/// The search itself runs on [`BitCube`](super::bitcube::BitCube).
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct CubieCube {
	pub corners: CornerList,
	pub edges: EdgeList,
}

// ===== Tranformation-Corners =====
//
// Entry i of a transformation names the position the cubie now at
// position i came from, together with the twist it picks up on the way.

#[rustfmt::skip]
pub(crate) const TC_BASE: CornerList = [
	(Corner::URF, 0), (Corner::UBR, 0), (Corner::DLF, 0), (Corner::DFR, 0),
	(Corner::ULB, 0), (Corner::UFL, 0), (Corner::DRB, 0), (Corner::DBL, 0),
];
#[rustfmt::skip]
const TC_UP: CornerList = [
	(Corner::UBR, 0), (Corner::ULB, 0), (Corner::DLF, 0), (Corner::DFR, 0),
	(Corner::UFL, 0), (Corner::URF, 0), (Corner::DRB, 0), (Corner::DBL, 0),
];
#[rustfmt::skip]
const TC_DOWN: CornerList = [
	(Corner::URF, 0), (Corner::UBR, 0), (Corner::DBL, 0), (Corner::DLF, 0),
	(Corner::ULB, 0), (Corner::UFL, 0), (Corner::DFR, 0), (Corner::DRB, 0),
];
#[rustfmt::skip]
const TC_BACK: CornerList = [
	(Corner::URF, 0), (Corner::DRB, 2), (Corner::DLF, 0), (Corner::DFR, 0),
	(Corner::UBR, 1), (Corner::UFL, 0), (Corner::DBL, 1), (Corner::ULB, 2),
];
#[rustfmt::skip]
const TC_FRONT: CornerList = [
	(Corner::UFL, 1), (Corner::UBR, 0), (Corner::DFR, 1), (Corner::URF, 2),
	(Corner::ULB, 0), (Corner::DLF, 2), (Corner::DRB, 0), (Corner::DBL, 0),
];
#[rustfmt::skip]
const TC_LEFT: CornerList = [
	(Corner::URF, 0), (Corner::UBR, 0), (Corner::UFL, 2), (Corner::DFR, 0),
	(Corner::DBL, 2), (Corner::ULB, 1), (Corner::DRB, 0), (Corner::DLF, 1),
];
#[rustfmt::skip]
const TC_RIGHT: CornerList = [
	(Corner::DFR, 2), (Corner::URF, 1), (Corner::DLF, 0), (Corner::DRB, 1),
	(Corner::ULB, 0), (Corner::UFL, 0), (Corner::UBR, 2), (Corner::DBL, 0),
];

/// Chain 2 transformations: first t1, then t2.
pub(crate) const fn chain_corners(t1: CornerList, t2: CornerList) -> CornerList {
	let mut out = TC_BASE;

	const_for!(i in 0..NUM_CORNERS => {
		let (c2, o2) = t2[i];
		let (c1, o1) = t1[c2 as usize];
		out[i] = (c1, (o1 + o2) % 3);
	});

	out
}

const fn generate_corner_transform_table() -> [[CornerList; NUM_TURNWISES]; NUM_FACES] {
	const BASE: [CornerList; NUM_FACES] = [TC_UP, TC_DOWN, TC_BACK, TC_FRONT, TC_LEFT, TC_RIGHT];

	let mut out = [[TC_BASE; NUM_TURNWISES]; NUM_FACES];

	const_for!(i in 0..NUM_FACES => {
		out[i][0] = BASE[i];
		out[i][1] = chain_corners(out[i][0], out[i][0]);
		out[i][2] = chain_corners(out[i][0], out[i][1]);
	});

	out
}

pub(crate) const CORNER_TRANSFORM: [[CornerList; NUM_TURNWISES]; NUM_FACES] =
	generate_corner_transform_table();

// ===== Edge Transformations =====
#[rustfmt::skip]
pub(crate) const TE_BASE: EdgeList = [
	(Edge::UF,0), (Edge::UR,0), (Edge::UB,0), (Edge::UL,0),
	(Edge::DF,0), (Edge::DR,0), (Edge::DB,0), (Edge::DL,0),
	(Edge::FR,0), (Edge::BR,0), (Edge::BL,0), (Edge::FL,0),
];
#[rustfmt::skip]
const TE_UP: EdgeList = [
	(Edge::UR,0), (Edge::UB,0), (Edge::UL,0), (Edge::UF,0),
	(Edge::DF,0), (Edge::DR,0), (Edge::DB,0), (Edge::DL,0),
	(Edge::FR,0), (Edge::BR,0), (Edge::BL,0), (Edge::FL,0),
];
#[rustfmt::skip]
const TE_DOWN: EdgeList = [
	(Edge::UF,0), (Edge::UR,0), (Edge::UB,0), (Edge::UL,0),
	(Edge::DL,0), (Edge::DF,0), (Edge::DR,0), (Edge::DB,0),
	(Edge::FR,0), (Edge::BR,0), (Edge::BL,0), (Edge::FL,0),
];
#[rustfmt::skip]
const TE_BACK: EdgeList = [
	(Edge::UF,0), (Edge::UR,0), (Edge::BR,1), (Edge::UL,0),
	(Edge::DF,0), (Edge::DR,0), (Edge::BL,1), (Edge::DL,0),
	(Edge::FR,0), (Edge::DB,1), (Edge::UB,1), (Edge::FL,0),
];
#[rustfmt::skip]
const TE_FRONT: EdgeList = [
	(Edge::FL,1), (Edge::UR,0), (Edge::UB,0), (Edge::UL,0),
	(Edge::FR,1), (Edge::DR,0), (Edge::DB,0), (Edge::DL,0),
	(Edge::UF,1), (Edge::BR,0), (Edge::BL,0), (Edge::DF,1),
];
#[rustfmt::skip]
const TE_LEFT: EdgeList = [
	(Edge::UF,0), (Edge::UR,0), (Edge::UB,0), (Edge::BL,0),
	(Edge::DF,0), (Edge::DR,0), (Edge::DB,0), (Edge::FL,0),
	(Edge::FR,0), (Edge::BR,0), (Edge::DL,0), (Edge::UL,0),
];
#[rustfmt::skip]
const TE_RIGHT: EdgeList = [
	(Edge::UF,0), (Edge::FR,0), (Edge::UB,0), (Edge::UL,0),
	(Edge::DF,0), (Edge::BR,0), (Edge::DB,0), (Edge::DL,0),
	(Edge::DR,0), (Edge::UR,0), (Edge::BL,0), (Edge::FL,0),
];

pub(crate) const fn chain_edges(t1: EdgeList, t2: EdgeList) -> EdgeList {
	let mut out = TE_BASE;

	const_for!(i in 0..NUM_EDGES => {
		let (e2, o2) = t2[i];
		let (e1, o1) = t1[e2 as usize];

		out[i] = (e1, (o1+o2)&1);
	});

	out
}

const fn generate_edge_transform_table() -> [[EdgeList; NUM_TURNWISES]; NUM_FACES] {
	const BASE: [EdgeList; NUM_FACES] = [TE_UP, TE_DOWN, TE_BACK, TE_FRONT, TE_LEFT, TE_RIGHT];

	let mut out = [[TE_BASE; NUM_TURNWISES]; NUM_FACES];

	const_for!(i in 0..NUM_FACES => {
		out[i][0] = BASE[i];
		out[i][1] = chain_edges(out[i][0], out[i][0]);
		out[i][2] = chain_edges(out[i][0], out[i][1]);
	});

	out
}

pub(crate) const EDGE_TRANSFORM: [[EdgeList; NUM_TURNWISES]; NUM_FACES] =
	generate_edge_transform_table();

// ==========

/// Generate a power list where v[i] = base^i from 0..N (exclusive)
const fn pow_list<const N: usize>(base: usize) -> [usize; N] {
	let mut out = [1; N];
	const_for!(i in 1..N => { out[i] = out[i-1] * base; });
	out
}

pub(crate) const POW3: [usize; NUM_CORNERS] = pow_list::<NUM_CORNERS>(3);

pub const CORNER_ORI: usize = POW3[NUM_CORNERS - 1];
pub const EDGE_ORI: usize = 1 << (NUM_EDGES - 1);
pub const CORNER_PERM: usize = FACTORIAL[NUM_CORNERS];

impl Default for CubieCube {
	fn default() -> Self {
		Self::new()
	}
}

impl CubieCube {
	pub const fn new() -> Self {
		CubieCube {
			corners: TC_BASE,
			edges: TE_BASE,
		}
	}

	/// Get the corner and orientation at position 'c'
	pub const fn corner(&self, c: Corner) -> (Corner, Ori) {
		self.corners[c as usize]
	}

	/// Get the edge and orientation at position 'e'
	pub const fn edge(&self, e: Edge) -> (Edge, Ori) {
		self.edges[e as usize]
	}

	// ===== Coordinates functions =====

	/// Set the corner orientation according to the given coordinate.
	/// The twist of the last corner follows from the others.
	pub fn set_corner_orientation(&mut self, coord: usize) {
		#[cfg(debug_assertions)]
		assert!(coord < CORNER_ORI);

		let mut x = coord;
		let mut sum = 0;

		for i in 0..NUM_CORNERS - 1 {
			let o = x % 3;
			self.corners[i].1 = o as Ori;
			sum += o;
			x /= 3;
		}
		self.corners[NUM_CORNERS - 1].1 = ((3 - sum % 3) % 3) as Ori;
	}

	/// Set the edge orientation according to the given coordinate
	pub fn set_edge_orientation(&mut self, coord: usize) {
		#[cfg(debug_assertions)]
		assert!(coord < EDGE_ORI);

		for i in 0..(NUM_EDGES - 1) {
			self.edges[i].1 = (coord >> i) as Ori & 1;
		}
		self.edges[NUM_EDGES - 1].1 = (coord.count_ones() & 1) as Ori;
	}

	/// Set the corner permutation according to the given coordinate
	pub fn set_corner_permutation(&mut self, coord: usize) {
		#[cfg(debug_assertions)]
		assert!(coord < CORNER_PERM);

		let corners = permute_array(TC_BASE.map(|(c, _)| c), coord);
		for (slot, c) in self.corners.iter_mut().zip(corners) {
			slot.0 = c;
		}
	}

	// ===== Coordinate get functions =====

	/// Return the cube's corner orientation coordinate
	pub fn get_corner_orientation_coord(&self) -> usize {
		self.corners
			.iter()
			.take(NUM_CORNERS - 1)
			.zip(POW3)
			.map(|((_, o), p)| *o as usize * p)
			.sum()
	}

	/// Return the cube's edges orientation coordinate
	pub fn get_edge_orientation_coord(&self) -> usize {
		self.edges
			.iter()
			.take(NUM_EDGES - 1)
			.enumerate()
			.map(|(i, (_, o))| (*o as usize) << i)
			.sum()
	}

	/// Return the cube's corner permutation as a coordinate.
	pub fn get_corner_perm_coord(&self) -> usize {
		let mut perm = [0; NUM_CORNERS];
		for (p, (c, _)) in perm.iter_mut().zip(self.corners) {
			*p = c as usize;
		}
		map_permutation(&perm)
	}

	// ===== Utility functions =====

	pub fn apply_transformation(&mut self, tc: CornerList, te: EdgeList) {
		self.corners = chain_corners(self.corners, tc);
		self.edges = chain_edges(self.edges, te);
	}

	pub fn is_solved(&self) -> bool {
		self.edges == TE_BASE && self.corners == TC_BASE
	}

	/// Check whether the cube can be reached from the solved cube.
	/// The error names the first broken invariant.
	pub fn check_solvability(&self) -> Result<(), CubeError> {
		if self.corners.iter().any(|(_, o)| *o > 2) || self.edges.iter().any(|(_, o)| *o > 1) {
			return Err(CubeError::Encoding);
		}

		// Check that all corners are there once
		let mut contains = [false; NUM_CORNERS];
		for (c, _) in self.corners.iter() {
			contains[*c as usize] = true;
		}
		if contains.into_iter().any(|b| !b) {
			return Err(CubeError::Cubies);
		}

		// Check that all edges are there once
		let mut contains = [false; NUM_EDGES];
		for (e, _) in self.edges.iter() {
			contains[*e as usize] = true;
		}
		if contains.into_iter().any(|b| !b) {
			return Err(CubeError::Cubies);
		}

		// The sum of the corner orientations have to be divisible by 3
		let cori = self.corners.iter().map(|(_, o)| *o as usize).sum::<usize>();
		if cori % 3 != 0 {
			return Err(CubeError::CornerOrientation(cori % 3));
		}

		// The sum of the edge orientations have to be divisible by 2
		let eori = self.edges.iter().map(|(_, o)| *o as usize).sum::<usize>();
		if eori % 2 != 0 {
			return Err(CubeError::EdgeOrientation);
		}

		// There must be an even number of swap throughout the permutations
		if self.corner_parity() != self.edge_parity() {
			return Err(CubeError::Permutation);
		}

		Ok(())
	}

	/// Parity of the corner permutation, 0 for even
	pub fn corner_parity(&self) -> usize {
		let mut perm = [0; NUM_CORNERS];
		for (p, (c, _)) in perm.iter_mut().zip(self.corners) {
			*p = c as usize;
		}
		permutation_parity(&perm)
	}

	/// Parity of the edge permutation, 0 for even
	pub fn edge_parity(&self) -> usize {
		let mut perm = [0; NUM_EDGES];
		for (p, (e, _)) in perm.iter_mut().zip(self.edges) {
			*p = e as usize;
		}
		permutation_parity(&perm)
	}

	pub fn is_solvable(&self) -> bool {
		self.check_solvability().is_ok()
	}
}

impl RubiksCube for CubieCube {
	fn apply_turn(&mut self, turn: Turn) {
		let tc = CORNER_TRANSFORM[turn.face as usize][turn.wise as usize];
		let te = EDGE_TRANSFORM[turn.face as usize][turn.wise as usize];
		self.apply_transformation(tc, te);
	}
}
