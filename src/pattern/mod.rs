//! Pattern databases: exact distances of an abstracted part of the cube,
//! used as admissible heuristics by the IDA* solver.

pub mod database;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cube::{bitcube::BitCube, cubiecube::*};

pub use database::{DatabaseError, PatternDatabase};

/// Identifies a projection inside a persisted database.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[derive(strum::Display, strum::EnumString, strum::EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum ProjectionKind {
	Corners,
	CornerOrientation,
	EdgeOrientation,
}

/// A projection of the cube onto a smaller state space.
///
/// Every turn has to act on the projection alone: two cubes with the same
/// index must still have the same index after the same turn. Then the
/// distance of a projected state is never larger than the distance of any
/// cube projecting onto it.
pub trait Projection: Send + Sync + 'static {
	const KIND: ProjectionKind;
	/// Number of indices, `index` returns values in 0..SIZE
	const SIZE: usize;

	fn index(cube: &BitCube) -> usize;

	/// Some reachable cube whose projection has the given index
	fn cube(index: usize) -> BitCube;
}

/// Corner permutation and orientation, the edges are ignored.
pub struct CornerProjection;

impl Projection for CornerProjection {
	const KIND: ProjectionKind = ProjectionKind::Corners;
	const SIZE: usize = CORNER_PERM * CORNER_ORI;

	fn index(cube: &BitCube) -> usize {
		cube.corner_perm_coord() * CORNER_ORI + cube.corner_orientation_coord()
	}

	fn cube(index: usize) -> BitCube {
		let mut cube = CubieCube::new();
		cube.set_corner_permutation(index / CORNER_ORI);
		cube.set_corner_orientation(index % CORNER_ORI);
		// An odd corner permutation needs an odd edge permutation
		if cube.corner_parity() != cube.edge_parity() {
			cube.edges.swap(0, 1);
		}
		BitCube::from_cubie_unchecked(&cube)
	}
}

/// Corner twists only
pub struct CornerOrientationProjection;

impl Projection for CornerOrientationProjection {
	const KIND: ProjectionKind = ProjectionKind::CornerOrientation;
	const SIZE: usize = CORNER_ORI;

	fn index(cube: &BitCube) -> usize {
		cube.corner_orientation_coord()
	}

	fn cube(index: usize) -> BitCube {
		let mut cube = CubieCube::new();
		cube.set_corner_orientation(index);
		BitCube::from_cubie_unchecked(&cube)
	}
}

/// Edge flips only
pub struct EdgeOrientationProjection;

impl Projection for EdgeOrientationProjection {
	const KIND: ProjectionKind = ProjectionKind::EdgeOrientation;
	const SIZE: usize = EDGE_ORI;

	fn index(cube: &BitCube) -> usize {
		cube.edge_orientation_coord()
	}

	fn cube(index: usize) -> BitCube {
		let mut cube = CubieCube::new();
		cube.set_edge_orientation(index);
		BitCube::from_cubie_unchecked(&cube)
	}
}

/// Estimates the number of turns needed to solve a cube.
///
/// Implementations used with IDA* must be admissible: the estimate may
/// never exceed the real distance.
pub trait Heuristic {
	fn estimate(&self, cube: &BitCube) -> u8;
}

impl<H: Heuristic + ?Sized> Heuristic for &H {
	fn estimate(&self, cube: &BitCube) -> u8 {
		(**self).estimate(cube)
	}
}

impl<H: Heuristic + ?Sized> Heuristic for Arc<H> {
	fn estimate(&self, cube: &BitCube) -> u8 {
		(**self).estimate(cube)
	}
}

/// The larger of two admissible estimates is admissible as well.
impl<A: Heuristic, B: Heuristic> Heuristic for (A, B) {
	fn estimate(&self, cube: &BitCube) -> u8 {
		self.0.estimate(cube).max(self.1.estimate(cube))
	}
}
