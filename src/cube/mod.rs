pub mod bitcube;
pub mod cubiecube;
pub mod turn;

use strum::EnumCount;
use turn::*;

// ===== Edge Piece =====

/// All the different position names for an Edge
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, strum::EnumIter, strum::EnumCount, strum::FromRepr, strum::Display, Debug)]
#[repr(u8)]
#[rustfmt::skip]
pub enum Edge {
	#[default]
	UF, UR, UB, UL, // up edges
	DF, DR, DB, DL, // down edges
	FR, BR, BL, FL, // ud-slice (middle edges)
}

pub const NUM_EDGES: usize = Edge::COUNT;

// ===== Corner Piece =====

/// A corner piece
/// Note that the name is carefully sorted!
#[derive(
	Clone, Copy, Default, PartialEq, Eq, Hash, Debug, strum::EnumIter, strum::EnumCount, strum::FromRepr, strum::Display
)]
#[allow(clippy::upper_case_acronyms)]
#[repr(u8)]
#[rustfmt::skip]
pub enum Corner {
	#[default]
	URF, UBR, DLF, DFR, // DON'T CHANGE THE ORDER OF THE LETTERS!
	ULB, UFL, DRB, DBL,
}

pub const NUM_CORNERS: usize = Corner::COUNT;

/// It contains all the different ways a cube configuration
/// could be illegal.
/// From it, you are able to know how to fix the cube.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CubeError {
	#[error("The orientation-parity of the corners are off by +{0}")]
	CornerOrientation(usize),
	#[error("The orientation-parity of the edges are off by 1")]
	EdgeOrientation,
	#[error("The number of swaps needed is odd")]
	Permutation,
	#[error("Not all cubies are present on the cube")]
	Cubies,
	#[error("The encoded cube contains an out of range field")]
	Encoding,
}

/// The RubiksCube trait.
pub trait RubiksCube {
	fn apply_turn(&mut self, turn: Turn);

	fn apply_turns<I>(&mut self, turns: I)
	where
		I: IntoIterator<Item = Turn>,
	{
		for turn in turns {
			self.apply_turn(turn);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::{bitcube::*, cubiecube::*, turn::*, *};
	use std::error::Error;

	#[test]
	/// Both representations must agree after every single turn
	fn representations_agree() -> Result<(), Box<dyn Error>> {
		let turns = parse_turns("L B R2 U D' R D2 L U' R' B2 F U2 D L' F2")?;

		let mut bits = BitCube::new();
		let mut cubie = CubieCube::new();

		for turn in turns {
			bits.apply_turn(turn);
			cubie.apply_turn(turn);

			if CubieCube::from(bits) != cubie {
				panic!("Turn {}: BitCube is not correct!", turn);
			}
			assert_eq!(BitCube::try_from(cubie.clone())?, bits);
		}

		Ok(())
	}

	#[test]
	/// Opposite faces commute, neighbouring faces don't
	fn commuting_faces() -> Result<(), Box<dyn Error>> {
		let mut a = BitCube::new();
		a.apply_turns(parse_turns("U D'")?);
		let mut b = BitCube::new();
		b.apply_turns(parse_turns("D' U")?);
		assert_eq!(a, b);

		let mut a = BitCube::new();
		a.apply_turns(parse_turns("U R")?);
		let mut b = BitCube::new();
		b.apply_turns(parse_turns("R U")?);
		assert_ne!(a, b);

		Ok(())
	}
}
