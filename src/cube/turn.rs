use rand::Rng;
use strum::EnumCount;

/// Total number of faces you can turn
pub const NUM_FACES: usize = Face::COUNT;
/// Total number of ways to adjust your turn
pub const NUM_TURNWISES: usize = TurnWise::COUNT;
/// Size of the generator set
pub const NUM_TURNS: usize = NUM_FACES * NUM_TURNWISES;

/// The faces of a cube you can turn
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[derive(strum::EnumIter, strum::EnumCount, strum::FromRepr)]
#[repr(u8)]
pub enum Face {
	Up,
	Down,
	Back,
	Front,
	Left,
	Right,
}

/// You can either turn a side in (Counter-)Clockwise and Half turns
/// This is the enum for that
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[derive(strum::EnumIter, strum::EnumCount, strum::FromRepr)]
#[repr(u8)]
pub enum TurnWise {
	Clockwise,
	Double,
	CounterClockwise,
}

impl std::fmt::Display for TurnWise {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			TurnWise::Clockwise => write!(f, ""),
			TurnWise::CounterClockwise => write!(f, "'"),
			TurnWise::Double => write!(f, "2"),
		}
	}
}

/// An entire turn
///
/// face: The face to turn
/// wise: See the definiton of TurnWise
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Turn {
	pub face: Face,
	pub wise: TurnWise,
}

const fn generate_all_turns() -> [Turn; NUM_TURNS] {
	let mut out = [Turn { face: Face::Up, wise: TurnWise::Clockwise }; NUM_TURNS];
	let mut i = 0;
	while i < NUM_TURNS {
		// Both unwraps are unreachable, the indices stay inside the enums
		let face = match Face::from_repr((i / NUM_TURNWISES) as u8) {
			Some(face) => face,
			None => panic!(),
		};
		let wise = match TurnWise::from_repr((i % NUM_TURNWISES) as u8) {
			Some(wise) => wise,
			None => panic!(),
		};
		out[i] = Turn { face, wise };
		i += 1;
	}
	out
}

/// The 18 generators in canonical order: ALL_TURNS[t.index()] == t
pub const ALL_TURNS: [Turn; NUM_TURNS] = generate_all_turns();

impl Turn {
	pub const fn new(face: Face, wise: TurnWise) -> Self {
		Self { face, wise }
	}

	/// Position of the turn in `ALL_TURNS`
	pub const fn index(&self) -> usize {
		self.face as usize * NUM_TURNWISES + self.wise as usize
	}

	/// Turn itself to the turn, which negates itself.
	/// In terms of group theory, replace it by its inverse element.
	pub fn invert(&mut self) {
		*self = self.inverse();
	}

	/// Return the turn undoing this one
	pub const fn inverse(&self) -> Self {
		let wise = match self.wise {
			TurnWise::CounterClockwise => TurnWise::Clockwise,
			TurnWise::Clockwise => TurnWise::CounterClockwise,
			TurnWise::Double => TurnWise::Double,
		};
		Self { face: self.face, wise }
	}
}

impl std::fmt::Display for Turn {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self.face {
			Face::Up => write!(f, "U"),
			Face::Down => write!(f, "D"),
			Face::Back => write!(f, "B"),
			Face::Front => write!(f, "F"),
			Face::Left => write!(f, "L"),
			Face::Right => write!(f, "R"),
		}?;
		self.wise.fmt(f)
	}
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ParseTurnError {
	#[error("Turn string has invalid size: \"{0}\"")]
	Length(String),
	#[error("Turn string has an invalid face character: \"{0}\"")]
	Face(String),
	#[error("Turn string has an invalid suffix: \"{0}\"")]
	Wise(String),
}

impl std::str::FromStr for Turn {
	type Err = ParseTurnError;

	fn from_str(item: &str) -> Result<Self, Self::Err> {
		let mut chars = item.chars();

		let face = match chars.next() {
			Some('U') => Face::Up,
			Some('D') => Face::Down,
			Some('B') => Face::Back,
			Some('F') => Face::Front,
			Some('L') => Face::Left,
			Some('R') => Face::Right,
			Some(_) => return Err(ParseTurnError::Face(item.to_owned())),
			None => return Err(ParseTurnError::Length(item.to_owned())),
		};

		let wise = match chars.next() {
			None => TurnWise::Clockwise,
			Some('\'') => TurnWise::CounterClockwise,
			Some('2') => TurnWise::Double,
			Some(_) => return Err(ParseTurnError::Wise(item.to_owned())),
		};

		if chars.next().is_some() {
			return Err(ParseTurnError::Length(item.to_owned()));
		}

		Ok(Self { face, wise })
	}
}

/// Parse a whitespace separated sequence like "R U R' U'"
pub fn parse_turns(string: &str) -> Result<Vec<Turn>, ParseTurnError> {
	string.split_whitespace().map(str::parse).collect()
}

/// Format a sequence the way `parse_turns` reads it
pub fn format_turns(turns: &[Turn]) -> String {
	turns
		.iter()
		.map(Turn::to_string)
		.collect::<Vec<_>>()
		.join(" ")
}

/// Generate `n` turns drawn uniformly from the generator set.
pub fn random_sequence(n: usize) -> Vec<Turn> {
	random_sequence_with(&mut rand::thread_rng(), n)
}

/// Same as `random_sequence`, with a caller supplied source of randomness.
pub fn random_sequence_with<R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<Turn> {
	(0..n)
		.map(|_| ALL_TURNS[rng.gen_range(0..NUM_TURNS)])
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashSet;

	#[test]
	/// The notation must have exactly one distinct token for every turn
	fn notation_tokens() {
		let tokens: HashSet<String> = ALL_TURNS.iter().map(Turn::to_string).collect();
		assert_eq!(tokens.len(), NUM_TURNS);

		for (i, turn) in ALL_TURNS.iter().enumerate() {
			assert_eq!(turn.index(), i);
			assert_eq!(turn.to_string().parse::<Turn>(), Ok(*turn));
		}
	}

	#[test]
	fn invalid_tokens() {
		assert!(matches!("X".parse::<Turn>(), Err(ParseTurnError::Face(_))));
		assert!(matches!("R3".parse::<Turn>(), Err(ParseTurnError::Wise(_))));
		assert!(matches!("R2'".parse::<Turn>(), Err(ParseTurnError::Length(_))));
		assert!(parse_turns("R U X").is_err());
		assert_eq!(parse_turns("  ").unwrap(), vec![]);
	}

	#[test]
	fn inverses() {
		let turns = parse_turns("R U2 F'").unwrap();
		let inverted: Vec<_> = turns.iter().map(Turn::inverse).collect();
		assert_eq!(format_turns(&inverted), "R' U2 F");

		let mut turn = turns[0];
		turn.invert();
		turn.invert();
		assert_eq!(turn, turns[0]);
	}
}
