use std::{
	fs::File,
	io::{BufReader, BufWriter, Write},
	marker::PhantomData,
	path::Path,
};

use bit_set::BitSet;
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{Heuristic, Projection, ProjectionKind};
use crate::cube::{bitcube::BitCube, cubiecube::*, turn::*};

/// Marks an entry no search has reached (yet)
const UNASSIGNED: u8 = 0xF;
/// Deepest level stored, so that `limit + 1` still fits below `UNASSIGNED`
const MAX_DEPTH: u8 = UNASSIGNED - 2;
/// Number of frontier states expanded per parallel batch
const BATCH: usize = 1 << 16;

const MAGIC: [u8; 4] = *b"RPDB";
const FORMAT_VERSION: u32 = 1;

#[derive(thiserror::Error, Debug)]
pub enum DatabaseError {
	#[error("Could not access the pattern database: {0}")]
	Io(#[from] std::io::Error),
	#[error("The pattern database file is truncated")]
	Truncated,
	#[error("The pattern database file is corrupt: {0}")]
	Decode(#[source] bincode::Error),
	#[error("Could not encode the pattern database: {0}")]
	Encode(#[source] bincode::Error),
	#[error("The file is not a pattern database")]
	Magic,
	#[error("The pattern database has format version {found}, expected {expected}")]
	Version { found: u32, expected: u32 },
	#[error("The pattern database is for the {found} projection, expected {expected}")]
	Projection {
		found: ProjectionKind,
		expected: ProjectionKind,
	},
	#[error("The pattern database was built with different move tables")]
	MoveSet,
	#[error("The pattern database has {found} entries, expected {expected}")]
	Size { found: u64, expected: u64 },
	#[error("The pattern database is corrupt: {0}")]
	Corrupt(&'static str),
}

fn decode_error(err: bincode::Error) -> DatabaseError {
	let eof = matches!(
		&*err,
		bincode::ErrorKind::Io(io) if io.kind() == std::io::ErrorKind::UnexpectedEof
	);
	if eof {
		DatabaseError::Truncated
	} else {
		DatabaseError::Decode(err)
	}
}

/// FNV-1a over the turn tables. A database is only valid for the exact
/// generators it was built with.
pub fn move_set_fingerprint() -> u64 {
	const PRIME: u64 = 0x100000001b3;
	let mut hash: u64 = 0xcbf29ce484222325;
	let mut feed = |byte: u8| {
		hash ^= byte as u64;
		hash = hash.wrapping_mul(PRIME);
	};

	for turn in ALL_TURNS {
		for (c, o) in CORNER_TRANSFORM[turn.face as usize][turn.wise as usize] {
			feed(c as u8);
			feed(o);
		}
		for (e, o) in EDGE_TRANSFORM[turn.face as usize][turn.wise as usize] {
			feed(e as u8);
			feed(o);
		}
	}

	hash
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
struct Header {
	magic: [u8; 4],
	version: u32,
	projection: ProjectionKind,
	move_set: u64,
	entries: u64,
	depth_limit: Option<u8>,
	complete: bool,
}

/// 4 bit entries, two per byte
#[derive(Clone, PartialEq, Eq)]
struct NibbleTable {
	data: Vec<u8>,
	len: usize,
}

impl NibbleTable {
	fn new(len: usize, fill: u8) -> Self {
		Self {
			data: vec![fill | fill << 4; len.div_ceil(2)],
			len,
		}
	}

	fn get(&self, idx: usize) -> u8 {
		(self.data[idx >> 1] >> ((idx & 1) * 4)) & 0xF
	}

	fn set(&mut self, idx: usize, value: u8) {
		let shift = (idx & 1) * 4;
		let byte = &mut self.data[idx >> 1];
		*byte = (*byte & !(0xF << shift)) | (value & 0xF) << shift;
	}

	fn iter(&self) -> impl Iterator<Item = u8> + '_ {
		(0..self.len).map(|i| self.get(i))
	}
}

/// Exact distances of every projected state to the solved projection.
///
/// Built once by a breadth first search, read only afterwards. Share it by
/// reference or `Arc` between any number of searches.
pub struct PatternDatabase<P: Projection> {
	table: NibbleTable,
	depth_limit: Option<u8>,
	complete: bool,
	projection: PhantomData<P>,
}

impl<P: Projection> PatternDatabase<P> {
	/// Enumerate the whole projection space.
	pub fn generate() -> Self {
		Self::generate_with_limit(None)
	}

	/// Breadth first search from the solved projection.
	///
	/// Every index gets the depth it was first discovered at. When the
	/// search is stopped by `limit`, all unreached entries get `limit + 1`,
	/// which is still a lower bound for them.
	pub fn generate_with_limit(limit: Option<u8>) -> Self {
		let cap = limit.unwrap_or(MAX_DEPTH).min(MAX_DEPTH);
		info!("Generating the {} pattern database ({} entries)", P::KIND, P::SIZE);

		let mut table = NibbleTable::new(P::SIZE, UNASSIGNED);
		let mut seen = BitSet::with_capacity(P::SIZE);

		let root = P::index(&BitCube::new());
		table.set(root, 0);
		seen.insert(root);

		let mut frontier = vec![root as u32];
		let mut depth = 0;
		let mut discovered = 1;
		let mut truncated = false;

		while !frontier.is_empty() {
			if depth == cap {
				truncated = true;
				break;
			}
			depth += 1;

			let mut next = Vec::new();
			for batch in frontier.chunks(BATCH) {
				let children: Vec<u32> = batch
					.par_iter()
					.flat_map_iter(|&idx| {
						let cube = P::cube(idx as usize);
						ALL_TURNS
							.iter()
							.map(move |turn| P::index(&cube.turned(*turn)) as u32)
					})
					.collect();

				// First discovery wins
				for child in children {
					if seen.insert(child as usize) {
						table.set(child as usize, depth);
						next.push(child);
					}
				}
			}

			discovered += next.len();
			info!(
				"Depth {:>2}: {:>10} new states, {:>10} total",
				depth,
				next.len(),
				discovered
			);
			frontier = next;
		}

		let missing = P::SIZE - discovered;
		let depth_limit = if truncated && missing > 0 {
			debug!("Filling {} unreached entries with {}", missing, cap + 1);
			for idx in 0..P::SIZE {
				if !seen.contains(idx) {
					table.set(idx, cap + 1);
				}
			}
			Some(cap)
		} else {
			None
		};

		Self {
			table,
			depth_limit,
			complete: missing == 0 && depth_limit.is_none(),
			projection: PhantomData,
		}
	}

	/// The stored distance, None if the index was never reached
	pub fn lookup(&self, index: usize) -> Option<u8> {
		match self.table.get(index) {
			UNASSIGNED => None,
			value => Some(value),
		}
	}

	pub fn len(&self) -> usize {
		self.table.len
	}

	pub fn is_empty(&self) -> bool {
		self.table.len == 0
	}

	/// Whether every entry holds its exact distance
	pub fn is_complete(&self) -> bool {
		self.complete
	}

	/// The depth generation stopped at, if any
	pub fn depth_limit(&self) -> Option<u8> {
		self.depth_limit
	}

	/// Number of entries without a value
	pub fn unassigned(&self) -> usize {
		self.table.iter().filter(|&v| v == UNASSIGNED).count()
	}

	pub fn max_distance(&self) -> u8 {
		self.table
			.iter()
			.filter(|&v| v != UNASSIGNED)
			.max()
			.unwrap_or(0)
	}

	/// out[d] is the number of entries with distance d
	pub fn distribution(&self) -> Vec<usize> {
		let mut out = vec![0; self.max_distance() as usize + 1];
		for v in self.table.iter().filter(|&v| v != UNASSIGNED) {
			out[v as usize] += 1;
		}
		out
	}

	fn header(&self) -> Header {
		Header {
			magic: MAGIC,
			version: FORMAT_VERSION,
			projection: P::KIND,
			move_set: move_set_fingerprint(),
			entries: self.table.len as u64,
			depth_limit: self.depth_limit,
			complete: self.complete,
		}
	}

	pub fn save<T: AsRef<Path>>(&self, path: T) -> Result<(), DatabaseError> {
		let mut writer = BufWriter::new(File::create(path.as_ref())?);
		bincode::serialize_into(&mut writer, &self.header()).map_err(DatabaseError::Encode)?;
		bincode::serialize_into(&mut writer, &self.table.data).map_err(DatabaseError::Encode)?;
		writer.flush()?;

		info!("Saved the {} pattern database to {}", P::KIND, path.as_ref().display());
		Ok(())
	}

	/// Load a database written by `save`.
	///
	/// Fails unless the file holds a database for this projection built
	/// with the current turn tables.
	pub fn load<T: AsRef<Path>>(path: T) -> Result<Self, DatabaseError> {
		let mut reader = BufReader::new(File::open(path.as_ref())?);

		let header: Header = bincode::deserialize_from(&mut reader).map_err(decode_error)?;
		if header.magic != MAGIC {
			return Err(DatabaseError::Magic);
		}
		if header.version != FORMAT_VERSION {
			return Err(DatabaseError::Version {
				found: header.version,
				expected: FORMAT_VERSION,
			});
		}
		if header.projection != P::KIND {
			return Err(DatabaseError::Projection {
				found: header.projection,
				expected: P::KIND,
			});
		}
		if header.move_set != move_set_fingerprint() {
			return Err(DatabaseError::MoveSet);
		}
		if header.entries != P::SIZE as u64 {
			return Err(DatabaseError::Size {
				found: header.entries,
				expected: P::SIZE as u64,
			});
		}

		let data: Vec<u8> = bincode::deserialize_from(&mut reader).map_err(decode_error)?;
		if data.len() != P::SIZE.div_ceil(2) {
			return Err(DatabaseError::Size {
				found: data.len() as u64 * 2,
				expected: P::SIZE as u64,
			});
		}

		let db = Self {
			table: NibbleTable { data, len: P::SIZE },
			depth_limit: header.depth_limit,
			complete: header.complete,
			projection: PhantomData,
		};
		db.check_contents()?;

		info!("Loaded the {} pattern database from {}", P::KIND, path.as_ref().display());
		Ok(db)
	}

	/// The values have to look like the outcome of `generate_with_limit`
	fn check_contents(&self) -> Result<(), DatabaseError> {
		if self.lookup(P::index(&BitCube::new())) != Some(0) {
			return Err(DatabaseError::Corrupt("the solved state is not at distance 0"));
		}

		let highest = match self.depth_limit {
			Some(limit) if limit > MAX_DEPTH => {
				return Err(DatabaseError::Corrupt("the depth limit is out of range"));
			}
			Some(_) if self.complete => {
				return Err(DatabaseError::Corrupt("a depth limited database can't be complete"));
			}
			Some(limit) => limit + 1,
			None => MAX_DEPTH,
		};
		// Only an unlimited search which ran dry may leave entries behind
		let gaps_allowed = !self.complete && self.depth_limit.is_none();

		for value in self.table.iter() {
			if value == UNASSIGNED {
				if !gaps_allowed {
					return Err(DatabaseError::Corrupt("an entry has no distance"));
				}
			} else if value > highest {
				return Err(DatabaseError::Corrupt("an entry is deeper than the search went"));
			}
		}

		Ok(())
	}
}

impl<P: Projection> Heuristic for PatternDatabase<P> {
	fn estimate(&self, cube: &BitCube) -> u8 {
		// Every index of the shipped projections is reachable, an
		// unassigned entry would only be a (still admissible) zero.
		self.lookup(P::index(cube)).unwrap_or(0)
	}
}
