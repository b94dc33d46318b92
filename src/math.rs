//! Permutation ranking helpers used by the cube coordinates.
//!
//! Everything here works on fixed arrays so it can run inside the search
//! loops without allocating.

use const_for::const_for;

const fn factorial_list<const N: usize>() -> [usize; N] {
	let mut out = [1; N];
	const_for!(i in 1..N => { out[i] = out[i-1] * i; });
	out
}

/// FACTORIAL[i] = i!
pub const FACTORIAL: [usize; 13] = factorial_list::<13>();

/// Return the lexicographic rank of `perm`, a permutation of `0..perm.len()`.
pub fn map_permutation(perm: &[usize]) -> usize {
	#[cfg(debug_assertions)]
	assert!(perm.len() < FACTORIAL.len());

	let n = perm.len();
	let mut rank = 0;
	for i in 0..n {
		let smaller = perm[i + 1..].iter().filter(|&&p| p < perm[i]).count();
		rank += smaller * FACTORIAL[n - 1 - i];
	}
	rank
}

/// Inverse of [`map_permutation`]: the k-th permutation of `0..N`.
pub fn get_kth_perm<const N: usize>(k: usize) -> [usize; N] {
	#[cfg(debug_assertions)]
	assert!(k < FACTORIAL[N]);

	let mut left: [usize; N] = [0; N];
	for (i, v) in left.iter_mut().enumerate() {
		*v = i;
	}

	let mut out = [0; N];
	let mut k = k;
	for i in 0..N {
		let f = FACTORIAL[N - 1 - i];
		let pick = k / f;
		k %= f;

		out[i] = left[pick];
		// Close the gap, only the first N-i entries are still live
		for j in pick..(N - 1 - i) {
			left[j] = left[j + 1];
		}
	}
	out
}

/// Permute `items` by the k-th permutation.
pub fn permute_array<T: Copy, const N: usize>(items: [T; N], k: usize) -> [T; N] {
	let perm = get_kth_perm::<N>(k);
	let mut out = items;
	for (slot, p) in out.iter_mut().zip(perm) {
		*slot = items[p];
	}
	out
}

/// Number of inversions of `perm` modulo 2
pub fn permutation_parity(perm: &[usize]) -> usize {
	let mut parity = 0;
	for i in 0..perm.len() {
		for j in (i + 1)..perm.len() {
			parity ^= (perm[i] > perm[j]) as usize;
		}
	}
	parity
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	/// Ranking and unranking have to be inverse to each other
	fn rank_unrank() {
		for k in 0..FACTORIAL[5] {
			let perm = get_kth_perm::<5>(k);
			assert_eq!(map_permutation(&perm), k);
		}

		assert_eq!(get_kth_perm::<4>(0), [0, 1, 2, 3]);
		assert_eq!(get_kth_perm::<4>(FACTORIAL[4] - 1), [3, 2, 1, 0]);
	}

	#[test]
	fn parity() {
		assert_eq!(permutation_parity(&[0, 1, 2, 3]), 0);
		assert_eq!(permutation_parity(&[1, 0, 2, 3]), 1);
		// A 4-cycle is odd
		assert_eq!(permutation_parity(&[1, 2, 3, 0]), 1);
		assert_eq!(permutation_parity(&[1, 2, 0, 3]), 0);
	}
}
