use std::collections::HashMap;
use std::hash::Hash;

/// Occurrence counts keyed by `K`, remembering first-seen order.
///
/// Ranking sorts by count descending; ties keep first-seen order, which makes
/// it a total and deterministic order. The ranking can always be derived
/// without mutation, and `order` memoizes it until the next `add`.
///
/// # Invariants
/// - Every stored count is >= 1
/// - `total` equals the sum of all counts
/// - `ranking` is only meaningful while `is_ordered` is set
#[derive(Clone, Debug)]
pub(crate) struct CountTable<K> {
	/// Counts in first-seen order.
	tallies: Vec<(K, u64)>,
	/// Position of each key in `tallies`.
	positions: HashMap<K, usize>,
	total: u64,
	/// Indices into `tallies`, best first.
	ranking: Vec<usize>,
	is_ordered: bool,
}

impl<K> Default for CountTable<K> {
	fn default() -> Self {
		Self {
			tallies: Vec::new(),
			positions: HashMap::new(),
			total: 0,
			ranking: Vec::new(),
			is_ordered: false,
		}
	}
}

impl<K: Clone + Eq + Hash> CountTable<K> {
	/// Adds `occurrences` to the count of `key`, creating it if needed.
	///
	/// Adding zero occurrences is a no-op so counts stay positive.
	pub(crate) fn add(&mut self, key: K, occurrences: u64) {
		if occurrences == 0 {
			return;
		}
		match self.positions.get(&key) {
			Some(&position) => self.tallies[position].1 += occurrences,
			None => {
				self.positions.insert(key.clone(), self.tallies.len());
				self.tallies.push((key, occurrences));
			}
		}
		self.total += occurrences;
		self.is_ordered = false;
	}

	pub(crate) fn get(&self, key: &K) -> u64 {
		self.positions.get(key).map_or(0, |&position| self.tallies[position].1)
	}

	pub(crate) fn contains(&self, key: &K) -> bool {
		self.positions.contains_key(key)
	}

	/// Number of distinct keys.
	pub(crate) fn len(&self) -> usize {
		self.tallies.len()
	}

	pub(crate) fn is_empty(&self) -> bool {
		self.tallies.is_empty()
	}

	/// Sum of all counts.
	pub(crate) fn total(&self) -> u64 {
		self.total
	}

	pub(crate) fn is_ordered(&self) -> bool {
		self.is_ordered
	}

	/// Iterates counts in first-seen order.
	pub(crate) fn iter(&self) -> impl Iterator<Item = (&K, u64)> {
		self.tallies.iter().map(|(key, count)| (key, *count))
	}

	/// Returns all counts, highest first.
	pub(crate) fn ranked(&self) -> Vec<(&K, u64)> {
		let ranking;
		let indices = if self.is_ordered {
			&self.ranking
		} else {
			ranking = self.compute_ranking();
			&ranking
		};
		indices
			.iter()
			.map(|&position| {
				let (key, count) = &self.tallies[position];
				(key, *count)
			})
			.collect()
	}

	/// Memoizes the ranking until the next mutation.
	pub(crate) fn order(&mut self) {
		if !self.is_ordered {
			self.ranking = self.compute_ranking();
			self.is_ordered = true;
		}
	}

	fn compute_ranking(&self) -> Vec<usize> {
		let mut indices: Vec<usize> = (0..self.tallies.len()).collect();
		// Stable: equal counts stay in first-seen order
		indices.sort_by(|&a, &b| self.tallies[b].1.cmp(&self.tallies[a].1));
		indices
	}
}
