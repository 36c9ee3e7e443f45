use rand::Rng;
use rust_decimal::Decimal;

use super::count_table::CountTable;
use super::stats::ratio;
use super::EntryId;
use crate::error::{PredictionError, Result};

/// Counts of the words observed immediately after one word.
///
/// Conceptually, this is the set of outgoing edges of a node in a Markov
/// chain, each edge weighted by its number of observations.
///
/// ## Responsibilities:
/// - Accumulate successor occurrences during training
/// - Rank successors deterministically (count descending, first seen first)
/// - Derive probabilities and weighted random picks from the counts
///
/// ## Invariants
/// - Each successor occurrence count is strictly positive
/// - The sum of all counts is the owning word's absolute frequency
#[derive(Clone, Debug, Default)]
pub struct SuccessorCounts {
	/// Successor entry => number of observations, in first-seen order.
	/// Example: { cat => 42, dog => 3 }
	counts: CountTable<EntryId>,
}

impl SuccessorCounts {
	/// Records one occurrence of `successor`.
	///
	/// - If the successor already exists, its occurrence count is increased.
	/// - Otherwise, a new successor is created with an initial count of 1.
	///
	/// Invalidates any memoized ranking.
	pub fn record(&mut self, successor: EntryId) {
		self.counts.add(successor, 1);
	}

	/// Records `occurrences` observations at once (loading, merging).
	pub(crate) fn record_many(&mut self, successor: EntryId, occurrences: u64) {
		self.counts.add(successor, occurrences);
	}

	pub fn contains(&self, successor: EntryId) -> bool {
		self.counts.contains(&successor)
	}

	/// Returns how many times `successor` followed the word, 0 if never.
	pub fn frequency_of(&self, successor: EntryId) -> u64 {
		self.counts.get(&successor)
	}

	/// Number of distinct successors.
	pub fn distinct_count(&self) -> usize {
		self.counts.len()
	}

	/// Sum of all successor counts.
	pub fn total(&self) -> u64 {
		self.counts.total()
	}

	pub fn is_empty(&self) -> bool {
		self.counts.is_empty()
	}

	/// Returns `true` while a memoized ranking is valid.
	pub fn is_ordered(&self) -> bool {
		self.counts.is_ordered()
	}

	/// Iterates successors in first-seen order.
	pub fn iter(&self) -> impl Iterator<Item = (EntryId, u64)> + '_ {
		self.counts.iter().map(|(successor, count)| (*successor, count))
	}

	/// Returns every successor with its count, most frequent first.
	///
	/// Ties keep first-seen order. Calling this never mutates the counts.
	pub fn ranked_descending(&self) -> Vec<(EntryId, u64)> {
		self.counts
			.ranked()
			.into_iter()
			.map(|(successor, count)| (*successor, count))
			.collect()
	}

	/// Returns the most frequent successor.
	///
	/// # Errors
	/// Returns `EmptyModel` if no successor was ever recorded.
	pub fn most_likely(&self) -> Result<EntryId> {
		self.ranked_descending()
			.first()
			.map(|(successor, _)| *successor)
			.ok_or_else(|| PredictionError::EmptyModel("no successors recorded".to_owned()))
	}

	/// Returns up to `n` successors, most frequent first.
	pub fn top_n(&self, n: usize) -> Vec<EntryId> {
		self.ranked_descending()
			.into_iter()
			.take(n)
			.map(|(successor, _)| successor)
			.collect()
	}

	/// Returns each successor's share of the total, in ranking order.
	///
	/// The fractions sum to 1 (within decimal rounding) whenever at least
	/// one successor exists; the result is empty otherwise.
	pub fn as_probability_map(&self) -> Vec<(EntryId, Decimal)> {
		let total = self.total();
		self.ranked_descending()
			.into_iter()
			.map(|(successor, count)| (successor, ratio(count, total)))
			.collect()
	}

	/// Picks a successor using weighted random sampling.
	///
	/// The probability of selecting a successor is proportional to its
	/// occurrence count. Successors are scanned in first-seen order, so a
	/// seeded `rng` always yields the same pick.
	///
	/// Returns `None` if no successor was recorded.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<EntryId> {
		let total = self.total();
		if total == 0 {
			return None;
		}

		let mut r = rng.random_range(0..total);
		for (successor, occurrences) in self.iter() {
			if r < occurrences {
				return Some(successor);
			}
			r -= occurrences;
		}
		None
	}

	/// Memoizes the ranking until the next mutation.
	pub(crate) fn order(&mut self) {
		self.counts.order();
	}
}
