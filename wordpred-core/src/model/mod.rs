//! Top-level module for the word-succession model.
//!
//! This module provides:
//! - Normalized tokens and sentence sentinels (`Token`)
//! - Per-word successor counts with deterministic ranking (`SuccessorCounts`)
//! - Vocabulary entries with their preceding contexts (`WordEntry`)
//! - The vocabulary owning every entry (`VocabularyModel`)

use serde::{Deserialize, Serialize};

/// Case-insensitive token identity and sentence sentinels.
pub mod token;

/// Ordered sequences of preceding words used as context keys.
pub mod context;

/// Counts of words observed right after a given word.
///
/// Supports ranking, top-n selection, probabilities and weighted sampling.
pub mod successor_counts;

/// One vocabulary entry: successors, contexts and per-word statistics.
pub mod word_entry;

/// The vocabulary owning all entries.
///
/// Handles training, lookup, global statistics, ordering and merging.
pub mod vocabulary;

/// Insertion-ordered count table with a memoized ranking.
///
/// This module is not exposed publicly.
mod count_table;

/// Decimal dispersion helpers shared by entries and the vocabulary.
///
/// This module is not exposed publicly.
mod stats;

/// Index of a `WordEntry` inside the vocabulary that owns it.
///
/// Ids are assigned in creation order and never reused; entries are never
/// deleted, so an id stays valid for the lifetime of its model.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub(crate) usize);

impl EntryId {
	/// Returns the raw arena index.
	pub fn index(self) -> usize {
		self.0
	}
}
