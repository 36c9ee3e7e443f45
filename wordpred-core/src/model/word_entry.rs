use log::trace;
use rust_decimal::Decimal;

use super::context::ContextKey;
use super::count_table::CountTable;
use super::stats::{deviation, dispersion, fixed, ratio};
use super::successor_counts::SuccessorCounts;
use super::token::Token;
use super::vocabulary::VocabularyModel;
use super::EntryId;
use crate::error::Result;

/// One vocabulary entry.
///
/// A `WordEntry` stores everything observed about a single token:
/// the words that followed it and the exact sentence prefixes that led to it.
///
/// # Responsibilities
/// - Count successors (`SuccessorCounts`)
/// - Count preceding contexts, keyed by exact word sequence
/// - Answer per-word suggestions and statistics
///
/// # Invariants
/// - `value` is never blank
/// - Every `EntryId` held in `successors` or `contexts` belongs to the same
///   vocabulary as this entry
#[derive(Clone, Debug)]
pub struct WordEntry {
	id: EntryId,
	value: Token,
	successors: SuccessorCounts,
	/// Words preceding this one since sentence start => occurrences.
	contexts: CountTable<ContextKey>,
}

impl WordEntry {
	pub(crate) fn new(id: EntryId, value: Token) -> Self {
		Self {
			id,
			value,
			successors: SuccessorCounts::default(),
			contexts: CountTable::default(),
		}
	}

	pub fn id(&self) -> EntryId {
		self.id
	}

	/// Returns the normalized word.
	pub fn value(&self) -> &str {
		self.value.as_str()
	}

	pub fn token(&self) -> &Token {
		&self.value
	}

	pub fn successors(&self) -> &SuccessorCounts {
		&self.successors
	}

	pub fn distinct_successor_count(&self) -> usize {
		self.successors.distinct_count()
	}

	/// Number of times this word was observed with a recorded successor.
	pub fn absolute_frequency(&self) -> u64 {
		self.successors.total()
	}

	/// Increments the count of the exact preceding sequence `context`.
	pub(crate) fn add_preceding_context(&mut self, context: ContextKey) {
		self.contexts.add(context, 1);
	}

	pub(crate) fn add_context_occurrences(&mut self, context: ContextKey, occurrences: u64) {
		self.contexts.add(context, occurrences);
	}

	/// Returns how many times this word followed exactly `context`.
	pub fn context_count(&self, context: &ContextKey) -> u64 {
		self.contexts.get(context)
	}

	/// Number of distinct preceding contexts.
	pub fn distinct_context_count(&self) -> usize {
		self.contexts.len()
	}

	/// Returns every preceding context with its count, most frequent first.
	pub fn ranked_contexts(&self) -> Vec<(&ContextKey, u64)> {
		self.contexts.ranked()
	}

	pub(crate) fn add_successor(&mut self, successor: EntryId) {
		self.successors.record(successor);
	}

	pub(crate) fn add_successor_occurrences(&mut self, successor: EntryId, occurrences: u64) {
		self.successors.record_many(successor, occurrences);
	}

	/// Returns the most frequent successor.
	///
	/// # Errors
	/// Returns `EmptyModel` if nothing ever followed this word.
	pub fn suggest_next(&self) -> Result<EntryId> {
		self.successors.most_likely()
	}

	/// Context-aware variant of [`suggest_next`](Self::suggest_next).
	///
	/// Contexts are recorded for statistics and persistence only; they do not
	/// narrow the successors. This always falls back to the unconditional
	/// suggestion.
	pub fn suggest_next_after(&self, previous: &str) -> Result<EntryId> {
		trace!("'{}' after '{}': context ignored, using unconditional ranking", self.value, previous);
		self.suggest_next()
	}

	/// Returns up to `n` successors, most frequent first.
	pub fn suggest_top_n(&self, n: usize) -> Vec<EntryId> {
		self.successors.top_n(n)
	}

	/// Context-aware variant of [`suggest_top_n`](Self::suggest_top_n).
	///
	/// Falls back to the unconditional ranking, see
	/// [`suggest_next_after`](Self::suggest_next_after).
	pub fn suggest_top_n_after(&self, previous: &str, n: usize) -> Vec<EntryId> {
		trace!("'{}' after '{}': context ignored, using unconditional ranking", self.value, previous);
		self.suggest_top_n(n)
	}

	/// Conditional probability that `next` follows this word, 0 if never seen.
	pub fn probability_of(&self, next: EntryId) -> Decimal {
		ratio(self.successors.frequency_of(next), self.absolute_frequency())
	}

	/// Dispersion of the successor counts.
	///
	/// mean = total / distinct successors, variance = Σ(count - mean)² / mean.
	/// Returns 0 without successors.
	pub fn variance(&self) -> Decimal {
		dispersion(
			self.successors.iter().map(|(_, count)| count),
			self.absolute_frequency(),
			self.distinct_successor_count(),
		)
	}

	pub fn standard_deviation(&self) -> Decimal {
		deviation(self.variance())
	}

	pub(crate) fn order(&mut self) {
		self.successors.order();
		self.contexts.order();
	}
}

/// A `WordEntry` borrowed together with the vocabulary that owns it.
///
/// The vocabulary reference is read-only: it resolves successor ids back
/// to words and provides the vocabulary size for ratios.
#[derive(Clone, Copy, Debug)]
pub struct WordView<'a> {
	model: &'a VocabularyModel,
	entry: &'a WordEntry,
}

impl<'a> WordView<'a> {
	pub(crate) fn new(model: &'a VocabularyModel, entry: &'a WordEntry) -> Self {
		Self { model, entry }
	}

	pub fn entry(&self) -> &'a WordEntry {
		self.entry
	}

	pub fn value(&self) -> &'a str {
		self.entry.value()
	}

	pub fn absolute_frequency(&self) -> u64 {
		self.entry.absolute_frequency()
	}

	pub fn distinct_successor_count(&self) -> usize {
		self.entry.distinct_successor_count()
	}

	pub fn suggest_next(&self) -> Result<&'a str> {
		self.entry.suggest_next().map(|id| self.word(id))
	}

	pub fn suggest_next_after(&self, previous: &str) -> Result<&'a str> {
		self.entry.suggest_next_after(previous).map(|id| self.word(id))
	}

	pub fn suggest_top_n(&self, n: usize) -> Vec<&'a str> {
		self.words(self.entry.suggest_top_n(n))
	}

	pub fn suggest_top_n_after(&self, previous: &str, n: usize) -> Vec<&'a str> {
		self.words(self.entry.suggest_top_n_after(previous, n))
	}

	/// Returns how many times `next` followed this word, 0 if unknown.
	pub fn frequency_of(&self, next: &str) -> u64 {
		self.model
			.lookup(next)
			.map_or(0, |id| self.entry.successors().frequency_of(id))
	}

	/// Conditional probability that `next` follows this word.
	pub fn probability_of(&self, next: &str) -> Decimal {
		self.model
			.lookup(next)
			.map_or(Decimal::ZERO, |id| self.entry.probability_of(id))
	}

	/// Successors with their counts, most frequent first.
	pub fn successors(&self) -> Vec<(&'a str, u64)> {
		self.entry
			.successors()
			.ranked_descending()
			.into_iter()
			.map(|(id, count)| (self.word(id), count))
			.collect()
	}

	/// Successors with their conditional probabilities, most frequent first.
	pub fn probability_map(&self) -> Vec<(&'a str, Decimal)> {
		self.entry
			.successors()
			.as_probability_map()
			.into_iter()
			.map(|(id, probability)| (self.word(id), probability))
			.collect()
	}

	/// Preceding contexts as word sequences, most frequent first.
	pub fn contexts(&self) -> Vec<(Vec<&'a str>, u64)> {
		self.entry
			.ranked_contexts()
			.into_iter()
			.map(|(context, count)| (self.words(context.entries().iter().copied()), count))
			.collect()
	}

	pub fn variance(&self) -> Decimal {
		self.entry.variance()
	}

	pub fn standard_deviation(&self) -> Decimal {
		self.entry.standard_deviation()
	}

	/// Display lines for this entry.
	///
	/// Example: `["THE" \t - \t 2/5 (0.40000)]`, i.e. the word, its absolute
	/// frequency over the vocabulary size, and that ratio to 5 decimals.
	pub fn render(&self) -> Vec<String> {
		let occurrences = self.absolute_frequency();
		let unique_words = self.model.unique_word_count() as u64;
		let prevalence = fixed(ratio(occurrences, unique_words), 5);

		vec![format!(
			"[\"{}\" \t - \t {}/{} ({})]",
			self.value().to_uppercase(),
			occurrences,
			unique_words,
			prevalence
		)]
	}

	fn word(&self, id: EntryId) -> &'a str {
		self.model.entry(id).value()
	}

	fn words<I: IntoIterator<Item = EntryId>>(&self, ids: I) -> Vec<&'a str> {
		ids.into_iter().map(|id| self.word(id)).collect()
	}
}
