use std::collections::HashMap;
use std::iter;

use log::{debug, info};
use rand::Rng;
use rust_decimal::Decimal;

use super::context::ContextKey;
use super::stats::{deviation, dispersion, fixed, ratio, sums_to_one};
use super::token::{END_TOKEN, START_TOKEN, Token};
use super::word_entry::{WordEntry, WordView};
use super::EntryId;
use crate::config::ModelConfig;
use crate::error::{PredictionError, Result};
use crate::tokenizer::Tokenizer;

/// The whole word-succession model.
///
/// `VocabularyModel` owns every `WordEntry`, keyed by normalized token text,
/// and orchestrates training, lookup, global statistics and ordering.
///
/// # Responsibilities
/// - Build entries from tokenized sentences framed by `{{start}}`/`{{end}}`
/// - Answer suggestion and probability queries for arbitrary input
/// - Rank entries by absolute frequency, memoized behind `is_ordered`
/// - Merge with another model
///
/// # Invariants
/// - A token appears at most once; blank tokens are never keys
/// - Every id reachable from any entry's successors or contexts is an entry
///   of this same model
/// - Entries are never removed, the model only grows
/// - `total_sample_size` is the sum of every entry's absolute frequency
#[derive(Clone, Debug, Default)]
pub struct VocabularyModel {
	/// Arena of entries, indexed by `EntryId`.
	entries: Vec<WordEntry>,
	/// Normalized token => entry id.
	index: HashMap<Token, EntryId>,
	/// Entries by absolute frequency, valid while `is_ordered` is set.
	ordering: Vec<EntryId>,
	is_ordered: bool,
	config: ModelConfig,
}

impl VocabularyModel {
	/// Creates an empty model with the default configuration.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty model with the given configuration.
	pub fn with_config(config: ModelConfig) -> Self {
		Self { config, ..Self::default() }
	}

	pub fn config(&self) -> &ModelConfig {
		&self.config
	}

	pub fn set_config(&mut self, config: ModelConfig) {
		self.config = config;
	}

	/// Number of distinct entries, sentinels included.
	pub fn unique_word_count(&self) -> usize {
		self.entries.len()
	}

	/// Sum of every entry's absolute frequency.
	pub fn total_sample_size(&self) -> u64 {
		self.entries.iter().map(WordEntry::absolute_frequency).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns `true` while the memoized ordering is valid.
	pub fn is_ordered(&self) -> bool {
		self.is_ordered
	}

	// --- Training ---

	/// Trains the model on a sequence of tokenized sentences.
	///
	/// See [`train_sentence`](Self::train_sentence) for the per-sentence walk.
	pub fn train<S, I, W>(&mut self, sentences: S)
	where
		S: IntoIterator<Item = I>,
		I: IntoIterator<Item = W>,
		W: AsRef<str>,
	{
		let mut trained = 0usize;
		for sentence in sentences {
			if self.train_sentence(sentence) {
				trained += 1;
			}
		}
		debug!(
			"Trained {} sentences: {} unique words, {} samples",
			trained,
			self.unique_word_count(),
			self.total_sample_size()
		);
	}

	/// Adds one sentence to the model.
	///
	/// Tokens are split on inner whitespace and normalized. Blank tokens and
	/// literal sentinel text (`{{start}}`, `{{END}}`, ...) are dropped. The walk
	/// starts at `{{start}}` with an empty context; for each word `w`, the
	/// previous word `p` records the current context and `w` as successor,
	/// then `p` is appended to the context. A final step links the last word
	/// to `{{end}}`.
	///
	/// Returns `false` (and changes nothing) if the sentence has no words.
	pub fn train_sentence<I, W>(&mut self, sentence: I) -> bool
	where
		I: IntoIterator<Item = W>,
		W: AsRef<str>,
	{
		let words: Vec<Token> = sentence
			.into_iter()
			.flat_map(|raw| raw.as_ref().split_whitespace().map(Token::new).collect::<Vec<_>>())
			.filter(|token| !token.is_sentinel())
			.collect();
		if words.is_empty() {
			return false;
		}

		let mut context = ContextKey::default();
		let mut previous = self.ensure_entry(Token::start());
		for word in words.into_iter().chain(iter::once(Token::end())) {
			let current = self.ensure_entry(word);
			let entry = &mut self.entries[previous.0];
			entry.add_preceding_context(context.clone());
			entry.add_successor(current);
			context.push(previous);
			previous = current;
		}

		self.is_ordered = false;
		true
	}

	/// Tokenizes raw text and trains on the resulting sentences.
	pub fn train_text<T: Tokenizer + ?Sized>(&mut self, tokenizer: &T, text: &str) {
		self.train(tokenizer.sentences(text));
	}

	/// Returns the id for `token`, creating an empty entry if needed.
	///
	/// Blank tokens map to the end sentinel.
	pub(crate) fn ensure_entry(&mut self, token: Token) -> EntryId {
		let token = if token.is_blank() { Token::end() } else { token };
		if let Some(&id) = self.index.get(&token) {
			return id;
		}
		let id = EntryId(self.entries.len());
		self.entries.push(WordEntry::new(id, token.clone()));
		self.index.insert(token, id);
		self.is_ordered = false;
		id
	}

	pub(crate) fn entry_mut(&mut self, id: EntryId) -> &mut WordEntry {
		self.is_ordered = false;
		&mut self.entries[id.0]
	}

	// --- Lookup ---

	/// Returns the id of `word` (case-insensitive), if known.
	pub fn lookup(&self, word: &str) -> Option<EntryId> {
		self.index.get(Token::new(word).as_str()).copied()
	}

	pub fn contains(&self, word: &str) -> bool {
		self.lookup(word).is_some()
	}

	/// Finds the entry for `word`.
	///
	/// # Errors
	/// Returns `NotFound` if the word was never observed.
	pub fn find(&self, word: &str) -> Result<WordView<'_>> {
		self.lookup(word)
			.map(|id| self.view(id))
			.ok_or_else(|| PredictionError::NotFound(word.to_owned()))
	}

	/// Returns the entry behind `id`.
	///
	/// # Panics
	/// Panics if `id` was not issued by this model.
	pub fn entry(&self, id: EntryId) -> &WordEntry {
		&self.entries[id.0]
	}

	fn view(&self, id: EntryId) -> WordView<'_> {
		WordView::new(self, &self.entries[id.0])
	}

	/// Iterates entries in creation order.
	pub fn entries(&self) -> impl Iterator<Item = &WordEntry> {
		self.entries.iter()
	}

	// --- Suggest ---

	/// Most likely word after `word`.
	///
	/// Returns `None` for unknown words and words without successors.
	pub fn suggest_next(&self, word: &str) -> Option<&str> {
		self.find(word).ok()?.suggest_next().ok()
	}

	/// Context-aware variant of [`suggest_next`](Self::suggest_next).
	///
	/// Currently identical to the unconditional suggestion, see
	/// [`WordEntry::suggest_next_after`].
	pub fn suggest_next_after(&self, word: &str, previous: &str) -> Option<&str> {
		self.find(word).ok()?.suggest_next_after(previous).ok()
	}

	/// Up to `n` likely words after `word`, best first; empty if unknown.
	pub fn suggest_top_n(&self, word: &str, n: usize) -> Vec<&str> {
		self.find(word).map_or_else(|_| Vec::new(), |view| view.suggest_top_n(n))
	}

	/// Context-aware variant of [`suggest_top_n`](Self::suggest_top_n).
	pub fn suggest_top_n_after(&self, word: &str, previous: &str, n: usize) -> Vec<&str> {
		self.find(word)
			.map_or_else(|_| Vec::new(), |view| view.suggest_top_n_after(previous, n))
	}

	// --- Next word ---

	/// Probability that `next` follows `current`, 0 if either is unknown.
	pub fn next_word_probability(&self, current: &str, next: &str) -> Decimal {
		match (self.lookup(current), self.lookup(next)) {
			(Some(current), Some(next)) => self.entry(current).probability_of(next),
			_ => Decimal::ZERO,
		}
	}

	/// Share of the whole corpus made of `current` followed by `next`.
	///
	/// Equals the pair count divided by `total_sample_size`; summed over every
	/// pair of the model this gives 1. Returns 0 if either word is unknown.
	pub fn next_word_frequency_fraction(&self, current: &str, next: &str) -> Decimal {
		match (self.lookup(current), self.lookup(next)) {
			(Some(current), Some(next)) => ratio(
				self.entry(current).successors().frequency_of(next),
				self.total_sample_size(),
			),
			_ => Decimal::ZERO,
		}
	}

	/// Unconditional corpus share of `next`.
	///
	/// `current` only has to be known; it does not condition the result.
	/// Returns 0 if either word is unknown.
	pub fn next_word_popularity(&self, current: &str, next: &str) -> Decimal {
		let (Some(_), Some(next)) = (self.lookup(current), self.lookup(next)) else {
			return Decimal::ZERO;
		};
		let total = self.total_sample_size();
		if total == 0 {
			return Decimal::ZERO;
		}
		let base_probability = Decimal::ONE / Decimal::from(total);
		Decimal::from(self.entry(next).absolute_frequency()) * base_probability
	}

	// --- Order ---

	/// Memoizes the ranking of every entry and of every per-entry table.
	///
	/// Entries are ranked by absolute frequency descending, ties by creation
	/// order. Calling it again before any further training changes nothing.
	pub fn order_descending_by_frequency(&mut self) {
		if self.is_ordered {
			return;
		}
		self.ordering = self.compute_ordering();
		for entry in &mut self.entries {
			entry.order();
		}
		self.is_ordered = true;
		debug!("Ordered {} entries by absolute frequency", self.entries.len());
	}

	fn compute_ordering(&self) -> Vec<EntryId> {
		let mut ids: Vec<EntryId> = (0..self.entries.len()).map(EntryId).collect();
		// Stable: ties keep creation order
		ids.sort_by(|a, b| {
			self.entries[b.0]
				.absolute_frequency()
				.cmp(&self.entries[a.0].absolute_frequency())
		});
		ids
	}

	/// Entry ids by absolute frequency, highest first.
	///
	/// Uses the memoized ordering when valid, computes it otherwise.
	pub fn ranked_ids(&self) -> Vec<EntryId> {
		if self.is_ordered {
			self.ordering.clone()
		} else {
			self.compute_ordering()
		}
	}

	/// Distinct words by absolute frequency, highest first.
	pub fn words(&self) -> Vec<WordView<'_>> {
		self.ranked_ids().into_iter().map(|id| self.view(id)).collect()
	}

	// --- Statistics ---

	/// Dispersion of absolute frequencies over all entries.
	///
	/// mean = total sample size / unique words,
	/// variance = Σ(frequency - mean)² / mean; 0 for an empty model.
	pub fn global_variance(&self) -> Decimal {
		dispersion(
			self.entries.iter().map(WordEntry::absolute_frequency),
			self.total_sample_size(),
			self.unique_word_count(),
		)
	}

	pub fn global_standard_deviation(&self) -> Decimal {
		deviation(self.global_variance())
	}

	/// Successor dispersion of `word`, 0 if unknown.
	pub fn variance_of(&self, word: &str) -> Decimal {
		self.find(word).map_or(Decimal::ZERO, |view| view.variance())
	}

	/// Successor standard deviation of `word`, 0 if unknown.
	pub fn standard_deviation_of(&self, word: &str) -> Decimal {
		self.find(word).map_or(Decimal::ZERO, |view| view.standard_deviation())
	}

	/// Each word's share of the total sample size, in ranking order.
	///
	/// Empty when nothing was sampled.
	///
	/// # Errors
	/// Returns `InvariantViolation` if the shares do not sum to 1 within the
	/// configured tolerance.
	pub fn corpus_frequency_table(&self) -> Result<Vec<(&str, Decimal)>> {
		let total = self.total_sample_size();
		if total == 0 {
			return Ok(Vec::new());
		}

		let base_probability = Decimal::ONE / Decimal::from(total);
		let table: Vec<(&str, Decimal)> = self
			.ranked_ids()
			.into_iter()
			.map(|id| {
				let entry = self.entry(id);
				(entry.value(), base_probability * Decimal::from(entry.absolute_frequency()))
			})
			.collect();

		let (consistent, sum) = sums_to_one(table.iter().map(|(_, fraction)| *fraction), self.config.tolerance());
		if !consistent {
			return Err(PredictionError::InvariantViolation(format!(
				"corpus frequencies sum to {} instead of 1",
				sum
			)));
		}
		Ok(table)
	}

	/// CSV report of corpus shares: `WORD,FREQUENCY` then one
	/// `percentage,word` row per entry, percentages to 9 decimals.
	///
	/// # Errors
	/// Same as [`corpus_frequency_table`](Self::corpus_frequency_table).
	pub fn render_frequency_report(&self) -> Result<String> {
		let table = self.corpus_frequency_table()?;

		let mut report = String::from("WORD,FREQUENCY\n");
		for (word, fraction) in table {
			report.push_str(&fixed(fraction * Decimal::ONE_HUNDRED, 9));
			report.push(',');
			report.push_str(word);
			report.push('\n');
		}
		Ok(report)
	}

	/// Every entry's display lines, in ranking order.
	pub fn render_dictionary(&self) -> Vec<String> {
		self.words().iter().flat_map(|word| word.render()).collect()
	}

	// --- Generation ---

	/// Generates a sentence by weighted random walk from `{{start}}`.
	///
	/// Stops at `{{end}}`, at a word without successors, or after
	/// `max_generated_words` words. Sentinels are not part of the output.
	pub fn generate_sentence<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<&str> {
		let mut sentence = Vec::new();
		let Some(mut current) = self.lookup(START_TOKEN) else {
			return sentence;
		};

		while sentence.len() < self.config.max_generated_words() {
			let Some(next) = self.entry(current).successors().sample(rng) else {
				break;
			};
			let word = self.entry(next).value();
			if word == END_TOKEN {
				break;
			}
			sentence.push(word);
			current = next;
		}
		sentence
	}

	// --- Merge ---

	/// Merges another model into this one.
	///
	/// Entries are matched by token text; successor and context counts of
	/// `other` are added to the matching entries. Words only known by
	/// `other` are created.
	pub fn merge(&mut self, other: &Self) {
		let mapping: Vec<EntryId> = other
			.entries
			.iter()
			.map(|entry| self.ensure_entry(entry.token().clone()))
			.collect();

		for entry in &other.entries {
			let target = &mut self.entries[mapping[entry.id().0].0];
			for (successor, occurrences) in entry.successors().iter() {
				target.add_successor_occurrences(mapping[successor.0], occurrences);
			}
			for (context, occurrences) in entry.ranked_contexts() {
				let context = ContextKey::new(context.entries().iter().map(|id| mapping[id.0]).collect());
				target.add_context_occurrences(context, occurrences);
			}
		}

		self.is_ordered = false;
		info!("Merged {} entries, now {} unique words", other.entries.len(), self.entries.len());
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn trained(sentences: &[&[&str]]) -> VocabularyModel {
		let mut model = VocabularyModel::new();
		model.train(sentences.iter().map(|sentence| sentence.iter()));
		model
	}

	#[test]
	fn test_single_sentence_links() {
		let model = trained(&[&["the", "cat", "sat"]]);

		assert_eq!(model.unique_word_count(), 5);
		assert_eq!(model.find(START_TOKEN).unwrap().successors(), vec![("the", 1)]);
		assert_eq!(model.find("the").unwrap().successors(), vec![("cat", 1)]);
		assert_eq!(model.find("cat").unwrap().successors(), vec![("sat", 1)]);
		assert_eq!(model.find("sat").unwrap().successors(), vec![(END_TOKEN, 1)]);
		assert_eq!(model.find(END_TOKEN).unwrap().absolute_frequency(), 0);
		assert_eq!(model.suggest_next("the"), Some("cat"));
		assert_eq!(model.total_sample_size(), 4);
	}

	#[test]
	fn test_contexts_are_sentence_prefixes() {
		let model = trained(&[&["the", "cat", "sat"]]);

		assert_eq!(model.find(START_TOKEN).unwrap().contexts(), vec![(vec![], 1)]);
		assert_eq!(model.find("the").unwrap().contexts(), vec![(vec![START_TOKEN], 1)]);
		assert_eq!(
			model.find("cat").unwrap().contexts(),
			vec![(vec![START_TOKEN, "the"], 1)]
		);
		assert_eq!(
			model.find("sat").unwrap().contexts(),
			vec![(vec![START_TOKEN, "the", "cat"], 1)]
		);
		assert!(model.find(END_TOKEN).unwrap().contexts().is_empty());
	}

	#[test]
	fn test_blank_tokens_are_skipped() {
		let model = trained(&[&["", "The", "  ", "CAT", ""], &["", " "]]);

		assert!(!model.contains(""));
		assert_eq!(model.unique_word_count(), 4);
		assert_eq!(model.suggest_next("the"), Some("cat"));
		assert_eq!(
			model.find("cat").unwrap().contexts(),
			vec![(vec![START_TOKEN, "the"], 1)]
		);
		// The all-blank sentence added nothing
		assert_eq!(model.find(START_TOKEN).unwrap().absolute_frequency(), 1);
	}

	#[test]
	fn test_multi_word_tokens_are_split() {
		let model = trained(&[&["New York", "city"]]);

		assert!(!model.contains("new york"));
		assert_eq!(model.suggest_next("new"), Some("york"));
		assert_eq!(
			model.find("city").unwrap().contexts(),
			vec![(vec![START_TOKEN, "new", "york"], 1)]
		);
	}

	#[test]
	fn test_sentinel_text_is_not_trained() {
		let model = trained(&[&["{{END}}", "the", "{{start}}", "cat"], &["{{end}}"]]);

		assert_eq!(model.find(END_TOKEN).unwrap().absolute_frequency(), 0);
		assert_eq!(model.find(START_TOKEN).unwrap().successors(), vec![("the", 1)]);
		assert_eq!(model.suggest_next("the"), Some("cat"));
		assert_eq!(model.unique_word_count(), 4);
	}

	#[test]
	fn test_two_sentences() {
		let model = trained(&[&["the", "cat", "sat"], &["the", "dog", "ran"]]);

		assert_eq!(model.find("the").unwrap().successors(), vec![("cat", 1), ("dog", 1)]);
		assert_eq!(model.suggest_top_n("the", 2), vec!["cat", "dog"]);
		assert_eq!(model.suggest_top_n("the", 5), vec!["cat", "dog"]);
		assert_eq!(model.next_word_probability("the", "cat"), Decimal::new(5, 1));
		assert_eq!(model.next_word_probability("THE", "Dog"), Decimal::new(5, 1));
		assert_eq!(model.next_word_probability("cat", "dog"), Decimal::ZERO);
	}

	#[test]
	fn test_unknown_words_give_empty_results() {
		let model = trained(&[&["the", "cat"]]);

		assert_eq!(model.suggest_next("unknownword"), None);
		assert_eq!(model.suggest_next_after("unknownword", "the"), None);
		assert!(model.suggest_top_n("unknownword", 3).is_empty());
		assert!(model.suggest_top_n_after("unknownword", "the", 3).is_empty());
		assert_eq!(model.next_word_probability("unknownword", "cat"), Decimal::ZERO);
		assert_eq!(model.next_word_frequency_fraction("the", "unknownword"), Decimal::ZERO);
		assert_eq!(model.next_word_popularity("unknownword", "cat"), Decimal::ZERO);
		assert!(matches!(model.find("unknownword"), Err(PredictionError::NotFound(_))));
		// The end sentinel is known but has no successors
		assert_eq!(model.suggest_next(END_TOKEN), None);
		assert!(matches!(
			model.find(END_TOKEN).unwrap().suggest_next(),
			Err(PredictionError::EmptyModel(_))
		));
	}

	#[test]
	fn test_context_aware_suggestion_falls_back() {
		let model = trained(&[&["a", "b", "c"], &["x", "b", "d"], &["y", "b", "d"]]);

		assert_eq!(model.suggest_next("b"), Some("d"));
		assert_eq!(model.suggest_next_after("b", "a"), Some("d"));
		assert_eq!(model.suggest_top_n_after("b", "a", 2), model.suggest_top_n("b", 2));
	}

	#[test]
	fn test_frequency_fraction_and_popularity() {
		let model = trained(&[&["the", "cat", "sat"], &["the", "dog", "ran"]]);
		// 8 samples: start x2, the x2, cat, sat, dog, ran
		assert_eq!(model.total_sample_size(), 8);
		assert_eq!(model.next_word_frequency_fraction("the", "cat"), Decimal::new(125, 3));
		assert_eq!(model.next_word_popularity("cat", "the"), Decimal::new(25, 2));
		// Not conditioned on the current word
		assert_eq!(model.next_word_popularity("sat", "the"), Decimal::new(25, 2));

		let pair_sum: Decimal = model
			.entries()
			.flat_map(|entry| {
				entry
					.successors()
					.iter()
					.map(|(next, _)| model.next_word_frequency_fraction(entry.value(), model.entry(next).value()))
					.collect::<Vec<_>>()
			})
			.sum();
		assert_eq!(pair_sum, Decimal::ONE);
	}

	#[test]
	fn test_order_is_idempotent() {
		let mut model = trained(&[&["a", "b"], &["b", "b", "c"]]);
		assert!(!model.is_ordered());
		let before = model.ranked_ids();

		model.order_descending_by_frequency();
		assert!(model.is_ordered());
		let once = model.ranked_ids();
		let once_report = model.render_frequency_report().unwrap();

		model.order_descending_by_frequency();
		assert_eq!(model.ranked_ids(), once);
		assert_eq!(model.render_frequency_report().unwrap(), once_report);
		assert_eq!(before, once);

		let words: Vec<_> = model.words().iter().map(|w| w.value()).collect();
		assert_eq!(words[0], "b");

		model.train_sentence(["c"]);
		assert!(!model.is_ordered());
	}

	#[test]
	fn test_global_statistics() {
		let model = trained(&[&["the", "cat", "sat"]]);
		// frequencies 1,1,1,1,0; mean = 4/5; Σ = 4 * 0.04 + 0.64 = 0.8; 0.8 / 0.8 = 1
		assert_eq!(model.global_variance(), Decimal::ONE);
		assert!((model.global_standard_deviation() - Decimal::ONE).abs() < Decimal::new(1, 20));
		assert_eq!(VocabularyModel::new().global_variance(), Decimal::ZERO);
		assert_eq!(model.variance_of("unknown"), Decimal::ZERO);
		assert_eq!(model.standard_deviation_of("the"), Decimal::ZERO);
	}

	#[test]
	fn test_corpus_frequency_table_sums_to_one() {
		let model = trained(&[&["one", "two", "three"], &["two", "three"], &["three"]]);
		let table = model.corpus_frequency_table().unwrap();
		assert_eq!(table.len(), model.unique_word_count());

		let sum: Decimal = table.iter().map(|(_, fraction)| *fraction).sum();
		assert!((sum - Decimal::ONE).abs() <= model.config().tolerance());
		assert!(VocabularyModel::new().corpus_frequency_table().unwrap().is_empty());
	}

	#[test]
	fn test_corpus_shares_outside_tolerance_are_rejected() {
		// 7 samples: 7 * (1/7) rounds to 1.0000000000000000000000000003
		let mut model = trained(&[&["a", "b", "c", "d", "e", "f"]]);
		let mut config = ModelConfig::default();
		config.set_tolerance(Decimal::new(1, 28)).unwrap();
		model.set_config(config);

		assert!(matches!(
			model.corpus_frequency_table(),
			Err(PredictionError::InvariantViolation(_))
		));
		assert!(matches!(
			model.render_frequency_report(),
			Err(PredictionError::InvariantViolation(_))
		));

		model.set_config(ModelConfig::default());
		assert!(model.render_frequency_report().is_ok());
	}

	#[test]
	fn test_render_frequency_report() {
		let model = trained(&[&["the", "cat", "sat"]]);
		let report = model.render_frequency_report().unwrap();
		let expected = "WORD,FREQUENCY\n\
			25.000000000,{{start}}\n\
			25.000000000,the\n\
			25.000000000,cat\n\
			25.000000000,sat\n\
			0.000000000,{{end}}\n";
		assert_eq!(report, expected);
	}

	#[test]
	fn test_render_dictionary() {
		let model = trained(&[&["the", "the", "cat"]]);
		let lines = model.render_dictionary();
		assert_eq!(lines.len(), 4);
		assert_eq!(lines[0], "[\"THE\" \t - \t 2/4 (0.50000)]");
		assert_eq!(lines[3], "[\"{{END}}\" \t - \t 0/4 (0.00000)]");
	}

	#[test]
	fn test_training_order_keeps_aggregate_counts() {
		let first = trained(&[&["a", "b"], &["c", "b"], &["d"]]);
		let second = trained(&[&["d"], &["a", "b"], &["c", "b"]]);

		for entry in first.entries() {
			let other = second.find(entry.value()).unwrap();
			assert_eq!(entry.absolute_frequency(), other.absolute_frequency());
			for (next, count) in entry.successors().iter() {
				assert_eq!(other.frequency_of(first.entry(next).value()), count);
			}
		}
		assert_eq!(first.unique_word_count(), second.unique_word_count());
		assert_eq!(first.total_sample_size(), second.total_sample_size());
		// Ties follow first-seen order, so the start sentinel ranks its successors differently
		assert_eq!(first.suggest_top_n(START_TOKEN, 3), vec!["a", "c", "d"]);
		assert_eq!(second.suggest_top_n(START_TOKEN, 3), vec!["d", "a", "c"]);
	}

	#[test]
	fn test_merge() {
		let mut left = trained(&[&["the", "cat"]]);
		let right = trained(&[&["the", "dog"], &["the", "dog"]]);
		left.merge(&right);

		let combined = trained(&[&["the", "cat"], &["the", "dog"], &["the", "dog"]]);
		assert_eq!(left.unique_word_count(), combined.unique_word_count());
		assert_eq!(left.total_sample_size(), combined.total_sample_size());
		assert_eq!(left.suggest_next("the"), Some("dog"));
		assert_eq!(
			left.find("dog").unwrap().contexts(),
			vec![(vec![START_TOKEN, "the"], 2)]
		);
	}

	#[test]
	fn test_generate_sentence() {
		let mut rng = StdRng::seed_from_u64(42);
		assert!(VocabularyModel::new().generate_sentence(&mut rng).is_empty());

		let model = trained(&[&["the", "cat", "sat"]]);
		assert_eq!(model.generate_sentence(&mut rng), vec!["the", "cat", "sat"]);

		let mut config = ModelConfig::default();
		config.set_max_generated_words(2).unwrap();
		let mut looping = VocabularyModel::with_config(config);
		looping.train([["la", "la", "la", "la"]]);
		assert!(looping.generate_sentence(&mut rng).len() <= 2);
	}
}
