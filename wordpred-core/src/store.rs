//! Persistence of trained models.
//!
//! A model is written as a [`ModelDocument`]: the total sample size followed
//! by one record per word holding its successor counts and its preceding
//! contexts (space-joined). Two encodings are supported, picked from the file
//! extension: a compact `postcard` snapshot for `.bin` files and pretty JSON
//! for everything else.

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{PredictionError, Result};
use crate::io::{build_output_path, parent_dir, read_text};
use crate::model::context::ContextKey;
use crate::model::token::Token;
use crate::model::vocabulary::VocabularyModel;
use crate::tokenizer::Tokenizer;

/// Encoding of a persisted model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreFormat {
	/// Human-readable JSON document.
	Json,
	/// Compact binary snapshot.
	Postcard,
}

impl StoreFormat {
	/// `.bin` files are postcard snapshots, anything else is JSON.
	pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
		match path.as_ref().extension().and_then(|e| e.to_str()) {
			Some(extension) if extension.eq_ignore_ascii_case("bin") => StoreFormat::Postcard,
			_ => StoreFormat::Json,
		}
	}
}

/// Root record of a persisted model.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct ModelDocument {
	/// Total sample size at save time.
	pub total_words_processed: u64,
	#[serde(rename = "Word")]
	pub words: Vec<WordRecord>,
}

/// One word of a persisted model.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct WordRecord {
	/// The normalized word.
	pub value: String,
	/// Absolute frequency at save time. Recomputed on load.
	pub dictionary_size: u64,
	/// Successor word => count.
	#[serde(default)]
	pub next_word_dictionary: Vec<KeyValuePair>,
	/// Space-joined preceding context => count.
	#[serde(default)]
	pub previous_words_dictionary: Vec<KeyValuePair>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct KeyValuePair {
	pub key: String,
	pub value: u64,
}

impl ModelDocument {
	/// Captures `model` with words and counts in ranking order.
	pub fn from_model(model: &VocabularyModel) -> Self {
		let words = model
			.words()
			.into_iter()
			.map(|word| WordRecord {
				value: word.value().to_owned(),
				dictionary_size: word.absolute_frequency(),
				next_word_dictionary: word
					.successors()
					.into_iter()
					.map(|(key, value)| KeyValuePair { key: key.to_owned(), value })
					.collect(),
				previous_words_dictionary: word
					.contexts()
					.into_iter()
					.map(|(context, value)| KeyValuePair { key: context.join(" "), value })
					.collect(),
			})
			.collect();

		Self {
			total_words_processed: model.total_sample_size(),
			words,
		}
	}

	/// Rebuilds a model in two passes.
	///
	/// - First every word record becomes an entry, so that every reference
	///   can be resolved without creating phantom entries.
	/// - Then successor and context counts are attached. Records naming a
	///   word unknown to the first pass, or with a zero count, are skipped.
	pub fn into_model(self) -> VocabularyModel {
		let mut model = VocabularyModel::new();

		let mut seen = HashSet::new();
		let mut records = Vec::with_capacity(self.words.len());
		for record in self.words {
			let token = Token::new(&record.value);
			if token.is_blank() || !seen.insert(token.clone()) {
				warn!("Skipping blank or duplicate word record '{}'", record.value);
				continue;
			}
			let id = model.ensure_entry(token);
			records.push((id, record));
		}

		for (id, record) in &records {
			for pair in &record.next_word_dictionary {
				match model.lookup(&pair.key) {
					Some(successor) if pair.value > 0 => {
						model.entry_mut(*id).add_successor_occurrences(successor, pair.value)
					}
					_ => warn!("Skipping successor '{}' of '{}'", pair.key, record.value),
				}
			}

			for pair in &record.previous_words_dictionary {
				match Self::resolve_context(&model, &pair.key) {
					Some(context) if pair.value > 0 => {
						model.entry_mut(*id).add_context_occurrences(context, pair.value)
					}
					_ => warn!("Skipping context '{}' of '{}'", pair.key, record.value),
				}
			}

			let absolute_frequency = model.entry(*id).absolute_frequency();
			if absolute_frequency != record.dictionary_size {
				warn!(
					"'{}' was saved with frequency {} but loads with {}",
					record.value, record.dictionary_size, absolute_frequency
				);
			}
		}

		if model.total_sample_size() != self.total_words_processed {
			warn!(
				"Model was saved with {} samples but loads with {}",
				self.total_words_processed,
				model.total_sample_size()
			);
		}
		model
	}

	/// Resolves a space-joined context; `""` is the empty context.
	fn resolve_context(model: &VocabularyModel, key: &str) -> Option<ContextKey> {
		key.split(' ')
			.filter(|word| !word.is_empty())
			.map(|word| model.lookup(word))
			.collect::<Option<Vec<_>>>()
			.map(ContextKey::new)
	}
}

/// Saves and loads models at a fixed path.
///
/// # Notes
/// - `save`/`load` never fail: errors are logged and reported as `false`
///   or an empty model. `try_save`/`try_load` return them instead.
/// - Writes go to a temporary file in the target directory which is then
///   renamed over the destination.
#[derive(Clone, Debug)]
pub struct ModelStore {
	path: PathBuf,
	format: StoreFormat,
}

impl ModelStore {
	/// Creates a store whose format follows the file extension.
	pub fn new<P: AsRef<Path>>(path: P) -> Self {
		let format = StoreFormat::from_path(&path);
		Self::with_format(path, format)
	}

	pub fn with_format<P: AsRef<Path>>(path: P, format: StoreFormat) -> Self {
		Self {
			path: path.as_ref().to_path_buf(),
			format,
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn format(&self) -> StoreFormat {
		self.format
	}

	/// Saves `model`, returning `true` on success.
	///
	/// A model without entries is not saved and no file is written.
	pub fn save(&self, model: &VocabularyModel) -> bool {
		match self.try_save(model) {
			Ok(()) => true,
			Err(e) => {
				warn!("Could not save model to {}: {}", self.path.display(), e);
				false
			}
		}
	}

	/// Saves `model`.
	///
	/// # Errors
	/// - `EmptyModel` if the model has no entries
	/// - `Encode` if serialization fails
	/// - `Io` if the file cannot be written
	pub fn try_save(&self, model: &VocabularyModel) -> Result<()> {
		if model.is_empty() {
			return Err(PredictionError::EmptyModel("refusing to save a model without entries".to_owned()));
		}

		let document = ModelDocument::from_model(model);
		let bytes = match self.format {
			StoreFormat::Json => {
				serde_json::to_vec_pretty(&document).map_err(|e| PredictionError::Encode(e.to_string()))?
			}
			StoreFormat::Postcard => {
				postcard::to_stdvec(&document).map_err(|e| PredictionError::Encode(e.to_string()))?
			}
		};

		let parent = parent_dir(&self.path);
		fs::create_dir_all(parent)?;
		let mut temp_file = NamedTempFile::new_in(parent)?;
		temp_file.write_all(&bytes)?;
		temp_file.persist(&self.path).map_err(|e| PredictionError::Io(e.error))?;

		info!(
			"Saved {} words ({} samples) to {}",
			document.words.len(),
			document.total_words_processed,
			self.path.display()
		);
		Ok(())
	}

	/// Loads the model, or an empty model if the file is missing or malformed.
	pub fn load(&self) -> VocabularyModel {
		match self.try_load() {
			Ok(model) => model,
			Err(PredictionError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
				debug!("No model at {}, starting empty", self.path.display());
				VocabularyModel::new()
			}
			Err(e) => {
				warn!("Could not load model from {}: {}", self.path.display(), e);
				VocabularyModel::new()
			}
		}
	}

	/// Loads the model.
	///
	/// # Errors
	/// - `Io` if the file cannot be read
	/// - `MalformedPersistedState` if it does not decode as a `ModelDocument`
	pub fn try_load(&self) -> Result<VocabularyModel> {
		let document: ModelDocument = match self.format {
			StoreFormat::Json => serde_json::from_str(&read_text(&self.path)?)
				.map_err(|e| PredictionError::MalformedPersistedState(e.to_string()))?,
			StoreFormat::Postcard => postcard::from_bytes(&fs::read(&self.path)?)
				.map_err(|e| PredictionError::MalformedPersistedState(e.to_string()))?,
		};

		let model = document.into_model();
		info!(
			"Loaded {} words ({} samples) from {}",
			model.unique_word_count(),
			model.total_sample_size(),
			self.path.display()
		);
		Ok(model)
	}

	/// Loads the snapshot of a text corpus, building it if needed.
	///
	/// - `corpus` is the input text file.
	/// - If `<corpus stem>.bin` exists next to it, that snapshot is loaded.
	/// - Otherwise the corpus is tokenized and trained, and the snapshot is
	///   written for future fast loading.
	pub fn load_or_train<P, T>(corpus: P, tokenizer: &T) -> Result<VocabularyModel>
	where
		P: AsRef<Path>,
		T: Tokenizer + ?Sized,
	{
		let snapshot = Self::with_format(build_output_path(&corpus, "bin")?, StoreFormat::Postcard);
		if snapshot.path().exists() {
			return snapshot.try_load();
		}

		let mut model = VocabularyModel::new();
		model.train_text(tokenizer, &read_text(&corpus)?);
		model.order_descending_by_frequency();
		if !model.is_empty() {
			snapshot.try_save(&model)?;
		}
		Ok(model)
	}
}
