use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{PredictionError, Result};
use crate::io::read_text;

/// Tunable parameters of a `VocabularyModel`.
///
/// # Responsibilities
/// - Hold the tolerance used by every "fractions sum to one" check
/// - Bound the length of randomly generated sentences
///
/// # Invariants
/// - `tolerance` is strictly between 0 and 1
/// - `max_generated_words` is at least 1
///
/// The configuration is not persisted with the model.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
	/// Accepted distance between an aggregate probability sum and 1.
	tolerance: Decimal,

	/// Maximum number of words produced by a single generated sentence.
	max_generated_words: usize,
}

impl Default for ModelConfig {
	fn default() -> Self {
		Self {
			tolerance: Decimal::new(1, 15),
			max_generated_words: 32,
		}
	}
}

impl ModelConfig {
	/// Loads a configuration from a JSON file.
	///
	/// Missing fields fall back to their defaults.
	///
	/// # Errors
	/// Returns an error if the file cannot be read, is not valid JSON,
	/// or holds out-of-range values.
	pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let text = read_text(path)?;
		let config: Self = serde_json::from_str(&text)
			.map_err(|e| PredictionError::InvalidConfig(e.to_string()))?;
		config.validate()?;
		Ok(config)
	}

	/// Returns the tolerance used by invariant checks.
	pub fn tolerance(&self) -> Decimal {
		self.tolerance
	}

	/// Returns the generated sentence length bound.
	pub fn max_generated_words(&self) -> usize {
		self.max_generated_words
	}

	/// Sets the invariant tolerance (0..1, exclusive).
	///
	/// # Errors
	/// Returns an error if the value is outside the valid range.
	pub fn set_tolerance(&mut self, tolerance: Decimal) -> Result<()> {
		Self::check_tolerance(tolerance)?;
		self.tolerance = tolerance;
		Ok(())
	}

	/// Sets the maximum number of generated words.
	///
	/// # Errors
	/// Returns an error if `max_generated_words` is 0.
	pub fn set_max_generated_words(&mut self, max_generated_words: usize) -> Result<()> {
		Self::check_max_generated_words(max_generated_words)?;
		self.max_generated_words = max_generated_words;
		Ok(())
	}

	fn validate(&self) -> Result<()> {
		Self::check_tolerance(self.tolerance)?;
		Self::check_max_generated_words(self.max_generated_words)
	}

	fn check_tolerance(tolerance: Decimal) -> Result<()> {
		if tolerance <= Decimal::ZERO || tolerance >= Decimal::ONE {
			return Err(PredictionError::InvalidConfig(format!(
				"Tolerance must be between 0 and 1 (exclusive), got {}",
				tolerance
			)));
		}
		Ok(())
	}

	fn check_max_generated_words(max_generated_words: usize) -> Result<()> {
		if max_generated_words == 0 {
			return Err(PredictionError::InvalidConfig(
				"max_generated_words must be >= 1".to_owned(),
			));
		}
		Ok(())
	}
}
