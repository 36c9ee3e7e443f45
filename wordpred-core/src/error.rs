//! Error types for word prediction.
//!
//! Every fallible operation of the crate returns [`Result`], whose error side
//! is the [`PredictionError`] enum.

use std::io;

use thiserror::Error;

/// The main error type for word prediction operations.
#[derive(Error, Debug)]
pub enum PredictionError {
	/// A word was looked up that the vocabulary has never seen.
	#[error("Word not found: {0}")]
	NotFound(String),

	/// A ranking or suggestion was requested where no counts exist.
	#[error("Empty model: {0}")]
	EmptyModel(String),

	/// Aggregate probabilities no longer sum to one.
	///
	/// This is a programming error; the operation that detects it is aborted.
	#[error("Invariant violation: {0}")]
	InvariantViolation(String),

	/// A persisted model could not be decoded or lacks required sections.
	#[error("Malformed persisted state: {0}")]
	MalformedPersistedState(String),

	/// A configuration value is out of range.
	#[error("Invalid configuration: {0}")]
	InvalidConfig(String),

	/// A model could not be encoded for saving.
	#[error("Encoding error: {0}")]
	Encode(String),

	/// I/O errors (file operations)
	#[error("I/O error: {0}")]
	Io(#[from] io::Error),
}

/// Result type alias for word prediction operations.
pub type Result<T> = std::result::Result<T, PredictionError>;
