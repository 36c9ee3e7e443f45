//! Word-succession frequency model for next-word suggestion.
//!
//! This crate provides a statistical word prediction system including:
//! - A vocabulary of case-insensitive tokens with successor counts
//! - Exact preceding-context tracking per word
//! - Deterministic ranking, probabilities and dispersion statistics
//! - Persistence of the whole model as JSON or a compact binary snapshot
//!
//! Raw text is turned into sentences by a [`tokenizer::Tokenizer`]; the model
//! itself only consumes token sequences.

/// Error type and crate-wide `Result` alias.
pub mod error;

/// Model configuration (invariant tolerance, generation limits).
pub mod config;

/// Vocabulary, word entries, successor counts and ranking logic.
pub mod model;

/// Saving and loading of trained models.
pub mod store;

/// Raw text to sentence/token conversion.
pub mod tokenizer;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;

pub use crate::config::ModelConfig;
pub use crate::error::{PredictionError, Result};
pub use crate::model::vocabulary::VocabularyModel;
pub use crate::store::ModelStore;
