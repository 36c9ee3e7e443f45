use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Token marking the beginning of every trained sentence.
pub const START_TOKEN: &str = "{{start}}";

/// Token marking the end of every trained sentence.
pub const END_TOKEN: &str = "{{end}}";

/// A normalized word.
///
/// The text is trimmed and lower-cased on construction, so two tokens are
/// equal iff their inputs match case-insensitively. Whitespace-only input
/// becomes the blank token, which the vocabulary never stores.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Token(String);

impl Token {
	/// Creates a token from raw text.
	pub fn new(raw: &str) -> Self {
		Self(raw.trim().to_lowercase())
	}

	/// The sentence start sentinel.
	pub fn start() -> Self {
		Self(START_TOKEN.to_owned())
	}

	/// The sentence end sentinel.
	pub fn end() -> Self {
		Self(END_TOKEN.to_owned())
	}

	/// Returns the normalized text.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Returns `true` for the token built from empty or whitespace-only text.
	pub fn is_blank(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns `true` for either sentence sentinel.
	pub fn is_sentinel(&self) -> bool {
		self.0 == START_TOKEN || self.0 == END_TOKEN
	}

	/// Case-insensitive comparison against raw text.
	pub fn matches(&self, raw: &str) -> bool {
		self.0 == raw.trim().to_lowercase()
	}
}

impl From<&str> for Token {
	fn from(raw: &str) -> Self {
		Self::new(raw)
	}
}

impl Borrow<str> for Token {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl AsRef<str> for Token {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
