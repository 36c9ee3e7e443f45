use super::EntryId;

/// The ordered words preceding an entry within one sentence.
///
/// Equality and hashing are structural: two keys are equal iff they hold the
/// same entries in the same order. The first element of a non-empty key is
/// always the start sentinel.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ContextKey(Vec<EntryId>);

impl ContextKey {
	/// Creates a key from entry ids, oldest first.
	pub fn new(entries: Vec<EntryId>) -> Self {
		Self(entries)
	}

	/// Appends a word to the end of the context.
	pub fn push(&mut self, entry: EntryId) {
		self.0.push(entry);
	}

	/// Returns the entries, oldest first.
	pub fn entries(&self) -> &[EntryId] {
		&self.0
	}

	/// Number of words in the context.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Returns `true` for the context of the start sentinel.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Returns the word right before the entry, if any.
	pub fn last(&self) -> Option<EntryId> {
		self.0.last().copied()
	}
}
