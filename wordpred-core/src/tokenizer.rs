//! Conversion of raw text into tokenized sentences.
//!
//! The model only consumes sentences of word tokens. A [`Tokenizer`] decides
//! where sentences end and how words are canonicalized.

/// Splits raw text into sentences of lower-case word tokens.
pub trait Tokenizer {
	/// Returns the sentences of `text`, each a sequence of words.
	///
	/// Empty tokens may appear; the model skips them.
	fn sentences(&self, text: &str) -> Vec<Vec<String>>;
}

/// Contractions written without their apostrophe, and their expansion.
const CONTRACTIONS: &[(&str, &str)] = &[
	("arent", "are not"),
	("cant", "cannot"),
	("couldnt", "could not"),
	("didnt", "did not"),
	("doesnt", "does not"),
	("dont", "do not"),
	("hadnt", "had not"),
	("hasnt", "has not"),
	("havent", "have not"),
	("im", "i am"),
	("ive", "i have"),
	("isnt", "is not"),
	("lets", "let us"),
	("mightnt", "might not"),
	("mustnt", "must not"),
	("shant", "shall not"),
	("shouldnt", "should not"),
	("theyre", "they are"),
	("theyve", "they have"),
	("weve", "we have"),
	("werent", "were not"),
	("whatre", "what are"),
	("whatve", "what have"),
	("whore", "who are"),
	("whove", "who have"),
	("wont", "will not"),
	("wouldnt", "would not"),
	("youre", "you are"),
	("youve", "you have"),
];

const ORDINALS: &[(&str, &str)] = &[
	("1st", "first"),
	("2nd", "second"),
	("3rd", "third"),
	("4th", "fourth"),
	("5th", "fifth"),
	("6th", "sixth"),
	("7th", "seventh"),
	("8th", "eighth"),
	("9th", "ninth"),
	("10th", "tenth"),
	("11th", "eleventh"),
	("12th", "twelfth"),
	("13th", "thirteenth"),
	("14th", "fourteenth"),
	("15th", "fifteenth"),
];

const DIGITS: [&str; 10] = ["zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine"];

/// A `PlainTextTokenizer` splits prose into sentences of canonical words.
///
/// # Example
///
/// | text                 | sentences                              |
/// |----------------------|----------------------------------------|
/// | `Don't stop! Go.`    | `[["do", "not", "stop"], ["go"]]`      |
/// | `The 2nd of 3 (ok)?` | `[["the", "second", "of", "three", "ok"]]` |
///
/// - `.`, `!` and `?` end a sentence; other punctuation separates words
/// - apostrophes are dropped inside words, then contractions are expanded
/// - ordinals up to `15th` are spelled out, other digits one by one
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainTextTokenizer;

impl PlainTextTokenizer {
	pub fn new() -> Self {
		Self
	}

	fn canonical_words(raw: &str, words: &mut Vec<String>) {
		let word: String = raw
			.chars()
			.filter(|c| *c != '\'' && *c != '’' && *c != '`')
			.flat_map(char::to_lowercase)
			.collect();
		if word.is_empty() {
			return;
		}

		if let Some((_, expansion)) = CONTRACTIONS.iter().chain(ORDINALS).find(|(short, _)| *short == word) {
			words.extend(expansion.split(' ').map(str::to_owned));
			return;
		}

		// Split digit runs from letters: "4x4" -> four, x, four
		let mut letters = String::new();
		for c in word.chars() {
			match c.to_digit(10) {
				Some(digit) => {
					if !letters.is_empty() {
						words.push(std::mem::take(&mut letters));
					}
					words.push(DIGITS[digit as usize].to_owned());
				}
				None => letters.push(c),
			}
		}
		if !letters.is_empty() {
			words.push(letters);
		}
	}
}

impl Tokenizer for PlainTextTokenizer {
	fn sentences(&self, text: &str) -> Vec<Vec<String>> {
		text.split(['.', '!', '?'])
			.map(|sentence| {
				let mut words = Vec::new();
				for raw in sentence.split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '’' || c == '`')) {
					Self::canonical_words(raw, &mut words);
				}
				words
			})
			.filter(|words| !words.is_empty())
			.collect()
	}
}
