use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;

use wordpred_core::model::token::{END_TOKEN, START_TOKEN};
use wordpred_core::tokenizer::{PlainTextTokenizer, Tokenizer};
use wordpred_core::{ModelConfig, PredictionError, VocabularyModel};

const CORPORA: &[&str] = &[
	"The cat sat.",
	"The cat sat. The dog ran.",
	"I think I can. I think I can! I know I can? You can too.",
	"One fish two fish red fish blue fish. This one has a little star. \
	 This one has a little car. Say what a lot of fish there are.",
];

fn models() -> Vec<VocabularyModel> {
	CORPORA
		.iter()
		.map(|text| {
			let mut model = VocabularyModel::new();
			model.train_text(&PlainTextTokenizer::new(), text);
			model
		})
		.collect()
}

#[test]
fn test_corpus_frequencies_sum_to_one() {
	for model in models() {
		let sum: Decimal = model
			.corpus_frequency_table()
			.unwrap()
			.iter()
			.map(|(_, fraction)| *fraction)
			.sum();
		assert_eq!(sum.round(), Decimal::ONE);
		assert!((sum - Decimal::ONE).abs() <= model.config().tolerance());
	}
}

#[test]
fn test_successor_probabilities_sum_to_one() {
	for model in models() {
		for word in model.words() {
			if word.absolute_frequency() == 0 {
				assert_eq!(word.value(), END_TOKEN);
				continue;
			}
			let sum: Decimal = word.probability_map().iter().map(|(_, p)| *p).sum();
			assert!((sum - Decimal::ONE).abs() <= model.config().tolerance());
		}
	}
}

#[test]
fn test_total_sample_size_is_sum_of_frequencies() {
	for model in models() {
		let sum: u64 = model.entries().map(|entry| entry.absolute_frequency()).sum();
		assert_eq!(model.total_sample_size(), sum);
	}
}

#[test]
fn test_graph_is_closed() {
	for model in models() {
		for entry in model.entries() {
			for (next, _) in entry.successors().iter() {
				assert!(model.contains(model.entry(next).value()));
			}
			for (context, _) in entry.ranked_contexts() {
				if context.is_empty() {
					assert_eq!(entry.value(), START_TOKEN);
					continue;
				}
				assert_eq!(context.entries().first().copied(), model.lookup(START_TOKEN));
				for id in context.entries() {
					assert!(id.index() < model.unique_word_count());
				}
			}
		}
	}
}

#[test]
fn test_ordering_twice_is_identical() {
	for mut model in models() {
		model.order_descending_by_frequency();
		let ids = model.ranked_ids();
		let report = model.render_frequency_report().unwrap();
		let dictionary = model.render_dictionary();

		model.order_descending_by_frequency();
		assert!(model.is_ordered());
		assert_eq!(model.ranked_ids(), ids);
		assert_eq!(model.render_frequency_report().unwrap(), report);
		assert_eq!(model.render_dictionary(), dictionary);
	}
}

#[test]
fn test_ordering_does_not_change_answers() {
	for mut model in models() {
		let before: Vec<_> = model
			.words()
			.iter()
			.map(|w| (w.value().to_owned(), w.suggest_top_n(3).join(" ")))
			.collect();
		model.order_descending_by_frequency();
		let after: Vec<_> = model
			.words()
			.iter()
			.map(|w| (w.value().to_owned(), w.suggest_top_n(3).join(" ")))
			.collect();
		assert_eq!(before, after);
	}
}

#[test]
fn test_two_sentence_scenario() {
	let mut model = VocabularyModel::new();
	model.train([["the", "cat", "sat"], ["the", "dog", "ran"]]);

	assert_eq!(model.find("the").unwrap().successors(), vec![("cat", 1), ("dog", 1)]);
	assert_eq!(model.suggest_top_n("the", 2), vec!["cat", "dog"]);
	assert_eq!(model.next_word_probability("the", "cat"), Decimal::new(5, 1));
	assert_eq!(model.suggest_next("unknownword"), None);
	assert!(matches!(model.find("unknownword"), Err(PredictionError::NotFound(_))));
}

#[test]
fn test_training_in_pieces_matches_training_at_once() {
	let tokenizer = PlainTextTokenizer::new();
	let sentences = tokenizer.sentences(CORPORA[3]);

	let mut at_once = VocabularyModel::new();
	at_once.train(&sentences);

	let mut reversed = VocabularyModel::new();
	reversed.train(sentences.iter().rev());

	let (head, tail) = sentences.split_at(2);
	let mut merged = VocabularyModel::new();
	merged.train(head);
	let mut other = VocabularyModel::new();
	other.train(tail);
	merged.merge(&other);

	for model in [&reversed, &merged] {
		assert_eq!(model.unique_word_count(), at_once.unique_word_count());
		assert_eq!(model.total_sample_size(), at_once.total_sample_size());
		for word in at_once.words() {
			let other = model.find(word.value()).unwrap();
			assert_eq!(word.absolute_frequency(), other.absolute_frequency());
			for (next, count) in word.successors() {
				assert_eq!(other.frequency_of(next), count);
			}
		}
	}
}

#[test]
fn test_generated_sentences_follow_observed_links() {
	let mut model = VocabularyModel::new();
	model.train_text(&PlainTextTokenizer::new(), CORPORA[3]);

	let mut rng = StdRng::seed_from_u64(2024);
	for _ in 0..20 {
		let sentence = model.generate_sentence(&mut rng);
		assert!(!sentence.is_empty());
		assert!(sentence.len() <= model.config().max_generated_words());

		let mut previous = START_TOKEN;
		for word in sentence {
			assert!(model.find(previous).unwrap().frequency_of(word) > 0);
			previous = word;
		}
	}

	let mut config = ModelConfig::default();
	config.set_max_generated_words(1).unwrap();
	model.set_config(config);
	assert_eq!(model.generate_sentence(&mut rng).len(), 1);
}
