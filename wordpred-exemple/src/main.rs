use std::env;

use rand::SeedableRng;
use rand::rngs::StdRng;

use wordpred_core::model::token::START_TOKEN;
use wordpred_core::tokenizer::PlainTextTokenizer;
use wordpred_core::{ModelStore, VocabularyModel};

const SAMPLE_TEXT: &str = "The cat sat on the mat. The dog sat on the log. \
	The cat chased the dog! Did the dog chase the cat? The dog ran away.";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug shows training and persistence details
    env_logger::init();

    let tokenizer = PlainTextTokenizer::new();

    // Train from the given text file (a .bin snapshot is written next to it
    // and reused on the next run), or from the built-in sample
    let mut model = match env::args().nth(1) {
        Some(corpus) => ModelStore::load_or_train(&corpus, &tokenizer)?,
        None => {
            let mut model = VocabularyModel::new();
            model.train_text(&tokenizer, SAMPLE_TEXT);
            model
        }
    };
    model.order_descending_by_frequency();

    println!("{} unique words, {} samples", model.unique_word_count(), model.total_sample_size());

    // Save as JSON and load it back
    let store = ModelStore::new("model.json");
    if !store.save(&model) {
        println!("Nothing to save");
        return Ok(());
    }
    let model = store.load();

    // Suggestions
    for word in ["the", "dog", "unknownword"] {
        match model.suggest_next(word) {
            Some(next) => println!("After '{}': '{}' (top 3: {:?})", word, next, model.suggest_top_n(word, 3)),
            None => println!("After '{}': no suggestion", word),
        }
    }
    println!("Sentence openers: {:?}", model.suggest_top_n(START_TOKEN, 3));

    // Probabilities
    println!("P(cat | the) = {}", model.next_word_probability("the", "cat"));
    println!("share of 'the cat' = {}", model.next_word_frequency_fraction("the", "cat"));
    println!("popularity of 'cat' = {}", model.next_word_popularity("the", "cat"));

    // Statistics
    println!("variance of 'the' = {}", model.variance_of("the"));
    println!(
        "global variance = {}, deviation = {}",
        model.global_variance(),
        model.global_standard_deviation()
    );

    for line in model.render_dictionary().iter().take(5) {
        println!("{}", line);
    }
    print!("{}", model.render_frequency_report()?);

    // Generate a few sentences
    let mut rng = StdRng::seed_from_u64(7);
    for i in 0..3 {
        println!("Generated sentence {}: {}", i + 1, model.generate_sentence(&mut rng).join(" "));
    }

    Ok(())
}
