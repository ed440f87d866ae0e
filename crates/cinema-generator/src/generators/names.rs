//! Text generators built from the profile vocabularies.

use cinema_core::Vocabulary;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Pick one word of a vocabulary. Empty vocabularies yield an empty string.
pub fn pick_word<R: Rng + ?Sized>(rng: &mut R, words: &[String]) -> String {
    words.choose(rng).cloned().unwrap_or_default()
}

/// A customer or cast member name, `First Last`.
pub fn person_name<R: Rng + ?Sized>(rng: &mut R, vocab: &Vocabulary) -> String {
    let first = pick_word(rng, &vocab.first_names);
    let last = pick_word(rng, &vocab.last_names);
    format!("{first} {last}")
}

pub fn director_name<R: Rng + ?Sized>(rng: &mut R, vocab: &Vocabulary) -> String {
    let first = pick_word(rng, &vocab.director_first_names);
    let last = pick_word(rng, &vocab.director_last_names);
    format!("{first} {last}")
}

/// A title of two to four words from the title vocabulary.
pub fn movie_title<R: Rng + ?Sized>(rng: &mut R, vocab: &Vocabulary) -> String {
    let word_count = rng.random_range(2..=4);
    (0..word_count)
        .map(|_| pick_word(rng, &vocab.title_words))
        .collect::<Vec<_>>()
        .join(" ")
}

/// A phone number with a `+1` prefix and nine digits.
pub fn phone_number<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("+1{}", rng.random_range(100_000_000..1_000_000_000u64))
}

/// Between one and `max` distinct values of a vocabulary, in sampling order.
pub fn distinct_sample<R: Rng + ?Sized>(rng: &mut R, words: &[String], max: usize) -> Vec<String> {
    if words.is_empty() || max == 0 {
        return Vec::new();
    }
    let count = rng.random_range(1..=max.min(words.len()));
    words.choose_multiple(rng, count).cloned().collect()
}
