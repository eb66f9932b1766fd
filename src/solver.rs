use crate::constraints::ConstraintState;
use crate::error::SolverError;
use crate::{ALPHABET_SIZE, letter_index};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Returns the candidates consistent with `state`, in their original order.
pub fn filter(candidates: &[String], state: &ConstraintState) -> Vec<String> {
    candidates
        .iter()
        .filter(|word| state.is_satisfied_by(word))
        .cloned()
        .collect()
}

/// Counts, for each letter, how many of `words` contain it at least once.
pub fn letter_frequencies(words: &[String]) -> [usize; ALPHABET_SIZE] {
    let mut freq = [0; ALPHABET_SIZE];
    for word in words {
        for idx in distinct_letters(word) {
            freq[idx] += 1;
        }
    }
    freq
}

/// Sums the frequencies of the distinct letters of `word`.
pub fn score_word(word: &str, freq: &[usize; ALPHABET_SIZE]) -> usize {
    distinct_letters(word).map(|idx| freq[idx]).sum()
}

/// Picks the remaining candidate whose distinct letters are most common
/// among the remaining candidates.
///
/// Ties go to the word with more distinct letters, then to the
/// lexicographically smallest word.
pub fn suggest(remaining: &[String]) -> Result<&str, SolverError> {
    let freq = letter_frequencies(remaining);
    remaining
        .iter()
        .map(|word| Scored::new(word, &freq, false))
        .max_by(Scored::rank)
        .map(|scored| scored.word)
        .ok_or(SolverError::EmptyCandidates)
}

/// Picks a guess from `pool` (usually the whole word bank) that best splits
/// `remaining`.
///
/// Letters that every remaining word already contains tell us nothing, so
/// they do not count. Ties prefer words that could still be the answer. With
/// two or fewer candidates left, guessing one of them is always at least as
/// good, so this defers to [`suggest`].
pub fn suggest_probe<'a>(
    pool: &'a [String],
    remaining: &'a [String],
) -> Result<&'a str, SolverError> {
    if remaining.len() <= 2 {
        return suggest(remaining);
    }
    let mut freq = letter_frequencies(remaining);
    for count in &mut freq {
        if *count == remaining.len() {
            *count = 0;
        }
    }
    let candidates: HashSet<&str> = remaining.iter().map(String::as_str).collect();
    pool.iter()
        .map(|word| Scored::new(word, &freq, candidates.contains(word.as_str())))
        .max_by(Scored::rank)
        .map(|scored| scored.word)
        .ok_or(SolverError::EmptyCandidates)
}

struct Scored<'a> {
    word: &'a str,
    score: usize,
    is_candidate: bool,
    distinct: usize,
}

impl<'a> Scored<'a> {
    fn new(word: &'a str, freq: &[usize; ALPHABET_SIZE], is_candidate: bool) -> Self {
        Self {
            word,
            score: score_word(word, freq),
            is_candidate,
            distinct: distinct_letters(word).count(),
        }
    }

    fn rank(a: &Self, b: &Self) -> Ordering {
        a.score
            .cmp(&b.score)
            .then(a.is_candidate.cmp(&b.is_candidate))
            .then(a.distinct.cmp(&b.distinct))
            // Reversed so that `max_by` lands on the smallest word
            .then_with(|| b.word.cmp(a.word))
    }
}

fn distinct_letters(word: &str) -> impl Iterator<Item = usize> + '_ {
    let mut seen = [false; ALPHABET_SIZE];
    word.bytes().filter_map(letter_index).filter(move |&idx| {
        let first = !seen[idx];
        seen[idx] = true;
        first
    })
}
