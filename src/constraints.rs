//! Accumulated knowledge from every guess seen so far.
//!
//! A [`ConstraintState`] only ever narrows: absorbing a guess can pin a letter
//! to a position, rule a letter out of a position, raise a letter's minimum
//! count or lower its maximum count. Nothing is ever relaxed.

use crate::error::ValidationError;
use crate::feedback::{GuessResult, LetterFeedback};
use crate::{ALPHABET_SIZE, WORD_LENGTH, debug_log, letter_index};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintState {
    exact: [Option<u8>; WORD_LENGTH],
    excluded: [[bool; WORD_LENGTH]; ALPHABET_SIZE],
    min_count: [u8; ALPHABET_SIZE],
    max_count: [Option<u8>; ALPHABET_SIZE],
    contradicted: bool,
}

/// Creates a state that every well-formed word satisfies.
#[must_use]
pub fn new_constraint_state() -> ConstraintState {
    ConstraintState::default()
}

/// Absorbs one observation into `state` and hands it back.
pub fn absorb(
    mut state: ConstraintState,
    guess: &str,
    result: &GuessResult,
) -> Result<ConstraintState, ValidationError> {
    state.absorb(guess, result)?;
    Ok(state)
}

impl ConstraintState {
    /// Narrows the state with the feedback `result` received for `guess`.
    ///
    /// The observation is validated before anything changes, so an error
    /// leaves the state exactly as it was.
    pub fn absorb(
        &mut self,
        guess: &str,
        result: &GuessResult,
    ) -> Result<&mut Self, ValidationError> {
        let letters = validate_guess(guess)?;
        if result.len() != WORD_LENGTH {
            return Err(ValidationError::WrongFeedbackLength {
                len: result.len(),
                expected: WORD_LENGTH,
            });
        }
        let marks = result.marks();

        // Per-letter tallies for this guess only; earlier guesses may have seen
        // the same letter with a different count.
        let mut confirmed = [0u8; ALPHABET_SIZE];
        let mut absent = [false; ALPHABET_SIZE];

        for (i, (&letter, &mark)) in letters.iter().zip(marks).enumerate() {
            let idx = usize::from(letter - b'a');
            match mark {
                LetterFeedback::Exact => {
                    match self.exact[i] {
                        Some(known) if known != letter => {
                            log::warn!(
                                "position {} already pinned to '{}', now '{}' in '{}'",
                                i,
                                char::from(known),
                                char::from(letter),
                                guess
                            );
                            self.contradicted = true;
                        }
                        _ => self.exact[i] = Some(letter),
                    }
                    confirmed[idx] += 1;
                }
                LetterFeedback::Present => {
                    self.excluded[idx][i] = true;
                    confirmed[idx] += 1;
                }
                LetterFeedback::Absent => absent[idx] = true,
            }
        }

        for idx in 0..ALPHABET_SIZE {
            let k = confirmed[idx];
            if k > 0 {
                self.min_count[idx] = self.min_count[idx].max(k);
                if absent[idx] {
                    self.lower_max_count(idx, k);
                }
            } else if absent[idx] && self.min_count[idx] == 0 {
                self.lower_max_count(idx, 0);
            }
        }

        debug_log!("absorbed '{}' {} -> {:?}", guess, result, self);
        Ok(self)
    }

    /// Returns `true` iff `word` is consistent with everything absorbed so far.
    #[must_use]
    pub fn is_satisfied_by(&self, word: &str) -> bool {
        if self.contradicted {
            return false;
        }
        let letters = word.as_bytes();
        if letters.len() != WORD_LENGTH {
            return false;
        }

        let mut counts = [0u8; ALPHABET_SIZE];
        for (i, &letter) in letters.iter().enumerate() {
            let Some(idx) = letter_index(letter) else {
                return false;
            };
            if self.excluded[idx][i] {
                return false;
            }
            if let Some(known) = self.exact[i]
                && known != letter
            {
                return false;
            }
            counts[idx] += 1;
        }

        (0..ALPHABET_SIZE).all(|idx| {
            let count = counts[idx];
            let must_appear = self.excluded[idx].iter().any(|&e| e);
            (!must_appear || count > 0)
                && count >= self.min_count[idx]
                && self.max_count[idx].is_none_or(|max| count <= max)
        })
    }

    /// The letter known to sit at `position`, if any.
    #[must_use]
    pub fn exact(&self, position: usize) -> Option<char> {
        self.exact.get(position).copied().flatten().map(char::from)
    }

    /// Positions where `letter` is known not to be.
    #[must_use]
    pub fn excluded_positions(&self, letter: char) -> Vec<usize> {
        Self::index_of(letter)
            .map(|idx| {
                self.excluded[idx]
                    .iter()
                    .enumerate()
                    .filter_map(|(i, &e)| e.then_some(i))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[must_use]
    pub fn min_count(&self, letter: char) -> u8 {
        Self::index_of(letter).map_or(0, |idx| self.min_count[idx])
    }

    /// `None` means no upper bound is known.
    #[must_use]
    pub fn max_count(&self, letter: char) -> Option<u8> {
        Self::index_of(letter).and_then(|idx| self.max_count[idx])
    }

    /// Two observations pinned different letters to the same position.
    #[must_use]
    pub fn is_contradicted(&self) -> bool {
        self.contradicted
    }

    fn lower_max_count(&mut self, idx: usize, count: u8) {
        let max = self.max_count[idx].map_or(count, |known| known.min(count));
        self.max_count[idx] = Some(max);
    }

    fn index_of(letter: char) -> Option<usize> {
        u8::try_from(letter).ok().and_then(letter_index)
    }
}

fn validate_guess(guess: &str) -> Result<&[u8], ValidationError> {
    let len = guess.chars().count();
    if len != WORD_LENGTH {
        return Err(ValidationError::WrongGuessLength {
            guess: guess.to_string(),
            len,
            expected: WORD_LENGTH,
        });
    }
    if let Some(letter) = guess.chars().find(|c| !c.is_ascii_lowercase()) {
        return Err(ValidationError::InvalidLetter {
            guess: guess.to_string(),
            letter,
        });
    }
    Ok(guess.as_bytes())
}
