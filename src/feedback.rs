//! Per-letter feedback for a single guess.
//!
//! Feedback is typed as a string of marks, one per letter:
//! `G` (or `2`) for an exact match, `Y` (or `1`) for a letter that is present
//! elsewhere and `X`, `B` (or `0`) for an absent letter.

use crate::error::ValidationError;
use crate::{ALPHABET_SIZE, WORD_LENGTH, letter_index};
use std::fmt;
use std::str::FromStr;

/// Feedback for one letter of a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterFeedback {
    /// Correct letter in the correct position (green)
    Exact,
    /// Letter is in the word, but not here (yellow)
    Present,
    /// Letter is not in the word, or not more often than already confirmed (gray)
    Absent,
}

impl LetterFeedback {
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'G' | '2' => Some(Self::Exact),
            'Y' | '1' => Some(Self::Present),
            'X' | 'B' | '0' => Some(Self::Absent),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Self::Exact => 'G',
            Self::Present => 'Y',
            Self::Absent => 'X',
        }
    }

    #[must_use]
    pub fn emoji(self) -> char {
        match self {
            Self::Exact => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }
}

/// The outcome of one guess: one mark per letter position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GuessResult {
    marks: Vec<LetterFeedback>,
}

impl GuessResult {
    /// Wraps the given marks. Length is checked when the result is absorbed,
    /// not here.
    #[must_use]
    pub fn new(marks: Vec<LetterFeedback>) -> Self {
        Self { marks }
    }

    /// Computes the feedback an honest game would give for `guess` when the
    /// answer is `answer`.
    ///
    /// Exact matches are assigned first. Present marks then consume the
    /// unmatched answer letters from left to right, so a letter guessed more
    /// often than it occurs gets Absent for the surplus.
    #[must_use]
    pub fn score(guess: &str, answer: &str) -> Self {
        let guess = guess.as_bytes();
        let answer = answer.as_bytes();
        let mut marks = vec![LetterFeedback::Absent; guess.len()];
        let mut unmatched = [0u8; ALPHABET_SIZE];

        for (i, &g) in guess.iter().enumerate() {
            match answer.get(i) {
                Some(&a) if a == g => marks[i] = LetterFeedback::Exact,
                Some(&a) => {
                    if let Some(idx) = letter_index(a) {
                        unmatched[idx] += 1;
                    }
                }
                None => {}
            }
        }

        for (i, &g) in guess.iter().enumerate() {
            if marks[i] == LetterFeedback::Exact {
                continue;
            }
            if let Some(idx) = letter_index(g)
                && unmatched[idx] > 0
            {
                marks[i] = LetterFeedback::Present;
                unmatched[idx] -= 1;
            }
        }

        Self { marks }
    }

    #[must_use]
    pub fn marks(&self) -> &[LetterFeedback] {
        &self.marks
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    #[must_use]
    pub fn is_solved(&self) -> bool {
        !self.marks.is_empty() && self.marks.iter().all(|m| *m == LetterFeedback::Exact)
    }

    #[must_use]
    pub fn to_emoji_string(&self) -> String {
        self.marks.iter().map(|m| m.emoji()).collect()
    }
}

impl FromStr for GuessResult {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let marks = s
            .chars()
            .map(|c| LetterFeedback::from_char(c).ok_or(ValidationError::UnknownMark(c)))
            .collect::<Result<Vec<_>, _>>()?;
        if marks.len() != WORD_LENGTH {
            return Err(ValidationError::WrongFeedbackLength {
                len: marks.len(),
                expected: WORD_LENGTH,
            });
        }
        Ok(Self { marks })
    }
}

impl fmt::Display for GuessResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for mark in &self.marks {
            write!(f, "{}", mark.to_char())?;
        }
        Ok(())
    }
}

impl From<[LetterFeedback; WORD_LENGTH]> for GuessResult {
    fn from(marks: [LetterFeedback; WORD_LENGTH]) -> Self {
        Self::new(marks.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LetterFeedback::{Absent, Exact, Present};

    #[test]
    fn test_parse_marks() {
        let result: GuessResult = "GYXXG".parse().unwrap();
        assert_eq!(result.marks(), &[Exact, Present, Absent, Absent, Exact]);
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trims() {
        let result: GuessResult = "  gyxbg \n".parse().unwrap();
        assert_eq!(result.marks(), &[Exact, Present, Absent, Absent, Exact]);
    }

    #[test]
    fn test_parse_digit_marks() {
        let result: GuessResult = "21000".parse().unwrap();
        assert_eq!(result.marks(), &[Exact, Present, Absent, Absent, Absent]);
    }

    #[test]
    fn test_parse_rejects_unknown_mark() {
        assert_eq!(
            "GGGGA".parse::<GuessResult>(),
            Err(ValidationError::UnknownMark('A'))
        );
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        assert_eq!(
            "GGG".parse::<GuessResult>(),
            Err(ValidationError::WrongFeedbackLength {
                len: 3,
                expected: 5
            })
        );
        assert!("GGGGGG".parse::<GuessResult>().is_err());
        assert!("".parse::<GuessResult>().is_err());
    }

    #[test]
    fn test_display_round_trips_marks() {
        let result = GuessResult::from([Exact, Present, Absent, Absent, Exact]);
        assert_eq!(result.to_string(), "GYXXG");
        assert_eq!(result.to_emoji_string(), "🟩🟨⬜⬜🟩");
    }

    #[test]
    fn test_score_all_exact() {
        let result = GuessResult::score("crane", "crane");
        assert!(result.is_solved());
    }

    #[test]
    fn test_score_mixed() {
        // CRANE vs FRAME: C absent, R exact, A exact, N absent, E exact
        let result = GuessResult::score("crane", "frame");
        assert_eq!(result.marks(), &[Absent, Exact, Exact, Absent, Exact]);
    }

    #[test]
    fn test_score_duplicate_letters_against_fewer_occurrences() {
        // glass has two s: one exact at 3, one left over for the first s
        let result = GuessResult::score("sassy", "glass");
        assert_eq!(result.marks(), &[Present, Present, Absent, Exact, Absent]);
    }

    #[test]
    fn test_score_exact_takes_priority_over_present() {
        // The e at position 4 is exact, so the earlier e has nothing left
        let result = GuessResult::score("geese", "crane");
        assert_eq!(result.marks(), &[Absent, Absent, Absent, Absent, Exact]);
    }

    #[test]
    fn test_empty_result_is_not_solved() {
        assert!(!GuessResult::new(Vec::new()).is_solved());
    }
}
