//! One game: the word bank, what has been guessed, and what is left.

use crate::constraints::{ConstraintState, new_constraint_state};
use crate::error::{SolverError, ValidationError};
use crate::feedback::GuessResult;
use crate::solver::{filter, letter_frequencies, score_word, suggest, suggest_probe};
use crate::wordbank::is_valid_word;
use crate::{MAX_GUESSES, WORD_LENGTH, info_log};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Guesses must be chosen from the remaining candidates.
    pub hard_mode: bool,
    /// Suggestions may come from the whole word bank, not just the candidates.
    pub explore: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub guess: String,
    pub result: GuessResult,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendation {
    pub guess: String,
    pub score: usize,
    pub is_candidate: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Solved(String),
    NoCandidates,
    OutOfGuesses,
}

pub struct Session<'a> {
    wordbank: &'a [String],
    options: SessionOptions,
    state: ConstraintState,
    remaining: Vec<String>,
    turns: Vec<Turn>,
}

impl<'a> Session<'a> {
    #[must_use]
    pub fn new(wordbank: &'a [String], options: SessionOptions) -> Self {
        Self {
            wordbank,
            options,
            state: new_constraint_state(),
            remaining: wordbank.to_vec(),
            turns: Vec::new(),
        }
    }

    /// Starts a session with an in-progress game already played.
    pub fn with_history(
        wordbank: &'a [String],
        options: SessionOptions,
        guesses: &[String],
        results: &[GuessResult],
    ) -> Result<Self, SolverError> {
        if guesses.len() != results.len() {
            return Err(ValidationError::UnpairedHistory {
                guesses: guesses.len(),
                answers: results.len(),
            }
            .into());
        }
        let mut session = Self::new(wordbank, options);
        for (guess, result) in guesses.iter().zip(results) {
            session.add_guess(guess, result.clone())?;
        }
        Ok(session)
    }

    /// Normalises `word` and checks it may be played next.
    pub fn check_guess(&self, word: &str) -> Result<String, ValidationError> {
        let guess = word.trim().to_lowercase();
        if guess.chars().count() != WORD_LENGTH {
            return Err(ValidationError::WrongGuessLength {
                len: guess.chars().count(),
                guess,
                expected: WORD_LENGTH,
            });
        }
        if !is_valid_word(&guess) {
            let letter = guess
                .chars()
                .find(|c| !c.is_ascii_lowercase())
                .unwrap_or_default();
            return Err(ValidationError::InvalidLetter { guess, letter });
        }
        if self.turns.iter().any(|turn| turn.guess == guess) {
            return Err(ValidationError::RepeatedGuess(guess));
        }
        if self.options.hard_mode {
            if !self.remaining.contains(&guess) {
                return Err(ValidationError::NotACandidate(guess));
            }
        } else if !self.wordbank.contains(&guess) {
            return Err(ValidationError::NotInWordBank(guess));
        }
        Ok(guess)
    }

    /// Records a guess and its feedback and narrows the remaining candidates.
    pub fn add_guess(&mut self, word: &str, result: GuessResult) -> Result<(), SolverError> {
        let guess = self.check_guess(word)?;
        self.state.absorb(&guess, &result)?;
        self.remaining = filter(&self.remaining, &self.state);
        info_log!(
            "Guess '{}' {} leaves {} candidates",
            guess,
            result,
            self.remaining.len()
        );
        self.turns.push(Turn { guess, result });
        Ok(())
    }

    /// The next guess to play, according to the session options.
    ///
    /// Hard mode keeps suggestions inside the remaining candidates, even when
    /// exploring, so a suggestion is always playable.
    pub fn recommend(&self) -> Result<Recommendation, SolverError> {
        let guess = if self.options.explore && !self.options.hard_mode {
            suggest_probe(self.wordbank, &self.remaining)?
        } else {
            suggest(&self.remaining)?
        };
        let freq = letter_frequencies(&self.remaining);
        Ok(Recommendation {
            guess: guess.to_string(),
            score: score_word(guess, &freq),
            is_candidate: self.remaining.iter().any(|w| w == guess),
        })
    }

    /// `None` while the game can still go on.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        if let Some(last) = self.turns.last()
            && last.result.is_solved()
        {
            return Some(Outcome::Solved(last.guess.clone()));
        }
        match self.remaining.as_slice() {
            [] => Some(Outcome::NoCandidates),
            [answer] => Some(Outcome::Solved(answer.clone())),
            _ if self.turns.len() >= MAX_GUESSES => Some(Outcome::OutOfGuesses),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.outcome().is_some()
    }

    /// Forgets every guess and starts over with the full word bank.
    pub fn reset(&mut self) {
        self.state = new_constraint_state();
        self.remaining = self.wordbank.to_vec();
        self.turns.clear();
    }

    #[must_use]
    pub fn remaining(&self) -> &[String] {
        &self.remaining
    }

    #[must_use]
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    #[must_use]
    pub fn state(&self) -> &ConstraintState {
        &self.state
    }

    #[must_use]
    pub fn wordbank(&self) -> &'a [String] {
        self.wordbank
    }
}
