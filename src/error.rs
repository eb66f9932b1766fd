use thiserror::Error;

/// Malformed input handed to the solver or to a session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("'{guess}' has {len} letters, expected {expected}")]
    WrongGuessLength {
        guess: String,
        len: usize,
        expected: usize,
    },
    #[error("feedback has {len} marks, expected {expected}")]
    WrongFeedbackLength { len: usize, expected: usize },
    #[error("'{letter}' in '{guess}' is not a lowercase letter")]
    InvalidLetter { guess: String, letter: char },
    #[error("'{0}' is not a valid feedback mark (use G, Y or X)")]
    UnknownMark(char),
    #[error("'{0}' is not in the word bank")]
    NotInWordBank(String),
    #[error("'{0}' is not one of the remaining candidates (hard mode)")]
    NotACandidate(String),
    #[error("'{0}' has already been guessed")]
    RepeatedGuess(String),
    #[error("number of guesses ({guesses}) must match number of answers ({answers})")]
    UnpairedHistory { guesses: usize, answers: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("no candidates remain")]
    EmptyCandidates,
}
