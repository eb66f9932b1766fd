// Library interface for wordle-assistant
// The binary and the integration tests both go through these modules

pub mod cli;
pub mod constraints;
pub mod error;
pub mod feedback;
pub mod game_state;
pub mod logging;
pub mod session;
pub mod solver;
pub mod tui;
pub mod wordbank;

/// Number of letters in every word the assistant handles.
pub const WORD_LENGTH: usize = 5;

/// Number of guesses allowed in one game.
pub const MAX_GUESSES: usize = 6;

/// Letters `a` through `z`.
pub const ALPHABET_SIZE: usize = 26;

pub use constraints::{ConstraintState, absorb, new_constraint_state};
pub use error::{SolverError, ValidationError};
pub use feedback::{GuessResult, LetterFeedback};
pub use game_state::{GameInterface, UserAction, game_loop};
pub use session::{Outcome, Recommendation, Session, SessionOptions, Turn};
pub use solver::{filter, letter_frequencies, score_word, suggest, suggest_probe};
pub use wordbank::{load_wordbank_from_file, load_wordbank_from_str};

/// Maps a lowercase ASCII letter to its index in `0..ALPHABET_SIZE`.
#[must_use]
pub(crate) fn letter_index(letter: u8) -> Option<usize> {
    letter
        .is_ascii_lowercase()
        .then(|| usize::from(letter - b'a'))
}
