use crate::WORD_LENGTH;
use crate::feedback::GuessResult;
use crate::game_state::{GameInterface, UserAction};
use crate::session::{Outcome, Recommendation, Turn};
use crate::wordbank::is_valid_word;
use clap::{ArgAction, Parser};
use std::io::BufRead;
use std::path::PathBuf;

/// Narrows a five-letter word list from guess feedback and suggests the next guess.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list
    #[arg(short = 'i', long = "input", env = "WORDLE_ASSISTANT_WORDS")]
    pub wordbank_path: Option<PathBuf>,

    /// A word already guessed in an in-progress game (repeatable, pair with --answer)
    #[arg(short = 'g', long = "guess", action = ArgAction::Append)]
    pub guesses: Vec<String>,

    /// Feedback for the matching --guess: G=green, Y=yellow, X=gray, e.g. GYXXG
    #[arg(short = 'a', long = "answer", action = ArgAction::Append, value_parser = parse_feedback)]
    pub answers: Vec<GuessResult>,

    /// Only accept guesses that are still possible answers
    #[arg(long)]
    pub hard_mode: bool,

    /// Suggest words from the whole list, even ones already ruled out, when they test more letters
    #[arg(long)]
    pub explore: bool,

    /// Use the line-based prompt instead of the full-screen interface
    #[arg(long)]
    pub plain: bool,

    /// Print a single suggested word and exit
    #[arg(short = 's', long, conflicts_with = "remain")]
    pub suggest: bool,

    /// Print the remaining candidate words and exit
    #[arg(short = 'r', long)]
    pub remain: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbosity: u8,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

fn parse_feedback(s: &str) -> Result<GuessResult, String> {
    s.parse().map_err(|e: crate::error::ValidationError| e.to_string())
}

/// How many words `--remain` and `list` print per row.
pub const WORDS_PER_ROW: usize = 20;

/// Lays `words` out in tab-separated rows of `per_row`.
#[must_use]
pub fn format_columns(words: &[String], per_row: usize) -> String {
    words
        .chunks(per_row.max(1))
        .map(|row| row.join("\t"))
        .collect::<Vec<_>>()
        .join("\n")
}

// UI Input/Output functions

pub enum GuessInput {
    Action(UserAction),
    Invalid,
}

pub fn read_guess<R: BufRead>(reader: &mut R) -> GuessInput {
    println!(
        "\nEnter your guess ({WORD_LENGTH} letters), 'take' for the suggestion, 'list', \
         'next' for a new game, or 'exit':"
    );
    let Some(input) = read_trimmed_line(reader) else {
        return GuessInput::Action(UserAction::Exit);
    };

    match input.to_lowercase().as_str() {
        "exit" | "quit" => GuessInput::Action(UserAction::Exit),
        "next" => GuessInput::Action(UserAction::NewGame),
        "take" => GuessInput::Action(UserAction::TakeSuggestion),
        "list" => GuessInput::Action(UserAction::ShowRemaining),
        word if is_valid_word(word) => GuessInput::Action(UserAction::Guess(word.to_string())),
        _ => {
            println!("Invalid guess. Please enter {WORD_LENGTH} letters.");
            GuessInput::Invalid
        }
    }
}

pub fn read_feedback<R: BufRead>(reader: &mut R, guess: &str) -> Option<GuessResult> {
    println!("Enter feedback for '{guess}' (G=green, Y=yellow, X=gray, e.g. GYXXG):");
    let input = read_trimmed_line(reader)?;
    match input.parse() {
        Ok(result) => Some(result),
        Err(e) => {
            println!("Invalid feedback: {e}");
            None
        }
    }
}

/// `None` at end of input or on a read error.
fn read_trimmed_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

pub fn display_board(turns: &[Turn], remaining: &[String]) {
    for turn in turns {
        println!("{} | {}", turn.result.to_emoji_string(), turn.guess);
    }
    println!("{} remaining", remaining.len());
}

pub fn display_recommendation(recommendation: &Recommendation) {
    let category = if recommendation.is_candidate {
        "solution candidate"
    } else {
        "information-gathering"
    };
    println!(
        "Try '{}' (letter score {}) [{category}]",
        recommendation.guess, recommendation.score
    );
}

pub fn display_game_over(outcome: &Outcome) {
    match outcome {
        Outcome::Solved(answer) => println!("The answer is '{answer}'"),
        Outcome::NoCandidates => println!("No valid words remain, check your guesses and feedback"),
        Outcome::OutOfGuesses => println!("Maximum guesses reached"),
    }
}

/// Line-based implementation of the `GameInterface` trait
/// This struct wraps a BufRead reader, so scripted input works as well as stdin
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_welcome(&mut self, word_count: usize) {
        println!("Loaded {word_count} words.");
        println!("| 🟩 -> G | 🟨 -> Y | ⬜ -> X |");
    }

    fn read_action(&mut self) -> Option<UserAction> {
        match read_guess(&mut self.reader) {
            GuessInput::Action(action) => Some(action),
            GuessInput::Invalid => None,
        }
    }

    fn read_feedback(&mut self, guess: &str) -> Option<GuessResult> {
        read_feedback(&mut self.reader, guess)
    }

    fn display_board(&mut self, turns: &[Turn], remaining: &[String]) {
        display_board(turns, remaining);
    }

    fn display_recommendation(&mut self, recommendation: &Recommendation) {
        display_recommendation(recommendation);
    }

    fn display_remaining(&mut self, remaining: &[String]) {
        println!("{}", format_columns(remaining, WORDS_PER_ROW));
    }

    fn display_error(&mut self, message: &str) {
        println!("{message}");
    }

    fn display_game_over(&mut self, outcome: &Outcome) {
        display_game_over(outcome);
        println!("Type 'next' for a new game or 'exit' to quit.");
    }

    fn display_exit_message(&mut self) {
        println!("Exiting.");
    }

    fn display_new_game_message(&mut self, word_count: usize) {
        println!("New game started. Loaded {word_count} words.");
    }
}
