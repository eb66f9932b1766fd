use crate::{WORD_LENGTH, info_log};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const EMBEDDED_WORDBANK: &str = include_str!("resources/wordbank.txt");

const WORDBANK_FILE_NAME: &str = "words.txt";

/// `<config dir>/wordle-assistant/words.txt`, if the platform has a config dir.
#[must_use]
pub fn user_wordbank_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(env!("CARGO_PKG_NAME")).join(WORDBANK_FILE_NAME))
}

/// Loads the word bank from `explicit`, then the user word list, then the
/// embedded list, whichever comes first.
pub fn resolve_wordbank(explicit: Option<&Path>) -> io::Result<Vec<String>> {
    if let Some(path) = explicit {
        info_log!("Loading word bank from {}", path.display());
        return load_wordbank_from_file(path);
    }
    if let Some(path) = user_wordbank_path()
        && path.is_file()
    {
        info_log!("Loading user word bank from {}", path.display());
        return load_wordbank_from_file(path);
    }
    info_log!("Using embedded word bank");
    Ok(load_wordbank_from_str(EMBEDDED_WORDBANK))
}

pub fn load_wordbank_from_str(data: &str) -> Vec<String> {
    collect_words(data.lines().map(str::to_string))
}

pub fn load_wordbank_from_file<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let lines = reader.lines().collect::<io::Result<Vec<_>>>()?;
    Ok(collect_words(lines))
}

/// Lowercases and trims each line, drops anything that is not a word of
/// `WORD_LENGTH` ASCII letters, and keeps the first copy of each word.
fn collect_words<I: IntoIterator<Item = String>>(lines: I) -> Vec<String> {
    let mut seen = HashSet::new();
    lines
        .into_iter()
        .map(|line| line.trim().to_lowercase())
        .filter(|word| is_valid_word(word))
        .filter(|word| seen.insert(word.clone()))
        .collect()
}

#[must_use]
pub fn is_valid_word(word: &str) -> bool {
    word.len() == WORD_LENGTH && word.chars().all(|c| c.is_ascii_alphabetic())
}
