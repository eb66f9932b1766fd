// Integration tests for the wordle-assistant library
// These tests verify that all modules work together correctly

use std::io::Cursor;
use wordle_assistant::cli::CliInterface;
use wordle_assistant::*;

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// A small corpus with plenty of shared letters and repeats.
fn corpus() -> Vec<String> {
    words(&[
        "crane", "slate", "plate", "grate", "glass", "class", "brass", "sassy", "speed", "creep",
        "sleep", "steep", "sweep", "eerie", "geese", "llama", "apple", "fight", "light", "thumb",
    ])
}

fn is_subsequence(sub: &[String], full: &[String]) -> bool {
    let mut rest = full.iter();
    sub.iter().all(|word| rest.any(|w| w == word))
}

#[test]
fn test_end_to_end_cli_game() {
    // Answer is SLATE: CRANE leaves slate and plate, then SLATE wins
    let wordbank = words(&["crane", "slate", "plate", "grate", "glass"]);
    let input = "CRANE\nXXGXG\nslate\nGGGGG\nexit\n";
    let mut interface = CliInterface::new(Cursor::new(input));
    let mut session = Session::new(&wordbank, SessionOptions::default());

    game_loop(&mut session, &mut interface);

    assert_eq!(session.turns().len(), 2);
    assert_eq!(session.outcome(), Some(Outcome::Solved("slate".to_string())));
}

#[test]
fn test_end_to_end_cli_recovers_from_bad_input() {
    let wordbank = words(&["crane", "slate", "plate", "grate", "glass"]);
    // Bad guess, then bad feedback, then a good round, then end of input
    let input = "cr4ne\ncrane\nGGQXX\ncrane\nXXGXG\n";
    let mut interface = CliInterface::new(Cursor::new(input));
    let mut session = Session::new(&wordbank, SessionOptions::default());

    game_loop(&mut session, &mut interface);

    assert_eq!(session.turns().len(), 1);
    assert_eq!(session.remaining(), words(&["slate", "plate"]).as_slice());
}

#[test]
fn test_honest_feedback_never_eliminates_answer() {
    let corpus = corpus();
    for guess in &corpus {
        for answer in &corpus {
            let result = GuessResult::score(guess, answer);
            let state = absorb(new_constraint_state(), guess, &result).unwrap();
            assert!(
                filter(&corpus, &state).contains(answer),
                "guess {guess} eliminated answer {answer} with {result}"
            );
        }
    }
}

#[test]
fn test_answer_survives_every_guess_chain() {
    let corpus = corpus();
    let n = corpus.len();
    for answer in &corpus {
        for (i, first) in corpus.iter().enumerate() {
            for (j, second) in corpus.iter().enumerate() {
                let third = &corpus[(i + j + 1) % n];
                let mut state = new_constraint_state();
                let mut previous = corpus.clone();

                for guess in [first, second, third] {
                    let result = GuessResult::score(guess, answer);
                    state.absorb(guess, &result).unwrap();
                    let current = filter(&corpus, &state);
                    assert!(
                        current.iter().all(|w| previous.contains(w)),
                        "{first}, {second}, {third} against {answer}: {guess} widened the list"
                    );
                    assert!(
                        current.contains(answer),
                        "{first}, {second}, {third} against {answer}: {guess} dropped the answer"
                    );
                    previous = current;
                }
            }
        }
    }
}

#[test]
fn test_filter_keeps_order_and_is_idempotent() {
    let corpus = corpus();
    for guess in ["sassy", "speed", "eerie", "llama"] {
        for answer in ["glass", "creep", "geese", "apple"] {
            let result = GuessResult::score(guess, answer);
            let state = absorb(new_constraint_state(), guess, &result).unwrap();
            let once = filter(&corpus, &state);
            assert!(is_subsequence(&once, &corpus));
            assert_eq!(filter(&once, &state), once);
        }
    }
}

#[test]
fn test_absorbing_only_narrows() {
    let corpus = corpus();
    let answer = "sweep";
    let mut state = new_constraint_state();
    let mut previous = filter(&corpus, &state);

    for guess in ["eerie", "speed", "steep", "sweep"] {
        let result = GuessResult::score(guess, answer);
        state.absorb(guess, &result).unwrap();
        let current = filter(&corpus, &state);
        assert!(
            current.iter().all(|w| previous.contains(w)),
            "{guess} widened the candidate list"
        );
        previous = current;
    }
    assert_eq!(previous, words(&["sweep"]));
}

#[test]
fn test_absorbing_same_observation_twice_changes_nothing() {
    let result = GuessResult::score("speed", "creep");
    let once = absorb(new_constraint_state(), "speed", &result).unwrap();
    let twice = absorb(once.clone(), "speed", &result).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_duplicate_letter_guess_against_glass() {
    let result = GuessResult::score("sassy", "glass");
    assert_eq!(result.to_string(), "YYXGX");

    let state = absorb(new_constraint_state(), "sassy", &result).unwrap();
    assert_eq!(state.min_count('s'), 2);
    assert_eq!(state.max_count('s'), Some(2));

    let candidates = words(&["glass", "class", "brass", "sassy", "asses", "slate"]);
    let remaining = filter(&candidates, &state);
    assert!(remaining.contains(&"glass".to_string()));
    assert!(!remaining.contains(&"asses".to_string()));
    assert!(remaining.iter().all(|w| w.matches('s').count() == 2));
}

#[test]
fn test_exact_letters_narrow_to_matching_words() {
    let candidates = words(&["crane", "slate", "plate", "grate"]);
    let result: GuessResult = "XXGXG".parse().unwrap();
    let state = absorb(new_constraint_state(), "crane", &result).unwrap();
    assert_eq!(filter(&candidates, &state), words(&["slate", "plate"]));
}

#[test]
fn test_suggest_single_and_empty() {
    assert_eq!(suggest(&words(&["abcde"])).unwrap(), "abcde");
    assert!(matches!(suggest(&[]), Err(SolverError::EmptyCandidates)));
}

#[test]
fn test_history_from_command_line_pairs() {
    let wordbank = corpus();
    let guesses = words(&["crane", "slate"]);
    let answers = vec![
        GuessResult::score("crane", "plate"),
        GuessResult::score("slate", "plate"),
    ];
    let session =
        Session::with_history(&wordbank, SessionOptions::default(), &guesses, &answers).unwrap();
    assert_eq!(session.remaining(), words(&["plate"]).as_slice());
    assert_eq!(session.outcome(), Some(Outcome::Solved("plate".to_string())));
    assert!(session.is_complete());
}

#[test]
fn test_custom_wordbank_file_to_game() {
    use std::fs::File;
    use std::io::Write;

    let temp_dir = std::env::temp_dir();
    let wordbank_path = temp_dir.join("test_wordle_assistant_custom_wordbank.txt");
    {
        let mut file = File::create(&wordbank_path).unwrap();
        writeln!(file, "Apple").unwrap();
        writeln!(file, "grape").unwrap();
        writeln!(file, "lemon").unwrap();
        writeln!(file, "melon").unwrap();
        writeln!(file, "kiwi").unwrap();
        writeln!(file, "apple").unwrap();
    }

    let wordbank = load_wordbank_from_file(&wordbank_path).unwrap();
    assert_eq!(wordbank, words(&["apple", "grape", "lemon", "melon"]));

    let mut session = Session::new(&wordbank, SessionOptions::default());
    session
        .add_guess("lemon", GuessResult::score("lemon", "melon"))
        .unwrap();
    assert_eq!(session.remaining(), words(&["melon"]).as_slice());

    let _ = std::fs::remove_file(&wordbank_path);
}
