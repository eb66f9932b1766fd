use crate::feedback::GuessResult;
use crate::session::{Outcome, Recommendation, Session, Turn};
use crate::{debug_log, info_log};

/// What the user asked for at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Guess(String),
    /// Play the current recommendation as the next guess.
    TakeSuggestion,
    ShowRemaining,
    NewGame,
    Exit,
}

/// Everything the game loop needs from a front end.
///
/// `read_action` and `read_feedback` return `None` when the input was
/// unusable; the loop then simply asks again.
pub trait GameInterface {
    fn display_welcome(&mut self, word_count: usize);
    fn read_action(&mut self) -> Option<UserAction>;
    fn read_feedback(&mut self, guess: &str) -> Option<GuessResult>;
    fn display_board(&mut self, turns: &[Turn], remaining: &[String]);
    fn display_recommendation(&mut self, recommendation: &Recommendation);
    fn display_remaining(&mut self, remaining: &[String]);
    fn display_error(&mut self, message: &str);
    fn display_game_over(&mut self, outcome: &Outcome);
    fn display_exit_message(&mut self);
    fn display_new_game_message(&mut self, word_count: usize);
}

pub fn game_loop<I: GameInterface>(session: &mut Session<'_>, interface: &mut I) {
    interface.display_welcome(session.wordbank().len());
    show_progress(session, interface);

    loop {
        let Some(action) = interface.read_action() else {
            continue;
        };
        debug_log!("game_loop() - action {:?}", action);

        match action {
            UserAction::Exit => {
                interface.display_exit_message();
                break;
            }
            UserAction::NewGame => {
                session.reset();
                info_log!("New game with {} words", session.remaining().len());
                interface.display_new_game_message(session.remaining().len());
                show_progress(session, interface);
            }
            UserAction::ShowRemaining => interface.display_remaining(session.remaining()),
            UserAction::Guess(word) => play_turn(session, interface, &word),
            UserAction::TakeSuggestion => match session.recommend() {
                Ok(recommendation) => play_turn(session, interface, &recommendation.guess),
                Err(e) => interface.display_error(&e.to_string()),
            },
        }
    }
}

fn play_turn<I: GameInterface>(session: &mut Session<'_>, interface: &mut I, word: &str) {
    if session.is_complete() {
        interface.display_error("This game is over. Start a new game or exit.");
        return;
    }
    let guess = match session.check_guess(word) {
        Ok(guess) => guess,
        Err(e) => {
            interface.display_error(&e.to_string());
            return;
        }
    };
    let Some(result) = interface.read_feedback(&guess) else {
        return;
    };
    if let Err(e) = session.add_guess(&guess, result) {
        interface.display_error(&e.to_string());
        return;
    }
    show_progress(session, interface);
}

fn show_progress<I: GameInterface>(session: &Session<'_>, interface: &mut I) {
    interface.display_board(session.turns(), session.remaining());
    if let Some(outcome) = session.outcome() {
        interface.display_game_over(&outcome);
    } else if let Ok(recommendation) = session.recommend() {
        interface.display_recommendation(&recommendation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionOptions;
    use std::collections::VecDeque;

    /// Replays scripted input and records what was displayed.
    #[derive(Default)]
    struct ScriptedInterface {
        actions: VecDeque<UserAction>,
        feedback: VecDeque<GuessResult>,
        errors: Vec<String>,
        recommendations: Vec<Recommendation>,
        outcomes: Vec<Outcome>,
        remaining_shown: Vec<usize>,
        boards: Vec<(usize, usize)>,
        new_games: usize,
        exited: bool,
    }

    impl ScriptedInterface {
        fn new(actions: Vec<UserAction>, feedback: &[&str]) -> Self {
            Self {
                actions: actions.into(),
                feedback: feedback.iter().map(|f| f.parse().unwrap()).collect(),
                ..Self::default()
            }
        }
    }

    impl GameInterface for ScriptedInterface {
        fn display_welcome(&mut self, _word_count: usize) {}

        fn read_action(&mut self) -> Option<UserAction> {
            Some(self.actions.pop_front().unwrap_or(UserAction::Exit))
        }

        fn read_feedback(&mut self, _guess: &str) -> Option<GuessResult> {
            self.feedback.pop_front()
        }

        fn display_board(&mut self, turns: &[Turn], remaining: &[String]) {
            self.boards.push((turns.len(), remaining.len()));
        }

        fn display_recommendation(&mut self, recommendation: &Recommendation) {
            self.recommendations.push(recommendation.clone());
        }

        fn display_remaining(&mut self, remaining: &[String]) {
            self.remaining_shown.push(remaining.len());
        }

        fn display_error(&mut self, message: &str) {
            self.errors.push(message.to_string());
        }

        fn display_game_over(&mut self, outcome: &Outcome) {
            self.outcomes.push(outcome.clone());
        }

        fn display_exit_message(&mut self) {
            self.exited = true;
        }

        fn display_new_game_message(&mut self, _word_count: usize) {
            self.new_games += 1;
        }
    }

    fn wordbank() -> Vec<String> {
        ["crane", "slate", "plate", "grate", "glass"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn guess(word: &str) -> UserAction {
        UserAction::Guess(word.to_string())
    }

    #[test]
    fn test_game_loop_immediate_exit() {
        let bank = wordbank();
        let mut session = Session::new(&bank, SessionOptions::default());
        let mut ui = ScriptedInterface::new(vec![UserAction::Exit], &[]);
        game_loop(&mut session, &mut ui);
        assert!(ui.exited);
        assert_eq!(ui.recommendations.len(), 1);
    }

    #[test]
    fn test_game_loop_narrows_and_solves() {
        let bank = wordbank();
        let mut session = Session::new(&bank, SessionOptions::default());
        let mut ui =
            ScriptedInterface::new(vec![guess("crane"), guess("slate")], &["XXGXG", "GGGGG"]);
        game_loop(&mut session, &mut ui);
        assert_eq!(session.turns().len(), 2);
        assert_eq!(ui.outcomes, vec![Outcome::Solved("slate".to_string())]);
    }

    #[test]
    fn test_game_loop_reports_invalid_guess() {
        let bank = wordbank();
        let mut session = Session::new(&bank, SessionOptions::default());
        let mut ui = ScriptedInterface::new(vec![guess("zebra")], &[]);
        game_loop(&mut session, &mut ui);
        assert_eq!(ui.errors, vec!["'zebra' is not in the word bank".to_string()]);
        assert!(session.turns().is_empty());
    }

    #[test]
    fn test_game_loop_skips_turn_without_feedback() {
        let bank = wordbank();
        let mut session = Session::new(&bank, SessionOptions::default());
        let mut ui = ScriptedInterface::new(vec![guess("crane")], &[]);
        game_loop(&mut session, &mut ui);
        assert!(session.turns().is_empty());
    }

    #[test]
    fn test_game_loop_take_suggestion() {
        let bank = wordbank();
        let mut session = Session::new(&bank, SessionOptions::default());
        let expected = session.recommend().unwrap().guess;
        let mut ui = ScriptedInterface::new(vec![UserAction::TakeSuggestion], &["XXXXX"]);
        game_loop(&mut session, &mut ui);
        assert_eq!(session.turns()[0].guess, expected);
    }

    #[test]
    fn test_game_loop_refuses_guess_after_game_over() {
        let bank = wordbank();
        let mut session = Session::new(&bank, SessionOptions::default());
        let mut ui = ScriptedInterface::new(vec![guess("glass"), guess("crane")], &["GGGGG"]);
        game_loop(&mut session, &mut ui);
        assert_eq!(session.turns().len(), 1);
        assert_eq!(ui.errors.len(), 1);
    }

    #[test]
    fn test_game_loop_new_game_resets_session() {
        let bank = wordbank();
        let mut session = Session::new(&bank, SessionOptions::default());
        let mut ui = ScriptedInterface::new(
            vec![guess("crane"), UserAction::NewGame, UserAction::ShowRemaining],
            &["XXGXG"],
        );
        game_loop(&mut session, &mut ui);
        assert_eq!(ui.new_games, 1);
        assert!(session.turns().is_empty());
        assert_eq!(ui.remaining_shown, vec![bank.len()]);
    }

    #[test]
    fn test_game_loop_shows_full_board_at_start_and_new_game() {
        let bank = wordbank();
        let mut session = Session::new(&bank, SessionOptions::default());
        let mut ui =
            ScriptedInterface::new(vec![guess("crane"), UserAction::NewGame], &["XXGXG"]);
        game_loop(&mut session, &mut ui);
        assert_eq!(ui.boards, vec![(0, bank.len()), (1, 2), (0, bank.len())]);
    }

    #[test]
    fn test_game_loop_no_candidates() {
        let bank = wordbank();
        let mut session = Session::new(&bank, SessionOptions::default());
        let mut ui = ScriptedInterface::new(vec![guess("crane")], &["XXXXX"]);
        game_loop(&mut session, &mut ui);
        assert_eq!(ui.outcomes, vec![Outcome::NoCandidates]);
    }
}
