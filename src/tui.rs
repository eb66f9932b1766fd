//! TUI (Terminal User Interface) module for the assistant
//!
//! This module provides an interactive terminal interface using Ratatui.
//!
//! # State Machine
//! The UI follows these state transitions:
//! - `EnteringGuess` → `MarkingFeedback` → `ConfirmingFeedback` → back to `EnteringGuess`
//! - Terminal state: `GameOver` (N starts a new game)

use crate::feedback::{GuessResult, LetterFeedback};
use crate::game_state::{GameInterface, UserAction};
use crate::session::{Outcome, Recommendation, Turn};
use crate::{MAX_GUESSES, WORD_LENGTH, debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const MAX_CANDIDATES_DISPLAY: usize = 10;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);

#[derive(Clone, Copy, PartialEq, Debug)]
enum LetterState {
    Empty,
    Entered,
    Marked(LetterFeedback),
}

impl LetterState {
    fn colors(self) -> (Color, Color) {
        match self {
            Self::Empty | Self::Entered => (Color::DarkGray, Color::White),
            Self::Marked(LetterFeedback::Exact) => (Color::Green, Color::Black),
            Self::Marked(LetterFeedback::Present) => (Color::Yellow, Color::Black),
            Self::Marked(LetterFeedback::Absent) => (Color::Gray, Color::White),
        }
    }

    fn feedback(self) -> Option<LetterFeedback> {
        match self {
            Self::Marked(mark) => Some(mark),
            Self::Empty | Self::Entered => None,
        }
    }
}

#[derive(Debug, Clone)]
struct GuessRow {
    letters: [char; WORD_LENGTH],
    states: [LetterState; WORD_LENGTH],
}

impl GuessRow {
    fn from_guess(guess: &str) -> Self {
        let mut row = Self {
            letters: [' '; WORD_LENGTH],
            states: [LetterState::Empty; WORD_LENGTH],
        };
        for (i, ch) in guess.chars().enumerate().take(WORD_LENGTH) {
            row.letters[i] = ch.to_ascii_uppercase();
            row.states[i] = LetterState::Entered;
        }
        row
    }

    fn from_turn(turn: &Turn) -> Self {
        let mut row = Self::from_guess(&turn.guess);
        for (state, &mark) in row.states.iter_mut().zip(turn.result.marks()) {
            *state = LetterState::Marked(mark);
        }
        row
    }

    /// `None` until every letter has been marked.
    fn result(&self) -> Option<GuessResult> {
        self.states
            .iter()
            .map(|state| state.feedback())
            .collect::<Option<Vec<_>>>()
            .map(GuessResult::new)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TuiState {
    EnteringGuess,
    MarkingFeedback { marking_index: usize },
    ConfirmingFeedback,
    /// Solved, no candidates or out of guesses; the reason is in `message`
    GameOver,
}

/// What a key press in the feedback states amounted to.
enum FeedbackStep {
    Pending,
    Confirmed,
    Cancelled,
    Exit,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    rows: &'a [GuessRow],
    current_input: &'a str,
    state: TuiState,
    remaining: &'a [String],
    recommendation: Option<&'a Recommendation>,
    message: &'a str,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    rows: Vec<GuessRow>,
    current_input: String,
    state: TuiState,
    remaining: Vec<String>,
    recommendation: Option<Recommendation>,
    message: String,
    error_message: String,
    status: String,
    exit_requested: bool,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            rows: Vec::new(),
            current_input: String::new(),
            state: TuiState::EnteringGuess,
            remaining: Vec::new(),
            recommendation: None,
            message: String::new(),
            error_message: String::new(),
            status: "Ready to start".to_string(),
            exit_requested: false,
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    /// Draw the current UI state to the terminal.
    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            rows: &self.rows,
            current_input: &self.current_input,
            state: self.state,
            remaining: &self.remaining,
            recommendation: self.recommendation.as_ref(),
            message: &self.message,
            error_message: &self.error_message,
            status: &self.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    /// Render the complete UI layout using the provided context.
    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(14), // Game board
                Constraint::Min(8),     // Info panel
                Constraint::Length(3),  // Status line
                Constraint::Length(3),  // Instructions
            ])
            .split(f.area());

        Self::render_title(f, chunks[0]);
        Self::render_board(f, chunks[1], ctx);
        Self::render_info(f, chunks[2], ctx);
        Self::render_status(f, chunks[3], ctx.status);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("WORDLE ASSISTANT")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_board(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let block = Block::default().title("Guesses").borders(Borders::ALL);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let available_rows = (inner.height / ROW_SPACING) as usize;
        let showing_current_input =
            ctx.state == TuiState::EnteringGuess && ctx.rows.len() < MAX_GUESSES;
        let rows_needed = ctx.rows.len() + usize::from(showing_current_input);

        // Show the most recent rows when they don't all fit
        let skip_count = rows_needed.saturating_sub(available_rows);
        let marking_row = ctx.rows.len().checked_sub(skip_count + 1);

        for (display_index, row) in ctx.rows.iter().skip(skip_count).enumerate() {
            let marking = match ctx.state {
                TuiState::MarkingFeedback { marking_index }
                    if Some(display_index) == marking_row =>
                {
                    Some(marking_index)
                }
                _ => None,
            };
            Self::render_guess_row(f, inner, display_index, row, marking);
        }

        if showing_current_input {
            let display_row = ctx.rows.len() - skip_count;
            let row = GuessRow::from_guess(ctx.current_input);
            Self::render_guess_row(f, inner, display_row, &row, None);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render_guess_row(
        f: &mut Frame,
        area: Rect,
        row_index: usize,
        row: &GuessRow,
        marking: Option<usize>,
    ) {
        let y = area.y + (row_index as u16 * ROW_SPACING);
        if y >= area.y + area.height {
            return;
        }

        let mut spans = vec![Span::raw("  ")];
        for (letter, state) in row.letters.iter().zip(row.states) {
            let (bg_color, fg_color) = state.colors();
            spans.push(Span::styled(
                format!(" {letter} "),
                Style::default().fg(fg_color).bg(bg_color),
            ));
            spans.push(Span::raw(" "));
        }
        if let Some(index) = marking {
            spans.push(Span::raw(format!(" <- Marking letter {} (G/Y/X)", index + 1)));
        }

        let paragraph = Paragraph::new(Line::from(spans));
        f.render_widget(
            paragraph,
            Rect {
                x: area.x,
                y,
                width: area.width,
                height: 1,
            },
        );
    }

    fn render_info(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();

        if let Some(rec) = ctx.recommendation {
            let category = if rec.is_candidate {
                "solution candidate"
            } else {
                "information-gathering"
            };
            lines.push(Line::from(vec![Span::styled(
                format!(
                    "Recommended: {} (score: {}) [{}]",
                    rec.guess.to_ascii_uppercase(),
                    rec.score,
                    category
                ),
                SUCCESS_STYLE,
            )]));
            lines.push(Line::from(""));
        }

        if !ctx.remaining.is_empty() {
            lines.push(Line::from(vec![Span::styled(
                format!("Possible candidates ({}):", ctx.remaining.len()),
                INFO_STYLE,
            )]));
            let shown: Vec<&str> = ctx
                .remaining
                .iter()
                .take(MAX_CANDIDATES_DISPLAY)
                .map(String::as_str)
                .collect();
            lines.push(Line::from(format!("  {}", shown.join(" "))));
            if ctx.remaining.len() > MAX_CANDIDATES_DISPLAY {
                lines.push(Line::from(format!(
                    "  ... and {} more",
                    ctx.remaining.len() - MAX_CANDIDATES_DISPLAY
                )));
            }
            lines.push(Line::from(""));
        }

        if !ctx.message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.message, MESSAGE_STYLE)]));
        }
        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.error_message, ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: TuiState) {
        let text = match state {
            TuiState::EnteringGuess => {
                "Type a 5-letter guess | TAB: Use recommendation | ENTER: Submit | ESC: Quit"
            }
            TuiState::MarkingFeedback { .. } => {
                "G: Green (correct) | Y: Yellow (wrong position) | X: Gray (not in word) | \
                 BACKSPACE: Go back"
            }
            TuiState::ConfirmingFeedback => "ENTER: Confirm feedback | BACKSPACE: Go back and edit",
            TuiState::GameOver => "N: New Game | ESC: Quit",
        };

        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_status(f: &mut Frame, area: Rect, status: &str) {
        let status_text = if status.is_empty() { "Ready" } else { status };
        let paragraph = Paragraph::new(status_text)
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL).title("Status"));
        f.render_widget(paragraph, area);
    }

    /// Waits briefly for a key press; `None` on timeout or for keys we ignore.
    fn next_key() -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }
        match event::read()? {
            // Only process Press events, ignore Release and Repeat to avoid double input
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if key.modifiers.intersects(KeyModifiers::ALT | KeyModifiers::CONTROL) {
                    debug_log!("next_key() - Ignoring key with modifier: {:?}", key);
                    return Ok(None);
                }
                Ok(Some(key))
            }
            other => {
                debug_log!("next_key() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    fn handle_guess_input(&mut self, key: KeyEvent) -> Option<UserAction> {
        self.error_message.clear();
        match key.code {
            KeyCode::Char(c)
                if c.is_ascii_alphabetic() && self.current_input.len() < WORD_LENGTH =>
            {
                self.current_input.push(c.to_ascii_uppercase());
            }
            KeyCode::Backspace => {
                self.current_input.pop();
            }
            KeyCode::Tab => {
                if let Some(rec) = &self.recommendation {
                    self.current_input = rec.guess.to_ascii_uppercase();
                }
            }
            KeyCode::Enter if self.current_input.len() == WORD_LENGTH => {
                let guess = std::mem::take(&mut self.current_input);
                info_log!("handle_guess_input() - Submitting guess '{}'", guess);
                return Some(UserAction::Guess(guess.to_ascii_lowercase()));
            }
            KeyCode::Enter => {
                self.error_message = format!("Guess must be exactly {WORD_LENGTH} letters!");
            }
            KeyCode::Esc => return Some(UserAction::Exit),
            KeyCode::Char(c) if !c.is_ascii_alphabetic() => {
                self.error_message = format!("Only letters are allowed! ('{c}' is not a letter)");
            }
            _ => {}
        }
        None
    }

    fn handle_feedback_input(&mut self, key: KeyEvent) -> FeedbackStep {
        self.error_message.clear();
        let Some(row) = self.rows.last_mut() else {
            return FeedbackStep::Cancelled;
        };

        match (self.state, key.code) {
            (_, KeyCode::Esc) => return FeedbackStep::Exit,
            (TuiState::MarkingFeedback { marking_index }, KeyCode::Char(c)) => {
                match LetterFeedback::from_char(c) {
                    Some(mark) => {
                        row.states[marking_index] = LetterState::Marked(mark);
                        self.state = if marking_index + 1 < WORD_LENGTH {
                            TuiState::MarkingFeedback {
                                marking_index: marking_index + 1,
                            }
                        } else {
                            TuiState::ConfirmingFeedback
                        };
                    }
                    None => {
                        self.error_message = format!(
                            "Invalid feedback! Use G (green), Y (yellow), or X (gray). \
                             ('{}' is not valid)",
                            c.to_ascii_uppercase()
                        );
                    }
                }
            }
            (TuiState::MarkingFeedback { marking_index: 0 }, KeyCode::Backspace) => {
                // Back out of marking and let the guess be edited again
                let row = self.rows.pop();
                self.current_input = row.map(|r| r.letters.iter().collect()).unwrap_or_default();
                self.state = TuiState::EnteringGuess;
                return FeedbackStep::Cancelled;
            }
            (TuiState::MarkingFeedback { marking_index }, KeyCode::Backspace) => {
                row.states[marking_index - 1] = LetterState::Entered;
                self.state = TuiState::MarkingFeedback {
                    marking_index: marking_index - 1,
                };
            }
            (TuiState::ConfirmingFeedback, KeyCode::Enter) => return FeedbackStep::Confirmed,
            (TuiState::ConfirmingFeedback, KeyCode::Backspace) => {
                row.states[WORD_LENGTH - 1] = LetterState::Entered;
                self.state = TuiState::MarkingFeedback {
                    marking_index: WORD_LENGTH - 1,
                };
            }
            _ => {}
        }
        FeedbackStep::Pending
    }

    fn handle_game_over_input(key: KeyEvent) -> Option<UserAction> {
        match key.code {
            KeyCode::Char('n' | 'N') => Some(UserAction::NewGame),
            KeyCode::Esc => Some(UserAction::Exit),
            _ => None,
        }
    }
}

impl GameInterface for TuiInterface {
    fn display_welcome(&mut self, word_count: usize) {
        self.message = format!("Loaded {word_count} words.");
        self.status = "Ready - Enter your first guess".to_string();
        self.draw_or_log();
    }

    fn read_action(&mut self) -> Option<UserAction> {
        if self.exit_requested {
            return Some(UserAction::Exit);
        }
        loop {
            if self.draw().is_err() {
                info_log!("read_action() - Draw failed, returning Exit");
                return Some(UserAction::Exit);
            }
            let key = match Self::next_key() {
                Ok(Some(key)) => key,
                Ok(None) => continue,
                Err(e) => {
                    info_log!("read_action() - Input error {}, returning Exit", e);
                    return Some(UserAction::Exit);
                }
            };
            let action = if self.state == TuiState::GameOver {
                Self::handle_game_over_input(key)
            } else {
                self.handle_guess_input(key)
            };
            if action.is_some() {
                info_log!("read_action() - Action received: {:?}", action);
                return action;
            }
        }
    }

    fn read_feedback(&mut self, guess: &str) -> Option<GuessResult> {
        self.rows.push(GuessRow::from_guess(guess));
        self.state = TuiState::MarkingFeedback { marking_index: 0 };
        self.status = format!(
            "Guess entered: {} - Mark each letter: G (green), Y (yellow), or X (gray)",
            guess.to_ascii_uppercase()
        );

        loop {
            if self.state == TuiState::ConfirmingFeedback {
                self.status = "Press ENTER to confirm feedback".to_string();
            }
            if self.draw().is_err() {
                debug_log!("read_feedback() - Draw failed");
                self.rows.pop();
                return None;
            }
            let key = match Self::next_key() {
                Ok(Some(key)) => key,
                Ok(None) => continue,
                Err(e) => {
                    debug_log!("read_feedback() - Input error: {}", e);
                    self.exit_requested = true;
                    self.rows.pop();
                    return None;
                }
            };
            match self.handle_feedback_input(key) {
                FeedbackStep::Pending => {}
                FeedbackStep::Confirmed => {
                    let result = self.rows.pop().and_then(|row| row.result());
                    info_log!("read_feedback() - Feedback received: {:?}", result);
                    self.state = TuiState::EnteringGuess;
                    return result;
                }
                FeedbackStep::Cancelled => {
                    self.status = "Feedback cancelled".to_string();
                    return None;
                }
                FeedbackStep::Exit => {
                    self.exit_requested = true;
                    self.rows.pop();
                    return None;
                }
            }
        }
    }

    fn display_board(&mut self, turns: &[Turn], remaining: &[String]) {
        self.rows = turns.iter().map(GuessRow::from_turn).collect();
        self.remaining = remaining.to_vec();
        self.state = TuiState::EnteringGuess;
        self.status = format!("{} remaining", remaining.len());
        self.draw_or_log();
    }

    fn display_recommendation(&mut self, recommendation: &Recommendation) {
        self.recommendation = Some(recommendation.clone());
        self.message = format!(
            "Try '{}' (TAB to use it)",
            recommendation.guess.to_ascii_uppercase()
        );
        self.draw_or_log();
    }

    fn display_remaining(&mut self, remaining: &[String]) {
        self.remaining = remaining.to_vec();
        self.draw_or_log();
    }

    fn display_error(&mut self, message: &str) {
        self.error_message = message.to_string();
        self.draw_or_log();
    }

    fn display_game_over(&mut self, outcome: &Outcome) {
        self.state = TuiState::GameOver;
        self.recommendation = None;
        let (message, status) = match outcome {
            Outcome::Solved(answer) => (
                format!("✓ The answer is {}", answer.to_ascii_uppercase()),
                format!("Game Over - Solution: {}", answer.to_ascii_uppercase()),
            ),
            Outcome::NoCandidates => (
                "No valid words remain. Check your guesses and feedback.".to_string(),
                "Error: No valid candidates found".to_string(),
            ),
            Outcome::OutOfGuesses => (
                "Maximum guesses reached.".to_string(),
                "Game Over - Out of guesses".to_string(),
            ),
        };
        self.message = message;
        self.status = status;
        self.draw_or_log();
    }

    fn display_exit_message(&mut self) {
        self.message = "Exiting...".to_string();
        self.status = "Exiting application...".to_string();
        self.draw_or_log();
    }

    fn display_new_game_message(&mut self, word_count: usize) {
        self.rows.clear();
        self.current_input.clear();
        self.remaining.clear();
        self.recommendation = None;
        self.state = TuiState::EnteringGuess;
        self.message = format!("New game started. Loaded {word_count} words.");
        self.status = "New game - Enter your first guess".to_string();
        self.error_message.clear();
        self.draw_or_log();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
