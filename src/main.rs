use std::io::{self, IsTerminal};
use std::process::ExitCode;
use wordle_assistant::cli::{CliInterface, WORDS_PER_ROW, format_columns, parse_cli};
use wordle_assistant::logging::{self, LogDestination};
use wordle_assistant::tui::TuiInterface;
use wordle_assistant::wordbank::resolve_wordbank;
use wordle_assistant::{Session, SessionOptions, game_loop};

fn main() -> ExitCode {
    let cli = parse_cli();
    let one_shot = cli.suggest || cli.remain;
    let use_tui =
        !one_shot && !cli.plain && io::stdin().is_terminal() && io::stdout().is_terminal();

    let destination = if use_tui {
        LogDestination::File
    } else {
        LogDestination::Stderr
    };
    if let Err(e) = logging::init(cli.verbosity, destination) {
        eprintln!("Warning: logging disabled: {e}");
    }

    let wordbank = match resolve_wordbank(cli.wordbank_path.as_deref()) {
        Ok(words) => words,
        Err(e) => {
            let source = cli
                .wordbank_path
                .as_ref()
                .map_or_else(|| "word list".to_string(), |p| p.display().to_string());
            eprintln!("Failed to load word bank from '{source}': {e}");
            return ExitCode::FAILURE;
        }
    };
    log::info!("Word bank has {} words", wordbank.len());

    let options = SessionOptions {
        hard_mode: cli.hard_mode,
        explore: cli.explore,
    };
    let mut session = match Session::with_history(&wordbank, options, &cli.guesses, &cli.answers) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.remain {
        if io::stdout().is_terminal() {
            println!("{}", format_columns(session.remaining(), WORDS_PER_ROW));
        } else {
            for word in session.remaining() {
                println!("{word}");
            }
        }
        return ExitCode::SUCCESS;
    }

    if cli.suggest {
        return match session.recommend() {
            Ok(recommendation) => {
                println!("{}", recommendation.guess);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("No suggestion: {e}");
                ExitCode::FAILURE
            }
        };
    }

    if use_tui {
        match TuiInterface::new() {
            Ok(mut interface) => {
                game_loop(&mut session, &mut interface);
                return ExitCode::SUCCESS;
            }
            Err(e) => {
                log::warn!("Failed to start full-screen interface: {e}");
                eprintln!("Falling back to the plain prompt ({e})");
            }
        }
    }

    let mut interface = CliInterface::new(io::stdin().lock());
    game_loop(&mut session, &mut interface);
    ExitCode::SUCCESS
}
