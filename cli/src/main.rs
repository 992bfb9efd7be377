use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use lines_core::*;

use render::render;
use store::FileStore;

mod render;
mod store;

/// Move balls along free paths and line up five of a color to clear them.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// File the game is saved to after every move.
    #[arg(long, default_value = "game_save.json")]
    save_file: PathBuf,

    /// Seed for ball colors and placement, random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Start a new game even if a saved one exists.
    #[arg(long)]
    new: bool,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Command {
    Click(Coord2),
    NewGame,
    Quit,
}

/// Parses `row col` (1-based), `new` or `quit`.
fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let first = words.next()?;
    match first {
        "q" | "quit" | "exit" => Some(Command::Quit),
        "n" | "new" => Some(Command::NewGame),
        _ => {
            let row: Coord = first.parse().ok()?;
            let col: Coord = words.next()?.parse().ok()?;
            if words.next().is_some() {
                return None;
            }
            Some(Command::Click((row.checked_sub(1)?, col.checked_sub(1)?)))
        }
    }
}

fn prompt(out: &mut impl Write, text: &str) -> io::Result<()> {
    write!(out, "{}", text)?;
    out.flush()
}

/// Text shown once the game has ended, whether it ended this run or was resumed finished.
fn game_over_summary<S: SaveStore, G: BallGenerator>(session: &Session<S, G>) -> Option<String> {
    if !session.engine().is_game_over() {
        return None;
    }
    Some(format!(
        "Game over! No more moves available.\nFinal score: {}\n",
        session.scores().score()
    ))
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let seed = args.seed.unwrap_or_else(rand::random);
    log::debug!("seed {}, save file {}", seed, args.save_file.display());

    let store = FileStore::new(&args.save_file);
    let mut session = Session::open(GameConfig::CLASSIC, RandomBallGenerator::new(seed), store);
    session.subscribe(|event| {
        if let GameEvent::SaveFailed = event {
            eprintln!("warning: the game could not be saved");
        }
    });
    if args.new {
        session.start_new_game();
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut lines = stdin.lock().lines();

    loop {
        write!(stdout, "\n{}", render(session.engine(), session.scores()))?;

        if let Some(summary) = game_over_summary(&session) {
            write!(stdout, "{}", summary)?;
            prompt(&mut stdout, "Play again? [y/N] ")?;
            let answer = lines.next().transpose().context("reading input")?;
            if answer.is_some_and(|a| a.trim().eq_ignore_ascii_case("y")) {
                session.start_new_game();
                continue;
            }
            break;
        }

        prompt(&mut stdout, "row col | new | quit > ")?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("reading input")?;

        match parse_command(&line) {
            Some(Command::Quit) => break,
            Some(Command::NewGame) => {
                session.start_new_game();
            }
            Some(Command::Click(coords)) => {
                let outcome = session.click(coords);
                log::trace!("click {:?}: {:?}", coords, outcome);
                if let ClickOutcome::Moved(turn) = outcome {
                    if let Some(report) = turn.report().filter(|report| !report.is_empty()) {
                        writeln!(stdout, "Cleared {} balls for {} points", report.cleared, report.points())?;
                    }
                }
            }
            None => writeln!(stdout, "unrecognized input: {:?}", line.trim())?,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_based_coordinates() {
        assert_eq!(parse_command("1 9"), Some(Command::Click((0, 8))));
        assert_eq!(parse_command("  5   5 "), Some(Command::Click((4, 4))));
    }

    #[test]
    fn rejects_zero_and_garbage() {
        assert_eq!(parse_command("0 3"), None);
        assert_eq!(parse_command("3"), None);
        assert_eq!(parse_command("1 2 3"), None);
        assert_eq!(parse_command("left"), None);
        assert_eq!(parse_command(""), None);
    }

    #[test]
    fn parses_keywords() {
        assert_eq!(parse_command("new"), Some(Command::NewGame));
        assert_eq!(parse_command("q"), Some(Command::Quit));
    }

    #[test]
    fn running_game_has_no_summary() {
        let session = Session::open(GameConfig::CLASSIC, RandomBallGenerator::new(1), MemoryStore::default());

        assert_eq!(game_over_summary(&session), None);
    }

    #[test]
    fn resumed_finished_game_shows_summary() {
        let mut engine = BoardEngine::with_seed(GameConfig::CLASSIC, 1);
        for pos in iter_coords(engine.size()) {
            let color = BallColor::ALL[(usize::from(pos.0) + 3 * usize::from(pos.1)) % 5];
            engine.place(pos, Cell::Ball(color)).unwrap();
        }
        let json = SaveRecord::capture(&engine, &Scoreboard::new(42, 42)).to_json().unwrap();
        let store = MemoryStore {
            bytes: Some(json.into_bytes()),
        };

        let session = Session::open(GameConfig::CLASSIC, RandomBallGenerator::new(1), store);
        let summary = game_over_summary(&session).unwrap();

        assert!(summary.starts_with("Game over!"));
        assert!(summary.contains("Final score: 42"));
    }

    #[test]
    fn args_have_defaults() {
        let args = Args::parse_from(["lines"]);

        assert_eq!(args.save_file, PathBuf::from("game_save.json"));
        assert_eq!(args.seed, None);
        assert!(!args.new);
    }
}
