use std::io::{self, BufRead, Write};
use std::process;
use std::thread;
use std::time::Duration;

use clap::{ArgAction, Parser};
use log::{LevelFilter, Log, Metadata, Record};

use chess_rules::board::{BoardController, Color, MoveRequest, Square, STARTING_FEN};
use chess_rules::engine::{GameConfig, GameSession, PlayerKind, SessionError, SessionStatus};

/// Poll interval while the computer is thinking
const POLL_MS: u64 = 20;

/// Play chess in the terminal against the computer or another human.
///
/// Moves use coordinate notation (`e2e4`, `e7e8q`). At the prompt you may
/// also type `moves <square>`, `fen`, `claim`, `resign`, `pause`, `resume`
/// or `quit`.
#[derive(Parser)]
#[command(name = "chess_rules")]
#[command(about = "Play chess in the terminal")]
#[command(version)]
struct Args {
    /// Who plays white: human, random or minimax
    #[arg(long, default_value = "human")]
    white: PlayerKind,

    /// Who plays black: human, random or minimax
    #[arg(long, default_value = "minimax")]
    black: PlayerKind,

    /// Minimax search depth in plies
    #[arg(short, long, default_value = "2")]
    depth: u32,

    /// Starting position
    #[arg(long, value_name = "FEN", default_value = STARTING_FEN)]
    fen: String,

    /// Seed for the random player
    #[arg(long)]
    seed: Option<u64>,

    /// Log more (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn render_board(controller: &BoardController) -> String {
    let mut out = String::new();
    for row in 0..8 {
        out.push_str(&format!("{} ", 8 - row));
        for col in 0..8 {
            let c = controller
                .piece_info(Square(row, col))
                .map_or('.', |(kind, color)| kind.to_fen_char(color));
            out.push(c);
            out.push(' ');
        }
        out.push('\n');
    }
    out.push_str("  a b c d e f g h\n");
    out
}

enum Prompt {
    Continue,
    Quit,
}

fn handle_command(session: &mut GameSession, color: Color, line: &str) -> Prompt {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Prompt::Continue;
    };
    let result = match command {
        "quit" | "exit" => return Prompt::Quit,
        "fen" => {
            println!("{}", session.fen());
            Ok(())
        }
        "moves" => match words.next().map(str::parse::<Square>) {
            Some(Ok(square)) => {
                let moves: Vec<String> = session
                    .legal_moves(square)
                    .iter()
                    .map(|sq| sq.to_string())
                    .collect();
                println!("{}", moves.join(" "));
                Ok(())
            }
            _ => {
                println!("usage: moves <square>");
                Ok(())
            }
        },
        "claim" => session.claim_draw(color).map(|reason| {
            println!("Draw claimed by {reason}");
        }),
        "resign" => session.resign(color),
        "pause" => session.pause(),
        "resume" => session.resume(),
        notation => match notation.parse::<MoveRequest>() {
            Ok(request) => session.submit_move(request),
            Err(err) => {
                println!("{err}");
                Ok(())
            }
        },
    };
    if let Err(err) = result {
        println!("{err}");
    }
    Prompt::Continue
}

fn run(session: &mut GameSession) -> io::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut shown_fen = String::new();

    loop {
        let fen = session.fen();
        if fen != shown_fen {
            print!("{}", render_board(&session.snapshot()));
            shown_fen = fen;
        }

        let color = match session.status() {
            SessionStatus::Finished(outcome) => {
                println!("{outcome}");
                return Ok(());
            }
            SessionStatus::Paused { turn } => turn,
            SessionStatus::Running { .. } => match session.awaiting_move() {
                Some(color) => color,
                None => {
                    thread::sleep(Duration::from_millis(POLL_MS));
                    continue;
                }
            },
        };

        let paused = matches!(session.status(), SessionStatus::Paused { .. });
        print!("{}{color}> ", if paused { "(paused) " } else { "" });
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        if let Prompt::Quit = handle_command(session, color, line?.trim()) {
            return Ok(());
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = GameConfig::new()
        .with_fen(args.fen)
        .with_players(args.white, args.black)
        .with_search_depth(args.depth);
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut session = match GameSession::new(&config) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    match session.start() {
        Ok(()) | Err(SessionError::GameOver) => {}
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
    if let Err(e) = run(&mut session) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
