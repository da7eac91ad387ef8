use anyhow::Result;
use clap::Parser;
use peg_solitaire_solver::config::{parse_coord, PuzzleConfig};
use peg_solitaire_solver::engine::{is_on_grid, Coord, Move, Solitaire};
use peg_solitaire_solver::logging;
use peg_solitaire_solver::solver::{solve_dfs, SearchLimits, SearchOutcome};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

/// Play English peg solitaire in the terminal.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Initially empty cell as "row,col"
    #[clap(short, long, value_parser = parse_coord, default_value = "3,3")]
    empty: Coord,

    /// Cell the last peg must end on (defaults to the empty cell)
    #[clap(short, long, value_parser = parse_coord)]
    target: Option<Coord>,

    /// States the hint search may explore before giving up
    #[clap(long, default_value_t = 200_000)]
    hint_limit: u64,

    /// Increase log verbosity (-v debug, -vv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Jump(Move),
    Undo,
    Restart,
    Hint,
    Quit,
}

fn parse_command(input: &str) -> Result<Command, String> {
    match input.trim() {
        "q" => return Ok(Command::Quit),
        "u" => return Ok(Command::Undo),
        "r" => return Ok(Command::Restart),
        "h" => return Ok(Command::Hint),
        _ => {}
    }

    let numbers: Vec<usize> = input
        .split_whitespace()
        .map(|part| part.parse::<usize>())
        .collect::<Result<_, _>>()
        .map_err(|_| "Please enter numbers (e.g. '1 3 3 3'), 'u', 'r', 'h' or 'q'.".to_string())?;
    let [r1, c1, r2, c2] = numbers[..] else {
        return Err("Invalid input format. Use 'r1 c1 r2 c2', 'u', 'r', 'h' or 'q'.".to_string());
    };
    let (from, to): (Coord, Coord) = ((r1, c1), (r2, c2));
    if !is_on_grid(from) || !is_on_grid(to) {
        return Err("Coordinates must be between 0 and 6.".to_string());
    }
    Ok(Command::Jump(Move::new(from, to)))
}

fn play(game: &mut Solitaire, target: Coord, hint_limit: u64, input: &mut impl BufRead) -> Result<()> {
    let mut last_landing = None;
    loop {
        println!("---------------------");
        println!("Steps: {}, Pegs: {}", game.steps(), game.peg_count());
        println!("{}", game.board().to_string_with_highlight(last_landing));

        if game.is_goal(target) {
            println!();
            println!("🎉 SOLVED! One peg left on ({}, {}) 🎉", target.0, target.1);
            println!("Total Steps: {}", game.steps());
            return Ok(());
        }
        if game.is_stuck() {
            println!("No jumps left with {} pegs on the board. Undo with 'u' or quit with 'q'.", game.peg_count());
        }

        print!("Enter your jump (r1 c1 r2 c2), 'u' to undo, 'r' to restart, 'h' for a hint, 'q' to quit: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            println!();
            return Ok(());
        }

        match parse_command(&line) {
            Ok(Command::Quit) => {
                println!("Thanks for playing!");
                return Ok(());
            }
            Ok(Command::Undo) => match game.undo_last_move() {
                Some(mv) => {
                    println!("Undid {}.", mv);
                    last_landing = game.history().last().map(|m| m.to);
                }
                None => println!("Cannot undo further (no moves made)."),
            },
            Ok(Command::Restart) => {
                game.reset();
                last_landing = None;
                println!("Back to the starting position.");
            }
            Ok(Command::Hint) => {
                let report = solve_dfs(game.board(), target, &SearchLimits::with_node_limit(hint_limit));
                match report.outcome {
                    SearchOutcome::Solved(solution) => match solution.moves.first() {
                        Some(mv) => println!("Hint: {} ({} jumps to go).", mv, solution.len()),
                        None => println!("Already solved."),
                    },
                    SearchOutcome::Exhausted => {
                        println!("No solution from here. Try undoing a few moves.")
                    }
                    SearchOutcome::BudgetExhausted => {
                        println!("No hint found within {} states.", hint_limit)
                    }
                }
            }
            Ok(Command::Jump(mv)) => {
                if game.try_apply(mv) {
                    last_landing = Some(mv.to);
                    println!("Jumped {}.", mv);
                } else {
                    println!("Illegal jump: {} needs a peg to jump over and an empty landing cell.", mv);
                }
            }
            Err(message) => println!("{}", message),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = match PuzzleConfig::new(args.empty, args.target) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("Welcome to Peg Solitaire!");
    let mut game = Solitaire::new(config.initial_board());
    match play(&mut game, config.target, args.hint_limit, &mut io::stdin().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
