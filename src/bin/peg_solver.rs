use anyhow::{bail, Context, Result};
use clap::Parser;
use peg_solitaire_solver::config::{check_playable, parse_coord, PuzzleConfig};
use peg_solitaire_solver::engine::{Board, Coord};
use peg_solitaire_solver::logging;
use peg_solitaire_solver::replay::Transcript;
use peg_solitaire_solver::solver::{solve, Algorithm, SearchLimits, SearchOutcome};
use peg_solitaire_solver::utils::board_from_text;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum AlgorithmChoice {
    All,
    Dfs,
    Gbfs,
    #[value(alias = "astar")]
    AStar,
}

impl AlgorithmChoice {
    fn algorithms(self) -> Vec<Algorithm> {
        match self {
            AlgorithmChoice::All => Algorithm::ALL.to_vec(),
            AlgorithmChoice::Dfs => vec![Algorithm::Dfs],
            AlgorithmChoice::Gbfs => vec![Algorithm::Gbfs],
            AlgorithmChoice::AStar => vec![Algorithm::AStar],
        }
    }
}

/// Solves English peg solitaire with DFS, greedy best-first and A* search.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Initially empty cell as "row,col"; prompted for when omitted
    #[clap(short, long, value_parser = parse_coord)]
    empty: Option<Coord>,

    /// Cell the last peg must end on, as "row,col" (defaults to the empty cell)
    #[clap(short, long, value_parser = parse_coord)]
    target: Option<Coord>,

    /// Search strategy to run
    #[clap(short, long, value_enum, default_value_t = AlgorithmChoice::All)]
    algorithm: AlgorithmChoice,

    /// Give up after exploring this many states
    #[clap(short, long)]
    node_limit: Option<u64>,

    /// Directory for the <ALGORITHM>_moves.txt transcripts
    #[clap(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Do not write transcripts
    #[clap(long)]
    no_transcript: bool,

    /// Start from the position in this file instead of a full board
    #[clap(long, conflicts_with = "empty", requires = "target")]
    board_file: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn read_board_file(path: &Path) -> Result<Board> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read board file {}", path.display()))?;
    board_from_text(&content).with_context(|| format!("invalid board in {}", path.display()))
}

/// Asks on stdin until a playable cell is entered.
fn prompt_coord(input: &mut impl BufRead, label: &str) -> Result<Coord> {
    let stdout = io::stdout();
    loop {
        print!("Enter the {label} as row,col: ");
        stdout.lock().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            bail!("no {label} given before end of input");
        }
        match parse_coord(&line) {
            Ok(coord) => return Ok(coord),
            Err(err) => println!("Invalid input: {err}. Please try again."),
        }
    }
}

fn starting_position(args: &Args) -> Result<(Board, Coord)> {
    if let Some(path) = &args.board_file {
        let board = read_board_file(path)?;
        // clap enforces `requires = "target"`.
        let Some(target) = args.target else {
            bail!("--board-file needs --target");
        };
        println!("Loaded board from {}", path.display());
        return Ok((board, check_playable(target)?));
    }

    let initial_empty = match args.empty {
        Some(coord) => coord,
        None => prompt_coord(&mut io::stdin().lock(), "initially empty cell")?,
    };
    let config = PuzzleConfig::new(initial_empty, args.target)?;
    Ok((config.initial_board(), config.target))
}

fn run(args: Args) -> Result<()> {
    let (initial, target) = starting_position(&args)?;
    let limits = SearchLimits {
        node_limit: args.node_limit,
    };

    if !args.no_transcript {
        fs::create_dir_all(&args.output_dir).with_context(|| {
            format!("failed to create output directory {}", args.output_dir.display())
        })?;
    }

    println!("Initial board ({} pegs):\n{}\n", initial.peg_count(), initial);
    println!("Target: ({}, {})\n", target.0, target.1);

    for algorithm in args.algorithm.algorithms() {
        let start = Instant::now();
        let report = solve(algorithm, &initial, target, &limits);
        let seconds = start.elapsed().as_secs_f64();

        match &report.outcome {
            SearchOutcome::Solved(solution) => {
                println!(
                    "{} solved the puzzle in {:.2} seconds ({} moves, {} states explored)",
                    algorithm,
                    seconds,
                    solution.len(),
                    report.stats.explored
                );
                if !args.no_transcript {
                    let transcript = Transcript::new(algorithm.name(), &initial, &solution.moves);
                    let path = transcript.write_to_dir(&args.output_dir)?;
                    println!("  Moves written to {}", path.display());
                }
            }
            SearchOutcome::Exhausted => println!(
                "{} failed to solve the puzzle in {:.2} seconds ({} states explored)",
                algorithm, seconds, report.stats.explored
            ),
            SearchOutcome::BudgetExhausted => println!(
                "{} stopped at the node limit after {:.2} seconds ({} states explored)",
                algorithm, seconds, report.stats.explored
            ),
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_args_parse_coordinates() {
        let args = Args::try_parse_from(["peg_solver", "--empty", "0,2", "-a", "gbfs"]).unwrap();
        assert_eq!(args.empty, Some((0, 2)));
        assert_eq!(args.target, None);
        assert_eq!(args.algorithm, AlgorithmChoice::Gbfs);
        assert!(Args::try_parse_from(["peg_solver", "--empty", "0,0"]).is_err());
    }

    #[test]
    fn test_board_file_requires_target() {
        assert!(Args::try_parse_from(["peg_solver", "--board-file", "b.txt"]).is_err());
        assert!(
            Args::try_parse_from(["peg_solver", "--board-file", "b.txt", "-t", "3,3"]).is_ok()
        );
    }

    #[test]
    fn test_prompt_coord_reprompts_on_invalid_input() {
        let mut input = io::Cursor::new("nope\n0,0\n 2, 4 \n");
        assert_eq!(prompt_coord(&mut input, "cell").unwrap(), (2, 4));
    }

    #[test]
    fn test_prompt_coord_fails_at_end_of_input() {
        let mut input = io::Cursor::new("9,9\n");
        assert!(prompt_coord(&mut input, "cell").is_err());
    }
}
