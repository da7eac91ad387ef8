use clap::Parser;
use peg_solitaire_solver::config::{check_playable, parse_coord};
use peg_solitaire_solver::engine::{Board, Coord, CENTER};
use peg_solitaire_solver::logging;
use peg_solitaire_solver::solver::{solve, Algorithm, SearchLimits, SearchOutcome};
use std::collections::HashMap;
use std::process::ExitCode;
use std::time::{Duration, Instant};

/// Compares the search strategies on random mid-game positions.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of random boards to evaluate
    #[clap(short, long, default_value_t = 20)]
    boards: usize,

    /// Seed of the first board; board i uses seed + i
    #[clap(short, long, default_value_t = 0)]
    seed: u64,

    /// Random jumps played from the full board before searching
    #[clap(short, long, default_value_t = 16)]
    opening_moves: usize,

    /// Cell the last peg must end on, as "row,col"
    #[clap(short, long, value_parser = parse_coord, default_value = "3,3")]
    target: Coord,

    /// States each search may explore
    #[clap(short, long, default_value_t = 200_000)]
    node_limit: u64,

    /// Increase log verbosity (-v debug, -vv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Default)]
struct Tally {
    solved: usize,
    exhausted: usize,
    budget_exhausted: usize,
    explored: Vec<u64>,
    elapsed: Duration,
}

impl Tally {
    fn record(&mut self, outcome: &SearchOutcome, explored: u64, elapsed: Duration) {
        match outcome {
            SearchOutcome::Solved(_) => self.solved += 1,
            SearchOutcome::Exhausted => self.exhausted += 1,
            SearchOutcome::BudgetExhausted => self.budget_exhausted += 1,
        }
        self.explored.push(explored);
        self.elapsed += elapsed;
    }

    fn mean_explored(&self) -> f64 {
        if self.explored.is_empty() {
            return 0.0;
        }
        self.explored.iter().sum::<u64>() as f64 / self.explored.len() as f64
    }
}

fn random_board(seed: u64, opening_moves: usize) -> Board {
    let (board, _) = Board::standard(CENTER).random_playout_with_seed(seed, opening_moves);
    board
}

fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    let target = match check_playable(args.target) {
        Ok(target) => target,
        Err(err) => {
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };
    let limits = SearchLimits::with_node_limit(args.node_limit);

    let mut tallies: HashMap<Algorithm, Tally> = HashMap::new();
    println!("Starting strategy evaluation for {} boards...", args.boards);

    for board_idx in 0..args.boards {
        let current_seed = args.seed + board_idx as u64;
        let initial_board = random_board(current_seed, args.opening_moves);

        println!(
            "\nEvaluating Board {} (Seed: {}, Pegs: {})",
            board_idx,
            current_seed,
            initial_board.peg_count()
        );

        for algorithm in Algorithm::ALL {
            let start = Instant::now();
            let report = solve(algorithm, &initial_board, target, &limits);
            let elapsed = start.elapsed();

            println!(
                "  Strategy: {:<6}, Outcome: {:<20}, Explored: {}",
                algorithm.to_string(),
                report.outcome.to_string(),
                report.stats.explored
            );
            tallies
                .entry(algorithm)
                .or_default()
                .record(&report.outcome, report.stats.explored, elapsed);
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("Number of boards evaluated: {}", args.boards);
    println!("Node limit per search: {}", args.node_limit);
    println!("\n--- Results ---");

    for algorithm in Algorithm::ALL {
        let Some(tally) = tallies.get(&algorithm) else {
            println!("Strategy {}: No results recorded.", algorithm);
            continue;
        };
        println!(
            "Strategy {:<6}: solved {:>3}, no solution {:>3}, limit hit {:>3}, mean explored = {:.1}, total time = {:.2}s",
            algorithm.to_string(),
            tally.solved,
            tally.exhausted,
            tally.budget_exhausted,
            tally.mean_explored(),
            tally.elapsed.as_secs_f64()
        );
    }
    ExitCode::SUCCESS
}
