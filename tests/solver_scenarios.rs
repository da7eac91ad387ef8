//! End-to-end scenarios on full boards and random mid-game positions.
use peg_solitaire_solver::config::PuzzleConfig;
use peg_solitaire_solver::engine::{
    playable_cells, Board, Cell, Coord, Move, BOARD_SIZE, CENTER,
};
use peg_solitaire_solver::replay::{replay, Transcript};
use peg_solitaire_solver::solver::{
    solve, solve_astar, solve_dfs, solve_gbfs, Algorithm, SearchLimits, SearchOutcome,
    SearchReport,
};
use peg_solitaire_solver::utils::board_from_str_array;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Starts from a single peg on `target` and undoes `steps` random jumps.
/// Every position built this way can be solved back down to `target`.
fn backward_playout(rng: &mut SmallRng, target: Coord, steps: usize) -> Board {
    let mut grid = [[Cell::OutOfBoard; BOARD_SIZE]; BOARD_SIZE];
    for (r, c) in playable_cells() {
        grid[r][c] = Cell::Empty;
    }
    grid[target.0][target.1] = Cell::Peg;
    let mut board = Board::from_grid(grid);

    for _ in 0..steps {
        let reversible: Vec<Move> = playable_cells()
            .flat_map(|from| playable_cells().map(move |to| Move::new(from, to)))
            .filter(|mv| {
                mv.is_jump_shape()
                    && board.cell(mv.from) == Cell::Empty
                    && board.cell(mv.midpoint()) == Cell::Empty
                    && board.cell(mv.to) == Cell::Peg
            })
            .collect();
        let Some(&mv) = reversible.choose(rng) else {
            break;
        };
        board.revert_jump(mv);
    }
    board
}

fn assert_valid_solution(initial: &Board, target: Coord, report: &SearchReport) {
    let solution = report
        .solution()
        .unwrap_or_else(|| panic!("{} did not solve: {}", report.algorithm, report.outcome));
    assert_eq!(solution.len(), initial.peg_count() - 1);
    let boards = replay(initial, &solution.moves);
    for (i, board) in boards.iter().enumerate() {
        assert_eq!(board.peg_count(), initial.peg_count() - i - 1);
    }
    assert!(boards.last().is_some_and(|b| b.is_goal(target)));
}

#[test]
fn test_gbfs_solves_center_puzzle() {
    let config = PuzzleConfig::centered();
    let initial = config.initial_board();
    let report = solve_gbfs(&initial, config.target, &SearchLimits::unbounded());
    assert_valid_solution(&initial, config.target, &report);
    assert_eq!(report.stats.explored, 524_011);
}

#[test]
fn test_gbfs_solves_top_arm_puzzle() {
    let config = PuzzleConfig::new((0, 2), None).unwrap();
    let initial = config.initial_board();
    let report = solve_gbfs(&initial, config.target, &SearchLimits::unbounded());
    assert_valid_solution(&initial, config.target, &report);
}

#[test]
fn test_astar_solves_center_puzzle() {
    let config = PuzzleConfig::centered();
    let initial = config.initial_board();
    let report = solve_astar(&initial, config.target, &SearchLimits::unbounded());
    assert_valid_solution(&initial, config.target, &report);
    assert_eq!(report.stats.explored, 523_254);
}

#[test]
#[ignore = "explores millions of states; run with --release -- --ignored"]
fn test_dfs_solves_center_puzzle() {
    let config = PuzzleConfig::centered();
    let initial = config.initial_board();
    let report = solve_dfs(&initial, config.target, &SearchLimits::unbounded());
    assert_valid_solution(&initial, config.target, &report);
}

#[test]
#[ignore = "not settled after 200 million explored states (about 30s in release); may run for hours"]
fn test_dfs_solves_top_arm_puzzle() {
    let config = PuzzleConfig::new((0, 2), None).unwrap();
    let initial = config.initial_board();
    let report = solve_dfs(&initial, config.target, &SearchLimits::unbounded());
    assert_valid_solution(&initial, config.target, &report);
}

#[test]
fn test_node_limit_stops_every_strategy_on_full_board() {
    let initial = Board::standard(CENTER);
    for algorithm in Algorithm::ALL {
        let report = solve(algorithm, &initial, CENTER, &SearchLimits::with_node_limit(1_000));
        assert_eq!(report.outcome, SearchOutcome::BudgetExhausted);
        assert_eq!(report.stats.explored, 1_000);
    }
}

#[test]
fn test_unreachable_target_is_reported_as_exhausted() {
    // Corner cell: no peg can ever land there.
    let (initial, _) = Board::standard(CENTER).random_playout_with_seed(3, 22);
    for algorithm in Algorithm::ALL {
        let report = solve(algorithm, &initial, (0, 0), &SearchLimits::unbounded());
        assert_eq!(report.outcome, SearchOutcome::Exhausted, "{}", algorithm);
    }
}

#[test]
fn test_strategies_solve_positions_played_back_from_goal() {
    let mut rng = SmallRng::seed_from_u64(2024);
    let mut solved = 0;
    for _ in 0..12 {
        let initial = backward_playout(&mut rng, CENTER, 9);
        assert!(initial.peg_count() > 1);
        for algorithm in Algorithm::ALL {
            let report = solve(algorithm, &initial, CENTER, &SearchLimits::unbounded());
            assert_valid_solution(&initial, CENTER, &report);
            solved += 1;
        }
    }
    assert_eq!(solved, 12 * Algorithm::ALL.len());
}

#[test]
fn test_searches_leave_input_board_untouched() {
    let (initial, _) = Board::standard(CENTER).random_playout_with_seed(11, 20);
    let before = initial.clone();
    for algorithm in Algorithm::ALL {
        solve(algorithm, &initial, CENTER, &SearchLimits::unbounded());
        assert_eq!(initial, before);
    }
}

#[test]
fn test_transcript_for_found_solution() {
    let initial = board_from_str_array(&[
        "  ...  ",
        "  ...  ",
        ".......",
        "....O..",
        "...OO..",
        "  .OO  ",
        "  OOO  ",
    ])
    .unwrap();
    let report = solve_gbfs(&initial, CENTER, &SearchLimits::unbounded());
    let solution = report.solution().expect("eight-peg board is solvable");
    assert_eq!(solution.len(), 7);

    let dir = tempfile::tempdir().unwrap();
    let transcript = Transcript::new(Algorithm::Gbfs.name(), &initial, &solution.moves);
    let path = transcript.write_to_dir(dir.path()).unwrap();
    assert_eq!(path.file_name().unwrap(), "GBFS_moves.txt");
    let text = std::fs::read_to_string(path).unwrap();

    assert!(text.starts_with(&format!("Initial board:\n{}\n", initial.render())));
    assert_eq!(text.matches("\nMove: ").count(), solution.len());
    assert!(text.contains(&format!("\nMove: {}\n", solution.moves[0])));
    assert!(text.ends_with(&format!("{}\n", solution.final_board(&initial).render())));
}
