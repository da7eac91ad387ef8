//! Search strategies for reducing the board to a single peg on a target cell.
//!
//! - `solve_dfs`: backtracking over one board mutated in place.
//! - `solve_gbfs`: greedy best-first search keyed on the heuristic alone.
//! - `solve_astar`: best-first search keyed on jumps taken plus the heuristic.
//!
//! Every search returns a `SearchReport` carrying its outcome and counters.
//! Running out of positions is a normal outcome (`SearchOutcome::Exhausted`),
//! not an error.
use crate::engine::{Board, Coord, Move, Solitaire};
use crate::error::SearchError;
use crate::heuristics::{peg_distance, HeuristicFn};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};
use std::fmt;
use tracing::{debug, info, trace};

/// Explored-state interval between progress events.
const PROGRESS_INTERVAL: u64 = 100_000;

/// The available search strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Algorithm {
    /// Depth-first backtracking.
    Dfs,
    /// Greedy best-first search.
    Gbfs,
    /// A* search.
    #[value(alias = "astar")]
    AStar,
}

impl Algorithm {
    /// Every strategy, in the order the driver runs them.
    pub const ALL: [Algorithm; 3] = [Algorithm::Dfs, Algorithm::Gbfs, Algorithm::AStar];

    /// Short name, also used as the stem of transcript file names.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Dfs => "DFS",
            Algorithm::Gbfs => "GBFS",
            Algorithm::AStar => "A_star",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::AStar => write!(f, "A*"),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// Optional budget for a search. The default is unbounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchLimits {
    /// Maximum number of states to explore before giving up.
    pub node_limit: Option<u64>,
}

impl SearchLimits {
    pub fn unbounded() -> Self {
        SearchLimits::default()
    }

    pub fn with_node_limit(limit: u64) -> Self {
        SearchLimits {
            node_limit: Some(limit),
        }
    }

    // Called before exploring a state; `explored` never exceeds the limit.
    fn check(&self, explored: u64) -> Result<(), SearchError> {
        match self.node_limit {
            Some(limit) if explored >= limit => Err(SearchError::NodeLimitReached { limit }),
            _ => Ok(()),
        }
    }
}

/// Counters collected during one search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Non-goal states taken up for exploration. For GBFS and A* this
    /// includes popped duplicates that were then discarded.
    pub explored: u64,
    /// Distinct boards whose children were generated (GBFS and A* only).
    pub expanded: u64,
    /// Popped states skipped because their board had already been expanded.
    pub duplicates_skipped: u64,
    /// Jumps applied (DFS) or child states pushed (GBFS and A*).
    pub generated: u64,
    /// Peak number of states waiting in the frontier.
    pub max_frontier: usize,
    /// Longest move sequence reached.
    pub max_depth: usize,
}

/// Represents a solution found by a search.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Jumps leading from the initial board to the goal, in order.
    pub moves: Vec<Move>,
}

impl Solution {
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Replays the solution on `initial` and returns the final board.
    ///
    /// # Panics
    /// Panics if a jump is illegal on the board it is applied to.
    pub fn final_board(&self, initial: &Board) -> Board {
        let mut board = initial.clone();
        for &mv in &self.moves {
            board.apply_jump(mv);
        }
        board
    }
}

/// How a search ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A goal board was reached.
    Solved(Solution),
    /// Every reachable state was examined without reaching a goal.
    Exhausted,
    /// The node limit was hit before the question was settled.
    BudgetExhausted,
}

impl fmt::Display for SearchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchOutcome::Solved(solution) => write!(f, "solved in {} moves", solution.len()),
            SearchOutcome::Exhausted => write!(f, "no solution"),
            SearchOutcome::BudgetExhausted => write!(f, "node limit reached"),
        }
    }
}

/// The result of one search: which strategy ran, how it ended, and its counters.
#[derive(Clone, Debug)]
pub struct SearchReport {
    pub algorithm: Algorithm,
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
}

impl SearchReport {
    pub fn is_solved(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Solved(_))
    }

    pub fn solution(&self) -> Option<&Solution> {
        match &self.outcome {
            SearchOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }
}

/// Runs `algorithm` from `board` towards a single peg on `target`.
pub fn solve(
    algorithm: Algorithm,
    board: &Board,
    target: Coord,
    limits: &SearchLimits,
) -> SearchReport {
    match algorithm {
        Algorithm::Dfs => solve_dfs(board, target, limits),
        Algorithm::Gbfs => solve_gbfs(board, target, limits),
        Algorithm::AStar => solve_astar(board, target, limits),
    }
}

/// Solves the puzzle with depth-first backtracking.
///
/// Jumps are tried in `Board::legal_moves` order on a single board that is
/// mutated and restored in place, so memory stays proportional to the depth.
/// The first solution found is returned; it is not necessarily the only one.
/// No positions are memoized, so the same board may be reached again through
/// a different jump order.
pub fn solve_dfs(board: &Board, target: Coord, limits: &SearchLimits) -> SearchReport {
    info!(
        algorithm = %Algorithm::Dfs,
        pegs = board.peg_count(),
        target = ?target,
        "search started"
    );
    let mut game = Solitaire::new(board.clone());
    let mut stats = SearchStats::default();

    let outcome = match find_solution_recursive(&mut game, target, limits, &mut stats) {
        // The history of a solved game is the solution; it is left applied.
        Ok(true) => SearchOutcome::Solved(Solution {
            moves: game.into_history(),
        }),
        Ok(false) => SearchOutcome::Exhausted,
        Err(err) => {
            debug!(algorithm = %Algorithm::Dfs, %err, "search stopped");
            SearchOutcome::BudgetExhausted
        }
    };
    finish(Algorithm::Dfs, outcome, stats)
}

fn find_solution_recursive(
    game: &mut Solitaire,
    target: Coord,
    limits: &SearchLimits,
    stats: &mut SearchStats,
) -> Result<bool, SearchError> {
    if game.is_goal(target) {
        return Ok(true);
    }

    limits.check(stats.explored)?;
    stats.explored += 1;
    stats.max_depth = stats.max_depth.max(game.steps());
    report_progress(Algorithm::Dfs, stats);

    for mv in game.legal_moves() {
        game.apply(mv);
        stats.generated += 1;
        if find_solution_recursive(game, target, limits, stats)? {
            return Ok(true);
        }
        game.undo(mv);
    }
    Ok(false)
}

/// Solves the puzzle with greedy best-first search on `peg_distance`.
///
/// Not guaranteed to find the shortest sequence of jumps.
pub fn solve_gbfs(board: &Board, target: Coord, limits: &SearchLimits) -> SearchReport {
    solve_best_first_with(PriorityKey::Heuristic, board, target, limits, peg_distance)
}

/// Solves the puzzle with A* search on jumps taken plus `peg_distance`.
///
/// `peg_distance` is not admissible, so the returned sequence is not
/// guaranteed to be the shortest. Use `solve_best_first_with` and a lower
/// bound such as `heuristics::remaining_moves` when that guarantee matters.
pub fn solve_astar(board: &Board, target: Coord, limits: &SearchLimits) -> SearchReport {
    solve_best_first_with(
        PriorityKey::CostPlusHeuristic,
        board,
        target,
        limits,
        peg_distance,
    )
}

/// How best-first search orders its frontier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriorityKey {
    /// The heuristic alone (greedy best-first search).
    Heuristic,
    /// Jumps taken so far plus the heuristic (A*).
    CostPlusHeuristic,
}

impl PriorityKey {
    fn algorithm(self) -> Algorithm {
        match self {
            PriorityKey::Heuristic => Algorithm::Gbfs,
            PriorityKey::CostPlusHeuristic => Algorithm::AStar,
        }
    }

    fn priority(self, cost: u32, estimate: u32) -> u32 {
        match self {
            PriorityKey::Heuristic => estimate,
            PriorityKey::CostPlusHeuristic => cost + estimate,
        }
    }
}

/// Best-first search with a pluggable heuristic.
///
/// The state with the lowest priority is popped first. Among equal priorities
/// the state pushed earliest wins, which makes runs reproducible. A popped
/// state whose board was already expanded is discarded. Each child carries its
/// own copy of the board and of the jumps leading to it.
pub fn solve_best_first_with(
    key: PriorityKey,
    board: &Board,
    target: Coord,
    limits: &SearchLimits,
    heuristic: HeuristicFn,
) -> SearchReport {
    let algorithm = key.algorithm();
    info!(
        algorithm = %algorithm,
        pegs = board.peg_count(),
        target = ?target,
        "search started"
    );
    let mut stats = SearchStats::default();

    let outcome = match best_first_loop(key, board, target, limits, heuristic, &mut stats) {
        Ok(Some(solution)) => SearchOutcome::Solved(solution),
        Ok(None) => SearchOutcome::Exhausted,
        Err(err) => {
            debug!(algorithm = %algorithm, %err, "search stopped");
            SearchOutcome::BudgetExhausted
        }
    };
    finish(algorithm, outcome, stats)
}

fn best_first_loop(
    key: PriorityKey,
    board: &Board,
    target: Coord,
    limits: &SearchLimits,
    heuristic: HeuristicFn,
    stats: &mut SearchStats,
) -> Result<Option<Solution>, SearchError> {
    let algorithm = key.algorithm();
    let mut frontier = Frontier::default();
    let mut expanded_boards: HashSet<Board> = HashSet::new();

    frontier.push(
        key.priority(0, heuristic(board, target)),
        SearchState {
            board: board.clone(),
            moves: Vec::new(),
            cost: 0,
        },
    );
    stats.max_frontier = frontier.len();

    while let Some(state) = frontier.pop() {
        if state.board.is_goal(target) {
            return Ok(Some(Solution { moves: state.moves }));
        }

        limits.check(stats.explored)?;
        stats.explored += 1;
        report_progress(algorithm, stats);

        if expanded_boards.contains(&state.board) {
            stats.duplicates_skipped += 1;
            continue;
        }

        stats.expanded += 1;
        stats.max_depth = stats.max_depth.max(state.moves.len());
        let children = state.board.legal_moves();
        trace!(
            algorithm = %algorithm,
            depth = state.moves.len(),
            children = children.len(),
            "expanding state"
        );

        for mv in children {
            let child_board = state.board.after(mv);
            let mut child_moves = Vec::with_capacity(state.moves.len() + 1);
            child_moves.extend_from_slice(&state.moves);
            child_moves.push(mv);
            let cost = state.cost + 1;
            let priority = key.priority(cost, heuristic(&child_board, target));

            frontier.push(
                priority,
                SearchState {
                    board: child_board,
                    moves: child_moves,
                    cost,
                },
            );
            stats.generated += 1;
        }
        stats.max_frontier = stats.max_frontier.max(frontier.len());
        expanded_boards.insert(state.board);
    }

    Ok(None)
}

/// A board snapshot together with the jumps that produced it.
struct SearchState {
    board: Board,
    moves: Vec<Move>,
    cost: u32,
}

struct FrontierEntry {
    priority: u32,
    sequence: u64,
    state: SearchState,
}

// `BinaryHeap` is a max-heap; the comparison is reversed so the lowest
// (priority, sequence) pair is popped first.
impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

/// Priority queue of search states, ties broken by insertion order.
#[derive(Default)]
struct Frontier {
    heap: BinaryHeap<FrontierEntry>,
    next_sequence: u64,
}

impl Frontier {
    fn push(&mut self, priority: u32, state: SearchState) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(FrontierEntry {
            priority,
            sequence,
            state,
        });
    }

    fn pop(&mut self) -> Option<SearchState> {
        self.heap.pop().map(|entry| entry.state)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

fn report_progress(algorithm: Algorithm, stats: &SearchStats) {
    if stats.explored % PROGRESS_INTERVAL == 0 {
        debug!(
            algorithm = %algorithm,
            explored = stats.explored,
            generated = stats.generated,
            max_depth = stats.max_depth,
            "search progress"
        );
    }
}

fn finish(algorithm: Algorithm, outcome: SearchOutcome, stats: SearchStats) -> SearchReport {
    info!(
        algorithm = %algorithm,
        outcome = %outcome,
        explored = stats.explored,
        expanded = stats.expanded,
        duplicates_skipped = stats.duplicates_skipped,
        "search finished"
    );
    SearchReport {
        algorithm,
        outcome,
        stats,
    }
}
