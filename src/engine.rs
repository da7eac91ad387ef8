//! Core board model for cross-shaped peg solitaire.
//!
//! This module defines the puzzle's fundamental components:
//! - `Cell`: The state of a single grid cell (out of board, empty, or holding a peg).
//! - `Move`: A jump from one playable cell to another two cells away.
//! - `Board`: The fixed 7x7 cross board, with move generation, the goal test and
//!   copy-on-branch move application (the persistent mode used by frontier search).
//! - `Solitaire`: A board plus a move history, applying and undoing moves in place
//!   (the undoable mode used by backtracking search and interactive play).
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Width and height of the grid. The playable region is a cross inside it.
pub const BOARD_SIZE: usize = 7;

/// Number of playable cells on the cross board.
pub const PLAYABLE_CELLS: usize = 33;

/// The center cell, the classic start and finish of the puzzle.
pub const CENTER: Coord = (3, 3);

/// A `(row, col)` position on the grid.
pub type Coord = (usize, usize);

/// Jump displacements in enumeration order: up, down, left, right.
const JUMP_DIRECTIONS: [(isize, isize); 4] = [(-2, 0), (2, 0), (0, -2), (0, 2)];

/// Represents the state of one cell of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// One of the four 2x2 corner blocks. Never holds a peg.
    OutOfBoard,
    /// A playable cell without a peg.
    Empty,
    /// A playable cell holding a peg.
    Peg,
}

impl Cell {
    /// Converts the cell to its character representation.
    ///
    /// This is the marker used in transcripts and in the text board format.
    ///
    /// # Examples
    ///
    /// ```
    /// use peg_solitaire_solver::engine::Cell;
    /// assert_eq!(Cell::Peg.to_char(), 'O');
    /// assert_eq!(Cell::Empty.to_char(), '.');
    /// assert_eq!(Cell::OutOfBoard.to_char(), ' ');
    /// ```
    pub fn to_char(&self) -> char {
        match self {
            Cell::OutOfBoard => ' ',
            Cell::Empty => '.',
            Cell::Peg => 'O',
        }
    }
}

/// Returns `true` if `coord` lies inside the 7x7 grid.
pub fn is_on_grid(coord: Coord) -> bool {
    coord.0 < BOARD_SIZE && coord.1 < BOARD_SIZE
}

/// Returns `true` if `coord` is one of the 33 cells of the cross.
///
/// # Examples
/// ```
/// use peg_solitaire_solver::engine::is_playable;
/// assert!(is_playable((3, 3)));
/// assert!(is_playable((0, 2)));
/// assert!(!is_playable((0, 0)));
/// assert!(!is_playable((7, 3)));
/// ```
pub fn is_playable(coord: Coord) -> bool {
    let (r, c) = coord;
    let in_corner = (r < 2 || r > 4) && (c < 2 || c > 4);
    is_on_grid(coord) && !in_corner
}

/// Iterates over the playable cells in row-major order.
pub fn playable_cells() -> impl Iterator<Item = Coord> {
    (0..BOARD_SIZE)
        .flat_map(|r| (0..BOARD_SIZE).map(move |c| (r, c)))
        .filter(|&coord| is_playable(coord))
}

fn offset(coord: Coord, (dr, dc): (isize, isize)) -> Option<Coord> {
    let r = coord.0.checked_add_signed(dr)?;
    let c = coord.1.checked_add_signed(dc)?;
    is_on_grid((r, c)).then_some((r, c))
}

/// A jump from `from` over the midpoint into `to`.
///
/// The jumped cell is always derived from the two endpoints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
}

impl Move {
    pub const fn new(from: Coord, to: Coord) -> Self {
        Move { from, to }
    }

    /// The cell jumped over. Only meaningful when `is_jump_shape()` holds.
    pub fn midpoint(&self) -> Coord {
        let mid = |a: usize, b: usize| a.min(b) + a.abs_diff(b) / 2;
        (mid(self.from.0, self.to.0), mid(self.from.1, self.to.1))
    }

    /// Returns `true` if the endpoints are exactly two cells apart along one axis.
    pub fn is_jump_shape(&self) -> bool {
        let dr = self.from.0.abs_diff(self.to.0);
        let dc = self.from.1.abs_diff(self.to.1);
        (dr == 2 && dc == 0) || (dr == 0 && dc == 2)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) -> ({}, {})",
            self.from.0, self.from.1, self.to.0, self.to.1
        )
    }
}

/// Represents the cross-shaped board as a 7x7 grid of `Cell`s.
///
/// The out-of-board mask never changes: every constructor checks it and the move
/// primitives only ever touch playable cells. Two boards compare equal (and hash
/// equal) exactly when their cell contents match, which makes the board value
/// itself the canonical form used for duplicate detection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    grid: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates the standard starting position: every playable cell holds a peg
    /// except `initial_empty`.
    ///
    /// # Arguments
    /// * `initial_empty`: The playable cell left empty at the start.
    ///
    /// # Panics
    /// Panics if `initial_empty` is not a playable cell. Coordinates are validated
    /// before they reach the board (see `config::PuzzleConfig`).
    ///
    /// # Examples
    /// ```
    /// use peg_solitaire_solver::engine::{Board, Cell, CENTER};
    /// let board = Board::standard(CENTER);
    /// assert_eq!(board.peg_count(), 32);
    /// assert_eq!(board.cell(CENTER), Cell::Empty);
    /// ```
    pub fn standard(initial_empty: Coord) -> Self {
        assert!(
            is_playable(initial_empty),
            "initial empty cell {:?} is not playable",
            initial_empty
        );
        let mut grid = [[Cell::OutOfBoard; BOARD_SIZE]; BOARD_SIZE];
        for (r, c) in playable_cells() {
            grid[r][c] = Cell::Peg;
        }
        grid[initial_empty.0][initial_empty.1] = Cell::Empty;
        Board { grid }
    }

    /// Creates a board from an explicit grid, e.g. a mid-game position.
    ///
    /// # Panics
    /// Panics if the grid's out-of-board cells do not match the cross shape.
    pub fn from_grid(grid: [[Cell; BOARD_SIZE]; BOARD_SIZE]) -> Self {
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                assert_eq!(
                    grid[r][c] == Cell::OutOfBoard,
                    !is_playable((r, c)),
                    "cell ({}, {}) does not match the cross shape",
                    r,
                    c
                );
            }
        }
        Board { grid }
    }

    /// Returns the cell at `coord`.
    ///
    /// # Panics
    /// Panics if `coord` is outside the 7x7 grid.
    pub fn cell(&self, coord: Coord) -> Cell {
        self.grid[coord.0][coord.1]
    }

    fn cell_checked(&self, coord: Coord) -> Option<Cell> {
        is_on_grid(coord).then(|| self.grid[coord.0][coord.1])
    }

    fn set(&mut self, coord: Coord, cell: Cell) {
        self.grid[coord.0][coord.1] = cell;
    }

    /// Returns an immutable reference to the underlying grid.
    pub fn grid(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.grid
    }

    /// Number of pegs on the board.
    pub fn peg_count(&self) -> usize {
        self.grid.iter().flatten().filter(|&&cell| cell == Cell::Peg).count()
    }

    /// Number of empty playable cells.
    pub fn empty_count(&self) -> usize {
        self.grid
            .iter()
            .flatten()
            .filter(|&&cell| cell == Cell::Empty)
            .count()
    }

    /// Coordinates of every peg, in row-major order.
    pub fn pegs(&self) -> impl Iterator<Item = Coord> + '_ {
        playable_cells().filter(move |&coord| self.cell(coord) == Cell::Peg)
    }

    /// Checks whether `mv` is a legal jump on this board.
    ///
    /// A jump is legal when both endpoints are on the grid and playable, the
    /// source holds a peg, the destination is empty, the displacement is two
    /// cells along one axis and the jumped cell holds a peg. Any pair of
    /// coordinates may be passed, including ones off the grid.
    ///
    /// # Examples
    /// ```
    /// use peg_solitaire_solver::engine::{Board, Move, CENTER};
    /// let board = Board::standard(CENTER);
    /// assert!(board.is_legal(Move::new((1, 3), (3, 3))));
    /// assert!(!board.is_legal(Move::new((1, 1), (3, 3))));
    /// ```
    pub fn is_legal(&self, mv: Move) -> bool {
        if !is_on_grid(mv.from) || !is_on_grid(mv.to) || !mv.is_jump_shape() {
            return false;
        }
        matches!(
            (
                self.cell_checked(mv.from),
                self.cell_checked(mv.midpoint()),
                self.cell_checked(mv.to),
            ),
            (Some(Cell::Peg), Some(Cell::Peg), Some(Cell::Empty))
        )
    }

    /// Lists every legal jump on the board.
    ///
    /// The order is fixed: source cells are scanned row by row (row 0..6, then
    /// column 0..6), and each source tries up, down, left and right in that
    /// order. Backtracking search relies on this order being stable.
    pub fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();
        for r in 0..BOARD_SIZE {
            for c in 0..BOARD_SIZE {
                if self.grid[r][c] != Cell::Peg {
                    continue;
                }
                for &direction in &JUMP_DIRECTIONS {
                    if let Some(to) = offset((r, c), direction) {
                        let mv = Move::new((r, c), to);
                        if self.is_legal(mv) {
                            moves.push(mv);
                        }
                    }
                }
            }
        }
        moves
    }

    /// Applies a jump in place: the source and the jumped cell become empty and
    /// the destination receives the peg.
    ///
    /// # Panics
    /// Panics if `mv` is not legal on this board.
    pub fn apply_jump(&mut self, mv: Move) {
        assert!(
            self.is_legal(mv),
            "illegal jump {} on board:\n{}",
            mv,
            self.render()
        );
        self.set(mv.from, Cell::Empty);
        self.set(mv.midpoint(), Cell::Empty);
        self.set(mv.to, Cell::Peg);
    }

    /// Reverts a jump previously applied with `apply_jump`.
    ///
    /// # Panics
    /// Panics if the board is not in the state `apply_jump(mv)` leaves behind.
    pub fn revert_jump(&mut self, mv: Move) {
        let reversible = mv.is_jump_shape()
            && self.cell_checked(mv.from) == Some(Cell::Empty)
            && self.cell_checked(mv.midpoint()) == Some(Cell::Empty)
            && self.cell_checked(mv.to) == Some(Cell::Peg);
        assert!(reversible, "cannot revert jump {} on board:\n{}", mv, self.render());
        self.set(mv.from, Cell::Peg);
        self.set(mv.midpoint(), Cell::Peg);
        self.set(mv.to, Cell::Empty);
    }

    /// Returns a copy of the board with `mv` applied, leaving `self` untouched.
    pub fn after(&self, mv: Move) -> Board {
        let mut next = self.clone();
        next.apply_jump(mv);
        next
    }

    /// Returns `true` if exactly one peg remains and it sits on `target`.
    ///
    /// Never panics: a target off the grid or out of the board simply cannot
    /// hold the last peg.
    pub fn is_goal(&self, target: Coord) -> bool {
        self.peg_count() == 1 && self.cell_checked(target) == Some(Cell::Peg)
    }

    /// Renders the board as seven lines of space-separated cell markers.
    ///
    /// This is the form written to solution transcripts.
    pub fn render(&self) -> String {
        self.grid
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.to_char().to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Generates a terminal rendering with row and column numbers.
    ///
    /// If `pos` is `Some((r, c))` and that cell holds a peg, the peg is drawn as
    /// `@` in bold yellow, e.g. to show where the last jump landed.
    pub fn to_string_with_highlight(&self, pos: Option<Coord>) -> String {
        let mut output = String::new();

        output.push_str("  ");
        for c_idx in 0..BOARD_SIZE {
            output.push_str(&format!("{:<2}", c_idx));
        }
        output.push('\n');

        for r_idx in 0..BOARD_SIZE {
            output.push_str(&format!("{:<2}", r_idx));
            for c_idx in 0..BOARD_SIZE {
                let cell = self.grid[r_idx][c_idx];
                if pos == Some((r_idx, c_idx)) && cell == Cell::Peg {
                    output.push_str("\x1b[1;33m@\x1b[m ");
                } else {
                    output.push(cell.to_char());
                    output.push(' ');
                }
            }
            if r_idx < BOARD_SIZE - 1 {
                output.push('\n');
            }
        }

        output
    }

    /// Plays random legal jumps from this board until `max_moves` have been made
    /// or no jump is left.
    ///
    /// # Returns
    /// The resulting board and the jumps played, in order.
    pub fn random_playout<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        max_moves: usize,
    ) -> (Board, Vec<Move>) {
        let mut board = self.clone();
        let mut played = Vec::new();
        while played.len() < max_moves {
            let Some(&mv) = board.legal_moves().choose(rng) else {
                break;
            };
            board.apply_jump(mv);
            played.push(mv);
        }
        (board, played)
    }

    /// Same as `random_playout`, driven by a `SmallRng` seeded with `seed`, so
    /// the same seed always yields the same position.
    pub fn random_playout_with_seed(&self, seed: u64, max_moves: usize) -> (Board, Vec<Move>) {
        let mut rng = SmallRng::seed_from_u64(seed);
        self.random_playout(&mut rng, max_moves)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_highlight(None))
    }
}

/// A board that is mutated in place, with a stack of the jumps applied to it.
///
/// `apply` and `undo` must pair up in stack order; backtracking search uses the
/// history as its current move sequence.
///
/// # Examples
/// ```
/// use peg_solitaire_solver::engine::{Board, Move, Solitaire, CENTER};
/// let mut game = Solitaire::new(Board::standard(CENTER));
/// let mv = Move::new((1, 3), (3, 3));
/// game.apply(mv);
/// assert_eq!(game.peg_count(), 31);
/// assert_eq!(game.history(), &[mv]);
/// game.undo(mv);
/// assert_eq!(game.board(), &Board::standard(CENTER));
/// ```
#[derive(Clone, Debug)]
pub struct Solitaire {
    initial: Board,
    board: Board,
    history: Vec<Move>,
}

impl Solitaire {
    pub fn new(board: Board) -> Self {
        Solitaire {
            initial: board.clone(),
            board,
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The board this game was created with.
    pub fn initial_board(&self) -> &Board {
        &self.initial
    }

    /// Jumps applied so far, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn steps(&self) -> usize {
        self.history.len()
    }

    pub fn peg_count(&self) -> usize {
        self.board.peg_count()
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.board.legal_moves()
    }

    pub fn is_goal(&self, target: Coord) -> bool {
        self.board.is_goal(target)
    }

    /// Returns `true` when no jump is available.
    pub fn is_stuck(&self) -> bool {
        self.board.legal_moves().is_empty()
    }

    /// Applies a jump known to be legal and records it.
    ///
    /// # Panics
    /// Panics if `mv` is not legal on the current board.
    pub fn apply(&mut self, mv: Move) {
        self.board.apply_jump(mv);
        self.history.push(mv);
    }

    /// Applies `mv` if it is legal.
    ///
    /// # Returns
    /// `true` if the jump was made, `false` if it was rejected (board unchanged).
    pub fn try_apply(&mut self, mv: Move) -> bool {
        if !self.board.is_legal(mv) {
            return false;
        }
        self.apply(mv);
        true
    }

    /// Reverts `mv`, which must be the most recently applied jump.
    ///
    /// # Panics
    /// Panics if `mv` is not the last entry of the history.
    pub fn undo(&mut self, mv: Move) {
        let last = self.history.pop();
        assert_eq!(
            last,
            Some(mv),
            "undo out of order: {} is not the most recent jump",
            mv
        );
        self.board.revert_jump(mv);
    }

    /// Reverts the most recent jump, if any.
    ///
    /// # Returns
    /// The jump that was undone, or `None` if no jump has been made.
    pub fn undo_last_move(&mut self) -> Option<Move> {
        let mv = self.history.pop()?;
        self.board.revert_jump(mv);
        Some(mv)
    }

    /// Restores the initial board and clears the history.
    pub fn reset(&mut self) {
        self.board = self.initial.clone();
        self.history.clear();
    }

    /// Consumes the game, returning its history.
    pub fn into_history(self) -> Vec<Move> {
        self.history
    }
}
