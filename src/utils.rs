use crate::engine::{is_playable, Board, Cell, BOARD_SIZE};
use crate::error::BoardParseError;

/// Parses an array of string slices into a `Board`.
///
/// Each string slice is one row, starting from row 0; exactly `BOARD_SIZE` rows
/// are required. Rows shorter than `BOARD_SIZE` are padded with blanks, so the
/// out-of-board cells at the end of a row may be left off.
///
/// Valid characters are:
/// - 'O': `Cell::Peg`
/// - '.': `Cell::Empty`
/// - ' ': `Cell::OutOfBoard` (only where the cross has no cell)
///
/// Rows in the space-separated form produced by `Board::render` are accepted
/// too, so a board copied out of a transcript parses back unchanged.
///
/// # Returns
/// * `Ok(Board)` if parsing is successful.
/// * `Err(BoardParseError)` if the row count is wrong, a row is too long, a
///   character is unrecognized, or the blanks do not match the cross shape.
///
/// # Examples
/// ```
/// use peg_solitaire_solver::utils::board_from_str_array;
/// use peg_solitaire_solver::engine::Cell;
///
/// let board = board_from_str_array(&[
///     "  ...",
///     "  ...",
///     ".......",
///     "..OO...",
///     ".......",
///     "  ...",
///     "  ...",
/// ])
/// .unwrap();
/// assert_eq!(board.peg_count(), 2);
/// assert_eq!(board.cell((3, 2)), Cell::Peg);
/// assert_eq!(board.cell((0, 0)), Cell::OutOfBoard);
///
/// assert!(board_from_str_array(&["OOOOOOO"]).is_err());
/// ```
pub fn board_from_str_array(s: &[&str]) -> Result<Board, BoardParseError> {
    if s.len() != BOARD_SIZE {
        return Err(BoardParseError::RowCount {
            expected: BOARD_SIZE,
            found: s.len(),
        });
    }

    let mut grid = [[Cell::OutOfBoard; BOARD_SIZE]; BOARD_SIZE];

    for (r, raw_row) in s.iter().enumerate() {
        let row: Vec<char> = compact_row(raw_row);
        if row.len() > BOARD_SIZE {
            return Err(BoardParseError::RowTooLong {
                row: r,
                max: BOARD_SIZE,
                found: row.len(),
            });
        }

        let padded = row.into_iter().chain(std::iter::repeat(' ')).take(BOARD_SIZE);
        for (c, ch) in padded.enumerate() {
            let cell = match ch {
                'O' => Cell::Peg,
                '.' => Cell::Empty,
                ' ' => Cell::OutOfBoard,
                _ => return Err(BoardParseError::UnrecognizedChar { ch, row: r, col: c }),
            };
            match (cell, is_playable((r, c))) {
                (Cell::OutOfBoard, true) => {
                    return Err(BoardParseError::BlankPlayable { row: r, col: c })
                }
                (Cell::Peg | Cell::Empty, false) => {
                    return Err(BoardParseError::MarkerOutOfBoard { ch, row: r, col: c })
                }
                _ => {}
            }
            grid[r][c] = cell;
        }
    }
    Ok(Board::from_grid(grid))
}

/// Parses a multi-line board, e.g. the contents of a board file.
///
/// Blank lines and lines starting with `#` are skipped; trailing whitespace is
/// ignored. The remaining lines go through `board_from_str_array`.
pub fn board_from_text(text: &str) -> Result<Board, BoardParseError> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty() && !line.trim_start().starts_with('#'))
        .collect();
    board_from_str_array(&rows)
}

// Collapses "O . O" style rows (a blank between every cell) to "O.O".
fn compact_row(row: &str) -> Vec<char> {
    let chars: Vec<char> = row.chars().collect();
    let spaced = chars.len() > BOARD_SIZE
        && chars.iter().skip(1).step_by(2).all(|&ch| ch == ' ');
    if spaced {
        chars.into_iter().step_by(2).collect()
    } else {
        chars
    }
}
