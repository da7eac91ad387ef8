use crate::engine::{Board, Coord};

/// Signature shared by board heuristics: a non-negative estimate of the work
/// left before `board` reaches a single peg on the given target. Lower is better.
pub type HeuristicFn = fn(&Board, Coord) -> u32;

/// Manhattan distance between two cells.
pub fn manhattan(a: Coord, b: Coord) -> u32 {
    (a.0.abs_diff(b.0) + a.1.abs_diff(b.1)) as u32
}

/// Scores a board by peg count plus the summed Manhattan distance of every peg
/// to `target`.
///
/// Fewer pegs and pegs gathered near the target both lower the score. This is
/// a guidance estimate, not a lower bound on the remaining number of jumps: a
/// single jump can shrink the distance sum by more than one, so A* driven by it
/// is not guaranteed to return a shortest sequence.
///
/// # Arguments
/// * `board`: The position to score.
/// * `target`: The cell the last peg should end on. Any coordinate is accepted,
///   including ones off the board.
///
/// # Returns
/// `peg_count + Σ manhattan(peg, target)`.
///
/// # Examples
/// ```
/// use peg_solitaire_solver::engine::{Board, CENTER};
/// use peg_solitaire_solver::heuristics::peg_distance;
/// // 32 pegs, whose distances to the center sum to 88.
/// assert_eq!(peg_distance(&Board::standard(CENTER), CENTER), 32 + 88);
/// ```
pub fn peg_distance(board: &Board, target: Coord) -> u32 {
    let distance_sum: u32 = board.pegs().map(|peg| manhattan(peg, target)).sum();
    board.peg_count() as u32 + distance_sum
}

/// The number of jumps still needed to get down to one peg.
///
/// Every jump removes exactly one peg, so this never overestimates and is safe
/// to use when A* must return a shortest sequence. It carries no information
/// about the target, so on its own it gives no guidance at all.
pub fn remaining_moves(board: &Board, _target: Coord) -> u32 {
    board.peg_count().saturating_sub(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::CENTER;
    use crate::utils::board_from_str_array;

    #[test]
    fn test_manhattan() {
        assert_eq!(manhattan((0, 2), (3, 3)), 4);
        assert_eq!(manhattan((3, 3), (3, 3)), 0);
        assert_eq!(manhattan((6, 4), (0, 2)), 8);
    }

    #[test]
    fn test_peg_distance_small_board() {
        let board = board_from_str_array(&[
            "  ...  ",
            "  ...  ",
            ".......",
            "...O...",
            "...OO..",
            "  ...  ",
            "  ...  ",
        ])
        .unwrap();
        // Pegs at (3,3), (4,3), (4,4): distances 0, 1, 2 to the center.
        assert_eq!(peg_distance(&board, CENTER), 3 + 3);
        // Distances 4, 5, 6 to (0,2).
        assert_eq!(peg_distance(&board, (0, 2)), 3 + 15);
    }

    #[test]
    fn test_peg_distance_full_board() {
        let board = crate::engine::Board::standard(CENTER);
        assert_eq!(peg_distance(&board, CENTER), 120);
    }

    #[test]
    fn test_peg_distance_prefers_pegs_near_target() {
        let near = board_from_str_array(&[
            "  ...  ", "  ...  ", ".......", "..OO...", ".......", "  ...  ", "  ...  ",
        ])
        .unwrap();
        let far = board_from_str_array(&[
            "  O..  ", "  ...  ", ".......", "...O...", ".......", "  ...  ", "  ...  ",
        ])
        .unwrap();
        assert!(peg_distance(&near, CENTER) < peg_distance(&far, CENTER));
    }

    #[test]
    fn test_remaining_moves() {
        let board = crate::engine::Board::standard(CENTER);
        assert_eq!(remaining_moves(&board, CENTER), 31);
    }
}
