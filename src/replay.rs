//! Replaying solutions and writing them out as move-by-move transcripts.
use crate::engine::{Board, Move};
use crate::error::TranscriptError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Applies `moves` to a copy of `initial` and returns the board after each move.
///
/// The result has one snapshot per move; `initial` itself is not included.
///
/// # Panics
/// Panics if any move is illegal on the board it is applied to.
///
/// # Examples
/// ```
/// use peg_solitaire_solver::engine::{Board, Move, CENTER};
/// use peg_solitaire_solver::replay::replay;
///
/// let initial = Board::standard(CENTER);
/// let boards = replay(&initial, &[Move::new((1, 3), (3, 3))]);
/// assert_eq!(boards.len(), 1);
/// assert_eq!(boards[0].peg_count(), 31);
/// ```
pub fn replay(initial: &Board, moves: &[Move]) -> Vec<Board> {
    let mut board = initial.clone();
    moves
        .iter()
        .map(|&mv| {
            board.apply_jump(mv);
            board.clone()
        })
        .collect()
}

/// A printable record of a solution: the starting board followed by every
/// move and the board it produced.
#[derive(Clone, Debug)]
pub struct Transcript {
    name: String,
    initial: Board,
    moves: Vec<Move>,
}

impl Transcript {
    /// # Arguments
    /// * `name`: Label of the strategy that produced the moves, e.g. `"DFS"`.
    ///   It becomes the stem of the file name.
    /// * `initial`: Board the moves start from.
    /// * `moves`: The solution, in order.
    pub fn new(name: impl Into<String>, initial: &Board, moves: &[Move]) -> Self {
        Transcript {
            name: name.into(),
            initial: initial.clone(),
            moves: moves.to_vec(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// `"{name}_moves.txt"`.
    pub fn file_name(&self) -> String {
        format!("{}_moves.txt", self.name)
    }

    /// Renders the transcript text.
    ///
    /// # Panics
    /// Panics if a move is illegal on the board it is applied to.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("Initial board:\n");
        out.push_str(&self.initial.render());
        out.push('\n');

        for (mv, board) in self.moves.iter().zip(replay(&self.initial, &self.moves)) {
            out.push_str(&format!("\nMove: {}\n", mv));
            out.push_str(&board.render());
            out.push('\n');
        }
        out
    }

    /// Writes the transcript to `dir/{name}_moves.txt`, replacing any existing
    /// file, and returns the path written.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, TranscriptError> {
        let path = dir.join(self.file_name());
        fs::write(&path, self.render()).map_err(|source| TranscriptError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), moves = self.moves.len(), "transcript written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::CENTER;
    use crate::utils::board_from_text;

    const TWO_JUMPS: [Move; 2] = [
        Move::new((1, 3), (3, 3)),
        Move::new((2, 1), (2, 3)),
    ];

    #[test]
    fn test_replay_snapshots() {
        let initial = Board::standard(CENTER);
        let boards = replay(&initial, &TWO_JUMPS);
        assert_eq!(boards.len(), 2);
        assert_eq!(boards[0].peg_count(), 31);
        assert_eq!(boards[1].peg_count(), 30);
        assert_eq!(boards[1], initial.after(TWO_JUMPS[0]).after(TWO_JUMPS[1]));
        // The input board is untouched.
        assert_eq!(initial.peg_count(), 32);
    }

    #[test]
    fn test_replay_empty_moves() {
        assert!(replay(&Board::standard(CENTER), &[]).is_empty());
    }

    #[test]
    #[should_panic(expected = "illegal jump")]
    fn test_replay_illegal_move_panics() {
        replay(&Board::standard(CENTER), &[Move::new((0, 2), (2, 2))]);
    }

    #[test]
    fn test_transcript_render_format() {
        let initial = Board::standard(CENTER);
        let transcript = Transcript::new("DFS", &initial, &TWO_JUMPS[..1]);
        let text = transcript.render();

        let expected = format!(
            "Initial board:\n{}\n\nMove: (1, 3) -> (3, 3)\n{}\n",
            initial.render(),
            initial.after(TWO_JUMPS[0]).render()
        );
        assert_eq!(text, expected);
        assert_eq!(transcript.file_name(), "DFS_moves.txt");
    }

    #[test]
    fn test_transcript_boards_parse_back() {
        let initial = Board::standard(CENTER);
        let text = Transcript::new("GBFS", &initial, &TWO_JUMPS).render();
        // Each board block is 7 rows; the last one is the final position.
        let lines: Vec<&str> = text.lines().collect();
        let last_block = lines[lines.len() - 7..].join("\n");
        let parsed = board_from_text(&last_block).unwrap();
        assert_eq!(parsed, replay(&initial, &TWO_JUMPS)[1]);
    }

    #[test]
    fn test_transcript_write_to_dir() {
        let dir = tempfile::tempdir().unwrap();
        let initial = Board::standard(CENTER);
        let transcript = Transcript::new("A_star", &initial, &TWO_JUMPS);

        let path = transcript.write_to_dir(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("A_star_moves.txt"));
        assert_eq!(fs::read_to_string(&path).unwrap(), transcript.render());
    }

    #[test]
    fn test_transcript_write_to_missing_dir_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let transcript = Transcript::new("DFS", &Board::standard(CENTER), &[]);

        let err = transcript.write_to_dir(&missing).unwrap_err();
        let TranscriptError::Io { path, .. } = err;
        assert_eq!(path, missing.join("DFS_moves.txt"));
    }
}
