//! Puzzle configuration: which cell starts empty and where the last peg must end.
use crate::engine::{is_on_grid, is_playable, Board, Coord, CENTER};
use crate::error::ConfigError;

/// A validated starting hole and target cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PuzzleConfig {
    pub initial_empty: Coord,
    pub target: Coord,
}

impl PuzzleConfig {
    /// Validates both cells.
    ///
    /// When `target` is `None` the last peg must finish where the hole started.
    ///
    /// # Examples
    /// ```
    /// use peg_solitaire_solver::config::PuzzleConfig;
    /// let config = PuzzleConfig::new((0, 2), None).unwrap();
    /// assert_eq!(config.target, (0, 2));
    /// assert!(PuzzleConfig::new((0, 0), None).is_err());
    /// ```
    pub fn new(initial_empty: Coord, target: Option<Coord>) -> Result<Self, ConfigError> {
        let target = target.unwrap_or(initial_empty);
        check_playable(initial_empty)?;
        check_playable(target)?;
        Ok(PuzzleConfig {
            initial_empty,
            target,
        })
    }

    /// The classic puzzle: center hole, last peg on the center.
    pub fn centered() -> Self {
        PuzzleConfig {
            initial_empty: CENTER,
            target: CENTER,
        }
    }

    pub fn initial_board(&self) -> Board {
        Board::standard(self.initial_empty)
    }
}

impl Default for PuzzleConfig {
    fn default() -> Self {
        PuzzleConfig::centered()
    }
}

/// Rejects cells that are off the grid or in a cut-off corner.
pub fn check_playable(coord: Coord) -> Result<Coord, ConfigError> {
    let (row, col) = coord;
    if !is_on_grid(coord) {
        return Err(ConfigError::OffGrid { row, col });
    }
    if !is_playable(coord) {
        return Err(ConfigError::NotPlayable { row, col });
    }
    Ok(coord)
}

/// Parses `"r,c"` into a playable cell.
///
/// Whitespace around either number and one pair of surrounding parentheses
/// are allowed, so `"(3, 3)"` as printed in transcripts parses too.
///
/// # Examples
/// ```
/// use peg_solitaire_solver::config::parse_coord;
/// assert_eq!(parse_coord("3,3"), Ok((3, 3)));
/// assert_eq!(parse_coord(" (0, 2) "), Ok((0, 2)));
/// assert!(parse_coord("3 3").is_err());
/// ```
pub fn parse_coord(input: &str) -> Result<Coord, ConfigError> {
    let trimmed = input.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(trimmed);

    let mut parts = inner.split(',');
    let (Some(row), Some(col), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ConfigError::Malformed(input.trim().to_string()));
    };
    let coord = (parse_index(row)?, parse_index(col)?);
    check_playable(coord)
}

fn parse_index(part: &str) -> Result<usize, ConfigError> {
    let part = part.trim();
    part.parse::<usize>()
        .map_err(|_| ConfigError::NotANumber(part.to_string()))
}
