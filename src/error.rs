use std::path::PathBuf;

/// Errors raised while validating a puzzle configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("expected coordinates as 'row,col', got '{0}'")]
    Malformed(String),

    #[error("'{0}' is not a non-negative integer")]
    NotANumber(String),

    #[error("({row}, {col}) is outside the 7x7 grid")]
    OffGrid { row: usize, col: usize },

    #[error("({row}, {col}) is not a playable cell")]
    NotPlayable { row: usize, col: usize },

    #[error("a custom board needs an explicit target")]
    MissingTarget,
}

/// Errors raised while reading a board from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardParseError {
    #[error("expected {expected} rows, found {found}")]
    RowCount { expected: usize, found: usize },

    #[error("row {row} is too long: expected at most {max} characters, found {found}")]
    RowTooLong { row: usize, max: usize, found: usize },

    #[error("unrecognized character '{ch}' in row {row} col {col}")]
    UnrecognizedChar { ch: char, row: usize, col: usize },

    #[error("cell ({row}, {col}) is out of board but holds '{ch}'")]
    MarkerOutOfBoard { ch: char, row: usize, col: usize },

    #[error("cell ({row}, {col}) is playable but left blank")]
    BlankPlayable { row: usize, col: usize },
}

/// Errors raised while writing a solution transcript.
#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("failed to write transcript {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Reasons a search stops before settling its question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("node limit of {limit} explored states reached")]
    NodeLimitReached { limit: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NotPlayable { row: 0, col: 0 };
        assert_eq!(err.to_string(), "(0, 0) is not a playable cell");
        let err = ConfigError::Malformed("3;3".to_string());
        assert_eq!(err.to_string(), "expected coordinates as 'row,col', got '3;3'");
    }

    #[test]
    fn test_transcript_error_display() {
        let err = TranscriptError::Io {
            path: PathBuf::from("out/DFS_moves.txt"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(
            err.to_string(),
            "failed to write transcript out/DFS_moves.txt: denied"
        );
    }

    #[test]
    fn test_search_error_display() {
        let err = SearchError::NodeLimitReached { limit: 500 };
        assert_eq!(err.to_string(), "node limit of 500 explored states reached");
    }
}
