//! Tracing setup shared by the binaries.
//!
//! ## Log Levels
//!
//! - **INFO**: search start and finish, transcripts written
//! - **DEBUG**: progress every 100 000 explored states, node-limit stops
//! - **TRACE**: individual state expansions
use std::io;
use std::sync::OnceLock;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

static INIT: OnceLock<()> = OnceLock::new();

/// Maps a `-v` count to the level applied to this crate's events.
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Installs a stderr `fmt` subscriber.
///
/// `RUST_LOG` takes precedence over `verbosity` when set. Safe to call
/// multiple times; only the first call has effect.
pub fn init(verbosity: u8) {
    INIT.get_or_init(|| {
        let default_directive = format!(
            "{}={}",
            env!("CARGO_CRATE_NAME"),
            level_for_verbosity(verbosity)
        );
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for_verbosity(0), LevelFilter::INFO);
        assert_eq!(level_for_verbosity(1), LevelFilter::DEBUG);
        assert_eq!(level_for_verbosity(2), LevelFilter::TRACE);
        assert_eq!(level_for_verbosity(9), LevelFilter::TRACE);
    }

    #[test]
    fn test_init_is_idempotent() {
        init(0);
        init(2);
        tracing::info!("logging initialized twice");
    }
}
