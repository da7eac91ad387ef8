//! # Peg Solitaire Solver Library
//!
//! This library models English (cross-shaped, 33-hole) peg solitaire and
//! searches for jump sequences that leave a single peg on a chosen cell.
//!
//! It is used by three binaries:
//! - `peg_solver`: Takes a starting hole and a target cell, runs DFS, GBFS
//!   and A*, and writes a move-by-move transcript for each solution.
//! - `human_player`: Allows interactive play via the command line, with undo
//!   and solver hints.
//! - `strategy_evaluator`: Compares the search strategies on random mid-game
//!   positions.
//!
//! ## Modules
//! - `engine`: The board (`Board`), cell states (`Cell`), jumps (`Move`),
//!   move generation, the goal test and an undoable game (`Solitaire`).
//! - `heuristics`: Board evaluation functions used to order best-first search.
//! - `solver`: `solve_dfs`, `solve_gbfs`, `solve_astar` and their reports.
//! - `replay`: Replays solutions and renders them as transcripts.
//! - `config`: Validated starting hole and target, and coordinate parsing.
//! - `logging`: `tracing` subscriber setup for the binaries.
//! - `error`: Error types returned by the library.
//! - `utils`: Parsing boards from text.

pub mod config;
pub mod engine;
pub mod error;
pub mod heuristics;
pub mod logging;
pub mod replay;
pub mod solver;
pub mod utils;
