use std::io;
use thiserror::Error;

/// Reasons a textual board description is rejected before it reaches the solver.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read puzzle: {0}")]
    Io(#[from] io::Error),
    #[error("puzzle is empty, expected a leading dimension")]
    MissingDimension,
    #[error("`{token}` is not a non-negative integer")]
    InvalidToken { token: String },
    #[error("dimension {0} is too small, need at least 2")]
    InvalidDimension(usize),
    #[error("expected {expected} tiles, found {found}")]
    WrongTileCount { expected: usize, found: usize },
    #[error("tile {label} is outside 0..{limit}")]
    LabelOutOfRange { label: u32, limit: usize },
    #[error("tile {0} appears more than once")]
    DuplicateLabel(u32),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("no initial puzzle state was given")]
    MissingInitialState,
    #[error("search gave up after {limit} iterations")]
    IterationLimitExceeded { limit: usize },
}
