//! Optimal solver for the n-by-n sliding tile puzzle.
//!
//! ```
//! use npuzzle::{PuzzleState, Solver};
//!
//! let start = PuzzleState::new(&[[1u32, 2, 3], [4, 5, 6], [7, 0, 8]]);
//! let solver = Solver::new(start);
//! assert!(solver.is_solvable());
//! assert_eq!(solver.moves(), Some(1));
//! ```

pub mod board;
pub mod error;
pub mod loader;
pub mod solver;

pub use board::{Move, Neighbors, PuzzleState};
pub use error::{LoadError, SolveError};
pub use loader::{load_board, parse_board};
pub use solver::Solver;
