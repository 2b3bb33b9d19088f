//! Text input for boards.
//!
//! The format is a dimension followed by the labels in row-major order, all
//! separated by whitespace. Line breaks are not significant, so the output of
//! `PuzzleState`'s `Display` impl reads back unchanged:
//!
//! ```text
//! 3
//!  0  1  3
//!  4  2  5
//!  7  8  6
//! ```

use std::fs;
use std::path::Path;

use crate::board::PuzzleState;
use crate::error::LoadError;

pub fn load_board<P: AsRef<Path>>(path: P) -> Result<PuzzleState, LoadError> {
    let text = fs::read_to_string(path)?;
    parse_board(&text)
}

pub fn parse_board(text: &str) -> Result<PuzzleState, LoadError> {
    let mut numbers = text.split_whitespace().map(|token| {
        token
            .parse::<u32>()
            .map_err(|_| LoadError::InvalidToken {
                token: token.to_string(),
            })
    });

    let size = numbers.next().ok_or(LoadError::MissingDimension)?? as usize;
    let tiles = numbers.collect::<Result<Vec<u32>, _>>()?;

    validate_tiles(size, &tiles)?;
    Ok(PuzzleState::from_tiles(size, tiles))
}

/// Checks that `tiles` is a permutation of `0..size*size`.
pub fn validate_tiles(size: usize, tiles: &[u32]) -> Result<(), LoadError> {
    if size < 2 {
        return Err(LoadError::InvalidDimension(size));
    }

    let limit = size
        .checked_mul(size)
        .ok_or(LoadError::InvalidDimension(size))?;
    if tiles.len() != limit {
        return Err(LoadError::WrongTileCount {
            expected: limit,
            found: tiles.len(),
        });
    }

    let mut seen = vec![false; limit];
    for &label in tiles {
        let slot = seen
            .get_mut(label as usize)
            .ok_or(LoadError::LabelOutOfRange { label, limit })?;
        if *slot {
            return Err(LoadError::DuplicateLabel(label));
        }
        *slot = true;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_board() {
        let state = parse_board("3\n 0  1  3\n 4  2  5\n 7  8  6\n").unwrap();
        assert_eq!(state.dimension(), 3);
        assert_eq!(state.blank(), (0, 0));
        assert_eq!(state.tile(1, 1), 2);
        assert_eq!(state.tile(2, 2), 6);
    }

    #[test]
    fn test_display_reads_back() {
        let goal = PuzzleState::goal(4);
        assert_eq!(parse_board(&goal.to_string()).unwrap(), goal);
    }

    #[test]
    fn test_rejects_malformed_input() {
        assert!(matches!(parse_board("  \n"), Err(LoadError::MissingDimension)));
        assert!(matches!(
            parse_board("2 1 x 3 0"),
            Err(LoadError::InvalidToken { token }) if token == "x"
        ));
        assert!(matches!(
            parse_board("2 -1 2 3 0"),
            Err(LoadError::InvalidToken { .. })
        ));
        assert!(matches!(parse_board("1 0"), Err(LoadError::InvalidDimension(1))));
        assert!(matches!(
            parse_board("2 1 2 0"),
            Err(LoadError::WrongTileCount { expected: 4, found: 3 })
        ));
        assert!(matches!(
            parse_board("2 1 2 4 0"),
            Err(LoadError::LabelOutOfRange { label: 4, limit: 4 })
        ));
        assert!(matches!(
            parse_board("2 1 1 3 0"),
            Err(LoadError::DuplicateLabel(1))
        ));
    }

    #[test]
    fn test_load_board_missing_file() {
        assert!(matches!(
            load_board("/nonexistent/puzzle.txt"),
            Err(LoadError::Io(_))
        ));
    }
}
