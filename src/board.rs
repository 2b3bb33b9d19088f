use rand::{seq::SliceRandom, Rng};
use std::fmt;

/// Direction the blank travels when a tile slides into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Neighbor generation order.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    pub fn offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// One immutable configuration of an n-by-n sliding puzzle.
///
/// Tiles are stored row-major; label 0 is the blank. The grid is expected to
/// hold every label in `0..n*n` exactly once. Nothing here re-checks that, so
/// boards coming from outside should go through [`crate::loader`] first.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PuzzleState {
    size: usize,
    tiles: Vec<u32>,
    blank: (usize, usize),
}

impl PuzzleState {
    /// Builds a state from a square grid of labels.
    pub fn new<R: AsRef<[u32]>>(rows: &[R]) -> Self {
        let size = rows.len();
        debug_assert!(
            rows.iter().all(|row| row.as_ref().len() == size),
            "puzzle grid must be square"
        );

        let tiles: Vec<u32> = rows
            .iter()
            .flat_map(|row| row.as_ref().iter().copied())
            .collect();

        Self::from_tiles(size, tiles)
    }

    /// Builds a state from `size * size` row-major labels.
    pub fn from_tiles(size: usize, tiles: Vec<u32>) -> Self {
        debug_assert_eq!(tiles.len(), size * size, "tile count must be size squared");

        let index = tiles.iter().position(|&t| t == 0).unwrap_or(0);
        let blank = if size == 0 {
            (0, 0)
        } else {
            (index / size, index % size)
        };

        Self { size, tiles, blank }
    }

    /// The solved state: labels in row-major order, blank last.
    pub fn goal(size: usize) -> Self {
        let cells = size * size;
        let tiles = (0..cells)
            .map(|i| if i + 1 == cells { 0 } else { i as u32 + 1 })
            .collect();

        Self::from_tiles(size, tiles)
    }

    /// A uniformly random permutation. Half of these are unsolvable.
    pub fn shuffled<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let mut tiles = Self::goal(size).tiles;
        tiles.shuffle(rng);
        Self::from_tiles(size, tiles)
    }

    /// Walks the blank `steps` times from the goal, never undoing the previous
    /// move. The result is always solvable in at most `steps` moves.
    pub fn scrambled<R: Rng + ?Sized>(size: usize, steps: usize, rng: &mut R) -> Self {
        let mut state = Self::goal(size);
        let mut last: Option<Move> = None;

        for _ in 0..steps {
            let options: Vec<(Move, PuzzleState)> = Move::ALL
                .iter()
                .filter(|&&dir| last.map_or(true, |prev| dir != prev.opposite()))
                .filter_map(|&dir| state.try_move(dir).map(|next| (dir, next)))
                .collect();

            match options.choose(rng) {
                Some((dir, next)) => {
                    last = Some(*dir);
                    state = next.clone();
                }
                None => break,
            }
        }

        state
    }

    pub fn dimension(&self) -> usize {
        self.size
    }

    pub fn tile(&self, row: usize, col: usize) -> u32 {
        self.tiles[row * self.size + col]
    }

    /// Row-major labels.
    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        // chunks() rejects a zero chunk size
        self.tiles.chunks(self.size.max(1))
    }

    /// (row, col) of the blank.
    pub fn blank(&self) -> (usize, usize) {
        self.blank
    }

    /// Number of tiles out of place, blank excluded.
    pub fn hamming(&self) -> usize {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value != 0)
            .filter(|&(index, &value)| value as usize != index + 1)
            .count()
    }

    /// Sum of the grid distances between every tile and its goal cell.
    pub fn manhattan(&self) -> usize {
        let mut distance = 0;
        for (index, &value) in self.tiles.iter().enumerate() {
            if value == 0 {
                continue;
            }
            let (row, col) = (index / self.size, index % self.size);
            let target_row = (value as usize - 1) / self.size;
            let target_col = (value as usize - 1) % self.size;
            distance += row.abs_diff(target_row) + col.abs_diff(target_col);
        }
        distance
    }

    pub fn is_goal(&self) -> bool {
        let last = self.tiles.len().saturating_sub(1);

        self.tiles.iter().enumerate().all(|(index, &value)| {
            if index == last {
                value == 0
            } else {
                value as usize == index + 1
            }
        })
    }

    /// The state after the blank moves one cell in `dir`, or `None` if that
    /// would leave the grid.
    pub fn try_move(&self, dir: Move) -> Option<Self> {
        let (dr, dc) = dir.offset();
        let row = self.blank.0.checked_add_signed(dr)?;
        let col = self.blank.1.checked_add_signed(dc)?;
        if row >= self.size || col >= self.size {
            return None;
        }

        let mut tiles = self.tiles.clone();
        tiles.swap(self.index(self.blank), self.index((row, col)));

        Some(Self {
            size: self.size,
            tiles,
            blank: (row, col),
        })
    }

    /// States reachable with one move, in up, down, left, right order.
    pub fn neighbors(&self) -> Neighbors<'_> {
        Neighbors {
            source: self,
            dirs: Move::ALL.into_iter(),
        }
    }

    /// The blank move that turns `self` into `other`, if they are one move apart.
    pub fn move_between(&self, other: &Self) -> Option<Move> {
        if self.size != other.size {
            return None;
        }
        Move::ALL
            .iter()
            .copied()
            .find(|&dir| self.try_move(dir).as_ref() == Some(other))
    }

    /// A companion state of opposite solvability.
    ///
    /// Swaps the two vertically stacked tiles of the rightmost column in the
    /// bottom-right 2x2 block that does not contain the blank. Returns `None`
    /// only when the grid is too small to have such a pair.
    pub fn twin(&self) -> Option<Self> {
        if self.size < 2 {
            return None;
        }

        let (upper, lower) = (self.size - 2, self.size - 1);
        for col in (self.size - 2..self.size).rev() {
            let top = self.index((upper, col));
            let bottom = self.index((lower, col));
            if self.tiles[top] != 0 && self.tiles[bottom] != 0 {
                let mut tiles = self.tiles.clone();
                tiles.swap(top, bottom);
                return Some(Self {
                    size: self.size,
                    tiles,
                    blank: self.blank,
                });
            }
        }

        None
    }

    /// Inversion-parity solvability test.
    ///
    /// Odd widths are solvable with an even inversion count; even widths when
    /// the inversion count plus the blank's row is odd.
    pub fn has_solvable_parity(&self) -> bool {
        let inversions = self.count_inversions();

        if self.size % 2 == 1 {
            inversions % 2 == 0
        } else {
            (inversions + self.blank.0) % 2 == 1
        }
    }

    fn count_inversions(&self) -> usize {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(_, &val)| val != 0)
            .map(|(i, &val)| {
                self.tiles[i + 1..]
                    .iter()
                    .filter(|&&next| next != 0 && next < val)
                    .count()
            })
            .sum()
    }

    fn index(&self, (row, col): (usize, usize)) -> usize {
        row * self.size + col
    }
}

impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.size)?;
        for row in self.rows() {
            for &val in row {
                write!(f, "{:2} ", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Lazy iterator over the successors of a [`PuzzleState`].
pub struct Neighbors<'a> {
    source: &'a PuzzleState,
    dirs: std::array::IntoIter<Move, 4>,
}

impl Iterator for Neighbors<'_> {
    type Item = PuzzleState;

    fn next(&mut self) -> Option<Self::Item> {
        for dir in self.dirs.by_ref() {
            if let Some(next) = self.source.try_move(dir) {
                return Some(next);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.dirs.len()))
    }
}
