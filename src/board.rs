use rand::{seq::SliceRandom, Rng};
use std::fmt;

use crate::error::{Error, Result};

/// Direction the sliding tile travels when it moves into the blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Left,
    Down,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Left, Move::Down, Move::Right];

    /// Displacement of the blank as `(row, col)`.
    pub fn as_offset(&self) -> (isize, isize) {
        match self {
            Move::Up => (1, 0),
            Move::Left => (0, 1),
            Move::Down => (-1, 0),
            Move::Right => (0, -1),
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
            Move::Left => "Left",
            Move::Down => "Down",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

/// An immutable n×n arrangement of tiles `0..n²`, where `0` is the blank.
///
/// Every operation that changes the arrangement returns a new `Board`.
/// Equality is structural over the dimension and every cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    tiles: Vec<u32>,
    blank: usize,
}

impl Board {
    /// Builds a board from row-major rows, copying them.
    ///
    /// Fails unless the rows form an n×n grid (n ≥ 2) holding each value of
    /// `0..n²` exactly once.
    pub fn new<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self> {
        let size = rows.len();
        if size < 2 {
            return Err(Error::DimensionTooSmall { n: size });
        }

        let mut tiles = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != size {
                return Err(Error::NotSquare {
                    row,
                    len: values.len(),
                    n: size,
                });
            }
            tiles.extend_from_slice(values);
        }

        Self::from_tiles(size, tiles)
    }

    fn from_tiles(size: usize, tiles: Vec<u32>) -> Result<Self> {
        let cells = size * size;
        let mut seen = vec![false; cells];
        let mut blank = 0;

        for (i, &value) in tiles.iter().enumerate() {
            let index = value as usize;
            if index >= cells {
                return Err(Error::OutOfRange {
                    value,
                    max: (cells - 1) as u32,
                });
            }
            if seen[index] {
                return Err(Error::Duplicate { value });
            }
            seen[index] = true;
            if value == 0 {
                blank = i;
            }
        }

        Ok(Self { size, tiles, blank })
    }

    /// The solved arrangement: `1..n²` in row-major order, blank last.
    pub fn goal(size: usize) -> Result<Self> {
        if size < 2 {
            return Err(Error::DimensionTooSmall { n: size });
        }
        let cells = size * size;
        let tiles = (1..=cells).map(|i| (i % cells) as u32).collect();

        Ok(Self {
            size,
            tiles,
            blank: cells - 1,
        })
    }

    /// A uniformly random arrangement. Roughly half of these are unsolvable.
    pub fn shuffled<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Result<Self> {
        let mut board = Self::goal(size)?;
        board.tiles.shuffle(rng);
        board.blank = board.tiles.iter().position(|&v| v == 0).unwrap_or(0);
        Ok(board)
    }

    pub fn dimension(&self) -> usize {
        self.size
    }

    pub fn tile(&self, row: usize, col: usize) -> u32 {
        self.tiles[row * self.size + col]
    }

    /// `(row, col)` of the blank.
    pub fn blank(&self) -> (usize, usize) {
        (self.blank / self.size, self.blank % self.size)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u32]> + '_ {
        self.tiles.chunks(self.size)
    }

    /// Goal `(row, col)` of a non-blank tile.
    pub fn goal_cell(&self, value: u32) -> (usize, usize) {
        let index = value as usize - 1;
        (index / self.size, index % self.size)
    }

    /// Number of non-blank tiles outside their goal cell.
    pub fn hamming(&self) -> usize {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(i, &value)| value != 0 && value as usize != i + 1)
            .count()
    }

    /// Sum over non-blank tiles of their row and column distance to the goal cell.
    pub fn manhattan(&self) -> usize {
        let mut distance = 0;
        for i in 0..self.size {
            for j in 0..self.size {
                let value = self.tile(i, j);
                if value != 0 {
                    let (target_row, target_col) = self.goal_cell(value);
                    distance += i.abs_diff(target_row) + j.abs_diff(target_col);
                }
            }
        }
        distance
    }

    pub fn is_goal(&self) -> bool {
        let cells = self.tiles.len();
        self.tiles
            .iter()
            .enumerate()
            .all(|(i, &value)| value as usize == (i + 1) % cells)
    }

    /// Swaps the first two cells of row 0, or of row 1 when the blank sits in
    /// either of them. The result has the opposite permutation parity, so
    /// exactly one of `self` and its twin can reach the goal.
    pub fn twin(&self) -> Board {
        let row = if self.blank < 2 { 1 } else { 0 };
        let first = row * self.size;

        let mut tiles = self.tiles.clone();
        tiles.swap(first, first + 1);

        Board {
            size: self.size,
            tiles,
            blank: self.blank,
        }
    }

    /// The board after sliding a tile in `movement`'s direction, if one is there.
    pub fn slide(&self, movement: Move) -> Option<Board> {
        let (dx, dy) = movement.as_offset();
        let (x_pos, y_pos) = self.blank();

        let new_x = x_pos.checked_add_signed(dx)?;
        let new_y = y_pos.checked_add_signed(dy)?;
        if new_x >= self.size || new_y >= self.size {
            return None;
        }

        let target = new_x * self.size + new_y;
        let mut tiles = self.tiles.clone();
        tiles.swap(self.blank, target);

        Some(Board {
            size: self.size,
            tiles,
            blank: target,
        })
    }

    /// Every board one slide away: two in a corner, three on an edge, four otherwise.
    pub fn neighbors(&self) -> Vec<Board> {
        Move::ALL
            .iter()
            .filter_map(|&movement| self.slide(movement))
            .collect()
    }

    /// The slide that turns `self` into `other`, if they are neighbors.
    pub fn move_to(&self, other: &Board) -> Option<Move> {
        Move::ALL
            .into_iter()
            .find(|&movement| self.slide(movement).as_ref() == Some(other))
    }

    /// Decides solvability from inversion parity. The solver does not use
    /// this; it is an independent check for generated boards.
    pub fn is_solvable_by_parity(&self) -> bool {
        let inversions = Self::count_inversions(&self.tiles);
        let (empty_row, _) = self.blank();

        if self.size % 2 == 1 {
            inversions % 2 == 0
        } else {
            // Counting rows from the top or bottom gives the same parity for even n.
            (inversions + empty_row) % 2 == 1
        }
    }

    fn count_inversions(flattened: &[u32]) -> usize {
        flattened
            .iter()
            .enumerate()
            .filter(|&(_, &val)| val != 0)
            .map(|(i, &val)| {
                flattened[i + 1..]
                    .iter()
                    .filter(|&&next| next != 0 && next < val)
                    .count()
            })
            .sum()
    }
}

/// Width of one rendered cell: `⌈log10(n²)⌉ + 1`.
pub(crate) fn field_width(size: usize) -> usize {
    let cells = size * size;
    let mut digits = 0;
    let mut power = 1;
    while power < cells {
        power *= 10;
        digits += 1;
    }
    digits + 1
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = field_width(self.size);
        writeln!(f, "{}", self.size)?;
        for row in self.rows() {
            for &val in row {
                write!(f, "{:>width$}", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn board(rows: &[&[u32]]) -> Board {
        Board::new(rows).expect("valid board")
    }

    #[test]
    fn rejects_malformed_grids() {
        assert!(matches!(
            Board::new(&[[0u32]]),
            Err(Error::DimensionTooSmall { n: 1 })
        ));
        assert!(matches!(
            Board::new(&[vec![1u32, 2], vec![3]]),
            Err(Error::NotSquare { row: 1, len: 1, n: 2 })
        ));
        assert!(matches!(
            Board::new(&[[1u32, 2], [3, 4]]),
            Err(Error::OutOfRange { value: 4, max: 3 })
        ));
        assert!(matches!(
            Board::new(&[[1u32, 1], [3, 0]]),
            Err(Error::Duplicate { value: 1 })
        ));
    }

    #[test]
    fn copies_its_input() {
        let mut rows = vec![vec![1u32, 2], vec![3, 0]];
        let board = Board::new(&rows).unwrap();
        rows[0].swap(0, 1);
        assert!(board.is_goal());
    }

    #[test]
    fn scores_classic_board() {
        let board = board(&[&[8, 1, 3], &[4, 0, 2], &[7, 6, 5]]);
        assert_eq!(board.hamming(), 5);
        assert_eq!(board.manhattan(), 10);
        assert!(!board.is_goal());
    }

    #[test]
    fn goal_board() {
        let goal = Board::goal(3).unwrap();
        assert_eq!(goal, board(&[&[1, 2, 3], &[4, 5, 6], &[7, 8, 0]]));
        assert!(goal.is_goal());
        assert_eq!(goal.hamming(), 0);
        assert_eq!(goal.manhattan(), 0);
        assert_eq!(goal.blank(), (2, 2));
    }

    #[test]
    fn twin_swaps_first_row_unless_blank_is_there() {
        let b = board(&[&[1, 2], &[3, 0]]);
        assert_eq!(b.twin(), board(&[&[2, 1], &[3, 0]]));

        let b = board(&[&[0, 1], &[2, 3]]);
        assert_eq!(b.twin(), board(&[&[0, 1], &[3, 2]]));

        let b = board(&[&[1, 0, 3], &[4, 2, 5], &[7, 8, 6]]);
        assert_eq!(b.twin(), board(&[&[1, 0, 3], &[2, 4, 5], &[7, 8, 6]]));
        assert_eq!(b, board(&[&[1, 0, 3], &[4, 2, 5], &[7, 8, 6]]));
    }

    #[test]
    fn neighbor_counts_follow_blank_position() {
        let corner = Board::goal(3).unwrap();
        assert_eq!(corner.neighbors().len(), 2);

        let edge = board(&[&[1, 0, 3], &[4, 2, 5], &[7, 8, 6]]);
        assert_eq!(edge.neighbors().len(), 3);

        let center = board(&[&[1, 2, 3], &[4, 0, 5], &[7, 8, 6]]);
        let neighbors = center.neighbors();
        assert_eq!(neighbors.len(), 4);
        assert!(neighbors.contains(&board(&[&[1, 2, 3], &[4, 5, 0], &[7, 8, 6]])));
        assert!(neighbors.contains(&board(&[&[1, 0, 3], &[4, 2, 5], &[7, 8, 6]])));
    }

    #[test]
    fn move_to_names_the_slide() {
        let start = board(&[&[1, 2, 3], &[4, 5, 6], &[7, 0, 8]]);
        let goal = Board::goal(3).unwrap();
        assert_eq!(start.move_to(&goal), Some(Move::Left));
        assert_eq!(goal.move_to(&start), Some(Move::Right));
        assert_eq!(start.move_to(&start), None);
        assert_eq!(Move::Left.opposite(), Move::Right);
    }

    #[test]
    fn slide_stays_in_bounds() {
        let goal = Board::goal(2).unwrap();
        assert_eq!(goal.slide(Move::Up), None);
        assert_eq!(goal.slide(Move::Left), None);
        assert_eq!(goal.slide(Move::Down), Some(board(&[&[1, 0], &[3, 2]])));
    }

    #[test]
    fn renders_with_padded_fields() {
        let b = board(&[&[8, 1, 3], &[4, 0, 2], &[7, 6, 5]]);
        assert_eq!(b.to_string(), "3\n 8 1 3\n 4 0 2\n 7 6 5\n");

        let goal = Board::goal(4).unwrap();
        assert_eq!(
            goal.to_string(),
            "4\n  1  2  3  4\n  5  6  7  8\n  9 10 11 12\n 13 14 15  0\n"
        );
        assert_eq!(field_width(10), 3);
    }

    #[test]
    fn shuffled_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let b = Board::shuffled(4, &mut rng).unwrap();
        let mut values: Vec<u32> = b.rows().flatten().copied().collect();
        values.sort_unstable();
        assert_eq!(values, (0..16).collect::<Vec<_>>());
        let (row, col) = b.blank();
        assert_eq!(b.tile(row, col), 0);
    }

    fn any_board() -> impl Strategy<Value = Board> {
        (2usize..=5).prop_flat_map(|n| {
            Just((0..(n * n) as u32).collect::<Vec<_>>())
                .prop_shuffle()
                .prop_map(move |tiles| {
                    let rows: Vec<&[u32]> = tiles.chunks(n).collect();
                    Board::new(&rows).expect("permutation is a valid board")
                })
        })
    }

    proptest! {
        #[test]
        fn exactly_one_of_board_and_twin_is_solvable(b in any_board()) {
            prop_assert_ne!(b.is_solvable_by_parity(), b.twin().is_solvable_by_parity());
        }

        #[test]
        fn manhattan_is_zero_only_at_goal(b in any_board()) {
            prop_assert_eq!(b.manhattan() == 0, b.is_goal());
        }

        #[test]
        fn hamming_never_exceeds_manhattan(b in any_board()) {
            prop_assert!(b.hamming() <= b.manhattan());
        }

        #[test]
        fn equality_is_an_equivalence(a in any_board(), b in any_board()) {
            let copy = a.clone();
            prop_assert_eq!(&a, &a);
            prop_assert_eq!(a == b, b == a);
            if a == copy && copy == b {
                prop_assert_eq!(&a, &b);
            }
        }

        #[test]
        fn neighbors_differ_by_one_slide(b in any_board()) {
            for neighbor in b.neighbors() {
                let moved = b.move_to(&neighbor);
                prop_assert!(moved.is_some());
                prop_assert_eq!(neighbor.move_to(&b), moved.map(|m| m.opposite()));
            }
        }
    }
}
