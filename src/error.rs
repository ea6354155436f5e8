use std::io;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("board dimension must be at least 2, got {n}")]
    DimensionTooSmall { n: usize },
    #[error("row {row} has {len} tiles, expected {n}")]
    NotSquare { row: usize, len: usize, n: usize },
    #[error("tile {value} is outside 0..={max}")]
    OutOfRange { value: u32, max: u32 },
    #[error("tile {value} appears more than once")]
    Duplicate { value: u32 },
    #[error("no initial board was supplied")]
    MissingBoard,
    #[error("invalid integer '{token}' at token {position}")]
    Parse { token: String, position: usize },
    #[error("input ended after {found} integers, expected {expected}")]
    UnexpectedEnd { expected: usize, found: usize },
    #[error("{extra} unexpected tokens after the last tile")]
    TrailingInput { extra: usize },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
