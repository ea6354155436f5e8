use std::io::Read;
use std::str::FromStr;

use crate::board::Board;
use crate::error::{Error, Result};

fn parse_token<T: FromStr>(token: &str, position: usize) -> Result<T> {
    token.parse().map_err(|_| Error::Parse {
        token: token.to_string(),
        position,
    })
}

/// Parses a puzzle: the dimension `n` followed by n² tiles in row-major
/// order, all separated by whitespace.
pub fn parse_board(text: &str) -> Result<Board> {
    let mut tokens = text.split_whitespace().enumerate();

    let size: usize = match tokens.next() {
        Some((position, token)) => parse_token(token, position)?,
        None => {
            return Err(Error::UnexpectedEnd {
                expected: 1,
                found: 0,
            })
        }
    };
    let expected = size.saturating_mul(size);

    let mut tiles = Vec::with_capacity(expected.min(text.len()));
    for (position, token) in tokens.by_ref().take(expected) {
        tiles.push(parse_token::<u32>(token, position)?);
    }
    if tiles.len() < expected {
        return Err(Error::UnexpectedEnd {
            expected: expected.saturating_add(1),
            found: tiles.len() + 1,
        });
    }

    let extra = tokens.count();
    if extra > 0 {
        return Err(Error::TrailingInput { extra });
    }

    let rows: Vec<&[u32]> = tiles.chunks(size.max(1)).collect();
    Board::new(&rows)
}

pub fn read_board<R: Read>(mut reader: R) -> Result<Board> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_board(&text)
}
