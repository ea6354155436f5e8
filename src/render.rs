use crossterm::style::Stylize;
use std::io::{self, Write};

use crate::board::{field_width, Board};
use crate::solver::Solver;

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Highlight tiles sitting in their goal cell.
    pub color: bool,
    /// Print only the move count.
    pub moves_only: bool,
}

/// Writes `board` in the same layout as its `Display` impl, with tiles in
/// their goal cell in green and the blank dimmed.
pub fn write_colored<W: Write>(out: &mut W, board: &Board) -> io::Result<()> {
    let size = board.dimension();
    let width = field_width(size);

    writeln!(out, "{}", size)?;
    for (i, row) in board.rows().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            let cell = format!("{:>width$}", value);
            if value == 0 {
                write!(out, "{}", cell.dark_grey())?;
            } else if board.goal_cell(value) == (i, j) {
                write!(out, "{}", cell.green())?;
            } else {
                write!(out, "{}", cell)?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn write_solution<W: Write>(
    out: &mut W,
    solver: &Solver,
    options: RenderOptions,
) -> io::Result<()> {
    let Some(path) = solver.solution() else {
        return writeln!(out, "No solution possible");
    };

    writeln!(out, "Minimum number of moves = {}", solver.moves())?;
    if options.moves_only {
        return Ok(());
    }

    let mut previous: Option<&Board> = None;
    for board in path {
        if let Some(movement) = previous.and_then(|prev| prev.move_to(board)) {
            writeln!(out, "{}", movement)?;
        }
        if options.color {
            write_colored(out, board)?;
        } else {
            write!(out, "{}", board)?;
        }
        writeln!(out)?;
        previous = Some(board);
    }
    Ok(())
}
