pub mod board;
pub mod error;
pub mod input;
pub mod render;
pub mod solver;

pub use board::{Board, Move};
pub use error::{Error, Result};
pub use solver::{Priority, Solver, SolverConfig};
