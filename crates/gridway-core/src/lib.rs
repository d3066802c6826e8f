//! **gridway-core** — grid model for the gridway shortest-path visualiser.
//!
//! This crate provides the board model the rest of the workspace operates
//! on: 0-indexed grid coordinates, mutually exclusive cell state tags, and
//! an N×N board with endpoint tracking and the placement/clear/reset
//! operations driven by the interactive control loop.

pub mod board;
pub mod cell;
pub mod coord;
pub mod error;

pub use board::Board;
pub use cell::{CellState, Role};
pub use coord::Coord;
pub use error::{BoardError, PlaceError};
