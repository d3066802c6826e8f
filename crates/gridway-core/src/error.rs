//! Board construction and mutation errors.

use thiserror::Error;

use crate::coord::Coord;

/// Board construction failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    /// The requested board size was not positive.
    #[error("invalid board size {0}: must be positive")]
    InvalidSize(i32),
}

/// Placement rejection. The board is left unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlaceError {
    /// The target cell holds Start or End; it must be cleared before any
    /// other role can take the cell.
    #[error("cell {0} holds an endpoint role; clear it first")]
    RoleOccupied(Coord),
}
