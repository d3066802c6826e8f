//! Cell state tags and placement roles.

/// The state tag of a single board cell.
///
/// Tags are mutually exclusive: a cell is exactly one of these at any time.
/// Rendering maps a tag to a colour at the display boundary; the model never
/// deals in colours.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    /// Untouched, passable cell.
    #[default]
    Empty,
    /// Impassable cell; excluded from adjacency.
    Barrier,
    /// The search origin. At most one per board.
    Start,
    /// The search target. At most one per board.
    End,
    /// Discovered but not yet processed by the current run.
    Open,
    /// Processed by the current run.
    Closed,
    /// On the reconstructed shortest path.
    Path,
}

impl CellState {
    /// Whether this tag is one of the two endpoint roles.
    #[inline]
    pub const fn is_role(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }

    /// Whether a search run may overwrite this tag with a progress tag
    /// (Open/Closed/Path). Barriers and endpoint roles are immune, so
    /// Start and End keep their tags for the whole run.
    #[inline]
    pub const fn is_markable(self) -> bool {
        matches!(self, Self::Empty | Self::Open | Self::Closed | Self::Path)
    }
}

/// A role assignable to a cell through placement.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Start,
    End,
    Barrier,
}

impl Role {
    /// The cell state tag this role places.
    #[inline]
    pub const fn state(self) -> CellState {
        match self {
            Self::Start => CellState::Start,
            Self::End => CellState::End,
            Self::Barrier => CellState::Barrier,
        }
    }
}
