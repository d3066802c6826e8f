//! The interactive session: the command set and the placement state
//! machine driving the board and the search engine.

use gridway_core::{Board, BoardError, CellState, Coord, Role};
use gridway_paths::{Context, SearchOutcome, astar_run};
use log::{debug, info, warn};
use rand::{Rng, RngExt};

/// A discrete command from the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Place a node; the role depends on the current placement phase.
    PlaceNode(Coord),
    /// Clear a cell (and forget its endpoint role, if it held one).
    RemoveNode(Coord),
    /// Run the search. Requires both endpoints; a no-op otherwise.
    BeginSearch,
    /// Cancel a running search. A no-op between runs.
    CancelSearch,
    /// Return the whole grid to its initial empty state.
    ResetGrid,
    /// Turn a random fraction of empty cells into barriers.
    ScatterBarriers,
    /// Leave the application.
    Quit,
}

/// Session state: the board plus the implicit placement phase.
///
/// The phase is derived from the board rather than stored: no Start yet
/// means the next placement is Start, then End, then barriers. Removing an
/// endpoint re-enters the corresponding phase.
pub struct Session {
    board: Board,
}

impl Session {
    /// Create a session over a fresh `grid_size` × `grid_size` board.
    pub fn new(grid_size: i32) -> Result<Self, BoardError> {
        Ok(Self {
            board: Board::new(grid_size)?,
        })
    }

    /// The board, for rendering and inspection.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Place a node at `c` according to the placement phase. Rejected
    /// placements (a barrier over an endpoint, an endpoint over the other
    /// endpoint) are logged and leave the board unchanged.
    pub fn place_node(&mut self, c: Coord) {
        let role = if self.board.start().is_none() {
            Role::Start
        } else if self.board.end().is_none() {
            Role::End
        } else {
            Role::Barrier
        };
        if let Err(err) = self.board.place(c, role) {
            warn!("placement rejected: {err}");
        }
    }

    /// Clear the cell at `c`.
    pub fn remove_node(&mut self, c: Coord) {
        self.board.clear(c);
    }

    /// Reset the grid completely; placement starts over with Start.
    pub fn reset_grid(&mut self) {
        self.board.reset_all();
    }

    /// Turn roughly `fill` of the empty cells into barriers. Endpoints and
    /// existing barriers are left alone.
    pub fn scatter_barriers(&mut self, rng: &mut impl Rng, fill: f64) {
        let fill = fill.clamp(0.0, 1.0);
        let size = self.board.size();
        for row in 0..size {
            for col in 0..size {
                let c = Coord::new(row, col);
                if self.board.state(c) == Some(CellState::Empty) && rng.random_bool(fill) {
                    self.board.place(c, Role::Barrier).ok();
                }
            }
        }
    }

    /// Run a search to its terminal outcome, invoking `on_step` after every
    /// engine step. Stale markings from the previous run are cleared first.
    ///
    /// Returns `None` when the preconditions are unmet (both endpoints must
    /// be placed); no run is started and the board is untouched.
    pub fn begin_search(
        &mut self,
        ctx: &Context,
        on_step: impl FnMut(&Board),
    ) -> Option<SearchOutcome> {
        let (Some(start), Some(end)) = (self.board.start(), self.board.end()) else {
            warn!("search rejected: place both a start and an end cell first");
            return None;
        };
        self.board.reset_for_new_run();
        debug!("searching from {start} to {end}");
        match astar_run(&mut self.board, ctx, on_step) {
            Ok(outcome) => {
                match &outcome {
                    SearchOutcome::Found(path) => info!("path found, {} steps", path.len() + 1),
                    SearchOutcome::Exhausted => info!("no path exists"),
                    SearchOutcome::Cancelled => info!("search cancelled"),
                }
                Some(outcome)
            }
            Err(err) => {
                warn!("search rejected: {err}");
                None
            }
        }
    }
}
