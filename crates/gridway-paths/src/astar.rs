//! The stepwise A* search and path reconstruction.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use gridway_core::{Board, CellState, Coord};
use thiserror::Error;

use crate::context::Context;
use crate::distance::manhattan;

/// Sentinel for "no known path to this cell yet".
const UNREACHABLE: i32 = i32::MAX;

/// Terminal outcome of a search run. `Exhausted` and `Cancelled` are normal
/// outcomes, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The target was reached. The payload holds the interior of the path,
    /// ordered from the cell adjacent to End back to the cell adjacent to
    /// Start; callers wanting forward order reverse it. The length of the
    /// path in steps is `len() + 1`.
    Found(Vec<Coord>),
    /// The frontier emptied without reaching End: no path exists.
    Exhausted,
    /// The cancellation token was set. The board keeps whatever Open/Closed
    /// markings were applied so far as a visible trace.
    Cancelled,
}

/// Precondition violations. No run is started and the board is untouched.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    /// Start and/or End is not placed on the board.
    #[error("search requires both a start and an end cell")]
    MissingEndpoints,
    /// Start and End name the same cell. The board invariant makes this
    /// unreachable through [`Board::place`]; the check enforces the engine
    /// contract regardless.
    #[error("start and end must be distinct cells")]
    StartIsEnd,
}

/// An entry in the frontier heap, ordered by `(f, seq)` ascending.
///
/// `seq` is a monotonically increasing insertion counter: among equal
/// f-scores, cells discovered earlier are popped first (FIFO). This makes
/// the ordering total and the visitation order deterministic, and tends to
/// smooth the shape of the resulting path.
#[derive(Debug)]
struct FrontierEntry {
    f: i32,
    seq: u64,
    idx: usize,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.seq == other.seq
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Natural (ascending) comparison; the heap wraps entries in
        // `Reverse` to pop the smallest first.
        self.f.cmp(&other.f).then_with(|| self.seq.cmp(&other.seq))
    }
}

#[inline]
fn flat(size: i32, c: Coord) -> usize {
    (c.row * size + c.col) as usize
}

#[inline]
fn unflat(size: i32, i: usize) -> Coord {
    Coord::new(i as i32 / size, i as i32 % size)
}

/// Run an A* search from the board's Start to its End.
///
/// The caller must have called [`Board::reset_for_new_run`] beforehand.
/// `on_step` is invoked synchronously after each state-changing step (one
/// relaxation pass over a popped cell, or one path-cell marking during
/// reconstruction) and must return before the next step begins; the engine
/// itself never sleeps — pacing is the host loop's concern.
///
/// Cancellation is polled once per popped frontier element, before the pop.
/// A cancelled run stops immediately: no further mutation, no
/// reconstruction. On exhaustion the engine resets nothing; clearing stale
/// Open/Closed markings before the next run is the caller's job.
pub fn astar_run(
    board: &mut Board,
    ctx: &Context,
    mut on_step: impl FnMut(&Board),
) -> Result<SearchOutcome, SearchError> {
    let (start, end) = match (board.start(), board.end()) {
        (Some(s), Some(e)) => (s, e),
        _ => return Err(SearchError::MissingEndpoints),
    };
    if start == end {
        return Err(SearchError::StartIsEnd);
    }

    let size = board.size();
    let len = (size * size) as usize;

    // Per-run state, dropped when the run ends.
    let mut g = vec![UNREACHABLE; len];
    let mut f = vec![UNREACHABLE; len];
    let mut parent = vec![usize::MAX; len];
    let mut in_frontier = vec![false; len];
    let mut frontier: BinaryHeap<Reverse<FrontierEntry>> = BinaryHeap::new();
    let mut seq: u64 = 0;
    let mut nbuf: Vec<Coord> = Vec::with_capacity(4);

    let si = flat(size, start);
    g[si] = 0;
    f[si] = manhattan(start, end);
    frontier.push(Reverse(FrontierEntry {
        f: f[si],
        seq,
        idx: si,
    }));
    in_frontier[si] = true;

    loop {
        if ctx.is_done() {
            return Ok(SearchOutcome::Cancelled);
        }
        let Some(Reverse(entry)) = frontier.pop() else {
            break;
        };
        let ci = entry.idx;
        in_frontier[ci] = false;
        let cur = unflat(size, ci);

        if cur == end {
            let path = trace_path(board, &parent, start, end, &mut on_step);
            // Start/End kept their role tags throughout (Board::mark never
            // touches them); one final callback shows the finished path.
            on_step(board);
            return Ok(SearchOutcome::Found(path));
        }

        nbuf.clear();
        board.neighbors(cur, &mut nbuf);
        for &nb in &nbuf {
            let ni = flat(size, nb);
            let tentative = g[ci] + 1;
            if tentative < g[ni] {
                parent[ni] = ci;
                g[ni] = tentative;
                f[ni] = tentative + manhattan(nb, end);
                if !in_frontier[ni] {
                    seq += 1;
                    frontier.push(Reverse(FrontierEntry {
                        f: f[ni],
                        seq,
                        idx: ni,
                    }));
                    in_frontier[ni] = true;
                    board.mark(nb, CellState::Open);
                }
            }
        }

        board.mark(cur, CellState::Closed);
        on_step(board);
    }

    Ok(SearchOutcome::Exhausted)
}

/// Walk the parent links from End back towards Start, marking each interior
/// cell as Path and firing `on_step` after every individual marking so the
/// host can render the path being traced.
fn trace_path(
    board: &mut Board,
    parent: &[usize],
    start: Coord,
    end: Coord,
    on_step: &mut impl FnMut(&Board),
) -> Vec<Coord> {
    let size = board.size();
    let mut path = Vec::new();
    let mut ci = flat(size, end);
    loop {
        let pi = parent[ci];
        if pi == usize::MAX {
            break;
        }
        let p = unflat(size, pi);
        if p == start {
            break;
        }
        board.mark(p, CellState::Path);
        path.push(p);
        on_step(board);
        ci = pi;
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridway_core::Role;

    fn board_with_endpoints(size: i32, start: Coord, end: Coord) -> Board {
        let mut b = Board::new(size).unwrap();
        b.place(start, Role::Start).unwrap();
        b.place(end, Role::End).unwrap();
        b
    }

    fn run(board: &mut Board) -> SearchOutcome {
        astar_run(board, &Context::new(), |_| {}).unwrap()
    }

    #[test]
    fn frontier_orders_by_f_then_insertion() {
        let mut heap: BinaryHeap<Reverse<FrontierEntry>> = BinaryHeap::new();
        heap.push(Reverse(FrontierEntry { f: 5, seq: 2, idx: 0 }));
        heap.push(Reverse(FrontierEntry { f: 3, seq: 3, idx: 1 }));
        heap.push(Reverse(FrontierEntry { f: 3, seq: 1, idx: 2 }));
        let order: Vec<usize> = std::iter::from_fn(|| heap.pop().map(|Reverse(e)| e.idx)).collect();
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn empty_grid_path_length_is_manhattan() {
        let start = Coord::new(1, 1);
        let end = Coord::new(4, 3);
        let mut b = board_with_endpoints(6, start, end);
        match run(&mut b) {
            SearchOutcome::Found(path) => {
                assert_eq!(path.len() as i32 + 1, manhattan(start, end));
                assert_eq!(b.count(CellState::Path), path.len());
            }
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn adjacent_endpoints_yield_empty_interior() {
        let mut b = board_with_endpoints(3, Coord::new(0, 0), Coord::new(0, 1));
        assert_eq!(run(&mut b), SearchOutcome::Found(Vec::new()));
    }

    #[test]
    fn five_by_five_corner_to_corner() {
        let start = Coord::new(0, 0);
        let end = Coord::new(4, 4);
        let mut b = board_with_endpoints(5, start, end);
        let SearchOutcome::Found(path) = run(&mut b) else {
            panic!("expected Found");
        };

        // 8 steps: 7 interior cells plus the final edge into End.
        assert_eq!(path.len(), 7);
        for &c in &path {
            assert_eq!(b.state(c), Some(CellState::Path));
        }
        // Reverse-path order: first element borders End, last borders Start.
        assert_eq!(manhattan(path[0], end), 1);
        assert_eq!(manhattan(*path.last().unwrap(), start), 1);
        // Roles survive the run.
        assert_eq!(b.state(start), Some(CellState::Start));
        assert_eq!(b.state(end), Some(CellState::End));
    }

    #[test]
    fn walled_off_grid_is_exhausted() {
        let mut b = board_with_endpoints(3, Coord::new(0, 0), Coord::new(0, 2));
        for row in 0..3 {
            b.place(Coord::new(row, 1), Role::Barrier).unwrap();
        }
        assert_eq!(run(&mut b), SearchOutcome::Exhausted);

        // Every cell reachable from Start is Closed, nothing is Path.
        assert_eq!(b.state(Coord::new(1, 0)), Some(CellState::Closed));
        assert_eq!(b.state(Coord::new(2, 0)), Some(CellState::Closed));
        assert_eq!(b.count(CellState::Path), 0);
        // The far side was never touched.
        assert_eq!(b.state(Coord::new(1, 2)), Some(CellState::Empty));
        assert_eq!(b.state(Coord::new(2, 2)), Some(CellState::Empty));
    }

    #[test]
    fn search_is_deterministic() {
        let barriers = [
            Coord::new(2, 3),
            Coord::new(3, 3),
            Coord::new(4, 3),
            Coord::new(5, 2),
            Coord::new(1, 5),
        ];
        let make = || {
            let mut b = board_with_endpoints(8, Coord::new(0, 0), Coord::new(7, 6));
            for &c in &barriers {
                b.place(c, Role::Barrier).unwrap();
            }
            b
        };

        let record = |b: &mut Board| {
            let mut frames: Vec<Vec<(Coord, CellState)>> = Vec::new();
            let outcome = astar_run(b, &Context::new(), |board| {
                frames.push(board.iter().collect());
            })
            .unwrap();
            (outcome, frames)
        };

        let (out_a, frames_a) = record(&mut make());
        let (out_b, frames_b) = record(&mut make());
        assert_eq!(out_a, out_b);
        assert_eq!(frames_a, frames_b);
    }

    #[test]
    fn cancel_before_first_step_changes_nothing() {
        let mut b = board_with_endpoints(5, Coord::new(0, 0), Coord::new(4, 4));
        let before: Vec<_> = b.iter().collect();

        let ctx = Context::new();
        ctx.cancel();
        let mut steps = 0;
        let outcome = astar_run(&mut b, &ctx, |_| steps += 1).unwrap();

        assert_eq!(outcome, SearchOutcome::Cancelled);
        assert_eq!(steps, 0);
        assert_eq!(b.iter().collect::<Vec<_>>(), before);
    }

    #[test]
    fn cancel_mid_run_stops_promptly() {
        let mut b = board_with_endpoints(10, Coord::new(0, 0), Coord::new(9, 9));
        let ctx = Context::new();
        let inner = ctx.clone();
        let mut steps = 0;
        let outcome = astar_run(&mut b, &ctx, |_| {
            steps += 1;
            if steps == 3 {
                inner.cancel();
            }
        })
        .unwrap();
        assert_eq!(outcome, SearchOutcome::Cancelled);
        assert_eq!(steps, 3);
        // The partial trace stays on the board for the next reset to clear.
        assert!(b.count(CellState::Closed) > 0 || b.count(CellState::Open) > 0);
    }

    #[test]
    fn missing_endpoints_are_rejected() {
        let mut b = Board::new(4).unwrap();
        let err = astar_run(&mut b, &Context::new(), |_| {}).unwrap_err();
        assert_eq!(err, SearchError::MissingEndpoints);

        b.place(Coord::new(0, 0), Role::Start).unwrap();
        let err = astar_run(&mut b, &Context::new(), |_| {}).unwrap_err();
        assert_eq!(err, SearchError::MissingEndpoints);
    }

    #[test]
    fn detour_around_a_partial_wall() {
        // Wall with a gap at the bottom forces a detour.
        let start = Coord::new(0, 0);
        let end = Coord::new(0, 4);
        let mut b = board_with_endpoints(5, start, end);
        for row in 0..4 {
            b.place(Coord::new(row, 2), Role::Barrier).unwrap();
        }
        let SearchOutcome::Found(path) = run(&mut b) else {
            panic!("expected Found");
        };
        // Down to the gap at row 4, across, and back up: 12 steps.
        assert_eq!(path.len() + 1, 12);
        assert!(path.contains(&Coord::new(4, 2)));
    }

    #[test]
    fn rerun_after_reset_matches_fresh_board() {
        let mut b = board_with_endpoints(6, Coord::new(0, 0), Coord::new(5, 5));
        b.place(Coord::new(2, 2), Role::Barrier).unwrap();

        let first = run(&mut b);
        b.reset_for_new_run();
        let second = run(&mut b);
        assert_eq!(first, second);
    }
}
