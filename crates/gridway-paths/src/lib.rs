//! **gridway-paths** — the stepwise A* search engine.
//!
//! This crate runs a best-first shortest-path search over a
//! [`gridway_core::Board`], marking cells Open/Closed/Path as it goes and
//! invoking a caller-supplied callback after every state-changing step so a
//! host loop can render the search incrementally.
//!
//! The search is fully deterministic: the frontier is ordered by
//! `(f-score, insertion sequence)`, so two runs over the same board visit
//! cells in the same order and produce the same path. Cancellation is
//! cooperative, polled once per popped frontier element through a shared
//! [`Context`] token.

mod astar;
mod context;
mod distance;

pub use astar::{SearchError, SearchOutcome, astar_run};
pub use context::Context;
pub use distance::manhattan;
