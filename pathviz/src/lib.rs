//! pathviz — the interactive shortest-path visualiser application.
//!
//! Library side of the binary: configuration loading and the session
//! state machine that turns input commands into board mutations and
//! search runs.

pub mod config;
pub mod session;
