//! pathviz — interactive A* shortest-path visualiser.
//!
//! Keymap:
//!   - left click:  place node (first Start, then End, then barriers)
//!   - right click: remove node
//!   - SPACE:       run the search
//!   - q:           cancel a running search
//!   - n:           scatter random barriers
//!   - r:           reset the grid
//!   - Esc/Ctrl+C:  quit

use std::error::Error;
use std::thread;
use std::time::Duration;

use gridway_crossterm::{InputEvent, TermDriver};
use gridway_paths::Context;
use log::warn;

use pathviz::config::Config;
use pathviz::session::{Command, Session};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let config = Config::load();
    let mut session = Session::new(config.grid_size)?;
    let mut driver = TermDriver::new(config.cell_width);
    driver.init()?;
    let result = event_loop(&mut driver, &mut session, &config);
    driver.close();
    result
}

/// Poll input, translate it to commands, and apply them to the session.
fn event_loop(
    driver: &mut TermDriver,
    session: &mut Session,
    config: &Config,
) -> Result<(), Box<dyn Error>> {
    let mut rng = rand::rng();
    driver.present(session.board())?;
    loop {
        let size = session.board().size();
        let Some(event) = driver.poll_input(size, Duration::from_millis(50))? else {
            continue;
        };
        let Some(command) = translate(event) else {
            continue;
        };
        match command {
            Command::Quit => return Ok(()),
            Command::PlaceNode(c) => session.place_node(c),
            Command::RemoveNode(c) => session.remove_node(c),
            Command::ResetGrid => session.reset_grid(),
            Command::ScatterBarriers => session.scatter_barriers(&mut rng, config.scatter_fill),
            // Nothing to cancel between runs.
            Command::CancelSearch => {}
            Command::BeginSearch => run_search(driver, session, config),
        }
        driver.present(session.board())?;
    }
}

/// Map decoded terminal input onto the command set.
fn translate(event: InputEvent) -> Option<Command> {
    match event {
        InputEvent::Click(c) => Some(Command::PlaceNode(c)),
        InputEvent::RightClick(c) => Some(Command::RemoveNode(c)),
        InputEvent::Key(' ') => Some(Command::BeginSearch),
        InputEvent::Key('q') => Some(Command::CancelSearch),
        InputEvent::Key('r') => Some(Command::ResetGrid),
        InputEvent::Key('n') => Some(Command::ScatterBarriers),
        InputEvent::Key('Q') | InputEvent::Quit => Some(Command::Quit),
        InputEvent::Key(_) => None,
    }
}

/// Drive one search run: repaint after every engine step, pace by the
/// configured delay, and watch for a cancel keystroke between steps.
fn run_search(driver: &mut TermDriver, session: &mut Session, config: &Config) {
    let ctx = Context::new();
    let cancel = ctx.clone();
    let step_delay = Duration::from_millis(config.step_delay_ms);
    let size = session.board().size();
    session.begin_search(&ctx, |board| {
        if let Err(err) = driver.present(board) {
            warn!("redraw failed: {err}");
        }
        if !step_delay.is_zero() {
            thread::sleep(step_delay);
        }
        match driver.poll_input(size, Duration::ZERO) {
            Ok(Some(InputEvent::Key('q') | InputEvent::Quit)) => cancel.cancel(),
            Ok(_) => {}
            Err(err) => warn!("input poll failed: {err}"),
        }
    });
}
