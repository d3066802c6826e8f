//! Application configuration.

use std::fs;

use log::{debug, warn};
use serde::Deserialize;

/// Configuration values, read from `pathviz.toml` in the working directory
/// when present, defaults otherwise.
#[derive(Debug, Deserialize, PartialEq)]
pub struct Config {
    /// Cells per side of the square grid.
    #[serde(default = "default_grid_size")]
    pub grid_size: i32,
    /// Pacing delay between search steps, in milliseconds.
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,
    /// Fraction of empty cells turned into barriers by a scatter command.
    #[serde(default = "default_scatter_fill")]
    pub scatter_fill: f64,
    /// Terminal columns per cell when rendering.
    #[serde(default = "default_cell_width")]
    pub cell_width: u16,
}

fn default_grid_size() -> i32 {
    25
}
fn default_step_delay_ms() -> u64 {
    0
}
fn default_scatter_fill() -> f64 {
    0.2
}
fn default_cell_width() -> u16 {
    2
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_size: default_grid_size(),
            step_delay_ms: default_step_delay_ms(),
            scatter_fill: default_scatter_fill(),
            cell_width: default_cell_width(),
        }
    }
}

impl Config {
    /// Load configuration, falling back to defaults when the file is
    /// missing or malformed.
    pub fn load() -> Self {
        match fs::read_to_string("pathviz.toml") {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    debug!("loaded configuration from pathviz.toml");
                    config
                }
                Err(err) => {
                    warn!("failed to parse pathviz.toml: {err}; using defaults");
                    Config::default()
                }
            },
            Err(_) => Config::default(),
        }
    }
}
