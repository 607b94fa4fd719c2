//! Snake with bombs for the terminal.
//!
//! The simulation lives in [`game`] and has no I/O dependencies; [`input`],
//! [`render`], and [`modes`] wire it to a crossterm/ratatui front end, and
//! [`metrics`] keeps the process-lifetime high score.

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
