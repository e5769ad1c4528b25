//! Discrete-time grid snake: simulation core plus a terminal front end.

pub mod cell;
pub mod config;
pub mod food;
pub mod game;
pub mod grid;
pub mod heading;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod scheduler;
pub mod snake;
pub mod terminal_runtime;
