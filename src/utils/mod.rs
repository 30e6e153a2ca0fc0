//! Rendering and terminal output helpers

pub mod display;

pub use display::{render_board, render_header, ConsoleView};
