//! Conway's Game of Life on an unbounded plane
//!
//! This library provides a sparse universe that evolves under the B3/S23 rules,
//! a controller that drives generations and notifies registered views, and the
//! persistence, rendering and configuration collaborators around them.

pub mod config;
pub mod controller;
pub mod error;
pub mod game_of_life;
pub mod persistence;
pub mod utils;

pub use config::Settings;
pub use controller::{UniverseController, UniverseView};
pub use error::ConwayError;
pub use game_of_life::{Coordinate, LiveCellSet, Universe};
