//! Game of Life core functionality

pub mod coordinate;
pub mod io;
pub mod live_cells;
pub mod rules;
pub mod universe;

pub use coordinate::{Coordinate, Offset};
pub use io::{builtin_pattern, create_example_patterns, load_pattern_from_file, parse_pattern, resolve_pattern};
pub use live_cells::LiveCellSet;
pub use rules::GameOfLifeRules;
pub use universe::{TransitionReport, Universe, UniverseId, UniverseMetadata};
