//! Points and displacements on the unbounded plane

use itertools::iproduct;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the plane. `y` grows downwards when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    x: i64,
    y: i64,
}

/// A displacement between two coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Offset {
    pub dx: i64,
    pub dy: i64,
}

impl Offset {
    pub const fn new(dx: i64, dy: i64) -> Self {
        Self { dx, dy }
    }

    /// Combine two displacements, e.g. to accumulate a running translation
    pub const fn then(self, other: Offset) -> Self {
        Self {
            dx: self.dx + other.dx,
            dy: self.dy + other.dy,
        }
    }
}

impl Coordinate {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub const fn x(&self) -> i64 {
        self.x
    }

    pub const fn y(&self) -> i64 {
        self.y
    }

    /// Move this point by `offset`.
    ///
    /// Panics in debug builds if the result leaves the `i64` plane. Use
    /// [`Coordinate::checked_translate`] near the edge.
    pub const fn translate(self, offset: Offset) -> Coordinate {
        Coordinate::new(self.x + offset.dx, self.y + offset.dy)
    }

    /// Move this point by `offset`, or `None` if the result is not representable
    pub fn checked_translate(self, offset: Offset) -> Option<Coordinate> {
        Some(Coordinate::new(
            self.x.checked_add(offset.dx)?,
            self.y.checked_add(offset.dy)?,
        ))
    }

    /// The 8 Moore neighbours of this point, excluding the point itself
    pub fn neighbors(self) -> impl Iterator<Item = Coordinate> {
        iproduct!(-1..=1, -1..=1)
            .filter(|&(dy, dx)| (dx, dy) != (0, 0))
            .filter_map(move |(dy, dx)| self.checked_translate(Offset::new(dx, dy)))
    }

    /// The closed 3x3 block centred on this point
    pub fn neighborhood(self) -> impl Iterator<Item = Coordinate> {
        iproduct!(-1..=1, -1..=1)
            .filter_map(move |(dy, dx)| self.checked_translate(Offset::new(dx, dy)))
    }
}

impl From<(i64, i64)> for Coordinate {
    fn from((x, y): (i64, i64)) -> Self {
        Coordinate::new(x, y)
    }
}

impl From<Coordinate> for (i64, i64) {
    fn from(point: Coordinate) -> Self {
        (point.x, point.y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
