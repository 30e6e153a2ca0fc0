//! Sparse set of live coordinates

use super::Coordinate;
use std::collections::HashSet;

/// Immutable set of the coordinates that are currently alive.
///
/// A universe builds a fresh set every generation instead of flipping cells
/// in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiveCellSet {
    cells: HashSet<Coordinate>,
}

impl LiveCellSet {
    /// Build a set from any collection of coordinates; duplicates collapse
    pub fn new<I>(coordinates: I) -> Self
    where
        I: IntoIterator<Item = Coordinate>,
    {
        coordinates.into_iter().collect()
    }

    /// The set of an extinct universe
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn contains(&self, point: &Coordinate) -> bool {
        self.cells.contains(point)
    }

    /// Iterate over every live coordinate. Order is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = &Coordinate> + '_ {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Smallest and largest corners enclosing every live cell
    pub fn bounding_box(&self) -> Option<(Coordinate, Coordinate)> {
        let mut iter = self.cells.iter();
        let first = *iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| {
            (
                Coordinate::new(min.x().min(p.x()), min.y().min(p.y())),
                Coordinate::new(max.x().max(p.x()), max.y().max(p.y())),
            )
        });
        Some((min, max))
    }

    /// Live coordinates in row-major order, for stable output
    pub fn sorted(&self) -> Vec<Coordinate> {
        let mut points: Vec<Coordinate> = self.cells.iter().copied().collect();
        points.sort_by_key(|p| (p.y(), p.x()));
        points
    }
}

impl FromIterator<Coordinate> for LiveCellSet {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a LiveCellSet {
    type Item = &'a Coordinate;
    type IntoIter = std::collections::hash_set::Iter<'a, Coordinate>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
