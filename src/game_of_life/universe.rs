//! The universe and its generation transition

use super::{Coordinate, GameOfLifeRules, LiveCellSet};
use crate::error::ConwayError;
use crate::persistence::UniverseRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque identifier of a universe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UniverseId(Uuid);

impl UniverseId {
    /// Generate a fresh random id
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

}

impl Default for UniverseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UniverseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for UniverseId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Administrative label of a universe, not touched by the simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniverseMetadata {
    pub name: String,
}

impl UniverseMetadata {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Outcome of a single successful transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionReport {
    /// Generation number after the transition.
    pub generation: u64,
    /// Number of coordinates evaluated.
    pub candidates: usize,
    /// Live cells after the transition.
    pub population: usize,
    pub births: usize,
    pub deaths: usize,
}

/// An unbounded Game of Life universe.
///
/// Only coordinates within one cell of a live cell are ever evaluated, so the
/// cost of a generation depends on the live area rather than on any grid
/// size.
#[derive(Debug, Clone)]
pub struct Universe {
    id: UniverseId,
    metadata: UniverseMetadata,
    live_cells: LiveCellSet,
    generation: u64,
    biomass_limit: Option<usize>,
}

impl Universe {
    /// Create a universe at generation 0 with a fresh id
    pub fn new(metadata: UniverseMetadata, live_cells: LiveCellSet) -> Self {
        Self::with_id(UniverseId::new(), metadata, live_cells, 0)
    }

    /// Create a universe with a known id, e.g. when resuming from a checkpoint
    pub fn with_id(
        id: UniverseId,
        metadata: UniverseMetadata,
        live_cells: LiveCellSet,
        generation: u64,
    ) -> Self {
        Self {
            id,
            metadata,
            live_cells,
            generation,
            biomass_limit: None,
        }
    }

    /// Cap the number of cells a single transition may touch
    pub fn with_biomass_limit(mut self, limit: Option<usize>) -> Self {
        self.biomass_limit = limit;
        self
    }

    /// Rebuild a universe from its persisted record
    pub fn from_record(id: UniverseId, metadata: UniverseMetadata, record: UniverseRecord) -> Self {
        let live_cells = record.live_cells.into_iter().map(Coordinate::from).collect();
        Self::with_id(id, metadata, live_cells, record.gen_num)
    }

    /// Export the generation and live cells in the persistence shape
    pub fn export(&self) -> UniverseRecord {
        UniverseRecord {
            gen_num: self.generation,
            live_cells: self.live_cells.sorted().into_iter().map(Into::into).collect(),
        }
    }

    pub fn id(&self) -> UniverseId {
        self.id
    }

    pub fn metadata(&self) -> &UniverseMetadata {
        &self.metadata
    }

    /// Replace the administrative label
    pub fn rename(&mut self, metadata: UniverseMetadata) {
        self.metadata = metadata;
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn live_cells(&self) -> &LiveCellSet {
        &self.live_cells
    }

    pub fn population(&self) -> usize {
        self.live_cells.len()
    }

    pub fn is_alive(&self, point: &Coordinate) -> bool {
        self.live_cells.contains(point)
    }

    pub fn is_extinct(&self) -> bool {
        self.live_cells.is_empty()
    }

    /// Count the live Moore neighbours of `point`, never counting `point` itself
    pub fn count_neighbors(&self, point: Coordinate) -> u8 {
        point
            .neighbors()
            .filter(|neighbor| self.live_cells.contains(neighbor))
            .count() as u8
    }

    /// Advance the universe by one generation.
    ///
    /// The next live set is computed in full before it replaces the current
    /// one; on error the universe is left exactly as it was.
    pub fn next_generation(&mut self) -> Result<TransitionReport, ConwayError> {
        let generation = self
            .generation
            .checked_add(1)
            .ok_or(ConwayError::GenerationOverflow {
                generation: self.generation,
            })?;
        let candidates = self.candidates()?;

        let next: LiveCellSet = candidates
            .iter()
            .copied()
            .filter(|&point| {
                GameOfLifeRules::should_be_alive(self.is_alive(&point), self.count_neighbors(point))
            })
            .collect();
        self.check_biomass(next.len())?;

        let births = next.iter().filter(|p| !self.is_alive(p)).count();
        let deaths = self.live_cells.iter().filter(|p| !next.contains(p)).count();

        self.live_cells = next;
        self.generation = generation;

        Ok(TransitionReport {
            generation: self.generation,
            candidates: candidates.len(),
            population: self.live_cells.len(),
            births,
            deaths,
        })
    }

    /// Every live cell together with its Moore neighbours
    fn candidates(&self) -> Result<HashSet<Coordinate>, ConwayError> {
        let capacity = self.live_cells.len().saturating_mul(9);
        let capacity = self.biomass_limit.map_or(capacity, |limit| capacity.min(limit.saturating_add(1)));
        let mut candidates = HashSet::with_capacity(capacity);
        for cell in self.live_cells.iter() {
            candidates.extend(cell.neighborhood());
            self.check_biomass(candidates.len())?;
        }
        Ok(candidates)
    }

    fn check_biomass(&self, observed: usize) -> Result<(), ConwayError> {
        match self.biomass_limit {
            Some(limit) if observed > limit => Err(ConwayError::BiomassOverflow {
                generation: self.generation,
                limit,
                observed,
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cells(points: &[(i64, i64)]) -> LiveCellSet {
        points.iter().copied().map(Coordinate::from).collect()
    }

    fn universe(points: &[(i64, i64)]) -> Universe {
        Universe::new(UniverseMetadata::new("test"), cells(points))
    }

    #[test]
    fn test_extinction_is_terminal() {
        let mut u = universe(&[]);
        let report = u.next_generation().unwrap();
        assert!(u.is_extinct());
        assert_eq!(report.candidates, 0);
        assert_eq!(u.generation(), 1);
    }

    #[test]
    fn test_isolated_cell_dies() {
        let mut u = universe(&[(7, -3)]);
        let report = u.next_generation().unwrap();
        assert!(u.is_extinct());
        assert_eq!(report.deaths, 1);
        assert_eq!(report.births, 0);
    }

    #[test]
    fn test_still_life_block() {
        let block = [(0, 0), (1, 0), (0, 1), (1, 1)];
        let mut u = universe(&block);
        u.next_generation().unwrap();
        assert_eq!(u.live_cells(), &cells(&block));
    }

    #[test]
    fn test_oscillator_blinker() {
        let row = [(0, 0), (1, 0), (2, 0)];
        let mut u = universe(&row);

        let report = u.next_generation().unwrap();
        assert_eq!(u.live_cells(), &cells(&[(1, -1), (1, 0), (1, 1)]));
        assert_eq!(report.births, 2);
        assert_eq!(report.deaths, 2);

        u.next_generation().unwrap();
        assert_eq!(u.live_cells(), &cells(&row));
        assert_eq!(u.generation(), 2);
    }

    #[test]
    fn test_glider_translates() {
        let glider = [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)];
        let mut u = universe(&glider);
        for _ in 0..4 {
            u.next_generation().unwrap();
        }
        let moved: Vec<(i64, i64)> = glider.iter().map(|&(x, y)| (x + 1, y + 1)).collect();
        assert_eq!(u.live_cells(), &cells(&moved));
    }

    #[test]
    fn test_generation_starts_at_checkpoint() {
        let mut u = Universe::with_id(UniverseId::new(), UniverseMetadata::new("resumed"), cells(&[]), 41);
        u.next_generation().unwrap();
        assert_eq!(u.generation(), 42);
    }

    #[test]
    fn test_biomass_overflow_leaves_state_intact() {
        let block = [(0, 0), (1, 0), (0, 1), (1, 1)];
        let mut u = universe(&block).with_biomass_limit(Some(10));

        let err = u.next_generation().unwrap_err();
        assert!(matches!(err, ConwayError::BiomassOverflow { limit: 10, generation: 0, .. }));
        assert_eq!(u.generation(), 0);
        assert_eq!(u.live_cells(), &cells(&block));
    }

    #[test]
    fn test_generation_overflow_leaves_state_intact() {
        let row = [(0, 0), (1, 0), (2, 0)];
        let record = UniverseRecord {
            gen_num: u64::MAX,
            live_cells: row.to_vec(),
        };
        let mut u = Universe::from_record(UniverseId::new(), UniverseMetadata::new("last"), record);

        let err = u.next_generation().unwrap_err();
        assert!(matches!(err, ConwayError::GenerationOverflow { generation: u64::MAX }));
        assert_eq!(u.generation(), u64::MAX);
        assert_eq!(u.live_cells(), &cells(&row));

        let mut empty = Universe::with_id(UniverseId::new(), UniverseMetadata::new("empty"), cells(&[]), u64::MAX);
        assert!(empty.next_generation().is_err());
        assert_eq!(empty.generation(), u64::MAX);
    }

    #[test]
    fn test_biomass_limit_not_reached() {
        let mut u = universe(&[(0, 0), (1, 0), (2, 0)]).with_biomass_limit(Some(15));
        assert!(u.next_generation().is_ok());
    }

    #[test]
    fn test_export_and_rename() {
        let mut u = universe(&[(1, 1), (0, 0)]);
        u.rename(UniverseMetadata::new("renamed"));
        assert_eq!(u.metadata().name, "renamed");

        let record = u.export();
        assert_eq!(record.gen_num, 0);
        assert_eq!(record.live_cells, vec![(0, 0), (1, 1)]);
    }

    #[test]
    fn test_universe_id_parsing() {
        let id = UniverseId::new();
        let parsed: UniverseId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!("not-a-uuid".parse::<UniverseId>().is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn generation_counts_transitions(
            points in prop::collection::vec((-8i64..8, -8i64..8), 0..40),
            start in 0u64..1000,
            steps in 0u64..6,
        ) {
            let mut u = Universe::with_id(UniverseId::new(), UniverseMetadata::new("p"), cells(&points), start);
            for _ in 0..steps {
                u.next_generation().unwrap();
            }
            prop_assert_eq!(u.generation(), start + steps);
        }

        #[test]
        fn restored_universe_has_identical_future(
            points in prop::collection::vec((-6i64..6, -6i64..6), 0..30),
            steps in 1usize..5,
        ) {
            let mut original = universe(&points);
            original.next_generation().unwrap();

            let mut restored = Universe::from_record(
                original.id(),
                original.metadata().clone(),
                original.export(),
            );
            for _ in 0..steps {
                original.next_generation().unwrap();
                restored.next_generation().unwrap();
                prop_assert_eq!(original.live_cells(), restored.live_cells());
                prop_assert_eq!(original.generation(), restored.generation());
            }
        }
    }
}
