//! Caller-owned diagnostics sinks
//!
//! Components that report what they do take a [`DiagnosticsSink`] from their
//! caller instead of writing to a process-wide logger.

use crate::error::ConwayError;
use crate::game_of_life::{TransitionReport, UniverseId};
use std::fmt;
use std::rc::Rc;

/// Something worth reporting while a controller drives a universe
#[derive(Debug)]
pub enum Diagnostic<'a> {
    Started {
        universe: UniverseId,
        generation: u64,
        population: usize,
    },
    Advanced {
        universe: UniverseId,
        report: &'a TransitionReport,
    },
    ViewRegistered {
        views: usize,
    },
    ViewUnregistered {
        views: usize,
    },
    Failed {
        universe: UniverseId,
        error: &'a ConwayError,
    },
    Stopped {
        universe: UniverseId,
        generation: u64,
    },
}

impl fmt::Display for Diagnostic<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Started { universe, generation, population } => {
                write!(f, "universe {} started at generation {} with {} live cells", universe, generation, population)
            }
            Diagnostic::Advanced { universe, report } => write!(
                f,
                "universe {} reached generation {}: {} live ({} born, {} died, {} candidates)",
                universe, report.generation, report.population, report.births, report.deaths, report.candidates
            ),
            Diagnostic::ViewRegistered { views } => write!(f, "view registered ({} total)", views),
            Diagnostic::ViewUnregistered { views } => write!(f, "view unregistered ({} total)", views),
            Diagnostic::Failed { universe, error } => write!(f, "universe {} failed: {}", universe, error),
            Diagnostic::Stopped { universe, generation } => {
                write!(f, "universe {} stopped at generation {}", universe, generation)
            }
        }
    }
}

/// Receives diagnostics from the simulation
pub trait DiagnosticsSink {
    fn record(&self, event: &Diagnostic<'_>);
}

impl<T: DiagnosticsSink + ?Sized> DiagnosticsSink for &T {
    fn record(&self, event: &Diagnostic<'_>) {
        (**self).record(event);
    }
}

impl<T: DiagnosticsSink + ?Sized> DiagnosticsSink for Rc<T> {
    fn record(&self, event: &Diagnostic<'_>) {
        (**self).record(event);
    }
}

/// Forwards diagnostics to `tracing` with structured fields
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticsSink for TracingSink {
    fn record(&self, event: &Diagnostic<'_>) {
        match event {
            Diagnostic::Started { universe, generation, population } => {
                tracing::info!(%universe, generation, population, "universe started");
            }
            Diagnostic::Advanced { universe, report } => {
                tracing::debug!(
                    %universe,
                    generation = report.generation,
                    population = report.population,
                    births = report.births,
                    deaths = report.deaths,
                    candidates = report.candidates,
                    "generation advanced"
                );
            }
            Diagnostic::ViewRegistered { views } => tracing::debug!(views, "view registered"),
            Diagnostic::ViewUnregistered { views } => tracing::debug!(views, "view unregistered"),
            Diagnostic::Failed { universe, error } => {
                tracing::error!(%universe, %error, "universe failed");
            }
            Diagnostic::Stopped { universe, generation } => {
                tracing::info!(%universe, generation, "universe stopped");
            }
        }
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn record(&self, _event: &Diagnostic<'_>) {}
}

/// Keeps the rendered text of every diagnostic
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct MemorySink {
    lines: std::cell::RefCell<Vec<String>>,
}

#[cfg(test)]
impl MemorySink {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }
}

#[cfg(test)]
impl DiagnosticsSink for MemorySink {
    fn record(&self, event: &Diagnostic<'_>) {
        self.lines.borrow_mut().push(event.to_string());
    }
}
