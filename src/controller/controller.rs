//! Drives one universe and keeps its views up to date

use super::diagnostics::{Diagnostic, DiagnosticsSink, TracingSink};
use super::trigger::{Action, AdvanceTrigger};
use super::view::{same_view, ViewHandle};
use crate::error::ConwayError;
use crate::game_of_life::{TransitionReport, Universe};
use std::fmt;

/// Lifecycle of a [`UniverseController`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Initialized,
    Started,
    Running,
    /// Terminal: reached on `stop` or after any failure.
    Stopped,
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ControllerState::Initialized => "initialized",
            ControllerState::Started => "started",
            ControllerState::Running => "running",
            ControllerState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

/// Owns a universe, advances it and notifies every registered view.
///
/// Views only ever receive `&Universe` between transitions, so they see
/// either the state before an advance or the state after it.
pub struct UniverseController<D: DiagnosticsSink = TracingSink> {
    universe: Universe,
    views: Vec<ViewHandle>,
    state: ControllerState,
    diagnostics: D,
}

impl<D: DiagnosticsSink> UniverseController<D> {
    /// Create a controller and register `views`, ignoring duplicates
    pub fn new(universe: Universe, views: Vec<ViewHandle>, diagnostics: D) -> Self {
        let mut controller = Self {
            universe,
            views: Vec::with_capacity(views.len()),
            state: ControllerState::Initialized,
            diagnostics,
        };
        for view in views {
            controller.register_view(view);
        }
        controller
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Give the universe back, e.g. to persist it
    pub fn into_universe(self) -> Universe {
        self.universe
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    /// Add a view. Returns `false` if it was already registered.
    pub fn register_view(&mut self, view: ViewHandle) -> bool {
        if self.views.iter().any(|known| same_view(known, &view)) {
            return false;
        }
        self.views.push(view);
        self.diagnostics.record(&Diagnostic::ViewRegistered { views: self.views.len() });
        true
    }

    /// Remove a view. Returns `false` if it was not registered.
    pub fn unregister_view(&mut self, view: &ViewHandle) -> bool {
        let before = self.views.len();
        self.views.retain(|known| !same_view(known, view));
        if self.views.len() == before {
            return false;
        }
        self.diagnostics.record(&Diagnostic::ViewUnregistered { views: self.views.len() });
        true
    }

    /// Show the initial state to every view
    pub fn start(&mut self) -> Result<(), ConwayError> {
        self.expect_state(&[ControllerState::Initialized], "start")?;
        self.diagnostics.record(&Diagnostic::Started {
            universe: self.universe.id(),
            generation: self.universe.generation(),
            population: self.universe.population(),
        });
        self.state = ControllerState::Started;
        self.refresh_views()
    }

    /// Compute the next generation, then refresh every view once.
    ///
    /// If the transition fails no view is refreshed and the controller stops.
    pub fn advance(&mut self) -> Result<TransitionReport, ConwayError> {
        self.expect_state(&[ControllerState::Started, ControllerState::Running], "advance")?;

        let report = match self.universe.next_generation() {
            Ok(report) => report,
            Err(e) => return Err(self.fail(e)),
        };
        self.state = ControllerState::Running;
        self.diagnostics.record(&Diagnostic::Advanced {
            universe: self.universe.id(),
            report: &report,
        });

        self.refresh_views()?;
        Ok(report)
    }

    /// End the advance loop. Further `start`/`advance` calls are rejected.
    pub fn stop(&mut self) {
        if self.state == ControllerState::Stopped {
            return;
        }
        self.state = ControllerState::Stopped;
        self.diagnostics.record(&Diagnostic::Stopped {
            universe: self.universe.id(),
            generation: self.universe.generation(),
        });
    }

    /// Start if needed, then advance until `trigger` says stop.
    ///
    /// Returns the number of generations advanced.
    pub fn run<T: AdvanceTrigger + ?Sized>(&mut self, trigger: &mut T) -> Result<u64, ConwayError> {
        if self.state == ControllerState::Initialized {
            self.start()?;
        }

        let mut advanced = 0;
        loop {
            let action = match trigger.next_action(&self.universe) {
                Ok(action) => action,
                Err(e) => return Err(self.fail(e)),
            };
            match action {
                Action::Advance => {
                    self.advance()?;
                    advanced += 1;
                }
                Action::Stop => {
                    self.stop();
                    return Ok(advanced);
                }
            }
        }
    }

    fn refresh_views(&mut self) -> Result<(), ConwayError> {
        let result = self
            .views
            .iter()
            .try_for_each(|view| view.borrow_mut().refresh(&self.universe));
        result.map_err(|e| self.fail(e))
    }

    fn fail(&mut self, error: ConwayError) -> ConwayError {
        self.diagnostics.record(&Diagnostic::Failed {
            universe: self.universe.id(),
            error: &error,
        });
        self.stop();
        error
    }

    fn expect_state(&self, allowed: &[ControllerState], operation: &'static str) -> Result<(), ConwayError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(ConwayError::InvalidState {
                state: self.state,
                operation,
            })
        }
    }
}
