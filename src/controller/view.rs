//! Observer side of the controller protocol

use super::{DiagnosticsSink, UniverseController};
use crate::error::ConwayError;
use crate::game_of_life::Universe;
use std::cell::RefCell;
use std::rc::Rc;

/// Something that renders snapshots of a universe
pub trait UniverseView {
    /// Render the current state. Called once on start and once per advance.
    fn refresh(&mut self, universe: &Universe) -> Result<(), ConwayError>;
}

/// Shared handle the controller keeps for each registered view
pub type ViewHandle = Rc<RefCell<dyn UniverseView>>;

/// Views are identified by the address of their shared allocation
pub(crate) fn same_view(a: &ViewHandle, b: &ViewHandle) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}

/// Lets a shared view add or remove itself from a controller
pub trait ViewRegistration {
    /// Returns `false` if the view was already registered
    fn register<D: DiagnosticsSink>(&self, controller: &mut UniverseController<D>) -> bool;

    /// Returns `false` if the view was not registered
    fn unregister<D: DiagnosticsSink>(&self, controller: &mut UniverseController<D>) -> bool;
}

impl<V: UniverseView + 'static> ViewRegistration for Rc<RefCell<V>> {
    fn register<D: DiagnosticsSink>(&self, controller: &mut UniverseController<D>) -> bool {
        let handle: ViewHandle = self.clone();
        controller.register_view(handle)
    }

    fn unregister<D: DiagnosticsSink>(&self, controller: &mut UniverseController<D>) -> bool {
        let handle: ViewHandle = self.clone();
        controller.unregister_view(&handle)
    }
}

/// Keeps every generation number and population it is shown
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingView {
    pub(crate) snapshots: Vec<(u64, usize)>,
}

#[cfg(test)]
impl RecordingView {
    pub(crate) fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }
}

#[cfg(test)]
impl UniverseView for RecordingView {
    fn refresh(&mut self, universe: &Universe) -> Result<(), ConwayError> {
        self.snapshots.push((universe.generation(), universe.population()));
        Ok(())
    }
}
