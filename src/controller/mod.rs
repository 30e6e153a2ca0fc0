//! Observer/controller protocol: views, triggers, diagnostics and the controller

#[allow(clippy::module_inception)]
pub mod controller;
pub mod diagnostics;
pub mod trigger;
pub mod view;

pub use controller::{ControllerState, UniverseController};
pub use diagnostics::{Diagnostic, DiagnosticsSink, NullSink, TracingSink};
pub use trigger::{Action, AdvanceTrigger, LineTrigger, ScriptedTrigger};
pub use view::{UniverseView, ViewHandle, ViewRegistration};
