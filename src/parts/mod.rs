//! Part registry and UI bindings
//!
//! Resolves the tracked parts of a loaded model to scene handles and maps UI
//! controls onto animation requests and light updates.

pub mod light_binding;
pub mod registry;
pub mod trigger;

pub use light_binding::LightPositionBinding;
pub use registry::{PartEntry, PartKey, PartRegistry, PartTable, RegistryState, TieBreak};
pub use trigger::{TriggerAction, TriggerBinding, TriggerMap, TriggerOutcome};
