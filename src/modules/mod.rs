//! Learning modules
//!
//! Every module walks a fixed list of phases and pays out a skill-weight map
//! to its host when the learner completes it.

pub mod catalogue;
pub mod drill;
pub mod phase;
pub mod run;

pub use catalogue::{CATALOGUE, ModuleCategory, ModuleId, ModuleInfo, has_mini_game};
pub use drill::{Anchor, DrillGame, DrillModule, RealityCheck};
pub use phase::{PhaseController, StepState};
pub use run::{MIN_REFLECTION_CHARS, ModuleHost, ModuleRun};
