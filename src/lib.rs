//! Mind Over Money - financial literacy modules and mini-games
//!
//! Core modules:
//! - `sim`: Deterministic mini-game simulation (tick engine, three games, frame loop)
//! - `modules`: Module catalogue, phase sequencing and completion callbacks
//! - `progress`: Learner level, skill totals and completed modules
//! - `skills`: Static skill registry
//! - `hub`: Read-only hub screen model
//! - `app`: Host tying modules to the progress store
//! - `settings` / `tuning`: JSON configuration and game balance

pub mod app;
pub mod hub;
pub mod modules;
pub mod progress;
pub mod settings;
pub mod sim;
pub mod skills;
pub mod tuning;

pub use app::{App, View};
pub use hub::HubView;
pub use progress::ProgressStore;
pub use settings::Settings;

/// Application constants
pub mod consts {
    /// Nominal host frame interval, in milliseconds
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}
