//! Application host
//!
//! Owns the progress store and the current view, and receives the
//! back/complete callbacks from whichever module is open.

use crate::hub::HubView;
use crate::modules::{DrillGame, DrillModule, ModuleHost, ModuleId, ModuleRun};
use crate::progress::ProgressStore;
use crate::settings::Settings;
use crate::sim::Simulation;
use crate::skills::{LevelBand, SkillWeights};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Hub,
    Module(ModuleId),
}

#[derive(Debug)]
pub struct App {
    settings: Settings,
    progress: ProgressStore,
    view: View,
    games_started: u64,
}

impl App {
    pub fn new(settings: Settings) -> Self {
        let progress = settings.progress_store();
        Self {
            settings,
            progress,
            view: View::Hub,
            games_started: 0,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn progress(&self) -> &ProgressStore {
        &self.progress
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn hub(&self) -> HubView {
        HubView::build(&self.progress)
    }

    pub fn set_level(&mut self, level: LevelBand) {
        self.progress.set_user_level(level);
    }

    pub fn reset_progress(&mut self) {
        self.progress.reset_progress();
    }

    /// Per-frame housekeeping outside any mini-game
    pub fn advance(&mut self, dt: f32) {
        self.progress.advance(dt);
    }

    pub fn open_module(&mut self, module: ModuleId) -> ModuleRun {
        log::info!("Opening {}", module);
        self.view = View::Module(module);
        ModuleRun::new(module)
    }

    pub fn open_drill<G: DrillGame>(&mut self) -> DrillModule<G> {
        log::info!("Opening {}", G::MODULE);
        self.view = View::Module(G::MODULE);
        DrillModule::new()
    }

    /// Seed for the next mini-game. A configured seed is offset per game so
    /// runs differ but replay identically.
    pub fn next_seed(&mut self) -> u64 {
        let n = self.games_started;
        self.games_started += 1;
        match self.settings.seed {
            Some(seed) => seed.wrapping_add(n),
            None => rand::random(),
        }
    }

    /// Start the mini-game of an open drill module
    pub fn start_game<G: DrillGame>(&mut self, drill: &DrillModule<G>) -> Option<Simulation<G>> {
        if !drill.in_activity() {
            return None;
        }
        let seed = self.next_seed();
        drill.start_game(&self.settings.tuning, seed)
    }
}

impl ModuleHost for App {
    fn on_back(&mut self) {
        log::debug!("Back to hub from {:?}", self.view);
        self.view = View::Hub;
    }

    fn on_complete(&mut self, module: ModuleId, weights: SkillWeights) {
        self.progress.complete_module(module, &weights);
        self.view = View::Hub;
    }
}
