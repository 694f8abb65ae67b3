//! Five-step drill modules built around a mini-game
//!
//! Guess, read the rules, play, see the result, reflect. The guess made in
//! the first phase is carried through to the result for a reality check.

use serde::Serialize;

use super::catalogue::{DRILL_ACTIVITY_PHASE, ModuleId};
use super::run::{ModuleHost, ModuleRun};
use crate::sim::{DebitDrill, MiniGame, PrivacyDefender, RunResult, SavingsJar, Simulation};
use crate::tuning::Tuning;

/// Slider range for the opening guess
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Anchor {
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub default: f32,
    /// Revealed right after the guess, when the question has a number for an answer
    pub answer: Option<f32>,
}

impl Anchor {
    /// Snap to the slider grid and clamp into range
    pub fn snap(&self, value: f32) -> f32 {
        let steps = ((value - self.min) / self.step).round();
        (self.min + steps * self.step).clamp(self.min, self.max)
    }
}

/// A mini-game that anchors a drill module
pub trait DrillGame: MiniGame + Sized {
    const MODULE: ModuleId;
    const ANCHOR: Anchor;

    /// Fresh game at its starting state
    fn fresh(tuning: &Tuning) -> Self;
}

impl DrillGame for DebitDrill {
    const MODULE: ModuleId = ModuleId::DebitDrill;
    // A $5 treat on an empty account plus the $30 the bank charges for it
    const ANCHOR: Anchor = Anchor {
        min: 5.0,
        max: 50.0,
        step: 5.0,
        default: 25.0,
        answer: Some(35.0),
    };

    fn fresh(tuning: &Tuning) -> Self {
        DebitDrill::new(tuning.debit_drill.clone())
    }
}

impl DrillGame for SavingsJar {
    const MODULE: ModuleId = ModuleId::SavingsJar;
    // $5 a week for a year
    const ANCHOR: Anchor = Anchor {
        min: 50.0,
        max: 500.0,
        step: 10.0,
        default: 60.0,
        answer: Some(260.0),
    };

    fn fresh(tuning: &Tuning) -> Self {
        SavingsJar::new(tuning.savings_jar.clone())
    }
}

impl DrillGame for PrivacyDefender {
    const MODULE: ModuleId = ModuleId::PrivacyDefender;
    const ANCHOR: Anchor = Anchor {
        min: 0.5,
        max: 5.0,
        step: 0.5,
        default: 2.0,
        answer: None,
    };

    fn fresh(tuning: &Tuning) -> Self {
        PrivacyDefender::new(tuning.privacy_defender.clone())
    }
}

/// Guess next to the revealed answer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RealityCheck {
    pub guess: f32,
    pub answer: f32,
}

impl RealityCheck {
    /// Positive when the guess was too high
    pub fn gap(&self) -> f32 {
        self.guess - self.answer
    }
}

/// A drill module run with its guess and its game result
#[derive(Debug, Clone)]
pub struct DrillModule<G: DrillGame> {
    run: ModuleRun,
    prediction: f32,
    result: Option<RunResult<G::Outcome>>,
}

impl<G: DrillGame> Default for DrillModule<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: DrillGame> DrillModule<G> {
    pub fn new() -> Self {
        Self {
            run: ModuleRun::new(G::MODULE),
            prediction: G::ANCHOR.default,
            result: None,
        }
    }

    pub fn run(&self) -> &ModuleRun {
        &self.run
    }

    pub fn prediction(&self) -> f32 {
        self.prediction
    }

    /// Move the guess slider. Returns the stored value.
    pub fn predict(&mut self, value: f32) -> f32 {
        if value.is_finite() {
            self.prediction = G::ANCHOR.snap(value);
        }
        self.prediction
    }

    pub fn reality_check(&self) -> Option<RealityCheck> {
        G::ANCHOR.answer.map(|answer| RealityCheck {
            guess: self.prediction,
            answer,
        })
    }

    pub fn in_activity(&self) -> bool {
        self.run.phase_index() == DRILL_ACTIVITY_PHASE
    }

    pub fn result(&self) -> Option<&RunResult<G::Outcome>> {
        self.result.as_ref()
    }

    /// Advance a phase. The activity phase only lets go once the game is over.
    pub fn next(&mut self) -> bool {
        if self.in_activity() && self.result.is_none() {
            log::debug!("{}: game still in progress", G::MODULE);
            return false;
        }
        self.run.next()
    }

    /// Go back a phase. Landing on the activity phase discards the old result.
    pub fn back(&mut self) -> bool {
        let moved = self.run.back();
        if moved && self.in_activity() {
            self.result = None;
        }
        moved
    }

    /// A new game, only offered on the activity phase
    pub fn start_game(&self, tuning: &Tuning, seed: u64) -> Option<Simulation<G>> {
        self.in_activity()
            .then(|| Simulation::new(G::fresh(tuning), seed))
    }

    /// Record a finished game and move on to the result phase
    pub fn finish_game(&mut self, result: RunResult<G::Outcome>) -> bool {
        if !self.in_activity() {
            return false;
        }
        self.result = Some(result);
        self.run.next()
    }

    pub fn set_reflection(&mut self, text: impl Into<String>) {
        self.run.set_reflection(text);
    }

    pub fn can_complete(&self) -> bool {
        self.run.can_complete()
    }

    /// Hand the payout to the host. Returns the module untouched if not ready.
    pub fn complete<H: ModuleHost + ?Sized>(self, host: &mut H) -> Result<(), Self> {
        let Self {
            run,
            prediction,
            result,
        } = self;
        run.complete(host).map_err(|run| Self {
            run,
            prediction,
            result,
        })
    }

    pub fn abandon<H: ModuleHost + ?Sized>(self, host: &mut H) {
        self.run.abandon(host);
    }
}
