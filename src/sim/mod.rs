//! Real-time mini-game simulation
//!
//! Every mini-game advances the same way:
//! - Seeded RNG only, so a seed plus a delta sequence replays exactly
//! - Fixed in-frame order: advance, resolve expiries, spawn
//! - Resources clamped at every mutation
//! - Nothing mutates once the run is terminal
//!
//! Each game decides whether draining its resource ends the run
//! ([`FailurePolicy::EndRun`]) or is just another setback
//! ([`FailurePolicy::Penalize`]).

pub mod cues;
pub mod debit_drill;
pub mod privacy_defender;
pub mod savings_jar;
pub mod scheduler;

use std::fmt::Debug;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

pub use cues::{Cue, CueKind, CueTimers};
pub use debit_drill::{DebitDrill, DrillAction, DrillEvent, DrillResult};
pub use privacy_defender::{DefenderAction, DefenderEvent, DefenderReport, PrivacyDefender};
pub use savings_jar::{HarvestResult, JarAction, JarEvent, SavingsJar};
pub use scheduler::{FrameHandle, FrameLoop, FrameScheduler, ManualScheduler};

/// What happens when a game's resource hits its failure bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// The run ends immediately as a failure
    EndRun,
    /// The run continues; only the clock can end it
    Penalize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunStatus {
    Running,
    /// Clock ran out with the resource intact (or under a penalize policy)
    Completed,
    /// Resource hit its failure bound under an end-run policy
    Failed,
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunStatus::Running)
    }
}

/// Valid range of a game's resource
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds {
    pub min: f32,
    pub max: f32,
}

impl Bounds {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Capped above only (balances may go negative)
    pub const fn at_most(max: f32) -> Self {
        Self {
            min: f32::NEG_INFINITY,
            max,
        }
    }

    /// `value + delta`, clamped. Non-finite deltas leave the value alone.
    pub fn apply(&self, value: f32, delta: f32) -> f32 {
        if !delta.is_finite() {
            log::warn!("Discarded non-finite resource delta {}", delta);
            return value;
        }
        self.clamp(value + delta)
    }

    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.min.max(0.0).min(self.max);
        }
        value.max(self.min).min(self.max)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A frame-driven mini-game
pub trait MiniGame {
    /// Discrete player input
    type Action: Debug;
    /// Notable things that happened during a step or action
    type Event: Debug + Clone + PartialEq;
    /// Terminal summary handed to the result phase
    type Outcome: Debug + Clone;

    const NAME: &'static str;
    const FAILURE_POLICY: FailurePolicy;

    /// Advance by `dt` seconds: move entities, resolve expiries, spawn
    fn step(&mut self, dt: f32, rng: &mut Pcg32, events: &mut Vec<Self::Event>);

    /// Apply a player action immediately. Returns false if it had no effect.
    fn act(&mut self, action: Self::Action, rng: &mut Pcg32, events: &mut Vec<Self::Event>)
    -> bool;

    /// Seconds left on the run clock
    fn time_left(&self) -> f32;

    /// Current value of the protected resource
    fn resource(&self) -> f32;

    fn bounds(&self) -> Bounds;

    /// Resource sits at its failure bound
    fn depleted(&self) -> bool;

    fn outcome(&self) -> Self::Outcome;

    /// Cosmetic feedback for an event, if any
    fn cue(_event: &Self::Event) -> Option<Cue> {
        None
    }
}

/// Terminal status plus the game's summary
#[derive(Debug, Clone, Serialize)]
pub struct RunResult<O> {
    pub status: RunStatus,
    pub outcome: O,
}

/// Owns one game, its RNG and its terminal guard
#[derive(Debug, Clone)]
pub struct Simulation<G: MiniGame> {
    game: G,
    seed: u64,
    rng: Pcg32,
    status: RunStatus,
    elapsed: f32,
    events: Vec<G::Event>,
}

impl<G: MiniGame> Simulation<G> {
    pub fn new(game: G, seed: u64) -> Self {
        log::info!("{} started (seed {})", G::NAME, seed);
        Self {
            game,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            status: RunStatus::Running,
            elapsed: 0.0,
            events: Vec::new(),
        }
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Simulated seconds since start (or last restart)
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Every event since start, in order
    pub fn events(&self) -> &[G::Event] {
        &self.events
    }

    /// Advance one frame of `dt` seconds. Ignored once terminal.
    pub fn tick(&mut self, dt: f32) {
        if self.is_terminal() {
            return;
        }
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            log::warn!("{}: discarded frame delta {}", G::NAME, dt);
            0.0
        };

        self.elapsed += dt;
        self.game.step(dt, &mut self.rng, &mut self.events);
        self.evaluate();
    }

    /// Apply a player action. Returns false if terminal or the action did nothing.
    pub fn act(&mut self, action: G::Action) -> bool {
        if self.is_terminal() {
            log::debug!("{}: {:?} after end of run ignored", G::NAME, action);
            return false;
        }
        let applied = self.game.act(action, &mut self.rng, &mut self.events);
        self.evaluate();
        applied
    }

    /// Summary, once the run is over
    pub fn result(&self) -> Option<RunResult<G::Outcome>> {
        self.is_terminal().then(|| RunResult {
            status: self.status,
            outcome: self.game.outcome(),
        })
    }

    /// Start over with a fresh game; the RNG stream carries on
    pub fn restart(&mut self, game: G) {
        log::info!("{} restarted", G::NAME);
        self.game = game;
        self.status = RunStatus::Running;
        self.elapsed = 0.0;
        self.events.clear();
    }

    fn evaluate(&mut self) {
        let status = if G::FAILURE_POLICY == FailurePolicy::EndRun && self.game.depleted() {
            RunStatus::Failed
        } else if self.game.time_left() <= 0.0 {
            RunStatus::Completed
        } else {
            RunStatus::Running
        };

        if status.is_terminal() {
            log::info!(
                "{} ended {:?} after {:.1}s (resource {:.1})",
                G::NAME,
                status,
                self.elapsed,
                self.game.resource()
            );
        }
        self.status = status;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_clamp_and_nan() {
        let b = Bounds::new(0.0, 100.0);
        assert_eq!(b.apply(95.0, 15.0), 100.0);
        assert_eq!(b.apply(5.0, -20.0), 0.0);
        assert_eq!(b.apply(40.0, f32::NAN), 40.0);
        assert_eq!(b.clamp(f32::NAN), 0.0);

        let cap = Bounds::at_most(100.0);
        assert_eq!(cap.apply(10.0, -35.0), -25.0);
        assert_eq!(cap.apply(90.0, 15.0), 100.0);
    }

    #[test]
    fn test_terminal_status() {
        assert!(!RunStatus::Running.is_terminal());
        assert!(RunStatus::Completed.is_terminal());
        assert!(RunStatus::Failed.is_terminal());
    }
}
