//! Frame scheduling
//!
//! The host owns the real frame clock (`requestAnimationFrame` in a browser,
//! a vsync loop natively). A [`FrameLoop`] asks it for one frame at a time,
//! turns timestamps into deltas, and stops asking once its run is over.
//! Dropping the loop cancels any outstanding request.

use super::cues::CueTimers;
use super::{MiniGame, RunResult, RunStatus, Simulation};

/// Opaque id for a requested frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

pub trait FrameScheduler {
    /// Ask for one callback on the next frame
    fn request_frame(&mut self) -> FrameHandle;
    /// Withdraw a request that has not fired yet
    fn cancel_frame(&mut self, handle: FrameHandle);
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for &mut S {
    fn request_frame(&mut self) -> FrameHandle {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        (**self).cancel_frame(handle)
    }
}

/// Scheduler driven by hand: tests and the headless demo pop frames off it
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Vec<FrameHandle>,
    cancelled: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the oldest outstanding frame request
    pub fn next_due(&mut self) -> Option<FrameHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Number of requests withdrawn before firing
    pub fn cancelled(&self) -> u32 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.pending.len();
        self.pending.retain(|h| *h != handle);
        if self.pending.len() < before {
            self.cancelled += 1;
        }
    }
}

/// Runs one simulation against a host frame clock
pub struct FrameLoop<G: MiniGame, S: FrameScheduler> {
    sim: Simulation<G>,
    scheduler: S,
    pending: Option<FrameHandle>,
    last_frame_ms: f64,
    cues: CueTimers,
    /// Host time the cue timers were last advanced to
    cue_clock_ms: f64,
}

impl<G: MiniGame, S: FrameScheduler> FrameLoop<G, S> {
    /// Start the loop at host time `now_ms` and request the first frame
    pub fn start(sim: Simulation<G>, mut scheduler: S, cues: CueTimers, now_ms: f64) -> Self {
        let pending = (!sim.is_terminal()).then(|| scheduler.request_frame());
        Self {
            sim,
            scheduler,
            pending,
            last_frame_ms: now_ms,
            cues,
            cue_clock_ms: now_ms,
        }
    }

    pub fn simulation(&self) -> &Simulation<G> {
        &self.sim
    }

    /// The host clock, for hosts that pump frames themselves
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn cues(&self) -> &CueTimers {
        &self.cues
    }

    pub fn status(&self) -> RunStatus {
        self.sim.status()
    }

    /// Whether a frame request is outstanding
    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    pub fn result(&self) -> Option<RunResult<G::Outcome>> {
        self.sim.result()
    }

    /// Frame callback. Stale or foreign handles are ignored.
    pub fn on_frame(&mut self, handle: FrameHandle, now_ms: f64) -> RunStatus {
        if self.pending != Some(handle) {
            log::debug!("{}: stale frame {:?} ignored", G::NAME, handle);
            return self.sim.status();
        }
        self.pending = None;

        let dt = ((now_ms - self.last_frame_ms) / 1000.0) as f32;
        self.last_frame_ms = now_ms;

        let mark = self.sim.events().len();
        self.sim.tick(dt);
        self.advance_cues(now_ms);
        self.trigger_cues(mark);

        if !self.sim.is_terminal() {
            self.pending = Some(self.scheduler.request_frame());
        }
        self.sim.status()
    }

    /// Player input, applied right away rather than on the next frame
    pub fn act(&mut self, action: G::Action) -> bool {
        let mark = self.sim.events().len();
        let applied = self.sim.act(action);
        self.trigger_cues(mark);
        if self.sim.is_terminal() {
            self.cancel();
        }
        applied
    }

    /// Count the cue timers down to host time `now_ms`. Frames stop once the
    /// run is over, so the host keeps calling this until the last cue clears.
    pub fn advance_cues(&mut self, now_ms: f64) {
        let dt = ((now_ms - self.cue_clock_ms) / 1000.0) as f32;
        if dt > 0.0 {
            self.cues.advance(dt);
            self.cue_clock_ms = now_ms;
        }
    }

    /// Replace the game with a fresh one and resume scheduling
    pub fn retry(&mut self, game: G, now_ms: f64) {
        self.sim.restart(game);
        self.cues.clear();
        self.last_frame_ms = now_ms;
        self.cue_clock_ms = now_ms;
        if self.pending.is_none() {
            self.pending = Some(self.scheduler.request_frame());
        }
    }

    /// Withdraw the outstanding frame request, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    fn trigger_cues(&mut self, mark: usize) {
        for event in &self.sim.events()[mark..] {
            if let Some(cue) = G::cue(event) {
                self.cues.trigger(cue);
            }
        }
    }
}

impl<G: MiniGame, S: FrameScheduler> Drop for FrameLoop<G, S> {
    fn drop(&mut self) {
        self.cancel();
    }
}
