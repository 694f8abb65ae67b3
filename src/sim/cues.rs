//! Cosmetic feedback timers
//!
//! Flashes, pulses and banners run on their own short timers. They only
//! toggle display flags and can never touch simulation state.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CueKind {
    /// Full-screen colour flash
    Flash,
    /// Icon pulse on the affected control
    Pulse,
    /// Short text banner
    Banner,
}

/// A feedback effect requested by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cue {
    pub kind: CueKind,
    pub label: &'static str,
    pub duration_ms: f32,
}

impl Cue {
    pub const fn new(kind: CueKind, label: &'static str, duration_ms: f32) -> Self {
        Self {
            kind,
            label,
            duration_ms,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct ActiveCue {
    cue: Cue,
    remaining_ms: f32,
}

/// Active cues, at most one per kind
#[derive(Debug, Clone, Default, Serialize)]
pub struct CueTimers {
    active: Vec<ActiveCue>,
    reduced_motion: bool,
}

impl CueTimers {
    pub fn new(reduced_motion: bool) -> Self {
        Self {
            active: Vec::new(),
            reduced_motion,
        }
    }

    /// Show a cue, replacing any cue of the same kind
    pub fn trigger(&mut self, cue: Cue) {
        if self.reduced_motion && cue.kind == CueKind::Flash {
            return;
        }
        self.active.retain(|a| a.cue.kind != cue.kind);
        self.active.push(ActiveCue {
            cue,
            remaining_ms: cue.duration_ms,
        });
    }

    /// Count down every cue by `dt` seconds and drop the expired ones
    pub fn advance(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let ms = dt * 1000.0;
        for active in &mut self.active {
            active.remaining_ms -= ms;
        }
        self.active.retain(|a| a.remaining_ms > 0.0);
    }

    pub fn is_active(&self, kind: CueKind) -> bool {
        self.active.iter().any(|a| a.cue.kind == kind)
    }

    /// Label of the live cue of this kind
    pub fn label(&self, kind: CueKind) -> Option<&'static str> {
        self.active
            .iter()
            .find(|a| a.cue.kind == kind)
            .map(|a| a.cue.label)
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_expires() {
        let mut cues = CueTimers::default();
        cues.trigger(Cue::new(CueKind::Flash, "fee", 500.0));
        cues.advance(0.3);
        assert!(cues.is_active(CueKind::Flash));
        cues.advance(0.25);
        assert!(!cues.is_active(CueKind::Flash));
    }

    #[test]
    fn test_same_kind_replaces() {
        let mut cues = CueTimers::default();
        cues.trigger(Cue::new(CueKind::Banner, "BLOCKED!", 800.0));
        cues.advance(0.7);
        cues.trigger(Cue::new(CueKind::Banner, "Mistake!", 800.0));
        cues.advance(0.5);
        assert_eq!(cues.label(CueKind::Banner), Some("Mistake!"));
    }

    #[test]
    fn test_reduced_motion_skips_flash() {
        let mut cues = CueTimers::new(true);
        cues.trigger(Cue::new(CueKind::Flash, "fee", 500.0));
        cues.trigger(Cue::new(CueKind::Pulse, "bill", 300.0));
        assert!(!cues.is_active(CueKind::Flash));
        assert!(cues.is_active(CueKind::Pulse));
    }
}
