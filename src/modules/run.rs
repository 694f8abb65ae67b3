//! A single pass through a module, and the callbacks it reports to

use super::catalogue::ModuleId;
use super::phase::PhaseController;
use crate::skills::SkillWeights;

/// Minimum reflection length before the Complete control unlocks
pub const MIN_REFLECTION_CHARS: usize = 5;

/// Callbacks a host application supplies to a running module
pub trait ModuleHost {
    /// The learner abandoned the module; nothing from the run is kept
    fn on_back(&mut self);
    /// The learner finished the module with this payout
    fn on_complete(&mut self, module: ModuleId, weights: SkillWeights);
}

/// Phase state and scratch owned by one module run
///
/// Finishing or abandoning consumes the run, so `on_complete` fires at most
/// once per run.
#[derive(Debug, Clone)]
pub struct ModuleRun {
    module: ModuleId,
    phases: PhaseController,
    reflection: String,
}

impl ModuleRun {
    pub fn new(module: ModuleId) -> Self {
        Self {
            module,
            phases: PhaseController::new(module.info().phases),
            reflection: String::new(),
        }
    }

    pub fn module(&self) -> ModuleId {
        self.module
    }

    pub fn phases(&self) -> &PhaseController {
        &self.phases
    }

    pub fn phase_index(&self) -> usize {
        self.phases.index()
    }

    pub fn next(&mut self) -> bool {
        self.phases.advance()
    }

    pub fn back(&mut self) -> bool {
        self.phases.retreat()
    }

    pub fn reflection(&self) -> &str {
        &self.reflection
    }

    pub fn set_reflection(&mut self, text: impl Into<String>) {
        self.reflection = text.into();
    }

    /// Complete is only offered on the final phase with a long enough reflection
    pub fn can_complete(&self) -> bool {
        self.phases.is_last() && self.reflection.chars().count() >= MIN_REFLECTION_CHARS
    }

    /// Report the module's payout to the host. Hands the run back untouched
    /// when completion is not yet allowed.
    pub fn complete<H: ModuleHost + ?Sized>(self, host: &mut H) -> Result<(), Self> {
        if !self.can_complete() {
            return Err(self);
        }
        log::debug!("{} finished at phase {}", self.module, self.phases.current());
        host.on_complete(self.module, self.module.info().skill_weights());
        Ok(())
    }

    /// Leave without completing
    pub fn abandon<H: ModuleHost + ?Sized>(self, host: &mut H) {
        log::debug!("{} abandoned at phase {}", self.module, self.phases.current());
        host.on_back();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Host that records every callback
    #[derive(Default)]
    pub(crate) struct RecordingHost {
        pub backs: u32,
        pub completions: Vec<(ModuleId, SkillWeights)>,
    }

    impl ModuleHost for RecordingHost {
        fn on_back(&mut self) {
            self.backs += 1;
        }

        fn on_complete(&mut self, module: ModuleId, weights: SkillWeights) {
            self.completions.push((module, weights));
        }
    }

    #[test]
    fn test_complete_requires_last_phase_and_reflection() {
        let mut host = RecordingHost::default();
        let mut run = ModuleRun::new(ModuleId::Supermarket);
        run.set_reflection("I learned a lot");

        run = run.complete(&mut host).unwrap_err();
        assert!(host.completions.is_empty());

        while run.next() {}
        run.set_reflection("meh");
        run = run.complete(&mut host).unwrap_err();

        run.set_reflection("Unit prices matter");
        assert!(run.complete(&mut host).is_ok());
        assert_eq!(host.completions.len(), 1);
        assert_eq!(host.completions[0].0, ModuleId::Supermarket);
        assert_eq!(host.completions[0].1, ModuleId::Supermarket.info().skill_weights());
    }

    #[test]
    fn test_abandon_calls_on_back() {
        let mut host = RecordingHost::default();
        let mut run = ModuleRun::new(ModuleId::Psychology);
        run.next();
        run.abandon(&mut host);
        assert_eq!(host.backs, 1);
        assert!(host.completions.is_empty());
    }

    #[test]
    fn test_back_and_next() {
        let mut run = ModuleRun::new(ModuleId::Psychology);
        assert!(!run.back());
        assert!(run.next());
        assert_eq!(run.phases().current(), "Mirror");
        assert!(run.back());
        assert_eq!(run.phase_index(), 0);
    }
}
