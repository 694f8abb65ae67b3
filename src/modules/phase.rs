//! Linear phase sequencing with back-navigation

use serde::Serialize;

/// Tracks where a module run is within its fixed phase list
#[derive(Debug, Clone, Serialize)]
pub struct PhaseController {
    phases: &'static [&'static str],
    index: usize,
}

impl PhaseController {
    pub fn new(phases: &'static [&'static str]) -> Self {
        debug_assert!(!phases.is_empty(), "module without phases");
        Self { phases, index: 0 }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn count(&self) -> usize {
        self.phases.len()
    }

    /// Name of the current phase
    pub fn current(&self) -> &'static str {
        self.phases.get(self.index).copied().unwrap_or_default()
    }

    pub fn phases(&self) -> &'static [&'static str] {
        self.phases
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.phases.len()
    }

    /// Move to the next phase. Refused on the last phase, which completes
    /// the module instead.
    pub fn advance(&mut self) -> bool {
        if self.is_last() {
            log::debug!("advance() on final phase '{}' ignored", self.current());
            return false;
        }
        self.index += 1;
        true
    }

    /// Step back one phase; a no-op on the first phase
    pub fn retreat(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    /// Stepper state for phase `i`: done, current or upcoming
    pub fn step_state(&self, i: usize) -> StepState {
        match i.cmp(&self.index) {
            std::cmp::Ordering::Less => StepState::Done,
            std::cmp::Ordering::Equal => StepState::Current,
            std::cmp::Ordering::Greater => StepState::Upcoming,
        }
    }
}

/// How a stepper dot should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepState {
    Done,
    Current,
    Upcoming,
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHASES: &[&str] = &["Guess", "Rules", "Drill", "Result", "Reflect"];

    #[test]
    fn test_advance_and_retreat() {
        let mut phases = PhaseController::new(PHASES);
        assert_eq!(phases.current(), "Guess");
        assert!(phases.advance());
        assert!(phases.advance());
        assert_eq!(phases.current(), "Drill");
        assert!(phases.retreat());
        assert_eq!(phases.index(), 1);
    }

    #[test]
    fn test_retreat_at_start_is_noop() {
        let mut phases = PhaseController::new(PHASES);
        assert!(!phases.retreat());
        assert_eq!(phases.index(), 0);
    }

    #[test]
    fn test_advance_stops_at_last_phase() {
        let mut phases = PhaseController::new(PHASES);
        for _ in 0..4 {
            assert!(phases.advance());
        }
        assert!(phases.is_last());
        assert!(!phases.advance());
        assert_eq!(phases.current(), "Reflect");
    }

    #[test]
    fn test_step_states() {
        let mut phases = PhaseController::new(PHASES);
        phases.advance();
        assert_eq!(phases.step_state(0), StepState::Done);
        assert_eq!(phases.step_state(1), StepState::Current);
        assert_eq!(phases.step_state(4), StepState::Upcoming);
    }
}
