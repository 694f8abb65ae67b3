//! Learner progress store
//!
//! The one piece of state that outlives a single module run: chosen level,
//! cumulative skill points and the modules already completed. It is an
//! explicit value owned by the host and handed to views by reference; there
//! is no global instance and nothing is persisted.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::modules::ModuleId;
use crate::skills::{LevelBand, SkillId, SkillWeights};

/// Default lifetime of the "points added" celebration, in seconds
pub const CELEBRATION_SECS: f32 = 4.0;

/// What a call to [`ProgressStore::complete_module`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// First completion: weights applied, module marked complete
    FirstTime,
    /// Module was already complete; nothing changed
    Repeat,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProgressStore {
    user_level: LevelBand,
    skill_totals: BTreeMap<SkillId, u32>,
    /// Insertion-ordered, no duplicates
    completed_modules: Vec<ModuleId>,
    last_added: SkillWeights,
    /// Seconds left on the celebration highlight (presentation only)
    #[serde(skip)]
    celebration_left: f32,
    #[serde(skip)]
    celebration_secs: f32,
}

impl Default for ProgressStore {
    fn default() -> Self {
        Self::new(LevelBand::default(), CELEBRATION_SECS)
    }
}

impl ProgressStore {
    pub fn new(user_level: LevelBand, celebration_secs: f32) -> Self {
        Self {
            user_level,
            skill_totals: zeroed_totals(),
            completed_modules: Vec::new(),
            last_added: SkillWeights::new(),
            celebration_left: 0.0,
            celebration_secs: celebration_secs.max(0.0),
        }
    }

    pub fn user_level(&self) -> LevelBand {
        self.user_level
    }

    pub fn set_user_level(&mut self, level: LevelBand) {
        if level != self.user_level {
            log::info!("Level changed {} -> {}", self.user_level, level);
        }
        self.user_level = level;
    }

    pub fn skill_total(&self, skill: SkillId) -> u32 {
        self.skill_totals.get(&skill).copied().unwrap_or(0)
    }

    pub fn skill_totals(&self) -> &BTreeMap<SkillId, u32> {
        &self.skill_totals
    }

    pub fn completed_modules(&self) -> &[ModuleId] {
        &self.completed_modules
    }

    pub fn is_completed(&self, module: ModuleId) -> bool {
        self.completed_modules.contains(&module)
    }

    /// Most recently applied payout (drives the highlight only)
    pub fn last_added(&self) -> &SkillWeights {
        &self.last_added
    }

    /// Whether the celebration highlight is currently showing
    pub fn celebrating(&self) -> bool {
        self.celebration_left > 0.0
    }

    /// Record a finished module and merge its payout into the totals.
    ///
    /// Weights are applied on first completion only. A repeat completion
    /// leaves totals, the last payout and the highlight untouched.
    pub fn complete_module(&mut self, module: ModuleId, weights: &SkillWeights) -> Completion {
        if self.is_completed(module) {
            log::info!("Module {} already complete; payout not re-applied", module);
            return Completion::Repeat;
        }

        for (skill, weight) in weights {
            debug_assert!(*weight > 0, "zero weight for {} in {}", skill, module);
            let total = self.skill_totals.entry(*skill).or_insert(0);
            *total = total.saturating_add(*weight);
        }
        self.completed_modules.push(module);
        self.last_added = weights.clone();
        self.celebration_left = self.celebration_secs;

        log::info!(
            "Module {} complete (+{} points, {} modules done)",
            module,
            weights.values().sum::<u32>(),
            self.completed_modules.len()
        );
        Completion::FirstTime
    }

    /// Zero every total and forget completions; the chosen level is kept
    pub fn reset_progress(&mut self) {
        self.skill_totals = zeroed_totals();
        self.completed_modules.clear();
        self.last_added.clear();
        self.celebration_left = 0.0;
        log::info!("Progress reset (level stays {})", self.user_level);
    }

    /// Advance the celebration timer
    pub fn advance(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.celebration_left = (self.celebration_left - dt).max(0.0);
        }
    }

    pub fn total_points(&self) -> u32 {
        self.skill_totals.values().sum()
    }

    /// Non-zero skills, highest total first (ties in registry order)
    pub fn ranked_skills(&self) -> Vec<(SkillId, u32)> {
        let mut ranked: Vec<_> = self
            .skill_totals
            .iter()
            .filter(|(_, total)| **total > 0)
            .map(|(skill, total)| (*skill, *total))
            .collect();
        // Stable sort keeps registry order for equal totals
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// True while the highlight is live for a skill in the last payout
    pub fn is_newly_added(&self, skill: SkillId) -> bool {
        self.celebrating() && self.last_added.get(&skill).is_some_and(|w| *w > 0)
    }
}

fn zeroed_totals() -> BTreeMap<SkillId, u32> {
    SkillId::ALL.into_iter().map(|id| (id, 0)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::weights;
    use proptest::prelude::*;

    #[test]
    fn test_complete_module_adds_weights() {
        let mut store = ProgressStore::default();
        let before = store.skill_total(SkillId::Calculating);
        let outcome = store.complete_module(
            ModuleId::Income,
            &weights(&[(SkillId::Calculating, 4), (SkillId::Comparing, 2)]),
        );
        assert_eq!(outcome, Completion::FirstTime);
        assert_eq!(store.skill_total(SkillId::Calculating), before + 4);
        assert_eq!(store.skill_total(SkillId::Comparing), 2);
        assert!(store.celebrating());
        assert!(store.is_newly_added(SkillId::Comparing));
        assert!(!store.is_newly_added(SkillId::Tracking));
    }

    #[test]
    fn test_repeat_completion_is_idempotent() {
        let mut store = ProgressStore::default();
        let payout = ModuleId::DebitDrill.info().skill_weights();
        store.complete_module(ModuleId::DebitDrill, &payout);
        store.advance(10.0);
        assert!(!store.celebrating());

        let outcome = store.complete_module(ModuleId::DebitDrill, &payout);
        assert_eq!(outcome, Completion::Repeat);
        assert_eq!(store.completed_modules(), &[ModuleId::DebitDrill]);
        assert_eq!(store.skill_total(SkillId::Tracking), 3);
        assert!(!store.celebrating());
    }

    #[test]
    fn test_completed_modules_keep_insertion_order() {
        let mut store = ProgressStore::default();
        for id in [ModuleId::Savings, ModuleId::Banking, ModuleId::Savings, ModuleId::Income] {
            store.complete_module(id, &id.info().skill_weights());
        }
        assert_eq!(
            store.completed_modules(),
            &[ModuleId::Savings, ModuleId::Banking, ModuleId::Income]
        );
    }

    #[test]
    fn test_reset_clears_totals_keeps_level() {
        let mut store = ProgressStore::default();
        store.set_user_level(LevelBand::Years11To13);
        store.complete_module(ModuleId::Budgeting, &ModuleId::Budgeting.info().skill_weights());
        assert!(store.total_points() > 0);

        store.reset_progress();
        assert_eq!(store.total_points(), 0);
        assert!(SkillId::ALL.iter().all(|s| store.skill_total(*s) == 0));
        assert!(store.completed_modules().is_empty());
        assert!(store.last_added().is_empty());
        assert_eq!(store.user_level(), LevelBand::Years11To13);
    }

    #[test]
    fn test_celebration_expires() {
        let mut store = ProgressStore::new(LevelBand::Years5To8, 4.0);
        store.complete_module(ModuleId::SavingsJar, &ModuleId::SavingsJar.info().skill_weights());
        store.advance(3.9);
        assert!(store.celebrating());
        store.advance(0.2);
        assert!(!store.celebrating());
        assert!(!store.is_newly_added(SkillId::Forecasting));
        // NaN deltas are ignored
        store.advance(f32::NAN);
        assert!(!store.celebrating());
    }

    #[test]
    fn test_ranked_skills() {
        let mut store = ProgressStore::default();
        store.complete_module(ModuleId::NeedsSorter, &ModuleId::NeedsSorter.info().skill_weights());
        store.complete_module(ModuleId::SavingsJar, &ModuleId::SavingsJar.info().skill_weights());
        assert_eq!(
            store.ranked_skills(),
            vec![
                (SkillId::Prioritising, 5),
                (SkillId::Estimating, 4),
                (SkillId::Forecasting, 3),
                (SkillId::Reflecting, 3),
            ]
        );
    }

    proptest! {
        #[test]
        fn prop_totals_equal_sum_of_first_payouts(order in proptest::collection::vec(0usize..12, 0..40)) {
            let mut store = ProgressStore::default();
            let mut expected: BTreeMap<SkillId, u32> = BTreeMap::new();
            let mut seen = Vec::new();
            let mut previous = store.skill_totals().clone();

            for idx in order {
                let id = ModuleId::ALL[idx];
                let payout = id.info().skill_weights();
                if !seen.contains(&id) {
                    seen.push(id);
                    for (skill, w) in &payout {
                        *expected.entry(*skill).or_insert(0) += *w;
                    }
                }
                store.complete_module(id, &payout);

                for skill in SkillId::ALL {
                    prop_assert!(store.skill_total(skill) >= previous[&skill]);
                }
                previous = store.skill_totals().clone();
            }

            for skill in SkillId::ALL {
                prop_assert_eq!(store.skill_total(skill), expected.get(&skill).copied().unwrap_or(0));
            }
            prop_assert_eq!(store.completed_modules().len(), seen.len());
        }
    }
}
