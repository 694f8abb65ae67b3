//! Hub screen model
//!
//! A read-only projection of the progress store: level picker, module cards
//! grouped by section, and one skill bar per registered skill. Rebuilt from
//! scratch whenever the store changes.

use serde::Serialize;

use crate::modules::{CATALOGUE, ModuleCategory, ModuleId};
use crate::progress::ProgressStore;
use crate::skills::{LevelBand, SKILLS, SkillId};

/// Points at which a skill bar is drawn full
pub const BAR_FULL_AT: u32 = 10;

#[derive(Debug, Clone, Serialize)]
pub struct LevelOption {
    pub level: LevelBand,
    pub label: &'static str,
    pub ages: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModuleCard {
    pub id: ModuleId,
    pub name: &'static str,
    pub emoji: &'static str,
    pub tagline: &'static str,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HubSection {
    pub category: ModuleCategory,
    pub modules: Vec<ModuleCard>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillRow {
    pub id: SkillId,
    pub name: &'static str,
    pub icon: &'static str,
    pub total: u32,
    /// Bar fill in 0..=1
    pub fill: f32,
    pub description: Option<&'static str>,
    /// Part of the payout currently being celebrated
    pub highlight: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct HubView {
    pub levels: Vec<LevelOption>,
    pub sections: Vec<HubSection>,
    pub skills: Vec<SkillRow>,
    pub total_points: u32,
    pub completed: usize,
    /// Skill ids with points, highest first
    pub top_skills: Vec<(SkillId, u32)>,
}

pub fn level_label(level: LevelBand) -> (&'static str, &'static str) {
    match level {
        LevelBand::Years1To4 => ("Year 1-4", "5-8 yrs"),
        LevelBand::Years5To8 => ("Year 5-8", "9-12 yrs"),
        LevelBand::Years9To10 => ("Year 9-10", "13-14 yrs"),
        LevelBand::Years11To13 => ("Year 11-13", "15-18 yrs"),
    }
}

pub fn bar_fill(total: u32) -> f32 {
    (total as f32 / BAR_FULL_AT as f32).min(1.0)
}

impl HubView {
    pub fn build(store: &ProgressStore) -> Self {
        let level = store.user_level();

        let levels = LevelBand::ALL
            .into_iter()
            .map(|band| {
                let (label, ages) = level_label(band);
                LevelOption {
                    level: band,
                    label,
                    ages,
                    selected: band == level,
                }
            })
            .collect();

        let sections = [ModuleCategory::Flagship, ModuleCategory::Practice]
            .into_iter()
            .map(|category| HubSection {
                category,
                modules: CATALOGUE
                    .iter()
                    .filter(|info| info.category == category)
                    .map(|info| ModuleCard {
                        id: info.id,
                        name: info.name,
                        emoji: info.emoji,
                        tagline: info.tagline,
                        completed: store.is_completed(info.id),
                    })
                    .collect(),
            })
            .collect();

        let skills = SKILLS
            .iter()
            .map(|skill| {
                let total = store.skill_total(skill.id);
                SkillRow {
                    id: skill.id,
                    name: skill.name,
                    icon: skill.icon,
                    total,
                    fill: bar_fill(total),
                    description: skill.description(level),
                    highlight: store.is_newly_added(skill.id),
                }
            })
            .collect();

        Self {
            levels,
            sections,
            skills,
            total_points: store.total_points(),
            completed: store.completed_modules().len(),
            top_skills: store.ranked_skills(),
        }
    }

    pub fn section(&self, category: ModuleCategory) -> Option<&HubSection> {
        self.sections.iter().find(|s| s.category == category)
    }

    pub fn skill(&self, id: SkillId) -> Option<&SkillRow> {
        self.skills.iter().find(|row| row.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_fill() {
        assert_eq!(bar_fill(0), 0.0);
        assert_eq!(bar_fill(4), 0.4);
        assert_eq!(bar_fill(10), 1.0);
        assert_eq!(bar_fill(37), 1.0);
    }

    #[test]
    fn test_empty_hub() {
        let hub = HubView::build(&ProgressStore::default());
        assert_eq!(hub.total_points, 0);
        assert_eq!(hub.skills.len(), SkillId::ALL.len());
        assert!(hub.top_skills.is_empty());
        assert_eq!(hub.levels.iter().filter(|l| l.selected).count(), 1);
        assert!(hub.levels[2].selected);

        let flagship = hub.section(ModuleCategory::Flagship).unwrap();
        let practice = hub.section(ModuleCategory::Practice).unwrap();
        assert_eq!(flagship.modules.len(), 6);
        assert_eq!(practice.modules.len(), 6);
        assert!(practice.modules.iter().all(|m| !m.completed));
    }

    #[test]
    fn test_hub_after_completion() {
        let mut store = ProgressStore::default();
        store.complete_module(ModuleId::Income, &ModuleId::Income.info().skill_weights());
        let hub = HubView::build(&store);

        assert_eq!(hub.total_points, 13);
        assert_eq!(hub.completed, 1);
        let calc = hub.skill(SkillId::Calculating).unwrap();
        assert_eq!(calc.total, 4);
        assert_eq!(calc.fill, 0.4);
        assert!(calc.highlight);
        assert!(!hub.skill(SkillId::Prioritising).unwrap().highlight);
        assert_eq!(hub.top_skills[0], (SkillId::Calculating, 4));

        let income = &hub.section(ModuleCategory::Flagship).unwrap().modules[1];
        assert_eq!(income.id, ModuleId::Income);
        assert!(income.completed);
    }

    #[test]
    fn test_missing_description_is_none() {
        let mut store = ProgressStore::default();
        store.set_user_level(LevelBand::Years1To4);
        let hub = HubView::build(&store);
        assert!(hub.skill(SkillId::Protecting).unwrap().description.is_none());
        assert!(hub.skill(SkillId::Estimating).unwrap().description.is_some());
        assert_eq!(level_label(LevelBand::Years1To4).0, "Year 1-4");
    }
}
