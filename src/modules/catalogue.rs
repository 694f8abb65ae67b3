//! Module catalogue
//!
//! Display info, phase lists and fixed skill payouts for every module the
//! hub can launch.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::skills::{SkillId, SkillWeights, weights};

/// Which hub section a module is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleCategory {
    /// Deeper learning modules
    Flagship,
    /// Short practice drills
    Practice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModuleId {
    Psychology,
    Income,
    Budgeting,
    Banking,
    Shopping,
    Savings,
    Jobsim,
    NeedsSorter,
    Supermarket,
    SavingsJar,
    DebitDrill,
    PrivacyDefender,
}

/// Static description of a module
#[derive(Debug, Clone, Copy)]
pub struct ModuleInfo {
    pub id: ModuleId,
    pub name: &'static str,
    pub emoji: &'static str,
    pub tagline: &'static str,
    pub category: ModuleCategory,
    /// Ordered phase names shown in the stepper
    pub phases: &'static [&'static str],
    skill_table: &'static [(SkillId, u32)],
}

impl ModuleInfo {
    /// Fixed payout forwarded to the progress store on completion
    pub fn skill_weights(&self) -> SkillWeights {
        weights(self.skill_table)
    }

    pub fn phase_count(&self) -> usize {
        self.phases.len()
    }
}

impl ModuleId {
    pub const ALL: [ModuleId; 12] = [
        ModuleId::Psychology,
        ModuleId::Income,
        ModuleId::Budgeting,
        ModuleId::Banking,
        ModuleId::Shopping,
        ModuleId::Savings,
        ModuleId::Jobsim,
        ModuleId::NeedsSorter,
        ModuleId::Supermarket,
        ModuleId::SavingsJar,
        ModuleId::DebitDrill,
        ModuleId::PrivacyDefender,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleId::Psychology => "psychology",
            ModuleId::Income => "income",
            ModuleId::Budgeting => "budgeting",
            ModuleId::Banking => "banking",
            ModuleId::Shopping => "shopping",
            ModuleId::Savings => "savings",
            ModuleId::Jobsim => "jobsim",
            ModuleId::NeedsSorter => "needs_sorter",
            ModuleId::Supermarket => "supermarket",
            ModuleId::SavingsJar => "savings_jar",
            ModuleId::DebitDrill => "debit_drill",
            ModuleId::PrivacyDefender => "privacy_defender",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        ModuleId::ALL.into_iter().find(|id| id.as_str() == s)
    }

    pub fn info(&self) -> &'static ModuleInfo {
        &CATALOGUE[*self as usize]
    }
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use ModuleCategory::{Flagship, Practice};
use SkillId::*;

/// Every module, in [`ModuleId`] declaration order
pub static CATALOGUE: [ModuleInfo; 12] = [
    ModuleInfo {
        id: ModuleId::Psychology,
        name: "The Psychology of Money",
        emoji: "🧠",
        tagline: "Why we spend",
        category: Flagship,
        phases: &["Anchor", "Mirror", "Trap", "Shield", "Cost", "Review"],
        skill_table: &[
            (Reflecting, 3),
            (Forecasting, 3),
            (Researching, 2),
            (Calculating, 2),
            (Comparing, 1),
            (Estimating, 1),
        ],
    },
    ModuleInfo {
        id: ModuleId::Income,
        name: "Income & The Pay Slip",
        emoji: "💸",
        tagline: "Gross vs Net Pay",
        category: Flagship,
        phases: &["Anchor", "Job", "Deductions", "Reality", "Reflect"],
        skill_table: &[
            (Estimating, 3),
            (Calculating, 4),
            (Comparing, 2),
            (Forecasting, 2),
            (Reflecting, 2),
        ],
    },
    ModuleInfo {
        id: ModuleId::Budgeting,
        name: "Budgeting Basics",
        emoji: "📝",
        tagline: "The Golden Rule",
        category: Flagship,
        phases: &["Anchor", "Income", "Sort", "Build", "Reflect"],
        skill_table: &[
            (Estimating, 3),
            (Calculating, 4),
            (Comparing, 3),
            (Forecasting, 2),
            (Reflecting, 1),
        ],
    },
    ModuleInfo {
        id: ModuleId::Banking,
        name: "Banking 101",
        emoji: "🏦",
        tagline: "Accounts & Interest",
        category: Flagship,
        phases: &["Anchor", "Setup", "Products", "Simulator", "Reflect"],
        skill_table: &[
            (Estimating, 2),
            (Calculating, 4),
            (Comparing, 5),
            (Forecasting, 2),
            (Reflecting, 2),
        ],
    },
    ModuleInfo {
        id: ModuleId::Shopping,
        name: "Smart Shopping & Rights",
        emoji: "🛍️",
        tagline: "Rights & Returns",
        category: Flagship,
        phases: &["Intro", "Value", "Builder", "Rights", "Reflect"],
        skill_table: &[
            (Estimating, 2),
            (Calculating, 4),
            (Comparing, 5),
            (Forecasting, 1),
            (Reflecting, 3),
        ],
    },
    ModuleInfo {
        id: ModuleId::Savings,
        name: "Intro to Saving",
        emoji: "⏳",
        tagline: "The Time Machine",
        category: Flagship,
        phases: &["Intro", "Setup", "View", "Check", "Reflect"],
        skill_table: &[
            (Estimating, 2),
            (Calculating, 4),
            (Forecasting, 5),
            (Reflecting, 2),
        ],
    },
    ModuleInfo {
        id: ModuleId::Jobsim,
        name: "Job Simulator",
        emoji: "💼",
        tagline: "Gig economy & admin",
        category: Practice,
        phases: &["Intro", "Work", "Invoice", "Result", "Review"],
        skill_table: &[
            (Estimating, 1),
            (Calculating, 3),
            (Reflecting, 3),
            (Forecasting, 2),
        ],
    },
    ModuleInfo {
        id: ModuleId::NeedsSorter,
        name: "Needs Sorter",
        emoji: "⚖️",
        tagline: "Survival vs Fun",
        category: Practice,
        phases: &["Anchor", "Sort", "Trap", "Cuts", "Review"],
        skill_table: &[(Prioritising, 5), (Estimating, 2), (Reflecting, 3)],
    },
    ModuleInfo {
        id: ModuleId::Supermarket,
        name: "Virtual Supermarket",
        emoji: "🛒",
        tagline: "Price of being poor",
        category: Practice,
        phases: &["Anchor", "List", "Shop", "Receipt", "Reflect"],
        skill_table: &[(Comparing, 3), (Calculating, 2), (Reflecting, 3)],
    },
    ModuleInfo {
        id: ModuleId::SavingsJar,
        name: "The Savings Jar",
        emoji: "🌱",
        tagline: "Growing your future",
        category: Practice,
        phases: &["Predict", "Setup", "Grow", "Harvest", "Reflect"],
        skill_table: &[(Forecasting, 3), (Estimating, 2)],
    },
    ModuleInfo {
        id: ModuleId::DebitDrill,
        name: "Debit Card Drill",
        emoji: "💳",
        tagline: "Surviving overdraft",
        category: Practice,
        phases: &["Guess", "Rules", "Drill", "Result", "Reflect"],
        skill_table: &[(Tracking, 3), (Managing, 2)],
    },
    ModuleInfo {
        id: ModuleId::PrivacyDefender,
        name: "Privacy Defender",
        emoji: "🛡️",
        tagline: "Don't take the bait",
        category: Practice,
        phases: &["Check", "Setup", "Defend", "Report", "Reflect"],
        skill_table: &[(Protecting, 3), (Tracking, 1)],
    },
];

/// Phase index of the mini-game inside a five-step drill module
pub const DRILL_ACTIVITY_PHASE: usize = 2;

/// True for the modules built around a real-time mini-game
pub fn has_mini_game(id: ModuleId) -> bool {
    matches!(
        id,
        ModuleId::SavingsJar | ModuleId::DebitDrill | ModuleId::PrivacyDefender
    )
}
