//! Skill registry
//!
//! Static catalogue of the competencies a learner earns points in. Every
//! skill id used by a module's weight map is a [`SkillId`] variant, so an
//! unknown skill is a compile error rather than a silently dropped entry.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// School-year band used to pick level-appropriate copy
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum LevelBand {
    #[serde(rename = "1-4")]
    Years1To4,
    #[serde(rename = "5-8")]
    Years5To8,
    #[default]
    #[serde(rename = "9-10")]
    Years9To10,
    #[serde(rename = "11-13")]
    Years11To13,
}

impl LevelBand {
    pub const ALL: [LevelBand; 4] = [
        LevelBand::Years1To4,
        LevelBand::Years5To8,
        LevelBand::Years9To10,
        LevelBand::Years11To13,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LevelBand::Years1To4 => "1-4",
            LevelBand::Years5To8 => "5-8",
            LevelBand::Years9To10 => "9-10",
            LevelBand::Years11To13 => "11-13",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim() {
            "1-4" => Some(LevelBand::Years1To4),
            "5-8" => Some(LevelBand::Years5To8),
            "9-10" => Some(LevelBand::Years9To10),
            "11-13" => Some(LevelBand::Years11To13),
            _ => None,
        }
    }
}

impl fmt::Display for LevelBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Closed set of skill identifiers
///
/// Declaration order is registry order; it breaks ties when ranking totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillId {
    Estimating,
    Calculating,
    Comparing,
    Forecasting,
    Reflecting,
    Researching,
    Prioritising,
    Tracking,
    Managing,
    Protecting,
}

impl SkillId {
    pub const ALL: [SkillId; 10] = [
        SkillId::Estimating,
        SkillId::Calculating,
        SkillId::Comparing,
        SkillId::Forecasting,
        SkillId::Reflecting,
        SkillId::Researching,
        SkillId::Prioritising,
        SkillId::Tracking,
        SkillId::Managing,
        SkillId::Protecting,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkillId::Estimating => "estimating",
            SkillId::Calculating => "calculating",
            SkillId::Comparing => "comparing",
            SkillId::Forecasting => "forecasting",
            SkillId::Reflecting => "reflecting",
            SkillId::Researching => "researching",
            SkillId::Prioritising => "prioritising",
            SkillId::Tracking => "tracking",
            SkillId::Managing => "managing",
            SkillId::Protecting => "protecting",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        SkillId::ALL.into_iter().find(|id| id.as_str() == s)
    }

    /// Registry entry for this id
    pub fn skill(&self) -> &'static Skill {
        // SKILLS is laid out in declaration order
        &SKILLS[*self as usize]
    }
}

impl fmt::Display for SkillId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Points awarded per skill when a module completes
pub type SkillWeights = BTreeMap<SkillId, u32>;

/// Build a weight map from a fixed table
pub fn weights(table: &[(SkillId, u32)]) -> SkillWeights {
    table.iter().copied().collect()
}

/// A registry entry
#[derive(Debug)]
pub struct Skill {
    pub id: SkillId,
    pub name: &'static str,
    pub icon: &'static str,
    descriptions: &'static [(LevelBand, &'static str)],
}

impl Skill {
    /// Level-appropriate description, if the band has one
    pub fn description(&self, level: LevelBand) -> Option<&'static str> {
        self.descriptions
            .iter()
            .find(|(band, _)| *band == level)
            .map(|(_, text)| *text)
    }
}

use LevelBand::*;

/// The full registry, one entry per [`SkillId`] in declaration order
pub static SKILLS: [Skill; 10] = [
    Skill {
        id: SkillId::Estimating,
        name: "Estimating",
        icon: "🎯",
        descriptions: &[
            (Years1To4, "Guessing the right amounts"),
            (Years5To8, "Estimating costs before spending"),
            (Years9To10, "Forming educated estimates on ratios"),
            (Years11To13, "Developing informed hypotheses on allocation"),
        ],
    },
    Skill {
        id: SkillId::Calculating,
        name: "Calculating",
        icon: "🧮",
        descriptions: &[
            (Years1To4, "Adding up costs"),
            (Years5To8, "Checking if you have enough money"),
            (Years9To10, "Balancing income against expenses"),
            (Years11To13, "Complex deficit and surplus modelling"),
        ],
    },
    Skill {
        id: SkillId::Comparing,
        name: "Comparing",
        icon: "⚖️",
        descriptions: &[
            (Years1To4, "Choosing this or that"),
            (Years5To8, "Weighing up wants vs needs"),
            (Years9To10, "Analysing trade-offs in spending"),
            (Years11To13, "Evaluating opportunity costs of consumption"),
        ],
    },
    Skill {
        id: SkillId::Forecasting,
        name: "Forecasting",
        icon: "📈",
        descriptions: &[
            (Years1To4, "Saving for later"),
            (Years5To8, "Planning for future fun"),
            (Years9To10, "Projecting savings growth over time"),
            (Years11To13, "Modelling long-term compound interest"),
        ],
    },
    Skill {
        id: SkillId::Reflecting,
        name: "Reflecting",
        icon: "🪞",
        descriptions: &[
            (Years1To4, "Thinking about choices"),
            (Years5To8, "Understanding where money went"),
            (Years9To10, "Evaluating budget effectiveness"),
            (Years11To13, "Critically analysing financial behaviour"),
        ],
    },
    Skill {
        id: SkillId::Researching,
        name: "Researching",
        icon: "🔍",
        descriptions: &[
            (Years1To4, "Finding things out"),
            (Years5To8, "Finding reliable information to help you decide"),
            (Years9To10, "Locating and evaluating sources of information"),
            (Years11To13, "Critically assessing information quality and relevance"),
        ],
    },
    Skill {
        id: SkillId::Prioritising,
        name: "Prioritising",
        icon: "⭐",
        descriptions: &[
            (Years1To4, "Picking what matters most"),
            (Years5To8, "Deciding what to spend first"),
            (Years9To10, "Ranking what matters most when resources are limited"),
            (Years11To13, "Strategic resource allocation under constraints"),
        ],
    },
    // The drill skills only ship copy for the default band
    Skill {
        id: SkillId::Tracking,
        name: "Tracking",
        icon: "👀",
        descriptions: &[(Years9To10, "Knowing exactly where your money is going")],
    },
    Skill {
        id: SkillId::Managing,
        name: "Managing",
        icon: "🕹️",
        descriptions: &[(Years9To10, "Taking action to keep things under control")],
    },
    Skill {
        id: SkillId::Protecting,
        name: "Protecting",
        icon: "🛡️",
        descriptions: &[(Years9To10, "Guarding your personal data and wealth")],
    },
];

/// Tolerant lookup: `None` when the band has no copy for this skill
pub fn describe(skill: SkillId, level: LevelBand) -> Option<&'static str> {
    skill.skill().description(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_order_matches_ids() {
        for id in SkillId::ALL {
            assert_eq!(id.skill().id, id);
        }
    }

    #[test]
    fn test_describe_known_band() {
        assert_eq!(
            describe(SkillId::Calculating, LevelBand::Years5To8),
            Some("Checking if you have enough money")
        );
    }

    #[test]
    fn test_describe_missing_band_is_none() {
        assert_eq!(describe(SkillId::Protecting, LevelBand::Years1To4), None);
        assert_eq!(describe(SkillId::Tracking, LevelBand::Years11To13), None);
        assert_eq!(
            describe(SkillId::Managing, LevelBand::Years9To10),
            Some("Taking action to keep things under control")
        );
    }

    #[test]
    fn test_string_round_trip() {
        assert_eq!(SkillId::from_str("prioritising"), Some(SkillId::Prioritising));
        assert_eq!(SkillId::from_str("juggling"), None);
        assert_eq!(LevelBand::from_str("11-13"), Some(LevelBand::Years11To13));
        assert_eq!(LevelBand::from_str("7"), None);
        assert_eq!(LevelBand::default().as_str(), "9-10");
    }

    #[test]
    fn test_serde_uses_source_ids() {
        let json = serde_json::to_string(&weights(&[(SkillId::Tracking, 3)])).unwrap();
        assert_eq!(json, r#"{"tracking":3}"#);
        let band: LevelBand = serde_json::from_str(r#""1-4""#).unwrap();
        assert_eq!(band, LevelBand::Years1To4);
    }
}
