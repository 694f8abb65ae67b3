//! Data-driven game balance
//!
//! Defaults reproduce the shipped balance; a settings file may override any
//! field.

use serde::{Deserialize, Serialize};

/// Balance for every mini-game
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub debit_drill: DebitDrillTuning,
    pub savings_jar: SavingsJarTuning,
    pub privacy_defender: PrivacyDefenderTuning,
}

/// Debit Card Drill: keep the balance above zero while bills fall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebitDrillTuning {
    pub duration_secs: f32,
    pub starting_balance: f32,
    pub max_balance: f32,
    pub overdraft_fee: f32,
    pub deposit_amount: f32,
    pub deposit_delay_ms: f32,
    pub first_bill_ms: f32,
    pub bill_interval_min_ms: f32,
    pub bill_interval_jitter_ms: f32,
    /// Play field is 0..100 on both axes
    pub spawn_x_min: f32,
    pub spawn_x_span: f32,
    pub spawn_y: f32,
    /// Bills past this height hit the wallet
    pub landing_y: f32,
    /// Field units per reference frame
    pub speed_min: f32,
    pub speed_jitter: f32,
    pub reference_frame_ms: f32,
}

impl Default for DebitDrillTuning {
    fn default() -> Self {
        Self {
            duration_secs: 60.0,
            starting_balance: 50.0,
            max_balance: 100.0,
            overdraft_fee: 10.0,
            deposit_amount: 15.0,
            deposit_delay_ms: 1500.0,
            first_bill_ms: 2000.0,
            bill_interval_min_ms: 1500.0,
            bill_interval_jitter_ms: 2500.0,
            spawn_x_min: 10.0,
            spawn_x_span: 70.0,
            spawn_y: -10.0,
            landing_y: 80.0,
            speed_min: 0.2,
            speed_jitter: 0.1,
            reference_frame_ms: 16.0,
        }
    }
}

/// Savings Jar: feed the tree or spend on treats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingsJarTuning {
    pub duration_secs: u32,
    pub starting_health: f32,
    pub max_health: f32,
    pub starting_scale: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    pub income: f32,
    /// Income lands on seconds divisible by this
    pub income_every_secs: u32,
    pub decay_per_sec: f32,
    pub action_cost: f32,
    pub feed_heal: f32,
    pub feed_growth: f32,
    pub spend_damage: f32,
    pub spend_shrink: f32,
}

impl Default for SavingsJarTuning {
    fn default() -> Self {
        Self {
            duration_secs: 60,
            starting_health: 50.0,
            max_health: 100.0,
            starting_scale: 1.0,
            min_scale: 0.3,
            max_scale: 2.5,
            income: 10.0,
            income_every_secs: 2,
            decay_per_sec: 1.0,
            action_cost: 10.0,
            feed_heal: 15.0,
            feed_growth: 0.1,
            spend_damage: 20.0,
            spend_shrink: 0.3,
        }
    }
}

/// Privacy Defender: tap the scams before they breach the firewall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacyDefenderTuning {
    pub duration_secs: f32,
    pub starting_firewall: f32,
    pub grid_slots: usize,
    pub scam_chance: f64,
    /// Share of scams that mimic a real brand (the rest are obvious)
    pub mimic_share: f64,
    pub first_spawn_ms: f32,
    /// Difficulty rises by one every this many seconds
    pub difficulty_ramp_secs: f32,
    pub lifetime_base_ms: f32,
    pub lifetime_step_ms: f32,
    pub lifetime_min_ms: f32,
    pub spawn_base_ms: f32,
    pub spawn_step_ms: f32,
    pub spawn_min_ms: f32,
    pub breach_damage: f32,
    pub mistake_damage: f32,
    pub block_score: u32,
}

impl Default for PrivacyDefenderTuning {
    fn default() -> Self {
        Self {
            duration_secs: 60.0,
            starting_firewall: 100.0,
            grid_slots: 9,
            scam_chance: 0.6,
            mimic_share: 0.5,
            first_spawn_ms: 0.0,
            difficulty_ramp_secs: 15.0,
            lifetime_base_ms: 2500.0,
            lifetime_step_ms: 300.0,
            lifetime_min_ms: 1200.0,
            spawn_base_ms: 1500.0,
            spawn_step_ms: 200.0,
            spawn_min_ms: 600.0,
            breach_damage: 10.0,
            mistake_damage: 15.0,
            block_score: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override() {
        let tuning: Tuning =
            serde_json::from_str(r#"{"savings_jar":{"duration_secs":30}}"#).unwrap();
        assert_eq!(tuning.savings_jar.duration_secs, 30);
        assert_eq!(tuning.savings_jar.feed_heal, 15.0);
        assert_eq!(tuning.debit_drill, DebitDrillTuning::default());
    }
}
