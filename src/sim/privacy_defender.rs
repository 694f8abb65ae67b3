//! Privacy Defender
//!
//! Pop-ups appear on a 3x3 grid. Scams must be tapped before they expire;
//! real notifications must be left alone. The game speeds up as the clock
//! runs down.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::cues::{Cue, CueKind};
use super::{Bounds, FailurePolicy, MiniGame};
use crate::tuning::PrivacyDefenderTuning;

/// A real brand and the typo-squatted name scammers use for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Brand {
    pub key: &'static str,
    pub real: &'static str,
    pub fake: &'static str,
}

pub static BRANDS: [Brand; 8] = [
    Brand { key: "net", real: "Netflix", fake: "Netflux" },
    Brand { key: "spot", real: "Spotify", fake: "Spotlfy" },
    Brand { key: "goog", real: "Google", fake: "Goggle" },
    Brand { key: "app", real: "Apple", fake: "AppIe" },
    Brand { key: "pay", real: "PayPal", fake: "PayPaI" },
    Brand { key: "bank", real: "BankNZ", fake: "BánkNZ" },
    Brand { key: "insta", real: "Insta", fake: "lnsta" },
    Brand { key: "post", real: "NZPost", fake: "NZP0st" },
];

pub const OBVIOUS_LABEL: &str = "URGENT!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Threat {
    /// Genuine notification
    Safe,
    /// Scam wearing a near-miss brand name
    Mimic,
    /// Scam that doesn't bother hiding
    Obvious,
}

impl Threat {
    pub fn is_scam(&self) -> bool {
        !matches!(self, Threat::Safe)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Popup {
    pub id: u32,
    pub slot: usize,
    pub brand: usize,
    pub threat: Threat,
    /// Milliseconds until it expires
    pub timer_ms: f32,
    pub lifetime_ms: f32,
}

impl Popup {
    pub fn label(&self) -> &'static str {
        let brand = &BRANDS[self.brand % BRANDS.len()];
        match self.threat {
            Threat::Safe => brand.real,
            Threat::Mimic => brand.fake,
            Threat::Obvious => OBVIOUS_LABEL,
        }
    }

    /// Remaining life as a fraction, for the countdown ring
    pub fn remaining(&self) -> f32 {
        if self.lifetime_ms > 0.0 {
            (self.timer_ms / self.lifetime_ms).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefenderAction {
    Tap { slot: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub enum DefenderEvent {
    Spawned { id: u32, slot: usize, threat: Threat },
    /// A scam expired untouched
    Breach { id: u32, damage: f32 },
    /// A genuine pop-up expired untouched
    Expired { id: u32 },
    Blocked { id: u32 },
    /// A genuine pop-up was tapped
    Mistake { id: u32, damage: f32 },
}

#[derive(Debug, Clone, Serialize)]
pub struct DefenderReport {
    pub score: u32,
    pub firewall: f32,
    pub scams_blocked: u32,
    pub breaches: u32,
    pub mistakes: u32,
}

impl DefenderReport {
    pub fn passed(&self) -> bool {
        self.firewall > 0.0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PrivacyDefender {
    #[serde(skip)]
    pub tuning: PrivacyDefenderTuning,
    pub firewall: f32,
    pub score: u32,
    pub time_left: f32,
    pub popups: Vec<Popup>,
    /// Countdown to the next spawn; stays at or below zero while the grid is full
    pub spawn_in_ms: f32,
    pub breaches: u32,
    pub mistakes: u32,
    next_id: u32,
}

impl PrivacyDefender {
    pub fn new(tuning: PrivacyDefenderTuning) -> Self {
        Self {
            firewall: tuning.starting_firewall,
            score: 0,
            time_left: tuning.duration_secs,
            popups: Vec::new(),
            spawn_in_ms: tuning.first_spawn_ms,
            breaches: 0,
            mistakes: 0,
            next_id: 0,
            tuning,
        }
    }

    /// 1 at the start, +1 every ramp interval
    pub fn difficulty(&self) -> f32 {
        let elapsed = (self.tuning.duration_secs - self.time_left).max(0.0);
        1.0 + elapsed / self.tuning.difficulty_ramp_secs.max(f32::EPSILON)
    }

    pub fn lifetime_ms(&self) -> f32 {
        let t = &self.tuning;
        (t.lifetime_base_ms - t.lifetime_step_ms * self.difficulty()).max(t.lifetime_min_ms)
    }

    pub fn spawn_delay_ms(&self) -> f32 {
        let t = &self.tuning;
        (t.spawn_base_ms - t.spawn_step_ms * self.difficulty()).max(t.spawn_min_ms)
    }

    pub fn popup_at(&self, slot: usize) -> Option<&Popup> {
        self.popups.iter().find(|p| p.slot == slot)
    }

    pub fn free_slots(&self) -> Vec<usize> {
        (0..self.tuning.grid_slots)
            .filter(|slot| self.popup_at(*slot).is_none())
            .collect()
    }

    fn firewall_bounds(&self) -> Bounds {
        Bounds::new(0.0, self.tuning.starting_firewall)
    }

    fn advance(&mut self, ms: f32) {
        self.time_left = (self.time_left - ms / 1000.0).max(0.0);
        for popup in &mut self.popups {
            popup.timer_ms -= ms;
        }
        self.spawn_in_ms -= ms;
    }

    fn resolve_expired(&mut self, events: &mut Vec<DefenderEvent>) {
        let (expired, live): (Vec<Popup>, Vec<Popup>) =
            self.popups.drain(..).partition(|p| p.timer_ms <= 0.0);
        self.popups = live;

        for popup in expired {
            if popup.threat.is_scam() {
                let damage = self.tuning.breach_damage;
                self.firewall = self.firewall_bounds().apply(self.firewall, -damage);
                self.breaches += 1;
                events.push(DefenderEvent::Breach {
                    id: popup.id,
                    damage,
                });
            } else {
                events.push(DefenderEvent::Expired { id: popup.id });
            }
        }
    }

    fn spawn(&mut self, rng: &mut Pcg32, events: &mut Vec<DefenderEvent>) {
        if self.spawn_in_ms > 0.0 || self.time_left <= 0.0 || self.depleted() {
            return;
        }
        let free = self.free_slots();
        if free.is_empty() {
            // Try again next frame
            return;
        }

        let slot = free[rng.random_range(0..free.len())];
        let brand = rng.random_range(0..BRANDS.len());
        let threat = if rng.random_bool(self.tuning.scam_chance.clamp(0.0, 1.0)) {
            if rng.random_bool(self.tuning.mimic_share.clamp(0.0, 1.0)) {
                Threat::Mimic
            } else {
                Threat::Obvious
            }
        } else {
            Threat::Safe
        };

        let id = self.next_id;
        self.next_id += 1;
        let lifetime_ms = self.lifetime_ms();
        self.popups.push(Popup {
            id,
            slot,
            brand,
            threat,
            timer_ms: lifetime_ms,
            lifetime_ms,
        });
        self.spawn_in_ms = self.spawn_delay_ms();
        events.push(DefenderEvent::Spawned { id, slot, threat });
    }
}

impl MiniGame for PrivacyDefender {
    type Action = DefenderAction;
    type Event = DefenderEvent;
    type Outcome = DefenderReport;

    const NAME: &'static str = "Privacy Defender";
    const FAILURE_POLICY: FailurePolicy = FailurePolicy::EndRun;

    fn step(&mut self, dt: f32, rng: &mut Pcg32, events: &mut Vec<DefenderEvent>) {
        self.advance(dt * 1000.0);
        self.resolve_expired(events);
        self.spawn(rng, events);
    }

    fn act(&mut self, action: DefenderAction, _rng: &mut Pcg32, events: &mut Vec<DefenderEvent>) -> bool {
        let DefenderAction::Tap { slot } = action;
        let Some(index) = self.popups.iter().position(|p| p.slot == slot) else {
            return false;
        };
        let popup = self.popups.remove(index);

        if popup.threat.is_scam() {
            self.score += self.tuning.block_score;
            events.push(DefenderEvent::Blocked { id: popup.id });
        } else {
            let damage = self.tuning.mistake_damage;
            self.firewall = self.firewall_bounds().apply(self.firewall, -damage);
            self.mistakes += 1;
            events.push(DefenderEvent::Mistake {
                id: popup.id,
                damage,
            });
        }
        true
    }

    fn time_left(&self) -> f32 {
        self.time_left
    }

    fn resource(&self) -> f32 {
        self.firewall
    }

    fn bounds(&self) -> Bounds {
        self.firewall_bounds()
    }

    fn depleted(&self) -> bool {
        self.firewall <= 0.0
    }

    fn outcome(&self) -> DefenderReport {
        DefenderReport {
            score: self.score,
            firewall: self.firewall,
            scams_blocked: self.score / self.tuning.block_score.max(1),
            breaches: self.breaches,
            mistakes: self.mistakes,
        }
    }

    fn cue(event: &DefenderEvent) -> Option<Cue> {
        match event {
            DefenderEvent::Blocked { .. } => Some(Cue::new(CueKind::Banner, "BLOCKED!", 800.0)),
            DefenderEvent::Mistake { .. } => Some(Cue::new(CueKind::Banner, "Mistake!", 800.0)),
            DefenderEvent::Breach { .. } => Some(Cue::new(CueKind::Flash, "breach", 800.0)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{RunStatus, Simulation};
    use proptest::prelude::*;

    fn popup(id: u32, slot: usize, threat: Threat, timer_ms: f32) -> Popup {
        Popup {
            id,
            slot,
            brand: 0,
            threat,
            timer_ms,
            lifetime_ms: 2200.0,
        }
    }

    /// A game whose next spawn is far away, so tests control the grid
    fn quiet_game() -> PrivacyDefender {
        let mut game = PrivacyDefender::new(PrivacyDefenderTuning::default());
        game.spawn_in_ms = 1.0e9;
        game
    }

    #[test]
    fn test_first_spawn_on_first_frame() {
        let mut sim = Simulation::new(PrivacyDefender::new(PrivacyDefenderTuning::default()), 4);
        sim.tick(0.016);
        assert_eq!(sim.game().popups.len(), 1);
        assert!(matches!(sim.events()[0], DefenderEvent::Spawned { .. }));
        // Delay at difficulty ~1 is 1300ms
        assert!(sim.game().spawn_in_ms > 1290.0);
    }

    #[test]
    fn test_difficulty_curve() {
        let mut game = PrivacyDefender::new(PrivacyDefenderTuning::default());
        assert_eq!(game.difficulty(), 1.0);
        assert_eq!(game.lifetime_ms(), 2200.0);
        assert_eq!(game.spawn_delay_ms(), 1300.0);

        game.time_left = 0.0;
        assert_eq!(game.difficulty(), 5.0);
        assert_eq!(game.lifetime_ms(), 1200.0);
        assert_eq!(game.spawn_delay_ms(), 600.0);
    }

    #[test]
    fn test_tap_scam_scores() {
        let mut game = quiet_game();
        game.popups.push(popup(0, 4, Threat::Mimic, 1000.0));
        let mut sim = Simulation::new(game, 1);
        assert!(sim.act(DefenderAction::Tap { slot: 4 }));
        assert_eq!(sim.game().score, 10);
        assert_eq!(sim.game().firewall, 100.0);
        assert!(sim.game().popups.is_empty());
    }

    #[test]
    fn test_tap_safe_is_a_mistake() {
        let mut game = quiet_game();
        game.popups.push(popup(0, 2, Threat::Safe, 1000.0));
        let mut sim = Simulation::new(game, 1);
        assert!(sim.act(DefenderAction::Tap { slot: 2 }));
        assert_eq!(sim.game().firewall, 85.0);
        assert_eq!(sim.game().score, 0);
        assert_eq!(sim.game().mistakes, 1);
    }

    #[test]
    fn test_tap_empty_slot() {
        let mut sim = Simulation::new(quiet_game(), 1);
        assert!(!sim.act(DefenderAction::Tap { slot: 0 }));
        assert!(!sim.act(DefenderAction::Tap { slot: 42 }));
    }

    #[test]
    fn test_expiry() {
        let mut game = quiet_game();
        game.popups.push(popup(0, 0, Threat::Obvious, 100.0));
        game.popups.push(popup(1, 1, Threat::Safe, 100.0));
        game.popups.push(popup(2, 2, Threat::Mimic, 5000.0));
        let mut sim = Simulation::new(game, 1);
        sim.tick(0.2);

        assert_eq!(sim.game().firewall, 90.0);
        assert_eq!(sim.game().popups.len(), 1);
        assert_eq!(sim.game().popups[0].id, 2);
        assert!(sim.events().contains(&DefenderEvent::Breach { id: 0, damage: 10.0 }));
        assert!(sim.events().contains(&DefenderEvent::Expired { id: 1 }));
    }

    #[test]
    fn test_full_grid_skips_spawn() {
        let mut game = PrivacyDefender::new(PrivacyDefenderTuning::default());
        for slot in 0..9 {
            game.popups.push(popup(slot as u32, slot, Threat::Safe, 5000.0));
        }
        let mut sim = Simulation::new(game, 1);
        sim.tick(0.016);
        assert_eq!(sim.game().popups.len(), 9);
        assert!(sim.game().spawn_in_ms <= 0.0);

        // A slot frees up and the overdue spawn lands on the next frame
        sim.act(DefenderAction::Tap { slot: 3 });
        sim.tick(0.016);
        assert_eq!(sim.game().popups.len(), 9);
        assert!(sim.game().popup_at(3).is_some_and(|p| p.timer_ms > 2000.0));
    }

    #[test]
    fn test_firewall_breach_fails_run() {
        let mut game = quiet_game();
        game.firewall = 10.0;
        game.popups.push(popup(0, 0, Threat::Mimic, 50.0));
        let mut sim = Simulation::new(game, 1);
        sim.tick(0.1);

        assert_eq!(sim.status(), RunStatus::Failed);
        let result = sim.result().unwrap();
        assert!(!result.outcome.passed());
        assert_eq!(result.outcome.firewall, 0.0);
    }

    #[test]
    fn test_report() {
        let mut game = quiet_game();
        game.score = 70;
        game.firewall = 40.0;
        game.time_left = 0.01;
        let mut sim = Simulation::new(game, 1);
        sim.tick(0.1);

        let result = sim.result().unwrap();
        assert_eq!(result.status, RunStatus::Completed);
        assert_eq!(result.outcome.scams_blocked, 7);
        assert!(result.outcome.passed());
    }

    #[test]
    fn test_labels() {
        let mut p = popup(0, 0, Threat::Safe, 1.0);
        p.brand = 3;
        assert_eq!(p.label(), "Apple");
        p.threat = Threat::Mimic;
        assert_eq!(p.label(), "AppIe");
        p.threat = Threat::Obvious;
        assert_eq!(p.label(), "URGENT!");
    }

    fn play(seed: u64, frames: &[f32]) -> (Vec<DefenderEvent>, f32, u32) {
        let mut sim = Simulation::new(PrivacyDefender::new(PrivacyDefenderTuning::default()), seed);
        for (i, dt) in frames.iter().enumerate() {
            sim.tick(*dt);
            if i % 7 == 0 {
                let scam = sim.game().popups.iter().find(|p| p.threat.is_scam()).map(|p| p.slot);
                if let Some(slot) = scam {
                    sim.act(DefenderAction::Tap { slot });
                }
            }
        }
        (sim.events().to_vec(), sim.game().firewall, sim.game().score)
    }

    proptest! {
        #[test]
        fn prop_same_seed_same_run(
            seed in any::<u64>(),
            frames in proptest::collection::vec(0.0f32..0.1, 1..300),
        ) {
            let a = play(seed, &frames);
            let b = play(seed, &frames);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_firewall_in_range(
            seed in any::<u64>(),
            frames in proptest::collection::vec(0.0f32..0.5, 1..300),
        ) {
            let mut sim = Simulation::new(PrivacyDefender::new(PrivacyDefenderTuning::default()), seed);
            for dt in frames {
                sim.tick(dt);
                prop_assert!((0.0..=100.0).contains(&sim.game().firewall));
                prop_assert!(sim.game().popups.len() <= 9);
            }
        }
    }
}
