//! Savings Jar
//!
//! Income trickles in while the tree slowly starves. Cash can feed the tree
//! or buy a treat that hurts it. The run is lost the moment the tree's
//! health reaches zero.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::cues::{Cue, CueKind};
use super::{Bounds, FailurePolicy, MiniGame};
use crate::tuning::SavingsJarTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShopItem {
    Treat,
    Game,
    Fashion,
    Food,
    Music,
}

impl ShopItem {
    pub const ALL: [ShopItem; 5] = [
        ShopItem::Treat,
        ShopItem::Game,
        ShopItem::Fashion,
        ShopItem::Food,
        ShopItem::Music,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JarAction {
    /// Put money in the jar
    Feed,
    /// Spend it on something else
    Spend,
}

#[derive(Debug, Clone, PartialEq)]
pub enum JarEvent {
    Income { amount: f32 },
    Fed { health: f32 },
    Bought { item: ShopItem, health: f32 },
    Withered,
}

/// End-of-run harvest
#[derive(Debug, Clone, Serialize)]
pub struct HarvestResult {
    pub health: f32,
    pub tree_scale: f32,
    pub cash: f32,
    pub total_saved: f32,
    pub total_spent: f32,
    pub inventory: Vec<ShopItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SavingsJar {
    #[serde(skip)]
    pub tuning: SavingsJarTuning,
    pub health: f32,
    pub tree_scale: f32,
    pub cash: f32,
    pub inventory: Vec<ShopItem>,
    /// Whole seconds remaining
    pub time_left: u32,
    pub total_saved: f32,
    pub total_spent: f32,
    /// Fraction of a second carried between frames
    carry: f32,
}

impl SavingsJar {
    pub fn new(tuning: SavingsJarTuning) -> Self {
        Self {
            health: tuning.starting_health,
            tree_scale: tuning.starting_scale,
            cash: 0.0,
            inventory: Vec::new(),
            time_left: tuning.duration_secs,
            total_saved: 0.0,
            total_spent: 0.0,
            carry: 0.0,
            tuning,
        }
    }

    /// Both actions need at least one coin's worth of cash
    pub fn can_afford(&self) -> bool {
        self.cash >= self.tuning.action_cost
    }

    fn health_bounds(&self) -> Bounds {
        Bounds::new(0.0, self.tuning.max_health)
    }

    fn scale_bounds(&self) -> Bounds {
        Bounds::new(self.tuning.min_scale, self.tuning.max_scale)
    }

    /// One whole elapsed second
    fn second(&mut self, events: &mut Vec<JarEvent>) {
        self.time_left -= 1;
        if self.time_left % self.tuning.income_every_secs.max(1) == 0 {
            self.cash += self.tuning.income;
            events.push(JarEvent::Income {
                amount: self.tuning.income,
            });
        }
        self.health = self.health_bounds().apply(self.health, -self.tuning.decay_per_sec);
        if self.health <= 0.0 {
            events.push(JarEvent::Withered);
        }
    }
}

impl MiniGame for SavingsJar {
    type Action = JarAction;
    type Event = JarEvent;
    type Outcome = HarvestResult;

    const NAME: &'static str = "Savings Jar";
    const FAILURE_POLICY: FailurePolicy = FailurePolicy::EndRun;

    fn step(&mut self, dt: f32, _rng: &mut Pcg32, events: &mut Vec<JarEvent>) {
        self.carry += dt;
        // A long frame may cover several seconds; stop at the first terminal one
        while self.carry >= 1.0 && self.time_left > 0 && !self.depleted() {
            self.carry -= 1.0;
            self.second(events);
        }
    }

    fn act(&mut self, action: JarAction, rng: &mut Pcg32, events: &mut Vec<JarEvent>) -> bool {
        if !self.can_afford() {
            return false;
        }
        let cost = self.tuning.action_cost;
        self.cash -= cost;

        match action {
            JarAction::Feed => {
                self.health = self.health_bounds().apply(self.health, self.tuning.feed_heal);
                self.tree_scale = self.scale_bounds().apply(self.tree_scale, self.tuning.feed_growth);
                self.total_saved += cost;
                events.push(JarEvent::Fed {
                    health: self.health,
                });
            }
            JarAction::Spend => {
                let item = ShopItem::ALL[rng.random_range(0..ShopItem::ALL.len())];
                self.inventory.push(item);
                self.health = self.health_bounds().apply(self.health, -self.tuning.spend_damage);
                self.tree_scale = self.scale_bounds().apply(self.tree_scale, -self.tuning.spend_shrink);
                self.total_spent += cost;
                events.push(JarEvent::Bought {
                    item,
                    health: self.health,
                });
                if self.health <= 0.0 {
                    events.push(JarEvent::Withered);
                }
            }
        }
        true
    }

    fn time_left(&self) -> f32 {
        self.time_left as f32
    }

    fn resource(&self) -> f32 {
        self.health
    }

    fn bounds(&self) -> Bounds {
        self.health_bounds()
    }

    fn depleted(&self) -> bool {
        self.health <= 0.0
    }

    fn outcome(&self) -> HarvestResult {
        HarvestResult {
            health: self.health,
            tree_scale: self.tree_scale,
            cash: self.cash,
            total_saved: self.total_saved,
            total_spent: self.total_spent,
            inventory: self.inventory.clone(),
        }
    }

    fn cue(event: &JarEvent) -> Option<Cue> {
        match event {
            JarEvent::Fed { .. } => Some(Cue::new(CueKind::Pulse, "heal", 500.0)),
            JarEvent::Bought { .. } => Some(Cue::new(CueKind::Pulse, "damage", 500.0)),
            _ => None,
        }
    }
}
