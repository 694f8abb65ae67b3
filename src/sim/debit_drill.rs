//! Debit Card Drill
//!
//! Bills fall toward the wallet and are paid when they land. Going below
//! zero never ends the run; each frame that leaves the balance negative
//! after a payment charges one overdraft fee. Only the clock ends the drill.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::cues::{Cue, CueKind};
use super::{Bounds, FailurePolicy, MiniGame};
use crate::tuning::DebitDrillTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BillKind {
    Phone,
    Subscription,
    Power,
    Wifi,
}

impl BillKind {
    pub const ALL: [BillKind; 4] = [
        BillKind::Phone,
        BillKind::Subscription,
        BillKind::Power,
        BillKind::Wifi,
    ];

    pub fn amount(&self) -> f32 {
        match self {
            BillKind::Phone => 15.0,
            BillKind::Subscription => 12.0,
            BillKind::Power => 25.0,
            BillKind::Wifi => 20.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BillKind::Phone => "Phone",
            BillKind::Subscription => "Subscription",
            BillKind::Power => "Power",
            BillKind::Wifi => "Wi-Fi",
        }
    }
}

/// A falling bill
#[derive(Debug, Clone, Serialize)]
pub struct Bill {
    pub id: u32,
    pub kind: BillKind,
    pub amount: f32,
    /// Position in the 0..100 play field (y grows downward)
    pub pos: Vec2,
    /// Field units per reference frame
    pub speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LedgerKind {
    Bill,
    Fee,
}

/// One line on the drill's statement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerEntry {
    pub kind: LedgerKind,
    pub label: &'static str,
    pub amount: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrillAction {
    /// Request a pay deposit; it clears after a delay
    GetPaid,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrillEvent {
    BillSpawned { id: u32, kind: BillKind },
    BillPaid { id: u32, kind: BillKind, amount: f32 },
    OverdraftFee { amount: f32 },
    DepositQueued,
    DepositCleared { amount: f32 },
}

/// Statement handed to the result phase
#[derive(Debug, Clone, Serialize)]
pub struct DrillResult {
    pub balance: f32,
    pub fees_incurred: f32,
    pub total_income: f32,
    pub history: Vec<LedgerEntry>,
}

impl DrillResult {
    /// No overdraft fees charged
    pub fn perfect_run(&self) -> bool {
        self.fees_incurred == 0.0
    }

    pub fn fee_entries(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.history.iter().filter(|e| e.kind == LedgerKind::Fee)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DebitDrill {
    #[serde(skip)]
    pub tuning: DebitDrillTuning,
    pub balance: f32,
    pub fees_incurred: f32,
    pub total_income: f32,
    pub time_left: f32,
    /// Countdown to the next bill
    pub next_bill_ms: f32,
    pub bills: Vec<Bill>,
    pub history: Vec<LedgerEntry>,
    /// Countdown on an in-flight deposit
    pub deposit_ms: Option<f32>,
    next_id: u32,
}

impl DebitDrill {
    pub fn new(tuning: DebitDrillTuning) -> Self {
        Self {
            balance: tuning.starting_balance,
            fees_incurred: 0.0,
            total_income: 0.0,
            time_left: tuning.duration_secs,
            next_bill_ms: tuning.first_bill_ms,
            bills: Vec::new(),
            history: Vec::new(),
            deposit_ms: None,
            next_id: 1,
            tuning,
        }
    }

    /// A deposit is on its way; further requests are ignored
    pub fn is_depositing(&self) -> bool {
        self.deposit_ms.is_some()
    }

    fn bounds_for(tuning: &DebitDrillTuning) -> Bounds {
        Bounds::at_most(tuning.max_balance)
    }

    fn spawn_bill(&mut self, rng: &mut Pcg32) -> Bill {
        let t = &self.tuning;
        let kind = BillKind::ALL[rng.random_range(0..BillKind::ALL.len())];
        let x = t.spawn_x_min + rng.random::<f32>() * t.spawn_x_span;
        let speed = t.speed_min + rng.random::<f32>() * t.speed_jitter;
        let id = self.next_id;
        self.next_id += 1;
        Bill {
            id,
            kind,
            amount: kind.amount(),
            pos: Vec2::new(x, t.spawn_y),
            speed,
        }
    }

    fn pay_landed_bills(&mut self, events: &mut Vec<DrillEvent>) {
        let landing_y = self.tuning.landing_y;
        let mut charged = 0.0;
        let mut paid = Vec::new();
        self.bills.retain(|bill| {
            if bill.pos.y > landing_y {
                charged += bill.amount;
                paid.push(bill.clone());
                false
            } else {
                true
            }
        });
        if paid.is_empty() {
            return;
        }

        let bounds = Self::bounds_for(&self.tuning);
        self.balance = bounds.apply(self.balance, -charged);
        for bill in &paid {
            self.history.push(LedgerEntry {
                kind: LedgerKind::Bill,
                label: bill.kind.label(),
                amount: bill.amount,
            });
            events.push(DrillEvent::BillPaid {
                id: bill.id,
                kind: bill.kind,
                amount: bill.amount,
            });
        }

        if self.balance < 0.0 {
            let fee = self.tuning.overdraft_fee;
            self.balance = bounds.apply(self.balance, -fee);
            self.fees_incurred += fee;
            self.history.push(LedgerEntry {
                kind: LedgerKind::Fee,
                label: "Overdraft fee",
                amount: fee,
            });
            events.push(DrillEvent::OverdraftFee { amount: fee });
            log::debug!("Overdraft fee charged, balance {:.2}", self.balance);
        }
    }
}

impl MiniGame for DebitDrill {
    type Action = DrillAction;
    type Event = DrillEvent;
    type Outcome = DrillResult;

    const NAME: &'static str = "Debit Card Drill";
    const FAILURE_POLICY: FailurePolicy = FailurePolicy::Penalize;

    fn step(&mut self, dt: f32, rng: &mut Pcg32, events: &mut Vec<DrillEvent>) {
        let ms = dt * 1000.0;

        // Advance
        self.time_left = (self.time_left - dt).max(0.0);
        let frames = ms / self.tuning.reference_frame_ms;
        for bill in &mut self.bills {
            bill.pos.y += bill.speed * frames;
        }
        if let Some(left) = self.deposit_ms.as_mut() {
            *left -= ms;
        }

        // Resolve: landed bills first, then a matured deposit
        self.pay_landed_bills(events);
        if self.deposit_ms.is_some_and(|left| left <= 0.0) {
            self.deposit_ms = None;
            let amount = self.tuning.deposit_amount;
            self.balance = Self::bounds_for(&self.tuning).apply(self.balance, amount);
            self.total_income += amount;
            events.push(DrillEvent::DepositCleared { amount });
        }

        // Spawn
        self.next_bill_ms -= ms;
        if self.next_bill_ms <= 0.0 {
            let bill = self.spawn_bill(rng);
            log::debug!("Bill {} spawned: {:?} ${}", bill.id, bill.kind, bill.amount);
            events.push(DrillEvent::BillSpawned {
                id: bill.id,
                kind: bill.kind,
            });
            self.bills.push(bill);
            self.next_bill_ms = self.tuning.bill_interval_min_ms
                + rng.random::<f32>() * self.tuning.bill_interval_jitter_ms;
        }
    }

    fn act(&mut self, action: DrillAction, _rng: &mut Pcg32, events: &mut Vec<DrillEvent>) -> bool {
        match action {
            DrillAction::GetPaid => {
                if self.is_depositing() {
                    return false;
                }
                self.deposit_ms = Some(self.tuning.deposit_delay_ms);
                events.push(DrillEvent::DepositQueued);
                true
            }
        }
    }

    fn time_left(&self) -> f32 {
        self.time_left
    }

    fn resource(&self) -> f32 {
        self.balance
    }

    fn bounds(&self) -> Bounds {
        Self::bounds_for(&self.tuning)
    }

    fn depleted(&self) -> bool {
        self.balance < 0.0
    }

    fn outcome(&self) -> DrillResult {
        DrillResult {
            balance: self.balance,
            fees_incurred: self.fees_incurred,
            total_income: self.total_income,
            history: self.history.clone(),
        }
    }

    fn cue(event: &DrillEvent) -> Option<Cue> {
        match event {
            DrillEvent::OverdraftFee { .. } => Some(Cue::new(CueKind::Flash, "fee", 500.0)),
            DrillEvent::BillPaid { .. } => Some(Cue::new(CueKind::Pulse, "bill", 300.0)),
            DrillEvent::DepositCleared { .. } => Some(Cue::new(CueKind::Pulse, "deposit", 200.0)),
            _ => None,
        }
    }
}
