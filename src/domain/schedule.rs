//! Buy schedules, investment ledgers and their combination.
//!
//! Both are sparse maps keyed by date; an absent date reads as zero.
//! Combining two plans is an outer join on dates with values added.

use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Shares purchased per date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuySchedule {
    shares: BTreeMap<NaiveDate, f64>,
}

impl BuySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, date: NaiveDate, shares: f64) {
        *self.shares.entry(date).or_insert(0.0) += shares;
    }

    pub fn get(&self, date: NaiveDate) -> f64 {
        self.shares.get(&date).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.shares.contains_key(&date)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.shares.iter().map(|(&d, &s)| (d, s))
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.shares.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn total_shares(&self) -> f64 {
        self.shares.values().sum()
    }

    pub fn combine(&self, other: &BuySchedule) -> BuySchedule {
        BuySchedule {
            shares: outer_join_add(&self.shares, &other.shares),
        }
    }
}

/// Cash invested per date, aligned with a [`BuySchedule`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    invested: BTreeMap<NaiveDate, f64>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, date: NaiveDate, amount: f64) {
        *self.invested.entry(date).or_insert(0.0) += amount;
    }

    pub fn get(&self, date: NaiveDate) -> f64 {
        self.invested.get(&date).copied().unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.invested.iter().map(|(&d, &a)| (d, a))
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.invested.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.invested.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invested.is_empty()
    }

    pub fn total_invested(&self) -> f64 {
        self.invested.values().sum()
    }

    pub fn combine(&self, other: &Ledger) -> Ledger {
        Ledger {
            invested: outer_join_add(&self.invested, &other.invested),
        }
    }
}

/// A buy schedule together with the cash spent on it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuyPlan {
    pub schedule: BuySchedule,
    pub ledger: Ledger,
}

impl BuyPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a purchase of `amount` at `price`.
    pub fn buy(&mut self, date: NaiveDate, amount: f64, price: f64) {
        self.schedule.record(date, amount / price);
        self.ledger.record(date, amount);
    }

    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty()
    }
}

pub fn combine(a: &BuyPlan, b: &BuyPlan) -> BuyPlan {
    BuyPlan {
        schedule: a.schedule.combine(&b.schedule),
        ledger: a.ledger.combine(&b.ledger),
    }
}

fn outer_join_add(
    left: &BTreeMap<NaiveDate, f64>,
    right: &BTreeMap<NaiveDate, f64>,
) -> BTreeMap<NaiveDate, f64> {
    let mut joined = left.clone();
    for (&date, &value) in right {
        *joined.entry(date).or_insert(0.0) += value;
    }
    joined
}
