use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ledger::{Ledger, Movement};
use crate::domain::entities::date_range::DateRange;

/// MRR and its movement components for one calendar day, in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub mrr_cents: i64,
    pub new_mrr_cents: i64,
    pub churned_mrr_cents: i64,
    pub expansion_mrr_cents: i64,
    pub contraction_mrr_cents: i64,
}

impl DailyRevenue {
    pub fn zero(date: NaiveDate) -> Self {
        Self {
            date,
            mrr_cents: 0,
            new_mrr_cents: 0,
            churned_mrr_cents: 0,
            expansion_mrr_cents: 0,
            contraction_mrr_cents: 0,
        }
    }

    /// new + expansion - churned - contraction
    pub fn net_movement_cents(&self) -> i64 {
        self.new_mrr_cents + self.expansion_mrr_cents
            - self.churned_mrr_cents
            - self.contraction_mrr_cents
    }
}

/// Reconstructs one row per day of `range`.
///
/// Each entry adds its price to a per-day delta array where its coverage enters
/// the range and subtracts it where coverage stops; a prefix scan turns the
/// deltas into `mrr`. Movement buckets are keyed directly on start/end dates.
/// Runs in O(entries + days).
pub fn daily_revenue(ledger: &Ledger, range: &DateRange) -> Vec<DailyRevenue> {
    let mut rows: Vec<DailyRevenue> = range.days().map(DailyRevenue::zero).collect();
    let mut mrr_delta = vec![0i64; rows.len()];

    for entry in ledger.entries() {
        let record = &entry.record;
        let price = entry.price_cents;

        let enters = record.start_date.max(range.start());
        let has_coverage = enters <= range.end() && record.end_date.is_none_or(|end| end > enters);
        if has_coverage {
            if let Some(i) = range.index_of(enters) {
                mrr_delta[i] += price;
            }
            if let Some(i) = record.end_date.and_then(|end| range.index_of(end)) {
                mrr_delta[i] -= price;
            }
        }

        if let Some(i) = range.index_of(record.start_date) {
            if entry.is_chain_head() {
                rows[i].new_mrr_cents += price;
            }
            match entry.movement() {
                Some(Movement::Expansion(amount)) => rows[i].expansion_mrr_cents += amount,
                Some(Movement::Contraction(amount)) => rows[i].contraction_mrr_cents += amount,
                None => {}
            }
        }

        if record.status.is_canceled() {
            if let Some(i) = record.end_date.and_then(|end| range.index_of(end)) {
                rows[i].churned_mrr_cents += price;
            }
        }
    }

    let mut running = 0i64;
    for (row, delta) in rows.iter_mut().zip(mrr_delta) {
        running += delta;
        row.mrr_cents = running;
    }

    rows
}
