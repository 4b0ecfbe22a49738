use std::collections::HashMap;

use crate::domain::entities::{
    plan::Plan,
    subscription::{SubscriptionRecord, SubscriptionStatus},
};

/// Plan and price of the record that immediately precedes another in its customer's chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorRecord {
    pub plan_id: i64,
    pub price_cents: i64,
}

/// Revenue movement carried by a plan-change record, as a positive magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    Expansion(i64),
    Contraction(i64),
}

/// A subscription record joined with its plan price and annotated with its predecessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub record: SubscriptionRecord,
    pub price_cents: i64,
    pub prior: Option<PriorRecord>,
}

impl LedgerEntry {
    /// First record of the customer's lifecycle chain.
    pub fn is_chain_head(&self) -> bool {
        self.prior.is_none()
    }

    /// Price change relative to the previous record.
    ///
    /// The record's status must not contradict the direction: an `upgraded` row
    /// never contracts and a `downgraded` row never expands. Rows with an
    /// unrecognized status carry no movement. Continuation rows with any other
    /// known status are classified by price alone.
    pub fn movement(&self) -> Option<Movement> {
        let prior = self.prior?;
        let diff = self.price_cents - prior.price_cents;
        match self.record.status {
            SubscriptionStatus::Unrecognized => None,
            _ if diff == 0 => None,
            SubscriptionStatus::Downgraded if diff > 0 => None,
            SubscriptionStatus::Upgraded if diff < 0 => None,
            _ if diff > 0 => Some(Movement::Expansion(diff)),
            _ => Some(Movement::Contraction(-diff)),
        }
    }
}

/// Snapshot of the subscription ledger ready for day-by-day reconstruction.
///
/// Records are ordered by `(customer_id, start_date, id)`. Rows referencing an
/// unknown plan carry no price; they are kept in [`Ledger::records`] (the census
/// does not need a price) but excluded from [`Ledger::entries`] and from the
/// predecessor lookback.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    plans: HashMap<i64, Plan>,
    records: Vec<SubscriptionRecord>,
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn build(plans: Vec<Plan>, mut records: Vec<SubscriptionRecord>) -> Self {
        let plans: HashMap<i64, Plan> = plans.into_iter().map(|p| (p.id, p)).collect();

        records.sort_by_key(|r| (r.customer_id, r.start_date, r.id));

        let mut entries = Vec::with_capacity(records.len());
        let mut last: Option<(i64, PriorRecord)> = None;

        for record in &records {
            let Some(plan) = plans.get(&record.plan_id) else {
                tracing::trace!(
                    subscription_id = record.id,
                    plan_id = record.plan_id,
                    "Subscription references unknown plan, skipping"
                );
                continue;
            };

            let prior = match last {
                Some((customer_id, prior)) if customer_id == record.customer_id => Some(prior),
                _ => None,
            };

            entries.push(LedgerEntry {
                record: record.clone(),
                price_cents: plan.price_cents,
                prior,
            });

            last = Some((
                record.customer_id,
                PriorRecord {
                    plan_id: plan.id,
                    price_cents: plan.price_cents,
                },
            ));
        }

        Self {
            plans,
            records,
            entries,
        }
    }

    pub fn plan(&self, id: i64) -> Option<&Plan> {
        self.plans.get(&id)
    }

    /// Every ledger row, priced or not.
    pub fn records(&self) -> &[SubscriptionRecord] {
        &self.records
    }

    /// Priced rows with their predecessor annotation.
    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct customers appearing in the ledger, ascending.
    pub fn customer_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.records.iter().map(|r| r.customer_id).collect();
        ids.dedup();
        ids
    }
}
