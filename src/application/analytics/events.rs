use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::ledger::{Ledger, LedgerEntry};
use crate::domain::entities::{
    customer::Customer, date_range::DateRange, subscription::SubscriptionStatus,
};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum LifecycleEventKind {
    NewSubscription,
    Cancellation,
    Upgrade,
    Downgrade,
}

impl LifecycleEventKind {
    /// Human readable label for dashboards.
    pub fn label(&self) -> &'static str {
        match self {
            LifecycleEventKind::NewSubscription => "New Subscription",
            LifecycleEventKind::Cancellation => "Cancellation",
            LifecycleEventKind::Upgrade => "Upgrade",
            LifecycleEventKind::Downgrade => "Downgrade",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleEvent {
    pub date: NaiveDate,
    pub kind: LifecycleEventKind,
    pub description: String,
    /// Signed change in MRR caused by the event, in cents.
    pub mrr_delta_cents: i64,
    pub customer_id: i64,
    pub subscription_id: i64,
}

/// Discrete lifecycle events whose date falls inside `range`, oldest first.
///
/// Ties on the same day are broken by kind, then by subscription id. Rows whose
/// customer is missing from `customers` cannot be described and are skipped.
pub fn lifecycle_events(
    ledger: &Ledger,
    customers: &HashMap<i64, Customer>,
    range: &DateRange,
) -> Vec<LifecycleEvent> {
    let mut events: Vec<LifecycleEvent> = ledger
        .entries()
        .iter()
        .filter_map(|entry| {
            let (date, kind, delta) = classify(entry, range)?;
            let Some(customer) = customers.get(&entry.record.customer_id) else {
                tracing::trace!(
                    subscription_id = entry.record.id,
                    customer_id = entry.record.customer_id,
                    "Event row references unknown customer, skipping"
                );
                return None;
            };
            Some(LifecycleEvent {
                date,
                kind,
                description: describe(ledger, entry, kind, &customer.name),
                mrr_delta_cents: delta,
                customer_id: customer.id,
                subscription_id: entry.record.id,
            })
        })
        .collect();

    events.sort_by_key(|e| (e.date, e.kind, e.subscription_id));
    events
}

/// Active records whose coverage ends inside `range` without a cancellation.
/// These lapse silently and produce no event.
pub fn lapsed_without_cancellation(ledger: &Ledger, range: &DateRange) -> usize {
    ledger
        .records()
        .iter()
        .filter(|r| r.status.is_active() && r.end_date.is_some_and(|end| range.contains(end)))
        .count()
}

fn classify(entry: &LedgerEntry, range: &DateRange) -> Option<(NaiveDate, LifecycleEventKind, i64)> {
    let record = &entry.record;
    let price = entry.price_cents;
    let starts_in_range = range.contains(record.start_date);

    match record.status {
        SubscriptionStatus::Active if starts_in_range && entry.is_chain_head() => Some((
            record.start_date,
            LifecycleEventKind::NewSubscription,
            price,
        )),
        SubscriptionStatus::Canceled => {
            let end = record.end_date.filter(|end| range.contains(*end))?;
            Some((end, LifecycleEventKind::Cancellation, -price))
        }
        SubscriptionStatus::Upgraded if starts_in_range => {
            let diff = price - entry.prior?.price_cents;
            (diff > 0).then_some((record.start_date, LifecycleEventKind::Upgrade, diff))
        }
        SubscriptionStatus::Downgraded if starts_in_range => {
            let diff = price - entry.prior?.price_cents;
            (diff < 0).then_some((record.start_date, LifecycleEventKind::Downgrade, diff))
        }
        _ => None,
    }
}

fn describe(ledger: &Ledger, entry: &LedgerEntry, kind: LifecycleEventKind, customer: &str) -> String {
    let plan_name = |id: i64| {
        ledger
            .plan(id)
            .map_or_else(|| format!("plan #{id}"), |p| p.name.clone())
    };
    let plan = plan_name(entry.record.plan_id);
    let previous = entry.prior.map(|p| plan_name(p.plan_id)).unwrap_or_default();

    match kind {
        LifecycleEventKind::NewSubscription => format!("Customer {customer} started {plan}"),
        LifecycleEventKind::Cancellation => format!("Customer {customer} canceled {plan}"),
        LifecycleEventKind::Upgrade => {
            format!("Customer {customer} upgraded from {previous} to {plan}")
        }
        LifecycleEventKind::Downgrade => {
            format!("Customer {customer} downgraded from {previous} to {plan}")
        }
    }
}
