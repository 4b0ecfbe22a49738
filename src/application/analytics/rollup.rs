use std::collections::{BTreeMap, HashMap};

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{
    events::{LifecycleEvent, LifecycleEventKind},
    movements::DailyRevenue,
};

/// Movement components summed over one calendar month, in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyMovement {
    /// `YYYY-MM`
    pub month: String,
    pub new_mrr_cents: i64,
    pub churned_mrr_cents: i64,
    pub expansion_mrr_cents: i64,
    pub contraction_mrr_cents: i64,
    pub net_new_mrr_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventKindCount {
    pub kind: LifecycleEventKind,
    pub label: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyEventCount {
    pub month: String,
    pub kind: LifecycleEventKind,
    pub count: i64,
}

fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Sums daily movements per calendar month, ascending.
pub fn monthly_movements(rows: &[DailyRevenue]) -> Vec<MonthlyMovement> {
    let mut months: BTreeMap<String, MonthlyMovement> = BTreeMap::new();

    for row in rows {
        let key = month_key(row.date);
        let m = months.entry(key.clone()).or_insert_with(|| MonthlyMovement {
            month: key,
            new_mrr_cents: 0,
            churned_mrr_cents: 0,
            expansion_mrr_cents: 0,
            contraction_mrr_cents: 0,
            net_new_mrr_cents: 0,
        });
        m.new_mrr_cents += row.new_mrr_cents;
        m.churned_mrr_cents += row.churned_mrr_cents;
        m.expansion_mrr_cents += row.expansion_mrr_cents;
        m.contraction_mrr_cents += row.contraction_mrr_cents;
        m.net_new_mrr_cents += row.net_movement_cents();
    }

    months.into_values().collect()
}

/// Number of events per kind, most frequent first. Kinds with no events are omitted.
pub fn event_counts(events: &[LifecycleEvent]) -> Vec<EventKindCount> {
    let mut counts: HashMap<LifecycleEventKind, i64> = HashMap::new();
    for event in events {
        *counts.entry(event.kind).or_default() += 1;
    }

    let mut out: Vec<EventKindCount> = counts
        .into_iter()
        .map(|(kind, count)| EventKindCount {
            kind,
            label: kind.label().to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then(a.kind.cmp(&b.kind)));
    out
}

/// Number of events per (month, kind), ascending by month then kind.
pub fn monthly_event_counts(events: &[LifecycleEvent]) -> Vec<MonthlyEventCount> {
    let mut counts: BTreeMap<(String, LifecycleEventKind), i64> = BTreeMap::new();
    for event in events {
        *counts.entry((month_key(event.date), event.kind)).or_default() += 1;
    }

    counts
        .into_iter()
        .map(|((month, kind), count)| MonthlyEventCount { month, kind, count })
        .collect()
}
