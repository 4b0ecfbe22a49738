use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ledger::{Ledger, LedgerEntry};
use crate::domain::entities::{campaign::Campaign, customer::Customer, date_range::DateRange};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignSummary {
    pub campaign_id: i64,
    pub campaign: String,
    pub channel: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub budget_cents: i64,
    pub acquired_count: i64,
    /// Monthly price of the acquired customers' opening subscriptions.
    pub initial_mrr_cents: i64,
    /// Budget per acquired customer; 0 when nobody was acquired.
    pub cac_cents: i64,
}

/// Acquisition and CAC figures for every campaign overlapping `range`,
/// ordered by campaign start date.
///
/// `ledger` must hold the subscriptions of the campaigns' customers. Only rows
/// with no stored previous plan that started on or after the campaign start
/// count toward initial MRR.
pub fn campaign_summary(
    campaigns: &[Campaign],
    customers: &[Customer],
    ledger: &Ledger,
    range: &DateRange,
) -> Vec<CampaignSummary> {
    let mut by_customer: HashMap<i64, Vec<&LedgerEntry>> = HashMap::new();
    for entry in ledger.entries() {
        by_customer
            .entry(entry.record.customer_id)
            .or_default()
            .push(entry);
    }

    let mut overlapping: Vec<&Campaign> = campaigns.iter().filter(|c| c.overlaps(range)).collect();
    overlapping.sort_by_key(|c| (c.start_date, c.id));

    overlapping
        .into_iter()
        .map(|campaign| {
            let acquired: HashSet<i64> = customers
                .iter()
                .filter(|c| campaign.acquired(c))
                .map(|c| c.id)
                .collect();

            let initial_mrr_cents = acquired
                .iter()
                .filter_map(|id| by_customer.get(id))
                .flatten()
                .filter(|e| opens_after(e, campaign.start_date))
                .map(|e| e.price_cents)
                .sum();

            let acquired_count = acquired.len() as i64;

            CampaignSummary {
                campaign_id: campaign.id,
                campaign: campaign.name.clone(),
                channel: campaign.channel.clone(),
                start_date: campaign.start_date,
                end_date: campaign.end_date,
                budget_cents: campaign.budget_cents,
                acquired_count,
                initial_mrr_cents,
                cac_cents: cac_cents(campaign.budget_cents, acquired_count),
            }
        })
        .collect()
}

fn opens_after(entry: &LedgerEntry, campaign_start: NaiveDate) -> bool {
    let record = &entry.record;
    record.prev_plan_id.is_none()
        && record.start_date >= campaign_start
        && record.end_date.is_none_or(|end| end >= campaign_start)
}

/// Budget divided by acquisitions, rounded half up to the cent.
pub fn cac_cents(budget_cents: i64, acquired_count: i64) -> i64 {
    if acquired_count <= 0 {
        return 0;
    }
    (budget_cents + acquired_count / 2) / acquired_count
}
