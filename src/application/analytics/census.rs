use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::entities::{date_range::DateRange, subscription::SubscriptionRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveCount {
    pub date: NaiveDate,
    pub active_count: i64,
}

/// Distinct customers holding an `active` record on each day of `range`.
///
/// Active coverage is clipped to the range as index intervals `[lo, hi)`, merged
/// per customer so overlapping rows count once, then turned into +1/-1 deltas.
pub fn active_census(records: &[SubscriptionRecord], range: &DateRange) -> Vec<ActiveCount> {
    let days = range.num_days() as i64;
    let offset = |day: NaiveDate| (day - range.start()).num_days();

    let mut intervals: Vec<(i64, i64, i64)> = records
        .iter()
        .filter(|r| r.status.is_active())
        .filter_map(|r| {
            let lo = offset(r.start_date).max(0);
            let hi = r.end_date.map_or(days, |end| offset(end).min(days));
            (lo < hi).then_some((r.customer_id, lo, hi))
        })
        .collect();
    intervals.sort_unstable();

    let mut delta = vec![0i64; range.num_days() + 1];
    let mut current: Option<(i64, i64, i64)> = None;

    for (customer_id, lo, hi) in intervals {
        current = match current {
            Some((c, cur_lo, cur_hi)) if c == customer_id && lo <= cur_hi => {
                Some((c, cur_lo, cur_hi.max(hi)))
            }
            Some((_, cur_lo, cur_hi)) => {
                delta[cur_lo as usize] += 1;
                delta[cur_hi as usize] -= 1;
                Some((customer_id, lo, hi))
            }
            None => Some((customer_id, lo, hi)),
        };
    }
    if let Some((_, lo, hi)) = current {
        delta[lo as usize] += 1;
        delta[hi as usize] -= 1;
    }

    let mut running = 0i64;
    range
        .days()
        .zip(delta)
        .map(|(date, d)| {
            running += d;
            ActiveCount {
                date,
                active_count: running,
            }
        })
        .collect()
}
