use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{customer::Customer, date_range::DateRange};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    /// `None` while the campaign is still running.
    pub end_date: Option<NaiveDate>,
    pub budget_cents: i64,
    pub channel: String,
}

impl Campaign {
    /// Whether the campaign window `[start_date, end_date]` intersects the range.
    pub fn overlaps(&self, range: &DateRange) -> bool {
        self.start_date <= range.end() && self.end_date.is_none_or(|end| end >= range.start())
    }

    /// Whether `day` falls inside the campaign window (both ends inclusive).
    pub fn window_contains(&self, day: NaiveDate) -> bool {
        self.start_date <= day && self.end_date.is_none_or(|end| day <= end)
    }

    /// A customer counts as acquired when tagged with this campaign and
    /// registered while it was running.
    pub fn acquired(&self, customer: &Customer) -> bool {
        customer.campaign_id == Some(self.id) && self.window_contains(customer.registration_date)
    }
}
