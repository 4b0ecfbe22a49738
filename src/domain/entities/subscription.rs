use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    Canceled,
    Upgraded,
    Downgraded,
    /// Any status text the ledger carries that is not one of the above.
    /// Still counts toward MRR coverage but never matches a movement, census or event predicate.
    Unrecognized,
}

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Canceled => "canceled",
            SubscriptionStatus::Upgraded => "upgraded",
            SubscriptionStatus::Downgraded => "downgraded",
            SubscriptionStatus::Unrecognized => "unrecognized",
        }
    }

    /// Parse the status column. Never fails; unknown values map to `Unrecognized`.
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "active" => SubscriptionStatus::Active,
            "canceled" | "cancelled" => SubscriptionStatus::Canceled,
            "upgraded" => SubscriptionStatus::Upgraded,
            "downgraded" => SubscriptionStatus::Downgraded,
            _ => SubscriptionStatus::Unrecognized,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, SubscriptionStatus::Active)
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, SubscriptionStatus::Canceled)
    }
}

impl std::fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the subscription ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionRecord {
    pub id: i64,
    pub customer_id: i64,
    pub plan_id: i64,
    pub start_date: NaiveDate,
    /// Exclusive end of coverage; `None` means open-ended.
    pub end_date: Option<NaiveDate>,
    pub status: SubscriptionStatus,
    /// Plan being replaced, set only on plan-change rows.
    pub prev_plan_id: Option<i64>,
}

impl SubscriptionRecord {
    /// Coverage is the half-open interval `[start_date, end_date)`.
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.start_date <= day && self.end_date.is_none_or(|end| day < end)
    }
}
