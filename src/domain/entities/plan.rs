use serde::{Deserialize, Serialize};

/// A subscription plan. Prices are immutable once a subscription references the plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: i64,
    pub name: String,
    pub price_cents: i64,
    pub features: Option<String>,
}

/// Converts a decimal dollar amount (as stored by the ledger database) to cents.
///
/// Uses `.round()` (half away from zero), so representation error such as
/// `19.99 * 100 = 1998.9999...` lands on the intended cent.
pub fn dollars_to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}
