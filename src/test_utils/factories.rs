//! Test data factories.
//!
//! Each factory creates a complete, valid object with sensible defaults.
//! Use the closure parameter to override specific fields as needed.

use chrono::NaiveDate;

use crate::domain::entities::{
    campaign::Campaign,
    customer::Customer,
    plan::Plan,
    subscription::{SubscriptionRecord, SubscriptionStatus},
};

/// Shorthand for a calendar date in fixtures.
pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

/// Create a test plan priced at $10.00.
pub fn create_test_plan(id: i64, overrides: impl FnOnce(&mut Plan)) -> Plan {
    let mut plan = Plan {
        id,
        name: format!("Plan {id}"),
        price_cents: 1000,
        features: None,
    };
    overrides(&mut plan);
    plan
}

/// Create a test customer registered on 2024-01-01 with no campaign.
pub fn create_test_customer(id: i64, overrides: impl FnOnce(&mut Customer)) -> Customer {
    let mut customer = Customer {
        id,
        name: format!("Customer {id}"),
        email: Some(format!("customer{id}@example.com")),
        registration_date: day(2024, 1, 1),
        campaign_id: None,
    };
    overrides(&mut customer);
    customer
}

/// Create a test campaign running through January 2024.
pub fn create_test_campaign(id: i64, overrides: impl FnOnce(&mut Campaign)) -> Campaign {
    let mut campaign = Campaign {
        id,
        name: format!("Campaign {id}"),
        start_date: day(2024, 1, 1),
        end_date: Some(day(2024, 1, 31)),
        budget_cents: 100_000,
        channel: "Email".to_string(),
    };
    overrides(&mut campaign);
    campaign
}

/// Create an open-ended active subscription record.
pub fn create_test_subscription(
    id: i64,
    customer_id: i64,
    plan_id: i64,
    start_date: NaiveDate,
    overrides: impl FnOnce(&mut SubscriptionRecord),
) -> SubscriptionRecord {
    let mut record = SubscriptionRecord {
        id,
        customer_id,
        plan_id,
        start_date,
        end_date: None,
        status: SubscriptionStatus::Active,
        prev_plan_id: None,
    };
    overrides(&mut record);
    record
}
