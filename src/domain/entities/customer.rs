use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub registration_date: NaiveDate,
    /// Campaign that brought this customer in, if any.
    pub campaign_id: Option<i64>,
}
