//! Pure, synchronous reconstruction of revenue state from a ledger snapshot.
//!
//! Everything here is a function of `(Ledger, DateRange)` and never touches storage.

pub mod campaigns;
pub mod census;
pub mod events;
pub mod ledger;
pub mod movements;
pub mod rollup;

pub use campaigns::{CampaignSummary, campaign_summary};
pub use census::{ActiveCount, active_census};
pub use events::{LifecycleEvent, LifecycleEventKind, lapsed_without_cancellation, lifecycle_events};
pub use ledger::Ledger;
pub use movements::{DailyRevenue, daily_revenue};
pub use rollup::{EventKindCount, MonthlyEventCount, MonthlyMovement};
