pub mod ledger;
pub mod report_cache;
