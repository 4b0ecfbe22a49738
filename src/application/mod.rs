pub mod analytics;
pub mod app_error;
pub mod ports;
pub mod use_cases;
