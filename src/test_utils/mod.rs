//! Test utilities.
//!
//! This module provides:
//! - Test data factories for creating valid ledger fixtures
//! - In-memory repository and cache implementations for mocking storage
//! - A builder for `AppState` backed by those mocks

mod app_state_builder;
mod factories;
mod ledger_mocks;

pub use app_state_builder::*;
pub use factories::*;
pub use ledger_mocks::*;
