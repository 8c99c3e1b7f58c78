//! FinFree - personal finance tracking from the terminal
//!
//! This library provides the core functionality for the FinFree CLI:
//! expenses, income (including recurring income), monthly budgets with
//! insights, savings goals, a daily petty-cash allowance and the conscious
//! spending plan.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Data directory and user settings
//! - `error`: Custom error types
//! - `models`: Core records (expenses, income, budgets, goals, petty cash)
//! - `state`: The in-memory ledger holding every record
//! - `storage`: JSON persistence for the ledger
//! - `audit`: Audit log of every change
//! - `services`: Validated mutations over the ledger
//! - `reports`: Read-only computations (budget comparison, insights, plans)
//! - `display`: Terminal formatting
//! - `cli`: clap command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use finfree::config::paths::FinFreePaths;
//! use finfree::storage::Storage;
//!
//! let storage = Storage::new(FinFreePaths::new()?)?;
//! let ledger = storage.load_ledger()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod state;
pub mod storage;

pub use error::{FinFreeError, FinFreeResult};
