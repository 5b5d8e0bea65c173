//! fintrack - Terminal-based personal finance tracker
//!
//! This library provides the core of the fintrack application: recording
//! income and expenses, setting per-category spending budgets, reviewing a
//! merged transaction history and estimating tax payable.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (income, expenses, budgets, users)
//! - `storage`: JSON file storage layer and change notifications
//! - `services`: Business logic layer
//! - `reports`: Dashboard aggregates and transaction history
//! - `export`: CSV, JSON and YAML export
//! - `display`: Terminal formatting
//! - `audit`: Audit logging system
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use fintrack::config::paths::FintrackPaths;
//! use fintrack::services::IncomeService;
//! use fintrack::storage::Storage;
//!
//! let storage = Storage::open(FintrackPaths::new()?)?;
//! let incomes = IncomeService::new(&storage).list()?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{FintrackError, FintrackResult};
