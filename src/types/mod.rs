//! Type definitions for the fraud scoring service

pub mod transaction;

pub use transaction::{FraudDecision, TransactionInput};
