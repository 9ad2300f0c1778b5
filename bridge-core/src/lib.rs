//! XBridge Core
//!
//! Shared domain model for the cross-chain transfer SDK: chain and token
//! identities, transfer parameter records, fixed-point amount conversions,
//! and the declarative chain/fee config tables every adapter resolves
//! against.
//!
//! # Invariants
//!
//! - A `TokenBalance` always carries the token's configured decimals as its
//!   `Decimal` scale
//! - Raw/decimal conversions never round silently; precision loss is an error
//! - Config lookups fail fast, never inside an asynchronous pipeline

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod amount;
pub mod chains;
pub mod error;
pub mod fees;
pub mod types;

// Re-exports
pub use chains::{Chain, ChainTable};
pub use error::{Error, Result};
pub use fees::{FeeTable, TokenFeeConfig};
pub use types::*;
