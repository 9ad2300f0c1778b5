//! # XBridge Adapters
//!
//! Chain-facing transfer layer with:
//! - Per-chain adapters behind one [`CrossChainAdapter`] trait
//! - Reactive input limits (min from fees, max from spendable balance)
//! - Unsigned transfer assembly for wallet signing
//! - Arrival confirmation by watching the destination balance
//! - Registry with cross-adapter resolution
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │           Adapter Registry (Router Index)           │
//! └────────────┬────────────────────────────────────────┘
//!              │ resolver
//!     ┌────────┼────────────────┐
//!     │        │                │
//! ┌───▼────┐ ┌─▼──────┐ ┌──────▼──────┐
//! │ Relay  │ │ Relay  │ │   Custom    │
//! │Polkadot│ │ Kusama │ │   Adapter   │
//! └───┬────┘ └─┬──────┘ └──────┬──────┘
//!     │        │                │
//!     └────────┼────────────────┘
//!              │ bound client
//! ┌────────────▼─────────────────────────────────────┐
//! │    Limits + Fee Estimate + Balance Confirmation  │
//! └──────────────────────────────────────────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod adapter;
pub mod error;
pub mod monitor;
pub mod registry;
pub mod relay;

pub use adapter::{
    AdapterResolver, AmountStream, BaseAdapter, CrossChainAdapter, FeeEstimateStream,
    InputConfigStream,
};
pub use error::{Error, Result};
pub use monitor::{confirm_balance_change, confirmation_target, StatusStream};
pub use registry::AdapterRegistry;
pub use relay::RelayChainAdapter;

use rust_decimal::Decimal;
use std::time::Duration;

/// Default window for a balance-change confirmation
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_millis(120_000);

/// Default slippage tolerance applied to the confirmation target (1%)
pub const DEFAULT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);
