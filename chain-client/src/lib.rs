//! XBridge Chain Client
//!
//! Transport layer between adapters and chain nodes:
//! - [`ChainClient`]: the handle trait adapters are bound to
//! - [`BoundClient`]: readiness handshake plus push/request normalization
//! - [`MockClient`]: scripted double for tests and demos
//!
//! Adapters consume exactly four capabilities from a handle: a readiness
//! signal, balance subscriptions keyed by `(token, address)`, payment-info
//! queries, and unsigned-call construction.

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

pub mod bound;
pub mod client;
pub mod error;
pub mod mock;

pub use bound::BoundClient;
pub use client::{
    BalanceStream, ChainClient, FeeRequest, FeeStream, PaymentInfoQuery, ReadySignal, UnsignedCall,
};
pub use error::{Error, Result};
pub use mock::{FeeTransport, MockClient};
