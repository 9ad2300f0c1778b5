//! Error types for the chain client layer

use thiserror::Error;

/// Result type for client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Chain client error
///
/// Cloneable so a broken subscription can replay the same failure to every
/// subscriber of a shared channel.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Client handle has no usable connection
    #[error("client connection is not established")]
    NotConnected,

    /// The node rejected or failed an RPC request
    #[error("rpc request failed: {0}")]
    Rpc(String),

    /// A live subscription broke
    #[error("subscription failed: {0}")]
    Subscription(String),

    /// The connected runtime does not expose the requested call
    #[error("chain does not expose {module}.{call}")]
    InvalidCall {
        /// Pallet name
        module: String,
        /// Call name within the pallet
        call: String,
    },
}
