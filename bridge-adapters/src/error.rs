//! Error types for adapters

use bridge_core::ChainName;
use rust_decimal::Decimal;
use thiserror::Error;

/// Result type for adapter operations
pub type Result<T> = std::result::Result<T, Error>;

/// Adapter errors
#[derive(Error, Debug)]
pub enum Error {
    /// Operation invoked before a client handle was bound
    #[error("client not set for {chain} adapter")]
    NotReady {
        /// Chain the adapter serves
        chain: ChainName,
    },

    /// No adapter registered for the chain
    #[error("can't find {chain} adapter, register it before use")]
    AdapterNotFound {
        /// Requested chain
        chain: ChainName,
    },

    /// No router covers the requested lane
    #[error("can't find {token} to {dest} router in {network} network")]
    RouterNotFound {
        /// Token symbol
        token: String,
        /// Destination chain
        dest: ChainName,
        /// Source network the lookup ran against
        network: ChainName,
    },

    /// Chain registry metadata carries no SS58 prefix
    #[error("no ss58 prefix in {chain} registry metadata")]
    InvalidSs58Prefix {
        /// Chain the metadata came from
        chain: ChainName,
    },

    /// Confirmation target is zero or negative and would report success on
    /// the first balance sample
    #[error("confirmation target {target} must be positive")]
    InvalidConfirmationTarget {
        /// Effective target after tolerance
        target: Decimal,
    },

    /// Cross-adapter lookup used before the registry injected one
    #[error("adapter resolver not injected for {chain}")]
    ResolverMissing {
        /// Chain of the adapter that needed the lookup
        chain: ChainName,
    },

    /// Domain model error (config lookups, amount conversions)
    #[error(transparent)]
    Core(#[from] bridge_core::Error),

    /// Chain client transport error
    #[error(transparent)]
    Client(#[from] chain_client::Error),
}
