//! Error types for the bridge domain model

use crate::types::ChainName;
use rust_decimal::Decimal;
use thiserror::Error;

/// Result type for domain operations
pub type Result<T> = std::result::Result<T, Error>;

/// Domain errors
#[derive(Error, Debug)]
pub enum Error {
    /// Token has no entry in the fee table for the given chain
    #[error("can't find {token} config in {chain}")]
    TokenConfigNotFound {
        /// Token symbol
        token: String,
        /// Chain the lookup ran against
        chain: ChainName,
    },

    /// Chain has no entry in the chain table
    #[error("can't find {chain} in the chain table")]
    ChainNotFound {
        /// Chain name
        chain: ChainName,
    },

    /// Token is not supported by the current network
    #[error("can't find {token} currency in current network")]
    CurrencyNotFound {
        /// Token symbol
        token: String,
    },

    /// Raw minor-unit amount does not fit the fixed-point representation
    #[error("raw amount {raw} with {decimals} decimals exceeds the representable range")]
    AmountOverflow {
        /// Raw minor-unit amount
        raw: u128,
        /// Decimal precision
        decimals: u32,
    },

    /// Scaling a decimal amount to raw minor units overflowed
    #[error("amount {amount} at {decimals} decimals exceeds the raw integer range")]
    AmountTooLarge {
        /// Offending amount
        amount: Decimal,
        /// Decimal precision
        decimals: u32,
    },

    /// Negative amount where only non-negative values are valid
    #[error("amount {amount} is negative")]
    AmountNegative {
        /// Offending amount
        amount: Decimal,
    },

    /// Amount carries more fractional digits than the token supports
    #[error("amount {amount} cannot be represented with {decimals} decimals without rounding")]
    PrecisionLoss {
        /// Offending amount
        amount: Decimal,
        /// Decimal precision of the token
        decimals: u32,
    },

    /// Config table failed to parse
    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),
}
