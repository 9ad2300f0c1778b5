//! Core types shared by every bridge crate

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Account address in the chain's native encoding (SS58 for Substrate chains)
pub type Address = String;

/// Opaque chain identifier, used as a key into config tables and the
/// adapter registry
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainName(String);

impl ChainName {
    /// Create new chain name
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get as string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ChainName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ChainName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A token amount whose decimal scale matches the token's configured
/// precision on the chain it was resolved against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBalance {
    /// Token symbol
    pub token: String,
    /// Amount, scale = configured decimals
    pub balance: Decimal,
}

/// Transfer lane owned by an adapter, source chain implied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterEntry {
    /// Destination chain
    pub to: ChainName,
    /// Token symbol
    pub token: String,
}

/// Fully-qualified transfer lane with the source chain filled in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossChainRouter {
    /// Source chain
    pub from: ChainName,
    /// Destination chain
    pub to: ChainName,
    /// Token symbol
    pub token: String,
}

/// Immutable input to every downstream transfer computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferParams {
    /// Source-side account funding the transfer
    pub sender: Address,
    /// Destination account receiving the transfer
    pub recipient: Address,
    /// Destination chain
    pub to: ChainName,
    /// Token symbol
    pub token: String,
    /// Transfer amount, must be non-negative
    pub amount: Decimal,
}

impl TransferParams {
    /// The same record without the amount, for limit resolution
    pub fn query(&self) -> TransferQuery {
        TransferQuery {
            sender: self.sender.clone(),
            recipient: self.recipient.clone(),
            to: self.to.clone(),
            token: self.token.clone(),
        }
    }
}

/// Transfer parameters minus the amount; limit resolution runs before an
/// amount has been chosen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferQuery {
    /// Source-side account funding the transfer
    pub sender: Address,
    /// Destination account receiving the transfer
    pub recipient: Address,
    /// Destination chain
    pub to: ChainName,
    /// Token symbol
    pub token: String,
}

/// Input limits resolved for one transfer lane, computed fresh per
/// subscription (minimum and maximum depend on live chain state)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Minimum sendable amount (destination existential deposit + bridge fee)
    pub min_input: Decimal,
    /// Maximum sendable amount (live, sender-balance dependent)
    pub max_input: Decimal,
    /// Destination chain SS58 prefix
    pub ss58_prefix: u16,
    /// Fee charged on the destination side
    pub dest_fee: TokenBalance,
}

/// One emission of a balance subscription
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceData {
    /// Free balance
    pub free: Decimal,
    /// Locked balance
    pub locked: Decimal,
    /// Reserved balance
    pub reserved: Decimal,
    /// Spendable balance
    pub available: Decimal,
}

/// Configuration for watching a destination account until a transfer lands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceChangeConfig {
    /// Destination account to watch
    pub address: Address,
    /// Requested transfer amount
    pub amount: Decimal,
    /// Token symbol
    pub token: String,
    /// Fractional slack on the target amount, defaults to 0.01
    pub tolerance: Option<Decimal>,
    /// Overall timeout measured from subscription start, defaults to 120s
    pub timeout: Option<Duration>,
}

/// Terminal-and-progress states of the balance confirmation monitor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BalanceChangeStatus {
    /// Watching, target not reached yet
    Checking,
    /// Balance grew by at least the target amount
    Success,
    /// No qualifying change before the timeout elapsed
    Timeout,
    /// The underlying balance stream failed or disconnected
    UnknownError,
}

impl std::fmt::Display for BalanceChangeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BalanceChangeStatus::Checking => write!(f, "CHECKING"),
            BalanceChangeStatus::Success => write!(f, "SUCCESS"),
            BalanceChangeStatus::Timeout => write!(f, "TIMEOUT"),
            BalanceChangeStatus::UnknownError => write!(f, "UNKNOWN_ERROR"),
        }
    }
}

/// Chain-specific call description, opaque to the base adapter and
/// interpreted only by the client's call-construction facility
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeTxParams {
    /// Pallet / module name
    pub module: String,
    /// Call name within the module
    pub call: String,
    /// Ordered call arguments
    pub params: Vec<serde_json::Value>,
}

/// Network properties reported by the connected node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkProps {
    /// SS58 address format
    pub ss58_format: u16,
    /// Decimals of each native token
    pub token_decimals: Vec<u32>,
    /// Symbol of each native token
    pub token_symbol: Vec<String>,
}
