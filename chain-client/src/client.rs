//! Chain client trait and call types
//!
//! Adapters never talk to a node directly; they go through a [`ChainClient`]
//! handle injected at bind time. Two client generations exist in the wild:
//! newer ones flag readiness and answer fee queries over push subscriptions,
//! older ones only expose awaitable one-shot requests. The trait carries both
//! shapes; [`crate::BoundClient`] normalizes them at the boundary.

use crate::Result;
use async_trait::async_trait;
use bridge_core::{BalanceData, BridgeTxParams, NetworkProps};
use futures::future::BoxFuture;
use futures::stream::BoxStream;

/// Live stream of account balance snapshots
pub type BalanceStream = BoxStream<'static, Result<BalanceData>>;

/// Live stream of fee estimates in raw minor units
pub type FeeStream = BoxStream<'static, Result<u128>>;

/// One-shot fee estimate in raw minor units
pub type FeeRequest = BoxFuture<'static, Result<u128>>;

/// Push signal fired once the client's connection is usable
pub type ReadySignal = BoxStream<'static, ()>;

/// An unsigned chain call, assembled and ready for signing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedCall {
    /// Pallet the call lives in
    pub module: String,
    /// Call name within the pallet
    pub call: String,
    /// Ordered call arguments, JSON-encoded
    pub args: Vec<serde_json::Value>,
}

/// Transport a client answers fee queries with
pub enum PaymentInfoQuery {
    /// Estimates pushed over a live subscription
    Push(FeeStream),
    /// A single awaitable estimate
    Request(FeeRequest),
}

/// Handle to one chain connection
///
/// The handle is shared read-only across every operation of an adapter;
/// implementations must tolerate concurrent calls.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Wait until the connection is usable.
    async fn ready(&self) -> Result<()>;

    /// Readiness as a push signal, for client generations that emit one.
    ///
    /// Returns `None` on request-only clients; callers then rely on
    /// [`ChainClient::ready`] alone.
    fn ready_signal(&self) -> Option<ReadySignal>;

    /// SS58 address prefix from the connection's chain registry metadata,
    /// if the metadata carries one.
    fn ss58_prefix(&self) -> Option<u16>;

    /// Chain-reported network properties.
    async fn system_properties(&self) -> Result<NetworkProps>;

    /// Assemble an unsigned call from bridge transaction parameters.
    fn build_call(&self, params: &BridgeTxParams) -> Result<UnsignedCall>;

    /// Estimate the native fee for `call` signed by `signer`.
    fn payment_info(&self, call: &UnsignedCall, signer: &str) -> PaymentInfoQuery;

    /// Subscribe to balance updates for `address` in `token`.
    fn subscribe_balance(&self, token: &str, address: &str) -> BalanceStream;
}
