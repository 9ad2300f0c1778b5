//! Bound client handle
//!
//! [`BoundClient`] wraps a raw [`ChainClient`] once the readiness handshake
//! has completed, and normalizes the push/request transport split so
//! adapter code downstream always sees one stream shape.

use crate::client::{BalanceStream, ChainClient, FeeStream, PaymentInfoQuery, UnsignedCall};
use crate::{Error, Result};
use bridge_core::{BridgeTxParams, NetworkProps};
use futures::StreamExt;
use std::sync::Arc;
use tracing::debug;

/// A client handle that completed the readiness handshake
#[derive(Clone)]
pub struct BoundClient {
    inner: Arc<dyn ChainClient>,
}

impl BoundClient {
    /// Bind a handle, suspending until its connection is usable.
    ///
    /// Push-capable clients flag readiness over a subscription before their
    /// generic readiness future resolves; wait for both, in that order.
    pub async fn bind(client: Arc<dyn ChainClient>) -> Result<Self> {
        if let Some(mut signal) = client.ready_signal() {
            if signal.next().await.is_none() {
                return Err(Error::NotConnected);
            }
            debug!("ready signal fired");
        }

        client.ready().await?;

        Ok(Self { inner: client })
    }

    /// SS58 address prefix from the chain registry metadata, if present.
    pub fn ss58_prefix(&self) -> Option<u16> {
        self.inner.ss58_prefix()
    }

    /// Chain-reported network properties.
    pub async fn system_properties(&self) -> Result<NetworkProps> {
        self.inner.system_properties().await
    }

    /// Assemble an unsigned call from bridge transaction parameters.
    pub fn build_call(&self, params: &BridgeTxParams) -> Result<UnsignedCall> {
        self.inner.build_call(params)
    }

    /// Estimated fee for `call` signed by `signer`, as one uniform stream.
    ///
    /// Request-style transports are wrapped into a stream that emits once
    /// and completes, so downstream code never branches on the transport.
    pub fn payment_info(&self, call: &UnsignedCall, signer: &str) -> FeeStream {
        match self.inner.payment_info(call, signer) {
            PaymentInfoQuery::Push(stream) => stream,
            PaymentInfoQuery::Request(request) => futures::stream::once(request).boxed(),
        }
    }

    /// Subscribe to balance updates for `address` in `token`.
    pub fn subscribe_balance(&self, token: &str, address: &str) -> BalanceStream {
        self.inner.subscribe_balance(token, address)
    }
}
