//! Scripted chain client for tests and demos
//!
//! [`MockClient`] stands in for a node connection: balances are pushed by
//! the test script, fee queries answer a scripted value over either
//! transport, and subscriptions are counted both live and over the mock's
//! lifetime, so cancellation and fail-fast behavior can be asserted.

use crate::client::{BalanceStream, ChainClient, PaymentInfoQuery, ReadySignal, UnsignedCall};
use crate::{Error, Result};
use async_trait::async_trait;
use bridge_core::{BalanceData, BridgeTxParams, NetworkProps};
use futures::future;
use futures::stream::Stream;
use futures::{FutureExt, StreamExt};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

/// Transport mode the mock answers fee queries with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeTransport {
    /// Fee pushed over a subscription
    Push,
    /// Fee answered as a one-shot request
    Request,
}

/// Scripted chain client
pub struct MockClient {
    connected: bool,
    push_ready: bool,
    ss58: Option<u16>,
    properties: NetworkProps,
    fee: Mutex<Result<u128>>,
    fee_transport: FeeTransport,
    call_filter: Option<Vec<(String, String)>>,
    channels: Mutex<HashMap<(String, String), broadcast::Sender<Result<BalanceData>>>>,
    active: Arc<AtomicUsize>,
    opened: AtomicUsize,
}

impl MockClient {
    /// Create a connected mock with generic network defaults.
    pub fn new() -> Self {
        Self {
            connected: true,
            push_ready: false,
            ss58: Some(42),
            properties: NetworkProps {
                ss58_format: 42,
                token_decimals: vec![12],
                token_symbol: vec!["UNIT".to_string()],
            },
            fee: Mutex::new(Ok(1_000_000_000)),
            fee_transport: FeeTransport::Push,
            call_filter: None,
            channels: Mutex::new(HashMap::new()),
            active: Arc::new(AtomicUsize::new(0)),
            opened: AtomicUsize::new(0),
        }
    }

    /// Emit a readiness push signal, like newer client generations do.
    pub fn with_ready_signal(mut self) -> Self {
        self.push_ready = true;
        self
    }

    /// Script a handle whose connection never comes up.
    pub fn disconnected(mut self) -> Self {
        self.connected = false;
        self
    }

    /// Override the SS58 prefix reported from registry metadata.
    pub fn with_ss58_prefix(mut self, prefix: u16) -> Self {
        self.ss58 = Some(prefix);
        self
    }

    /// Script registry metadata with no SS58 prefix.
    pub fn without_ss58_prefix(mut self) -> Self {
        self.ss58 = None;
        self
    }

    /// Override the chain-reported network properties.
    pub fn with_properties(mut self, properties: NetworkProps) -> Self {
        self.properties = properties;
        self
    }

    /// Script the fee answered by payment-info queries, in raw minor units.
    pub fn with_fee(self, fee: u128) -> Self {
        *self.fee.lock() = Ok(fee);
        self
    }

    /// Choose the transport fee queries are answered over.
    pub fn with_fee_transport(mut self, transport: FeeTransport) -> Self {
        self.fee_transport = transport;
        self
    }

    /// Restrict call construction to the given (module, call) pairs.
    pub fn with_call_filter(mut self, calls: &[(&str, &str)]) -> Self {
        self.call_filter = Some(
            calls
                .iter()
                .map(|(module, call)| (module.to_string(), call.to_string()))
                .collect(),
        );
        self
    }

    /// Re-script the fee answered by later payment-info queries.
    pub fn set_fee(&self, fee: u128) {
        *self.fee.lock() = Ok(fee);
    }

    /// Script fee queries to fail with an RPC error.
    pub fn fail_fees(&self, message: impl Into<String>) {
        *self.fee.lock() = Err(Error::Rpc(message.into()));
    }

    /// Push a balance snapshot to every live `(token, address)` subscriber.
    pub fn push_balance(&self, token: &str, address: &str, data: BalanceData) {
        let _ = self.sender(token, address).send(Ok(data));
    }

    /// Break the `(token, address)` subscription with an error item.
    pub fn fail_balance(&self, token: &str, address: &str, message: impl Into<String>) {
        let _ = self
            .sender(token, address)
            .send(Err(Error::Subscription(message.into())));
    }

    /// Number of live subscriptions handed out and not yet dropped.
    pub fn active_subscriptions(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Number of subscriptions ever handed out, dropped or not.
    pub fn opened_subscriptions(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    fn sender(&self, token: &str, address: &str) -> broadcast::Sender<Result<BalanceData>> {
        let mut channels = self.channels.lock();
        channels
            .entry((token.to_string(), address.to_string()))
            .or_insert_with(|| broadcast::channel(64).0)
            .clone()
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChainClient for MockClient {
    async fn ready(&self) -> Result<()> {
        if self.connected {
            Ok(())
        } else {
            Err(Error::NotConnected)
        }
    }

    fn ready_signal(&self) -> Option<ReadySignal> {
        if self.push_ready {
            Some(futures::stream::once(future::ready(())).boxed())
        } else {
            None
        }
    }

    fn ss58_prefix(&self) -> Option<u16> {
        self.ss58
    }

    async fn system_properties(&self) -> Result<NetworkProps> {
        Ok(self.properties.clone())
    }

    fn build_call(&self, params: &BridgeTxParams) -> Result<UnsignedCall> {
        if let Some(filter) = &self.call_filter {
            let known = filter
                .iter()
                .any(|(module, call)| module == &params.module && call == &params.call);
            if !known {
                return Err(Error::InvalidCall {
                    module: params.module.clone(),
                    call: params.call.clone(),
                });
            }
        }

        Ok(UnsignedCall {
            module: params.module.clone(),
            call: params.call.clone(),
            args: params.params.clone(),
        })
    }

    fn payment_info(&self, _call: &UnsignedCall, _signer: &str) -> PaymentInfoQuery {
        let outcome = self.fee.lock().clone();
        match self.fee_transport {
            FeeTransport::Push => {
                self.opened.fetch_add(1, Ordering::SeqCst);
                let inner = futures::stream::once(future::ready(outcome));
                PaymentInfoQuery::Push(CountedStream::new(inner, Arc::clone(&self.active)).boxed())
            }
            FeeTransport::Request => PaymentInfoQuery::Request(future::ready(outcome).boxed()),
        }
    }

    fn subscribe_balance(&self, token: &str, address: &str) -> BalanceStream {
        self.opened.fetch_add(1, Ordering::SeqCst);
        let receiver = self.sender(token, address).subscribe();
        let inner = BroadcastStream::new(receiver).map(|item| match item {
            Ok(update) => update,
            Err(err) => Err(Error::Subscription(err.to_string())),
        });
        CountedStream::new(inner, Arc::clone(&self.active)).boxed()
    }
}

/// Stream wrapper that keeps the live-subscription count honest
struct CountedStream<S> {
    inner: S,
    active: Arc<AtomicUsize>,
}

impl<S> CountedStream<S> {
    fn new(inner: S, active: Arc<AtomicUsize>) -> Self {
        active.fetch_add(1, Ordering::SeqCst);
        Self { inner, active }
    }
}

impl<S> Drop for CountedStream<S> {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

impl<S: Stream + Unpin> Stream for CountedStream<S> {
    type Item = S::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
