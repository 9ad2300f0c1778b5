//! Cross-chain adapter core
//!
//! [`BaseAdapter`] owns the per-chain state: chain identity, supported
//! lanes, the static config tables, and the bound client handle.
//! [`CrossChainAdapter`] layers the shared orchestration on top as provided
//! methods; a chain implementation supplies three capability hooks (balance
//! subscription, maximum-input computation, bridge-call derivation) and
//! inherits the rest.

use crate::monitor::{self, StatusStream};
use crate::{Error, Result};
use async_stream::stream;
use async_trait::async_trait;
use bridge_core::{
    BalanceChangeConfig, BridgeTxParams, Chain, ChainName, ChainTable, CrossChainRouter, FeeTable,
    InputConfig, NetworkProps, RouterEntry, TokenBalance, TransferParams, TransferQuery,
};
use chain_client::{BalanceStream, BoundClient, ChainClient, UnsignedCall};
use futures::stream::BoxStream;
use futures::StreamExt;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

/// Stream of decimal amounts
pub type AmountStream = BoxStream<'static, Result<Decimal>>;

/// Stream of fee estimates as raw minor-unit strings
pub type FeeEstimateStream = BoxStream<'static, Result<String>>;

/// Stream of input configuration records
pub type InputConfigStream = BoxStream<'static, Result<InputConfig>>;

/// Lookup resolving a chain to its registered adapter
///
/// Injected by the registry as a non-owning back-reference; resolves to
/// `None` once the registry is gone or the chain was never registered.
pub type AdapterResolver =
    Arc<dyn Fn(&ChainName) -> Option<Arc<dyn CrossChainAdapter>> + Send + Sync>;

/// State shared by every adapter implementation
pub struct BaseAdapter {
    chain: Chain,
    routers: Vec<RouterEntry>,
    chain_table: Arc<ChainTable>,
    fee_table: Arc<FeeTable>,
    client: RwLock<Option<BoundClient>>,
    resolver: RwLock<Option<AdapterResolver>>,
}

impl BaseAdapter {
    /// Create adapter state for `chain` serving `routers`.
    pub fn new(
        chain: Chain,
        routers: Vec<RouterEntry>,
        chain_table: Arc<ChainTable>,
        fee_table: Arc<FeeTable>,
    ) -> Self {
        Self {
            chain,
            routers,
            chain_table,
            fee_table,
            client: RwLock::new(None),
            resolver: RwLock::new(None),
        }
    }

    /// Chain this adapter serves.
    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    /// Name of the chain this adapter serves.
    pub fn chain_name(&self) -> &ChainName {
        &self.chain.name
    }

    /// Static chain table shared across adapters.
    pub fn chain_table(&self) -> &ChainTable {
        &self.chain_table
    }

    /// Static fee table shared across adapters.
    pub fn fee_table(&self) -> &FeeTable {
        &self.fee_table
    }

    /// Supported lanes, destination side only.
    pub fn router_entries(&self) -> &[RouterEntry] {
        &self.routers
    }

    /// Bound client handle, or the not-ready error.
    pub fn client(&self) -> Result<BoundClient> {
        self.client.read().clone().ok_or_else(|| Error::NotReady {
            chain: self.chain.name.clone(),
        })
    }

    /// Registry lookup for sibling adapters, once injected.
    pub fn resolver(&self) -> Result<AdapterResolver> {
        self.resolver
            .read()
            .clone()
            .ok_or_else(|| Error::ResolverMissing {
                chain: self.chain.name.clone(),
            })
    }

    fn set_client(&self, client: BoundClient) {
        *self.client.write() = Some(client);
    }

    fn set_resolver(&self, resolver: AdapterResolver) {
        *self.resolver.write() = Some(resolver);
    }
}

/// One chain's transfer adapter
///
/// Implementations provide the three capability hooks; everything else has
/// a shared default built on the bound client and the config tables.
///
/// The bound handle is shared read-only across operations. Rebinding while
/// subscriptions are in flight is not supported; callers must serialize
/// rebinding before issuing new subscriptions.
#[async_trait]
pub trait CrossChainAdapter: Send + Sync {
    /// Shared adapter state.
    fn base(&self) -> &BaseAdapter;

    /// Live balance of `address` in `token` on this chain.
    fn subscribe_token_balance(&self, token: &str, address: &str) -> Result<BalanceStream>;

    /// Live maximum sendable amount for the lane to `to`, bounded by the
    /// sender's spendable balance.
    fn subscribe_max_input(&self, token: &str, address: &str, to: &ChainName)
        -> Result<AmountStream>;

    /// Derive the bridge call parameters for `params`.
    fn bridge_tx_params(&self, params: &TransferParams) -> Result<BridgeTxParams>;

    /// Bind a client handle; suspends until the connection is usable.
    ///
    /// Push-capable handles flag readiness over a subscription first, then
    /// the generic readiness future is awaited. Must complete before any
    /// balance, fee, or tx operation.
    async fn bind(&self, client: Arc<dyn ChainClient>) -> Result<()> {
        let bound = BoundClient::bind(client).await?;
        self.base().set_client(bound);
        info!(chain = %self.base().chain_name(), "adapter bound");
        Ok(())
    }

    /// Store the registry lookup used for cross-adapter queries.
    fn inject_resolver(&self, resolver: AdapterResolver) {
        self.base().set_resolver(resolver);
    }

    /// Supported lanes with the source chain filled in.
    fn list_routers(&self) -> Vec<CrossChainRouter> {
        let from = self.base().chain_name().clone();
        self.base()
            .router_entries()
            .iter()
            .map(|entry| CrossChainRouter {
                from: from.clone(),
                to: entry.to.clone(),
                token: entry.token.clone(),
            })
            .collect()
    }

    /// SS58 prefix from the bound connection's registry metadata.
    fn ss58_prefix(&self) -> Result<u16> {
        let client = self.base().client()?;
        client
            .ss58_prefix()
            .ok_or_else(|| Error::InvalidSs58Prefix {
                chain: self.base().chain_name().clone(),
            })
    }

    /// Chain-reported network properties.
    async fn network_properties(&self) -> Result<NetworkProps> {
        let client = self.base().client()?;
        Ok(client.system_properties().await?)
    }

    /// Existential deposit of `token` on the destination chain `to`.
    fn dest_existential_deposit(&self, token: &str, to: &ChainName) -> Result<TokenBalance> {
        Ok(self.base().fee_table().existential_deposit(to, token)?)
    }

    /// Bridge fee charged on the destination chain `to` for `token`.
    fn bridge_fee(&self, token: &str, to: &ChainName) -> Result<TokenBalance> {
        Ok(self.base().fee_table().bridge_fee(to, token)?)
    }

    /// Input limits for a lane as a live stream of records.
    ///
    /// The minimum side is a constant (destination existential deposit plus
    /// bridge fee); the maximum side tracks the sender's spendable balance.
    /// A record is emitted whenever either side updates, once both have
    /// emitted at least once. The stream never terminates on its own.
    fn subscribe_input_limits(&self, query: &TransferQuery) -> Result<InputConfigStream> {
        // Every static lookup resolves before the stream is built, so
        // missing config fails the call, not the subscription.
        let dest = self.base().chain_table().require(&query.to)?;
        let dest_fee = self.bridge_fee(&query.token, &query.to)?;
        let min = self.dest_existential_deposit(&query.token, &query.to)?.balance
            + dest_fee.balance;
        let max = self.subscribe_max_input(&query.token, &query.sender, &query.to)?;

        Ok(combine_limits(min, max, dest.ss58_prefix, dest_fee))
    }

    /// Estimated execution fee for the bridge call, emitted as raw
    /// minor-unit strings. Uniform over push and request transports.
    fn estimate_fee(&self, params: &TransferParams, signer: &str) -> Result<FeeEstimateStream> {
        let client = self.base().client()?;
        let call = self.create_tx(params)?;

        Ok(client
            .payment_info(&call, signer)
            .map(|fee| Ok(fee?.to_string()))
            .boxed())
    }

    /// Assemble the unsigned bridge call for `params`.
    ///
    /// Pure given identical inputs: two calls produce two independent call
    /// values with identical content.
    fn create_tx(&self, params: &TransferParams) -> Result<UnsignedCall> {
        let client = self.base().client()?;
        let tx_params = self.bridge_tx_params(params)?;
        Ok(client.build_call(&tx_params)?)
    }

    /// Watch `config.address` until the expected transfer amount lands,
    /// the confirmation window elapses, or the subscription breaks. Every
    /// outcome arrives as a status value; see [`monitor`].
    fn subscribe_balance_confirmation(&self, config: &BalanceChangeConfig) -> Result<StatusStream> {
        // Validate the target first, so a rejected config never opens a
        // balance subscription.
        monitor::confirmation_target(config)?;
        let balances = self.subscribe_token_balance(&config.token, &config.address)?;
        monitor::confirm_balance_change(balances, config)
    }
}

enum Limit {
    Min(Decimal),
    Max(Result<Decimal>),
}

/// Combine-latest join of the constant minimum and the live maximum.
fn combine_limits(
    min: Decimal,
    max: AmountStream,
    ss58_prefix: u16,
    dest_fee: TokenBalance,
) -> InputConfigStream {
    let min_side = futures::stream::once(futures::future::ready(Limit::Min(min)));
    let max_side = max.map(Limit::Max);
    let mut tagged = futures::stream::select(min_side, max_side);

    stream! {
        let mut latest_min = None;
        let mut latest_max = None;

        while let Some(update) = tagged.next().await {
            match update {
                Limit::Min(value) => latest_min = Some(value),
                Limit::Max(Ok(value)) => latest_max = Some(value),
                Limit::Max(Err(err)) => {
                    yield Err(err);
                    break;
                }
            }

            if let (Some(min_input), Some(max_input)) = (latest_min, latest_max) {
                yield Ok(InputConfig {
                    min_input,
                    max_input,
                    ss58_prefix,
                    dest_fee: dest_fee.clone(),
                });
            }
        }
    }
    .boxed()
}
