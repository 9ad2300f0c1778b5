//! Transfer quote walkthrough
//!
//! Wires the Kusama relay adapter to a mock chain client and walks one
//! KSM -> Karura transfer end to end: route lookup, input limits, fee
//! estimate, unsigned call assembly, then arrival confirmation.

use anyhow::Context;
use bridge_adapters::{AdapterRegistry, CrossChainAdapter, RelayChainAdapter};
use bridge_core::{
    BalanceChangeConfig, BalanceData, ChainName, ChainTable, FeeTable, TransferParams,
};
use chain_client::{ChainClient, MockClient};
use futures::StreamExt;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("XBridge quote walkthrough starting");

    let chain_table = Arc::new(ChainTable::presets());
    let fee_table = Arc::new(FeeTable::presets());

    let registry = AdapterRegistry::new();
    registry.register(Arc::new(RelayChainAdapter::kusama(
        Arc::clone(&chain_table),
        Arc::clone(&fee_table),
    )?));
    registry.register(Arc::new(RelayChainAdapter::polkadot(
        Arc::clone(&chain_table),
        Arc::clone(&fee_table),
    )?));
    info!(adapters = registry.len(), "registry populated");

    let kusama = ChainName::new("kusama");
    let karura = ChainName::new("karura");

    let router = registry.find_router("KSM", &kusama, &karura)?;
    info!(token = %router.token, from = %router.from, to = %router.to, "route resolved");

    // One mock node stands in for both ends of the lane.
    let node = Arc::new(MockClient::new().with_fee(100_000_000_000));
    let adapter = registry.find_adapter(&kusama)?;
    adapter
        .bind(Arc::clone(&node) as Arc<dyn ChainClient>)
        .await?;

    let params = TransferParams {
        sender: "FkBkfgiKJcUepDzLUSzTyqHsKMuiVupGS1vLSfJLQBSOlQA".to_string(),
        recipient: "qdBGWmupbwjyhBGK3AYYVjNLWDMhwMxFDvAFaYeXkMteQ4u".to_string(),
        to: karura.clone(),
        token: "KSM".to_string(),
        amount: Decimal::new(15, 1),
    };

    // Limits need one balance sample before the first record lands.
    let mut limits = adapter.subscribe_input_limits(&params.query())?;
    node.push_balance("KSM", &params.sender, sample(Decimal::from(10)));
    let config = limits
        .next()
        .await
        .context("input limits stream ended early")??;
    info!(
        min = %config.min_input,
        max = %config.max_input,
        ss58 = config.ss58_prefix,
        dest_fee = %config.dest_fee.balance,
        "input limits resolved"
    );

    let call = adapter.create_tx(&params)?;
    info!(module = %call.module, call = %call.call, "unsigned call assembled");

    let mut fees = adapter.estimate_fee(&params, &params.sender)?;
    let fee = fees.next().await.context("fee stream ended early")??;
    info!(%fee, "execution fee estimated");

    // Arrival side: watch the recipient until the transferred amount shows up.
    let confirmation = BalanceChangeConfig {
        address: params.recipient.clone(),
        amount: params.amount,
        token: params.token.clone(),
        tolerance: None,
        timeout: None,
    };
    let status = adapter.subscribe_balance_confirmation(&confirmation)?;
    node.push_balance("KSM", &params.recipient, sample(Decimal::from(100)));
    node.push_balance(
        "KSM",
        &params.recipient,
        sample(Decimal::from(100) + params.amount),
    );

    let outcomes: Vec<_> = status.collect().await;
    for outcome in &outcomes {
        info!(?outcome, "confirmation update");
    }

    info!("quote walkthrough complete");
    Ok(())
}

fn sample(available: Decimal) -> BalanceData {
    BalanceData {
        free: available,
        locked: Decimal::ZERO,
        reserved: Decimal::ZERO,
        available,
    }
}
