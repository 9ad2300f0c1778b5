//! Relay chain adapter
//!
//! Sends a relay chain's native token down to one of its parachains over
//! `xcmPallet.limitedReserveTransferAssets`. Lanes come preset for the two
//! production relays; other layouts go through [`RelayChainAdapter::new`].

use crate::adapter::{AmountStream, BaseAdapter, CrossChainAdapter};
use crate::{Error, Result};
use async_stream::stream;
use async_trait::async_trait;
use bridge_core::{
    amount, BalanceData, BridgeTxParams, ChainName, ChainTable, FeeTable, RouterEntry,
    TransferParams,
};
use chain_client::{BalanceStream, FeeStream};
use futures::StreamExt;
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Arc;

/// Padding applied to the estimated execution fee when computing the
/// spendable maximum (1.2)
const FEE_MARGIN: Decimal = Decimal::from_parts(12, 0, 0, false, 1);

/// Adapter for a relay chain's native-token lanes
pub struct RelayChainAdapter {
    base: BaseAdapter,
}

impl RelayChainAdapter {
    /// Polkadot relay adapter with its preset DOT lanes.
    pub fn polkadot(chain_table: Arc<ChainTable>, fee_table: Arc<FeeTable>) -> Result<Self> {
        Self::new(
            ChainName::new("polkadot"),
            vec![
                RouterEntry {
                    to: ChainName::new("acala"),
                    token: "DOT".to_string(),
                },
                RouterEntry {
                    to: ChainName::new("statemint"),
                    token: "DOT".to_string(),
                },
            ],
            chain_table,
            fee_table,
        )
    }

    /// Kusama relay adapter with its preset KSM lanes.
    pub fn kusama(chain_table: Arc<ChainTable>, fee_table: Arc<FeeTable>) -> Result<Self> {
        Self::new(
            ChainName::new("kusama"),
            vec![
                RouterEntry {
                    to: ChainName::new("karura"),
                    token: "KSM".to_string(),
                },
                RouterEntry {
                    to: ChainName::new("statemine"),
                    token: "KSM".to_string(),
                },
                RouterEntry {
                    to: ChainName::new("bifrost"),
                    token: "KSM".to_string(),
                },
            ],
            chain_table,
            fee_table,
        )
    }

    /// Adapter for `chain` serving `routers`.
    ///
    /// The chain must be present in the chain table; its native token and
    /// decimals drive every amount conversion.
    pub fn new(
        chain: ChainName,
        routers: Vec<RouterEntry>,
        chain_table: Arc<ChainTable>,
        fee_table: Arc<FeeTable>,
    ) -> Result<Self> {
        let chain = chain_table.require(&chain)?.clone();
        Ok(Self {
            base: BaseAdapter::new(chain, routers, chain_table, fee_table),
        })
    }

    fn native_token(&self) -> &str {
        &self.base.chain().native_token
    }
}

#[async_trait]
impl CrossChainAdapter for RelayChainAdapter {
    fn base(&self) -> &BaseAdapter {
        &self.base
    }

    fn subscribe_token_balance(&self, token: &str, address: &str) -> Result<BalanceStream> {
        // relay chains carry exactly one currency
        if token != self.native_token() {
            return Err(bridge_core::Error::CurrencyNotFound {
                token: token.to_string(),
            }
            .into());
        }
        Ok(self.base.client()?.subscribe_balance(token, address))
    }

    fn subscribe_max_input(
        &self,
        token: &str,
        address: &str,
        to: &ChainName,
    ) -> Result<AmountStream> {
        let decimals = self.base.chain().native_decimals;
        // Fee probe over the same lane; the amount does not change the
        // call's weight.
        let probe = TransferParams {
            sender: address.to_string(),
            recipient: address.to_string(),
            to: to.clone(),
            token: token.to_string(),
            amount: Decimal::ZERO,
        };
        let call = self.create_tx(&probe)?;
        let fees = self.base.client()?.payment_info(&call, address);
        let balances = self.subscribe_token_balance(token, address)?;

        Ok(max_from_spendable(balances, fees, decimals))
    }

    fn bridge_tx_params(&self, params: &TransferParams) -> Result<BridgeTxParams> {
        let dest = self.base.chain_table().require(&params.to)?;
        let para_id = dest.para_chain_id.ok_or_else(|| Error::RouterNotFound {
            token: params.token.clone(),
            dest: params.to.clone(),
            network: self.base.chain_name().clone(),
        })?;
        let raw_amount = amount::to_raw(params.amount, self.base.chain().native_decimals)?;

        Ok(BridgeTxParams {
            module: "xcmPallet".to_string(),
            call: "limitedReserveTransferAssets".to_string(),
            params: vec![
                json!({ "V3": { "parents": 0, "interior": { "X1": { "Parachain": para_id } } } }),
                json!({ "V3": { "parents": 0, "interior": { "X1": { "AccountId32": { "id": params.recipient } } } } }),
                json!({ "V3": [{
                    "id": { "Concrete": { "parents": 0, "interior": "Here" } },
                    "fun": { "Fungible": raw_amount.to_string() },
                }] }),
                json!(0),
                json!("Unlimited"),
            ],
        })
    }
}

enum Side {
    Fee(chain_client::Result<u128>),
    Balance(chain_client::Result<BalanceData>),
}

/// Spendable ceiling: the latest available balance minus the padded
/// execution fee, floored at zero.
fn max_from_spendable(balances: BalanceStream, fees: FeeStream, decimals: u32) -> AmountStream {
    let fee_side = fees.map(Side::Fee);
    let balance_side = balances.map(Side::Balance);
    let mut tagged = futures::stream::select(fee_side, balance_side);

    stream! {
        let mut latest_fee = None;
        let mut latest_balance = None;

        while let Some(update) = tagged.next().await {
            match update {
                Side::Fee(Ok(raw)) => match amount::from_raw(raw, decimals) {
                    Ok(fee) => latest_fee = Some(fee * FEE_MARGIN),
                    Err(err) => {
                        yield Err(err.into());
                        break;
                    }
                },
                Side::Balance(Ok(data)) => latest_balance = Some(data.available),
                Side::Fee(Err(err)) | Side::Balance(Err(err)) => {
                    yield Err(err.into());
                    break;
                }
            }

            if let (Some(fee), Some(balance)) = (latest_fee, latest_balance) {
                let max = (balance - fee).max(Decimal::ZERO);
                yield Ok(max);
            }
        }
    }
    .boxed()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chain_client::{ChainClient, MockClient};
    use rust_decimal_macros::dec;

    fn kusama() -> RelayChainAdapter {
        let chain_table = Arc::new(ChainTable::presets());
        let fee_table = Arc::new(FeeTable::presets());
        RelayChainAdapter::kusama(chain_table, fee_table).unwrap()
    }

    fn ksm(available: Decimal) -> BalanceData {
        BalanceData {
            free: available,
            locked: Decimal::ZERO,
            reserved: Decimal::ZERO,
            available,
        }
    }

    fn transfer(amount: Decimal) -> TransferParams {
        TransferParams {
            sender: "alice".to_string(),
            recipient: "bob".to_string(),
            to: ChainName::new("karura"),
            token: "KSM".to_string(),
            amount,
        }
    }

    #[tokio::test]
    async fn test_lists_preset_lanes() {
        let adapter = kusama();

        let routers = adapter.list_routers();
        assert_eq!(routers.len(), 3);
        assert!(routers
            .iter()
            .all(|router| router.from == ChainName::new("kusama")));
        assert!(routers.iter().all(|router| router.token == "KSM"));
    }

    #[tokio::test]
    async fn test_rejects_foreign_token() {
        let adapter = kusama();

        assert!(matches!(
            adapter.subscribe_token_balance("KAR", "alice"),
            Err(Error::Core(bridge_core::Error::CurrencyNotFound { .. }))
        ));
    }

    #[tokio::test]
    async fn test_bridge_tx_targets_the_xcm_pallet() {
        let adapter = kusama();

        let params = adapter.bridge_tx_params(&transfer(dec!(1.5))).unwrap();
        assert_eq!(params.module, "xcmPallet");
        assert_eq!(params.call, "limitedReserveTransferAssets");
        assert_eq!(params.params.len(), 5);

        // the raw amount rides as a string, 1.5 KSM = 1_500_000_000_000
        let assets = params.params[2].to_string();
        assert!(assets.contains("1500000000000"));
    }

    #[tokio::test]
    async fn test_lane_without_para_id_is_not_routable() {
        let adapter = kusama();

        let mut params = transfer(dec!(1));
        params.to = ChainName::new("polkadot");
        assert!(matches!(
            adapter.bridge_tx_params(&params),
            Err(Error::RouterNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_max_input_subtracts_padded_fee() {
        let adapter = kusama();
        let client = Arc::new(MockClient::new().with_fee(100_000_000_000));
        adapter
            .bind(Arc::clone(&client) as Arc<dyn ChainClient>)
            .await
            .unwrap();

        let mut max = adapter
            .subscribe_max_input("KSM", "alice", &ChainName::new("karura"))
            .unwrap();
        client.push_balance("KSM", "alice", ksm(dec!(10)));

        // 10 - (0.1 * 1.2)
        assert_eq!(max.next().await.unwrap().unwrap(), dec!(9.88));
    }

    #[tokio::test]
    async fn test_max_input_floors_at_zero() {
        let adapter = kusama();
        let client = Arc::new(MockClient::new().with_fee(100_000_000_000));
        adapter
            .bind(Arc::clone(&client) as Arc<dyn ChainClient>)
            .await
            .unwrap();

        let mut max = adapter
            .subscribe_max_input("KSM", "alice", &ChainName::new("karura"))
            .unwrap();
        client.push_balance("KSM", "alice", ksm(dec!(0.05)));

        assert_eq!(max.next().await.unwrap().unwrap(), Decimal::ZERO);
    }
}
