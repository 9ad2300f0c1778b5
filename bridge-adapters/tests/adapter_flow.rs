// End-to-end adapter flow tests against the mock chain client

#[cfg(test)]
mod tests {
    use bridge_adapters::{AdapterRegistry, CrossChainAdapter, RelayChainAdapter};
    use bridge_core::{
        BalanceChangeConfig, BalanceChangeStatus, BalanceData, ChainName, ChainTable, FeeTable,
        TransferParams,
    };
    use chain_client::{ChainClient, MockClient};
    use futures::StreamExt;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;
    use std::time::Duration;

    fn sample(available: Decimal) -> BalanceData {
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

    fn confirmation(amount: Decimal, timeout: Option<Duration>) -> BalanceChangeConfig {
        BalanceChangeConfig {
            address: "bob".to_string(),
            amount,
            token: "KSM".to_string(),
            tolerance: Some(dec!(0.01)),
            timeout,
        }
    }

    async fn bound_kusama(client: &Arc<MockClient>) -> (AdapterRegistry, Arc<dyn CrossChainAdapter>) {
        let chain_table = Arc::new(ChainTable::presets());
        let fee_table = Arc::new(FeeTable::presets());

        let registry = AdapterRegistry::new();
        registry.register(Arc::new(
            RelayChainAdapter::kusama(chain_table, fee_table).unwrap(),
        ));

        let adapter = registry.find_adapter(&ChainName::new("kusama")).unwrap();
        adapter
            .bind(Arc::clone(client) as Arc<dyn ChainClient>)
            .await
            .unwrap();
        (registry, adapter)
    }

    #[tokio::test]
    async fn test_quote_flow_end_to_end() {
        let client = Arc::new(MockClient::new().with_fee(100_000_000_000));
        let (registry, adapter) = bound_kusama(&client).await;

        // 1. resolve the route
        let router = registry
            .find_router("KSM", &ChainName::new("kusama"), &ChainName::new("karura"))
            .unwrap();
        assert_eq!(router.token, "KSM");

        // 2. input limits for the lane
        let mut limits = adapter
            .subscribe_input_limits(&transfer(dec!(1.5)).query())
            .unwrap();
        client.push_balance("KSM", "alice", sample(dec!(10)));

        let config = limits.next().await.unwrap().unwrap();
        // min covers the destination deposit plus its bridge fee; max is the
        // spendable balance net of the padded execution fee
        assert_eq!(config.min_input, dec!(0.000179999999));
        assert_eq!(config.max_input, dec!(9.88));
        assert_eq!(config.ss58_prefix, 8);
        assert_eq!(config.dest_fee.token, "KSM");

        // 3. assemble the unsigned call
        let call = adapter.create_tx(&transfer(dec!(1.5))).unwrap();
        assert_eq!(call.module, "xcmPallet");
        assert_eq!(call.call, "limitedReserveTransferAssets");

        // 4. execution fee for signing UIs
        let mut fees = adapter.estimate_fee(&transfer(dec!(1.5)), "alice").unwrap();
        assert_eq!(fees.next().await.unwrap().unwrap(), "100000000000");
    }

    #[tokio::test]
    async fn test_limits_follow_balance_updates() {
        let client = Arc::new(MockClient::new().with_fee(100_000_000_000));
        let (_registry, adapter) = bound_kusama(&client).await;

        let mut limits = adapter
            .subscribe_input_limits(&transfer(dec!(1)).query())
            .unwrap();
        client.push_balance("KSM", "alice", sample(dec!(10)));
        client.push_balance("KSM", "alice", sample(dec!(4)));

        let first = limits.next().await.unwrap().unwrap();
        let second = limits.next().await.unwrap().unwrap();
        assert_eq!(first.max_input, dec!(9.88));
        assert_eq!(second.max_input, dec!(3.88));
        assert_eq!(second.min_input, first.min_input);
    }

    #[tokio::test]
    async fn test_transfer_arrival_confirmed() {
        let client = Arc::new(MockClient::new());
        let (_registry, adapter) = bound_kusama(&client).await;

        let status = adapter
            .subscribe_balance_confirmation(&confirmation(dec!(100), None))
            .unwrap();
        for available in [dec!(1000), dec!(1050), dec!(1099), dec!(1100)] {
            client.push_balance("KSM", "bob", sample(available));
        }

        // target is 99 after tolerance; the third sample reaches it and
        // terminates the watch, the fourth is never consumed
        let updates: Vec<_> = status.collect().await;
        assert_eq!(
            updates,
            vec![
                BalanceChangeStatus::Checking,
                BalanceChangeStatus::Checking,
                BalanceChangeStatus::Success,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirmation_times_out_once() {
        let client = Arc::new(MockClient::new());
        let (_registry, adapter) = bound_kusama(&client).await;

        let status = adapter
            .subscribe_balance_confirmation(&confirmation(
                dec!(100),
                Some(Duration::from_secs(30)),
            ))
            .unwrap();
        client.push_balance("KSM", "bob", sample(dec!(1000)));

        let updates: Vec<_> = status.collect().await;
        assert_eq!(
            updates,
            vec![BalanceChangeStatus::Checking, BalanceChangeStatus::Timeout]
        );
    }

    #[tokio::test]
    async fn test_broken_subscription_reports_unknown_error() {
        let client = Arc::new(MockClient::new());
        let (_registry, adapter) = bound_kusama(&client).await;

        let status = adapter
            .subscribe_balance_confirmation(&confirmation(dec!(100), None))
            .unwrap();
        client.push_balance("KSM", "bob", sample(dec!(1000)));
        client.fail_balance("KSM", "bob", "websocket closed");

        let updates: Vec<_> = status.collect().await;
        assert_eq!(
            updates,
            vec![
                BalanceChangeStatus::Checking,
                BalanceChangeStatus::UnknownError,
            ]
        );
    }

    #[tokio::test]
    async fn test_terminal_status_releases_subscription() {
        let client = Arc::new(MockClient::new());
        let (_registry, adapter) = bound_kusama(&client).await;

        let status = adapter
            .subscribe_balance_confirmation(&confirmation(dec!(100), None))
            .unwrap();
        assert_eq!(client.active_subscriptions(), 1);

        client.push_balance("KSM", "bob", sample(dec!(1000)));
        client.push_balance("KSM", "bob", sample(dec!(1099)));
        let updates: Vec<_> = status.collect().await;

        assert_eq!(updates.last(), Some(&BalanceChangeStatus::Success));
        assert_eq!(client.active_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_dropping_limits_releases_subscriptions() {
        let client = Arc::new(MockClient::new().with_fee(1_000_000_000));
        let (_registry, adapter) = bound_kusama(&client).await;

        let limits = adapter
            .subscribe_input_limits(&transfer(dec!(1)).query())
            .unwrap();
        // one balance subscription plus the pushed fee stream
        assert_eq!(client.active_subscriptions(), 2);

        drop(limits);
        assert_eq!(client.active_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_unknown_token_fails_before_subscribing() {
        let client = Arc::new(MockClient::new());
        let (_registry, adapter) = bound_kusama(&client).await;

        let mut query = transfer(dec!(1)).query();
        query.token = "GLMR".to_string();
        let result = adapter.subscribe_input_limits(&query);

        assert!(matches!(
            result,
            Err(bridge_adapters::Error::Core(
                bridge_core::Error::TokenConfigNotFound { .. }
            ))
        ));
        assert_eq!(client.active_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_rejected_confirmation_opens_no_subscription() {
        let client = Arc::new(MockClient::new());
        let (_registry, adapter) = bound_kusama(&client).await;

        // tolerance 1 zeroes the target, which the monitor rejects
        let mut config = confirmation(dec!(100), None);
        config.tolerance = Some(dec!(1));
        let result = adapter.subscribe_balance_confirmation(&config);

        assert!(matches!(
            result,
            Err(bridge_adapters::Error::InvalidConfirmationTarget { .. })
        ));
        // not even transiently: the lifetime count stays at zero
        assert_eq!(client.opened_subscriptions(), 0);
    }

    #[tokio::test]
    async fn test_bind_over_ready_signal() {
        let client = Arc::new(MockClient::new().with_ready_signal());
        let (_registry, adapter) = bound_kusama(&client).await;

        assert_eq!(adapter.ss58_prefix().unwrap(), 42);
        let props = adapter.network_properties().await.unwrap();
        assert_eq!(props.token_symbol, vec!["UNIT".to_string()]);
    }
}
