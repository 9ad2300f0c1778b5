//! Balance confirmation monitor
//!
//! Confirms that a transfer arrived by watching the destination account's
//! available balance drift upward from a baseline. Every outcome is
//! delivered as a status value; the stream itself never fails, so callers
//! are never left with an unhandled rejection.

use crate::{Error, Result, DEFAULT_CONFIRMATION_TIMEOUT, DEFAULT_TOLERANCE};
use async_stream::stream;
use bridge_core::{BalanceChangeConfig, BalanceChangeStatus};
use chain_client::BalanceStream;
use futures::stream::BoxStream;
use futures::StreamExt;
use rust_decimal::Decimal;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Stream of confirmation states; completes after the terminal state
pub type StatusStream = BoxStream<'static, BalanceChangeStatus>;

/// Effective balance increase a confirmation must observe.
///
/// The target is `amount × (1 − tolerance)`. A target that is not positive
/// is rejected; it would report success on the very first sample, before
/// any transfer could have landed. Exposed on its own so callers can
/// reject a config before opening the balance subscription it would watch.
pub fn confirmation_target(config: &BalanceChangeConfig) -> Result<Decimal> {
    let tolerance = config.tolerance.unwrap_or(DEFAULT_TOLERANCE);
    let target = config.amount * (Decimal::ONE - tolerance);

    if target <= Decimal::ZERO {
        return Err(Error::InvalidConfirmationTarget { target });
    }

    Ok(target)
}

/// Watch `balances` until the available balance grows by the effective
/// target, the confirmation window elapses, or the source breaks.
///
/// Rejects configs whose [`confirmation_target`] is not positive.
pub fn confirm_balance_change(
    balances: BalanceStream,
    config: &BalanceChangeConfig,
) -> Result<StatusStream> {
    let target = confirmation_target(config)?;
    let window = config.timeout.unwrap_or(DEFAULT_CONFIRMATION_TIMEOUT);

    Ok(watch(balances, target, window))
}

fn watch(mut balances: BalanceStream, target: Decimal, window: Duration) -> StatusStream {
    stream! {
        // The window is measured from subscription start, not from the last
        // emission; one fixed deadline covers every sample.
        let deadline = Instant::now() + window;
        let mut baseline: Option<Decimal> = None;

        loop {
            let update = match tokio::time::timeout_at(deadline, balances.next()).await {
                Ok(update) => update,
                Err(_) => {
                    warn!(%target, "confirmation window elapsed");
                    yield BalanceChangeStatus::Timeout;
                    break;
                }
            };

            match update {
                Some(Ok(balance)) => {
                    // First sample fixes the baseline, so its diff is zero.
                    let base = *baseline.get_or_insert(balance.available);
                    let diff = balance.available - base;
                    debug!(%diff, %target, "balance sample");

                    if diff >= target {
                        yield BalanceChangeStatus::Success;
                        break;
                    }

                    yield BalanceChangeStatus::Checking;
                }
                Some(Err(err)) => {
                    warn!(error = %err, "balance subscription broke");
                    yield BalanceChangeStatus::UnknownError;
                    break;
                }
                None => {
                    // A closed source can no longer confirm anything.
                    warn!("balance subscription ended before confirmation");
                    yield BalanceChangeStatus::UnknownError;
                    break;
                }
            }
        }
        // Dropping here releases the balance subscription and the deadline
        // timer together.
    }
    .boxed()
}
