//! Transaction confirmation polling.
//!
//! A submitted transaction is only reported as successful once the network
//! marks it finalized. The poller waits an initial propagation delay, then
//! checks the signature status at a fixed interval under a bounded poll
//! budget, so a hung RPC endpoint cannot block the caller indefinitely.

use std::time::Duration;

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_commitment_config::CommitmentConfig;
use solana_sdk::signature::Signature;
use tracing::{debug, warn};

use crate::error::SdkError;

/// Configuration for confirmation polling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmConfig {
    /// Delay before the first status check, allowing the transaction to
    /// propagate.
    pub initial_delay: Duration,

    /// Interval between status checks.
    pub poll_interval: Duration,

    /// Maximum number of status checks before giving up.
    pub max_polls: u32,
}

impl Default for ConfirmConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(3),
            poll_interval: Duration::from_secs(1),
            max_polls: 30,
        }
    }
}

impl ConfirmConfig {
    /// Sets the initial propagation delay.
    #[must_use]
    pub fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Sets the interval between status checks.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Sets the poll budget.
    #[must_use]
    pub fn with_max_polls(mut self, max_polls: u32) -> Self {
        self.max_polls = max_polls;
        self
    }

    /// Upper bound on total wall-clock time spent waiting.
    #[must_use]
    pub fn max_wait(&self) -> Duration {
        self.initial_delay + self.poll_interval * self.max_polls
    }
}

/// Polls until the signature reaches finalized commitment.
///
/// # Errors
///
/// Returns [`SdkError::TransactionFailed`] if the runtime rejected the
/// transaction, [`SdkError::ConfirmationTimeout`] when the poll budget is
/// exhausted, or [`SdkError::Rpc`] for transport failures.
pub async fn wait_for_finalized(
    rpc: &RpcClient,
    signature: &Signature,
    config: &ConfirmConfig,
) -> Result<(), SdkError> {
    tokio::time::sleep(config.initial_delay).await;

    for poll in 0..config.max_polls {
        let status = rpc
            .get_signature_status_with_commitment(signature, CommitmentConfig::finalized())
            .await
            .map_err(|e| SdkError::Rpc(e.to_string()))?;

        match status {
            Some(Ok(())) => {
                debug!(%signature, poll, "transaction finalized");
                return Ok(());
            }
            Some(Err(e)) => {
                warn!(%signature, error = %e, "transaction failed on-chain");
                return Err(SdkError::TransactionFailed {
                    signature: signature.to_string(),
                    error: e.to_string(),
                });
            }
            None => {
                debug!(%signature, poll, "transaction not yet finalized");
                tokio::time::sleep(config.poll_interval).await;
            }
        }
    }

    Err(SdkError::ConfirmationTimeout {
        signature: signature.to_string(),
        polls: config.max_polls,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_config_default() {
        let config = ConfirmConfig::default();
        assert_eq!(config.initial_delay, Duration::from_secs(3));
        assert_eq!(config.poll_interval, Duration::from_secs(1));
        assert_eq!(config.max_polls, 30);
    }

    #[test]
    fn test_confirm_config_builder() {
        let config = ConfirmConfig::default()
            .with_initial_delay(Duration::from_millis(100))
            .with_poll_interval(Duration::from_millis(250))
            .with_max_polls(4);
        assert_eq!(config.initial_delay, Duration::from_millis(100));
        assert_eq!(config.poll_interval, Duration::from_millis(250));
        assert_eq!(config.max_polls, 4);
    }

    #[test]
    fn test_confirm_config_max_wait_bounded() {
        let config = ConfirmConfig::default()
            .with_initial_delay(Duration::from_secs(3))
            .with_poll_interval(Duration::from_secs(1))
            .with_max_polls(30);
        assert_eq!(config.max_wait(), Duration::from_secs(33));
    }

    fn fast_config() -> ConfirmConfig {
        ConfirmConfig::default()
            .with_initial_delay(Duration::ZERO)
            .with_poll_interval(Duration::from_millis(1))
            .with_max_polls(3)
    }

    #[tokio::test]
    async fn test_wait_for_finalized_success() {
        let rpc = RpcClient::new_mock("succeeds".to_string());
        let signature = Signature::default();
        wait_for_finalized(&rpc, &signature, &fast_config())
            .await
            .expect("finalized signature should confirm");
    }

    #[tokio::test]
    async fn test_wait_for_finalized_times_out_after_poll_budget() {
        let rpc = RpcClient::new_mock("sig_not_found".to_string());
        let signature = Signature::default();
        match wait_for_finalized(&rpc, &signature, &fast_config()).await {
            Err(SdkError::ConfirmationTimeout { polls, signature: s }) => {
                assert_eq!(polls, 3);
                assert_eq!(s, signature.to_string());
            }
            other => panic!("expected confirmation timeout, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_wait_for_finalized_surfaces_on_chain_error() {
        let rpc = RpcClient::new_mock("instruction_error".to_string());
        let signature = Signature::default();
        match wait_for_finalized(&rpc, &signature, &fast_config()).await {
            Err(SdkError::TransactionFailed { signature: s, error }) => {
                assert_eq!(s, signature.to_string());
                assert!(!error.is_empty());
            }
            other => panic!("expected transaction failure, got {:?}", other),
        }
    }
}
