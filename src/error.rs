//! SDK error types.
//!
//! Every fallible SDK operation returns a typed error rather than a bare
//! message string, so callers can branch on the kind instead of matching
//! on text.

/// SDK errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SdkError {
    /// The program client was used before an RPC endpoint was configured.
    #[error("program client not initialized: {0}")]
    NotInitialized(String),

    /// No wallet is attached to the program client.
    #[error("wallet not connected: {0}")]
    WalletDisconnected(String),

    /// A caller-supplied parameter failed validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Invalid address or missing account.
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Instruction data serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// An RPC call failed; the underlying message is preserved verbatim.
    #[error("rpc failure: {0}")]
    Rpc(String),

    /// The transaction was submitted but not finalized within the poll budget.
    #[error("confirmation timed out for {signature} after {polls} polls")]
    ConfirmationTimeout {
        /// Base58-encoded transaction signature.
        signature: String,
        /// Number of status polls performed before giving up.
        polls: u32,
    },

    /// The transaction was finalized but the program rejected it.
    #[error("transaction {signature} failed on-chain: {error}")]
    TransactionFailed {
        /// Base58-encoded transaction signature.
        signature: String,
        /// Error reported by the runtime.
        error: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_initialized_display() {
        let err = SdkError::NotInitialized("no rpc endpoint".to_string());
        assert_eq!(
            err.to_string(),
            "program client not initialized: no rpc endpoint"
        );
    }

    #[test]
    fn test_validation_display() {
        let err = SdkError::Validation("order id too long".to_string());
        assert_eq!(err.to_string(), "validation failed: order id too long");
    }

    #[test]
    fn test_confirmation_timeout_display() {
        let err = SdkError::ConfirmationTimeout {
            signature: "abc".to_string(),
            polls: 30,
        };
        assert_eq!(
            err.to_string(),
            "confirmation timed out for abc after 30 polls"
        );
    }
}
