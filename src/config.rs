//! Deployment configuration for the on-chain marketplace program.
//!
//! The program id and token mint are fixed at deployment time; the RPC
//! endpoint depends on the cluster being targeted.

use solana_sdk::pubkey::Pubkey;

use crate::error::SdkError;

/// Marketplace program id for the current deployment.
pub const PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("6Xp9kTg2DmVnBhUz4rRw7sJfYq3cNeLaWdK8vM5tPuEH");

/// Token mint used for offer pricing, vault deposits and rewards.
pub const MINT_ID: Pubkey = solana_sdk::pubkey!("4mQw8ZrNc6TkXvB2hLyJp9sRfUeD3WgnKaEuHtM7VdPq");

/// SPL Token program id.
pub const TOKEN_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA");

/// SPL Associated Token Account program id.
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Pubkey =
    solana_sdk::pubkey!("ATokenGPVbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL");

/// System program id.
pub const SYSTEM_PROGRAM_ID: Pubkey = solana_sdk::pubkey!("11111111111111111111111111111111");

/// Default RPC endpoint (devnet deployment).
pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

/// Program-level configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramConfig {
    /// Marketplace program id.
    pub program_id: Pubkey,

    /// Token mint for pricing and settlement.
    pub mint: Pubkey,

    /// RPC endpoint URL.
    pub rpc_url: String,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            program_id: PROGRAM_ID,
            mint: MINT_ID,
            rpc_url: DEFAULT_RPC_URL.to_string(),
        }
    }
}

impl ProgramConfig {
    /// Creates a configuration for the default deployment against the given
    /// RPC endpoint.
    #[must_use]
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url: rpc_url.into(),
            ..Default::default()
        }
    }

    /// Overrides the program id.
    #[must_use]
    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = program_id;
        self
    }

    /// Overrides the token mint.
    #[must_use]
    pub fn with_mint(mut self, mint: Pubkey) -> Self {
        self.mint = mint;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the RPC endpoint is missing or malformed.
    pub fn validate(&self) -> Result<(), SdkError> {
        if self.rpc_url.is_empty() {
            return Err(SdkError::NotInitialized(
                "rpc_url cannot be empty".to_string(),
            ));
        }

        if !self.rpc_url.starts_with("http://") && !self.rpc_url.starts_with("https://") {
            return Err(SdkError::NotInitialized(
                "rpc_url must start with http:// or https://".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = ProgramConfig::default();
        assert_eq!(config.program_id, PROGRAM_ID);
        assert_eq!(config.mint, MINT_ID);
        assert_eq!(config.rpc_url, DEFAULT_RPC_URL);
    }

    #[test]
    fn test_config_new() {
        let config = ProgramConfig::new("http://127.0.0.1:8899");
        assert_eq!(config.rpc_url, "http://127.0.0.1:8899");
        assert_eq!(config.program_id, PROGRAM_ID);
    }

    #[test]
    fn test_config_overrides() {
        let program_id = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let config = ProgramConfig::default()
            .with_program_id(program_id)
            .with_mint(mint);
        assert_eq!(config.program_id, program_id);
        assert_eq!(config.mint, mint);
    }

    #[test]
    fn test_config_validate_valid() {
        assert!(ProgramConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validate_empty_url() {
        let config = ProgramConfig::new("");
        assert!(matches!(
            config.validate(),
            Err(SdkError::NotInitialized(_))
        ));
    }

    #[test]
    fn test_config_validate_bad_scheme() {
        let config = ProgramConfig::new("ws://localhost:8900");
        assert!(config.validate().is_err());
    }
}
