//! Signed console-access URLs.
//!
//! Remote device consoles authenticate with a wallet signature over a
//! fixed message. The signature is base58-encoded into a debug-token URL
//! served by the device itself.

use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;

/// Scope of a console access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessScope {
    /// Interactive workspace access.
    Workspace,
    /// Deployment access.
    Deploy,
}

impl AccessScope {
    /// Returns the message prefix for this scope.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Workspace => "workspace",
            Self::Deploy => "deploy",
        }
    }
}

/// Returns the message a wallet must sign for the given scope.
#[must_use]
pub fn access_message(scope: AccessScope, wallet: &Keypair) -> String {
    format!("{}/token/{}", scope.as_str(), wallet.pubkey())
}

/// Signs the access message for the given scope.
#[must_use]
pub fn sign_access_token(wallet: &Keypair, scope: AccessScope) -> Signature {
    wallet.sign_message(access_message(scope, wallet).as_bytes())
}

/// Builds the signed debug-token URL for a device console.
#[must_use]
pub fn debug_console_url(ip: &str, port: u16, wallet: &Keypair, scope: AccessScope) -> String {
    let signature = sign_access_token(wallet, scope);
    let token = bs58::encode(signature.as_ref()).into_string();
    format!("http://{}:{}/distri/workspace/debugToken/{}", ip, port, token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_message_format() {
        let wallet = Keypair::new();
        let msg = access_message(AccessScope::Workspace, &wallet);
        assert_eq!(msg, format!("workspace/token/{}", wallet.pubkey()));

        let msg = access_message(AccessScope::Deploy, &wallet);
        assert_eq!(msg, format!("deploy/token/{}", wallet.pubkey()));
    }

    #[test]
    fn test_signature_verifies() {
        let wallet = Keypair::new();
        let signature = sign_access_token(&wallet, AccessScope::Workspace);
        let msg = access_message(AccessScope::Workspace, &wallet);
        assert!(signature.verify(wallet.pubkey().as_ref(), msg.as_bytes()));
    }

    #[test]
    fn test_debug_console_url_format() {
        let wallet = Keypair::new();
        let url = debug_console_url("10.0.0.2", 8080, &wallet, AccessScope::Workspace);
        let signature = sign_access_token(&wallet, AccessScope::Workspace);
        assert_eq!(
            url,
            format!("http://10.0.0.2:8080/distri/workspace/debugToken/{}", signature)
        );
    }
}
