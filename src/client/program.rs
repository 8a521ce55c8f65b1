//! On-chain program client.
//!
//! [`ProgramClient`] is the explicit handle for every on-chain operation:
//! it owns the RPC connection, the signing wallet and the deployment
//! configuration. There is no hidden module state; a client that has not
//! been built cannot submit anything, and building fails fast with a typed
//! error when the RPC endpoint or wallet is missing.

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_commitment_config::CommitmentConfig;
use solana_sdk::{
    instruction::Instruction,
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};
use tracing::{debug, info};

use super::confirm::{wait_for_finalized, ConfirmConfig};
use crate::config::ProgramConfig;
use crate::error::SdkError;
use crate::instructions::{
    derive_associated_token_address, derive_machine_address, derive_order_address,
    CancelOfferBuilder, ClaimRewardsBuilder, MakeOfferBuilder, PlaceOrderBuilder,
    RefundOrderBuilder, RenewOrderBuilder,
};
use crate::types::{MachineUuid, OrderId};

/// Builder for [`ProgramClient`].
#[derive(Debug, Default)]
pub struct ProgramClientBuilder {
    config: Option<ProgramConfig>,
    wallet: Option<Keypair>,
    confirm: ConfirmConfig,
}

impl ProgramClientBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the deployment configuration (program id, mint, RPC endpoint).
    #[must_use]
    pub fn config(mut self, config: ProgramConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Attaches the signing wallet.
    #[must_use]
    pub fn wallet(mut self, wallet: Keypair) -> Self {
        self.wallet = Some(wallet);
        self
    }

    /// Overrides the confirmation polling configuration.
    #[must_use]
    pub fn confirm_config(mut self, confirm: ConfirmConfig) -> Self {
        self.confirm = confirm;
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns [`SdkError::NotInitialized`] when no valid configuration was
    /// provided and [`SdkError::WalletDisconnected`] when no wallet is
    /// attached. Both checks happen before any network call.
    pub fn build(self) -> Result<ProgramClient, SdkError> {
        let config = self.config.ok_or_else(|| {
            SdkError::NotInitialized("program configuration not set".to_string())
        })?;
        config.validate()?;
        let wallet = self.wallet.ok_or_else(|| {
            SdkError::WalletDisconnected("no wallet attached to the client".to_string())
        })?;

        let rpc =
            RpcClient::new_with_commitment(config.rpc_url.clone(), CommitmentConfig::finalized());
        let (wallet_ata, _) = derive_associated_token_address(&wallet.pubkey(), &config.mint);

        Ok(ProgramClient {
            config,
            rpc,
            wallet,
            wallet_ata,
            confirm: self.confirm,
        })
    }
}

/// Client for the on-chain marketplace program.
pub struct ProgramClient {
    config: ProgramConfig,
    rpc: RpcClient,
    wallet: Keypair,
    wallet_ata: Pubkey,
    confirm: ConfirmConfig,
}

impl ProgramClient {
    /// Returns a new builder.
    #[must_use]
    pub fn builder() -> ProgramClientBuilder {
        ProgramClientBuilder::new()
    }

    /// Returns the deployment configuration.
    #[must_use]
    pub fn config(&self) -> &ProgramConfig {
        &self.config
    }

    /// Returns the wallet public key.
    #[must_use]
    pub fn wallet_pubkey(&self) -> Pubkey {
        self.wallet.pubkey()
    }

    /// Returns the wallet's associated token account for the settlement
    /// mint.
    #[must_use]
    pub fn wallet_token_account(&self) -> Pubkey {
        self.wallet_ata
    }

    /// Derives the machine account address for a provider and UUID.
    #[must_use]
    pub fn machine_address(&self, provider: &Pubkey, uuid: &MachineUuid) -> Pubkey {
        derive_machine_address(&self.config.program_id, provider, uuid).0
    }

    /// Derives the order account address for this wallet and an order id.
    #[must_use]
    pub fn order_address(&self, order_id: &OrderId) -> Pubkey {
        derive_order_address(&self.config.program_id, &self.wallet.pubkey(), order_id).0
    }

    /// Lists a machine for rent.
    ///
    /// # Errors
    ///
    /// Returns an error if the instruction cannot be built, submission
    /// fails, or the transaction is not finalized in time.
    pub async fn make_offer(
        &self,
        machine: Pubkey,
        price_lamports: u64,
        max_duration: u64,
        disk: u64,
    ) -> Result<Signature, SdkError> {
        let ix = MakeOfferBuilder::new(self.config.program_id)
            .machine(machine)
            .owner(self.wallet.pubkey())
            .price_lamports(price_lamports)
            .max_duration(max_duration)
            .disk(disk)
            .build()?;
        self.send_and_confirm(ix).await
    }

    /// Delists a machine.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::make_offer`].
    pub async fn cancel_offer(&self, machine: Pubkey) -> Result<Signature, SdkError> {
        let ix = CancelOfferBuilder::new(self.config.program_id)
            .machine(machine)
            .owner(self.wallet.pubkey())
            .build()?;
        self.send_and_confirm(ix).await
    }

    /// Rents a machine for `duration` hours.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::make_offer`], plus validation of the
    /// order id and metadata.
    pub async fn place_order(
        &self,
        machine: Pubkey,
        order_id: OrderId,
        duration: u64,
        metadata: serde_json::Value,
    ) -> Result<Signature, SdkError> {
        let ix = PlaceOrderBuilder::new(self.config.program_id, self.config.mint)
            .machine(machine)
            .buyer(self.wallet.pubkey())
            .order_id(order_id)
            .duration(duration)
            .metadata(metadata)
            .build()?;
        self.send_and_confirm(ix).await
    }

    /// Extends a running order by `duration` hours.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::make_offer`].
    pub async fn renew_order(
        &self,
        machine: Pubkey,
        order: Pubkey,
        duration: u64,
    ) -> Result<Signature, SdkError> {
        let ix = RenewOrderBuilder::new(self.config.program_id, self.config.mint)
            .machine(machine)
            .order(order)
            .buyer(self.wallet.pubkey())
            .duration(duration)
            .build()?;
        self.send_and_confirm(ix).await
    }

    /// Refunds the unused remainder of an order.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Self::make_offer`].
    pub async fn refund_order(
        &self,
        machine: Pubkey,
        order: Pubkey,
        seller: Pubkey,
    ) -> Result<Signature, SdkError> {
        let ix = RefundOrderBuilder::new(self.config.program_id, self.config.mint)
            .machine(machine)
            .order(order)
            .buyer(self.wallet.pubkey())
            .seller(seller)
            .build()?;
        self.send_and_confirm(ix).await
    }

    /// Builds a claim-rewards instruction for deferred submission.
    ///
    /// Several periods can be claimed in one transaction by collecting the
    /// instructions and passing them to [`Self::submit_instructions`].
    ///
    /// # Errors
    ///
    /// Returns an error if the instruction cannot be built. No network
    /// call is made.
    pub fn claim_rewards_instruction(
        &self,
        machine: Pubkey,
        machine_uuid: MachineUuid,
        owner: Pubkey,
        period: u32,
    ) -> Result<Instruction, SdkError> {
        ClaimRewardsBuilder::new(self.config.program_id, self.config.mint)
            .machine(machine)
            .machine_uuid(machine_uuid)
            .owner(owner)
            .period(period)
            .build()
    }

    /// Signs, submits and confirms a batch of instructions as one
    /// transaction.
    ///
    /// # Errors
    ///
    /// Returns an error on an empty batch, RPC failure, on-chain rejection
    /// or confirmation timeout.
    pub async fn submit_instructions(
        &self,
        instructions: &[Instruction],
    ) -> Result<Signature, SdkError> {
        if instructions.is_empty() {
            return Err(SdkError::Validation(
                "cannot submit an empty instruction batch".to_string(),
            ));
        }

        let blockhash = self
            .rpc
            .get_latest_blockhash()
            .await
            .map_err(|e| SdkError::Rpc(e.to_string()))?;
        debug!(%blockhash, count = instructions.len(), "signing transaction");

        let payer = self.wallet.pubkey();
        let tx =
            Transaction::new_signed_with_payer(instructions, Some(&payer), &[&self.wallet], blockhash);

        let signature = self
            .rpc
            .send_transaction(&tx)
            .await
            .map_err(|e| SdkError::Rpc(e.to_string()))?;
        info!(%signature, "transaction submitted");

        wait_for_finalized(&self.rpc, &signature, &self.confirm).await?;
        info!(%signature, "transaction finalized");
        Ok(signature)
    }

    /// Fetches the settlement-token balance of a wallet, in lamports.
    ///
    /// # Errors
    ///
    /// Returns an error on RPC failure or an unparseable balance.
    pub async fn token_balance(&self, owner: &Pubkey) -> Result<u64, SdkError> {
        let (ata, _) = derive_associated_token_address(owner, &self.config.mint);
        let balance = self
            .rpc
            .get_token_account_balance(&ata)
            .await
            .map_err(|e| SdkError::Rpc(e.to_string()))?;
        balance
            .amount
            .parse::<u64>()
            .map_err(|e| SdkError::Rpc(format!("unparseable token balance: {}", e)))
    }

    async fn send_and_confirm(&self, ix: Instruction) -> Result<Signature, SdkError> {
        self.submit_instructions(std::slice::from_ref(&ix)).await
    }
}
