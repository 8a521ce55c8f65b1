//! RenewOrder instruction builder.
//!
//! Extends a running order by a number of hours, paid from the buyer's
//! associated token account into the vault.

use borsh::BorshSerialize;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use super::anchor_discriminator;
use super::pda::{derive_associated_token_address, derive_vault_address};
use crate::config::{ASSOCIATED_TOKEN_PROGRAM_ID, TOKEN_PROGRAM_ID};
use crate::error::SdkError;

/// Arguments for the RenewOrder instruction (on-chain format).
#[derive(Debug, Clone, BorshSerialize)]
struct RenewOrderInstructionData {
    duration: u64,
}

/// Builder for the RenewOrder instruction.
#[derive(Debug, Clone)]
pub struct RenewOrderBuilder {
    program_id: Pubkey,
    mint: Pubkey,
    machine: Option<Pubkey>,
    order: Option<Pubkey>,
    buyer: Option<Pubkey>,
    duration: Option<u64>,
}

impl RenewOrderBuilder {
    /// Creates a new builder for the given program and settlement mint.
    #[must_use]
    pub fn new(program_id: Pubkey, mint: Pubkey) -> Self {
        Self {
            program_id,
            mint,
            machine: None,
            order: None,
            buyer: None,
            duration: None,
        }
    }

    /// Sets the machine account.
    #[must_use]
    pub fn machine(mut self, machine: Pubkey) -> Self {
        self.machine = Some(machine);
        self
    }

    /// Sets the order account.
    #[must_use]
    pub fn order(mut self, order: Pubkey) -> Self {
        self.order = Some(order);
        self
    }

    /// Sets the buyer wallet.
    #[must_use]
    pub fn buyer(mut self, buyer: Pubkey) -> Self {
        self.buyer = Some(buyer);
        self
    }

    /// Sets the number of hours to extend by.
    #[must_use]
    pub fn duration(mut self, hours: u64) -> Self {
        self.duration = Some(hours);
        self
    }

    /// Builds the instruction.
    ///
    /// # Errors
    ///
    /// Returns an error if any required field is not set.
    pub fn build(self) -> Result<Instruction, SdkError> {
        let machine = self
            .machine
            .ok_or_else(|| SdkError::InvalidAddress("machine not set".to_string()))?;
        let order = self
            .order
            .ok_or_else(|| SdkError::InvalidAddress("order not set".to_string()))?;
        let buyer = self
            .buyer
            .ok_or_else(|| SdkError::InvalidAddress("buyer not set".to_string()))?;
        let duration = self
            .duration
            .ok_or_else(|| SdkError::Validation("duration not set".to_string()))?;

        let (buyer_ata, _) = derive_associated_token_address(&buyer, &self.mint);
        let (vault, _) = derive_vault_address(&self.program_id, &self.mint);

        let accounts = vec![
            AccountMeta::new(machine, false),
            AccountMeta::new(order, false),
            AccountMeta::new(buyer, true),
            AccountMeta::new(buyer_ata, false),
            AccountMeta::new(vault, false),
            AccountMeta::new_readonly(self.mint, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
        ];

        let mut data = anchor_discriminator("renew_order").to_vec();
        data.extend(
            borsh::to_vec(&RenewOrderInstructionData { duration })
                .map_err(|e| SdkError::Serialization(e.to_string()))?,
        );

        Ok(Instruction {
            program_id: self.program_id,
            accounts,
            data,
        })
    }
}
