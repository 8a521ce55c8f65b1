//! RefundOrder instruction builder.
//!
//! Refunds the unused remainder of an order. The consumed portion is
//! settled to the seller's associated token account, the rest returned to
//! the buyer's.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use super::anchor_discriminator;
use super::pda::{derive_associated_token_address, derive_vault_address};
use crate::config::{ASSOCIATED_TOKEN_PROGRAM_ID, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID};
use crate::error::SdkError;

/// Builder for the RefundOrder instruction.
#[derive(Debug, Clone)]
pub struct RefundOrderBuilder {
    program_id: Pubkey,
    mint: Pubkey,
    machine: Option<Pubkey>,
    order: Option<Pubkey>,
    buyer: Option<Pubkey>,
    seller: Option<Pubkey>,
}

impl RefundOrderBuilder {
    /// Creates a new builder for the given program and settlement mint.
    #[must_use]
    pub fn new(program_id: Pubkey, mint: Pubkey) -> Self {
        Self {
            program_id,
            mint,
            machine: None,
            order: None,
            buyer: None,
            seller: None,
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

    /// Sets the seller wallet; its associated token account receives the
    /// consumed portion.
    #[must_use]
    pub fn seller(mut self, seller: Pubkey) -> Self {
        self.seller = Some(seller);
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
        let seller = self
            .seller
            .ok_or_else(|| SdkError::InvalidAddress("seller not set".to_string()))?;

        let (buyer_ata, _) = derive_associated_token_address(&buyer, &self.mint);
        let (seller_ata, _) = derive_associated_token_address(&seller, &self.mint);
        let (vault, _) = derive_vault_address(&self.program_id, &self.mint);

        let accounts = vec![
            AccountMeta::new(machine, false),
            AccountMeta::new(order, false),
            AccountMeta::new(buyer, true),
            AccountMeta::new(buyer_ata, false),
            AccountMeta::new(seller_ata, false),
            AccountMeta::new(vault, false),
            AccountMeta::new_readonly(self.mint, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ];

        Ok(Instruction {
            program_id: self.program_id,
            accounts,
            data: anchor_discriminator("refund_order").to_vec(),
        })
    }
}
