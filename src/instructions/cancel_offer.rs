//! CancelOffer instruction builder.
//!
//! Delists a machine. Takes no arguments beyond the accounts.

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use super::anchor_discriminator;
use crate::error::SdkError;

/// Builder for the CancelOffer instruction.
#[derive(Debug, Clone)]
pub struct CancelOfferBuilder {
    program_id: Pubkey,
    machine: Option<Pubkey>,
    owner: Option<Pubkey>,
}

impl CancelOfferBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            machine: None,
            owner: None,
        }
    }

    /// Sets the machine account.
    #[must_use]
    pub fn machine(mut self, machine: Pubkey) -> Self {
        self.machine = Some(machine);
        self
    }

    /// Sets the owner (provider) account.
    #[must_use]
    pub fn owner(mut self, owner: Pubkey) -> Self {
        self.owner = Some(owner);
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
        let owner = self
            .owner
            .ok_or_else(|| SdkError::InvalidAddress("owner not set".to_string()))?;

        let accounts = vec![
            AccountMeta::new(machine, false),
            AccountMeta::new(owner, true),
        ];

        Ok(Instruction {
            program_id: self.program_id,
            accounts,
            data: anchor_discriminator("cancel_offer").to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_offer_build() {
        let program_id = Pubkey::new_unique();
        let machine = Pubkey::new_unique();
        let owner = Pubkey::new_unique();

        let ix = CancelOfferBuilder::new(program_id)
            .machine(machine)
            .owner(owner)
            .build()
            .expect("should build instruction");

        assert_eq!(ix.accounts.len(), 2);
        assert!(ix.accounts[1].is_signer);
        assert_eq!(ix.data, anchor_discriminator("cancel_offer").to_vec());
    }

    #[test]
    fn test_cancel_offer_missing_owner() {
        let result = CancelOfferBuilder::new(Pubkey::new_unique())
            .machine(Pubkey::new_unique())
            .build();
        assert!(result.is_err());
    }
}
