//! MakeOffer instruction builder.
//!
//! Lists a machine for rent with an hourly price, a maximum duration and
//! the advertised disk size.

use borsh::BorshSerialize;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use super::anchor_discriminator;
use crate::error::SdkError;

/// Arguments for the MakeOffer instruction (on-chain format).
#[derive(Debug, Clone, BorshSerialize)]
struct MakeOfferInstructionData {
    price: u64,
    max_duration: u64,
    disk: u64,
}

/// Builder for the MakeOffer instruction.
#[derive(Debug, Clone)]
pub struct MakeOfferBuilder {
    program_id: Pubkey,
    machine: Option<Pubkey>,
    owner: Option<Pubkey>,
    price_lamports: Option<u64>,
    max_duration: Option<u64>,
    disk: Option<u64>,
}

impl MakeOfferBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            machine: None,
            owner: None,
            price_lamports: None,
            max_duration: None,
            disk: None,
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

    /// Sets the hourly price in lamports.
    #[must_use]
    pub fn price_lamports(mut self, price: u64) -> Self {
        self.price_lamports = Some(price);
        self
    }

    /// Sets the maximum rentable duration in hours.
    #[must_use]
    pub fn max_duration(mut self, hours: u64) -> Self {
        self.max_duration = Some(hours);
        self
    }

    /// Sets the disk size in GB.
    #[must_use]
    pub fn disk(mut self, gb: u64) -> Self {
        self.disk = Some(gb);
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
        let price = self
            .price_lamports
            .ok_or_else(|| SdkError::Validation("price not set".to_string()))?;
        let max_duration = self
            .max_duration
            .ok_or_else(|| SdkError::Validation("max_duration not set".to_string()))?;
        let disk = self
            .disk
            .ok_or_else(|| SdkError::Validation("disk not set".to_string()))?;

        let accounts = vec![
            AccountMeta::new(machine, false),
            AccountMeta::new(owner, true),
        ];

        let instruction_data = MakeOfferInstructionData {
            price,
            max_duration,
            disk,
        };

        let mut data = anchor_discriminator("make_offer").to_vec();
        data.extend(
            borsh::to_vec(&instruction_data).map_err(|e| SdkError::Serialization(e.to_string()))?,
        );

        Ok(Instruction {
            program_id: self.program_id,
            accounts,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_offer_build() {
        let program_id = Pubkey::new_unique();
        let machine = Pubkey::new_unique();
        let owner = Pubkey::new_unique();

        let ix = MakeOfferBuilder::new(program_id)
            .machine(machine)
            .owner(owner)
            .price_lamports(1_500_000_000)
            .max_duration(48)
            .disk(256)
            .build()
            .expect("should build instruction");

        assert_eq!(ix.program_id, program_id);
        assert_eq!(ix.accounts.len(), 2);
        assert_eq!(ix.accounts[0].pubkey, machine);
        assert!(ix.accounts[1].is_signer); // owner
        assert_eq!(&ix.data[..8], &anchor_discriminator("make_offer"));
        // 3 u64 args after the discriminator
        assert_eq!(ix.data.len(), 8 + 24);
    }

    #[test]
    fn test_make_offer_missing_price() {
        let result = MakeOfferBuilder::new(Pubkey::new_unique())
            .machine(Pubkey::new_unique())
            .owner(Pubkey::new_unique())
            .max_duration(48)
            .disk(256)
            .build();

        assert!(matches!(result, Err(SdkError::Validation(_))));
    }

    #[test]
    fn test_make_offer_missing_machine() {
        let result = MakeOfferBuilder::new(Pubkey::new_unique())
            .owner(Pubkey::new_unique())
            .price_lamports(1)
            .max_duration(48)
            .disk(256)
            .build();

        assert!(matches!(result, Err(SdkError::InvalidAddress(_))));
    }
}
