//! ClaimRewards instruction builder.
//!
//! Claims mining rewards for one machine and one period. Unlike the order
//! operations this returns a bare instruction so callers can batch several
//! periods into a single transaction before submitting.

use borsh::BorshSerialize;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use super::anchor_discriminator;
use super::pda::{
    derive_associated_token_address, derive_reward_address, derive_reward_machine_address,
    derive_reward_pool_address,
};
use crate::config::{ASSOCIATED_TOKEN_PROGRAM_ID, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID};
use crate::error::SdkError;
use crate::types::MachineUuid;

/// Arguments for the Claim instruction (on-chain format).
#[derive(Debug, Clone, BorshSerialize)]
struct ClaimInstructionData {
    period: u32,
}

/// Builder for the Claim instruction.
#[derive(Debug, Clone)]
pub struct ClaimRewardsBuilder {
    program_id: Pubkey,
    mint: Pubkey,
    machine: Option<Pubkey>,
    machine_uuid: Option<MachineUuid>,
    owner: Option<Pubkey>,
    period: Option<u32>,
}

impl ClaimRewardsBuilder {
    /// Creates a new builder for the given program and settlement mint.
    #[must_use]
    pub fn new(program_id: Pubkey, mint: Pubkey) -> Self {
        Self {
            program_id,
            mint,
            machine: None,
            machine_uuid: None,
            owner: None,
            period: None,
        }
    }

    /// Sets the machine account.
    #[must_use]
    pub fn machine(mut self, machine: Pubkey) -> Self {
        self.machine = Some(machine);
        self
    }

    /// Sets the machine UUID.
    #[must_use]
    pub fn machine_uuid(mut self, uuid: MachineUuid) -> Self {
        self.machine_uuid = Some(uuid);
        self
    }

    /// Sets the machine owner; its associated token account receives the
    /// reward.
    #[must_use]
    pub fn owner(mut self, owner: Pubkey) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Sets the reward period.
    #[must_use]
    pub fn period(mut self, period: u32) -> Self {
        self.period = Some(period);
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
        let uuid = self
            .machine_uuid
            .ok_or_else(|| SdkError::Validation("machine_uuid not set".to_string()))?;
        let owner = self
            .owner
            .ok_or_else(|| SdkError::InvalidAddress("owner not set".to_string()))?;
        let period = self
            .period
            .ok_or_else(|| SdkError::Validation("period not set".to_string()))?;

        let (reward, _) = derive_reward_address(&self.program_id, period);
        let (reward_machine, _) =
            derive_reward_machine_address(&self.program_id, period, &owner, &uuid);
        let (owner_ata, _) = derive_associated_token_address(&owner, &self.mint);
        let (reward_pool, _) = derive_reward_pool_address(&self.program_id, &self.mint);

        let accounts = vec![
            AccountMeta::new_readonly(machine, false),
            AccountMeta::new(reward, false),
            AccountMeta::new(reward_machine, false),
            AccountMeta::new(owner, true),
            AccountMeta::new(owner_ata, false),
            AccountMeta::new(reward_pool, false),
            AccountMeta::new_readonly(self.mint, false),
            AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ];

        let mut data = anchor_discriminator("claim").to_vec();
        data.extend(
            borsh::to_vec(&ClaimInstructionData { period })
                .map_err(|e| SdkError::Serialization(e.to_string()))?,
        );

        Ok(Instruction {
            program_id: self.program_id,
            accounts,
            data,
        })
    }
}
