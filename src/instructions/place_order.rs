//! PlaceOrder instruction builder.
//!
//! Rents a machine for a number of hours. The order account PDA is derived
//! from the buyer and the 16-byte order id; metadata is serialized to a
//! JSON string with the machine address injected so the device can be
//! recovered from the order record alone.

use borsh::BorshSerialize;
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
};

use super::anchor_discriminator;
use super::pda::{derive_associated_token_address, derive_order_address, derive_vault_address};
use crate::config::{ASSOCIATED_TOKEN_PROGRAM_ID, SYSTEM_PROGRAM_ID, TOKEN_PROGRAM_ID};
use crate::error::SdkError;
use crate::types::OrderId;

/// Arguments for the PlaceOrder instruction (on-chain format).
#[derive(Debug, Clone, BorshSerialize)]
struct PlaceOrderInstructionData {
    order_id: [u8; 16],
    duration: u64,
    metadata: String,
}

/// Builder for the PlaceOrder instruction.
#[derive(Debug, Clone)]
pub struct PlaceOrderBuilder {
    program_id: Pubkey,
    mint: Pubkey,
    machine: Option<Pubkey>,
    buyer: Option<Pubkey>,
    order_id: Option<OrderId>,
    duration: Option<u64>,
    metadata: Option<serde_json::Value>,
}

impl PlaceOrderBuilder {
    /// Creates a new builder for the given program and settlement mint.
    #[must_use]
    pub fn new(program_id: Pubkey, mint: Pubkey) -> Self {
        Self {
            program_id,
            mint,
            machine: None,
            buyer: None,
            order_id: None,
            duration: None,
            metadata: None,
        }
    }

    /// Sets the machine account.
    #[must_use]
    pub fn machine(mut self, machine: Pubkey) -> Self {
        self.machine = Some(machine);
        self
    }

    /// Sets the buyer wallet.
    #[must_use]
    pub fn buyer(mut self, buyer: Pubkey) -> Self {
        self.buyer = Some(buyer);
        self
    }

    /// Sets the order id.
    #[must_use]
    pub fn order_id(mut self, order_id: OrderId) -> Self {
        self.order_id = Some(order_id);
        self
    }

    /// Sets the rental duration in hours.
    #[must_use]
    pub fn duration(mut self, hours: u64) -> Self {
        self.duration = Some(hours);
        self
    }

    /// Sets the order metadata. Must be a JSON object.
    #[must_use]
    pub fn metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Builds the instruction.
    ///
    /// # Errors
    ///
    /// Returns an error if a required field is not set or the metadata is
    /// not a JSON object.
    pub fn build(self) -> Result<Instruction, SdkError> {
        let machine = self
            .machine
            .ok_or_else(|| SdkError::InvalidAddress("machine not set".to_string()))?;
        let buyer = self
            .buyer
            .ok_or_else(|| SdkError::InvalidAddress("buyer not set".to_string()))?;
        let order_id = self
            .order_id
            .ok_or_else(|| SdkError::Validation("order_id not set".to_string()))?;
        let duration = self
            .duration
            .ok_or_else(|| SdkError::Validation("duration not set".to_string()))?;

        let mut metadata = match self.metadata {
            Some(serde_json::Value::Object(map)) => map,
            None => serde_json::Map::new(),
            Some(other) => {
                return Err(SdkError::Validation(format!(
                    "metadata must be a JSON object, got {}",
                    other
                )))
            }
        };
        metadata.insert(
            "machinePublicKey".to_string(),
            serde_json::Value::String(machine.to_string()),
        );
        let metadata_json = serde_json::to_string(&metadata)
            .map_err(|e| SdkError::Serialization(e.to_string()))?;

        let (order, _) = derive_order_address(&self.program_id, &buyer, &order_id);
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
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ];

        let instruction_data = PlaceOrderInstructionData {
            order_id: *order_id.as_bytes(),
            duration,
            metadata: metadata_json,
        };

        let mut data = anchor_discriminator("place_order").to_vec();
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
    use serde_json::json;

    fn builder() -> PlaceOrderBuilder {
        PlaceOrderBuilder::new(Pubkey::new_unique(), Pubkey::new_unique())
    }

    #[test]
    fn test_place_order_build() {
        let machine = Pubkey::new_unique();
        let buyer = Pubkey::new_unique();
        let order_id = OrderId::new("order-0001").expect("valid id");

        let ix = builder()
            .machine(machine)
            .buyer(buyer)
            .order_id(order_id)
            .duration(10)
            .metadata(json!({"formData": {"taskName": "train"}}))
            .build()
            .expect("should build instruction");

        assert_eq!(ix.accounts.len(), 9);
        assert_eq!(ix.accounts[0].pubkey, machine);
        assert!(ix.accounts[2].is_signer); // buyer
        assert_eq!(&ix.data[..8], &anchor_discriminator("place_order"));
    }

    #[test]
    fn test_place_order_injects_machine_key() {
        let machine = Pubkey::new_unique();
        let ix = builder()
            .machine(machine)
            .buyer(Pubkey::new_unique())
            .order_id(OrderId::new("o1").expect("valid id"))
            .duration(1)
            .metadata(json!({}))
            .build()
            .expect("should build instruction");

        // The borsh-encoded metadata string carries the injected key.
        let payload = String::from_utf8_lossy(&ix.data);
        assert!(payload.contains("machinePublicKey"));
        assert!(payload.contains(&machine.to_string()));
    }

    #[test]
    fn test_place_order_rejects_non_object_metadata() {
        let result = builder()
            .machine(Pubkey::new_unique())
            .buyer(Pubkey::new_unique())
            .order_id(OrderId::new("o1").expect("valid id"))
            .duration(1)
            .metadata(json!([1, 2, 3]))
            .build();

        assert!(matches!(result, Err(SdkError::Validation(_))));
    }

    #[test]
    fn test_place_order_missing_duration() {
        let result = builder()
            .machine(Pubkey::new_unique())
            .buyer(Pubkey::new_unique())
            .order_id(OrderId::new("o1").expect("valid id"))
            .build();

        assert!(result.is_err());
    }

    #[test]
    fn test_place_order_same_seeds_same_order_account() {
        let program_id = Pubkey::new_unique();
        let mint = Pubkey::new_unique();
        let machine = Pubkey::new_unique();
        let buyer = Pubkey::new_unique();
        let order_id = OrderId::new("order-0001").expect("valid id");

        let build = || {
            PlaceOrderBuilder::new(program_id, mint)
                .machine(machine)
                .buyer(buyer)
                .order_id(order_id)
                .duration(5)
                .build()
                .expect("should build instruction")
        };

        assert_eq!(build().accounts[1].pubkey, build().accounts[1].pubkey);
    }
}
