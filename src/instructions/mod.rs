//! Instruction builders for marketplace transactions.
//!
//! One builder per on-chain operation. Each builder resolves the PDAs the
//! instruction needs, assembles the account list in the exact order the
//! program expects, and borsh-encodes the arguments behind an Anchor
//! discriminator.
//!
//! # Example
//!
//! ```rust
//! use distri_sdk::instructions::MakeOfferBuilder;
//! use distri_sdk::config::PROGRAM_ID;
//! use solana_sdk::pubkey::Pubkey;
//!
//! let machine = Pubkey::new_unique();
//! let owner = Pubkey::new_unique();
//!
//! let ix = MakeOfferBuilder::new(PROGRAM_ID)
//!     .machine(machine)
//!     .owner(owner)
//!     .price_lamports(1_000_000_000)
//!     .max_duration(72)
//!     .disk(512)
//!     .build()
//!     .expect("should build instruction");
//! assert_eq!(ix.program_id, PROGRAM_ID);
//! ```

pub mod cancel_offer;
pub mod claim_rewards;
pub mod make_offer;
pub mod pda;
pub mod place_order;
pub mod refund_order;
pub mod renew_order;

pub use cancel_offer::CancelOfferBuilder;
pub use claim_rewards::ClaimRewardsBuilder;
pub use make_offer::MakeOfferBuilder;
pub use pda::{
    derive_associated_token_address, derive_machine_address, derive_order_address,
    derive_reward_address, derive_reward_machine_address, derive_reward_pool_address,
    derive_vault_address,
};
pub use place_order::PlaceOrderBuilder;
pub use refund_order::RefundOrderBuilder;
pub use renew_order::RenewOrderBuilder;

use sha2::{Digest, Sha256};

/// Computes the 8-byte Anchor discriminator for a global method.
///
/// Anchor prefixes instruction data with `sha256("global:<method>")[..8]`.
#[must_use]
pub fn anchor_discriminator(method: &str) -> [u8; 8] {
    let digest = Sha256::digest(format!("global:{}", method).as_bytes());
    let mut out = [0u8; 8];
    out.copy_from_slice(&digest[..8]);
    out
}
