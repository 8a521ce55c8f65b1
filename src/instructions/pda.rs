//! PDA derivation for marketplace accounts.
//!
//! All on-chain account addresses are recomputed from seeds on demand;
//! nothing is stored. Seed order and encoding are fixed by the on-chain
//! program and must not change.

use solana_sdk::pubkey::Pubkey;

use crate::config::{ASSOCIATED_TOKEN_PROGRAM_ID, TOKEN_PROGRAM_ID};
use crate::types::{MachineUuid, OrderId};

/// Seed for machine account PDAs.
pub const MACHINE_SEED: &[u8] = b"machine";

/// Seed for order account PDAs.
pub const ORDER_SEED: &[u8] = b"order";

/// Seed for the reward pool PDA.
pub const REWARD_POOL_SEED: &[u8] = b"reward-pool";

/// Seed for the vault PDA.
pub const VAULT_SEED: &[u8] = b"vault";

/// Seed for per-period reward PDAs.
pub const REWARD_SEED: &[u8] = b"reward";

/// Seed for per-period, per-machine reward PDAs.
pub const REWARD_MACHINE_SEED: &[u8] = b"reward-machine";

/// Derives the machine account PDA.
///
/// Seeds: `[b"machine", provider, uuid]`
#[must_use]
pub fn derive_machine_address(
    program_id: &Pubkey,
    provider: &Pubkey,
    uuid: &MachineUuid,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[MACHINE_SEED, provider.as_ref(), uuid.as_bytes()],
        program_id,
    )
}

/// Derives the order account PDA.
///
/// Seeds: `[b"order", buyer, order id (16 bytes, zero-padded)]`
#[must_use]
pub fn derive_order_address(
    program_id: &Pubkey,
    buyer: &Pubkey,
    order_id: &OrderId,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[ORDER_SEED, buyer.as_ref(), order_id.as_bytes()],
        program_id,
    )
}

/// Derives the reward pool PDA.
///
/// Seeds: `[b"reward-pool", mint]`
#[must_use]
pub fn derive_reward_pool_address(program_id: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[REWARD_POOL_SEED, mint.as_ref()], program_id)
}

/// Derives the vault PDA.
///
/// Seeds: `[b"vault", mint]`
#[must_use]
pub fn derive_vault_address(program_id: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[VAULT_SEED, mint.as_ref()], program_id)
}

/// Derives the per-period reward PDA.
///
/// Seeds: `[b"reward", period (u32 little-endian)]`
#[must_use]
pub fn derive_reward_address(program_id: &Pubkey, period: u32) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[REWARD_SEED, &period.to_le_bytes()], program_id)
}

/// Derives the per-period, per-machine reward PDA.
///
/// Seeds: `[b"reward-machine", period (u32 little-endian), owner, uuid]`
#[must_use]
pub fn derive_reward_machine_address(
    program_id: &Pubkey,
    period: u32,
    owner: &Pubkey,
    uuid: &MachineUuid,
) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            REWARD_MACHINE_SEED,
            &period.to_le_bytes(),
            owner.as_ref(),
            uuid.as_bytes(),
        ],
        program_id,
    )
}

/// Derives the associated token account for a wallet and mint.
///
/// Resolved against the associated-token program, not the marketplace
/// program. Seeds: `[wallet, token program, mint]`
#[must_use]
pub fn derive_associated_token_address(wallet: &Pubkey, mint: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[
            wallet.as_ref(),
            TOKEN_PROGRAM_ID.as_ref(),
            mint.as_ref(),
        ],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
}
