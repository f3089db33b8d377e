//! Protocol constants and the deployed program id.

use solana_program::{pubkey, pubkey::Pubkey};

/// Deployed Poolswap program id (mainnet and devnet share one id)
pub const PROGRAM_ID: Pubkey = pubkey!("Dn7kBYxRB5PVRueXzmaZknakb4kZga3kywDKg8yqjsEX");

// Seed for the pool state PDA
// Derived with: [POOL_SEED, mint0, mint1]
pub const POOL_SEED: &[u8] = b"pool";

// Seed for token vault PDAs
// Derived with: [VAULT_SEED, pool_pubkey, mint]
pub const VAULT_SEED: &[u8] = b"vault";

// Seed for the LP mint PDA
// Derived with: [LP_MINT_SEED, pool_pubkey]
pub const LP_MINT_SEED: &[u8] = b"lp_mint";

// Seed for farm state PDAs
pub const FARM_SEED: &[u8] = b"farm";

// Seed for per-user farm PDAs
// Derived with: [USER_FARM_SEED, farm_pubkey, owner]
pub const USER_FARM_SEED: &[u8] = b"user_farm";

// Seed for lottery state PDAs
pub const LOTTERY_SEED: &[u8] = b"lottery";

// Seed for virtual-pool slot PDAs
pub const VPOOL_SEED: &[u8] = b"vpool";

// LIMITS AND SCALES

// Maximum swap fee the program accepts (100%)
pub const MAX_FEE_BPS: u64 = 10_000;

// Reward accumulator scale for farms (1e12 fixed point)
pub const ACC_REWARD_SCALE: u128 = 1_000_000_000_000;

// Account discriminators are always 8 ASCII bytes
pub const DISCRIMINATOR_LEN: usize = 8;
