//! Instruction payload construction.
//!
//! Every payload starts with an 8-byte discriminator unique to the
//! operation, followed by tightly packed little-endian arguments with no
//! padding. The byte layouts are a fixed external contract consumed by the
//! transaction layer; account metas are assembled there, not here.

use solana_program::pubkey::Pubkey;

pub type Discriminator = [u8; 8];

pub const INITIALIZE_POOL: Discriminator = [0xaf, 0xaf, 0x6d, 0x1f, 0x0d, 0x98, 0x9b, 0xed];
pub const SWAP: Discriminator = [0xf8, 0xc6, 0x9e, 0x91, 0xe1, 0x75, 0x87, 0xc8];
pub const ADD_LIQUIDITY: Discriminator = [0xb5, 0x9d, 0x59, 0x43, 0x8f, 0xb6, 0x34, 0x48];
pub const REMOVE_LIQUIDITY: Discriminator = [0x50, 0x5f, 0xd5, 0xd3, 0x4b, 0x97, 0x15, 0x89];
pub const RAMP_AMP: Discriminator = [0x2b, 0xa5, 0x9c, 0x22, 0x10, 0xd1, 0x4f, 0x6a];
pub const STOP_RAMP: Discriminator = [0x97, 0x3c, 0x1f, 0x60, 0x8e, 0xd4, 0x21, 0x05];
pub const SET_FEE: Discriminator = [0x12, 0xee, 0x5a, 0xb7, 0x83, 0x3c, 0x99, 0x41];
pub const PAUSE: Discriminator = [0x61, 0x44, 0xd1, 0x0c, 0x27, 0x8a, 0xee, 0x93];
pub const UNPAUSE: Discriminator = [0x76, 0x0a, 0x2e, 0x55, 0xc1, 0x9f, 0x38, 0xd2];
pub const TRANSFER_AUTHORITY: Discriminator = [0x08, 0xc3, 0x7b, 0x9a, 0x54, 0xe6, 0x02, 0x1f];
pub const ACCEPT_AUTHORITY: Discriminator = [0xc4, 0x19, 0x86, 0x33, 0x70, 0x5b, 0xaa, 0x6e];
pub const STAKE: Discriminator = [0xce, 0xd3, 0x10, 0xcc, 0x2a, 0xf0, 0x47, 0x62];
pub const UNSTAKE: Discriminator = [0x5a, 0x7e, 0x0b, 0x91, 0xd8, 0x24, 0x6c, 0x3f];
pub const CLAIM_REWARDS: Discriminator = [0x04, 0xa9, 0xe0, 0x17, 0x45, 0xbb, 0x5d, 0x80];
pub const BUY_TICKETS: Discriminator = [0xe2, 0x58, 0x3d, 0x4a, 0x0f, 0x79, 0x26, 0xc5];
pub const DRAW_LOTTERY: Discriminator = [0x39, 0x65, 0x88, 0x12, 0xea, 0x01, 0xb4, 0x7d];
pub const CLAIM_PRIZE: Discriminator = [0x8d, 0x30, 0x57, 0xfe, 0x1c, 0x42, 0x09, 0xa6];
pub const VPOOL_CREATE: Discriminator = [0x4f, 0xcb, 0x22, 0x68, 0x95, 0x0e, 0xd7, 0x31];
pub const VPOOL_BUY: Discriminator = [0x1d, 0x06, 0xf4, 0x83, 0x29, 0x67, 0x4e, 0xb0];
pub const VPOOL_SELL: Discriminator = [0x72, 0x9e, 0x41, 0x0d, 0xc6, 0x35, 0x88, 0x5a];
pub const VPOOL_GRADUATE: Discriminator = [0xa0, 0x5c, 0x18, 0xe7, 0x3b, 0x92, 0x64, 0x0f];

/// Symbolic operation name to discriminator bytes. Built once, never
/// mutated.
pub static DISCRIMINATORS: &[(&str, Discriminator)] = &[
    ("initialize_pool", INITIALIZE_POOL),
    ("swap", SWAP),
    ("add_liquidity", ADD_LIQUIDITY),
    ("remove_liquidity", REMOVE_LIQUIDITY),
    ("ramp_amp", RAMP_AMP),
    ("stop_ramp", STOP_RAMP),
    ("set_fee", SET_FEE),
    ("pause", PAUSE),
    ("unpause", UNPAUSE),
    ("transfer_authority", TRANSFER_AUTHORITY),
    ("accept_authority", ACCEPT_AUTHORITY),
    ("stake", STAKE),
    ("unstake", UNSTAKE),
    ("claim_rewards", CLAIM_REWARDS),
    ("buy_tickets", BUY_TICKETS),
    ("draw_lottery", DRAW_LOTTERY),
    ("claim_prize", CLAIM_PRIZE),
    ("vpool_create", VPOOL_CREATE),
    ("vpool_buy", VPOOL_BUY),
    ("vpool_sell", VPOOL_SELL),
    ("vpool_graduate", VPOOL_GRADUATE),
];

/// Look up a discriminator by operation name.
pub fn discriminator(name: &str) -> Option<Discriminator> {
    DISCRIMINATORS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|&(_, d)| d)
}

/// Identify an instruction payload by its leading discriminator.
pub fn identify(data: &[u8]) -> Option<&'static str> {
    let tag = data.get(..8)?;
    DISCRIMINATORS
        .iter()
        .find(|(_, d)| d == tag)
        .map(|&(n, _)| n)
}

fn payload(disc: Discriminator, args_len: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(8 + args_len);
    data.extend_from_slice(&disc);
    data
}

pub fn initialize_pool(amp: u64, fee_bps: u64, admin_fee_pct: u64) -> Vec<u8> {
    let mut data = payload(INITIALIZE_POOL, 24);
    data.extend_from_slice(&amp.to_le_bytes());
    data.extend_from_slice(&fee_bps.to_le_bytes());
    data.extend_from_slice(&admin_fee_pct.to_le_bytes());
    data
}

/// `direction` is 0 for token0 -> token1, 1 for the reverse.
pub fn swap(amount_in: u64, min_amount_out: u64, direction: u8) -> Vec<u8> {
    let mut data = payload(SWAP, 17);
    data.extend_from_slice(&amount_in.to_le_bytes());
    data.extend_from_slice(&min_amount_out.to_le_bytes());
    data.push(direction);
    data
}

pub fn add_liquidity(amount0: u64, amount1: u64, min_lp: u64) -> Vec<u8> {
    let mut data = payload(ADD_LIQUIDITY, 24);
    data.extend_from_slice(&amount0.to_le_bytes());
    data.extend_from_slice(&amount1.to_le_bytes());
    data.extend_from_slice(&min_lp.to_le_bytes());
    data
}

pub fn remove_liquidity(lp_amount: u64, min_amount0: u64, min_amount1: u64) -> Vec<u8> {
    let mut data = payload(REMOVE_LIQUIDITY, 24);
    data.extend_from_slice(&lp_amount.to_le_bytes());
    data.extend_from_slice(&min_amount0.to_le_bytes());
    data.extend_from_slice(&min_amount1.to_le_bytes());
    data
}

pub fn ramp_amp(target_amp: u64, ramp_stop: i64) -> Vec<u8> {
    let mut data = payload(RAMP_AMP, 16);
    data.extend_from_slice(&target_amp.to_le_bytes());
    data.extend_from_slice(&ramp_stop.to_le_bytes());
    data
}

pub fn stop_ramp() -> Vec<u8> {
    payload(STOP_RAMP, 0)
}

pub fn set_fee(fee_bps: u64) -> Vec<u8> {
    let mut data = payload(SET_FEE, 8);
    data.extend_from_slice(&fee_bps.to_le_bytes());
    data
}

pub fn pause() -> Vec<u8> {
    payload(PAUSE, 0)
}

pub fn unpause() -> Vec<u8> {
    payload(UNPAUSE, 0)
}

pub fn transfer_authority(new_authority: &Pubkey) -> Vec<u8> {
    let mut data = payload(TRANSFER_AUTHORITY, 32);
    data.extend_from_slice(new_authority.as_ref());
    data
}

pub fn accept_authority() -> Vec<u8> {
    payload(ACCEPT_AUTHORITY, 0)
}

pub fn stake(amount: u64) -> Vec<u8> {
    let mut data = payload(STAKE, 8);
    data.extend_from_slice(&amount.to_le_bytes());
    data
}

pub fn unstake(amount: u64) -> Vec<u8> {
    let mut data = payload(UNSTAKE, 8);
    data.extend_from_slice(&amount.to_le_bytes());
    data
}

pub fn claim_rewards() -> Vec<u8> {
    payload(CLAIM_REWARDS, 0)
}

pub fn buy_tickets(count: u64) -> Vec<u8> {
    let mut data = payload(BUY_TICKETS, 8);
    data.extend_from_slice(&count.to_le_bytes());
    data
}

pub fn draw_lottery() -> Vec<u8> {
    payload(DRAW_LOTTERY, 0)
}

pub fn claim_prize() -> Vec<u8> {
    payload(CLAIM_PRIZE, 0)
}

pub fn vpool_create(base_price: u64, slope: u64, graduation_target: u64) -> Vec<u8> {
    let mut data = payload(VPOOL_CREATE, 24);
    data.extend_from_slice(&base_price.to_le_bytes());
    data.extend_from_slice(&slope.to_le_bytes());
    data.extend_from_slice(&graduation_target.to_le_bytes());
    data
}

pub fn vpool_buy(sol_in: u64, min_tokens_out: u64) -> Vec<u8> {
    let mut data = payload(VPOOL_BUY, 16);
    data.extend_from_slice(&sol_in.to_le_bytes());
    data.extend_from_slice(&min_tokens_out.to_le_bytes());
    data
}

pub fn vpool_sell(token_amount: u64, min_sol_out: u64) -> Vec<u8> {
    let mut data = payload(VPOOL_SELL, 16);
    data.extend_from_slice(&token_amount.to_le_bytes());
    data.extend_from_slice(&min_sol_out.to_le_bytes());
    data
}

pub fn vpool_graduate() -> Vec<u8> {
    payload(VPOOL_GRADUATE, 0)
}
