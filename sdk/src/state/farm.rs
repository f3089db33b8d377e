//! Reward farm accounts.

use solana_program::pubkey::Pubkey;

use crate::constants::ACC_REWARD_SCALE;
use crate::layout::{Cursor, Writer};

pub const FARM_MAGIC: [u8; 8] = *b"FARMSWAP";
pub const FARM_LEN: usize = 120;

pub const USER_FARM_MAGIC: [u8; 8] = *b"UFARMSWA";
pub const USER_FARM_LEN: usize = 96;

/// Farm-wide reward state. `acc_reward` is a 1e12 fixed-point accumulator
/// advanced by the on-chain program, not by this layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Farm {
    pub pool: Pubkey,
    pub reward_mint: Pubkey,
    pub reward_rate: u64,
    pub start_time: i64,
    pub end_time: i64,
    pub total_staked: u64,
    pub acc_reward: u64,
    pub last_update: i64,
}

impl Farm {
    pub fn decode(data: &[u8]) -> Option<Self> {
        if data.len() < FARM_LEN || data[..8] != FARM_MAGIC {
            return None;
        }
        let mut cur = Cursor::new(&data[8..]);
        Some(Self {
            pool: cur.pubkey()?,
            reward_mint: cur.pubkey()?,
            reward_rate: cur.u64()?,
            start_time: cur.i64()?,
            end_time: cur.i64()?,
            total_staked: cur.u64()?,
            acc_reward: cur.u64()?,
            last_update: cur.i64()?,
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut w = Writer::with_capacity(FARM_LEN);
        w.bytes(&FARM_MAGIC);
        w.pubkey(&self.pool);
        w.pubkey(&self.reward_mint);
        w.u64(self.reward_rate);
        w.i64(self.start_time);
        w.i64(self.end_time);
        w.u64(self.total_staked);
        w.u64(self.acc_reward);
        w.i64(self.last_update);
        w.finish(FARM_LEN)
    }

    pub fn is_active(&self, now: i64) -> bool {
        now >= self.start_time && now < self.end_time
    }
}

/// Per-user stake. `farm` is a weak back-reference by pubkey value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserFarm {
    pub owner: Pubkey,
    pub farm: Pubkey,
    pub staked: u64,
    pub reward_debt: u64,
    pub lock_end: i64,
}

impl UserFarm {
    pub fn decode(data: &[u8]) -> Option<Self> {
        if data.len() < USER_FARM_LEN || data[..8] != USER_FARM_MAGIC {
            return None;
        }
        let mut cur = Cursor::new(&data[8..]);
        Some(Self {
            owner: cur.pubkey()?,
            farm: cur.pubkey()?,
            staked: cur.u64()?,
            reward_debt: cur.u64()?,
            lock_end: cur.i64()?,
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut w = Writer::with_capacity(USER_FARM_LEN);
        w.bytes(&USER_FARM_MAGIC);
        w.pubkey(&self.owner);
        w.pubkey(&self.farm);
        w.u64(self.staked);
        w.u64(self.reward_debt);
        w.i64(self.lock_end);
        w.finish(USER_FARM_LEN)
    }

    /// Reward claimable against the farm's current accumulator:
    /// `staked * acc_reward / 1e12 - reward_debt`.
    pub fn pending_reward(&self, acc_reward: u64) -> u64 {
        let accrued = self.staked as u128 * acc_reward as u128 / ACC_REWARD_SCALE;
        accrued.saturating_sub(self.reward_debt as u128) as u64
    }
}
