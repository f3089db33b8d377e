//! Two-token StableSwap pool account.

use curve_model::{
    calc_lp_tokens, calc_virtual_price, calc_withdraw, current_amp, simulate_swap_detailed,
    SwapQuote,
};
use solana_program::pubkey::Pubkey;

use crate::error::SdkError;
use crate::layout::{Cursor, Writer};
use crate::state::candle::{Candle, CANDLE_LEN};

pub const POOL_MAGIC: [u8; 8] = *b"POOLSWAP";
pub const HOURLY_CANDLES: usize = 24;
pub const DAILY_CANDLES: usize = 7;
pub const POOL_BLOOM_LEN: usize = 128;

/// Full account length: 416-byte fixed header, 128-byte bloom filter,
/// then 24 hourly and 7 daily 12-byte candles.
pub const POOL_LEN: usize =
    416 + POOL_BLOOM_LEN + (HOURLY_CANDLES + DAILY_CANDLES) * CANDLE_LEN;

/// Read-only mirror of on-chain pool state. Constructed only by decoding
/// an account buffer; replaced wholesale when a fresher fetch arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct Pool {
    pub authority: Pubkey,
    pub mint0: Pubkey,
    pub mint1: Pubkey,
    pub vault0: Pubkey,
    pub vault1: Pubkey,
    pub lp_mint: Pubkey,
    pub amp: u64,
    pub init_amp: u64,
    pub target_amp: u64,
    pub ramp_start: i64,
    pub ramp_stop: i64,
    pub fee_bps: u64,
    pub admin_fee_pct: u64,
    pub bal0: u64,
    pub bal1: u64,
    pub lp_supply: u64,
    pub admin_fee0: u64,
    pub admin_fee1: u64,
    pub vol0: u64,
    pub vol1: u64,
    pub paused: bool,
    pub bump: u8,
    pub vault0_bump: u8,
    pub vault1_bump: u8,
    pub lp_mint_bump: u8,
    pub pending_authority: Pubkey,
    pub authority_time: i64,
    pub pending_amp: u64,
    pub amp_time: i64,
    pub trade_count: u64,
    pub trade_sum: u64,
    pub max_price: u32,
    pub min_price: u32,
    pub hour_slot: u32,
    pub day_slot: u32,
    pub hour_idx: u8,
    pub day_idx: u8,
    pub bloom: [u8; POOL_BLOOM_LEN],
    pub hourly: [Candle; HOURLY_CANDLES],
    pub daily: [Candle; DAILY_CANDLES],
}

impl Pool {
    pub fn decode(data: &[u8]) -> Option<Self> {
        if data.len() < POOL_LEN || data[..8] != POOL_MAGIC {
            return None;
        }
        let mut cur = Cursor::new(&data[8..]);
        let authority = cur.pubkey()?;
        let mint0 = cur.pubkey()?;
        let mint1 = cur.pubkey()?;
        let vault0 = cur.pubkey()?;
        let vault1 = cur.pubkey()?;
        let lp_mint = cur.pubkey()?;
        let amp = cur.u64()?;
        let init_amp = cur.u64()?;
        let target_amp = cur.u64()?;
        let ramp_start = cur.i64()?;
        let ramp_stop = cur.i64()?;
        let fee_bps = cur.u64()?;
        let admin_fee_pct = cur.u64()?;
        let bal0 = cur.u64()?;
        let bal1 = cur.u64()?;
        let lp_supply = cur.u64()?;
        let admin_fee0 = cur.u64()?;
        let admin_fee1 = cur.u64()?;
        let vol0 = cur.u64()?;
        let vol1 = cur.u64()?;
        let paused = cur.bool()?;
        let bump = cur.u8()?;
        let vault0_bump = cur.u8()?;
        let vault1_bump = cur.u8()?;
        let lp_mint_bump = cur.u8()?;
        cur.skip(3)?;
        let pending_authority = cur.pubkey()?;
        let authority_time = cur.i64()?;
        let pending_amp = cur.u64()?;
        let amp_time = cur.i64()?;
        let trade_count = cur.u64()?;
        let trade_sum = cur.u64()?;
        let max_price = cur.u32()?;
        let min_price = cur.u32()?;
        let hour_slot = cur.u32()?;
        let day_slot = cur.u32()?;
        let hour_idx = cur.u8()?;
        let day_idx = cur.u8()?;
        cur.skip(6)?;
        let bloom = cur.array::<POOL_BLOOM_LEN>()?;
        let mut hourly = [Candle::default(); HOURLY_CANDLES];
        for slot in hourly.iter_mut() {
            *slot = Candle::decode(cur.chunk(CANDLE_LEN)?)?;
        }
        let mut daily = [Candle::default(); DAILY_CANDLES];
        for slot in daily.iter_mut() {
            *slot = Candle::decode(cur.chunk(CANDLE_LEN)?)?;
        }
        Some(Self {
            authority,
            mint0,
            mint1,
            vault0,
            vault1,
            lp_mint,
            amp,
            init_amp,
            target_amp,
            ramp_start,
            ramp_stop,
            fee_bps,
            admin_fee_pct,
            bal0,
            bal1,
            lp_supply,
            admin_fee0,
            admin_fee1,
            vol0,
            vol1,
            paused,
            bump,
            vault0_bump,
            vault1_bump,
            lp_mint_bump,
            pending_authority,
            authority_time,
            pending_amp,
            amp_time,
            trade_count,
            trade_sum,
            max_price,
            min_price,
            hour_slot,
            day_slot,
            hour_idx,
            day_idx,
            bloom,
            hourly,
            daily,
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut w = Writer::with_capacity(POOL_LEN);
        w.bytes(&POOL_MAGIC);
        w.pubkey(&self.authority);
        w.pubkey(&self.mint0);
        w.pubkey(&self.mint1);
        w.pubkey(&self.vault0);
        w.pubkey(&self.vault1);
        w.pubkey(&self.lp_mint);
        w.u64(self.amp);
        w.u64(self.init_amp);
        w.u64(self.target_amp);
        w.i64(self.ramp_start);
        w.i64(self.ramp_stop);
        w.u64(self.fee_bps);
        w.u64(self.admin_fee_pct);
        w.u64(self.bal0);
        w.u64(self.bal1);
        w.u64(self.lp_supply);
        w.u64(self.admin_fee0);
        w.u64(self.admin_fee1);
        w.u64(self.vol0);
        w.u64(self.vol1);
        w.bool(self.paused);
        w.u8(self.bump);
        w.u8(self.vault0_bump);
        w.u8(self.vault1_bump);
        w.u8(self.lp_mint_bump);
        w.pad(3);
        w.pubkey(&self.pending_authority);
        w.i64(self.authority_time);
        w.u64(self.pending_amp);
        w.i64(self.amp_time);
        w.u64(self.trade_count);
        w.u64(self.trade_sum);
        w.u32(self.max_price);
        w.u32(self.min_price);
        w.u32(self.hour_slot);
        w.u32(self.day_slot);
        w.u8(self.hour_idx);
        w.u8(self.day_idx);
        w.pad(6);
        w.bytes(&self.bloom);
        for candle in &self.hourly {
            candle.encode_into(&mut w);
        }
        for candle in &self.daily {
            candle.encode_into(&mut w);
        }
        w.finish(POOL_LEN)
    }

    /// Effective amplification at `now`, honoring a live ramp.
    pub fn amp_at(&self, now: i64) -> u64 {
        if self.ramp_stop > self.ramp_start {
            current_amp(
                self.init_amp,
                self.target_amp,
                self.ramp_start,
                self.ramp_stop,
                now,
            )
        } else {
            self.amp
        }
    }

    /// Quote a swap against current balances. `zero_for_one` selects the
    /// trade direction. Fails while the pool is paused.
    pub fn quote_swap(
        &self,
        zero_for_one: bool,
        amount_in: u64,
        now: i64,
    ) -> Result<SwapQuote, SdkError> {
        if self.paused {
            return Err(SdkError::PoolPaused);
        }
        let (bal_in, bal_out) = if zero_for_one {
            (self.bal0, self.bal1)
        } else {
            (self.bal1, self.bal0)
        };
        Ok(simulate_swap_detailed(
            bal_in,
            bal_out,
            amount_in,
            self.amp_at(now),
            self.fee_bps,
        )?)
    }

    /// LP tokens minted for a deposit at `now`.
    pub fn lp_for_deposit(&self, amount0: u64, amount1: u64, now: i64) -> Result<u64, SdkError> {
        if self.paused {
            return Err(SdkError::PoolPaused);
        }
        Ok(calc_lp_tokens(
            self.bal0,
            self.bal1,
            amount0,
            amount1,
            self.lp_supply,
            self.amp_at(now),
        )?)
    }

    /// Token amounts returned for burning `lp_amount`.
    pub fn withdraw_amounts(&self, lp_amount: u64) -> Result<(u64, u64), SdkError> {
        Ok(calc_withdraw(lp_amount, self.bal0, self.bal1, self.lp_supply)?)
    }

    /// Invariant per LP token, scaled by 1e18.
    pub fn virtual_price(&self, now: i64) -> Result<u128, SdkError> {
        Ok(calc_virtual_price(
            self.bal0,
            self.bal1,
            self.amp_at(now),
            self.lp_supply,
        )?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pool() -> Pool {
        let mut hourly = [Candle::default(); HOURLY_CANDLES];
        hourly[0] = Candle {
            open: 1_000_000,
            high: 1_001_000,
            low: 999_000,
            close: 1_000_000,
            volume: 1000,
        };
        let mut daily = [Candle::default(); DAILY_CANDLES];
        daily[6] = Candle {
            open: 998_000,
            high: 1_002_500,
            low: 997_000,
            close: 1_000_250,
            volume: 42,
        };
        Pool {
            authority: Pubkey::new_unique(),
            mint0: Pubkey::new_unique(),
            mint1: Pubkey::new_unique(),
            vault0: Pubkey::new_unique(),
            vault1: Pubkey::new_unique(),
            lp_mint: Pubkey::new_unique(),
            amp: 100,
            init_amp: 100,
            target_amp: 200,
            ramp_start: 1000,
            ramp_stop: 2000,
            fee_bps: 30,
            admin_fee_pct: 20,
            bal0: 1_000_000_000_000,
            bal1: 1_000_000_000_000,
            lp_supply: 2_000_000_000_000,
            admin_fee0: 12,
            admin_fee1: 34,
            vol0: 5_000_000,
            vol1: 5_100_000,
            paused: false,
            bump: 254,
            vault0_bump: 253,
            vault1_bump: 252,
            lp_mint_bump: 251,
            pending_authority: Pubkey::default(),
            authority_time: -1,
            pending_amp: 0,
            amp_time: 0,
            trade_count: 77,
            trade_sum: 9_000_000,
            max_price: 1_002_500,
            min_price: 997_000,
            hour_slot: 480_000,
            day_slot: 20_000,
            hour_idx: 3,
            day_idx: 6,
            bloom: [0xa5; POOL_BLOOM_LEN],
            hourly,
            daily,
        }
    }

    #[test]
    fn round_trip_preserves_every_field() {
        let pool = sample_pool();
        let bytes = pool.encode();
        assert_eq!(bytes.len(), POOL_LEN);
        assert_eq!(Pool::decode(&bytes), Some(pool));
    }

    #[test]
    fn rejects_short_buffer_and_wrong_magic() {
        let bytes = sample_pool().encode();
        assert_eq!(Pool::decode(&bytes[..POOL_LEN - 1]), None);
        for i in 0..8 {
            let mut corrupt = bytes.clone();
            corrupt[i] ^= 0x01;
            assert_eq!(Pool::decode(&corrupt), None, "byte {i}");
        }
    }

    #[test]
    fn amp_ramp_interpolates() {
        let pool = sample_pool();
        assert_eq!(pool.amp_at(500), 100);
        assert_eq!(pool.amp_at(1500), 150);
        assert_eq!(pool.amp_at(2500), 200);
        let mut idle = pool;
        idle.ramp_stop = idle.ramp_start;
        assert_eq!(idle.amp_at(1500), idle.amp);
    }

    #[test]
    fn quote_respects_pause_flag() {
        let mut pool = sample_pool();
        let quote = pool.quote_swap(true, 1_000_000_000, 500).unwrap();
        assert!(quote.amount_out > 0 && quote.amount_out < 1_000_000_000);
        pool.paused = true;
        assert_eq!(
            pool.quote_swap(true, 1_000_000_000, 500),
            Err(SdkError::PoolPaused)
        );
    }

    #[test]
    fn withdraw_and_virtual_price_use_pool_state() {
        let pool = sample_pool();
        let (a0, a1) = pool.withdraw_amounts(200_000_000_000).unwrap();
        assert_eq!(a0, 100_000_000_000);
        assert_eq!(a1, 100_000_000_000);
        let vp = pool.virtual_price(500).unwrap();
        assert!(vp.abs_diff(curve_model::PRECISION) < 1_000_000);
    }
}
