//! N-token StableSwap pool account (2..=8 tokens).
//!
//! The on-chain layout reserves capacity for eight tokens in every parallel
//! array; entries past `n_tokens` are decode artifacts and are dropped here
//! rather than exposed.

use curve_model::{calc_d_n, calc_y_n, CurveError, BPS_DENOM, MAX_TOKENS};
use solana_program::pubkey::Pubkey;

use crate::error::SdkError;
use crate::layout::{Cursor, Writer};

pub const NPOOL_MAGIC: [u8; 8] = *b"NPOOLSWA";
pub const NPOOL_LEN: usize = 800;

#[derive(Debug, Clone, PartialEq)]
pub struct NPool {
    pub authority: Pubkey,
    pub n_tokens: u8,
    pub paused: bool,
    pub bump: u8,
    pub amp: u64,
    pub fee_bps: u64,
    pub admin_fee_pct: u64,
    pub lp_supply: u64,
    pub mints: Vec<Pubkey>,
    pub vaults: Vec<Pubkey>,
    pub lp_mint: Pubkey,
    pub balances: Vec<u64>,
    pub admin_fees: Vec<u64>,
    pub total_volume: u64,
    pub trade_count: u64,
    pub last_trade_slot: u64,
}

impl NPool {
    pub fn decode(data: &[u8]) -> Option<Self> {
        if data.len() < NPOOL_LEN || data[..8] != NPOOL_MAGIC {
            return None;
        }
        let mut cur = Cursor::new(&data[8..]);
        let authority = cur.pubkey()?;
        let n_tokens = cur.u8()?;
        if !(2..=MAX_TOKENS as u8).contains(&n_tokens) {
            return None;
        }
        let paused = cur.bool()?;
        let bump = cur.u8()?;
        cur.skip(5)?;
        let amp = cur.u64()?;
        let fee_bps = cur.u64()?;
        let admin_fee_pct = cur.u64()?;
        let lp_supply = cur.u64()?;
        let n = n_tokens as usize;
        let mut mints = Vec::with_capacity(n);
        for i in 0..MAX_TOKENS {
            let key = cur.pubkey()?;
            if i < n {
                mints.push(key);
            }
        }
        let mut vaults = Vec::with_capacity(n);
        for i in 0..MAX_TOKENS {
            let key = cur.pubkey()?;
            if i < n {
                vaults.push(key);
            }
        }
        let lp_mint = cur.pubkey()?;
        let mut balances = Vec::with_capacity(n);
        for i in 0..MAX_TOKENS {
            let bal = cur.u64()?;
            if i < n {
                balances.push(bal);
            }
        }
        let mut admin_fees = Vec::with_capacity(n);
        for i in 0..MAX_TOKENS {
            let fee = cur.u64()?;
            if i < n {
                admin_fees.push(fee);
            }
        }
        let total_volume = cur.u64()?;
        let trade_count = cur.u64()?;
        let last_trade_slot = cur.u64()?;
        Some(Self {
            authority,
            n_tokens,
            paused,
            bump,
            amp,
            fee_bps,
            admin_fee_pct,
            lp_supply,
            mints,
            vaults,
            lp_mint,
            balances,
            admin_fees,
            total_volume,
            trade_count,
            last_trade_slot,
        })
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut w = Writer::with_capacity(NPOOL_LEN);
        w.bytes(&NPOOL_MAGIC);
        w.pubkey(&self.authority);
        w.u8(self.n_tokens);
        w.bool(self.paused);
        w.u8(self.bump);
        w.pad(5);
        w.u64(self.amp);
        w.u64(self.fee_bps);
        w.u64(self.admin_fee_pct);
        w.u64(self.lp_supply);
        for i in 0..MAX_TOKENS {
            match self.mints.get(i) {
                Some(key) => w.pubkey(key),
                None => w.pad(32),
            }
        }
        for i in 0..MAX_TOKENS {
            match self.vaults.get(i) {
                Some(key) => w.pubkey(key),
                None => w.pad(32),
            }
        }
        w.pubkey(&self.lp_mint);
        for i in 0..MAX_TOKENS {
            w.u64(self.balances.get(i).copied().unwrap_or(0));
        }
        for i in 0..MAX_TOKENS {
            w.u64(self.admin_fees.get(i).copied().unwrap_or(0));
        }
        w.u64(self.total_volume);
        w.u64(self.trade_count);
        w.u64(self.last_trade_slot);
        w.finish(NPOOL_LEN)
    }

    /// Quote a swap of `amount_in` of token `i` for token `j` against
    /// current balances. Fee on the gross output, floor division.
    pub fn quote_swap(&self, i: usize, j: usize, amount_in: u64) -> Result<u64, SdkError> {
        if self.paused {
            return Err(SdkError::PoolPaused);
        }
        let n = self.n_tokens as usize;
        if i == j || i >= n || j >= n {
            return Err(SdkError::InvalidTokenIndex);
        }
        let d = calc_d_n(&self.balances, self.amp)?;
        let mut moved = self.balances.clone();
        moved[i] = moved[i]
            .checked_add(amount_in)
            .ok_or(CurveError::Overflow)?;
        let new_j = calc_y_n(j, &moved, d, self.amp)?;
        let gross = (self.balances[j] as u128)
            .checked_sub(new_j)
            .ok_or(CurveError::Domain)?;
        let fee = gross * self.fee_bps as u128 / BPS_DENOM;
        Ok((gross - fee) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_npool(n: u8) -> NPool {
        let n_usize = n as usize;
        NPool {
            authority: Pubkey::new_unique(),
            n_tokens: n,
            paused: false,
            bump: 255,
            amp: 100,
            fee_bps: 30,
            admin_fee_pct: 10,
            lp_supply: 3_000_000_000_000,
            mints: (0..n_usize).map(|_| Pubkey::new_unique()).collect(),
            vaults: (0..n_usize).map(|_| Pubkey::new_unique()).collect(),
            lp_mint: Pubkey::new_unique(),
            balances: vec![1_000_000_000_000; n_usize],
            admin_fees: vec![0; n_usize],
            total_volume: 123,
            trade_count: 4,
            last_trade_slot: 99,
        }
    }

    #[test]
    fn round_trip_truncates_to_token_count() {
        for n in [2u8, 3, 8] {
            let npool = sample_npool(n);
            let bytes = npool.encode();
            assert_eq!(bytes.len(), NPOOL_LEN);
            let decoded = NPool::decode(&bytes).unwrap();
            assert_eq!(decoded, npool);
            assert_eq!(decoded.mints.len(), n as usize);
            assert_eq!(decoded.balances.len(), n as usize);
        }
    }

    #[test]
    fn rejects_bad_token_count_and_magic() {
        let mut bytes = sample_npool(3).encode();
        assert!(NPool::decode(&bytes[..NPOOL_LEN - 1]).is_none());
        bytes[0] ^= 0x20;
        assert!(NPool::decode(&bytes).is_none());

        let mut over = sample_npool(3);
        over.n_tokens = 9;
        assert!(NPool::decode(&over.encode()).is_none());
    }

    #[test]
    fn quote_swap_drains_output_side() {
        let npool = sample_npool(4);
        let out = npool.quote_swap(0, 2, 1_000_000_000).unwrap();
        assert!(out > 0 && out < 1_000_000_000);
        // fee-free quote is strictly better
        let mut free = sample_npool(4);
        free.fee_bps = 0;
        assert!(free.quote_swap(0, 2, 1_000_000_000).unwrap() > out);
    }

    #[test]
    fn quote_swap_validates_indices_and_pause() {
        let mut npool = sample_npool(3);
        assert_eq!(
            npool.quote_swap(1, 1, 100),
            Err(SdkError::InvalidTokenIndex)
        );
        assert_eq!(
            npool.quote_swap(0, 3, 100),
            Err(SdkError::InvalidTokenIndex)
        );
        npool.paused = true;
        assert_eq!(npool.quote_swap(0, 1, 100), Err(SdkError::PoolPaused));
    }
}
